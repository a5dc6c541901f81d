use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::models::Suggestion;

/// Default pause between a keystroke and the lookup it triggers
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Anything that can turn a partial address into suggestions
pub trait SuggestionSource {
    fn suggest(&self, query: &str) -> impl Future<Output = Vec<Suggestion>> + Send;
}

/// Handle for one issued lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic request-generation counter.
///
/// Every new lookup takes a ticket; only the holder of the latest ticket may
/// apply its result.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

/// What happened to a lookup started by [`AddressAutocomplete::on_input`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Results were applied; holds the number of suggestions
    Applied(usize),
    /// A newer keystroke arrived first; results (if any) were discarded
    Superseded,
    /// Blank input cleared the suggestions without a lookup
    Cleared,
}

/// Debounced address autocomplete with last-submitted-wins ordering
pub struct AddressAutocomplete<S> {
    source: S,
    generation: RequestGeneration,
    debounce: Duration,
    suggestions: RwLock<Vec<Suggestion>>,
}

impl<S: SuggestionSource> AddressAutocomplete<S> {
    pub fn new(source: S, debounce: Duration) -> Self {
        Self {
            source,
            generation: RequestGeneration::new(),
            debounce,
            suggestions: RwLock::new(Vec::new()),
        }
    }

    /// Handle a change of the address input
    pub async fn on_input(&self, query: &str) -> LookupOutcome {
        let ticket = self.generation.issue();

        if query.trim().is_empty() {
            self.suggestions.write().await.clear();
            return LookupOutcome::Cleared;
        }

        tokio::time::sleep(self.debounce).await;
        if !self.generation.is_current(ticket) {
            tracing::trace!("Lookup for {:?} superseded before dispatch", query);
            return LookupOutcome::Superseded;
        }

        let results = self.source.suggest(query).await;

        let mut current = self.suggestions.write().await;
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale suggestions for {:?}", query);
            return LookupOutcome::Superseded;
        }
        let count = results.len();
        *current = results;
        LookupOutcome::Applied(count)
    }

    /// Picking a suggestion hides the list and cancels pending lookups
    pub async fn choose(&self, index: usize) -> Option<Suggestion> {
        self.generation.issue();
        let mut current = self.suggestions.write().await;
        let chosen = current.get(index).cloned();
        current.clear();
        chosen
    }

    pub async fn suggestions(&self) -> Vec<Suggestion> {
        self.suggestions.read().await.clone()
    }
}
