use crate::models::Firm;

/// Normalize a raw search term into a lower-cased needle.
///
/// Whitespace-only input yields `None`, meaning "no filtering".
pub fn normalize_search_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring match against name, address or any specialty
///
/// `needle` must already be lower-cased (see [`normalize_search_term`]).
#[inline]
pub fn matches_search_term(firm: &Firm, needle: &str) -> bool {
    firm.name.to_lowercase().contains(needle)
        || firm.address.to_lowercase().contains(needle)
        || firm
            .specialties
            .iter()
            .any(|specialty| specialty.to_lowercase().contains(needle))
}
