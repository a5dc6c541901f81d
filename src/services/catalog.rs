use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::models::{Coordinates, Firm};

/// Errors that can occur when loading a firm catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate firm id: {0}")]
    DuplicateId(u32),
}

/// Immutable list of firms shared by every request
#[derive(Debug, Clone)]
pub struct FirmCatalog {
    firms: Arc<Vec<Firm>>,
}

impl FirmCatalog {
    pub fn new(firms: Vec<Firm>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(firms.len());
        for firm in &firms {
            if !seen.insert(firm.id) {
                return Err(CatalogError::DuplicateId(firm.id));
            }
        }

        Ok(Self {
            firms: Arc::new(firms),
        })
    }

    /// Catalog backed by the built-in Charlotte-area sample set
    pub fn sample() -> Self {
        Self {
            firms: Arc::new(sample_firms()),
        }
    }

    /// Load firms from a JSON array on disk
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let firms: Vec<Firm> = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded {} firms from {}", firms.len(), path.as_ref().display());
        Self::new(firms)
    }

    pub fn firms(&self) -> Arc<Vec<Firm>> {
        Arc::clone(&self.firms)
    }

    pub fn len(&self) -> usize {
        self.firms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.firms.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn firm(
    id: u32,
    name: &str,
    address: &str,
    (longitude, latitude): (f64, f64),
    phone: &str,
    email: &str,
    rating: f64,
    review_count: u32,
    specialties: &[&str],
) -> Firm {
    Firm {
        id,
        name: name.to_string(),
        address: address.to_string(),
        coordinates: Coordinates::new(longitude, latitude),
        phone: phone.to_string(),
        email: email.to_string(),
        rating,
        review_count,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        distance: None,
    }
}

/// Sample closing firms around Charlotte, NC
pub fn sample_firms() -> Vec<Firm> {
    vec![
        firm(
            1,
            "Charlotte Legal Partners",
            "123 Main Street, Charlotte, NC 28202",
            (-80.8431, 35.2271),
            "(704) 555-0123",
            "contact@charlottelegal.com",
            4.8,
            24,
            &["Real Estate", "Closings", "Title Work"],
        ),
        firm(
            2,
            "Piedmont Closing Services",
            "456 Trade Street, Charlotte, NC 28202",
            (-80.7550, 35.3180),
            "(704) 555-0456",
            "info@piedmontclosing.com",
            4.9,
            31,
            &["Residential Closings", "Commercial Real Estate"],
        ),
        firm(
            3,
            "Queen City Title & Law",
            "789 South Blvd, Charlotte, NC 28203",
            (-80.8850, 35.1950),
            "(704) 555-0789",
            "hello@queencitytitle.com",
            4.7,
            18,
            &["Title Insurance", "Real Estate Law"],
        ),
        firm(
            4,
            "Uptown Real Estate Law",
            "321 North Tryon Street, Charlotte, NC 28202",
            (-80.9200, 35.2650),
            "(704) 555-0321",
            "contact@uptownrelaw.com",
            4.6,
            42,
            &["Luxury Properties", "Investment Real Estate"],
        ),
        firm(
            5,
            "SouthPark Legal Group",
            "654 Park Road, Charlotte, NC 28209",
            (-80.8150, 35.2050),
            "(704) 555-0654",
            "info@southparklegal.com",
            4.8,
            29,
            &["Residential Closings", "Refinancing"],
        ),
        firm(
            6,
            "Matthews Closing Company",
            "987 Matthews Township Pkwy, Matthews, NC 28105",
            (-80.7200, 35.1200),
            "(704) 555-0987",
            "contact@matthewsclosing.com",
            4.5,
            15,
            &["Suburban Properties", "First-Time Buyers"],
        ),
        firm(
            7,
            "Gastonia Real Estate Law",
            "789 East Franklin Blvd, Gastonia, NC 28054",
            (-81.1873, 35.2621),
            "(704) 555-1234",
            "info@gastonialaw.com",
            4.4,
            22,
            &["Commercial Real Estate", "Property Development"],
        ),
        firm(
            8,
            "Concord Title Services",
            "456 Union Street, Concord, NC 28025",
            (-80.5794, 35.4087),
            "(704) 555-5678",
            "contact@concordtitle.com",
            4.6,
            19,
            &["Title Insurance", "Closing Services"],
        ),
        firm(
            9,
            "Rock Hill Legal Group",
            "123 Main Street, Rock Hill, SC 29730",
            (-81.0251, 34.9249),
            "(803) 555-9012",
            "info@rockhillegal.com",
            4.7,
            35,
            &["Residential Closings", "Real Estate Litigation"],
        ),
        firm(
            10,
            "Mooresville Closing Solutions",
            "321 Broad Street, Mooresville, NC 28115",
            (-80.8107, 35.5851),
            "(704) 555-3456",
            "solutions@mooresvilleclosing.com",
            4.3,
            28,
            &["Lake Properties", "Vacation Homes"],
        ),
        firm(
            11,
            "Hickory Title & Trust",
            "654 Highway 70 SW, Hickory, NC 28602",
            (-81.3412, 35.7344),
            "(828) 555-7890",
            "trust@hickorytitle.com",
            4.8,
            16,
            &["Rural Properties", "Land Development"],
        ),
        firm(
            12,
            "Statesville Real Estate Partners",
            "789 Davie Avenue, Statesville, NC 28677",
            (-80.8873, 35.7826),
            "(704) 555-2468",
            "partners@statesvillere.com",
            4.5,
            31,
            &["Agricultural Properties", "Commercial Development"],
        ),
        firm(
            13,
            "Monroe Legal Services",
            "456 Windsor Forest Drive, Monroe, NC 28110",
            (-80.5495, 34.9854),
            "(704) 555-1357",
            "services@monroelegal.com",
            4.2,
            24,
            &["First-Time Buyers", "Residential Closings"],
        ),
        firm(
            14,
            "Huntersville Title Company",
            "987 Gilead Road, Huntersville, NC 28078",
            (-80.8426, 35.4107),
            "(704) 555-8024",
            "title@huntersvilletitle.com",
            4.9,
            42,
            &["New Construction", "Custom Homes"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog() {
        let catalog = FirmCatalog::sample();
        assert_eq!(catalog.len(), 14);

        let firms = catalog.firms();
        let ids: Vec<u32> = firms.iter().map(|f| f.id).collect();
        assert_eq!(ids, (1..=14).collect::<Vec<_>>());
        assert!(firms.iter().all(|f| f.distance.is_none()));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut firms = sample_firms();
        firms[3].id = 1;

        assert!(matches!(FirmCatalog::new(firms), Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn test_parse_catalog_json() {
        let json = r#"[{
            "id": 42,
            "name": "Lake Norman Closings",
            "address": "1 Harbor Way, Cornelius, NC 28031",
            "coordinates": [-80.8601, 35.4868],
            "phone": "(704) 555-4242",
            "email": "hello@lnclosings.com",
            "rating": 4.1,
            "reviewCount": 7
        }]"#;
        let firms: Vec<Firm> = serde_json::from_str(json).unwrap();
        let catalog = FirmCatalog::new(firms).unwrap();

        let firm = &catalog.firms()[0];
        assert_eq!(firm.id, 42);
        assert_eq!(firm.coordinates.latitude(), 35.4868);
        assert!(firm.specialties.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = FirmCatalog::load_from("/nonexistent/firms.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
