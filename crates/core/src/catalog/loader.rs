//! JSON catalog loading and validation.

use std::{collections::HashSet, fs, path::Path};

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};

use super::{Catalog, Listing, WeightBucket};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    CatalogLoader::from_json_str(BUILTIN_CATALOG).expect("embedded catalog failed validation")
});

/// Reads catalog files and enforces the static-data invariants.
pub struct CatalogLoader;

impl CatalogLoader {
    /// The catalog shipped with the demo.
    pub fn builtin() -> Catalog {
        BUILTIN.clone()
    }

    /// Load a catalog file, falling back to the builtin table when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Catalog> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Read and validate a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&contents)?;
        info!(path = %path.display(), listings = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse and validate catalog JSON.
    pub fn from_json_str(contents: &str) -> Result<Catalog> {
        let raw: RawCatalog = serde_json::from_str(contents)?;
        validate_buckets(&raw.weight_buckets)?;
        validate_listings(&raw.listings)?;
        debug!(
            buckets = raw.weight_buckets.len(),
            listings = raw.listings.len(),
            "Catalog validated"
        );
        Ok(Catalog::from_validated(raw.weight_buckets, raw.listings))
    }
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    weight_buckets: Vec<WeightBucket>,
    #[serde(default)]
    listings: Vec<Listing>,
}

fn validate_buckets(buckets: &[WeightBucket]) -> Result<()> {
    let mut seen = HashSet::new();
    for bucket in buckets {
        if bucket.min > bucket.max {
            return Err(CatalogError::InvalidBucket {
                key: bucket.key.clone(),
                min: bucket.min,
                max: bucket.max,
            });
        }
        if !seen.insert(bucket.key.as_str()) {
            return Err(CatalogError::DuplicateBucket(bucket.key.clone()));
        }
    }
    Ok(())
}

fn validate_listings(listings: &[Listing]) -> Result<()> {
    let mut seen = HashSet::new();
    for listing in listings {
        if !seen.insert(listing.id.as_str()) {
            return Err(CatalogError::DuplicateListing(listing.id.clone()));
        }
        if let Some(reason) = listing_problem(listing) {
            return Err(CatalogError::InvalidListing {
                id: listing.id.clone(),
                reason,
            });
        }
    }
    Ok(())
}

fn listing_problem(listing: &Listing) -> Option<String> {
    let non_negative = [
        ("ex_works_per_kg", listing.ex_works_per_kg),
        ("distance_km", listing.distance_km),
        ("additional_cost_per_kg", listing.additional_cost_per_kg),
        ("group_progress_kg", listing.group_progress_kg),
    ];
    let positive = [("weight_kg", listing.weight_kg), ("moq_kg", listing.moq_kg)];

    if listing.id.trim().is_empty() {
        return Some("id must not be empty".to_string());
    }
    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Some(format!("{field} must be positive, got {value}"));
        }
    }
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Some(format!("{field} must be non-negative, got {value}"));
        }
    }
    if !(0.0..=5.0).contains(&listing.rating) {
        return Some(format!("rating must be within 0..=5, got {}", listing.rating));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::catalog::{AnimalType, ProcessType};
    use tempfile::NamedTempFile;

    fn listing_json(id: &str, extra: &str) -> String {
        format!(
            r#"{{
                "id": "{id}", "animal": "Goat", "process": "Live", "title": "Test goat",
                "weight_kg": 60, "ex_works_per_kg": 4.0, "distance_km": 10,
                "additional_cost_per_kg": 0.1, "rating": 4.0, "units_sold": 3,
                "moq_kg": 20, "group_progress_kg": 5, "region": "Perak", "icon": "🐐"
                {extra}
            }}"#
        )
    }

    #[test]
    fn builtin_catalog_matches_demo_data() {
        let catalog = CatalogLoader::builtin();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.weight_buckets().len(), 5);

        let s1 = catalog.listing("s1").expect("s1 present");
        assert_eq!(s1.animal, AnimalType::Sheep);
        assert_eq!(s1.process, ProcessType::Meat);
        assert_eq!(s1.weight_kg, 50.0);
        assert_eq!(s1.region, "Selangor");

        let lt80 = catalog.weight_bucket("lt80").expect("lt80 present");
        assert_eq!((lt80.min, lt80.max), (40, 79));
        assert!(catalog.listing("missing").is_none());
    }

    #[test]
    fn rejects_inverted_bucket() {
        let json = r#"{"weight_buckets": [{"key": "bad", "label": "Bad", "min": 90, "max": 10}]}"#;
        let err = CatalogLoader::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidBucket { min: 90, max: 10, .. }));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = format!(
            r#"{{"listings": [{}, {}]}}"#,
            listing_json("x1", ""),
            listing_json("x1", "")
        );
        let err = CatalogLoader::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateListing(id) if id == "x1"));
    }

    #[test]
    fn rejects_unknown_animal() {
        let json = format!(r#"{{"listings": [{}]}}"#, listing_json("x1", "")).replace("Goat", "Llama");
        let err = CatalogLoader::from_json_str(&json).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let negative_distance = format!(r#"{{"listings": [{}]}}"#, listing_json("x1", ""))
            .replace(r#""distance_km": 10"#, r#""distance_km": -3"#);
        let err = CatalogLoader::from_json_str(&negative_distance).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidListing { reason, .. } if reason.contains("distance_km")));

        let bad_rating = format!(r#"{{"listings": [{}]}}"#, listing_json("x2", ""))
            .replace(r#""rating": 4.0"#, r#""rating": 7.5"#);
        let err = CatalogLoader::from_json_str(&bad_rating).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidListing { reason, .. } if reason.contains("rating")));

        let zero_moq = format!(r#"{{"listings": [{}]}}"#, listing_json("x3", ""))
            .replace(r#""moq_kg": 20"#, r#""moq_kg": 0"#);
        let err = CatalogLoader::from_json_str(&zero_moq).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidListing { reason, .. } if reason.contains("moq_kg")));
    }

    #[test]
    fn loads_from_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{"weight_buckets": [{{"key": "all", "label": "All", "min": 1, "max": 500}}], "listings": [{}]}}"#,
            listing_json("p1", "")
        )?;

        let catalog = CatalogLoader::load(Some(file.path()))?;
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("p1"));
        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CatalogLoader::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
