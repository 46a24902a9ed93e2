//! Static reference data: enumerations, weight buckets and listings.

pub mod loader;
mod models;

use std::collections::HashMap;

pub use loader::CatalogLoader;
pub use models::{AnimalType, Listing, ProcessType, WeightBucket};

/// Validated, immutable listing table indexed by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    weight_buckets: Vec<WeightBucket>,
    listings: Vec<Listing>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Assemble a catalog from records that the loader has already validated.
    pub(crate) fn from_validated(weight_buckets: Vec<WeightBucket>, listings: Vec<Listing>) -> Self {
        let index = listings
            .iter()
            .enumerate()
            .map(|(idx, listing)| (listing.id.clone(), idx))
            .collect();
        Self {
            weight_buckets,
            listings,
            index,
        }
    }

    /// Bucket table in menu order.
    pub fn weight_buckets(&self) -> &[WeightBucket] {
        &self.weight_buckets
    }

    /// Bucket by key.
    pub fn weight_bucket(&self, key: &str) -> Option<&WeightBucket> {
        self.weight_buckets.iter().find(|bucket| bucket.key == key)
    }

    /// Every listing, in file order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Listing by id.
    pub fn listing(&self, id: &str) -> Option<&Listing> {
        self.index.get(id).map(|idx| &self.listings[*idx])
    }

    /// Whether a listing with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// True when the catalog has no listings.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
