//! Filtering and ordering of catalog listings for the browse step.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, Listing},
    navigation::NavigationSelection,
    pricing::price_per_kg,
};

/// Ordering applied to the browse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Most units sold first.
    #[default]
    Popularity,
    /// Cheapest delivered price first.
    Price,
    /// Shortest distance first.
    Proximity,
}

impl SortKey {
    /// Every key, in tab order.
    pub const ALL: [SortKey; 3] = [SortKey::Popularity, SortKey::Price, SortKey::Proximity];

    /// Tab title used by the browse view.
    pub fn tab_label(self) -> &'static str {
        match self {
            SortKey::Popularity => "Popular",
            SortKey::Price => "Sale",
            SortKey::Proximity => "Nearby",
        }
    }

    /// The tab to the right, wrapping around.
    pub fn next(self) -> Self {
        match self {
            SortKey::Popularity => SortKey::Price,
            SortKey::Price => SortKey::Proximity,
            SortKey::Proximity => SortKey::Popularity,
        }
    }

    /// The tab to the left, wrapping around.
    pub fn previous(self) -> Self {
        match self {
            SortKey::Popularity => SortKey::Proximity,
            SortKey::Price => SortKey::Popularity,
            SortKey::Proximity => SortKey::Price,
        }
    }

    fn compare(self, a: &Listing, b: &Listing) -> Ordering {
        let primary = match self {
            SortKey::Popularity => b.units_sold.cmp(&a.units_sold),
            SortKey::Price => price_per_kg(a).total_cmp(&price_per_kg(b)),
            SortKey::Proximity => a.distance_km.total_cmp(&b.distance_km),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Listings matching the animal, process and weight range of `selection`,
/// ordered by `sort_key` with ties broken by ascending id.
///
/// Returns nothing until all three selection fields are set.
pub fn filter_and_sort<'a>(
    catalog: &'a Catalog,
    selection: &NavigationSelection,
    sort_key: SortKey,
) -> Vec<&'a Listing> {
    let (Some(animal), Some(process), Some(bucket)) =
        (selection.animal, selection.process, selection.weight_bucket.as_ref())
    else {
        return Vec::new();
    };

    let mut results: Vec<&Listing> = catalog
        .listings()
        .iter()
        .filter(|listing| {
            listing.animal == animal && listing.process == process && bucket.contains(listing.weight_kg)
        })
        .collect();
    results.sort_by(|a, b| sort_key.compare(a, b));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AnimalType, CatalogLoader, ProcessType, WeightBucket};

    const CATALOG: &str = r#"{
        "weight_buckets": [{"key": "mid", "label": "Mid", "min": 40, "max": 120}],
        "listings": [
            {"id": "b", "animal": "Sheep", "process": "Meat", "title": "B", "weight_kg": 60,
             "ex_works_per_kg": 3.0, "distance_km": 100, "additional_cost_per_kg": 0.0,
             "rating": 4, "units_sold": 50, "moq_kg": 10, "group_progress_kg": 0, "region": "R", "icon": "x"},
            {"id": "a", "animal": "Sheep", "process": "Meat", "title": "A", "weight_kg": 40,
             "ex_works_per_kg": 3.5, "distance_km": 100, "additional_cost_per_kg": 0.0,
             "rating": 4, "units_sold": 50, "moq_kg": 10, "group_progress_kg": 0, "region": "R", "icon": "x"},
            {"id": "c", "animal": "Sheep", "process": "Meat", "title": "C", "weight_kg": 120,
             "ex_works_per_kg": 2.0, "distance_km": 20, "additional_cost_per_kg": 1.0,
             "rating": 4, "units_sold": 90, "moq_kg": 10, "group_progress_kg": 0, "region": "R", "icon": "x"},
            {"id": "d", "animal": "Sheep", "process": "Meat", "title": "D", "weight_kg": 121,
             "ex_works_per_kg": 1.0, "distance_km": 1, "additional_cost_per_kg": 0.0,
             "rating": 4, "units_sold": 999, "moq_kg": 10, "group_progress_kg": 0, "region": "R", "icon": "x"},
            {"id": "e", "animal": "Goat", "process": "Meat", "title": "E", "weight_kg": 60,
             "ex_works_per_kg": 1.0, "distance_km": 1, "additional_cost_per_kg": 0.0,
             "rating": 4, "units_sold": 999, "moq_kg": 10, "group_progress_kg": 0, "region": "R", "icon": "x"}
        ]
    }"#;

    fn selection(animal: AnimalType, process: ProcessType, min: u32, max: u32) -> NavigationSelection {
        NavigationSelection {
            animal: Some(animal),
            process: Some(process),
            weight_bucket: Some(WeightBucket {
                key: "k".to_string(),
                label: "k".to_string(),
                min,
                max,
            }),
            active_detail_listing_id: None,
        }
    }

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|listing| listing.id.clone()).collect()
    }

    #[test]
    fn sheep_meat_light_bucket_finds_s1() {
        let catalog = CatalogLoader::builtin();
        let sel = selection(AnimalType::Sheep, ProcessType::Meat, 40, 79);
        let results = filter_and_sort(&catalog, &sel, SortKey::Price);
        assert_eq!(ids(&results), ["s1"]);
        assert!((price_per_kg(results[0]) - 4.40).abs() < 1e-9);
    }

    #[test]
    fn filter_uses_inclusive_bounds_and_exact_kind() {
        let catalog = CatalogLoader::from_json_str(CATALOG).expect("valid catalog");
        let sel = selection(AnimalType::Sheep, ProcessType::Meat, 40, 120);
        let results = filter_and_sort(&catalog, &sel, SortKey::Popularity);
        assert_eq!(results.len(), 3);
        assert!(results.len() <= catalog.len());
        for listing in &results {
            assert_eq!(listing.animal, AnimalType::Sheep);
            assert_eq!(listing.process, ProcessType::Meat);
            assert!((40.0..=120.0).contains(&listing.weight_kg));
        }
    }

    #[test]
    fn popularity_descends_with_id_tie_break() {
        let catalog = CatalogLoader::from_json_str(CATALOG).expect("valid catalog");
        let sel = selection(AnimalType::Sheep, ProcessType::Meat, 40, 120);
        let results = filter_and_sort(&catalog, &sel, SortKey::Popularity);
        assert_eq!(ids(&results), ["c", "a", "b"]);
    }

    #[test]
    fn price_ascends() {
        let catalog = CatalogLoader::from_json_str(CATALOG).expect("valid catalog");
        let sel = selection(AnimalType::Sheep, ProcessType::Meat, 40, 120);
        let results = filter_and_sort(&catalog, &sel, SortKey::Price);
        // c: 3.10, b: 3.50, a: 4.00
        assert_eq!(ids(&results), ["c", "b", "a"]);
        for pair in results.windows(2) {
            assert!(price_per_kg(pair[0]) <= price_per_kg(pair[1]));
        }
    }

    #[test]
    fn equal_prices_fall_back_to_ascending_id() {
        let catalog = CatalogLoader::from_json_str(
            r#"{
            "weight_buckets": [{"key": "mid", "label": "Mid", "min": 40, "max": 120}],
            "listings": [
                {"id": "z", "animal": "Sheep", "process": "Meat", "title": "Z", "weight_kg": 60,
                 "ex_works_per_kg": 3.0, "distance_km": 100, "additional_cost_per_kg": 0.0,
                 "rating": 4, "units_sold": 80, "moq_kg": 10, "group_progress_kg": 0, "region": "R", "icon": "x"},
                {"id": "m", "animal": "Sheep", "process": "Meat", "title": "M", "weight_kg": 70,
                 "ex_works_per_kg": 3.0, "distance_km": 100, "additional_cost_per_kg": 0.0,
                 "rating": 4, "units_sold": 10, "moq_kg": 10, "group_progress_kg": 0, "region": "R", "icon": "x"}
            ]
        }"#,
        )
        .expect("valid catalog");
        let sel = selection(AnimalType::Sheep, ProcessType::Meat, 40, 120);
        let results = filter_and_sort(&catalog, &sel, SortKey::Price);
        assert_eq!(price_per_kg(results[0]), price_per_kg(results[1]));
        assert_eq!(ids(&results), ["m", "z"]);
    }

    #[test]
    fn proximity_ascends_with_id_tie_break() {
        let catalog = CatalogLoader::from_json_str(CATALOG).expect("valid catalog");
        let sel = selection(AnimalType::Sheep, ProcessType::Meat, 40, 120);
        let results = filter_and_sort(&catalog, &sel, SortKey::Proximity);
        assert_eq!(ids(&results), ["c", "a", "b"]);
    }

    #[test]
    fn incomplete_selection_yields_nothing() {
        let catalog = CatalogLoader::builtin();
        let mut sel = selection(AnimalType::Sheep, ProcessType::Meat, 40, 79);
        sel.weight_bucket = None;
        assert!(filter_and_sort(&catalog, &sel, SortKey::Price).is_empty());
        assert!(filter_and_sort(&catalog, &NavigationSelection::default(), SortKey::Price).is_empty());
    }

    #[test]
    fn sort_keys_cycle_through_tabs() {
        let mut key = SortKey::default();
        let mut labels = Vec::new();
        for _ in 0..3 {
            labels.push(key.tab_label());
            key = key.next();
        }
        assert_eq!(labels, ["Popular", "Sale", "Nearby"]);
        assert_eq!(key, SortKey::Popularity);
        assert_eq!(SortKey::Popularity.previous(), SortKey::Proximity);
    }
}
