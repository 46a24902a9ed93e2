//! Per-kilogram pricing.
//!
//! Every listing is priced as its ex-works rate plus distance-based shipping
//! plus the seller's surcharge. Rounding is half away from zero at two
//! decimals, applied to the total and to the shipping line of the breakdown
//! independently.

use serde::Serialize;

use crate::catalog::Listing;

/// Shipping cost in MYR per kilogram per kilometre.
pub const SHIPPING_RATE: f64 = 0.005;

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Delivered price per kilogram for a listing.
pub fn price_per_kg(listing: &Listing) -> f64 {
    round2(listing.ex_works_per_kg + SHIPPING_RATE * listing.distance_km + listing.additional_cost_per_kg)
}

/// Cost of `quantity_kg` kilograms at the delivered price.
pub fn subtotal(listing: &Listing, quantity_kg: u32) -> f64 {
    f64::from(quantity_kg) * price_per_kg(listing)
}

/// Which line of the breakdown a component represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentKind {
    /// The seller's farm-gate rate.
    ExWorks,
    /// Distance times [`SHIPPING_RATE`].
    Shipping,
    /// The seller's extra surcharge.
    SellerCost,
    /// Delivered price, as charged.
    Total,
}

/// One labelled row of a price breakdown, in MYR per kilogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceComponent {
    /// Which row this is.
    pub kind: ComponentKind,
    /// Row caption, e.g. `Distance × 0.005`.
    pub label: String,
    /// MYR per kilogram.
    pub value: f64,
}

impl PriceComponent {
    /// Text for the value column.
    ///
    /// Listing inputs are shown as entered; computed rows (shipping, total)
    /// always carry two decimals.
    pub fn display_value(&self) -> String {
        match self.kind {
            ComponentKind::ExWorks | ComponentKind::SellerCost => self.value.to_string(),
            ComponentKind::Shipping | ComponentKind::Total => format!("{:.2}", self.value),
        }
    }
}

/// Ex-works, shipping, seller cost and total rows, in display order.
///
/// The shipping row is rounded on its own, so the displayed parts can miss
/// the total by a cent.
pub fn breakdown(listing: &Listing) -> Vec<PriceComponent> {
    vec![
        PriceComponent {
            kind: ComponentKind::ExWorks,
            label: "Ex-Works".to_string(),
            value: listing.ex_works_per_kg,
        },
        PriceComponent {
            kind: ComponentKind::Shipping,
            label: format!("Distance × {SHIPPING_RATE:.3}"),
            value: round2(SHIPPING_RATE * listing.distance_km),
        },
        PriceComponent {
            kind: ComponentKind::SellerCost,
            label: "Seller add. cost".to_string(),
            value: listing.additional_cost_per_kg,
        },
        PriceComponent {
            kind: ComponentKind::Total,
            label: "Total".to_string(),
            value: price_per_kg(listing),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AnimalType, CatalogLoader, ProcessType};

    fn listing(ex_works: f64, distance: f64, extra: f64) -> Listing {
        Listing {
            id: "t1".to_string(),
            animal: AnimalType::Cow,
            process: ProcessType::Meat,
            title: "Test".to_string(),
            weight_kg: 100.0,
            ex_works_per_kg: ex_works,
            distance_km: distance,
            additional_cost_per_kg: extra,
            rating: 4.0,
            units_sold: 1,
            moq_kg: 10.0,
            group_progress_kg: 0.0,
            region: "Kedah".to_string(),
            icon: "🥩".to_string(),
        }
    }

    #[test]
    fn prices_builtin_listings() {
        let catalog = CatalogLoader::builtin();
        let expected = [("s1", 4.40), ("s2", 3.95), ("c1", 4.25), ("g1", 4.35)];
        for (id, price) in expected {
            let listing = catalog.listing(id).expect("listing present");
            assert!((price_per_kg(listing) - price).abs() < 1e-9, "{id}");
        }
    }

    #[test]
    fn price_matches_formula_for_every_listing() {
        for listing in CatalogLoader::builtin().listings() {
            let raw = listing.ex_works_per_kg
                + 0.005 * listing.distance_km
                + listing.additional_cost_per_kg;
            assert_eq!(price_per_kg(listing), round2(raw));
        }
    }

    #[test]
    fn negative_inputs_still_price() {
        let odd = listing(-1.0, -100.0, 0.0);
        assert!((price_per_kg(&odd) - -1.5).abs() < 1e-9);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn breakdown_parts_track_total_within_a_cent_each() {
        let mut listings = CatalogLoader::builtin().listings().to_vec();
        listings.push(listing(1.111, 3.0, 0.004));
        listings.push(listing(2.0, 1.0, 0.333));
        listings.push(listing(1.006, 0.0, 1.006));

        for listing in &listings {
            let rows = breakdown(listing);
            assert_eq!(rows.len(), 4);
            assert_eq!(rows[3].kind, ComponentKind::Total);
            assert_eq!(rows[3].value, price_per_kg(listing));

            let parts: f64 = rows[..3].iter().map(|row| round2(row.value)).sum();
            assert!(
                (parts - rows[3].value).abs() <= 0.03 + 1e-9,
                "{}: parts {parts} vs total {}",
                listing.id,
                rows[3].value
            );
        }
    }

    #[test]
    fn breakdown_parts_can_miss_total_by_a_cent() {
        let listing = listing(1.006, 0.0, 1.006);
        let rows = breakdown(&listing);
        let parts: f64 = rows[..3].iter().map(|row| round2(row.value)).sum();

        assert_eq!(rows[3].value, 2.01);
        assert!((parts - 2.02).abs() < 1e-9);
        let mismatch = (parts - rows[3].value).abs();
        assert!(mismatch > 0.005 && mismatch <= 0.03 + 1e-9, "mismatch {mismatch}");
    }

    #[test]
    fn display_values_show_inputs_and_two_decimal_totals() {
        let rows = breakdown(&listing(3.6, 120.0, 0.2));
        let shown: Vec<_> = rows.iter().map(PriceComponent::display_value).collect();
        assert_eq!(shown, ["3.6", "0.60", "0.2", "4.40"]);
    }

    #[test]
    fn breakdown_labels_in_order() {
        let rows = breakdown(&listing(3.6, 120.0, 0.2));
        let labels: Vec<_> = rows.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, ["Ex-Works", "Distance × 0.005", "Seller add. cost", "Total"]);
        assert!((rows[1].value - 0.6).abs() < 1e-9);
    }

    #[test]
    fn subtotal_scales_price() {
        let s1 = listing(3.6, 120.0, 0.2);
        assert!((subtotal(&s1, 5) - 22.0).abs() < 1e-9);
    }
}
