//! Static figures for the "Supplier Suite" analytics page.

use serde::{Deserialize, Serialize};

use crate::catalog::AnimalType;

/// One bar of the sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySales {
    /// Short month name.
    pub month: String,
    /// Whole ringgit.
    pub amount_myr: u64,
}

/// Stock on hand for one animal type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct InventoryRow {
    pub animal: AnimalType,
    pub live_head: u32,
    pub butchered_head: u32,
    pub meat_kg: u32,
}

/// Farm supplies on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct SupplyRow {
    pub animal: AnimalType,
    pub item: String,
    pub quantity: u32,
    pub unit: String,
}

/// Everything the Supplier Suite page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierDashboard {
    /// Oldest month first.
    pub monthly_sales: Vec<MonthlySales>,
    /// One row per animal type.
    pub inventory: Vec<InventoryRow>,
    /// Feed, medicine and other consumables.
    pub supply: Vec<SupplyRow>,
}

impl SupplierDashboard {
    /// Figures shown during the investor demo.
    pub fn demo() -> Self {
        let monthly_sales = [
            ("Jun", 95_000),
            ("Jul", 98_000),
            ("Aug", 102_000),
            ("Sep", 110_000),
            ("Oct", 117_458),
        ]
        .into_iter()
        .map(|(month, amount_myr)| MonthlySales {
            month: month.to_string(),
            amount_myr,
        })
        .collect();

        let inventory = vec![
            InventoryRow {
                animal: AnimalType::Sheep,
                live_head: 13,
                butchered_head: 1,
                meat_kg: 15,
            },
            InventoryRow {
                animal: AnimalType::Goat,
                live_head: 8,
                butchered_head: 5,
                meat_kg: 60,
            },
            InventoryRow {
                animal: AnimalType::Cow,
                live_head: 4,
                butchered_head: 2,
                meat_kg: 48,
            },
        ];

        let supply = [
            (AnimalType::Sheep, "Feed", 255, "kg"),
            (AnimalType::Sheep, "Medicine", 58, "vials"),
            (AnimalType::Sheep, "Shampoo", 63, "bottles"),
            (AnimalType::Goat, "Medicine", 78, "vials"),
            (AnimalType::Cow, "Feed", 351, "kg"),
        ]
        .into_iter()
        .map(|(animal, item, quantity, unit)| SupplyRow {
            animal,
            item: item.to_string(),
            quantity,
            unit: unit.to_string(),
        })
        .collect();

        Self {
            monthly_sales,
            inventory,
            supply,
        }
    }

    /// Sales of the most recent month, the headline metric.
    pub fn monthly_sales_value(&self) -> u64 {
        self.monthly_sales.last().map(|m| m.amount_myr).unwrap_or(0)
    }

    /// Highest month, used to scale the chart.
    pub fn peak_sales(&self) -> u64 {
        self.monthly_sales
            .iter()
            .map(|m| m.amount_myr)
            .max()
            .unwrap_or(0)
    }
}

/// Format whole ringgit with thousands separators, e.g. `RM 117,458`.
pub fn format_myr(amount: u64) -> String {
    format!("RM {}", group_thousands(amount))
}

/// `1234567` becomes `1,234,567`.
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_is_latest_month() {
        let dashboard = SupplierDashboard::demo();
        assert_eq!(dashboard.monthly_sales.len(), 5);
        assert_eq!(dashboard.monthly_sales_value(), 117_458);
        assert_eq!(dashboard.peak_sales(), 117_458);
        assert_eq!(format_myr(dashboard.monthly_sales_value()), "RM 117,458");
    }

    #[test]
    fn formats_small_and_large_amounts() {
        assert_eq!(format_myr(0), "RM 0");
        assert_eq!(format_myr(999), "RM 999");
        assert_eq!(format_myr(1_000), "RM 1,000");
        assert_eq!(format_myr(1_234_567), "RM 1,234,567");
        assert_eq!(group_thousands(210), "210");
    }

    #[test]
    fn inventory_covers_every_animal() {
        let dashboard = SupplierDashboard::demo();
        let animals: Vec<_> = dashboard.inventory.iter().map(|row| row.animal).collect();
        assert_eq!(animals, AnimalType::ALL);
        assert_eq!(dashboard.supply.len(), 5);
    }
}
