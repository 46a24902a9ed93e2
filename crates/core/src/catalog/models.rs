use std::fmt;

use serde::{Deserialize, Serialize};

/// Livestock kinds offered on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum AnimalType {
    Sheep,
    Goat,
    Cow,
}

impl AnimalType {
    /// Every animal, in menu order.
    pub const ALL: [AnimalType; 3] = [AnimalType::Sheep, AnimalType::Goat, AnimalType::Cow];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            AnimalType::Sheep => "Sheep",
            AnimalType::Goat => "Goat",
            AnimalType::Cow => "Cow",
        }
    }

    /// Emoji shown beside the label.
    pub fn icon(self) -> &'static str {
        match self {
            AnimalType::Sheep => "🐑",
            AnimalType::Goat => "🐐",
            AnimalType::Cow => "🐄",
        }
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the animal is delivered to the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessType {
    /// The live animal.
    Live,
    /// Slaughtered whole carcass.
    Butchered,
    /// Cut meat sold by weight.
    Meat,
}

impl ProcessType {
    /// Every process type, in menu order.
    pub const ALL: [ProcessType; 3] = [ProcessType::Live, ProcessType::Butchered, ProcessType::Meat];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ProcessType::Live => "Live",
            ProcessType::Butchered => "Butchered",
            ProcessType::Meat => "Meat",
        }
    }

    /// Emoji shown beside the label.
    pub fn icon(self) -> &'static str {
        match self {
            ProcessType::Live => "🧬",
            ProcessType::Butchered => "🔪",
            ProcessType::Meat => "🥩",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive weight range used by the third wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightBucket {
    /// Stable identifier, e.g. `lt80`.
    pub key: String,
    /// Menu label, e.g. `Less than 80 kg`.
    pub label: String,
    /// Lower bound in kg, inclusive.
    pub min: u32,
    /// Upper bound in kg, inclusive.
    pub max: u32,
}

impl WeightBucket {
    /// Whether `weight_kg` falls within `min..=max`.
    pub fn contains(&self, weight_kg: f64) -> bool {
        f64::from(self.min) <= weight_kg && weight_kg <= f64::from(self.max)
    }
}

/// Immutable marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique across the catalog.
    pub id: String,
    /// Kind of livestock.
    pub animal: AnimalType,
    /// Delivery form.
    pub process: ProcessType,
    /// Product card heading.
    pub title: String,
    /// Live or carcass weight, matched against weight buckets.
    pub weight_kg: f64,
    /// Seller's farm-gate price, MYR/kg.
    pub ex_works_per_kg: f64,
    /// Distance to the buyer; drives the shipping component.
    pub distance_km: f64,
    /// Seller surcharge, MYR/kg.
    pub additional_cost_per_kg: f64,
    /// Average review score out of 5.
    pub rating: f64,
    /// Sales count used by the popularity sort.
    pub units_sold: u32,
    /// Minimum order quantity for the group buy, kg.
    pub moq_kg: f64,
    /// Kilograms already pledged to the group buy.
    pub group_progress_kg: f64,
    /// Seller's state or district.
    pub region: String,
    /// Emoji for the product card.
    pub icon: String,
}

impl Listing {
    /// Share of the minimum order already pledged, capped at 1.
    pub fn group_progress_ratio(&self) -> f64 {
        if self.moq_kg <= 0.0 {
            return 1.0;
        }
        (self.group_progress_kg / self.moq_kg).clamp(0.0, 1.0)
    }

    /// Whether pledges have reached the minimum order.
    pub fn moq_met(&self) -> bool {
        self.group_progress_kg >= self.moq_kg
    }

    /// `MOQ met` or `Open group`.
    pub fn group_status(&self) -> &'static str {
        if self.moq_met() {
            "MOQ met"
        } else {
            "Open group"
        }
    }

    /// Region, distance, rating and sales in one caption line.
    pub fn caption(&self) -> String {
        format!(
            "{} • {} km  |  ⭐ {}  |  Sold {}",
            self.region, self.distance_km, self.rating, self.units_sold
        )
    }
}
