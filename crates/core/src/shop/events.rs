use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Receipt for a direct buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Listing that was bought.
    pub listing_id: String,
    /// Kilograms ordered.
    pub quantity_kg: u32,
    /// Quantity times delivered price.
    pub subtotal: f64,
    /// What actually left the wallet; lower than `subtotal` when the balance ran out.
    pub charged: f64,
    /// When the purchase was made.
    pub at: DateTime<Utc>,
}

impl Purchase {
    /// Whether the wallet could not cover the full subtotal.
    pub fn capped(&self) -> bool {
        self.charged < self.subtotal
    }

    /// Status line; always reports what was actually charged.
    pub fn message(&self) -> String {
        if self.capped() {
            format!(
                "Purchased {} kg — RM {:.2} deducted, capped at wallet balance (RM {:.2} due) (demo)",
                self.quantity_kg, self.charged, self.subtotal
            )
        } else {
            format!(
                "Purchased {} kg — RM {:.2} deducted (demo)",
                self.quantity_kg, self.charged
            )
        }
    }
}

/// Acknowledgement for joining a group buy. Nothing is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupJoin {
    /// Listing whose group buy was joined.
    pub listing_id: String,
    /// Kilograms pledged.
    pub quantity_kg: u32,
    /// When the group was joined.
    pub at: DateTime<Utc>,
}

impl GroupJoin {
    /// Status line for the acknowledgement.
    pub fn message(&self) -> String {
        format!("Joined group for {} kg (demo)", self.quantity_kg)
    }
}

/// Acknowledgement for "Add to Compare". Nothing is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareAck {
    /// Listing added to the comparison.
    pub listing_id: String,
    /// Its title, for the status line.
    pub title: String,
    /// When it was added.
    pub at: DateTime<Utc>,
}

impl CompareAck {
    /// Status line for the acknowledgement.
    pub fn message(&self) -> String {
        format!("Added {} to compare (demo)", self.title)
    }
}
