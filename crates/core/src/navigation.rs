//! Shop wizard state machine.
//!
//! ```text
//! SelectingAnimal ─choose_animal─▶ SelectingProcess ─choose_process─▶ SelectingWeight
//!        ▲                                │  ▲                              │  ▲
//!        └──────── back_from_process ─────┘  └────── back_from_weight ──────┘  │
//!                                                                              │
//! ViewingDetail ◀─view_listing─ BrowsingListings ◀─choose_weight_bucket────────┘
//!        └──── back_from_detail ────▶       └──── back_from_listings ──▶ SelectingWeight
//! ```
//!
//! `reset_all` returns to `SelectingAnimal` from anywhere. A transition whose
//! source state does not match leaves the selection untouched and reports
//! `false`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{AnimalType, ProcessType, WeightBucket};

/// Wizard step derived from which selection fields are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationState {
    /// Nothing chosen yet.
    SelectingAnimal,
    /// Animal chosen, waiting for a process type.
    SelectingProcess,
    /// Animal and process chosen, waiting for a weight bucket.
    SelectingWeight,
    /// All filters set; the listing grid is shown.
    BrowsingListings,
    /// One listing is open.
    ViewingDetail,
}

/// Choices made so far in the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationSelection {
    /// Step one.
    pub animal: Option<AnimalType>,
    /// Step two.
    pub process: Option<ProcessType>,
    /// Step three.
    pub weight_bucket: Option<WeightBucket>,
    /// Listing open in the detail view, if any.
    pub active_detail_listing_id: Option<String>,
}

impl NavigationSelection {
    /// True when no choice has been made.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// "Sheep › Meat › Less than 80 kg" style trail of the choices made.
    pub fn breadcrumb(&self) -> String {
        let mut parts = Vec::new();
        if let Some(animal) = self.animal {
            parts.push(animal.label().to_string());
        }
        if let Some(process) = self.process {
            parts.push(process.label().to_string());
        }
        if let Some(bucket) = &self.weight_bucket {
            parts.push(bucket.label.clone());
        }
        parts.join(" › ")
    }
}

/// Guards every change to a [`NavigationSelection`].
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    selection: NavigationSelection,
}

impl Navigator {
    /// A wizard at its first step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choices made so far.
    pub fn selection(&self) -> &NavigationSelection {
        &self.selection
    }

    /// Current step, derived from the selection.
    pub fn state(&self) -> NavigationState {
        let sel = &self.selection;
        if sel.active_detail_listing_id.is_some() {
            return NavigationState::ViewingDetail;
        }
        match (sel.animal, sel.process, &sel.weight_bucket) {
            (None, _, _) => NavigationState::SelectingAnimal,
            (Some(_), None, _) => NavigationState::SelectingProcess,
            (Some(_), Some(_), None) => NavigationState::SelectingWeight,
            (Some(_), Some(_), Some(_)) => NavigationState::BrowsingListings,
        }
    }

    /// `SelectingAnimal` to `SelectingProcess`.
    pub fn choose_animal(&mut self, animal: AnimalType) -> bool {
        self.apply(NavigationState::SelectingAnimal, "choose_animal", |sel| {
            sel.animal = Some(animal);
        })
    }

    /// `SelectingProcess` to `SelectingWeight`.
    pub fn choose_process(&mut self, process: ProcessType) -> bool {
        self.apply(NavigationState::SelectingProcess, "choose_process", |sel| {
            sel.process = Some(process);
        })
    }

    /// `SelectingWeight` to `BrowsingListings`.
    pub fn choose_weight_bucket(&mut self, bucket: WeightBucket) -> bool {
        self.apply(NavigationState::SelectingWeight, "choose_weight_bucket", |sel| {
            sel.weight_bucket = Some(bucket);
        })
    }

    /// `BrowsingListings` to `ViewingDetail`. The id is not checked here.
    pub fn view_listing(&mut self, listing_id: impl Into<String>) -> bool {
        let listing_id = listing_id.into();
        self.apply(NavigationState::BrowsingListings, "view_listing", |sel| {
            sel.active_detail_listing_id = Some(listing_id);
        })
    }

    /// `ViewingDetail` to `BrowsingListings`.
    pub fn back_from_detail(&mut self) -> bool {
        self.apply(NavigationState::ViewingDetail, "back_from_detail", |sel| {
            sel.active_detail_listing_id = None;
        })
    }

    /// `BrowsingListings` to `SelectingWeight`, dropping the bucket.
    pub fn back_from_listings(&mut self) -> bool {
        self.apply(NavigationState::BrowsingListings, "back_from_listings", |sel| {
            sel.weight_bucket = None;
        })
    }

    /// `SelectingWeight` to `SelectingProcess`, dropping the process.
    pub fn back_from_weight(&mut self) -> bool {
        self.apply(NavigationState::SelectingWeight, "back_from_weight", |sel| {
            sel.process = None;
        })
    }

    /// `SelectingProcess` to `SelectingAnimal`, dropping the animal.
    pub fn back_from_process(&mut self) -> bool {
        self.apply(NavigationState::SelectingProcess, "back_from_process", |sel| {
            sel.animal = None;
        })
    }

    /// Step back one level from whatever state the wizard is in.
    pub fn back(&mut self) -> bool {
        match self.state() {
            NavigationState::SelectingAnimal => false,
            NavigationState::SelectingProcess => self.back_from_process(),
            NavigationState::SelectingWeight => self.back_from_weight(),
            NavigationState::BrowsingListings => self.back_from_listings(),
            NavigationState::ViewingDetail => self.back_from_detail(),
        }
    }

    /// Clear every choice, from any state.
    pub fn reset_all(&mut self) {
        self.selection = NavigationSelection::default();
        debug!("Navigation reset");
    }

    fn apply(
        &mut self,
        required: NavigationState,
        transition: &'static str,
        change: impl FnOnce(&mut NavigationSelection),
    ) -> bool {
        let current = self.state();
        if current != required {
            debug!(transition, ?current, ?required, "Ignoring transition");
            return false;
        }
        change(&mut self.selection);
        debug!(transition, next = ?self.state(), "Navigation advanced");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket() -> WeightBucket {
        WeightBucket {
            key: "lt80".to_string(),
            label: "Less than 80 kg".to_string(),
            min: 40,
            max: 79,
        }
    }

    fn browsing() -> Navigator {
        let mut nav = Navigator::new();
        assert!(nav.choose_animal(AnimalType::Sheep));
        assert!(nav.choose_process(ProcessType::Meat));
        assert!(nav.choose_weight_bucket(bucket()));
        nav
    }

    #[test]
    fn walks_forward_through_every_step() {
        let mut nav = Navigator::new();
        assert_eq!(nav.state(), NavigationState::SelectingAnimal);
        nav.choose_animal(AnimalType::Goat);
        assert_eq!(nav.state(), NavigationState::SelectingProcess);
        nav.choose_process(ProcessType::Live);
        assert_eq!(nav.state(), NavigationState::SelectingWeight);
        nav.choose_weight_bucket(bucket());
        assert_eq!(nav.state(), NavigationState::BrowsingListings);
        nav.view_listing("g1");
        assert_eq!(nav.state(), NavigationState::ViewingDetail);
        assert_eq!(nav.selection().active_detail_listing_id.as_deref(), Some("g1"));
    }

    #[test]
    fn out_of_order_transitions_are_noops() {
        let mut nav = Navigator::new();
        assert!(!nav.choose_process(ProcessType::Meat));
        assert!(!nav.choose_weight_bucket(bucket()));
        assert!(!nav.view_listing("s1"));
        assert!(!nav.back_from_detail());
        assert!(!nav.back_from_listings());
        assert!(!nav.back_from_weight());
        assert!(!nav.back_from_process());
        assert_eq!(nav.state(), NavigationState::SelectingAnimal);
        assert!(nav.selection().is_empty());

        let mut nav = browsing();
        let before = nav.selection().clone();
        assert!(!nav.choose_animal(AnimalType::Cow));
        assert!(!nav.choose_process(ProcessType::Live));
        assert!(!nav.back_from_weight());
        assert_eq!(nav.selection(), &before);
    }

    #[test]
    fn back_transitions_clear_one_field() {
        let mut nav = browsing();
        assert!(nav.back_from_listings());
        assert_eq!(nav.state(), NavigationState::SelectingWeight);
        assert!(nav.selection().weight_bucket.is_none());
        assert_eq!(nav.selection().process, Some(ProcessType::Meat));

        assert!(nav.back_from_weight());
        assert_eq!(nav.state(), NavigationState::SelectingProcess);
        assert!(nav.selection().process.is_none());

        assert!(nav.back_from_process());
        assert_eq!(nav.state(), NavigationState::SelectingAnimal);
        assert!(nav.selection().is_empty());
    }

    #[test]
    fn detail_round_trip_keeps_selection() {
        let mut nav = browsing();
        let before = nav.selection().clone();
        assert!(nav.view_listing("s1"));
        assert_eq!(nav.state(), NavigationState::ViewingDetail);
        assert!(!nav.view_listing("s2"));
        assert!(!nav.back_from_listings());
        assert!(nav.back_from_detail());
        assert_eq!(nav.state(), NavigationState::BrowsingListings);
        assert_eq!(nav.selection(), &before);
    }

    #[test]
    fn reset_from_any_state() {
        let mut navs = vec![Navigator::new(), browsing()];
        let mut detail = browsing();
        detail.view_listing("s1");
        navs.push(detail);
        let mut process = Navigator::new();
        process.choose_animal(AnimalType::Cow);
        navs.push(process);
        let mut weight = Navigator::new();
        weight.choose_animal(AnimalType::Goat);
        weight.choose_process(ProcessType::Butchered);
        assert_eq!(weight.state(), NavigationState::SelectingWeight);
        navs.push(weight);

        for mut nav in navs {
            nav.reset_all();
            assert_eq!(nav.state(), NavigationState::SelectingAnimal);
            assert!(nav.selection().is_empty());
        }
    }

    #[test]
    fn generic_back_follows_state() {
        let mut nav = browsing();
        nav.view_listing("s1");
        assert!(nav.back());
        assert_eq!(nav.state(), NavigationState::BrowsingListings);
        assert!(nav.back());
        assert!(nav.back());
        assert!(nav.back());
        assert_eq!(nav.state(), NavigationState::SelectingAnimal);
        assert!(!nav.back());
    }

    #[test]
    fn breadcrumb_lists_choices() {
        let nav = browsing();
        assert_eq!(nav.selection().breadcrumb(), "Sheep › Meat › Less than 80 kg");
    }
}
