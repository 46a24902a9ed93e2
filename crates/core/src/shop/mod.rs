//! Per-session shop context.
//!
//! A [`ShopSession`] owns one navigation selection and one wallet and shares
//! the immutable catalog. Sessions never share mutable state; hosting several
//! of them in one process goes through [`SessionRegistry`].

mod events;
pub mod registry;

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::{
    catalog::{AnimalType, Catalog, Listing, ProcessType, WeightBucket},
    navigation::{NavigationSelection, NavigationState, Navigator},
    pricing::{self, PriceComponent},
    query::{self, SortKey},
    wallet::WalletLedger,
};

pub use events::{CompareAck, GroupJoin, Purchase};
pub use registry::{SessionId, SessionRegistry};

/// Quantity preselected on the detail page.
pub const DEFAULT_QUANTITY_KG: u32 = 5;
/// Smallest orderable quantity.
pub const MIN_QUANTITY_KG: u32 = 1;
/// Largest orderable quantity.
pub const MAX_QUANTITY_KG: u32 = 999;

/// Navigation, wallet and detail-page quantity for one user.
#[derive(Debug, Clone)]
pub struct ShopSession {
    catalog: Arc<Catalog>,
    navigator: Navigator,
    wallet: WalletLedger,
    quantity_kg: u32,
    default_quantity_kg: u32,
}

impl ShopSession {
    /// A session at the first wizard step holding `wallet`.
    pub fn new(catalog: Arc<Catalog>, wallet: WalletLedger) -> Self {
        Self {
            catalog,
            navigator: Navigator::new(),
            wallet,
            quantity_kg: DEFAULT_QUANTITY_KG,
            default_quantity_kg: DEFAULT_QUANTITY_KG,
        }
    }

    /// Override the quantity the detail page starts from.
    pub fn with_default_quantity(mut self, quantity_kg: u32) -> Self {
        self.default_quantity_kg = clamp_quantity(quantity_kg);
        self.quantity_kg = self.default_quantity_kg;
        self
    }

    /// Shared listing table.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Choices made so far.
    pub fn selection(&self) -> &NavigationSelection {
        self.navigator.selection()
    }

    /// Current wizard step.
    pub fn state(&self) -> NavigationState {
        self.navigator.state()
    }

    /// This session's wallet.
    pub fn wallet(&self) -> &WalletLedger {
        &self.wallet
    }

    /// Wallet balance in MYR.
    pub fn balance(&self) -> f64 {
        self.wallet.balance()
    }

    /// See [`Navigator::choose_animal`].
    pub fn choose_animal(&mut self, animal: AnimalType) -> bool {
        self.navigator.choose_animal(animal)
    }

    /// See [`Navigator::choose_process`].
    pub fn choose_process(&mut self, process: ProcessType) -> bool {
        self.navigator.choose_process(process)
    }

    /// See [`Navigator::choose_weight_bucket`].
    pub fn choose_weight_bucket(&mut self, bucket: WeightBucket) -> bool {
        self.navigator.choose_weight_bucket(bucket)
    }

    /// Open the detail view for a catalog listing. Unknown ids are ignored.
    pub fn view_listing(&mut self, listing_id: &str) -> bool {
        if !self.catalog.contains(listing_id) {
            return false;
        }
        let opened = self.navigator.view_listing(listing_id);
        if opened {
            self.quantity_kg = self.default_quantity_kg;
        }
        opened
    }

    /// See [`Navigator::back_from_detail`].
    pub fn back_from_detail(&mut self) -> bool {
        self.navigator.back_from_detail()
    }

    /// See [`Navigator::back_from_listings`].
    pub fn back_from_listings(&mut self) -> bool {
        self.navigator.back_from_listings()
    }

    /// See [`Navigator::back_from_weight`].
    pub fn back_from_weight(&mut self) -> bool {
        self.navigator.back_from_weight()
    }

    /// See [`Navigator::back_from_process`].
    pub fn back_from_process(&mut self) -> bool {
        self.navigator.back_from_process()
    }

    /// Step back one level; see [`Navigator::back`].
    pub fn back(&mut self) -> bool {
        self.navigator.back()
    }

    /// Return to the first step and restore the default quantity.
    pub fn reset_all(&mut self) {
        self.navigator.reset_all();
        self.quantity_kg = self.default_quantity_kg;
    }

    /// Browse results for the current selection.
    pub fn listings(&self, sort_key: SortKey) -> Vec<&Listing> {
        query::filter_and_sort(&self.catalog, self.navigator.selection(), sort_key)
    }

    /// Listing shown by the detail view, if one is open.
    pub fn active_listing(&self) -> Option<&Listing> {
        self.navigator
            .selection()
            .active_detail_listing_id
            .as_deref()
            .and_then(|id| self.catalog.listing(id))
    }

    /// Delivered price for a catalog listing.
    pub fn price_per_kg(&self, listing_id: &str) -> Option<f64> {
        self.catalog.listing(listing_id).map(pricing::price_per_kg)
    }

    /// Breakdown rows for a catalog listing.
    pub fn price_breakdown(&self, listing_id: &str) -> Option<Vec<PriceComponent>> {
        self.catalog.listing(listing_id).map(pricing::breakdown)
    }

    /// Quantity on the detail page.
    pub fn quantity_kg(&self) -> u32 {
        self.quantity_kg
    }

    /// Set the quantity, clamped to `MIN_QUANTITY_KG..=MAX_QUANTITY_KG`.
    pub fn set_quantity(&mut self, quantity_kg: u32) {
        self.quantity_kg = clamp_quantity(quantity_kg);
    }

    /// Step the quantity by `delta`, clamped like [`Self::set_quantity`].
    pub fn adjust_quantity(&mut self, delta: i64) {
        let next = i64::from(self.quantity_kg).saturating_add(delta);
        let next = next.clamp(i64::from(MIN_QUANTITY_KG), i64::from(MAX_QUANTITY_KG));
        self.quantity_kg = u32::try_from(next).unwrap_or(MIN_QUANTITY_KG);
    }

    /// Quantity times price of the open listing.
    pub fn subtotal(&self) -> Option<f64> {
        self.active_listing()
            .map(|listing| pricing::subtotal(listing, self.quantity_kg))
    }

    /// Credit the wallet. Non-positive amounts are ignored.
    pub fn top_up(&mut self, amount: f64) -> bool {
        self.wallet.credit(amount)
    }

    /// Charge the subtotal for the open listing against the wallet.
    pub fn direct_buy(&mut self) -> Option<Purchase> {
        let listing = self.active_listing()?;
        let listing_id = listing.id.clone();
        let subtotal = pricing::subtotal(listing, self.quantity_kg);
        let charged = self.wallet.debit(subtotal);
        info!(
            listing = %listing_id,
            quantity_kg = self.quantity_kg,
            subtotal,
            charged,
            balance = self.wallet.balance(),
            "Direct buy"
        );
        Some(Purchase {
            listing_id,
            quantity_kg: self.quantity_kg,
            subtotal,
            charged,
            at: Utc::now(),
        })
    }

    /// Acknowledge joining the open listing's group buy. Nothing is stored.
    pub fn join_group(&self) -> Option<GroupJoin> {
        let listing = self.active_listing()?;
        info!(listing = %listing.id, quantity_kg = self.quantity_kg, "Joined group buy");
        Some(GroupJoin {
            listing_id: listing.id.clone(),
            quantity_kg: self.quantity_kg,
            at: Utc::now(),
        })
    }

    /// Acknowledge adding a listing to the comparison. Nothing is stored.
    pub fn add_to_compare(&self, listing_id: &str) -> Option<CompareAck> {
        let listing = self.catalog.listing(listing_id)?;
        info!(listing = %listing.id, "Added to compare");
        Some(CompareAck {
            listing_id: listing.id.clone(),
            title: listing.title.clone(),
            at: Utc::now(),
        })
    }
}

fn clamp_quantity(quantity_kg: u32) -> u32 {
    quantity_kg.clamp(MIN_QUANTITY_KG, MAX_QUANTITY_KG)
}
