#![warn(clippy::all, missing_docs)]

//! Core domain logic for the ARG marketplace demo.
//!
//! This crate hosts the catalog, pricing, shop wizard, listing queries,
//! wallet and configuration used by the terminal UI and any future
//! frontends. Nothing here renders or persists.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod pricing;
pub mod query;
pub mod shop;
pub mod wallet;

pub use catalog::{AnimalType, Catalog, CatalogLoader, Listing, ProcessType, WeightBucket};
pub use config::AppConfig;
pub use dashboard::SupplierDashboard;
pub use error::CatalogError;
pub use navigation::{NavigationSelection, NavigationState, Navigator};
pub use pricing::{price_per_kg, PriceComponent, SHIPPING_RATE};
pub use query::{filter_and_sort, SortKey};
pub use shop::{SessionId, SessionRegistry, ShopSession};
pub use wallet::WalletLedger;
