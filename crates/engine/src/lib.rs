//! Inventory resolution and stock-state engine.
//!
//! Five components share one injected [`InventoryStore`]:
//!
//! - [`IdentityResolver`]: exact key lookup with approximate fallback
//! - [`StockLedger`]: count mutation and the low-stock hysteresis
//! - [`ComponentCatalog`]: add-with-merge, update, delete, lookups
//! - [`UnitScaleDeriver`]: engineering prefix ladders per component type
//! - [`RangeSearch`]: value-window, text and restock searches
//!
//! [`StockEngine`] wires them together over a shared `Arc` store.
//!
//! [`InventoryStore`]: stockroom_infra::InventoryStore

pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod resolver;
pub mod scale;
pub mod search;

pub use catalog::ComponentCatalog;
pub use engine::StockEngine;
pub use ledger::{NotifySignal, RecordRef, StockLedger};
pub use resolver::{IdentityResolver, Resolution};
pub use scale::UnitScaleDeriver;
pub use search::{ActiveQuery, PassiveQuery, RangeSearch, ValueWindow, ValueWindowQuery};

#[cfg(test)]
mod fixtures;
