//! Inventory domain module.
//!
//! Record types, identity keys and the pure rules the stock engine applies
//! to them: hysteresis, text similarity and engineering-unit prefixes. No IO,
//! no storage.

pub mod active;
pub mod item;
pub mod location;
pub mod passive;
pub mod record;
pub mod similarity;
pub mod stock;
pub mod units;

pub use active::{ActiveComponent, ActiveLookup, NewActiveComponent};
pub use item::{GenericItem, GenericItemUpdate, ItemKey, NewGenericItem};
pub use location::Location;
pub use passive::{NewPassiveComponent, PassiveComponent, PassiveMergeKey};
pub use record::{StockRecord, StockTable};
pub use stock::{AlertState, Stocked, Transition};
pub use units::{MultiplierSet, MultiplierValue, SiPrefix};
