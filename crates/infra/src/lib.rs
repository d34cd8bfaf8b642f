//! Infrastructure layer: record stores and configuration.

pub mod config;
pub mod store;

pub use config::{ConfigError, EngineConfig, UnitType};
pub use store::{
    InMemoryInventoryStore, InMemoryMultiplierStore, InMemoryTable, InventoryStore, MultiplierStore, RecordStore,
    StoreError, Transaction,
};
