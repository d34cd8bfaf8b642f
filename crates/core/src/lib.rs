//! `stockroom-core`: foundation building blocks for the stock engine.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod flag;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{StockError, StockResult};
pub use flag::parse_flag;
pub use id::{ActiveId, ItemId, PassiveId, RecordId};
pub use value_object::ValueObject;
