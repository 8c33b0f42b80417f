//! `pbank-core` — ledger building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no locking).

pub mod amount;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use amount::{Amount, AmountBuilder};
pub use entity::{Entity, find_by_id};
pub use error::{LedgerError, LedgerResult};
pub use id::{AccountId, BeneficiaryId};
pub use value_object::ValueObject;

pub use rust_decimal::Decimal;
