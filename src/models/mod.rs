//! Core data models for the ledger
//!
//! This module contains the data structures of the movement domain:
//! movements, their classification enums, money and period buckets.

pub mod category;
pub mod collection;
pub mod ids;
pub mod kind;
pub mod money;
pub mod movement;
pub mod payment;
pub mod period;

pub use category::Category;
pub use collection::MovementCollection;
pub use ids::MovementId;
pub use kind::{KindSelection, MovementKind, UnknownValueError};
pub use money::Money;
pub use movement::{Movement, MovementPatch, NONE_SENTINEL};
pub use payment::PaymentMethod;
pub use period::{order_month_labels, MonthLabel, PeriodParseError, YearMonth};
