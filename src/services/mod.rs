//! Service layer for the ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! effective-date resolution, validated entry and edit flows, and sessions.

pub mod effective_date;
pub mod movement;
pub mod session;

pub use effective_date::{
    EffectiveDatePolicy, CREATION_SHIFT_THRESHOLD_DAYS, EDIT_SHIFT_THRESHOLD_DAYS,
};
pub use movement::{MovementInput, MovementService};
pub use session::Session;
