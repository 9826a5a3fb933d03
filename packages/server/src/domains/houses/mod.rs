//! House domain - households, memberships and the ledger pairs tied to them
//!
//! Architecture:
//!   front end → actions (business rules, transactions) → models (SQL persistence)

pub mod actions;
pub mod error;
pub mod models;
pub mod policy;

// Re-export commonly used types
pub use error::{ErrorBody, HouseError};
pub use models::{House, HouseMember, ImageUpload, LedgerEntry, LedgerKind, Membership, Role};
pub use policy::RemovalPolicy;
