//! User identities that houses are built from.

pub mod models;

pub use models::user::User;
