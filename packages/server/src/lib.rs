// Student House API - Core
//
// This crate manages shared-living houses: who belongs to which house, with which
// role, and the crate/beer ledger pair every active membership carries.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
