//! House actions - the membership lifecycle
//!
//! Every mutating action runs its persisted effects in a single transaction so a
//! membership never exists without its ledger pair.

mod assign_user;
mod create_house;
mod queries;
mod remove_user;
mod update_house;

pub use assign_user::assign_user;
pub use create_house::{create_house, CreateHouse};
pub use queries::{
    get_house, houses_for_user, ledger_entries_for, list_house_members, list_houses,
    membership_history, memberships_of_house, user_belongs_to_house,
};
pub use remove_user::remove_user;
pub use update_house::{update_house, UpdateHouse};
