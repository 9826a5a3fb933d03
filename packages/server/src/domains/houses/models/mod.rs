pub mod house;
pub mod image;
pub mod ledger_entry;
pub mod membership;

pub use house::{validate_new_house, House, HousePatch};
pub use image::ImageUpload;
pub use ledger_entry::{LedgerEntry, LedgerKind};
pub use membership::{HouseMember, Membership, Role};
