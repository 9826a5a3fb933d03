pub mod houses;
pub mod users;
