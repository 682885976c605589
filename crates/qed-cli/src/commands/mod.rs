pub mod check;
pub mod verify;
pub mod version;
