pub mod device;
pub mod inventory;
