pub mod pricing_store;
pub mod reservations;
pub mod rooms;
