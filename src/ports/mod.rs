pub mod pricing_store;
pub mod reservation_repository;
pub mod room_repository;
