pub mod fixture;
pub mod memory;
