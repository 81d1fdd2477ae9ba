pub mod date_window;
pub mod price_calculator;
pub mod pricing;
pub mod reservation;
pub mod room;
pub mod statistics;
