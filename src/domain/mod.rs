pub mod points;
pub mod ports;
pub mod receipt;
