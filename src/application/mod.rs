//! Application layer orchestrating the scoring rules and the storage port.

pub mod service;
