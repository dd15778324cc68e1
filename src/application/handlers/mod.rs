//! Handlers orchestrating ports and domain logic, one file per operation.

pub mod catalog;
pub mod cycle;
pub mod forecast;
pub mod grid;
