//! Domain layer - pure business logic with no I/O.

pub mod catalog;
pub mod cycle;
pub mod forecast;
pub mod foundation;
