//! In-memory adapters.
//!
//! Backed by plain collections behind `RwLock`s; none of the methods hold
//! a guard across an await point. Useful for tests and local development.

mod catalog;
mod cycle;
mod forecast;

pub use catalog::InMemoryCatalogSource;
pub use cycle::InMemoryCycleStore;
pub use forecast::InMemoryForecastStore;
