//! Adapters - implementations of the port interfaces.
//!
//! - `http` - the planning portal's REST backend over reqwest
//! - `memory` - in-memory stores for tests and local development

pub mod http;
pub mod memory;

pub use http::{DataAccessClient, DataAccessConfig};
pub use memory::{InMemoryCatalogSource, InMemoryCycleStore, InMemoryForecastStore};
