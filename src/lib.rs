//! Plan Pilot - Forecast Cycle Planning Engine
//!
//! This crate implements the core planning logic for a sales & operations
//! planning portal: cycle lifecycle management, catalog pagination, forecast
//! grid reconciliation, validation/submission workflow, and deadline
//! evaluation. Presentation, authentication, and routing live outside this
//! crate and consume it through the application handlers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
