//! # Orderly Server Library
//!
//! Wiring and startup for the Orderly server binary.
//!
//! Every shared client (database pool, cache, directory) is constructed once
//! here and handed to the services that use it.

pub mod app;
pub mod di;
pub mod telemetry;
