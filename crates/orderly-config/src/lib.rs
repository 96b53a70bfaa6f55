//! # Orderly Config
//!
//! Configuration management for Orderly.
//! Supports layered configuration from files and environment variables.

mod app_config;
mod deployment;
mod loader;

pub use app_config::*;
pub use deployment::*;
pub use loader::*;
