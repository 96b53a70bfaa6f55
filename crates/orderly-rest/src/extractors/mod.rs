//! Custom Axum extractors.

mod context;
mod json;

pub use context::*;
pub use json::*;
