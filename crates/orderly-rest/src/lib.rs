//! # Orderly REST
//!
//! REST API layer using Axum for Orderly.
//! Exposes the user and order services, health checks, and the OpenAPI
//! document. Every handler runs under a per-request [`CallContext`] so that a
//! timeout or a client disconnect aborts outstanding I/O.
//!
//! [`CallContext`]: orderly_core::CallContext

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
