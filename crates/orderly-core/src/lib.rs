//! # Orderly Core
//!
//! Core types, error taxonomy, and request context shared by every layer of
//! Orderly. Nothing in here performs I/O.

pub mod context;
pub mod entities;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use context::*;
pub use entities::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
