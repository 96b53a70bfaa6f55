//! # Orderly Service
//!
//! Cache-aside user and order services.
//!
//! Reads go cache first and fall back to the store, populating the cache
//! with whatever the store returned. Writes go to the store first and only
//! then touch the cache. A cache failure never changes the outcome of an
//! operation.

pub mod cache;
pub mod directory;
pub mod dto;
pub mod r#impl;
mod mappers;
pub mod order_service;
pub mod user_service;

#[cfg(test)]
mod test_support;

pub use cache::*;
pub use directory::*;
pub use dto::*;
pub use order_service::*;
pub use r#impl::*;
pub use user_service::*;
