//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod order_service_impl;
pub mod user_service_impl;

pub use order_service_impl::OrderServiceImpl;
pub use user_service_impl::UserServiceImpl;
