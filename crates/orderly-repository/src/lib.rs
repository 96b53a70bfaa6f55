//! # Orderly Repository
//!
//! The store: durable, single source of truth for users and orders.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn OrderRepository>
//! PgUserRepository / PgOrderRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! Postgres
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
