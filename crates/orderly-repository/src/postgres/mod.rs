//! Postgres store implementations.

mod order_repository;
mod user_repository;

pub use order_repository::PgOrderRepository;
pub use user_repository::PgUserRepository;
