//! Data Transfer Objects (DTOs).

mod order_dto;
mod user_dto;

pub use order_dto::*;
pub use user_dto::*;
