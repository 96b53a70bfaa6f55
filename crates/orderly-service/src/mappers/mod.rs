//! Entity-DTO mappers.

use crate::dto::{OrderResponse, UserResponse};
use orderly_core::{Order, Subject, User};

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<UserResponse> for Subject {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: Some(user.created_at),
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            product: order.product,
            quantity: order.quantity,
            created_at: order.created_at,
        }
    }
}
