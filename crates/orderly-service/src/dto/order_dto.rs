//! Order-related DTOs.

use chrono::{DateTime, Utc};
use orderly_core::rules::not_blank;
use orderly_core::{OrderId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to place an order for a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    /// Id as supplied by the caller. The persisted owner is the id the
    /// directory resolves it to.
    pub user_id: UserId,

    #[validate(custom(function = "not_blank", message = "Product must not be blank"))]
    pub product: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
}

/// Order response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    pub product: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderly_core::{OrderlyError, ValidateExt};

    fn request(product: &str, quantity: i64) -> CreateOrderRequest {
        CreateOrderRequest {
            user_id: UserId::new(1),
            product: product.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("widget", 1).validate_request().is_ok());
    }

    #[test]
    fn test_blank_product() {
        let err = request("  ", 1).validate_request().unwrap_err();
        assert!(matches!(err, OrderlyError::InvalidArgument(ref m) if m.contains("product")));
    }

    #[test]
    fn test_non_positive_quantity() {
        for quantity in [0, -3] {
            let err = request("widget", quantity).validate_request().unwrap_err();
            assert!(matches!(err, OrderlyError::InvalidArgument(ref m) if m.contains("quantity")));
        }
    }
}
