//! REST API controllers.

pub mod health_controller;
pub mod metrics_controller;
pub mod order_controller;
pub mod user_controller;

pub use health_controller::*;
