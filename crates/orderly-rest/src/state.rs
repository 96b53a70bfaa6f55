//! Application state for the router.

use orderly_core::HealthCheck;
use orderly_service::{OrderService, UserService};
use std::sync::Arc;

/// Everything the router needs, assembled once at startup.
///
/// A service left as `None` is not served by this process, and its routes
/// are not mounted.
#[derive(Clone, Default)]
pub struct AppState {
    pub user_service: Option<Arc<dyn UserService>>,
    pub order_service: Option<Arc<dyn OrderService>>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates an empty application state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves the user API.
    #[must_use]
    pub fn with_user_service(mut self, service: Arc<dyn UserService>) -> Self {
        self.user_service = Some(service);
        self
    }

    /// Serves the order API.
    #[must_use]
    pub fn with_order_service(mut self, service: Arc<dyn OrderService>) -> Self {
        self.order_service = Some(service);
        self
    }

    /// Registers a dependency for the readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}
