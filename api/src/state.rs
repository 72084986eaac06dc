//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use shared::metrics::AttendanceRegistry;
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the attendance gauge registry, created once at process start and
/// shared for the process lifetime. Tests create independent instances for
/// isolation.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<AttendanceRegistry>,
}

impl AppState {
    /// Creates a new application state around the given registry.
    #[must_use]
    pub fn new(registry: Arc<AttendanceRegistry>) -> Self {
        Self { registry }
    }

    /// Creates a new application state with a fresh registry backed by the
    /// system clock.
    #[must_use]
    pub fn with_fresh_registry() -> Self {
        Self::new(Arc::new(AttendanceRegistry::new()))
    }

    /// Returns a reference to the attendance registry.
    #[must_use]
    pub fn registry(&self) -> &AttendanceRegistry {
        &self.registry
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_fresh_registry()
    }
}
