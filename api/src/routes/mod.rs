//! API route definitions.
//!
//! This module organizes all HTTP routes for the Rollcall API server.

mod attendance;
mod health;
mod help;
mod scrape;

pub use attendance::attendance_routes;
pub use health::health_routes;
pub use help::help_routes;
pub use scrape::scrape_routes;
