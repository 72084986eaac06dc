//! Rollcall Shared Library
//!
//! This crate contains the attendance data models and the gauge registry
//! used across the Rollcall attendance metrics service.
//!
//! # Modules
//!
//! - [`models`] - Attendance records and submission drafts
//! - [`metrics`] - The attendance gauge registry and text exposition
//!
//! # Example
//!
//! ```
//! use shared::metrics::AttendanceRegistry;
//!
//! let registry = AttendanceRegistry::new();
//! registry.record("Ada Lovelace", "WORKSHOP-001", true, None);
//!
//! let text = registry.render();
//! assert!(text.contains("workshop_attendance_status"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod metrics;
pub mod models;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
pub use validator;
