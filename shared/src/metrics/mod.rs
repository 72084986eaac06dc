//! The attendance gauge registry and its text exposition.
//!
//! This module provides the labeled gauge families that hold attendance
//! state and the Prometheus text-format serialization of their snapshots.

pub mod expose;
pub mod registry;
pub mod series;

pub use expose::render;
pub use registry::{AttendanceRegistry, Clock, FixedClock, SystemClock};
pub use series::{FamilySnapshot, GaugeSeries};
