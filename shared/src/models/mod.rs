//! Data models for the Rollcall attendance metrics service.
//!
//! This module contains the core data structures for attendance submissions.

pub mod attendance;

pub use attendance::{AttendanceDraft, AttendanceError, AttendanceRecord};
