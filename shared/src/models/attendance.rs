//! Attendance data model.
//!
//! Defines the `AttendanceRecord` structure for fully-formed attendance
//! events and the `AttendanceDraft` structure for loosely-typed submissions
//! whose required fields still need to be checked.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

fn default_present() -> bool {
    true
}

/// A single attendance event for a workshop participant.
///
/// The pair (`name`, `workshop_id`) identifies the participant within a
/// workshop. `photo_link` is part of the status series identity: two records
/// that differ only in photo address two distinct status samples.
///
/// # Example
///
/// ```
/// use shared::models::AttendanceRecord;
///
/// let record = AttendanceRecord::new("Ada Lovelace", "WORKSHOP-001")
///     .with_photo("https://example.com/ada.jpg");
///
/// assert!(record.present);
/// assert!(record.validate_record().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AttendanceRecord {
    /// Name of the attendee.
    #[validate(length(min = 1, message = "Attendee name cannot be empty"))]
    pub name: String,

    /// Identifier of the workshop the attendee belongs to.
    #[validate(length(min = 1, message = "Workshop id cannot be empty"))]
    pub workshop_id: String,

    /// Whether the attendee is present. Defaults to `true` when absent
    /// from a submission.
    #[serde(default = "default_present")]
    pub present: bool,

    /// Optional URL of the attendee's photo. `None` is distinct from an
    /// empty string and renders as the empty label value on exposition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_link: Option<String>,
}

impl AttendanceRecord {
    /// Creates a new present-attendance record without a photo.
    #[must_use]
    pub fn new(name: impl Into<String>, workshop_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workshop_id: workshop_id.into(),
            present: true,
            photo_link: None,
        }
    }

    /// Marks the attendee as absent.
    #[must_use]
    pub fn absent(mut self) -> Self {
        self.present = false;
        self
    }

    /// Sets the photo link of the attendee.
    #[must_use]
    pub fn with_photo(mut self, photo_link: impl Into<String>) -> Self {
        self.photo_link = Some(photo_link.into());
        self
    }

    /// Validates the record for submission through the HTTP adapter.
    ///
    /// The gauge registry itself performs no validation; empty identity
    /// strings are rejected here, at the adapter boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` or `workshop_id` is empty.
    pub fn validate_record(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

/// A loosely-typed attendance submission.
///
/// Bulk submissions arrive as arbitrary JSON objects; required identity
/// fields may be missing and must not be silently defaulted. A draft keeps
/// every field optional so the registry can detect and report the missing
/// field instead of the deserializer rejecting the whole payload opaquely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDraft {
    /// Name of the attendee, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Workshop identifier, if supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<String>,

    /// Presence flag; treated as `true` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,

    /// Optional photo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_link: Option<String>,
}

impl AttendanceDraft {
    /// Creates a draft carrying both required identity fields.
    #[must_use]
    pub fn new(name: impl Into<String>, workshop_id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            workshop_id: Some(workshop_id.into()),
            present: None,
            photo_link: None,
        }
    }

    /// Returns the identity fields, or the first missing one as an error.
    ///
    /// `index` is the position of this draft within its batch and is
    /// reported back to the caller in the error.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceError::MissingField`] if `name` or `workshop_id`
    /// is absent.
    pub fn identity(&self, index: usize) -> Result<(&str, &str), AttendanceError> {
        let name = self
            .name
            .as_deref()
            .ok_or(AttendanceError::MissingField {
                index,
                field: "name",
            })?;
        let workshop_id = self
            .workshop_id
            .as_deref()
            .ok_or(AttendanceError::MissingField {
                index,
                field: "workshop_id",
            })?;
        Ok((name, workshop_id))
    }

    /// Returns the effective presence flag (default `true`).
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.present.unwrap_or(true)
    }
}

impl From<AttendanceRecord> for AttendanceDraft {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            name: Some(record.name),
            workshop_id: Some(record.workshop_id),
            present: Some(record.present),
            photo_link: record.photo_link,
        }
    }
}

/// Errors that can occur while applying attendance submissions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttendanceError {
    /// A submission lacks a required identity field.
    #[error("record {index} is missing required field '{field}'")]
    MissingField {
        /// Position of the offending record within the batch.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },
}
