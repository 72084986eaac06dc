//! The attendance gauge registry.
//!
//! Owns the three gauge families that reflect attendance state and applies
//! attendance events to them. Constructed once at process start and shared
//! via `Arc`; tests create independent instances with a deterministic clock.

use crate::metrics::expose;
use crate::metrics::series::{FamilySnapshot, GaugeSeries};
use crate::models::{AttendanceDraft, AttendanceError};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Family name for attendance status.
pub const ATTENDANCE_STATUS: &str = "workshop_attendance_status";
/// Family name for last-seen timestamps.
pub const LAST_SEEN_TIME: &str = "workshop_last_seen_time";
/// Family name for arrival timestamps.
pub const ARRIVAL_TIME: &str = "workshop_arrival_time";

/// A source of the current wall-clock time in milliseconds since the Unix
/// epoch.
///
/// The registry stamps every write with "now" from this capability; the
/// caller never supplies an event timestamp. Production uses
/// [`SystemClock`]; tests inject a [`FixedClock`].
pub trait Clock: Send + Sync {
    /// Returns the current time as whole milliseconds since the Unix epoch,
    /// truncating any sub-millisecond remainder.
    fn now_millis(&self) -> i64;
}

impl std::fmt::Debug for dyn Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Clock")
    }
}

/// Wall-clock time source.
///
/// Epoch milliseconds are timezone-invariant, so no timezone handling is
/// involved here.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Deterministic time source for tests.
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    /// Creates a clock frozen at the given epoch milliseconds.
    #[must_use]
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Registry of the three attendance gauge families.
///
/// - `workshop_attendance_status{name, workshop_id, photo}` - 1 present, 0 absent
/// - `workshop_last_seen_time{name, workshop_id}` - epoch ms of last update
/// - `workshop_arrival_time{name, workshop_id}` - identical to last seen
///
/// The status family is keyed by the full (name, workshop id, photo) tuple,
/// so a photo change creates a new sample and leaves the prior one in place.
/// The timestamp families are keyed by (name, workshop id) only and
/// overwrite on every update.
///
/// Each family holds its own lock; a call to [`record`](Self::record)
/// performs three independent single-sample writes, so a concurrent reader
/// may observe the status updated before the timestamps or vice versa.
/// Individual sample writes are never torn.
#[derive(Debug)]
pub struct AttendanceRegistry {
    status: GaugeSeries,
    last_seen: GaugeSeries,
    arrival: GaugeSeries,
    clock: Arc<dyn Clock>,
}

impl AttendanceRegistry {
    /// Creates a registry backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a registry backed by the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            status: GaugeSeries::new(
                ATTENDANCE_STATUS,
                "Indicates the attendance status of a workshop attendee",
                &["name", "workshop_id", "photo"],
            ),
            last_seen: GaugeSeries::new(
                LAST_SEEN_TIME,
                "Records the last seen timestamp of an attendee",
                &["name", "workshop_id"],
            ),
            arrival: GaugeSeries::new(
                ARRIVAL_TIME,
                "Records the arrival time of an attendee",
                &["name", "workshop_id"],
            ),
            clock,
        }
    }

    /// Records one attendance event.
    ///
    /// Accepts any strings, including empty ones; identity validation is
    /// the HTTP adapter's job. An absent photo renders as the empty label
    /// value, never as an omitted label. Arrival is set to the same instant
    /// as last seen on every update; the model does not distinguish first
    /// arrival from subsequent sightings.
    pub fn record(&self, name: &str, workshop_id: &str, present: bool, photo_link: Option<&str>) {
        let now = self.clock.now_millis();

        self.status.set(
            vec![
                name.to_string(),
                workshop_id.to_string(),
                photo_link.unwrap_or_default().to_string(),
            ],
            if present { 1.0 } else { 0.0 },
        );

        let identity = vec![name.to_string(), workshop_id.to_string()];
        // Timestamps fit in f64 exactly until the year 287396.
        #[allow(clippy::cast_precision_loss)]
        let now = now as f64;
        self.last_seen.set(identity.clone(), now);
        self.arrival.set(identity, now);

        tracing::debug!(name, workshop_id, present, "attendance recorded");
    }

    /// Applies a batch of attendance drafts in input order.
    ///
    /// Later records for the same identity overwrite earlier ones within
    /// the batch. Processing stops at the first draft lacking a required
    /// identity field; drafts before it have already been applied, and the
    /// caller decides how to report that.
    ///
    /// # Errors
    ///
    /// Returns [`AttendanceError::MissingField`] naming the offending
    /// record and field. Missing fields are never silently defaulted.
    pub fn bulk_update(&self, drafts: &[AttendanceDraft]) -> Result<usize, AttendanceError> {
        for (index, draft) in drafts.iter().enumerate() {
            let (name, workshop_id) = draft.identity(index)?;
            self.record(
                name,
                workshop_id,
                draft.is_present(),
                draft.photo_link.as_deref(),
            );
        }
        Ok(drafts.len())
    }

    /// Takes a point-in-time snapshot of all three families.
    ///
    /// Each family snapshot is internally consistent; the three snapshots
    /// are taken one after another, so writes racing with the read may be
    /// visible in one family and not yet in another.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FamilySnapshot> {
        vec![
            self.status.snapshot(),
            self.last_seen.snapshot(),
            self.arrival.snapshot(),
        ]
    }

    /// Renders the current state in Prometheus text exposition format.
    #[must_use]
    pub fn render(&self) -> String {
        expose::render(&self.snapshot())
    }

    /// Returns the status family (for inspection in tests and exposition).
    #[must_use]
    pub fn status(&self) -> &GaugeSeries {
        &self.status
    }

    /// Returns the last-seen family.
    #[must_use]
    pub fn last_seen(&self) -> &GaugeSeries {
        &self.last_seen
    }

    /// Returns the arrival family.
    #[must_use]
    pub fn arrival(&self) -> &GaugeSeries {
        &self.arrival
    }
}

impl Default for AttendanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
