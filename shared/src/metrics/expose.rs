//! Prometheus text exposition (format 0.0.4).
//!
//! Serializes family snapshots as the text protocol scraped by a
//! monitoring collector:
//!
//! ```text
//! # HELP workshop_attendance_status Indicates the attendance status of a workshop attendee
//! # TYPE workshop_attendance_status gauge
//! workshop_attendance_status{name="Ada",workshop_id="W1",photo=""} 1
//! ```

use crate::metrics::series::FamilySnapshot;
use std::fmt::Write;

/// Content type of the rendered exposition.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escapes a label value per the exposition quoting rules.
///
/// Backslash, double quote, and newline are the only characters that need
/// escaping inside a quoted label value.
#[must_use]
pub fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes a help string. Only backslash and newline are special here;
/// help text is not quoted.
#[must_use]
pub fn escape_help(help: &str) -> String {
    let mut escaped = String::with_capacity(help.len());
    for c in help.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders family snapshots in exposition text format.
///
/// Every family emits its HELP/TYPE header even when it has no samples
/// yet. Sample lines appear in the snapshot's sorted tuple order, one line
/// per sample. Whole-number values render without a fractional part, so
/// status values appear as `1`/`0` and timestamps as plain integers.
#[must_use]
pub fn render(families: &[FamilySnapshot]) -> String {
    let mut out = String::new();
    for family in families {
        let _ = writeln!(out, "# HELP {} {}", family.name, escape_help(family.help));
        let _ = writeln!(out, "# TYPE {} gauge", family.name);
        for (labels, value) in &family.samples {
            let _ = write!(out, "{}{{", family.name);
            for (i, (label_name, label_value)) in
                family.label_names.iter().zip(labels).enumerate()
            {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{label_name}=\"{}\"", escape_label_value(label_value));
            }
            let _ = writeln!(out, "}} {value}");
        }
    }
    out
}
