//! Labeled gauge series.
//!
//! A `GaugeSeries` is one metric family: a name, a help string, a fixed
//! ordered list of label dimensions, and a map from label-value tuples to
//! the latest sample value written for that tuple.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// A named gauge family keyed by ordered label-value tuples.
///
/// The full tuple is the series identity: two writes whose label values
/// differ in any position address two distinct samples. Writes to an
/// existing tuple overwrite in place (last-write-wins); samples are never
/// deleted.
///
/// All access is guarded by a single `RwLock` per series, which makes each
/// sample write and each full-family snapshot atomic with respect to
/// concurrent use. A poisoned lock is recovered by taking the inner map,
/// which is structurally valid after any panic.
#[derive(Debug)]
pub struct GaugeSeries {
    name: &'static str,
    help: &'static str,
    label_names: &'static [&'static str],
    samples: RwLock<BTreeMap<Vec<String>, f64>>,
}

impl GaugeSeries {
    /// Creates an empty gauge family.
    #[must_use]
    pub fn new(
        name: &'static str,
        help: &'static str,
        label_names: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            label_names,
            samples: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the family name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the help text.
    #[must_use]
    pub fn help(&self) -> &'static str {
        self.help
    }

    /// Returns the ordered label dimension names.
    #[must_use]
    pub fn label_names(&self) -> &'static [&'static str] {
        self.label_names
    }

    /// Sets the sample for the given label-value tuple, creating it on
    /// first use.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the tuple length does not match the
    /// family's label dimensions; callers construct tuples from the fixed
    /// dimension list, so a mismatch is a programming error.
    pub fn set(&self, labels: Vec<String>, value: f64) {
        debug_assert_eq!(labels.len(), self.label_names.len());
        let mut samples = self
            .samples
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        samples.insert(labels, value);
    }

    /// Returns the current value for the given label-value tuple, if set.
    #[must_use]
    pub fn get(&self, labels: &[String]) -> Option<f64> {
        let samples = self.samples.read().unwrap_or_else(PoisonError::into_inner);
        samples.get(labels).copied()
    }

    /// Returns the number of distinct label tuples ever written.
    #[must_use]
    pub fn len(&self) -> usize {
        let samples = self.samples.read().unwrap_or_else(PoisonError::into_inner);
        samples.len()
    }

    /// Returns true if no sample has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes a consistent snapshot of the whole family.
    ///
    /// Samples are returned in sorted tuple order, which makes the
    /// exposition output deterministic.
    #[must_use]
    pub fn snapshot(&self) -> FamilySnapshot {
        let samples = self.samples.read().unwrap_or_else(PoisonError::into_inner);
        FamilySnapshot {
            name: self.name,
            help: self.help,
            label_names: self.label_names,
            samples: samples.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        }
    }
}

/// A point-in-time copy of one gauge family.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilySnapshot {
    /// Family name.
    pub name: &'static str,
    /// Help text.
    pub help: &'static str,
    /// Ordered label dimension names.
    pub label_names: &'static [&'static str],
    /// Sorted (label tuple, value) pairs.
    pub samples: Vec<(Vec<String>, f64)>,
}
