//! Journal of accepted transitions.
//!
//! Every event that completes a transition leaves a record. Bootstrapping a
//! fresh instance and reconstituting one at a persisted state do not.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single accepted transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// The event that caused the transition
    pub event: String,
    /// When the state was swapped
    pub timestamp: DateTime<Utc>,
}

/// Ordered journal of transitions taken by one instance.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use waypoint::{TransitionLog, TransitionRecord};
///
/// let mut log = TransitionLog::new();
/// log.record(TransitionRecord {
///     from: "draft".into(),
///     to: "reviewed".into(),
///     event: "review".into(),
///     timestamp: Utc::now(),
/// });
/// log.record(TransitionRecord {
///     from: "reviewed".into(),
///     to: "published".into(),
///     event: "publish".into(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.path(), vec!["draft", "reviewed", "published"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn record(&mut self, record: TransitionRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names of the states traversed: the first record's origin, then the
    /// destination of every record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Time elapsed between the first and the last record.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
