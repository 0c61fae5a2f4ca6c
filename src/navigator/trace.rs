//! Record of the edges a navigation run crossed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One confirmed transition.
///
/// # Example
///
/// ```rust
/// use navtrie::navigator::EdgeRecord;
/// use chrono::Utc;
///
/// let record = EdgeRecord {
///     edge: "terminal".into(),
///     from: "home".into(),
///     to: "terminal".into(),
///     timestamp: Utc::now(),
///     attempt: 1,
/// };
/// assert_eq!(record.to, "terminal");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Edge key inside the source scene
    pub edge: String,
    /// Scene the edge starts from
    pub from: String,
    /// Scene the edge leads to
    pub to: String,
    /// When arrival was confirmed
    pub timestamp: DateTime<Utc>,
    /// Attempt on which action and checker both succeeded (1-based)
    pub attempt: usize,
}

/// Ordered list of confirmed transitions.
///
/// Immutable: [`record`](Self::record) returns a new trace.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationTrace {
    records: Vec<EdgeRecord>,
}

impl NavigationTrace {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning the extended trace.
    pub fn record(&self, record: EdgeRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Scenes visited in order: the starting scene, then each arrival.
    ///
    /// ```rust
    /// use navtrie::navigator::{EdgeRecord, NavigationTrace};
    /// use chrono::Utc;
    ///
    /// let trace = NavigationTrace::new()
    ///     .record(EdgeRecord {
    ///         edge: "a".into(),
    ///         from: "root".into(),
    ///         to: "a".into(),
    ///         timestamp: Utc::now(),
    ///         attempt: 1,
    ///     })
    ///     .record(EdgeRecord {
    ///         edge: "b".into(),
    ///         from: "a".into(),
    ///         to: "b".into(),
    ///         timestamp: Utc::now(),
    ///         attempt: 2,
    ///     });
    ///
    /// assert_eq!(trace.scenes(), vec!["root", "a", "b"]);
    /// ```
    pub fn scenes(&self) -> Vec<&str> {
        let mut scenes = Vec::new();
        if let Some(first) = self.records.first() {
            scenes.push(first.from.as_str());
        }
        for record in &self.records {
            scenes.push(record.to.as_str());
        }
        scenes
    }

    /// Scene reached by the last confirmed transition.
    pub fn last_scene(&self) -> Option<&str> {
        self.records.last().map(|record| record.to.as_str())
    }

    /// Time between the first and last confirmation.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Attempts spent across all confirmed transitions.
    pub fn total_attempts(&self) -> usize {
        self.records.iter().map(|record| record.attempt).sum()
    }

    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
