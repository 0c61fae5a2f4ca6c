//! Outcome of a single navigation run.

use super::trace::NavigationTrace;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a navigation run ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every edge on the route was confirmed.
    Arrived,

    /// The target is not a scene of this graph. Nothing was invoked.
    UnknownDestination,

    /// An edge never confirmed within its attempt budget.
    /// The run stopped in `reached`, the last confirmed scene.
    Exhausted {
        edge: String,
        reached: String,
        attempts: usize,
    },
}

/// Everything known about one call to
/// [`Navigator::navigate`](super::Navigator::navigate).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationReport {
    /// Identifier shared with the run's tracing span
    pub run_id: Uuid,
    pub target: String,
    pub outcome: Outcome,
    /// Confirmed transitions, in order
    pub trace: NavigationTrace,
}

impl NavigationReport {
    pub fn arrived(&self) -> bool {
        matches!(self.outcome, Outcome::Arrived)
    }

    /// Last scene the run confirmed, if it crossed any edge.
    pub fn last_confirmed(&self) -> Option<&str> {
        self.trace.last_scene()
    }
}
