//! Route execution with per-edge retry.

use super::builder::NavigatorBuilder;
use super::config::NavigatorConfig;
use super::error::BuildError;
use super::report::{NavigationReport, Outcome};
use super::trace::{EdgeRecord, NavigationTrace};
use crate::core::{Cancelled, Edge, PathTable, SceneGraph};
use chrono::Utc;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Drives the scene graph toward a named destination.
///
/// Holds the graph and its precomputed [`PathTable`]; neither changes after
/// construction, so every call to [`navigate`](Self::navigate) is an
/// independent run from the root.
#[derive(Debug, Clone)]
pub struct Navigator {
    graph: SceneGraph,
    paths: PathTable,
    config: NavigatorConfig,
}

impl Navigator {
    /// Create a navigator, precomputing every route in `graph`.
    pub fn new(graph: SceneGraph, config: NavigatorConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let paths = PathTable::build(&graph);
        Ok(Self {
            graph,
            paths,
            config,
        })
    }

    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::new()
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Rebinding only swaps capabilities, so cached routes stay valid.
    pub(crate) fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn paths(&self) -> &PathTable {
        &self.paths
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Whether `target` names a scene of this graph.
    pub fn knows(&self, target: &str) -> bool {
        self.paths.contains(target)
    }

    /// Scene names from the root to `target`, both included.
    pub fn route(&self, target: &str) -> Option<Vec<&str>> {
        let route = self.paths.get(target)?;
        let mut scenes = vec![self.graph.node_at(self.graph.root()).name()];
        for id in route {
            let edge = self.graph.edge_at(*id);
            scenes.push(self.graph.node_at(edge.target()).name());
        }
        Some(scenes)
    }

    /// Navigate to `target`, reporting only whether it was reached.
    ///
    /// Unknown targets and exhausted edges both yield `Ok(false)`.
    /// `Err(Cancelled)` means an action or checker aborted the run.
    pub fn navigate_to(&self, target: &str) -> Result<bool, Cancelled> {
        Ok(self.navigate(target)?.arrived())
    }

    /// Navigate to `target` and describe how the run went.
    ///
    /// Edges are crossed in root-to-target order. Each edge gets up to
    /// `max_retry` attempts; an attempt succeeds when the action returns
    /// `true` and the target's checker then also returns `true`. The first
    /// edge that never succeeds ends the run where it stands.
    pub fn navigate(&self, target: &str) -> Result<NavigationReport, Cancelled> {
        let run_id = Uuid::new_v4();
        let span = info_span!("navigate", destination = target, %run_id);
        let _entered = span.enter();

        let report = |outcome: Outcome, trace: NavigationTrace| NavigationReport {
            run_id,
            target: target.to_string(),
            outcome,
            trace,
        };

        let Some(route) = self.paths.get(target) else {
            warn!("unknown destination");
            return Ok(report(Outcome::UnknownDestination, NavigationTrace::new()));
        };

        let mut trace = NavigationTrace::new();
        for id in route {
            let edge = self.graph.edge_at(*id);
            let from = self.graph.node_at(edge.source()).name();
            let to = self.graph.node_at(edge.target()).name();

            match self.cross(edge)? {
                Some(attempt) => {
                    trace = trace.record(EdgeRecord {
                        edge: edge.key().to_string(),
                        from: from.to_string(),
                        to: to.to_string(),
                        timestamp: Utc::now(),
                        attempt,
                    });
                }
                None => {
                    warn!(
                        edge = edge.key(),
                        reached = from,
                        attempts = self.config.max_retry,
                        "edge exhausted its attempts"
                    );
                    let outcome = Outcome::Exhausted {
                        edge: edge.key().to_string(),
                        reached: from.to_string(),
                        attempts: self.config.max_retry,
                    };
                    return Ok(report(outcome, trace));
                }
            }
        }

        info!(edges = route.len(), "arrived");
        Ok(report(Outcome::Arrived, trace))
    }

    /// Try one edge. Returns the successful attempt number, or `None`
    /// once the budget is spent.
    fn cross(&self, edge: &Edge) -> Result<Option<usize>, Cancelled> {
        let checker = self.graph.node_at(edge.target()).checker();

        for attempt in 1..=self.config.max_retry {
            if !edge.action().call()? {
                debug!(edge = edge.key(), attempt, action = edge.action().key(), "action failed");
                continue;
            }
            if checker.call()? {
                debug!(edge = edge.key(), attempt, "arrival confirmed");
                return Ok(Some(attempt));
            }
            debug!(edge = edge.key(), attempt, checker = checker.key(), "arrival not confirmed");
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Capability, Node};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Capability replaying `results`, repeating the last one forever.
    fn scripted(key: &str, results: &[bool]) -> (Capability, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let results = results.to_vec();
        let capability = Capability::from_predicate(key.to_string(), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            results[n.min(results.len() - 1)]
        });
        (capability, calls)
    }

    fn calls(counter: &Arc<AtomicUsize>) -> usize {
        counter.load(Ordering::SeqCst)
    }

    #[test]
    fn root_target_needs_no_transitions() {
        let (check_home, home_calls) = scripted("at_home", &[true]);
        let graph = SceneGraph::new(Node::new("home", check_home));
        let navigator = Navigator::new(graph, NavigatorConfig::default()).unwrap();

        let report = navigator.navigate("home").unwrap();

        assert!(report.arrived());
        assert!(report.trace.is_empty());
        assert_eq!(calls(&home_calls), 0);
    }

    #[test]
    fn unknown_target_invokes_nothing() {
        let (check_home, home_calls) = scripted("at_home", &[true]);
        let (check_a, a_checks) = scripted("at_a", &[true]);
        let (go_a, a_actions) = scripted("go_a", &[true]);

        let mut graph = SceneGraph::new(Node::new("home", check_home));
        graph
            .attach(graph.root(), Node::new("a", check_a), go_a)
            .unwrap();
        let navigator = Navigator::new(graph, NavigatorConfig::default()).unwrap();

        let report = navigator.navigate("nowhere").unwrap();

        assert_eq!(report.outcome, Outcome::UnknownDestination);
        assert_eq!(calls(&home_calls), 0);
        assert_eq!(calls(&a_checks), 0);
        assert_eq!(calls(&a_actions), 0);
    }

    #[test]
    fn checker_skipped_when_action_fails() {
        let (check_a, a_checks) = scripted("at_a", &[true]);
        let (go_a, a_actions) = scripted("go_a", &[false]);

        let mut graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
        graph
            .attach(graph.root(), Node::new("a", check_a), go_a)
            .unwrap();
        let navigator = Navigator::new(graph, NavigatorConfig::with_max_retry(3)).unwrap();

        assert_eq!(navigator.navigate_to("a"), Ok(false));
        assert_eq!(calls(&a_actions), 3);
        assert_eq!(calls(&a_checks), 0);
    }

    #[test]
    fn failed_checker_consumes_an_attempt() {
        let (check_a, a_checks) = scripted("at_a", &[false, true]);
        let (go_a, a_actions) = scripted("go_a", &[true]);

        let mut graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
        graph
            .attach(graph.root(), Node::new("a", check_a), go_a)
            .unwrap();
        let navigator = Navigator::new(graph, NavigatorConfig::with_max_retry(2)).unwrap();

        let report = navigator.navigate("a").unwrap();

        assert!(report.arrived());
        assert_eq!(report.trace.records()[0].attempt, 2);
        assert_eq!(calls(&a_actions), 2);
        assert_eq!(calls(&a_checks), 2);
    }

    #[test]
    fn exhaustion_reports_last_confirmed_scene() {
        let mut graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
        let a = graph
            .attach(
                graph.root(),
                Node::new("a", Capability::constant("at_a", true)),
                Capability::constant("go_a", true),
            )
            .unwrap();
        graph
            .attach(
                a,
                Node::new("b", Capability::constant("at_b", false)),
                Capability::constant("go_b", true),
            )
            .unwrap();
        let navigator = Navigator::new(graph, NavigatorConfig::default()).unwrap();

        let report = navigator.navigate("b").unwrap();

        assert_eq!(
            report.outcome,
            Outcome::Exhausted {
                edge: "b".into(),
                reached: "a".into(),
                attempts: 2,
            }
        );
        assert_eq!(report.last_confirmed(), Some("a"));
    }

    #[test]
    fn cancellation_stops_retrying() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let aborting = Capability::new("go_a", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Cancelled)
        });

        let mut graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
        graph
            .attach(
                graph.root(),
                Node::new("a", Capability::constant("at_a", true)),
                aborting,
            )
            .unwrap();
        let navigator = Navigator::new(graph, NavigatorConfig::with_max_retry(5)).unwrap();

        assert_eq!(navigator.navigate_to("a"), Err(Cancelled));
        assert_eq!(calls(&attempts), 1);
    }

    #[test]
    fn route_lists_scene_names() {
        let mut graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
        let a = graph
            .attach(
                graph.root(),
                Node::new("a", Capability::constant("at_a", true)),
                Capability::constant("go_a", true),
            )
            .unwrap();
        graph
            .attach(
                a,
                Node::new("b", Capability::constant("at_b", true)),
                Capability::constant("go_b", true),
            )
            .unwrap();
        let navigator = Navigator::new(graph, NavigatorConfig::default()).unwrap();

        assert_eq!(navigator.route("b"), Some(vec!["home", "a", "b"]));
        assert_eq!(navigator.route("home"), Some(vec!["home"]));
        assert!(navigator.route("c").is_none());
        assert!(navigator.knows("a"));
        assert!(!navigator.knows("c"));
    }

    #[test]
    fn zero_retry_is_rejected() {
        let graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
        let result = Navigator::new(graph, NavigatorConfig::with_max_retry(0));
        assert!(matches!(result, Err(BuildError::ZeroRetry)));
    }
}
