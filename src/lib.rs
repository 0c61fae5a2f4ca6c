//! Navtrie: scene navigation over a tree of guarded transitions
//!
//! Screens of an application are modeled as scenes in a rooted tree. Each
//! edge carries an *action* that attempts the move and each scene carries a
//! *checker* that confirms arrival. Asking for a destination walks the
//! unique route from the root, retrying each action/checker pair a bounded
//! number of times and stopping at the first edge that never confirms.
//!
//! # Core Concepts
//!
//! - **Capability**: a named predicate used as an action or a checker
//! - **SceneGraph**: the append-only tree of scenes and edges
//! - **PathTable**: the route from the root to every scene, computed once
//! - **Navigator**: executes routes with per-edge retry
//! - **Loader**: builds graphs from JSON descriptions and registries
//! - **Explorer**: the single entry point applications call
//!
//! # Example
//!
//! ```rust
//! use navtrie::core::{Capability, Node, SceneGraph};
//! use navtrie::navigator::{Navigator, NavigatorConfig};
//!
//! let mut graph = SceneGraph::new(Node::new("home", Capability::constant("at_home", true)));
//! let root = graph.root();
//! let terminal = graph
//!     .attach(
//!         root,
//!         Node::new("terminal", Capability::constant("at_terminal", true)),
//!         Capability::constant("open_terminal", true),
//!     )
//!     .unwrap();
//! graph
//!     .attach(
//!         terminal,
//!         Node::new("stage", Capability::constant("at_stage", true)),
//!         Capability::constant("open_stage", true),
//!     )
//!     .unwrap();
//!
//! let navigator = Navigator::new(graph, NavigatorConfig::default()).unwrap();
//! assert_eq!(navigator.navigate_to("stage"), Ok(true));
//! assert_eq!(navigator.navigate_to("moon"), Ok(false));
//! ```

pub mod core;
pub mod explorer;
pub mod loader;
pub mod navigator;

// Re-export commonly used types
pub use crate::core::{CancelToken, Cancelled, Capability, Node, PathTable, SceneGraph};
pub use explorer::Explorer;
pub use loader::{load, LoadError, Registry};
pub use navigator::{NavigationReport, Navigator, NavigatorConfig, Outcome};
