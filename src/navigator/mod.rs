//! Route execution: the navigation engine.
//!
//! This module is the effectful half of the crate. Given a target scene,
//! the [`Navigator`] looks up the cached route and crosses each edge in
//! turn, retrying the action/checker pair up to a fixed budget.
//!
//! # Failure semantics
//!
//! - Unknown destinations and exhausted edges are ordinary `false` results.
//! - Confirmed edges are never rolled back; a failed run stops in place.
//! - [`Cancelled`](crate::core::Cancelled) raised by a capability ends the
//!   run immediately and is returned as `Err`.

mod builder;
mod config;
mod engine;
mod error;
mod report;
mod trace;

pub use builder::NavigatorBuilder;
pub use config::{NavigatorConfig, DEFAULT_MAX_RETRY};
pub use engine::Navigator;
pub use error::BuildError;
pub use report::{NavigationReport, Outcome};
pub use trace::{EdgeRecord, NavigationTrace};
