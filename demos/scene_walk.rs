//! Scene Walk
//!
//! This example drives a small simulated app through its scene tree.
//!
//! Key concepts:
//! - Loading a scene graph from JSON with action/checker registries
//! - A shared "device" the capabilities observe and mutate
//! - Flaky transitions recovered by the per-edge retry budget
//! - Structured tracing of every attempt
//!
//! Run with: RUST_LOG=navtrie=debug cargo run --example scene_walk

use navtrie::core::Capability;
use navtrie::explorer::Explorer;
use navtrie::loader::{load_str, Registry};
use navtrie::navigator::NavigatorConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SCENES: &str = r#"{
    "root": {
        "name": "home",
        "checker": "at_home",
        "children": {
            "terminal": {
                "action": "tap_terminal",
                "target": {
                    "name": "terminal",
                    "checker": "at_terminal",
                    "children": {
                        "main_story": {
                            "action": "tap_main_story",
                            "target": {
                                "name": "main_story",
                                "checker": "at_main_story",
                                "meta": {"chapter": 1}
                            }
                        }
                    }
                }
            },
            "base": {
                "action": "tap_base",
                "target": {"name": "base", "checker": "at_base"}
            }
        }
    }
}"#;

/// Stand-in for an emulator: remembers which screen is showing.
#[derive(Clone, Default)]
struct Device {
    screen: Arc<Mutex<String>>,
}

impl Device {
    fn show(&self, screen: &str) {
        if let Ok(mut current) = self.screen.lock() {
            *current = screen.to_string();
        }
    }

    fn showing(&self, screen: &str) -> bool {
        self.screen
            .lock()
            .map(|current| current.as_str() == screen)
            .unwrap_or(false)
    }
}

fn tap(device: &Device, key: &str, screen: &'static str) -> Capability {
    let device = device.clone();
    Capability::from_predicate(key, move || {
        device.show(screen);
        true
    })
}

fn sees(device: &Device, screen: &'static str) -> Capability {
    let device = device.clone();
    Capability::from_predicate(format!("at_{screen}"), move || device.showing(screen))
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "navtrie=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let device = Device::default();
    device.show("home");

    // The story tab ignores the first tap.
    let taps = Arc::new(AtomicUsize::new(0));
    let story_device = device.clone();
    let flaky_story = Capability::from_predicate("tap_main_story", move || {
        if taps.fetch_add(1, Ordering::SeqCst) > 0 {
            story_device.show("main_story");
        }
        true
    });

    let actions = Registry::new()
        .with(tap(&device, "tap_terminal", "terminal"))
        .with(tap(&device, "tap_base", "base"))
        .with(flaky_story);
    let checkers: Registry = ["home", "terminal", "main_story", "base"]
        .into_iter()
        .map(|screen| sees(&device, screen))
        .collect();

    let graph = match load_str(SCENES, &actions, &checkers) {
        Ok(graph) => graph,
        Err(error) => {
            eprintln!("failed to load scenes: {error}");
            return;
        }
    };

    let explorer = match Explorer::new(device, graph, actions, checkers, NavigatorConfig::default())
    {
        Ok(explorer) => explorer,
        Err(error) => {
            eprintln!("invalid navigator config: {error}");
            return;
        }
    };

    println!("=== Scene Walk ===\n");

    for target in ["main_story", "base", "arena"] {
        let route = explorer
            .navigator()
            .route(target)
            .map(|scenes| scenes.join(" -> "))
            .unwrap_or_else(|| "(no route)".to_string());
        println!("Route to {target}: {route}");

        match explorer.navigate(target) {
            Ok(report) => println!(
                "  outcome: {:?}, attempts: {}\n",
                report.outcome,
                report.trace.total_attempts()
            ),
            Err(cancelled) => println!("  {cancelled}\n"),
        }

        explorer.context().show("home");
    }
}
