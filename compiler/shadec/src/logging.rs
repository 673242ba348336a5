//! Opt-in tracing output.
//!
//! Nothing is installed unless `SHADE_LOG` (or `RUST_LOG`) is set. With
//! `SHADE_LOG_TREE=1` spans are drawn as an indented tree instead of flat
//! lines. All output goes to stderr so `--print` and `--format=json` stay
//! clean.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = std::env::var("SHADE_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
        else {
            return;
        };
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));

        let tree = std::env::var("SHADE_LOG_TREE").is_ok_and(|value| value == "1");
        // A subscriber installed elsewhere (a test harness) wins.
        let _ = if tree {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .try_init()
        };
    });
}
