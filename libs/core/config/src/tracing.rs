use crate::Environment;
use tracing::debug;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install color-eyre for readable error reports.
///
/// Call early in main(), before any fallible operation. Safe to call more
/// than once (later calls are ignored).
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initialize the tracing subscriber.
///
/// Production (`APP_ENV=production`) logs JSON for aggregation; development
/// logs a human-readable format. `RUST_LOG` overrides the default filter
/// (`info` in production, `debug` in development). An `ErrorLayer` is
/// attached so span traces are captured when errors surface.
///
/// Safe to call more than once; re-initialization is skipped, which keeps
/// tests that each set up logging from panicking.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if environment.is_production() {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("debug")
        }
    });

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    if result.is_err() {
        debug!("tracing already initialized, skipping");
    }
}
