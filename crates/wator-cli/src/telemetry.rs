//! Tracing initialization for the CLI.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wator_world=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
