//! Tracing setup.
//!
//! `RUST_LOG` wins when set; otherwise verbosity flags pick the level
//! for the workspace crates while external crates stay at warn.

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!(
            "warn,geonorm_cli={level},geonorm_core={level},geonorm_gazetteer={level},\
             geonorm_map={level},geonorm_model={level},geonorm_transform={level}",
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();
}
