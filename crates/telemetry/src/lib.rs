//! Tracing subscriber bootstrap driven by [`TelemetrySettings`].

use anyhow::anyhow;
use shelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the level filter: `RUST_LOG` wins, then the configured level.
pub fn filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(filter(settings));

    let installed = match settings.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::debug!(
        target: "shelf-telemetry",
        format = ?settings.log_format,
        level = %settings.level,
        "telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_error() {
        let settings = TelemetrySettings::default();
        // Another test in this binary may have won the race; either way the
        // second call must not panic and must report failure.
        let _ = init(&settings);
        assert!(init(&settings).is_err());
    }
}
