//! Logging initialisation

use std::sync::Once;

use mesbridge_domain::LogFormat;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Run `f` under a temporary plain-text subscriber.
///
/// Used while loading configuration, before the configured format is known.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let subscriber = fmt::Subscriber::builder().with_env_filter(env_filter()).finish();
    tracing::subscriber::with_default(subscriber, f)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls levels (default `info`). Later calls are no-ops.
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter = env_filter();

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry().with(env_filter).with(fmt::layer().json()).init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry().with(env_filter).with(fmt::layer().pretty()).init();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use tracing::subscriber::NoSubscriber;

    use super::*;

    /// Validates that events emitted during bootstrap reach a subscriber.
    ///
    /// Assertions:
    /// - Confirms a real dispatcher is active inside the closure
    /// - Confirms the closure's value is returned
    #[test]
    fn bootstrap_logging_installs_a_scoped_subscriber() {
        let (active, value) = with_bootstrap_logging(|| {
            let active = tracing::dispatcher::get_default(|dispatch| !dispatch.is::<NoSubscriber>());
            (active, 42)
        });

        assert!(active);
        assert_eq!(value, 42);
    }
}
