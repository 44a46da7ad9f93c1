use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Target prefix of every event emitted by this library.
const LIBRARY_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Directives used when `RUST_LOG` is unset.
///
/// The binary target differs from the library's, so both get a directive.
pub fn default_directives(crate_name: &str, level: &str) -> String {
    format!("{crate_name}={level},{LIBRARY_TARGET}={level},tower_http={level},sea_orm=warn,sqlx=warn")
}

/// Installs the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_standard_tracing(crate_name: &str, level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(crate_name, level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn library_targets_pass_the_binary_filter() {
        let filter = EnvFilter::new(default_directives("ojt_monitoring_api", "info"));
        let subscriber = tracing_subscriber::registry().with(filter);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "ojt_monitoring_api", Level::INFO));
            assert!(tracing::enabled!(
                target: "ojt_monitoring::middleware::http_logger",
                Level::INFO
            ));
            assert!(tracing::enabled!(
                target: "ojt_monitoring::services::requirement_tracking",
                Level::WARN
            ));
            assert!(!tracing::enabled!(
                target: "ojt_monitoring::services::requirement_tracking",
                Level::DEBUG
            ));
            assert!(!tracing::enabled!(target: "sea_orm::driver", Level::INFO));
        });
    }
}
