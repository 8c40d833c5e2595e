//! Tracing subscriber setup.

use tracing_subscriber::{
    filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::{EnvConfig, DEFAULT_LOG_FILTER};

/// Installs the global subscriber described by `config`.
///
/// An unparsable `log_filter` falls back to [`DEFAULT_LOG_FILTER`] and is
/// reported through the installed subscriber. Returns `false` when a global
/// subscriber is already set; the existing one stays in place.
pub fn init(config: &EnvConfig) -> bool {
    let (filter, rejected) = resolve_filter(&config.log_filter);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Some(error) = rejected {
        tracing::warn!(
            filter = %config.log_filter,
            fallback = DEFAULT_LOG_FILTER,
            %error,
            "ignoring invalid log filter"
        );
    }

    installed.is_ok()
}

fn resolve_filter(directives: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => (filter, None),
        Err(error) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(error)),
    }
}
