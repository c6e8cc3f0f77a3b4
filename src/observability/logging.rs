use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::BurritoError;

/// Console filter used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_DIRECTIVES: &str = "burrito=debug,warn";

pub(crate) fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs a console subscriber. `RUST_LOG` overrides the default
/// `burrito=debug,warn` filter. Fails if a global subscriber is already set.
pub fn init_default_tracing() -> Result<(), BurritoError> {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE);

    Registry::default()
        .with(console_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| BurritoError::Config(format!("Tracing already initialized: {e}")))
}
