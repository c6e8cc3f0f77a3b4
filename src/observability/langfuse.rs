use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_langfuse::ExporterBuilder;
use opentelemetry_sdk::trace::span_processor_with_async_runtime::BatchSpanProcessor;
use opentelemetry_sdk::{resource::Resource, runtime, trace::SdkTracerProvider};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing::{Metadata, Subscriber};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::Filter;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, Registry};

use super::logging::console_filter;
use crate::BurritoError;

/// Credentials and host for the Langfuse OTLP endpoint. Unset values fall back to
/// the exporter's own environment handling.
#[derive(Debug, Clone, Default)]
pub struct LangfuseOptions<'a> {
    pub public_key: Option<&'a str>,
    pub secret_key: Option<&'a str>,
    pub host: Option<&'a str>,
}

#[derive(Debug, Clone)]
struct BurritoSpanFilter;

impl<S> Filter<S> for BurritoSpanFilter
where
    S: Subscriber,
{
    fn enabled(
        &self,
        meta: &Metadata<'_>,
        _cx: &tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        is_exported_target(meta.target())
    }
}

/// Only this crate's spans are exported, everything else stays on the console.
fn is_exported_target(target: &str) -> bool {
    target == "burrito" || target.starts_with("burrito::")
}

/// Installs a console layer plus an OpenTelemetry layer that ships request spans to
/// Langfuse. Keep the returned provider alive and call `shutdown` on it before exit.
pub fn init(config: LangfuseOptions) -> Result<SdkTracerProvider, BurritoError> {
    let mut builder = ExporterBuilder::default();
    if let (Some(pk), Some(sk)) = (config.public_key, config.secret_key) {
        builder = builder.with_basic_auth(pk, sk);
    }
    if let Some(host) = config.host {
        builder = builder.with_host(host);
    }
    let exporter = builder
        .build()
        .map_err(|e| BurritoError::Config(format!("Failed to build Langfuse exporter: {e}")))?;

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new(SERVICE_NAME, "burrito-rs"),
            KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        ])
        .build();

    let processor = BatchSpanProcessor::builder(exporter, runtime::Tokio).build();

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_span_processor(processor)
        .build();

    let tracer = provider.tracer("burrito-rs");
    global::set_tracer_provider(provider.clone());

    let fmt_layer = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_thread_ids(true)
        .with_filter(console_filter());

    let otel_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(BurritoSpanFilter);

    Registry::default()
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| BurritoError::Config(format!("Tracing already initialized: {e}")))?;

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_only_crate_targets() {
        assert!(is_exported_target("burrito"));
        assert!(is_exported_target("burrito::services::burrito::client"));
        assert!(!is_exported_target("burrito_extra"));
        assert!(!is_exported_target("reqwest::connect"));
        assert!(!is_exported_target("hyper_util"));
    }
}
