use opentelemetry::{trace::TraceError, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{trace::Config, Resource};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::{SpanBackendWithUrl, TracingMiddleware};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

pub fn setup_telemetry(service_name: &str) -> Result<(), TraceError> {
    if let Ok(otlp_endpoint) = std::env::var("OTLP_ENDPOINT") {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(otlp_endpoint),
            )
            .with_trace_config(Config::default().with_resource(Resource::new(vec![
                KeyValue::new("service.name", service_name.to_string()),
                KeyValue::new(
                    "deployment.environment",
                    std::env::var("ENV").unwrap_or("development".into()),
                ),
            ])))
            .install_batch(opentelemetry_sdk::runtime::Tokio)?;

        Registry::default()
            .with(EnvFilter::from_default_env())
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .with(tracing_subscriber::fmt::layer())
            .init();

        info!("Setup tracing with OTLP");
    } else {
        Registry::default()
            .with(EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer())
            .init();

        info!("Setup tracing without OTLP");
    }

    info!("Successfully setup telemetry");

    Ok(())
}

pub fn teardown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// Builds an HTTP client that opens a tracing span (including the URL) per request.
pub fn generate_http_client() -> Result<ClientWithMiddleware, reqwest::Error> {
    let reqwest_client = reqwest::Client::builder().build()?;

    Ok(ClientBuilder::new(reqwest_client)
        .with(TracingMiddleware::<SpanBackendWithUrl>::new())
        .build())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_generate_http_client() {
        assert!(super::generate_http_client().is_ok());
    }
}
