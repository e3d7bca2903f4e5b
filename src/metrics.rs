//! Observability hooks for statement execution.
//!
//! - `metrics` feature: OpenTelemetry instruments exported through Prometheus.
//! - `tracing` feature: spans around statement execution and connection setup.

#[cfg(feature = "metrics")]
pub use self::prometheus_metrics::{InsightMetrics, METRICS};

#[cfg(feature = "metrics")]
mod prometheus_metrics {
    use once_cell::sync::Lazy;
    use opentelemetry::metrics::{Counter, Histogram, MeterProvider};
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use prometheus::{Encoder, Registry, TextEncoder};
    use std::time::Duration;

    pub static METRICS: Lazy<InsightMetrics> = Lazy::new(InsightMetrics::init);

    /// Instruments backed by a meter provider that exports into [`InsightMetrics::registry`]
    pub struct InsightMetrics {
        pub registry: Registry,
        provider: SdkMeterProvider,
        pub queries_total: Counter<u64>,
        pub query_errors_total: Counter<u64>,
        pub query_duration: Histogram<f64>,
        pub connection_wait_duration: Histogram<f64>,
    }

    impl InsightMetrics {
        pub fn init() -> Self {
            Self::with_registry(Registry::new())
        }

        /// Export into an existing registry, e.g. the one a host already serves on `/metrics`
        pub fn with_registry(registry: Registry) -> Self {
            let provider = match opentelemetry_prometheus::exporter()
                .with_registry(registry.clone())
                .build()
            {
                Ok(exporter) => SdkMeterProvider::builder().with_reader(exporter).build(),
                Err(e) => {
                    log::warn!("prometheus exporter unavailable, metrics are not exported: {e}");
                    SdkMeterProvider::builder().build()
                }
            };
            let meter = provider.meter("insight");

            let queries_total = meter
                .u64_counter("insight_queries_total")
                .with_description("Total statements executed")
                .build();

            let query_errors_total = meter
                .u64_counter("insight_query_errors_total")
                .with_description("Statements that failed in the driver")
                .build();

            let query_duration = meter
                .f64_histogram("insight_query_duration_seconds")
                .with_description("Duration of statements")
                .build();

            let connection_wait_duration = meter
                .f64_histogram("insight_connection_wait_seconds")
                .with_description("Time spent establishing connections")
                .build();

            Self {
                registry,
                provider,
                queries_total,
                query_errors_total,
                query_duration,
                connection_wait_duration,
            }
        }

        pub fn record_query_duration(&self, elapsed: Duration) {
            self.queries_total.add(1, &[]);
            self.query_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_query_error(&self) {
            self.query_errors_total.add(1, &[]);
        }

        pub fn record_connection_wait(&self, elapsed: Duration) {
            self.connection_wait_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn provider(&self) -> &SdkMeterProvider {
            &self.provider
        }

        /// Current values in the Prometheus text exposition format
        ///
        /// # Errors
        ///
        /// Returns the encoder error if a metric family cannot be rendered.
        pub fn encode_text(&self) -> Result<String, prometheus::Error> {
            let mut buffer = Vec::new();
            TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
            Ok(String::from_utf8_lossy(&buffer).into_owned())
        }
    }

}

#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::Span;

    /// Span wrapping one statement; the SQL text is truncated to keep spans small.
    pub fn execute_query_span(query: &str) -> Span {
        let statement: String = query.chars().take(120).collect();
        tracing::info_span!("insight.execute_query", db.system = "postgresql", db.statement = %statement)
    }

    pub fn acquire_connection_span() -> Span {
        tracing::info_span!("insight.acquire_connection", db.system = "postgresql")
    }

    /// Span wrapping one entity operation (`count`, `update`, ...)
    pub fn entity_operation_span(operation: &'static str, table: &'static str) -> Span {
        tracing::debug_span!("insight.entity", operation, table)
    }

}
