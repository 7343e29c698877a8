//! Observability infrastructure - Logging and Metrics

mod config;
mod metrics;

pub use config::{MetricsConfig, ObservabilityConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_advice_lookup, record_completion_request,
    record_http_request, PrometheusMetrics,
};
