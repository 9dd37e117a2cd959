//! Subscriber setup.

use super::file_writer::RotatingFile;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "dexview-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// Layers:
/// - `EnvFilter` from `RUST_LOG`, else `config.trace_level`, else `info`
/// - OpenTelemetry layer exporting OTLP JSON to `<data_dir>/dexview-otlp.json`
/// - plain-text `fmt` layer to `config.log_file`, when set
///
/// Observability is optional: if the data directory cannot be created, or a
/// subscriber is already installed, this returns without doing anything.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL))
    });

    let data_dir = crate::infrastructure::paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "dexview"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("dexview.base_url", config.base_url.clone()),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("dexview"));

    let log_layer = config.log_file.as_ref().map(|path| {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(RotatingFile::new(path.clone()))
            .boxed()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(log_layer)
        .try_init();
}
