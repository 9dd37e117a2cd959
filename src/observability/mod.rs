//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → OtlpFileExporter → JSON lines
//!         └→ fmt layer (optional) ──────────────────────────────────────→ log file
//! ```
//!
//! - **File export**: spans go to `<data_dir>/dexview/dexview-otlp.json`
//! - **Rotation**: files rotate at 10 MB, 3 backups are kept
//! - **Level**: `RUST_LOG`, then the `trace_level` setting, then `info`
//!
//! The frame is drawn on stdout, so nothing is ever logged to the terminal.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON span serialization
//! - `file_writer`: Size-rotated file shared by both outputs

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{RotatingFile, RotationPolicy};
pub use init::{init_tracing, TRACE_FILE_NAME};
