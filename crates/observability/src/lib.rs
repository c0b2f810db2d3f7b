//! cyberagent observability - tracing setup shared by the policy crates and CLI
//!
//! # Features
//!
//! - Console logging with an `EnvFilter`
//! - Optional OpenTelemetry export over OTLP
//! - Span macros for policy steps and model calls
//!
//! # Quick Start
//!
//! ```no_run
//! use cyber_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("cyberagent")
//!     .with_log_level("cyber_policy=debug,info");
//! init(config)?;
//!
//! tracing::info!("policy ready");
//! # Ok::<(), cyber_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` - Service name
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint (export disabled when unset)
//! - `CYBERAGENT_LOG` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod spans;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use spans::{record_duration, record_error};
