//! Configuration for observability/telemetry

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVICE_NAME: &str = "cyberagent";

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name for traces
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service version (optional)
    #[serde(default)]
    pub service_version: Option<String>,

    /// OTLP endpoint for trace export (e.g., "http://localhost:4317")
    #[serde(default)]
    pub otlp_endpoint: Option<String>,

    /// Enable console log output on stderr
    #[serde(default = "default_console")]
    pub enable_console: bool,

    /// Log level filter (e.g., "info", "cyber_policy=debug,warn").
    /// Falls back to `RUST_LOG`, then "warn".
    #[serde(default)]
    pub log_level: Option<String>,

    /// Additional resource attributes (key-value pairs)
    #[serde(default)]
    pub resource_attributes: Vec<(String, String)>,
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_console() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
            resource_attributes: Vec::new(),
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Set OTLP endpoint
    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Add resource attribute
    pub fn with_resource_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.resource_attributes.push((key.into(), value.into()));
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `OTEL_SERVICE_NAME` → service_name
    /// - `OTEL_SERVICE_VERSION` → service_version
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint
    /// - `CYBERAGENT_LOG` or `RUST_LOG` → log_level
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            service_name: non_empty("OTEL_SERVICE_NAME").unwrap_or_else(default_service_name),
            service_version: non_empty("OTEL_SERVICE_VERSION"),
            // Only export when explicitly configured; otherwise console-only.
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
            enable_console: true,
            log_level: non_empty("CYBERAGENT_LOG").or_else(|| non_empty("RUST_LOG")),
            resource_attributes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.service_name, "cyberagent");
        assert!(config.enable_console);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_from_lookup_prefers_cyberagent_log() {
        let config = ObservabilityConfig::from_lookup(lookup(&[
            ("CYBERAGENT_LOG", "cyber_policy=debug"),
            ("RUST_LOG", "info"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ]));
        assert_eq!(config.log_level.as_deref(), Some("cyber_policy=debug"));
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("http://localhost:4317")
        );
    }

    #[test]
    fn test_from_lookup_ignores_blank_values() {
        let config = ObservabilityConfig::from_lookup(lookup(&[
            ("OTEL_SERVICE_NAME", "  "),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", ""),
            ("RUST_LOG", "warn"),
        ]));
        assert_eq!(config.service_name, "cyberagent");
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ObservabilityConfig =
            serde_json::from_str(r#"{"log_level":"debug"}"#).unwrap();
        assert_eq!(config.service_name, "cyberagent");
        assert!(config.enable_console);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_builders() {
        let config = ObservabilityConfig::new("policy-bench")
            .with_version("0.1.0")
            .with_console(false)
            .with_resource_attribute("deployment.environment", "lab");
        assert_eq!(config.service_name, "policy-bench");
        assert_eq!(config.service_version.as_deref(), Some("0.1.0"));
        assert!(!config.enable_console);
        assert_eq!(config.resource_attributes.len(), 1);
    }
}
