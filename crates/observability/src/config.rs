//! Logging configuration.
//!
//! - `RUST_LOG` (or `PBANK_LOG`): `EnvFilter` directives, default `info`.
//! - `PBANK_LOG_FORMAT`: `json` (default) or `pretty`.

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Parse a format name; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "text" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives, e.g. `info,pbank_accounts=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a closure).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let filter = lookup("RUST_LOG")
            .or_else(|| lookup("PBANK_LOG"))
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.filter);

        let format = lookup("PBANK_LOG_FORMAT")
            .and_then(|value| LogFormat::parse(&value))
            .unwrap_or(defaults.format);

        Self { filter, format }
    }
}
