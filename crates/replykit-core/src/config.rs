// Rust guideline compliant 2026-10-16

//! Runtime configuration for response construction.
//!
//! A [`RuntimeConfig`] is loaded once at setup time and shared by every
//! adapter through a [`ConfigHandle`]. Each response reads a single
//! [`Arc`] snapshot, so a later [`ConfigHandle::replace`] never changes a
//! response that is already being built.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "REPLYKIT_";

/// Runtime mode controlling verbosity and redaction strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeMode {
    /// Verbose mode: environment tags and stacks may be exposed.
    #[default]
    Development,
    /// Strict mode used for deployed services.
    Production,
}

impl RuntimeMode {
    /// Returns the stable tag for the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Parses a mode tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is not `development` or `production`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(Error::Config(format!(
                "mode must be development or production, got {other}"
            ))),
        }
    }

    /// Returns true for the development mode.
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Error fields that can be permitted by the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorField {
    /// Human-readable error message.
    Message,
    /// Error type tag.
    Type,
    /// Error code.
    Code,
    /// Structured error details.
    Details,
}

impl ErrorField {
    /// All fields, in emission order.
    pub const ALL: [ErrorField; 4] = [Self::Message, Self::Type, Self::Code, Self::Details];

    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Type => "type",
            Self::Code => "code",
            Self::Details => "details",
        }
    }

    /// Parses a field name.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown field names.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "message" => Ok(Self::Message),
            "type" => Ok(Self::Type),
            "code" => Ok(Self::Code),
            "details" => Ok(Self::Details),
            other => Err(Error::Config(format!("unknown error field: {other}"))),
        }
    }
}

/// Error-handling policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPolicy {
    /// Whether the allow-list filters emitted error fields.
    pub sanitize: bool,
    /// Whether internal errors are redacted before reaching clients.
    pub hide_internal_errors: bool,
    /// Error fields permitted in client-facing errors.
    pub allowed_fields: Vec<ErrorField>,
    /// Whether stacks are emitted (development mode only).
    pub include_stack: bool,
    /// Whether error responses are logged with their raw detail.
    pub log_errors: bool,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            sanitize: true,
            hide_internal_errors: false,
            allowed_fields: vec![ErrorField::Message, ErrorField::Type, ErrorField::Code],
            include_stack: false,
            log_errors: true,
        }
    }
}

impl ErrorPolicy {
    /// Returns true when `field` may appear in a client-facing error.
    #[must_use]
    pub fn allows(&self, field: ErrorField) -> bool {
        !self.sanitize || self.allowed_fields.contains(&field)
    }
}

/// Response policy: metadata toggles and headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsePolicy {
    /// Include the correlation token as `meta.requestId`.
    pub include_request_id: bool,
    /// Include `meta.timestamp` (and `error.timestamp`).
    pub include_timestamp: bool,
    /// Include `meta.executionTime` in milliseconds.
    pub include_execution_time: bool,
    /// Extra metadata merged last into `meta`.
    pub custom_fields: Map<String, Value>,
    /// Send the security header set on HTTP replies.
    pub security_headers: bool,
    /// Echo the correlation token as an HTTP header.
    pub correlation_header: bool,
    /// Name of the correlation header.
    pub correlation_header_name: String,
    /// Event name used by socket emissions.
    pub default_event: String,
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        Self {
            include_request_id: true,
            include_timestamp: true,
            include_execution_time: false,
            custom_fields: Map::new(),
            security_headers: true,
            correlation_header: true,
            correlation_header_name: "X-Request-Id".to_string(),
            default_event: "response".to_string(),
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational output.
    #[default]
    Info,
    /// Everything.
    Debug,
}

impl LogLevel {
    /// Returns the level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Parses a level name.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown level names.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            other => Err(Error::Config(format!("invalid log level: {other}"))),
        }
    }

    /// Returns true if a message at `level` passes this threshold.
    #[must_use]
    pub fn permits(self, level: LogLevel) -> bool {
        level <= self
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Structured JSON lines.
    #[default]
    Json,
    /// Human-readable lines.
    Pretty,
}

/// Logging policy consumed by the logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPolicy {
    /// Master switch.
    pub enabled: bool,
    /// Minimum level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file path.
    pub file: Option<PathBuf>,
    /// Log incoming requests.
    pub log_requests: bool,
    /// Log outgoing responses and events.
    pub log_responses: bool,
}

impl Default for LoggingPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Info,
            format: LogFormat::Json,
            file: None,
            log_requests: true,
            log_responses: true,
        }
    }
}

/// Partial logging update applied with `Logger::update_config`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingPatch {
    /// New master switch.
    pub enabled: Option<bool>,
    /// New minimum level.
    pub level: Option<LogLevel>,
    /// New request logging flag.
    pub log_requests: Option<bool>,
    /// New response logging flag.
    pub log_responses: Option<bool>,
}

impl LoggingPatch {
    /// Applies the patch in place.
    pub fn apply(&self, policy: &mut LoggingPolicy) {
        if let Some(enabled) = self.enabled {
            policy.enabled = enabled;
        }
        if let Some(level) = self.level {
            policy.level = level;
        }
        if let Some(log_requests) = self.log_requests {
            policy.log_requests = log_requests;
        }
        if let Some(log_responses) = self.log_responses {
            policy.log_responses = log_responses;
        }
    }
}

impl From<&LoggingPolicy> for LoggingPatch {
    fn from(policy: &LoggingPolicy) -> Self {
        Self {
            enabled: Some(policy.enabled),
            level: Some(policy.level),
            log_requests: Some(policy.log_requests),
            log_responses: Some(policy.log_responses),
        }
    }
}

/// Transport-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Runtime mode.
    pub mode: RuntimeMode,
    /// Version tag reported in development metadata.
    pub version: String,
    /// Error-handling policy.
    pub errors: ErrorPolicy,
    /// Response policy.
    pub response: ResponsePolicy,
    /// Logging policy.
    pub logging: LoggingPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            mode: RuntimeMode::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            errors: ErrorPolicy::default(),
            response: ResponsePolicy::default(),
            logging: LoggingPolicy::default(),
        }
    }
}

impl RuntimeConfig {
    /// Returns defaults tuned for `mode`.
    ///
    /// Production hides internal errors and never emits stacks.
    #[must_use]
    pub fn for_mode(mode: RuntimeMode) -> Self {
        let mut config = Self {
            mode,
            ..Self::default()
        };
        if mode == RuntimeMode::Production {
            config.errors.hide_internal_errors = true;
            config.errors.include_stack = false;
        }
        config
    }

    /// Loads configuration from a TOML file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. The TOML file at `path`, if it exists
    /// 3. Environment variables with the `REPLYKIT_` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML
    /// - An environment override is malformed
    /// - The resulting values fail validation
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from defaults and environment variables only.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is malformed or validation fails.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text without validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {e}")))
    }

    /// Applies overrides read through `lookup`.
    ///
    /// Supported keys:
    /// - `REPLYKIT_MODE` - development or production
    /// - `REPLYKIT_SANITIZE_ERRORS` - true/false
    /// - `REPLYKIT_HIDE_INTERNAL_ERRORS` - true/false
    /// - `REPLYKIT_INCLUDE_STACK` - true/false
    /// - `REPLYKIT_ALLOWED_FIELDS` - comma-separated field names
    /// - `REPLYKIT_LOG_LEVEL` - error/warn/info/debug
    /// - `REPLYKIT_LOG_FORMAT` - json/pretty
    /// - `REPLYKIT_LOG_FILE` - path
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(val) = var("MODE") {
            self.mode = RuntimeMode::parse(&val)?;
        }
        if let Some(val) = var("SANITIZE_ERRORS") {
            self.errors.sanitize = parse_bool("SANITIZE_ERRORS", &val)?;
        }
        if let Some(val) = var("HIDE_INTERNAL_ERRORS") {
            self.errors.hide_internal_errors = parse_bool("HIDE_INTERNAL_ERRORS", &val)?;
        }
        if let Some(val) = var("INCLUDE_STACK") {
            self.errors.include_stack = parse_bool("INCLUDE_STACK", &val)?;
        }
        if let Some(val) = var("ALLOWED_FIELDS") {
            self.errors.allowed_fields = val
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(ErrorField::parse)
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(val) = var("LOG_LEVEL") {
            self.logging.level = LogLevel::parse(&val)?;
        }
        if let Some(val) = var("LOG_FORMAT") {
            self.logging.format = match val.trim().to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(Error::Config(
                        "REPLYKIT_LOG_FORMAT must be json or pretty".to_string(),
                    ))
                }
            };
        }
        if let Some(val) = var("LOG_FILE") {
            self.logging.file = Some(PathBuf::from(val));
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The correlation header name is empty or not a valid header token
    /// - The default socket event is empty
    /// - A custom metadata field has an empty key
    pub fn validate(&self) -> Result<()> {
        let header = &self.response.correlation_header_name;
        if header.is_empty() || !header.bytes().all(is_header_token) {
            return Err(Error::Config(format!(
                "correlation_header_name must be a valid header name, got {header:?}"
            )));
        }

        if self.response.default_event.trim().is_empty() {
            return Err(Error::Config(
                "default_event must not be empty".to_string(),
            ));
        }

        if self.response.custom_fields.keys().any(|key| key.is_empty()) {
            return Err(Error::Config(
                "custom_fields keys must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Saves the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Renders the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom field cannot be expressed in TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{ENV_PREFIX}{name} must be true or false")))
}

fn is_header_token(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&byte)
}

/// Shared, swappable configuration snapshot.
///
/// Replacement is last-writer-wins. Readers hold the [`Arc`] they
/// captured for as long as they need it.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<RuntimeConfig>>>,
}

impl ConfigHandle {
    /// Wraps an initial configuration.
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RuntimeConfig> {
        let guard = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replaces the snapshot after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the new configuration fails validation.
    pub fn replace(&self, config: RuntimeConfig) -> Result<Arc<RuntimeConfig>> {
        config.validate()?;
        let config = Arc::new(config);
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::clone(&config);
        Ok(config)
    }

    /// Applies `change` to a copy of the current snapshot and swaps it in.
    ///
    /// # Errors
    ///
    /// Returns an error if the changed configuration fails validation.
    pub fn update<F>(&self, change: F) -> Result<Arc<RuntimeConfig>>
    where
        F: FnOnce(&mut RuntimeConfig),
    {
        let mut next = (*self.snapshot()).clone();
        change(&mut next);
        self.replace(next)
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
