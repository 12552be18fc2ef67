// Rust guideline compliant 2026-10-16

//! Response metadata generation.
//!
//! Each built-in field is gated independently by the response policy.
//! Custom fields are merged last and win on key collision, so a custom
//! `timestamp` shadows the generated one.

use crate::config::RuntimeConfig;
use crate::context::RequestContext;
use crate::models::ResponseMeta;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::time::Instant;

/// Formats a timestamp as ISO-8601 with millisecond precision.
#[must_use]
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generates metadata using the current clock.
#[must_use]
pub fn generate(config: &RuntimeConfig, ctx: &RequestContext) -> ResponseMeta {
    generate_at(config, ctx, Utc::now(), Instant::now())
}

/// Generates metadata against explicit wall-clock and monotonic readings.
#[must_use]
pub fn generate_at(
    config: &RuntimeConfig,
    ctx: &RequestContext,
    wall: DateTime<Utc>,
    now: Instant,
) -> ResponseMeta {
    let policy = &config.response;
    let mut meta = ResponseMeta::new();

    if policy.include_request_id {
        if let Some(id) = ctx.correlation_id() {
            meta.insert(ResponseMeta::REQUEST_ID, Value::String(id.to_string()));
        }
    }

    if policy.include_timestamp {
        meta.insert(ResponseMeta::TIMESTAMP, Value::String(iso_timestamp(wall)));
    }

    if policy.include_execution_time {
        if let Some(elapsed) = ctx.elapsed_ms(now) {
            meta.insert(ResponseMeta::EXECUTION_TIME, Value::from(elapsed));
        }
    }

    if config.mode.is_development() {
        meta.insert(
            ResponseMeta::ENVIRONMENT,
            Value::String(config.mode.as_str().to_string()),
        );
        meta.insert(ResponseMeta::VERSION, Value::String(config.version.clone()));
    }

    for (key, value) in &policy.custom_fields {
        meta.insert(key.clone(), value.clone());
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeMode;
    use chrono::TimeZone;
    use std::time::Duration;

    fn quiet_production() -> RuntimeConfig {
        let mut config = RuntimeConfig::for_mode(RuntimeMode::Production);
        config.response.include_request_id = false;
        config.response.include_timestamp = false;
        config.response.include_execution_time = false;
        config
    }

    #[test]
    fn test_everything_disabled_is_empty() {
        let meta = generate(&quiet_production(), &RequestContext::generated());
        assert!(meta.is_empty());
    }

    #[test]
    fn test_request_id_needs_token() {
        let mut config = quiet_production();
        config.response.include_request_id = true;

        let meta = generate(&config, &RequestContext::new());
        assert!(meta.request_id().is_none());

        let ctx = RequestContext::new().with_correlation_id("req-7");
        let meta = generate(&config, &ctx);
        assert_eq!(meta.request_id(), Some("req-7"));
    }

    #[test]
    fn test_timestamp_is_iso() {
        let mut config = quiet_production();
        config.response.include_timestamp = true;
        let wall = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();

        let meta = generate_at(&config, &RequestContext::new(), wall, Instant::now());
        assert_eq!(meta.timestamp(), Some("2026-03-01T12:30:00.000Z"));
    }

    #[test]
    fn test_execution_time_needs_start() {
        let mut config = quiet_production();
        config.response.include_execution_time = true;
        let start = Instant::now();
        let now = start + Duration::from_millis(250);

        let meta = generate_at(&config, &RequestContext::new(), Utc::now(), now);
        assert!(meta.execution_time().is_none());

        let ctx = RequestContext::new().started_at(start);
        let meta = generate_at(&config, &ctx, Utc::now(), now);
        assert_eq!(meta.execution_time(), Some(250));
    }

    #[test]
    fn test_environment_only_in_development() {
        let mut config = quiet_production();
        let meta = generate(&config, &RequestContext::new());
        assert!(meta.get(ResponseMeta::ENVIRONMENT).is_none());

        config.mode = RuntimeMode::Development;
        config.version = "9.9.9".to_string();
        let meta = generate(&config, &RequestContext::new());
        assert_eq!(
            meta.get(ResponseMeta::ENVIRONMENT),
            Some(&Value::String("development".to_string()))
        );
        assert_eq!(
            meta.get(ResponseMeta::VERSION),
            Some(&Value::String("9.9.9".to_string()))
        );
    }

    #[test]
    fn test_custom_fields_override_builtin_keys() {
        // Custom fields are merged last; a colliding key replaces the built-in value.
        let mut config = quiet_production();
        config.response.include_timestamp = true;
        config
            .response
            .custom_fields
            .insert("timestamp".to_string(), Value::String("frozen".to_string()));
        config
            .response
            .custom_fields
            .insert("region".to_string(), Value::String("eu".to_string()));

        let meta = generate(&config, &RequestContext::new());
        assert_eq!(meta.timestamp(), Some("frozen"));
        assert_eq!(meta.get("region"), Some(&Value::String("eu".to_string())));
    }
}
