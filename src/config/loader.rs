//! Load settings from the process environment and resolve the connection string.
//! Callers load `.env` (dotenvy) before calling [`load_config`].

use crate::config::remote::fetch_remote_db_url;
use crate::config::types::{AppConfig, EnvSettings};
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;

/// Read the environment, fall back to the remote config server for `DB_URL`, validate.
pub async fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = settings_from_lookup(|key| std::env::var(key).ok())?;
    let db_url = match settings.db_url.clone() {
        Some(url) => url,
        None => {
            tracing::info!(host = %settings.remote_host, "DB_URL not set; asking remote config server");
            fetch_remote_db_url(&settings.remote_host).await?
        }
    };
    let config = AppConfig::from_settings(settings, db_url);
    validate(&config)?;
    Ok(config)
}

/// Parse settings through `lookup` (the environment in production, a map in tests).
/// Blank values count as unset.
pub fn settings_from_lookup<F>(lookup: F) -> Result<EnvSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let defaults = EnvSettings::default();

    Ok(EnvSettings {
        db_url: get("DB_URL"),
        remote_host: get("REMOTE_ENV_HOST").unwrap_or(defaults.remote_host),
        max_records: parse_or(get("MAX_RECORDS"), "MAX_RECORDS", defaults.max_records)?,
        digit_length: parse_or(get("DIGIT_LENGTH"), "DIGIT_LENGTH", defaults.digit_length)?,
        history_limit: parse_or(get("HISTORY_LIMIT"), "HISTORY_LIMIT", defaults.history_limit)?,
        countdown_seconds: parse_or(
            get("COUNTDOWN_SECONDS"),
            "COUNTDOWN_SECONDS",
            defaults.countdown_seconds,
        )?,
    })
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{} must be a number, got '{}'", key, s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_REMOTE_ENV_HOST;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let settings = settings_from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, EnvSettings::default());
        assert_eq!(settings.remote_host, DEFAULT_REMOTE_ENV_HOST);
        assert_eq!(settings.max_records, 10);
        assert_eq!(settings.digit_length, 8);
    }

    #[test]
    fn reads_overrides() {
        let settings = settings_from_lookup(lookup_from(&[
            ("DB_URL", " sqlite://numbers.db "),
            ("REMOTE_ENV_HOST", "cfg.internal"),
            ("MAX_RECORDS", "25"),
            ("DIGIT_LENGTH", "6"),
            ("HISTORY_LIMIT", "3"),
            ("COUNTDOWN_SECONDS", "0"),
        ]))
        .unwrap();
        assert_eq!(settings.db_url.as_deref(), Some("sqlite://numbers.db"));
        assert_eq!(settings.remote_host, "cfg.internal");
        assert_eq!(settings.max_records, 25);
        assert_eq!(settings.digit_length, 6);
        assert_eq!(settings.history_limit, 3);
        assert_eq!(settings.countdown_seconds, 0);
    }

    #[test]
    fn blank_db_url_means_remote() {
        let settings = settings_from_lookup(lookup_from(&[("DB_URL", "   ")])).unwrap();
        assert_eq!(settings.db_url, None);
    }

    #[test]
    fn unparseable_number_is_invalid() {
        let err = settings_from_lookup(lookup_from(&[("MAX_RECORDS", "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("MAX_RECORDS")));
    }
}
