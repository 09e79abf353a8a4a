//! Config validation: every numeric knob must be usable before anything touches the database.

use crate::config::AppConfig;
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.db_url.trim().is_empty() {
        return Err(ConfigError::Missing("DB_URL".into()));
    }
    if config.max_records <= 0 {
        return Err(ConfigError::Invalid(format!(
            "MAX_RECORDS must be positive, got {}",
            config.max_records
        )));
    }
    if config.digit_length <= 0 {
        return Err(ConfigError::Invalid(format!(
            "DIGIT_LENGTH must be positive, got {}",
            config.digit_length
        )));
    }
    if config.history_limit <= 0 {
        return Err(ConfigError::Invalid(format!(
            "HISTORY_LIMIT must be positive, got {}",
            config.history_limit
        )));
    }
    Ok(())
}
