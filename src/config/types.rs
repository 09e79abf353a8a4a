//! Runtime settings for both binaries.

use crate::digits::DEFAULT_LENGTH;

/// Host queried for `DB_URL` when the environment does not provide one.
pub const DEFAULT_REMOTE_ENV_HOST: &str = "p01--eightdigit--vnwzhrpwlmrg.code.run";

pub const DEFAULT_MAX_RECORDS: i64 = 10;
pub const DEFAULT_HISTORY_LIMIT: i64 = 5;
pub const DEFAULT_COUNTDOWN_SECONDS: u64 = 5;

/// Settings read from the environment before the connection string is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvSettings {
    /// `None` means the remote config server must be asked.
    pub db_url: Option<String>,
    pub remote_host: String,
    pub max_records: i64,
    pub digit_length: i64,
    pub history_limit: i64,
    pub countdown_seconds: u64,
}

impl Default for EnvSettings {
    fn default() -> Self {
        EnvSettings {
            db_url: None,
            remote_host: DEFAULT_REMOTE_ENV_HOST.into(),
            max_records: DEFAULT_MAX_RECORDS,
            digit_length: DEFAULT_LENGTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
        }
    }
}

/// Fully resolved configuration handed to the binaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub db_url: String,
    /// Retention cap applied by `prune_excess`.
    pub max_records: i64,
    pub digit_length: i64,
    /// Rows shown by the generator's history view.
    pub history_limit: i64,
    pub countdown_seconds: u64,
}

impl AppConfig {
    pub fn from_settings(settings: EnvSettings, db_url: String) -> Self {
        AppConfig {
            db_url,
            max_records: settings.max_records,
            digit_length: settings.digit_length,
            history_limit: settings.history_limit,
            countdown_seconds: settings.countdown_seconds,
        }
    }
}
