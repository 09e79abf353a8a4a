//! Fallback source for `DB_URL`: a small HTTP endpoint serving `{"DB_URL": "..."}`.

use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct RemoteEnv {
    #[serde(rename = "DB_URL", default)]
    db_url: Option<String>,
}

/// GET `https://{host}/env` and pull `DB_URL` out of the JSON body.
pub async fn fetch_remote_db_url(host: &str) -> Result<String, ConfigError> {
    let url = format!("https://{}/env", host);
    let remote_err = |message: String| ConfigError::Remote {
        host: host.to_string(),
        message,
    };

    let client = reqwest::Client::builder()
        .timeout(REMOTE_TIMEOUT)
        .build()
        .map_err(|e| remote_err(e.to_string()))?;
    tracing::debug!(url = %url, "fetching DB_URL from remote config server");
    let body = client
        .get(&url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| remote_err(format!("failed to fetch DB_URL: {}", e)))?
        .text()
        .await
        .map_err(|e| remote_err(format!("failed to read response: {}", e)))?;

    parse_remote_payload(host, &body)
}

/// Extract a non-empty `DB_URL` from the remote response body.
pub fn parse_remote_payload(host: &str, body: &str) -> Result<String, ConfigError> {
    let payload: RemoteEnv = serde_json::from_str(body).map_err(|e| ConfigError::Remote {
        host: host.to_string(),
        message: format!("invalid JSON: {}", e),
    })?;
    payload
        .db_url
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::Remote {
            host: host.to_string(),
            message: "did not return DB_URL".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_db_url() {
        let url = parse_remote_payload("h", r#"{"DB_URL": "mysql://u:p@db/app", "OTHER": 1}"#).unwrap();
        assert_eq!(url, "mysql://u:p@db/app");
    }

    #[test]
    fn missing_or_blank_db_url_is_an_error() {
        for body in [r#"{}"#, r#"{"DB_URL": ""}"#, r#"{"DB_URL": null}"#] {
            let err = parse_remote_payload("cfg.example", body).unwrap_err();
            assert!(matches!(err, ConfigError::Remote { ref host, .. } if host == "cfg.example"));
        }
    }

    #[test]
    fn garbage_body_is_an_error() {
        assert!(parse_remote_payload("h", "<html>").is_err());
    }
}
