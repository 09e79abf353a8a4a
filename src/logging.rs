//! tracing subscriber setup shared by both binaries.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install the global subscriber. Logs go to stderr so stdout carries only program output.
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` (default `warn`) applies to this crate and its binaries.
pub fn init_logging() {
    let level = std::env::var("LOG_LEVEL")
        .ok()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.into());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn default_directives(level: &str) -> String {
    let level = level.trim();
    format!("warn,eightdigit={level},generator={level},viewer={level},sqlx=warn,reqwest=warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_scope_level_to_crate() {
        assert_eq!(
            default_directives(" debug "),
            "warn,eightdigit=debug,generator=debug,viewer=debug,sqlx=warn,reqwest=warn"
        );
    }
}
