//! eightdigit: generate N-digit random numbers, keep the newest few in SQLite or MySQL,
//! and hand each one out to a viewer exactly once.

pub mod cli;
pub mod config;
pub mod digits;
pub mod error;
pub mod logging;
pub mod migration;
pub mod model;
pub mod sql;
pub mod store;

pub use cli::{run_generator, run_viewer, Action};
pub use config::{load_config, AppConfig};
pub use digits::{generate_digits, generate_digits_with, DEFAULT_LENGTH};
pub use error::{AppError, ConfigError};
pub use logging::init_logging;
pub use migration::apply_migrations;
pub use model::NumberRecord;
pub use sql::{Backend, Dialect};
pub use store::RandomNumberStore;
