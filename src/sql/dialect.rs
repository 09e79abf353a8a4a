//! Backend detection from the connection string and the per-backend DDL.

use crate::error::ConfigError;

/// The single table this crate owns.
pub const TABLE: &str = "random_numbers";

/// Backend family named by the connection string scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    MySql,
}

impl Backend {
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Backend::Sqlite => &SqliteDialect,
            Backend::MySql => &MySqlDialect,
        }
    }
}

/// SQL that differs between backends. Everything else the store runs is shared.
pub trait Dialect: Send + Sync {
    fn backend(&self) -> Backend;

    /// `CREATE TABLE IF NOT EXISTS` for [`TABLE`] with all current columns.
    fn create_table_statement(&self) -> String;

    /// `ALTER TABLE ... ADD COLUMN` for a column added after the table was first
    /// created. `None` for columns that were always part of the table.
    fn add_column_statement(&self, column: &str) -> Option<String>;

    /// Query returning `COUNT(*)` of columns named by the second bind parameter on
    /// the table named by the first.
    fn column_exists_query(&self) -> &'static str;

    /// Select list yielding `id` (i64), `value` (text), `viewed` (i64) and
    /// `created_at` (text), in that order.
    fn select_columns(&self) -> &'static str;
}

#[derive(Debug)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn create_table_statement(&self) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                value TEXT NOT NULL,
                viewed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            TABLE
        )
    }

    fn add_column_statement(&self, column: &str) -> Option<String> {
        match column {
            "viewed" => Some(format!(
                "ALTER TABLE {} ADD COLUMN viewed INTEGER NOT NULL DEFAULT 0",
                TABLE
            )),
            _ => None,
        }
    }

    fn column_exists_query(&self) -> &'static str {
        "SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?"
    }

    fn select_columns(&self) -> &'static str {
        "id, value, viewed, created_at"
    }
}

#[derive(Debug)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn backend(&self) -> Backend {
        Backend::MySql
    }

    fn create_table_statement(&self) -> String {
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                value VARCHAR(255) NOT NULL,
                viewed TINYINT(1) NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            TABLE
        )
    }

    fn add_column_statement(&self, column: &str) -> Option<String> {
        match column {
            "viewed" => Some(format!(
                "ALTER TABLE {} ADD COLUMN viewed TINYINT(1) NOT NULL DEFAULT 0",
                TABLE
            )),
            _ => None,
        }
    }

    fn column_exists_query(&self) -> &'static str {
        r#"
        SELECT COUNT(*) FROM INFORMATION_SCHEMA.COLUMNS
        WHERE TABLE_SCHEMA = DATABASE()
          AND TABLE_NAME = ?
          AND COLUMN_NAME = ?
        "#
    }

    // The any driver has no TINYINT or TIMESTAMP mapping; widen to types it decodes.
    fn select_columns(&self) -> &'static str {
        "id, value, CAST(viewed AS SIGNED) AS viewed, CAST(created_at AS CHAR) AS created_at"
    }
}

/// Connection string ready for sqlx plus the backend it targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbUrl {
    pub backend: Backend,
    pub url: String,
}

impl DbUrl {
    pub fn is_in_memory(&self) -> bool {
        self.backend == Backend::Sqlite && self.url.contains(":memory:")
    }
}

/// Map a user-supplied connection string onto a URL sqlx accepts.
///
/// Driver suffixes (`mysql+pymysql://`) are dropped and `mariadb` is treated as MySQL.
/// `sqlite:///rel.db` and `sqlite:////abs.db` follow the three/four slash convention
/// (relative/absolute path). SQLite files are opened with `mode=rwc`; MySQL gets
/// `ssl-mode=required` unless the URL names an ssl mode itself.
pub fn parse_db_url(raw: &str) -> Result<DbUrl, ConfigError> {
    let raw = raw.trim();
    let (scheme, rest) = raw
        .split_once(':')
        .ok_or_else(|| ConfigError::Invalid(format!("DB_URL has no scheme: '{}'", raw)))?;
    let base = scheme.split('+').next().unwrap_or(scheme).to_ascii_lowercase();

    match base.as_str() {
        "sqlite" => {
            if rest.contains(":memory:") {
                return Ok(DbUrl {
                    backend: Backend::Sqlite,
                    url: format!("sqlite:{}", rest),
                });
            }
            let rest = match rest.strip_prefix("///") {
                Some(path) => format!("//{}", path),
                None => rest.to_string(),
            };
            let mut url = format!("sqlite:{}", rest);
            if !url.contains("mode=") {
                push_param(&mut url, "mode=rwc");
            }
            Ok(DbUrl {
                backend: Backend::Sqlite,
                url,
            })
        }
        "mysql" | "mariadb" => {
            let mut url = format!("mysql:{}", rest);
            if !url.contains("ssl-mode=") {
                push_param(&mut url, "ssl-mode=required");
            }
            Ok(DbUrl {
                backend: Backend::MySql,
                url,
            })
        }
        other => Err(ConfigError::Invalid(format!(
            "unsupported database backend '{}', expected sqlite or mysql",
            other
        ))),
    }
}

fn push_param(url: &mut String, param: &str) {
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str(param);
}
