use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Error, Pool, Sqlite};
use tracing::info;

/// Create a SQLite connection pool
///
/// # Parameters
/// - `database_url`: SQLite connection string
///   Format: sqlite://PATH or sqlite::memory:
/// - `max_connections`: upper bound on pooled connections
///
/// The database file is created when it does not exist yet, along with its
/// parent directory.
pub async fn get_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<Pool<Sqlite>, Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let filename = options.get_filename();
    if filename != Path::new(":memory:") {
        if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                info!("Database directory {} does not exist, creating it", parent.display());
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}
