use std::io;

use actix_web::{middleware::Logger, App, HttpServer};
use clap::Parser;
use sqlx::{Pool, Sqlite};
use tracing::{info, Subscriber};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    Layer,
};

use job_openings::api;
use job_openings::cli::{Cli, Command};
use job_openings::config::Config;
use job_openings::db;
use job_openings::shutdown::ShutdownCoordinator;

fn file_layer<S>(log_dir: &str, file_name: &str, level: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, file_name))
        .with_ansi(false)
        .with_filter(level)
}

/// Console output plus per-level files rotated daily,
/// e.g. logs/info.log.2024-12-22, logs/error.log.2024-12-22
fn init_tracing(log_dir: &str) {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer(log_dir, "info.log", LevelFilter::INFO))
        .with(file_layer(log_dir, "warn.log", LevelFilter::WARN))
        .with(file_layer(log_dir, "error.log", LevelFilter::ERROR))
        .with(file_layer(log_dir, "debug.log", LevelFilter::DEBUG))
        .init();
}

async fn serve(config: &Config, pool: Pool<Sqlite>) -> io::Result<()> {
    let server_pool = pool.clone();
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(api::configure(server_pool.clone(), max_payload_size))
    })
    .disable_signals()
    .bind((config.host.as_str(), config.port))?
    .run();

    info!("Server listening on http://{}:{}", config.host, config.port);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().map_err(io::Error::other)?;

    std::fs::create_dir_all(&config.log_dir)?;
    init_tracing(&config.log_dir);

    info!("Starting job-openings");
    info!("  - Database: {}", config.database_url);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);

    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections)
        .await
        .map_err(io::Error::other)?;
    info!("Database connection pool established");

    db::migrations::run_migrations(&pool)
        .await
        .map_err(io::Error::other)?;

    match cli.command() {
        Command::Migrate => {
            pool.close().await;
            Ok(())
        }
        Command::Serve => serve(&config, pool).await,
    }
}
