use std::{net::SocketAddr, sync::Arc};

use {
    clap::Parser,
    lockbox_server::{AppState, SqliteStorage, serve},
    lockbox_token::TokenService,
    sqlx::sqlite::SqlitePoolOptions,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

/// Lockbox vault server.
#[derive(Parser)]
#[command(name = "lockbox-server", version)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1", env = "LOCKBOX_BIND")]
    bind: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8787, env = "LOCKBOX_PORT")]
    port: u16,

    /// SQLite database URL.
    #[arg(
        long,
        default_value = "sqlite:lockbox.db?mode=rwc",
        env = "LOCKBOX_DATABASE_URL"
    )]
    database_url: String,

    /// Token signing secret. Must be non-empty.
    #[arg(long, env = "LOCKBOX_TOKEN_SECRET")]
    token_secret: String,

    /// Log level filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    let tokens = Arc::new(TokenService::new(&cli.token_secret)?);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;
    let storage = Arc::new(SqliteStorage::new(pool).await?);

    let state = AppState::new(storage.clone(), storage, tokens);
    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;
    serve(addr, state).await
}
