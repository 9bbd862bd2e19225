//! The `serve` subcommand: pool, migrations, HTTP server

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Args;
use trainerdex_server::db::{self, migrations};
use trainerdex_server::ServerConfig;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum database connections
    #[arg(long, default_value_t = db::DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Allow requests from any origin
    #[arg(long)]
    pub cors_permissive: bool,
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let bind_addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("invalid host/port")?;

    let pool = db::create_pool(&args.database_url, args.max_connections)
        .await
        .context("could not connect to database")?;
    tracing::info!("Database connection established");
    migrations::run(&pool).await?;

    let config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive,
    };

    trainerdex_server::run_server(pool, config).await?;
    Ok(())
}
