// src/main.rs
//! EcoBazaar auth server entry point
use anyhow::Result;
use clap::{Parser, Subcommand};
use ecobazaar_auth::api::server::AuthServer;
use ecobazaar_auth::auth::AuthConfig;
use ecobazaar_auth::config::AppEnvConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "ecobazaar-auth")]
#[command(about = "EcoBazaar signup/login service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind, overrides SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging()?;

    info!("Starting ecobazaar-auth v{}", env!("CARGO_PKG_VERSION"));

    let mut env_config = AppEnvConfig::from_env()?;
    let auth_config = AuthConfig::from_env()?;

    if let Some(Commands::Serve { port: Some(port) }) = args.command {
        env_config.port = port;
    }

    info!(
        "Password algorithm: {:?}, token expiry: {}s",
        auth_config.password.algorithm, auth_config.token_expiry
    );

    let server = AuthServer::new(&env_config, &auth_config).await?;
    server.start().await
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=info,h2=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
