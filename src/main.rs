use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use contactbook::{
    config::ServerConfig,
    runtime::handle::{DEFAULT_QUEUE_CAPACITY, spawn_contactbook},
    web,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(about = "Demonstration contact directory served over HTTP")]
struct Args {
    /// TOML file providing `address` and `port`
    #[arg(short, long, value_name = "PATH", default_value = "./contactbook.toml")]
    config_file: PathBuf,
    /// Address to listen on; overrides the config file
    #[arg(short, long)]
    address: Option<String>,
    /// Port to listen on; overrides the config file
    #[arg(short, long)]
    port: Option<u16>,
    /// Bounded command queue size (minimum 10)
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,
    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn init_logging(level: tracing::Level) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(true).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);

    let config = ServerConfig::load(&args.config_file)
        .with_context(|| format!("loading config file {}", args.config_file.display()))?;
    let addr = config
        .resolve(args.address.as_deref(), args.port)
        .context("resolving bind address")?;

    let book = spawn_contactbook(args.queue_capacity);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    let served = web::serve(listener, book.clone(), shutdown_signal()).await;

    book.stop();
    book.wait().await;
    info!("shutdown complete");
    served.context("http server failed")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
