use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use summary_core::{Summarizer, SummarizerConfig};
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// JSON config file (falls back to SUMMARIZER_CONFIG, then defaults)
    #[arg(long)]
    config: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = match args.config.or_else(|| std::env::var("SUMMARIZER_CONFIG").ok()) {
        Some(path) => SummarizerConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => SummarizerConfig::default(),
    };
    let app: Router = build_app(Summarizer::new(config)?);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
