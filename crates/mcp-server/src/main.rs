use std::sync::Arc;

use anyhow::Context;
use bucket_docs_mcp::{Config, DocumentServer, http};
use clap::{Parser, ValueEnum};
use doc_store::{DocumentStore, S3Backend};
use rmcp::{ServiceExt, transport::stdio};
use tokio::signal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// REST routes plus JSON-RPC at /mcp
    Http,
    /// MCP over stdin/stdout
    Stdio,
}

#[derive(Parser, Debug)]
#[command(name = "bucket-docs")]
#[command(about = "Read-only REST and MCP access to documents in an S3 bucket")]
struct Cli {
    /// Front end to serve
    #[arg(long, value_enum, default_value_t = Transport::Http, env = "MCP_TRANSPORT")]
    transport: Transport,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays free for the stdio transport
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bucket_docs=info,bucket_docs_mcp=info,doc_store=info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!("Configuration error: {}", e);
    })?;

    tracing::info!(
        "Connecting to bucket {} at {}",
        config.s3.bucket_name,
        config.s3.endpoint
    );
    let backend = S3Backend::connect(&config.s3).await;
    let store = Arc::new(DocumentStore::new(Arc::new(backend)));

    match cli.transport {
        Transport::Http => serve_http(&config, store).await,
        Transport::Stdio => serve_stdio(store).await,
    }
}

async fn serve_http(config: &Config, store: Arc<DocumentStore>) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let app = http::router(store);

    tracing::info!("Starting bucket-docs HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("bucket-docs HTTP server shut down");
    Ok(())
}

async fn serve_stdio(store: Arc<DocumentStore>) -> anyhow::Result<()> {
    let service = DocumentServer::new(store)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("Error starting server: {}", e);
        })?;

    tracing::info!("bucket-docs MCP server started on stdio");
    service.waiting().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
