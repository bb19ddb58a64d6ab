use clap::Parser;
use miette::{IntoDiagnostic, Result};
use receipt_points::application::service::ReceiptService;
use receipt_points::domain::ports::SharedReceiptStore;
use receipt_points::domain::receipt::Origin;
use receipt_points::infrastructure::in_memory::InMemoryReceiptStore;
use receipt_points::interfaces::http::router;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    /// Requires the `storage-rocksdb` feature.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[cfg(feature = "storage-rocksdb")]
fn build_store(cli: &Cli) -> Result<SharedReceiptStore> {
    use receipt_points::infrastructure::rocksdb::RocksDbReceiptStore;

    match &cli.db_path {
        Some(path) => {
            let store = RocksDbReceiptStore::open(path).into_diagnostic()?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(InMemoryReceiptStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn build_store(cli: &Cli) -> Result<SharedReceiptStore> {
    if cli.db_path.is_some() {
        miette::bail!("--db-path requires a build with the storage-rocksdb feature");
    }
    Ok(Arc::new(InMemoryReceiptStore::new()))
}

/// Probes the store before accepting traffic, retrying a few times so the
/// process can ride out a storage backend that is still coming up.
async fn wait_for_store(store: &SharedReceiptStore) -> Result<()> {
    const ATTEMPTS: u32 = 5;

    let mut attempt = 0;
    loop {
        match store.get(Uuid::nil()).await {
            Ok(_) => return Ok(()),
            Err(e) => {
                attempt += 1;
                if attempt >= ATTEMPTS {
                    return Err(miette::miette!("storage unavailable: {}", e));
                }
                warn!("storage not ready ({}), retrying in 5 seconds...", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let store = build_store(&cli)?;
    wait_for_store(&store).await?;

    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());
    let origin = Origin {
        host,
        port: cli.port,
    };

    let service = Arc::new(ReceiptService::new(store, origin));
    let app = router(service);

    let addr = format!("{}:{}", cli.host, cli.port);
    info!("starting receipt points server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.into_diagnostic()?;
    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}
