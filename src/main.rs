use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

use hotel_pricing::adapters::fixture::{Fixture, load_fixture};
use hotel_pricing::adapters::memory::pricing_store::InMemoryPricingStore;
use hotel_pricing::adapters::memory::reservations::InMemoryReservations;
use hotel_pricing::adapters::memory::rooms::InMemoryRooms;
use hotel_pricing::config::load_config;
use hotel_pricing::mcp::server::HotelMcpServer;
use hotel_pricing::service::BookingService;

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [PathBuf::from("config.yaml"), binary_dir().join("config.yaml")];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Relative fixture paths are taken from the config file's directory.
fn resolve_fixture(config_path: &Path, fixture: &Path) -> PathBuf {
    config_path
        .parent()
        .map_or_else(|| fixture.to_path_buf(), |dir| dir.join(fixture))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for MCP JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting hotel-pricing server");

    let config_path = find_config_path();
    let config = load_config(&config_path)?;

    let pricing = Arc::new(InMemoryPricingStore::from_config(&config.pricing)?);
    let fixture = match &config.data.fixture_path {
        Some(path) => load_fixture(&resolve_fixture(&config_path, path))?,
        None => {
            tracing::info!("No fixture configured, starting with empty hotel");
            Fixture::default()
        }
    };

    let service = BookingService::new(
        pricing,
        Arc::new(InMemoryRooms::with_rooms(fixture.rooms)),
        Arc::new(InMemoryReservations::with_reservations(fixture.reservations)),
    )
    .with_report_config(config.reports);
    let server = HotelMcpServer::new(Arc::new(service));

    // Start MCP server over stdio
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
