mod error;
mod input;
mod models;
mod session;
mod sources;
mod store;

use session::Session;
use sources::{DemoSeed, PropertySource};
use store::PropertyStore;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Property Desk - Session Listing Manager");
    info!("==========================================");

    let mut store = PropertyStore::new();

    // Records only live for this session; --seed starts it off with the
    // built-in demo listings instead of an empty store
    if std::env::args().any(|arg| arg == "--seed") {
        let seed = DemoSeed::new();
        info!("Seeding session from '{}'...", seed.source_name());

        for record in seed.load().await? {
            let id = record.id;
            if let Err(err) = store.add(record) {
                warn!("Skipping seed record {}: {}", id, err);
            }
        }
        info!("Session starts with {} properties", store.len());
    }

    Session::new(store).run().await?;

    info!("👋 Session closed, records discarded");
    Ok(())
}
