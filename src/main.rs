use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use trip_insights_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, PgTravelStore},
    services::{DestinationCatalog, InMemoryStore, TravelDataStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let catalog = DestinationCatalog::load(config.catalog_path.as_deref())?;
    let store = build_store(&config).await?;
    tracing::info!(store = store.name(), "Travel data store ready");

    let state = AppState::new(catalog, store, config.max_nearby_results);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn TravelDataStore>> {
    if let Some(database_url) = &config.database_url {
        let pool = create_pool(database_url).await?;
        return Ok(Arc::new(PgTravelStore::new(pool)));
    }

    let store = match &config.travel_data_path {
        Some(path) => InMemoryStore::from_json_file(path)?,
        None => {
            tracing::warn!("No DATABASE_URL or TRAVEL_DATA_PATH set; starting with an empty store");
            InMemoryStore::default()
        }
    };
    Ok(Arc::new(store))
}
