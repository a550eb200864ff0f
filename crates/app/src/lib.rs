//! Composition root: turns a [`StockroomConfig`] into a ready service.

use std::sync::Arc;

use stockroom_config::StockroomConfig;
use stockroom_inventory::{InventoryService, SeedData, SeedError, SystemClock};

/// Build the service the configuration asks for.
///
/// A configured seed file wins over the demo data; with neither the service
/// starts empty.
pub fn build_service(config: &StockroomConfig) -> Result<InventoryService, SeedError> {
    let seed = match (&config.seed_file, config.seed_demo_data) {
        (Some(path), _) => {
            tracing::info!(path = %path.display(), "loading seed file");
            SeedData::from_path(path)?
        }
        (None, true) => SeedData::demo(),
        (None, false) => {
            tracing::info!("starting with an empty inventory");
            return Ok(InventoryService::new());
        }
    };
    InventoryService::from_seed(&seed, Arc::new(SystemClock))
}
