use anyhow::Context;

use stockroom_config::{StockroomConfig, DEFAULT_CONFIG_FILE};
use stockroom_inventory::SharedInventory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let config = StockroomConfig::load_from(&config_path)
        .with_context(|| format!("loading configuration from {config_path}"))?;

    stockroom_observability::init_with(&config.log.level, config.log.json);

    let service = stockroom_app::build_service(&config).context("seeding inventory")?;
    let inventory = SharedInventory::new(service);

    let stats = inventory
        .read(|svc| svc.stats(config.recent_orders_limit))
        .context("computing dashboard")?;
    tracing::info!(
        products = stats.total_products,
        units = stats.total_units_in_stock,
        orders = stats.total_orders,
        low_stock = stats.low_stock_count,
        "inventory ready"
    );
    for product in &stats.low_stock {
        tracing::warn!(name = product.name(), quantity = product.quantity(), "low stock");
    }

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
