use std::sync::Arc;

use staff_client::StaffApi;
use staff_panel::logger::init_logger_with_file;
use staff_panel::{OrderBoard, PanelConfig, Route};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment and logging
    dotenv::dotenv().ok();
    let config = PanelConfig::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    tracing::info!(base_url = %config.api_base_url, "Staff panel starting");
    for route in Route::ALL {
        tracing::debug!(path = route.path(), title = route.title(), "View available");
    }

    // 2. Backend client
    let api: Arc<dyn StaffApi> = Arc::new(config.client_config().build()?);
    match api.health().await {
        Ok(health) if health.is_healthy() => tracing::info!("Backend is healthy"),
        Ok(health) => tracing::warn!(status = %health.status, "Backend reports unhealthy"),
        Err(e) => tracing::warn!(error = %e, "Backend health check failed"),
    }

    // 3. Order board polling
    let shutdown = CancellationToken::new();
    let board = Arc::new(OrderBoard::new(api));
    let poller = board.start_polling(config.poll_interval(), shutdown.child_token());
    let mut updates = board.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let stats = *updates.borrow_and_update();
                tracing::info!(
                    pending = stats.pending,
                    preparing = stats.preparing,
                    ready = stats.ready,
                    delivered = stats.delivered,
                    total = stats.total,
                    revenue = %stats.revenue,
                    "Order board updated"
                );
            }
        }
    }

    // 4. Teardown
    tracing::info!(task = poller.name(), "Stopping poller");
    shutdown.cancel();
    poller.shutdown().await;
    tracing::info!("Staff panel stopped");

    Ok(())
}
