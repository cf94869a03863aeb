use crate::notify::NoopNotifier;
use crate::schemas::AppState;
use anyhow::Result;
use sea_orm::Database;
use std::sync::Arc;

/// Initialize application state for the given database URL.
///
/// The notification sender is the no-op stub; swapping in a real SMS/email
/// provider only means handing a different `Notifier` to `AppState`.
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    dotenvy::dotenv().ok();

    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState {
        db: Arc::new(db),
        notifier: Arc::new(NoopNotifier),
    })
}
