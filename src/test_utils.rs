#[cfg(test)]
pub mod test_utils {
    use crate::notify::{NoopNotifier, Notifier};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing, backed by the no-op notifier
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        AppState {
            db: Arc::new(db),
            notifier: Arc::new(NoopNotifier),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let (router, _state) = setup_test_app_with_state().await;
        router
    }

    /// Create axum app for testing, handing back the state so tests can
    /// inspect the store directly (issued codes never appear in responses).
    pub async fn setup_test_app_with_state() -> (Router, AppState) {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        let router = create_router(state.clone());
        (router, state)
    }

    /// Create axum app for testing with a specific notifier implementation,
    /// so tests can exercise delivery-failure behavior.
    pub async fn setup_test_app_with_notifier(notifier: Arc<dyn Notifier>) -> (Router, AppState) {
        let _ = init_test_tracing();

        let db = setup_test_db().await;
        let state = AppState {
            db: Arc::new(db),
            notifier,
        };
        let router = create_router(state.clone());
        (router, state)
    }
}
