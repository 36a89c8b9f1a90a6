use std::sync::Arc;

use gym_churn::api::routes::{create_routes, AppState};
use gym_churn::config::{AppConfig, DatabaseConfig, StorageBackend};
use gym_churn::services::{ChurnClassifier, LogisticChurnModel};
use gym_churn::storage::{CheckinStore, InMemoryStore, MemberStore, PostgresStore};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    // Loaded once; never reloaded while the process runs
    let classifier: Arc<dyn ChurnClassifier> =
        Arc::new(LogisticChurnModel::load(&config.churn_model_path)?);

    let (members, checkins): (Arc<dyn MemberStore>, Arc<dyn CheckinStore>) = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = db_config.create_pool().await?;
            info!("Connected to database (max {} connections)", db_config.max_connections);

            let store = Arc::new(PostgresStore::new(pool));
            let members: Arc<dyn MemberStore> = store.clone();
            let checkins: Arc<dyn CheckinStore> = store;
            (members, checkins)
        }
        StorageBackend::Memory => {
            if config.is_production() {
                warn!("Running with in-memory storage in production; data is lost on restart");
            }
            let store = Arc::new(InMemoryStore::new());
            let members: Arc<dyn MemberStore> = store.clone();
            let checkins: Arc<dyn CheckinStore> = store;
            (members, checkins)
        }
    };

    let app = create_routes(AppState::new(members, checkins, classifier));

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Gym churn server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
