use std::sync::Arc;

use common::storage::UploadStore;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub uploads: Arc<dyn UploadStore>,
    /// Serializes reconciliation scans so two concurrent listing requests
    /// cannot both backfill the same orphaned file.
    pub reconcile_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig, uploads: Arc<dyn UploadStore>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            uploads,
            reconcile_lock: Arc::new(Mutex::new(())),
        }
    }
}
