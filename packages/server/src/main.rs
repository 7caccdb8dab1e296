use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use common::storage::FilesystemUploadStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;
use server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::ensure_singletons(&db).await?;
    seed::seed_admin_user(&db, &config.auth).await?;

    let uploads_dir = PathBuf::from(&config.storage.upload_dir);
    let store = FilesystemUploadStore::new(uploads_dir.clone()).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(db, config, Arc::new(store));
    let app = build_router(state, &uploads_dir);

    info!("CMS API running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
