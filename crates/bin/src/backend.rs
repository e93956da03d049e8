//! Backend creation and utility functions.

use std::path::{Path, PathBuf};

use shoplist::{
    ListService,
    backend::{
        ListStore,
        database::{DbKind, InMemory, Postgres, Sqlite, SqlxBackend},
    },
};

use crate::cli::{Backend, BackendConfig};

const SQLITE_FILE: &str = "shoplist.db";
const JSON_FILE: &str = "shoplist.json";

/// Redact credentials from a PostgreSQL connection URL for safe logging
pub fn redact_postgres_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut redacted = parsed.clone();
        if !parsed.username().is_empty() {
            let _ = redacted.set_username("***");
        }
        if parsed.password().is_some() {
            let _ = redacted.set_password(Some("***"));
        }
        redacted.to_string()
    } else {
        "postgres://***@<unparsable-url>".to_string()
    }
}

/// Directory holding the backend's files.
pub fn data_dir(config: &BackendConfig) -> PathBuf {
    config.data_dir.clone().unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the JSON file backing the in-memory store.
pub fn json_path(config: &BackendConfig) -> PathBuf {
    data_dir(config).join(JSON_FILE)
}

/// Short name of the store behind a service.
pub fn backend_label(store: &dyn ListStore) -> &'static str {
    if let Some(sqlx) = store.as_any().downcast_ref::<SqlxBackend>() {
        match sqlx.kind() {
            DbKind::Sqlite => "sqlite",
            DbKind::Postgres => "postgres",
        }
    } else if store.as_any().is::<InMemory>() {
        "inmemory"
    } else {
        "unknown"
    }
}

/// Create the appropriate store based on configuration
pub async fn create_backend(
    config: &BackendConfig,
) -> Result<Box<dyn ListStore>, Box<dyn std::error::Error>> {
    let data_dir = data_dir(config);

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir).await?;

    match config.backend {
        Backend::Sqlite => {
            let db_path = data_dir.join(SQLITE_FILE);
            tracing::info!("Using SQLite backend at {}", db_path.display());
            Ok(Box::new(Sqlite::open(&db_path).await?))
        }
        Backend::Postgres => {
            let url = config
                .postgres_url
                .as_ref()
                .ok_or("PostgreSQL backend requires --postgres-url or SHOPLIST_POSTGRES_URL")?;

            let display_url = redact_postgres_url(url);
            tracing::info!("Connecting to PostgreSQL backend at {}", display_url);

            match Postgres::connect(url).await {
                Ok(backend) => {
                    tracing::info!("Connected to PostgreSQL successfully");
                    Ok(Box::new(backend))
                }
                Err(e) => {
                    Err(format!("Failed to connect to PostgreSQL at {display_url}: {e}").into())
                }
            }
        }
        Backend::Inmemory => {
            let json_path = data_dir.join(JSON_FILE);
            tracing::info!(
                "Using in-memory backend with persistence at {}",
                json_path.display()
            );
            // A missing file loads as an empty store; a corrupt one is an error
            let backend = InMemory::load_from_file(&json_path).await?;
            tracing::info!("Loaded {} lists from {}", backend.len().await, json_path.display());
            Ok(Box::new(backend))
        }
    }
}

/// Write the in-memory store back to disk. Other stores persist on every write.
pub async fn save_if_in_memory(service: &ListService, path: &Path) -> shoplist::Result<()> {
    if let Some(in_memory) = service.store().as_any().downcast_ref::<InMemory>() {
        in_memory.save_to_file(path).await?;
        tracing::info!("Saved lists to {}", path.display());
    }
    Ok(())
}
