use crate::api::DiskApi;
use crate::config::{AppConfig, Backend};
use crate::error::{DiskError, Result};
use crate::store::fs::FileStore;
use crate::store::memory::InMemoryStore;
use crate::store::postgrest::PostgrestClient;
use crate::store::remote::RemoteStore;
use crate::store::DiskRepository;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "DISKLEDGER_HOME";

/// `DISKLEDGER_HOME` if set, otherwise the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "diskledger", "diskledger")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DiskError::Config("Could not determine a data directory".into()))
}

/// Open the repository selected by `config`.
pub fn open_store(config: &AppConfig, data_dir: &Path) -> Result<Box<dyn DiskRepository>> {
    let store: Box<dyn DiskRepository> = match config.backend {
        Backend::Memory => Box::new(InMemoryStore::new()),
        Backend::File => Box::new(FileStore::new(data_dir)),
        Backend::Remote => {
            let (url, key) = config.remote_credentials()?;
            let client = PostgrestClient::new(url, key, &config.table, config.timeout())?;
            Box::new(RemoteStore::new(client))
        }
    };
    tracing::debug!(backend = %config.backend, dir = %data_dir.display(), "store opened");
    Ok(store)
}

/// Load config (file, then environment, then `backend_override`) and build
/// the API over the selected store.
pub fn initialize(
    data_dir: &Path,
    backend_override: Option<Backend>,
) -> Result<DiskApi<Box<dyn DiskRepository>>> {
    let mut config = AppConfig::load(data_dir)?;
    config.apply_env()?;
    if let Some(backend) = backend_override {
        config.backend = backend;
    }

    let store = open_store(&config, data_dir)?;
    Ok(DiskApi::new(store))
}
