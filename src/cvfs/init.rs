use crate::api::CvfsApi;
use crate::config::CvfsConfig;
use crate::error::{CvfsError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::io;
use std::path::{Path, PathBuf};

pub struct CvfsContext {
    pub api: CvfsApi<FileStore>,
    pub config: CvfsConfig,
    pub data_dir: PathBuf,
}

/// The per-user data dir, e.g. `~/.local/share/cvfs` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "cvfs", "cvfs").ok_or_else(|| {
        CvfsError::PersistenceIo(io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine a home directory",
        ))
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Load config from `data_dir` and open the store it points at.
pub fn initialize(data_dir: &Path) -> Result<CvfsContext> {
    let config = CvfsConfig::load(data_dir)?;
    let store = FileStore::new(config.store_dir(data_dir)).with_file_ext(&config.file_ext);
    tracing::debug!(
        data_dir = %data_dir.display(),
        store_dir = %store.root().display(),
        "initialized"
    );

    Ok(CvfsContext {
        api: CvfsApi::new(store),
        config,
        data_dir: data_dir.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn initialize_uses_configured_store() {
        let temp = TempDir::new().unwrap();
        let mut config = CvfsConfig::default();
        config.store_dir = Some(PathBuf::from("saved"));
        config.set_file_ext("json");
        config.save(temp.path()).unwrap();

        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.config, config);
        assert_eq!(ctx.api.store().root(), temp.path().join("saved"));
        assert_eq!(ctx.api.store().file_ext(), ".json");
    }

    #[test]
    fn initialize_without_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.config, CvfsConfig::default());
        assert_eq!(ctx.api.store().root(), temp.path().join("disks"));
    }
}
