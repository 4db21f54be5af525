use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".cvfs";
const DEFAULT_STORE_DIR: &str = "disks";

/// Configuration for cvfs, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CvfsConfig {
    /// Where saved disks live. Relative paths are taken from the data dir.
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// File extension for saved disks (e.g. ".cvfs", ".json")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

impl Default for CvfsConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            file_ext: default_file_ext(),
        }
    }
}

impl CvfsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: CvfsConfig = serde_json::from_str(&content)?;
        let ext = config.file_ext.clone();
        config.set_file_ext(&ext);
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }

    /// The directory saved disks go to, given the data dir.
    pub fn store_dir(&self, data_dir: &Path) -> PathBuf {
        match &self.store_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => data_dir.join(dir),
            None => data_dir.join(DEFAULT_STORE_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CvfsConfig::default();
        assert_eq!(config.file_ext, ".cvfs");
        assert_eq!(config.store_dir, None);
    }

    #[test]
    fn test_set_file_ext_without_dot() {
        let mut config = CvfsConfig::default();
        config.set_file_ext("json");
        assert_eq!(config.file_ext, ".json");
        config.set_file_ext(".disk");
        assert_eq!(config.file_ext, ".disk");
    }

    #[test]
    fn test_store_dir_resolution() {
        let data = Path::new("/data/cvfs");
        let mut config = CvfsConfig::default();
        assert_eq!(config.store_dir(data), data.join("disks"));

        config.store_dir = Some(PathBuf::from("saved"));
        assert_eq!(config.store_dir(data), data.join("saved"));

        config.store_dir = Some(PathBuf::from("/elsewhere"));
        assert_eq!(config.store_dir(data), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = CvfsConfig::load(temp.path().join("nowhere")).unwrap();
        assert_eq!(config, CvfsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let mut config = CvfsConfig::default();
        config.set_file_ext("json");
        config.store_dir = Some(PathBuf::from("mine"));
        config.save(temp.path()).unwrap();

        assert_eq!(CvfsConfig::load(temp.path()).unwrap(), config);
    }

    #[test]
    fn test_load_normalises_hand_written_ext() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"file_ext": "bin"}"#).unwrap();
        let config = CvfsConfig::load(temp.path()).unwrap();
        assert_eq!(config.file_ext, ".bin");
        assert_eq!(config.store_dir, None);
    }
}
