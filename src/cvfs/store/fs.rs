use super::DiskStore;
use crate::error::{CvfsError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DEFAULT_FILE_EXT: &str = ".cvfs";

pub struct FileStore {
    root: PathBuf,
    file_ext: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    fn disk_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}{}", name, self.file_ext))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl DiskStore for FileStore {
    fn save(&mut self, name: &str, snapshot: &[u8]) -> Result<()> {
        let target = self.disk_path(name);
        if target.exists() {
            return Err(CvfsError::AlreadyExists(name.to_string()));
        }
        self.ensure_dir()?;

        let tmp_file = self.root.join(format!(".disk-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, snapshot)?;
        if let Err(e) = fs::rename(&tmp_file, &target) {
            let _ = fs::remove_file(&tmp_file);
            return Err(e.into());
        }
        tracing::debug!(path = %target.display(), bytes = snapshot.len(), "saved disk");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Vec<u8>> {
        match fs::read(self.disk_path(name)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CvfsError::NotFound(format!("saved disk {}", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        match fs::remove_file(self.disk_path(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CvfsError::NotFound(format!("saved disk {}", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.disk_path(name).exists()
    }

    fn names(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let file_name = entry?.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }
            if let Some(stem) = file_name.strip_suffix(self.file_ext.as_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
