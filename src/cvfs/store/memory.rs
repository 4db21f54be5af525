use super::DiskStore;
use crate::error::{CvfsError, Result};
use std::collections::HashMap;
use std::io;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    disks: HashMap<String, Vec<u8>>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `save` and `delete` fail with an I/O error.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(CvfsError::PersistenceIo(io::Error::other(
                "Simulated write error",
            )));
        }
        Ok(())
    }
}

impl DiskStore for InMemoryStore {
    fn save(&mut self, name: &str, snapshot: &[u8]) -> Result<()> {
        if self.disks.contains_key(name) {
            return Err(CvfsError::AlreadyExists(name.to_string()));
        }
        self.check_writable()?;
        self.disks.insert(name.to_string(), snapshot.to_vec());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Vec<u8>> {
        self.disks
            .get(name)
            .cloned()
            .ok_or_else(|| CvfsError::NotFound(format!("saved disk {}", name)))
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.check_writable()?;
        self.disks
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CvfsError::NotFound(format!("saved disk {}", name)))
    }

    fn exists(&self, name: &str) -> bool {
        self.disks.contains_key(name)
    }

    fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.disks.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
