//! # Storage Layer
//!
//! Saved disks are opaque byte blobs kept under a name. The [`DiskStore`]
//! trait is all the session knows about where they go.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<name>.cvfs` file per saved disk in a single
//!   directory. Writes go through a temporary file and a rename.
//! - [`memory::InMemoryStore`]: a map, for tests. It can be told to fail
//!   writes so callers can check they leave their own state alone.
//!
//! ## Snapshot Format
//!
//! [`snapshot`] encodes only the nodes reachable from the root (detached
//! nodes kept for undo are dropped) as JSON. [`restore`] decodes and audits
//! the size invariant before handing the disk back, so a hand-edited file
//! cannot smuggle in a tree with wrong directory sizes.

use crate::disk::Disk;
use crate::error::{CvfsError, Result};
use std::io;

pub mod fs;
pub mod memory;

pub trait DiskStore {
    /// Persist `snapshot` as `name`. Fails with `AlreadyExists` rather than
    /// overwrite.
    fn save(&mut self, name: &str, snapshot: &[u8]) -> Result<()>;

    /// Fails with `NotFound` if nothing was saved as `name`.
    fn load(&self, name: &str) -> Result<Vec<u8>>;

    /// Fails with `NotFound` if nothing was saved as `name`.
    fn delete(&mut self, name: &str) -> Result<()>;

    fn exists(&self, name: &str) -> bool;

    /// Saved disk names, sorted.
    fn names(&self) -> Result<Vec<String>>;
}

pub fn snapshot(disk: &Disk) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&disk.compacted())?)
}

pub fn restore(blob: &[u8]) -> Result<Disk> {
    let disk: Disk = serde_json::from_slice(blob)?;
    if !disk.is_consistent() {
        return Err(CvfsError::PersistenceIo(io::Error::new(
            io::ErrorKind::InvalidData,
            "saved disk is not a consistent tree",
        )));
    }
    Ok(disk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::fixtures::DiskFixture;
    use crate::model::DocumentType;

    #[test]
    fn snapshot_drops_detached_nodes() {
        let mut fx = DiskFixture::default()
            .with_dir("Dir1")
            .with_doc("Dir1:Doc1", DocumentType::Txt, "ab")
            .with_doc("Gone", DocumentType::Css, "x");
        let root = fx.disk.root();
        fx.disk.delete(root, "Gone").unwrap();

        let restored = restore(&snapshot(&fx.disk).unwrap()).unwrap();
        assert_eq!(restored, fx.disk.compacted());
        assert_eq!(restored.size(), fx.disk.size());
        assert_eq!(restored.capacity(), 1000);
        assert!(restored.child(restored.root(), "Gone").is_none());
    }

    #[test]
    fn restore_rejects_garbage() {
        assert!(matches!(
            restore(b"not json"),
            Err(CvfsError::Serialization(_))
        ));
    }

    #[test]
    fn restore_rejects_wrong_sizes() {
        let fx = DiskFixture::default().with_doc("Doc1", DocumentType::Txt, "ab");
        let json = String::from_utf8(snapshot(&fx.disk).unwrap()).unwrap();
        let tampered = json.replacen("\"size\":82", "\"size\":99", 1);
        assert_ne!(json, tampered);
        assert!(matches!(
            restore(tampered.as_bytes()),
            Err(CvfsError::PersistenceIo(_))
        ));
    }

    #[test]
    fn restore_rejects_root_with_parent() {
        let fx = DiskFixture::default().with_doc("Doc1", DocumentType::Txt, "ab");
        let json = String::from_utf8(snapshot(&fx.disk).unwrap()).unwrap();
        // the root is serialized first
        let tampered = json.replacen("\"parent\":null", "\"parent\":1", 1);
        assert_ne!(json, tampered);
        assert!(matches!(
            restore(tampered.as_bytes()),
            Err(CvfsError::PersistenceIo(_))
        ));
    }
}
