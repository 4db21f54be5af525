//! Session state: every disk opened this session, where the user currently
//! is, the criteria registry and the store saved disks go to.
//!
//! Disks are never dropped from a session. Switching to a new disk only moves
//! the location, so undoing `newDisk` or `load` can switch straight back and
//! redoing can switch forward again without rebuilding anything.

use crate::criteria::CriteriaRegistry;
use crate::disk::Disk;
use crate::error::{CvfsError, Result};
use crate::history::{ApplyRecord, HistoryRecord, Subject};
use crate::model::{DiskId, Location};
use crate::store::DiskStore;

pub struct Workspace<S: DiskStore> {
    store: S,
    disks: Vec<Disk>,
    location: Option<Location>,
    criteria: CriteriaRegistry,
}

impl<S: DiskStore> Workspace<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            disks: Vec::new(),
            location: None,
            criteria: CriteriaRegistry::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn criteria(&self) -> &CriteriaRegistry {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut CriteriaRegistry {
        &mut self.criteria
    }

    /// `None` until the first disk is created or loaded.
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Option<Location>) {
        self.location = location;
    }

    pub fn disk(&self, id: DiskId) -> Result<&Disk> {
        self.disks
            .get(id.0)
            .ok_or_else(|| CvfsError::NotFound(format!("disk #{}", id.0)))
    }

    pub fn disk_mut(&mut self, id: DiskId) -> Result<&mut Disk> {
        self.disks
            .get_mut(id.0)
            .ok_or_else(|| CvfsError::NotFound(format!("disk #{}", id.0)))
    }

    /// The current location and its disk, or `NoDisk`.
    pub fn current(&self) -> Result<(Location, &Disk)> {
        let location = self.location.ok_or(CvfsError::NoDisk)?;
        Ok((location, self.disk(location.disk)?))
    }

    pub fn current_mut(&mut self) -> Result<(Location, &mut Disk)> {
        let location = self.location.ok_or(CvfsError::NoDisk)?;
        Ok((location, self.disk_mut(location.disk)?))
    }

    /// Take ownership of a disk. Does not switch to it.
    pub(crate) fn add_disk(&mut self, disk: Disk) -> DiskId {
        self.disks.push(disk);
        DiskId(self.disks.len() - 1)
    }

    pub fn disk_count(&self) -> usize {
        self.disks.len()
    }

    /// `$:Dir1:Sub` for the current directory, `None` without a disk.
    pub fn current_path(&self) -> Option<String> {
        let (location, disk) = self.current().ok()?;
        Some(disk.path_of(location.dir))
    }

    fn check_location(&self, location: Location) -> Result<()> {
        let disk = self.disk(location.disk)?;
        match disk.node(location.dir) {
            Some(node) if node.is_directory() => Ok(()),
            _ => Err(CvfsError::NotFound(format!("directory #{}", location.dir.0))),
        }
    }
}

impl<S: DiskStore> ApplyRecord for Workspace<S> {
    fn apply(&mut self, record: &HistoryRecord) -> Result<()> {
        tracing::debug!(record = %record, "applying history record");
        match record {
            HistoryRecord::Add(Subject::Node { disk, parent, node }) => {
                self.disk_mut(*disk)?.attach(*parent, *node)
            }
            HistoryRecord::Delete(Subject::Node { disk, parent, node }) => {
                self.disk_mut(*disk)?.detach(*parent, *node)
            }
            HistoryRecord::Add(Subject::Criterion(criterion)) => {
                self.criteria.insert(criterion.clone())
            }
            HistoryRecord::Delete(Subject::Criterion(criterion)) => {
                self.criteria.remove(criterion.name()).map(|_| ())
            }
            HistoryRecord::Rename { disk, node, to, from } => {
                self.disk_mut(*disk)?.rekey(*node, from, to)
            }
            HistoryRecord::ChangeDir { to, .. } => {
                self.check_location(*to)?;
                self.location = Some(*to);
                Ok(())
            }
            HistoryRecord::SwitchDisk { to, .. } => {
                if let Some(to) = to {
                    self.check_location(*to)?;
                }
                self.location = *to;
                Ok(())
            }
            HistoryRecord::DeleteDisk { name, .. } => match self.store.delete(name) {
                Err(CvfsError::NotFound(_)) => {
                    tracing::warn!(disk = %name, "saved disk already gone");
                    Ok(())
                }
                other => other,
            },
            HistoryRecord::LoadDisk { name, snapshot } => self.store.save(name, snapshot),
        }
    }
}
