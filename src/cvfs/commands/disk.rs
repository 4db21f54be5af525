use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Disk;
use crate::error::{CvfsError, Result};
use crate::history::{HistoryLogger, HistoryRecord};
use crate::model::{is_valid_name, Location, NodeId};
use crate::store::{restore, snapshot, DiskStore};
use crate::workspace::Workspace;

/// Create an empty disk and make its root the current directory.
pub fn create<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    capacity: i64,
) -> Result<CmdResult> {
    let disk = Disk::new(capacity);
    let root = disk.root();
    switch_to(ws, history, disk, root);
    tracing::debug!(capacity, "created disk");

    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "New disk created, size: {}",
        capacity
    ))))
}

/// Persist the current disk under `name`.
pub fn save<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    name: &str,
) -> Result<CmdResult> {
    if !is_valid_name(name) {
        return Err(CvfsError::InvalidName(name.to_string()));
    }
    let (_, disk) = ws.current()?;
    let blob = snapshot(disk)?;
    ws.store_mut().save(name, &blob)?;
    history.record(HistoryRecord::DeleteDisk {
        name: name.to_string(),
        snapshot: blob,
    });
    tracing::debug!(disk = name, "saved current disk");

    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Current disk saved as {}",
        name
    ))))
}

/// Open a saved disk as a new session disk and move to its root.
pub fn load<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    name: &str,
) -> Result<CmdResult> {
    let blob = ws.store().load(name)?;
    let disk = restore(&blob)?;
    let root = disk.root();
    switch_to(ws, history, disk, root);
    tracing::debug!(disk = name, "loaded disk");

    Ok(CmdResult::default().with_message(CmdMessage::success(format!("Disk {} loaded", name))))
}

fn switch_to<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    disk: Disk,
    root: NodeId,
) {
    let previous = ws.location();
    let id = ws.add_disk(disk);
    let next = Location::new(id, root);
    ws.set_location(Some(next));
    history.record(HistoryRecord::SwitchDisk {
        to: previous,
        from: Some(next),
    });
}
