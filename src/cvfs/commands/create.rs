use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::history::{HistoryLogger, HistoryRecord, Subject};
use crate::model::{DiskId, DocumentType, NodeId};
use crate::store::DiskStore;
use crate::workspace::Workspace;

/// `newDir path`: create a directory at `path`, relative to the current
/// directory.
pub fn directory<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    path: &str,
) -> Result<CmdResult> {
    let (location, disk) = ws.current_mut()?;
    let (parent, name) = disk.resolve(location.dir, path)?;
    let id = disk.create_directory(parent, &name)?;
    record_creation(history, location.disk, parent, id);
    tracing::debug!(name = %name, "created directory");

    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Directory {} created",
        name
    ))))
}

/// `newDoc path type content`
pub fn document<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    path: &str,
    doc_type: DocumentType,
    content: &str,
) -> Result<CmdResult> {
    let (location, disk) = ws.current_mut()?;
    let (parent, name) = disk.resolve(location.dir, path)?;
    let id = disk.create_document(parent, &name, doc_type, content)?;
    let size = disk.node(id).map(|n| n.size()).unwrap_or_default();
    record_creation(history, location.disk, parent, id);
    tracing::debug!(name = %name, %doc_type, size, "created document");

    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Document {}.{} created, size: {}",
        name, doc_type, size
    ))))
}

fn record_creation(
    history: &mut HistoryLogger,
    disk: DiskId,
    parent: NodeId,
    node: NodeId,
) {
    history.record(HistoryRecord::Delete(Subject::Node { disk, parent, node }));
}
