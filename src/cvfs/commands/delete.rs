use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::history::{HistoryLogger, HistoryRecord, Subject};
use crate::store::DiskStore;
use crate::workspace::Workspace;

/// `delete path`: unlink a document or a whole directory.
pub fn run<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    path: &str,
) -> Result<CmdResult> {
    let (location, disk) = ws.current_mut()?;
    let (parent, name) = disk.resolve(location.dir, path)?;
    let node = disk.delete(parent, &name)?;
    history.record(HistoryRecord::Add(Subject::Node {
        disk: location.disk,
        parent,
        node,
    }));
    tracing::debug!(name = %name, "deleted");

    Ok(CmdResult::default().with_message(CmdMessage::success(format!("{} deleted", name))))
}
