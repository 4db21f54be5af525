use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Renamed;
use crate::error::Result;
use crate::history::{HistoryLogger, HistoryRecord};
use crate::store::DiskStore;
use crate::workspace::Workspace;

/// `rename path newName`. Renaming to the current name succeeds with a
/// warning and records nothing.
pub fn run<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    path: &str,
    new_name: &str,
) -> Result<CmdResult> {
    let (location, disk) = ws.current_mut()?;
    let (parent, old_name) = disk.resolve(location.dir, path)?;

    match disk.rename(parent, &old_name, new_name)? {
        Renamed::Unchanged => {
            tracing::warn!(name = %old_name, "rename to the same name");
            Ok(CmdResult::default().with_message(CmdMessage::warning(
                "The new name is the same as the old one, nothing changed",
            )))
        }
        Renamed::Changed(node) => {
            history.record(HistoryRecord::Rename {
                disk: location.disk,
                node,
                to: old_name.clone(),
                from: new_name.to_string(),
            });
            tracing::debug!(from = %old_name, to = new_name, "renamed");
            Ok(CmdResult::default().with_message(CmdMessage::success(format!(
                "{} renamed to {}",
                old_name, new_name
            ))))
        }
    }
}
