use crate::commands::list::EMPTY_DIRECTORY;
use crate::commands::{CmdMessage, CmdResult};
use crate::disk::{Listing, NodeSummary};
use crate::error::Result;
use crate::store::DiskStore;
use crate::workspace::Workspace;

/// `search name` / `rSearch name`: the listing of the current directory,
/// filtered through a registered criterion.
pub fn run<S: DiskStore>(ws: &Workspace<S>, criterion: &str, recursive: bool) -> Result<CmdResult> {
    let (location, disk) = ws.current()?;
    let criterion = ws.criteria().get(criterion)?;
    let listing = if recursive {
        disk.recursive_search(location.dir, criterion)?
    } else {
        disk.search(location.dir, criterion)?
    };

    let Listing::Entries(matches) = listing else {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(EMPTY_DIRECTORY)));
    };
    let nodes: Vec<NodeSummary> = matches.collect();
    let message = if nodes.is_empty() {
        CmdMessage::warning(format!("Nothing matches {}", criterion.name()))
    } else {
        CmdMessage::info(format!("{} entries match {}", nodes.len(), criterion.name()))
    };

    Ok(CmdResult::default()
        .with_listed_nodes(nodes)
        .with_message(message))
}
