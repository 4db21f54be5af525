use crate::commands::{CmdMessage, CmdResult, ListingTotals};
use crate::disk::{Listing, NodeSummary};
use crate::error::Result;
use crate::store::DiskStore;
use crate::workspace::Workspace;

pub const EMPTY_DIRECTORY: &str = "No files/folders in the current directory";

/// `list` (shallow) or `rList` (recursive, pre-order) of the current
/// directory.
pub fn run<S: DiskStore>(ws: &Workspace<S>, recursive: bool) -> Result<CmdResult> {
    let (location, disk) = ws.current()?;
    let listing = if recursive {
        disk.recursive_list(location.dir)?
    } else {
        disk.list(location.dir)?
    };

    let Listing::Entries(entries) = listing else {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(EMPTY_DIRECTORY)));
    };
    let nodes: Vec<NodeSummary> = entries.collect();
    let totals = totals_of(&nodes);

    Ok(CmdResult::default()
        .with_listed_nodes(nodes)
        .with_totals(totals))
}

/// Deeper entries are already counted in their top-level ancestor's size.
fn totals_of(nodes: &[NodeSummary]) -> ListingTotals {
    ListingTotals {
        entries: nodes.len(),
        size: nodes.iter().filter(|n| n.depth == 0).map(|n| n.size).sum(),
    }
}
