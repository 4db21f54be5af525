use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::history::{HistoryLogger, HistoryRecord};
use crate::model::Location;
use crate::store::DiskStore;
use crate::workspace::Workspace;

/// `changeDir path` or `changeDir ..`
pub fn run<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    path: &str,
) -> Result<CmdResult> {
    let (here, disk) = ws.current()?;
    let target = disk.change_directory(here.dir, path)?;
    let shown = disk.path_of(target);
    let there = Location::new(here.disk, target);

    ws.set_location(Some(there));
    history.record(HistoryRecord::ChangeDir {
        to: here,
        from: there,
    });
    tracing::debug!(path = %shown, "changed directory");

    Ok(CmdResult::default().with_message(CmdMessage::info(format!("Now in {}", shown))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::SessionFixture;
    use crate::error::CvfsError;

    #[test]
    fn walks_down_and_up() {
        let mut fx = SessionFixture::default().with_dir("A").with_dir("A:B");
        run(&mut fx.ws, &mut fx.history, "$:A:B").unwrap();
        assert_eq!(fx.ws.current_path().as_deref(), Some("$:A:B"));

        run(&mut fx.ws, &mut fx.history, "..").unwrap();
        assert_eq!(fx.ws.current_path().as_deref(), Some("$:A"));

        // paths are now relative to A
        run(&mut fx.ws, &mut fx.history, "B").unwrap();
        assert_eq!(fx.ws.current_path().as_deref(), Some("$:A:B"));
    }

    #[test]
    fn at_root_and_bad_targets_fail() {
        let mut fx = SessionFixture::default().with_doc("Doc1", "txt", "");
        let depth = fx.history.undo_len();
        assert!(matches!(
            run(&mut fx.ws, &mut fx.history, ".."),
            Err(CvfsError::AtRoot)
        ));
        assert!(matches!(
            run(&mut fx.ws, &mut fx.history, "Doc1"),
            Err(CvfsError::InvalidPath(_))
        ));
        assert_eq!(fx.history.undo_len(), depth);
        assert_eq!(fx.ws.current_path().as_deref(), Some("$"));
    }
}
