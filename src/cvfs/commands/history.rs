use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::history::HistoryLogger;
use crate::store::DiskStore;
use crate::workspace::Workspace;

pub fn undo<S: DiskStore>(ws: &mut Workspace<S>, history: &mut HistoryLogger) -> Result<CmdResult> {
    let record = history.undo(ws)?;
    tracing::debug!(record = %record, "undone");
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("Undo: {}", record.kind()))))
}

pub fn redo<S: DiskStore>(ws: &mut Workspace<S>, history: &mut HistoryLogger) -> Result<CmdResult> {
    let record = history.redo(ws)?;
    tracing::debug!(record = %record, "redone");
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("Redo: {}", record.kind()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::SessionFixture;
    use crate::commands::{change_dir, create, criteria, delete, disk, rename};
    use crate::error::CvfsError;
    use crate::model::{DocumentType, SIZE_PREFIX};

    #[test]
    fn delete_undo_redo() {
        let mut fx = SessionFixture::default()
            .with_dir("Dir1")
            .with_doc("Dir1:Doc1", "txt", "ab");
        delete::run(&mut fx.ws, &mut fx.history, "Dir1:Doc1").unwrap();
        assert_eq!(fx.size_of("Dir1"), SIZE_PREFIX);

        undo(&mut fx.ws, &mut fx.history).unwrap();
        assert_eq!(fx.size_of("Dir1:Doc1"), 42);
        assert_eq!(fx.size_of("Dir1"), 82);

        redo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(!fx.exists("Dir1:Doc1"));
        assert_eq!(fx.size_of("Dir1"), SIZE_PREFIX);
        assert_eq!(fx.history.redo_len(), 0);
    }

    #[test]
    fn rename_undo_redo() {
        let mut fx = SessionFixture::default().with_doc("Doc1", "txt", "");
        rename::run(&mut fx.ws, &mut fx.history, "Doc1", "File1").unwrap();
        undo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(fx.exists("Doc1"));
        assert!(!fx.exists("File1"));
        redo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(fx.exists("File1"));
    }

    #[test]
    fn change_dir_undo_returns_to_previous() {
        let mut fx = SessionFixture::default().with_dir("A");
        change_dir::run(&mut fx.ws, &mut fx.history, "A").unwrap();
        undo(&mut fx.ws, &mut fx.history).unwrap();
        assert_eq!(fx.ws.current_path().as_deref(), Some("$"));
        redo(&mut fx.ws, &mut fx.history).unwrap();
        assert_eq!(fx.ws.current_path().as_deref(), Some("$:A"));
    }

    #[test]
    fn criterion_undo_redo() {
        let mut fx = SessionFixture::default();
        criteria::define_simple(&mut fx.ws, &mut fx.history, "ab", "size", ">", "1").unwrap();
        undo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(!fx.ws.criteria().contains("ab"));
        redo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(fx.ws.criteria().contains("ab"));
    }

    #[test]
    fn new_disk_undo_switches_back() {
        let mut fx = SessionFixture::default().with_dir("Keep");
        disk::create(&mut fx.ws, &mut fx.history, 10).unwrap();
        assert!(!fx.exists("Keep"));
        undo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(fx.exists("Keep"));
    }

    #[test]
    fn first_disk_undo_leaves_no_disk() {
        let mut fx = SessionFixture::default();
        undo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(matches!(fx.ws.current(), Err(CvfsError::NoDisk)));
        redo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(fx.ws.current().is_ok());
    }

    #[test]
    fn save_undo_removes_snapshot_and_redo_restores_it() {
        let mut fx = SessionFixture::default().with_dir("Dir1");
        disk::save(&mut fx.ws, &mut fx.history, "work").unwrap();
        undo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(!fx.ws.store().exists("work"));
        redo(&mut fx.ws, &mut fx.history).unwrap();
        assert!(fx.ws.store().exists("work"));
    }

    #[test]
    fn failed_undo_keeps_stacks() {
        let mut fx = SessionFixture::default();
        disk::save(&mut fx.ws, &mut fx.history, "work").unwrap();
        fx.ws.store_mut().set_simulate_write_error(true);
        let (undo_len, redo_len) = (fx.history.undo_len(), fx.history.redo_len());
        assert!(matches!(
            undo(&mut fx.ws, &mut fx.history),
            Err(CvfsError::PersistenceIo(_))
        ));
        assert_eq!(fx.history.undo_len(), undo_len);
        assert_eq!(fx.history.redo_len(), redo_len);
        assert!(fx.ws.store().exists("work"));
    }

    #[test]
    fn forward_action_clears_redo() {
        let mut fx = SessionFixture::default();
        create::directory(&mut fx.ws, &mut fx.history, "A").unwrap();
        undo(&mut fx.ws, &mut fx.history).unwrap();
        assert_eq!(fx.history.redo_len(), 1);
        create::document(&mut fx.ws, &mut fx.history, "B", DocumentType::Txt, "").unwrap();
        assert_eq!(fx.history.redo_len(), 0);
        assert!(matches!(
            redo(&mut fx.ws, &mut fx.history),
            Err(CvfsError::NothingToRedo)
        ));
    }

    #[test]
    fn nothing_to_undo_on_fresh_session() {
        let mut fx = SessionFixture::empty();
        assert!(matches!(
            undo(&mut fx.ws, &mut fx.history),
            Err(CvfsError::NothingToUndo)
        ));
    }
}
