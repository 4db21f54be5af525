//! # History
//!
//! Undo and redo run off two stacks of [`HistoryRecord`]s. A record does not
//! describe what the user did; it describes what must be done to take that
//! action back. Creating `Doc1` pushes `Delete(Doc1)`, renaming `a` to `b`
//! pushes `Rename { from: b, to: a }`, and so on.
//!
//! ```text
//!   user action ──record(R)──▶ undo: [.., R]        redo: []
//!   undo        ──apply(R)───▶ undo: [..]           redo: [invert(R)]
//!   redo        ──apply(R')──▶ undo: [.., invert(R')] redo: [..]
//! ```
//!
//! The logger knows nothing about disks or criteria. Whatever owns that state
//! implements [`ApplyRecord`] and is passed in for each undo or redo. A
//! record is applied before either stack moves, so a failed application
//! leaves both stacks exactly as they were.

use crate::criteria::Criterion;
use crate::error::{CvfsError, Result};
use crate::model::{DiskId, Location, NodeId};
use std::fmt;

/// What an `Add` or `Delete` record acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// A node in the arena of `disk`, linked (or to be linked) under `parent`.
    Node {
        disk: DiskId,
        parent: NodeId,
        node: NodeId,
    },
    Criterion(Criterion),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryRecord {
    Add(Subject),
    Delete(Subject),
    /// Applying renames `from` back to `to`.
    Rename {
        disk: DiskId,
        node: NodeId,
        to: String,
        from: String,
    },
    ChangeDir {
        to: Location,
        from: Location,
    },
    /// `None` means "no disk yet".
    SwitchDisk {
        to: Option<Location>,
        from: Option<Location>,
    },
    /// Remove the persisted snapshot `name`.
    DeleteDisk {
        name: String,
        snapshot: Vec<u8>,
    },
    /// Write `snapshot` back to the store as `name`.
    LoadDisk {
        name: String,
        snapshot: Vec<u8>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Add,
    Delete,
    Rename,
    ChangeDir,
    SwitchDisk,
    DeleteDisk,
    LoadDisk,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Add => "ADD",
            RecordKind::Delete => "DELETE",
            RecordKind::Rename => "RENAME",
            RecordKind::ChangeDir => "CHANGE_DIR",
            RecordKind::SwitchDisk => "SWITCH_DISK",
            RecordKind::DeleteDisk => "DELETE_DISK",
            RecordKind::LoadDisk => "LOAD_DISK",
        };
        f.write_str(label)
    }
}

impl HistoryRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            HistoryRecord::Add(_) => RecordKind::Add,
            HistoryRecord::Delete(_) => RecordKind::Delete,
            HistoryRecord::Rename { .. } => RecordKind::Rename,
            HistoryRecord::ChangeDir { .. } => RecordKind::ChangeDir,
            HistoryRecord::SwitchDisk { .. } => RecordKind::SwitchDisk,
            HistoryRecord::DeleteDisk { .. } => RecordKind::DeleteDisk,
            HistoryRecord::LoadDisk { .. } => RecordKind::LoadDisk,
        }
    }

    /// The record that undoes applying `self`. An involution.
    pub fn invert(&self) -> HistoryRecord {
        match self.clone() {
            HistoryRecord::Add(subject) => HistoryRecord::Delete(subject),
            HistoryRecord::Delete(subject) => HistoryRecord::Add(subject),
            HistoryRecord::Rename { disk, node, to, from } => HistoryRecord::Rename {
                disk,
                node,
                to: from,
                from: to,
            },
            HistoryRecord::ChangeDir { to, from } => HistoryRecord::ChangeDir { to: from, from: to },
            HistoryRecord::SwitchDisk { to, from } => {
                HistoryRecord::SwitchDisk { to: from, from: to }
            }
            HistoryRecord::DeleteDisk { name, snapshot } => {
                HistoryRecord::LoadDisk { name, snapshot }
            }
            HistoryRecord::LoadDisk { name, snapshot } => {
                HistoryRecord::DeleteDisk { name, snapshot }
            }
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRecord::Add(Subject::Criterion(c)) | HistoryRecord::Delete(Subject::Criterion(c)) => {
                write!(f, "{} criterion {}", self.kind(), c.name())
            }
            HistoryRecord::Add(Subject::Node { node, .. })
            | HistoryRecord::Delete(Subject::Node { node, .. }) => {
                write!(f, "{} node #{}", self.kind(), node.0)
            }
            HistoryRecord::Rename { to, from, .. } => write!(f, "RENAME {} -> {}", from, to),
            HistoryRecord::DeleteDisk { name, .. } | HistoryRecord::LoadDisk { name, .. } => {
                write!(f, "{} {}", self.kind(), name)
            }
            HistoryRecord::ChangeDir { .. } | HistoryRecord::SwitchDisk { .. } => {
                write!(f, "{}", self.kind())
            }
        }
    }
}

/// Something that can carry out a history record against its own state.
///
/// Implementations must either apply the record completely or fail without
/// touching anything.
pub trait ApplyRecord {
    fn apply(&mut self, record: &HistoryRecord) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct HistoryLogger {
    undo: Vec<HistoryRecord>,
    redo: Vec<HistoryRecord>,
}

impl HistoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a new forward action. Anything that could be redone is dropped.
    pub fn record(&mut self, record: HistoryRecord) {
        self.undo.push(record);
        self.redo.clear();
    }

    pub fn undo(&mut self, target: &mut impl ApplyRecord) -> Result<HistoryRecord> {
        let record = self.undo.pop().ok_or(CvfsError::NothingToUndo)?;
        if let Err(e) = target.apply(&record) {
            self.undo.push(record);
            return Err(e);
        }
        self.redo.push(record.invert());
        Ok(record)
    }

    pub fn redo(&mut self, target: &mut impl ApplyRecord) -> Result<HistoryRecord> {
        let record = self.redo.pop().ok_or(CvfsError::NothingToRedo)?;
        if let Err(e) = target.apply(&record) {
            self.redo.push(record);
            return Err(e);
        }
        self.undo.push(record.invert());
        Ok(record)
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn peek_undo(&self) -> Option<&HistoryRecord> {
        self.undo.last()
    }
}
