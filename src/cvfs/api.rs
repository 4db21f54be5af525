//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for a
//! CVFS session, whatever the UI.
//!
//! The facade owns the two pieces of session state that commands borrow:
//! the [`Workspace`] (disks, location, criteria, store) and the
//! [`HistoryLogger`]. Keeping them as separate fields lets a command borrow
//! both mutably at once, and lets undo hand the workspace to the logger as
//! the target records are applied to.
//!
//! It does no business logic, no I/O and no formatting: every method returns
//! `Result<CmdResult>`.
//!
//! ## Generic Over DiskStore
//!
//! - Production: `CvfsApi<FileStore>`
//! - Testing: `CvfsApi<InMemoryStore>`

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::history::HistoryLogger;
use crate::model::DocumentType;
use crate::store::DiskStore;
use crate::workspace::Workspace;

pub struct CvfsApi<S: DiskStore> {
    workspace: Workspace<S>,
    history: HistoryLogger,
}

impl<S: DiskStore> CvfsApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            workspace: Workspace::new(store),
            history: HistoryLogger::new(),
        }
    }

    pub fn new_disk(&mut self, capacity: i64) -> Result<CmdResult> {
        commands::disk::create(&mut self.workspace, &mut self.history, capacity)
    }

    pub fn new_doc(&mut self, path: &str, doc_type: DocumentType, content: &str) -> Result<CmdResult> {
        commands::create::document(&mut self.workspace, &mut self.history, path, doc_type, content)
    }

    pub fn new_dir(&mut self, path: &str) -> Result<CmdResult> {
        commands::create::directory(&mut self.workspace, &mut self.history, path)
    }

    pub fn delete(&mut self, path: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.workspace, &mut self.history, path)
    }

    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<CmdResult> {
        commands::rename::run(&mut self.workspace, &mut self.history, path, new_name)
    }

    pub fn change_dir(&mut self, path: &str) -> Result<CmdResult> {
        commands::change_dir::run(&mut self.workspace, &mut self.history, path)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.workspace, false)
    }

    pub fn recursive_list(&self) -> Result<CmdResult> {
        commands::list::run(&self.workspace, true)
    }

    pub fn new_simple_criterion(
        &mut self,
        name: &str,
        attr: &str,
        op: &str,
        value: &str,
    ) -> Result<CmdResult> {
        commands::criteria::define_simple(&mut self.workspace, &mut self.history, name, attr, op, value)
    }

    pub fn new_negation(&mut self, name: &str, target: &str) -> Result<CmdResult> {
        commands::criteria::define_negation(&mut self.workspace, &mut self.history, name, target)
    }

    pub fn new_binary_criterion(
        &mut self,
        name: &str,
        left: &str,
        op: &str,
        right: &str,
    ) -> Result<CmdResult> {
        commands::criteria::define_binary(&mut self.workspace, &mut self.history, name, left, op, right)
    }

    pub fn print_all_criteria(&self) -> Result<CmdResult> {
        commands::criteria::print_all(&self.workspace)
    }

    pub fn search(&self, criterion: &str) -> Result<CmdResult> {
        commands::search::run(&self.workspace, criterion, false)
    }

    pub fn recursive_search(&self, criterion: &str) -> Result<CmdResult> {
        commands::search::run(&self.workspace, criterion, true)
    }

    pub fn save(&mut self, name: &str) -> Result<CmdResult> {
        commands::disk::save(&mut self.workspace, &mut self.history, name)
    }

    pub fn load(&mut self, name: &str) -> Result<CmdResult> {
        commands::disk::load(&mut self.workspace, &mut self.history, name)
    }

    pub fn undo(&mut self) -> Result<CmdResult> {
        commands::history::undo(&mut self.workspace, &mut self.history)
    }

    pub fn redo(&mut self) -> Result<CmdResult> {
        commands::history::redo(&mut self.workspace, &mut self.history)
    }

    /// Prompt path of the current directory, `None` before the first disk.
    pub fn current_path(&self) -> Option<String> {
        self.workspace.current_path()
    }

    pub fn workspace(&self) -> &Workspace<S> {
        &self.workspace
    }

    pub fn history(&self) -> &HistoryLogger {
        &self.history
    }

    pub fn store(&self) -> &S {
        self.workspace.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.workspace.store_mut()
    }
}

pub use crate::commands::{CmdMessage, ListingTotals, MessageLevel};
