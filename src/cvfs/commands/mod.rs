//! # Commands
//!
//! One module per user-facing operation. Each takes the session state it
//! needs (a [`Workspace`](crate::workspace::Workspace), and the
//! [`HistoryLogger`](crate::history::HistoryLogger) when it mutates) and
//! returns a [`CmdResult`]: structured data plus messages for the user.
//!
//! Mutating commands record exactly one history entry, and only after the
//! mutation succeeded.

use crate::criteria::Criterion;
use crate::disk::NodeSummary;

pub mod change_dir;
pub mod create;
pub mod criteria;
pub mod delete;
pub mod disk;
pub mod history;
pub mod list;
pub mod rename;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Count and summed size of the top-level entries of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingTotals {
    pub entries: usize,
    pub size: i64,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_nodes: Vec<NodeSummary>,
    pub listed_criteria: Vec<Criterion>,
    pub totals: Option<ListingTotals>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_nodes(mut self, nodes: Vec<NodeSummary>) -> Self {
        self.listed_nodes = nodes;
        self
    }

    pub fn with_listed_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.listed_criteria = criteria;
        self
    }

    pub fn with_totals(mut self, totals: ListingTotals) -> Self {
        self.totals = Some(totals);
        self
    }

    pub fn has_warning(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::history::HistoryLogger;
    use crate::store::memory::InMemoryStore;
    use crate::workspace::Workspace;

    /// A workspace on an in-memory store with one empty disk open.
    pub struct SessionFixture {
        pub ws: Workspace<InMemoryStore>,
        pub history: HistoryLogger,
    }

    impl Default for SessionFixture {
        fn default() -> Self {
            Self::new(1000)
        }
    }

    impl SessionFixture {
        pub fn new(capacity: i64) -> Self {
            let mut fx = Self::empty();
            super::disk::create(&mut fx.ws, &mut fx.history, capacity).unwrap();
            fx
        }

        /// No disk yet.
        pub fn empty() -> Self {
            Self {
                ws: Workspace::new(InMemoryStore::new()),
                history: HistoryLogger::new(),
            }
        }

        pub fn with_dir(mut self, path: &str) -> Self {
            super::create::directory(&mut self.ws, &mut self.history, path).unwrap();
            self
        }

        pub fn with_doc(mut self, path: &str, doc_type: &str, content: &str) -> Self {
            let doc_type = doc_type.parse().unwrap();
            super::create::document(&mut self.ws, &mut self.history, path, doc_type, content)
                .unwrap();
            self
        }

        /// Size of the node at `path`, resolved from the current directory.
        pub fn size_of(&self, path: &str) -> i64 {
            let (location, disk) = self.ws.current().unwrap();
            let (parent, name) = disk.resolve(location.dir, path).unwrap();
            let id = disk.child(parent, &name).unwrap();
            disk.node(id).unwrap().size()
        }

        pub fn exists(&self, path: &str) -> bool {
            let (location, disk) = self.ws.current().unwrap();
            disk.resolve(location.dir, path)
                .ok()
                .and_then(|(parent, name)| disk.child(parent, &name))
                .is_some()
        }

        pub fn root_size(&self) -> i64 {
            self.ws.current().unwrap().1.size()
        }
    }
}
