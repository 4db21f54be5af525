//! Core data types: nodes, document types and the ids that address them.
//!
//! Nodes never own their parent. A [`Node`] lives in the arena of its
//! [`Disk`](crate::disk::Disk) and points upward with an `Option<NodeId>`;
//! directories point downward through a name-keyed catalog of ids.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed overhead charged to every node, directory or document.
pub const SIZE_PREFIX: i64 = 40;

/// Longest permitted node name.
pub const MAX_NAME_LEN: usize = 10;

/// Index of a node inside its disk's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Index of a disk inside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiskId(pub usize);

/// A directory on a specific disk. The session's "where am I".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub disk: DiskId,
    pub dir: NodeId,
}

impl Location {
    pub fn new(disk: DiskId, dir: NodeId) -> Self {
        Self { disk, dir }
    }
}

/// Only ASCII letters and digits, 1 to 10 characters.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_NAME_LEN && name.chars().all(|c| c.is_ascii_alphanumeric())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Txt,
    Java,
    Html,
    Css,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Txt,
        DocumentType::Java,
        DocumentType::Html,
        DocumentType::Css,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentType::Txt => "txt",
            DocumentType::Java => "java",
            DocumentType::Html => "html",
            DocumentType::Css => "css",
        }
    }

    /// Case-insensitive check against the known extensions.
    pub fn is_known(extension: &str) -> bool {
        extension.parse::<DocumentType>().is_ok()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.extension().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid document type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Directory {
        catalog: BTreeMap<String, NodeId>,
    },
    Document {
        doc_type: DocumentType,
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    size: i64,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub(crate) fn directory(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            size: SIZE_PREFIX,
            parent,
            kind: NodeKind::Directory {
                catalog: BTreeMap::new(),
            },
        }
    }

    pub(crate) fn document(
        name: String,
        parent: Option<NodeId>,
        doc_type: DocumentType,
        content: String,
    ) -> Self {
        let size = SIZE_PREFIX + content.chars().count() as i64;
        Self {
            name,
            size,
            parent,
            kind: NodeKind::Document { doc_type, content },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn is_document(&self) -> bool {
        matches!(self.kind, NodeKind::Document { .. })
    }

    pub fn doc_type(&self) -> Option<DocumentType> {
        match &self.kind {
            NodeKind::Document { doc_type, .. } => Some(*doc_type),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Document { content, .. } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn catalog(&self) -> Option<&BTreeMap<String, NodeId>> {
        match &self.kind {
            NodeKind::Directory { catalog } => Some(catalog),
            NodeKind::Document { .. } => None,
        }
    }

    pub(crate) fn catalog_mut(&mut self) -> Option<&mut BTreeMap<String, NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { catalog } => Some(catalog),
            NodeKind::Document { .. } => None,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn add_size(&mut self, delta: i64) {
        self.size += delta;
    }

    /// Copy of this node with an empty catalog, for rebuilding arenas.
    pub(crate) fn detached_copy(&self, parent: Option<NodeId>) -> Self {
        let kind = match &self.kind {
            NodeKind::Directory { .. } => NodeKind::Directory {
                catalog: BTreeMap::new(),
            },
            doc @ NodeKind::Document { .. } => doc.clone(),
        };
        Self {
            name: self.name.clone(),
            size: self.size,
            parent,
            kind,
        }
    }
}
