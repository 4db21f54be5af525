//! # Node Tree
//!
//! A [`Disk`] is the root directory of a tree plus the arena that stores
//! every node it has ever held. Nodes are addressed by [`NodeId`].
//!
//! ## Size Propagation
//!
//! Every directory's size is `SIZE_PREFIX + Σ child.size`. The invariant is
//! kept incrementally: each insertion or removal applies one signed delta
//! through `Disk::update_size_by`, which walks the parent chain up to the
//! root. Nothing ever rescans a subtree to recompute a size, except
//! [`Disk::is_consistent`], which exists to audit the invariant.
//!
//! ## Detached Nodes
//!
//! Deleting a node unlinks it from its parent's catalog but leaves it in the
//! arena. The history log holds its id and can re-attach exactly the same
//! node (and its whole subtree) on undo. Detached nodes are invisible to
//! every traversal and are dropped by [`Disk::compacted`].
//!
//! ## Paths
//!
//! Paths are colon separated and always relative to a directory:
//! `$:Dir1:Doc1` where `$` stands for that directory. Every token but the
//! last must name a directory; the last token is returned unresolved so
//! callers can create, delete or rename it.

use crate::criteria::Criterion;
use crate::error::{CvfsError, Result};
use crate::model::{is_valid_name, DocumentType, Node, NodeId, SIZE_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PATH_SEPARATOR: char = ':';
pub const CURRENT_DIR: &str = "$";
pub const PARENT_DIR: &str = "..";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    capacity: i64,
    root: NodeId,
    nodes: Vec<Node>,
}

/// Outcome of a rename that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renamed {
    Changed(NodeId),
    /// Old and new names were equal. Nothing was touched.
    Unchanged,
}

/// What a listing yields for each visited node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSummary {
    pub id: NodeId,
    pub name: String,
    pub doc_type: Option<DocumentType>,
    pub size: i64,
    /// 0 for direct children of the listed directory.
    pub depth: usize,
}

/// Result of a list or search: an empty directory is not an error, but it
/// is reported as such rather than as an iterator that yields nothing.
pub enum Listing<I> {
    Empty,
    Entries(I),
}

impl Disk {
    pub fn new(capacity: i64) -> Self {
        Self {
            capacity,
            root: NodeId(0),
            nodes: vec![Node::directory(String::new(), None)],
        }
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn size(&self) -> i64 {
        self.nodes[self.root.0].size()
    }

    fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| CvfsError::NotFound(format!("node #{}", id.0)))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| CvfsError::NotFound(format!("node #{}", id.0)))
    }

    fn catalog(&self, dir: NodeId) -> Result<&BTreeMap<String, NodeId>> {
        let node = self.get(dir)?;
        node.catalog()
            .ok_or_else(|| CvfsError::InvalidPath(format!("{} is not a directory", node.name())))
    }

    fn catalog_mut(&mut self, dir: NodeId) -> Result<&mut BTreeMap<String, NodeId>> {
        let node = self.get_mut(dir)?;
        if !node.is_directory() {
            return Err(CvfsError::InvalidPath(format!(
                "{} is not a directory",
                node.name()
            )));
        }
        node.catalog_mut()
            .ok_or_else(|| CvfsError::InvalidPath("not a directory".to_string()))
    }

    /// Look up a direct child by name.
    pub fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.catalog(dir).ok()?.get(name).copied()
    }

    pub fn summary(&self, id: NodeId) -> Result<NodeSummary> {
        let node = self.get(id)?;
        Ok(NodeSummary {
            id,
            name: node.name().to_string(),
            doc_type: node.doc_type(),
            size: node.size(),
            depth: 0,
        })
    }

    // --- Mutation ---

    pub fn create_directory(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.insert(parent, Node::directory(name.to_string(), Some(parent)))
    }

    pub fn create_document(
        &mut self,
        parent: NodeId,
        name: &str,
        doc_type: DocumentType,
        content: &str,
    ) -> Result<NodeId> {
        self.insert(
            parent,
            Node::document(name.to_string(), Some(parent), doc_type, content.to_string()),
        )
    }

    fn insert(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !is_valid_name(node.name()) {
            return Err(CvfsError::InvalidName(node.name().to_string()));
        }
        if self.catalog(parent)?.contains_key(node.name()) {
            return Err(CvfsError::NameConflict(node.name().to_string()));
        }

        let id = NodeId(self.nodes.len());
        let name = node.name().to_string();
        let size = node.size();
        self.nodes.push(node);
        self.catalog_mut(parent)?.insert(name, id);
        self.update_size_by(parent, size);
        Ok(id)
    }

    /// Unlink `name` from `parent`. The removed subtree stays in the arena.
    pub fn delete(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        let id = self
            .child(parent, name)
            .ok_or_else(|| CvfsError::NotFound(format!("{} in this directory", name)))?;
        self.detach(parent, id)?;
        Ok(id)
    }

    pub fn rename(&mut self, parent: NodeId, old_name: &str, new_name: &str) -> Result<Renamed> {
        let id = self
            .child(parent, old_name)
            .ok_or_else(|| CvfsError::NotFound(format!("{} in this directory", old_name)))?;
        if old_name == new_name {
            return Ok(Renamed::Unchanged);
        }
        if !is_valid_name(new_name) {
            return Err(CvfsError::InvalidName(new_name.to_string()));
        }
        if self.catalog(parent)?.contains_key(new_name) {
            return Err(CvfsError::NameConflict(new_name.to_string()));
        }
        self.rekey(id, old_name, new_name)?;
        Ok(Renamed::Changed(id))
    }

    /// Link an arena node back under `parent`, re-adding its size.
    pub(crate) fn attach(&mut self, parent: NodeId, id: NodeId) -> Result<()> {
        let name = self.get(id)?.name().to_string();
        if self.catalog(parent)?.contains_key(&name) {
            return Err(CvfsError::NameConflict(name));
        }
        let size = self.get(id)?.size();
        self.catalog_mut(parent)?.insert(name, id);
        self.get_mut(id)?.set_parent(Some(parent));
        self.update_size_by(parent, size);
        Ok(())
    }

    /// Unlink an arena node from `parent`, subtracting its size.
    pub(crate) fn detach(&mut self, parent: NodeId, id: NodeId) -> Result<()> {
        let name = self.get(id)?.name().to_string();
        if self.catalog(parent)?.get(&name) != Some(&id) {
            return Err(CvfsError::NotFound(format!("{} in this directory", name)));
        }
        let size = self.get(id)?.size();
        self.catalog_mut(parent)?.remove(&name);
        self.get_mut(id)?.set_parent(None);
        self.update_size_by(parent, -size);
        Ok(())
    }

    /// Move a node's catalog entry from `from` to `to` and rename the node.
    pub(crate) fn rekey(&mut self, id: NodeId, from: &str, to: &str) -> Result<()> {
        let parent = self
            .get(id)?
            .parent()
            .ok_or_else(|| CvfsError::NotFound(format!("parent of {}", from)))?;
        if self.catalog(parent)?.get(from) != Some(&id) {
            return Err(CvfsError::NotFound(format!("{} in this directory", from)));
        }
        if self.catalog(parent)?.contains_key(to) {
            return Err(CvfsError::NameConflict(to.to_string()));
        }
        let catalog = self.catalog_mut(parent)?;
        catalog.remove(from);
        catalog.insert(to.to_string(), id);
        self.get_mut(id)?.set_name(to.to_string());
        Ok(())
    }

    /// The only place sizes change: apply `delta` to `id` and every ancestor.
    pub(crate) fn update_size_by(&mut self, id: NodeId, delta: i64) {
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(node) = self.nodes.get_mut(cur.0) else {
                break;
            };
            node.add_size(delta);
            current = node.parent();
        }
    }

    // --- Paths ---

    /// Resolve every token of `path` but the last, starting at `cwd`.
    ///
    /// Returns the directory the last token lives in, and the last token.
    pub fn resolve(&self, cwd: NodeId, path: &str) -> Result<(NodeId, String)> {
        let tokens: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        let Some((last, walk)) = tokens.split_last() else {
            return Err(CvfsError::InvalidPath(path.to_string()));
        };

        let mut current = cwd;
        for (i, token) in walk.iter().enumerate() {
            if i == 0 && *token == CURRENT_DIR {
                continue;
            }
            current = self
                .child(current, token)
                .filter(|id| self.nodes[id.0].is_directory())
                .ok_or_else(|| CvfsError::InvalidPath(path.to_string()))?;
        }

        if last.is_empty() {
            return Err(CvfsError::InvalidPath(path.to_string()));
        }
        Ok((current, last.to_string()))
    }

    /// Where `changeDir path` would land, starting from `cwd`.
    pub fn change_directory(&self, cwd: NodeId, path: &str) -> Result<NodeId> {
        if path == PARENT_DIR {
            return self.get(cwd)?.parent().ok_or(CvfsError::AtRoot);
        }
        let (parent, name) = self.resolve(cwd, path)?;
        let target = self
            .child(parent, &name)
            .ok_or_else(|| CvfsError::InvalidPath(path.to_string()))?;
        if !self.get(target)?.is_directory() {
            return Err(CvfsError::InvalidPath(format!("{} is not a directory", name)));
        }
        Ok(target)
    }

    /// `$` for the root, `$:Dir1:Sub` below it.
    pub fn path_of(&self, dir: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(dir);
        while let Some(cur) = current {
            let Some(node) = self.node(cur) else {
                break;
            };
            if node.parent().is_some() {
                names.push(node.name());
            }
            current = node.parent();
        }
        names.push(CURRENT_DIR);
        names.reverse();
        let separator = PATH_SEPARATOR.to_string();
        names.join(separator.as_str())
    }

    // --- Traversal ---

    pub fn list(&self, dir: NodeId) -> Result<Listing<Entries<'_>>> {
        self.entries(dir, false)
    }

    pub fn recursive_list(&self, dir: NodeId) -> Result<Listing<Entries<'_>>> {
        self.entries(dir, true)
    }

    pub fn search<'a>(
        &'a self,
        dir: NodeId,
        criterion: &'a Criterion,
    ) -> Result<Listing<Matches<'a>>> {
        Ok(match self.entries(dir, false)? {
            Listing::Empty => Listing::Empty,
            Listing::Entries(entries) => Listing::Entries(Matches { entries, criterion }),
        })
    }

    pub fn recursive_search<'a>(
        &'a self,
        dir: NodeId,
        criterion: &'a Criterion,
    ) -> Result<Listing<Matches<'a>>> {
        Ok(match self.entries(dir, true)? {
            Listing::Empty => Listing::Empty,
            Listing::Entries(entries) => Listing::Entries(Matches { entries, criterion }),
        })
    }

    fn entries(&self, dir: NodeId, recursive: bool) -> Result<Listing<Entries<'_>>> {
        let catalog = self.catalog(dir)?;
        if catalog.is_empty() {
            return Ok(Listing::Empty);
        }
        let mut stack = Vec::with_capacity(catalog.len());
        stack.extend(catalog.values().rev().map(|id| (*id, 0)));
        Ok(Listing::Entries(Entries {
            disk: self,
            stack,
            recursive,
        }))
    }

    // --- Audit & snapshots ---

    /// Re-derive every reachable directory size and compare. The root must
    /// be a parentless directory.
    pub fn is_consistent(&self) -> bool {
        match self.node(self.root) {
            Some(root) if root.is_directory() && root.parent().is_none() => {
                self.consistent_size(self.root).is_some()
            }
            _ => false,
        }
    }

    fn consistent_size(&self, id: NodeId) -> Option<i64> {
        let node = self.node(id)?;
        match node.catalog() {
            None => Some(node.size()),
            Some(catalog) => {
                let mut expected = SIZE_PREFIX;
                for (name, child) in catalog {
                    let child_node = self.node(*child)?;
                    if child_node.name() != name || child_node.parent() != Some(id) {
                        return None;
                    }
                    expected += self.consistent_size(*child)?;
                }
                (expected == node.size()).then_some(expected)
            }
        }
    }

    /// A copy holding only the nodes reachable from the root.
    pub fn compacted(&self) -> Disk {
        let mut out = Disk {
            capacity: self.capacity,
            root: NodeId(0),
            nodes: vec![self.nodes[self.root.0].detached_copy(None)],
        };
        let root = out.root;
        self.copy_children(self.root, &mut out, root);
        out
    }

    fn copy_children(&self, from: NodeId, out: &mut Disk, to: NodeId) {
        let Some(catalog) = self.node(from).and_then(Node::catalog) else {
            return;
        };
        for (name, child) in catalog {
            let node = &self.nodes[child.0];
            let new_id = NodeId(out.nodes.len());
            out.nodes.push(node.detached_copy(Some(to)));
            if let Some(target) = out.nodes[to.0].catalog_mut() {
                target.insert(name.clone(), new_id);
            }
            if node.is_directory() {
                self.copy_children(*child, out, new_id);
            }
        }
    }
}

/// Lazy pre-order walk over a directory. Consumed once; not restartable.
pub struct Entries<'a> {
    disk: &'a Disk,
    stack: Vec<(NodeId, usize)>,
    recursive: bool,
}

impl Iterator for Entries<'_> {
    type Item = NodeSummary;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let node = self.disk.node(id)?;
        if self.recursive {
            if let Some(catalog) = node.catalog() {
                self.stack
                    .extend(catalog.values().rev().map(|child| (*child, depth + 1)));
            }
        }
        Some(NodeSummary {
            id,
            name: node.name().to_string(),
            doc_type: node.doc_type(),
            size: node.size(),
            depth,
        })
    }
}

/// [`Entries`] filtered through a criterion.
pub struct Matches<'a> {
    entries: Entries<'a>,
    criterion: &'a Criterion,
}

impl Iterator for Matches<'_> {
    type Item = NodeSummary;

    fn next(&mut self) -> Option<Self::Item> {
        let disk = self.entries.disk;
        let criterion = self.criterion;
        self.entries.by_ref().find(|summary| {
            disk.node(summary.id)
                .map(|node| criterion.matches(node))
                .unwrap_or(false)
        })
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Builds small trees for tests, addressed by path from the root.
    pub struct DiskFixture {
        pub disk: Disk,
    }

    impl Default for DiskFixture {
        fn default() -> Self {
            Self::new(1000)
        }
    }

    impl DiskFixture {
        pub fn new(capacity: i64) -> Self {
            Self {
                disk: Disk::new(capacity),
            }
        }

        pub fn with_dir(mut self, path: &str) -> Self {
            let (parent, name) = self.disk.resolve(self.disk.root(), path).unwrap();
            self.disk.create_directory(parent, &name).unwrap();
            self
        }

        pub fn with_doc(mut self, path: &str, doc_type: DocumentType, content: &str) -> Self {
            let (parent, name) = self.disk.resolve(self.disk.root(), path).unwrap();
            self.disk
                .create_document(parent, &name, doc_type, content)
                .unwrap();
            self
        }

        pub fn id(&self, path: &str) -> NodeId {
            let (parent, name) = self.disk.resolve(self.disk.root(), path).unwrap();
            self.disk.child(parent, &name).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::DiskFixture;
    use super::*;
    use crate::criteria::CriteriaRegistry;

    fn size_of(disk: &Disk, id: NodeId) -> i64 {
        disk.node(id).unwrap().size()
    }

    #[test]
    fn sizes_propagate_on_create() {
        let fx = DiskFixture::new(1000)
            .with_dir("Dir1")
            .with_doc("Dir1:Doc1", DocumentType::Txt, "ab");
        let disk = &fx.disk;
        let dir = fx.id("Dir1");
        let doc = fx.id("Dir1:Doc1");

        assert_eq!(size_of(disk, doc), SIZE_PREFIX + 2);
        assert_eq!(size_of(disk, dir), SIZE_PREFIX + size_of(disk, doc));
        assert_eq!(disk.size(), SIZE_PREFIX + size_of(disk, dir));
        assert_eq!(disk.capacity(), 1000);
        assert!(disk.is_consistent());
    }

    #[test]
    fn create_rejects_bad_and_duplicate_names() {
        let mut disk = Disk::new(100);
        let root = disk.root();
        disk.create_directory(root, "Dir1").unwrap();

        assert!(matches!(
            disk.create_directory(root, "Dir1"),
            Err(CvfsError::NameConflict(_))
        ));
        assert!(matches!(
            disk.create_document(root, "Dir1", DocumentType::Txt, ""),
            Err(CvfsError::NameConflict(_))
        ));
        assert!(matches!(
            disk.create_directory(root, "no_way"),
            Err(CvfsError::InvalidName(_))
        ));
        assert!(matches!(
            disk.create_directory(root, "waytoolongname"),
            Err(CvfsError::InvalidName(_))
        ));
        assert!(disk.is_consistent());
    }

    #[test]
    fn delete_subtracts_whole_subtree() {
        let mut fx = DiskFixture::default()
            .with_dir("A")
            .with_dir("A:B")
            .with_doc("A:B:Doc", DocumentType::Java, "hello");
        let root = fx.disk.root();

        let removed = fx.disk.delete(root, "A").unwrap();
        assert_eq!(fx.disk.size(), SIZE_PREFIX);
        assert!(fx.disk.child(root, "A").is_none());
        // the subtree itself is untouched
        assert_eq!(size_of(&fx.disk, removed), 3 * SIZE_PREFIX + 5);
        assert!(fx.disk.is_consistent());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut disk = Disk::new(10);
        let root = disk.root();
        assert!(matches!(
            disk.delete(root, "Ghost"),
            Err(CvfsError::NotFound(_))
        ));
    }

    #[test]
    fn rename_rekeys_catalog() {
        let mut fx = DiskFixture::default()
            .with_doc("Doc1", DocumentType::Txt, "x")
            .with_doc("Doc2", DocumentType::Txt, "y");
        let root = fx.disk.root();
        let id = fx.id("Doc1");

        assert_eq!(
            fx.disk.rename(root, "Doc1", "File1").unwrap(),
            Renamed::Changed(id)
        );
        assert_eq!(fx.disk.child(root, "File1"), Some(id));
        assert!(fx.disk.child(root, "Doc1").is_none());
        assert_eq!(fx.disk.node(id).unwrap().name(), "File1");

        assert!(matches!(
            fx.disk.rename(root, "File1", "Doc2"),
            Err(CvfsError::NameConflict(_))
        ));
        assert!(matches!(
            fx.disk.rename(root, "Nope", "Doc3"),
            Err(CvfsError::NotFound(_))
        ));
        assert!(matches!(
            fx.disk.rename(root, "File1", "bad name"),
            Err(CvfsError::InvalidName(_))
        ));
    }

    #[test]
    fn rename_to_same_name_is_unchanged() {
        let mut fx = DiskFixture::default().with_doc("Doc1", DocumentType::Txt, "x");
        let root = fx.disk.root();
        let before = fx.disk.clone();
        assert_eq!(
            fx.disk.rename(root, "Doc1", "Doc1").unwrap(),
            Renamed::Unchanged
        );
        assert_eq!(fx.disk, before);
    }

    #[test]
    fn detach_then_attach_restores_state() {
        let mut fx = DiskFixture::default()
            .with_dir("A")
            .with_doc("A:Doc", DocumentType::Css, "body");
        let a = fx.id("A");
        let doc = fx.id("A:Doc");
        let before = fx.disk.clone();

        fx.disk.detach(a, doc).unwrap();
        assert_eq!(fx.disk.size(), 2 * SIZE_PREFIX);
        fx.disk.attach(a, doc).unwrap();
        assert_eq!(fx.disk, before);
    }

    #[test]
    fn resolve_walks_directories() {
        let fx = DiskFixture::default()
            .with_dir("A")
            .with_dir("A:B")
            .with_doc("A:Doc", DocumentType::Txt, "");
        let root = fx.disk.root();

        assert_eq!(
            fx.disk.resolve(root, "$:A:B:New").unwrap(),
            (fx.id("A:B"), "New".to_string())
        );
        assert_eq!(
            fx.disk.resolve(root, "Plain").unwrap(),
            (root, "Plain".to_string())
        );
        assert!(matches!(
            fx.disk.resolve(root, "$:Missing:X"),
            Err(CvfsError::InvalidPath(_))
        ));
        assert!(matches!(
            fx.disk.resolve(root, "A:Doc:X"),
            Err(CvfsError::InvalidPath(_))
        ));
    }

    #[test]
    fn change_directory_rules() {
        let fx = DiskFixture::default()
            .with_dir("A")
            .with_dir("A:B")
            .with_doc("A:Doc", DocumentType::Txt, "");
        let root = fx.disk.root();
        let a = fx.id("A");
        let b = fx.id("A:B");

        assert_eq!(fx.disk.change_directory(root, "A").unwrap(), a);
        assert_eq!(fx.disk.change_directory(root, "$:A:B").unwrap(), b);
        assert_eq!(fx.disk.change_directory(b, "..").unwrap(), a);
        assert!(matches!(
            fx.disk.change_directory(root, ".."),
            Err(CvfsError::AtRoot)
        ));
        assert!(matches!(
            fx.disk.change_directory(a, "Doc"),
            Err(CvfsError::InvalidPath(_))
        ));
        assert!(matches!(
            fx.disk.change_directory(root, "Nowhere"),
            Err(CvfsError::InvalidPath(_))
        ));
    }

    #[test]
    fn path_of_renders_prompt_path() {
        let fx = DiskFixture::default().with_dir("A").with_dir("A:B");
        assert_eq!(fx.disk.path_of(fx.disk.root()), "$");
        assert_eq!(fx.disk.path_of(fx.id("A:B")), "$:A:B");
    }

    #[test]
    fn list_is_shallow_and_reports_empty() {
        let fx = DiskFixture::default()
            .with_dir("B")
            .with_doc("B:Inner", DocumentType::Txt, "")
            .with_doc("A", DocumentType::Html, "<p>");

        let Listing::Entries(entries) = fx.disk.list(fx.disk.root()).unwrap() else {
            panic!("expected entries");
        };
        let names: Vec<String> = entries.map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "B"]);

        let empty = DiskFixture::default().with_dir("E");
        assert!(matches!(
            empty.disk.list(empty.id("E")).unwrap(),
            Listing::Empty
        ));
    }

    #[test]
    fn recursive_list_is_preorder() {
        let fx = DiskFixture::default()
            .with_dir("A")
            .with_dir("A:B")
            .with_doc("A:B:Deep", DocumentType::Txt, "")
            .with_doc("A:Doc", DocumentType::Txt, "")
            .with_doc("Z", DocumentType::Txt, "");

        let Listing::Entries(entries) = fx.disk.recursive_list(fx.disk.root()).unwrap() else {
            panic!("expected entries");
        };
        let visited: Vec<(String, usize)> = entries.map(|e| (e.name, e.depth)).collect();
        assert_eq!(
            visited,
            vec![
                ("A".to_string(), 0),
                ("B".to_string(), 1),
                ("Deep".to_string(), 2),
                ("Doc".to_string(), 1),
                ("Z".to_string(), 0),
            ]
        );
    }

    #[test]
    fn search_filters_through_criterion() {
        let fx = DiskFixture::default()
            .with_dir("Docs")
            .with_doc("Docs:Doc1", DocumentType::Txt, "ab")
            .with_doc("Other", DocumentType::Txt, "");
        let mut registry = CriteriaRegistry::new();
        registry.define_simple("nm", "name", "contains", "\"Doc\"").unwrap();
        let criterion = registry.get("nm").unwrap();

        let Listing::Entries(shallow) = fx.disk.search(fx.disk.root(), criterion).unwrap() else {
            panic!("expected entries");
        };
        let shallow: Vec<String> = shallow.map(|e| e.name).collect();
        assert_eq!(shallow, vec!["Docs"]);

        let Listing::Entries(deep) = fx.disk.recursive_search(fx.disk.root(), criterion).unwrap()
        else {
            panic!("expected entries");
        };
        let deep: Vec<String> = deep.map(|e| e.name).collect();
        assert_eq!(deep, vec!["Docs", "Doc1"]);
    }

    #[test]
    fn compacted_drops_detached_nodes() {
        let mut fx = DiskFixture::default()
            .with_dir("Keep")
            .with_doc("Keep:Doc", DocumentType::Txt, "abc")
            .with_doc("Gone", DocumentType::Txt, "zzz");
        let root = fx.disk.root();
        fx.disk.delete(root, "Gone").unwrap();

        let compact = fx.disk.compacted();
        assert_eq!(compact.nodes.len(), 3);
        assert_eq!(compact.size(), fx.disk.size());
        assert!(compact.is_consistent());
        let keep = compact.child(compact.root(), "Keep").unwrap();
        assert!(compact.child(keep, "Doc").is_some());
    }

    #[test]
    fn inconsistency_is_detected() {
        let mut fx = DiskFixture::default().with_doc("Doc", DocumentType::Txt, "x");
        let doc = fx.id("Doc");
        fx.disk.nodes[doc.0].add_size(7);
        assert!(!fx.disk.is_consistent());
    }

    #[test]
    fn root_with_a_parent_is_inconsistent() {
        let mut fx = DiskFixture::default().with_dir("Dir1");
        let dir = fx.id("Dir1");
        let root = fx.disk.root();
        fx.disk.nodes[root.0].set_parent(Some(dir));
        assert!(!fx.disk.is_consistent());
    }
}
