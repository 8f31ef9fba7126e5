//! Collection membership boundary
//!
//! The core mutates the host scene only by moving objects between named
//! collections. [`CollectionStore`] is that boundary: hosts implement it
//! against their own scene graph, and [`CollectionTree`] provides an
//! in-memory implementation for tests and standalone use.

use super::ObjectKey;
use std::collections::BTreeMap;

/// Write boundary onto the host's collection structure
///
/// All grouping results are applied through this trait in a single
/// mutation pass after matching has finished.
pub trait CollectionStore {
    /// Create the named collection if absent, nested under `parent`
    /// (top level when `None`)
    fn ensure_collection(&mut self, name: &str, parent: Option<&str>);

    /// Link an object into a named collection
    fn link(&mut self, object: ObjectKey, collection: &str);

    /// Unlink an object from every collection it currently belongs to
    fn unlink_all(&mut self, object: ObjectKey);

    /// Names of the collections an object currently belongs to
    fn collections_of(&self, object: ObjectKey) -> Vec<String>;

    /// Whether `collection` is nested directly under `parent`
    fn is_child_of(&self, collection: &str, parent: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
struct CollectionNode {
    parent: Option<String>,
    children: Vec<String>,
    members: Vec<ObjectKey>,
}

/// In-memory collection hierarchy
///
/// Deterministic iteration, suitable for tests and for hosts without a
/// native collection model. Objects not linked anywhere are considered
/// to live at the scene root.
#[derive(Debug, Default)]
pub struct CollectionTree {
    nodes: BTreeMap<String, CollectionNode>,
    top_level: Vec<String>,
}

impl CollectionTree {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a collection with this name exists
    pub fn contains_collection(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Child collection names under `parent` (top level when `None`)
    pub fn children_of(&self, parent: Option<&str>) -> &[String] {
        match parent {
            None => &self.top_level,
            Some(name) => self
                .nodes
                .get(name)
                .map_or(&[] as &[String], |node| &node.children),
        }
    }

    /// Members of a collection, in link order
    pub fn members_of(&self, name: &str) -> &[ObjectKey] {
        self.nodes
            .get(name)
            .map_or(&[] as &[ObjectKey], |node| &node.members)
    }

    /// Sort every level of the hierarchy alphabetically
    ///
    /// Case-insensitive unless `case_sensitive` is set, matching the
    /// usual outliner sort behavior.
    pub fn sort_children(&mut self, case_sensitive: bool) {
        fn sort_level(names: &mut [String], case_sensitive: bool) {
            if case_sensitive {
                names.sort_unstable();
            } else {
                names.sort_by_key(|name| name.to_lowercase());
            }
        }

        sort_level(&mut self.top_level, case_sensitive);
        for node in self.nodes.values_mut() {
            sort_level(&mut node.children, case_sensitive);
        }
    }
}

impl CollectionStore for CollectionTree {
    fn ensure_collection(&mut self, name: &str, parent: Option<&str>) {
        if self.nodes.contains_key(name) {
            return;
        }

        if let Some(parent_name) = parent {
            self.ensure_collection(parent_name, None);
        }

        self.nodes.insert(
            name.to_string(),
            CollectionNode {
                parent: parent.map(str::to_string),
                ..Default::default()
            },
        );

        match parent {
            Some(parent_name) => {
                if let Some(node) = self.nodes.get_mut(parent_name) {
                    node.children.push(name.to_string());
                }
            }
            None => self.top_level.push(name.to_string()),
        }

        log::debug!("Created collection '{name}'");
    }

    fn link(&mut self, object: ObjectKey, collection: &str) {
        if !self.nodes.contains_key(collection) {
            self.ensure_collection(collection, None);
        }
        if let Some(node) = self.nodes.get_mut(collection) {
            if !node.members.contains(&object) {
                node.members.push(object);
            }
        }
    }

    fn unlink_all(&mut self, object: ObjectKey) {
        for node in self.nodes.values_mut() {
            node.members.retain(|&member| member != object);
        }
    }

    fn collections_of(&self, object: ObjectKey) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.members.contains(&object))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn is_child_of(&self, collection: &str, parent: &str) -> bool {
        self.nodes
            .get(collection)
            .and_then(|node| node.parent.as_deref())
            == Some(parent)
    }
}
