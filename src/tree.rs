//! Namespace tree construction
//!
//! Dotted component names (`form.select`) become a nested tree of folders
//! (`Form`) and leaves (`SelectViewHelper`). Within every folder, sub-folders
//! come first and leaves second, each group in ascending key order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::naming::{leaf_name, upper_first};
use crate::schema::SchemaElement;

/// A node in the namespace tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NamespaceNode {
    Folder {
        name: String,
        children: IndexMap<String, NamespaceNode>,
    },
    Leaf {
        name: String,
    },
}

impl NamespaceNode {
    fn folder(name: impl Into<String>) -> Self {
        NamespaceNode::Folder {
            name: name.into(),
            children: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NamespaceNode::Folder { name, .. } | NamespaceNode::Leaf { name } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, NamespaceNode::Folder { .. })
    }

    /// Children of a folder; leaves have none
    pub fn children(&self) -> Option<&IndexMap<String, NamespaceNode>> {
        match self {
            NamespaceNode::Folder { children, .. } => Some(children),
            NamespaceNode::Leaf { .. } => None,
        }
    }

    /// Follow a path of child keys from this node
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&NamespaceNode> {
        path.iter()
            .try_fold(self, |node, key| node.children()?.get(key.as_ref()))
    }

    /// Key paths of every leaf below this node, in tree order
    pub fn leaf_paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        collect_leaf_paths(self, &mut Vec::new(), &mut paths);
        paths
    }

    /// Return the same tree with every folder ordered folders-first, then by key
    pub fn sorted(self) -> Self {
        match self {
            NamespaceNode::Leaf { .. } => self,
            NamespaceNode::Folder { name, children } => {
                let (mut folders, mut leaves): (Vec<_>, Vec<_>) = children
                    .into_iter()
                    .map(|(key, child)| (key, child.sorted()))
                    .partition(|(_, child)| child.is_folder());

                folders.sort_by(|a, b| a.0.cmp(&b.0));
                leaves.sort_by(|a, b| a.0.cmp(&b.0));

                NamespaceNode::Folder {
                    name,
                    children: folders.into_iter().chain(leaves).collect(),
                }
            }
        }
    }
}

fn collect_leaf_paths(node: &NamespaceNode, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    if let Some(children) = node.children() {
        for (key, child) in children {
            prefix.push(key.clone());
            if child.is_folder() {
                collect_leaf_paths(child, prefix, out);
            } else {
                out.push(prefix.clone());
            }
            prefix.pop();
        }
    }
}

/// Build the sorted namespace tree for a list of schema elements
pub fn build_tree(elements: &[SchemaElement]) -> NamespaceNode {
    build_tree_from_names(elements.iter().map(|element| element.name.as_str()))
}

/// Build the sorted namespace tree from dotted component names.
///
/// Empty segments (`a..b`) are skipped. When a folder and a leaf compete for
/// the same key the later declaration wins.
pub fn build_tree_from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> NamespaceNode {
    let mut root = IndexMap::new();

    for name in names {
        let parts: Vec<String> = name
            .split('.')
            .filter(|part| !part.is_empty())
            .map(upper_first)
            .collect();
        insert(&mut root, &parts);
    }

    NamespaceNode::Folder {
        name: String::new(),
        children: root,
    }
    .sorted()
}

fn insert(children: &mut IndexMap<String, NamespaceNode>, parts: &[String]) {
    match parts {
        [] => {}
        [last] => {
            let key = leaf_name(last);
            children.insert(key.clone(), NamespaceNode::Leaf { name: key });
        }
        [folder, rest @ ..] => {
            let entry = children
                .entry(folder.clone())
                .or_insert_with(|| NamespaceNode::folder(folder.as_str()));
            if !entry.is_folder() {
                *entry = NamespaceNode::folder(folder.as_str());
            }
            if let NamespaceNode::Folder { children, .. } = entry {
                insert(children, rest);
            }
        }
    }
}
