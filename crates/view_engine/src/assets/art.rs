//! Art files
//!
//! An art file is a mapping from variant name (`normal`, `attack`, ...) to
//! the variant's raw lines. Screens ask for a variant by name and fall back
//! to `normal` when the requested variant is missing.

use std::path::Path;

use super::config_tree::{ConfigTree, Node};
use crate::view::View;

/// Variant used when a requested variant does not exist
pub const DEFAULT_VARIANT: &str = "normal";

/// One named block of pre-authored grid content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Art {
    /// Variant name
    pub name: String,
    /// Raw lines; cells are built when the art is placed
    pub view: View,
}

/// All variants of one art file, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtFile {
    arts: Vec<Art>,
}

impl ArtFile {
    /// Load an art file; `None` when unreadable or without any variant
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let tree = ConfigTree::load_file(path)?;
        let file = Self::from_tree(tree.root());
        if file.is_none() {
            log::warn!("Art file {} has no variants", path.display());
        }
        file
    }

    /// Build from a parsed tree; entries that are not line sequences are skipped
    pub fn from_tree(root: &Node) -> Option<Self> {
        let arts: Vec<Art> = root
            .as_mapping()?
            .iter()
            .filter_map(|(name, value)| {
                let lines = value.as_sequence()?;
                let view = View::from_lines(lines.iter().filter_map(Node::as_str));
                Some(Art { name: name.clone(), view })
            })
            .collect();

        if arts.is_empty() {
            None
        } else {
            Some(Self { arts })
        }
    }

    /// Variant with exactly this name
    pub fn find(&self, name: &str) -> Option<&Art> {
        self.arts.iter().find(|art| art.name == name)
    }

    /// Variant by name, falling back to [`DEFAULT_VARIANT`]
    pub fn select(&self, name: &str) -> Option<&Art> {
        self.find(name).or_else(|| {
            if name == DEFAULT_VARIANT {
                None
            } else {
                self.find(DEFAULT_VARIANT)
            }
        })
    }

    /// Variant names in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arts.iter().map(|art| art.name.as_str())
    }

    /// Number of variants
    pub fn len(&self) -> usize {
        self.arts.len()
    }

    /// Whether the file has no variants
    pub fn is_empty(&self) -> bool {
        self.arts.is_empty()
    }
}
