//! Generic configuration trees
//!
//! Template and art files are YAML documents. Only three node shapes are
//! needed, so the saphyr event stream is folded directly into a small
//! [`Node`] tree with an explicit container stack; no typed deserialization
//! happens here. Callers ask for the shape they expect and treat anything
//! else as absent.

use std::collections::HashMap;
use std::path::Path;

use saphyr_parser::{Event, Parser, ScalarStyle};
use thiserror::Error;

use crate::foundation::math::parse_leading_int;

/// Deepest container nesting accepted by the parser
pub const MAX_DEPTH: usize = 128;

/// Most nodes one document may expand to, alias copies included
pub const MAX_NODES: usize = 1 << 16;

/// Errors produced while building a tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The YAML scanner rejected the input
    #[error("YAML syntax error: {0}")]
    Syntax(String),

    /// The stream holds no document
    #[error("document is empty")]
    Empty,

    /// A mapping key was a sequence or mapping
    #[error("mapping keys must be scalars")]
    NonScalarKey,

    /// An alias referenced an anchor that was never defined
    #[error("unknown alias id {0}")]
    UnknownAlias(usize),

    /// Containers nested deeper than [`MAX_DEPTH`]
    #[error("nesting deeper than {} levels", MAX_DEPTH)]
    TooDeep,

    /// The document expands to more than [`MAX_NODES`] nodes
    #[error("document expands past {} nodes", MAX_NODES)]
    TooLarge,
}

/// One node of a configuration tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf value; always kept as a string
    Scalar(String),
    /// Ordered list of nodes
    Sequence(Vec<Node>),
    /// Ordered key/value pairs with unique keys
    Mapping(Vec<(String, Node)>),
}

impl Default for Node {
    fn default() -> Self {
        Self::Scalar(String::new())
    }
}

impl Node {
    /// Child of a mapping node
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Scalar text, if this is a scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// Scalar text, or `default` for any other shape
    pub fn as_string(&self, default: &str) -> String {
        self.as_str().unwrap_or(default).to_string()
    }

    /// Scalar parsed as a leading integer, or `default` for any other shape
    pub fn as_int(&self, default: i32) -> i32 {
        self.as_str().map_or(default, parse_leading_int)
    }

    /// Scalar as a one-element list, or the scalar children of a sequence
    pub fn as_string_list(&self) -> Vec<String> {
        match self {
            Self::Scalar(text) => vec![text.clone()],
            Self::Sequence(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Self::Mapping(_) => Vec::new(),
        }
    }

    /// Children of a sequence node
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            Self::Scalar(_) | Self::Mapping(_) => None,
        }
    }

    /// Entries of a mapping node
    pub fn as_mapping(&self) -> Option<&[(String, Node)]> {
        match self {
            Self::Mapping(entries) => Some(entries),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Integer child of a mapping, or `default`
    pub fn map_int(&self, key: &str, default: i32) -> i32 {
        self.get(key).map_or(default, |node| node.as_int(default))
    }

    /// String child of a mapping, or `default`
    pub fn map_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(Node::as_str).unwrap_or(default)
    }
}

/// A parsed document. Owns its whole node tree.
#[derive(Debug)]
pub struct ConfigTree {
    root: Node,
}

impl ConfigTree {
    /// Parse YAML source into a tree
    pub fn parse(source: &str) -> Result<Self, TreeError> {
        let mut builder = TreeBuilder::default();
        let mut parser = Parser::new_from_str(source);

        while let Some(next) = parser.next_event() {
            let (event, _span) = next.map_err(|e| TreeError::Syntax(e.to_string()))?;
            if let Some(root) = builder.on_event(event)? {
                return Ok(Self { root });
            }
        }
        Err(TreeError::Empty)
    }

    /// Read and parse a file.
    ///
    /// Missing, unreadable and malformed files are logged and yield `None`.
    pub fn load_file(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                log::debug!("Config tree {} not readable: {}", path.display(), e);
                return None;
            }
        };
        match Self::parse(&source) {
            Ok(tree) => Some(tree),
            Err(e) => {
                log::warn!("Config tree {} not parsed: {}", path.display(), e);
                None
            }
        }
    }

    /// Root node
    pub fn root(&self) -> &Node {
        &self.root
    }
}

impl Drop for ConfigTree {
    fn drop(&mut self) {
        // Flatten the tree so dropping never recurses deeper than one level.
        let mut pending = vec![std::mem::take(&mut self.root)];
        while let Some(mut node) = pending.pop() {
            match &mut node {
                Node::Sequence(items) => pending.append(items),
                Node::Mapping(entries) => pending.extend(entries.drain(..).map(|(_, value)| value)),
                Node::Scalar(_) => {}
            }
        }
    }
}

/// Open container while events are folded into nodes
#[derive(Debug)]
enum Frame {
    Sequence {
        items: Vec<Node>,
        anchor: usize,
        first_node: usize,
    },
    Mapping {
        entries: Vec<(String, Node)>,
        pending_key: Option<String>,
        anchor: usize,
        first_node: usize,
    },
}

/// Anchored node and the number of nodes it spans
#[derive(Debug)]
struct Anchored {
    node: Node,
    size: usize,
}

#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Anchored>,
    nodes: usize,
}

impl TreeBuilder {
    /// Feed one event; returns the root once the first document is complete.
    fn on_event(&mut self, event: Event<'_>) -> Result<Option<Node>, TreeError> {
        match event {
            Event::Scalar(value, style, anchor, _tag) => {
                let text = if matches!(style, ScalarStyle::Plain) && value == "~" {
                    String::new()
                } else {
                    value.into_owned()
                };
                self.count(1)?;
                let node = Node::Scalar(text);
                self.remember(anchor, &node, 1);
                self.attach(node)
            }
            Event::SequenceStart(anchor, _tag) => {
                let first_node = self.nodes;
                self.open(Frame::Sequence { items: Vec::new(), anchor, first_node })?;
                Ok(None)
            }
            Event::MappingStart(anchor, _tag) => {
                let first_node = self.nodes;
                self.open(Frame::Mapping { entries: Vec::new(), pending_key: None, anchor, first_node })?;
                Ok(None)
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let (node, anchor, first_node) = match self.stack.pop() {
                    Some(Frame::Sequence { items, anchor, first_node }) => {
                        (Node::Sequence(items), anchor, first_node)
                    }
                    Some(Frame::Mapping { entries, anchor, first_node, .. }) => {
                        (Node::Mapping(entries), anchor, first_node)
                    }
                    None => return Ok(None),
                };
                self.remember(anchor, &node, self.nodes - first_node);
                self.attach(node)
            }
            Event::Alias(id) => {
                let anchored = self.anchors.get(&id).ok_or(TreeError::UnknownAlias(id))?;
                let (node, size) = (anchored.node.clone(), anchored.size);
                self.count(size)?;
                self.attach(node)
            }
            Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart(_)
            | Event::DocumentEnd
            | Event::Nothing => Ok(None),
        }
    }

    fn open(&mut self, frame: Frame) -> Result<(), TreeError> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(TreeError::TooDeep);
        }
        if let Some(Frame::Mapping { pending_key: None, .. }) = self.stack.last() {
            return Err(TreeError::NonScalarKey);
        }
        self.count(1)?;
        self.stack.push(frame);
        Ok(())
    }

    /// Account for `added` new nodes, alias copies included
    fn count(&mut self, added: usize) -> Result<(), TreeError> {
        self.nodes = self.nodes.saturating_add(added);
        if self.nodes > MAX_NODES {
            return Err(TreeError::TooLarge);
        }
        Ok(())
    }

    fn remember(&mut self, anchor: usize, node: &Node, size: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, Anchored { node: node.clone(), size });
        }
    }

    fn attach(&mut self, node: Node) -> Result<Option<Node>, TreeError> {
        match self.stack.last_mut() {
            None => Ok(Some(node)),
            Some(Frame::Sequence { items, .. }) => {
                items.push(node);
                Ok(None)
            }
            Some(Frame::Mapping { entries, pending_key, .. }) => {
                match pending_key.take() {
                    None => match node {
                        Node::Scalar(key) => *pending_key = Some(key),
                        Node::Sequence(_) | Node::Mapping(_) => return Err(TreeError::NonScalarKey),
                    },
                    Some(key) => match entries.iter_mut().find(|(k, _)| *k == key) {
                        Some(entry) => entry.1 = node,
                        None => entries.push((key, node)),
                    },
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_node_kinds() {
        let tree = ConfigTree::parse(
            "view:\n  - '+---+'\n  - '|###|'\ncount: 3\nnested:\n  inner: [a, b]\n",
        )
        .unwrap();
        let root = tree.root();

        assert_eq!(
            root.get("view").unwrap().as_string_list(),
            vec!["+---+".to_string(), "|###|".to_string()]
        );
        assert_eq!(root.map_int("count", 0), 3);
        let inner = root.get("nested").and_then(|n| n.get("inner")).unwrap();
        assert_eq!(inner.as_sequence().map(<[Node]>::len), Some(2));
    }

    #[test]
    fn test_keys_keep_document_order() {
        let tree = ConfigTree::parse("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<&str> = tree
            .root()
            .as_mapping()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_key_replaces_in_place() {
        let tree = ConfigTree::parse("a: 1\nb: 2\na: 3\n").unwrap();
        let entries = tree.root().as_mapping().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "a");
        assert_eq!(tree.root().map_int("a", 0), 3);
    }

    #[test]
    fn test_scalars_stay_strings() {
        let tree = ConfigTree::parse("flag: true\nnum: 007\nempty:\nnull: ~\nquoted: '~'\n").unwrap();
        let root = tree.root();
        assert_eq!(root.map_str("flag", ""), "true");
        assert_eq!(root.map_str("num", ""), "007");
        assert_eq!(root.map_int("num", -1), 7);
        assert_eq!(root.map_str("empty", "x"), "");
        assert_eq!(root.map_str("null", "x"), "");
        assert_eq!(root.map_str("quoted", "x"), "~");
    }

    #[test]
    fn test_accessor_shape_mismatch_is_absent() {
        let tree = ConfigTree::parse("list: [1, 2]\nmap: {k: v}\nword: hi\n").unwrap();
        let root = tree.root();

        assert_eq!(root.map_int("list", 9), 9);
        assert_eq!(root.map_str("map", "dflt"), "dflt");
        assert!(root.get("word").unwrap().get("k").is_none());
        assert_eq!(root.get("word").unwrap().as_string_list(), vec!["hi".to_string()]);
        assert!(root.get("map").unwrap().as_string_list().is_empty());
        assert!(root.get("missing").is_none());
    }

    #[test]
    fn test_string_list_skips_non_scalars() {
        let tree = ConfigTree::parse("- a\n- [x]\n- {k: v}\n- b\n").unwrap();
        assert_eq!(tree.root().as_string_list(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_aliases_clone_anchored_nodes() {
        let tree = ConfigTree::parse("base: &rect [0, 3]\ncopy: *rect\n").unwrap();
        assert_eq!(tree.root().get("copy"), tree.root().get("base"));
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(matches!(ConfigTree::parse("a: [1, 2\n"), Err(TreeError::Syntax(_))));
        assert_eq!(ConfigTree::parse("").unwrap_err(), TreeError::Empty);
        assert_eq!(ConfigTree::parse("? [a]\n: b\n").unwrap_err(), TreeError::NonScalarKey);
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert_eq!(ConfigTree::parse(&deep).unwrap_err(), TreeError::TooDeep);

        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(ConfigTree::parse(&ok).is_ok());
    }

    fn doubling_aliases(levels: usize) -> String {
        let mut source = String::from("l0: &l0 [x, x]\n");
        for level in 1..levels {
            source.push_str(&format!("l{level}: &l{level} [*l{prev}, *l{prev}]\n", prev = level - 1));
        }
        source
    }

    #[test]
    fn test_alias_expansion_limit() {
        let doubling = doubling_aliases(24);
        assert_eq!(ConfigTree::parse(&doubling).unwrap_err(), TreeError::TooLarge);

        let flat = "- x\n".repeat(MAX_NODES);
        assert_eq!(ConfigTree::parse(&flat).unwrap_err(), TreeError::TooLarge);

        let small = "a: &a [x, x]\nb: &b [*a, *a]\nc: [*b, *b]\n";
        let tree = ConfigTree::parse(small).unwrap();
        let c = tree.root().get("c").and_then(Node::as_sequence).unwrap();
        assert_eq!(c[1].as_sequence().map(<[Node]>::len), Some(2));
    }

    #[test]
    fn test_load_oversized_file_is_none() {
        let path = std::env::temp_dir().join(format!("view_engine_tree_{}_big.yml", std::process::id()));
        let doubling = doubling_aliases(24);
        std::fs::write(&path, doubling).unwrap();
        assert!(ConfigTree::load_file(&path).is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_only_first_document_is_used() {
        let tree = ConfigTree::parse("---\na: 1\n---\nb: 2\n").unwrap();
        assert!(tree.root().get("a").is_some());
        assert!(tree.root().get("b").is_none());
    }

    #[test]
    fn test_load_missing_file_is_none() {
        assert!(ConfigTree::load_file("/definitely/not/here.yml").is_none());
    }
}
