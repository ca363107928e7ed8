//! # Menu Templates
//!
//! A template is a raw [`View`] plus three kinds of annotations:
//!
//! - **insert options**: placeholder runs on a line filled from a value map
//! - **partial slots**: rectangles receiving another composed template
//! - **art slots**: rectangles receiving a centred art variant
//!
//! ```yaml
//! view:
//!   - "Name: ########"
//! insert_options:
//!   0:
//!     "#": { methods: [hero_name], modifier: m }
//! partials:
//!   - { partial_name: status_bar, y: [1, 2], x: [0, 20] }
//! arts:
//!   - { y: [3, 10], x: [0, 20] }
//! ```

use std::path::Path;

use crate::assets::config_tree::{ConfigTree, Node};
use crate::view::View;

/// How a value is placed inside a placeholder run that is wider than it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Value first, padding after
    #[default]
    Start,
    /// Padding first, value last
    End,
    /// Padding split around the value, the odd space going right
    Middle,
}

impl Align {
    /// Alignment named by the first character of a modifier (`m`, `e`)
    pub fn from_modifier(modifier: &str) -> Self {
        match modifier.chars().next() {
            Some('m') => Self::Middle,
            Some('e') => Self::End,
            _ => Self::Start,
        }
    }
}

/// One placeholder rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOption {
    /// Target line
    pub line: usize,
    /// Character whose runs mark the field
    pub placeholder: char,
    /// Padding rule
    pub align: Align,
    /// Base key followed by refinement steps
    pub methods: Vec<String>,
}

/// Rectangle in the parent's cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotRect {
    /// First row
    pub y0: i32,
    /// Last row
    pub y1: i32,
    /// First column
    pub x0: i32,
    /// Last column
    pub x1: i32,
}

impl SlotRect {
    fn from_node(node: &Node) -> Self {
        let (y0, y1) = read_pair(node.get("y"));
        let (x0, x1) = read_pair(node.get("x"));
        Self { y0, y1, x0, x1 }
    }
}

/// Nested template placed at a rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSlot {
    /// Template name; slots without one are skipped at composition
    pub name: Option<String>,
    /// Target rectangle
    pub rect: SlotRect,
}

/// Art target, paired by position with the art references of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArtSlot {
    /// Target rectangle
    pub rect: SlotRect,
}

/// Loaded, not yet composed template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    /// Raw lines; composition rewrites them in place
    pub view: View,
    /// Placeholder rules in file order
    pub inserts: Vec<InsertOption>,
    /// Nested template slots
    pub partials: Vec<PartialSlot>,
    /// Art slots
    pub arts: Vec<ArtSlot>,
}

impl Menu {
    /// Load a template file; `None` when the file is unusable or has no lines
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let tree = ConfigTree::load_file(path)?;
        let menu = Self::from_tree(tree.root());
        match &menu {
            Some(menu) => log::debug!(
                "Loaded template {} ({} lines, {} inserts, {} partials, {} arts)",
                path.display(),
                menu.view.line_count(),
                menu.inserts.len(),
                menu.partials.len(),
                menu.arts.len()
            ),
            None => log::warn!("Template {} has no view lines", path.display()),
        }
        menu
    }

    /// Build from a parsed tree. Malformed annotation entries are skipped;
    /// only an empty view fails.
    pub fn from_tree(root: &Node) -> Option<Self> {
        let view = root
            .get("view")
            .and_then(Node::as_sequence)
            .map(|lines| View::from_lines(lines.iter().filter_map(Node::as_str)))
            .unwrap_or_default();
        if view.is_empty() {
            return None;
        }

        Some(Self {
            view,
            inserts: read_inserts(root.get("insert_options")),
            partials: read_slots(root.get("partials"))
                .map(|(node, rect)| PartialSlot {
                    name: node.get("partial_name").and_then(Node::as_str).map(str::to_string),
                    rect,
                })
                .collect(),
            arts: read_slots(root.get("arts"))
                .map(|(_, rect)| ArtSlot { rect })
                .collect(),
        })
    }
}

fn read_inserts(node: Option<&Node>) -> Vec<InsertOption> {
    let Some(lines) = node.and_then(Node::as_mapping) else {
        return Vec::new();
    };

    let mut inserts = Vec::new();
    for (line_key, per_line) in lines {
        let Some(placeholders) = per_line.as_mapping() else {
            continue;
        };
        let Ok(line) = usize::try_from(crate::foundation::math::parse_leading_int(line_key)) else {
            log::debug!("Skipping insert options for negative line '{}'", line_key);
            continue;
        };

        for (key, definition) in placeholders {
            let Some(placeholder) = key.chars().next() else {
                continue;
            };
            if definition.as_mapping().is_none() {
                continue;
            }
            let methods = definition
                .get("methods")
                .filter(|methods| methods.as_sequence().is_some())
                .map(Node::as_string_list)
                .unwrap_or_default();
            let align = definition
                .get("modifier")
                .and_then(Node::as_str)
                .map(Align::from_modifier)
                .unwrap_or_default();

            inserts.push(InsertOption { line, placeholder, align, methods });
        }
    }
    inserts
}

fn read_slots(node: Option<&Node>) -> impl Iterator<Item = (&Node, SlotRect)> {
    node.and_then(Node::as_sequence)
        .unwrap_or_default()
        .iter()
        .filter(|entry| entry.as_mapping().is_some())
        .map(|entry| (entry, SlotRect::from_node(entry)))
}

fn read_pair(node: Option<&Node>) -> (i32, i32) {
    match node.and_then(Node::as_sequence) {
        Some([first, second, ..]) => (first.as_int(0), second.as_int(0)),
        _ => (0, 0),
    }
}
