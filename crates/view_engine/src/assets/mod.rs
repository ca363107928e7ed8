//! Asset loading: configuration trees, name resolution and art files

pub mod config_tree;
pub mod resolver;
pub mod art;

pub use config_tree::{ConfigTree, Node, TreeError};
pub use resolver::{AssetKind, AssetResolver};
pub use art::{Art, ArtFile, DEFAULT_VARIANT};
