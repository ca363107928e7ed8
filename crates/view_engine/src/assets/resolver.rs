//! Template and art file resolution
//!
//! Hosts refer to screens and art by short names (`"battle_screen"`,
//! `"dungeons/_bandits"`). A short name maps to `<root>/<dir>/<name>.yml`
//! for every configured search root; a name that already carries a YAML
//! extension is used as a path relative to each root. The first candidate
//! that exists wins. When nothing exists the first candidate is returned so
//! the subsequent load fails (and is logged) in one place.

use std::path::{Path, PathBuf};

use crate::core::config::PathConfig;

/// Which kind of asset a name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Menu template (`view` / `insert_options` / `partials` / `arts`)
    Menu,
    /// Art file (variant name to lines)
    Art,
}

/// Maps asset names to file paths
#[derive(Debug, Clone, Default)]
pub struct AssetResolver {
    paths: PathConfig,
}

impl AssetResolver {
    /// Create a resolver for the given search configuration
    pub fn new(paths: PathConfig) -> Self {
        Self { paths }
    }

    /// Create a resolver rooted at a single directory
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(PathConfig::with_root(root))
    }

    /// Search configuration
    pub fn paths(&self) -> &PathConfig {
        &self.paths
    }

    /// Path of a menu template
    pub fn resolve_menu(&self, name: &str) -> PathBuf {
        self.resolve(AssetKind::Menu, name)
    }

    /// Path of an art file
    pub fn resolve_art(&self, name: &str) -> PathBuf {
        self.resolve(AssetKind::Art, name)
    }

    /// Resolve `name` for the given asset kind
    pub fn resolve(&self, kind: AssetKind, name: &str) -> PathBuf {
        let candidates = self.candidates(kind, name);
        match candidates.iter().find(|candidate| candidate.exists()) {
            Some(found) => found.clone(),
            None => {
                log::debug!("No {:?} file found for '{}', tried {} locations", kind, name, candidates.len());
                candidates
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| PathBuf::from(name))
            }
        }
    }

    /// Every location tried for `name`, in search order
    pub fn candidates(&self, kind: AssetKind, name: &str) -> Vec<PathBuf> {
        let relative = if has_yaml_extension(name) {
            PathBuf::from(name)
        } else {
            let dir = match kind {
                AssetKind::Menu => &self.paths.menu_dir,
                AssetKind::Art => &self.paths.art_dir,
            };
            dir.join(format!("{name}.yml"))
        };

        if relative.is_absolute() {
            return vec![relative];
        }
        self.paths
            .search_roots
            .iter()
            .map(|root| root.join(&relative))
            .collect()
    }
}

fn has_yaml_extension(name: &str) -> bool {
    matches!(
        Path::new(name).extension().and_then(|ext| ext.to_str()),
        Some("yml" | "yaml")
    )
}
