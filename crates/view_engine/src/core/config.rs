//! # Viewer Configuration
//!
//! All settings a host needs to turn template names into a drawn screen:
//! where template and art files live, which font rasterizes the atlas, and
//! how a freshly built screen replaces the previous one.
//!
//! ## Configuration Categories
//!
//! - **Path Config**: search roots and the menu/art sub-directories
//! - **Font Config**: font file candidates, pixel size, fallback cell size
//! - **Transition Config**: replace mode and animation speed selector

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

pub use crate::config::{Config, ConfigError};
use crate::render::transition::{AnimationSpeed, ReplaceMode};

/// # Path Configuration
///
/// Template and art names are resolved against every search root in order;
/// the first existing file wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Directories tried in order when resolving a template or art name
    pub search_roots: Vec<PathBuf>,
    /// Sub-directory (under each root) holding menu templates
    pub menu_dir: PathBuf,
    /// Sub-directory (under each root) holding art files
    pub art_dir: PathBuf,
}

impl PathConfig {
    /// Create a path configuration with a single search root
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            search_roots: vec![root.into()],
            ..Self::default()
        }
    }

    /// Append a search root
    pub fn with_extra_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            search_roots: vec![PathBuf::from("."), PathBuf::from(".."), PathBuf::from("../..")],
            menu_dir: PathBuf::from("views/menues"),
            art_dir: PathBuf::from("views/arts"),
        }
    }
}

/// # Font Configuration
///
/// The atlas needs one monospace font. An explicit path wins; otherwise the
/// first existing candidate is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Explicit font file
    pub path: Option<PathBuf>,
    /// Well-known system locations tried when no explicit path is set
    pub candidates: Vec<PathBuf>,
    /// Rasterization size in pixels
    pub size_px: f32,
    /// Cell size used when the font reports degenerate metrics
    pub fallback_cell: (u32, u32),
}

impl FontConfig {
    /// Set an explicit font path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Pick the font file to use: the explicit path, or the first candidate
    /// that exists on disk
    pub fn resolve_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        self.candidates
            .iter()
            .find(|candidate| Path::new(candidate).exists())
            .cloned()
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            candidates: vec![
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf"),
                PathBuf::from("/Library/Fonts/Menlo.ttc"),
                PathBuf::from("C:/Windows/Fonts/consola.ttf"),
            ],
            size_px: 20.0,
            fallback_cell: (12, 20),
        }
    }
}

/// # Transition Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// How a new screen replaces the previous one
    pub mode: ReplaceMode,
    /// Animation speed selector
    pub speed: AnimationSpeed,
}

/// # Complete Viewer Configuration
///
/// Top-level configuration loaded from `viewer.toml` / `viewer.ron`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Template and art lookup
    pub paths: PathConfig,
    /// Atlas font
    pub font: FontConfig,
    /// Screen replacement animation
    pub transition: TransitionConfig,
}

impl ViewerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.paths.search_roots.is_empty() {
            return Err("At least one search root is required".to_string());
        }
        if self.font.size_px.is_nan() || self.font.size_px <= 0.0 {
            return Err(format!("Font size must be positive, got {}", self.font.size_px));
        }
        if self.font.fallback_cell.0 == 0 || self.font.fallback_cell.1 == 0 {
            return Err("Fallback cell size must be non-zero".to_string());
        }
        Ok(())
    }
}

impl Config for ViewerConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.paths.menu_dir, PathBuf::from("views/menues"));
        assert_eq!(config.transition.mode, ReplaceMode::Instant);
        assert_eq!(config.transition.speed.duration_ms(), 400);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ViewerConfig = toml::from_str(
            "[transition]\nmode = \"typewriter\"\nspeed = 3\n\n[font]\nsize_px = 16.0\n",
        )
        .unwrap();

        assert_eq!(config.transition.mode, ReplaceMode::Typewriter);
        assert_eq!(config.transition.speed.duration_ms(), 1000);
        assert_eq!(config.font.size_px, 16.0);
        assert_eq!(config.paths, PathConfig::default());
    }

    #[test]
    fn test_explicit_font_path_wins() {
        let font = FontConfig::default().with_path("/nonexistent/font.ttf");
        assert_eq!(font.resolve_path(), Some(PathBuf::from("/nonexistent/font.ttf")));
    }

    #[test]
    fn test_validate_rejects_empty_roots() {
        let mut config = ViewerConfig::default();
        config.paths.search_roots.clear();
        assert!(config.validate().is_err());
    }
}
