//! # View Engine
//!
//! A data-driven text-grid view compositor with a packed glyph atlas renderer.
//!
//! ## Features
//!
//! - **Templates**: YAML screens with placeholder fields, nested partials and art slots
//! - **Composition**: method-chain value lookup, field alignment, clipped overlays
//! - **Glyph Atlas**: distinct cells rasterized once and packed near-square
//! - **Rendering**: one quad per visible cell, fade and typewriter transitions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use view_engine::prelude::*;
//!
//! let config = ViewerConfig::load_or_default("viewer.toml");
//! let resolver = AssetResolver::new(config.paths.clone());
//!
//! let mut main = ValueMap::new();
//! main.set("hero_name", "Ato");
//!
//! if let Some(menu) = Screen::build(&resolver, &ScreenRequest::new("status_screen", &main)) {
//!     println!("{}", menu.view);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod view;
pub mod assets;
pub mod menu;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::{Config, ViewerConfig, PathConfig, FontConfig, TransitionConfig},
        view::{View, Line, ValueMap, MessageLog},
        assets::{ConfigTree, Node, AssetResolver, ArtFile},
        menu::{Menu, Composer, ArtRef, Screen, ScreenRequest},
        render::{
            FontAtlas, FontdueRasterizer, GlyphRasterizer, RenderState, TextureUploader,
            MemoryTextureUploader, GridRenderer, GridFrame, RevealLimit, ReplaceMode,
            AnimationSpeed, ScreenTransition, ArtSequence,
        },
    };
}
