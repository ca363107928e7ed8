//! Screen pipeline: template name plus inputs in, resolved template out.
//!
//! This is the step a host runs whenever its visible state changes.

use super::compose::{ArtRef, Composer};
use super::template::Menu;
use crate::assets::AssetResolver;
use crate::view::ValueMap;

/// Everything needed to build one screen
#[derive(Debug, Clone, Copy)]
pub struct ScreenRequest<'a> {
    /// Template name or path
    pub template: &'a str,
    /// Main value map
    pub main: &'a ValueMap,
    /// Per-partial-slot value maps
    pub partial_maps: &'a [Option<&'a ValueMap>],
    /// Art references paired with the template's art slots
    pub arts: &'a [ArtRef],
}

impl<'a> ScreenRequest<'a> {
    /// Request with only a template and a main map
    pub fn new(template: &'a str, main: &'a ValueMap) -> Self {
        Self {
            template,
            main,
            partial_maps: &[],
            arts: &[],
        }
    }

    /// Set per-partial value maps
    pub fn with_partial_maps(mut self, partial_maps: &'a [Option<&'a ValueMap>]) -> Self {
        self.partial_maps = partial_maps;
        self
    }

    /// Set art references
    pub fn with_arts(mut self, arts: &'a [ArtRef]) -> Self {
        self.arts = arts;
        self
    }
}

/// Screen builder
pub struct Screen;

impl Screen {
    /// Load and compose the requested template; `None` when it cannot be loaded
    pub fn build(resolver: &AssetResolver, request: &ScreenRequest<'_>) -> Option<Menu> {
        let path = resolver.resolve_menu(request.template);
        let mut menu = Menu::load(&path)?;
        Composer::new(resolver).compose(&mut menu, request.main, request.partial_maps, request.arts);
        log::info!(
            "Built screen '{}': {}x{} cells",
            request.template,
            menu.view.cols(),
            menu.view.rows()
        );
        Some(menu)
    }
}
