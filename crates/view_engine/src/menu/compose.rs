//! # Composer
//!
//! Turns a loaded [`Menu`] into a fully resolved grid:
//!
//! 1. placeholder substitution with the main value map
//! 2. cell rebuild
//! 3. partial slots: each referenced template is loaded, composed the same
//!    way (with its per-slot value map when one is given) and blitted at the
//!    slot's top-left corner
//! 4. art slots: the paired art variant is centred in the slot and blitted
//!
//! Every blit clips cell by cell against the parent grid. Missing partials
//! and arts leave their region untouched.

use super::insert::apply_inserts;
use super::template::{Menu, SlotRect};
use crate::assets::{ArtFile, AssetResolver};
use crate::view::ValueMap;

/// Deepest partial nesting that is still composed
pub const MAX_PARTIAL_DEPTH: usize = 8;

/// Art placed into an art slot: the variant name and the art file it lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtRef {
    /// Variant name (`normal`, `attack`, ...)
    pub name: String,
    /// Art file name or path, resolved like template names
    pub path: String,
}

impl ArtRef {
    /// Create an art reference
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Top-left corner `(y, x)` that centres a `width` x `height` block in `rect`.
///
/// The slot centre is the truncated midpoint of each axis. An odd extent
/// contributes `extent / 2` before the centre, an even one `extent / 2 - 1`.
pub fn align_in_slot(rect: &SlotRect, width: usize, height: usize) -> (i32, i32) {
    fn half(extent: usize) -> i32 {
        let extent = i32::try_from(extent).unwrap_or(i32::MAX);
        extent / 2 - if extent % 2 == 1 { 0 } else { 1 }
    }

    let center_y = (rect.y0 + rect.y1) / 2;
    let center_x = (rect.x0 + rect.x1) / 2;
    (center_y - half(height), center_x - half(width))
}

/// Composes templates, resolving partial and art names through an
/// [`AssetResolver`]
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    resolver: &'a AssetResolver,
}

impl<'a> Composer<'a> {
    /// Create a composer
    pub fn new(resolver: &'a AssetResolver) -> Self {
        Self { resolver }
    }

    /// Resolve `menu` in place.
    ///
    /// `partial_maps[i]` feeds the `i`-th partial slot when present,
    /// otherwise `main` is used. `arts[i]` pairs with the `i`-th art slot;
    /// extra slots or extra arts are ignored.
    pub fn compose(
        &self,
        menu: &mut Menu,
        main: &ValueMap,
        partial_maps: &[Option<&ValueMap>],
        arts: &[ArtRef],
    ) {
        self.compose_layout(menu, main, partial_maps, 0);
        self.overlay_arts(menu, arts);
    }

    fn compose_layout(
        &self,
        menu: &mut Menu,
        map: &ValueMap,
        partial_maps: &[Option<&ValueMap>],
        depth: usize,
    ) {
        apply_inserts(&mut menu.view, &menu.inserts, map);
        menu.view.build_cells();

        for (index, slot) in menu.partials.iter().enumerate() {
            let Some(name) = slot.name.as_deref() else {
                continue;
            };
            if depth >= MAX_PARTIAL_DEPTH {
                log::warn!("Partial '{}' skipped: nesting deeper than {}", name, MAX_PARTIAL_DEPTH);
                continue;
            }
            let Some(mut partial) = Menu::load(self.resolver.resolve_menu(name)) else {
                log::debug!("Partial '{}' not available", name);
                continue;
            };

            let partial_map = partial_maps.get(index).copied().flatten().unwrap_or(map);
            self.compose_layout(&mut partial, partial_map, &[], depth + 1);
            menu.view.blit(&partial.view, slot.rect.y0, slot.rect.x0);
        }
    }

    fn overlay_arts(&self, menu: &mut Menu, arts: &[ArtRef]) {
        for (slot, art_ref) in menu.arts.iter().zip(arts) {
            let Some(file) = ArtFile::load(self.resolver.resolve_art(&art_ref.path)) else {
                log::debug!("Art file '{}' not available", art_ref.path);
                continue;
            };
            let Some(art) = file.select(&art_ref.name) else {
                log::debug!("Art '{}' has no variant '{}'", art_ref.path, art_ref.name);
                continue;
            };

            let mut view = art.view.clone();
            view.build_cells();
            let (y, x) = align_in_slot(&slot.rect, view.cols(), view.rows());
            menu.view.blit(&view, y, x);
        }
    }
}
