//! GPU-side state for one resolved screen
//!
//! A [`RenderState`] pairs the uploaded atlas texture with its glyph table
//! and remembers the grid shape it was built for. Any change to the shape or
//! to the set of glyphs on screen requires a rebuild.

use super::text::font_atlas::{collect_glyphs, FontAtlas, FontResult, Glyph, GlyphRasterizer};
use super::texture::{TextureHandle, TextureUploader};
use crate::view::View;

/// Uploaded atlas plus the grid it describes
#[derive(Debug, Clone)]
pub struct RenderState {
    texture: TextureHandle,
    glyphs: Vec<Glyph>,
    grid_cols: usize,
    grid_rows: usize,
    cell_size: (u32, u32),
}

impl RenderState {
    /// Build the atlas for `view` and upload it once
    pub fn build(
        view: &View,
        rasterizer: &dyn GlyphRasterizer,
        uploader: &mut dyn TextureUploader,
    ) -> FontResult<Self> {
        let atlas = FontAtlas::build(view, rasterizer)?;
        let texture = uploader.upload(atlas.image())?;
        Ok(Self::from_atlas(&atlas, texture, view))
    }

    /// Wrap an atlas that has already been uploaded
    pub fn from_atlas(atlas: &FontAtlas, texture: TextureHandle, view: &View) -> Self {
        Self {
            texture,
            glyphs: atlas.glyphs().to_vec(),
            grid_cols: view.cols(),
            grid_rows: view.rows(),
            cell_size: atlas.cell_size(),
        }
    }

    /// Whether `view` differs in shape or glyph set from what was packed
    pub fn needs_rebuild(&self, view: &View) -> bool {
        if view.cols() != self.grid_cols || view.rows() != self.grid_rows {
            return true;
        }
        let glyphs = collect_glyphs(view);
        glyphs.len() != self.glyphs.len() || glyphs.iter().any(|&ch| self.glyph(ch).is_none())
    }

    /// Replace this state with one built for `view`, releasing the old texture
    pub fn rebuild(
        &mut self,
        view: &View,
        rasterizer: &dyn GlyphRasterizer,
        uploader: &mut dyn TextureUploader,
    ) -> FontResult<()> {
        let next = Self::build(view, rasterizer, uploader)?;
        uploader.release(self.texture);
        *self = next;
        Ok(())
    }

    /// Release the texture
    pub fn release(self, uploader: &mut dyn TextureUploader) {
        uploader.release(self.texture);
    }

    /// Glyph for `ch` (linear scan)
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.iter().find(|glyph| glyph.ch == ch)
    }

    /// Atlas texture
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Glyph table
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Grid columns the atlas was built for
    pub fn grid_cols(&self) -> usize {
        self.grid_cols
    }

    /// Grid rows the atlas was built for
    pub fn grid_rows(&self) -> usize {
        self.grid_rows
    }

    /// Glyph cell size in pixels
    pub fn cell_size(&self) -> (u32, u32) {
        self.cell_size
    }
}
