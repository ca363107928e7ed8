//! Glyph rasterization and atlas packing

pub mod font_atlas;

pub use font_atlas::{
    atlas_grid, collect_glyphs, FontAtlas, FontError, FontResult, FontdueRasterizer, Glyph,
    GlyphBitmap, GlyphRasterizer,
};
