//! Glyph atlas for text grids
//!
//! Every distinct cell of a resolved [`View`] is rasterized once and packed
//! into a near-square grid of equally sized cells. UV rectangles cover the
//! whole packing cell so that a quad drawn with them reproduces the font's
//! cell exactly. Rasterization goes through [`GlyphRasterizer`]; the
//! `fontdue` implementation is [`FontdueRasterizer`].

use std::path::Path;

use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};

use crate::foundation::math::Vec2;
use crate::render::texture::UploadError;
use crate::view::View;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while building an atlas
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to read a font file
    #[error("Failed to read font file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse font data
    #[error("Failed to load font: {0}")]
    Load(String),

    /// The view has no cells
    #[error("No glyphs to pack")]
    EmptyGlyphSet,

    /// The rasterizer reported a zero-sized cell
    #[error("Invalid cell size {0}x{1}")]
    InvalidCellSize(u32, u32),

    /// Failed to upload the atlas texture
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Failed to write the atlas image
    #[error("Failed to save atlas image: {0}")]
    Image(#[from] image::ImageError),
}

/// Coverage bitmap of one glyph, row-major, one byte per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// `width * height` coverage values
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// Bitmap with no coverage
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; (width * height) as usize],
        }
    }

    fn get(&self, x: u32, y: u32) -> u8 {
        self.coverage
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// Font service producing monospace glyph bitmaps
pub trait GlyphRasterizer {
    /// Packing cell size `(width, height)` in pixels
    fn cell_size(&self) -> (u32, u32);

    /// Render one glyph; `None` when the font cannot produce it
    fn rasterize(&self, ch: char) -> Option<GlyphBitmap>;
}

/// `fontdue`-backed rasterizer
pub struct FontdueRasterizer {
    font: Font,
    size_px: f32,
    ascent: f32,
    cell: (u32, u32),
}

impl FontdueRasterizer {
    /// Create from font bytes (TTF/OTF).
    ///
    /// The cell is the advance of `M` by the line height; `fallback_cell` is
    /// used when the font reports degenerate metrics.
    pub fn new(font_data: &[u8], size_px: f32, fallback_cell: (u32, u32)) -> FontResult<Self> {
        let settings = FontSettings {
            scale: size_px,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(font_data, settings)
            .map_err(|e| FontError::Load(format!("fontdue error: {}", e)))?;

        let (ascent, line_height) = font
            .horizontal_line_metrics(size_px)
            .map_or((size_px, 0.0), |metrics| (metrics.ascent, metrics.new_line_size));
        let width = font.metrics('M', size_px).advance_width.ceil() as u32;
        let height = line_height.ceil() as u32;
        let cell = if width == 0 || height == 0 {
            fallback_cell
        } else {
            (width, height)
        };

        log::info!("Loaded font at {}px, cell {}x{}", size_px, cell.0, cell.1);
        Ok(Self { font, size_px, ascent, cell })
    }

    /// Load from a font file
    pub fn from_file(path: impl AsRef<Path>, size_px: f32, fallback_cell: (u32, u32)) -> FontResult<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::new(&data, size_px, fallback_cell)
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn cell_size(&self) -> (u32, u32) {
        self.cell
    }

    /// Glyph drawn into an advance x line-height box with its baseline at
    /// the font ascent
    fn rasterize(&self, ch: char) -> Option<GlyphBitmap> {
        if self.font.lookup_glyph_index(ch) == 0 && ch != ' ' {
            return None;
        }

        let (metrics, coverage) = self.font.rasterize(ch, self.size_px);
        let width = (metrics.advance_width.ceil() as u32).max(1);
        let height = self.cell.1;
        let mut bitmap = GlyphBitmap::empty(width, height);

        let top = self.ascent.round() as i64 - (i64::from(metrics.ymin) + metrics.height as i64);
        for gy in 0..metrics.height {
            let y = top + gy as i64;
            if y < 0 || y >= i64::from(height) {
                continue;
            }
            for gx in 0..metrics.width {
                let x = i64::from(metrics.xmin) + gx as i64;
                if x < 0 || x >= i64::from(width) {
                    continue;
                }
                bitmap.coverage[(y as u32 * width + x as u32) as usize] = coverage[gy * metrics.width + gx];
            }
        }
        Some(bitmap)
    }
}

/// One packed glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Code point
    pub ch: char,
    /// Top-left UV
    pub uv_min: Vec2,
    /// Bottom-right UV
    pub uv_max: Vec2,
}

/// Distinct cells of `view` in order of first appearance
pub fn collect_glyphs(view: &View) -> Vec<char> {
    let mut glyphs: Vec<char> = Vec::new();
    for (_, _, ch) in view.cells_row_major() {
        if !glyphs.contains(&ch) {
            glyphs.push(ch);
        }
    }
    glyphs
}

/// Packing grid `(columns, rows)` for `count` glyphs: `ceil(sqrt(count))`
/// columns and as many rows as needed
pub fn atlas_grid(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let mut columns = (count as f64).sqrt().ceil() as usize;
    while columns * columns < count {
        columns += 1;
    }
    while columns > 1 && (columns - 1) * (columns - 1) >= count {
        columns -= 1;
    }
    (columns, count.div_ceil(columns))
}

/// Packed RGBA atlas plus its glyph table
#[derive(Debug, Clone)]
pub struct FontAtlas {
    image: RgbaImage,
    glyphs: Vec<Glyph>,
    grid: (usize, usize),
    cell_size: (u32, u32),
}

impl FontAtlas {
    /// Rasterize and pack every distinct cell of `view`
    pub fn build(view: &View, rasterizer: &dyn GlyphRasterizer) -> FontResult<Self> {
        let chars = collect_glyphs(view);
        if chars.is_empty() {
            return Err(FontError::EmptyGlyphSet);
        }
        let (cell_w, cell_h) = rasterizer.cell_size();
        if cell_w == 0 || cell_h == 0 {
            return Err(FontError::InvalidCellSize(cell_w, cell_h));
        }

        let (columns, rows) = atlas_grid(chars.len());
        let atlas_w = columns as u32 * cell_w;
        let atlas_h = rows as u32 * cell_h;
        let mut image = RgbaImage::new(atlas_w, atlas_h);
        let mut glyphs = Vec::with_capacity(chars.len());

        for (index, &ch) in chars.iter().enumerate() {
            let gx = (index % columns) as u32 * cell_w;
            let gy = (index / columns) as u32 * cell_h;

            match rasterizer.rasterize(ch) {
                Some(bitmap) => blit_centered(&mut image, &bitmap, (gx, gy), (cell_w, cell_h)),
                None => log::debug!("No bitmap for {:?}, leaving its cell blank", ch),
            }

            glyphs.push(Glyph {
                ch,
                uv_min: Vec2::new(gx as f32 / atlas_w as f32, gy as f32 / atlas_h as f32),
                uv_max: Vec2::new(
                    (gx + cell_w) as f32 / atlas_w as f32,
                    (gy + cell_h) as f32 / atlas_h as f32,
                ),
            });
        }

        log::info!(
            "Atlas packed: {} glyphs in {}x{} cells, {}x{} px",
            glyphs.len(),
            columns,
            rows,
            atlas_w,
            atlas_h
        );
        Ok(Self {
            image,
            glyphs,
            grid: (columns, rows),
            cell_size: (cell_w, cell_h),
        })
    }

    /// Glyph for `ch` (linear scan)
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.iter().find(|glyph| glyph.ch == ch)
    }

    /// Glyph table in packing order
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Atlas image: white with alpha = coverage
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Packing grid `(columns, rows)`
    pub fn grid(&self) -> (usize, usize) {
        self.grid
    }

    /// Packing cell size in pixels
    pub fn cell_size(&self) -> (u32, u32) {
        self.cell_size
    }

    /// Atlas size in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Write the atlas as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> FontResult<()> {
        self.image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        log::info!("Atlas written to {}", path.as_ref().display());
        Ok(())
    }
}

fn blit_centered(image: &mut RgbaImage, bitmap: &GlyphBitmap, origin: (u32, u32), cell: (u32, u32)) {
    let dx = i64::from(origin.0) + (i64::from(cell.0) - i64::from(bitmap.width)) / 2;
    let dy = i64::from(origin.1) + (i64::from(cell.1) - i64::from(bitmap.height)) / 2;

    for y in 0..bitmap.height {
        let ty = dy + i64::from(y);
        if ty < 0 || ty >= i64::from(image.height()) {
            continue;
        }
        for x in 0..bitmap.width {
            let tx = dx + i64::from(x);
            if tx < 0 || tx >= i64::from(image.width()) {
                continue;
            }
            let alpha = bitmap.get(x, y);
            if alpha > 0 {
                image.put_pixel(tx as u32, ty as u32, Rgba([255, 255, 255, alpha]));
            }
        }
    }
}
