//! Grid renderer
//!
//! Converts a resolved [`View`] into quad geometry: one textured quad per
//! non-blank cell, scanned in row-major order. Coordinates are in viewport
//! pixels with the origin at the top-left corner and +Y pointing down.

use bytemuck::{Pod, Zeroable};

use super::render_state::RenderState;
use super::texture::TextureHandle;
use crate::view::{View, BLANK};

/// Vertex layout uploaded as-is to the GPU
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GridVertex {
    /// Position in viewport pixels
    pub position: [f32; 2],
    /// Atlas UV
    pub uv: [f32; 2],
    /// RGBA multiplier
    pub color: [f32; 4],
}

/// How many cells (row-major, blanks included) may be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealLimit {
    /// Every cell
    #[default]
    All,
    /// Only the first `n` cells
    Cells(usize),
}

impl RevealLimit {
    fn allows(self, index: usize) -> bool {
        match self {
            Self::All => true,
            Self::Cells(limit) => index < limit,
        }
    }
}

/// Geometry for one frame
#[derive(Debug, Clone, Default)]
pub struct GridFrame {
    /// Atlas texture to bind; `None` for an empty frame
    pub texture: Option<TextureHandle>,
    /// Four vertices per quad
    pub vertices: Vec<GridVertex>,
    /// Six indices per quad, two triangles
    pub indices: Vec<u32>,
}

impl GridFrame {
    /// Number of quads
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Vertex data as bytes for a vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Brightness for the shade block characters; everything else is full
pub fn shade_intensity(ch: char) -> f32 {
    match ch {
        '\u{2591}' => 0.25,
        '\u{2592}' => 0.5,
        '\u{2593}' => 0.75,
        _ => 1.0,
    }
}

/// Stateless quad builder
#[derive(Debug, Clone, Copy, Default)]
pub struct GridRenderer;

impl GridRenderer {
    /// Build the quads of `view` scaled to `viewport` (pixels).
    ///
    /// The grid shape comes from `state`; cells missing from `view` read as
    /// blank. `alpha` is clamped to `[0, 1]`.
    pub fn build_frame(
        state: &RenderState,
        view: &View,
        viewport: (u32, u32),
        alpha: f32,
        limit: RevealLimit,
    ) -> GridFrame {
        let cols = state.grid_cols();
        let rows = state.grid_rows();
        if cols == 0 || rows == 0 || state.glyphs().is_empty() {
            return GridFrame::default();
        }

        let (cell_w, cell_h) = state.cell_size();
        let scale_x = viewport.0 as f32 / (cols as f32 * cell_w as f32);
        let scale_y = viewport.1 as f32 / (rows as f32 * cell_h as f32);
        let draw_w = cell_w as f32 * scale_x;
        let draw_h = cell_h as f32 * scale_y;
        let alpha = alpha.clamp(0.0, 1.0);

        let mut frame = GridFrame {
            texture: Some(state.texture()),
            ..GridFrame::default()
        };

        let cells = (0..rows).flat_map(|y| (0..cols).map(move |x| (y, x)));
        for (index, (y, x)) in cells.enumerate() {
            if !limit.allows(index) {
                break;
            }
            let ch = view.cell(y, x).unwrap_or(BLANK);
            if ch == BLANK {
                continue;
            }
            let Some(glyph) = state.glyph(ch) else {
                continue;
            };

            let shade = shade_intensity(ch);
            let x0 = x as f32 * draw_w;
            let y0 = y as f32 * draw_h;
            push_quad(
                &mut frame,
                [x0, y0, x0 + draw_w, y0 + draw_h],
                [glyph.uv_min.x, glyph.uv_min.y, glyph.uv_max.x, glyph.uv_max.y],
                [shade, shade, shade, alpha],
            );
        }

        log::trace!("Frame built: {} quads", frame.quad_count());
        frame
    }
}

fn push_quad(frame: &mut GridFrame, rect: [f32; 4], uv: [f32; 4], color: [f32; 4]) {
    let [x0, y0, x1, y1] = rect;
    let [u0, v0, u1, v1] = uv;
    let base = frame.vertices.len() as u32;

    frame.vertices.extend_from_slice(&[
        GridVertex { position: [x0, y0], uv: [u0, v0], color },
        GridVertex { position: [x1, y0], uv: [u1, v0], color },
        GridVertex { position: [x1, y1], uv: [u1, v1], color },
        GridVertex { position: [x0, y1], uv: [u0, v1], color },
    ]);
    frame
        .indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::font_atlas::tests::BlockRasterizer;
    use crate::render::texture::MemoryTextureUploader;
    use approx::assert_relative_eq;

    fn setup(lines: &[&str]) -> (View, RenderState) {
        let mut view = View::from_lines(lines.iter().copied());
        view.build_cells();
        let mut uploader = MemoryTextureUploader::new();
        let state = RenderState::build(&view, &BlockRasterizer { cell: (8, 16) }, &mut uploader).unwrap();
        (view, state)
    }

    #[test]
    fn test_one_quad_per_non_blank_cell() {
        let (view, state) = setup(&["a b", " c "]);
        let frame = GridRenderer::build_frame(&state, &view, (24, 32), 1.0, RevealLimit::All);

        assert_eq!(frame.quad_count(), 3);
        assert_eq!(frame.indices.len(), 18);
        assert_eq!(&frame.indices[6..12], &[4, 5, 6, 4, 6, 7]);
        assert_eq!(frame.texture, Some(state.texture()));
        assert_eq!(frame.vertex_bytes().len(), 3 * 4 * std::mem::size_of::<GridVertex>());
    }

    #[test]
    fn test_quads_scale_to_viewport() {
        let (view, state) = setup(&["ab", "cd"]);
        // Grid is 16x32 px, viewport doubles it
        let frame = GridRenderer::build_frame(&state, &view, (32, 64), 1.0, RevealLimit::All);

        let d = &frame.vertices[12..16];
        assert_eq!(d[0].position, [16.0, 32.0]);
        assert_eq!(d[2].position, [32.0, 64.0]);

        let glyph = state.glyph('d').unwrap();
        assert_eq!(d[0].uv, [glyph.uv_min.x, glyph.uv_min.y]);
        assert_eq!(d[2].uv, [glyph.uv_max.x, glyph.uv_max.y]);
    }

    #[test]
    fn test_reveal_limit_counts_blank_cells() {
        let (view, state) = setup(&["a b", "cde"]);
        let draw = |limit| GridRenderer::build_frame(&state, &view, (24, 32), 1.0, limit).quad_count();

        assert_eq!(draw(RevealLimit::Cells(0)), 0);
        assert_eq!(draw(RevealLimit::Cells(2)), 1);
        assert_eq!(draw(RevealLimit::Cells(3)), 2);
        assert_eq!(draw(RevealLimit::Cells(4)), 3);
        assert_eq!(draw(RevealLimit::Cells(100)), 5);
        assert_eq!(draw(RevealLimit::All), 5);
    }

    #[test]
    fn test_shade_and_alpha() {
        let (view, state) = setup(&["░▒▓█"]);
        let frame = GridRenderer::build_frame(&state, &view, (32, 16), 1.7, RevealLimit::All);

        let colors: Vec<[f32; 4]> = frame.vertices.iter().step_by(4).map(|v| v.color).collect();
        assert_eq!(colors[0], [0.25, 0.25, 0.25, 1.0]);
        assert_eq!(colors[1], [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(colors[2], [0.75, 0.75, 0.75, 1.0]);
        assert_eq!(colors[3], [1.0, 1.0, 1.0, 1.0]);

        let faded = GridRenderer::build_frame(&state, &view, (32, 16), -0.5, RevealLimit::All);
        assert_relative_eq!(faded.vertices[0].color[3], 0.0);
    }

    #[test]
    fn test_shade_intensity_table() {
        assert_relative_eq!(shade_intensity('\u{2591}'), 0.25);
        assert_relative_eq!(shade_intensity('\u{2592}'), 0.5);
        assert_relative_eq!(shade_intensity('\u{2593}'), 0.75);
        assert_relative_eq!(shade_intensity('x'), 1.0);
    }
}
