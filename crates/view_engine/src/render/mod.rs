//! # Rendering
//!
//! Everything between a resolved grid and the GPU:
//!
//! - **Text**: glyph rasterization and atlas packing ([`text`])
//! - **Textures**: atlas upload seam ([`texture`])
//! - **Render State**: uploaded atlas plus the grid it was built for
//! - **Grid Renderer**: per-cell quads with shade, alpha and reveal limit
//! - **Transitions**: fade and typewriter screen replacement, art frame sequences
//!
//! No graphics API is called here; a backend consumes [`GridFrame`] geometry
//! and implements [`TextureUploader`].

pub mod text;
pub mod texture;
pub mod render_state;
pub mod grid_renderer;
pub mod transition;

pub use text::{FontAtlas, FontError, FontResult, FontdueRasterizer, Glyph, GlyphBitmap, GlyphRasterizer};
pub use texture::{MemoryTextureUploader, TextureHandle, TextureUploader, UploadError};
pub use render_state::RenderState;
pub use grid_renderer::{shade_intensity, GridFrame, GridRenderer, GridVertex, RevealLimit};
pub use transition::{AnimationSpeed, ArtSequence, ReplaceMode, ScreenTransition};
