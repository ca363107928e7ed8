//! Atlas texture upload
//!
//! The atlas image is handed to a [`TextureUploader`] once per rebuild. A GPU
//! backend implements the trait; [`MemoryTextureUploader`] keeps the images
//! in memory for the viewer tool and tests.

use std::collections::HashMap;

use image::RgbaImage;

/// Handle for an uploaded texture. `0` is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Texture upload failure
#[derive(Debug, thiserror::Error)]
#[error("Texture upload failed: {0}")]
pub struct UploadError(pub String);

/// Receives finished atlas images
pub trait TextureUploader {
    /// Upload an RGBA image, sampled with nearest filtering
    fn upload(&mut self, image: &RgbaImage) -> Result<TextureHandle, UploadError>;

    /// Release a texture returned by [`TextureUploader::upload`]
    fn release(&mut self, handle: TextureHandle);
}

/// In-memory texture store
#[derive(Debug)]
pub struct MemoryTextureUploader {
    textures: HashMap<TextureHandle, RgbaImage>,
    next_handle: u32,
}

impl MemoryTextureUploader {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Image behind a handle
    pub fn get(&self, handle: TextureHandle) -> Option<&RgbaImage> {
        self.textures.get(&handle)
    }

    /// Number of live textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl Default for MemoryTextureUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureUploader for MemoryTextureUploader {
    fn upload(&mut self, image: &RgbaImage) -> Result<TextureHandle, UploadError> {
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.textures.insert(handle, image.clone());

        log::debug!("Uploaded texture {:?} ({}x{})", handle, image.width(), image.height());
        Ok(handle)
    }

    fn release(&mut self, handle: TextureHandle) {
        if self.textures.remove(&handle).is_none() {
            log::warn!("Release of unknown texture {:?}", handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_and_nonzero() {
        let mut uploader = MemoryTextureUploader::new();
        let image = RgbaImage::new(2, 2);
        let a = uploader.upload(&image).unwrap();
        let b = uploader.upload(&image).unwrap();

        assert_ne!(a, b);
        assert_ne!(a, TextureHandle(0));
        assert_eq!(uploader.texture_count(), 2);
    }

    #[test]
    fn test_release_drops_image() {
        let mut uploader = MemoryTextureUploader::new();
        let handle = uploader.upload(&RgbaImage::new(1, 1)).unwrap();
        uploader.release(handle);

        assert!(uploader.get(handle).is_none());
        assert_eq!(uploader.texture_count(), 0);
    }
}
