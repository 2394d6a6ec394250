use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::error::SceneError;

/// Pixels of a decoded image, tightly packed rows of `channels` bytes per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

/// Turns an image file into pixel data.
pub trait ImageCodec {
    /// Decode the file at `path`, keeping its native channel count.
    ///
    /// With `flip_vertically` the first row of `pixels` is the bottom row of the
    /// image, which puts the texture coordinate origin at the bottom-left.
    fn decode(&self, path: &Path, flip_vertically: bool) -> Result<DecodedImage, SceneError>;
}

/// [`ImageCodec`] backed by the `image` crate. The format is guessed from the
/// file contents.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateCodec;

impl ImageCodec for ImageCrateCodec {
    fn decode(&self, path: &Path, flip_vertically: bool) -> Result<DecodedImage, SceneError> {
        let decode_error = |reason: String| SceneError::Decode {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| decode_error(e.to_string()))?;
        let img = image::load_from_memory(&bytes).map_err(|e| decode_error(e.to_string()))?;
        let img = if flip_vertically { img.flipv() } else { img };
        Ok(from_dynamic(&img))
    }
}

/// Keep the channel count but narrow every sample to 8 bit.
pub fn from_dynamic(img: &DynamicImage) -> DecodedImage {
    let (width, height) = img.dimensions();
    let channels = img.color().channel_count();
    let pixels = match channels {
        1 => img.to_luma8().into_raw(),
        2 => img.to_luma_alpha8().into_raw(),
        3 => img.to_rgb8().into_raw(),
        _ => img.to_rgba8().into_raw(),
    };
    DecodedImage {
        pixels,
        width,
        height,
        channels,
    }
}
