use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

use scene_binder::{
    error::SceneError,
    resources::codec::{DecodedImage, ImageCodec},
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Hands out a small image for every path and remembers what it was asked for.
/// Paths whose file name starts with `broken` fail to decode.
pub struct FakeCodec {
    channels: u8,
    decoded: RefCell<Vec<(PathBuf, bool)>>,
}

impl FakeCodec {
    pub fn new() -> Self {
        Self::with_channels(4)
    }

    pub fn with_channels(channels: u8) -> Self {
        Self {
            channels,
            decoded: RefCell::new(Vec::new()),
        }
    }

    /// Every decoded path with the flip flag it was decoded with.
    pub fn decoded(&self) -> Vec<(PathBuf, bool)> {
        self.decoded.borrow().clone()
    }
}

impl ImageCodec for FakeCodec {
    fn decode(&self, path: &Path, flip_vertically: bool) -> Result<DecodedImage, SceneError> {
        self.decoded
            .borrow_mut()
            .push((path.to_path_buf(), flip_vertically));
        let broken = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with("broken"));
        if broken {
            return Err(SceneError::Decode {
                path: path.to_path_buf(),
                reason: "corrupt file".to_string(),
            });
        }
        Ok(DecodedImage {
            pixels: vec![128; 8 * 8 * self.channels as usize],
            width: 8,
            height: 8,
            channels: self.channels,
        })
    }
}

pub fn desk_scene_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes/desk.toml")
}
