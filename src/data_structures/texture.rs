//! Texture registry: a fixed-capacity tag → slot table.
//!
//! Textures are registered once during scene setup. Their position in the table
//! doubles as the texture unit they get bound to, which is what lets the binder
//! turn a tag into a sampler slot without asking the GPU anything.

use std::path::Path;

use crate::{
    error::SceneError,
    resources::{codec::ImageCodec, texture::TextureBackend},
};

/// Number of texture units available to the shader. Registration beyond this
/// fails with [`SceneError::CapacityExceeded`].
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// Opaque identifier handed out by a [`TextureBackend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: TextureHandle,
}

/// Tag → texture table. Lookups are linear and the first registration of a tag
/// wins; with at most [`MAX_TEXTURE_SLOTS`] entries a scan is all we need.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_TEXTURE_SLOTS),
        }
    }

    /// Decode `path`, upload it and register it under `tag`.
    ///
    /// The image is decoded flipped vertically so texture coordinates have their
    /// origin at the bottom-left. Only RGB and RGBA images are accepted. Nothing
    /// is registered when any step fails, and a full table is rejected before the
    /// file is even read.
    ///
    /// Returns the slot the texture will occupy.
    pub fn load(
        &mut self,
        path: &Path,
        tag: &str,
        codec: &dyn ImageCodec,
        backend: &mut (impl TextureBackend + ?Sized),
    ) -> Result<usize, SceneError> {
        if self.entries.len() >= MAX_TEXTURE_SLOTS {
            return Err(SceneError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: MAX_TEXTURE_SLOTS,
            });
        }

        let image = codec.decode(path, true)?;
        log::info!(
            "Loaded image {:?}, width: {}, height: {}, channels: {}",
            path,
            image.width,
            image.height,
            image.channels
        );
        if image.width == 0 || image.height == 0 {
            return Err(SceneError::Decode {
                path: path.to_path_buf(),
                reason: format!(
                    "image is {}x{}, textures need at least one pixel",
                    image.width,
                    image.height
                ),
            });
        }
        if !matches!(image.channels, 3 | 4) {
            return Err(SceneError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels: image.channels,
            });
        }

        let handle = backend.upload(&image, tag)?;
        if self.find_slot(tag).is_some() {
            log::warn!(
                "Texture tag '{tag}' is already registered, lookups keep finding the first one."
            );
        }
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        Ok(self.entries.len() - 1)
    }

    /// Bind every registered texture to the texture unit equal to its index.
    pub fn bind_all(&self, backend: &mut (impl TextureBackend + ?Sized)) {
        for (unit, entry) in self.entries.iter().enumerate() {
            backend.bind(unit as u32, entry.handle);
        }
    }

    /// Slot of the first texture registered under `tag`.
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    /// Handle of the first texture registered under `tag`.
    pub fn find_id(&self, tag: &str) -> Option<TextureHandle> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.handle)
    }

    /// Release every GPU texture and empty the table.
    pub fn release_all(&mut self, backend: &mut (impl TextureBackend + ?Sized)) {
        for entry in self.entries.drain(..) {
            backend.release(entry.handle);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{recording::Recorder, resources::codec::DecodedImage};
    use std::{cell::Cell, path::Path};

    /// Returns a 2x2 image with the configured channel count.
    struct StubCodec {
        channels: u8,
        size: (u32, u32),
        calls: Cell<usize>,
    }

    impl StubCodec {
        fn new(channels: u8) -> Self {
            Self::sized(channels, 2, 2)
        }

        fn sized(channels: u8, width: u32, height: u32) -> Self {
            Self {
                channels,
                size: (width, height),
                calls: Cell::new(0),
            }
        }
    }

    impl ImageCodec for StubCodec {
        fn decode(&self, _: &Path, flip_vertically: bool) -> Result<DecodedImage, SceneError> {
            assert!(flip_vertically);
            self.calls.set(self.calls.get() + 1);
            let (width, height) = self.size;
            Ok(DecodedImage {
                pixels: vec![255; (width * height) as usize * self.channels as usize],
                width,
                height,
                channels: self.channels,
            })
        }
    }

    #[test]
    fn slots_follow_insertion_order() {
        let codec = StubCodec::new(4);
        let mut backend = Recorder::new();
        let mut registry = TextureRegistry::new();
        for tag in ["Desk", "Body", "Screen"] {
            registry.load(Path::new("x.png"), tag, &codec, &mut backend).unwrap();
        }
        registry.bind_all(&mut backend);

        assert_eq!(registry.find_slot("Desk"), Some(0));
        assert_eq!(registry.find_slot("Body"), Some(1));
        assert_eq!(registry.find_slot("Screen"), Some(2));
        assert_eq!(
            backend.bound_units(),
            vec![
                (0, registry.find_id("Desk").unwrap()),
                (1, registry.find_id("Body").unwrap()),
                (2, registry.find_id("Screen").unwrap()),
            ]
        );
    }

    #[test]
    fn empty_image_is_rejected_before_upload() {
        let mut backend = Recorder::new();
        let mut registry = TextureRegistry::new();
        for (width, height) in [(0, 0), (4, 0), (0, 4)] {
            let codec = StubCodec::sized(4, width, height);
            let err = registry.load(
                Path::new("empty.png"),
                "Empty",
                &codec,
                &mut backend,
            ).unwrap_err();
            assert!(matches!(err, SceneError::Decode { .. }));
        }
        assert!(registry.is_empty());
        assert!(backend.uploads().is_empty());
    }

    #[test]
    fn unknown_tags_are_not_found() {
        let codec = StubCodec::new(3);
        let mut backend = Recorder::new();
        let mut registry = TextureRegistry::new();
        assert_eq!(registry.find_slot("Desk"), None);
        registry.load(Path::new("x.jpg"), "Desk", &codec, &mut backend).unwrap();
        assert_eq!(registry.find_slot("desk"), None);
        assert_eq!(registry.find_id("Desk "), None);
    }

    #[test]
    fn first_registration_of_a_tag_wins() {
        let codec = StubCodec::new(4);
        let mut backend = Recorder::new();
        let mut registry = TextureRegistry::new();
        registry.load(Path::new("a.png"), "Can", &codec, &mut backend).unwrap();
        registry.load(Path::new("b.png"), "Can", &codec, &mut backend).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find_slot("Can"), Some(0));
        assert_eq!(
            registry.find_id("Can"),
            Some(registry.iter().next().unwrap().handle)
        );
    }

    #[test]
    fn grayscale_images_are_rejected_without_registration() {
        let codec = StubCodec::new(2);
        let mut backend = Recorder::new();
        let mut registry = TextureRegistry::new();
        let err = registry
            .load(Path::new("gray.png"), "Gray", &codec, &mut backend)
            .unwrap_err();
        assert!(matches!(err, SceneError::UnsupportedChannels { channels: 2, .. }));
        assert!(registry.is_empty());
        assert!(backend.uploads().is_empty());
    }

    #[test]
    fn seventeenth_texture_is_rejected_before_decoding() {
        let codec = StubCodec::new(4);
        let mut backend = Recorder::new();
        let mut registry = TextureRegistry::new();
        for i in 0..MAX_TEXTURE_SLOTS {
            let slot = registry
                .load(Path::new("x.png"), &format!("tex{i}"), &codec, &mut backend)
                .unwrap();
            assert_eq!(slot, i);
        }
        let err = registry
            .load(Path::new("x.png"), "overflow", &codec, &mut backend)
            .unwrap_err();
        assert!(matches!(err, SceneError::CapacityExceeded { capacity: 16, .. }));
        assert_eq!(codec.calls.get(), MAX_TEXTURE_SLOTS);
        assert_eq!(registry.len(), MAX_TEXTURE_SLOTS);
        assert_eq!(registry.find_slot("overflow"), None);
        assert_eq!(registry.find_slot("tex15"), Some(15));
    }

    #[test]
    fn release_all_frees_every_handle() {
        let codec = StubCodec::new(3);
        let mut backend = Recorder::new();
        let mut registry = TextureRegistry::new();
        registry.load(Path::new("a.jpg"), "A", &codec, &mut backend).unwrap();
        registry.load(Path::new("b.jpg"), "B", &codec, &mut backend).unwrap();
        let handles: Vec<_> = registry.iter().map(|e| e.handle).collect();

        registry.release_all(&mut backend);
        assert!(registry.is_empty());
        assert_eq!(backend.released(), handles);
        assert_eq!(registry.find_id("A"), None);
    }
}
