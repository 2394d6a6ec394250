//! GPU textures and the texture backend seam.
//!
//! [`TextureBackend`] is what the texture registry talks to when it needs a GPU
//! texture. [`WgpuTextures`] is the wgpu implementation: every upload becomes an
//! sRGB RGBA texture with a full mip chain and a repeat/linear sampler, and
//! texture units are modelled as a fixed table of bound handles.

use image::{DynamicImage, RgbImage, RgbaImage, imageops::FilterType};

use crate::{
    data_structures::texture::{MAX_TEXTURE_SLOTS, TextureHandle},
    error::SceneError,
    resources::codec::DecodedImage,
};

/// Creates, binds and frees GPU textures on behalf of the texture registry.
pub trait TextureBackend {
    /// Upload `image` (RGB or RGBA) into a new texture.
    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<TextureHandle, SceneError>;

    /// Make `handle` the texture sampled through texture unit `unit`.
    fn bind(&mut self, unit: u32, handle: TextureHandle);

    fn release(&mut self, handle: TextureHandle);
}

/// A GPU texture with its view and sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub mip_level_count: u32,
}

impl Texture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Upload a decoded image together with every mip level down to 1x1.
    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &DecodedImage,
        label: &str,
    ) -> Result<Self, SceneError> {
        let rgba = to_rgba(image)?;
        let levels = mip_chain(rgba);
        let (width, height) = levels[0].dimensions();

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            let (w, h) = level.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                level.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * w),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d {
                    width: w,
                    height: h,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_repeat_sampler(device);

        Ok(Self {
            texture,
            view,
            sampler,
            mip_level_count: levels.len() as u32,
        })
    }
}

/// Repeat on every axis, linear filtering within and between mip levels.
pub fn create_repeat_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}

/// Number of mip levels for a full chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// The base image followed by each successively halved level.
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let count = mip_level_count(base.width(), base.height()) as usize;
    let mut levels = Vec::with_capacity(count);
    levels.push(base);
    while levels.len() < count {
        let prev = &levels[levels.len() - 1];
        let width = (prev.width() / 2).max(1);
        let height = (prev.height() / 2).max(1);
        let next = image::imageops::resize(prev, width, height, FilterType::Triangle);
        levels.push(next);
    }
    levels
}

/// Widen RGB to RGBA, the GPU has no 3-channel 8-bit format.
pub fn to_rgba(image: &DecodedImage) -> Result<RgbaImage, SceneError> {
    let malformed = || {
        SceneError::Upload(format!(
            "{}x{} image with {} channels does not match its {} bytes of pixel data",
            image.width,
            image.height,
            image.channels,
            image.pixels.len()
        ))
    };
    if image.width == 0 || image.height == 0 {
        return Err(malformed());
    }
    match image.channels {
        3 => RgbImage::from_raw(image.width, image.height, image.pixels.clone())
            .map(|rgb| DynamicImage::ImageRgb8(rgb).to_rgba8())
            .ok_or_else(malformed),
        4 => RgbaImage::from_raw(image.width, image.height, image.pixels.clone())
            .ok_or_else(malformed),
        channels => Err(SceneError::Upload(format!(
            "cannot upload an image with {channels} channels"
        ))),
    }
}

/// Layout of the texture-unit bind group: unit `i` is a texture at binding
/// `2 * i` and its sampler at `2 * i + 1`.
pub fn texture_units_layout(device: &wgpu::Device, units: u32) -> wgpu::BindGroupLayout {
    let entries: Vec<_> = (0..units)
        .flat_map(|unit| {
            [
                wgpu::BindGroupLayoutEntry {
                    binding: 2 * unit,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2 * unit + 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ]
        })
        .collect();
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("texture_units_bind_group_layout"),
    })
}

/// wgpu implementation of [`TextureBackend`].
#[derive(Debug)]
pub struct WgpuTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    textures: Vec<Option<Texture>>,
    units: [Option<TextureHandle>; MAX_TEXTURE_SLOTS],
}

impl WgpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            device: device.clone(),
            queue: queue.clone(),
            textures: Vec::new(),
            units: [None; MAX_TEXTURE_SLOTS],
        }
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0 as usize).and_then(Option::as_ref)
    }

    /// Texture currently bound to `unit`.
    pub fn unit(&self, unit: u32) -> Option<&Texture> {
        self.units
            .get(unit as usize)
            .copied()
            .flatten()
            .and_then(|handle| self.get(handle))
    }

    /// Number of leading units that have a live texture bound.
    pub fn bound_units(&self) -> u32 {
        (0..MAX_TEXTURE_SLOTS as u32)
            .take_while(|&unit| self.unit(unit).is_some())
            .count() as u32
    }

    /// Bind group exposing units `0..units` through a layout made by
    /// [`texture_units_layout`]. `None` when one of those units is empty.
    pub fn bind_group(
        &self,
        layout: &wgpu::BindGroupLayout,
        units: u32,
    ) -> Option<wgpu::BindGroup> {
        let mut entries = Vec::with_capacity(2 * units as usize);
        for unit in 0..units {
            let texture = self.unit(unit)?;
            entries.push(wgpu::BindGroupEntry {
                binding: 2 * unit,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            });
            entries.push(wgpu::BindGroupEntry {
                binding: 2 * unit + 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            });
        }
        Some(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &entries,
            label: Some("texture_units_bind_group"),
        }))
    }
}

impl TextureBackend for WgpuTextures {
    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<TextureHandle, SceneError> {
        let texture = Texture::from_decoded(&self.device, &self.queue, image, label)?;
        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(Some(texture));
        Ok(handle)
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        match self.units.get_mut(unit as usize) {
            Some(slot) => *slot = Some(handle),
            None => log::warn!("Texture unit {unit} does not exist, {handle:?} stays unbound."),
        }
    }

    fn release(&mut self, handle: TextureHandle) {
        if let Some(texture) = self.textures.get_mut(handle.0 as usize).and_then(Option::take) {
            texture.texture.destroy();
        }
        for slot in self.units.iter_mut() {
            if *slot == Some(handle) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_levels_cover_the_longest_side() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 64), 9);
        assert_eq!(mip_level_count(300, 1), 9);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn mip_chain_halves_down_to_one_pixel() {
        let levels = mip_chain(RgbaImage::new(8, 2));
        let sizes: Vec<_> = levels.iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn rgb_is_widened_with_opaque_alpha() {
        let image = DecodedImage {
            pixels: vec![1, 2, 3, 4, 5, 6],
            width: 2,
            height: 1,
            channels: 3,
        };
        let rgba = to_rgba(&image).unwrap();
        assert_eq!(rgba.as_raw(), &vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn short_pixel_buffers_are_rejected() {
        let image = DecodedImage {
            pixels: vec![0; 7],
            width: 2,
            height: 1,
            channels: 4,
        };
        assert!(matches!(to_rgba(&image), Err(SceneError::Upload(_))));
    }

    #[test]
    fn zero_sized_images_are_not_uploaded() {
        let image = DecodedImage {
            pixels: Vec::new(),
            width: 0,
            height: 3,
            channels: 4,
        };
        assert!(matches!(to_rgba(&image), Err(SceneError::Upload(_))));
    }
}
