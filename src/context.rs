//! Everything the renderer draws into.
//!
//! [`RenderContext`] bundles the three seams a frame touches: the shader
//! interface, the mesh library and the texture backend. Any type implementing
//! all three is a render context, so tests hand the renderer a
//! [`Recorder`](crate::recording::Recorder) and a real application hands it a
//! [`GpuShading`].

use anyhow::Context as _;
use cgmath::Matrix4;

use crate::{
    data_structures::{command::MeshKind, texture::TextureHandle},
    error::SceneError,
    pipelines::uniform::{UniformBlock, UniformBuffers},
    resources::{
        codec::DecodedImage,
        mesh::MeshLibrary,
        texture::{TextureBackend, WgpuTextures},
    },
    shader::ShaderInterface,
};

pub trait RenderContext: ShaderInterface + MeshLibrary + TextureBackend {}

impl<T: ShaderInterface + MeshLibrary + TextureBackend> RenderContext for T {}

/// A wgpu device and queue without a window.
#[derive(Debug, Clone)]
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    pub async fn new() -> anyhow::Result<Self> {
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;
        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("scene device"),
                ..Default::default()
            })
            .await
            .context("failed to open the GPU device")?;

        Ok(Self { device, queue })
    }

    /// Blocking variant of [`GpuContext::new`] for callers outside an executor.
    pub fn headless() -> anyhow::Result<Self> {
        futures::executor::block_on(Self::new())
    }
}

/// Render context backed by wgpu.
///
/// Uniform writes go into a CPU-side [`UniformBlock`] and are flushed to the GPU
/// buffers right before each draw, so every draw sees exactly the state pushed
/// for it. Geometry is left to the wrapped mesh library.
pub struct GpuShading<M> {
    queue: wgpu::Queue,
    pub uniforms: UniformBlock,
    pub buffers: UniformBuffers,
    pub textures: WgpuTextures,
    pub meshes: M,
}

impl<M: MeshLibrary> GpuShading<M> {
    pub fn new(gpu: &GpuContext, meshes: M) -> Self {
        let uniforms = UniformBlock::new();
        let buffers = UniformBuffers::new(&gpu.device, &uniforms);
        Self {
            queue: gpu.queue.clone(),
            uniforms,
            buffers,
            textures: WgpuTextures::new(&gpu.device, &gpu.queue),
            meshes,
        }
    }
}

impl<M> ShaderInterface for GpuShading<M> {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.uniforms.set_mat4(name, value);
    }

    fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        self.uniforms.set_vec4(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.uniforms.set_vec3(name, value);
    }

    fn set_vec2(&mut self, name: &str, value: [f32; 2]) {
        self.uniforms.set_vec2(name, value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.uniforms.set_float(name, value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.uniforms.set_int(name, value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.uniforms.set_bool(name, value);
    }

    fn set_sampler2d(&mut self, name: &str, slot: i32) {
        self.uniforms.set_sampler2d(name, slot);
    }
}

impl<M: MeshLibrary> MeshLibrary for GpuShading<M> {
    fn prepare(&mut self, kind: MeshKind) {
        self.meshes.prepare(kind);
    }

    fn draw(&mut self, kind: MeshKind) {
        self.buffers.write(&self.queue, &self.uniforms);
        self.meshes.draw(kind);
    }
}

impl<M> TextureBackend for GpuShading<M> {
    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<TextureHandle, SceneError> {
        self.textures.upload(image, label)
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        self.textures.bind(unit, handle);
    }

    fn release(&mut self, handle: TextureHandle) {
        self.textures.release(handle);
    }
}
