//! A render context that records instead of rendering.
//!
//! [`Recorder`] implements every seam the renderer talks to (shader interface,
//! mesh library and texture backend) and appends each call to a single ordered
//! log. It also tracks the current value of every uniform, the way a shader
//! program would. Tests use it to check the exact call sequence of the render
//! protocol; the `scene-trace` binary uses it to dump a frame without a GPU.

use std::{collections::HashMap, fmt};

use cgmath::Matrix4;

use crate::{
    data_structures::{command::MeshKind, texture::TextureHandle},
    error::SceneError,
    resources::{codec::DecodedImage, mesh::MeshLibrary, texture::TextureBackend},
    shader::ShaderInterface,
};

#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    Mat4([[f32; 4]; 4]),
    Vec4([f32; 4]),
    Vec3([f32; 3]),
    Vec2([f32; 2]),
    Float(f32),
    Int(i32),
    Bool(bool),
    Sampler(i32),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Uniform { name: String, value: UniformValue },
    Prepare(MeshKind),
    Draw(MeshKind),
    Upload {
        handle: TextureHandle,
        label: String,
        width: u32,
        height: u32,
        channels: u8,
    },
    Bind { unit: u32, handle: TextureHandle },
    Release(TextureHandle),
}

impl Event {
    pub fn uniform(name: &str, value: UniformValue) -> Self {
        Event::Uniform {
            name: name.to_string(),
            value,
        }
    }
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformValue::Mat4(m) => write!(f, "mat4{m:?}"),
            UniformValue::Vec4(v) => write!(f, "vec4{v:?}"),
            UniformValue::Vec3(v) => write!(f, "vec3{v:?}"),
            UniformValue::Vec2(v) => write!(f, "vec2{v:?}"),
            UniformValue::Float(x) => write!(f, "{x}"),
            UniformValue::Int(x) => write!(f, "{x}"),
            UniformValue::Bool(x) => write!(f, "{x}"),
            UniformValue::Sampler(slot) => write!(f, "sampler2D({slot})"),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Uniform { name, value } => write!(f, "uniform {name} = {value}"),
            Event::Prepare(kind) => write!(f, "prepare {kind}"),
            Event::Draw(kind) => write!(f, "draw {kind}"),
            Event::Upload {
                handle,
                label,
                width,
                height,
                channels,
            } => write!(
                f,
                "upload '{label}' as texture {} ({width}x{height}, {channels} channels)",
                handle.0
            ),
            Event::Bind { unit, handle } => write!(f, "bind texture {} to unit {unit}", handle.0),
            Event::Release(handle) => write!(f, "release texture {}", handle.0),
        }
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<Event>,
    uniforms: HashMap<String, UniformValue>,
    next_handle: u32,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Forget the log but keep uniform state, like a new frame on a live program.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Current value of a uniform.
    pub fn value(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// How often `name` was written since the log was last cleared.
    pub fn writes(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Uniform { name: n, .. } if n == name))
            .count()
    }

    pub fn draws(&self) -> Vec<MeshKind> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Draw(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    pub fn prepared(&self) -> Vec<MeshKind> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Prepare(kind) => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Labels of every uploaded texture.
    pub fn uploads(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Upload { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn bound_units(&self) -> Vec<(u32, TextureHandle)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Bind { unit, handle } => Some((*unit, *handle)),
                _ => None,
            })
            .collect()
    }

    pub fn released(&self) -> Vec<TextureHandle> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Release(handle) => Some(*handle),
                _ => None,
            })
            .collect()
    }

    fn record_uniform(&mut self, name: &str, value: UniformValue) {
        log::trace!("{name} = {value}");
        self.uniforms.insert(name.to_string(), value.clone());
        self.events.push(Event::uniform(name, value));
    }
}

impl ShaderInterface for Recorder {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.record_uniform(name, UniformValue::Mat4(value.into()));
    }

    fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        self.record_uniform(name, UniformValue::Vec4(value));
    }

    fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        self.record_uniform(name, UniformValue::Vec3(value));
    }

    fn set_vec2(&mut self, name: &str, value: [f32; 2]) {
        self.record_uniform(name, UniformValue::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record_uniform(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.record_uniform(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.record_uniform(name, UniformValue::Bool(value));
    }

    fn set_sampler2d(&mut self, name: &str, slot: i32) {
        self.record_uniform(name, UniformValue::Sampler(slot));
    }
}

impl MeshLibrary for Recorder {
    fn prepare(&mut self, kind: MeshKind) {
        self.events.push(Event::Prepare(kind));
    }

    fn draw(&mut self, kind: MeshKind) {
        self.events.push(Event::Draw(kind));
    }
}

impl TextureBackend for Recorder {
    fn upload(&mut self, image: &DecodedImage, label: &str) -> Result<TextureHandle, SceneError> {
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.events.push(Event::Upload {
            handle,
            label: label.to_string(),
            width: image.width,
            height: image.height,
            channels: image.channels,
        });
        Ok(handle)
    }

    fn bind(&mut self, unit: u32, handle: TextureHandle) {
        self.events.push(Event::Bind { unit, handle });
    }

    fn release(&mut self, handle: TextureHandle) {
        self.events.push(Event::Release(handle));
    }
}
