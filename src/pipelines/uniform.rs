use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::light::MAX_LIGHTS,
    shader::{self, LightField, ShaderInterface, UNBOUND_SLOT},
};

/// Per-object uniforms: transform, flat color, texture selection and flags.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub texture_slot: i32,
    pub use_texture: u32,
    pub use_lighting: u32,
    // Uniforms are laid out in 16 byte steps, pad to the next one
    _padding: [u32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    _padding: u32,
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    _padding: u32,
    pub specular_color: [f32; 3],
    _padding2: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub sources: [LightUniform; MAX_LIGHTS],
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
}

/**
 * CPU-side copy of everything the shader reads, filled through the named-uniform
 * vocabulary. Every name from `crate::shader` lands in one field of the three
 * GPU structs; names the shader doesn't know are ignored just like a uniform
 * location of -1 would be.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    pub object: ObjectUniform,
    pub material: MaterialUniform,
    pub lighting: LightingUniform,
}

impl UniformBlock {
    pub fn new() -> Self {
        let mut object: ObjectUniform = bytemuck::Zeroable::zeroed();
        object.model = Matrix4::<f32>::identity().into();
        object.uv_scale = [1.0, 1.0];
        object.texture_slot = UNBOUND_SLOT;
        Self {
            object,
            material: bytemuck::Zeroable::zeroed(),
            lighting: bytemuck::Zeroable::zeroed(),
        }
    }

    fn ignored(name: &str) {
        log::warn!("Uniform '{name}' is not part of the shader interface, ignoring it.");
    }

    fn light_mut(&mut self, name: &str) -> Option<(&mut LightUniform, LightField)> {
        let (index, field) = shader::parse_light_uniform(name)?;
        let light = self.lighting.sources.get_mut(index)?;
        Some((light, field))
    }
}

impl Default for UniformBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderInterface for UniformBlock {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        match name {
            shader::MODEL => self.object.model = value.into(),
            _ => Self::ignored(name),
        }
    }

    fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        match name {
            shader::OBJECT_COLOR => self.object.color = value,
            _ => Self::ignored(name),
        }
    }

    fn set_vec3(&mut self, name: &str, value: [f32; 3]) {
        match name {
            shader::MATERIAL_AMBIENT_COLOR => self.material.ambient_color = value,
            shader::MATERIAL_DIFFUSE_COLOR => self.material.diffuse_color = value,
            shader::MATERIAL_SPECULAR_COLOR => self.material.specular_color = value,
            shader::AMBIENT_LIGHT_COLOR => self.lighting.ambient_color = value,
            _ => match self.light_mut(name) {
                Some((light, LightField::Position)) => light.position = value,
                Some((light, LightField::AmbientColor)) => light.ambient_color = value,
                Some((light, LightField::DiffuseColor)) => light.diffuse_color = value,
                Some((light, LightField::SpecularColor)) => light.specular_color = value,
                _ => Self::ignored(name),
            },
        }
    }

    fn set_vec2(&mut self, name: &str, value: [f32; 2]) {
        match name {
            shader::UV_SCALE => self.object.uv_scale = value,
            _ => Self::ignored(name),
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        match name {
            shader::MATERIAL_AMBIENT_STRENGTH => self.material.ambient_strength = value,
            shader::MATERIAL_SHININESS => self.material.shininess = value,
            shader::AMBIENT_LIGHT_INTENSITY => self.lighting.ambient_intensity = value,
            _ => match self.light_mut(name) {
                Some((light, LightField::FocalStrength)) => light.focal_strength = value,
                Some((light, LightField::SpecularIntensity)) => light.specular_intensity = value,
                _ => Self::ignored(name),
            },
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        match name {
            shader::OBJECT_TEXTURE => self.object.texture_slot = value,
            shader::USE_TEXTURE | shader::USE_LIGHTING => self.set_bool(name, value != 0),
            _ => Self::ignored(name),
        }
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        match name {
            shader::USE_TEXTURE => self.object.use_texture = value as u32,
            shader::USE_LIGHTING => self.object.use_lighting = value as u32,
            _ => Self::ignored(name),
        }
    }

    fn set_sampler2d(&mut self, name: &str, slot: i32) {
        match name {
            shader::OBJECT_TEXTURE => self.object.texture_slot = slot,
            _ => Self::ignored(name),
        }
    }
}

/// GPU buffers backing a [`UniformBlock`], bound as group bindings 0 (object),
/// 1 (material) and 2 (lighting).
pub struct UniformBuffers {
    pub object: wgpu::Buffer,
    pub material: wgpu::Buffer,
    pub lighting: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl UniformBuffers {
    pub fn new(device: &wgpu::Device, block: &UniformBlock) -> Self {
        let object = mk_buffer(
            device,
            "Object Uniform Buffer",
            bytemuck::bytes_of(&block.object),
        );
        let material = mk_buffer(
            device,
            "Material Uniform Buffer",
            bytemuck::bytes_of(&block.material),
        );
        let lighting = mk_buffer(
            device,
            "Lighting Uniform Buffer",
            bytemuck::bytes_of(&block.lighting),
        );
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: lighting.as_entire_binding(),
                },
            ],
            label: Some("uniform_bind_group"),
        });
        Self {
            object,
            material,
            lighting,
            bind_group,
            bind_group_layout,
        }
    }

    /// Copy the current CPU-side state into the buffers.
    pub fn write(&self, queue: &wgpu::Queue, block: &UniformBlock) {
        queue.write_buffer(&self.object, 0, bytemuck::bytes_of(&block.object));
        queue.write_buffer(&self.material, 0, bytemuck::bytes_of(&block.material));
        queue.write_buffer(&self.lighting, 0, bytemuck::bytes_of(&block.lighting));
    }
}

pub fn mk_buffer(device: &wgpu::Device, label: &str, contents: &[u8]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let entry = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[entry(0), entry(1), entry(2)],
        label: Some("uniform_bind_group_layout"),
    })
}
