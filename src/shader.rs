//! The shader interface seam and the uniform binder built on top of it.
//!
//! The shading stage consumes a fixed vocabulary of named uniforms. The names
//! below are part of the contract with the shader and have to match exactly.
//! [`ShaderBinder`] turns the per-object operations of the render protocol
//! (set transform, set color, set texture, ...) into writes of those names.

use cgmath::Matrix4;

use crate::data_structures::{
    light::Lighting, material::MaterialRegistry, texture::TextureRegistry,
};

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

pub const AMBIENT_LIGHT_COLOR: &str = "ambientLight.color";
pub const AMBIENT_LIGHT_INTENSITY: &str = "ambientLight.intensity";

/// Sampler slot uploaded when a texture tag is not registered.
pub const UNBOUND_SLOT: i32 = -1;

/// Fields of one `lightSources[i]` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightField {
    Position,
    AmbientColor,
    DiffuseColor,
    SpecularColor,
    FocalStrength,
    SpecularIntensity,
}

impl LightField {
    pub const ALL: [LightField; 6] = [
        LightField::Position,
        LightField::AmbientColor,
        LightField::DiffuseColor,
        LightField::SpecularColor,
        LightField::FocalStrength,
        LightField::SpecularIntensity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LightField::Position => "position",
            LightField::AmbientColor => "ambientColor",
            LightField::DiffuseColor => "diffuseColor",
            LightField::SpecularColor => "specularColor",
            LightField::FocalStrength => "focalStrength",
            LightField::SpecularIntensity => "specularIntensity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Uniform name of a light source field, e.g. `lightSources[1].diffuseColor`.
pub fn light_uniform(index: usize, field: LightField) -> String {
    format!("lightSources[{index}].{}", field.name())
}

/// Split `lightSources[i].field` into its index and field.
pub fn parse_light_uniform(name: &str) -> Option<(usize, LightField)> {
    let rest = name.strip_prefix("lightSources[")?;
    let (index, field) = rest.split_once("].")?;
    Some((index.parse().ok()?, LightField::from_name(field)?))
}

/// Named-uniform writes into the active shader program.
///
/// Writes take effect immediately and stay in place until overwritten, which is
/// what lets a material bound for one draw carry over into the next.
pub trait ShaderInterface {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
    fn set_vec4(&mut self, name: &str, value: [f32; 4]);
    fn set_vec3(&mut self, name: &str, value: [f32; 3]);
    fn set_vec2(&mut self, name: &str, value: [f32; 2]);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_sampler2d(&mut self, name: &str, slot: i32);
}

/// Pushes per-object state into a [`ShaderInterface`], resolving texture and
/// material tags through the registries it borrows.
#[derive(Clone, Copy, Debug)]
pub struct ShaderBinder<'a> {
    textures: &'a TextureRegistry,
    materials: &'a MaterialRegistry,
}

impl<'a> ShaderBinder<'a> {
    pub fn new(textures: &'a TextureRegistry, materials: &'a MaterialRegistry) -> Self {
        Self {
            textures,
            materials,
        }
    }

    pub fn set_transform(&self, shader: &mut (impl ShaderInterface + ?Sized), model: Matrix4<f32>) {
        shader.set_mat4(MODEL, model);
    }

    /// Disable texturing for the next draw and use a flat RGBA color.
    pub fn set_color(
        &self,
        shader: &mut (impl ShaderInterface + ?Sized),
        r: f32,
        g: f32,
        b: f32,
        a: f32,
    ) {
        shader.set_bool(USE_TEXTURE, false);
        shader.set_vec4(OBJECT_COLOR, [r, g, b, a]);
    }

    /// Enable texturing for the next draw and point the sampler at the slot of
    /// `tag`. An unknown tag uploads [`UNBOUND_SLOT`] and draws on without a
    /// texture.
    pub fn set_texture(&self, shader: &mut (impl ShaderInterface + ?Sized), tag: &str) {
        shader.set_bool(USE_TEXTURE, true);
        let slot = match self.textures.find_slot(tag) {
            Some(slot) => slot as i32,
            None => {
                log::debug!("Texture '{tag}' is not registered, drawing without it.");
                UNBOUND_SLOT
            }
        };
        shader.set_sampler2d(OBJECT_TEXTURE, slot);
    }

    pub fn set_uv_scale(&self, shader: &mut (impl ShaderInterface + ?Sized), u: f32, v: f32) {
        shader.set_vec2(UV_SCALE, [u, v]);
    }

    /// Upload the material registered under `tag`.
    ///
    /// On a miss nothing is written: whatever material the previous draw bound
    /// stays in effect. Returns whether the material was found.
    pub fn set_material(&self, shader: &mut (impl ShaderInterface + ?Sized), tag: &str) -> bool {
        let Some(material) = self.materials.find(tag) else {
            log::debug!("Material '{tag}' is not defined, keeping the bound material.");
            return false;
        };
        shader.set_vec3(MATERIAL_AMBIENT_COLOR, material.ambient_color);
        shader.set_float(MATERIAL_AMBIENT_STRENGTH, material.ambient_strength);
        shader.set_vec3(MATERIAL_DIFFUSE_COLOR, material.diffuse_color);
        shader.set_vec3(MATERIAL_SPECULAR_COLOR, material.specular_color);
        shader.set_float(MATERIAL_SHININESS, material.shininess);
        true
    }

    /// Toggle lighting and upload every light source plus the ambient term.
    pub fn set_lighting(&self, shader: &mut (impl ShaderInterface + ?Sized), lighting: &Lighting) {
        shader.set_bool(USE_LIGHTING, lighting.enabled);
        for (index, light) in lighting.sources().iter().enumerate() {
            shader.set_vec3(&light_uniform(index, LightField::Position), light.position);
            shader.set_vec3(
                &light_uniform(index, LightField::AmbientColor),
                light.ambient_color,
            );
            shader.set_vec3(
                &light_uniform(index, LightField::DiffuseColor),
                light.diffuse_color,
            );
            shader.set_vec3(
                &light_uniform(index, LightField::SpecularColor),
                light.specular_color,
            );
            shader.set_float(
                &light_uniform(index, LightField::FocalStrength),
                light.focal_strength,
            );
            shader.set_float(
                &light_uniform(index, LightField::SpecularIntensity),
                light.specular_intensity,
            );
        }
        shader.set_vec3(AMBIENT_LIGHT_COLOR, lighting.ambient.color);
        shader.set_float(AMBIENT_LIGHT_INTENSITY, lighting.ambient.intensity);
    }
}
