//! Draw commands: the externalized scene content.
//!
//! A scene is nothing more than an ordered list of [`DrawCommand`]s. The order
//! is paint order and carries no other meaning.

use serde::{Deserialize, Serialize};

/// The primitive shapes offered by the mesh library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    Plane,
    Box,
    Sphere,
    HalfSphere,
    Cylinder,
    Cone,
    Torus,
    HalfTorus,
}

impl MeshKind {
    /// The geometry a kind is drawn from. Half variants reuse the full shape's
    /// vertex data and only draw part of its index range.
    pub fn geometry(self) -> MeshKind {
        match self {
            MeshKind::HalfSphere => MeshKind::Sphere,
            MeshKind::HalfTorus => MeshKind::Torus,
            other => other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MeshKind::Plane => "plane",
            MeshKind::Box => "box",
            MeshKind::Sphere => "sphere",
            MeshKind::HalfSphere => "half_sphere",
            MeshKind::Cylinder => "cylinder",
            MeshKind::Cone => "cone",
            MeshKind::Torus => "torus",
            MeshKind::HalfTorus => "half_torus",
        }
    }
}

impl std::fmt::Display for MeshKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a command's surface gets its base color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shading {
    /// Flat RGBA color, texturing disabled.
    Color([f32; 4]),
    /// A registered texture looked up by tag, tiled by `uv_scale`.
    Texture {
        tag: String,
        #[serde(default = "unit_uv_scale")]
        uv_scale: [f32; 2],
    },
}

fn unit_uv_scale() -> [f32; 2] {
    [1.0, 1.0]
}

impl Shading {
    pub fn color(r: f32, g: f32, b: f32, a: f32) -> Self {
        Shading::Color([r, g, b, a])
    }

    pub fn texture(tag: impl Into<String>) -> Self {
        Shading::Texture {
            tag: tag.into(),
            uv_scale: unit_uv_scale(),
        }
    }
}

/// One unit of scene content: a mesh kind, its transform and its shading bindings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub mesh: MeshKind,
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Degrees around X, Y and Z.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub position: [f32; 3],
    pub shading: Shading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl DrawCommand {
    /// A unit-sized, unrotated command at the origin.
    pub fn new(mesh: MeshKind, shading: Shading) -> Self {
        Self {
            mesh,
            scale: unit_scale(),
            rotation: [0.0; 3],
            position: [0.0; 3],
            shading,
            material: None,
        }
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = [x, y, z];
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = [x, y, z];
        self
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    pub fn with_material(mut self, tag: impl Into<String>) -> Self {
        self.material = Some(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_variants_share_geometry() {
        assert_eq!(MeshKind::HalfSphere.geometry(), MeshKind::Sphere);
        assert_eq!(MeshKind::HalfTorus.geometry(), MeshKind::Torus);
        assert_eq!(MeshKind::Cone.geometry(), MeshKind::Cone);
    }

    #[test]
    fn command_parses_with_defaults() {
        let command: DrawCommand = toml::from_str(
            r#"
            mesh = "half_torus"
            shading = { texture = { tag = "Headphone" } }
            "#,
        )
        .unwrap();
        assert_eq!(command.mesh, MeshKind::HalfTorus);
        assert_eq!(command.scale, [1.0, 1.0, 1.0]);
        assert_eq!(command.rotation, [0.0, 0.0, 0.0]);
        assert_eq!(command.shading, Shading::texture("Headphone"));
        assert_eq!(command.material, None);
    }

    #[test]
    fn color_shading_parses() {
        let command: DrawCommand = toml::from_str(
            r#"
            mesh = "sphere"
            position = [1.0, 0.0, 0.0]
            shading = { color = [1.0, 0.0, 0.0, 1.0] }
            material = "glass"
            "#,
        )
        .unwrap();
        assert_eq!(command.shading, Shading::color(1.0, 0.0, 0.0, 1.0));
        assert_eq!(command.material.as_deref(), Some("glass"));
    }
}
