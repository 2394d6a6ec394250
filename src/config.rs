//! Scene description files.
//!
//! A scene is plain data: the textures to load, the materials and lights to
//! define, and the ordered draw commands. It is written in TOML:
//!
//! ```toml
//! asset_root = "textures"
//!
//! [[textures]]
//! path = "Wood.jpg"
//! tag = "Desk"
//!
//! [[materials]]
//! tag = "wood"
//! ambient_color = [0.1, 0.1, 0.1]
//! ambient_strength = 0.2
//! diffuse_color = [0.3, 0.3, 0.3]
//! specular_color = [0.1, 0.1, 0.1]
//! shininess = 0.3
//!
//! [[commands]]
//! mesh = "plane"
//! scale = [20.0, 1.0, 10.0]
//! shading = { texture = { tag = "Desk", uv_scale = [1.0, 1.0] } }
//! material = "wood"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    data_structures::{
        command::{DrawCommand, Shading},
        light::Lighting,
        material::Material,
    },
    error::ConfigError,
    resources::resolve_asset_path,
};

/// A texture file and the tag it is registered under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureSource {
    pub path: PathBuf,
    pub tag: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Directory texture paths are relative to. When loaded through
    /// [`SceneConfig::from_path`] a relative root is taken relative to the
    /// scene file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_root: Option<PathBuf>,
    #[serde(default)]
    pub textures: Vec<TextureSource>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub lighting: Lighting,
    #[serde(default)]
    pub commands: Vec<DrawCommand>,
}

/// A reference from a draw command to something the scene never declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneIssue {
    UnknownTexture { command: usize, tag: String },
    UnknownMaterial { command: usize, tag: String },
}

impl std::fmt::Display for SceneIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneIssue::UnknownTexture { command, tag } => {
                write!(
                    f,
                    "command {command} uses texture '{tag}' which is never loaded"
                )
            }
            SceneIssue::UnknownMaterial { command, tag } => {
                write!(
                    f,
                    "command {command} uses material '{tag}' which is never defined"
                )
            }
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: SceneConfig = toml::from_str(text)?;
        config.materials = std::mem::take(&mut config.materials)
            .into_iter()
            .map(Material::clamped)
            .collect();
        config.lighting.clamp_to_limits();
        Ok(config)
    }

    /// Read a scene file. A relative `asset_root` (or no root at all) is
    /// resolved against the directory the file lives in.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        let scene_dir = path.parent().unwrap_or(Path::new(""));
        config.asset_root = Some(match config.asset_root.take() {
            Some(root) => resolve_asset_path(Some(scene_dir), &root),
            None => scene_dir.to_path_buf(),
        });
        log::info!(
            "Read scene {:?}: {} textures, {} materials, {} lights, {} commands",
            path,
            config.textures.len(),
            config.materials.len(),
            config.lighting.sources().len(),
            config.commands.len()
        );
        Ok(config)
    }

    /// Where the file of a texture source is expected.
    pub fn texture_path(&self, source: &TextureSource) -> PathBuf {
        resolve_asset_path(self.asset_root.as_deref(), &source.path)
    }

    /// Every command that references a texture or material tag the scene does
    /// not declare. Such commands still render, but not as intended.
    pub fn validate(&self) -> Vec<SceneIssue> {
        let mut issues = Vec::new();
        for (command, draw) in self.commands.iter().enumerate() {
            if let Shading::Texture { tag, .. } = &draw.shading {
                if !self.textures.iter().any(|t| &t.tag == tag) {
                    issues.push(SceneIssue::UnknownTexture {
                        command,
                        tag: tag.clone(),
                    });
                }
            }
            if let Some(tag) = &draw.material {
                if !self.materials.iter().any(|m| &m.tag == tag) {
                    issues.push(SceneIssue::UnknownMaterial {
                        command,
                        tag: tag.clone(),
                    });
                }
            }
        }
        issues
    }
}
