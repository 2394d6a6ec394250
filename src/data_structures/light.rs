//! Scene lighting: a handful of point lights plus one ambient term.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Light source slots reserved in the shader.
pub const MAX_LIGHTS: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightSource {
    pub position: [f32; 3],
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    /// Specular exponent of the highlight this light produces.
    pub focal_strength: f32,
    /// In `[0, 1]`.
    pub specular_intensity: f32,
}

impl LightSource {
    /// Pull `specular_intensity` into `[0, 1]`, warning when it had to move.
    pub fn clamped(mut self) -> Self {
        let specular_intensity = self.specular_intensity.clamp(0.0, 1.0);
        if specular_intensity != self.specular_intensity {
            log::warn!(
                "Light at {:?}: specular intensity {} clamped to {}",
                self.position,
                self.specular_intensity,
                specular_intensity
            );
            self.specular_intensity = specular_intensity;
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: [0.0; 3],
            intensity: 0.0,
        }
    }
}

/// Everything the shader needs to light the scene. Defined once during setup
/// and never touched while rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default)]
    sources: Vec<LightSource>,
    #[serde(default)]
    pub ambient: AmbientLight,
}

fn enabled() -> bool {
    true
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            enabled: true,
            sources: Vec::new(),
            ambient: AmbientLight::default(),
        }
    }
}

impl Lighting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light source to the next free slot.
    pub fn define(&mut self, light: LightSource) -> Result<usize, SceneError> {
        if self.sources.len() >= MAX_LIGHTS {
            return Err(SceneError::LightCapacityExceeded {
                capacity: MAX_LIGHTS,
            });
        }
        self.sources.push(light.clamped());
        Ok(self.sources.len() - 1)
    }

    pub fn sources(&self) -> &[LightSource] {
        &self.sources
    }

    /// Bring deserialized lighting back within its limits: sources past
    /// [`MAX_LIGHTS`] are dropped and every source is clamped, both with a
    /// warning.
    pub(crate) fn clamp_to_limits(&mut self) {
        if self.sources.len() > MAX_LIGHTS {
            log::warn!(
                "{} light sources defined, only the first {} are used.",
                self.sources.len(),
                MAX_LIGHTS
            );
            self.sources.truncate(MAX_LIGHTS);
        }
        self.sources = std::mem::take(&mut self.sources)
            .into_iter()
            .map(LightSource::clamped)
            .collect();
    }

    /// Sunlight through a window plus a neutral overhead light.
    pub fn desk() -> Self {
        let mut lighting = Lighting::new();
        lighting.sources = vec![
            LightSource {
                position: [10.0, 15.0, -5.0],
                ambient_color: [0.6, 0.55, 0.5],
                diffuse_color: [1.0, 0.95, 0.85],
                specular_color: [1.0, 1.0, 0.9],
                focal_strength: 64.0,
                specular_intensity: 0.7,
            },
            LightSource {
                position: [0.0, 10.0, 0.0],
                ambient_color: [0.5, 0.5, 0.5],
                diffuse_color: [0.7, 0.7, 0.8],
                specular_color: [0.6, 0.6, 0.7],
                focal_strength: 32.0,
                specular_intensity: 0.5,
            },
        ];
        lighting.ambient = AmbientLight {
            color: [0.5, 0.5, 0.55],
            intensity: 1.0,
        };
        lighting
    }
}
