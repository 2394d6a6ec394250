//! Named material parameter bundles.

use serde::{Deserialize, Serialize};

/// Phong-style shading parameters looked up by tag at draw time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub tag: String,
    pub ambient_color: [f32; 3],
    /// In `[0, 1]`.
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    /// Specular exponent, never negative.
    pub shininess: f32,
}

impl Material {
    pub fn new(
        tag: impl Into<String>,
        ambient_color: [f32; 3],
        ambient_strength: f32,
        diffuse_color: [f32; 3],
        specular_color: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            tag: tag.into(),
            ambient_color,
            ambient_strength,
            diffuse_color,
            specular_color,
            shininess,
        }
        .clamped()
    }

    /// Pull `ambient_strength` into `[0, 1]` and `shininess` up to zero,
    /// warning about every value that had to move.
    pub fn clamped(mut self) -> Self {
        let ambient_strength = self.ambient_strength.clamp(0.0, 1.0);
        if ambient_strength != self.ambient_strength {
            log::warn!(
                "Material '{}': ambient strength {} clamped to {}",
                self.tag,
                self.ambient_strength,
                ambient_strength
            );
            self.ambient_strength = ambient_strength;
        }
        if self.shininess < 0.0 {
            log::warn!(
                "Material '{}': negative shininess {} clamped to 0",
                self.tag,
                self.shininess
            );
            self.shininess = 0.0;
        }
        self
    }

    /// The materials used by the desk scene.
    pub fn stock() -> Vec<Material> {
        vec![
            Material::new(
                "metal",
                [0.2, 0.2, 0.2],
                0.3,
                [0.2, 0.2, 0.2],
                [0.5, 0.5, 0.5],
                22.0,
            ),
            Material::new(
                "wood",
                [0.1, 0.1, 0.1],
                0.2,
                [0.3, 0.3, 0.3],
                [0.1, 0.1, 0.1],
                0.3,
            ),
            Material::new(
                "glass",
                [0.4, 0.4, 0.4],
                0.3,
                [0.3, 0.3, 0.3],
                [0.6, 0.6, 0.6],
                85.0,
            ),
            Material::new(
                "plastic",
                [0.2, 0.2, 0.2],
                0.5,
                [0.4, 0.4, 0.4],
                [0.7, 0.7, 0.7],
                60.0,
            ),
            // cloth is barely shiny
            Material::new(
                "cloth",
                [0.3, 0.3, 0.3],
                0.7,
                [0.5, 0.5, 0.5],
                [0.1, 0.1, 0.1],
                10.0,
            ),
            Material::new(
                "aluminum",
                [0.3, 0.3, 0.3],
                0.5,
                [0.5, 0.5, 0.5],
                [0.8, 0.8, 0.8],
                90.0,
            ),
        ]
    }
}

/// Append-only material table. Duplicate tags are allowed, lookups return the
/// first match.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, material: Material) {
        log::debug!("Defined material '{}'", material.tag);
        self.materials.push(material);
    }

    /// First material registered under `tag`, `None` when the table is empty or
    /// nothing matches.
    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }
}

impl FromIterator<Material> for MaterialRegistry {
    fn from_iter<T: IntoIterator<Item = Material>>(iter: T) -> Self {
        Self {
            materials: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_finds_nothing() {
        let registry = MaterialRegistry::new();
        assert!(registry.find("wood").is_none());
    }

    #[test]
    fn miss_on_populated_registry_is_not_found() {
        let registry: MaterialRegistry = Material::stock().into_iter().collect();
        assert_eq!(registry.len(), 6);
        assert!(registry.find("rubber").is_none());
        assert!(registry.find("Wood").is_none());
    }

    #[test]
    fn hit_returns_the_fields() {
        let registry: MaterialRegistry = Material::stock().into_iter().collect();
        let glass = registry.find("glass").unwrap();
        assert_eq!(glass.ambient_color, [0.4, 0.4, 0.4]);
        assert_eq!(glass.ambient_strength, 0.3);
        assert_eq!(glass.specular_color, [0.6, 0.6, 0.6]);
        assert_eq!(glass.shininess, 85.0);
    }

    #[test]
    fn duplicates_resolve_to_the_first_definition() {
        let mut registry = MaterialRegistry::new();
        registry.define(
            Material::new("paint", [1.0; 3], 0.1, [1.0; 3], [1.0; 3], 5.0),
        );
        registry.define(
            Material::new("paint", [0.0; 3], 0.9, [0.0; 3], [0.0; 3], 50.0),
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("paint").unwrap().shininess, 5.0);
    }

    #[test]
    fn constructor_clamps_out_of_range_values() {
        let m = Material::new("odd", [0.0; 3], 1.5, [0.0; 3], [0.0; 3], -3.0);
        assert_eq!(m.ambient_strength, 1.0);
        assert_eq!(m.shininess, 0.0);
    }
}
