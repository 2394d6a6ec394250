//! Scene data structures: draw commands, transforms, registries and lights.
//!
//! - `command` holds the draw commands that make up a scene
//! - `instance` composes per-object model matrices
//! - `texture` is the fixed-capacity tag → slot texture table
//! - `material` holds named shading parameter bundles
//! - `light` holds light sources and the ambient term

pub mod command;
pub mod instance;
pub mod light;
pub mod material;
pub mod texture;
