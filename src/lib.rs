//! scene-binder
//!
//! Resource binding and the per-object render protocol of a static 3D scene
//! built from primitive meshes. Textures are registered under string tags and
//! bound to texture units, materials and lights are defined once, and every
//! frame each draw command pushes its transform, shading and material into the
//! shader before its mesh is drawn.
//!
//! High-level modules
//! - `config`: TOML scene files (textures, materials, lights, draw commands)
//! - `context`: the render context seam and its wgpu implementation
//! - `data_structures`: registries, draw commands, lights and transforms
//! - `pipelines`: GPU uniform layout of the shading state
//! - `recording`: a render context that logs calls instead of drawing
//! - `render`: scene setup and the per-frame render loop
//! - `resources`: image decoding, GPU textures and the mesh library seam
//! - `shader`: uniform names and the binder that writes them
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod pipelines;
pub mod recording;
pub mod render;
pub mod resources;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Matrix4, Vector3};
pub use config::SceneConfig;
pub use context::RenderContext;
pub use data_structures::command::{DrawCommand, MeshKind, Shading};
pub use error::{ConfigError, SceneError};
pub use render::SceneRenderer;
