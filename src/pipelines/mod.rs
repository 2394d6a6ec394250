//! GPU-side layout of the shading state.
//!
//! - `uniform` packs the named-uniform vocabulary into `bytemuck` structs and
//!   owns the wgpu buffers they are written to

pub mod uniform;
