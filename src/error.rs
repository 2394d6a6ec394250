//! Error types for scene setup and configuration loading.
//!
//! The render path itself never fails: lookups that miss return `None`, and
//! setup logs recoverable problems and keeps going. These errors surface from
//! the individual load/define calls so callers and tests can see exactly why
//! a resource was rejected.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while registering scene resources.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The image file could not be read or decoded.
    #[error("could not load image {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// The image decoded fine but is neither RGB nor RGBA.
    #[error("image {path:?} has {channels} channels, only 3 (RGB) and 4 (RGBA) are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    /// All texture slots are taken.
    #[error("cannot register texture '{tag}': all {capacity} texture slots are in use")]
    CapacityExceeded { tag: String, capacity: usize },

    /// All light source slots are taken.
    #[error("cannot define light source: all {capacity} light slots are in use")]
    LightCapacityExceeded { capacity: usize },

    /// The texture backend refused the upload.
    #[error("texture upload failed: {0}")]
    Upload(String),
}

/// Failures while reading a scene description file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read scene file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse scene description")]
    Parse(#[from] toml::de::Error),
}
