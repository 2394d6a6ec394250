mod common;

use common::test_utils::{FakeCodec, desk_scene_path, init_logger};
use scene_binder::{
    ConfigError, MeshKind, SceneConfig, SceneRenderer, Shading, recording::Recorder,
};

#[test]
fn desk_scene_parses_and_validates() {
    init_logger();
    let config = SceneConfig::from_path(desk_scene_path()).unwrap();

    assert_eq!(config.commands.len(), 29);
    assert_eq!(config.textures.len(), 12);
    assert_eq!(config.materials.len(), 6);
    assert_eq!(config.lighting.sources().len(), 2);
    assert!(config.lighting.enabled);
    assert!(config.validate().is_empty());

    let colored = config
        .commands
        .iter()
        .filter(|command| matches!(command.shading, Shading::Color(_)))
        .count();
    assert_eq!(colored, 6);
}

#[test]
fn texture_paths_resolve_next_to_the_scene_file() {
    let config = SceneConfig::from_path(desk_scene_path()).unwrap();
    let first = config.texture_path(&config.textures[0]);
    assert_eq!(
        first,
        desk_scene_path()
            .parent()
            .unwrap()
            .join("textures")
            .join("Glass.png")
    );
}

#[test]
fn desk_scene_setup_loads_every_texture_flipped() {
    init_logger();
    let config = SceneConfig::from_path(desk_scene_path()).unwrap();
    let mut renderer = SceneRenderer::from_config(config);
    let codec = FakeCodec::new();
    let mut ctx = Recorder::new();

    renderer.setup(&codec, &mut ctx);

    let decoded = codec.decoded();
    assert_eq!(decoded.len(), 12);
    assert!(decoded.iter().all(|(_, flipped)| *flipped));
    assert_eq!(renderer.textures().len(), 12);
    assert_eq!(renderer.textures().find_slot("Wheel"), Some(11));
    assert_eq!(
        ctx.prepared(),
        vec![
            MeshKind::Plane,
            MeshKind::Box,
            MeshKind::Cylinder,
            MeshKind::Sphere,
            MeshKind::Torus,
            MeshKind::Cone,
        ]
    );
}

#[test]
fn missing_scene_file_is_an_io_error() {
    let err = SceneConfig::from_path("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("exist.toml"));
}
