//! Print the calls one frame of a scene makes, without a GPU.
//!
//! ```text
//! scene-trace [scene.toml]
//! ```
//!
//! Setup calls are printed first, then the frame. Use `RUST_LOG=debug` to see
//! unresolved texture and material tags.

use std::path::PathBuf;

use anyhow::Context;
use scene_binder::{
    SceneConfig, SceneRenderer, recording::Recorder, resources::codec::ImageCrateCodec,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("scenes/desk.toml"));
    let config = SceneConfig::from_path(&path)
        .with_context(|| format!("failed to read scene {}", path.display()))?;

    let mut renderer = SceneRenderer::from_config(config);
    let mut ctx = Recorder::new();

    renderer.setup(&ImageCrateCodec, &mut ctx);
    println!("# setup");
    for event in ctx.events() {
        println!("{event}");
    }

    ctx.clear_events();
    renderer.render(&mut ctx);
    println!("# frame");
    for event in ctx.events() {
        println!("{event}");
    }

    renderer.teardown(&mut ctx);
    Ok(())
}
