//! Scene setup and the per-object render protocol.
//!
//! [`SceneRenderer`] owns the registries, the lighting and the ordered draw
//! commands of one static scene. It is driven in three steps:
//!
//! - [`SceneRenderer::setup`] once: textures are loaded and bound, lights are
//!   pushed and every needed geometry is prepared
//! - [`SceneRenderer::render`] every frame: each command pushes its transform,
//!   shading and material and is then drawn
//! - [`SceneRenderer::teardown`] at the end, releasing the GPU textures
//!
//! Nothing is returned from a frame. Unknown texture or material tags degrade
//! the affected draw but never stop the scene.

use std::path::PathBuf;

use crate::{
    config::{SceneConfig, TextureSource},
    context::RenderContext,
    data_structures::{
        command::{DrawCommand, Shading},
        instance::Transform,
        light::Lighting,
        material::{Material, MaterialRegistry},
        texture::TextureRegistry,
    },
    resources::{codec::ImageCodec, mesh::required_geometries, resolve_asset_path},
    shader::ShaderBinder,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Ready,
    TornDown,
}

#[derive(Debug)]
pub struct SceneRenderer {
    asset_root: Option<PathBuf>,
    texture_sources: Vec<TextureSource>,
    material_definitions: Vec<Material>,
    lighting: Lighting,
    commands: Vec<DrawCommand>,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    lifecycle: Lifecycle,
}

impl SceneRenderer {
    pub fn new(
        texture_sources: Vec<TextureSource>,
        materials: Vec<Material>,
        lighting: Lighting,
        commands: Vec<DrawCommand>,
    ) -> Self {
        Self {
            asset_root: None,
            texture_sources,
            material_definitions: materials,
            lighting,
            commands,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn from_config(config: SceneConfig) -> Self {
        for issue in config.validate() {
            log::warn!("{issue}");
        }
        let mut renderer = Self::new(
            config.textures,
            config.materials,
            config.lighting,
            config.commands,
        );
        renderer.asset_root = config.asset_root;
        renderer
    }

    /// Load and bind textures, define materials, push the lighting and prepare
    /// meshes. A texture that fails to load is logged and skipped; draws using
    /// its tag then sample slot -1.
    pub fn setup<C>(&mut self, codec: &dyn ImageCodec, ctx: &mut C)
    where
        C: RenderContext + ?Sized,
    {
        if self.lifecycle != Lifecycle::Created {
            log::warn!(
                "Scene setup requested in state {:?}, ignoring it.",
                self.lifecycle
            );
            return;
        }

        for source in &self.texture_sources {
            let path = resolve_asset_path(self.asset_root.as_deref(), &source.path);
            if let Err(err) = self.textures.load(&path, &source.tag, codec, ctx) {
                log::error!("Could not load texture '{}': {err}", source.tag);
            }
        }
        self.textures.bind_all(ctx);

        for material in &self.material_definitions {
            self.materials.define(material.clone());
        }

        ShaderBinder::new(&self.textures, &self.materials).set_lighting(ctx, &self.lighting);

        for geometry in required_geometries(self.commands.iter().map(|command| command.mesh)) {
            ctx.prepare(geometry);
        }

        log::info!(
            "Scene ready: {} textures, {} materials, {} lights, {} draw commands",
            self.textures.len(),
            self.materials.len(),
            self.lighting.sources().len(),
            self.commands.len()
        );
        self.lifecycle = Lifecycle::Ready;
    }

    /// Draw every command in order.
    pub fn render<C>(&self, ctx: &mut C)
    where
        C: RenderContext + ?Sized,
    {
        if self.lifecycle != Lifecycle::Ready {
            log::warn!(
                "Render requested in state {:?}, skipping the frame.",
                self.lifecycle
            );
            return;
        }

        let binder = ShaderBinder::new(&self.textures, &self.materials);
        for command in &self.commands {
            Self::render_command(binder, command, ctx);
        }
    }

    fn render_command<C>(binder: ShaderBinder<'_>, command: &DrawCommand, ctx: &mut C)
    where
        C: RenderContext + ?Sized,
    {
        log::trace!("draw {} at {:?}", command.mesh, command.position);
        binder.set_transform(ctx, Transform::from(command).to_matrix());

        match &command.shading {
            Shading::Color([r, g, b, a]) => binder.set_color(ctx, *r, *g, *b, *a),
            Shading::Texture { tag, uv_scale } => {
                binder.set_texture(ctx, tag);
                binder.set_uv_scale(ctx, uv_scale[0], uv_scale[1]);
            }
        }

        if let Some(material) = &command.material {
            binder.set_material(ctx, material);
        }

        ctx.draw(command.mesh);
    }

    /// Release every texture. The renderer cannot be set up again afterwards.
    pub fn teardown<C>(&mut self, ctx: &mut C)
    where
        C: RenderContext + ?Sized,
    {
        self.textures.release_all(ctx);
        self.lifecycle = Lifecycle::TornDown;
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}
