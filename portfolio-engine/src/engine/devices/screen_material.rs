/// Device display surface material
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};

/// Material for the video plane of both device variants.
///
/// `params.x` is the lit flag: 1.0 samples the video texture, 0.0 renders
/// the dark powered-off colour.
/// `params.y` is the alpha mask flag: 1.0 shapes the plane through the
/// rounded-corner mask (phone only, once the mask texture has loaded).
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct ScreenMaterial {
    #[texture(0)]
    #[sampler(1)]
    pub video_texture: Option<Handle<Image>>,

    #[texture(2)]
    #[sampler(3)]
    pub alpha_mask: Option<Handle<Image>>,

    #[uniform(4)]
    pub params: Vec4,
}

impl ScreenMaterial {
    pub fn unlit(video_texture: Handle<Image>, alpha_mask: Option<Handle<Image>>) -> Self {
        Self {
            video_texture: Some(video_texture),
            alpha_mask,
            params: Vec4::ZERO,
        }
    }

    pub fn set_lit(&mut self, lit: bool) {
        self.params.x = if lit { 1.0 } else { 0.0 };
    }

    pub fn set_alpha_masked(&mut self, masked: bool) {
        self.params.y = if masked { 1.0 } else { 0.0 };
    }
}

impl Material for ScreenMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/device_screen.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}
