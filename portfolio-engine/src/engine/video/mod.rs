#[cfg(target_arch = "wasm32")]
pub mod web;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// A scoped video playback surface.
///
/// Acquired whenever a presenter's video source is assigned, released
/// unconditionally on source change or presenter despawn. Release pauses
/// playback and drops the backing element and texture handle, so two live
/// surfaces never overlap for one presenter.
///
/// On wasm the surface wraps an HTML `<video>` element whose frames are
/// copied into the texture each update; natively a static test card fills
/// the texture so the scene stays exercisable without a media stack.
#[derive(Component)]
pub struct VideoSurface {
    source: String,
    image: Handle<Image>,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    slot: Option<u32>,
    playing: bool,
}

impl VideoSurface {
    pub fn acquire(source: &str, size: UVec2, images: &mut Assets<Image>) -> Self {
        let image = images.add(surface_image(size));

        #[cfg(target_arch = "wasm32")]
        let slot = web::acquire(source, size);
        #[cfg(not(target_arch = "wasm32"))]
        let slot = None;

        info!("Acquired video surface for {source}");
        Self {
            source: source.to_string(),
            image,
            slot,
            playing: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn image(&self) -> &Handle<Image> {
        &self.image
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Attempt playback. Host autoplay policy may reject this; the
    /// failure is logged and the screen simply stays unlit until the next
    /// activation retries.
    pub fn play(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(slot) = self.slot {
            web::play(slot, &self.source);
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(slot) = self.slot {
            web::pause(slot);
        }
        self.playing = false;
    }

    /// Pause and drop the backing element. Safe to call more than once;
    /// also runs on drop so despawn cannot leak the element.
    pub fn release(&mut self) {
        self.playing = false;
        #[cfg(target_arch = "wasm32")]
        if let Some(slot) = self.slot.take() {
            web::release(slot);
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.slot = None;
        }
    }

    /// Swap sources in place: the old surface is fully released before
    /// the replacement is acquired.
    pub fn replace_source(&mut self, source: &str, size: UVec2, images: &mut Assets<Image>) {
        self.release();
        *self = VideoSurface::acquire(source, size, images);
    }
}

impl Drop for VideoSurface {
    fn drop(&mut self) {
        self.release();
    }
}

/// Copy the current video frame of every playing surface into its
/// texture. No-op natively, where the test card is baked at acquisition.
pub fn update_video_textures(
    surfaces: Query<&VideoSurface>,
    mut images: ResMut<Assets<Image>>,
) {
    #[cfg(target_arch = "wasm32")]
    for surface in &surfaces {
        if !surface.playing {
            continue;
        }
        if let Some(slot) = surface.slot {
            if let Some(image) = images.get_mut(&surface.image) {
                web::copy_frame(slot, image);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (surfaces, images.as_mut());
    }
}

/// CPU-writable RGBA surface. On wasm it holds the last copied video
/// frame; natively it is a mint-on-dark diagonal test card.
fn surface_image(size: UVec2) -> Image {
    let (width, height) = (size.x as usize, size.y as usize);
    let mut data = vec![0u8; width * height * 4];
    for y in 0..height {
        for x in 0..width {
            let offset = (y * width + x) * 4;
            let stripe = (x + y) % 96 < 8;
            let (r, g, b) = if stripe { (152, 251, 152) } else { (16, 16, 16) };
            data[offset] = r;
            data[offset + 1] = g;
            data[offset + 2] = b;
            data[offset + 3] = 255;
        }
    }
    Image::new(
        Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> Assets<Image> {
        Assets::default()
    }

    #[test]
    fn acquire_starts_paused() {
        let mut images = images();
        let surface = VideoSurface::acquire("videos/a.mp4", UVec2::new(64, 64), &mut images);
        assert!(!surface.is_playing());
        assert_eq!(surface.source(), "videos/a.mp4");
        assert!(images.get(surface.image()).is_some());
    }

    #[test]
    fn play_then_pause_round_trips() {
        let mut images = images();
        let mut surface = VideoSurface::acquire("videos/a.mp4", UVec2::new(64, 64), &mut images);
        surface.play();
        assert!(surface.is_playing());
        surface.pause();
        assert!(!surface.is_playing());
    }

    #[test]
    fn release_stops_playback_and_is_idempotent() {
        let mut images = images();
        let mut surface = VideoSurface::acquire("videos/a.mp4", UVec2::new(64, 64), &mut images);
        surface.play();
        surface.release();
        assert!(!surface.is_playing());
        surface.release();
        assert!(!surface.is_playing());
    }

    #[test]
    fn replace_source_releases_before_acquiring() {
        let mut images = images();
        let mut surface = VideoSurface::acquire("videos/a.mp4", UVec2::new(64, 64), &mut images);
        surface.play();
        let old_image = surface.image().clone();

        surface.replace_source("videos/b.mp4", UVec2::new(64, 64), &mut images);
        assert_eq!(surface.source(), "videos/b.mp4");
        // The replacement starts paused; playback is driven by activation.
        assert!(!surface.is_playing());
        assert_ne!(*surface.image(), old_image);
    }

    #[test]
    fn surface_image_dimensions_match_request() {
        let image = surface_image(UVec2::new(32, 16));
        assert_eq!(image.texture_descriptor.size.width, 32);
        assert_eq!(image.texture_descriptor.size.height, 16);
    }
}
