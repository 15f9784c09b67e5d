pub mod laptop;
pub mod phone;
pub mod screen;
pub mod screen_material;

use bevy::gltf::{Gltf, GltfMesh};
use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;

use constants::device::{
    HINGE_CLOSED_RADIANS, HINGE_OPEN_RADIANS, LAPTOP_VIDEO_SIZE, PHONE_VIDEO_SIZE,
};
use constants::theme::{
    BEZEL_EMISSIVE_INTENSITY, BEZEL_WIREFRAME_OPACITY, CHASSIS_WIREFRAME_OPACITY, MINT_GREEN,
    PLACEHOLDER_MESH_MISSING, PLACEHOLDER_MODEL_MISSING,
};

use crate::engine::assets::{DeviceModelAssets, MeshLookup};
use crate::engine::carousel::{CarouselState, ProjectChanged};
use crate::engine::core::app_state::AppState;
use crate::engine::registry::{DeviceKind, DeviceType, ProjectRegistry};
use crate::engine::video::{self, VideoSurface};
use laptop::ScreenHinge;
use screen::{ActivationChange, ScreenSurface};
use screen_material::ScreenMaterial;

/// Root of the currently mounted device assembly. At most one exists.
#[derive(Component)]
pub struct DevicePresenter {
    pub kind: DeviceKind,
    pub index: usize,
    /// True when the assembly is a fallback box instead of real geometry.
    pub placeholder: bool,
}

/// Phone screen planes whose material carries the rounded-corner mask.
#[derive(Component)]
pub struct AlphaMaskedScreen;

/// The laptop presenter is active iff the carousel is visible and the
/// current project is laptop-class.
pub fn laptop_active(visible: bool, device_type: Option<DeviceType>) -> bool {
    visible && matches!(device_type.map(DeviceType::kind), Some(DeviceKind::Laptop))
}

/// The phone presenter is active iff the carousel is visible and the
/// current project has a defined, non-laptop-class type.
pub fn phone_active(visible: bool, device_type: Option<DeviceType>) -> bool {
    visible && matches!(device_type.map(DeviceType::kind), Some(DeviceKind::Phone))
}

pub struct DevicePresenterPlugin;

impl Plugin for DevicePresenterPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<ScreenMaterial>::default())
            .add_systems(
                Update,
                (
                    (
                        sync_presenter_with_project,
                        upgrade_placeholder_presenter,
                        update_screen_activation,
                    )
                        .chain()
                        .run_if(in_state(AppState::MainContent)),
                    screen::screen_pointer_system.run_if(in_state(AppState::MainContent)),
                    laptop::animate_screen_hinge,
                    video::update_video_textures,
                    apply_alpha_mask_when_loaded,
                ),
            );
    }
}

fn video_size(kind: DeviceKind) -> UVec2 {
    match kind {
        DeviceKind::Laptop => LAPTOP_VIDEO_SIZE,
        DeviceKind::Phone => PHONE_VIDEO_SIZE,
    }
}

/// Mount the presenter for the current project.
///
/// Same-kind changes swap the video source in place (release before
/// acquire) and rebind the plane texture; kind changes or placeholder
/// upgrades despawn the old assembly and spawn the right variant.
#[allow(clippy::too_many_arguments)]
fn sync_presenter_with_project(
    mut changed: EventReader<ProjectChanged>,
    mut commands: Commands,
    registry: Res<ProjectRegistry>,
    models: Res<DeviceModelAssets>,
    gltfs: Res<Assets<Gltf>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut screen_materials: ResMut<Assets<ScreenMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut presenters: Query<(Entity, &mut DevicePresenter)>,
    mut surfaces: Query<(
        &mut ScreenSurface,
        &mut VideoSurface,
        &MeshMaterial3d<ScreenMaterial>,
    )>,
) {
    let Some(event) = changed.read().last().copied() else {
        return;
    };
    let record = registry.get(event.index);
    let kind = record.device_type.kind();

    if let Ok((entity, mut presenter)) = presenters.single_mut() {
        if presenter.kind == kind && !presenter.placeholder {
            presenter.index = event.index;
            if let Ok((mut surface, mut video, material)) = surfaces.single_mut() {
                if video.source() != record.video_src {
                    swap_video_source(
                        &surface,
                        &mut video,
                        &record.video_src,
                        video_size(kind),
                        &mut images,
                    );
                    if let Some(material) = screen_materials.get_mut(&material.0) {
                        material.video_texture = Some(video.image().clone());
                    }
                }
                surface.title = record.title.clone();
                surface.link = record.project_link().map(str::to_string);
            }
            return;
        }
        // Kind changed or geometry can be upgraded: tear the old
        // assembly down. Despawn drops the video surface before the
        // replacement spawns below.
        commands.entity(entity).despawn();
    }

    match kind {
        DeviceKind::Laptop => laptop::spawn(
            &mut commands,
            record,
            event.index,
            &models,
            &gltfs,
            &gltf_meshes,
            &mut meshes,
            &mut materials,
            &mut screen_materials,
            &mut images,
        ),
        DeviceKind::Phone => phone::spawn(
            &mut commands,
            record,
            event.index,
            &models,
            &gltfs,
            &gltf_meshes,
            &mut meshes,
            &mut materials,
            &mut screen_materials,
            &mut images,
        ),
    }
}

/// Derive active flags and drive screen lighting, playback and the hinge.
fn update_screen_activation(
    time: Res<Time>,
    carousel: Res<CarouselState>,
    registry: Res<ProjectRegistry>,
    presenters: Query<&DevicePresenter>,
    mut surfaces: Query<(
        &mut ScreenSurface,
        &mut VideoSurface,
        &MeshMaterial3d<ScreenMaterial>,
    )>,
    mut hinges: Query<&mut ScreenHinge>,
    mut screen_materials: ResMut<Assets<ScreenMaterial>>,
) {
    let device_type = Some(registry.get(carousel.current_index()).device_type);
    let laptop_on = laptop_active(carousel.is_visible, device_type);
    let phone_on = phone_active(carousel.is_visible, device_type);

    let Ok(presenter) = presenters.single() else {
        return;
    };
    let active = match presenter.kind {
        DeviceKind::Laptop => laptop_on,
        DeviceKind::Phone => phone_on,
    };

    if let Ok((mut surface, mut video, material)) = surfaces.single_mut() {
        match surface.set_active(active) {
            ActivationChange::BecameActive => video.play(),
            ActivationChange::BecameInactive => video.pause(),
            ActivationChange::Unchanged => {}
        }
        surface.tick(time.delta());
        if let Some(material) = screen_materials.get_mut(&material.0) {
            material.set_lit(surface.lit());
        }
    }

    for mut hinge in &mut hinges {
        hinge.target = if laptop_on {
            HINGE_OPEN_RADIANS
        } else {
            HINGE_CLOSED_RADIANS
        };
    }
}

/// Re-announce the current project once a placeholder's model has
/// finished loading, so the sync system swaps in the real geometry.
fn upgrade_placeholder_presenter(
    presenters: Query<&DevicePresenter>,
    models: Res<DeviceModelAssets>,
    gltfs: Res<Assets<Gltf>>,
    mut changed: EventWriter<ProjectChanged>,
) {
    let Ok(presenter) = presenters.single() else {
        return;
    };
    if !presenter.placeholder {
        return;
    }
    let model = match presenter.kind {
        DeviceKind::Laptop => &models.laptop,
        DeviceKind::Phone => &models.phone,
    };
    if gltfs.get(model).is_some() {
        info!("Device model ready, replacing placeholder");
        changed.write(ProjectChanged {
            index: presenter.index,
        });
    }
}

/// Flip the rounded-corner mask on once its texture is available,
/// completing the phone's three-way screen state.
fn apply_alpha_mask_when_loaded(
    models: Res<DeviceModelAssets>,
    masked_screens: Query<&MeshMaterial3d<ScreenMaterial>, With<AlphaMaskedScreen>>,
    mut screen_materials: ResMut<Assets<ScreenMaterial>>,
) {
    if !models.alpha_mask_loaded {
        return;
    }
    for material in &masked_screens {
        if let Some(material) = screen_materials.get_mut(&material.0) {
            if material.params.y < 0.5 {
                material.set_alpha_masked(true);
            }
        }
    }
}

/// Swap the video plane to a new source. The replacement surface starts
/// paused, so playback resumes here when the screen is already active;
/// the activation edge alone would report `Unchanged` and never play.
fn swap_video_source(
    surface: &ScreenSurface,
    video: &mut VideoSurface,
    source: &str,
    size: UVec2,
    images: &mut Assets<Image>,
) {
    video.replace_source(source, size, images);
    if surface.is_active() {
        video.play();
    }
}

fn chassis_material() -> StandardMaterial {
    StandardMaterial {
        base_color: MINT_GREEN.with_alpha(CHASSIS_WIREFRAME_OPACITY),
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

fn bezel_material() -> StandardMaterial {
    StandardMaterial {
        base_color: MINT_GREEN.with_alpha(BEZEL_WIREFRAME_OPACITY),
        emissive: MINT_GREEN.to_linear() * BEZEL_EMISSIVE_INTENSITY,
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        ..default()
    }
}

/// Defensive fallback: a clearly marked wireframe box instead of the
/// device. Red while the model is still loading (or absent), purple when
/// the model loaded without the expected meshes.
#[allow(clippy::too_many_arguments)]
fn spawn_placeholder(
    commands: &mut Commands,
    kind: DeviceKind,
    index: usize,
    lookup: MeshLookup,
    size: Vec3,
    position: Vec3,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let colour = match lookup {
        MeshLookup::MeshMissing => {
            error!("Device model for {kind:?} is missing its expected meshes");
            PLACEHOLDER_MESH_MISSING
        }
        _ => {
            warn!("Device model for {kind:?} not loaded yet, showing placeholder");
            PLACEHOLDER_MODEL_MISSING
        }
    };

    commands
        .spawn((
            DevicePresenter {
                kind,
                index,
                placeholder: true,
            },
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .with_children(|root| {
            root.spawn((
                Name::new("device_placeholder"),
                Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: colour.with_alpha(0.4),
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
                Wireframe,
                WireframeColor { color: colour },
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::device::SCREEN_LIT_DELAY_MS;
    use std::time::Duration;

    #[test]
    fn source_swap_resumes_playback_while_active() {
        let mut images = Assets::default();
        let mut video = VideoSurface::acquire("videos/a.mp4", UVec2::new(64, 64), &mut images);
        let mut surface = ScreenSurface::new("A".to_string(), None, Vec2::splat(0.5));

        surface.set_active(true);
        surface.tick(Duration::from_millis(SCREEN_LIT_DELAY_MS));
        video.play();
        assert!(surface.lit());
        assert!(video.is_playing());

        swap_video_source(
            &surface,
            &mut video,
            "videos/b.mp4",
            UVec2::new(64, 64),
            &mut images,
        );
        assert_eq!(video.source(), "videos/b.mp4");
        // The lit screen must not freeze on the old frame.
        assert!(video.is_playing());
    }

    #[test]
    fn source_swap_while_inactive_stays_paused() {
        let mut images = Assets::default();
        let mut video = VideoSurface::acquire("videos/a.mp4", UVec2::new(64, 64), &mut images);
        let surface = ScreenSurface::new("A".to_string(), None, Vec2::splat(0.5));

        swap_video_source(
            &surface,
            &mut video,
            "videos/b.mp4",
            UVec2::new(64, 64),
            &mut images,
        );
        assert_eq!(video.source(), "videos/b.mp4");
        assert!(!video.is_playing());
    }

    #[test]
    fn exactly_one_variant_active_for_visible_projects() {
        for device_type in [DeviceType::Website, DeviceType::MobileWebApp] {
            let laptop = laptop_active(true, Some(device_type));
            let phone = phone_active(true, Some(device_type));
            assert!(laptop ^ phone, "exactly one variant must be active");
        }
    }

    #[test]
    fn nothing_active_when_hidden_or_untyped() {
        for device_type in [Some(DeviceType::Website), Some(DeviceType::MobileWebApp), None] {
            assert!(!laptop_active(false, device_type));
            assert!(!phone_active(false, device_type));
        }
        assert!(!laptop_active(true, None));
        assert!(!phone_active(true, None));
    }

    #[test]
    fn website_projects_activate_the_laptop() {
        assert!(laptop_active(true, Some(DeviceType::Website)));
        assert!(!phone_active(true, Some(DeviceType::Website)));
    }

    #[test]
    fn mobile_projects_activate_the_phone() {
        assert!(phone_active(true, Some(DeviceType::MobileWebApp)));
        assert!(!laptop_active(true, Some(DeviceType::MobileWebApp)));
    }

    #[test]
    fn two_project_scenario_alternates_variants() {
        let registry = ProjectRegistry::builtin();
        let mut carousel = CarouselState::new(registry.len());
        carousel.is_visible = true;

        let device_type = |carousel: &CarouselState| {
            Some(registry.get(carousel.current_index()).device_type)
        };

        assert!(laptop_active(true, device_type(&carousel)));
        assert!(!phone_active(true, device_type(&carousel)));

        carousel.next();
        assert!(phone_active(true, device_type(&carousel)));
        assert!(!laptop_active(true, device_type(&carousel)));

        carousel.next();
        assert_eq!(carousel.current_index(), 0);
        assert!(laptop_active(true, device_type(&carousel)));
    }
}
