use std::f32::consts::{FRAC_PI_2, PI};

use bevy::gltf::{Gltf, GltfMesh};
use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;

use constants::device::{
    PHONE_BODY_MESH, PHONE_PLACEHOLDER_SIZE, PHONE_PLANE_ASPECT, PHONE_PLANE_OFFSET,
    PHONE_PLANE_WIDTH, PHONE_SCALE, PHONE_SCREEN_MESH, PHONE_VIDEO_SIZE, PHONE_WORLD_POSITION,
};
use constants::theme::MINT_GREEN;

use crate::engine::assets::{named_mesh, DeviceModelAssets, MeshLookup};
use crate::engine::devices::screen::ScreenSurface;
use crate::engine::devices::screen_material::ScreenMaterial;
use crate::engine::devices::{
    bezel_material, chassis_material, spawn_placeholder, AlphaMaskedScreen, DevicePresenter,
};
use crate::engine::registry::{DeviceKind, ProjectRecord};
use crate::engine::video::VideoSurface;

/// Spawn the phone assembly for `record`. The phone is rigid (no hinge);
/// its screen planes carry the rounded-corner alpha mask, enabled once
/// the mask texture has loaded so no rectangular flash appears.
#[allow(clippy::too_many_arguments)]
pub fn spawn(
    commands: &mut Commands,
    record: &ProjectRecord,
    index: usize,
    models: &DeviceModelAssets,
    gltfs: &Assets<Gltf>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    screen_materials: &mut Assets<ScreenMaterial>,
    images: &mut Assets<Image>,
) {
    let body = named_mesh(gltfs, gltf_meshes, &models.phone, PHONE_BODY_MESH);
    let bezel = named_mesh(gltfs, gltf_meshes, &models.phone, PHONE_SCREEN_MESH);

    let (body, bezel) = match (body, bezel) {
        (MeshLookup::Found(body), MeshLookup::Found(bezel)) => (body, bezel),
        (lookup, _) => {
            spawn_placeholder(
                commands,
                DeviceKind::Phone,
                index,
                lookup,
                PHONE_PLACEHOLDER_SIZE,
                PHONE_WORLD_POSITION,
                meshes,
                materials,
            );
            return;
        }
    };

    let plane_height = PHONE_PLANE_WIDTH / PHONE_PLANE_ASPECT;
    let surface = VideoSurface::acquire(&record.video_src, PHONE_VIDEO_SIZE, images);
    let mut material = ScreenMaterial::unlit(
        surface.image().clone(),
        Some(models.screen_alpha_mask.clone()),
    );
    material.set_alpha_masked(models.alpha_mask_loaded);
    let screen_material = screen_materials.add(material);

    commands
        .spawn((
            DevicePresenter {
                kind: DeviceKind::Phone,
                index,
                placeholder: false,
            },
            Transform::from_translation(PHONE_WORLD_POSITION)
                .with_scale(Vec3::splat(PHONE_SCALE))
                .with_rotation(Quat::from_euler(EulerRot::XYZ, -FRAC_PI_2, 0.0, -PI)),
            Visibility::default(),
        ))
        .with_children(|phone| {
            phone.spawn((
                Name::new("phone_body"),
                Mesh3d(body),
                MeshMaterial3d(materials.add(chassis_material())),
                Wireframe,
                WireframeColor { color: MINT_GREEN },
            ));

            phone.spawn((
                Name::new("phone_screen_bezel"),
                Mesh3d(bezel),
                MeshMaterial3d(materials.add(bezel_material())),
                Wireframe,
                WireframeColor { color: MINT_GREEN },
            ));

            phone.spawn((
                Name::new("phone_video_plane"),
                Mesh3d(meshes.add(Rectangle::new(PHONE_PLANE_WIDTH, plane_height))),
                MeshMaterial3d(screen_material),
                AlphaMaskedScreen,
                ScreenSurface::new(
                    record.title.clone(),
                    record.project_link().map(str::to_string),
                    Vec2::new(PHONE_PLANE_WIDTH / 2.0, plane_height / 2.0),
                ),
                surface,
                Transform::from_translation(PHONE_PLANE_OFFSET)
                    .with_rotation(Quat::from_euler(EulerRot::XYZ, FRAC_PI_2, PI, 0.0)),
            ));
        });
}
