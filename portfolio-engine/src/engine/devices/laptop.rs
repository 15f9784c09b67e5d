use std::f32::consts::{FRAC_PI_2, PI};

use bevy::gltf::{Gltf, GltfMesh};
use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;

use constants::device::{
    HINGE_CLOSED_RADIANS, HINGE_SMOOTHING, LAPTOP_BASE_MESH, LAPTOP_BEZEL_OFFSET,
    LAPTOP_PLANE_ASPECT, LAPTOP_PLANE_OFFSET, LAPTOP_PLANE_WIDTH, LAPTOP_PLACEHOLDER_SIZE,
    LAPTOP_SCALE, LAPTOP_SCREEN_MESH, LAPTOP_VIDEO_SIZE, LAPTOP_WORLD_POSITION,
};
use constants::theme::MINT_GREEN;

use crate::engine::assets::{named_mesh, DeviceModelAssets, MeshLookup};
use crate::engine::devices::screen::ScreenSurface;
use crate::engine::devices::screen_material::ScreenMaterial;
use crate::engine::devices::{
    bezel_material, chassis_material, spawn_placeholder, DevicePresenter,
};
use crate::engine::registry::{DeviceKind, ProjectRecord};
use crate::engine::video::VideoSurface;

/// Articulated screen assembly pivot. The angle eases toward its target
/// every frame; the target flips with the presenter's active flag.
#[derive(Component)]
pub struct ScreenHinge {
    pub angle: f32,
    pub target: f32,
}

/// One smoothing step of the hinge rotation.
///
/// Linear law `angle += (target - angle) * dt * k`. It can overshoot at
/// very large frame deltas; the open/close motion is tuned around it, so
/// it stays linear rather than exponential.
pub fn hinge_step(angle: f32, target: f32, dt: f32) -> f32 {
    angle + (target - angle) * (dt * HINGE_SMOOTHING)
}

pub fn animate_screen_hinge(
    time: Res<Time>,
    mut hinges: Query<(&mut ScreenHinge, &mut Transform)>,
) {
    for (mut hinge, mut transform) in &mut hinges {
        hinge.angle = hinge_step(hinge.angle, hinge.target, time.delta_secs());
        transform.rotation = Quat::from_rotation_x(hinge.angle);
    }
}

/// Spawn the laptop assembly for `record`. Falls back to a marked
/// placeholder box when the model or its named meshes are unavailable.
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
    let base = named_mesh(gltfs, gltf_meshes, &models.laptop, LAPTOP_BASE_MESH);
    let bezel = named_mesh(gltfs, gltf_meshes, &models.laptop, LAPTOP_SCREEN_MESH);

    let (base, bezel) = match (base, bezel) {
        (MeshLookup::Found(base), MeshLookup::Found(bezel)) => (base, bezel),
        (lookup, _) => {
            spawn_placeholder(
                commands,
                DeviceKind::Laptop,
                index,
                lookup,
                LAPTOP_PLACEHOLDER_SIZE,
                LAPTOP_WORLD_POSITION,
                meshes,
                materials,
            );
            return;
        }
    };

    let plane_height = LAPTOP_PLANE_WIDTH / LAPTOP_PLANE_ASPECT;
    let surface = VideoSurface::acquire(&record.video_src, LAPTOP_VIDEO_SIZE, images);
    let screen_material =
        screen_materials.add(ScreenMaterial::unlit(surface.image().clone(), None));

    commands
        .spawn((
            DevicePresenter {
                kind: DeviceKind::Laptop,
                index,
                placeholder: false,
            },
            Transform::from_translation(LAPTOP_WORLD_POSITION)
                .with_scale(Vec3::splat(LAPTOP_SCALE)),
            Visibility::default(),
        ))
        .with_children(|laptop| {
            laptop.spawn((
                Name::new("laptop_base"),
                Mesh3d(base),
                MeshMaterial3d(materials.add(chassis_material())),
                Wireframe,
                WireframeColor { color: MINT_GREEN },
                Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ));

            laptop
                .spawn((
                    Name::new("laptop_screen_hinge"),
                    ScreenHinge {
                        angle: HINGE_CLOSED_RADIANS,
                        target: HINGE_CLOSED_RADIANS,
                    },
                    Transform::from_rotation(Quat::from_rotation_x(HINGE_CLOSED_RADIANS)),
                    Visibility::default(),
                ))
                .with_children(|hinge| {
                    hinge.spawn((
                        Name::new("laptop_screen_bezel"),
                        Mesh3d(bezel),
                        MeshMaterial3d(materials.add(bezel_material())),
                        Wireframe,
                        WireframeColor { color: MINT_GREEN },
                        Transform::from_translation(LAPTOP_BEZEL_OFFSET)
                            .with_rotation(Quat::from_rotation_y(PI)),
                    ));

                    hinge.spawn((
                        Name::new("laptop_video_plane"),
                        Mesh3d(meshes.add(Rectangle::new(LAPTOP_PLANE_WIDTH, plane_height))),
                        MeshMaterial3d(screen_material),
                        ScreenSurface::new(
                            record.title.clone(),
                            record.project_link().map(str::to_string),
                            Vec2::new(LAPTOP_PLANE_WIDTH / 2.0, plane_height / 2.0),
                        ),
                        surface,
                        Transform::from_translation(LAPTOP_PLANE_OFFSET),
                    ));
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::device::HINGE_OPEN_RADIANS;

    #[test]
    fn hinge_step_matches_linear_law() {
        let angle = HINGE_CLOSED_RADIANS;
        let dt = 0.016;
        let expected = angle + (HINGE_OPEN_RADIANS - angle) * (dt * HINGE_SMOOTHING);
        assert_eq!(hinge_step(angle, HINGE_OPEN_RADIANS, dt), expected);
    }

    #[test]
    fn hinge_converges_toward_target() {
        let mut angle = HINGE_CLOSED_RADIANS;
        for _ in 0..240 {
            angle = hinge_step(angle, HINGE_OPEN_RADIANS, 1.0 / 60.0);
        }
        assert!((angle - HINGE_OPEN_RADIANS).abs() < 1e-3);
    }

    #[test]
    fn hinge_never_overshoots_at_small_deltas() {
        // dt * k < 1 keeps each step inside the remaining gap.
        let mut angle = HINGE_CLOSED_RADIANS;
        for _ in 0..1000 {
            let next = hinge_step(angle, HINGE_OPEN_RADIANS, 1.0 / 60.0);
            assert!(next >= HINGE_OPEN_RADIANS);
            assert!(next <= angle);
            angle = next;
        }
    }

    #[test]
    fn hinge_at_target_stays_put() {
        assert_eq!(
            hinge_step(HINGE_OPEN_RADIANS, HINGE_OPEN_RADIANS, 0.5),
            HINGE_OPEN_RADIANS
        );
    }
}
