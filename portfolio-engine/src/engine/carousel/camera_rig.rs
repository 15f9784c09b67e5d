use bevy::prelude::*;

use constants::camera::{
    DEFAULT_FOV_DEGREES, DEFAULT_POSITION, PULLED_BACK_POSITION, RIG_LERP_SPEED, WIDE_FOV_DEGREES,
};

use crate::engine::carousel::viewport::ViewportClass;
use crate::engine::carousel::CarouselState;
use crate::engine::registry::{DeviceKind, ProjectRegistry};

/// Target framing for the scene camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub fov_degrees: f32,
    pub position: Vec3,
}

/// Pure function of (active device kind, viewport class).
///
/// The laptop chassis overflows a narrow viewport at the default framing,
/// so that one combination widens the FOV and pulls the camera back.
pub fn derive_camera_rig(active_kind: DeviceKind, viewport: ViewportClass) -> CameraRig {
    if active_kind == DeviceKind::Laptop && viewport.is_mobile {
        CameraRig {
            fov_degrees: WIDE_FOV_DEGREES,
            position: PULLED_BACK_POSITION,
        }
    } else {
        CameraRig {
            fov_degrees: DEFAULT_FOV_DEGREES,
            position: DEFAULT_POSITION,
        }
    }
}

/// Ease the actual camera toward the derived rig each frame.
pub fn apply_camera_rig(
    carousel: Res<CarouselState>,
    registry: Res<ProjectRegistry>,
    viewport: Res<ViewportClass>,
    time: Res<Time>,
    mut camera: Query<(&mut Transform, &mut Projection), With<Camera3d>>,
) {
    let record = registry.get(carousel.current_index());
    let rig = derive_camera_rig(record.device_type.kind(), *viewport);

    if let Ok((mut transform, mut projection)) = camera.single_mut() {
        let lerp = (RIG_LERP_SPEED * time.delta_secs()).min(1.0);
        transform.translation = transform.translation.lerp(rig.position, lerp);
        if let Projection::Perspective(perspective) = projection.as_mut() {
            let target = rig.fov_degrees.to_radians();
            perspective.fov += (target - perspective.fov) * lerp;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOBILE: ViewportClass = ViewportClass { is_mobile: true };
    const DESKTOP: ViewportClass = ViewportClass { is_mobile: false };

    #[test]
    fn wide_fov_only_for_laptop_on_mobile() {
        // Exhaustive over (kind, viewport).
        let wide = derive_camera_rig(DeviceKind::Laptop, MOBILE);
        assert_eq!(wide.fov_degrees, WIDE_FOV_DEGREES);
        assert_eq!(wide.position, PULLED_BACK_POSITION);

        for (kind, viewport) in [
            (DeviceKind::Laptop, DESKTOP),
            (DeviceKind::Phone, MOBILE),
            (DeviceKind::Phone, DESKTOP),
        ] {
            let rig = derive_camera_rig(kind, viewport);
            assert_eq!(rig.fov_degrees, DEFAULT_FOV_DEGREES);
            assert_eq!(rig.position, DEFAULT_POSITION);
        }
    }
}
