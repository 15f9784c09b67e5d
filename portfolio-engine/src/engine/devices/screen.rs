use std::time::Duration;

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use constants::device::SCREEN_LIT_DELAY_MS;

use crate::engine::web::open_external_link;

/// Lit-state machine and hit area of one device display plane.
///
/// Activation starts the warm-up timer; the video plane only lights once
/// the timer elapses, masking texture warm-up. Deactivation unlights
/// immediately and cancels any pending warm-up.
#[derive(Component)]
pub struct ScreenSurface {
    active: bool,
    lit: bool,
    warm_up: Option<Timer>,
    pub link: Option<String>,
    pub title: String,
    /// Half extents of the plane in its local space, for pointer hits.
    pub half_extents: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationChange {
    BecameActive,
    BecameInactive,
    Unchanged,
}

impl ScreenSurface {
    pub fn new(title: String, link: Option<String>, half_extents: Vec2) -> Self {
        Self {
            active: false,
            lit: false,
            warm_up: None,
            link,
            title,
            half_extents,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn lit(&self) -> bool {
        self.lit
    }

    /// Apply the derived active flag. Rising edge schedules warm-up,
    /// falling edge unlights immediately.
    pub fn set_active(&mut self, active: bool) -> ActivationChange {
        if active == self.active {
            return ActivationChange::Unchanged;
        }
        self.active = active;
        if active {
            self.warm_up = Some(Timer::from_seconds(
                SCREEN_LIT_DELAY_MS as f32 / 1000.0,
                TimerMode::Once,
            ));
            ActivationChange::BecameActive
        } else {
            self.lit = false;
            self.warm_up = None;
            ActivationChange::BecameInactive
        }
    }

    /// Advance the warm-up timer. Returns `true` on the tick the screen
    /// lights up.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if let Some(timer) = self.warm_up.as_mut() {
            if timer.tick(dt).just_finished() {
                self.warm_up = None;
                self.lit = true;
                return true;
            }
        }
        false
    }
}

/// Ray/plane hit test in the plane's local space. The plane mesh is a
/// rectangle in local XY facing +Z.
pub fn screen_ray_hit(ray: &Ray3d, plane: &GlobalTransform, half_extents: Vec2) -> bool {
    let to_local = plane.affine().inverse();
    let origin = to_local.transform_point3(ray.origin);
    let direction = to_local.transform_vector3(*ray.direction);
    if direction.z.abs() < 1e-6 {
        return false;
    }
    let t = -origin.z / direction.z;
    if t <= 0.0 {
        return false;
    }
    let hit = origin + direction * t;
    hit.x.abs() <= half_extents.x && hit.y.abs() <= half_extents.y
}

/// Navigation decision for one screen under the pointer ray. Only a lit
/// plane hit by the ray with a defined link yields a target; unlit
/// planes ignore the pointer entirely.
pub fn click_target<'a>(
    screen: &'a ScreenSurface,
    ray: &Ray3d,
    plane: &GlobalTransform,
) -> Option<&'a str> {
    if !screen.lit() || !screen_ray_hit(ray, plane, screen.half_extents) {
        return None;
    }
    screen.link.as_deref()
}

/// Click-through and hover affordance for lit screens.
///
/// Clicking a lit plane with a defined link opens it in a new browsing
/// context; without a link it is a logged no-op.
pub fn screen_pointer_system(
    mut commands: Commands,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    screens: Query<(&ScreenSurface, &GlobalTransform)>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    let Ok((window_entity, window)) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let mut hovering_link = false;
    for (screen, transform) in &screens {
        if let Some(link) = click_target(screen, &ray, transform) {
            hovering_link = true;
            if mouse.just_pressed(MouseButton::Left) {
                info!("Opening project link for {}", screen.title);
                open_external_link(link);
            }
        } else if screen.lit()
            && screen_ray_hit(&ray, transform, screen.half_extents)
            && mouse.just_pressed(MouseButton::Left)
        {
            info!("No project link defined for {}", screen.title);
        }
    }

    let icon = if hovering_link {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(window_entity).insert(CursorIcon::from(icon));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> ScreenSurface {
        ScreenSurface::new(
            "Test".to_string(),
            Some("https://example.com".to_string()),
            Vec2::new(0.5, 0.5),
        )
    }

    #[test]
    fn lights_only_after_warm_up_delay() {
        let mut surface = screen();
        assert_eq!(surface.set_active(true), ActivationChange::BecameActive);
        assert!(!surface.lit());

        assert!(!surface.tick(Duration::from_millis(SCREEN_LIT_DELAY_MS - 1)));
        assert!(!surface.lit());
        assert!(surface.tick(Duration::from_millis(1)));
        assert!(surface.lit());
    }

    #[test]
    fn deactivation_unlights_immediately() {
        let mut surface = screen();
        surface.set_active(true);
        surface.tick(Duration::from_millis(SCREEN_LIT_DELAY_MS));
        assert!(surface.lit());

        assert_eq!(surface.set_active(false), ActivationChange::BecameInactive);
        assert!(!surface.lit());
    }

    #[test]
    fn deactivation_cancels_pending_warm_up() {
        let mut surface = screen();
        surface.set_active(true);
        surface.set_active(false);
        // The cancelled warm-up must not light the screen later.
        assert!(!surface.tick(Duration::from_millis(SCREEN_LIT_DELAY_MS * 2)));
        assert!(!surface.lit());
    }

    #[test]
    fn repeated_flags_are_unchanged() {
        let mut surface = screen();
        surface.set_active(true);
        assert_eq!(surface.set_active(true), ActivationChange::Unchanged);
        assert_eq!(surface.set_active(false), ActivationChange::BecameInactive);
        assert_eq!(surface.set_active(false), ActivationChange::Unchanged);
    }

    #[test]
    fn unlit_screen_clicks_never_navigate() {
        let plane = GlobalTransform::from(Transform::IDENTITY);
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 1.0), Dir3::NEG_Z);

        // Link defined, plane under the ray, but the screen is unlit.
        let mut surface = screen();
        assert!(click_target(&surface, &ray, &plane).is_none());

        // The same click navigates once the warm-up has elapsed.
        surface.set_active(true);
        surface.tick(Duration::from_millis(SCREEN_LIT_DELAY_MS));
        assert_eq!(
            click_target(&surface, &ray, &plane),
            Some("https://example.com")
        );
    }

    #[test]
    fn lit_screen_without_link_yields_no_target() {
        let plane = GlobalTransform::from(Transform::IDENTITY);
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 1.0), Dir3::NEG_Z);
        let mut surface = ScreenSurface::new("Test".to_string(), None, Vec2::splat(0.5));
        surface.set_active(true);
        surface.tick(Duration::from_millis(SCREEN_LIT_DELAY_MS));
        assert!(click_target(&surface, &ray, &plane).is_none());
    }

    #[test]
    fn lit_screen_missed_by_ray_yields_no_target() {
        let plane = GlobalTransform::from(Transform::IDENTITY);
        let ray = Ray3d::new(Vec3::new(2.0, 0.0, 1.0), Dir3::NEG_Z);
        let mut surface = screen();
        surface.set_active(true);
        surface.tick(Duration::from_millis(SCREEN_LIT_DELAY_MS));
        assert!(click_target(&surface, &ray, &plane).is_none());
    }

    #[test]
    fn ray_hits_within_plane_extents() {
        let plane = GlobalTransform::from(Transform::IDENTITY);
        let extents = Vec2::new(0.5, 0.25);
        let toward = |origin: Vec3| Ray3d::new(origin, Dir3::NEG_Z);

        assert!(screen_ray_hit(&toward(Vec3::new(0.0, 0.0, 1.0)), &plane, extents));
        assert!(screen_ray_hit(&toward(Vec3::new(0.49, 0.24, 1.0)), &plane, extents));
        assert!(!screen_ray_hit(&toward(Vec3::new(0.6, 0.0, 1.0)), &plane, extents));
        assert!(!screen_ray_hit(&toward(Vec3::new(0.0, 0.3, 1.0)), &plane, extents));
    }

    #[test]
    fn ray_behind_plane_misses() {
        let plane = GlobalTransform::from(Transform::IDENTITY);
        let away = Ray3d::new(Vec3::new(0.0, 0.0, 1.0), Dir3::Z);
        assert!(!screen_ray_hit(&away, &plane, Vec2::splat(0.5)));
    }

    #[test]
    fn ray_respects_plane_transform() {
        let plane = GlobalTransform::from(
            Transform::from_translation(Vec3::new(2.0, 0.0, 0.0))
                .with_scale(Vec3::splat(2.0)),
        );
        let extents = Vec2::splat(0.5);
        let ray = Ray3d::new(Vec3::new(2.9, 0.0, 1.0), Dir3::NEG_Z);
        // 0.9 world units off-centre is inside a plane scaled by two.
        assert!(screen_ray_hit(&ray, &plane, extents));
        let ray = Ray3d::new(Vec3::new(3.1, 0.0, 1.0), Dir3::NEG_Z);
        assert!(!screen_ray_hit(&ray, &plane, extents));
    }
}
