use bevy::prelude::*;

/// Viewport width below which the layout is treated as mobile.
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

/// Vertical centre the camera frames devices around.
pub const BASE_TARGET_Y: f32 = -0.2;

/// Default framing: desktop, and every phone view.
pub const DEFAULT_FOV_DEGREES: f32 = 50.0;
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, BASE_TARGET_Y + 0.3, 2.8);

/// Laptop on a mobile viewport: wider FOV and the camera pulled back
/// so the full chassis stays in frame.
pub const WIDE_FOV_DEGREES: f32 = 69.0;
pub const PULLED_BACK_POSITION: Vec3 = Vec3::new(0.0, BASE_TARGET_Y + 0.15, 3.8);

/// Easing rate for camera position/FOV changes, per second.
pub const RIG_LERP_SPEED: f32 = 12.0;
