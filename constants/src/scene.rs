use bevy::prelude::*;

/// Soft white ambient fill.
pub const AMBIENT_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Warm key light, camera-left and above, casts shadows.
pub const KEY_LIGHT_COLOUR: Color = Color::srgb(1.0, 0.968, 0.910);
pub const KEY_LIGHT_LUX: f32 = 9_000.0;
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(-4.0, 5.0, 4.0);

/// Cool fill light from behind, no shadows.
pub const FILL_LIGHT_COLOUR: Color = Color::srgb(0.910, 0.941, 1.0);
pub const FILL_LIGHT_LUX: f32 = 2_500.0;
pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(4.0, 3.0, -3.0);

pub const SHADOW_MAP_SIZE: usize = 1024;
