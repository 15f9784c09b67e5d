use bevy::prelude::*;

/// Palette lifted from the site theme.
pub const MINT_GREEN: Color = Color::srgb(0.596, 0.984, 0.596);
pub const CURSED_BLACK: Color = Color::srgb(0.039, 0.039, 0.047);
pub const PORTFOLIO_WHITE: Color = Color::srgb(0.941, 0.941, 0.925);

/// Dark screen plane shown while a device is not lit.
pub const SCREEN_OFF: Color = Color::srgb(0.063, 0.063, 0.063);

/// Fallback wireframe boxes when device geometry is unavailable.
pub const PLACEHOLDER_MODEL_MISSING: Color = Color::srgb(0.85, 0.15, 0.15);
pub const PLACEHOLDER_MESH_MISSING: Color = Color::srgb(0.55, 0.15, 0.65);

pub const CHASSIS_WIREFRAME_OPACITY: f32 = 0.7;
pub const BEZEL_WIREFRAME_OPACITY: f32 = 0.15;
pub const BEZEL_EMISSIVE_INTENSITY: f32 = 0.3;
