use bevy::prelude::*;

pub const LAPTOP_MODEL_PATH: &str = "models/laptop_model.glb";
pub const PHONE_MODEL_PATH: &str = "models/phone_model.glb";
pub const SCREEN_ALPHA_MASK_PATH: &str = "textures/rounded_alpha.png";

/// Named meshes expected inside the device GLB files.
pub const LAPTOP_BASE_MESH: &str = "Frame_ComputerFrame_0";
pub const LAPTOP_SCREEN_MESH: &str = "Screen_ComputerScreen_0";
pub const PHONE_BODY_MESH: &str = "Phone_Case_PhoneCase_Mat_0";
pub const PHONE_SCREEN_MESH: &str = "Phone_Case_PhoneFace_Mat_0";

pub const LAPTOP_WORLD_POSITION: Vec3 = Vec3::new(0.0, -0.4, 0.0);
pub const PHONE_WORLD_POSITION: Vec3 = Vec3::new(0.0, -0.1, 0.0);
pub const LAPTOP_SCALE: f32 = 6.5;
pub const PHONE_SCALE: f32 = 0.03;

/// Hinge target when the laptop screen faces the camera.
pub const HINGE_OPEN_RADIANS: f32 = 0.0;
/// Hinge target while inactive, screen folded away.
pub const HINGE_CLOSED_RADIANS: f32 = std::f32::consts::PI / 2.2;
/// Rate constant of the per-frame hinge smoothing step.
pub const HINGE_SMOOTHING: f32 = 10.0;

/// Delay before the lit video plane mounts, masking texture warm-up.
pub const SCREEN_LIT_DELAY_MS: u64 = 100;

/// Video plane dimensions, local to each device assembly.
pub const LAPTOP_PLANE_WIDTH: f32 = 0.29;
pub const LAPTOP_PLANE_ASPECT: f32 = 16.0 / 9.5;
pub const PHONE_PLANE_WIDTH: f32 = 28.1;
pub const PHONE_PLANE_ASPECT: f32 = 9.0 / 18.0;

/// Offsets reproducing the hand-tuned plane/bezel placement of the models.
pub const LAPTOP_BEZEL_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.1);
pub const LAPTOP_PLANE_OFFSET: Vec3 = Vec3::new(0.0, 0.1, -0.104);
pub const PHONE_PLANE_OFFSET: Vec3 = Vec3::new(0.0, 2.3, 0.0);

/// CPU-side video readback surfaces, scaled to each plane's aspect.
pub const LAPTOP_VIDEO_SIZE: UVec2 = UVec2::new(1280, 760);
pub const PHONE_VIDEO_SIZE: UVec2 = UVec2::new(640, 1280);

/// Placeholder chassis boxes used when a named mesh is missing.
pub const LAPTOP_PLACEHOLDER_SIZE: Vec3 = Vec3::new(1.5, 0.1, 1.0);
pub const PHONE_PLACEHOLDER_SIZE: Vec3 = Vec3::new(0.4, 0.8, 0.05);
