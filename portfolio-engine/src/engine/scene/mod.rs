pub mod chrome;

use bevy::pbr::DirectionalLightShadowMap;
use bevy::prelude::*;

use constants::scene::{
    AMBIENT_BRIGHTNESS, AMBIENT_COLOUR, FILL_LIGHT_COLOUR, FILL_LIGHT_LUX, FILL_LIGHT_POSITION,
    KEY_LIGHT_COLOUR, KEY_LIGHT_LUX, KEY_LIGHT_POSITION, SHADOW_MAP_SIZE,
};

/// Three-point lighting rig: ambient fill, a warm shadow-casting key
/// light and a cool rim fill from behind the devices.
pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: AMBIENT_COLOUR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.insert_resource(DirectionalLightShadowMap {
        size: SHADOW_MAP_SIZE,
    });

    commands.spawn((
        Name::new("key_light"),
        DirectionalLight {
            color: KEY_LIGHT_COLOUR,
            illuminance: KEY_LIGHT_LUX,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(KEY_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("fill_light"),
        DirectionalLight {
            color: FILL_LIGHT_COLOUR,
            illuminance: FILL_LIGHT_LUX,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(FILL_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
