use bevy::asset::AssetMetaCheck;
use bevy::pbr::wireframe::{WireframeConfig, WireframePlugin};
use bevy::prelude::*;

use constants::camera::{BASE_TARGET_Y, DEFAULT_FOV_DEGREES, DEFAULT_POSITION};
use constants::theme::MINT_GREEN;

use crate::engine::assets::{check_alpha_mask_loaded, load_device_models};
use crate::engine::boot::BootSequencePlugin;
use crate::engine::carousel::viewport::{init_viewport_class, ViewportClass};
use crate::engine::carousel::{CarouselPlugin, CarouselState};
use crate::engine::core::app_state::{
    fade_boot_overlay, start_fade_out, transition_to_fade_out, transition_to_main_content,
    AppState,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::devices::DevicePresenterPlugin;
use crate::engine::registry::ProjectRegistry;
use crate::engine::scene::chrome::ChromePlugin;
use crate::engine::scene::spawn_lighting;
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(WireframePlugin::default())
        .insert_resource(WireframeConfig {
            global: false,
            default_color: MINT_GREEN,
        })
        .add_plugins(BootSequencePlugin)
        .add_plugins(CarouselPlugin)
        .add_plugins(DevicePresenterPlugin)
        .add_plugins(ChromePlugin)
        .add_plugins(WebRpcPlugin);

    app.init_resource::<ViewportClass>()
        .add_systems(Startup, (setup, init_viewport_class).chain())
        .add_systems(Update, check_alpha_mask_loaded);

    // View state transitions
    app.add_systems(
        Update,
        transition_to_fade_out.run_if(in_state(AppState::Booting)),
    )
    .add_systems(OnEnter(AppState::TransitioningOut), start_fade_out)
    .add_systems(
        Update,
        (fade_boot_overlay, transition_to_main_content)
            .chain()
            .run_if(in_state(AppState::TransitioningOut)),
    );

    app
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    println!("=== PORTFOLIO SHOWCASE ENGINE ===");

    let registry = ProjectRegistry::builtin();
    commands.insert_resource(CarouselState::new(registry.len()));
    commands.insert_resource(registry);
    commands.insert_resource(load_device_models(&asset_server));

    spawn_scene_camera(&mut commands);
    spawn_lighting(&mut commands);
}

fn spawn_scene_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: DEFAULT_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(DEFAULT_POSITION)
            .looking_at(Vec3::new(0.0, BASE_TARGET_Y, 0.0), Vec3::Y),
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
