use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfMesh};
use bevy::prelude::*;

use constants::device::{LAPTOP_MODEL_PATH, PHONE_MODEL_PATH, SCREEN_ALPHA_MASK_PATH};

/// Handles for the device GLB models and the phone's rounded-corner
/// alpha mask, plus load tracking for the mask's three-way screen state.
#[derive(Resource)]
pub struct DeviceModelAssets {
    pub laptop: Handle<Gltf>,
    pub phone: Handle<Gltf>,
    pub screen_alpha_mask: Handle<Image>,
    pub alpha_mask_loaded: bool,
}

pub fn load_device_models(asset_server: &AssetServer) -> DeviceModelAssets {
    println!("Loading device models:");
    println!("  Laptop: {LAPTOP_MODEL_PATH}");
    println!("  Phone: {PHONE_MODEL_PATH}");
    println!("  Screen alpha mask: {SCREEN_ALPHA_MASK_PATH}");

    DeviceModelAssets {
        laptop: asset_server.load(LAPTOP_MODEL_PATH),
        phone: asset_server.load(PHONE_MODEL_PATH),
        screen_alpha_mask: asset_server.load(SCREEN_ALPHA_MASK_PATH),
        alpha_mask_loaded: false,
    }
}

pub fn check_alpha_mask_loaded(
    mut models: ResMut<DeviceModelAssets>,
    asset_server: Res<AssetServer>,
) {
    if models.alpha_mask_loaded {
        return;
    }
    if matches!(
        asset_server.get_load_state(&models.screen_alpha_mask),
        Some(LoadState::Loaded)
    ) {
        info!("✓ Screen alpha mask loaded");
        models.alpha_mask_loaded = true;
    }
}

/// Outcome of a named-mesh lookup inside a device GLB.
pub enum MeshLookup {
    Found(Handle<Mesh>),
    /// The GLB itself has not finished loading.
    ModelPending,
    /// The GLB loaded but does not contain the expected mesh.
    MeshMissing,
}

pub fn named_mesh(
    gltfs: &Assets<Gltf>,
    gltf_meshes: &Assets<GltfMesh>,
    model: &Handle<Gltf>,
    name: &str,
) -> MeshLookup {
    let Some(gltf) = gltfs.get(model) else {
        return MeshLookup::ModelPending;
    };
    let mesh = gltf
        .named_meshes
        .get(name)
        .and_then(|handle| gltf_meshes.get(handle))
        .and_then(|gltf_mesh| gltf_mesh.primitives.first())
        .map(|primitive| primitive.mesh.clone());
    match mesh {
        Some(handle) => MeshLookup::Found(handle),
        None => MeshLookup::MeshMissing,
    }
}
