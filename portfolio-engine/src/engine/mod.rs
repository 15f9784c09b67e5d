pub mod assets;
pub mod boot;
pub mod carousel;
pub mod core;
pub mod devices;
pub mod registry;
pub mod scene;
pub mod video;
pub mod web;
