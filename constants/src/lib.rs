pub mod boot;
pub mod camera;
pub mod device;
pub mod scene;
pub mod site;
pub mod theme;
