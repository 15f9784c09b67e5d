use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use constants::camera::MOBILE_BREAKPOINT_PX;

/// Coarse mobile/desktop classification of the viewport, recomputed from
/// resize events. Consumers read the resource; nobody else writes it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportClass {
    pub is_mobile: bool,
}

impl ViewportClass {
    pub fn classify(width: f32) -> Self {
        Self {
            is_mobile: width < MOBILE_BREAKPOINT_PX,
        }
    }
}

impl Default for ViewportClass {
    fn default() -> Self {
        Self { is_mobile: false }
    }
}

/// Seed the classification from the window the app actually opened with.
pub fn init_viewport_class(
    mut viewport: ResMut<ViewportClass>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if let Ok(window) = windows.single() {
        *viewport = ViewportClass::classify(window.width());
        info!(
            "Viewport classified as {}",
            if viewport.is_mobile { "mobile" } else { "desktop" }
        );
    }
}

pub fn track_viewport_class(
    mut resize_events: EventReader<WindowResized>,
    mut viewport: ResMut<ViewportClass>,
) {
    for event in resize_events.read() {
        let next = ViewportClass::classify(event.width);
        if *viewport != next {
            info!(
                "Viewport reclassified as {}",
                if next.is_mobile { "mobile" } else { "desktop" }
            );
            *viewport = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_below_breakpoint_are_mobile() {
        assert!(ViewportClass::classify(320.0).is_mobile);
        assert!(ViewportClass::classify(MOBILE_BREAKPOINT_PX - 1.0).is_mobile);
    }

    #[test]
    fn breakpoint_and_above_are_desktop() {
        assert!(!ViewportClass::classify(MOBILE_BREAKPOINT_PX).is_mobile);
        assert!(!ViewportClass::classify(1920.0).is_mobile);
    }
}
