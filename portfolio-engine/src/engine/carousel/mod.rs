pub mod camera_rig;
pub mod viewport;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::registry::ProjectRegistry;

/// Carousel index and visibility.
///
/// `current_index` always denotes a valid record: both transitions wrap
/// modulo the registry length captured at construction. Visibility is
/// flipped by the presentation shell when main content mounts.
#[derive(Resource)]
pub struct CarouselState {
    current_index: usize,
    len: usize,
    pub is_visible: bool,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "carousel requires a non-empty registry");
        Self {
            current_index: 0,
            len,
            is_visible: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn next(&mut self) {
        self.current_index = (self.current_index + 1) % self.len;
    }

    pub fn previous(&mut self) {
        self.current_index = if self.current_index == 0 {
            self.len - 1
        } else {
            self.current_index - 1
        };
    }
}

/// Navigation commands, whatever their origin (keyboard, chrome buttons,
/// host-page RPC).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    Next,
    Previous,
    Select(usize),
}

/// Fired after the carousel index settles on a (possibly new) project.
/// Presenters respawn from this; the RPC bridge reports it to the host.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectChanged {
    pub index: usize,
}

pub struct CarouselPlugin;

impl Plugin for CarouselPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<NavigationEvent>()
            .add_event::<ProjectChanged>()
            .add_systems(OnEnter(AppState::MainContent), announce_initial_project)
            .add_systems(
                Update,
                (
                    viewport::track_viewport_class,
                    (
                        keyboard_navigation,
                        handle_navigation_events,
                        camera_rig::apply_camera_rig,
                    )
                        .chain()
                        .run_if(in_state(AppState::MainContent)),
                ),
            );
    }
}

/// Presenters spawn off `ProjectChanged`, so the first project must be
/// announced when main content mounts.
fn announce_initial_project(
    carousel: Res<CarouselState>,
    mut changed: EventWriter<ProjectChanged>,
) {
    changed.write(ProjectChanged {
        index: carousel.current_index(),
    });
}

/// Global arrow-key navigation, live only while in `MainContent`.
fn keyboard_navigation(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut navigation: EventWriter<NavigationEvent>,
) {
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        navigation.write(NavigationEvent::Next);
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        navigation.write(NavigationEvent::Previous);
    }
}

fn handle_navigation_events(
    mut navigation: EventReader<NavigationEvent>,
    mut carousel: ResMut<CarouselState>,
    registry: Res<ProjectRegistry>,
    mut changed: EventWriter<ProjectChanged>,
) {
    let mut moved = false;
    for event in navigation.read() {
        match *event {
            NavigationEvent::Next => {
                carousel.next();
                moved = true;
            }
            NavigationEvent::Previous => {
                carousel.previous();
                moved = true;
            }
            NavigationEvent::Select(index) => {
                if index < registry.len() {
                    carousel.current_index = index;
                    moved = true;
                } else {
                    warn!("Ignoring selection of out-of-range project {index}");
                }
            }
        }
    }

    if moved {
        let index = carousel.current_index();
        info!("Carousel moved to project {}", registry.get(index).title);
        changed.write(ProjectChanged { index });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_then_previous_round_trips_from_any_start() {
        for n in 1..=5 {
            for start in 0..n {
                let mut state = CarouselState::new(n);
                state.current_index = start;
                state.next();
                state.previous();
                assert_eq!(state.current_index(), start);

                state.previous();
                state.next();
                assert_eq!(state.current_index(), start);
            }
        }
    }

    #[test]
    fn next_applied_len_times_cycles_back() {
        for n in 1..=5 {
            for start in 0..n {
                let mut state = CarouselState::new(n);
                state.current_index = start;
                for _ in 0..n {
                    state.next();
                    assert!(state.current_index() < n);
                }
                assert_eq!(state.current_index(), start);
            }
        }
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut state = CarouselState::new(3);
        state.previous();
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn starts_at_first_project_and_hidden() {
        let state = CarouselState::new(4);
        assert_eq!(state.current_index(), 0);
        assert!(!state.is_visible);
    }
}
