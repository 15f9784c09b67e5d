use bevy::prelude::*;

use constants::boot::FADE_OVERLAP_MS;

use crate::engine::boot::{BootCompleted, BootOverlay, BootOverlayFade};
use crate::engine::carousel::CarouselState;

/// Top-level view state machine.
///
/// `Booting` shows the terminal overlay. `TransitioningOut` holds the
/// fade-out overlap while boot and main content conceptually coexist.
/// `MainContent` is the carousel plus chrome. No transition goes back.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Booting,
    TransitioningOut,
    MainContent,
}

/// Counts down the fade-out overlap between boot and main content.
#[derive(Resource)]
pub struct FadeOutTimer(pub Timer);

pub fn transition_to_fade_out(
    mut completed: EventReader<BootCompleted>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if completed.read().next().is_some() {
        println!("→ Transitioning to fade-out");
        next_state.set(AppState::TransitioningOut);
    }
}

pub fn start_fade_out(mut commands: Commands) {
    commands.insert_resource(FadeOutTimer(Timer::from_seconds(
        FADE_OVERLAP_MS as f32 / 1000.0,
        TimerMode::Once,
    )));
}

/// Fade the whole boot overlay while the overlap timer runs: the root
/// background plus every marked child's text and block colour.
pub fn fade_boot_overlay(
    fade: Res<FadeOutTimer>,
    mut roots: Query<&mut BackgroundColor, With<BootOverlay>>,
    mut texts: Query<&mut TextColor, With<BootOverlayFade>>,
    mut blocks: Query<&mut BackgroundColor, (With<BootOverlayFade>, Without<BootOverlay>)>,
) {
    let remaining = 1.0 - fade.0.fraction();
    for mut background in &mut roots {
        background.0 = background.0.with_alpha(remaining);
    }
    for mut colour in &mut texts {
        colour.0 = colour.0.with_alpha(remaining);
    }
    for mut background in &mut blocks {
        background.0 = background.0.with_alpha(remaining);
    }
}

pub fn transition_to_main_content(
    time: Res<Time>,
    mut commands: Commands,
    mut fade: ResMut<FadeOutTimer>,
    mut carousel: ResMut<CarouselState>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if fade.0.tick(time.delta()).just_finished() {
        println!("→ Transitioning to main content");
        carousel.is_visible = true;
        commands.remove_resource::<FadeOutTimer>();
        next_state.set(AppState::MainContent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    #[test]
    fn fade_applies_to_overlay_root_and_children() {
        let mut world = World::new();
        let mut timer = Timer::from_seconds(FADE_OVERLAP_MS as f32 / 1000.0, TimerMode::Once);
        timer.tick(Duration::from_millis(FADE_OVERLAP_MS / 2));
        world.insert_resource(FadeOutTimer(timer));

        let root = world
            .spawn((BootOverlay, BackgroundColor(Color::BLACK)))
            .id();
        let text = world.spawn((BootOverlayFade, TextColor(Color::WHITE))).id();
        let block = world
            .spawn((BootOverlayFade, BackgroundColor(Color::WHITE)))
            .id();

        world.run_system_once(fade_boot_overlay).unwrap();

        let expected = 0.5;
        let root_alpha = world.get::<BackgroundColor>(root).unwrap().0.alpha();
        let text_alpha = world.get::<TextColor>(text).unwrap().0.alpha();
        let block_alpha = world.get::<BackgroundColor>(block).unwrap().0.alpha();
        assert!((root_alpha - expected).abs() < 1e-3);
        assert!((text_alpha - expected).abs() < 1e-3);
        assert!((block_alpha - expected).abs() < 1e-3);
    }
}
