pub mod sequence;

use bevy::prelude::*;

use constants::boot::{
    CURSOR_HEIGHT, CURSOR_WIDTH, SHELL_PROMPT, STATUS_FONT_SIZE, STATUS_LINE, TERMINAL_FONT_SIZE,
    WELCOME_COMMAND,
};
use constants::theme::{CURSED_BLACK, MINT_GREEN, PORTFOLIO_WHITE};

use crate::engine::core::app_state::AppState;
use sequence::BootSequence;

/// Fired exactly once, when the typed command and the post-command delay
/// have both elapsed. The shell reacts by starting the fade-out.
#[derive(Event)]
pub struct BootCompleted;

#[derive(Resource)]
pub struct BootState(pub BootSequence);

/// Root node of the terminal overlay.
#[derive(Component)]
pub struct BootOverlay;

/// Overlay children whose colours fade with the root during the
/// fade-out overlap.
#[derive(Component)]
pub struct BootOverlayFade;

#[derive(Component)]
struct CommandText;

#[derive(Component)]
struct CursorBlock;

#[derive(Component)]
struct StatusText;

pub struct BootSequencePlugin;

impl Plugin for BootSequencePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BootCompleted>()
            .add_systems(OnEnter(AppState::Booting), spawn_boot_overlay)
            .add_systems(
                Update,
                (advance_boot_sequence, update_boot_overlay)
                    .chain()
                    .run_if(in_state(AppState::Booting)),
            )
            .add_systems(OnExit(AppState::TransitioningOut), despawn_boot_overlay);
    }
}

fn spawn_boot_overlay(mut commands: Commands) {
    commands.insert_resource(BootState(BootSequence::new(WELCOME_COMMAND)));

    commands
        .spawn((
            BootOverlay,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(CURSED_BLACK),
            GlobalZIndex(50),
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(2.0),
                    ..default()
                })
                .with_children(|line| {
                    line.spawn((
                        BootOverlayFade,
                        Text::new(SHELL_PROMPT),
                        TextFont {
                            font_size: TERMINAL_FONT_SIZE,
                            ..default()
                        },
                        TextColor(MINT_GREEN),
                    ));
                    line.spawn((
                        CommandText,
                        BootOverlayFade,
                        Text::new(""),
                        TextFont {
                            font_size: TERMINAL_FONT_SIZE,
                            ..default()
                        },
                        TextColor(MINT_GREEN),
                    ));
                    line.spawn((
                        CursorBlock,
                        BootOverlayFade,
                        Node {
                            width: Val::Px(CURSOR_WIDTH),
                            height: Val::Px(CURSOR_HEIGHT),
                            ..default()
                        },
                        BackgroundColor(MINT_GREEN),
                    ));
                });

            parent.spawn((
                StatusText,
                BootOverlayFade,
                Text::new(STATUS_LINE),
                TextFont {
                    font_size: STATUS_FONT_SIZE,
                    ..default()
                },
                TextColor(PORTFOLIO_WHITE),
                Node {
                    margin: UiRect::top(Val::Px(16.0)),
                    ..default()
                },
                Visibility::Hidden,
            ));
        });
}

/// Tick the state machine with real frame time; emit completion once.
fn advance_boot_sequence(
    time: Res<Time>,
    mut boot: ResMut<BootState>,
    mut completed: EventWriter<BootCompleted>,
) {
    if boot.0.advance(time.delta()) {
        info!("Boot sequence complete");
        completed.write(BootCompleted);
    }
}

fn update_boot_overlay(
    boot: Res<BootState>,
    mut command_text: Query<&mut Text, With<CommandText>>,
    mut cursor: Query<&mut Visibility, (With<CursorBlock>, Without<StatusText>)>,
    mut status: Query<&mut Visibility, (With<StatusText>, Without<CursorBlock>)>,
) {
    if let Ok(mut text) = command_text.single_mut() {
        if text.0 != boot.0.typed() {
            text.0 = boot.0.typed().to_string();
        }
    }
    if let Ok(mut visibility) = cursor.single_mut() {
        *visibility = if boot.0.cursor_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Ok(mut visibility) = status.single_mut() {
        *visibility = if boot.0.fully_typed() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Teardown once the fade-out overlap has elapsed. Removing the resource
/// here guarantees no boot timer outlives the overlay.
fn despawn_boot_overlay(mut commands: Commands, overlay: Query<Entity, With<BootOverlay>>) {
    for entity in &overlay {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<BootState>();
}
