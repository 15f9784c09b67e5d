//! 2D overlay around the device stage: owner header, previous/next
//! navigation and the footer social links.

use bevy::prelude::*;

use constants::site::{
    COPYRIGHT_FONT_SIZE, COPYRIGHT_LINE, FOOTER_FONT_SIZE, HEADER_FONT_SIZE, NAV_BUTTON_FONT_SIZE,
    SITE_OWNER, SOCIAL_LINKS,
};
use constants::theme::{MINT_GREEN, PORTFOLIO_WHITE};

use crate::engine::carousel::NavigationEvent;
use crate::engine::core::app_state::AppState;
use crate::engine::web::open_external_link;

#[derive(Component, Clone, Copy)]
struct NavButton(NavigationEvent);

#[derive(Component)]
struct FooterLink {
    url: &'static str,
}

pub struct ChromePlugin;

impl Plugin for ChromePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::MainContent), spawn_chrome)
            .add_systems(
                Update,
                (nav_button_system, footer_link_system).run_if(in_state(AppState::MainContent)),
            );
    }
}

fn spawn_chrome(mut commands: Commands) {
    commands
        .spawn((
            Name::new("site_chrome"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            Pickable::IGNORE,
            GlobalZIndex(10),
        ))
        .with_children(|chrome| {
            chrome.spawn((
                Text::new(SITE_OWNER),
                TextFont {
                    font_size: HEADER_FONT_SIZE,
                    ..default()
                },
                TextColor(PORTFOLIO_WHITE),
            ));

            chrome
                .spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|row| {
                    spawn_nav_button(row, "< PREV", NavigationEvent::Previous);
                    spawn_nav_button(row, "NEXT >", NavigationEvent::Next);
                });

            chrome
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(10.0),
                    ..default()
                })
                .with_children(|footer| {
                    footer
                        .spawn(Node {
                            column_gap: Val::Px(28.0),
                            ..default()
                        })
                        .with_children(|links| {
                            for link in SOCIAL_LINKS {
                                links.spawn((
                                    Button,
                                    FooterLink { url: link.url },
                                    Node {
                                        padding: UiRect::axes(Val::Px(6.0), Val::Px(4.0)),
                                        ..default()
                                    },
                                    BackgroundColor(Color::NONE),
                                    children![(
                                        Text::new(link.name),
                                        TextFont {
                                            font_size: FOOTER_FONT_SIZE,
                                            ..default()
                                        },
                                        TextColor(PORTFOLIO_WHITE),
                                    )],
                                ));
                            }
                        });

                    footer.spawn((
                        Text::new(COPYRIGHT_LINE),
                        TextFont {
                            font_size: COPYRIGHT_FONT_SIZE,
                            ..default()
                        },
                        TextColor(PORTFOLIO_WHITE.with_alpha(0.6)),
                    ));
                });
        });
}

fn spawn_nav_button(row: &mut ChildSpawnerCommands, label: &str, action: NavigationEvent) {
    row.spawn((
        Button,
        NavButton(action),
        Node {
            padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BorderColor(MINT_GREEN),
        BackgroundColor(Color::NONE),
        children![(
            Text::new(label),
            TextFont {
                font_size: NAV_BUTTON_FONT_SIZE,
                ..default()
            },
            TextColor(MINT_GREEN),
        )],
    ));
}

fn nav_button_system(
    mut buttons: Query<
        (&Interaction, &NavButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut navigation: EventWriter<NavigationEvent>,
) {
    for (interaction, button, mut background) in &mut buttons {
        match interaction {
            Interaction::Pressed => {
                navigation.write(button.0);
                background.0 = MINT_GREEN.with_alpha(0.25);
            }
            Interaction::Hovered => background.0 = MINT_GREEN.with_alpha(0.12),
            Interaction::None => background.0 = Color::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn chrome_spawns_nav_links_and_copyright() {
        let mut world = World::new();
        world.run_system_once(spawn_chrome).unwrap();

        let mut nav_query = world.query::<&NavButton>();
        assert_eq!(nav_query.iter(&world).count(), 2);

        let mut link_query = world.query::<&FooterLink>();
        assert_eq!(link_query.iter(&world).count(), SOCIAL_LINKS.len());

        let mut text_query = world.query::<&Text>();
        assert!(text_query.iter(&world).any(|text| text.0 == COPYRIGHT_LINE));
    }
}

fn footer_link_system(
    mut links: Query<
        (&Interaction, &FooterLink, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, link, mut background) in &mut links {
        match interaction {
            Interaction::Pressed => {
                info!("Opening social link {}", link.url);
                open_external_link(link.url);
                background.0 = MINT_GREEN.with_alpha(0.25);
            }
            Interaction::Hovered => background.0 = MINT_GREEN.with_alpha(0.12),
            Interaction::None => background.0 = Color::NONE,
        }
    }
}
