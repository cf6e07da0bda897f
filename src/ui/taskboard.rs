// src/ui/taskboard.rs
//
// The sticky-note taskboard on the fridge.

use bevy::prelude::*;

use crate::{
    house::{
        components::{Player, PlayerMovementLock},
        layout::near_fridge,
    },
    tasks::{
        events::TaskStateChangedEvent,
        registry::TaskRegistry,
        types::{TaskState, TaskSummary},
    },
};

const BOARD_COLOR: Color = Color::srgb(1.0, 0.92, 0.62);
const BORDER_COLOR: Color = Color::srgb(0.55, 0.45, 0.33);
const TITLE_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
const NAME_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
const DONE_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);
const DESCRIPTION_COLOR: Color = Color::srgb(0.33, 0.33, 0.33);

/// Marker for the taskboard's root node.
#[derive(Component, Debug)]
pub struct TaskboardPanel;

#[derive(Resource, Debug, Default)]
pub struct TaskboardState {
    panel: Option<Entity>,
}

/// Note colour per state: yellow pending, blue in progress, green done.
pub fn note_color(state: TaskState) -> Color {
    match state {
        TaskState::Pending => Color::srgb(1.0, 1.0, 0.67),
        TaskState::InProgress => Color::srgb(0.67, 0.83, 1.0),
        TaskState::Complete => Color::srgb(0.67, 1.0, 0.67),
    }
}

/// Space near the fridge opens the board, Esc closes it.
pub fn toggle_taskboard(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<TaskboardState>,
    mut lock: ResMut<PlayerMovementLock>,
    tasks: Res<TaskRegistry>,
    player: Query<&Transform, With<Player>>,
) {
    if state.panel.is_some() {
        if keyboard.just_pressed(KeyCode::Escape) {
            close_panel(&mut commands, &mut state, &mut lock);
        }
        return;
    }

    if !keyboard.just_pressed(KeyCode::Space) {
        return;
    }
    let Ok(transform) = player.single() else {
        return;
    };
    if !near_fridge(transform.translation.truncate()) {
        return;
    }

    state.panel = Some(spawn_taskboard(&mut commands, &tasks.summaries()));
    lock.set_movement(false);
    debug!(
        "Taskboard opened ({}/{} done)",
        tasks.completed_count(),
        tasks.len()
    );
}

/// Takes the board down when the session ends so the ending card is unobstructed.
pub fn close_taskboard(
    mut commands: Commands,
    mut state: ResMut<TaskboardState>,
    mut lock: ResMut<PlayerMovementLock>,
) {
    close_panel(&mut commands, &mut state, &mut lock);
}

fn close_panel(commands: &mut Commands, state: &mut TaskboardState, lock: &mut PlayerMovementLock) {
    if let Some(panel) = state.panel.take() {
        commands.entity(panel).despawn();
        lock.set_movement(true);
        debug!("Taskboard closed");
    }
}

/// Rebuilds an open board whenever a chore changes state.
pub fn refresh_taskboard(
    mut commands: Commands,
    mut changes: MessageReader<TaskStateChangedEvent>,
    mut state: ResMut<TaskboardState>,
    tasks: Res<TaskRegistry>,
) {
    if changes.read().count() == 0 {
        return;
    }
    let Some(panel) = state.panel else {
        return;
    };
    commands.entity(panel).despawn();
    state.panel = Some(spawn_taskboard(&mut commands, &tasks.summaries()));
}

fn spawn_taskboard(commands: &mut Commands, summaries: &[TaskSummary]) -> Entity {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(50.0),
                top: Val::Percent(50.0),
                width: Val::Px(640.0),
                margin: UiRect {
                    left: Val::Px(-320.0),
                    top: Val::Px(-270.0),
                    ..default()
                },
                padding: UiRect::all(Val::Px(18.0)),
                border: UiRect::all(Val::Px(4.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(BOARD_COLOR),
            BorderColor::from(BORDER_COLOR),
            ZIndex(50),
            TaskboardPanel,
            Name::new("Taskboard"),
        ))
        .with_children(|board| {
            board.spawn((
                Text::new("Things to do..."),
                TextFont {
                    font_size: 26.0,
                    ..default()
                },
                TextColor(TITLE_COLOR),
            ));

            for summary in summaries {
                board
                    .spawn((
                        Node {
                            flex_direction: FlexDirection::Column,
                            padding: UiRect::all(Val::Px(8.0)),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(note_color(summary.state)),
                        BorderColor::from(BORDER_COLOR),
                    ))
                    .with_children(|note| {
                        let done = summary.state == TaskState::Complete;
                        note.spawn((
                            Text::new(summary.headline()),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(if done { DONE_COLOR } else { NAME_COLOR }),
                        ));
                        if !summary.description.is_empty() {
                            note.spawn((
                                Text::new(summary.description.clone()),
                                TextFont {
                                    font_size: 14.0,
                                    ..default()
                                },
                                TextColor(DESCRIPTION_COLOR),
                            ));
                        }
                    });
            }

            board.spawn((
                Text::new("ESC to close"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(DESCRIPTION_COLOR),
            ));
        })
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_state_gets_its_own_note_colour() {
        let colors = [
            note_color(TaskState::Pending),
            note_color(TaskState::InProgress),
            note_color(TaskState::Complete),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
        assert!(TaskboardState::default().panel.is_none());
    }

    #[test]
    fn closing_releases_the_board_and_movement() {
        let mut app = App::new();
        app.add_systems(Update, close_taskboard);

        let panel = app.world_mut().spawn(TaskboardPanel).id();
        let mut lock = PlayerMovementLock::default();
        lock.set_movement(false);
        app.insert_resource(lock);
        app.insert_resource(TaskboardState { panel: Some(panel) });

        app.update();

        let world = app.world_mut();
        assert!(world.resource::<TaskboardState>().panel.is_none());
        assert!(world.resource::<PlayerMovementLock>().can_move());
        assert_eq!(world.query::<&TaskboardPanel>().iter(world).count(), 0);
    }
}
