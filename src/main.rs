use bevy::prelude::*;

mod core;
mod distraction;
mod ending;
mod house;
mod interaction;
mod journal;
mod owner;
mod tasks;
mod ui;

use crate::{
    core::{config::SimulationSettings, CorePlugin},
    distraction::DistractionPlugin,
    ending::EndingPlugin,
    house::HousePlugin,
    interaction::InteractionPlugin,
    journal::JournalPlugin,
    owner::OwnerPlugin,
    tasks::TasksPlugin,
    ui::UiPlugin,
};

fn main() {
    let simulation = SimulationSettings::load_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "House Chores".to_string(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.12, 0.11, 0.1)))
        .add_plugins((
            CorePlugin::with_time_scale(simulation.time_scale),
            TasksPlugin,
            OwnerPlugin,
            InteractionPlugin,
            DistractionPlugin,
            EndingPlugin,
            HousePlugin,
            UiPlugin,
            JournalPlugin,
        ))
        .run();
}
