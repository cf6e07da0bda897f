//! Tasks plugin loading the chore catalog and seeding the registry.
use bevy::prelude::*;

use super::{data::ChoreCatalog, events::TaskStateChangedEvent, registry::TaskRegistry};

pub struct TasksPlugin;

impl Plugin for TasksPlugin {
    fn build(&self, app: &mut App) {
        let catalog = ChoreCatalog::load_or_default();
        if catalog.is_empty() {
            warn!(target: "tasks", "No chores available; the session cannot end");
        }
        let registry = TaskRegistry::from_catalog(&catalog);

        app.insert_resource(catalog)
            .insert_resource(registry)
            .add_message::<TaskStateChangedEvent>()
            .add_systems(Startup, log_registered_tasks);
    }
}

fn log_registered_tasks(registry: Res<TaskRegistry>) {
    for task in registry.list() {
        debug!(
            target: "tasks",
            "{} '{}' (item: {}, target: {:.0},{:.0})",
            task.id, task.name, task.item_key, task.target.x, task.target.y
        );
    }
    info!(target: "tasks", "TasksPlugin initialised with {} chores", registry.len());
}
