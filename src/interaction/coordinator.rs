//! Interaction coordinator: proximity hit -> chore trigger -> walk -> clean -> complete.
use std::{cmp::Ordering, time::Duration};

use bevy::prelude::*;

use crate::{
    core::context::{EngineContext, Notice},
    distraction::coordinator::DistractionCoordinator,
    owner::{
        events::{ActionHandle, OwnerCommand},
        state::OwnerState,
    },
    tasks::{registry::TaskRegistry, types::TaskId},
};

use super::{
    config::{InteractionSettings, TIMEOUT_GRACE},
    types::{InteractableProbe, InteractionOutcome},
};

/// The chore the owner is currently servicing, tracked for the stuck-task timeout.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChoreJob {
    task: TaskId,
    /// Time spent on the current command; paused while distracted.
    elapsed: Duration,
}

#[derive(Resource, Debug)]
pub struct InteractionCoordinator {
    settings: InteractionSettings,
    job: Option<ChoreJob>,
    /// Completion that arrived while the owner was distracted.
    deferred_finish: Option<ActionHandle>,
    next_line: usize,
}

impl InteractionCoordinator {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            settings,
            job: None,
            deferred_finish: None,
            next_line: 0,
        }
    }

    /// Entry point for one interaction press.
    ///
    /// Callers must rate-limit this to one call per key-press edge.
    pub fn check_interaction(
        &mut self,
        actor_position: Vec2,
        probes: &[InteractableProbe],
        distraction: &mut DistractionCoordinator,
        ctx: &mut EngineContext,
    ) -> InteractionOutcome {
        if ctx.owner.is_busy() {
            debug!(
                target: "interaction",
                "Ignoring interaction: owner is {}",
                ctx.owner.state().label()
            );
            return InteractionOutcome::OwnerBusy;
        }

        if distraction.is_distracted() {
            return match distraction.refocus(ctx) {
                Ok(resumed) => InteractionOutcome::Refocused { resumed },
                Err(err) => {
                    warn!(target: "interaction", "Refocus failed: {}", err);
                    InteractionOutcome::OwnerBusy
                }
            };
        }

        match self.nearest_task(actor_position, probes, ctx.tasks) {
            Some((task, distance)) => {
                debug!(
                    target: "interaction",
                    "Nearest chore {} at distance {:.1}",
                    task,
                    distance
                );
                self.trigger(task, ctx)
            }
            None => InteractionOutcome::NothingInRange,
        }
    }

    /// Nearest visible interactable strictly inside the radius whose key maps
    /// to a chore. Equal distances resolve by item key so the result never
    /// depends on probe order.
    pub fn nearest_task(
        &self,
        actor_position: Vec2,
        probes: &[InteractableProbe],
        tasks: &TaskRegistry,
    ) -> Option<(TaskId, f32)> {
        probes
            .iter()
            .filter(|probe| probe.visible)
            .filter_map(|probe| {
                let distance = actor_position.distance(probe.position);
                if distance >= self.settings.radius {
                    return None;
                }
                let task = tasks.find_by_item_key(&probe.key)?;
                Some((task.id, distance, probe.key.as_str()))
            })
            .min_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.2.cmp(b.2))
            })
            .map(|(task, distance, _)| (task, distance))
    }

    /// Starts `task` and sends the owner walking to it.
    pub fn trigger(&mut self, task: TaskId, ctx: &mut EngineContext) -> InteractionOutcome {
        if !matches!(ctx.owner.state(), OwnerState::Idle | OwnerState::Cleaning) {
            return InteractionOutcome::OwnerBusy;
        }

        let task_change = match ctx.tasks.set_in_progress(task) {
            Ok(change) => change,
            Err(err) => {
                debug!(target: "interaction", "Chore not started: {}", err);
                return InteractionOutcome::Rejected { task };
            }
        };

        // The owner state was checked above, so this cannot be refused.
        let Ok((handle, owner_change)) = ctx.owner.start_walking(task) else {
            warn!(target: "interaction", "Owner refused to walk to {}", task);
            return InteractionOutcome::Rejected { task };
        };

        let Some(chore) = ctx.tasks.get(task) else {
            return InteractionOutcome::Rejected { task };
        };
        info!(
            target: "interaction",
            "Triggering chore {} '{}' -> walking to ({:.0}, {:.0})",
            task,
            chore.name,
            chore.target.x,
            chore.target.y
        );

        ctx.outbox.commands.push(OwnerCommand::MoveTo {
            handle,
            target: chore.target,
        });
        ctx.outbox.notices.push(Notice::prompt(format!("{}...", chore.name)));
        ctx.outbox.task_changes.push(task_change);
        ctx.outbox.owner_changes.push(owner_change);

        self.job = Some(ChoreJob {
            task,
            elapsed: Duration::ZERO,
        });
        InteractionOutcome::Triggered { task }
    }

    /// Continuation for a finished owner command.
    ///
    /// Arrival starts the cleaning effect; the end of the effect completes the
    /// chore. Returns the chore completed by this call, if any.
    pub fn on_action_finished(
        &mut self,
        handle: ActionHandle,
        ctx: &mut EngineContext,
    ) -> Option<TaskId> {
        if ctx.owner.in_flight() != Some(handle) {
            debug!(target: "interaction", "Ignoring stale completion {}", handle);
            return None;
        }

        match ctx.owner.state() {
            OwnerState::Walking => {
                self.start_cleaning(ctx);
                None
            }
            OwnerState::Cleaning => self.finish_chore(ctx),
            OwnerState::Distracted => {
                self.deferred_finish = Some(handle);
                None
            }
            OwnerState::Idle => None,
        }
    }

    /// Advances the stuck-task timeout and replays completions deferred by a distraction.
    pub fn tick(&mut self, delta: Duration, ctx: &mut EngineContext) {
        if let Some(handle) = self.deferred_finish {
            if !ctx.owner.is_distracted() {
                self.deferred_finish = None;
                self.on_action_finished(handle, ctx);
            }
        }

        let Some(timeout) = self.settings.action_timeout else {
            return;
        };
        if !ctx.owner.is_busy() {
            return;
        }
        let Some(job) = self.job.as_mut() else {
            return;
        };

        // A cleaning effect always gets its full duration plus some slack.
        let limit = if ctx.owner.state() == OwnerState::Cleaning {
            timeout.max(self.settings.cleaning_duration + TIMEOUT_GRACE)
        } else {
            timeout
        };
        job.elapsed += delta;
        if job.elapsed < limit {
            return;
        }

        let task = job.task;
        self.job = None;
        self.abandon_chore(task, ctx);
    }

    fn start_cleaning(&mut self, ctx: &mut EngineContext) {
        let Ok((handle, change)) = ctx.owner.arrive() else {
            return;
        };
        if let Some(job) = self.job.as_mut() {
            job.elapsed = Duration::ZERO;
        }
        debug!(
            target: "interaction",
            "Owner arrived, cleaning for {:.1}s",
            self.settings.cleaning_duration.as_secs_f32()
        );
        ctx.outbox.commands.push(OwnerCommand::PlayTimedEffect {
            handle,
            duration: self.settings.cleaning_duration,
        });
        ctx.outbox.owner_changes.push(change);
    }

    fn finish_chore(&mut self, ctx: &mut EngineContext) -> Option<TaskId> {
        let task = ctx.owner.current_task()?;
        let task_change = match ctx.tasks.complete(task) {
            Ok(change) => change,
            Err(err) => {
                warn!(target: "interaction", "Could not complete {}: {}", task, err);
                return None;
            }
        };
        let Ok((_, owner_change)) = ctx.owner.finish_cleaning() else {
            return None;
        };

        info!(
            target: "interaction",
            "Chore {} '{}' complete ({}/{})",
            task,
            task_change.name,
            ctx.tasks.completed_count(),
            ctx.tasks.len()
        );

        let line = self.next_completion_line().to_string();
        ctx.outbox.task_changes.push(task_change);
        ctx.outbox.owner_changes.push(owner_change);
        ctx.outbox.notices.push(Notice::owner_line(line));
        self.job = None;
        Some(task)
    }

    fn abandon_chore(&mut self, task: TaskId, ctx: &mut EngineContext) {
        warn!(
            target: "interaction",
            "Chore {} timed out, returning it to the list",
            task
        );
        if let Ok((handle, owner_change)) = ctx.owner.abandon() {
            if let Some(handle) = handle {
                ctx.outbox.commands.push(OwnerCommand::Cancel { handle });
            }
            ctx.outbox.owner_changes.push(owner_change);
        }
        match ctx.tasks.abandon(task) {
            Ok(change) => ctx.outbox.task_changes.push(change),
            Err(err) => debug!(target: "interaction", "Abandon skipped: {}", err),
        }
        if !self.settings.gave_up_line.is_empty() {
            ctx.outbox
                .notices
                .push(Notice::owner_line(self.settings.gave_up_line.clone()));
        }
    }

    /// Cycles through the configured lines so runs are reproducible.
    fn next_completion_line(&mut self) -> &str {
        let lines = &self.settings.completion_lines;
        if lines.is_empty() {
            return "";
        }
        let index = self.next_line % lines.len();
        self.next_line = self.next_line.wrapping_add(1);
        &lines[index]
    }
}

impl Default for InteractionCoordinator {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::context::{Outbox, Speaker},
        distraction::config::DistractionSettings,
        owner::state::OwnerBehavior,
        tasks::{data::ChoreDefinition, types::TaskState},
    };

    struct Harness {
        tasks: TaskRegistry,
        owner: OwnerBehavior,
        outbox: Outbox,
        distraction: DistractionCoordinator,
        coordinator: InteractionCoordinator,
        chips: TaskId,
        boxes: TaskId,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_settings(InteractionSettings::default())
        }

        fn with_settings(settings: InteractionSettings) -> Self {
            let mut tasks = TaskRegistry::default();
            let chips = tasks.add(&definition("Throw out the chips", "chips", [100.0, 0.0]));
            let boxes = tasks.add(&definition("Unpack the boxes", "boxes", [-100.0, 0.0]));
            Self {
                tasks,
                owner: OwnerBehavior::default(),
                outbox: Outbox::default(),
                distraction: DistractionCoordinator::new(DistractionSettings::default()),
                coordinator: InteractionCoordinator::new(settings),
                chips,
                boxes,
            }
        }

        fn interact(&mut self, actor: Vec2, probes: &[InteractableProbe]) -> InteractionOutcome {
            let mut ctx = EngineContext::new(&mut self.tasks, &mut self.owner, &mut self.outbox);
            self.coordinator
                .check_interaction(actor, probes, &mut self.distraction, &mut ctx)
        }

        fn finish_in_flight(&mut self) -> Option<TaskId> {
            let handle = self.owner.in_flight().expect("a command is in flight");
            let mut ctx = EngineContext::new(&mut self.tasks, &mut self.owner, &mut self.outbox);
            self.coordinator.on_action_finished(handle, &mut ctx)
        }

        fn state(&self, id: TaskId) -> TaskState {
            self.tasks.get(id).unwrap().state
        }
    }

    fn definition(name: &str, key: &str, target: [f32; 2]) -> ChoreDefinition {
        ChoreDefinition {
            name: name.to_string(),
            description: String::new(),
            item_key: key.to_string(),
            item_position: Vec2::ZERO,
            target: Vec2::from_array(target),
            reveal: None,
        }
    }

    fn probe(key: &str, x: f32, y: f32) -> InteractableProbe {
        InteractableProbe::new(key, Vec2::new(x, y), true)
    }

    #[test]
    fn proximity_hit_starts_matching_chore() {
        let mut h = Harness::new();
        let outcome = h.interact(Vec2::ZERO, &[probe("chips", 20.0, 0.0)]);

        assert_eq!(outcome, InteractionOutcome::Triggered { task: h.chips });
        assert_eq!(h.state(h.chips), TaskState::InProgress);
        assert_eq!(h.state(h.boxes), TaskState::Pending);
        assert_eq!(h.owner.state(), OwnerState::Walking);
        assert_eq!(
            h.outbox.commands,
            vec![OwnerCommand::MoveTo {
                handle: h.owner.in_flight().unwrap(),
                target: Vec2::new(100.0, 0.0),
            }]
        );
        assert_eq!(h.outbox.notices[0].text, "Throw out the chips...");
        assert_eq!(h.outbox.notices[0].speaker, Speaker::Player);
    }

    #[test]
    fn second_chore_is_rejected_while_one_is_active() {
        let mut h = Harness::new();
        h.tasks.set_in_progress(h.chips).unwrap();

        let outcome = h.interact(Vec2::ZERO, &[probe("boxes", 10.0, 0.0)]);
        assert_eq!(outcome, InteractionOutcome::Rejected { task: h.boxes });
        assert_eq!(h.state(h.boxes), TaskState::Pending);
        assert_eq!(h.owner.state(), OwnerState::Idle);
        assert!(h.outbox.is_empty());
    }

    #[test]
    fn busy_owner_ignores_presses() {
        let mut h = Harness::new();
        h.interact(Vec2::ZERO, &[probe("chips", 5.0, 0.0)]);
        h.outbox = Outbox::default();

        let outcome = h.interact(Vec2::ZERO, &[probe("boxes", 5.0, 0.0)]);
        assert_eq!(outcome, InteractionOutcome::OwnerBusy);
        assert_eq!(h.state(h.boxes), TaskState::Pending);
        assert!(h.outbox.is_empty());
    }

    #[test]
    fn nearest_interactable_wins_regardless_of_order() {
        let h = Harness::new();
        let far_first = [probe("chips", 30.0, 0.0), probe("boxes", 0.0, 10.0)];
        let near_first = [probe("boxes", 0.0, 10.0), probe("chips", 30.0, 0.0)];

        for probes in [&far_first[..], &near_first[..]] {
            let (task, distance) = h
                .coordinator
                .nearest_task(Vec2::ZERO, probes, &h.tasks)
                .expect("both are in range");
            assert_eq!(task, h.boxes);
            assert_eq!(distance, 10.0);
        }
    }

    #[test]
    fn ignores_hidden_distant_and_unmapped_items() {
        let mut h = Harness::new();
        let probes = [
            InteractableProbe::new("chips", Vec2::new(5.0, 0.0), false),
            probe("boxes", 60.0, 0.0),
            probe("stand", 1.0, 0.0),
        ];

        assert_eq!(h.interact(Vec2::ZERO, &probes), InteractionOutcome::NothingInRange);
        assert_eq!(h.state(h.chips), TaskState::Pending);
        assert_eq!(h.state(h.boxes), TaskState::Pending);
    }

    #[test]
    fn equal_distances_break_ties_by_key() {
        let h = Harness::new();
        let probes = [probe("chips", 10.0, 0.0), probe("boxes", -10.0, 0.0)];
        let (task, _) = h.coordinator.nearest_task(Vec2::ZERO, &probes, &h.tasks).unwrap();
        assert_eq!(task, h.boxes);
    }

    #[test]
    fn arrival_then_effect_completes_chore() {
        let mut h = Harness::new();
        h.interact(Vec2::ZERO, &[probe("chips", 5.0, 0.0)]);

        assert_eq!(h.finish_in_flight(), None);
        assert_eq!(h.owner.state(), OwnerState::Cleaning);
        assert!(matches!(
            h.outbox.commands.last(),
            Some(OwnerCommand::PlayTimedEffect { duration, .. })
                if *duration == Duration::from_secs_f32(2.4)
        ));

        assert_eq!(h.finish_in_flight(), Some(h.chips));
        assert_eq!(h.state(h.chips), TaskState::Complete);
        assert_eq!(h.owner.state(), OwnerState::Idle);
        assert!(h.owner.current_task().is_none());
        assert_eq!(h.coordinator.job, None);

        let last = h.outbox.notices.last().unwrap();
        assert_eq!(last.speaker, Speaker::Owner);
        assert_eq!(last.text, "That feels... a little better.");
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut h = Harness::new();
        h.interact(Vec2::ZERO, &[probe("chips", 5.0, 0.0)]);
        let walk = h.owner.in_flight().unwrap();
        h.finish_in_flight();

        let mut ctx = EngineContext::new(&mut h.tasks, &mut h.owner, &mut h.outbox);
        assert_eq!(h.coordinator.on_action_finished(walk, &mut ctx), None);
        assert_eq!(h.owner.state(), OwnerState::Cleaning);
    }

    #[test]
    fn completion_lines_cycle_deterministically() {
        let mut settings = InteractionSettings::default();
        settings.completion_lines = vec!["one".to_string(), "two".to_string()];
        let mut coordinator = InteractionCoordinator::new(settings);

        let lines: Vec<String> = (0..3)
            .map(|_| coordinator.next_completion_line().to_string())
            .collect();
        assert_eq!(lines, vec!["one", "two", "one"]);
    }

    #[test]
    fn interaction_while_distracted_refocuses() {
        let mut h = Harness::new();
        h.interact(Vec2::ZERO, &[probe("chips", 5.0, 0.0)]);
        {
            let mut ctx = EngineContext::new(&mut h.tasks, &mut h.owner, &mut h.outbox);
            h.distraction.trigger(&mut ctx).unwrap();
        }
        assert_eq!(h.owner.state(), OwnerState::Distracted);

        let outcome = h.interact(Vec2::ZERO, &[probe("boxes", 5.0, 0.0)]);
        assert_eq!(
            outcome,
            InteractionOutcome::Refocused {
                resumed: Some(h.chips)
            }
        );
        assert_eq!(h.owner.state(), OwnerState::Walking);
        assert_eq!(h.state(h.chips), TaskState::InProgress);
        assert_eq!(h.state(h.boxes), TaskState::Pending);
    }

    #[test]
    fn completion_during_distraction_is_replayed_after_refocus() {
        let mut h = Harness::new();
        h.interact(Vec2::ZERO, &[probe("chips", 5.0, 0.0)]);
        h.finish_in_flight();
        {
            let mut ctx = EngineContext::new(&mut h.tasks, &mut h.owner, &mut h.outbox);
            h.distraction.trigger(&mut ctx).unwrap();
        }

        assert_eq!(h.finish_in_flight(), None);
        assert_eq!(h.state(h.chips), TaskState::InProgress);

        h.interact(Vec2::ZERO, &[]);
        let mut ctx = EngineContext::new(&mut h.tasks, &mut h.owner, &mut h.outbox);
        h.coordinator.tick(Duration::from_millis(16), &mut ctx);
        assert_eq!(h.state(h.chips), TaskState::Complete);
        assert_eq!(h.owner.state(), OwnerState::Idle);
    }

    #[test]
    fn stuck_chore_times_out_back_to_pending() {
        let mut settings = InteractionSettings::default();
        settings.action_timeout = Some(Duration::from_secs(5));
        let mut h = Harness::with_settings(settings);
        h.interact(Vec2::ZERO, &[probe("chips", 5.0, 0.0)]);
        let walk = h.owner.in_flight().unwrap();

        let mut ctx = EngineContext::new(&mut h.tasks, &mut h.owner, &mut h.outbox);
        h.coordinator.tick(Duration::from_secs(3), &mut ctx);
        assert_eq!(ctx.tasks.get(h.chips).unwrap().state, TaskState::InProgress);

        h.coordinator.tick(Duration::from_secs(3), &mut ctx);
        assert_eq!(ctx.tasks.get(h.chips).unwrap().state, TaskState::Pending);
        assert_eq!(ctx.owner.state(), OwnerState::Idle);
        assert!(ctx
            .outbox
            .commands
            .contains(&OwnerCommand::Cancel { handle: walk }));

        // The list is usable again.
        assert_eq!(
            h.interact(Vec2::ZERO, &[probe("boxes", 5.0, 0.0)]),
            InteractionOutcome::Triggered { task: h.boxes }
        );
    }

    #[test]
    fn timeout_pauses_while_distracted() {
        let mut settings = InteractionSettings::default();
        settings.action_timeout = Some(Duration::from_secs(5));
        let mut h = Harness::with_settings(settings);
        h.interact(Vec2::ZERO, &[probe("chips", 5.0, 0.0)]);

        let mut ctx = EngineContext::new(&mut h.tasks, &mut h.owner, &mut h.outbox);
        h.distraction.trigger(&mut ctx).unwrap();
        h.coordinator.tick(Duration::from_secs(60), &mut ctx);
        assert_eq!(ctx.tasks.get(h.chips).unwrap().state, TaskState::InProgress);
    }

    #[test]
    fn short_timeout_still_lets_cleaning_finish() {
        let mut settings = InteractionSettings::default();
        settings.action_timeout = Some(Duration::from_secs(1));
        let mut h = Harness::with_settings(settings);
        h.interact(Vec2::ZERO, &[probe("chips", 5.0, 0.0)]);
        h.finish_in_flight();
        assert_eq!(h.owner.state(), OwnerState::Cleaning);

        {
            let mut ctx = EngineContext::new(&mut h.tasks, &mut h.owner, &mut h.outbox);
            for _ in 0..24 {
                h.coordinator.tick(Duration::from_millis(100), &mut ctx);
            }
        }
        assert_eq!(h.owner.state(), OwnerState::Cleaning);
        assert_eq!(h.state(h.chips), TaskState::InProgress);

        assert_eq!(h.finish_in_flight(), Some(h.chips));
        assert_eq!(h.state(h.chips), TaskState::Complete);
    }
}
