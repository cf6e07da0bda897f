//! CorePlugin wires global timing, game phases, and system ordering for the house.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use super::context::Notice;

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Tracks scaled game time derived from real frame deltas.
///
/// Every engine timer (walks, cleaning effects, distraction intervals,
/// stuck-task timeouts) advances from `last_scaled_delta`.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier.
    pub fn new(time_scale: f32) -> Self {
        let clamped = time_scale.max(MIN_TIME_SCALE);
        Self {
            time_scale: clamped,
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Last real (unscaled) delta reported by Bevy's Time resource.
    #[cfg_attr(not(any(test, feature = "core_debug")), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Last scaled delta after applying the multiplier.
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Total scaled duration elapsed since the clock was initialised.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies a real delta to the clock, storing both the real and scaled durations.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta = real_delta.mul_f32(self.time_scale);
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

/// High level phase of a play session.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Intro,
    Playing,
    Ending,
}

/// Ordered stages of a single frame.
///
/// Input edges are turned into requests first, coordinators consume them,
/// the actuator advances in-flight owner commands, observers react to the
/// resulting state changes, and presentation renders last.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoreSet {
    Input,
    Coordinate,
    Actuate,
    Observe,
    Present,
}

/// Registers timing resources, the phase state machine, and frame ordering.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
}

impl CorePlugin {
    /// Creates a CorePlugin with the provided time-scale multiplier.
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self { time_scale }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationClock::new(self.time_scale))
            .init_state::<GamePhase>()
            .add_message::<Notice>()
            .configure_sets(
                Update,
                (
                    ChoreSet::Input,
                    ChoreSet::Coordinate,
                    ChoreSet::Actuate,
                    ChoreSet::Observe,
                    ChoreSet::Present,
                )
                    .chain(),
            )
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(
                Update,
                update_simulation_clock.before(ChoreSet::Input),
            )
            .add_systems(OnEnter(GamePhase::Playing), log_phase_change)
            .add_systems(OnEnter(GamePhase::Ending), log_phase_change);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks);
        }
    }
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_time_scale(clock: Res<SimulationClock>) {
    info!(
        "CorePlugin initialised with time scale: {:.3}",
        clock.time_scale()
    );
}

fn log_phase_change(phase: Res<State<GamePhase>>, clock: Res<SimulationClock>) {
    info!(
        "Entered phase {:?} after {:.1}s",
        phase.get(),
        clock.elapsed().as_secs_f32()
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer.timer.tick(clock.last_scaled_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | scale: {:.3} | real dt: {:.4}s | scaled dt: {:.4}s",
            clock.elapsed().as_secs_f32(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}
