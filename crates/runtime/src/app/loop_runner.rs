use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use super::metrics::MetricsAccumulator;
use super::session::{InputSnapshot, Session, SessionCommand, World};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 50,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("loop config rejected: target_tps must be non-zero")]
    ZeroTickRate,
    #[error("loop config rejected: max_ticks_per_frame must be non-zero")]
    ZeroTickCap,
}

/// Per-frame input feed. The session loop polls this once per frame;
/// edge-triggered state should be consumed by the poll.
pub trait InputSource {
    fn snapshot_for_frame(&mut self) -> InputSnapshot;
}

/// Input source for sessions with no attached input device; every
/// frame reads as empty intent.
#[derive(Debug, Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn snapshot_for_frame(&mut self) -> InputSnapshot {
        InputSnapshot::empty()
    }
}

/// Drives a session until it returns `SessionCommand::Exit`. Each
/// frame runs one variable-rate update followed by the fixed-rate
/// ticks owed by the accumulator; the fixed tick rate is independent
/// of the frame rate.
pub fn run_session(
    config: LoopConfig,
    session: &mut dyn Session,
    input: &mut dyn InputSource,
) -> Result<(), RuntimeError> {
    if config.target_tps == 0 {
        return Err(RuntimeError::ZeroTickRate);
    }
    if config.max_ticks_per_frame == 0 {
        return Err(RuntimeError::ZeroTickCap);
    }

    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt = Duration::from_secs_f64(1.0 / config.target_tps as f64);
    let fixed_dt_seconds = fixed_dt.as_secs_f32();

    let mut world = World::default();
    session.load(&mut world);
    world.apply_pending();
    info!(
        entity_count = world.entity_count(),
        target_tps = config.target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame = config.max_ticks_per_frame,
        "session_loaded"
    );

    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);

    loop {
        let now = Instant::now();
        let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
        last_frame_instant = now;

        let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);
        accumulator = accumulator.saturating_add(clamped_frame_dt);

        let input_snapshot = input.snapshot_for_frame();
        let command = session.update(clamped_frame_dt.as_secs_f32(), &input_snapshot, &mut world);
        world.apply_pending();

        let step_plan = plan_sim_steps(accumulator, fixed_dt, config.max_ticks_per_frame);
        for _ in 0..step_plan.ticks_to_run {
            session.fixed_update(fixed_dt_seconds, &mut world);
            world.apply_pending();
            metrics_accumulator.record_tick();
        }
        accumulator = step_plan.remaining_accumulator;

        if step_plan.dropped_backlog > Duration::ZERO {
            warn!(
                dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                max_ticks_per_frame = config.max_ticks_per_frame,
                "sim_clamp_triggered"
            );
        }

        metrics_accumulator.record_frame(raw_frame_dt);
        if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
            info!(
                fps = snapshot.fps,
                tps = snapshot.tps,
                frame_time_ms = snapshot.frame_time_ms,
                entity_count = world.entity_count(),
                "loop_metrics"
            );
        }

        if matches!(command, SessionCommand::Exit) {
            break;
        }

        let frame_elapsed = Instant::now().saturating_duration_since(now);
        if frame_elapsed < fixed_dt {
            thread::sleep(fixed_dt - frame_elapsed);
        }
    }

    session.shutdown(&mut world);
    info!("session_shutdown");
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        let raw_frame_dt = Duration::from_millis(600);

        assert_eq!(
            clamp_frame_delta(raw_frame_dt, max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn plan_sim_steps_runs_expected_ticks_without_drop() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(48), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_keeps_partial_tick_in_accumulator() {
        let fixed_dt = Duration::from_millis(20);
        let result = plan_sim_steps(Duration::from_millis(50), fixed_dt, 5);

        assert_eq!(result.ticks_to_run, 2);
        assert_eq!(result.remaining_accumulator, Duration::from_millis(10));
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let fixed_dt = Duration::from_millis(16);
        let result = plan_sim_steps(Duration::from_millis(120), fixed_dt, 3);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(72));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        struct Inert;
        impl Session for Inert {
            fn load(&mut self, _world: &mut World) {}
            fn update(
                &mut self,
                _dt_seconds: f32,
                _input: &InputSnapshot,
                _world: &mut World,
            ) -> SessionCommand {
                SessionCommand::Exit
            }
            fn fixed_update(&mut self, _fixed_dt_seconds: f32, _world: &mut World) {}
            fn shutdown(&mut self, _world: &mut World) {}
        }

        let config = LoopConfig {
            target_tps: 0,
            ..LoopConfig::default()
        };
        let result = run_session(config, &mut Inert, &mut NullInput);
        assert!(matches!(result, Err(RuntimeError::ZeroTickRate)));
    }

    #[test]
    fn session_exit_stops_the_loop_after_shutdown() {
        #[derive(Default)]
        struct CountDown {
            updates: u32,
            shutdowns: u32,
        }
        impl Session for CountDown {
            fn load(&mut self, _world: &mut World) {}
            fn update(
                &mut self,
                _dt_seconds: f32,
                _input: &InputSnapshot,
                _world: &mut World,
            ) -> SessionCommand {
                self.updates += 1;
                if self.updates >= 3 {
                    SessionCommand::Exit
                } else {
                    SessionCommand::None
                }
            }
            fn fixed_update(&mut self, _fixed_dt_seconds: f32, _world: &mut World) {}
            fn shutdown(&mut self, _world: &mut World) {
                self.shutdowns += 1;
            }
        }

        let config = LoopConfig {
            target_tps: 1000,
            ..LoopConfig::default()
        };
        let mut session = CountDown::default();
        run_session(config, &mut session, &mut NullInput).expect("loop run");

        assert_eq!(session.updates, 3);
        assert_eq!(session.shutdowns, 1);
    }
}
