use glam::Vec2;

use crate::bee::body::Body;
use crate::config::SimConfig;
use crate::ecs::components::{Controller, Stats, WanderPhase, WanderState};

/// First pause after spawning, in ms.
const FIRST_PAUSE_MS: std::ops::RangeInclusive<u32> = 1000..=5000;
/// Pauses after each completed move, in ms.
const PAUSE_MS: std::ops::RangeInclusive<u32> = 250..=1250;
/// Move lengths, in ms.
const MOVE_MS: std::ops::RangeInclusive<u32> = 1000..=5000;

/// Fresh state for a newly spawned worker. The move duration starts at
/// zero, so the first pause rolls straight into a reset before any motion.
pub fn initial_state(rng: &mut fastrand::Rng) -> WanderState {
    WanderState {
        phase: WanderPhase::Paused,
        elapsed: 0.0,
        pause_duration: rng.u32(FIRST_PAUSE_MS) as f32,
        move_duration: 0.0,
        heading: 0,
    }
}

/// Advance one worker's oscillator by `dt_ms`. Returns the step to apply
/// to its position this tick.
pub fn step(
    state: &mut WanderState,
    dt_ms: f32,
    speed: f32,
    rng: &mut fastrand::Rng,
) -> Vec2 {
    if state.phase == WanderPhase::Paused {
        if state.elapsed < state.phase_duration() {
            state.elapsed += dt_ms;
            return Vec2::ZERO;
        }
        // Paused long enough: fall through into the moving branch this tick.
        state.phase = WanderPhase::Moving;
        state.elapsed = 0.0;
    }

    if state.elapsed < state.phase_duration() {
        let angle = (state.heading as f32).to_radians();
        state.elapsed += dt_ms;
        return Vec2::new(angle.cos(), angle.sin()) * speed;
    }

    state.phase = WanderPhase::Paused;
    state.elapsed = 0.0;
    state.pause_duration = rng.u32(PAUSE_MS) as f32;
    state.move_duration = rng.u32(MOVE_MS) as f32;
    state.heading = rng.u32(0..360);
    log::trace!(
        "wander reset: pause {}ms, move {}ms @ {}deg",
        state.pause_duration,
        state.move_duration,
        state.heading
    );
    Vec2::ZERO
}

/// Move every worker in roster order, then wrap and grow it.
pub fn update(
    world: &mut hecs::World,
    workers: &[hecs::Entity],
    dt_ms: f32,
    config: &SimConfig,
    rng: &mut fastrand::Rng,
) {
    for &worker in workers {
        let Ok((body, stats, controller)) =
            world.query_one_mut::<(&mut Body, &Stats, &mut Controller)>(worker)
        else {
            continue;
        };
        let Controller::Wander(state) = controller else {
            continue;
        };

        let delta = step(state, dt_ms, config.wander_speed, rng);
        body.apply_movement(delta);
        body.wrap_to_bounds(config.width(), config.height());
        body.apply_growth(stats.happiness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bee;

    const DT: f32 = 1000.0 / 60.0;

    fn paused(elapsed: f32, pause: f32, mv: f32) -> WanderState {
        WanderState {
            phase: WanderPhase::Paused,
            elapsed,
            pause_duration: pause,
            move_duration: mv,
            heading: 0,
        }
    }

    #[test]
    fn initial_pause_is_in_first_range() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..100 {
            let s = initial_state(&mut rng);
            assert_eq!(s.phase, WanderPhase::Paused);
            assert!((1000.0..=5000.0).contains(&s.pause_duration));
            assert_eq!(s.move_duration, 0.0);
        }
    }

    #[test]
    fn pause_accumulates_without_moving() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut s = paused(0.0, 100.0, 500.0);
        let d = step(&mut s, DT, 5.0, &mut rng);
        assert_eq!(d, Vec2::ZERO);
        assert_eq!(s.phase, WanderPhase::Paused);
        assert_eq!(s.elapsed, DT);
    }

    #[test]
    fn finished_pause_moves_on_the_same_tick() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut s = paused(100.0, 100.0, 500.0);
        let d = step(&mut s, DT, 5.0, &mut rng);
        assert_eq!(s.phase, WanderPhase::Moving);
        assert_eq!(s.elapsed, DT);
        assert!((d - Vec2::new(5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn heading_sets_direction() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut s = WanderState {
            phase: WanderPhase::Moving,
            elapsed: 0.0,
            pause_duration: 0.0,
            move_duration: 1000.0,
            heading: 90,
        };
        let d = step(&mut s, DT, 5.0, &mut rng);
        assert!((d - Vec2::new(0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn first_cycle_resets_without_motion() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut s = paused(5000.0, 5000.0, 0.0);
        let d = step(&mut s, DT, 5.0, &mut rng);

        assert_eq!(d, Vec2::ZERO);
        assert_eq!(s.phase, WanderPhase::Paused);
        assert_eq!(s.elapsed, 0.0);
        assert!((250.0..=1250.0).contains(&s.pause_duration));
        assert!((1000.0..=5000.0).contains(&s.move_duration));
        assert!(s.heading < 360);
    }

    #[test]
    fn finished_move_resets_to_pause() {
        let mut rng = fastrand::Rng::with_seed(4);
        let mut s = WanderState {
            phase: WanderPhase::Moving,
            elapsed: 1000.0,
            pause_duration: 300.0,
            move_duration: 1000.0,
            heading: 45,
        };
        let d = step(&mut s, DT, 5.0, &mut rng);
        assert_eq!(d, Vec2::ZERO);
        assert_eq!(s.phase, WanderPhase::Paused);
        assert_eq!(s.elapsed, 0.0);
    }

    #[test]
    fn one_accumulator_at_a_time_over_long_run() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut s = initial_state(&mut rng);
        let mut moved_ticks = 0;
        let mut phase_changes = 0;

        for _ in 0..20_000 {
            let before = s;
            let d = step(&mut s, DT, 5.0, &mut rng);

            if s.phase == before.phase {
                // Same phase: elapsed grows by one tick, unless the zero-length
                // first move bounced straight back into a fresh pause.
                let bounced = s.phase == WanderPhase::Paused && s.elapsed == 0.0;
                assert!(bounced || s.elapsed == before.elapsed + DT);
            } else {
                phase_changes += 1;
                // A phase change always restarts the shared accumulator.
                assert!(s.elapsed == 0.0 || s.elapsed == DT);
            }

            if d != Vec2::ZERO {
                moved_ticks += 1;
                assert_eq!(s.phase, WanderPhase::Moving);
            }
            assert!(s.elapsed <= s.phase_duration() + DT);
        }

        assert!(moved_ticks > 0);
        assert!(phase_changes > 10);
    }

    #[test]
    fn update_follows_roster_and_wraps() {
        let mut world = hecs::World::new();
        let config = SimConfig::default();
        let mut rng = fastrand::Rng::with_seed(5);
        let worker = bee::spawn_worker(&mut world, &config, &mut rng);

        {
            let mut body = world.get::<&mut Body>(worker).unwrap();
            body.rect.min = glam::Vec2::new(640.0, 100.0);
            let mut controller = world.get::<&mut Controller>(worker).unwrap();
            *controller = Controller::Wander(WanderState {
                phase: WanderPhase::Moving,
                elapsed: 0.0,
                pause_duration: 500.0,
                move_duration: 1000.0,
                heading: 0,
            });
        }

        update(&mut world, &[worker], DT, &config, &mut rng);

        let body = world.get::<&Body>(worker).unwrap();
        assert_eq!(body.rect.right(), 0.0);
        assert_eq!(body.rect.min.y, 100.0);
    }
}
