//! The per-tick garden simulation.
//!
//! [`Simulation`] owns every bee, the worker roster, the overlays and the
//! global timers. One call to [`Simulation::tick`] runs the whole fixed
//! sequence: events, player, workers, overlays, spawn, collision. Rendering
//! reads the result afterwards through the accessors.

use crate::bee::{self, body::Body};
use crate::config::SimConfig;
use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::ecs::components::Stats;
use crate::ecs::systems;
use crate::input::{InputState, PlatformEvent};
use crate::overlay::Overlay;

/// Whether the loop should keep going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Quit,
}

pub struct Simulation {
    config: SimConfig,
    world: hecs::World,
    player: hecs::Entity,
    /// Worker bees in spawn order.
    workers: Vec<hecs::Entity>,
    /// Player overlay first, then one per worker in spawn order.
    overlays: Vec<Overlay>,
    spawn_timer: f32,
    contact: bool,
    tick_count: u64,
    pub timers: SystemTimers,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut world = hecs::World::new();
        let player = bee::spawn_player(&mut world, &config);
        let mut sim = Self {
            config,
            world,
            player,
            workers: Vec::new(),
            overlays: Vec::new(),
            spawn_timer: 0.0,
            contact: false,
            tick_count: 0,
            timers: SystemTimers::new(),
        };
        sim.attach_overlay(player);
        sim
    }

    /// Run one tick. `events` are the platform events queued since the last
    /// tick; `dt_ms` is the measured tick delta.
    pub fn tick(
        &mut self,
        events: impl IntoIterator<Item = PlatformEvent>,
        input: &InputState,
        dt_ms: f32,
        rng: &mut fastrand::Rng,
    ) -> TickFlow {
        // 1. Events
        self.timers.begin();
        for event in events {
            match event {
                PlatformEvent::Quit => {
                    self.timers.end(SystemPhase::Events);
                    return TickFlow::Quit;
                }
                PlatformEvent::PointerMoved(pointer) => {
                    systems::overlay::route_pointer(&self.world, &mut self.overlays, pointer);
                }
            }
        }
        self.timers.end(SystemPhase::Events);

        // 2. Player
        self.timers.begin();
        systems::player::update(&mut self.world, input, &self.config);
        self.timers.end(SystemPhase::Player);

        // 3. Workers
        self.timers.begin();
        systems::wander::update(&mut self.world, &self.workers, dt_ms, &self.config, rng);
        self.timers.end(SystemPhase::Workers);

        // 4. Overlays
        self.timers.begin();
        systems::overlay::sync(&self.world, &mut self.overlays);
        self.timers.end(SystemPhase::Overlays);

        // 5. Spawn
        self.timers.begin();
        if systems::spawn::advance(&mut self.spawn_timer, dt_ms, self.config.spawn_interval_ms) {
            self.spawn_worker(rng);
        }
        self.timers.end(SystemPhase::Spawn);

        // 6. Collision
        self.timers.begin();
        systems::collision::update(&mut self.world, self.player, &self.workers, &mut self.contact);
        self.timers.end(SystemPhase::Collision);

        self.tick_count += 1;
        TickFlow::Continue
    }

    /// Add one worker plus its overlay.
    pub fn spawn_worker(&mut self, rng: &mut fastrand::Rng) -> hecs::Entity {
        let worker = bee::spawn_worker(&mut self.world, &self.config, rng);
        self.workers.push(worker);
        self.attach_overlay(worker);
        log::debug!("Spawned worker #{} ({:?})", self.workers.len(), worker);
        worker
    }

    fn attach_overlay(&mut self, anchor: hecs::Entity) {
        let center = self
            .world
            .get::<&Body>(anchor)
            .map(|body| body.center())
            .unwrap_or(self.config.screen * 0.5);
        self.overlays
            .push(Overlay::new(anchor, center, self.config.overlay_size));
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }

    pub fn player(&self) -> hecs::Entity {
        self.player
    }

    pub fn workers(&self) -> &[hecs::Entity] {
        &self.workers
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Result of the last worker's overlap test.
    pub fn contact(&self) -> bool {
        self.contact
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn body(&self, bee: hecs::Entity) -> Option<Body> {
        self.world.get::<&Body>(bee).ok().map(|b| *b)
    }

    pub fn stats(&self, bee: hecs::Entity) -> Option<Stats> {
        self.world.get::<&Stats>(bee).ok().map(|s| *s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Controller, WanderPhase, WanderState};
    use glam::Vec2;

    const DT: f32 = 1000.0 / 60.0;
    const NO_EVENTS: [PlatformEvent; 0] = [];

    fn idle_tick(sim: &mut Simulation, dt: f32, rng: &mut fastrand::Rng) -> TickFlow {
        sim.tick(NO_EVENTS, &InputState::default(), dt, rng)
    }

    fn freeze(sim: &mut Simulation, worker: hecs::Entity) {
        // A long pause keeps the worker where the test puts it.
        *sim.world_mut().get::<&mut Controller>(worker).unwrap() =
            Controller::Wander(WanderState {
                phase: WanderPhase::Paused,
                elapsed: 0.0,
                pause_duration: 1.0e9,
                move_duration: 0.0,
                heading: 0,
            });
    }

    fn place(sim: &mut Simulation, bee: hecs::Entity, min: Vec2) {
        sim.world_mut().get::<&mut Body>(bee).unwrap().rect.min = min;
    }

    #[test]
    fn starts_with_player_and_its_overlay() {
        let sim = Simulation::new(SimConfig::default());
        assert!(sim.workers().is_empty());
        assert_eq!(sim.overlays().len(), 1);
        assert_eq!(sim.overlays()[0].anchor, sim.player());
        assert!(!sim.contact());
    }

    #[test]
    fn spawns_exactly_one_worker_at_interval_without_carry() {
        let mut sim = Simulation::new(SimConfig::default());
        let mut rng = fastrand::Rng::with_seed(42);

        for _ in 0..49 {
            idle_tick(&mut sim, 100.0, &mut rng);
        }
        assert_eq!(sim.workers().len(), 0);
        assert_eq!(sim.spawn_timer(), 4900.0);

        idle_tick(&mut sim, 150.0, &mut rng);
        assert_eq!(sim.workers().len(), 1);
        assert_eq!(sim.overlays().len(), 2);
        assert_eq!(sim.spawn_timer(), 0.0, "overshoot must not carry");

        idle_tick(&mut sim, 100.0, &mut rng);
        assert_eq!(sim.workers().len(), 1);
        assert_eq!(sim.spawn_timer(), 100.0);
    }

    #[test]
    fn quit_stops_before_any_update() {
        let mut sim = Simulation::new(SimConfig::default());
        let mut rng = fastrand::Rng::with_seed(1);
        let before = sim.body(sim.player()).unwrap();
        let input = InputState {
            right: true,
            ..Default::default()
        };

        let flow = sim.tick([PlatformEvent::Quit], &input, DT, &mut rng);

        assert_eq!(flow, TickFlow::Quit);
        assert_eq!(sim.body(sim.player()).unwrap(), before);
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn player_moves_fifty_right_in_ten_ticks() {
        let mut sim = Simulation::new(SimConfig::default());
        let mut rng = fastrand::Rng::with_seed(1);
        let start = sim.body(sim.player()).unwrap().rect.min;
        let input = InputState {
            right: true,
            ..Default::default()
        };

        for _ in 0..10 {
            sim.tick(NO_EVENTS, &input, DT, &mut rng);
        }

        let end = sim.body(sim.player()).unwrap().rect.min;
        assert_eq!(end.x - start.x, 50.0);
        assert_eq!(end.y, start.y);
    }

    #[test]
    fn contact_flag_follows_last_worker() {
        let mut sim = Simulation::new(SimConfig::default());
        let mut rng = fastrand::Rng::with_seed(8);
        let first = sim.spawn_worker(&mut rng);
        let second = sim.spawn_worker(&mut rng);
        freeze(&mut sim, first);
        freeze(&mut sim, second);

        let player_min = sim.body(sim.player()).unwrap().rect.min;
        place(&mut sim, first, player_min + Vec2::new(4.0, 2.0));
        place(&mut sim, second, Vec2::new(10.0, 10.0));

        idle_tick(&mut sim, DT, &mut rng);
        assert!(!sim.contact());
        assert_eq!(sim.stats(first).unwrap().happiness, 6);
        assert_eq!(sim.stats(sim.player()).unwrap().happiness, 6);

        place(&mut sim, second, player_min + Vec2::new(-4.0, -2.0));
        idle_tick(&mut sim, DT, &mut rng);
        assert!(sim.contact());
        assert_eq!(sim.stats(sim.player()).unwrap().happiness, 8);
    }

    #[test]
    fn newly_spawned_worker_collides_on_its_spawn_tick() {
        let config = SimConfig {
            spawn_interval_ms: DT,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(config);
        let mut rng = fastrand::Rng::with_seed(5);

        idle_tick(&mut sim, DT, &mut rng);
        let worker = sim.workers()[0];
        let overlapping = sim
            .body(worker)
            .unwrap()
            .rect
            .overlaps(&sim.body(sim.player()).unwrap().rect);
        assert_eq!(sim.contact(), overlapping);
    }

    #[test]
    fn pointer_events_reach_every_overlay() {
        let mut sim = Simulation::new(SimConfig::default());
        let mut rng = fastrand::Rng::with_seed(3);
        let worker = sim.spawn_worker(&mut rng);
        freeze(&mut sim, worker);
        place(&mut sim, worker, Vec2::new(20.0, 20.0));

        let on_player = sim.body(sim.player()).unwrap().center();
        idle_tick_with(&mut sim, [PlatformEvent::PointerMoved(on_player)], &mut rng);
        assert!(sim.overlays()[0].pointer_over);
        assert!(!sim.overlays()[1].pointer_over);

        let on_worker = sim.body(worker).unwrap().center();
        idle_tick_with(&mut sim, [PlatformEvent::PointerMoved(on_worker)], &mut rng);
        assert!(!sim.overlays()[0].pointer_over);
        assert!(sim.overlays()[1].pointer_over);
    }

    fn idle_tick_with<const N: usize>(
        sim: &mut Simulation,
        events: [PlatformEvent; N],
        rng: &mut fastrand::Rng,
    ) {
        sim.tick(events, &InputState::default(), DT, rng);
    }

    #[test]
    fn overlays_follow_their_bees() {
        let mut sim = Simulation::new(SimConfig::default());
        let mut rng = fastrand::Rng::with_seed(1);
        let input = InputState {
            down: true,
            ..Default::default()
        };
        sim.tick(NO_EVENTS, &input, DT, &mut rng);

        let center = sim.body(sim.player()).unwrap().center();
        assert_eq!(sim.overlays()[0].rect.center(), center);
        assert_eq!(center, Vec2::new(320.0, 245.0));
    }

    #[test]
    fn long_run_keeps_sizes_monotonic() {
        let mut sim = Simulation::new(SimConfig::default());
        let mut rng = fastrand::Rng::with_seed(99);
        let input = InputState {
            right: true,
            down: true,
            ..Default::default()
        };
        let mut last_tier = sim.body(sim.player()).unwrap().tier;

        for _ in 0..6000 {
            sim.tick(NO_EVENTS, &input, DT, &mut rng);
            let tier = sim.body(sim.player()).unwrap().tier;
            assert!(tier >= last_tier);
            last_tier = tier;
        }
        assert!(sim.workers().len() >= 19);
    }
}
