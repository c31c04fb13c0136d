use crate::bee::body::Body;
use crate::config::SimConfig;
use crate::ecs::components::{Controller, Stats};
use crate::input::InputState;

/// Steer the player bee from held keys, then wrap and grow it.
pub fn update(world: &mut hecs::World, input: &InputState, config: &SimConfig) {
    let velocity = input.direction() * config.player_speed;

    for (_, (body, stats, controller)) in
        world.query_mut::<(&mut Body, &Stats, &Controller)>()
    {
        if *controller != Controller::Player {
            continue;
        }
        body.apply_movement(velocity);
        body.wrap_to_bounds(config.width(), config.height());
        body.apply_growth(stats.happiness);
    }
}
