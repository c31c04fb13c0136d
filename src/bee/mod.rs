pub mod body;
pub mod growth;

use glam::Vec2;

use self::body::Body;
use crate::config::SimConfig;
use crate::ecs::components::*;
use crate::ecs::systems::wander;

/// Player body color.
pub const YELLOW: u32 = rgba(255, 255, 0, 255);
/// Worker body color, a little duller than the player.
pub const YELLOW_OFF: u32 = rgba(200, 200, 0, 255);
/// Stripe color.
pub const BLACK: u32 = rgba(0, 0, 0, 255);

/// Pack an RGBA color as 0xRRGGBBAA.
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32
}

/// Spawn the player bee in the middle of the screen.
pub fn spawn_player(world: &mut hecs::World, config: &SimConfig) -> hecs::Entity {
    world.spawn((
        Body::centered(config.screen * 0.5),
        Stats::STARTING,
        Appearance { color: YELLOW },
        Controller::Player,
    ))
}

/// Spawn a worker bee at a random spot fully inside the screen.
pub fn spawn_worker(
    world: &mut hecs::World,
    config: &SimConfig,
    rng: &mut fastrand::Rng,
) -> hecs::Entity {
    let size = growth::SizeTier::Small.size();
    let max_x = (config.width() - size.x).max(1.0) as u32;
    let max_y = (config.height() - size.y).max(1.0) as u32;
    let min = Vec2::new(rng.u32(0..max_x) as f32, rng.u32(0..max_y) as f32);

    world.spawn((
        Body::at(min),
        Stats::STARTING,
        Appearance { color: YELLOW_OFF },
        Controller::Wander(wander::initial_state(rng)),
    ))
}
