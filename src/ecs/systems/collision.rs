use crate::bee::body::Body;
use crate::ecs::components::Stats;

/// Bump the player against each worker in roster order.
///
/// Every overlap cheers both bees. `contact` is rewritten for each worker
/// checked, so it ends up holding the result for the last one only. With
/// no workers it keeps its previous value.
pub fn update(
    world: &mut hecs::World,
    player: hecs::Entity,
    workers: &[hecs::Entity],
    contact: &mut bool,
) {
    for &worker in workers {
        let overlapping = match (world.get::<&Body>(player), world.get::<&Body>(worker)) {
            (Ok(p), Ok(w)) => p.rect.overlaps(&w.rect),
            _ => continue,
        };

        if overlapping {
            for bee in [player, worker] {
                if let Ok(mut stats) = world.get::<&mut Stats>(bee) {
                    stats.cheer();
                }
            }
        }
        *contact = overlapping;
    }
}
