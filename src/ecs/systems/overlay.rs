use glam::Vec2;

use crate::bee::body::Body;
use crate::overlay::Overlay;

fn anchor_center(world: &hecs::World, anchor: hecs::Entity) -> Option<Vec2> {
    world.get::<&Body>(anchor).ok().map(|body| body.center())
}

/// Route one pointer-motion event to every overlay.
pub fn route_pointer(world: &hecs::World, overlays: &mut [Overlay], pointer: Vec2) {
    for overlay in overlays {
        if let Some(center) = anchor_center(world, overlay.anchor) {
            overlay.on_pointer_move(pointer, center);
        }
    }
}

/// Recenter every overlay on its bee.
pub fn sync(world: &hecs::World, overlays: &mut [Overlay]) {
    for overlay in overlays {
        if let Some(center) = anchor_center(world, overlay.anchor) {
            overlay.sync(center);
        }
    }
}
