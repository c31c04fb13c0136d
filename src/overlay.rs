use glam::Vec2;

use crate::geom::Rect;

/// Label opacity while the pointer is over the overlay.
pub const ALPHA_HOVERED: u8 = 230;
/// Label opacity otherwise (~10%).
pub const ALPHA_IDLE: u8 = 23;

/// Stat label offsets from the overlay's top-left: health, energy, happiness.
pub const LABEL_OFFSETS: [Vec2; 3] = [
    Vec2::new(16.0, 0.0),
    Vec2::new(28.0, 0.0),
    Vec2::new(40.0, 0.0),
];

/// Floating stats box that follows one bee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Bee this overlay follows. Does not own it.
    pub anchor: hecs::Entity,
    pub rect: Rect,
    pub pointer_over: bool,
}

impl Overlay {
    pub fn new(anchor: hecs::Entity, anchor_center: Vec2, size: Vec2) -> Self {
        Self {
            anchor,
            rect: Rect::from_center(anchor_center, size),
            pointer_over: false,
        }
    }

    /// Re-anchor, then hit-test the pointer against the fresh box.
    pub fn on_pointer_move(&mut self, pointer: Vec2, anchor_center: Vec2) {
        self.sync(anchor_center);
        self.pointer_over = self.rect.contains(pointer);
    }

    /// Recenter on the anchor.
    pub fn sync(&mut self, anchor_center: Vec2) {
        self.rect.set_center(anchor_center);
    }

    pub fn alpha(&self) -> u8 {
        if self.pointer_over {
            ALPHA_HOVERED
        } else {
            ALPHA_IDLE
        }
    }

    /// Screen positions of the three stat labels.
    pub fn label_positions(&self) -> [Vec2; 3] {
        LABEL_OFFSETS.map(|offset| self.rect.min + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay_at(center: Vec2) -> Overlay {
        let mut world = hecs::World::new();
        let anchor = world.spawn(());
        Overlay::new(anchor, center, Vec2::new(64.0, 48.0))
    }

    #[test]
    fn pointer_flips_on_each_motion() {
        let mut overlay = overlay_at(Vec2::new(100.0, 100.0));
        let center = Vec2::new(100.0, 100.0);

        overlay.on_pointer_move(Vec2::new(90.0, 110.0), center);
        assert!(overlay.pointer_over);
        assert_eq!(overlay.alpha(), ALPHA_HOVERED);

        overlay.on_pointer_move(Vec2::new(200.0, 110.0), center);
        assert!(!overlay.pointer_over);
        assert_eq!(overlay.alpha(), ALPHA_IDLE);
    }

    #[test]
    fn hit_test_uses_current_anchor_position() {
        let mut overlay = overlay_at(Vec2::new(100.0, 100.0));

        // The anchor moved away since the last sync; the pointer sits where
        // the bee is now, not where the overlay was drawn last frame.
        overlay.on_pointer_move(Vec2::new(300.0, 300.0), Vec2::new(300.0, 300.0));
        assert!(overlay.pointer_over);
        assert_eq!(overlay.rect.center(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn labels_sit_along_the_top_edge() {
        let overlay = overlay_at(Vec2::new(32.0, 24.0));
        assert_eq!(overlay.rect.min, Vec2::ZERO);
        assert_eq!(
            overlay.label_positions(),
            [
                Vec2::new(16.0, 0.0),
                Vec2::new(28.0, 0.0),
                Vec2::new(40.0, 0.0)
            ]
        );
    }
}
