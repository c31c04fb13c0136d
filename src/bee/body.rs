use glam::Vec2;

use super::growth::SizeTier;
use crate::geom::Rect;

/// Position and size of a bee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub tier: SizeTier,
}

impl Body {
    /// Small body centered on `center`.
    pub fn centered(center: Vec2) -> Self {
        let tier = SizeTier::Small;
        Self {
            rect: Rect::from_center(center, tier.size()),
            tier,
        }
    }

    /// Small body with its top-left corner at `min`.
    pub fn at(min: Vec2) -> Self {
        let tier = SizeTier::Small;
        Self {
            rect: Rect::new(min, tier.size()),
            tier,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Translate. No bounds checks; see [`Body::wrap_to_bounds`].
    pub fn apply_movement(&mut self, delta: Vec2) {
        self.rect.min += delta;
    }

    /// Teleport to the opposite edge once the body has fully left the
    /// screen. A body that is partly visible is left alone.
    pub fn wrap_to_bounds(&mut self, width: f32, height: f32) {
        if self.rect.right() < 0.0 {
            self.rect.min.x = width;
        } else if self.rect.left() > width {
            self.rect.min.x = -self.rect.size.x;
        }

        if self.rect.bottom() < 0.0 {
            self.rect.min.y = height;
        } else if self.rect.top() > height {
            self.rect.min.y = -self.rect.size.y;
        }
    }

    /// Resize to the tier `happiness` earns, keeping the center fixed.
    /// Never shrinks.
    pub fn apply_growth(&mut self, happiness: u32) {
        let tier = SizeTier::for_happiness(happiness).max(self.tier);
        if tier == self.tier {
            return;
        }
        let center = self.rect.center();
        self.tier = tier;
        self.rect = Rect::from_center(center, tier.size());
    }
}
