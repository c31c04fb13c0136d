//! Turns simulation state into draw lists.
//!
//! Everything here is plain data so paint order can be checked without a
//! GPU. Sprites are drawn by the rect pipeline; labels and the indicator are
//! painted by the HUD on top, in that order.

use glam::Vec2;

use super::instance::RectInstance;
use crate::bee::{self, body::Body};
use crate::ecs::components::Appearance;
use crate::geom::Rect;
use crate::sim::Simulation;

pub const SKY_BLUE: u32 = bee::rgba(135, 206, 250, 255);
pub const RED: u32 = bee::rgba(255, 0, 0, 255);
pub const GREEN: u32 = bee::rgba(0, 255, 0, 255);
pub const BLUE: u32 = bee::rgba(0, 0, 255, 255);

/// Black stripes across a small bee: (x offset, width) on a 32-wide body.
/// Scaled with the body when it grows.
const STRIPES: [(f32, f32); 2] = [(7.0, 6.0), (19.0, 6.0)];
const STRIPE_BASE_WIDTH: f32 = 32.0;

/// One stat number drawn above a bee.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLabel {
    pub pos: Vec2,
    pub text: String,
    /// Opaque RGBA; `alpha` is applied on top.
    pub color: u32,
    pub alpha: u8,
}

/// Corner square showing the contact flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub rect: Rect,
    pub color: u32,
}

/// Everything needed to draw one frame.
pub struct FrameScene {
    pub clear_color: u32,
    /// Workers first, then the player.
    pub sprites: Vec<RectInstance>,
    /// Health, energy, happiness per overlay, in overlay order.
    pub labels: Vec<StatLabel>,
    pub indicator: Indicator,
}

impl FrameScene {
    pub fn new() -> Self {
        Self {
            clear_color: SKY_BLUE,
            sprites: Vec::new(),
            labels: Vec::new(),
            indicator: Indicator {
                rect: Rect::new(Vec2::ZERO, Vec2::ZERO),
                color: RED,
            },
        }
    }

    /// Rebuild the draw lists in place, reusing allocations.
    pub fn rebuild(&mut self, sim: &Simulation) {
        self.sprites.clear();
        self.labels.clear();

        for &worker in sim.workers() {
            self.push_bee(sim.world(), worker);
        }
        self.push_bee(sim.world(), sim.player());

        for overlay in sim.overlays() {
            let Some(stats) = sim.stats(overlay.anchor) else {
                continue;
            };
            let values = [
                (stats.health, RED),
                (stats.energy, BLUE),
                (stats.happiness, GREEN),
            ];
            for (pos, (value, color)) in overlay.label_positions().into_iter().zip(values) {
                self.labels.push(StatLabel {
                    pos,
                    text: value.to_string(),
                    color,
                    alpha: overlay.alpha(),
                });
            }
        }

        let config = sim.config();
        let side = config.indicator_size;
        self.indicator = Indicator {
            rect: Rect::new(Vec2::new(config.width() - side, 0.0), Vec2::splat(side)),
            color: if sim.contact() { GREEN } else { RED },
        };
    }

    fn push_bee(&mut self, world: &hecs::World, entity: hecs::Entity) {
        let Ok(mut query) = world.query_one::<(&Body, &Appearance)>(entity) else {
            return;
        };
        let Some((body, appearance)) = query.get() else {
            return;
        };

        self.sprites
            .push(RectInstance::from_rect(&body.rect, appearance.color));

        let scale = body.rect.size.x / STRIPE_BASE_WIDTH;
        for (x, w) in STRIPES {
            let stripe = Rect::new(
                body.rect.min + Vec2::new(x * scale, 0.0),
                Vec2::new(w * scale, body.rect.size.y),
            );
            self.sprites
                .push(RectInstance::from_rect(&stripe, bee::BLACK));
        }
    }
}

impl Default for FrameScene {
    fn default() -> Self {
        Self::new()
    }
}
