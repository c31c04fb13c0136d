use glam::Vec2;

/// Fixed tuning values for one simulation. Passed explicitly into every
/// update call instead of living in globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Virtual screen size in pixels.
    pub screen: Vec2,
    /// Player step per tick while a direction key is held.
    pub player_speed: f32,
    /// Worker step per tick while moving.
    pub wander_speed: f32,
    /// Milliseconds between worker spawns.
    pub spawn_interval_ms: f32,
    /// Target ticks per second.
    pub tick_hz: u32,
    /// Stat overlay box size.
    pub overlay_size: Vec2,
    /// Side length of the contact indicator square.
    pub indicator_size: f32,
}

impl SimConfig {
    pub const DEFAULT: Self = Self {
        screen: Vec2::new(640.0, 480.0),
        player_speed: 5.0,
        wander_speed: 5.0,
        spawn_interval_ms: 5000.0,
        tick_hz: 60,
        overlay_size: Vec2::new(64.0, 48.0),
        indicator_size: 64.0,
    };

    pub fn width(&self) -> f32 {
        self.screen.x
    }

    pub fn height(&self) -> f32 {
        self.screen.y
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
