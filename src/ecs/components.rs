/// Bee counters. Only happiness changes during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub energy: u32,
    pub health: u32,
    pub happiness: u32,
}

impl Stats {
    pub const STARTING: Self = Self {
        energy: 5,
        health: 5,
        happiness: 5,
    };

    /// One point of happiness from a bump.
    pub fn cheer(&mut self) {
        self.happiness = self.happiness.saturating_add(1);
    }
}

/// Visual appearance.
#[derive(Debug, Clone, Copy)]
pub struct Appearance {
    /// RGBA packed as u32.
    pub color: u32,
}

/// Who drives a bee's movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Controller {
    Player,
    Wander(WanderState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WanderPhase {
    Paused,
    Moving,
}

/// Pause/move oscillator for a worker bee. A single `elapsed` accumulator
/// is shared by both phases and reset on every phase change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderState {
    pub phase: WanderPhase,
    /// Milliseconds spent in the current phase.
    pub elapsed: f32,
    pub pause_duration: f32,
    pub move_duration: f32,
    /// Degrees, 0..=359.
    pub heading: u32,
}

impl WanderState {
    /// Duration of whichever phase is active.
    pub fn phase_duration(&self) -> f32 {
        match self.phase {
            WanderPhase::Paused => self.pause_duration,
            WanderPhase::Moving => self.move_duration,
        }
    }
}
