use instant::Instant;

/// Which slice of a frame is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    Events = 0,
    Player = 1,
    Workers = 2,
    Overlays = 3,
    Spawn = 4,
    Collision = 5,
    BuildFrame = 6,
    Render = 7,
}

impl SystemPhase {
    pub const COUNT: usize = 8;

    pub const ALL: [SystemPhase; Self::COUNT] = [
        Self::Events,
        Self::Player,
        Self::Workers,
        Self::Overlays,
        Self::Spawn,
        Self::Collision,
        Self::BuildFrame,
        Self::Render,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Events => "Events",
            Self::Player => "Player",
            Self::Workers => "Workers",
            Self::Overlays => "Overlays",
            Self::Spawn => "Spawn",
            Self::Collision => "Collision",
            Self::BuildFrame => "Build Frame",
            Self::Render => "Render",
        }
    }
}

/// Per-phase timing with exponential moving average smoothing.
pub struct SystemTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; SystemPhase::COUNT],
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl SystemTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; SystemPhase::COUNT],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes.
    pub fn end(&mut self, phase: SystemPhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    /// Time `f` as `phase`. The sample is recorded however `f` returns.
    pub fn time<R>(&mut self, phase: SystemPhase, f: impl FnOnce() -> R) -> R {
        self.begin();
        let out = f();
        self.end(phase);
        out
    }

    fn record(&mut self, phase: SystemPhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }
}

impl Default for SystemTimers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_moves_toward_samples() {
        let mut timers = SystemTimers::new();
        timers.record(SystemPhase::Workers, 100.0);
        assert!((timers.durations_us[SystemPhase::Workers as usize] - 10.0).abs() < 1e-9);
        timers.record(SystemPhase::Workers, 100.0);
        assert!((timers.durations_us[SystemPhase::Workers as usize] - 19.0).abs() < 1e-9);
    }

    #[test]
    fn timed_phase_records_even_when_closure_bails_out() {
        let mut timers = SystemTimers::new();
        let skipped: Option<()> = timers.time(SystemPhase::Render, || {
            std::thread::sleep(std::time::Duration::from_millis(2));
            None
        });
        assert!(skipped.is_none());
        // 2 ms sample at EMA weight 0.1.
        assert!(timers.durations_us[SystemPhase::Render as usize] >= 200.0);
        assert_eq!(timers.durations_us[SystemPhase::BuildFrame as usize], 0.0);
    }

    #[test]
    fn phases_index_their_own_slot() {
        for (i, phase) in SystemPhase::ALL.iter().enumerate() {
            assert_eq!(*phase as usize, i);
        }
    }
}
