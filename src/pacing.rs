use std::time::Duration;

use instant::Instant;

/// Longest tick delta handed to the simulation (ms). A window drag or a
/// debugger pause would otherwise dump seconds into the timers at once.
const MAX_TICK_DELTA_MS: f32 = 250.0;

/// Time since the previous tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDelta {
    /// Wall time actually elapsed, for frame statistics.
    pub measured_ms: f32,
    /// `measured_ms` clamped for the simulation.
    pub sim_ms: f32,
}

/// Caps the loop at a fixed rate and measures the delta between ticks.
pub struct FramePacer {
    period: Duration,
    last_tick: Option<Instant>,
}

impl FramePacer {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / tick_hz.max(1) as f64),
            last_tick: None,
        }
    }

    /// When the next tick is due. `None` before the first tick.
    pub fn deadline(&self) -> Option<Instant> {
        self.last_tick.map(|t| t + self.period)
    }

    /// Whether enough time has passed to run another tick.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline().map_or(true, |deadline| now >= deadline)
    }

    /// Mark a tick at `now`. Both deltas are zero on the first tick.
    pub fn tick(&mut self, now: Instant) -> TickDelta {
        let measured_ms = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32() * 1000.0,
            None => 0.0,
        };
        self.last_tick = Some(now);
        TickDelta {
            measured_ms,
            sim_ms: measured_ms.min(MAX_TICK_DELTA_MS),
        }
    }
}
