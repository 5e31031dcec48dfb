//! Fixed-timestep clock using an accumulator pattern.
//!
//! `draw_web()` fires at ~60fps with variable delta. `ReplayClock` converts
//! that into discrete ticks so replay pacing (and anything else clocked by
//! ticks) stays deterministic and testable without a browser.

pub struct ReplayClock {
    /// Milliseconds per tick (e.g. 100ms = 10 ticks/sec).
    ms_per_tick: f64,
    /// Milliseconds accumulated but not yet consumed as ticks.
    accumulator: f64,
    pub total_ticks: u64,
    /// None until the first frame arrives.
    last_timestamp: Option<f64>,
}

impl ReplayClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (ms). Returns how many whole ticks
    /// elapsed since the previous call. Deltas are clamped so a
    /// backgrounded tab doesn't fast-forward the replay on return.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
