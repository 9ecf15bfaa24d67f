//! Time-based obstacle spawn scheduling
//!
//! The spawner emits one obstacle each time its accumulated elapsed time
//! crosses the current interval, then shrinks the interval by a decay
//! factor with a hard floor. Spawn frequency therefore only ever increases,
//! and saturates once the interval reaches the floor.

/// Decaying-interval spawn scheduler.
///
/// After `n` spawns the interval equals `max(floor, initial * decay^n)`.
#[derive(Debug, Clone)]
pub struct Spawner {
    interval_ms: f64,
    decay: f64,
    floor_ms: f64,
    accum_ms: f64,
    spawned: u32,
}

impl Spawner {
    /// Build a scheduler. The floor must be positive and the decay in
    /// (0, 1]; both are tuning preconditions checked up front.
    pub fn new(initial_ms: f64, decay: f64, floor_ms: f64) -> Self {
        assert!(floor_ms > 0.0, "spawn floor must be positive");
        assert!(
            decay > 0.0 && decay <= 1.0,
            "spawn decay must be in (0, 1]"
        );
        Self {
            interval_ms: initial_ms.max(floor_ms),
            decay,
            floor_ms,
            accum_ms: 0.0,
            spawned: 0,
        }
    }

    /// Current interval between spawns (ms)
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Total spawns emitted so far
    pub fn spawn_count(&self) -> u32 {
        self.spawned
    }

    /// Advance by `elapsed_ms` and return how many spawns are due. A long
    /// frame can owe several; each one tightens the interval before the
    /// next is scheduled.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms > 0.0 {
            self.accum_ms += elapsed_ms;
        }
        let mut due = 0;
        while self.accum_ms >= self.interval_ms {
            self.accum_ms -= self.interval_ms;
            self.spawned += 1;
            self.interval_ms = (self.interval_ms * self.decay).max(self.floor_ms);
            due += 1;
        }
        due
    }
}
