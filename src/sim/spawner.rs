//! Wave spawner driven by simulation time
//!
//! Every `interval_ms` a wave schedules `batch_size` spawns, the i-th one
//! `i * stagger_ms` after the wave starts. Pending spawns are tagged with the
//! wave that created them and are all dropped by `stop()`.

use serde::{Deserialize, Serialize};

use crate::consts::{SPAWN_STAGGER_MS, WAVE_INTERVAL_MS};

/// One scheduled spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingSpawn {
    pub wave_id: u64,
    /// Simulation time (ms since start) at which it fires
    pub due_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    batch_size: u32,
    interval_ms: f64,
    stagger_ms: f64,
    clock_ms: f64,
    next_wave_ms: f64,
    wave_id: u64,
    pending: Vec<PendingSpawn>,
    running: bool,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(1, WAVE_INTERVAL_MS, SPAWN_STAGGER_MS)
    }
}

impl Spawner {
    pub fn new(batch_size: u32, interval_ms: f64, stagger_ms: f64) -> Self {
        Self {
            batch_size: batch_size.max(1),
            interval_ms,
            stagger_ms,
            clock_ms: 0.0,
            next_wave_ms: interval_ms,
            wave_id: 0,
            pending: Vec::new(),
            running: false,
        }
    }

    /// Restart the clock; the first wave fires one interval from now
    pub fn start(&mut self) {
        self.clock_ms = 0.0;
        self.next_wave_ms = self.interval_ms;
        self.pending.clear();
        self.running = true;
    }

    /// Cancel the periodic wave and every pending staggered spawn
    pub fn stop(&mut self) {
        if !self.pending.is_empty() {
            log::debug!(
                "Spawner stopped, cancelled {} pending spawns",
                self.pending.len()
            );
        }
        self.pending.clear();
        self.running = false;
    }

    /// Takes effect on the next wave; spawns already scheduled are untouched
    pub fn set_batch_size(&mut self, batch_size: u32) {
        self.batch_size = batch_size.max(1);
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Waves started so far
    pub fn wave_id(&self) -> u64 {
        self.wave_id
    }

    pub fn pending(&self) -> &[PendingSpawn] {
        &self.pending
    }

    /// Advance simulation time, returning the spawns that came due
    pub fn advance(&mut self, dt_ms: f64) -> Vec<PendingSpawn> {
        if !self.running {
            return Vec::new();
        }
        self.clock_ms += dt_ms.max(0.0);

        while self.clock_ms >= self.next_wave_ms {
            self.wave_id += 1;
            let wave_start = self.next_wave_ms;
            for i in 0..self.batch_size {
                self.pending.push(PendingSpawn {
                    wave_id: self.wave_id,
                    due_ms: wave_start + i as f64 * self.stagger_ms,
                });
            }
            log::debug!(
                "Wave {} scheduled ({} spawns) at {:.0} ms",
                self.wave_id,
                self.batch_size,
                wave_start
            );
            self.next_wave_ms += self.interval_ms;
        }

        let clock = self.clock_ms;
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due_ms <= clock);
        self.pending = later;
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Advance in 100 ms steps, returning spawn counts per step
    fn run(spawner: &mut Spawner, total_ms: u32) -> Vec<usize> {
        (0..total_ms / 100)
            .map(|_| spawner.advance(100.0).len())
            .collect()
    }

    #[test]
    fn test_idle_spawner_does_nothing() {
        let mut spawner = Spawner::default();
        assert!(spawner.advance(60_000.0).is_empty());
    }

    #[test]
    fn test_first_wave_after_one_interval() {
        let mut spawner = Spawner::default();
        spawner.start();
        let counts = run(&mut spawner, 4900);
        assert_eq!(counts.iter().sum::<usize>(), 0);

        let due = spawner.advance(100.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].wave_id, 1);
    }

    #[test]
    fn test_wave_is_staggered() {
        let mut spawner = Spawner::new(3, 5000.0, 1000.0);
        spawner.start();

        assert_eq!(spawner.advance(5000.0).len(), 1);
        assert_eq!(spawner.pending().len(), 2);
        assert_eq!(spawner.advance(999.0).len(), 0);
        assert_eq!(spawner.advance(1.0).len(), 1);
        assert_eq!(spawner.advance(1000.0).len(), 1);
        assert!(spawner.pending().is_empty());
    }

    #[test]
    fn test_batch_change_applies_to_next_wave() {
        let mut spawner = Spawner::new(2, 5000.0, 1000.0);
        spawner.start();
        assert_eq!(spawner.advance(5000.0).len(), 1);

        // In-flight spawn of wave 1 keeps firing
        spawner.set_batch_size(4);
        assert_eq!(spawner.advance(1000.0).len(), 1);
        assert!(spawner.pending().is_empty());

        assert_eq!(spawner.advance(4000.0).len(), 1);
        assert_eq!(spawner.pending().len(), 3);
        assert!(spawner.pending().iter().all(|p| p.wave_id == 2));
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut spawner = Spawner::new(4, 5000.0, 1000.0);
        spawner.start();
        spawner.advance(5000.0);
        assert_eq!(spawner.pending().len(), 3);

        spawner.stop();
        assert!(spawner.pending().is_empty());
        assert!(spawner.advance(20_000.0).is_empty());
    }

    #[test]
    fn test_large_step_catches_up() {
        let mut spawner = Spawner::new(1, 5000.0, 1000.0);
        spawner.start();
        assert_eq!(spawner.advance(15_000.0).len(), 3);
        assert_eq!(spawner.wave_id(), 3);
    }

    #[test]
    fn test_zero_batch_is_raised_to_one() {
        let mut spawner = Spawner::new(0, 5000.0, 1000.0);
        assert_eq!(spawner.batch_size(), 1);
        spawner.set_batch_size(0);
        assert_eq!(spawner.batch_size(), 1);
    }
}
