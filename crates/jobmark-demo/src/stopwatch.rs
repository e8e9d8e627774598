use std::time::Instant;

use jobmark_core::ProgressTracker;

/// Minimal tracker for the demo job: counts items and batches against a wall clock.
#[derive(Debug)]
pub struct Stopwatch {
    started: Instant,
    count: u64,
    batches: u64,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            count: 0,
            batches: 0,
        }
    }

    pub fn batches(&self) -> u64 {
        self.batches
    }
}

impl ProgressTracker for Stopwatch {
    type Final = String;
    type Batch = ();

    fn incr(&mut self, n: u64) {
        self.count += n;
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn total_seconds_so_far(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn on_batch<F>(&mut self, callback: F)
    where
        F: FnOnce(&mut Self),
    {
        self.batches += 1;
        callback(self);
    }

    fn final_line(&mut self) -> String {
        format!(
            "processed {} records in {} batches ({:.3}s)",
            self.count,
            self.batches,
            self.total_seconds_so_far()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_items_and_batches() {
        let mut sw = Stopwatch::start();
        sw.incr(10);
        sw.on_batch(|t| t.incr(5));

        assert_eq!(sw.count(), 15);
        assert_eq!(sw.batches(), 1);
        assert!(sw.final_line().starts_with("processed 15 records in 1 batches"));
    }
}
