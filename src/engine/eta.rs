//! Remaining-time estimation for clip batches

use std::time::Duration;

/// Rolling estimate of the time one clip takes.
///
/// The first observation becomes the estimate; each later observation is
/// averaged with the previous estimate, so recent clips weigh more than a
/// plain mean over all clips would give them.
#[derive(Debug, Clone, Default)]
pub struct EtaEstimator {
    per_clip_secs: Option<f64>,
}

impl EtaEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in the elapsed time of a finished clip and return the new estimate
    pub fn record(&mut self, elapsed: Duration) -> Duration {
        let observed = elapsed.as_secs_f64();
        let estimate = match self.per_clip_secs {
            None => observed,
            Some(previous) => (previous + observed) / 2.0,
        };
        self.per_clip_secs = Some(estimate);
        Duration::from_secs_f64(estimate)
    }

    /// Current per-clip estimate, if any clip has finished
    pub fn per_clip(&self) -> Option<Duration> {
        self.per_clip_secs.map(Duration::from_secs_f64)
    }

    /// Estimated time for `clips_remaining` more clips
    pub fn remaining(&self, clips_remaining: usize) -> Duration {
        let per_clip = self.per_clip_secs.unwrap_or(0.0);
        Duration::from_secs_f64(per_clip * clips_remaining as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_first_observation_is_the_estimate() {
        let mut eta = EtaEstimator::new();
        assert_eq!(eta.per_clip(), None);
        assert_eq!(eta.record(secs(4.0)), secs(4.0));
        assert_eq!(eta.remaining(3), secs(12.0));
    }

    #[test]
    fn test_later_observations_average_with_previous_estimate() {
        let mut eta = EtaEstimator::new();
        eta.record(secs(2.0));
        assert_eq!(eta.record(secs(6.0)), secs(4.0));
        // Not the mean of 2, 6 and 10 (which is 6)
        assert_eq!(eta.record(secs(10.0)), secs(7.0));
    }

    #[test]
    fn test_three_clip_sequence() {
        let (t1, t2, t3) = (3.0, 5.0, 9.0);
        let mut eta = EtaEstimator::new();

        eta.record(secs(t1));
        assert_eq!(eta.remaining(2), secs(t1 * 2.0));

        eta.record(secs(t2));
        assert_eq!(eta.remaining(1), secs((t1 + t2) / 2.0));

        eta.record(secs(t3));
        assert_eq!(eta.remaining(0), Duration::ZERO);
    }

    #[test]
    fn test_remaining_without_observations_is_zero() {
        assert_eq!(EtaEstimator::new().remaining(5), Duration::ZERO);
    }
}
