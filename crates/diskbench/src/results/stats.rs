//! Reduction of a job's samples into aggregate statistics.

use crate::bench::Sample;
use crate::results::AggregateResult;

/// Running sums and extremes over a sample sequence.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    throughput_sum: f64,
    latency_sum: f64,
    throughput_max: f64,
    throughput_min: f64,
    latency_max: f64,
    latency_min: f64,
}

impl Accumulator {
    /// Start from the first observed sample rather than a sentinel, so a
    /// measured value of zero is still a valid extreme.
    fn seed(sample: &Sample) -> Self {
        Self {
            throughput_sum: sample.throughput_kbps,
            latency_sum: sample.latency_ms,
            throughput_max: sample.throughput_kbps,
            throughput_min: sample.throughput_kbps,
            latency_max: sample.latency_ms,
            latency_min: sample.latency_ms,
        }
    }

    fn absorb(self, sample: &Sample) -> Self {
        Self {
            throughput_sum: self.throughput_sum + sample.throughput_kbps,
            latency_sum: self.latency_sum + sample.latency_ms,
            throughput_max: self.throughput_max.max(sample.throughput_kbps),
            throughput_min: self.throughput_min.min(sample.throughput_kbps),
            latency_max: self.latency_max.max(sample.latency_ms),
            latency_min: self.latency_min.min(sample.latency_ms),
        }
    }
}

/// Compute average, best and worst throughput and latency for one job.
///
/// Best throughput is the maximum and best latency the minimum; worst is the
/// inverse. Returns `None` for an empty slice.
pub fn aggregate(job_id: usize, samples: &[Sample]) -> Option<AggregateResult> {
    let (first, rest) = samples.split_first()?;
    let acc = rest.iter().fold(Accumulator::seed(first), Accumulator::absorb);
    let count = samples.len() as f64;

    Some(AggregateResult {
        job_id,
        throughput_avg: acc.throughput_sum / count,
        latency_avg: acc.latency_sum / count,
        throughput_best: acc.throughput_max,
        latency_best: acc.latency_min,
        throughput_worst: acc.throughput_min,
        latency_worst: acc.latency_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(throughput_kbps: f64, latency_ms: f64) -> Sample {
        Sample { throughput_kbps, latency_ms }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_samples() {
        assert!(aggregate(0, &[]).is_none());
    }

    #[test]
    fn test_single_sample() {
        let result = aggregate(7, &[sample(250.0, 2.0)]).unwrap();
        assert_eq!(result.job_id, 7);
        assert!(approx(result.throughput_avg, 250.0));
        assert!(approx(result.throughput_best, 250.0));
        assert!(approx(result.throughput_worst, 250.0));
        assert!(approx(result.latency_avg, 2.0));
        assert!(approx(result.latency_best, 2.0));
        assert!(approx(result.latency_worst, 2.0));
    }

    #[test]
    fn test_two_samples_mean() {
        let result = aggregate(0, &[sample(100.0, 5.0), sample(300.0, 1.0)]).unwrap();
        assert!(approx(result.throughput_avg, 200.0));
        assert!(approx(result.latency_avg, 3.0));
        assert!(approx(result.throughput_best, 300.0));
        assert!(approx(result.throughput_worst, 100.0));
        assert!(approx(result.latency_best, 1.0));
        assert!(approx(result.latency_worst, 5.0));
    }

    #[test]
    fn test_best_and_worst_directions() {
        let samples = [
            sample(500.0, 0.8),
            sample(50.0, 9.5),
            sample(900.0, 0.4),
            sample(120.0, 3.3),
        ];
        let result = aggregate(2, &samples).unwrap();
        assert!(approx(result.throughput_best, 900.0));
        assert!(approx(result.throughput_worst, 50.0));
        assert!(approx(result.latency_best, 0.4));
        assert!(approx(result.latency_worst, 9.5));

        assert!(result.latency_best <= result.latency_avg);
        assert!(result.latency_avg <= result.latency_worst);
        assert!(result.throughput_worst <= result.throughput_avg);
        assert!(result.throughput_avg <= result.throughput_best);
    }

    #[test]
    fn test_zero_valued_sample_is_an_extreme() {
        // A genuine zero must register, not be mistaken for "unset".
        let result = aggregate(0, &[sample(0.0, 4.0), sample(10.0, 0.0)]).unwrap();
        assert!(approx(result.throughput_worst, 0.0));
        assert!(approx(result.latency_best, 0.0));
        assert!(approx(result.throughput_best, 10.0));
        assert!(approx(result.latency_worst, 4.0));
        assert!(result.latency_best <= result.latency_avg);
        assert!(result.throughput_worst <= result.throughput_avg);
    }

    #[test]
    fn test_order_does_not_matter() {
        let forward = [sample(1.0, 9.0), sample(2.0, 8.0), sample(3.0, 7.0)];
        let mut backward = forward;
        backward.reverse();
        let a = aggregate(0, &forward).unwrap();
        let b = aggregate(0, &backward).unwrap();
        assert!(approx(a.throughput_best, b.throughput_best));
        assert!(approx(a.latency_best, b.latency_best));
        assert!(approx(a.throughput_avg, b.throughput_avg));
    }
}
