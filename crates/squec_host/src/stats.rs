//! Latency statistics for batch decoding.
//!
//! Collects per-shot decode latencies and reports their summary and
//! distribution. Exhaustive decoding time grows quickly with the number of
//! flags, so the histogram buckets widen geometrically instead of using a
//! fixed step.

const NUM_BUCKETS: usize = 16;

/// Tracks decode latencies in nanoseconds.
///
/// Bucket `k` holds latencies in `[base * 2^(k-1), base * 2^k)`, bucket 0
/// everything below `base`, and the last bucket everything above.
pub struct LatencyStats {
    pub min: u64,
    pub max: u64,
    pub sum: u64,
    pub count: u64,
    pub buckets: [u64; NUM_BUCKETS],
    base_ns: u64,
    samples: Vec<u64>,
}

impl LatencyStats {
    /// Creates an empty tracker whose first bucket ends at `base_ns`.
    pub fn new(base_ns: u64) -> Self {
        Self {
            min: u64::MAX,
            max: 0,
            sum: 0,
            count: 0,
            buckets: [0; NUM_BUCKETS],
            base_ns: base_ns.max(1),
            samples: Vec::new(),
        }
    }

    /// Records a latency measurement in nanoseconds.
    pub fn update(&mut self, nanos: u64) {
        self.min = self.min.min(nanos);
        self.max = self.max.max(nanos);
        self.sum += nanos;
        self.count += 1;
        self.buckets[self.bucket_of(nanos)] += 1;
        self.samples.push(nanos);
    }

    fn bucket_of(&self, nanos: u64) -> usize {
        let ratio = nanos / self.base_ns;
        if ratio == 0 {
            0
        } else {
            ((u64::BITS - ratio.leading_zeros()) as usize).min(NUM_BUCKETS - 1)
        }
    }

    /// Lower and upper bound of bucket `k` in nanoseconds.
    fn bucket_bounds(&self, k: usize) -> (u64, u64) {
        if k == 0 {
            (0, self.base_ns)
        } else {
            (self.base_ns << (k - 1), self.base_ns << k)
        }
    }

    /// The average latency in nanoseconds, or 0.0 with no measurements.
    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    /// Nearest-rank percentile, `q` in `[0, 1]`.
    pub fn percentile(&mut self, q: f64) -> Option<u64> {
        if self.samples.is_empty() {
            return None;
        }
        self.samples.sort_unstable();
        let rank = (q.clamp(0.0, 1.0) * (self.samples.len() - 1) as f64).round() as usize;
        Some(self.samples[rank])
    }

    /// Prints a formatted report of latency statistics.
    pub fn print_report(&mut self) {
        println!("\nLatency Metrics (per shot)");
        println!("Count: {}", self.count);
        if self.count == 0 {
            return;
        }

        println!("Min:   {}", format_ns(self.min as f64));
        println!("Avg:   {}", format_ns(self.avg()));
        if let (Some(p50), Some(p99)) = (self.percentile(0.5), self.percentile(0.99)) {
            println!("p50:   {}", format_ns(p50 as f64));
            println!("p99:   {}", format_ns(p99 as f64));
        }
        println!("Max:   {}", format_ns(self.max as f64));

        println!("Distribution:");
        for k in 0..NUM_BUCKETS {
            let count = self.buckets[k];
            if count > 0 {
                let (lower, upper) = self.bucket_bounds(k);
                let open = if k == NUM_BUCKETS - 1 { "+" } else { "" };
                println!(
                    "[{:>10} - {:>10}{}]: {}",
                    format_ns(lower as f64),
                    format_ns(upper as f64),
                    open,
                    count
                );
            }
        }
    }
}

fn format_ns(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{:.2} ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.2} us", ns / 1_000.0)
    } else {
        format!("{:.2} ms", ns / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_double_in_width() {
        let stats = LatencyStats::new(1_000);
        assert_eq!(stats.bucket_of(999), 0);
        assert_eq!(stats.bucket_of(1_000), 1);
        assert_eq!(stats.bucket_of(1_999), 1);
        assert_eq!(stats.bucket_of(2_000), 2);
        assert_eq!(stats.bucket_of(u64::MAX), NUM_BUCKETS - 1);
        assert_eq!(stats.bucket_bounds(2), (2_000, 4_000));
    }

    #[test]
    fn summary_values() {
        let mut stats = LatencyStats::new(1_000);
        assert_eq!(stats.percentile(0.5), None);
        for ns in [500, 1_500, 2_500, 10_000] {
            stats.update(ns);
        }
        assert_eq!((stats.min, stats.max, stats.count), (500, 10_000, 4));
        assert_eq!(stats.avg(), 3_625.0);
        assert_eq!(stats.percentile(0.0), Some(500));
        assert_eq!(stats.percentile(1.0), Some(10_000));
        assert_eq!(stats.buckets[..5], [1, 1, 1, 0, 1]);
    }
}
