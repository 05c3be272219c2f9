use std::time::{Duration, Instant};

/// append throughput, measured from an Instant taken before the loop
pub trait TPS {
    /// appends per second
    fn tps(&self, total: u64) -> u128;
    /// bytes per second
    fn bps(&self, bytes: u64) -> u128;
    fn report(&self, total: u64, bytes: u64) -> String;
}

impl TPS for Instant {
    fn tps(&self, total: u64) -> u128 {
        per_sec(total, self.elapsed())
    }

    fn bps(&self, bytes: u64) -> u128 {
        per_sec(bytes, self.elapsed())
    }

    fn report(&self, total: u64, bytes: u64) -> String {
        let time = self.elapsed();
        format!(
            "appends: {} in {:?}, TPS: {} Iter/s, {} B/s",
            total,
            time,
            per_sec(total, time),
            per_sec(bytes, time)
        )
    }
}

fn per_sec(n: u64, time: Duration) -> u128 {
    let nanos = time.as_nanos().max(1);
    n as u128 * 1_000_000_000 / nanos
}

#[test]
fn test_per_sec() {
    assert_eq!(per_sec(10, Duration::from_secs(2)), 5);
    assert_eq!(per_sec(3, Duration::from_nanos(0)), 3_000_000_000);
}
