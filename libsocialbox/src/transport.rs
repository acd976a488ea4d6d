//! Simulated backend transport
//!
//! Every store operation goes through a [`Transport`] before touching
//! state, modeling the round trip a real backend would cost. The
//! default implementation sleeps for a random interval; tests swap in
//! [`InstantTransport`] to keep the suite fast.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Port for the simulated network round trip
///
/// A round trip never fails. It exists purely to impose latency so the
/// stores behave like they are talking to a remote service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Wait out one simulated round trip for the named operation
    async fn round_trip(&self, operation: &str);
}

/// Transport that sleeps for a random interval per round trip
pub struct SimulatedTransport {
    min: Duration,
    max: Duration,
}

impl SimulatedTransport {
    /// Create a transport with the given latency bounds
    pub fn new(min: Duration, max: Duration) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// Default latency window of 800 to 1500 milliseconds
    pub fn default_latency() -> Self {
        Self::new(Duration::from_millis(800), Duration::from_millis(1500))
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::default_latency()
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn round_trip(&self, operation: &str) {
        let delay = if self.min == self.max {
            self.min
        } else {
            rand::thread_rng().gen_range(self.min..=self.max)
        };
        tracing::debug!(operation, delay_ms = delay.as_millis() as u64, "simulated round trip");
        tokio::time::sleep(delay).await;
    }
}

/// Transport that completes immediately, for tests
pub struct InstantTransport;

#[async_trait]
impl Transport for InstantTransport {
    async fn round_trip(&self, _operation: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_instant_transport_is_immediate() {
        let transport = InstantTransport;
        let start = Instant::now();
        transport.round_trip("login").await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_simulated_transport_sleeps_within_bounds() {
        let transport = SimulatedTransport::new(Duration::from_millis(10), Duration::from_millis(30));
        let start = Instant::now();
        transport.round_trip("create_post").await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(10));
        // Generous upper bound, timers can overshoot under load
        assert!(elapsed < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_simulated_transport_fixed_delay() {
        let transport = SimulatedTransport::new(Duration::from_millis(5), Duration::from_millis(5));
        let start = Instant::now();
        transport.round_trip("fetch_posts").await;
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_default_latency_bounds() {
        let transport = SimulatedTransport::default_latency();
        assert_eq!(transport.min, Duration::from_millis(800));
        assert_eq!(transport.max, Duration::from_millis(1500));
    }
}
