//! Artificial network round-trip delay.

use std::time::Duration;

/// Suspends once, then runs the wrapped operation to completion.
///
/// The delay is the only suspension point: the operation itself is a plain
/// synchronous closure, so no mutation can be split across awaits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySimulator {
    delay: Duration,
}

impl LatencySimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn run<T>(&self, operation: impl FnOnce() -> T) -> T {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        operation()
    }
}

#[cfg(test)]
mod tests {
    use super::LatencySimulator;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn run_waits_before_operation() {
        let latency = LatencySimulator::new(Duration::from_millis(300));
        let started = tokio::time::Instant::now();
        let value = latency.run(|| 42).await;
        assert_eq!(value, 42);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
