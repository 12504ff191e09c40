use std::time::Duration;

pub const LOGIN_DELAY: Duration = Duration::from_millis(1500);
pub const REGISTRATION_DELAY: Duration = Duration::from_millis(2000);
pub const RECEIPT_SCAN_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Stand-in for API latency. Every page handler awaits one of these before it
/// touches its state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    scale: f64,
}

impl Default for Latency {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Latency {
    pub fn new(scale: f64) -> Self {
        Self { scale: scale.max(0.0) }
    }

    pub fn none() -> Self {
        Self { scale: 0.0 }
    }

    pub fn scaled(&self, base: Duration) -> Duration {
        base.mul_f64(self.scale)
    }

    pub async fn simulate(&self, base: Duration) {
        let d = self.scaled(base);
        if !d.is_zero() {
            tokio::time::sleep(d).await;
        }
    }
}
