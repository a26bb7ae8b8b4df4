use embassy_time::{Duration, Instant};

pub struct BlockingTimer {
    expires_at: Instant,
}

impl BlockingTimer {
    pub fn after(duration: Duration) -> Self {
        Self {
            expires_at: Instant::now()
                .checked_add(duration)
                .unwrap_or(Instant::MAX),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Instant::now()
    }

    pub fn wait(self) {
        while !self.is_expired() {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_duration_is_expired() {
        assert!(BlockingTimer::after(Duration::from_ticks(0)).is_expired());
    }

    #[test]
    fn wait() {
        let start = Instant::now();
        let timer = BlockingTimer::after(Duration::from_millis(20));
        assert!(!timer.is_expired());
        timer.wait();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn saturates() {
        assert!(!BlockingTimer::after(Duration::MAX).is_expired());
    }
}
