use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use mealplanner_shared::{Error, Result};

/// Allows one generation per user per cooldown window.
pub struct GenerationThrottle {
    cooldown: Duration,
    last_request: Mutex<HashMap<String, Instant>>,
}

impl GenerationThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_request: Mutex::new(HashMap::new()),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Records `now` for `user_id` unless the previous request is too recent.
    pub fn check(&self, user_id: &str, now: Instant) -> Result<()> {
        if self.cooldown.is_zero() {
            return Ok(());
        }

        let mut last_request = self
            .last_request
            .lock()
            .map_err(|_| Error::Server("generation throttle poisoned".to_owned()))?;

        if let Some(last) = last_request.get(user_id) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < self.cooldown {
                let remaining = self.cooldown - elapsed;
                let retry_after_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);

                return Err(Error::RateLimited {
                    retry_after_secs: retry_after_secs.max(1),
                });
            }
        }

        last_request.insert(user_id.to_owned(), now);

        Ok(())
    }
}
