//! Rate limiting for AI endpoints.
//!
//! Quotas are kept in memory per authenticated user id, so they reset when the
//! process restarts and are not shared between server instances.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::warn;

use crate::AppState;
use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;

/// Error message returned once a user's quota is exhausted.
pub const RATE_LIMITED_MESSAGE: &str = "Too many AI requests, please try again later.";

/// Idle keys are swept once every this many checks.
const SWEEP_EVERY: u64 = 256;

/// Keyed limiter for AI endpoints.
pub struct AiRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    checks: AtomicU64,
}

impl AiRateLimiter {
    pub fn per_minute(requests: NonZeroU32) -> Self {
        Self::with_quota(Quota::per_minute(requests))
    }

    fn with_quota(quota: Quota) -> Self {
        Self {
            limiter: RateLimiter::keyed(quota),
            checks: AtomicU64::new(0),
        }
    }

    /// Consume one request from `key`'s quota. Returns `false` when exhausted.
    pub fn try_acquire(&self, key: &str) -> bool {
        let allowed = self.limiter.check_key(&key.to_string()).is_ok();
        if (self.checks.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            self.limiter.retain_recent();
        }
        allowed
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

/// Axum middleware: rejects with 429 once the caller's quota is spent.
///
/// Must run after [`super::auth::require_auth`].
pub async fn ai_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|u| u.0.sub.clone())
        .unwrap_or_default();

    if !state.ai_limiter.try_acquire(&key) {
        warn!(user_id = %key, "AI rate limit exceeded");
        return Err(AppError::RateLimited(RATE_LIMITED_MESSAGE.into()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn quota_is_per_key() {
        let limiter = AiRateLimiter::per_minute(NonZeroU32::new(2).unwrap());
        assert!(limiter.try_acquire("a"));
        assert!(limiter.try_acquire("a"));
        assert!(!limiter.try_acquire("a"));
        assert!(limiter.try_acquire("b"));
    }

    #[test]
    fn idle_keys_are_swept_periodically() {
        let quota = Quota::with_period(Duration::from_millis(20)).unwrap();
        let limiter = AiRateLimiter::with_quota(quota);

        for i in 1..SWEEP_EVERY {
            assert!(limiter.try_acquire(&format!("user-{i}")));
        }
        assert_eq!(limiter.tracked_keys(), (SWEEP_EVERY - 1) as usize);

        std::thread::sleep(Duration::from_millis(100));
        assert!(limiter.try_acquire("latest"));
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
