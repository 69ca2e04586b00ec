//! Per-IP request throttling for the public API.
//!
//! Counters live in process memory; a restart clears them. Exceeding the
//! window quota blocks the address for a full hour.

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;

use crate::shared::config;

const BLOCK_HOURS: i64 = 1;

#[derive(Debug, Clone)]
struct Entry {
    window_start: DateTime<Utc>,
    count: u32,
    blocked_until: Option<DateTime<Utc>>,
}

#[derive(Debug, PartialEq)]
pub enum Decision {
    Allow,
    /// Over quota or inside an active block; carries the seconds left
    /// until the address is served again.
    Reject { retry_after_secs: i64 },
}

pub struct RateLimiter {
    requests_per_window: u32,
    window: Duration,
    entries: HashMap<IpAddr, Entry>,
}

impl RateLimiter {
    pub fn new(requests_per_window: u32, window_minutes: i64) -> Self {
        Self {
            requests_per_window,
            window: Duration::minutes(window_minutes),
            entries: HashMap::new(),
        }
    }

    /// Count one request from `ip` at `now` and decide whether to serve it.
    pub fn check(&mut self, ip: IpAddr, now: DateTime<Utc>) -> Decision {
        let entry = self.entries.entry(ip).or_insert(Entry {
            window_start: now,
            count: 0,
            blocked_until: None,
        });

        if let Some(until) = entry.blocked_until {
            if now < until {
                return Decision::Reject {
                    retry_after_secs: (until - now).num_seconds().max(1),
                };
            }
            // Block lapsed, start over
            entry.blocked_until = None;
            entry.window_start = now;
            entry.count = 0;
        }

        if now.signed_duration_since(entry.window_start) > self.window {
            entry.window_start = now;
            entry.count = 0;
        }

        entry.count += 1;
        if entry.count > self.requests_per_window {
            let until = now + Duration::hours(BLOCK_HOURS);
            entry.blocked_until = Some(until);
            tracing::warn!(%ip, "Rate limit exceeded, blocking for {}h", BLOCK_HOURS);
            return Decision::Reject {
                retry_after_secs: (until - now).num_seconds(),
            };
        }

        Decision::Allow
    }
}

static LIMITER: Lazy<Mutex<RateLimiter>> = Lazy::new(|| {
    let limits = &config::get().limits;
    Mutex::new(RateLimiter::new(
        limits.requests_per_window,
        limits.window_minutes,
    ))
});

/// Middleware enforcing the per-IP quota on /api routes
pub async fn rate_limit(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let decision = {
        let mut limiter = LIMITER.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        limiter.check(addr.ip(), Utc::now())
    };

    match decision {
        Decision::Allow => Ok(next.run(req).await),
        Decision::Reject { retry_after_secs } => {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
            if let Ok(value) = retry_after_secs.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip() -> IpAddr {
        "203.0.113.7".parse().unwrap()
    }

    #[test]
    fn requests_under_quota_pass() {
        let mut limiter = RateLimiter::new(3, 15);
        let now = Utc::now();
        for _ in 0..3 {
            assert_eq!(limiter.check(ip(), now), Decision::Allow);
        }
    }

    #[test]
    fn over_quota_blocks_for_an_hour() {
        let mut limiter = RateLimiter::new(2, 15);
        let now = Utc::now();
        assert_eq!(limiter.check(ip(), now), Decision::Allow);
        assert_eq!(limiter.check(ip(), now), Decision::Allow);
        assert_eq!(
            limiter.check(ip(), now),
            Decision::Reject {
                retry_after_secs: 3600
            }
        );

        // Still inside the block even after the window would have rolled
        let later = now + Duration::minutes(30);
        assert_eq!(
            limiter.check(ip(), later),
            Decision::Reject {
                retry_after_secs: 1800
            }
        );

        // Block lapses after an hour
        let after_block = now + Duration::hours(1) + Duration::seconds(1);
        assert_eq!(limiter.check(ip(), after_block), Decision::Allow);
    }

    #[test]
    fn window_rollover_resets_the_count() {
        let mut limiter = RateLimiter::new(2, 15);
        let now = Utc::now();
        assert_eq!(limiter.check(ip(), now), Decision::Allow);
        assert_eq!(limiter.check(ip(), now), Decision::Allow);

        let next_window = now + Duration::minutes(16);
        assert_eq!(limiter.check(ip(), next_window), Decision::Allow);
    }

    #[test]
    fn addresses_are_tracked_independently() {
        let mut limiter = RateLimiter::new(1, 15);
        let now = Utc::now();
        let other: IpAddr = "198.51.100.9".parse().unwrap();
        assert_eq!(limiter.check(ip(), now), Decision::Allow);
        assert_eq!(limiter.check(other, now), Decision::Allow);
    }
}
