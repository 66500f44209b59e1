//! Per-client rate limiting using the token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Bucket refill rate and burst size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub per_second: u64,
    pub burst: u32,
}

/// Quota for read-heavy member endpoints: 2 req/s, burst 100.
pub const STANDARD: Quota = Quota {
    per_second: 2,
    burst: 100,
};

/// Quota for login, registration and admin endpoints: 1 req/s, burst 10.
pub const SECURE: Quota = Quota {
    per_second: 1,
    burst: 10,
};

fn governor_layer<K>(
    key_extractor: K,
    quota: Quota,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(quota.per_second)
            .burst_size(quota.burst)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Wraps `router` with a per-IP rate limiter.
///
/// With `behind_proxy` the client address is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`; otherwise the socket peer address is used.
/// Requests over the limit receive `429 Too Many Requests`.
pub fn limit(router: Router<AppState>, quota: Quota, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(governor_layer(SmartIpKeyExtractor, quota))
    } else {
        router.layer(governor_layer(PeerIpKeyExtractor, quota))
    }
}
