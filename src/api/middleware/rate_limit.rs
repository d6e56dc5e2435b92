//! Per-client token bucket rate limiting.
//!
//! Buckets are keyed by the socket peer IP, so the router has to be served
//! with `into_make_service_with_connect_info::<SocketAddr>()`. Requests over
//! the limit get `429 Too Many Requests`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type PeerIpGovernor =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Calculator endpoints: pure arithmetic, so the bucket is generous.
pub const PUBLIC_PER_SECOND: u64 = 2;
pub const PUBLIC_BURST: u32 = 100;

/// Session and catalog endpoints: every request hits storage.
pub const SECURE_PER_SECOND: u64 = 1;
pub const SECURE_BURST: u32 = 20;

fn governed(per_second: u64, burst: u32) -> PeerIpGovernor {
    let config = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst)
        .finish()
        .expect("rate limit quota is non-zero");

    GovernorLayer::new(Arc::new(config))
}

/// Limiter for `/api/pace/*`.
///
/// ```rust,ignore
/// let public = api::routes::public_routes().layer(rate_limit::layer());
/// ```
pub fn layer() -> PeerIpGovernor {
    governed(PUBLIC_PER_SECOND, PUBLIC_BURST)
}

/// Stricter limiter for the authenticated routes.
///
/// Sits outside the auth layer, so requests with bad tokens drain the bucket
/// too.
pub fn secure_layer() -> PeerIpGovernor {
    governed(SECURE_PER_SECOND, SECURE_BURST)
}
