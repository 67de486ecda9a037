//! Rate limiting middleware

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{Quota, RateLimiter, clock::DefaultClock, state::InMemoryState};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::AppError;

/// Rate limiter state (shared across requests)
pub type SharedRateLimiter =
    Arc<RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>>;

/// Create a new rate limiter with specified requests per second; zero is raised to one
pub fn create_rate_limiter(requests_per_second: u32) -> SharedRateLimiter {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(request: Request<Body>, next: Next) -> Response {
    let limiter = request.extensions().get::<SharedRateLimiter>().cloned();

    if let Some(limiter) = limiter {
        if limiter.check().is_err() {
            return AppError::TooManyRequests(
                "Rate limit exceeded. Please try again later.".to_string(),
            )
            .into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_is_enforced() {
        let limiter = create_rate_limiter(1);
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }

    #[test]
    fn zero_rate_still_builds() {
        assert!(create_rate_limiter(0).check().is_ok());
    }
}
