//! Per-client rate limiting.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, RwLock},
    time::Duration,
};

use crate::web::error::ApiError;

/// Per-IP rate limiter using Governor.
pub type IpRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

type LimiterMap = RwLock<HashMap<String, Arc<IpRateLimiter>>>;

/// State for rate limiting.
pub struct RateLimitState {
    /// Per-IP limiters for the login endpoint.
    login_limiters: LimiterMap,
    /// Per-IP limiters for everything else.
    api_limiters: LimiterMap,
    /// Login rate limit (requests per minute).
    login_rate_limit: u32,
    /// API rate limit (requests per minute).
    api_rate_limit: u32,
    /// Take the client address from `X-Forwarded-For` / `X-Real-IP`.
    trust_proxy: bool,
}

impl RateLimitState {
    /// Create a new rate limit state.
    pub fn new(login_rate_limit: u32, api_rate_limit: u32) -> Self {
        Self {
            login_limiters: RwLock::new(HashMap::new()),
            api_limiters: RwLock::new(HashMap::new()),
            login_rate_limit,
            api_rate_limit,
            trust_proxy: false,
        }
    }

    /// Trust forwarding headers for the client address.
    ///
    /// Only enable this behind a reverse proxy that overwrites them;
    /// otherwise clients can pick a fresh bucket per request.
    pub fn with_trust_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    fn get_or_create_limiter(
        limiters: &LimiterMap,
        ip: &str,
        requests_per_minute: u32,
    ) -> Arc<IpRateLimiter> {
        {
            let read_guard = limiters.read().unwrap_or_else(|e| e.into_inner());
            if let Some(limiter) = read_guard.get(ip) {
                return limiter.clone();
            }
        }

        let mut write_guard = limiters.write().unwrap_or_else(|e| e.into_inner());

        // Another request may have inserted it in between.
        if let Some(limiter) = write_guard.get(ip) {
            return limiter.clone();
        }

        let quota =
            Quota::per_minute(NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));
        write_guard.insert(ip.to_string(), limiter.clone());
        limiter
    }

    /// Check if a login attempt is allowed for the given IP.
    pub fn check_login(&self, ip: &str) -> bool {
        Self::get_or_create_limiter(&self.login_limiters, ip, self.login_rate_limit)
            .check()
            .is_ok()
    }

    /// Check if an API request is allowed for the given IP.
    pub fn check_api(&self, ip: &str) -> bool {
        Self::get_or_create_limiter(&self.api_limiters, ip, self.api_rate_limit)
            .check()
            .is_ok()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        let login = self.login_limiters.read().unwrap_or_else(|e| e.into_inner());
        let api = self.api_limiters.read().unwrap_or_else(|e| e.into_inner());
        login.len() + api.len()
    }

    /// Drop limiters that no request is holding.
    pub fn cleanup(&self) {
        self.login_limiters
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|_, v| Arc::strong_count(v) > 1);
        self.api_limiters
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|_, v| Arc::strong_count(v) > 1);
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(300)).await;
                self.cleanup();
                tracing::debug!(clients = self.tracked_clients(), "Rate limiter cleanup");
            }
        });
    }
}

/// Extract client IP from request.
fn get_client_ip(req: &Request<Body>, trust_proxy: bool) -> String {
    if trust_proxy {
        // First hop of X-Forwarded-For as written by the proxy.
        if let Some(forwarded) = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
        {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().to_string();
            }
        }

        if let Some(real_ip) = req
            .headers()
            .get("X-Real-IP")
            .and_then(|v| v.to_str().ok())
        {
            return real_ip.to_string();
        }
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

/// Rate limiting middleware for the login endpoint.
pub async fn login_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = get_client_ip(&req, state.trust_proxy);

    if !state.check_login(&ip) {
        tracing::warn!(ip = %ip, "Login rate limit exceeded");
        return ApiError::too_many_requests("Too many login attempts. Please try again later.")
            .into_response();
    }

    next.run(req).await
}

/// Rate limiting middleware for general API.
pub async fn api_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = get_client_ip(&req, state.trust_proxy);

    if !state.check_api(&ip) {
        tracing::warn!(ip = %ip, "API rate limit exceeded");
        return ApiError::too_many_requests("Too many requests. Please try again later.")
            .into_response();
    }

    next.run(req).await
}
