use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter,
};
use tracing::warn;

use crate::config::RateLimitConfig;
use crate::error::ApiError;
use crate::state::AppState;

pub type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Per-IP limiters: one covering every route, a stricter one for the
/// credential endpoints.
#[derive(Debug)]
pub struct RateLimits {
    pub global: KeyedLimiter,
    pub auth: KeyedLimiter,
}

impl RateLimits {
    pub fn new(cfg: &RateLimitConfig) -> anyhow::Result<Self> {
        Ok(Self {
            global: RateLimiter::keyed(quota(cfg.window_secs, cfg.global_max)?),
            auth: RateLimiter::keyed(quota(cfg.window_secs, cfg.auth_max)?),
        })
    }
}

/// A burst of `max` cells replenished evenly over the window, so request
/// `max + 1` inside one window is rejected.
fn quota(window_secs: u64, max: u32) -> anyhow::Result<Quota> {
    let max = NonZeroU32::new(max)
        .ok_or_else(|| anyhow::anyhow!("rate limit quota must be non-zero"))?;
    let period = Duration::from_secs(window_secs.max(1)) / max.get();
    let quota = Quota::with_period(period).ok_or_else(|| {
        anyhow::anyhow!("rate limit window of {window_secs}s is too short for a quota of {max}")
    })?;
    Ok(quota.allow_burst(max))
}

pub async fn global_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    if state.limits.global.check_key(&ip).is_err() {
        warn!(%ip, "global rate limit exceeded");
        return ApiError::RateLimited(
            "Too many requests from this IP, please try again later.".into(),
        )
        .into_response();
    }
    next.run(request).await
}

pub async fn auth_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    if state.limits.auth.check_key(&ip).is_err() {
        warn!(%ip, "auth rate limit exceeded");
        return ApiError::RateLimited(
            "Too many authentication attempts, please try again later.".into(),
        )
        .into_response();
    }
    next.run(request).await
}

/// First X-Forwarded-For hop when present, else the peer socket address.
fn client_ip(request: &Request) -> IpAddr {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(ip) = forwarded
            .split(',')
            .next()
            .and_then(|s| s.trim().parse().ok())
        {
            return ip;
        }
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
