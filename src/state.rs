use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::rate_limit::RateLimits;
use crate::store::{JsonFileStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub limits: Arc<RateLimits>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store =
            Arc::new(JsonFileStore::open(&config.data_dir).await?) as Arc<dyn Store>;
        Self::from_parts(store, config)
    }

    pub fn from_parts(store: Arc<dyn Store>, config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let limits = Arc::new(RateLimits::new(&config.rate_limit)?);
        Ok(Self {
            store,
            config,
            limits,
        })
    }

    /// State over a throwaway data directory with fixed config, for tests.
    pub async fn for_tests(data_dir: &Path) -> anyhow::Result<Self> {
        use crate::config::{JwtConfig, RateLimitConfig};

        let config = Arc::new(AppConfig {
            data_dir: data_dir.to_path_buf(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_hours: 24,
            },
            rate_limit: RateLimitConfig {
                window_secs: 15 * 60,
                // Generous quotas so ordinary tests never trip the limiter;
                // rate-limit tests build their own config.
                global_max: 10_000,
                auth_max: 10_000,
            },
        });
        let store = Arc::new(JsonFileStore::open(data_dir).await?) as Arc<dyn Store>;
        Self::from_parts(store, config)
    }
}
