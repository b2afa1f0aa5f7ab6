use async_trait::async_trait;

mod json_file;
mod types;

pub use json_file::JsonFileStore;
pub use types::{TickerList, User, DEFAULT_TICKERS};

/// Persistence boundary: load/save by key, no transactions.
///
/// Concurrent read-modify-write cycles against the same record can lose
/// updates; callers accept that.
#[async_trait]
pub trait Store: Send + Sync {
    async fn load_users(&self) -> anyhow::Result<Vec<User>>;
    async fn save_users(&self, users: &[User]) -> anyhow::Result<()>;
    async fn load_tickers(&self, user_id: &str) -> anyhow::Result<Option<TickerList>>;
    async fn save_tickers(&self, list: &TickerList) -> anyhow::Result<()>;
}
