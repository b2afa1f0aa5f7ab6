use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Symbols seeded into every fresh watchlist.
pub const DEFAULT_TICKERS: [&str; 6] = ["SPX", "DJI", "IXIC", "BTC", "GOLD", "SILVER"];

/// User record as persisted in users.json.
///
/// Field names match the on-disk format: the argon2 hash lives under the
/// `password` key. This struct is never serialized into a response body;
/// clients only ever see `PublicUser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
}

/// Per-user watchlist record, one JSON file per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerList {
    pub user_id: String,
    pub username: String,
    pub tickers: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl TickerList {
    /// Fresh list with the default symbols, created alongside registration.
    pub fn seeded(user_id: &str, username: &str, now: OffsetDateTime) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            tickers: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Empty list, used when a PUT arrives for a user with no record yet.
    pub fn empty(user_id: &str, username: &str, now: OffsetDateTime) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            tickers: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }
}
