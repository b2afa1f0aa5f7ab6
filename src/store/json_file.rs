use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::{Store, TickerList, User};

/// Shape of users.json: a single collection of user records.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    users: Vec<User>,
}

/// Flat-file store: one users.json for all accounts, one JSON file per user
/// under user_tickers/.
pub struct JsonFileStore {
    users_file: PathBuf,
    tickers_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens the data directory, creating it and seeding an empty users
    /// collection if missing.
    pub async fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let tickers_dir = data_dir.join("user_tickers");
        fs::create_dir_all(&tickers_dir)
            .await
            .with_context(|| format!("create data dir {}", tickers_dir.display()))?;

        let users_file = data_dir.join("users.json");
        if fs::metadata(&users_file).await.is_err() {
            write_json(&users_file, &UsersFile::default()).await?;
            debug!(path = %users_file.display(), "seeded empty users file");
        }

        Ok(Self {
            users_file,
            tickers_dir,
        })
    }

    fn ticker_path(&self, user_id: &str) -> PathBuf {
        self.tickers_dir.join(format!("{user_id}.json"))
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes)
        .await
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load_users(&self) -> anyhow::Result<Vec<User>> {
        let bytes = fs::read(&self.users_file)
            .await
            .with_context(|| format!("read {}", self.users_file.display()))?;
        let file: UsersFile = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", self.users_file.display()))?;
        Ok(file.users)
    }

    async fn save_users(&self, users: &[User]) -> anyhow::Result<()> {
        write_json(
            &self.users_file,
            &UsersFile {
                users: users.to_vec(),
            },
        )
        .await
    }

    async fn load_tickers(&self, user_id: &str) -> anyhow::Result<Option<TickerList>> {
        let path = self.ticker_path(user_id);
        let bytes = match fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
        };
        let list = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(list))
    }

    async fn save_tickers(&self, list: &TickerList) -> anyhow::Result<()> {
        write_json(&self.ticker_path(&list.user_id), list).await
    }
}
