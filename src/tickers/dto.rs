use serde::{Deserialize, Serialize};

/// Body of PUT /api/tickers. `tickers` is taken as a raw value so a
/// missing or non-array field reports the documented message rather than a
/// framework rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateTickersRequest {
    #[serde(default)]
    pub tickers: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct UpdateTickersResponse {
    pub message: String,
    pub tickers: Vec<String>,
}
