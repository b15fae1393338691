use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ExplainError;
use crate::models::TransactionExplanation;
use crate::parser;

const MAX_RECENT: usize = 100;

pub struct AptosClient {
    client: reqwest::Client,
    base_url: String,
}

impl AptosClient {
    //Create a new client for the configured Aptos node REST API
    pub fn new(config: &Config) -> Result<Self, ExplainError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.node_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    //Fetch and explain a transaction by its hash
    pub async fn explain_transaction(&self, hash: &str) -> Result<TransactionExplanation, ExplainError> {
        let hash = normalize_hash(hash)?;
        let raw = self.fetch_transaction(&hash).await?;
        parser::explain_value(raw)
    }

    /// Raw transaction JSON exactly as the node returns it.
    pub async fn fetch_transaction(&self, hash: &str) -> Result<Value, ExplainError> {
        let url = format!("{}/transactions/by_hash/{}", self.base_url, hash);
        info!("Fetching transaction {}", hash);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ExplainError::NotFound(hash.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExplainError::Node {
                status: status.as_u16(),
                body,
            });
        }

        let raw: Value = response.json().await?;
        debug!("Fetched transaction {}", hash);
        Ok(raw)
    }

    /// Hashes of the most recent transactions, newest last as the node lists them.
    pub async fn recent_transactions(&self, limit: usize) -> Result<Vec<String>, ExplainError> {
        let limit = limit.clamp(1, MAX_RECENT);
        let url = format!("{}/transactions", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExplainError::Node {
                status: status.as_u16(),
                body,
            });
        }

        let transactions: Vec<Value> = response.json().await?;
        Ok(transactions
            .iter()
            .filter_map(|tx| tx.get("hash").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }
}

/// Trim and check a user-supplied hash: optional `0x`, then 1 to 64 hex digits.
pub fn normalize_hash(hash: &str) -> Result<String, ExplainError> {
    let hash = hash.trim();
    let digits = hash
        .strip_prefix("0x")
        .or_else(|| hash.strip_prefix("0X"))
        .unwrap_or(hash);

    if digits.is_empty() || digits.len() > 64 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ExplainError::InvalidHash(hash.to_string()));
    }

    Ok(format!("0x{}", digits.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hash() {
        assert_eq!(normalize_hash("  0xABCdef12 ").unwrap(), "0xabcdef12");
        assert_eq!(normalize_hash("abcdef12").unwrap(), "0xabcdef12");
    }

    #[test]
    fn test_rejects_bad_hashes() {
        assert!(matches!(normalize_hash(""), Err(ExplainError::InvalidHash(_))));
        assert!(normalize_hash("0x").is_err());
        assert!(normalize_hash("0xnothex").is_err());
        assert!(normalize_hash(&format!("0x{}", "a".repeat(65))).is_err());
    }

    #[test]
    fn test_trims_trailing_slash() {
        let config = Config {
            node_url: "http://localhost:8080/v1/".to_string(),
            ..Config::default()
        };
        let client = AptosClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }
}
