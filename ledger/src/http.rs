//! HTTP ledger client.
//!
//! Queries a remote RPC gateway for account existence. The wire details are
//! deliberately confined to this module: everything above it sees only
//! [`Existence`] and the [`LedgerError`] taxonomy.

use crate::client::{Existence, LedgerClient};
use crate::error::LedgerError;
use layermap_types::{AccountInfo, Identity};
use serde::Deserialize;
use std::time::Duration;

/// Default RPC gateway URL.
const DEFAULT_BASE_URL: &str = "https://rpc.layermap.net";

/// Per-request timeout. Anything slower is treated as transient.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Balance response envelope returned by the gateway.
#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: BalanceBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceBody {
    /// Balance as a decimal string (the gateway avoids JSON number precision).
    balance: String,
    valid_for_tick: Option<u64>,
}

/// HTTP client for ledger existence lookups.
pub struct HttpLedgerClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpLedgerClient {
    /// Create a client pointing at the default gateway.
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_url(DEFAULT_BASE_URL)
    }

    /// Create a client pointing at a custom gateway URL.
    pub fn with_url(base_url: &str) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::Fatal(format!("http client init: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn balance_url(&self, identity: &Identity) -> String {
        format!("{}/v1/balances/{}", self.base_url, identity)
    }
}

/// Map a non-success HTTP status onto the failure taxonomy.
///
/// 404 is not an error at all (the account simply does not exist) and is
/// handled before this function is reached.
fn classify_status(status: reqwest::StatusCode) -> LedgerError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        LedgerError::RateLimited
    } else if status.is_client_error() {
        LedgerError::Fatal(format!("HTTP {status}"))
    } else {
        LedgerError::Transient(format!("HTTP {status}"))
    }
}

/// Map a transport-level reqwest error onto the failure taxonomy.
fn classify_transport(e: reqwest::Error) -> LedgerError {
    if e.is_builder() || e.is_request() {
        LedgerError::Fatal(e.to_string())
    } else {
        // Timeouts, connection resets, decode failures on flaky proxies.
        LedgerError::Transient(e.to_string())
    }
}

/// Parse the gateway's balance envelope into account info.
fn parse_balance(body: &str) -> Result<AccountInfo, LedgerError> {
    let resp: BalanceResponse = serde_json::from_str(body)
        .map_err(|e| LedgerError::Transient(format!("malformed balance response: {e}")))?;
    let balance = resp
        .balance
        .balance
        .parse::<u64>()
        .map_err(|e| LedgerError::Transient(format!("malformed balance value: {e}")))?;
    Ok(AccountInfo {
        balance,
        valid_for_tick: resp.balance.valid_for_tick,
    })
}

impl LedgerClient for HttpLedgerClient {
    async fn exists(&self, identity: &Identity) -> Result<Existence, LedgerError> {
        let url = self.balance_url(identity);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Existence::NotFound);
        }
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let body = resp.text().await.map_err(classify_transport)?;
        let info = parse_balance(&body)?;
        tracing::trace!(identity = %identity, balance = info.balance, "ledger hit");
        Ok(Existence::Found(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_is_rate_limited() {
        assert_eq!(
            classify_status(reqwest::StatusCode::TOO_MANY_REQUESTS),
            LedgerError::RateLimited
        );
    }

    #[test]
    fn status_4xx_is_fatal() {
        assert!(matches!(
            classify_status(reqwest::StatusCode::BAD_REQUEST),
            LedgerError::Fatal(_)
        ));
    }

    #[test]
    fn status_5xx_is_transient() {
        assert!(matches!(
            classify_status(reqwest::StatusCode::BAD_GATEWAY),
            LedgerError::Transient(_)
        ));
        assert!(matches!(
            classify_status(reqwest::StatusCode::SERVICE_UNAVAILABLE),
            LedgerError::Transient(_)
        ));
    }

    #[test]
    fn parse_full_balance_body() {
        let body = r#"{"balance":{"id":"AAAA","balance":"12345","validForTick":19000000}}"#;
        let info = parse_balance(body).unwrap();
        assert_eq!(info.balance, 12_345);
        assert_eq!(info.valid_for_tick, Some(19_000_000));
    }

    #[test]
    fn parse_balance_without_tick() {
        let body = r#"{"balance":{"id":"AAAA","balance":"0"}}"#;
        let info = parse_balance(body).unwrap();
        assert_eq!(info.balance, 0);
        assert_eq!(info.valid_for_tick, None);
    }

    #[test]
    fn malformed_body_is_transient() {
        assert!(matches!(
            parse_balance("not json"),
            Err(LedgerError::Transient(_))
        ));
        assert!(matches!(
            parse_balance(r#"{"balance":{"id":"A","balance":"many"}}"#),
            Err(LedgerError::Transient(_))
        ));
    }

    #[test]
    fn balance_url_shape() {
        let client = HttpLedgerClient::with_url("https://rpc.example.org/").unwrap();
        let id = Identity::parse("A".repeat(60)).unwrap();
        assert_eq!(
            client.balance_url(&id),
            format!("https://rpc.example.org/v1/balances/{}", "A".repeat(60))
        );
    }
}
