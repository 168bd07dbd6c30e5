use crate::models::MatchDetail;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Known hosts of the MCSR Ranked API, in the order they are tried
pub const DEFAULT_BASES: &[&str] = &["https://api.mcsrranked.com", "https://mcsrranked.com/api"];

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Errors that can occur when talking to the match API
#[derive(Debug, Error)]
pub enum McsrError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    HttpFailure { status: u16, url: String },

    #[error("No working API base (tried {})", .0.join(", "))]
    NoAvailableEndpoint(Vec<String>),
}

/// One listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageQuery {
    /// `filter=2&count={count}&page={page}`
    Page { count: u32, page: u32 },
    /// `type={match_type}&count={count}&before={before}`
    Before {
        count: u32,
        match_type: Option<i64>,
        before: Option<String>,
    },
}

impl PageQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            PageQuery::Page { count, page } => vec![
                ("filter", "2".to_string()),
                ("count", count.to_string()),
                ("page", page.to_string()),
            ],
            PageQuery::Before { count, match_type, before } => {
                let mut params = Vec::with_capacity(3);
                if let Some(t) = match_type {
                    params.push(("type", t.to_string()));
                }
                params.push(("count", count.to_string()));
                if let Some(id) = before {
                    params.push(("before", id.clone()));
                }
                params
            }
        }
    }
}

/// MCSR Ranked API client bound to a single base URL
#[derive(Debug, Clone)]
pub struct McsrClient {
    base_url: String,
    client: Client,
}

impl McsrClient {
    /// Create a client for a base URL with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, McsrError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Check each candidate base in order and keep the first one that answers
    pub async fn resolve(bases: &[String], timeout: Duration) -> Result<Self, McsrError> {
        for base in bases {
            let client = Self::new(base.as_str(), timeout)?;
            match client.health_check().await {
                Ok(()) => {
                    tracing::info!(base = %client.base_url, "Using API base");
                    return Ok(client);
                }
                Err(e) => {
                    tracing::warn!(base = %base, error = %e, "API base health check failed");
                }
            }
        }

        Err(McsrError::NoAvailableEndpoint(bases.to_vec()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lightweight health request: a single-entry listing
    pub async fn health_check(&self) -> Result<(), McsrError> {
        let query = PageQuery::Page { count: 1, page: 1 };
        let response = self
            .client
            .get(self.matches_url())
            .query(&query.params())
            .send()
            .await?;

        Self::check_response(response).await?;
        Ok(())
    }

    /// Fetch one page of raw match summaries
    ///
    /// Accepts `{"data": [...]}` or a bare list. Any other body, including one
    /// that isn't JSON, reads as an empty page.
    pub async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Value>, McsrError> {
        tracing::debug!("Fetching match page: {:?}", query);

        let response = self
            .client
            .get(self.matches_url())
            .query(&query.params())
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body = response.text().await?;

        let payload: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Match page is not JSON, skipping: {}", e);
                return Ok(Vec::new());
            }
        };

        Ok(page_entries(payload))
    }

    /// Fetch the full record of one match
    ///
    /// Returns `Ok(None)` when the body isn't a match object.
    pub async fn fetch_detail(&self, match_id: &str) -> Result<Option<MatchDetail>, McsrError> {
        let url = format!("{}/{}", self.matches_url(), urlencoding::encode(match_id));

        tracing::debug!("Fetching match detail: {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        let body = response.text().await?;

        let payload: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Match detail {} is not JSON: {}", match_id, e);
                return Ok(None);
            }
        };

        Ok(detail_object(payload).and_then(|obj| serde_json::from_value(obj).ok()))
    }

    fn matches_url(&self) -> String {
        format!("{}/matches", self.base_url)
    }

    async fn check_response(response: Response) -> Result<Response, McsrError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let url = response.url().to_string();
            tracing::error!(status, url = %url, "MCSR API error");
            Err(McsrError::HttpFailure { status, url })
        }
    }
}

/// Entries of a listing payload, or nothing when the shape is unknown
fn page_entries(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// The match object of a detail payload, unwrapping a `data` envelope
fn detail_object(payload: Value) -> Option<Value> {
    match payload {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(data @ Value::Object(_)) => Some(data),
            Some(other) => {
                obj.insert("data".to_string(), other);
                Some(Value::Object(obj))
            }
            None => Some(Value::Object(obj)),
        },
        _ => None,
    }
}
