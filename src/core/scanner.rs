use crate::core::filters::{passes_detail_level, passes_list_level};
use crate::core::seeds::extract_seeds;
use crate::models::{FilterConfig, FoundSeed, MatchSummary, Pagination};
use crate::services::{McsrClient, McsrError, PageQuery};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Errors that end a scan
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("No matching match found in sampled pages. Loosen filters or increase pages_to_try.")]
    NoMatchFound,

    #[error(transparent)]
    Api(#[from] McsrError),
}

/// Lazy sequence of verified matches
///
/// Each call to [`Scanner::next_match`] resumes where the previous one
/// stopped: first the remaining sampled candidates of the current page, then
/// further pages until `pages_to_try` listing requests have been made.
/// A match id is verified at most once per scan, so a listing that shifts
/// between requests can't yield the same match twice.
pub struct Scanner<'a> {
    client: &'a McsrClient,
    filter: FilterConfig,
    pagination: Pagination,
    rng: StdRng,
    pages_fetched: u32,
    cursor: Option<String>,
    pending: VecDeque<Value>,
    tried: HashSet<String>,
}

impl<'a> Scanner<'a> {
    pub fn new(client: &'a McsrClient, filter: FilterConfig, pagination: Pagination, rng: StdRng) -> Self {
        Self {
            client,
            filter,
            pagination,
            rng,
            pages_fetched: 0,
            cursor: None,
            pending: VecDeque::new(),
            tried: HashSet::new(),
        }
    }

    /// Number of listing requests made so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Next match that passes both filter stages, or `None` once pages run out
    ///
    /// HTTP failures abort immediately; a candidate rejected at detail level
    /// only moves the scan on to the next candidate.
    pub async fn next_match(&mut self) -> Result<Option<FoundSeed>, ScanError> {
        loop {
            while let Some(raw) = self.pending.pop_front() {
                if let Some(found) = self.verify(raw).await? {
                    return Ok(Some(found));
                }
            }

            if !self.load_next_page().await? {
                return Ok(None);
            }
        }
    }

    /// Fetch, shuffle and sample the next page. `false` when nothing is left to fetch.
    async fn load_next_page(&mut self) -> Result<bool, ScanError> {
        if self.pages_fetched >= self.filter.pages_to_try {
            return Ok(false);
        }

        self.pages_fetched += 1;
        let query = match self.pagination {
            Pagination::Page => PageQuery::Page {
                count: self.filter.count_per_page,
                page: self.pages_fetched,
            },
            Pagination::Before => PageQuery::Before {
                count: self.filter.count_per_page,
                match_type: self.filter.match_type,
                before: self.cursor.clone(),
            },
        };

        let mut entries = self.client.fetch_page(&query).await?;

        // An empty or malformed page keeps the previous cursor
        if self.pagination == Pagination::Before {
            if let Some(id) = entries.last().and_then(entry_id) {
                self.cursor = Some(id);
            }
        }

        if entries.is_empty() {
            tracing::debug!("Page {} empty or malformed, skipping", self.pages_fetched);
            return Ok(true);
        }

        entries.shuffle(&mut self.rng);
        entries.truncate(self.filter.candidates_per_page);

        tracing::debug!(
            "Page {}: sampling {} candidates",
            self.pages_fetched,
            entries.len()
        );

        self.pending = entries.into();
        Ok(true)
    }

    async fn verify(&mut self, raw: Value) -> Result<Option<FoundSeed>, ScanError> {
        let Ok(summary) = serde_json::from_value::<MatchSummary>(raw) else {
            return Ok(None);
        };

        if !passes_list_level(&summary, &self.filter) {
            return Ok(None);
        }

        let Some(match_id) = summary.id else {
            return Ok(None);
        };

        if !self.tried.insert(match_id.clone()) {
            tracing::debug!("Candidate {} already verified, skipping", match_id);
            return Ok(None);
        }

        let Some(detail) = self.client.fetch_detail(&match_id).await? else {
            tracing::debug!("Detail for {} is not a match object", match_id);
            return Ok(None);
        };

        if !passes_detail_level(&detail, &self.filter) {
            tracing::debug!("Candidate {} rejected at detail level", match_id);
            return Ok(None);
        }

        let seeds = extract_seeds(&detail);

        Ok(Some(FoundSeed {
            base: self.client.base_url().to_string(),
            match_id,
            seeds,
            detail,
        }))
    }
}

/// Id of a raw listing entry, used as the `before` cursor
fn entry_id(entry: &Value) -> Option<String> {
    match entry.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
