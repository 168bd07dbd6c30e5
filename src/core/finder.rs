use crate::core::scanner::{ScanError, Scanner};
use crate::models::{FilterConfig, FoundSeed, Pagination, ScanMode};
use crate::services::McsrClient;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed search orchestrator
///
/// # Pipeline Stages
/// 1. Page fetch, shuffle and sampling
/// 2. List-level filtering
/// 3. Detail fetch and re-validation
/// 4. Seed extraction
#[derive(Debug, Clone)]
pub struct SeedFinder {
    filter: FilterConfig,
    mode: ScanMode,
    pagination: Pagination,
    rng_seed: Option<u64>,
}

impl SeedFinder {
    pub fn new(filter: FilterConfig) -> Self {
        Self {
            filter,
            mode: ScanMode::default(),
            pagination: Pagination::default(),
            rng_seed: None,
        }
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Fix the sampling order, mainly for tests and reproducing a pick
    pub fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Start a fresh lazy scan against `client`
    pub fn scanner<'a>(&self, client: &'a McsrClient) -> Scanner<'a> {
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Scanner::new(client, self.filter.clone(), self.pagination, rng)
    }

    /// Return the first verified match
    pub async fn find_one(&self, client: &McsrClient) -> Result<FoundSeed, ScanError> {
        let mut scanner = self.scanner(client);

        match scanner.next_match().await? {
            Some(found) => {
                tracing::info!(
                    "Found match after {} page(s)",
                    scanner.pages_fetched()
                );
                Ok(found)
            }
            None => {
                tracing::warn!(
                    "No match after {} page(s), filter: {:?}",
                    scanner.pages_fetched(),
                    self.filter
                );
                Err(ScanError::NoMatchFound)
            }
        }
    }

    /// Accumulate every verified match in the sampled pages, up to `limit`
    pub async fn collect(&self, client: &McsrClient, limit: Option<usize>) -> Result<Vec<FoundSeed>, ScanError> {
        let mut scanner = self.scanner(client);
        let mut found = Vec::new();

        while limit.map_or(true, |max| found.len() < max) {
            match scanner.next_match().await? {
                Some(m) => found.push(m),
                None => break,
            }
        }

        tracing::info!(
            "Collected {} match(es) over {} page(s)",
            found.len(),
            scanner.pages_fetched()
        );

        if found.is_empty() {
            return Err(ScanError::NoMatchFound);
        }

        Ok(found)
    }

    /// Run the configured mode
    pub async fn run(&self, client: &McsrClient) -> Result<Vec<FoundSeed>, ScanError> {
        match self.mode {
            ScanMode::FirstMatch => self.find_one(client).await.map(|m| vec![m]),
            ScanMode::CollectAll { limit } => self.collect(client, limit).await,
        }
    }
}
