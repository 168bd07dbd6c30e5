use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchDetail, SeedResult};

/// A verified match and the seeds extracted from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundSeed {
    /// API base the match was fetched from
    pub base: String,
    /// Kept for tests and the reveal report; not printed by default
    pub match_id: String,
    pub seeds: SeedResult,
    #[serde(skip)]
    pub detail: MatchDetail,
}
