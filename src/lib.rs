//! MCSR Seedfind - random world seeds from MCSR Ranked matches
//!
//! This library samples recent matches from the MCSR Ranked API, filters
//! them by time, type, forfeiture and VOD presence, and extracts the world
//! seeds of one qualifying match.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract_seeds, passes_list_level, RevealReport, ScanError, SeedFinder};
pub use models::{FilterConfig, FilterPreset, FoundSeed, MatchDetail, MatchSummary, SeedResult};
pub use services::{McsrClient, McsrError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let filter = FilterConfig::default();
        assert!(!passes_list_level(&MatchSummary::default(), &filter));
    }
}
