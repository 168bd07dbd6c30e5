// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{MatchDetail, MatchOutcome, MatchSummary, Player, SeedInfo, SeedResult, Timeline, Vod};
pub use requests::{FilterConfig, FilterPreset, Pagination, ScanMode};
pub use responses::FoundSeed;
