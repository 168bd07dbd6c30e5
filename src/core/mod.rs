// Core pipeline exports
pub mod filters;
pub mod finder;
pub mod reveal;
pub mod scanner;
pub mod seeds;

pub use filters::{passes_detail_level, passes_list_level};
pub use finder::SeedFinder;
pub use reveal::RevealReport;
pub use scanner::{ScanError, Scanner};
pub use seeds::{extract_seeds, render_seed_lines};
