use crate::models::{MatchDetail, SeedResult};

/// Placeholder shown for an absent seed value
pub const MISSING: &str = "—";

/// Pull normalized seed values out of a match detail
///
/// A detail without a `seed` object yields an all-absent result. `theEnd` is
/// preferred over its `end` alias. The fallback is the match's own id (or the
/// seed id when the match has none); it is not a world seed and is only shown
/// when all four real values are missing.
pub fn extract_seeds(detail: &MatchDetail) -> SeedResult {
    let Some(seed) = detail.seed.as_ref() else {
        return SeedResult::default();
    };

    let end = normalize(seed.the_end.as_deref()).or_else(|| normalize(seed.end.as_deref()));
    let fallback = normalize(detail.summary.id.as_deref()).or_else(|| normalize(seed.id.as_deref()));

    SeedResult {
        overworld: normalize(seed.overworld.as_deref()),
        nether: normalize(seed.nether.as_deref()),
        end,
        rng: normalize(seed.rng.as_deref()),
        fallback,
    }
}

/// Trimmed value, or `None` when blank
#[inline]
pub fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Lines printed for a seed result
///
/// Only seed values appear here; match id, time and players stay hidden.
pub fn render_seed_lines(seeds: &SeedResult) -> Vec<String> {
    let show = |v: &Option<String>| v.as_deref().unwrap_or(MISSING).to_string();

    let mut lines = vec![
        format!("Overworld: {}", show(&seeds.overworld)),
        format!("Nether:    {}", show(&seeds.nether)),
        format!("End:       {}", show(&seeds.end)),
        format!("RNG:       {}", show(&seeds.rng)),
    ];

    if !seeds.has_primary() {
        lines.push(format!("Fallback:  {}", show(&seeds.fallback)));
    }

    lines
}
