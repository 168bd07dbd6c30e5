use crate::models::{FilterConfig, FilterPreset, MatchDetail, MatchSummary, Player};

/// Check a listing entry against the filter
///
/// This is the cheap first stage, run on every sampled summary before any
/// detail request is made. Missing or malformed fields reject.
#[inline]
pub fn passes_list_level(summary: &MatchSummary, filter: &FilterConfig) -> bool {
    if let Some(match_type) = filter.match_type {
        if summary.match_type != Some(match_type) {
            return false;
        }
    }

    match filter.preset {
        FilterPreset::Strict => {
            if filter.exclude_forfeit_decay && (summary.is_forfeited() || summary.is_decayed()) {
                return false;
            }

            if !within_time(summary, filter) {
                return false;
            }

            if filter.require_vod && !summary.has_vod_url() {
                return false;
            }
        }
        FilterPreset::EloRange { min_elo, max_elo } => {
            if !within_time(summary, filter) {
                return false;
            }

            if filter.require_vod && !summary.has_vod_entry() {
                return false;
            }

            if !players_within_elo(summary.players.as_deref(), min_elo, max_elo) {
                return false;
            }
        }
    }

    true
}

/// Re-check a fetched detail record
///
/// The listing can disagree with the detail endpoint; the detail wins. Match
/// type is not re-checked since the detail was reached through a summary that
/// already passed it.
#[inline]
pub fn passes_detail_level(detail: &MatchDetail, filter: &FilterConfig) -> bool {
    let summary = &detail.summary;

    match filter.preset {
        FilterPreset::Strict => {
            if filter.exclude_forfeit_decay && (summary.is_forfeited() || summary.is_decayed()) {
                return false;
            }

            if !within_time(summary, filter) {
                return false;
            }

            if filter.require_vod && !summary.has_vod_url() {
                return false;
            }
        }
        FilterPreset::EloRange { .. } => {
            if !within_time(summary, filter) {
                return false;
            }

            if filter.require_vod && !summary.has_vod_entry() {
                return false;
            }
        }
    }

    true
}

fn within_time(summary: &MatchSummary, filter: &FilterConfig) -> bool {
    match summary.elapsed_ms() {
        Some(time) => time <= filter.max_ms(),
        None => false,
    }
}

fn players_within_elo(players: Option<&[Player]>, min_elo: Option<f64>, max_elo: Option<f64>) -> bool {
    let Some(players) = players.filter(|p| !p.is_empty()) else {
        return false;
    };

    players.iter().all(|player| match player.elo_rate {
        Some(elo) => {
            min_elo.map_or(true, |min| elo >= min) && max_elo.map_or(true, |max| elo <= max)
        }
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchOutcome, Vod};

    fn create_test_summary(time: f64) -> MatchSummary {
        MatchSummary {
            id: Some("100".to_string()),
            match_type: Some(2),
            forfeited: Some(false),
            decayed: Some(false),
            result: Some(MatchOutcome {
                uuid: None,
                time: Some(time),
            }),
            vod: Some(vec![Vod {
                uuid: None,
                url: Some("https://www.twitch.tv/videos/1".to_string()),
                starts_at: None,
            }]),
            players: Some(vec![
                Player { uuid: None, nickname: None, elo_rate: Some(1400.0) },
                Player { uuid: None, nickname: None, elo_rate: Some(1600.0) },
            ]),
        }
    }

    #[test]
    fn test_list_level_pass() {
        let summary = create_test_summary(500_000.0);
        assert!(passes_list_level(&summary, &FilterConfig::default()));
    }

    #[test]
    fn test_list_level_wrong_type() {
        let mut summary = create_test_summary(500_000.0);
        summary.match_type = Some(1);
        assert!(!passes_list_level(&summary, &FilterConfig::default()));

        let any_type = FilterConfig {
            match_type: None,
            ..Default::default()
        };
        assert!(passes_list_level(&summary, &any_type));
    }

    #[test]
    fn test_list_level_decayed() {
        let mut summary = create_test_summary(500_000.0);
        summary.decayed = Some(true);
        assert!(!passes_list_level(&summary, &FilterConfig::default()));
    }

    #[test]
    fn test_list_level_missing_time() {
        let mut summary = create_test_summary(500_000.0);
        summary.result = None;
        assert!(!passes_list_level(&summary, &FilterConfig::default()));
    }

    #[test]
    fn test_elo_range_ignores_forfeit() {
        let mut summary = create_test_summary(500_000.0);
        summary.forfeited = Some(true);
        let filter = FilterConfig {
            preset: FilterPreset::EloRange {
                min_elo: Some(1200.0),
                max_elo: Some(1800.0),
            },
            ..Default::default()
        };
        assert!(passes_list_level(&summary, &filter));
    }

    #[test]
    fn test_elo_range_rejects_out_of_bounds() {
        let summary = create_test_summary(500_000.0);
        let filter = FilterConfig {
            preset: FilterPreset::EloRange {
                min_elo: Some(1500.0),
                max_elo: None,
            },
            ..Default::default()
        };
        assert!(!passes_list_level(&summary, &filter));
    }

    #[test]
    fn test_detail_level_forfeit_overrides_summary() {
        let detail = MatchDetail {
            summary: MatchSummary {
                forfeited: Some(true),
                ..create_test_summary(500_000.0)
            },
            ..Default::default()
        };
        assert!(!passes_detail_level(&detail, &FilterConfig::default()));
    }
}
