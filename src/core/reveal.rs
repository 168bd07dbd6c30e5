use crate::core::seeds::MISSING;
use crate::models::{MatchDetail, Player};
use chrono::DateTime;
use reqwest::Url;
use std::fmt;

/// Post-run report with the details the seed output keeps hidden
#[derive(Debug, Clone, PartialEq)]
pub struct RevealReport {
    pub match_id: String,
    pub players: String,
    pub win_time: String,
    pub date: String,
    pub splits: Vec<Split>,
    pub vod: Option<VodLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub player: String,
    pub kind: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VodLink {
    pub url: String,
    pub owner: String,
    pub video_id: Option<String>,
    /// Position of the match in the recording, `XhYmZs`
    pub offset: String,
}

impl RevealReport {
    pub fn from_detail(detail: &MatchDetail) -> Self {
        let players = detail.summary.players.as_deref().unwrap_or_default();

        let names: Vec<&str> = players
            .iter()
            .filter_map(|p| p.nickname.as_deref())
            .filter(|n| !n.is_empty())
            .collect();

        let mut timelines: Vec<_> = detail.timelines.iter().flatten().collect();
        timelines.sort_by(|a, b| {
            a.time
                .unwrap_or(0.0)
                .partial_cmp(&b.time.unwrap_or(0.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let splits = timelines
            .into_iter()
            .map(|tl| Split {
                player: player_label(players, tl.uuid.as_deref()),
                kind: tl.kind.clone().unwrap_or_else(|| MISSING.to_string()),
                time: ms_to_clock(tl.time),
            })
            .collect();

        Self {
            match_id: detail.summary.id.clone().unwrap_or_else(|| MISSING.to_string()),
            players: if names.is_empty() {
                MISSING.to_string()
            } else {
                names.join(" vs ")
            },
            win_time: ms_to_clock(detail.summary.elapsed_ms()),
            date: epoch_to_utc(detail.date),
            splits,
            vod: vod_link(detail, players),
        }
    }
}

impl fmt::Display for RevealReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Match:     {}", self.match_id)?;
        writeln!(f, "Players:   {}", self.players)?;
        writeln!(f, "Win time:  {}", self.win_time)?;
        writeln!(f, "Date:      {}", self.date)?;

        for split in &self.splits {
            writeln!(f, "  {:<16} {:<24} {}", split.player, split.kind, split.time)?;
        }

        match &self.vod {
            Some(vod) => {
                writeln!(f, "VOD:       {} (owner: {}, offset: {})", vod.url, vod.owner, vod.offset)?;
                if let Some(id) = &vod.video_id {
                    writeln!(f, "Embed:     https://player.twitch.tv/?video=v{}&time={}", id, vod.offset)?;
                }
                Ok(())
            }
            None => writeln!(f, "VOD:       none"),
        }
    }
}

/// `m:ss.cc` from milliseconds
pub fn ms_to_clock(ms: Option<f64>) -> String {
    let Some(ms) = ms.filter(|v| v.is_finite() && *v >= 0.0) else {
        return MISSING.to_string();
    };

    let ms = ms as u64;
    let total_secs = ms / 1000;
    let minutes = total_secs / 60;
    let secs = total_secs % 60;
    let centis = (ms % 1000) / 10;

    format!("{}:{:02}.{:02}", minutes, secs, centis)
}

/// `XhYmZs`, negative offsets clamp to zero
pub fn twitch_time_param(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{}h{}m{}s", s / 3600, (s % 3600) / 60, s % 60)
}

/// Video id from a Twitch VOD URL
///
/// Handles `twitch.tv/videos/<id>` paths and embed URLs with `?video=v<id>`.
pub fn parse_twitch_video_id(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    if !url.host_str()?.contains("twitch.tv") {
        return None;
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();
    if let Some(pos) = segments.iter().position(|s| *s == "videos") {
        if let Some(id) = segments.get(pos + 1) {
            return Some(id.to_string());
        }
    }

    url.query_pairs()
        .find(|(k, _)| k == "video")
        .map(|(_, v)| v.strip_prefix('v').unwrap_or(&v).to_string())
        .filter(|v| !v.is_empty())
}

fn epoch_to_utc(secs: Option<i64>) -> String {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn player_label(players: &[Player], uuid: Option<&str>) -> String {
    let Some(uuid) = uuid else {
        return MISSING.to_string();
    };

    players
        .iter()
        .find(|p| p.uuid.as_deref() == Some(uuid))
        .and_then(|p| p.nickname.clone())
        .unwrap_or_else(|| uuid.chars().take(8).collect())
}

fn vod_link(detail: &MatchDetail, players: &[Player]) -> Option<VodLink> {
    let vod = detail
        .summary
        .vod
        .as_deref()?
        .iter()
        .find(|v| v.url().is_some())?;
    let url = vod.url()?.to_string();

    let owner = match vod.uuid.as_deref() {
        Some(uuid) => player_label(players, Some(uuid)),
        None => "unknown".to_string(),
    };

    let offset = match (detail.date, vod.starts_at) {
        (Some(date), Some(start)) => date.saturating_sub(start),
        _ => 0,
    };

    Some(VodLink {
        video_id: parse_twitch_video_id(&url),
        url,
        owner,
        offset: twitch_time_param(offset),
    })
}
