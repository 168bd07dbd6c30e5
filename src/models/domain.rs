use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Match summary as returned by the `/matches` listing
///
/// Every field is optional. A field carrying an unexpected JSON type reads
/// as absent instead of failing the whole record. The `forfeited` and
/// `decayed` flags are the exception: any present value other than `false`
/// counts as set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub match_type: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    pub forfeited: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub decayed: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub result: Option<MatchOutcome>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub vod: Option<Vec<Vod>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub players: Option<Vec<Player>>,
}

impl MatchSummary {
    /// Winning time in milliseconds, if the record carries a numeric one
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.result.as_ref().and_then(|r| r.time)
    }

    pub fn is_forfeited(&self) -> bool {
        self.forfeited.unwrap_or(false)
    }

    pub fn is_decayed(&self) -> bool {
        self.decayed.unwrap_or(false)
    }

    /// True when at least one VOD entry exists, regardless of its URL
    pub fn has_vod_entry(&self) -> bool {
        self.vod.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// True when at least one VOD entry has a non-empty URL
    pub fn has_vod_url(&self) -> bool {
        self.vod
            .as_ref()
            .is_some_and(|vods| vods.iter().any(|v| v.url().is_some()))
    }
}

/// Full match record from `/matches/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub summary: MatchSummary,
    #[serde(default, deserialize_with = "lenient")]
    pub seed: Option<SeedInfo>,
    /// Epoch seconds
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<i64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub timelines: Option<Vec<Timeline>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchOutcome {
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vod {
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    /// Epoch seconds at which the recording starts
    #[serde(rename = "startsAt", default, deserialize_with = "lenient")]
    pub starts_at: Option<i64>,
}

impl Vod {
    /// The URL, if present and non-empty
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub nickname: Option<String>,
    #[serde(rename = "eloRate", default, deserialize_with = "lenient")]
    pub elo_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub time: Option<f64>,
}

/// Raw `seed` object of a match detail
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub overworld: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub nether: Option<String>,
    #[serde(rename = "theEnd", default, deserialize_with = "lenient")]
    pub the_end: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rng: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
}

/// Normalized seed values of one match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResult {
    pub overworld: Option<String>,
    pub nether: Option<String>,
    pub end: Option<String>,
    pub rng: Option<String>,
    pub fallback: Option<String>,
}

impl SeedResult {
    /// True when any of the four real seed fields is present
    pub fn has_primary(&self) -> bool {
        self.overworld.is_some() || self.nether.is_some() || self.end.is_some() || self.rng.is_some()
    }

    /// Fallback value, only when no real seed is available
    pub fn display_fallback(&self) -> Option<&str> {
        if self.has_primary() {
            None
        } else {
            self.fallback.as_deref()
        }
    }
}

/// Deserialize any value, mapping a type mismatch to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserialize a list, dropping entries that don't fit `T`
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(Some(
            items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// Status flag: absent or null is `None`, anything other than `false` is set
fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(b),
        Some(_) => Some(true),
    })
}

/// Ids come back as numbers or strings depending on the endpoint
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
