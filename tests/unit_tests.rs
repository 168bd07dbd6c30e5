// Unit tests for MCSR Seedfind

use mcsr_seedfind::core::{
    filters::{passes_detail_level, passes_list_level},
    seeds::{extract_seeds, render_seed_lines},
};
use mcsr_seedfind::models::{FilterConfig, MatchDetail, MatchSummary, SeedResult};
use serde_json::{json, Value};

fn summary(value: Value) -> MatchSummary {
    serde_json::from_value(value).unwrap()
}

fn detail(value: Value) -> MatchDetail {
    serde_json::from_value(value).unwrap()
}

fn good_summary() -> Value {
    json!({
        "id": 1001,
        "type": 2,
        "forfeited": false,
        "decayed": false,
        "result": { "uuid": "abc", "time": 450_000 },
        "vod": [{ "uuid": "abc", "url": "https://www.twitch.tv/videos/1", "startsAt": 0 }],
        "players": [{ "uuid": "abc", "nickname": "runner", "eloRate": 1500 }]
    })
}

fn with(mut base: Value, key: &str, value: Value) -> Value {
    base[key] = value;
    base
}

#[test]
fn test_list_filter_is_pure() {
    let filter = FilterConfig::default();
    let m = summary(good_summary());
    let before = format!("{:?}", m);

    let first = passes_list_level(&m, &filter);
    let second = passes_list_level(&m, &filter);

    assert!(first);
    assert_eq!(first, second);
    assert_eq!(before, format!("{:?}", m), "Filter must not mutate the summary");
}

#[test]
fn test_require_vod_rejects_missing_vods() {
    let filter = FilterConfig::default();

    let cases = vec![
        json!([]),
        Value::Null,
        json!([{ "url": "" }, { "url": null }, { "uuid": "x" }]),
        json!("https://www.twitch.tv/videos/1"),
    ];

    for vod in cases {
        let m = summary(with(good_summary(), "vod", vod.clone()));
        assert!(!passes_list_level(&m, &filter), "vod {} should be rejected", vod);
    }

    let mut m = summary(good_summary());
    m.vod = None;
    assert!(!passes_list_level(&m, &filter));
}

#[test]
fn test_require_vod_off_accepts_missing_vods() {
    let filter = FilterConfig {
        require_vod: false,
        ..Default::default()
    };
    let m = summary(with(good_summary(), "vod", json!([])));
    assert!(passes_list_level(&m, &filter));
}

#[test]
fn test_exclude_forfeit_decay() {
    let filter = FilterConfig::default();

    let forfeited = summary(with(good_summary(), "forfeited", json!(true)));
    let decayed = summary(with(good_summary(), "decayed", json!(true)));

    assert!(!passes_list_level(&forfeited, &filter));
    assert!(!passes_list_level(&decayed, &filter));

    let lenient = FilterConfig {
        exclude_forfeit_decay: false,
        ..Default::default()
    };
    assert!(passes_list_level(&forfeited, &lenient));
    assert!(passes_list_level(&decayed, &lenient));
}

#[test]
fn test_malformed_forfeit_decay_flags_reject() {
    let filter = FilterConfig::default();

    for key in ["forfeited", "decayed"] {
        for flag in [json!(1), json!("true"), json!("yes")] {
            let record = with(good_summary(), key, flag.clone());

            assert!(
                !passes_list_level(&summary(record.clone()), &filter),
                "{}={} should be rejected at list level",
                key,
                flag
            );
            assert!(
                !passes_detail_level(&detail(record), &filter),
                "{}={} should be rejected at detail level",
                key,
                flag
            );
        }

        let null_flag = with(good_summary(), key, Value::Null);
        assert!(passes_list_level(&summary(null_flag.clone()), &filter));
        assert!(passes_detail_level(&detail(null_flag), &filter));
    }
}

#[test]
fn test_elapsed_time_boundary() {
    let filter = FilterConfig::default();
    let limit = 10 * 60_000;

    let exact = summary(with(good_summary(), "result", json!({ "time": limit })));
    let over = summary(with(good_summary(), "result", json!({ "time": limit + 1 })));

    assert!(passes_list_level(&exact, &filter), "Exactly max_minutes must pass");
    assert!(!passes_list_level(&over, &filter), "One millisecond over must fail");
}

#[test]
fn test_fractional_max_minutes() {
    let filter = FilterConfig {
        max_minutes: 7.5,
        ..Default::default()
    };
    let exact = summary(with(good_summary(), "result", json!({ "time": 450_000 })));
    let over = summary(with(good_summary(), "result", json!({ "time": 450_001 })));

    assert!(passes_list_level(&exact, &filter));
    assert!(!passes_list_level(&over, &filter));
}

#[test]
fn test_malformed_time_rejected() {
    let filter = FilterConfig::default();

    for result in [json!({ "time": "450000" }), json!({}), json!(null), json!(450_000)] {
        let m = summary(with(good_summary(), "result", result.clone()));
        assert!(!passes_list_level(&m, &filter), "result {} should be rejected", result);
    }
}

#[test]
fn test_match_type_filter() {
    let filter = FilterConfig::default();
    let casual = summary(with(good_summary(), "type", json!(1)));
    let untyped = summary(with(good_summary(), "type", json!(null)));

    assert!(!passes_list_level(&casual, &filter));
    assert!(!passes_list_level(&untyped, &filter));
}

#[test]
fn test_detail_level_rejects_disagreeing_detail() {
    let filter = FilterConfig::default();

    let ok = detail(good_summary());
    assert!(passes_detail_level(&ok, &filter));

    let slow = detail(with(good_summary(), "result", json!({ "time": 900_000 })));
    let no_vod = detail(with(good_summary(), "vod", json!([])));
    let decayed = detail(with(good_summary(), "decayed", json!(true)));

    assert!(!passes_detail_level(&slow, &filter));
    assert!(!passes_detail_level(&no_vod, &filter));
    assert!(!passes_detail_level(&decayed, &filter));
}

#[test]
fn test_seed_normalization() {
    let d = detail(json!({
        "seed": { "overworld": "  ", "nether": "abc", "theEnd": null, "rng": null }
    }));

    let seeds = extract_seeds(&d);

    assert_eq!(seeds.overworld, None);
    assert_eq!(seeds.nether.as_deref(), Some("abc"));
    assert_eq!(seeds.end, None);
    assert_eq!(seeds.rng, None);
}

#[test]
fn test_seed_non_string_values() {
    let d = detail(json!({
        "seed": { "overworld": 12345, "nether": ["x"], "theEnd": " END ", "rng": "  99 " }
    }));

    let seeds = extract_seeds(&d);

    assert_eq!(seeds.overworld, None);
    assert_eq!(seeds.nether, None);
    assert_eq!(seeds.end.as_deref(), Some("END"));
    assert_eq!(seeds.rng.as_deref(), Some("99"));
}

#[test]
fn test_fallback_from_match_id() {
    let d = detail(json!({ "id": "42", "seed": {} }));

    let seeds = extract_seeds(&d);

    assert_eq!(
        seeds,
        SeedResult {
            fallback: Some("42".to_string()),
            ..Default::default()
        }
    );
    assert_eq!(seeds.display_fallback(), Some("42"));
}

#[test]
fn test_output_withholds_match_details() {
    let d = detail(with(
        with(good_summary(), "seed", json!({ "overworld": "VILLAGE", "rng": "7" })),
        "id",
        json!("match-1001"),
    ));

    let lines = render_seed_lines(&extract_seeds(&d)).join("\n");

    assert!(lines.contains("Overworld: VILLAGE"));
    assert!(lines.contains("RNG:       7"));
    assert!(!lines.contains("match-1001"));
    assert!(!lines.contains("runner"));
    assert!(!lines.contains("Fallback"));
}
