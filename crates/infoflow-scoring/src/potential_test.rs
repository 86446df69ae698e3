use chrono::Duration;
use serde_json::{json, Value};
use uuid::Uuid;

use super::*;

fn content(id: i64, platform: Platform, metrics: Value) -> Content {
    Content {
        id,
        public_id: Uuid::new_v4(),
        platform,
        external_id: format!("ext-{id}"),
        title: None,
        body: String::new(),
        author: None,
        author_id: None,
        url: None,
        published_at: Some(Utc::now()),
        raw_metrics: metrics,
        media_urls: vec![],
        is_processed: false,
        is_briefed: false,
        created_at: Utc::now(),
    }
}

fn scorer_with(snapshot: ScoringSnapshot) -> PotentialScorer {
    PotentialScorer::new(Utc::now(), snapshot)
}

#[test]
fn score_type_is_potential() {
    assert_eq!(
        scorer_with(ScoringSnapshot::new()).score_type(),
        ScoreKind::Potential
    );
}

// --- content_quality -------------------------------------------------------

#[test]
fn quality_rewards_mid_length_body_title_media_and_links() {
    let mut item = content(1, Platform::X, json!({}));
    item.body = format!("{} http://example.com", "字".repeat(400));
    item.title = Some("A title longer than ten".to_string());
    item.media_urls = vec!["https://img.example/1.jpg".to_string()];

    // 50 base + 20 length + 10 title + 10 media + 5 link = 95
    assert_eq!(PotentialScorer::content_quality(&item), 95.0);
}

#[test]
fn quality_penalizes_very_short_body() {
    let mut item = content(1, Platform::X, json!({}));
    item.body = "short".to_string();
    assert_eq!(PotentialScorer::content_quality(&item), 30.0);
}

#[test]
fn quality_length_bands() {
    let mut item = content(1, Platform::X, json!({}));
    item.body = "x".repeat(150);
    assert_eq!(PotentialScorer::content_quality(&item), 60.0);
    item.body = "x".repeat(3000);
    assert_eq!(PotentialScorer::content_quality(&item), 65.0);
    // 50..100 chars: no bonus, no penalty.
    item.body = "x".repeat(75);
    assert_eq!(PotentialScorer::content_quality(&item), 50.0);
}

#[test]
fn quality_caps_at_hundred() {
    let mut item = content(1, Platform::X, json!({}));
    item.body = format!("{} http://a http://b", "y".repeat(1000));
    item.title = Some("very descriptive headline".to_string());
    item.media_urls = vec!["m1".to_string(), "m2".to_string()];
    assert!(PotentialScorer::content_quality(&item) <= 100.0);
}

// --- author_weight ----------------------------------------------------------

#[test]
fn author_weight_neutral_without_author_id() {
    let item = content(1, Platform::X, json!({}));
    let mut scorer = scorer_with(ScoringSnapshot::new());
    assert_eq!(scorer.author_weight(&item), 50.0);
}

#[test]
fn author_weight_optimistic_for_new_authors() {
    let mut item = content(1, Platform::X, json!({}));
    item.author_id = Some("fresh".to_string());
    let mut scorer = scorer_with(ScoringSnapshot::new());
    assert_eq!(scorer.author_weight(&item), 55.0);
}

#[test]
fn author_weight_averages_prior_scores() {
    let mut snapshot = ScoringSnapshot::new();
    // Two prior items averaging 65.
    snapshot.add_author_score(Platform::X, "a1", 10, 60.0);
    snapshot.add_author_score(Platform::X, "a1", 11, 70.0);

    let mut item = content(1, Platform::X, json!({}));
    item.author_id = Some("a1".to_string());

    let mut scorer = scorer_with(snapshot);
    assert_eq!(scorer.author_weight(&item), 65.0);
}

#[test]
fn author_weight_excludes_the_current_content() {
    let mut snapshot = ScoringSnapshot::new();
    snapshot.add_author_score(Platform::X, "a1", 1, 10.0);
    snapshot.add_author_score(Platform::X, "a1", 2, 80.0);

    // Content id 1 must not see its own earlier score.
    let mut item = content(1, Platform::X, json!({}));
    item.author_id = Some("a1".to_string());

    let mut scorer = scorer_with(snapshot);
    assert_eq!(scorer.author_weight(&item), 80.0);
}

#[test]
fn author_weight_is_cached_per_author_within_a_run() {
    let mut snapshot = ScoringSnapshot::new();
    snapshot.add_author_score(Platform::X, "a1", 10, 64.0);

    let mut first = content(1, Platform::X, json!({}));
    first.author_id = Some("a1".to_string());
    // Second item by the same author: exclusion set differs, but the cached
    // value from the first call sticks for the rest of the run.
    let mut second = content(10, Platform::X, json!({}));
    second.author_id = Some("a1".to_string());

    let mut scorer = scorer_with(snapshot);
    assert_eq!(scorer.author_weight(&first), 64.0);
    assert_eq!(scorer.author_weight(&second), 64.0);
}

// --- engagement_rate --------------------------------------------------------

#[test]
fn engagement_rate_without_views_uses_absolute_bands() {
    let cases = [
        (json!({ "likes": 150 }), 70.0),
        (json!({ "likes": 60 }), 60.0),
        (json!({ "likes": 20 }), 50.0),
        (json!({ "likes": 2 }), 40.0),
    ];
    for (metrics, expected) in cases {
        let item = content(1, Platform::X, metrics);
        assert_eq!(PotentialScorer::engagement_rate(&item).unwrap(), expected);
    }
}

#[test]
fn engagement_rate_with_views_uses_ratio_bands() {
    // likes 25 / views 100 -> rate 0.25 -> 90
    let item = content(1, Platform::X, json!({ "views": 100, "likes": 25 }));
    assert_eq!(PotentialScorer::engagement_rate(&item).unwrap(), 90.0);

    // weighted: 4 likes + 2 comments*2 = 8 / 100 -> 0.08 -> 60
    let item = content(1, Platform::X, json!({ "views": 100, "likes": 4, "comments": 2 }));
    assert_eq!(PotentialScorer::engagement_rate(&item).unwrap(), 60.0);

    // 1 like / 1000 views -> 0.001 -> 40
    let item = content(1, Platform::X, json!({ "views": 1000, "likes": 1 }));
    assert_eq!(PotentialScorer::engagement_rate(&item).unwrap(), 40.0);
}

// --- growth_trend -----------------------------------------------------------

#[test]
fn growth_trend_bands_by_velocity() {
    let now = Utc::now();
    let scorer = PotentialScorer::new(now, ScoringSnapshot::new());

    // 300 interactions over 2 hours -> 150/h -> 90.
    let mut item = content(1, Platform::X, json!({ "likes": 300 }));
    item.published_at = Some(now - Duration::hours(2));
    assert_eq!(scorer.growth_trend(&item).unwrap(), 90.0);

    // 30 interactions over 10 hours -> 3/h -> 40.
    let mut slow = content(2, Platform::X, json!({ "likes": 30 }));
    slow.published_at = Some(now - Duration::hours(10));
    assert_eq!(scorer.growth_trend(&slow).unwrap(), 40.0);
}

#[test]
fn growth_trend_clamps_age_to_one_hour_minimum() {
    let now = Utc::now();
    let scorer = PotentialScorer::new(now, ScoringSnapshot::new());

    // Published 5 minutes ago: velocity uses 1 hour, not 1/12th.
    let mut item = content(1, Platform::X, json!({ "likes": 60 }));
    item.published_at = Some(now - Duration::minutes(5));
    assert_eq!(scorer.growth_trend(&item).unwrap(), 80.0);
}

#[test]
fn growth_trend_neutral_for_undated_content() {
    let scorer = scorer_with(ScoringSnapshot::new());
    let mut item = content(1, Platform::X, json!({ "likes": 500 }));
    item.published_at = None;
    assert_eq!(scorer.growth_trend(&item).unwrap(), 50.0);
}

// --- scarcity ---------------------------------------------------------------

#[test]
fn first_of_the_day_scores_seventy() {
    let mut snapshot = ScoringSnapshot::new();
    let item = content(1, Platform::Reddit, json!({}));
    snapshot.add_daily_created(Platform::Reddit, item.created_at);

    let scorer = scorer_with(snapshot);
    assert_eq!(scorer.scarcity(&item), 70.0);
}

#[test]
fn later_items_score_lower() {
    let mut snapshot = ScoringSnapshot::new();
    let base = Utc::now();
    for offset in 0..4 {
        snapshot.add_daily_created(Platform::Reddit, base + Duration::minutes(offset));
    }

    // Fourth of four: 3 predecessors of 4 -> 40 + 0.25*40 = 50.
    let mut item = content(4, Platform::Reddit, json!({}));
    item.created_at = base + Duration::minutes(3);

    let scorer = scorer_with(snapshot);
    assert_eq!(scorer.scarcity(&item), 50.0);
}

#[test]
fn scarcity_stays_within_band() {
    let mut snapshot = ScoringSnapshot::new();
    let base = Utc::now();
    for offset in 0..10 {
        snapshot.add_daily_created(Platform::X, base + Duration::minutes(offset));
    }
    let scorer = scorer_with(snapshot);

    for offset in 0..10 {
        let mut item = content(offset, Platform::X, json!({}));
        item.created_at = base + Duration::minutes(offset);
        let s = scorer.scarcity(&item);
        assert!((40.0..=80.0).contains(&s), "scarcity out of band: {s}");
    }
}

// --- calculate --------------------------------------------------------------

#[test]
fn calculate_combines_weighted_components() {
    let now = Utc::now();
    let mut snapshot = ScoringSnapshot::new();
    snapshot.add_author_score(Platform::X, "a1", 99, 65.0);
    snapshot.add_daily_created(Platform::X, now);

    let mut item = content(1, Platform::X, json!({ "views": 100, "likes": 25 }));
    item.author_id = Some("a1".to_string());
    item.body = "z".repeat(300);
    item.published_at = Some(now - Duration::hours(2));
    item.created_at = now;

    let mut scorer = PotentialScorer::new(now, snapshot);
    let result = scorer.calculate(&item);
    assert!(result.success);

    // quality 70 *.30 + author 65 *.20 + rate 90 *.25 + trend 60 *.15 + scarcity 70 *.10
    let expected = 70.0 * 0.30 + 65.0 * 0.20 + 90.0 * 0.25 + 60.0 * 0.15 + 70.0 * 0.10;
    assert!((result.score - expected).abs() < 0.01, "got {}", result.score);

    for key in [
        "content_quality",
        "author_weight",
        "engagement_rate",
        "growth_trend",
        "scarcity",
    ] {
        assert!(result.factors.contains_key(key), "missing factor {key}");
    }
}

#[test]
fn calculate_stays_in_range_for_extreme_inputs() {
    let now = Utc::now();
    let mut item = content(
        1,
        Platform::Xiaohongshu,
        json!({ "views": 1, "likes": 9_999_999 }),
    );
    item.body = "w".repeat(1500);
    item.title = Some("maximum possible quality item".to_string());
    item.media_urls = vec!["m".to_string()];
    item.published_at = Some(now);

    let mut scorer = PotentialScorer::new(now, ScoringSnapshot::new());
    let result = scorer.calculate(&item);
    assert!(result.success);
    assert!((0.0..=100.0).contains(&result.score));
}

#[test]
fn calculate_fails_per_item_on_malformed_metrics() {
    let item = content(1, Platform::X, json!({ "views": -5 }));
    let mut scorer = scorer_with(ScoringSnapshot::new());
    let result = scorer.calculate(&item);
    assert!(!result.success);
    assert_eq!(result.score, 0.0);
    assert!(result.factors.contains_key("error"));
}
