//! End-to-end tests for the scoring engine and its file-backed edges.

use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;
use triggerscope::{
    build_report, build_snapshot, cluster_by_emotion, composite_score, daily_rollups,
    density_score, detect_trend, load_triggers, reactivity_index, recovery_speed_score,
    stability_score, EmotionCategory, HistoryEntry, SnapshotHistory, SubScores, TrendDirection,
    Trigger,
};

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join("triggerscope-engine-test")
        .join(format!("{name}-{}", uuid::Uuid::new_v4()))
}

fn trigger(intensity: u8, category: EmotionCategory, at: DateTime<Utc>) -> Trigger {
    Trigger::new("test", category, intensity, at)
}

#[test]
fn test_empty_set_scores_and_composite() {
    let now = Utc::now();
    let snapshot = build_snapshot(&[], 14, now);

    assert_eq!(snapshot.stability_score, 100.0);
    assert_eq!(snapshot.reactivity_index, 100.0);
    assert_eq!(snapshot.trigger_density_score, 100.0);
    assert_eq!(snapshot.recovery_speed_score, 50.0);
    assert_eq!(snapshot.composite_score, 90.0);
}

#[test]
fn test_all_scores_bounded_for_arbitrary_valid_input() {
    let now = Utc::now();
    let categories = EmotionCategory::ALL;

    // A grinding fortnight: bursts of severe triggers, slow recoveries.
    let triggers: Vec<Trigger> = (0..60)
        .map(|i| {
            let t = trigger(
                (i % 10 + 1) as u8,
                categories[i % categories.len()],
                now - Duration::minutes(i as i64 * 173),
            );
            if i % 4 == 0 {
                t.with_recovery((i * 7) as u32)
            } else {
                t
            }
        })
        .collect();

    let snapshot = build_snapshot(&triggers, 14, now);
    for score in [
        snapshot.stability_score,
        snapshot.reactivity_index,
        snapshot.trigger_density_score,
        snapshot.recovery_speed_score,
        snapshot.composite_score,
    ] {
        assert!((0.0..=100.0).contains(&score), "score out of range: {score}");
    }
}

#[test]
fn test_stability_non_increasing_in_avg_intensity() {
    let now = Utc::now();
    let mut previous = f64::INFINITY;
    // Pairs a fixed distance apart keep the spread constant while the
    // average climbs; capping at 7 keeps the high ratio at zero.
    for base in 1..=5u8 {
        let triggers = vec![
            trigger(base, EmotionCategory::Other, now),
            trigger(base + 2, EmotionCategory::Other, now - Duration::hours(1)),
        ];
        let score = stability_score(&triggers);
        assert!(score <= previous, "score rose from {previous} to {score}");
        previous = score;
    }
}

#[test]
fn test_reactivity_lone_intensity_ten_scores_zero() {
    let now = Utc::now();
    assert_eq!(
        reactivity_index(&[trigger(10, EmotionCategory::Anger, now)]),
        0.0
    );
}

#[test]
fn test_density_five_per_day_floors_at_zero() {
    assert_eq!(density_score(5, 1), 0.0);
}

#[test]
fn test_recovery_extremes() {
    let now = Utc::now();
    let slow: Vec<Trigger> = (0..3)
        .map(|i| trigger(5, EmotionCategory::Fear, now - Duration::hours(i)).with_recovery(120))
        .collect();
    assert_eq!(recovery_speed_score(&slow), 0.0);

    let instant: Vec<Trigger> = (0..3)
        .map(|i| trigger(5, EmotionCategory::Fear, now - Duration::hours(i)).with_recovery(0))
        .collect();
    assert_eq!(recovery_speed_score(&instant), 100.0);
}

#[test]
fn test_composite_is_pure() {
    let scores = SubScores {
        stability: 61.18,
        reactivity: 44.44,
        density: 80.0,
        recovery: 12.5,
    };
    assert_eq!(composite_score(&scores), composite_score(&scores));
}

#[test]
fn test_recent_spike_classifies_as_declining() {
    let now = Utc::now();
    let triggers = vec![
        trigger(8, EmotionCategory::Anger, now - Duration::days(1)),
        trigger(8, EmotionCategory::Anger, now - Duration::days(3)),
    ];

    let result = detect_trend(&triggers, now);
    assert_eq!(result.trend, TrendDirection::Declining);
    assert_eq!(result.delta, 8.0);
}

#[test]
fn test_snapshot_idempotent_for_fixed_anchor() {
    let now: DateTime<Utc> = "2026-08-01T12:00:00Z".parse().unwrap();
    let triggers = vec![
        trigger(9, EmotionCategory::Anger, now - Duration::hours(3)).with_recovery(30),
        trigger(2, EmotionCategory::Calm, now - Duration::days(2)),
        trigger(6, EmotionCategory::Anxiety, now - Duration::days(9)),
    ];

    let first = build_snapshot(&triggers, 7, now);
    let second = build_snapshot(&triggers.clone(), 7, now);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_dominant_emotion_tie_follows_input_order() {
    let now = Utc::now();
    let triggers = vec![
        trigger(9, EmotionCategory::Anger, now),
        trigger(3, EmotionCategory::Calm, now - Duration::days(1)),
    ];

    let snapshot = build_snapshot(&triggers, 7, now);
    assert_eq!(snapshot.dominant_emotion, Some(EmotionCategory::Anger));
    assert_eq!(snapshot.trigger_count, 2);
    assert_eq!(snapshot.avg_intensity, 6.0);
}

#[test]
fn test_file_to_snapshot_pipeline() {
    let now: DateTime<Utc> = "2026-08-15T09:00:00Z".parse().unwrap();
    let path = temp_file("pipeline").with_extension("jsonl");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        concat!(
            "{\"title\": \"argument at work\", \"emotion_category\": \"anger\", ",
            "\"intensity\": 8, \"occurred_at\": \"2026-08-14T16:30:00Z\", ",
            "\"recovery_minutes\": 60}\n",
            "{\"title\": \"quiet morning\", \"emotion_category\": \"calm\", ",
            "\"intensity\": 1, \"occurred_at\": \"2026-08-15T07:00:00Z\"}\n",
        ),
    )
    .unwrap();

    let triggers = load_triggers(&path, now).unwrap();
    assert_eq!(triggers.len(), 2);

    let snapshot = build_snapshot(&triggers, 7, now);
    assert_eq!(snapshot.trigger_count, 2);
    assert_eq!(snapshot.avg_intensity, 4.5);
    // Only recorded recovery is 60 minutes: 100 - 50.
    assert_eq!(snapshot.recovery_speed_score, 50.0);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_history_records_survive_reload() {
    let now = Utc::now();
    let path = temp_file("history").with_extension("jsonl");
    let history = SnapshotHistory::new(&path);

    let triggers = vec![trigger(7, EmotionCategory::Overwhelm, now - Duration::hours(1))];
    let entry = HistoryEntry {
        recorded_at: now,
        period_days: 7,
        snapshot: build_snapshot(&triggers, 7, now),
    };
    history.append(&entry).unwrap();

    let reopened = SnapshotHistory::new(&path);
    let loaded = reopened.recent_months(6, now).unwrap();
    assert_eq!(loaded, vec![entry]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_report_reflects_snapshot_and_rollups() {
    let now: DateTime<Utc> = "2026-08-20T18:00:00Z".parse().unwrap();
    let triggers = vec![
        trigger(8, EmotionCategory::Frustration, now - Duration::days(1)),
        trigger(8, EmotionCategory::Frustration, now - Duration::days(2)),
        trigger(3, EmotionCategory::Joy, now - Duration::days(2)),
    ];

    let report = build_report(&triggers, 7, now, chrono_tz::UTC);
    assert!(report.contains("Covering the 7 days"));
    assert!(report.contains("- frustration: 2 triggers"));
    assert!(report.contains("Trend: declining"));

    let rollups = daily_rollups(&triggers, chrono_tz::UTC);
    assert_eq!(rollups.len(), 2);
    for rollup in rollups {
        assert!(report.contains(&rollup.date.to_string()));
    }
}

#[test]
fn test_clusters_agree_with_tallies() {
    let now = Utc::now();
    let triggers = vec![
        trigger(6, EmotionCategory::Shame, now - Duration::hours(1)),
        trigger(4, EmotionCategory::Shame, now - Duration::hours(5)),
        trigger(9, EmotionCategory::Anger, now - Duration::hours(9)),
    ];

    let clusters = cluster_by_emotion(&triggers, now).unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].centroid_emotion, EmotionCategory::Shame);
    assert_eq!(clusters[0].frequency, 2);
    assert_eq!(clusters[0].avg_intensity, 5.0);
    assert_eq!(clusters[1].name, "ANGER Cluster");
}
