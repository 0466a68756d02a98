//! Demonstration of the Triggerscope scoring pipeline.
//!
//! This example shows how to:
//! 1. Build trigger records
//! 2. Compute a score snapshot at a fixed evaluation instant
//! 3. Inspect the volatility trend
//! 4. Render a markdown report
//!
//! Run with: cargo run --example score_demo

use chrono::{Duration, Utc};
use triggerscope::{
    build_report, build_snapshot, EmotionCategory, Trigger, SCORING_METHODOLOGY,
};

fn main() {
    println!("Triggerscope - Scoring Demo");
    println!("===========================");
    println!();

    // Display the methodology disclosure
    println!("{SCORING_METHODOLOGY}");
    println!();

    // Fix the evaluation instant so the run is reproducible
    let now = Utc::now();

    // A rough week followed by a calmer one
    let triggers = vec![
        Trigger::new("deadline moved up", EmotionCategory::Anxiety, 8, now - Duration::days(10))
            .with_recovery(90),
        Trigger::new("argument with landlord", EmotionCategory::Anger, 9, now - Duration::days(9))
            .with_recovery(120),
        Trigger::new("missed the gym again", EmotionCategory::Shame, 5, now - Duration::days(8)),
        Trigger::new("long walk by the river", EmotionCategory::Calm, 2, now - Duration::days(3))
            .with_recovery(10),
        Trigger::new("good news from a friend", EmotionCategory::Joy, 3, now - Duration::days(1)),
    ];

    println!("Scoring {} triggers over a 14-day period...", triggers.len());
    println!();

    let snapshot = build_snapshot(&triggers, 14, now);

    println!("Scores:");
    println!("  Stability:  {:.2}", snapshot.stability_score);
    println!("  Reactivity: {:.2}", snapshot.reactivity_index);
    println!("  Density:    {:.2}", snapshot.trigger_density_score);
    println!("  Recovery:   {:.2}", snapshot.recovery_speed_score);
    println!("  Composite:  {:.2}", snapshot.composite_score);
    println!();
    println!(
        "Trend: {} (recent avg {:.2} vs prior {:.2})",
        snapshot.volatility.trend, snapshot.volatility.recent_avg, snapshot.volatility.prior_avg
    );
    if let Some(dominant) = snapshot.dominant_emotion {
        println!("Dominant emotion: {dominant}");
    }
    println!();

    println!("Markdown report:");
    println!("----------------");
    println!("{}", build_report(&triggers, 14, now, chrono_tz::UTC));
}
