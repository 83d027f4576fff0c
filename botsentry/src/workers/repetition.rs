// botsentry/src/workers/repetition.rs
//
// Repetition worker — longest chronologically consecutive run of identical
// actions whose span fits inside one window of the configured duration.
//
// The timeline is split into maximal same-action runs first; a second
// two-pointer pass inside each run finds the longest stretch spanning at
// most the window. Identical actions separated by a different action do not
// join into one run.

use crate::engine::classifier::DetectionConfig;
use crate::events::{DetectionSignal, WorkerKind};
use crate::state::timeline::UserTimeline;

/// Longest prefix-to-suffix stretch of one same-action run whose first and
/// last timestamps are at most `window` ms apart.
fn longest_within(run: &[(i64, &str)], window: i64) -> usize {
    let mut best = 0usize;
    let mut start = 0usize;
    for i in 0..run.len() {
        while run[i].0 - run[start].0 > window {
            start += 1;
        }
        best = best.max(i - start + 1);
    }
    best
}

pub async fn analyze(timeline: &UserTimeline, config: &DetectionConfig) -> Option<DetectionSignal> {
    if timeline.is_empty() {
        return None;
    }

    // Stable sort: events with equal timestamps keep their input order, so
    // runs are still "chronologically consecutive" after the guard sort.
    let mut seq: Vec<(i64, &str)> = timeline
        .events
        .iter()
        .map(|e| (e.timestamp.timestamp_millis(), e.action.as_str()))
        .collect();
    seq.sort_by_key(|&(ts, _)| ts);

    let window = config.duration_millis();
    let mut best_len = 0usize;
    let mut best_action: Option<&str> = None;

    let mut run_start = 0usize;
    for i in 1..=seq.len() {
        if i < seq.len() && seq[i].1 == seq[run_start].1 {
            continue;
        }
        let len = longest_within(&seq[run_start..i], window);
        if len > best_len {
            best_len = len;
            best_action = Some(seq[run_start].1);
        }
        run_start = i;
    }

    Some(DetectionSignal {
        worker: WorkerKind::Repetition,
        value: best_len,
        action: best_action.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::events::ActionEvent;

    fn timeline(user: &str, events: &[(&str, i64)]) -> UserTimeline {
        let mut t = UserTimeline::new(user, DateTime::from_timestamp_millis(events[0].1).unwrap());
        for &(action, ms) in events {
            t.push(ActionEvent {
                user: user.to_string(),
                action: action.to_string(),
                timestamp: DateTime::from_timestamp_millis(ms).unwrap(),
            });
        }
        t
    }

    fn config(duration_minutes: u32) -> DetectionConfig {
        DetectionConfig {
            duration_minutes,
            max_occurrences: 10,
            min_repeated_actions: 5,
        }
    }

    #[tokio::test]
    async fn single_event_is_a_run_of_one() {
        let sig = analyze(&timeline("u", &[("login", 0)]), &config(4))
            .await
            .unwrap();
        assert_eq!(sig.value, 1);
        assert_eq!(sig.action.as_deref(), Some("login"));
    }

    #[tokio::test]
    async fn run_inside_one_window_counts_fully() {
        // 5 logins 30 s apart — span 2 min, well inside a 4-minute window.
        let evs: Vec<(&str, i64)> = (0..5).map(|i| ("login", i * 30_000)).collect();
        let sig = analyze(&timeline("u", &evs), &config(4)).await.unwrap();
        assert_eq!(sig.value, 5);
        assert_eq!(sig.action.as_deref(), Some("login"));
    }

    #[tokio::test]
    async fn run_wider_than_the_window_is_clipped() {
        // 5 logins 90 s apart — first and last 6 min apart; at most 3 fit in
        // any 4-minute window.
        let evs: Vec<(&str, i64)> = (0..5).map(|i| ("login", i * 90_000)).collect();
        let sig = analyze(&timeline("u", &evs), &config(4)).await.unwrap();
        assert_eq!(sig.value, 3);
    }

    #[tokio::test]
    async fn different_action_breaks_the_run() {
        let sig = analyze(
            &timeline(
                "u",
                &[
                    ("login", 0),
                    ("login", 1_000),
                    ("logout", 2_000),
                    ("login", 3_000),
                    ("login", 4_000),
                    ("login", 5_000),
                ],
            ),
            &config(4),
        )
        .await
        .unwrap();
        assert_eq!(sig.value, 3);
        assert_eq!(sig.action.as_deref(), Some("login"));
    }

    #[tokio::test]
    async fn reports_the_winning_action_value() {
        let sig = analyze(
            &timeline(
                "u",
                &[
                    ("view", 0),
                    ("view", 1_000),
                    ("post", 2_000),
                    ("post", 3_000),
                    ("post", 4_000),
                ],
            ),
            &config(4),
        )
        .await
        .unwrap();
        assert_eq!(sig.value, 3);
        assert_eq!(sig.action.as_deref(), Some("post"));
    }

    #[tokio::test]
    async fn window_boundary_is_inclusive() {
        // Run spanning exactly one window fits whole.
        let evs = [("ping", 0), ("ping", 120_000), ("ping", 240_000)];
        let sig = analyze(&timeline("u", &evs), &config(4)).await.unwrap();
        assert_eq!(sig.value, 3);
    }
}
