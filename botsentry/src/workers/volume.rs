// botsentry/src/workers/volume.rs
//
// Volume worker — maximum number of one user's actions inside any sliding
// window of the configured duration. Two-pointer scan, O(n log n) per user
// (the sort dominates; the scan itself is linear).
//
// A window anchored at event i covers [t_i − duration, t_i], closed on both
// ends: an event exactly duration away still counts.

use crate::engine::classifier::DetectionConfig;
use crate::events::{DetectionSignal, WorkerKind};
use crate::state::timeline::UserTimeline;

pub async fn analyze(timeline: &UserTimeline, config: &DetectionConfig) -> Option<DetectionSignal> {
    if timeline.is_empty() {
        return None;
    }

    // Input order is assumed chronological; sorting guards the scan against
    // a mildly disordered log.
    let mut ts: Vec<i64> = timeline
        .events
        .iter()
        .map(|e| e.timestamp.timestamp_millis())
        .collect();
    ts.sort_unstable();

    let window = config.duration_millis();
    let mut best = 0usize;
    let mut start = 0usize;
    for i in 0..ts.len() {
        while ts[i] - ts[start] > window {
            start += 1;
        }
        best = best.max(i - start + 1);
    }

    Some(DetectionSignal {
        worker: WorkerKind::Volume,
        value: best,
        action: None,
    })
}
