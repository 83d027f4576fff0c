pub mod repetition;
pub mod volume;

use crate::engine::classifier::DetectionConfig;
use crate::events::{WindowStats, WorkerKind};
use crate::state::timeline::UserTimeline;

/// Run both window-analysis workers over one timeline concurrently and fuse
/// their signals into the user's window statistics. Workers return None for
/// an empty timeline, in which case the user has no statistics at all.
pub async fn run_all(timeline: &UserTimeline, config: &DetectionConfig) -> Option<WindowStats> {
    let (vol, rep) = tokio::join!(
        volume::analyze(timeline, config),
        repetition::analyze(timeline, config),
    );

    let mut stats = WindowStats::default();
    for signal in [vol?, rep?] {
        match signal.worker {
            WorkerKind::Volume => stats.max_occurrence_count = signal.value,
            WorkerKind::Repetition => {
                stats.max_repeated_run = signal.value;
                stats.repeated_action = signal.action;
            }
        }
    }
    Some(stats)
}
