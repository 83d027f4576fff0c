// botsentry/src/engine/classifier.rs
//
// Threshold classifier. Two independent triggers — either alone flags the
// user:
//   volume     — strictly more than max_occurrences actions inside one window
//   repetition — a run of at least min_repeated_actions identical actions
//                inside one window

use serde::{Deserialize, Serialize};

use crate::error::DetectError;
use crate::events::{BotFinding, WindowStats};

/// Runtime detection thresholds — injected per run, never hardcoded, so
/// sensitivity is tunable without redeploying the detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Sliding-window length in minutes. Must be at least 1.
    pub duration_minutes: u32,
    /// Actions tolerated inside one window; the trigger is strictly more.
    pub max_occurrences: u32,
    /// Identical-action run length that triggers on its own. Must be at
    /// least 1.
    pub min_repeated_actions: u32,
}

impl DetectionConfig {
    pub fn validate(&self) -> Result<(), DetectError> {
        if self.duration_minutes == 0 {
            return Err(DetectError::Config(
                "duration-minutes must be at least 1".to_string(),
            ));
        }
        if self.min_repeated_actions == 0 {
            return Err(DetectError::Config(
                "min-repeated-actions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Window length in milliseconds, the unit event timestamps carry.
    pub fn duration_millis(&self) -> i64 {
        i64::from(self.duration_minutes) * 60_000
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            duration_minutes: 4,
            max_occurrences: 10,
            min_repeated_actions: 5,
        }
    }
}

/// Apply the thresholds to one user's window statistics. Returns None for a
/// user under both thresholds.
pub fn classify(user: &str, stats: &WindowStats, config: &DetectionConfig) -> Option<BotFinding> {
    let mut evidence = Vec::new();
    let window_secs = config.duration_millis() / 1000;

    if stats.max_occurrence_count > config.max_occurrences as usize {
        evidence.push(format!(
            "volume:{}_actions_in_{}s_limit_{}",
            stats.max_occurrence_count, window_secs, config.max_occurrences
        ));
    }
    if stats.max_repeated_run >= config.min_repeated_actions as usize {
        let action = stats.repeated_action.as_deref().unwrap_or("?");
        evidence.push(format!(
            "repetition:{}_x{}_in_{}s",
            action, stats.max_repeated_run, window_secs
        ));
    }

    if evidence.is_empty() {
        return None;
    }

    Some(BotFinding {
        user: user.to_string(),
        stats: stats.clone(),
        evidence,
    })
}
