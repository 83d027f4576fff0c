// botsentry/src/events.rs
//
// Domain types flowing through the detection pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Log records ───────────────────────────────────────────────────────────────

/// Raw shape of one log line before validation. Every field is optional at
/// this stage so a missing field becomes a counted skip, not a decode error.
/// Fields beyond these three are ignored (passed through opaquely).
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    pub user: Option<String>,
    pub action: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
}

/// One timestamped action by one user. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionEvent {
    pub user: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

// ── Detection types ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerKind {
    Volume,     // action count inside a sliding window
    Repetition, // longest identical-action run inside a window
}

impl std::fmt::Display for WorkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Volume => write!(f, "volume"),
            Self::Repetition => write!(f, "repetition"),
        }
    }
}

/// Result of one window-analysis worker over one user's timeline. The
/// timeline itself carries the user.
#[derive(Debug, Clone)]
pub struct DetectionSignal {
    pub worker: WorkerKind,
    /// Volume: max events in any window. Repetition: longest run length.
    pub value: usize,
    /// Repetition only: the action value of the winning run.
    pub action: Option<String>,
}

/// Combined per-user window statistics, fused from the worker signals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WindowStats {
    pub max_occurrence_count: usize,
    pub max_repeated_run: usize,
    pub repeated_action: Option<String>,
}

/// A user the classifier flagged, with the evidence that triggered it.
#[derive(Debug, Clone, Serialize)]
pub struct BotFinding {
    pub user: String,
    pub stats: WindowStats,
    pub evidence: Vec<String>,
}
