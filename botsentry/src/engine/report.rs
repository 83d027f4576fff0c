// botsentry/src/engine/report.rs
//
// Final result assembly: the flagged usernames as a sorted, duplicate-free
// sequence, plus run diagnostics. Ordering is case-sensitive byte-wise
// lexicographic (plain `Ord` on `String`): "Zed" sorts before "alice".

use std::collections::BTreeMap;

use crate::events::BotFinding;
use crate::parser::ParseDiagnostics;

/// Outcome of one complete detection run. Constructed only after every
/// pipeline stage has finished — a caller never observes a report that a
/// background task is still populating.
#[derive(Debug)]
pub struct DetectionReport {
    /// username → finding. BTreeMap keeps ascending byte-wise order;
    /// duplicates are impossible (one timeline per user).
    findings: BTreeMap<String, BotFinding>,
    pub n_events: u64,
    pub n_users: usize,
    pub diagnostics: ParseDiagnostics,
}

impl DetectionReport {
    pub fn new(
        findings: impl IntoIterator<Item = BotFinding>,
        n_events: u64,
        n_users: usize,
        diagnostics: ParseDiagnostics,
    ) -> Self {
        Self {
            findings: findings
                .into_iter()
                .map(|f| (f.user.clone(), f))
                .collect(),
            n_events,
            n_users,
            diagnostics,
        }
    }

    /// Flagged usernames, strictly ascending, duplicate-free.
    pub fn bot_names(&self) -> Vec<String> {
        self.findings.keys().cloned().collect()
    }

    pub fn findings(&self) -> impl Iterator<Item = &BotFinding> {
        self.findings.values()
    }

    pub fn n_bots(&self) -> usize {
        self.findings.len()
    }

    /// The persisted result shape: a JSON array of flagged usernames.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.bot_names()).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.bot_names()).unwrap_or_default()
    }

    /// Compact per-run summary for the terminal.
    pub fn print_summary(&self) {
        println!("\n\x1b[1m── detection summary ──────────────────────────────\x1b[0m");
        println!("  events  : {}", self.n_events);
        println!("  users   : {}", self.n_users);
        println!("  bots    : {}", self.n_bots());
        println!("  skipped : {}", self.diagnostics.skipped());
        if self.diagnostics.skipped() > 0 {
            println!(
                "            \x1b[90minvalid_json={} missing_user={} missing_action={} bad_timestamp={}\x1b[0m",
                self.diagnostics.invalid_json,
                self.diagnostics.missing_user,
                self.diagnostics.missing_action,
                self.diagnostics.bad_timestamp
            );
        }
    }
}
