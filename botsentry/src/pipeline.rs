// botsentry/src/pipeline.rs
//
// Batch detection pipeline: load → parse → aggregate sequentially, then fan
// out one analysis task per user and fan in before classification. The
// report is returned only after every stage has completed — no caller ever
// holds a result a background task is still filling.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::engine::classifier::{self, DetectionConfig};
use crate::engine::report::DetectionReport;
use crate::error::DetectError;
use crate::events::BotFinding;
use crate::loader::LogLoader;
use crate::parser::{self, ParseDiagnostics};
use crate::state::timeline::TimelineStore;
use crate::workers;

/// Run one full detection batch over the log at `path`.
pub async fn detect(path: &Path, config: &DetectionConfig) -> Result<DetectionReport, DetectError> {
    config.validate()?;

    // ── Load + parse + aggregate ──────────────────────────────────────────────
    let mut loader = LogLoader::open(path).await?;
    let store = TimelineStore::new();
    let mut diagnostics = ParseDiagnostics::default();

    while let Some(line) = loader.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue; // blank lines: ignored, not counted
        }
        match parser::parse_line(line) {
            Ok(event) => store.ingest(event),
            Err(reason) => {
                diagnostics.record(reason);
                warn!("skipping malformed line: {}", reason);
            }
        }
    }

    let n_events = store.n_events();
    let n_users = store.n_users();
    info!("aggregated {} events across {} users", n_events, n_users);

    // ── Analyze — one task per user, each owning its timeline ─────────────────
    let mut handles = Vec::with_capacity(n_users);
    for timeline in store.drain() {
        let config = config.clone();
        handles.push(tokio::spawn(async move {
            debug!(
                "analyzing {}: {} events spanning {}ms",
                timeline.user,
                timeline.len(),
                (timeline.last_seen - timeline.first_seen).num_milliseconds()
            );
            let stats = workers::run_all(&timeline, &config).await;
            (timeline.user, stats)
        }));
    }

    // ── Fan in, classify, assemble ────────────────────────────────────────────
    let mut findings: Vec<BotFinding> = Vec::new();
    for handle in handles {
        let (user, stats) = handle
            .await
            .map_err(|e| DetectError::Worker(e.to_string()))?;
        let Some(stats) = stats else { continue };
        if let Some(finding) = classifier::classify(&user, &stats, config) {
            debug!("flagged {}: {}", finding.user, finding.evidence.join(" | "));
            findings.push(finding);
        }
    }

    Ok(DetectionReport::new(findings, n_events, n_users, diagnostics))
}
