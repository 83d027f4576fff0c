// botsentry/src/parser.rs
//
// One raw line → one ActionEvent. A malformed line never aborts the run: it
// is skipped under a SkipReason and counted for diagnostics. Blank lines are
// the caller's concern (ignored silently, not counted).

use chrono::DateTime;

use crate::events::{ActionEvent, RawRecord};

/// Why a line was skipped instead of parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InvalidJson,
    MissingUser,
    MissingAction,
    BadTimestamp,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::MissingUser => write!(f, "missing_user"),
            Self::MissingAction => write!(f, "missing_action"),
            Self::BadTimestamp => write!(f, "bad_timestamp"),
        }
    }
}

/// Per-reason skip counters for one run. Surfaced alongside the result,
/// never instead of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    pub invalid_json: u64,
    pub missing_user: u64,
    pub missing_action: u64,
    pub bad_timestamp: u64,
}

impl ParseDiagnostics {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::InvalidJson => self.invalid_json += 1,
            SkipReason::MissingUser => self.missing_user += 1,
            SkipReason::MissingAction => self.missing_action += 1,
            SkipReason::BadTimestamp => self.bad_timestamp += 1,
        }
    }

    pub fn skipped(&self) -> u64 {
        self.invalid_json + self.missing_user + self.missing_action + self.bad_timestamp
    }
}

/// Parse and validate one non-blank line.
pub fn parse_line(line: &str) -> Result<ActionEvent, SkipReason> {
    let raw: RawRecord = serde_json::from_str(line).map_err(|_| SkipReason::InvalidJson)?;

    let user = match raw.user {
        Some(u) if !u.is_empty() => u,
        _ => return Err(SkipReason::MissingUser),
    };
    let action = match raw.action {
        Some(a) if !a.is_empty() => a,
        _ => return Err(SkipReason::MissingAction),
    };
    // Epoch ms, non-negative, and inside chrono's representable range.
    let timestamp = raw
        .timestamp
        .filter(|&ms| ms >= 0)
        .and_then(DateTime::from_timestamp_millis)
        .ok_or(SkipReason::BadTimestamp)?;

    Ok(ActionEvent {
        user,
        action,
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_record() {
        let ev = parse_line(r#"{"user":"alice","action":"login","timestamp":1700000000000}"#)
            .unwrap();
        assert_eq!(ev.user, "alice");
        assert_eq!(ev.action, "login");
        assert_eq!(ev.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn extra_fields_pass_through_opaquely() {
        let ev = parse_line(
            r#"{"user":"bob","action":"search","timestamp":42,"ip":"10.0.0.1","depth":3}"#,
        )
        .unwrap();
        assert_eq!(ev.user, "bob");
    }

    #[test]
    fn rejects_non_json() {
        assert_eq!(parse_line("not json at all"), Err(SkipReason::InvalidJson));
    }

    #[test]
    fn rejects_missing_or_empty_user() {
        assert_eq!(
            parse_line(r#"{"action":"login","timestamp":1}"#),
            Err(SkipReason::MissingUser)
        );
        assert_eq!(
            parse_line(r#"{"user":"","action":"login","timestamp":1}"#),
            Err(SkipReason::MissingUser)
        );
    }

    #[test]
    fn rejects_missing_or_empty_action() {
        assert_eq!(
            parse_line(r#"{"user":"alice","timestamp":1}"#),
            Err(SkipReason::MissingAction)
        );
        assert_eq!(
            parse_line(r#"{"user":"alice","action":"","timestamp":1}"#),
            Err(SkipReason::MissingAction)
        );
    }

    #[test]
    fn rejects_missing_or_negative_timestamp() {
        assert_eq!(
            parse_line(r#"{"user":"alice","action":"login"}"#),
            Err(SkipReason::BadTimestamp)
        );
        assert_eq!(
            parse_line(r#"{"user":"alice","action":"login","timestamp":-5}"#),
            Err(SkipReason::BadTimestamp)
        );
    }

    #[test]
    fn zero_timestamp_is_valid() {
        let ev = parse_line(r#"{"user":"alice","action":"login","timestamp":0}"#).unwrap();
        assert_eq!(ev.timestamp.timestamp_millis(), 0);
    }

    #[test]
    fn diagnostics_count_per_reason() {
        let mut d = ParseDiagnostics::default();
        d.record(SkipReason::InvalidJson);
        d.record(SkipReason::InvalidJson);
        d.record(SkipReason::MissingUser);
        assert_eq!(d.invalid_json, 2);
        assert_eq!(d.missing_user, 1);
        assert_eq!(d.skipped(), 3);
    }
}
