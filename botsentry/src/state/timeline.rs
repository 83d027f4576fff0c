// botsentry/src/state/timeline.rs
//
// Per-user timeline aggregation.
// DashMap = sharded concurrent HashMap — iteration order is undefined and
// consumers must not rely on one.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::events::ActionEvent;

/// Ordered sequence of one user's events, in input order (assumed
/// chronological). Append-only until the log is fully consumed, then moved
/// into exactly one analysis worker.
#[derive(Debug)]
pub struct UserTimeline {
    pub user: String,
    pub events: Vec<ActionEvent>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl UserTimeline {
    pub fn new(user: &str, now: DateTime<Utc>) -> Self {
        Self {
            user: user.to_string(),
            events: Vec::new(),
            first_seen: now,
            last_seen: now,
        }
    }

    pub fn push(&mut self, event: ActionEvent) {
        self.last_seen = event.timestamp;
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Per-run mapping from username to timeline. Built fresh for every
/// invocation and drained by the analyzer — never process-wide state, so
/// repeated runs cannot leak state into one another.
pub struct TimelineStore {
    timelines: DashMap<String, UserTimeline>,
    total_events: AtomicU64,
}

impl TimelineStore {
    pub fn new() -> Self {
        Self {
            timelines: DashMap::new(),
            total_events: AtomicU64::new(0),
        }
    }

    /// Append one event to its user's timeline, creating the timeline on
    /// first sighting of the user.
    pub fn ingest(&self, event: ActionEvent) {
        self.total_events.fetch_add(1, Ordering::Relaxed);
        self.timelines
            .entry(event.user.clone())
            .or_insert_with(|| UserTimeline::new(&event.user, event.timestamp))
            .push(event);
    }

    pub fn n_users(&self) -> usize {
        self.timelines.len()
    }

    pub fn n_events(&self) -> u64 {
        self.total_events.load(Ordering::Relaxed)
    }

    /// Hand every timeline to its analysis worker. Consumes the store: each
    /// timeline is owned by exactly one task afterwards, so analysis needs
    /// no locking.
    pub fn drain(self) -> Vec<UserTimeline> {
        self.timelines.into_iter().map(|(_, t)| t).collect()
    }
}

impl Default for TimelineStore {
    fn default() -> Self {
        Self::new()
    }
}
