//! Offset checkpoint tracking for at-least-once delivery.
//!
//! The relay never persists its own position: the broker's consumer-group
//! offsets are the checkpoint. This module tracks the highest offset per
//! partition whose record has been confirmed delivered to the sink, so the
//! relay commits only positions that are safe — a restart re-reads from the
//! last commit and can duplicate, but never lose, records.
//!
//! # Example
//!
//! ```rust
//! use topic_relay::checkpoint::OffsetTracker;
//!
//! let mut tracker = OffsetTracker::new("test-input".to_string());
//!
//! // Records confirmed delivered to the sink
//! tracker.mark_delivered(0, 41);
//! tracker.mark_delivered(0, 42);
//! tracker.mark_delivered(1, 7);
//!
//! // Commit positions are next-offset semantics: delivered + 1
//! let positions = tracker.committable();
//! assert_eq!(positions, vec![(0, 43), (1, 8)]);
//! ```

use chrono::{DateTime, Utc};
use rdkafka::topic_partition_list::{Offset, TopicPartitionList};
use std::collections::HashMap;
use tracing::debug;

use crate::{Error, Result};

/// Tracks delivered offsets per partition between commits.
///
/// Each partition owns an independent cursor; there is no ordering
/// relationship across partitions. Offsets within a partition are assumed to
/// arrive in order (the consumer delivers them that way), so the tracker
/// keeps a simple high-water mark.
pub struct OffsetTracker {
    topic: String,
    delivered: HashMap<i32, i64>,
    dirty: bool,
    total_delivered: u64,
    last_commit_at: Option<DateTime<Utc>>,
}

impl OffsetTracker {
    pub fn new(topic: String) -> Self {
        Self {
            topic,
            delivered: HashMap::new(),
            dirty: false,
            total_delivered: 0,
            last_commit_at: None,
        }
    }

    /// Records that the sink confirmed delivery of `offset` on `partition`.
    pub fn mark_delivered(&mut self, partition: i32, offset: i64) {
        let entry = self.delivered.entry(partition).or_insert(offset);
        if offset >= *entry {
            *entry = offset;
        }
        self.dirty = true;
        self.total_delivered += 1;
    }

    /// Whether any delivery has been recorded since the last commit.
    pub fn has_uncommitted(&self) -> bool {
        self.dirty
    }

    /// Total records confirmed delivered since startup.
    pub fn total_delivered(&self) -> u64 {
        self.total_delivered
    }

    /// When the last commit list was produced, if any.
    pub fn last_commit_at(&self) -> Option<DateTime<Utc>> {
        self.last_commit_at
    }

    /// Commit positions as `(partition, next_offset)` pairs, sorted by
    /// partition. Next-offset semantics: committing offset `n` means the
    /// consumer group resumes at `n`, so the position is delivered + 1.
    pub fn committable(&self) -> Vec<(i32, i64)> {
        let mut positions: Vec<(i32, i64)> = self
            .delivered
            .iter()
            .map(|(&partition, &offset)| (partition, offset + 1))
            .collect();
        positions.sort_unstable();
        positions
    }

    /// Builds the commit list for the consumer, or `None` when nothing new
    /// has been delivered since the last commit.
    pub fn commit_list(&mut self) -> Result<Option<TopicPartitionList>> {
        if !self.dirty {
            debug!("No delivered offsets since last commit");
            return Ok(None);
        }

        let mut list = TopicPartitionList::new();
        for (partition, next_offset) in self.committable() {
            list.add_partition_offset(&self.topic, partition, Offset::Offset(next_offset))
                .map_err(Error::Kafka)?;
        }

        self.dirty = false;
        self.last_commit_at = Some(Utc::now());
        Ok(Some(list))
    }
}
