//! The compaction plan payload produced by the (out of scope) trigger/planner.

use crate::ids::{ChannelName, SegmentId};
use crate::timestamp::LogicalTimestamp;
use serde::{Deserialize, Serialize};

/// The kind of compaction a plan performs.
///
/// `Unknown` models types outside `{Merge, Mix}` that the completion handler
/// rejects — a forward-compatibility extension point rather than a real
/// compaction strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompactionType {
    Merge,
    Mix,
    Unknown(String),
}

impl CompactionType {
    /// Types the completion handler knows how to commit. Anything else is
    /// rejected as "unknown compaction type" at dispatch time.
    pub fn is_supported(&self) -> bool {
        matches!(self, CompactionType::Merge | CompactionType::Mix)
    }
}

/// One segment's binlog paths, referenced by a compaction plan.
///
/// The paths are cleared (replaced with empty vectors) by the completion
/// handler once a task reaches `Completed`, to free memory held by a task
/// the janitor may not evict for up to `timeout_seconds + 3600s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentBinlogs {
    pub segment_id: SegmentId,
    pub insert_binlogs: Vec<String>,
    pub delta_binlogs: Vec<String>,
    pub field2_stats_binlogs: Vec<String>,
}

impl SegmentBinlogs {
    pub fn new(segment_id: SegmentId) -> Self {
        Self {
            segment_id,
            insert_binlogs: Vec::new(),
            delta_binlogs: Vec::new(),
            field2_stats_binlogs: Vec::new(),
        }
    }

    /// Drop binlog path lists, keeping only the segment identity.
    pub fn clear_paths(&mut self) {
        self.insert_binlogs.clear();
        self.delta_binlogs.clear();
        self.field2_stats_binlogs.clear();
    }
}

/// Immutable plan payload, save for `start_time` which the dispatcher fills
/// in once a start timestamp has been allocated (or the sentinel on
/// allocation failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionPlan {
    pub channel: ChannelName,
    pub segment_binlogs: Vec<SegmentBinlogs>,
    pub compaction_type: CompactionType,
    pub timeout_seconds: u32,
    pub start_time: LogicalTimestamp,
}

impl CompactionPlan {
    pub fn new(
        channel: impl Into<ChannelName>,
        segment_binlogs: Vec<SegmentBinlogs>,
        compaction_type: CompactionType,
        timeout_seconds: u32,
    ) -> Self {
        Self {
            channel: channel.into(),
            segment_binlogs,
            compaction_type,
            timeout_seconds,
            start_time: LogicalTimestamp::default(),
        }
    }

    pub fn segment_ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segment_binlogs.iter().map(|b| b.segment_id)
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
