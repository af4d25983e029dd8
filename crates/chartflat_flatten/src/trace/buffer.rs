//! Ring buffer for trace records.

use std::collections::VecDeque;

use super::record::{Stage, TraceEvent, TraceRecord};

/// A bounded buffer of trace records, discarding the oldest when full.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    records: VecDeque<TraceRecord>,
    max_size: usize,
    next_id: u64,
}

impl TraceBuffer {
    /// Creates a buffer holding at most `max_size` records.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
        }
    }

    /// Pushes an event and returns its record id.
    pub fn push(&mut self, stage: Option<Stage>, event: TraceEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.records.push_back(TraceRecord::new(id, stage, event));
        while self.records.len() > self.max_size {
            self.records.pop_front();
        }
        id
    }

    /// Returns the number of buffered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears the buffer. Ids keep increasing.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Iterates over records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// Returns the records recorded during `stage`.
    #[must_use]
    pub fn for_stage(&self, stage: Stage) -> Vec<&TraceRecord> {
        self.records
            .iter()
            .filter(|r| r.stage == Some(stage))
            .collect()
    }

    /// Returns the most recent `n` records, oldest first.
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<&TraceRecord> {
        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip).collect()
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new(10_000)
    }
}
