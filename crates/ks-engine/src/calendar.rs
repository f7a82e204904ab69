//! `Calendar`: the scheduler's future event list.
//!
//! Maps virtual instants to the processes that must resume at that instant.
//! Within one instant processes resume in the order they were pushed, so a
//! process spawned (or woken by a pool release) at `now` runs after every
//! process already queued for `now`.
//!
//! `BTreeMap` gives O(log W) insert and pop where W is the number of distinct
//! wake instants currently enqueued.  With millisecond time and a handful of
//! long-lived loops polling at the same interval, W stays small.

use std::collections::{BTreeMap, VecDeque};

use ks_core::{ProcessId, SimTime};

#[derive(Default, Debug)]
pub struct Calendar {
    inner: BTreeMap<SimTime, VecDeque<ProcessId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `process` to resume at `at`, after anything already queued
    /// for that instant.
    pub fn push(&mut self, at: SimTime, process: ProcessId) {
        self.inner.entry(at).or_default().push_back(process);
        self.total += 1;
    }

    /// Remove and return the earliest entry.
    pub fn pop_next(&mut self) -> Option<(SimTime, ProcessId)> {
        let mut first = self.inner.first_entry()?;
        let at = *first.key();
        let process = first.get_mut().pop_front();
        if first.get().is_empty() {
            first.remove();
        }
        let process = process?;
        self.total -= 1;
        Some((at, process))
    }

    /// The earliest instant with at least one queued process.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Total number of queued (instant, process) entries.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
