//! Capacity-bounded resource pool with FIFO waiters.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use ks_core::{PoolId, ProcessId};

/// Proof of holding one unit of a pool.  Returned to the pool with
/// [`Context::release`][crate::Context::release].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ResourceToken {
    pub pool:   PoolId,
    pub serial: u64,
}

impl fmt::Display for ResourceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/token#{}", self.pool, self.serial)
    }
}

/// A pool of `capacity` interchangeable units.
///
/// Units are granted immediately while any are free; otherwise the requester
/// joins a FIFO queue.  A release hands the unit straight to the oldest
/// waiter, so a free unit never coexists with a waiting process.
#[derive(Debug)]
pub struct ResourcePool {
    id:          PoolId,
    capacity:    usize,
    held:        BTreeSet<u64>,
    waiters:     VecDeque<ProcessId>,
    next_serial: u64,
    peak_in_use: usize,
    grants:      u64,
}

impl ResourcePool {
    pub fn new(id: PoolId, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            held:        BTreeSet::new(),
            waiters:     VecDeque::new(),
            next_serial: 0,
            peak_in_use: 0,
            grants:      0,
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.held.len()
    }

    pub fn available(&self) -> usize {
        self.capacity - self.held.len()
    }

    /// Highest number of units held at once since the pool was created.
    pub fn peak_in_use(&self) -> usize {
        self.peak_in_use
    }

    /// Total units granted since the pool was created.
    pub fn grants(&self) -> u64 {
        self.grants
    }

    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }

    /// Grant a unit if one is free and nobody is queued ahead.
    pub fn try_acquire(&mut self) -> Option<ResourceToken> {
        if self.held.len() >= self.capacity || !self.waiters.is_empty() {
            return None;
        }
        Some(self.grant())
    }

    /// Queue `process` behind the current waiters.
    pub fn enqueue(&mut self, process: ProcessId) {
        self.waiters.push_back(process);
    }

    /// Return `token`'s unit.
    ///
    /// Returns `Ok(Some((waiter, token)))` when the unit passed directly to the
    /// oldest waiter, `Ok(None)` when it went back to the free set, and `Err`
    /// with the token if it was not held.
    pub fn release(
        &mut self,
        token: ResourceToken,
    ) -> Result<Option<(ProcessId, ResourceToken)>, ResourceToken> {
        if token.pool != self.id || !self.held.remove(&token.serial) {
            return Err(token);
        }
        Ok(self.waiters.pop_front().map(|waiter| (waiter, self.grant())))
    }

    fn grant(&mut self) -> ResourceToken {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.held.insert(serial);
        self.grants += 1;
        self.peak_in_use = self.peak_in_use.max(self.held.len());
        ResourceToken { pool: self.id, serial }
    }
}
