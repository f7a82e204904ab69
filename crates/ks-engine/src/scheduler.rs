//! The `Scheduler` and its run loop.

use std::collections::HashMap;

use ks_core::{PoolId, ProcessId, SimTime};

use crate::{Calendar, Context, EngineError, EngineResult, Pacing, Process, ResourcePool, ResourceToken, Yield};

/// Counters collected over one [`Scheduler::run_until_idle`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of `resume` calls.
    pub resumes:    u64,
    /// Processes spawned (including those spawned before the run).
    pub spawned:    u64,
    /// Processes that returned `Yield::Done`.
    pub finished:   u64,
    /// Processes still waiting on a pool when nothing else could run.
    pub blocked:    u64,
    /// Virtual time of the last resumed step.
    pub final_time: SimTime,
}

/// Cooperative scheduler over a shared world `W`.
///
/// Create pools with [`add_pool`][Self::add_pool], seed processes with
/// [`spawn`][Self::spawn], then drive everything with
/// [`run_until_idle`][Self::run_until_idle].
pub struct Scheduler<W> {
    now:       SimTime,
    calendar:  Calendar,
    /// Process slots indexed by `ProcessId`; `None` once finished or while
    /// the process is running.
    processes: Vec<Option<Box<dyn Process<W>>>>,
    pools:     Vec<ResourcePool>,
    /// Units granted to queued waiters, collected on their next resume.
    grants:    HashMap<ProcessId, ResourceToken>,
    pacing:    Option<Pacing>,
    stats:     RunStats,
}

impl<W> Default for Scheduler<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Scheduler<W> {
    pub fn new() -> Self {
        Self {
            now:       SimTime::ZERO,
            calendar:  Calendar::new(),
            processes: Vec::new(),
            pools:     Vec::new(),
            grants:    HashMap::new(),
            pacing:    None,
            stats:     RunStats::default(),
        }
    }

    /// Pace virtual time against the wall clock.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = Some(pacing);
        self
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Create a pool of `capacity` units.
    pub fn add_pool(&mut self, capacity: usize) -> EngineResult<PoolId> {
        let id = PoolId::try_from(self.pools.len()).map_err(|_| EngineError::IdsExhausted("pool"))?;
        self.pools.push(ResourcePool::new(id, capacity));
        Ok(id)
    }

    pub fn pool(&self, id: PoolId) -> EngineResult<&ResourcePool> {
        self.pools.get(id.index()).ok_or(EngineError::UnknownPool(id))
    }

    /// Schedule `process` to start at the current instant.
    pub fn spawn<P>(&mut self, process: P) -> EngineResult<ProcessId>
    where
        P: Process<W> + 'static,
    {
        self.spawn_boxed(Box::new(process))
    }

    fn spawn_boxed(&mut self, process: Box<dyn Process<W>>) -> EngineResult<ProcessId> {
        let pid = ProcessId::try_from(self.processes.len()).map_err(|_| EngineError::IdsExhausted("process"))?;
        log::debug!("{} spawn {} ({pid})", self.now, process.name());
        self.processes.push(Some(process));
        self.calendar.push(self.now, pid);
        self.stats.spawned += 1;
        Ok(pid)
    }

    /// Number of processes that have not finished yet.
    pub fn live_processes(&self) -> usize {
        self.processes.iter().filter(|p| p.is_some()).count()
    }

    /// Run every process until none can make progress.
    ///
    /// Returns when the calendar is empty.  Processes left waiting on a pool
    /// at that point can never be woken and are reported as `blocked`.
    pub fn run_until_idle(&mut self, world: &mut W) -> EngineResult<RunStats> {
        while let Some((at, pid)) = self.calendar.pop_next() {
            self.advance_to(at);
            self.step(pid, world)?;
        }

        let blocked: usize = self.pools.iter().map(ResourcePool::waiting).sum();
        if blocked > 0 {
            log::warn!("scheduler idle at {} with {blocked} process(es) waiting on a pool", self.now);
        }
        self.stats.blocked = blocked as u64;
        self.stats.final_time = self.now;
        Ok(self.stats)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn advance_to(&mut self, at: SimTime) {
        if at > self.now {
            if let Some(pacing) = self.pacing.as_mut() {
                pacing.wait_until(at);
            }
            self.now = at;
        }
    }

    /// Resume `pid` until it suspends, then apply its requests.
    fn step(&mut self, pid: ProcessId, world: &mut W) -> EngineResult<()> {
        let mut process = self
            .processes
            .get_mut(pid.index())
            .and_then(Option::take)
            .ok_or(EngineError::UnknownProcess(pid))?;

        loop {
            let mut cx = Context::new(self.now, pid, self.grants.remove(&pid));
            self.stats.resumes += 1;
            let outcome = process.resume(world, &mut cx);

            // An unclaimed grant stays with the process.
            if let Some(token) = cx.grant.take() {
                self.grants.insert(pid, token);
            }
            for child in cx.spawned.drain(..) {
                self.spawn_boxed(child)?;
            }
            for token in cx.released.drain(..) {
                self.release(token)?;
            }

            match outcome? {
                Yield::Delay(ms) => {
                    self.calendar.push(self.now.offset(ms), pid);
                    break;
                }
                Yield::Acquire(pool_id) => {
                    let pool = self
                        .pools
                        .get_mut(pool_id.index())
                        .ok_or(EngineError::UnknownPool(pool_id))?;
                    match pool.try_acquire() {
                        Some(token) => {
                            // Free unit: no suspension, keep running.
                            self.grants.insert(pid, token);
                        }
                        None => {
                            log::debug!("{} {} waits on {pool_id}", self.now, process.name());
                            pool.enqueue(pid);
                            break;
                        }
                    }
                }
                Yield::Done => {
                    log::debug!("{} {} done ({pid})", self.now, process.name());
                    self.stats.finished += 1;
                    return Ok(());
                }
            }
        }

        self.processes[pid.index()] = Some(process);
        Ok(())
    }

    fn release(&mut self, token: ResourceToken) -> EngineResult<()> {
        let pool = self
            .pools
            .get_mut(token.pool.index())
            .ok_or(EngineError::UnknownPool(token.pool))?;
        match pool.release(token) {
            Ok(Some((waiter, granted))) => {
                self.grants.insert(waiter, granted);
                self.calendar.push(self.now, waiter);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(token) => Err(EngineError::InvalidRelease(token)),
        }
    }
}
