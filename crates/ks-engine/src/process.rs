//! The `Process` trait, the unit of cooperative execution.

use ks_core::{PoolId, ProcessId, SimTime};

use crate::{EngineResult, ResourceToken};

/// Why a process handed control back to the scheduler.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Yield {
    /// Resume after this many virtual milliseconds.  `Delay(0)` yields to
    /// every other process queued for the current instant.
    Delay(u64),
    /// Resume once a unit of the pool is held; the token is then available
    /// through [`Context::take_grant`].  Does not suspend when a unit is free.
    Acquire(PoolId),
    /// The process has finished and is dropped.
    Done,
}

/// A long-lived or one-shot activity driven by the scheduler.
///
/// Processes are explicit state machines: each call to
/// [`resume`][Self::resume] runs from the last suspension point to the next
/// one and reports it as a [`Yield`].  While it runs the process has exclusive
/// access to the shared world `W`.
///
/// # Example
///
/// ```rust,ignore
/// struct Ticker { left: u32 }
///
/// impl Process<Counter> for Ticker {
///     fn name(&self) -> &'static str { "ticker" }
///
///     fn resume(&mut self, world: &mut Counter, _cx: &mut Context<Counter>) -> EngineResult<Yield> {
///         world.ticks += 1;
///         if self.left == 0 { return Ok(Yield::Done) }
///         self.left -= 1;
///         Ok(Yield::Delay(1_000))
///     }
/// }
/// ```
pub trait Process<W> {
    /// Short static name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Run until the next suspension point.
    fn resume(&mut self, world: &mut W, cx: &mut Context<W>) -> EngineResult<Yield>;
}

/// Per-step handle a process uses to talk to the scheduler.
///
/// Requests made through the context are buffered and applied by the
/// scheduler after `resume` returns, in the order they were made.
pub struct Context<W> {
    now:                 SimTime,
    pid:                 ProcessId,
    pub(crate) grant:    Option<ResourceToken>,
    pub(crate) spawned:  Vec<Box<dyn Process<W>>>,
    pub(crate) released: Vec<ResourceToken>,
}

impl<W> Context<W> {
    pub(crate) fn new(now: SimTime, pid: ProcessId, grant: Option<ResourceToken>) -> Self {
        Self {
            now,
            pid,
            grant,
            spawned:  Vec::new(),
            released: Vec::new(),
        }
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Id of the running process.
    #[inline]
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Schedule `process` to start at the current instant, after every
    /// process already queued for it.
    pub fn spawn<P>(&mut self, process: P)
    where
        P: Process<W> + 'static,
    {
        self.spawned.push(Box::new(process));
    }

    /// Take the unit granted by the last `Yield::Acquire`, if any.
    pub fn take_grant(&mut self) -> Option<ResourceToken> {
        self.grant.take()
    }

    /// Return a pool unit.  Ownership passes to the scheduler immediately.
    pub fn release(&mut self, token: ResourceToken) {
        self.released.push(token);
    }
}
