//! The three call shapes around the same workload.
//!
//! Every entry point is `#[inline(never)]` so the optimizer cannot fold the
//! call into the runner loop; the call is what is being measured.

use crate::workload::{execute, External, Lookup};
use anyhow::{bail, ensure, Result};
use bench_core::types::{BenchContext, SharedConstants};

/// Direct call: stateless, every external value the lookup needs is read
/// from the context on each call.
#[inline(never)]
pub fn frequently_called_function(ctx: &BenchContext, lookup: Lookup, p1: f64, p2: i64) {
    execute(lookup, p1, p2, ctx);
}

/// Method call target. Captures the scale as instance state at construction;
/// every call reads it back through `self`.
#[derive(Debug, Clone)]
pub struct Caller<'a> {
    scale: f64,
    holder: &'a SharedConstants,
    lookup: Lookup,
}

impl<'a> Caller<'a> {
    pub fn new(ctx: &'a BenchContext, lookup: Lookup) -> Self {
        Caller {
            scale: ctx.scale,
            holder: &ctx.holder,
            lookup,
        }
    }

    #[inline(never)]
    pub fn call(&self, p1: f64, p2: i64) {
        execute(self.lookup, p1, p2, self);
    }
}

impl External for Caller<'_> {
    #[inline(always)]
    fn scale(&self) -> f64 {
        self.scale
    }

    #[inline(always)]
    fn offset(&self) -> f64 {
        self.holder.offset()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoroutineState {
    /// Constructed; initialization has not run yet.
    Uninitialized,
    /// Initialization done, parked at the first receive point.
    Primed,
    /// Parked at the receive point after at least one resumption.
    Suspended,
    /// Inside the loop body. Only held for the duration of `send`, which
    /// borrows the coroutine mutably, so callers never observe it.
    Executing,
    /// Cleanup ran; no further resumption is possible.
    Closed,
}

/// Resumable worker: primed once, then resumed with one argument pair per
/// call. External values are looked up during priming and kept as locals, so
/// a resumption only pays for the control transfer and the workload.
///
/// ```text
/// Uninitialized --prime--> Primed --send--> Executing --> Suspended
///                                              ^              |
///                                              +----send------+
/// ```
#[derive(Debug, Clone)]
pub struct Coroutine {
    state: CoroutineState,
    lookup: Lookup,
    locals: Locals,
    resumptions: u64,
}

/// External values copied in while priming.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Locals {
    scale: f64,
    offset: f64,
}

impl External for Locals {
    #[inline(always)]
    fn scale(&self) -> f64 {
        self.scale
    }

    #[inline(always)]
    fn offset(&self) -> f64 {
        self.offset
    }
}

impl Coroutine {
    pub fn new(lookup: Lookup) -> Self {
        Coroutine {
            state: CoroutineState::Uninitialized,
            lookup,
            locals: Locals::default(),
            resumptions: 0,
        }
    }

    pub fn state(&self) -> CoroutineState {
        self.state
    }

    pub fn lookup(&self) -> Lookup {
        self.lookup
    }

    /// Number of completed resumptions since priming.
    pub fn resumptions(&self) -> u64 {
        self.resumptions
    }

    pub fn is_awaiting_input(&self) -> bool {
        matches!(self.state, CoroutineState::Primed | CoroutineState::Suspended)
    }

    /// Runs the initialization section and advances to the first receive
    /// point.
    pub fn prime(&mut self, ctx: &BenchContext) -> Result<()> {
        ensure!(
            self.state == CoroutineState::Uninitialized,
            "coroutine already started (state {:?})",
            self.state
        );
        self.locals = Locals {
            scale: ctx.scale,
            offset: ctx.holder.offset(),
        };
        self.state = CoroutineState::Primed;
        Ok(())
    }

    /// Delivers one argument pair, runs the loop body once and parks again.
    #[inline(never)]
    pub fn send(&mut self, p1: f64, p2: i64) -> Result<()> {
        match self.state {
            CoroutineState::Primed | CoroutineState::Suspended => {}
            CoroutineState::Uninitialized => {
                bail!("can't send non-None value to a just-started coroutine")
            }
            CoroutineState::Executing | CoroutineState::Closed => {
                bail!("coroutine is not awaiting input (state {:?})", self.state)
            }
        }

        self.state = CoroutineState::Executing;
        execute(self.lookup, p1, p2, &self.locals);
        self.resumptions += 1;
        self.state = CoroutineState::Suspended;
        Ok(())
    }

    /// Runs the cleanup section. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.state != CoroutineState::Closed {
            log::trace!(
                "closing {} coroutine after {} resumptions",
                self.lookup,
                self.resumptions
            );
            self.state = CoroutineState::Closed;
        }
    }
}
