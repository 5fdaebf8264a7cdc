//! Runner loops: drive one call shape `n` times with fresh random arguments.
//!
//! Runners do not time themselves; the harness measures them from outside.

use crate::workload::Lookup;
use crate::wrappers::{frequently_called_function, Caller, Coroutine};
use anyhow::Result;
use bench_core::constants::ARG_INT_MAX;
use bench_core::types::BenchContext;
use rand::rngs::StdRng;
use rand::Rng;

/// One call shape bound to a context and a lookup pattern.
pub trait Runner {
    /// Label printed in the report.
    fn label(&self) -> &'static str;

    fn lookup(&self) -> Lookup;

    /// Perform `n` invocations of the wrapped call shape.
    fn run(&self, n: u64, rng: &mut StdRng) -> Result<()>;
}

/// Draws one `(p1, p2)` pair: a uniform real in `[0, 1)` and an integer in
/// `[0, ARG_INT_MAX]`.
#[inline(always)]
pub fn next_args(rng: &mut StdRng) -> (f64, i64) {
    (rng.gen::<f64>(), rng.gen_range(0..=ARG_INT_MAX))
}

pub struct FunctionRunner<'a> {
    ctx: &'a BenchContext,
    lookup: Lookup,
}

impl<'a> FunctionRunner<'a> {
    pub fn new(ctx: &'a BenchContext, lookup: Lookup) -> Self {
        Self { ctx, lookup }
    }
}

impl Runner for FunctionRunner<'_> {
    fn label(&self) -> &'static str {
        "function call"
    }

    fn lookup(&self) -> Lookup {
        self.lookup
    }

    fn run(&self, n: u64, rng: &mut StdRng) -> Result<()> {
        for _ in 0..n {
            let (x, y) = next_args(rng);
            frequently_called_function(self.ctx, self.lookup, x, y);
        }
        Ok(())
    }
}

pub struct MethodRunner<'a> {
    ctx: &'a BenchContext,
    lookup: Lookup,
}

impl<'a> MethodRunner<'a> {
    pub fn new(ctx: &'a BenchContext, lookup: Lookup) -> Self {
        Self { ctx, lookup }
    }
}

impl Runner for MethodRunner<'_> {
    fn label(&self) -> &'static str {
        "method call"
    }

    fn lookup(&self) -> Lookup {
        self.lookup
    }

    fn run(&self, n: u64, rng: &mut StdRng) -> Result<()> {
        let obj = Caller::new(self.ctx, self.lookup);
        for _ in 0..n {
            let (x, y) = next_args(rng);
            obj.call(x, y);
        }
        Ok(())
    }
}

pub struct CoroutineRunner<'a> {
    ctx: &'a BenchContext,
    lookup: Lookup,
}

impl<'a> CoroutineRunner<'a> {
    pub fn new(ctx: &'a BenchContext, lookup: Lookup) -> Self {
        Self { ctx, lookup }
    }
}

impl Runner for CoroutineRunner<'_> {
    fn label(&self) -> &'static str {
        "coroutine.send"
    }

    fn lookup(&self) -> Lookup {
        self.lookup
    }

    fn run(&self, n: u64, rng: &mut StdRng) -> Result<()> {
        let mut co = Coroutine::new(self.lookup);
        co.prime(self.ctx)?;
        for _ in 0..n {
            let (x, y) = next_args(rng);
            co.send(x, y)?;
        }
        debug_assert_eq!(co.resumptions(), n);
        Ok(())
    }
}

/// All runners for one lookup pattern, in report order.
pub fn runners_for(ctx: &BenchContext, lookup: Lookup) -> Vec<Box<dyn Runner + '_>> {
    vec![
        Box::new(FunctionRunner::new(ctx, lookup)),
        Box::new(CoroutineRunner::new(ctx, lookup)),
        Box::new(MethodRunner::new(ctx, lookup)),
    ]
}
