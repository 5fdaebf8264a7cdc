//! The measured unit of computation and its external-reference variants.

use anyhow::{bail, Result};
use bench_core::types::BenchContext;
use std::fmt;
use std::hint::black_box;
use std::str::FromStr;

/// Which values the workload reaches for beyond its two arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// `x * y`, arguments only.
    Local,
    /// `x * y * scale`.
    Constant,
    /// `x * y * scale + holder.offset()`.
    Holder,
}

impl Lookup {
    pub const ALL: [Lookup; 3] = [Lookup::Local, Lookup::Constant, Lookup::Holder];

    pub fn name(self) -> &'static str {
        match self {
            Lookup::Local => "local",
            Lookup::Constant => "constant",
            Lookup::Holder => "holder",
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lookup {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Lookup::Local),
            "constant" => Ok(Lookup::Constant),
            "holder" => Ok(Lookup::Holder),
            other => bail!("unknown lookup pattern '{other}' (expected local|constant|holder)"),
        }
    }
}

/// Where a call shape reads the values that live outside its arguments.
///
/// Reads happen lazily, inside the lookup arms that need them: the `Local`
/// workload never touches its source.
pub trait External {
    fn scale(&self) -> f64;
    fn offset(&self) -> f64;
}

impl External for BenchContext {
    #[inline(always)]
    fn scale(&self) -> f64 {
        self.scale
    }

    #[inline(always)]
    fn offset(&self) -> f64 {
        self.holder.offset()
    }
}

/// Pure arithmetic behind every call shape.
#[inline(always)]
pub fn compute<E: External + ?Sized>(lookup: Lookup, x: f64, y: f64, ext: &E) -> f64 {
    match lookup {
        Lookup::Local => x * y,
        Lookup::Constant => x * y * ext.scale(),
        Lookup::Holder => x * y * ext.scale() + ext.offset(),
    }
}

/// Runs the workload and throws the result away.
///
/// `black_box` keeps the multiplication alive in release builds; nothing else
/// is observable.
#[inline(always)]
pub fn execute<E: External + ?Sized>(lookup: Lookup, x: f64, y: i64, ext: &E) {
    black_box(compute(lookup, black_box(x), y as f64, ext));
}
