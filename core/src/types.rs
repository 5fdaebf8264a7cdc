//! Read-only context shared by all runners.

use crate::constants::{HOLDER_NAME, HOLDER_VALUE, SCALE};

/// Holder of fixed attributes, built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedConstants {
    pub name: String,
    pub value: f64,
}

impl SharedConstants {
    pub fn new(name: &str, value: f64) -> Self {
        SharedConstants {
            name: name.to_string(),
            value,
        }
    }

    pub fn standard() -> Self {
        Self::new(HOLDER_NAME, HOLDER_VALUE)
    }

    /// Value derived from both attributes; used as the additive term of the
    /// holder workload.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.value + self.name.len() as f64
    }
}

/// Everything a workload may look up outside its own arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchContext {
    pub scale: f64,
    pub holder: SharedConstants,
}

impl BenchContext {
    pub fn new(scale: f64, holder: SharedConstants) -> Self {
        BenchContext { scale, holder }
    }

    pub fn standard() -> Self {
        Self::new(SCALE, SharedConstants::standard())
    }
}
