//! Randomization engine — entropy pool, weighted sampling, and generators.
//!
//! This module provides:
//! - The 256-bit `EntropyPool` and its thread-safe `SharedPool` (`pool`)
//! - Weighted literal tables and sampling (`sampler`)
//! - Pronounceable name synthesis (`names`)
//! - PINs, passwords, hex keys and presets via `Generator` (`generator`)

pub mod generator;
pub mod names;
pub mod pool;
pub mod sampler;

pub use generator::{Generator, LengthRange, PasswordPreset};
pub use pool::{BitSource, DrawBits, EntropyPool, OsBitSource, SharedPool};
pub use sampler::{pick, WeightedLiteral};

use crate::errors::{PassKeeperError, Result};

/// Output of a generator that may have been cut short by an entropy failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated<T> {
    /// Every requested draw succeeded.
    Complete(T),
    /// A draw failed; the value holds whatever was produced before it.
    Partial(T),
}

impl<T> Generated<T> {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// The produced value, complete or not.
    pub fn value(&self) -> &T {
        match self {
            Self::Complete(v) | Self::Partial(v) => v,
        }
    }

    /// The produced value, complete or not.
    pub fn into_inner(self) -> T {
        match self {
            Self::Complete(v) | Self::Partial(v) => v,
        }
    }

    /// Reject partial output.
    ///
    /// Secrets must never be silently shorter than requested, so
    /// password and key paths go through this.
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Complete(v) => Ok(v),
            Self::Partial(_) => Err(PassKeeperError::EntropySourceFailure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generated<U> {
        match self {
            Self::Complete(v) => Generated::Complete(f(v)),
            Self::Partial(v) => Generated::Partial(f(v)),
        }
    }
}
