//! Buffered entropy served in arbitrary-width bit chunks.
//!
//! The pool holds 256 bits as eight 32-bit words.  Valid bits always
//! occupy the low `valid` bit positions of the buffer (word 0 holding
//! the least significant 32 bits) and are handed out from the most
//! significant valid bit downwards.  Consumed bits are cleared.
//!
//! When a draw asks for more bits than remain, the leftovers are taken
//! first and become the high-order part of the result; the buffer is
//! then refilled in one call and the draw is completed from fresh bits.

use std::sync::{Mutex, PoisonError};

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::{PassKeeperError, Result};

/// Number of 32-bit words held by the pool.
const POOL_WORDS: usize = 8;

/// Pool capacity in bits.
pub const POOL_BITS: u32 = 32 * POOL_WORDS as u32;

/// Widest single draw.
pub const MAX_DRAW_BITS: u32 = 32;

/// Where refill bytes come from.
pub trait BitSource {
    /// Fill `dest` completely or fail with `EntropySourceFailure`.
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsBitSource;

impl BitSource for OsBitSource {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|_| PassKeeperError::EntropySourceFailure)
    }
}

/// Anything bits can be drawn from.
///
/// Implemented by an owned [`EntropyPool`] and by a reference to a
/// [`SharedPool`], so generators work the same way whether they own
/// their entropy or share it across threads.
pub trait DrawBits {
    /// Draw `count` bits (1..=32) as the low bits of the result.
    fn draw(&mut self, count: u32) -> Result<u32>;

    /// Draw 64 bits: the first 32-bit draw is the low word.
    fn draw_u64(&mut self) -> Result<u64> {
        let low = self.draw(32)?;
        let high = self.draw(32)?;
        Ok((u64::from(high) << 32) | u64::from(low))
    }
}

/// A 256-bit entropy buffer over a [`BitSource`].
#[derive(Debug)]
pub struct EntropyPool<S = OsBitSource> {
    source: S,
    words: [u32; POOL_WORDS],
    valid: u32,
    refills: u64,
}

impl EntropyPool<OsBitSource> {
    /// An empty pool backed by the OS CSPRNG.
    pub fn new() -> Self {
        Self::with_source(OsBitSource)
    }
}

impl Default for EntropyPool<OsBitSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BitSource> EntropyPool<S> {
    /// An empty pool; the first draw triggers a refill.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            words: [0; POOL_WORDS],
            valid: 0,
            refills: 0,
        }
    }

    /// Number of currently buffered bits, always within `0..=256`.
    pub fn available_bits(&self) -> u32 {
        self.valid
    }

    /// How many times the buffer has been refilled from the source.
    pub fn refill_count(&self) -> u64 {
        self.refills
    }

    /// Take `count` buffered bits, most significant first.
    ///
    /// Caller guarantees `count <= self.valid` and `count <= 32`.
    fn take(&mut self, mut count: u32) -> u32 {
        let mut out: u32 = 0;

        while count > 0 {
            let word = ((self.valid - 1) / 32) as usize;
            let in_word = self.valid - 32 * word as u32;
            let n = in_word.min(count);
            let rest = in_word - n;

            let chunk = (self.words[word] >> rest) & low_mask(n);
            self.words[word] &= low_mask(rest);

            out = out.checked_shl(n).unwrap_or(0) | chunk;
            self.valid -= n;
            count -= n;
        }

        out
    }

    fn refill(&mut self) -> Result<()> {
        let mut bytes = [0u8; 4 * POOL_WORDS];
        if let Err(e) = self.source.fill(&mut bytes) {
            tracing::warn!("entropy source refill failed");
            return Err(e);
        }

        for (word, chunk) in self.words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        self.valid = POOL_BITS;
        self.refills += 1;
        tracing::trace!(refills = self.refills, "entropy pool refilled");
        Ok(())
    }
}

impl<S: BitSource> DrawBits for EntropyPool<S> {
    fn draw(&mut self, count: u32) -> Result<u32> {
        if !(1..=MAX_DRAW_BITS).contains(&count) {
            return Err(PassKeeperError::InvalidDrawWidth(count));
        }

        if count <= self.valid {
            return Ok(self.take(count));
        }

        // Leftover bits are consumed before the refill.
        let leftover_bits = self.valid;
        let leftover = self.take(leftover_bits);
        self.refill()?;

        let fresh_bits = count - leftover_bits;
        let fresh = self.take(fresh_bits);
        Ok(leftover.checked_shl(fresh_bits).unwrap_or(0) | fresh)
    }
}

fn low_mask(bits: u32) -> u32 {
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// An [`EntropyPool`] guarded by a mutex so several call sites can
/// share it.  Every draw holds the lock for its whole duration, so no
/// two draws ever observe overlapping bit ranges.
#[derive(Debug)]
pub struct SharedPool<S = OsBitSource> {
    inner: Mutex<EntropyPool<S>>,
}

impl<S: BitSource> SharedPool<S> {
    pub fn new(pool: EntropyPool<S>) -> Self {
        Self {
            inner: Mutex::new(pool),
        }
    }

    /// Draw `count` bits under the lock.
    pub fn draw(&self, count: u32) -> Result<u32> {
        // The pool is never left half-updated, so a poisoned lock is still usable.
        let mut pool = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        pool.draw(count)
    }
}

impl Default for SharedPool<OsBitSource> {
    fn default() -> Self {
        Self::new(EntropyPool::new())
    }
}

impl<S: BitSource> DrawBits for &SharedPool<S> {
    fn draw(&mut self, count: u32) -> Result<u32> {
        SharedPool::draw(*self, count)
    }
}
