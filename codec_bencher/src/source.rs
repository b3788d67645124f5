/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Dataset generation.

use clap::ValueEnum;
use rand::RngCore;
use tracing::debug;

use crate::BenchError;

/// Bits reserved at the bottom of every random value, so the tagged codec
/// has room for its tag.
const TAG_HEADROOM: u32 = 2;

/// How the dataset is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// `dataset[i] = i`.
    #[value(alias = "c")]
    Counting,
    /// Uniform random values, shifted right by 2.
    #[value(alias = "r")]
    Randomized,
    /// Random values narrowed to 6, 14, 30 or 62 bits, picked by the two
    /// high bits of each sample.
    #[default]
    #[value(alias = "t")]
    Trimmed,
}

/// The bit width class of a raw sample, taken from its two most-significant bits.
///
/// Class `k` keeps `8 * 2^k - 2` bits: 6, 14, 30 and 62.
#[inline]
pub const fn width_class(raw: u64) -> u32 {
    (raw >> 62) as u32
}

/// The number of value bits a trimmed sample keeps.
#[inline]
pub const fn trimmed_width(raw: u64) -> u32 {
    8 * (1 << width_class(raw)) - TAG_HEADROOM
}

/// Produce `count` values for `mode`.
///
/// `rng` is only used by the random modes; in production it's the OS random
/// source. A failing source aborts generation: there is no fallback.
pub fn generate<R>(mode: Mode, count: usize, rng: &mut R) -> Result<Vec<u64>, BenchError>
where
    R: RngCore + ?Sized,
{
    debug!(?mode, count, "generating dataset");
    let mut values = try_alloc::<u64>("dataset", count)?;

    let Some(narrow) = narrowing(mode) else {
        values.extend(0..count as u64);
        return Ok(values);
    };

    let bytes = count.saturating_mul(size_of::<u64>());
    let mut raw = try_alloc::<u8>("entropy buffer", bytes)?;
    raw.resize(bytes, 0);
    rng.try_fill_bytes(&mut raw)
        .map_err(BenchError::EntropyUnavailable)?;

    values.extend(raw.chunks_exact(8).map(|chunk| {
        let sample = chunk
            .first_chunk::<8>()
            .map_or(0, |bytes| u64::from_ne_bytes(*bytes));
        narrow(sample)
    }));
    Ok(values)
}

/// How a raw random sample becomes a dataset value. `None` for modes that
/// don't draw random samples at all.
fn narrowing(mode: Mode) -> Option<fn(u64) -> u64> {
    match mode {
        Mode::Counting => None,
        Mode::Randomized => Some(randomize),
        Mode::Trimmed => Some(trim),
    }
}

const fn randomize(sample: u64) -> u64 {
    sample >> TAG_HEADROOM
}

const fn trim(sample: u64) -> u64 {
    sample >> (u64::BITS - trimmed_width(sample))
}

/// Reserve an empty vector with room for exactly `len` elements.
pub(crate) fn try_alloc<T>(what: &'static str, len: usize) -> Result<Vec<T>, BenchError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| BenchError::AllocationFailure {
            what,
            bytes: len.saturating_mul(size_of::<T>()),
        })?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_per_class() {
        assert_eq!(trimmed_width(0), 6);
        assert_eq!(trimmed_width(1 << 62), 14);
        assert_eq!(trimmed_width(2 << 62), 30);
        assert_eq!(trimmed_width(u64::MAX), 62);
    }

    #[test]
    fn narrowing_per_mode() {
        assert!(narrowing(Mode::Counting).is_none());

        let randomized = narrowing(Mode::Randomized).unwrap();
        let trimmed = narrowing(Mode::Trimmed).unwrap();
        assert_eq!(randomized(u64::MAX), (1 << 62) - 1);
        assert_eq!(trimmed(u64::MAX), (1 << 62) - 1);
        // Class 0 keeps only the top 6 bits; randomized keeps 62.
        assert_eq!(randomized(0x3fff_ffff_ffff_ffff), 0x0fff_ffff_ffff_ffff);
        assert_eq!(trimmed(0x3fff_ffff_ffff_ffff), 0xf);
    }

    #[test]
    fn oversized_allocation_fails() {
        let err = try_alloc::<u64>("dataset", usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            BenchError::AllocationFailure {
                what: "dataset",
                bytes: usize::MAX
            }
        ));
    }
}
