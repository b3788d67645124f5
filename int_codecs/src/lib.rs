/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Encoding schemes for sequences of `u64` values.
//!
//! # Usecase
//!
//! A `u64` is always 8 bytes long, no matter the specific value we're working with.
//! Most integers found on the wire (stream identifiers, lengths, offsets) are
//! small in magnitude though, so a variable-length encoding can save a lot of
//! space, at the price of some extra work when encoding and decoding.
//!
//! This crate collects a handful of designs so they can be measured against
//! each other:
//!
//! | Codec           | Name        | Bytes per value | Range          |
//! |-----------------|-------------|-----------------|----------------|
//! | [`FixedCopy`]   | `memcpy`    | 8               | `u64`          |
//! | [`EndianSwap`]  | `endian`    | 8               | `u64`          |
//! | [`HighBitBe`]   | `highbitbe` | 1–9             | `< 2^63`       |
//! | [`HighBitLe`]   | `highbitle` | 1–9             | `< 2^63`       |
//! | [`QuicVarint`]  | `quic`      | 1, 2, 4 or 8    | `< 2^62`       |
//! | [`TaggedVarint`]| `streamid`  | 1, 2, 4 or 8    | `< 2^62`       |
//!
//! # Length classes
//!
//! The two length-prefixed codecs store a 2-bit length class in the first byte.
//! A value always lands in the smallest class that can hold all of its bits:
//! 63 fits the first [`QuicVarint`] class, 64 needs the second one.
//!
//! ```
//! use int_codecs::{IntCodec, QuicVarint};
//!
//! let mut buf = [0u8; int_codecs::MAX_ENCODED_LEN];
//! assert_eq!(QuicVarint::encode_value(63, &mut buf), 1);
//! assert_eq!(buf[0], 0x3f);
//!
//! assert_eq!(QuicVarint::encode_value(64, &mut buf), 2);
//! assert_eq!(buf[0] >> 6, 0b01);
//! assert_eq!(QuicVarint::decode_value(&buf[..2]), Ok((64, 2)));
//! ```
//!
//! # Whole sequences
//!
//! Benchmarks work on whole slices rather than single values.
//! [`IntCodec::encode`] writes every value back to back, starting at offset 0,
//! and returns the number of bytes written.
//! [`IntCodec::decode`] reads exactly as many values as the output slice holds.
//!
//! ```
//! use int_codecs::{HighBitLe, IntCodec};
//!
//! let values = [0, 300, 1 << 40];
//! let mut buf = vec![0u8; values.len() * int_codecs::MAX_ENCODED_LEN];
//! let written = HighBitLe::encode(&values, &mut buf);
//!
//! let mut decoded = [0u64; 3];
//! assert_eq!(HighBitLe::decode(&buf[..written], &mut decoded), Ok(written));
//! assert_eq!(decoded, values);
//! ```

use thiserror::Error;

mod fixed;
mod highbit;
mod quic;
mod tagged;

pub use fixed::{EndianSwap, FixedCopy};
pub use highbit::{HighBitBe, HighBitLe};
pub use quic::QuicVarint;
pub use tagged::TaggedVarint;

/// The largest number of bytes any codec in this crate emits for a single value.
///
/// An output buffer of `MAX_ENCODED_LEN * n` bytes is always large enough to
/// hold `n` encoded values.
pub const MAX_ENCODED_LEN: usize = 9;

/// Errors reported while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ended in the middle of a value.
    #[error("value at byte {offset} needs {needed} bytes, only {available} available")]
    Truncated {
        /// Byte offset of the first byte of the value.
        offset: usize,
        /// The number of bytes the value needs.
        needed: usize,
        /// The number of bytes left in the input.
        available: usize,
    },
    /// A continuation-bit run did not terminate within [`MAX_ENCODED_LEN`] bytes.
    #[error("value at byte {offset} has no terminating byte within 9 bytes")]
    Overlong {
        /// Byte offset of the first byte of the value.
        offset: usize,
    },
}

impl DecodeError {
    /// Shift the reported offset by `base` bytes.
    const fn at(self, base: usize) -> Self {
        match self {
            Self::Truncated {
                offset,
                needed,
                available,
            } => Self::Truncated {
                offset: base + offset,
                needed,
                available,
            },
            Self::Overlong { offset } => Self::Overlong {
                offset: base + offset,
            },
        }
    }
}

/// An encoding scheme for `u64` values.
///
/// Implementors provide the per-value operations; the bulk operations
/// used by the benchmark harness are derived from them, but can be overridden
/// when a codec has a faster way to process a whole slice.
pub trait IntCodec {
    /// Short name, used to select the codec and to label report rows.
    const NAME: &'static str;

    /// The largest value that survives an encode/decode round trip.
    const MAX_VALUE: u64;

    /// The number of bytes [`IntCodec::encode_value`] writes for `value`.
    fn encoded_len(value: u64) -> usize;

    /// Encode a single value at the start of `out`, returning the number of bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`IntCodec::encoded_len`]. Sizing the
    /// buffer is the caller's job: [`MAX_ENCODED_LEN`] bytes per value are always enough.
    fn encode_value(value: u64, out: &mut [u8]) -> usize;

    /// Decode a single value from the start of `input`.
    ///
    /// Returns the value and the number of bytes it occupied.
    /// Never reads past the end of `input`.
    fn decode_value(input: &[u8]) -> Result<(u64, usize), DecodeError>;

    /// Encode all `values` back to back, returning the number of bytes written.
    ///
    /// # Panics
    ///
    /// Panics if `out` can't hold the encoded values.
    #[inline]
    fn encode(values: &[u64], out: &mut [u8]) -> usize {
        let mut pos = 0;
        for &value in values {
            pos += Self::encode_value(value, &mut out[pos..]);
        }
        pos
    }

    /// Decode `out.len()` values from `input`, returning the number of bytes consumed.
    #[inline]
    fn decode(input: &[u8], out: &mut [u64]) -> Result<usize, DecodeError> {
        let mut pos = 0;
        for slot in out.iter_mut() {
            let (value, len) = Self::decode_value(&input[pos..]).map_err(|e| e.at(pos))?;
            *slot = value;
            pos += len;
        }
        Ok(pos)
    }
}

/// A type-erased handle on an [`IntCodec`] implementation.
///
/// The benchmark harness iterates over a table of descriptors rather than
/// naming each codec at a dedicated call site.
#[derive(Debug, Clone, Copy)]
pub struct CodecDescriptor {
    /// See [`IntCodec::NAME`].
    pub name: &'static str,
    /// See [`IntCodec::MAX_VALUE`].
    pub max_value: u64,
    /// See [`IntCodec::encoded_len`].
    pub encoded_len: fn(u64) -> usize,
    /// See [`IntCodec::encode`].
    pub encode: fn(&[u64], &mut [u8]) -> usize,
    /// See [`IntCodec::decode`].
    pub decode: fn(&[u8], &mut [u64]) -> Result<usize, DecodeError>,
}

impl CodecDescriptor {
    /// Build the descriptor for `C`.
    pub const fn of<C: IntCodec>() -> Self {
        Self {
            name: C::NAME,
            max_value: C::MAX_VALUE,
            encoded_len: C::encoded_len,
            encode: C::encode,
            decode: C::decode,
        }
    }
}

/// Every codec in this crate, in report order.
pub static CODECS: [CodecDescriptor; 6] = [
    CodecDescriptor::of::<FixedCopy>(),
    CodecDescriptor::of::<EndianSwap>(),
    CodecDescriptor::of::<HighBitBe>(),
    CodecDescriptor::of::<HighBitLe>(),
    CodecDescriptor::of::<QuicVarint>(),
    CodecDescriptor::of::<TaggedVarint>(),
];

/// Look up a codec by its [`IntCodec::NAME`].
pub fn find(name: &str) -> Option<&'static CodecDescriptor> {
    CODECS.iter().find(|codec| codec.name == name)
}

/// Copy the first `N` bytes of `input` into an array.
#[inline(always)]
fn read_array<const N: usize>(input: &[u8]) -> Result<[u8; N], DecodeError> {
    input
        .first_chunk::<N>()
        .copied()
        .ok_or(DecodeError::Truncated {
            offset: 0,
            needed: N,
            available: input.len(),
        })
}
