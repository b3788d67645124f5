/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Fixed-width baselines: every value takes exactly 8 bytes.

use crate::{DecodeError, IntCodec, read_array};

const WIDTH: usize = size_of::<u64>();

macro_rules! impl_fixed_width {
    ($ty:ident, $name:literal, $to_bytes:ident, $from_bytes:ident) => {
        impl IntCodec for $ty {
            const NAME: &'static str = $name;
            const MAX_VALUE: u64 = u64::MAX;

            #[inline(always)]
            fn encoded_len(_value: u64) -> usize {
                WIDTH
            }

            #[inline(always)]
            fn encode_value(value: u64, out: &mut [u8]) -> usize {
                out[..WIDTH].copy_from_slice(&value.$to_bytes());
                WIDTH
            }

            #[inline(always)]
            fn decode_value(input: &[u8]) -> Result<(u64, usize), DecodeError> {
                Ok((u64::$from_bytes(read_array(input)?), WIDTH))
            }

            fn encode(values: &[u64], out: &mut [u8]) -> usize {
                let len = values.len() * WIDTH;
                for (chunk, value) in out[..len].chunks_exact_mut(WIDTH).zip(values) {
                    chunk.copy_from_slice(&value.$to_bytes());
                }
                len
            }

            fn decode(input: &[u8], out: &mut [u64]) -> Result<usize, DecodeError> {
                let len = out.len() * WIDTH;
                let Some(input) = input.get(..len) else {
                    // Report the first value that doesn't fit.
                    let offset = input.len() / WIDTH * WIDTH;
                    return Err(DecodeError::Truncated {
                        offset,
                        needed: WIDTH,
                        available: input.len() - offset,
                    });
                };
                for (value, chunk) in out.iter_mut().zip(input.chunks_exact(WIDTH)) {
                    *value = chunk
                        .first_chunk::<WIDTH>()
                        .map_or(0, |bytes| u64::$from_bytes(*bytes));
                }
                Ok(len)
            }
        }
    };
}

/// Copies each value's in-memory representation.
///
/// The fastest possible encoding, but the output depends on the byte order
/// of the host, so it can't be exchanged between machines.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedCopy;

/// Stores each value in big-endian (network) byte order.
///
/// Portable, but still 8 bytes per value regardless of magnitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndianSwap;

impl_fixed_width!(FixedCopy, "memcpy", to_ne_bytes, from_ne_bytes);
impl_fixed_width!(EndianSwap, "endian", to_be_bytes, from_be_bytes);
