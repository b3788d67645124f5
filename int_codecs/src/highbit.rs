/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Continuation-bit varints.
//!
//! Each value is split into 7-bit groups, one group per byte.
//! The most-significant bit of each byte is the **continuation bit**: it is
//! set on every byte except the last one of a value.
//!
//! The two codecs differ in the order the groups are emitted. Take 300,
//! which is `10 0101100` in binary:
//!
//! ```text
//! big-endian:    1_0000010 0_0101100   -> [0x82, 0x2c]
//! little-endian: 1_0101100 0_0000010   -> [0xac, 0x02]
//! ```
//!
//! Nine groups cover 63 bits, so values up to `2^63 - 1` round-trip.

use crate::{DecodeError, IntCodec, MAX_ENCODED_LEN};

const CONTINUATION: u8 = 0b1000_0000;
const PAYLOAD: u8 = 0b0111_1111;

/// Emits the most-significant group first.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighBitBe;

/// Emits the least-significant group first, like LEB128.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighBitLe;

/// The number of 7-bit groups needed to represent `value`.
/// Zero still takes one group.
#[inline(always)]
const fn group_count(value: u64) -> usize {
    let bits = (u64::BITS - value.leading_zeros()) as usize;
    if bits == 0 { 1 } else { bits.div_ceil(7) }
}

/// The error for an input that ran out before a terminating byte.
#[inline]
fn unterminated(input: &[u8]) -> DecodeError {
    if input.len() >= MAX_ENCODED_LEN {
        DecodeError::Overlong { offset: 0 }
    } else {
        DecodeError::Truncated {
            offset: 0,
            needed: input.len() + 1,
            available: input.len(),
        }
    }
}

impl IntCodec for HighBitBe {
    const NAME: &'static str = "highbitbe";
    const MAX_VALUE: u64 = (1 << 63) - 1;

    #[inline(always)]
    fn encoded_len(value: u64) -> usize {
        group_count(value)
    }

    #[inline(always)]
    fn encode_value(value: u64, out: &mut [u8]) -> usize {
        debug_assert!(value <= Self::MAX_VALUE);
        let len = group_count(value);
        let last = len - 1;
        for (i, byte) in out[..last].iter_mut().enumerate() {
            let shift = 7 * (last - i);
            *byte = CONTINUATION | ((value >> shift) as u8 & PAYLOAD);
        }
        out[last] = value as u8 & PAYLOAD;
        len
    }

    #[inline(always)]
    fn decode_value(input: &[u8]) -> Result<(u64, usize), DecodeError> {
        let mut value = 0;
        for (i, &byte) in input.iter().take(MAX_ENCODED_LEN).enumerate() {
            value = (value << 7) | u64::from(byte & PAYLOAD);
            if byte & CONTINUATION == 0 {
                return Ok((value, i + 1));
            }
        }
        Err(unterminated(input))
    }
}

impl IntCodec for HighBitLe {
    const NAME: &'static str = "highbitle";
    const MAX_VALUE: u64 = (1 << 63) - 1;

    #[inline(always)]
    fn encoded_len(value: u64) -> usize {
        group_count(value)
    }

    #[inline(always)]
    fn encode_value(value: u64, out: &mut [u8]) -> usize {
        debug_assert!(value <= Self::MAX_VALUE);
        let len = group_count(value);
        let mut rest = value;
        for byte in &mut out[..len - 1] {
            *byte = CONTINUATION | (rest as u8 & PAYLOAD);
            rest >>= 7;
        }
        out[len - 1] = rest as u8;
        len
    }

    #[inline(always)]
    fn decode_value(input: &[u8]) -> Result<(u64, usize), DecodeError> {
        let mut value = 0;
        for (i, &byte) in input.iter().take(MAX_ENCODED_LEN).enumerate() {
            value |= u64::from(byte & PAYLOAD) << (7 * i);
            if byte & CONTINUATION == 0 {
                return Ok((value, i + 1));
            }
        }
        Err(unterminated(input))
    }
}
