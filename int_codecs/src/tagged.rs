/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! A [`QuicVarint`](crate::QuicVarint) variant that carries a 2-bit tag
//! (e.g. a stream type) next to the magnitude.
//!
//! The low two bits of the logical value are the tag, the remaining bits are
//! the magnitude. The tag occupies the top two bits of the first byte and the
//! length class the two bits right below it:
//!
//! ```text
//! tt cc mmmm [mmmmmmmm ...]
//! ```
//!
//! | Class | Bytes | Magnitude bits |
//! |-------|-------|----------------|
//! | `00`  | 1     | 4              |
//! | `01`  | 2     | 12             |
//! | `10`  | 4     | 28             |
//! | `11`  | 8     | 60             |

use crate::{DecodeError, IntCodec, read_array};

const TAG_BITS: u32 = 2;
const TAG_MASK: u64 = (1 << TAG_BITS) - 1;

/// Varint with an embedded 2-bit tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedVarint;

impl TaggedVarint {
    /// Split a logical value into its tag and magnitude.
    #[inline(always)]
    const fn split(value: u64) -> (u8, u64) {
        ((value & TAG_MASK) as u8, value >> TAG_BITS)
    }

    #[inline(always)]
    const fn join(tag: u8, magnitude: u64) -> u64 {
        (magnitude << TAG_BITS) | tag as u64
    }
}

impl IntCodec for TaggedVarint {
    const NAME: &'static str = "streamid";
    const MAX_VALUE: u64 = (1 << 62) - 1;

    #[inline(always)]
    fn encoded_len(value: u64) -> usize {
        let magnitude = value >> TAG_BITS;
        if magnitude < 1 << 4 {
            1
        } else if magnitude < 1 << 12 {
            2
        } else if magnitude < 1 << 28 {
            4
        } else {
            8
        }
    }

    #[inline(always)]
    fn encode_value(value: u64, out: &mut [u8]) -> usize {
        debug_assert!(value <= Self::MAX_VALUE);
        let (tag, magnitude) = Self::split(value);
        let len = Self::encoded_len(value);
        match len {
            1 => out[0] = (tag << 6) | magnitude as u8,
            2 => {
                let field = (u16::from(tag) << 14) | (0b01 << 12) | magnitude as u16;
                out[..2].copy_from_slice(&field.to_be_bytes());
            }
            4 => {
                let field = (u32::from(tag) << 30) | (0b10 << 28) | magnitude as u32;
                out[..4].copy_from_slice(&field.to_be_bytes());
            }
            _ => {
                let field = (u64::from(tag) << 62) | (0b11 << 60) | magnitude;
                out[..8].copy_from_slice(&field.to_be_bytes());
            }
        }
        len
    }

    #[inline(always)]
    fn decode_value(input: &[u8]) -> Result<(u64, usize), DecodeError> {
        let first = read_array::<1>(input)?[0];
        let tag = first >> 6;
        let (magnitude, len) = match (first >> 4) & 0b11 {
            0b00 => (u64::from(first & 0x0f), 1),
            0b01 => {
                let field = u16::from_be_bytes(read_array(input)?);
                (u64::from(field & 0x0fff), 2)
            }
            0b10 => {
                let field = u32::from_be_bytes(read_array(input)?);
                (u64::from(field & 0x0fff_ffff), 4)
            }
            _ => {
                let field = u64::from_be_bytes(read_array(input)?);
                (field & 0x0fff_ffff_ffff_ffff, 8)
            }
        };
        Ok((Self::join(tag, magnitude), len))
    }
}
