/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Length-prefixed varint, as used by QUIC.
//!
//! The top two bits of the first byte select the length class, and the value
//! is stored big-endian in the remaining bits:
//!
//! | Class | Bytes | Value bits |
//! |-------|-------|------------|
//! | `00`  | 1     | 6          |
//! | `01`  | 2     | 14         |
//! | `10`  | 4     | 30         |
//! | `11`  | 8     | 62         |

use crate::{DecodeError, IntCodec, read_array};

/// The QUIC variable-length integer encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuicVarint;

impl IntCodec for QuicVarint {
    const NAME: &'static str = "quic";
    const MAX_VALUE: u64 = (1 << 62) - 1;

    #[inline(always)]
    fn encoded_len(value: u64) -> usize {
        if value < 1 << 6 {
            1
        } else if value < 1 << 14 {
            2
        } else if value < 1 << 30 {
            4
        } else {
            8
        }
    }

    #[inline(always)]
    fn encode_value(value: u64, out: &mut [u8]) -> usize {
        debug_assert!(value <= Self::MAX_VALUE);
        let len = Self::encoded_len(value);
        match len {
            1 => out[0] = value as u8,
            2 => out[..2].copy_from_slice(&(0x4000 | value as u16).to_be_bytes()),
            4 => out[..4].copy_from_slice(&(0x8000_0000 | value as u32).to_be_bytes()),
            _ => out[..8].copy_from_slice(&(0xc000_0000_0000_0000 | value).to_be_bytes()),
        }
        len
    }

    #[inline(always)]
    fn decode_value(input: &[u8]) -> Result<(u64, usize), DecodeError> {
        let first = read_array::<1>(input)?[0];
        match first >> 6 {
            0b00 => Ok((u64::from(first), 1)),
            0b01 => {
                let field = u16::from_be_bytes(read_array(input)?);
                Ok((u64::from(field & 0x3fff), 2))
            }
            0b10 => {
                let field = u32::from_be_bytes(read_array(input)?);
                Ok((u64::from(field & 0x3fff_ffff), 4))
            }
            _ => {
                let field = u64::from_be_bytes(read_array(input)?);
                Ok((field & 0x3fff_ffff_ffff_ffff, 8))
            }
        }
    }
}
