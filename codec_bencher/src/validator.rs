/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Round-trip validation.
//!
//! The decoded output is compared with the dataset value by value. The byte
//! count reported by the decoder is not trusted on its own: a corrupted byte
//! that still parses as a well-formed value is caught here.

use std::io::{self, Write};

use int_codecs::DecodeError;
use itertools::Itertools;
use tracing::{error, warn};

use crate::{BenchError, BenchmarkContext};

/// Check that `ctx.decoded()` equals `ctx.dataset()`.
///
/// `decode_result` is what the codec's bulk decode returned on the last
/// iteration; an error counts as a mismatch even if the arrays happen to agree.
/// On mismatch the dataset, the whole encoding buffer and the decoded output
/// are dumped to `diagnostics` in hex.
pub fn validate<W: Write>(
    codec: &'static str,
    ctx: &BenchmarkContext,
    decode_result: Result<usize, DecodeError>,
    diagnostics: &mut W,
) -> Result<(), BenchError> {
    let first_difference = ctx
        .dataset()
        .iter()
        .zip(ctx.decoded())
        .position(|(expected, actual)| expected != actual);

    if first_difference.is_none() && decode_result.is_ok() {
        return Ok(());
    }

    match (&decode_result, first_difference) {
        (Err(err), _) => error!(codec, %err, "decoder failed"),
        (Ok(_), Some(index)) => error!(codec, index, "first decoded value differs"),
        (Ok(_), None) => {}
    }
    if let Err(err) = dump(codec, ctx, diagnostics) {
        warn!(%err, "unable to write validation diagnostics");
    }

    Err(BenchError::ValidationMismatch {
        codec,
        first_difference,
    })
}

fn dump<W: Write>(codec: &str, ctx: &BenchmarkContext, out: &mut W) -> io::Result<()> {
    writeln!(out, "{codec}: decoded value doesn't match original value")?;
    writeln!(out, "Integers:{}", hex_words(ctx.dataset()))?;
    writeln!(
        out,
        "Encoded:{}",
        ctx.buffer().iter().format_with("", |b, f| f(&format_args!(" {b:02x}")))
    )?;
    writeln!(out, "Decoded:{}", hex_words(ctx.decoded()))?;
    out.flush()
}

fn hex_words(values: &[u64]) -> impl std::fmt::Display + '_ {
    values
        .iter()
        .format_with("", |v, f| f(&format_args!(" {v:016x}")))
}
