/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! The timing harness.
//!
//! Every measurement is repeated `iterations` times and only the fastest
//! sample is kept: interrupts, cache misses and frequency changes only ever
//! make an operation slower, so the minimum is the closest to its true cost.

use std::{
    hint::black_box,
    io::{self, Write},
};

use int_codecs::{CodecDescriptor, DecodeError};
use tracing::{debug, info};

use crate::{BenchError, BenchmarkContext, Clock, Reporter, validator};

/// The measurements for a single codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecReport {
    pub name: &'static str,
    /// Floor-adjusted minimum cost of encoding the whole dataset.
    pub encode: u64,
    /// Floor-adjusted minimum cost of decoding the whole dataset.
    pub decode: u64,
    /// Bytes written by the last encode.
    pub encoded_len: usize,
}

/// Times codecs against a [`BenchmarkContext`].
///
/// Validation diagnostics go to `D`, standard error unless built with
/// [`Harness::with_diagnostics`].
#[derive(Debug)]
pub struct Harness<C, D = io::Stderr> {
    clock: C,
    diagnostics: D,
}

impl<C: Clock> Harness<C> {
    pub fn new(clock: C) -> Self {
        Self::with_diagnostics(clock, io::stderr())
    }
}

impl<C: Clock, D: Write> Harness<C, D> {
    pub const fn with_diagnostics(clock: C, diagnostics: D) -> Self {
        Self { clock, diagnostics }
    }

    /// Measure an empty operation and store the result as the context's floor.
    ///
    /// Must run before any codec is measured; the floor is subtracted from
    /// every later sample.
    pub fn calibrate(&self, ctx: &mut BenchmarkContext) -> u64 {
        let floor = self.measure(ctx.iterations(), 0, || ());
        ctx.floor = floor;
        debug!(floor, "calibrated");
        floor
    }

    /// Run `op` `iterations` times and return the smallest sample, minus `floor`.
    ///
    /// A sample smaller than `floor` counts as zero. A clock that wrapped
    /// between the two readings still yields the right difference.
    ///
    /// # Panics
    ///
    /// Panics if `iterations` is zero.
    pub fn measure<T>(&self, iterations: usize, floor: u64, mut op: impl FnMut() -> T) -> u64 {
        assert!(iterations > 0, "at least one iteration is required");
        let mut best = u64::MAX;
        for _ in 0..iterations {
            let start = self.clock.now();
            black_box(op());
            let end = self.clock.now();
            best = best.min(end.wrapping_sub(start).saturating_sub(floor));
        }
        best
    }

    /// Time the codec's bulk encode of the dataset into the context's buffer.
    ///
    /// Records the number of bytes written by the last iteration.
    pub fn encode_phase(&self, ctx: &mut BenchmarkContext, codec: &CodecDescriptor) -> u64 {
        let BenchmarkContext {
            dataset,
            buffer,
            written,
            iterations,
            floor,
            ..
        } = ctx;

        let cost = self.measure(*iterations, *floor, || {
            *written = (codec.encode)(black_box(dataset.as_slice()), buffer.as_mut_slice());
            *written
        });
        debug!(codec = codec.name, cost, written = *written, "encoded");
        cost
    }

    /// Time the codec's bulk decode of the encoded bytes into the decoded output.
    ///
    /// Only `buffer[..written]` is handed to the decoder. Returns the cost and
    /// the result of the last iteration.
    pub fn decode_phase(
        &self,
        ctx: &mut BenchmarkContext,
        codec: &CodecDescriptor,
    ) -> (u64, Result<usize, DecodeError>) {
        let BenchmarkContext {
            buffer,
            decoded,
            written,
            iterations,
            floor,
            ..
        } = ctx;
        let input = &buffer[..*written];

        let mut result = Ok(0);
        let cost = self.measure(*iterations, *floor, || {
            result = (codec.decode)(black_box(input), decoded.as_mut_slice());
            result
        });
        debug!(codec = codec.name, cost, ?result, "decoded");
        (cost, result)
    }

    /// Reset the context, time encode and decode, then validate the round trip.
    pub fn run_codec(
        &mut self,
        ctx: &mut BenchmarkContext,
        codec: &CodecDescriptor,
    ) -> Result<CodecReport, BenchError> {
        ctx.reset();
        let encode = self.encode_phase(ctx, codec);
        let (decode, result) = self.decode_phase(ctx, codec);
        validator::validate(codec.name, ctx, result, &mut self.diagnostics)?;

        let report = CodecReport {
            name: codec.name,
            encode,
            decode,
            encoded_len: ctx.written,
        };
        info!(
            codec = report.name,
            encode, decode, encoded_len = report.encoded_len, "codec done"
        );
        Ok(report)
    }

    /// Run every codec in order, printing a row as soon as each one finishes.
    ///
    /// Stops at the first failure; rows already printed stay printed.
    pub fn run_all<'a, W: Write>(
        &mut self,
        ctx: &mut BenchmarkContext,
        codecs: impl IntoIterator<Item = &'a CodecDescriptor>,
        reporter: &mut Reporter<W>,
    ) -> Result<Vec<CodecReport>, BenchError> {
        reporter.header(ctx.dataset().len(), ctx.iterations())?;
        let mut reports = Vec::new();
        for codec in codecs {
            let report = self.run_codec(ctx, codec)?;
            reporter.row(&report)?;
            reports.push(report);
        }
        Ok(reports)
    }
}
