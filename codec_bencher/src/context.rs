/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use int_codecs::MAX_ENCODED_LEN;
use tracing::debug;

use crate::{BenchError, source::try_alloc};

/// The buffers shared by every codec trial.
///
/// Allocated once, then reused: [`BenchmarkContext::reset`] zeroes the
/// encoding buffer and the decoded output before each trial, so bytes left
/// over by a previous codec can't make a broken decoder look right.
#[derive(Debug)]
pub struct BenchmarkContext {
    /// The values under test. Never modified after construction.
    pub(crate) dataset: Vec<u64>,
    /// Room for `MAX_ENCODED_LEN` bytes per value.
    pub(crate) buffer: Vec<u8>,
    pub(crate) decoded: Vec<u64>,
    /// The number of bytes produced by the most recent encode.
    pub(crate) written: usize,
    /// Timed repetitions per phase.
    pub(crate) iterations: usize,
    /// Cost of an empty measurement, subtracted from every sample.
    pub(crate) floor: u64,
}

impl BenchmarkContext {
    /// Allocate the encoding buffer and decoded output for `dataset`.
    ///
    /// # Panics
    ///
    /// Panics if `iterations` is zero.
    pub fn new(dataset: Vec<u64>, iterations: usize) -> Result<Self, BenchError> {
        assert!(iterations > 0, "at least one iteration is required");
        let count = dataset.len();

        let buffer_len = count.checked_mul(MAX_ENCODED_LEN).ok_or(BenchError::AllocationFailure {
            what: "encoding buffer",
            bytes: usize::MAX,
        })?;
        let mut buffer = try_alloc::<u8>("encoding buffer", buffer_len)?;
        buffer.resize(buffer_len, 0);

        let mut decoded = try_alloc::<u64>("decoded output", count)?;
        decoded.resize(count, 0);

        debug!(count, buffer_len, iterations, "allocated benchmark context");
        Ok(Self {
            dataset,
            buffer,
            decoded,
            written: 0,
            iterations,
            floor: 0,
        })
    }

    /// Zero the encoding buffer and the decoded output.
    pub fn reset(&mut self) {
        self.buffer.fill(0);
        self.decoded.fill(0);
        self.written = 0;
    }

    pub fn dataset(&self) -> &[u64] {
        &self.dataset
    }

    /// The whole encoding buffer, including bytes past the last encode.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// The bytes written by the most recent encode.
    pub fn encoded(&self) -> &[u8] {
        &self.buffer[..self.written]
    }

    /// Mutable access to the encoded bytes, to inject faults between encode and decode.
    pub fn encoded_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[..self.written]
    }

    pub fn decoded(&self) -> &[u64] {
        &self.decoded
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The calibration floor, zero until [`crate::Harness::calibrate`] ran.
    pub fn floor(&self) -> u64 {
        self.floor
    }
}
