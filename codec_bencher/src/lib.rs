/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Supporting types and functions for benchmarking the codecs in [`int_codecs`].
//!
//! A run goes through a fixed sequence of phases:
//!
//! 1. [`source::generate`] fills the dataset once.
//! 2. [`Harness::calibrate`] measures the cost of timing an empty operation.
//! 3. For each codec, [`Harness::run_codec`] times encode and decode,
//!    then [`validator::validate`] compares the decoded output with the dataset.
//! 4. [`Reporter`] prints one row per codec.
//!
//! Any failure stops the run: a benchmark that carries on after a codec
//! produced wrong output would report meaningless numbers.

use thiserror::Error;

pub use bencher::CodecBencher;
pub use clock::{Clock, PlatformClock};
pub use context::BenchmarkContext;
pub use harness::{CodecReport, Harness};
pub use report::Reporter;
pub use source::Mode;

pub mod args;
pub mod bencher;
pub mod clock;
pub mod context;
pub mod harness;
pub mod logging;
pub mod report;
pub mod source;
pub mod validator;

/// Errors that abort a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    /// One of the buffers couldn't be allocated.
    #[error("unable to allocate {what} ({bytes} bytes)")]
    AllocationFailure {
        /// Which buffer.
        what: &'static str,
        /// The requested size, saturated on overflow.
        bytes: usize,
    },
    /// The OS random source failed before producing the whole dataset.
    #[error("entropy source unavailable")]
    EntropyUnavailable(#[source] rand::Error),
    /// A codec's decoded output differs from the dataset.
    #[error("{codec}: decoded value doesn't match original value")]
    ValidationMismatch {
        /// The codec under test.
        codec: &'static str,
        /// Index of the first differing value. `None` when the values match
        /// but the decoder reported an error.
        first_difference: Option<usize>,
    },
    /// The report couldn't be written.
    #[error("unable to write report")]
    Output(#[from] std::io::Error),
}

impl BenchError {
    /// The process exit status for this error.
    ///
    /// Usage errors are reported by `clap`, which exits with status 2 on its own.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::AllocationFailure { .. }
            | Self::EntropyUnavailable(_)
            | Self::ValidationMismatch { .. }
            | Self::Output(_) => 1,
        }
    }
}
