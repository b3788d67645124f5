/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Log output for the benchmark driver.
//!
//! Events go to standard error so that standard output only carries the
//! report. The verbosity is read from the `RUST_LOG` environment variable,
//! e.g. `RUST_LOG=codec_bencher=debug` to follow every phase of every codec.
//! Without it only warnings and errors are printed.

use std::{error::Error, io};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs a global subscriber writing to standard error if one is not already set.
///
/// # Errors
///
/// Returns an Error if a global subscriber was already installed.
pub fn try_init() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(env_filter)
        .without_time()
        .with_writer(io::stderr)
        .try_init()
}
