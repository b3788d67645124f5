/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::{io, process};

use clap::Parser;
use codec_bencher::{
    BenchError, BenchmarkContext, Harness, PlatformClock, Reporter, args::Options, clock,
    logging, source,
};
use rand::rngs::OsRng;
use tracing::{error, info};

fn main() {
    let options = Options::parse();
    if let Err(err) = logging::try_init() {
        eprintln!("Unable to install tracing subscriber: {err}");
    }

    if let Err(err) = run(&options) {
        error!(%err, "benchmark aborted");
        process::exit(err.exit_code());
    }
}

fn run(options: &Options) -> Result<(), BenchError> {
    let codecs = options.selected_codecs();
    info!(
        mode = ?options.mode,
        count = options.count,
        iterations = options.iterations,
        codecs = codecs.len(),
        unit = clock::PLATFORM_UNIT,
        "starting"
    );

    let dataset = source::generate(options.mode, options.count, &mut OsRng)?;
    let mut ctx = BenchmarkContext::new(dataset, options.iterations)?;

    let mut harness = Harness::new(PlatformClock::default());
    harness.calibrate(&mut ctx);

    let mut reporter = Reporter::new(io::stdout().lock());
    let reports = harness.run_all(&mut ctx, codecs, &mut reporter)?;
    if options.summary {
        reporter.summary(options.count, &reports)?;
    }
    Ok(())
}
