/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Benchmark bulk encoding and decoding of every codec, one dataset shape at a time.

use codec_bencher::{CodecBencher, Mode};
use criterion::{Criterion, criterion_group, criterion_main};
use std::time::Duration;

const COUNT: usize = 1000;

fn bench(c: &mut Criterion, prefix: &str, mode: Mode, measurement_time: Duration) {
    let bencher = CodecBencher::new(prefix.to_owned(), mode, COUNT, measurement_time)
        .expect("dataset generation failed");

    bencher.encode_group(c);
    bencher.decode_group(c);
}

fn benchmark_counting(c: &mut Criterion) {
    bench(c, "Counting", Mode::Counting, Duration::from_secs(3));
}

fn benchmark_randomized(c: &mut Criterion) {
    bench(c, "Randomized", Mode::Randomized, Duration::from_secs(5));
}

fn benchmark_trimmed(c: &mut Criterion) {
    bench(c, "Trimmed", Mode::Trimmed, Duration::from_secs(5));
}

criterion_group!(counting, benchmark_counting);
criterion_group!(randomized, benchmark_randomized);
criterion_group!(trimmed, benchmark_trimmed);
criterion_main!(counting, randomized, trimmed);
