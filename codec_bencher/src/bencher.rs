/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::{hint::black_box, time::Duration};

use criterion::{
    BenchmarkGroup, Criterion, Throughput,
    measurement::{Measurement, WallTime},
};
use int_codecs::{CODECS, CodecDescriptor, MAX_ENCODED_LEN};
use rand::{SeedableRng, rngs::StdRng};

use crate::{BenchError, Mode, source};

/// Seed for the criterion datasets, so runs compare like with like.
const SEED: u64 = 0x5EED_C0DE;

/// A helper struct for benchmarking every codec in [`CODECS`] with criterion.
#[derive(Debug)]
pub struct CodecBencher {
    /// The values every codec encodes and decodes.
    values: Vec<u64>,

    /// How long to run benchmarks overall.
    measurement_time: Duration,

    /// The prefix added to the label of each benchmark group.
    prefix: String,
}

impl CodecBencher {
    /// Creates a new `CodecBencher` over `count` values generated with `mode`.
    ///
    /// Random modes use a fixed seed rather than the OS random source.
    pub fn new(
        prefix: String,
        mode: Mode,
        count: usize,
        measurement_time: Duration,
    ) -> Result<Self, BenchError> {
        let values = source::generate(mode, count, &mut StdRng::seed_from_u64(SEED))?;
        Ok(Self {
            values,
            measurement_time,
            prefix,
        })
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    fn benchmark_group<'a>(
        &self,
        c: &'a mut Criterion,
        label: &str,
    ) -> BenchmarkGroup<'a, WallTime> {
        let mut group = c.benchmark_group(format!("{}|{}", self.prefix, label));
        group.measurement_time(self.measurement_time);
        group.warm_up_time(Duration::from_secs(3));
        group.throughput(Throughput::Elements(self.values.len() as u64));
        group
    }

    /// Benchmark bulk encoding, one function per codec.
    pub fn encode_group(&self, c: &mut Criterion) {
        let mut group = self.benchmark_group(c, "Encode");
        for codec in &CODECS {
            encode_benchmark(&mut group, codec, &self.values);
        }
        group.finish();
    }

    /// Benchmark bulk decoding, one function per codec.
    pub fn decode_group(&self, c: &mut Criterion) {
        let mut group = self.benchmark_group(c, "Decode");
        for codec in &CODECS {
            decode_benchmark(&mut group, codec, &self.values);
        }
        group.finish();
    }
}

fn encode_benchmark<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    codec: &CodecDescriptor,
    values: &[u64],
) {
    let mut buf = vec![0u8; values.len() * MAX_ENCODED_LEN];
    group.bench_function(codec.name, |b| {
        b.iter(|| (codec.encode)(black_box(values), &mut buf))
    });
}

fn decode_benchmark<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    codec: &CodecDescriptor,
    values: &[u64],
) {
    // Pre-encode the values
    let mut buf = vec![0u8; values.len() * MAX_ENCODED_LEN];
    let written = (codec.encode)(values, &mut buf);
    buf.truncate(written);

    let mut out = vec![0u64; values.len()];
    group.bench_function(codec.name, |b| {
        b.iter(|| (codec.decode)(black_box(&buf), &mut out))
    });
}
