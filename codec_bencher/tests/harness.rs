/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::{cell::Cell, io};

use codec_bencher::{
    BenchError, BenchmarkContext, Clock, CodecReport, Harness, Reporter, validator,
};
use int_codecs::{CODECS, find};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Replays a fixed list of readings.
struct Script {
    readings: Vec<u64>,
    next: Cell<usize>,
}

impl Script {
    /// Readings such that consecutive measurements take `durations`.
    fn from_durations(durations: &[u64]) -> Self {
        let mut now = 1_000;
        let mut readings = Vec::new();
        for d in durations {
            readings.extend([now, now + d]);
            now += d + 17;
        }
        Self {
            readings,
            next: Cell::new(0),
        }
    }
}

impl Clock for Script {
    fn now(&self) -> u64 {
        let i = self.next.get();
        self.next.set(i + 1);
        *self.readings.get(i).expect("clock script exhausted")
    }
}

/// Advances by a fixed step on every reading.
struct Stepping(Cell<u64>);

impl Clock for Stepping {
    fn now(&self) -> u64 {
        let now = self.0.get();
        self.0.set(now + 10);
        now
    }
}

fn counting(count: u64, iterations: usize) -> BenchmarkContext {
    BenchmarkContext::new((0..count).collect(), iterations).unwrap()
}

#[test]
fn minimum_sample_minus_floor() {
    let clock = Script::from_durations(&[
        5, 4, 7, // calibration
        20, 12, 15, // encode
        9, 30, 6, // decode
    ]);
    let mut harness = Harness::with_diagnostics(clock, io::sink());
    let mut ctx = counting(10, 3);

    assert_eq!(harness.calibrate(&mut ctx), 4);
    assert_eq!(ctx.floor(), 4);

    let report = harness.run_codec(&mut ctx, find("memcpy").unwrap()).unwrap();
    assert_eq!(
        report,
        CodecReport {
            name: "memcpy",
            encode: 8,
            decode: 2,
            encoded_len: 80,
        }
    );
    assert_eq!(ctx.decoded(), ctx.dataset());
}

#[test]
fn counting_run_over_every_codec() {
    let mut harness = Harness::with_diagnostics(Stepping(Cell::new(0)), io::sink());
    let mut ctx = counting(100, 2);
    harness.calibrate(&mut ctx);

    let mut reporter = Reporter::new(Vec::new());
    let reports = harness.run_all(&mut ctx, &CODECS, &mut reporter).unwrap();

    let lengths: Vec<_> = reports.iter().map(|r| (r.name, r.encoded_len)).collect();
    assert_eq!(
        lengths,
        [
            ("memcpy", 800),
            ("endian", 800),
            ("highbitbe", 100),
            ("highbitle", 100),
            ("quic", 136),
            ("streamid", 136),
        ]
    );
    assert!(reports.iter().all(|r| r.encode == 0 && r.decode == 0));

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("Encoding and decoding 100 integers over 2 iterations")
    );
    assert_eq!(lines.next(), Some("--- Type ---\t Encode \t Decode \t Length"));
    assert_eq!(lines.next(), Some("memcpy:     \t       0\t       0\t     800"));
    assert_eq!(lines.count(), 5);
}

/// Flipping the low bit of the first encoded byte changes the first value
/// without breaking the framing, so only a value-by-value comparison notices.
#[rstest]
fn corrupted_byte_is_detected(
    #[values("memcpy", "endian", "highbitbe", "highbitle", "quic", "streamid")] name: &str,
) {
    let codec = find(name).unwrap();
    let harness = Harness::with_diagnostics(Stepping(Cell::new(0)), io::sink());
    let mut ctx = counting(16, 1);

    harness.encode_phase(&mut ctx, codec);
    ctx.encoded_mut()[0] ^= 0x01;
    let (_, result) = harness.decode_phase(&mut ctx, codec);
    assert!(result.is_ok());

    let mut diagnostics = Vec::new();
    let err = validator::validate(codec.name, &ctx, result, &mut diagnostics).unwrap_err();
    assert!(matches!(
        err,
        BenchError::ValidationMismatch {
            first_difference: Some(0),
            ..
        }
    ));

    let dump = String::from_utf8(diagnostics).unwrap();
    assert!(dump.starts_with(&format!(
        "{name}: decoded value doesn't match original value\nIntegers: 0000000000000000 0000000000000001"
    )));
    assert_eq!(dump.lines().count(), 4);
}

#[test]
fn truncated_input_aborts_run() {
    let codec = find("highbitbe").unwrap();
    let harness = Harness::with_diagnostics(Stepping(Cell::new(0)), io::sink());
    let mut ctx = counting(4, 1);

    harness.encode_phase(&mut ctx, codec);
    // The last value now claims another byte follows.
    *ctx.encoded_mut().last_mut().unwrap() |= 0x80;
    let (_, result) = harness.decode_phase(&mut ctx, codec);
    assert!(result.is_err());

    let err = validator::validate(codec.name, &ctx, result, &mut io::sink()).unwrap_err();
    assert!(matches!(err, BenchError::ValidationMismatch { codec: "highbitbe", .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn stale_output_is_cleared_between_codecs() {
    let mut harness = Harness::with_diagnostics(Stepping(Cell::new(0)), io::sink());
    let mut ctx = counting(8, 1);

    harness.run_codec(&mut ctx, find("memcpy").unwrap()).unwrap();
    assert_eq!(ctx.encoded().len(), 64);

    harness.run_codec(&mut ctx, find("quic").unwrap()).unwrap();
    assert_eq!(ctx.encoded().len(), 8);
    assert!(ctx.buffer()[8..].iter().all(|&b| b == 0));
}
