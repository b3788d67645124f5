/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::io;

use codec_bencher::{BenchError, Mode, source};
use int_codecs::CODECS;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use rstest::rstest;

/// Hands out a fixed list of samples, in the order they are listed.
struct Replay(Vec<u64>);

impl RngCore for Replay {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.try_fill_bytes(dest).unwrap()
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        for (chunk, sample) in dest.chunks_exact_mut(8).zip(&self.0) {
            chunk.copy_from_slice(&sample.to_ne_bytes());
        }
        Ok(())
    }
}

/// An entropy source that is never available.
struct Unavailable;

impl RngCore for Unavailable {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }

    fn fill_bytes(&mut self, _: &mut [u8]) {
        unimplemented!()
    }

    fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(io::Error::other("no entropy")))
    }
}

const SAMPLES: [u64; 4] = [
    0x3fff_ffff_ffff_ffff,
    0x7fff_ffff_ffff_ffff,
    0xbfff_ffff_ffff_ffff,
    u64::MAX,
];

#[test]
fn counting_ignores_the_random_source() {
    let values = source::generate(Mode::Counting, 5, &mut Unavailable).unwrap();
    assert_eq!(values, [0, 1, 2, 3, 4]);
}

#[test]
fn randomized_drops_two_low_bits() {
    let values = source::generate(Mode::Randomized, 4, &mut Replay(SAMPLES.to_vec())).unwrap();
    assert_eq!(values, SAMPLES.map(|s| s >> 2));
}

#[test]
fn trimmed_keeps_top_bits_per_class() {
    let values = source::generate(Mode::Trimmed, 4, &mut Replay(SAMPLES.to_vec())).unwrap();
    assert_eq!(
        values,
        [0xf, 0x1fff, 0x2fff_ffff, 0x3fff_ffff_ffff_ffff]
    );
}

#[rstest]
#[case::randomized(Mode::Randomized)]
#[case::trimmed(Mode::Trimmed)]
fn entropy_failure(#[case] mode: Mode) {
    let err = source::generate(mode, 8, &mut Unavailable).unwrap_err();
    assert!(matches!(err, BenchError::EntropyUnavailable(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn trimmed_widths_cover_every_class() {
    let values = source::generate(Mode::Trimmed, 4096, &mut StdRng::seed_from_u64(7)).unwrap();
    let bits = |v: u64| u64::BITS - v.leading_zeros();

    let mut per_class = [0usize; 4];
    for &v in &values {
        let class = match bits(v) {
            0..=6 => 0,
            7..=14 => 1,
            15..=30 => 2,
            _ => 3,
        };
        per_class[class] += 1;
    }
    // Each class is drawn with probability 1/4.
    for n in per_class {
        assert!((800..1250).contains(&n), "{per_class:?}");
    }
}

proptest! {
    #[test]
    fn random_values_fit_every_codec(seed in any::<u64>(), trimmed in any::<bool>()) {
        let mode = if trimmed { Mode::Trimmed } else { Mode::Randomized };
        let values = source::generate(mode, 64, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(values.len(), 64);
        for codec in &CODECS {
            prop_assert!(values.iter().all(|&v| v <= codec.max_value), "{}", codec.name);
        }
    }
}
