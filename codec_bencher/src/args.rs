/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use clap::{
    Parser,
    builder::{PossibleValuesParser, RangedU64ValueParser},
};
use int_codecs::{CODECS, CodecDescriptor};

use crate::Mode;

/// Time the encode and decode of a dataset of 64-bit integers with every
/// integer codec, and print the fastest run of each.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Options {
    /// How the dataset is filled.
    #[arg(value_enum, default_value_t = Mode::Trimmed)]
    pub mode: Mode,

    /// Number of integers in the dataset.
    #[arg(default_value_t = 1000, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub count: usize,

    /// Timed repetitions of each encode and decode.
    #[arg(default_value_t = 1000, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub iterations: usize,

    /// Only run the named codec. May be repeated.
    #[arg(
        long = "codec",
        value_name = "NAME",
        value_parser = PossibleValuesParser::new(CODECS.iter().map(|codec| codec.name))
    )]
    pub codecs: Vec<String>,

    /// Print the encoded size and compression ratio of each codec after the table.
    #[arg(long)]
    pub summary: bool,
}

impl Options {
    /// The codecs to run, in table order.
    pub fn selected_codecs(&self) -> Vec<&'static CodecDescriptor> {
        CODECS
            .iter()
            .filter(|codec| self.codecs.is_empty() || self.codecs.iter().any(|n| n == codec.name))
            .collect()
    }
}
