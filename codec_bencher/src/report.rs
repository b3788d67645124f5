/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

use std::io::{self, Write};

use crate::CodecReport;

/// Size of a value stored uncompressed.
const RAW_VALUE_LEN: usize = size_of::<u64>();

/// Writes the benchmark table.
#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the summary line and the column header.
    pub fn header(&mut self, count: usize, iterations: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "Encoding and decoding {count} integers over {iterations} iterations"
        )?;
        writeln!(self.out, "--- Type ---\t Encode \t Decode \t Length")
    }

    /// Write one codec's row and flush, so rows show up while the run goes on.
    pub fn row(&mut self, report: &CodecReport) -> io::Result<()> {
        writeln!(
            self.out,
            "{:<12}\t{:>8}\t{:>8}\t{:>8}",
            format!("{}:", report.name),
            report.encode,
            report.decode,
            report.encoded_len
        )?;
        self.out.flush()
    }

    /// Write the encoded size of each codec next to the raw size of `count` values.
    pub fn summary(&mut self, count: usize, reports: &[CodecReport]) -> io::Result<()> {
        let raw = count * RAW_VALUE_LEN;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Encoding Statistics:\n- Raw data size: {:.3} KiB ({count} u64 values)",
            kib(raw)
        )?;
        for report in reports {
            writeln!(
                self.out,
                "- {}: {:.3} KiB, {:.2} bytes/value ({:.2}x compression)",
                report.name,
                kib(report.encoded_len),
                ratio(report.encoded_len, count),
                ratio(raw, report.encoded_len),
            )?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn kib(bytes: usize) -> f64 {
    bytes as f64 / 1024.0
}

/// `num / den`, or zero for an empty denominator.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
