//! Plain-text rendering of score matrices and alignments.

use std::fmt::Write as _;

use crate::scoring::ScoreMatrix;
use crate::traceback::{AlignmentResult, TracebackOperation};

/// Lays the matrix out as a table with `seq2` across the top and `seq1` down
/// the side. The boundary row and column are labelled `-`. All columns share
/// the width of the widest entry.
pub fn format_matrix(matrix: &ScoreMatrix, seq1: &[u8], seq2: &[u8]) -> String {
    let width = matrix
        .iter_rows()
        .flatten()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);
    let label = |seq: &[u8], k: usize| -> char {
        match k {
            0 => '-',
            _ => seq.get(k - 1).map_or('?', |&c| char::from(c)),
        }
    };

    let mut out = String::new();
    out.push(' ');
    for j in 0..matrix.cols() {
        let _ = write!(out, " {:>width$}", label(seq2, j));
    }
    out.push('\n');
    for (i, row) in matrix.iter_rows().enumerate() {
        out.push(label(seq1, i));
        for v in row {
            let _ = write!(out, " {:>width$}", v);
        }
        out.push('\n');
    }
    out
}

/// The two aligned sequences with a marker line between them: `|` for a
/// match, `.` for a mismatch, blank for a gap.
pub fn format_alignment(result: &AlignmentResult) -> String {
    let markers: String = result
        .operations
        .iter()
        .map(|op| match op {
            TracebackOperation::Match => '|',
            TracebackOperation::Mismatch => '.',
            TracebackOperation::Insertion | TracebackOperation::Deletion => ' ',
        })
        .collect();
    format!(
        "{}\n{}\n{}\n",
        result.aligned_seq1_str(),
        markers,
        result.aligned_seq2_str()
    )
}
