//! Transaction execution and test evaluation
//!
//! [`run`] drives one transaction over the injected transport; [`check`]
//! runs a test's transaction and compares the read-back against the
//! expectation, producing an [`Outcome`]. A failing outcome is reported
//! with [`write_report`]: the transaction, both byte sequences, and a
//! unified diff of the per-byte views.

use std::io::{self, Write};

use similar::TextDiff;

use crate::bus::BusTransport;
use crate::format;
use crate::transaction::{Test, Transaction, BRIEF_LEN};

/// Execute `tx` against the bus, storing received bytes in `out`.
///
/// The write phase keeps the bus held when a read phase follows, giving a
/// combined write-then-read transaction with a repeated start. The read
/// phase asks the transport for `max_read` bytes, or `tx.n_read` when that
/// is larger: the request is never reduced below the caller's ask. Bytes
/// past `out.len()` are drained from the transport and dropped.
///
/// No retries and no validation: a failed exchange is reflected as
/// whatever bytes the transport returns.
pub fn run<B: BusTransport>(bus: &mut B, tx: &Transaction, max_read: usize, out: &mut [u8]) {
    if tx.n_write > 0 {
        bus.begin_write(tx.addr);
        for &b in tx.write.iter().take(tx.n_write) {
            bus.write_byte(b);
        }
        bus.end_write(tx.n_read == 0);
    }
    if tx.n_read > 0 && max_read > 0 && !out.is_empty() {
        let request = if tx.n_read > max_read { tx.n_read } else { max_read };
        bus.request_read(tx.addr, request, true);
        for i in 0..request {
            let b = bus.read_byte();
            if let Some(slot) = out.get_mut(i) {
                *slot = b;
            }
        }
    }
}

/// Result of checking a test against the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Positions where actual differed from expected; 0 is a pass.
    pub diff_count: usize,
    /// Index of the first differing position, if any.
    pub first_diff: Option<usize>,
    /// What the device actually returned.
    pub actual: [u8; BRIEF_LEN],
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.diff_count == 0
    }
}

/// Run a test's transaction and compare the read-back against its
/// expectation, byte for byte over the first `n_read` positions.
pub fn check<B: BusTransport>(bus: &mut B, test: &Test) -> Outcome {
    let mut actual = [0u8; BRIEF_LEN];
    run(bus, &test.tx, BRIEF_LEN, &mut actual);

    let mut diff_count = 0;
    let mut first_diff = None;
    for i in 0..test.tx.n_read.min(BRIEF_LEN) {
        if actual[i] != test.expect[i] {
            diff_count += 1;
            if first_diff.is_none() {
                first_diff = Some(i);
            }
        }
    }
    Outcome { diff_count, first_diff, actual }
}

/// Write the failure report for a non-passing outcome.
pub fn write_report<W: Write>(out: &mut W, test: &Test, outcome: &Outcome) -> io::Result<()> {
    writeln!(
        out,
        "FAIL: {} byte(s) differ, first at index {}",
        outcome.diff_count,
        outcome.first_diff.unwrap_or(0)
    )?;
    writeln!(out, "{}", format::render_transaction(&test.tx))?;
    writeln!(out, "  expect {}", format::render_bytes(test.tx.n_read, &test.expect))?;
    writeln!(out, "  actual {}", format::render_bytes(test.tx.n_read, &outcome.actual))?;

    let expect_lines = byte_lines(test.tx.n_read, &test.expect);
    let actual_lines = byte_lines(test.tx.n_read, &outcome.actual);
    let diff = TextDiff::from_lines(&expect_lines, &actual_lines);
    let udiff = diff.unified_diff().header("expect", "actual").to_string();
    write!(out, "{}", udiff)?;
    Ok(())
}

/// One byte per line, indexed, so the unified diff points at positions.
fn byte_lines(n: usize, data: &[u8]) -> String {
    let mut s = String::new();
    for (i, b) in data.iter().take(n).enumerate() {
        s.push_str(&format!("[{}] 0x{:X}\n", i, b));
    }
    s
}
