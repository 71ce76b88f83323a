//! Deterministic rendering of transactions and tests
//!
//! The emitted text doubles as the interchange format. A rendered test
//! block pastes verbatim into C-style source as an initializer, and pastes
//! back into the interpreter as a command sequence: the comment and brace
//! punctuation is delimiter noise to the line assembler, leaving the field
//! names as commands and the values as their arguments.

use crate::transaction::Transaction;

/// Type name used in emitted test blocks.
pub const TEST_TYPE: &str = "I2C_test_brief";

/// Variable name used in emitted test blocks.
pub const TEST_NAME: &str = "test_new";

/// Render the first `n` bytes of `data` as `{ 0x3B, 0x74}`: uppercase
/// hex, no zero padding, comma-space separated, no trailing comma.
pub fn render_bytes(n: usize, data: &[u8]) -> String {
    let mut s = String::from("{ ");
    for (i, b) in data.iter().take(n).enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(&format!("0x{:X}", b));
    }
    s.push('}');
    s
}

/// Render a header value: bare when a single digit reads the same in
/// decimal and hex, `0x`-prefixed otherwise.
fn header_value(v: usize) -> String {
    if v > 9 {
        format!("0x{:X}", v)
    } else {
        format!("{}", v)
    }
}

/// Render a transaction as a brace-initializer block, one commented field
/// per line.
pub fn render_transaction(tx: &Transaction) -> String {
    format!(
        "  {{\n    /* addr */ {},\n    /* n_write */ {},\n    /* n_read */ {},\n    /* write */ {}\n  }}",
        header_value(tx.addr as usize),
        header_value(tx.n_write),
        header_value(tx.n_read),
        render_bytes(tx.n_write, &tx.write),
    )
}

/// Render a transaction plus its observed read-back as a full test block,
/// terminated with `};` so it can be copied into source unchanged.
pub fn render_test(tx: &Transaction, observed: &[u8]) -> String {
    format!(
        "const static {} {} = {{\n/*tx*/{}\n,\n  /*expect*/ {}\n}};\n",
        TEST_TYPE,
        TEST_NAME,
        render_transaction(tx),
        render_bytes(tx.n_read, observed),
    )
}
