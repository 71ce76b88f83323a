//! i2cprobe: an interactive I2C transaction workbench
//!
//! Assemble a bus transaction at a prompt — device address, bytes to
//! write, number of bytes to read — execute it against hardware, and
//! capture the observed response as a regression test rendered in a
//! portable initializer syntax. Intended for bringing up or validating
//! peripheral devices on a two-wire addressable bus.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Print the current transaction |
//! | `run` | Execute it and print the result as a test block |
//! | `check` | Re-execute and compare against the expectation |
//! | `addr <hex>` | Set the 7-bit device address |
//! | `n_write <hex>` | Set the write byte count |
//! | `n_read <hex>` | Set the read byte count |
//! | `write <hex>...` | Set the write data bytes |
//! | `expect <hex>...` | Set the expected read-back bytes |
//! | `?` / `help` | Print help |
//!
//! Several commands may share one physical line; dispatch walks the
//! tokens left to right.
//!
//! # Captured tests
//!
//! `run` emits a block like:
//!
//! ```text
//! const static I2C_test_brief test_new = {
//! /*tx*/  {
//!     /* addr */ 0x68,
//!     /* n_write */ 1,
//!     /* n_read */ 6,
//!     /* write */ { 0x3B}
//!   }
//! ,
//!   /*expect*/ { 0x3, 0x74, 0x1B, 0x6C, 0x3A, 0x14}
//! };
//! ```
//!
//! The block compiles as a C initializer, and it round-trips: pasted back
//! into the interpreter, the punctuation is delimiter noise and the field
//! comments become commands, reproducing the same transaction and
//! expectation.
//!
//! # Embedding
//!
//! Hardware is injected through [`BusTransport`]; output goes to any
//! [`std::io::Write`]. [`FixtureBus`] replays canned bytes and records
//! bus traffic for tests, and [`SimBus`] simulates a register-file device
//! bank so the binary runs without hardware.

mod bus;
mod error;
mod format;
mod hex;
mod interpreter;
mod line;
mod runner;
mod transaction;

pub use bus::{BusOp, BusTransport, FixtureBus, SimBus};
pub use error::Warning;
pub use format::{render_bytes, render_test, render_transaction, TEST_NAME, TEST_TYPE};
pub use hex::{token as hex_token, tokens as hex_tokens};
pub use interpreter::Interpreter;
pub use line::LineAssembler;
pub use runner::{check, run, write_report, Outcome};
pub use transaction::{clamp_count, Test, Transaction, BRIEF_LEN};
