//! Command interpreter
//!
//! One session owns one transaction under construction plus the
//! expectation buffer captured by the last `run` (or entered with
//! `expect`). Each logical line is dispatched left to right: a recognized
//! command consumes a fixed (or count-dependent) number of tokens and
//! dispatch continues on the tail, so several commands can share one
//! physical line. Input transports do not always preserve line breaks;
//! chaining keeps pasted blocks working anyway.
//!
//! Dispatch is a loop over consumed-token offsets, not recursion.

use std::io::{self, Write};

use crate::bus::BusTransport;
use crate::error::Warning;
use crate::format;
use crate::hex;
use crate::runner;
use crate::transaction::{Test, Transaction, BRIEF_LEN};

/// Help text shown by `?`/`help` and after an unrecognized command.
const HELP: &str = "\
commands (chainable on one line, all values hex):
  show                 print the current transaction
  run                  execute it and print the result as a test block
  check                re-execute and compare against the expectation
  addr <hex>           set the 7-bit device address
  n_write <hex>        set the write byte count (0..16)
  n_read <hex>         set the read byte count (0..16)
  write <hex>...       set n_write bytes of write data
  expect <hex>...      set n_read bytes of expected read-back
  ? | help             print this help
";

/// An interactive session: the injected bus, the output sink, and the
/// single current transaction/expectation pair. Created once at startup
/// and mutated in place for the life of the process; there is no history
/// and no undo.
pub struct Interpreter<B, W> {
    bus: B,
    out: W,
    tx: Transaction,
    expect: [u8; BRIEF_LEN],
}

impl<B: BusTransport, W: Write> Interpreter<B, W> {
    pub fn new(bus: B, out: W) -> Self {
        Self {
            bus,
            out,
            tx: Transaction::default(),
            expect: [0; BRIEF_LEN],
        }
    }

    /// The transaction currently under construction.
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// The current transaction paired with the current expectation.
    pub fn test(&self) -> Test {
        Test { tx: self.tx, expect: self.expect }
    }

    /// Mutable access to the injected bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Tear the session down into its bus and output sink.
    pub fn into_parts(self) -> (B, W) {
        (self.bus, self.out)
    }

    /// Tear the session down, keeping only the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Print the command help.
    pub fn print_help(&mut self) -> io::Result<()> {
        self.out.write_all(HELP.as_bytes())
    }

    /// Process one logical command line, dispatching every chained
    /// command it carries.
    pub fn interpret(&mut self, line: &str) -> io::Result<()> {
        let count = line.split_whitespace().count();
        let mut idx = 0;
        while idx < count {
            idx += self.dispatch(line, idx, count)?;
        }
        Ok(())
    }

    /// Handle the command at token `idx`, returning how many tokens it
    /// consumed. The first word is matched by case-sensitive prefix.
    fn dispatch(&mut self, line: &str, idx: usize, count: usize) -> io::Result<usize> {
        let word = line.split_whitespace().nth(idx).unwrap_or("");

        if word.starts_with('?') || word.starts_with("help") {
            self.print_help()?;
            // help swallows the rest of the line
            return Ok(count - idx);
        }
        if word.starts_with("show") {
            writeln!(self.out, "{}", format::render_transaction(&self.tx))?;
            return Ok(1);
        }
        if word.starts_with("run") {
            let mut observed = [0u8; BRIEF_LEN];
            runner::run(&mut self.bus, &self.tx, BRIEF_LEN, &mut observed);
            self.expect = observed;
            self.out
                .write_all(format::render_test(&self.tx, &observed).as_bytes())?;
            return Ok(1);
        }
        if word.starts_with("check") {
            let test = self.test();
            let outcome = runner::check(&mut self.bus, &test);
            if outcome.passed() {
                writeln!(self.out, "PASS: {} byte(s) match", test.tx.n_read)?;
            } else {
                runner::write_report(&mut self.out, &test, &outcome)?;
            }
            return Ok(1);
        }
        if word.starts_with("addr") {
            self.tx.set_addr(hex::token(line, idx + 1));
            return Ok(2);
        }
        if word.starts_with("n_write") {
            let warning = self.tx.set_n_write(hex::token(line, idx + 1));
            self.warn(warning)?;
            return Ok(2);
        }
        if word.starts_with("n_read") {
            let warning = self.tx.set_n_read(hex::token(line, idx + 1));
            self.warn(warning)?;
            return Ok(2);
        }
        if word.starts_with("write") {
            let n = self.tx.n_write;
            let mut bytes = [0u8; BRIEF_LEN];
            hex::tokens(line, idx + 1, &mut bytes[..n]);
            self.tx.set_write(0, n, &bytes[..n]);
            return Ok(1 + n);
        }
        if word.starts_with("expect") {
            let n = self.tx.n_read;
            let mut bytes = [0u8; BRIEF_LEN];
            hex::tokens(line, idx + 1, &mut bytes[..n]);
            self.expect[..n].copy_from_slice(&bytes[..n]);
            return Ok(1 + n);
        }

        self.warn(Some(Warning::UnknownCommand(word.to_string())))?;
        self.print_help()?;
        Ok(1)
    }

    fn warn(&mut self, warning: Option<Warning>) -> io::Result<()> {
        if let Some(w) = warning {
            writeln!(self.out, "warning: {}", w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FixtureBus;

    fn session() -> Interpreter<FixtureBus, Vec<u8>> {
        Interpreter::new(FixtureBus::new(), Vec::new())
    }

    fn output(interp: &Interpreter<FixtureBus, Vec<u8>>) -> String {
        String::from_utf8(interp.out.clone()).unwrap()
    }

    #[test]
    fn test_field_commands_mutate_transaction() {
        let mut interp = session();
        interp.interpret("addr 68").unwrap();
        interp.interpret("n_write 2").unwrap();
        interp.interpret("write 3B 7F").unwrap();
        interp.interpret("n_read 6").unwrap();
        let tx = interp.transaction();
        assert_eq!(tx.addr, 0x68);
        assert_eq!(tx.n_write, 2);
        assert_eq!(&tx.write[..2], &[0x3B, 0x7F]);
        assert_eq!(tx.n_read, 6);
    }

    #[test]
    fn test_chained_commands_on_one_line() {
        let mut interp = session();
        interp
            .interpret("addr 68 n_write 1 n_read 6 write 3B")
            .unwrap();
        let tx = interp.transaction();
        assert_eq!(tx.addr, 0x68);
        assert_eq!(tx.n_write, 1);
        assert_eq!(tx.n_read, 6);
        assert_eq!(tx.write[0], 0x3B);
        assert!(output(&interp).is_empty());
    }

    #[test]
    fn test_extra_whitespace_is_equivalent() {
        let mut a = session();
        let mut b = session();
        a.interpret("addr 10  n_write 1").unwrap();
        b.interpret("addr 10 n_write 1").unwrap();
        assert_eq!(a.transaction(), b.transaction());
    }

    #[test]
    fn test_oversized_count_warns_and_clamps() {
        let mut interp = session();
        interp.interpret("n_write 1F").unwrap();
        assert_eq!(interp.transaction().n_write, BRIEF_LEN);
        let out = output(&interp);
        assert!(out.contains("warning:"));
        assert!(out.contains("31"));
        assert!(out.contains("16"));
    }

    #[test]
    fn test_unknown_command_warns_and_reprints_help() {
        let mut interp = session();
        interp.interpret("addr 68").unwrap();
        let before = *interp.transaction();
        interp.interpret("foo bar").unwrap();
        assert_eq!(*interp.transaction(), before);
        let out = output(&interp);
        assert!(out.contains("unknown command: foo"));
        assert!(out.contains("unknown command: bar"));
        assert!(out.contains("n_write <hex>"));
    }

    #[test]
    fn test_help_swallows_rest_of_line() {
        let mut interp = session();
        interp.interpret("help addr 68").unwrap();
        // nothing after `help` was dispatched
        assert_eq!(interp.transaction().addr, 0);
        assert!(!output(&interp).contains("unknown command"));
    }

    #[test]
    fn test_question_mark_is_help() {
        let mut interp = session();
        interp.interpret("?").unwrap();
        assert!(output(&interp).contains("print this help"));
    }

    #[test]
    fn test_show_renders_current_transaction() {
        let mut interp = session();
        interp.interpret("addr 68 n_write 1 write 3B show").unwrap();
        assert!(output(&interp).contains("/* addr */ 0x68"));
        assert!(output(&interp).contains("/* write */ { 0x3B}"));
    }

    #[test]
    fn test_run_captures_expectation() {
        let mut interp = Interpreter::new(
            FixtureBus::with_response(&[0x03, 0x74, 0x1B, 0x6C, 0x3A, 0x14]),
            Vec::new(),
        );
        interp
            .interpret("addr 68 n_write 1 n_read 6 write 3B run")
            .unwrap();
        let test = interp.test();
        assert_eq!(&test.expect[..6], &[0x03, 0x74, 0x1B, 0x6C, 0x3A, 0x14]);
    }

    #[test]
    fn test_expect_then_check_reports_pass() {
        let mut interp = Interpreter::new(
            FixtureBus::with_response(&[0xAA, 0xBB]),
            Vec::new(),
        );
        interp
            .interpret("addr 10 n_read 2 expect AA BB check")
            .unwrap();
        assert!(output(&interp).contains("PASS: 2 byte(s) match"));
    }

    #[test]
    fn test_check_failure_prints_report() {
        let mut interp = Interpreter::new(
            FixtureBus::with_response(&[0xAA, 0xBC]),
            Vec::new(),
        );
        interp
            .interpret("addr 10 n_read 2 expect AA BB check")
            .unwrap();
        let out = output(&interp);
        assert!(out.contains("FAIL: 1 byte(s) differ, first at index 1"));
        assert!(out.contains("expect { 0xAA, 0xBB}"));
        assert!(out.contains("actual { 0xAA, 0xBC}"));
    }
}
