//! Transaction and test data model
//!
//! The "brief" fixed-capacity representation of one bus exchange: an
//! optional write phase followed by an optional read phase, addressed to
//! a single device. Capacity is [`BRIEF_LEN`]; every externally supplied
//! count passes through [`clamp_count`] before it reaches a length field,
//! so the meaningful prefix of a buffer never exceeds the buffer itself.

use crate::error::Warning;

/// Capacity of the brief write/expect buffers.
pub const BRIEF_LEN: usize = 16;

/// One I2C exchange under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    /// 7-bit device address. Stored as given, truncated to a byte; bits
    /// past the low 7 are meaningless on the wire.
    pub addr: u8,
    /// Number of bytes to send. Always `<= BRIEF_LEN`.
    pub n_write: usize,
    /// Number of bytes to read back; 0 means no read phase.
    /// Always `<= BRIEF_LEN`.
    pub n_read: usize,
    /// Write data; only the first `n_write` entries are meaningful.
    pub write: [u8; BRIEF_LEN],
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            addr: 0,
            n_write: 0,
            n_read: 0,
            write: [0; BRIEF_LEN],
        }
    }
}

/// A transaction paired with the bytes the device is expected to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Test {
    pub tx: Transaction,
    /// Expected read-back; only the first `tx.n_read` entries are
    /// meaningful.
    pub expect: [u8; BRIEF_LEN],
}

/// Bound a count into `[0, BRIEF_LEN]`, reporting when it had to move.
pub fn clamp_count(v: i32) -> (usize, Option<Warning>) {
    if v < 0 {
        (0, Some(Warning::CountClamped { given: v, clamped: 0 }))
    } else if v as usize > BRIEF_LEN {
        (
            BRIEF_LEN,
            Some(Warning::CountClamped { given: v, clamped: BRIEF_LEN }),
        )
    } else {
        (v as usize, None)
    }
}

impl Transaction {
    /// Set the device address. No range check beyond byte truncation.
    pub fn set_addr(&mut self, v: i32) {
        self.addr = v as u8;
    }

    /// Set the write count, clamped into `[0, BRIEF_LEN]`.
    pub fn set_n_write(&mut self, v: i32) -> Option<Warning> {
        let (n, warning) = clamp_count(v);
        self.n_write = n;
        warning
    }

    /// Set the read count, clamped into `[0, BRIEF_LEN]`.
    pub fn set_n_read(&mut self, v: i32) -> Option<Warning> {
        let (n, warning) = clamp_count(v);
        self.n_read = n;
        warning
    }

    /// Overwrite `count` write-buffer entries starting at `start`.
    /// Entries past the end of either buffer are dropped, never written
    /// out of bounds.
    pub fn set_write(&mut self, start: usize, count: usize, bytes: &[u8]) {
        for i in 0..count {
            let Some(&b) = bytes.get(i) else { break };
            let Some(slot) = self.write.get_mut(start + i) else { break };
            *slot = b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_in_range_is_identity() {
        for v in 0..=BRIEF_LEN as i32 {
            let (n, warning) = clamp_count(v);
            assert_eq!(n, v as usize);
            assert!(warning.is_none());
        }
    }

    #[test]
    fn test_clamp_negative_to_zero() {
        let (n, warning) = clamp_count(-5);
        assert_eq!(n, 0);
        assert_eq!(warning, Some(Warning::CountClamped { given: -5, clamped: 0 }));
    }

    #[test]
    fn test_clamp_oversized_to_capacity() {
        let (n, warning) = clamp_count(31);
        assert_eq!(n, BRIEF_LEN);
        assert_eq!(
            warning,
            Some(Warning::CountClamped { given: 31, clamped: BRIEF_LEN })
        );
    }

    #[test]
    fn test_set_addr_truncates() {
        let mut tx = Transaction::default();
        tx.set_addr(0x168);
        assert_eq!(tx.addr, 0x68);
    }

    #[test]
    fn test_count_setters_go_through_clamp() {
        let mut tx = Transaction::default();
        assert!(tx.set_n_write(16).is_none());
        assert_eq!(tx.n_write, 16);
        assert!(tx.set_n_write(17).is_some());
        assert_eq!(tx.n_write, BRIEF_LEN);
        assert!(tx.set_n_read(-1).is_some());
        assert_eq!(tx.n_read, 0);
    }

    #[test]
    fn test_set_write_saturates_at_capacity() {
        let mut tx = Transaction::default();
        let data = [0xEEu8; 4];
        tx.set_write(BRIEF_LEN - 2, 4, &data);
        assert_eq!(tx.write[BRIEF_LEN - 2], 0xEE);
        assert_eq!(tx.write[BRIEF_LEN - 1], 0xEE);
        // nothing beyond the buffer was touched and nothing panicked
    }

    #[test]
    fn test_set_write_copies_in_order() {
        let mut tx = Transaction::default();
        tx.set_write(0, 3, &[0x3B, 0x74, 0x1B]);
        assert_eq!(&tx.write[..3], &[0x3B, 0x74, 0x1B]);
    }
}
