//! Bus transport capability
//!
//! The runner drives hardware through [`BusTransport`], whose primitives
//! mirror the usual two-wire controller API: open a write phase, queue
//! bytes, close it (optionally keeping the bus held so a read follows with
//! a repeated start), request bytes, and drain them one at a time.
//!
//! The trait is infallible on purpose. A failed or partial exchange shows
//! up as whatever bytes the transport hands back; deciding whether those
//! bytes are right is the test evaluator's job, not the transport's.

use std::collections::{HashMap, VecDeque};

/// The injected hardware capability.
pub trait BusTransport {
    /// Open a write phase addressed to `addr`.
    fn begin_write(&mut self, addr: u8);

    /// Queue one byte into the open write phase.
    fn write_byte(&mut self, b: u8);

    /// Close the write phase. `release` drops the bus; `false` keeps it
    /// held for a repeated-start read.
    fn end_write(&mut self, release: bool);

    /// Ask the device at `addr` for `count` bytes.
    fn request_read(&mut self, addr: u8, count: usize, release: bool);

    /// Take the next received byte. What this returns when nothing is
    /// pending is transport-defined.
    fn read_byte(&mut self) -> u8;
}

/// One recorded transport operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    BeginWrite { addr: u8 },
    WriteByte { b: u8 },
    EndWrite { release: bool },
    RequestRead { addr: u8, count: usize, release: bool },
}

/// A scripted transport: replays queued response bytes and records every
/// operation in order. Stands in for hardware in tests and lets captured
/// regression tests run without a bus attached.
#[derive(Debug, Default)]
pub struct FixtureBus {
    /// Every operation the runner performed, in order.
    pub ops: Vec<BusOp>,
    responses: VecDeque<u8>,
}

impl FixtureBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue response bytes for subsequent `read_byte` calls.
    pub fn respond(&mut self, bytes: &[u8]) {
        self.responses.extend(bytes);
    }

    /// Builder form of [`respond`](Self::respond).
    pub fn with_response(bytes: &[u8]) -> Self {
        let mut bus = Self::new();
        bus.respond(bytes);
        bus
    }

    /// Bytes written during write phases, in order.
    pub fn written(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                BusOp::WriteByte { b } => Some(*b),
                _ => None,
            })
            .collect()
    }
}

impl BusTransport for FixtureBus {
    fn begin_write(&mut self, addr: u8) {
        self.ops.push(BusOp::BeginWrite { addr });
    }

    fn write_byte(&mut self, b: u8) {
        self.ops.push(BusOp::WriteByte { b });
    }

    fn end_write(&mut self, release: bool) {
        self.ops.push(BusOp::EndWrite { release });
    }

    fn request_read(&mut self, addr: u8, count: usize, release: bool) {
        self.ops.push(BusOp::RequestRead { addr, count, release });
    }

    fn read_byte(&mut self) -> u8 {
        // an idle bus reads back high
        self.responses.pop_front().unwrap_or(0xFF)
    }
}

/// A simulated bank of register-file devices, used by the binary when no
/// hardware is attached.
///
/// Every address exposes 256 registers initialized to their own index.
/// The first byte of a write phase sets the register pointer; any further
/// bytes store through it. Reads return registers from the pointer on,
/// auto-incrementing, so `addr 68 n_write 1 write 10 n_read 4 run` reads
/// registers 0x10..0x14 of device 0x68.
#[derive(Debug, Default)]
pub struct SimBus {
    banks: HashMap<u8, [u8; 256]>,
    addr: u8,
    ptr: u8,
    awaiting_pointer: bool,
}

impl SimBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn bank(&mut self, addr: u8) -> &mut [u8; 256] {
        self.banks.entry(addr).or_insert_with(|| {
            let mut regs = [0u8; 256];
            for (i, r) in regs.iter_mut().enumerate() {
                *r = i as u8;
            }
            regs
        })
    }
}

impl BusTransport for SimBus {
    fn begin_write(&mut self, addr: u8) {
        self.addr = addr;
        self.awaiting_pointer = true;
    }

    fn write_byte(&mut self, b: u8) {
        if self.awaiting_pointer {
            self.ptr = b;
            self.awaiting_pointer = false;
            return;
        }
        let ptr = self.ptr;
        let addr = self.addr;
        self.bank(addr)[ptr as usize] = b;
        self.ptr = self.ptr.wrapping_add(1);
    }

    fn end_write(&mut self, _release: bool) {}

    fn request_read(&mut self, addr: u8, _count: usize, _release: bool) {
        self.addr = addr;
    }

    fn read_byte(&mut self) -> u8 {
        let ptr = self.ptr;
        let addr = self.addr;
        let b = self.bank(addr)[ptr as usize];
        self.ptr = self.ptr.wrapping_add(1);
        b
    }
}
