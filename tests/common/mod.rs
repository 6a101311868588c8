#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use si1145::{Error, SensorInterface};

/// One observed bus or delay operation
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Op {
    Write(u8, u8),
    Read(u8),
    ReadU16(u8),
    DelayMs(u32),
    DelayNs(u32),
}

pub type Log = Rc<RefCell<Vec<Op>>>;

/// Sensor interface that records every operation and serves scripted
/// register contents
pub struct RecordingInterface {
    pub log: Log,
    pub regs: HashMap<u8, u8>,
    pub regs16: HashMap<u8, u16>,
    /// Fail every operation touching this register
    pub fail_on: Option<u8>,
}

impl RecordingInterface {
    pub fn new(log: Log) -> Self {
        Self {
            log,
            regs: HashMap::new(),
            regs16: HashMap::new(),
            fail_on: None,
        }
    }

    fn check(&self, reg: u8) -> Result<(), Error<()>> {
        match self.fail_on {
            Some(bad) if bad == reg => Err(Error::Comm(())),
            _ => Ok(()),
        }
    }
}

impl SensorInterface for RecordingInterface {
    type InterfaceError = Error<()>;

    fn register_write(&mut self, reg: u8, val: u8) -> Result<(), Self::InterfaceError> {
        self.check(reg)?;
        self.log.borrow_mut().push(Op::Write(reg, val));
        Ok(())
    }

    fn register_read(&mut self, reg: u8) -> Result<u8, Self::InterfaceError> {
        self.check(reg)?;
        self.log.borrow_mut().push(Op::Read(reg));
        Ok(*self.regs.get(&reg).unwrap_or(&0))
    }

    fn read_u16_le(&mut self, reg: u8) -> Result<u16, Self::InterfaceError> {
        self.check(reg)?;
        self.log.borrow_mut().push(Op::ReadU16(reg));
        Ok(*self.regs16.get(&reg).unwrap_or(&0))
    }
}

/// Delay source sharing the interface's log so ordering can be checked
pub struct RecordingDelay {
    pub log: Log,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Op::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Op::DelayMs(ms));
    }
}

pub fn expected_reset() -> Vec<Op> {
    vec![
        Op::Write(0x08, 0x00),
        Op::Write(0x09, 0x00),
        Op::Write(0x04, 0x00),
        Op::Write(0x05, 0x00),
        Op::Write(0x06, 0x00),
        Op::Write(0x03, 0x00),
        Op::Write(0x21, 0xFF),
        Op::Write(0x18, 0x01),
        Op::DelayMs(10),
        Op::Write(0x07, 0x17),
        Op::DelayMs(10),
    ]
}

fn param(ops: &mut Vec<Op>, p: u8, v: u8) {
    ops.push(Op::Write(0x17, v));
    ops.push(Op::Write(0x18, p | 0xA0));
    ops.push(Op::Read(0x2E));
}

/// The complete init sequence: id check, reset and configuration.
/// Delays are omitted when `with_delays` is false.
pub fn expected_init(with_delays: bool) -> Vec<Op> {
    let mut ops = vec![Op::Read(0x00)];
    ops.extend(expected_reset());

    ops.push(Op::Write(0x13, 0x29));
    ops.push(Op::Write(0x14, 0x89));
    ops.push(Op::Write(0x15, 0x02));
    ops.push(Op::Write(0x16, 0x00));

    param(&mut ops, 0x01, 0x80 | 0x20 | 0x10 | 0x01);

    ops.push(Op::Write(0x03, 0x01));
    ops.push(Op::Write(0x04, 0x01));

    ops.push(Op::Write(0x0F, 0x03));
    param(&mut ops, 0x07, 0x03);
    param(&mut ops, 0x02, 0x01);
    param(&mut ops, 0x0B, 0x00);
    param(&mut ops, 0x0A, 0x70);
    param(&mut ops, 0x0C, 0x24);

    param(&mut ops, 0x0E, 0x00);
    param(&mut ops, 0x1E, 0x00);
    param(&mut ops, 0x1D, 0x70);
    param(&mut ops, 0x1F, 0x20);

    param(&mut ops, 0x11, 0x00);
    param(&mut ops, 0x10, 0x70);
    param(&mut ops, 0x12, 0x20);

    ops.push(Op::Write(0x08, 0xFF));
    ops.push(Op::Write(0x18, 0x0F));

    if !with_delays {
        ops.retain(|op| !matches!(op, Op::DelayMs(_) | Op::DelayNs(_)));
    }
    ops
}
