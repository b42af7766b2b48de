//! Host-side stand-ins for the bus, pins and delay

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use tempora_hal::{BusError, BusPins, I2cBus};

/// How the next transfer should end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Transfer every byte
    None,
    /// Complete without moving any byte
    Zero,
    /// Fail with a bus error
    Error(BusError),
}

/// Emulates the chip's register pointer and first eight registers
pub struct FakeDs1307 {
    /// Registers 0x00-0x07
    pub memory: [u8; 8],
    pointer: usize,
    /// Rate the bus settles on; `None` honours the request
    pub achieved_hz: Option<u32>,
    pub configured_hz: Option<u32>,
    pub shut_down: bool,
    /// Every write payload, in order
    pub writes: Vec<Vec<u8, 8>, 16>,
    /// Every read length, in order
    pub reads: Vec<usize, 16>,
    pub last_address: u8,
    pub last_timeout_us: u32,
    pub write_fault: Fault,
    pub read_fault: Fault,
    /// Writes that NACK before the chip starts answering
    pub nacks_remaining: u8,
}

impl FakeDs1307 {
    pub fn new() -> Self {
        Self {
            memory: [0; 8],
            pointer: 0,
            achieved_hz: None,
            configured_hz: None,
            shut_down: false,
            writes: Vec::new(),
            reads: Vec::new(),
            last_address: 0,
            last_timeout_us: 0,
            write_fault: Fault::None,
            read_fault: Fault::None,
            nacks_remaining: 0,
        }
    }

    /// Number of transfers in either direction
    pub fn transfers(&self) -> usize {
        self.writes.len() + self.reads.len()
    }

    fn advance(&mut self) -> usize {
        let slot = self.pointer % self.memory.len();
        self.pointer += 1;
        slot
    }
}

impl I2cBus for FakeDs1307 {
    fn configure(&mut self, frequency_hz: u32) -> u32 {
        self.configured_hz = Some(frequency_hz);
        self.shut_down = false;
        self.achieved_hz.unwrap_or(frequency_hz)
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn write(&mut self, address: u8, data: &[u8], timeout_us: u32) -> Result<usize, BusError> {
        self.last_address = address;
        self.last_timeout_us = timeout_us;
        self.writes.push(Vec::from_slice(data).unwrap()).unwrap();

        if self.nacks_remaining > 0 {
            self.nacks_remaining -= 1;
            return Err(BusError::Nack);
        }
        match self.write_fault {
            Fault::Zero => return Ok(0),
            Fault::Error(e) => return Err(e),
            Fault::None => {}
        }

        if let Some((&pointer, payload)) = data.split_first() {
            self.pointer = pointer as usize;
            for &byte in payload {
                let slot = self.advance();
                self.memory[slot] = byte;
            }
        }
        Ok(data.len())
    }

    fn read(&mut self, address: u8, buf: &mut [u8], timeout_us: u32) -> Result<usize, BusError> {
        self.last_address = address;
        self.last_timeout_us = timeout_us;
        self.reads.push(buf.len()).unwrap();

        match self.read_fault {
            Fault::Zero => return Ok(0),
            Fault::Error(e) => return Err(e),
            Fault::None => {}
        }

        for byte in buf.iter_mut() {
            let slot = self.advance();
            *byte = self.memory[slot];
        }
        Ok(buf.len())
    }
}

/// Records claim/release calls
pub struct FakePins {
    pub claimed: bool,
    pub claims: u8,
    pub releases: u8,
}

impl FakePins {
    pub fn new() -> Self {
        Self {
            claimed: false,
            claims: 0,
            releases: 0,
        }
    }
}

impl BusPins for FakePins {
    fn claim(&mut self) {
        self.claimed = true;
        self.claims += 1;
    }

    fn release(&mut self) {
        self.claimed = false;
        self.releases += 1;
    }

    fn sda(&self) -> u8 {
        16
    }

    fn scl(&self) -> u8 {
        17
    }
}

/// Counts requested milliseconds instead of waiting
#[derive(Default)]
pub struct FakeDelay {
    pub calls: u32,
    pub total_ms: u32,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += ns / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += ms;
    }
}
