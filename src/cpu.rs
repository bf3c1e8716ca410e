use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::console::Console;
use crate::decoder::{Decoder, Op};
use crate::disasm;
use crate::exec::Executor;
use crate::memory::Bus;
use crate::word::Word;

/// Size of the text block moved by RDS and PRTS.
pub const TEXT_BLOCK_BYTES: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuConfig {
    pub step_limit: Option<u64>, // None: run until END, however long that takes
    pub text_block: usize,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            step_limit: None,
            text_block: TEXT_BLOCK_BYTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cpu {
    pub ip: u32,   // Instruction Pointer (word index)
    pub ir: Word,  // Instruction Register, last fetched word
    pub acc: Word, // Accumulator; read by BN/BZ, written by nothing
    pub fetches: u64,
    pub cfg: CpuConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

#[derive(thiserror::Error, Debug)]
pub enum Trap {
    #[error("memory fault at word {addr}: {cause:#}")]
    Bus { addr: u32, cause: anyhow::Error },
    #[error("input of {len} bytes does not fit the {capacity}-byte destination")]
    InputTooLong { len: usize, capacity: usize },
    #[error("expected an integer, got {text:?}")]
    BadInteger { text: String },
    #[error("input ended while the program was waiting for it")]
    EndOfInput,
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("no END after {steps} instructions")]
    StepLimit { steps: u64 },
}

impl Cpu {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            ip: 0,
            ir: 0,
            acc: 0,
            fetches: 0,
            cfg,
        }
    }

    pub fn reset(&mut self, reset_ip: u32) {
        self.ip = reset_ip;
        self.ir = 0;
        self.fetches = 0;
    }

    /// Fetch, decode and execute one word.
    ///
    /// END stops before the pointer moves. Everything else advances it by one
    /// afterwards, which is why branches store `target - 1`.
    pub fn step<B: Bus, D: Decoder, X: Executor, C: Console>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
        io: &mut C,
    ) -> Result<Flow, Trap> {
        let ip = self.ip;
        self.ir = bus
            .read_word(ip)
            .map_err(|cause| Trap::Bus { addr: ip, cause })?;
        self.fetches += 1;

        let Some(d) = dec.decode(self.ir) else {
            debug!(ip, "{}", disasm::fmt_word(self.ir));
            self.ip = self.ip.wrapping_add(1);
            return Ok(Flow::Continue);
        };
        debug!(ip, "{}", disasm::fmt_decoded(&d));
        if d.op == Op::End {
            return Ok(Flow::Halt);
        }

        exec.exec(self, bus, io, d)?;
        self.ip = self.ip.wrapping_add(1);
        Ok(Flow::Continue)
    }

    /// Run from the current pointer until END, then print the register dump.
    pub fn run<B: Bus, D: Decoder, X: Executor, C: Console>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
        io: &mut C,
    ) -> Result<(), Trap> {
        io.write_line("\n_____Executing TIMS Program_____\n")?;
        loop {
            if let Some(limit) = self.cfg.step_limit {
                if self.fetches >= limit {
                    return Err(Trap::StepLimit { steps: self.fetches });
                }
            }
            if self.step(bus, dec, exec, io)? == Flow::Halt {
                break;
            }
        }
        info!(ip = self.ip, fetches = self.fetches, "halted");
        io.write_line("\n_____TIMS Execution Complete_____\n")?;
        io.write_line(&self.to_string())?;
        Ok(())
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nREGISTERS:")?;
        writeln!(f, "{:<24}0x{:02x}", "Instruction Pointer", self.ip)?;
        writeln!(f, "{:<22}0x{:04x}", "Instruction Register", self.ir as u16)?;
        writeln!(f, "{:<22}0x{:04x}", "Accumulator", self.acc as u16)
    }
}
