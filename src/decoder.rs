use serde::{Deserialize, Serialize};

use crate::instructions::{self, InstrDesc};
use crate::word::{opcode_of, operand_of, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Op {
    Rdi = 0x10,
    Rds = 0x11,
    Prti = 0x12,
    Prts = 0x13,
    B = 0x40,
    Bn = 0x41,
    Bz = 0x42,
    End = 0x43,
}

impl Op {
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Position in `instructions::TABLE`; the table is laid out in this order.
    fn index(self) -> usize {
        match self {
            Op::Rdi => 0,
            Op::Rds => 1,
            Op::Prti => 2,
            Op::Prts => 3,
            Op::B => 4,
            Op::Bn => 5,
            Op::Bz => 6,
            Op::End => 7,
        }
    }

    pub fn desc(self) -> &'static InstrDesc {
        &instructions::TABLE[self.index()]
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub raw: Word,
    pub operand: u8,
}

impl Decoded {
    /// Byte offset of the operand inside the store.
    pub fn operand_byte_addr(&self) -> u32 {
        self.operand as u32 * crate::word::WORD_BYTES as u32
    }
}

pub trait Decoder {
    /// `None` means the word carries no known opcode (plain data).
    fn decode(&self, raw: Word) -> Option<Decoded>;
}

/// Decoder for the closed TIMS instruction set.
pub struct TimsDecoder;

impl TimsDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimsDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for TimsDecoder {
    fn decode(&self, raw: Word) -> Option<Decoded> {
        let desc = instructions::by_opcode(opcode_of(raw))?;
        Some(Decoded {
            op: desc.op,
            raw,
            operand: operand_of(raw),
        })
    }
}
