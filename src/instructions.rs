use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::decoder::Op;

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpFlags: u8 {
const READS_INPUT = 1 << 0;
const WRITES_MEM = 1 << 1;
const READS_MEM = 1 << 2;
const WRITES_OUTPUT = 1 << 3;
const BRANCH = 1 << 4;
const CONDITIONAL = 1 << 5; // branch taken on accumulator state
const HALT = 1 << 6;
const RELOCATE = 1 << 7; // operand is a store address, shifted by the loader
}
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub flags: OpFlags,
}

impl InstrDesc {
    pub fn opcode(&self) -> u8 {
        self.op.opcode()
    }

    pub fn relocatable(&self) -> bool {
        self.flags.contains(OpFlags::RELOCATE)
    }
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Op::Rdi,
        mnemonic: "RDI",
        flags: OpFlags::READS_INPUT
            .union(OpFlags::WRITES_MEM)
            .union(OpFlags::RELOCATE),
    },
    InstrDesc {
        op: Op::Rds,
        mnemonic: "RDS",
        flags: OpFlags::READS_INPUT
            .union(OpFlags::WRITES_MEM)
            .union(OpFlags::RELOCATE),
    },
    InstrDesc {
        op: Op::Prti,
        mnemonic: "PRTI",
        flags: OpFlags::READS_MEM
            .union(OpFlags::WRITES_OUTPUT)
            .union(OpFlags::RELOCATE),
    },
    InstrDesc {
        op: Op::Prts,
        mnemonic: "PRTS",
        flags: OpFlags::READS_MEM
            .union(OpFlags::WRITES_OUTPUT)
            .union(OpFlags::RELOCATE),
    },
    InstrDesc {
        op: Op::B,
        mnemonic: "B",
        flags: OpFlags::BRANCH.union(OpFlags::RELOCATE),
    },
    InstrDesc {
        op: Op::Bn,
        mnemonic: "BN",
        flags: OpFlags::BRANCH
            .union(OpFlags::CONDITIONAL)
            .union(OpFlags::RELOCATE),
    },
    InstrDesc {
        op: Op::Bz,
        mnemonic: "BZ",
        flags: OpFlags::BRANCH
            .union(OpFlags::CONDITIONAL)
            .union(OpFlags::RELOCATE),
    },
    InstrDesc {
        op: Op::End,
        mnemonic: "END",
        flags: OpFlags::HALT,
    },
];

/// Mnemonic lookup. Expects the already-uppercased form.
pub fn by_mnemonic(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

pub fn by_opcode(opcode: u8) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.opcode() == opcode)
}
