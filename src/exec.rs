use crate::console::Console;
use crate::cpu::{Cpu, Trap};
use crate::decoder::{Decoded, Op};
use crate::memory::{Bus, NUM_MEM_BYTES};
use crate::word::Word;

pub trait Executor {
    fn exec<B: Bus, C: Console>(
        &self,
        cpu: &mut Cpu,
        bus: &mut B,
        io: &mut C,
        d: Decoded,
    ) -> Result<(), Trap>;
}

pub struct IntExecutor;
impl Executor for IntExecutor {
    fn exec<B: Bus, C: Console>(
        &self,
        cpu: &mut Cpu,
        bus: &mut B,
        io: &mut C,
        d: Decoded,
    ) -> Result<(), Trap> {
        let addr = d.operand as u32;
        match d.op {
            Op::Rdi => {
                let token = io.read_token()?.ok_or(Trap::EndOfInput)?;
                let val = parse_int(&token)?;
                bus.write_word(addr, val)
                    .map_err(|cause| Trap::Bus { addr, cause })?;
                bus.sync().map_err(|cause| Trap::Bus { addr, cause })?;
            }
            Op::Rds => {
                let line = io.read_line()?.ok_or(Trap::EndOfInput)?;
                let capacity = text_capacity(cpu.cfg.text_block, d.operand_byte_addr());
                if line.len() > capacity {
                    return Err(Trap::InputTooLong {
                        len: line.len(),
                        capacity,
                    });
                }
                bus.write_bytes(d.operand_byte_addr(), line.as_bytes())
                    .map_err(|cause| Trap::Bus { addr, cause })?;
                bus.sync().map_err(|cause| Trap::Bus { addr, cause })?;
            }
            Op::Prti => {
                let val = bus
                    .read_word(addr)
                    .map_err(|cause| Trap::Bus { addr, cause })?;
                io.write_line(&val.to_string())?;
            }
            Op::Prts => {
                let len = text_capacity(cpu.cfg.text_block, d.operand_byte_addr());
                let block = bus
                    .read_bytes(d.operand_byte_addr(), len)
                    .map_err(|cause| Trap::Bus { addr, cause })?;
                // Text ends at the first NUL or at the end of the block.
                let end = block.iter().position(|b| *b == 0).unwrap_or(block.len());
                io.write_line(&String::from_utf8_lossy(&block[..end]))?;
            }
            Op::B => {
                cpu.ip = branch_target(d.operand);
            }
            Op::Bn => {
                if cpu.acc < 0 {
                    cpu.ip = branch_target(d.operand);
                }
            }
            Op::Bz => {
                if cpu.acc == 0 {
                    cpu.ip = branch_target(d.operand);
                }
            }
            Op::End => {}
        }
        Ok(())
    }
}

/// Pointer value that lands on `operand` after the post-execute increment.
fn branch_target(operand: u8) -> u32 {
    (operand as u32).wrapping_sub(1)
}

/// Bytes available to a text opcode: one block, cut short by the end of the store.
fn text_capacity(block: usize, byte_addr: u32) -> usize {
    block.min(NUM_MEM_BYTES.saturating_sub(byte_addr as usize))
}

/// Integer input, truncated to word width like any other store write.
fn parse_int(token: &str) -> Result<Word, Trap> {
    token
        .parse::<i64>()
        .map(|v| v as Word)
        .map_err(|_| Trap::BadInteger {
            text: token.to_string(),
        })
}
