use anyhow::Result;
use tracing::{info, warn};

use crate::instructions;
use crate::memory::{Bus, StoreError};
use crate::word::{opcode_of, operand_of, with_operand, Word};

/// Shift the operand of a store-referencing instruction by `base`.
///
/// Only the operand byte changes; a sum past 255 wraps within that byte.
/// Words whose high byte is not a relocatable opcode are returned unchanged.
pub fn relocate(w: Word, base: u32) -> Word {
    match instructions::by_opcode(opcode_of(w)) {
        Some(desc) if desc.relocatable() => {
            let sum = operand_of(w) as u64 + base as u64;
            if sum > u8::MAX as u64 {
                warn!(word = %format!("{:#06x}", w as u16), base, "relocated operand wraps past 255");
            }
            with_operand(w, sum as u8)
        }
        _ => w,
    }
}

/// Copy an assembled program into memory at word `base`, relocating as it goes,
/// then resync the store once. Returns the number of words written.
pub fn load_program<B: Bus>(bus: &mut B, words: &[Word], base: u32) -> Result<usize> {
    for (i, w) in words.iter().enumerate() {
        let addr = u32::try_from(i)
            .ok()
            .and_then(|i| base.checked_add(i))
            .ok_or(StoreError::OutOfRange { addr: u32::MAX })?;
        bus.write_word(addr, relocate(*w, base))?;
    }
    bus.sync()?;
    info!(base, words = words.len(), "program loaded");
    Ok(words.len())
}
