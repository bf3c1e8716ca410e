use tims_rs::instructions;
use tims_rs::word::{pack, Word};

use crate::labels::LabelTable;
use crate::lexer::LineKind;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    #[error("invalid instruction")]
    InvalidInstruction,
    #[error("invalid string")]
    InvalidString,
}

/// Second pass for one line: the words it contributes, in order.
pub fn encode(kind: &LineKind, labels: &LabelTable) -> Result<Vec<Word>, EncodeError> {
    match kind {
        LineKind::Blank | LineKind::LabelOnly => Ok(Vec::new()),
        LineKind::InstrWithReference {
            mnemonic,
            reference,
        } => {
            let addr = labels
                .resolve(reference)
                .map_err(|_| EncodeError::InvalidInstruction)?;
            // Label addresses must fit the operand byte.
            let operand = u8::try_from(addr).map_err(|_| EncodeError::InvalidInstruction)?;
            Ok(vec![instruction(mnemonic, operand)?])
        }
        LineKind::InstrWithLiteral { mnemonic, literal } => {
            let operand = (parse_literal(literal) & 0xFF) as u8;
            Ok(vec![instruction(mnemonic, operand)?])
        }
        LineKind::InstrNoOperand { mnemonic } => Ok(vec![instruction(mnemonic, 0)?]),
        LineKind::DataWord { literal } => Ok(vec![parse_literal(literal) as Word]),
        LineKind::StringLiteral { payload } => Ok(pack_string(payload.as_bytes())),
        LineKind::InvalidString => Err(EncodeError::InvalidString),
        LineKind::InvalidInstruction => Err(EncodeError::InvalidInstruction),
    }
}

fn instruction(mnemonic: &str, operand: u8) -> Result<Word, EncodeError> {
    let desc = instructions::by_mnemonic(mnemonic).ok_or(EncodeError::InvalidInstruction)?;
    Ok(pack(desc.opcode(), operand))
}

/// Two characters per word, the first in the low byte. An odd tail gets a zero high byte.
pub fn pack_string(bytes: &[u8]) -> Vec<Word> {
    bytes
        .chunks(2)
        .map(|pair| {
            let lo = pair[0] as u16;
            let hi = pair.get(1).copied().unwrap_or(0) as u16;
            ((hi << 8) | lo) as Word
        })
        .collect()
}

/// Numeric literal with C radix rules: `0x`/`0X` is hex, a lone `0` is octal,
/// anything else decimal. Like `strtol`, digits are read up to the first
/// character that is not one; no digits reads as zero.
pub fn parse_literal(token: &str) -> i64 {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        leading_digits(hex, 16)
    } else if token == "0" {
        leading_digits(token, 8)
    } else {
        leading_digits(token, 10)
    }
}

/// Saturates at `i64::MAX` on overflow, as `strtol` clamps to `LONG_MAX`.
fn leading_digits(text: &str, radix: u32) -> i64 {
    text.chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0i64, |acc, d| {
            acc.checked_mul(radix as i64)
                .and_then(|v| v.checked_add(d as i64))
                .unwrap_or(i64::MAX)
        })
}
