use crate::decoder::{Decoded, Decoder, Op, TimsDecoder};
use crate::word::Word;

pub fn fmt_decoded(d: &Decoded) -> String {
    match d.op {
        Op::End => "END".to_string(),
        op => format!("{} {:#04x}", op.mnemonic(), d.operand),
    }
}

/// One word as an instruction when it decodes, otherwise as raw data.
pub fn fmt_word(w: Word) -> String {
    match TimsDecoder::new().decode(w) {
        Some(d) => fmt_decoded(&d),
        None => format!(".word {:#06x}", w as u16),
    }
}

/// Address-prefixed listing of a word stream.
pub fn listing(words: &[Word], base: u32) -> Vec<String> {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| format!("{:3}: {:04x}  {}", base + i as u32, *w as u16, fmt_word(*w)))
        .collect()
}
