/// Fixed-width storage unit. Instructions and data share the same representation.
pub type Word = i16;

/// Size of one word in the raw store and in assembled images.
pub const WORD_BYTES: usize = 2;

/// Pack an opcode and operand into one word (`opcode * 256 + operand`).
pub fn pack(opcode: u8, operand: u8) -> Word {
    (((opcode as u16) << 8) | operand as u16) as Word
}

/// High byte of a word.
pub fn opcode_of(w: Word) -> u8 {
    ((w as u16) >> 8) as u8
}

/// Low byte of a word, always 0..=255.
pub fn operand_of(w: Word) -> u8 {
    ((w as u16) & 0xFF) as u8
}

/// Replace the low byte, leaving the opcode byte intact.
pub fn with_operand(w: Word, operand: u8) -> Word {
    pack(opcode_of(w), operand)
}

/// Little-endian byte pair, the on-disk layout for every word file.
pub fn to_bytes(w: Word) -> [u8; WORD_BYTES] {
    w.to_le_bytes()
}

pub fn from_bytes(b: [u8; WORD_BYTES]) -> Word {
    Word::from_le_bytes(b)
}

pub fn words_to_bytes(words: &[Word]) -> Vec<u8> {
    words.iter().flat_map(|w| to_bytes(*w)).collect()
}

/// Decode a byte buffer into words. Returns `None` on an odd trailing byte.
pub fn bytes_to_words(bytes: &[u8]) -> Option<Vec<Word>> {
    if bytes.len() % WORD_BYTES != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(WORD_BYTES)
            .map(|c| from_bytes([c[0], c[1]]))
            .collect(),
    )
}
