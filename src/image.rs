//! Flat assembled-program files: little-endian words, no header.

use std::path::Path;

use anyhow::{Context, Result};

use crate::word::{self, Word};

pub fn read_words(path: &Path) -> Result<Vec<Word>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    anyhow::ensure!(
        bytes.len() % word::WORD_BYTES == 0,
        "{} holds {} bytes, not a whole number of words",
        path.display(),
        bytes.len()
    );
    word::bytes_to_words(&bytes).context("odd trailing byte")
}

pub fn write_words(path: &Path, words: &[Word]) -> Result<()> {
    std::fs::write(path, word::words_to_bytes(words))
        .with_context(|| format!("writing {}", path.display()))
}
