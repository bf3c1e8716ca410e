//! Human-readable rendering of the store: a 10x10 table of hex words.

use std::fmt::Write as _;

use crate::word::Word;

pub const COLUMNS: usize = 10;

const HEADER: &str =
    "           0         1         2         3         4         5         6         7         8         9\n";

/// Render words as the formatted memory table.
///
/// Each row starts with its base address; each cell is `   0x%04x` followed by
/// a space, or a newline after the tenth cell.
pub fn render(words: &[Word]) -> String {
    let mut out = String::with_capacity(HEADER.len() + words.len() * 11 + 40);
    out.push_str(HEADER);
    for (addr, w) in words.iter().enumerate() {
        if addr % COLUMNS == 0 {
            let _ = write!(out, "{addr:3}");
        }
        let sep = if (addr + 1) % COLUMNS == 0 { '\n' } else { ' ' };
        let _ = write!(out, "   0x{:04x}{sep}", *w as u16);
    }
    out
}
