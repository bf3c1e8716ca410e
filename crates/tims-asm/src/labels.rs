use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::lexer::{classify, LineKind};

/// Lookup miss. The encoder turns this into an invalid-instruction error.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no such label")]
pub struct NoLabel;

/// Symbol table in definition order. The first definition of a name wins.
///
/// Names are stored uppercased, like every operand reference, so `loop:` and
/// `LOOP:` are the same label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    entries: IndexMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelKV {
    pub addr: u32,
    pub name: String,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and keeps the existing address when `name` is already bound.
    pub fn define(&mut self, name: &str, addr: u32) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_string(), addr);
        true
    }

    pub fn resolve(&self, name: &str) -> Result<u32, NoLabel> {
        self.entries.get(name).copied().ok_or(NoLabel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn to_kv(&self) -> Vec<LabelKV> {
        self.iter()
            .map(|(name, addr)| LabelKV {
                addr,
                name: name.to_string(),
            })
            .collect()
    }
}

/// A label that never reached an instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLabel {
    pub line: usize,
    pub name: String,
}

impl fmt::Display for DanglingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning: Line {} - dangling label \"{}\" ignored",
            self.line, self.name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    None,
    Label { name: String, line: usize },
}

#[derive(Debug, Clone, Default)]
pub struct LabelPass {
    pub table: LabelTable,
    pub dangling: Vec<DanglingLabel>,
}

/// First pass: bind every label to the next address in sequence.
///
/// The counter moves once per label bound to an instruction-bearing line. A
/// label on a line by itself waits for the next line without a label of its
/// own. Line numbers are 1-based.
pub fn compile_labels<'a, I>(lines: I) -> LabelPass
where
    I: IntoIterator<Item = &'a str>,
{
    let mut pass = LabelPass::default();
    let mut pending = Pending::None;
    let mut next_addr = 0u32;

    for (idx, raw) in lines.into_iter().enumerate() {
        let line = idx + 1;
        let classified = classify(raw);
        if !classified.kind.takes_label() {
            if classified.kind == LineKind::LabelOnly {
                let name = classified.label.unwrap_or_default();
                if let Pending::Label { name: lost, line: at } =
                    std::mem::replace(&mut pending, Pending::Label { name, line })
                {
                    pass.dangling.push(dangling(lost, at));
                }
            }
            continue;
        }

        // A line with its own label leaves the pending one waiting.
        let label = match classified.label {
            Some(own) => Some(own),
            None => match std::mem::replace(&mut pending, Pending::None) {
                Pending::Label { name, .. } => Some(name),
                Pending::None => None,
            },
        };

        if let Some(name) = label {
            if pass.table.define(&name, next_addr) {
                next_addr += 1;
            } else {
                warn!(line, label = %name, "duplicate label, first definition kept");
            }
        }
    }

    if let Pending::Label { name, line } = pending {
        pass.dangling.push(dangling(name, line));
    }
    pass
}

fn dangling(name: String, line: usize) -> DanglingLabel {
    warn!(line, label = %name, "dangling label ignored");
    DanglingLabel { line, name }
}
