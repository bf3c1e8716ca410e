//! Single-line classifier for TIMS assembly.

/// Longest accepted label name.
pub const MAX_LABEL_LEN: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    LabelOnly,
    InstrWithLiteral { mnemonic: String, literal: String },
    InstrWithReference { mnemonic: String, reference: String },
    InstrNoOperand { mnemonic: String },
    DataWord { literal: String },
    /// Quoted text, kept verbatim (no case folding).
    StringLiteral { payload: String },
    InvalidString,
    InvalidInstruction,
}

impl LineKind {
    /// Lines that take a label for themselves rather than passing it on.
    pub fn takes_label(&self) -> bool {
        !matches!(self, LineKind::Blank | LineKind::LabelOnly)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub label: Option<String>,
    pub kind: LineKind,
}

impl Classified {
    fn new(label: Option<String>, kind: LineKind) -> Self {
        match label {
            Some(name) if name.len() > MAX_LABEL_LEN => Self {
                label: None,
                kind: LineKind::InvalidInstruction,
            },
            label => Self { label, kind },
        }
    }
}

/// Classify one raw source line. Pure; never fails, bad lines get an invalid tag.
pub fn classify(line: &str) -> Classified {
    let line = strip_comment(line);

    if let Some(open) = line.find('"') {
        // Only a colon ahead of the opening quote introduces a label.
        let label = line[..open].find(':').and_then(|c| label_name(&line[..c]));
        let rest = &line[open + 1..];
        let kind = match rest.find('"') {
            Some(close) => LineKind::StringLiteral {
                payload: rest[..close].to_string(),
            },
            None => LineKind::InvalidString,
        };
        return Classified::new(label, kind);
    }

    let (label, body) = match line.find(':') {
        Some(c) => {
            let after = &line[c + 1..];
            let body = after.split(':').next().unwrap_or_default();
            (label_name(&line[..c]), body)
        }
        None => (None, line),
    };

    let tokens = components(body);
    let kind = match tokens.as_slice() {
        [] if label.is_some() => LineKind::LabelOnly,
        [] => LineKind::Blank,
        [one] if starts_with_digit(one) => LineKind::DataWord {
            literal: one.clone(),
        },
        [one] => LineKind::InstrNoOperand {
            mnemonic: one.clone(),
        },
        [mnemonic, operand] if starts_with_digit(operand) => LineKind::InstrWithLiteral {
            mnemonic: mnemonic.clone(),
            literal: operand.clone(),
        },
        [mnemonic, operand] => LineKind::InstrWithReference {
            mnemonic: mnemonic.clone(),
            reference: operand.clone(),
        },
        _ => LineKind::InvalidInstruction,
    };
    Classified::new(label, kind)
}

/// Drop a `;` comment. A semicolon inside quotes is text, not a comment.
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

/// First whitespace-delimited word before the colon, folded to uppercase so
/// that it matches the uppercased operand references.
fn label_name(text: &str) -> Option<String> {
    text.split_whitespace()
        .next()
        .map(|name| name.to_ascii_uppercase())
}

/// Uppercased tokens; stops at the first token that opens with an unprintable
/// character, and trims unprintable characters off each token's tail.
fn components(body: &str) -> Vec<String> {
    let mut out = Vec::new();
    for token in body.split_whitespace() {
        if !token.starts_with(|c: char| c.is_ascii_graphic()) {
            break;
        }
        let token = token.trim_end_matches(|c: char| !c.is_ascii_graphic());
        out.push(token.to_ascii_uppercase());
    }
    out
}

fn starts_with_digit(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}
