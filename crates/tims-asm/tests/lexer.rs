use pretty_assertions::assert_eq;
use tims_asm::lexer::{classify, Classified, LineKind, MAX_LABEL_LEN};

fn kind(line: &str) -> LineKind {
    classify(line).kind
}

#[test]
fn instruction_shapes() {
    assert_eq!(
        classify("  rdi  num "),
        Classified {
            label: None,
            kind: LineKind::InstrWithReference {
                mnemonic: "RDI".into(),
                reference: "NUM".into()
            }
        }
    );
    assert_eq!(
        kind("prti 0x0a"),
        LineKind::InstrWithLiteral {
            mnemonic: "PRTI".into(),
            literal: "0X0A".into()
        }
    );
    assert_eq!(kind("end"), LineKind::InstrNoOperand { mnemonic: "END".into() });
    assert_eq!(kind("42"), LineKind::DataWord { literal: "42".into() });
    assert_eq!(kind("b one two"), LineKind::InvalidInstruction);
}

#[test]
fn blank_and_label_only() {
    assert_eq!(classify(""), Classified { label: None, kind: LineKind::Blank });
    assert_eq!(kind(" \t \r"), LineKind::Blank);
    assert_eq!(
        classify("top:"),
        Classified {
            label: Some("TOP".into()),
            kind: LineKind::LabelOnly
        }
    );
    assert_eq!(classify("  top :  ").kind, LineKind::LabelOnly);
}

#[test]
fn label_splits_off_before_components() {
    let c = classify("loop: B loop");
    assert_eq!(c.label.as_deref(), Some("LOOP"));
    assert_eq!(
        c.kind,
        LineKind::InstrWithReference {
            mnemonic: "B".into(),
            reference: "LOOP".into()
        }
    );
    // Only the text up to a second colon counts.
    let c = classify("a: rdi x: junk here");
    assert_eq!(c.label.as_deref(), Some("A"));
    assert_eq!(
        c.kind,
        LineKind::InstrWithReference {
            mnemonic: "RDI".into(),
            reference: "X".into()
        }
    );
}

#[test]
fn string_literals_keep_their_case() {
    let c = classify("msg: \"Hello, World\"");
    assert_eq!(c.label.as_deref(), Some("MSG"));
    assert_eq!(
        c.kind,
        LineKind::StringLiteral {
            payload: "Hello, World".into()
        }
    );
    // A colon inside the quotes is not a label.
    assert_eq!(
        classify("\"a:b\""),
        Classified {
            label: None,
            kind: LineKind::StringLiteral {
                payload: "a:b".into()
            }
        }
    );
    assert_eq!(kind("msg: \"never closed"), LineKind::InvalidString);
}

#[test]
fn comments_are_stripped_outside_quotes() {
    assert_eq!(kind("; just a note"), LineKind::Blank);
    assert_eq!(
        kind("prti x ; show x"),
        LineKind::InstrWithReference {
            mnemonic: "PRTI".into(),
            reference: "X".into()
        }
    );
    assert_eq!(
        kind("\"semi;colon\" ; trailing"),
        LineKind::StringLiteral {
            payload: "semi;colon".into()
        }
    );
}

#[test]
fn unprintable_token_ends_the_components() {
    assert_eq!(kind("end\x07"), LineKind::InstrNoOperand { mnemonic: "END".into() });
    assert_eq!(kind("end \x07 junk more"), LineKind::InstrNoOperand { mnemonic: "END".into() });
}

#[test]
fn overlong_label_is_invalid() {
    let name = "L".repeat(MAX_LABEL_LEN);
    assert_eq!(classify(&format!("{name}: end")).label, Some(name.clone()));
    let c = classify(&format!("{name}X: end"));
    assert_eq!(c.label, None);
    assert_eq!(c.kind, LineKind::InvalidInstruction);
}
