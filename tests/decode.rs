use pretty_assertions::assert_eq;
use tims_rs::decoder::{Decoder, Op, TimsDecoder};
use tims_rs::disasm::{fmt_word, listing};
use tims_rs::instructions::{self, OpFlags, TABLE};
use tims_rs::word::{opcode_of, operand_of, pack};

#[test]
fn packing_is_stable_through_decode() {
    let dec = TimsDecoder::new();
    for desc in TABLE {
        for operand in [0u8, 1, 0x7F, 0x80, 0xFF] {
            let w = pack(desc.opcode(), operand);
            assert_eq!(w as i32 & 0xFFFF, desc.opcode() as i32 * 256 + operand as i32);
            let d = dec.decode(w).expect("table opcode decodes");
            assert_eq!(d.op, desc.op);
            assert_eq!(d.operand, operand);
            assert_eq!(pack(d.op.opcode(), d.operand), w);
        }
    }
}

#[test]
fn opcode_values_match_the_instruction_set() {
    let expect = [
        ("RDI", 0x10),
        ("RDS", 0x11),
        ("PRTI", 0x12),
        ("PRTS", 0x13),
        ("B", 0x40),
        ("BN", 0x41),
        ("BZ", 0x42),
        ("END", 0x43),
    ];
    for (mn, code) in expect {
        let desc = instructions::by_mnemonic(mn).unwrap();
        assert_eq!(desc.opcode(), code);
        assert_eq!(desc.op.desc().mnemonic, mn);
        assert_eq!(instructions::by_opcode(code).unwrap().mnemonic, mn);
    }
    assert!(instructions::by_mnemonic("prti").is_none());
    assert!(instructions::by_mnemonic("ADD").is_none());
}

#[test]
fn only_store_referencing_ops_relocate() {
    let relocating: Vec<&str> = TABLE
        .iter()
        .filter(|d| d.relocatable())
        .map(|d| d.mnemonic)
        .collect();
    assert_eq!(relocating, vec!["RDI", "RDS", "PRTI", "PRTS", "B", "BN", "BZ"]);
    assert!(Op::End.desc().flags.contains(OpFlags::HALT));
    assert!(Op::Bz.desc().flags.contains(OpFlags::CONDITIONAL));
}

#[test]
fn data_words_do_not_decode() {
    let dec = TimsDecoder::new();
    assert!(dec.decode(7).is_none());
    assert!(dec.decode(-1).is_none());
    assert!(dec.decode(0x2005).is_none());
    assert_eq!(opcode_of(-1), 0xFF);
    assert_eq!(operand_of(-1), 0xFF);
}

#[test]
fn disasm_words() {
    assert_eq!(fmt_word(0x1205), "PRTI 0x05");
    assert_eq!(fmt_word(0x40FF), "B 0xff");
    assert_eq!(fmt_word(0x4300), "END");
    assert_eq!(fmt_word(7), ".word 0x0007");
    assert_eq!(
        listing(&[0x100A, 0x4300], 4),
        vec![
            "  4: 100a  RDI 0x0a".to_string(),
            "  5: 4300  END".to_string()
        ]
    );
}
