use pretty_assertions::assert_eq;
use tims_asm::labels::{compile_labels, DanglingLabel, LabelTable, NoLabel};

fn lines(src: &str) -> Vec<&str> {
    src.lines().collect()
}

#[test]
fn third_labelled_line_resolves_to_two() {
    let src = "A: RDI X\nB: PRTI X\nL: END\nX: 0\n";
    let pass = compile_labels(lines(src));
    assert_eq!(pass.table.resolve("L"), Ok(2));
    assert_eq!(pass.table.resolve("X"), Ok(3));
    assert!(pass.dangling.is_empty());
}

#[test]
fn label_only_line_binds_to_the_next_instruction() {
    let src = "TOP:\n\n  END\nNEXT: 0\n";
    let pass = compile_labels(lines(src));
    let names: Vec<(&str, u32)> = pass.table.iter().collect();
    assert_eq!(names, vec![("TOP", 0), ("NEXT", 1)]);
}

#[test]
fn pending_label_skips_lines_with_their_own_label() {
    let src = "P:\nQ: END\nRDI Z\n";
    let pass = compile_labels(lines(src));
    assert_eq!(pass.table.resolve("Q"), Ok(0));
    assert_eq!(pass.table.resolve("P"), Ok(1));
}

#[test]
fn unlabelled_lines_do_not_advance_addresses() {
    let src = "RDI X\nPRTI X\nX: 0\n";
    let pass = compile_labels(lines(src));
    assert_eq!(pass.table.resolve("X"), Ok(0));
}

#[test]
fn dangling_label_warns_once_and_is_dropped() {
    let src = "END\nLOST:\n\n";
    let pass = compile_labels(lines(src));
    assert_eq!(
        pass.dangling,
        vec![DanglingLabel {
            line: 2,
            name: "LOST".into()
        }]
    );
    assert_eq!(pass.table.resolve("LOST"), Err(NoLabel));
    assert!(pass.table.is_empty());
    assert_eq!(
        pass.dangling[0].to_string(),
        "Warning: Line 2 - dangling label \"LOST\" ignored"
    );
}

#[test]
fn replaced_pending_label_is_reported() {
    let src = "A:\nB:\nEND\n";
    let pass = compile_labels(lines(src));
    assert_eq!(pass.dangling.len(), 1);
    assert_eq!(pass.dangling[0].name, "A");
    assert_eq!(pass.table.resolve("B"), Ok(0));
}

#[test]
fn first_definition_wins() {
    let src = "A: END\nA: 0\nB: END\n";
    let pass = compile_labels(lines(src));
    assert_eq!(pass.table.len(), 2);
    assert_eq!(pass.table.resolve("A"), Ok(0));
    assert_eq!(pass.table.resolve("B"), Ok(1));

    let mut table = LabelTable::new();
    assert!(table.define("X", 4));
    assert!(!table.define("X", 9));
    assert_eq!(table.resolve("X"), Ok(4));
}

#[test]
fn invalid_lines_still_take_a_label() {
    let src = "BAD: B ONE TWO\nOK: END\n";
    let pass = compile_labels(lines(src));
    assert_eq!(pass.table.resolve("BAD"), Ok(0));
    assert_eq!(pass.table.resolve("OK"), Ok(1));
}

#[test]
fn labels_differing_only_in_case_are_one_label() {
    let src = "loop: END\nLOOP: 0\nnext: END\n";
    let pass = compile_labels(lines(src));
    assert_eq!(pass.table.len(), 2);
    assert_eq!(pass.table.resolve("LOOP"), Ok(0));
    assert_eq!(pass.table.resolve("NEXT"), Ok(1));
}
