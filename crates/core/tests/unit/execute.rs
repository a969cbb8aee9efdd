//! Execution engine semantics.
//!
//! Exercises both instruction families against a fresh machine, including
//! the saturating division policy, the persistent status flag, and the
//! failure paths for malformed instructions.

use obvm_core::Machine;
use obvm_core::common::constants::MEMORY_CELLS;
use obvm_core::common::error::ExecutionError;
use obvm_core::isa::decode::Decoded;

use crate::common::harness::{cmp_op, d_op, exec, poke_data, s_op};

#[test]
fn add_sub_mult_read_both_operands() {
    let mut m = Machine::new();
    poke_data(&mut m, 10, 6.5);
    poke_data(&mut m, 11, 2.0);

    exec(&mut m, 0, d_op(1, 10, 11)).unwrap();
    assert_eq!(m.get_data(0), 8.5);

    exec(&mut m, 1, d_op(2, 10, 11)).unwrap();
    assert_eq!(m.get_data(1), 4.5);

    exec(&mut m, 2, d_op(3, 10, 11)).unwrap();
    assert_eq!(m.get_data(2), 13.0);
}

#[test]
fn division_by_exact_zero_saturates_to_zero() {
    let mut m = Machine::new();
    for numerator in [1.0, -3.5, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        poke_data(&mut m, 10, numerator);
        poke_data(&mut m, 11, 0.0);
        exec(&mut m, 0, d_op(4, 10, 11)).unwrap();
        assert_eq!(m.get_data(0), 0.0, "numerator {numerator}");
    }

    // Negative zero compares equal to zero, so it saturates too.
    poke_data(&mut m, 11, -0.0);
    poke_data(&mut m, 10, 7.0);
    exec(&mut m, 0, d_op(4, 10, 11)).unwrap();
    assert_eq!(m.get_data(0), 0.0);
}

#[test]
fn division_by_nonzero_divides() {
    let mut m = Machine::new();
    poke_data(&mut m, 10, 9.0);
    poke_data(&mut m, 11, 4.0);
    exec(&mut m, 0, d_op(4, 10, 11)).unwrap();
    assert_eq!(m.get_data(0), 2.25);
}

#[test]
fn sqrt_has_no_domain_clamping() {
    let mut m = Machine::new();
    poke_data(&mut m, 5, 6.25);
    exec(&mut m, 0, s_op(2, 0, 5)).unwrap();
    assert_eq!(m.get_data(0), 2.5);

    poke_data(&mut m, 5, -4.0);
    exec(&mut m, 0, s_op(2, 0, 5)).unwrap();
    assert!(m.get_data(0).is_nan());
}

#[test]
fn copy_and_input_load() {
    let mut m = Machine::new();
    poke_data(&mut m, 7, 42.0);
    exec(&mut m, 1, s_op(3, 0, 7)).unwrap();
    assert_eq!(m.get_data(1), 42.0);

    m.set_input(9, -1.25);
    exec(&mut m, 2, s_op(4, 0, 9)).unwrap();
    assert_eq!(m.get_data(2), -1.25);
}

#[test]
fn noop_mutates_nothing() {
    let mut m = Machine::new();
    poke_data(&mut m, 3, 5.0);
    exec(&mut m, 3, s_op(0, 123, 3)).unwrap();
    assert_eq!(m.get_data(3), 5.0);
    assert!(!m.status());
}

#[test]
fn compare_writes_the_status_flag() {
    let mut m = Machine::new();
    poke_data(&mut m, 4, -1.0);

    exec(&mut m, 0, cmp_op(0, 4)).unwrap();
    assert!(m.status());

    exec(&mut m, 0, cmp_op(4, 4)).unwrap();
    assert!(!m.status());

    poke_data(&mut m, 4, 0.0);
    exec(&mut m, 0, cmp_op(2, 4)).unwrap();
    assert!(m.status());
}

#[test]
fn select_reads_the_most_recent_comparison() {
    let mut m = Machine::new();
    poke_data(&mut m, 10, 111.0);
    poke_data(&mut m, 11, 222.0);
    poke_data(&mut m, 4, -1.0);

    // status <- true, select takes addr1
    exec(&mut m, 0, cmp_op(0, 4)).unwrap();
    exec(&mut m, 1, d_op(6, 10, 11)).unwrap();
    assert_eq!(m.get_data(1), 111.0);

    // Flip the antecedent comparison; the same select now takes addr2.
    exec(&mut m, 0, cmp_op(4, 4)).unwrap();
    exec(&mut m, 1, d_op(6, 10, 11)).unwrap();
    assert_eq!(m.get_data(1), 222.0);
}

#[test]
fn status_persists_until_the_next_comparison() {
    let mut m = Machine::new();
    poke_data(&mut m, 4, 1.0);
    poke_data(&mut m, 10, 8.0);
    exec(&mut m, 0, cmp_op(4, 4)).unwrap();

    // Unrelated instructions leave the flag alone.
    exec(&mut m, 2, d_op(1, 10, 10)).unwrap();
    exec(&mut m, 3, s_op(3, 0, 10)).unwrap();
    exec(&mut m, 5, d_op(6, 10, 4)).unwrap();
    assert_eq!(m.get_data(5), 8.0);
    assert!(m.status());
}

#[test]
fn publish_writes_the_output_array() {
    let mut m = Machine::new();
    poke_data(&mut m, 8, 3.5);
    exec(&mut m, 0, d_op(5, 6, 8)).unwrap();
    assert_eq!(m.get_output(6), 3.5);
    // data untouched by publish
    assert_eq!(m.get_data(0), 0.0);
}

#[test]
fn bad_comparator_codes_fail() {
    let mut m = Machine::new();
    for code in 5..8 {
        let err = exec(&mut m, 0, cmp_op(code, 4)).unwrap_err();
        assert!(
            matches!(err, ExecutionError::BadComparator { pc: 0, code: c, .. } if c == code),
            "code {code}: {err}"
        );
    }
}

#[test]
fn unassigned_opcodes_fail() {
    let mut m = Machine::new();
    for sub in 5..16 {
        let err = exec(&mut m, 1, s_op(sub, 0, 0)).unwrap_err();
        assert!(matches!(err, ExecutionError::BadOpcode { pc: 1, .. }), "S-op {sub}");
    }
    for op in 7..16 {
        let err = exec(&mut m, 1, d_op(op, 0, 0)).unwrap_err();
        assert!(matches!(err, ExecutionError::BadOpcode { pc: 1, .. }), "D-op {op}");
    }
}

#[test]
fn out_of_range_address_fails_in_any_single_operand_op() {
    let mut m = Machine::new();
    for op in 0..5 {
        let inst = Decoded::Single {
            op,
            immediate: 0,
            addr: MEMORY_CELLS,
        };
        let err = m.execute(0, inst).unwrap_err();
        assert!(
            matches!(err, ExecutionError::AddressOutOfBounds { pc: 0, .. }),
            "S-op {op}: {err}"
        );
    }
}

#[test]
fn out_of_range_address_leaves_no_partial_mutation() {
    let mut m = Machine::new();
    poke_data(&mut m, 2, 9.0);

    // Publish with a bad second address must not touch output[3].
    let inst = Decoded::Double {
        op: 5,
        addr1: 3,
        addr2: MEMORY_CELLS,
    };
    let err = m.execute(0, inst).unwrap_err();
    assert!(matches!(err, ExecutionError::AddressOutOfBounds { pc: 0, .. }));
    assert_eq!(m.get_output(3), 0.0);

    // Arithmetic with a bad first address must not touch data[pc].
    let inst = Decoded::Double {
        op: 1,
        addr1: MEMORY_CELLS,
        addr2: 2,
    };
    assert!(m.execute(7, inst).is_err());
    assert_eq!(m.get_data(7), 0.0);
}

#[test]
fn errors_carry_the_faulting_decode() {
    let mut m = Machine::new();
    let inst = Decoded::Double {
        op: 2,
        addr1: MEMORY_CELLS,
        addr2: 1,
    };
    match m.execute(12, inst).unwrap_err() {
        ExecutionError::AddressOutOfBounds { pc, inst: carried } => {
            assert_eq!(pc, 12);
            assert_eq!(carried, inst);
        }
        other => panic!("unexpected error {other}"),
    }
}
