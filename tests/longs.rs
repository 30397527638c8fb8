mod common;

use common::{assert_completed, exec, exec_with, lassert_eq, make_vm, TestResult};
use interpreter::{
    runtime::stack::LocalsError, Dispatch, Interpreter, InterpreterOptions, RuntimeValue,
    Throwable,
};
use support::long::split64;

const LCONST_0: u8 = 0x09;
const LCONST_1: u8 = 0x0a;
const LLOAD: u8 = 0x16;
const LLOAD_0: u8 = 0x1e;
const LSTORE: u8 = 0x37;
const LSTORE_0: u8 = 0x3f;
const LSTORE_2: u8 = 0x41;
const LADD: u8 = 0x61;
const LSUB: u8 = 0x65;
const LMUL: u8 = 0x69;
const LDIV: u8 = 0x6d;
const LREM: u8 = 0x71;
const LNEG: u8 = 0x75;
const LSHL: u8 = 0x79;
const LSHR: u8 = 0x7b;
const LUSHR: u8 = 0x7d;
const LAND: u8 = 0x7f;
const LOR: u8 = 0x81;
const LXOR: u8 = 0x83;
const L2I: u8 = 0x88;
const L2F: u8 = 0x89;
const L2D: u8 = 0x8a;

fn binary(opcode: u8, lhs: i64, rhs: i64) -> i64 {
    let mut vm = make_vm();
    vm.operands.push_long(lhs);
    vm.operands.push_long(rhs);

    assert_completed(&exec(&mut vm, opcode));
    assert_eq!(vm.operands.len(), 2, "a long is two slots");

    vm.operands.peek_long().expect("a long result")
}

fn shift(opcode: u8, value: i64, amount: i32) -> i64 {
    let mut vm = make_vm();
    vm.operands.push_long(value);
    vm.operands.push(amount);

    assert_completed(&exec(&mut vm, opcode));
    assert_eq!(vm.operands.len(), 2);

    vm.operands.peek_long().expect("a long result")
}

#[test]
fn negating_42() {
    let mut vm = make_vm();

    let (high, low) = split64(42);
    assert_eq!((high, low), (0, 42));
    vm.operands.push(high);
    vm.operands.push(low);

    exec(&mut vm, LNEG);

    let (high, low) = split64(-42);
    assert_eq!(
        vm.operands.values(),
        &[RuntimeValue::Int(high), RuntimeValue::Int(low)]
    );
}

#[test]
fn constants() {
    let mut vm = make_vm();

    exec(&mut vm, LCONST_0);
    exec(&mut vm, LCONST_1);

    lassert_eq(1, &mut vm);
    lassert_eq(0, &mut vm);
    assert!(vm.operands.is_empty());
}

#[test]
fn arithmetic_wraps_at_64_bits() {
    let pairs = [
        (1_i64, 2_i64),
        (0xFFFF_FFFF, 1),
        (i64::MAX, 1),
        (i64::MIN, -1),
        (-0x1_0000_0000, 0x7FFF_FFFF),
        (0x1234_5678_9ABC, -0xDEF0),
    ];

    for (a, b) in pairs {
        assert_eq!(binary(LADD, a, b), a.wrapping_add(b), "{a} + {b}");
        assert_eq!(binary(LSUB, a, b), a.wrapping_sub(b), "{a} - {b}");
        assert_eq!(binary(LMUL, a, b), a.wrapping_mul(b), "{a} * {b}");
    }
}

#[test]
fn division() {
    assert_eq!(binary(LDIV, 0x1_0000_0000, 2), 0x8000_0000);
    assert_eq!(binary(LDIV, -7, 2), -3);
    assert_eq!(binary(LDIV, i64::MIN, -1), i64::MIN);
    assert_eq!(binary(LREM, -7, 2), -1);
    assert_eq!(binary(LREM, 0x1_0000_0003, 0x1_0000_0000), 3);
}

#[test]
fn division_by_zero_is_reported() {
    for opcode in [LDIV, LREM] {
        let mut vm = make_vm();
        vm.operands.push_long(5);
        vm.operands.push_long(0);

        let dispatch = exec(&mut vm, opcode);

        assert_eq!(dispatch.status().as_deref(), Some("Error: Divides by Zero"));
        assert!(vm.operands.is_empty());
    }
}

#[test]
fn bitwise() {
    let a = 0x0F0F_0000_FFFF_0001_i64;
    let b = 0x00FF_00FF_0F0F_0003_i64;

    assert_eq!(binary(LAND, a, b), a & b);
    assert_eq!(binary(LOR, a, b), a | b);
    assert_eq!(binary(LXOR, a, b), a ^ b);
}

#[test]
fn shifts() {
    assert_eq!(shift(LSHL, 1, 40), 1 << 40);
    assert_eq!(shift(LSHL, 0xFFFF_FFFF, 4), 0xF_FFFF_FFF0);
    assert_eq!(shift(LSHR, -16, 2), -4);
    assert_eq!(shift(LSHR, 1 << 40, 38), 4);

    // Unmasked: past the width every bit is shifted out
    assert_eq!(shift(LSHL, 1, 64), 0);
    assert_eq!(shift(LSHR, 1 << 40, 100), 0);
    assert_eq!(shift(LSHR, -1, 100), -1);
}

#[test]
fn unsigned_shift_is_masked() {
    assert_eq!(shift(LUSHR, -1, 1), i64::MAX);
    assert_eq!(shift(LUSHR, -8, 1), ((-8_i128 + (1_i128 << 64)) >> 1) as i64);
    assert_eq!(shift(LUSHR, -1, 65), i64::MAX);
    assert_eq!(shift(LUSHR, 64, 64), 64);
}

#[test]
fn masked_shifts_when_configured() {
    let options = InterpreterOptions {
        mask_shift_amounts: true,
        ..Default::default()
    };
    let mut vm = Interpreter::with_options(options);

    vm.operands.push_long(1);
    vm.operands.push(65);
    exec(&mut vm, LSHL);

    lassert_eq(2, &mut vm);
}

#[test]
fn narrowing() {
    let mut vm = make_vm();

    vm.operands.push_long(0x1_0000_0005);
    exec(&mut vm, L2I);
    assert_eq!(vm.operands.pop(), Some(RuntimeValue::Int(5)));

    vm.operands.push_long(0xFFFF_FFFF);
    exec(&mut vm, L2I);
    assert_eq!(vm.operands.pop(), Some(RuntimeValue::Int(-1)));

    vm.operands.push_long(-3);
    exec(&mut vm, L2F);
    assert_eq!(vm.operands.pop(), Some(RuntimeValue::Float(-3.0)));

    vm.operands.push_long(1 << 40);
    exec(&mut vm, L2D);
    assert_eq!(vm.operands.pop(), Some(RuntimeValue::Double((1_i64 << 40) as f64)));
    assert!(vm.operands.is_empty());
}

#[test]
fn store_then_load() -> TestResult {
    let mut vm = make_vm();
    vm.operands.push_long(-0x1234_5678_9ABC);

    assert_completed(&exec(&mut vm, LSTORE_0));
    assert!(vm.operands.is_empty());
    assert_eq!(vm.locals.len(), 2);

    let (high, low) = split64(-0x1234_5678_9ABC);
    assert_eq!(vm.locals.load(0)?, &RuntimeValue::Int(high));
    assert_eq!(vm.locals.load(1)?, &RuntimeValue::Int(low));

    exec(&mut vm, LLOAD_0);
    lassert_eq(-0x1234_5678_9ABC, &mut vm);

    vm.operands.push_long(7);
    exec_with(&mut vm, LSTORE, &[2]);
    exec_with(&mut vm, LLOAD, &[2]);
    lassert_eq(7, &mut vm);
    assert_eq!(vm.locals.len(), 4);

    Ok(())
}

#[test]
fn out_of_order_long_store_is_flagged() {
    let mut vm = make_vm();
    vm.operands.push_long(1);

    let dispatch = exec(&mut vm, LSTORE_2);

    assert!(matches!(
        dispatch,
        Dispatch::Recovered {
            error: Throwable::Locals(LocalsError::OutOfOrderStore { index: 2, len: 0 }),
            ..
        }
    ));
    assert!(vm.locals.is_empty());
}

#[test]
fn long_store_respects_declared_locals() {
    let options = InterpreterOptions {
        max_locals: Some(1),
        ..Default::default()
    };
    let mut vm = Interpreter::with_options(options);
    vm.operands.push_long(1);

    let dispatch = exec(&mut vm, LSTORE_0);

    assert!(matches!(
        dispatch,
        Dispatch::Recovered {
            error: Throwable::Locals(LocalsError::OutOfBounds { index: 1, max: 1 }),
            ..
        }
    ));
    assert!(vm.locals.is_empty(), "neither half is written");
}

#[test]
fn a_single_slot_is_not_a_long() {
    let mut vm = make_vm();
    vm.operands.push(1);

    let dispatch = exec(&mut vm, LNEG);
    assert!(matches!(dispatch, Dispatch::Recovered { opcode: LNEG, .. }));
}
