//! Longs live on the operand stack as two int slots. Every operation here pops
//! the halves, recombines them, works in 64 bits and splits the result again.

#![allow(clippy::redundant_closure_call)]

use super::{binary::shift_amount, Progression};
use crate::{arg, error::Throwable, runtime::value::RuntimeValue, Interpreter, VmError};

macro_rules! lbinop {
    ($ins: ident => $op: expr) => {
        pub fn $ins(vm: &mut Interpreter) -> Result<Progression, Throwable> {
            let rhs = arg!(vm, "rhs" => i64);
            let lhs = arg!(vm, "lhs" => i64);

            let result: i64 = $op(lhs, rhs);
            vm.operands.push_long(result);

            Ok(Progression::Next)
        }
    };
    (checked $ins: ident => $op: expr) => {
        pub fn $ins(vm: &mut Interpreter) -> Result<Progression, Throwable> {
            let rhs = arg!(vm, "rhs" => i64);
            let lhs = arg!(vm, "lhs" => i64);

            let result: Result<i64, VmError> = $op(lhs, rhs);
            match result {
                Ok(result) => {
                    vm.operands.push_long(result);
                    Ok(Progression::Next)
                }
                Err(err) => Ok(Progression::Error(err)),
            }
        }
    };
}

lbinop!(ladd => |lhs: i64, rhs: i64| lhs.wrapping_add(rhs));

lbinop!(lsub => |lhs: i64, rhs: i64| lhs.wrapping_sub(rhs));

lbinop!(lmul => |lhs: i64, rhs: i64| lhs.wrapping_mul(rhs));

lbinop!(checked ldiv => |lhs: i64, rhs: i64| {
    if rhs == 0 {
        return Err(VmError::DivideByZero);
    }

    Ok(lhs.wrapping_div(rhs))
});

lbinop!(checked lrem => |lhs: i64, rhs: i64| {
    if rhs == 0 {
        return Err(VmError::DivideByZero);
    }

    Ok(lhs.wrapping_rem(rhs))
});

lbinop!(land => |lhs: i64, rhs: i64| lhs & rhs);

lbinop!(lor => |lhs: i64, rhs: i64| lhs | rhs);

lbinop!(lxor => |lhs: i64, rhs: i64| lhs ^ rhs);

pub fn lneg(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let value = arg!(vm, "value" => i64);
    vm.operands.push_long(value.wrapping_neg());

    Ok(Progression::Next)
}

// Shifts take an int amount on top of the long
pub fn lshl(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let amount = arg!(vm, "shift amount" => i32);
    let value = arg!(vm, "value" => i64);

    let result = match shift_amount(vm, amount, 64)? {
        s if s >= 64 => 0,
        s => value << s,
    };

    vm.operands.push_long(result);
    Ok(Progression::Next)
}

pub fn lshr(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let amount = arg!(vm, "shift amount" => i32);
    let value = arg!(vm, "value" => i64);

    let result = value >> shift_amount(vm, amount, 64)?.min(63);

    vm.operands.push_long(result);
    Ok(Progression::Next)
}

pub fn lushr(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let amount = arg!(vm, "shift amount" => i32);
    let value = arg!(vm, "value" => i64);

    let result = ((value as u64) >> (amount & 0x3f)) as i64;

    vm.operands.push_long(result);
    Ok(Progression::Next)
}

pub fn lconst_0(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    vm.operands.push_long(0);
    Ok(Progression::Next)
}

pub fn lconst_1(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    vm.operands.push_long(1);
    Ok(Progression::Next)
}

// Conversions (long)
pub fn l2i(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let value = arg!(vm, "value" => i64);
    vm.operands.push(RuntimeValue::Int(value as i32));

    Ok(Progression::Next)
}

pub fn l2f(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let value = arg!(vm, "value" => i64);
    vm.operands.push(RuntimeValue::Float(value as f32));

    Ok(Progression::Next)
}

pub fn l2d(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let value = arg!(vm, "value" => i64);
    vm.operands.push(RuntimeValue::Double(value as f64));

    Ok(Progression::Next)
}
