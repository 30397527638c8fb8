#![allow(clippy::redundant_closure_call)]

use super::Progression;
use crate::{arg, error::Throwable, internal, runtime::value::RuntimeValue, Interpreter, VmError};

macro_rules! binop {
    // Generic value transformation
    ($ins: ident, $res_ty: ident, $res_trans: expr => $op: expr) => {
        pub fn $ins(vm: &mut Interpreter) -> Result<Progression, Throwable> {
            let rhs = arg!(vm, "rhs" => $res_ty);
            let lhs = arg!(vm, "lhs" => $res_ty);

            let result: $res_ty = $op(lhs, rhs);
            vm.operands.push($res_trans(result));

            Ok(Progression::Next)
        }
    };
    // Transformation that may report an error instead of a value
    (checked $ins: ident, $res_ty: ident, $res_trans: expr => $op: expr) => {
        pub fn $ins(vm: &mut Interpreter) -> Result<Progression, Throwable> {
            let rhs = arg!(vm, "rhs" => $res_ty);
            let lhs = arg!(vm, "lhs" => $res_ty);

            let result: Result<$res_ty, VmError> = $op(lhs, rhs);
            match result {
                Ok(result) => {
                    vm.operands.push($res_trans(result));
                    Ok(Progression::Next)
                }
                Err(err) => Ok(Progression::Error(err)),
            }
        }
    };
    ($ins: ident (int) => $op: expr) => {
        binop!($ins, i32, RuntimeValue::Int => $op);
    };
    ($ins: ident (checked int) => $op: expr) => {
        binop!(checked $ins, i32, RuntimeValue::Int => $op);
    };
    ($ins: ident (float) => $op: expr) => {
        binop!($ins, f32, RuntimeValue::Float => $op);
    };
    ($ins: ident (checked float) => $op: expr) => {
        binop!(checked $ins, f32, RuntimeValue::Float => $op);
    };
}

// Binary (int)
binop!(iadd (int) => |lhs: i32, rhs: i32| lhs.wrapping_add(rhs));

binop!(isub (int) => |lhs: i32, rhs: i32| lhs.wrapping_sub(rhs));

binop!(imul (int) => |lhs: i32, rhs: i32| lhs.wrapping_mul(rhs));

binop!(idiv (checked int) => |lhs: i32, rhs: i32| {
    if rhs == 0 {
        return Err(VmError::DivideByZero);
    }

    Ok(lhs.wrapping_div(rhs))
});

binop!(irem (checked int) => |lhs: i32, rhs: i32| {
    if rhs == 0 {
        return Err(VmError::DivideByZero);
    }

    Ok(lhs.wrapping_rem(rhs))
});

binop!(iand (int) => |lhs: i32, rhs: i32| lhs & rhs);

binop!(ior (int) => |lhs: i32, rhs: i32| lhs | rhs);

binop!(ixor (int) => |lhs: i32, rhs: i32| lhs ^ rhs);

// Always masked, the amount never leaves 0..32
binop!(iushr (int) => |lhs: i32, rhs: i32| {
    ((lhs as u32) >> (rhs & 0x1f)) as i32
});

// Binary (float)
binop!(fadd (float) => |lhs: f32, rhs: f32| lhs + rhs);

binop!(fsub (float) => |lhs: f32, rhs: f32| lhs - rhs);

binop!(fmul (float) => |lhs: f32, rhs: f32| lhs * rhs);

binop!(fdiv (checked float) => |lhs: f32, rhs: f32| {
    if rhs == 0.0 {
        return Err(VmError::DivideByZero);
    }

    Ok(lhs / rhs)
});

binop!(frem (checked float) => |lhs: f32, rhs: f32| {
    if rhs == 0.0 {
        return Err(VmError::DivideByZero);
    }

    Ok(lhs % rhs)
});

/// Shift distance for `ishl`/`ishr`/`lshl`/`lshr`.
///
/// Unless [`crate::InterpreterOptions::mask_shift_amounts`] is set the amount
/// is not masked: shifting by the full width or more shifts every bit out, and
/// a negative amount is a fault.
pub(super) fn shift_amount(vm: &Interpreter, amount: i32, width: u32) -> Result<u32, Throwable> {
    if vm.options().mask_shift_amounts {
        return Ok(amount as u32 & (width - 1));
    }

    if amount < 0 {
        return Err(internal!("negative shift count {}", amount));
    }

    Ok(amount as u32)
}

pub fn ishl(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let rhs = arg!(vm, "rhs" => i32);
    let lhs = arg!(vm, "lhs" => i32);

    let result = match shift_amount(vm, rhs, 32)? {
        s if s >= 32 => 0,
        s => lhs << s,
    };

    vm.operands.push(RuntimeValue::Int(result));
    Ok(Progression::Next)
}

pub fn ishr(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let rhs = arg!(vm, "rhs" => i32);
    let lhs = arg!(vm, "lhs" => i32);

    // Past the width only the sign remains
    let result = lhs >> shift_amount(vm, rhs, 32)?.min(31);

    vm.operands.push(RuntimeValue::Int(result));
    Ok(Progression::Next)
}
