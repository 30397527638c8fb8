use super::Progression;
use crate::{arg, error::Throwable, runtime::value::RuntimeValue, Interpreter};

macro_rules! unop {
    ($ins: ident, $arg_ty: ident, $res_trans: expr => $op: expr) => {
        pub fn $ins(vm: &mut Interpreter) -> Result<Progression, Throwable> {
            let val = arg!(vm, "unary value" => $arg_ty);

            let result = $op(val);
            vm.operands.push($res_trans(result));

            Ok(Progression::Next)
        }
    };
    ($ins: ident (int) => $op: expr) => {
        unop!($ins, i32, RuntimeValue::Int => $op);
    };
    ($ins: ident (int => float) => $op: expr) => {
        unop!($ins, i32, RuntimeValue::Float => $op);
    };
    ($ins: ident (int => double) => $op: expr) => {
        unop!($ins, i32, RuntimeValue::Double => $op);
    };
    ($ins: ident (float) => $op: expr) => {
        unop!($ins, f32, RuntimeValue::Float => $op);
    };
}

// Negations
unop!(ineg (int) => |val: i32| val.wrapping_neg());

unop!(fneg (float) => |val: f32| -val);

// Conversions (int)
unop!(i2b (int) => |val: i32| val as i8 as i32);

unop!(i2s (int) => |val: i32| val as i16 as i32);

unop!(i2f (int => float) => |val: i32| val as f32);

unop!(i2d (int => double) => |val: i32| val as f64);

pub fn i2l(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let val = arg!(vm, "unary value" => i32);
    vm.operands.push_long(val as i64);

    Ok(Progression::Next)
}

pub fn i2c(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let val = arg!(vm, "unary value" => i32);

    // Truncated to a UTF-16 code unit, as the JVM does
    vm.operands.push(RuntimeValue::Char(val as u16));
    Ok(Progression::Next)
}

// Conversions (float). Rust's float to int casts saturate and send NaN to 0,
// which is what the JVM specifies.
pub fn f2i(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let val = arg!(vm, "unary value" => encoded f32);
    vm.operands.push(RuntimeValue::Int(val as i32));

    Ok(Progression::Next)
}

pub fn f2l(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let val = arg!(vm, "unary value" => encoded f32);
    vm.operands.push_long(val as i64);

    Ok(Progression::Next)
}

pub fn f2d(vm: &mut Interpreter) -> Result<Progression, Throwable> {
    let val = arg!(vm, "unary value" => encoded f32);
    vm.operands.push(RuntimeValue::Double(val as f64));

    Ok(Progression::Next)
}
