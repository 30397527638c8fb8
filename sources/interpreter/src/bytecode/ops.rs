use super::Progression;
use crate::{error::Throwable, runtime::value::RuntimeValue, Interpreter};

#[macro_export]
macro_rules! pop {
    ($vm: expr) => {
        $vm.operands
            .pop()
            .ok_or_else(|| $crate::internal!("no value to pop from the operand stack"))?
    };
}

#[macro_export]
macro_rules! arg {
    ($vm: expr, $side: literal => i32) => {{
        let val = $crate::pop!($vm);

        val.int_value().ok_or_else(|| {
            $crate::internal!("{} was not an int (got {})", $side, val.type_name())
        })?
    }};
    // Narrowed to single precision, whatever numeric type was on the stack
    ($vm: expr, $side: literal => f32) => {{
        let val = $crate::pop!($vm);

        val.narrow_f32().ok_or_else(|| {
            $crate::internal!("{} was not numeric (got {})", $side, val.type_name())
        })?
    }};
    // A float, or the hex text of its big-endian bits
    ($vm: expr, $side: literal => encoded f32) => {{
        match $crate::pop!($vm) {
            $crate::runtime::value::RuntimeValue::Str(text) => {
                support::encoding::decode_hex_f32(&text)?
            }
            $crate::runtime::value::RuntimeValue::Float(value) => value,
            val => {
                return Err($crate::internal!(
                    "{} was not a float (got {})",
                    $side,
                    val.type_name()
                ))
            }
        }
    }};
    // Two slots, low half on top
    ($vm: expr, $side: literal => i64) => {{
        let low = $crate::arg!($vm, $side => i32);
        let high = $crate::arg!($vm, $side => i32);

        support::long::combine32(high, low)
    }};
}

macro_rules! push_const {
    ($($ins: ident => $value: expr),* $(,)?) => {
        $(
            pub fn $ins(vm: &mut Interpreter) -> Result<Progression, Throwable> {
                vm.operands.push($value);
                Ok(Progression::Next)
            }
        )*
    };
}

push_const! {
    iconst_m1 => RuntimeValue::Int(-1),
    iconst_0 => RuntimeValue::Int(0),
    iconst_1 => RuntimeValue::Int(1),
    iconst_2 => RuntimeValue::Int(2),
    iconst_3 => RuntimeValue::Int(3),
    iconst_4 => RuntimeValue::Int(4),
    iconst_5 => RuntimeValue::Int(5),
    fconst_0 => RuntimeValue::Float(0.0),
    fconst_1 => RuntimeValue::Float(1.0),
    fconst_2 => RuntimeValue::Float(2.0),
}

pub fn nop(_vm: &mut Interpreter) -> Result<Progression, Throwable> {
    Ok(Progression::Next)
}

/// Opcode 0xb1. Ends the method; the driver acts on the returned signal.
pub fn ret(_vm: &mut Interpreter) -> Result<Progression, Throwable> {
    Ok(Progression::Return)
}
