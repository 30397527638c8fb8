use std::fmt;

use enum_as_inner::EnumAsInner;

/// A single operand stack or local variable slot.
///
/// Longs do not have a variant: they always occupy two `Int` slots, high half
/// first (see [`support::long`]). Chars are UTF-16 code units, so a lone
/// surrogate is a valid char.
#[derive(Clone, Debug, PartialEq, EnumAsInner)]
pub enum RuntimeValue {
    Int(i32),
    Float(f32),
    Double(f64),
    Char(u16),
    Str(String),
}

impl RuntimeValue {
    /// The value as an int, if it is one. Chars count as their code point,
    /// as they do in JVM arithmetic.
    pub fn int_value(&self) -> Option<i32> {
        match self {
            RuntimeValue::Int(value) => Some(*value),
            RuntimeValue::Char(value) => Some(*value as i32),
            _ => None,
        }
    }

    /// The value rounded to single precision. Strings have no numeric value.
    pub fn narrow_f32(&self) -> Option<f32> {
        match self {
            RuntimeValue::Int(value) => Some(*value as f32),
            RuntimeValue::Float(value) => Some(*value),
            RuntimeValue::Double(value) => Some(*value as f32),
            RuntimeValue::Char(value) => Some(*value as f32),
            RuntimeValue::Str(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RuntimeValue::Int(_) => "int",
            RuntimeValue::Float(_) => "float",
            RuntimeValue::Double(_) => "double",
            RuntimeValue::Char(_) => "char",
            RuntimeValue::Str(_) => "string",
        }
    }
}

impl fmt::Display for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Int(value) => write!(f, "{}", value),
            // Debug keeps the trailing `.0` on whole numbers
            RuntimeValue::Float(value) => write!(f, "{:?}", value),
            RuntimeValue::Double(value) => write!(f, "{:?}", value),
            RuntimeValue::Char(value) => {
                let value = char::from_u32(*value as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
                write!(f, "{}", value)
            }
            RuntimeValue::Str(value) => write!(f, "{}", value),
        }
    }
}

impl From<i32> for RuntimeValue {
    fn from(value: i32) -> Self {
        RuntimeValue::Int(value)
    }
}

impl From<f32> for RuntimeValue {
    fn from(value: f32) -> Self {
        RuntimeValue::Float(value)
    }
}

impl From<f64> for RuntimeValue {
    fn from(value: f64) -> Self {
        RuntimeValue::Double(value)
    }
}

impl From<u16> for RuntimeValue {
    fn from(value: u16) -> Self {
        RuntimeValue::Char(value)
    }
}

impl From<String> for RuntimeValue {
    fn from(value: String) -> Self {
        RuntimeValue::Str(value)
    }
}

impl From<&str> for RuntimeValue {
    fn from(value: &str) -> Self {
        RuntimeValue::Str(value.to_string())
    }
}
