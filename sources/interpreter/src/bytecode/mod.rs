use std::fmt;

use bytes::BytesMut;
use parse::pool::{ConstantPool, PoolRef};

use crate::{error::Throwable, internal, Interpreter, VmError};

mod binary;
mod invoke;
mod load_store;
mod long;
mod ops;
mod unary;

use binary::*;
use invoke::*;
use load_store::*;
use long::*;
use ops::*;
use unary::*;

/// What an instruction asks of the driver once it has run
#[derive(Debug, Clone, PartialEq)]
pub enum Progression {
    Next,
    Return,
    /// A symbolic reference was resolved for the driver to act on (`getstatic`)
    Resolved(String),
    /// The instruction reported an error instead of producing a result
    Error(VmError),
}

pub type BareHandler = fn(&mut Interpreter) -> Result<Progression, Throwable>;
pub type OperandHandler = fn(&mut Interpreter, &mut Operands) -> Result<Progression, Throwable>;
pub type PooledHandler =
    fn(&mut Interpreter, &mut Operands, &ConstantPool) -> Result<Progression, Throwable>;

/// An instruction implementation, tagged with the inputs it needs
#[derive(Clone, Copy)]
pub enum Handler {
    Bare(BareHandler),
    Operands(OperandHandler),
    Pooled(PooledHandler),
}

impl Handler {
    /// Run the handler. Inputs beyond what the handler needs are ignored,
    /// missing inputs are a fault.
    pub fn invoke(self, vm: &mut Interpreter, input: Input<'_>) -> Result<Progression, Throwable> {
        match (self, input) {
            (Handler::Bare(handler), _) => handler(vm),
            (Handler::Operands(handler), Input::Operands(mut ops) | Input::Pooled(mut ops, _)) => {
                handler(vm, &mut ops)
            }
            (Handler::Pooled(handler), Input::Pooled(mut ops, pool)) => handler(vm, &mut ops, pool),
            (Handler::Operands(_), Input::None) => {
                Err(internal!("instruction requires operand bytes"))
            }
            (Handler::Pooled(_), _) => Err(internal!(
                "instruction requires operand bytes and the constant pool"
            )),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Bare(_) => write!(f, "Handler::Bare"),
            Handler::Operands(_) => write!(f, "Handler::Operands"),
            Handler::Pooled(_) => write!(f, "Handler::Pooled"),
        }
    }
}

/// The auxiliary inputs supplied alongside an opcode
#[derive(Debug)]
pub enum Input<'a> {
    None,
    Operands(Operands),
    Pooled(Operands, &'a ConstantPool),
}

/// The operand bytes of one instruction.
///
/// Handlers consume them from the back, so they must be pushed in reverse
/// consumption order. [`Operands::from_stream`] does that for bytes taken
/// straight from a code array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operands {
    bytes: BytesMut,
}

impl Operands {
    /// Operands as pushed: the last byte is consumed first
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: BytesMut::from(bytes.as_ref()),
        }
    }

    /// Operands in code order: the first byte is consumed first
    pub fn from_stream(bytes: &[u8]) -> Self {
        let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
        Self::new(reversed)
    }

    pub fn pop(&mut self) -> Result<u8, Throwable> {
        let len = self.bytes.len();
        if len == 0 {
            return Err(internal!("instruction is missing an operand byte"));
        }

        let byte = self.bytes[len - 1];
        self.bytes.truncate(len - 1);
        Ok(byte)
    }

    /// Pop a two byte constant pool reference. The bytes are summed, see [`PoolRef`].
    pub fn pop_ref(&mut self) -> Result<PoolRef, Throwable> {
        let first = self.pop()?;
        let second = self.pop()?;
        Ok(PoolRef::new(first, second))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for Operands {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Outcome of a best effort dispatch
#[derive(Debug)]
pub enum Dispatch {
    Completed(Progression),
    /// The opcode is not in the table and was treated as a no-op
    Skipped { opcode: u8 },
    /// The handler faulted. The fault was reported and execution may continue.
    Recovered { opcode: u8, error: Throwable },
}

impl Dispatch {
    pub fn is_completed(&self) -> bool {
        matches!(self, Dispatch::Completed(_))
    }

    pub fn progression(&self) -> Option<&Progression> {
        match self {
            Dispatch::Completed(progression) => Some(progression),
            _ => None,
        }
    }

    /// The status text handed back to drivers: empty for a return, the
    /// resolved name for `getstatic`, the message for a reported error.
    pub fn status(&self) -> Option<String> {
        match self.progression()? {
            Progression::Next => None,
            Progression::Return => Some(String::new()),
            Progression::Resolved(name) => Some(name.clone()),
            Progression::Error(err) => Some(err.to_string()),
        }
    }
}

/// A row of the dispatch table
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub code: u8,
    pub name: &'static str,
    pub handler: Handler,
    /// Operand bytes following the opcode in a code array
    pub operand_width: usize,
}

macro_rules! opcodes {
    ($($code: literal => $name: ident: $kind: ident $(($width: literal))?),* $(,)?) => {
        /// Every opcode the interpreter implements
        pub const SUPPORTED: &[u8] = &[$($code),*];

        pub fn lookup(opcode: u8) -> Option<Opcode> {
            Some(match opcode {
                $(
                    $code => Opcode {
                        code: $code,
                        name: stringify!($name),
                        handler: Handler::$kind($name),
                        operand_width: 0 $(+ $width)?,
                    },
                )*
                _ => return None,
            })
        }
    };
}

opcodes! {
    0x00 => nop: Bare,

    // Constants
    0x02 => iconst_m1: Bare,
    0x03 => iconst_0: Bare,
    0x04 => iconst_1: Bare,
    0x05 => iconst_2: Bare,
    0x06 => iconst_3: Bare,
    0x07 => iconst_4: Bare,
    0x08 => iconst_5: Bare,
    0x09 => lconst_0: Bare,
    0x0a => lconst_1: Bare,
    0x0b => fconst_0: Bare,
    0x0c => fconst_1: Bare,
    0x0d => fconst_2: Bare,
    0x12 => ldc: Pooled(1),

    // Loads
    0x15 => iload: Operands(1),
    0x16 => lload: Operands(1),
    0x17 => fload: Operands(1),
    0x1a => iload_0: Bare,
    0x1b => iload_1: Bare,
    0x1c => iload_2: Bare,
    0x1d => iload_3: Bare,
    0x1e => lload_0: Bare,
    0x1f => lload_1: Bare,
    0x20 => lload_2: Bare,
    0x21 => lload_3: Bare,
    0x22 => fload_0: Bare,
    0x23 => fload_1: Bare,
    0x24 => fload_2: Bare,
    0x25 => fload_3: Bare,

    // Stores
    0x36 => istore: Operands(1),
    0x37 => lstore: Operands(1),
    0x38 => fstore: Operands(1),
    0x3b => istore_0: Bare,
    0x3c => istore_1: Bare,
    0x3d => istore_2: Bare,
    0x3e => istore_3: Bare,
    0x3f => lstore_0: Bare,
    0x40 => lstore_1: Bare,
    0x41 => lstore_2: Bare,
    0x42 => lstore_3: Bare,
    0x43 => fstore_0: Bare,
    0x44 => fstore_1: Bare,
    0x45 => fstore_2: Bare,
    0x46 => fstore_3: Bare,

    // Math
    0x60 => iadd: Bare,
    0x61 => ladd: Bare,
    0x62 => fadd: Bare,
    0x64 => isub: Bare,
    0x65 => lsub: Bare,
    0x66 => fsub: Bare,
    0x68 => imul: Bare,
    0x69 => lmul: Bare,
    0x6a => fmul: Bare,
    0x6c => idiv: Bare,
    0x6d => ldiv: Bare,
    0x6e => fdiv: Bare,
    0x70 => irem: Bare,
    0x71 => lrem: Bare,
    0x72 => frem: Bare,
    0x74 => ineg: Bare,
    0x75 => lneg: Bare,
    0x76 => fneg: Bare,
    0x78 => ishl: Bare,
    0x79 => lshl: Bare,
    0x7a => ishr: Bare,
    0x7b => lshr: Bare,
    0x7c => iushr: Bare,
    0x7d => lushr: Bare,
    0x7e => iand: Bare,
    0x7f => land: Bare,
    0x80 => ior: Bare,
    0x81 => lor: Bare,
    0x82 => ixor: Bare,
    0x83 => lxor: Bare,

    // Conversions
    0x85 => i2l: Bare,
    0x86 => i2f: Bare,
    0x87 => i2d: Bare,
    0x88 => l2i: Bare,
    0x89 => l2f: Bare,
    0x8a => l2d: Bare,
    0x8b => f2i: Bare,
    0x8c => f2l: Bare,
    0x8d => f2d: Bare,
    0x91 => i2b: Bare,
    0x92 => i2c: Bare,
    0x93 => i2s: Bare,

    // Control
    0xb1 => ret: Bare,

    // References
    0xb2 => getstatic: Pooled(2),
    0xb6 => invokevirtual: Pooled(2),
}
