#![allow(clippy::new_without_default)]

use tracing::{error, trace, warn};

pub mod bytecode;
pub mod error;
pub mod native;
pub mod runner;
pub mod runtime;

pub use bytecode::{Dispatch, Input, Operands, Progression};
pub use error::{Throwable, VmError};
pub use runtime::value::RuntimeValue;

use native::{
    host::{Host, StdHost},
    NativeRegistry,
};
use runtime::stack::{Locals, OperandStack};

#[derive(Debug, Clone, Default)]
pub struct InterpreterOptions {
    /// Mask `ishl`/`ishr`/`lshl`/`lshr` amounts to the operand width like the
    /// JVM does. Off by default: amounts are used as-is.
    pub mask_shift_amounts: bool,
    /// The declared local variable count, if known
    pub max_locals: Option<usize>,
}

/// Executes single instructions against one operand stack and set of locals
pub struct Interpreter {
    pub operands: OperandStack,
    pub locals: Locals,

    options: InterpreterOptions,
    natives: NativeRegistry,
    host: Box<dyn Host>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_options(InterpreterOptions::default())
    }

    pub fn with_options(options: InterpreterOptions) -> Self {
        Self::with_host(options, StdHost)
    }

    pub fn with_host(options: InterpreterOptions, host: impl Host + 'static) -> Self {
        Self {
            operands: OperandStack::new(),
            locals: Locals::new(options.max_locals),
            options,
            natives: NativeRegistry::with_defaults(),
            host: Box::new(host),
        }
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    pub fn natives(&self) -> &NativeRegistry {
        &self.natives
    }

    pub fn natives_mut(&mut self) -> &mut NativeRegistry {
        &mut self.natives
    }

    pub fn host_mut(&mut self) -> &mut dyn Host {
        self.host.as_mut()
    }

    /// Execute one instruction, best effort. Unknown opcodes are skipped and
    /// faults are logged and handed back, neither stops the caller.
    pub fn interpret(&mut self, opcode: u8, input: Input<'_>) -> Dispatch {
        let Some(op) = bytecode::lookup(opcode) else {
            warn!("opcode {:#04x} not implemented, skipping it", opcode);
            return Dispatch::Skipped { opcode };
        };

        trace!("dispatching {} ({:#04x})", op.name, opcode);
        match op.handler.invoke(self, input) {
            Ok(progression) => Dispatch::Completed(progression),
            Err(error) => {
                error!("{} ({:#04x}) faulted: {}", op.name, opcode, error);
                Dispatch::Recovered { opcode, error }
            }
        }
    }

    /// Execute one instruction, failing on unknown opcodes and faults
    pub fn try_interpret(&mut self, opcode: u8, input: Input<'_>) -> Result<Progression, Throwable> {
        let op = bytecode::lookup(opcode)
            .ok_or_else(|| crate::internal!("opcode {:#04x} not implemented", opcode))?;

        trace!("dispatching {} ({:#04x})", op.name, opcode);
        op.handler.invoke(self, input)
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("operands", &self.operands)
            .field("locals", &self.locals)
            .field("options", &self.options)
            .field("natives", &self.natives)
            .finish_non_exhaustive()
    }
}
