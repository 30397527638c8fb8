use anyhow::Context;
use bytes::Bytes;
use parse::pool::ConstantPool;
use support::bytes_ext::SafeBuf;
use tracing::{debug, info};

use crate::{
    bytecode::{self, Dispatch, Input, Operands, Progression},
    error::Throwable,
    Interpreter, VmError,
};

/// How a run over a code array ended
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// A return instruction was reached
    Returned,
    /// The code ran out without returning
    Exhausted,
    /// An instruction reported an error and the run stopped there
    Halted(VmError),
}

/// Drives the interpreter over the code of a single method, one instruction
/// at a time. Unknown opcodes and faulting instructions are skipped.
pub struct Runner<'a> {
    vm: &'a mut Interpreter,
    pool: &'a ConstantPool,
}

impl<'a> Runner<'a> {
    pub fn new(vm: &'a mut Interpreter, pool: &'a ConstantPool) -> Self {
        Self { vm, pool }
    }

    pub fn run(&mut self, code: impl Into<Bytes>) -> Result<Completion, Throwable> {
        let mut code: Bytes = code.into();
        let length = code.len();

        info!("running {} bytes of code", length);

        while !code.is_empty() {
            let pc = length - code.len();
            let opcode = code.try_get_u8()?;

            // Without a table entry there is nothing saying how wide the operands are
            let width = bytecode::lookup(opcode)
                .map(|op| op.operand_width)
                .unwrap_or_default();

            let mut operand_bytes = Vec::with_capacity(width);
            for _ in 0..width {
                let byte = code
                    .try_get_u8()
                    .with_context(|| format!("operands of {:#04x} @ {} are truncated", opcode, pc))?;
                operand_bytes.push(byte);
            }

            debug!(
                "exec {:#04x} @ {} with operands {:?}, stack {:?}",
                opcode,
                pc,
                operand_bytes,
                self.vm.operands.values()
            );

            let input = Input::Pooled(Operands::from_stream(&operand_bytes), self.pool);
            match self.vm.interpret(opcode, input) {
                Dispatch::Completed(Progression::Next) => {}
                Dispatch::Completed(Progression::Return) => {
                    info!("returned @ {}", pc);
                    return Ok(Completion::Returned);
                }
                Dispatch::Completed(Progression::Resolved(name)) => {
                    info!("resolved static {}", name);
                }
                Dispatch::Completed(Progression::Error(err)) => {
                    info!("halting @ {}: {}", pc, err);
                    return Ok(Completion::Halted(err));
                }
                Dispatch::Skipped { .. } | Dispatch::Recovered { .. } => {}
            }
        }

        info!("ran off the end of the code");
        Ok(Completion::Exhausted)
    }
}

/// Run `code` to completion against `pool`
pub fn run(
    vm: &mut Interpreter,
    code: impl Into<Bytes>,
    pool: &ConstantPool,
) -> Result<Completion, Throwable> {
    Runner::new(vm, pool).run(code)
}
