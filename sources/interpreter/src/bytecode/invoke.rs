use parse::pool::{ConstantEntry, ConstantPool, PoolRef};
use tracing::debug;

use super::{Operands, Progression};
use crate::{error::Throwable, runtime::value::RuntimeValue, Interpreter};

/// Push a constant. Numeric entries push their value, anything else pushes
/// the text it resolves to.
pub fn ldc(
    vm: &mut Interpreter,
    operands: &mut Operands,
    pool: &ConstantPool,
) -> Result<Progression, Throwable> {
    let reference = PoolRef::to(operands.pop()?);

    let value = match reference.index().and_then(|index| pool.get(index)) {
        Some(ConstantEntry::Integer(data)) => RuntimeValue::Int(data.value),
        Some(ConstantEntry::Float(data)) => RuntimeValue::Float(data.value),
        _ => RuntimeValue::Str(pool.resolve_ref(reference)?),
    };

    debug!("ldc {} pushed {:?}", reference, value);
    vm.operands.push(value);
    Ok(Progression::Next)
}

/// Resolve the field name and hand it to the driver. The stack is untouched.
pub fn getstatic(
    _vm: &mut Interpreter,
    operands: &mut Operands,
    pool: &ConstantPool,
) -> Result<Progression, Throwable> {
    let reference = operands.pop_ref()?;
    let name = pool.resolve_ref(reference)?;

    debug!("getstatic {} resolved to {}", reference, name);
    Ok(Progression::Resolved(name))
}

pub fn invokevirtual(
    vm: &mut Interpreter,
    operands: &mut Operands,
    pool: &ConstantPool,
) -> Result<Progression, Throwable> {
    let reference = operands.pop_ref()?;
    let name = pool.resolve_ref(reference)?;

    match vm.natives().get(&name) {
        Some(native) => {
            debug!("invoking native {}", name);
            native(vm)?;
        }
        None => debug!("no native bound to {}, ignoring the call", name),
    }

    Ok(Progression::Next)
}
