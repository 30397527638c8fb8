use super::{Operands, Progression};
use crate::{arg, error::Throwable, internal, pop, runtime::value::RuntimeValue, Interpreter};

fn load(vm: &mut Interpreter, index: usize) -> Result<Progression, Throwable> {
    let local = vm.locals.load(index)?.clone();

    vm.operands.push(local);
    Ok(Progression::Next)
}

fn store_int(vm: &mut Interpreter, index: usize) -> Result<Progression, Throwable> {
    let value = pop!(vm);
    if value.int_value().is_none() {
        return Err(internal!("cannot istore a {}", value.type_name()));
    }

    vm.locals.store(index, value)?;
    Ok(Progression::Next)
}

fn store_float(vm: &mut Interpreter, index: usize) -> Result<Progression, Throwable> {
    let value = arg!(vm, "value" => f32);

    vm.locals.store(index, RuntimeValue::Float(value))?;
    Ok(Progression::Next)
}

fn load_long(vm: &mut Interpreter, index: usize) -> Result<Progression, Throwable> {
    let high = vm.locals.load(index)?.clone();
    let low = vm.locals.load(index + 1)?.clone();

    vm.operands.push(high);
    vm.operands.push(low);
    Ok(Progression::Next)
}

fn store_long(vm: &mut Interpreter, index: usize) -> Result<Progression, Throwable> {
    let low = pop!(vm);
    let high = pop!(vm);

    vm.locals.store_pair(index, high, low)?;
    Ok(Progression::Next)
}

macro_rules! local_ops {
    ($($index: literal),*) => {
        paste::paste! {
            $(
                pub fn [<iload_ $index>](vm: &mut Interpreter) -> Result<Progression, Throwable> {
                    load(vm, $index)
                }

                pub fn [<fload_ $index>](vm: &mut Interpreter) -> Result<Progression, Throwable> {
                    load(vm, $index)
                }

                pub fn [<lload_ $index>](vm: &mut Interpreter) -> Result<Progression, Throwable> {
                    load_long(vm, $index)
                }

                pub fn [<istore_ $index>](vm: &mut Interpreter) -> Result<Progression, Throwable> {
                    store_int(vm, $index)
                }

                pub fn [<fstore_ $index>](vm: &mut Interpreter) -> Result<Progression, Throwable> {
                    store_float(vm, $index)
                }

                pub fn [<lstore_ $index>](vm: &mut Interpreter) -> Result<Progression, Throwable> {
                    store_long(vm, $index)
                }
            )*
        }
    };
}

local_ops!(0, 1, 2, 3);

pub fn iload(vm: &mut Interpreter, operands: &mut Operands) -> Result<Progression, Throwable> {
    let index = operands.pop()?;
    load(vm, index as usize)
}

pub fn fload(vm: &mut Interpreter, operands: &mut Operands) -> Result<Progression, Throwable> {
    let index = operands.pop()?;
    load(vm, index as usize)
}

pub fn lload(vm: &mut Interpreter, operands: &mut Operands) -> Result<Progression, Throwable> {
    let index = operands.pop()?;
    load_long(vm, index as usize)
}

pub fn istore(vm: &mut Interpreter, operands: &mut Operands) -> Result<Progression, Throwable> {
    let index = operands.pop()?;
    store_int(vm, index as usize)
}

pub fn fstore(vm: &mut Interpreter, operands: &mut Operands) -> Result<Progression, Throwable> {
    let index = operands.pop()?;
    store_float(vm, index as usize)
}

pub fn lstore(vm: &mut Interpreter, operands: &mut Operands) -> Result<Progression, Throwable> {
    let index = operands.pop()?;
    store_long(vm, index as usize)
}
