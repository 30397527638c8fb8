#![allow(dead_code)]

use interpreter::{
    native::host::{HostOutput, ScriptedHost},
    Dispatch, Input, Interpreter, InterpreterOptions, Operands, RuntimeValue,
};
use parse::pool::ConstantPool;
use tracing::Level;
use tracing_subscriber::fmt;

pub type TestResult = anyhow::Result<()>;

pub fn init_logging() {
    let format = fmt::format()
        .with_ansi(false)
        .without_time()
        .with_level(true)
        .with_target(false)
        .with_thread_names(false)
        .with_source_location(true)
        .compact();

    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .event_format(format)
        .with_test_writer()
        .try_init();
}

pub fn make_vm() -> Interpreter {
    init_logging();
    Interpreter::with_host(InterpreterOptions::default(), ScriptedHost::new(Vec::<String>::new()))
}

/// An interpreter reading `input`, plus a handle on what it writes
pub fn make_scripted_vm(input: &[&str]) -> (Interpreter, HostOutput) {
    init_logging();

    let host = ScriptedHost::new(input.iter().copied());
    let output = host.output();
    let vm = Interpreter::with_host(InterpreterOptions::default(), host);

    (vm, output)
}

pub fn exec(vm: &mut Interpreter, opcode: u8) -> Dispatch {
    vm.interpret(opcode, Input::None)
}

/// Run an instruction taking operand bytes, given in code order
pub fn exec_with(vm: &mut Interpreter, opcode: u8, operands: &[u8]) -> Dispatch {
    vm.interpret(opcode, Input::Operands(Operands::from_stream(operands)))
}

/// Run an instruction taking operand bytes (in code order) and the pool
pub fn exec_pooled(vm: &mut Interpreter, opcode: u8, operands: &[u8], pool: &ConstantPool) -> Dispatch {
    vm.interpret(opcode, Input::Pooled(Operands::from_stream(operands), pool))
}

pub fn push_ints(vm: &mut Interpreter, values: &[i32]) {
    for value in values {
        vm.operands.push(*value);
    }
}

#[track_caller]
pub fn iassert_eq(expected: i32, vm: &mut Interpreter) {
    assert_eq!(vm.operands.pop(), Some(RuntimeValue::Int(expected)));
}

#[track_caller]
pub fn fassert_eq(expected: f32, vm: &mut Interpreter) {
    assert_eq!(vm.operands.pop(), Some(RuntimeValue::Float(expected)));
}

#[track_caller]
pub fn lassert_eq(expected: i64, vm: &mut Interpreter) {
    assert_eq!(vm.operands.peek_long(), Some(expected));
    vm.operands.pop();
    vm.operands.pop();
}

#[track_caller]
pub fn assert_completed(dispatch: &Dispatch) {
    assert!(dispatch.is_completed(), "instruction did not complete: {:?}", dispatch);
}
