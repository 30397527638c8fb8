use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::{NativeFunction, NativeModule};
use crate::{error::Throwable, internal, pop, runtime::value::RuntimeValue, static_method, Interpreter};

pub const PROMPT: &str = "Enter a number: ";
pub const REJECTED: &str = "Invalid input";

lazy_static! {
    static ref SIGNED_INT: Regex = Regex::new(r"^[-+]?[0-9]+$").unwrap();
}

fn println(vm: &mut Interpreter) -> Result<(), Throwable> {
    let value = pop!(vm);
    vm.host_mut().write_line(&value.to_string())?;

    Ok(())
}

pub struct PrintStream;
impl NativeModule for PrintStream {
    fn classname() -> &'static str {
        "java/io/PrintStream"
    }

    fn methods() -> Vec<(String, NativeFunction)> {
        vec![
            static_method!(class: Self::classname(), name: "println", descriptor: "(I)V" => println),
            static_method!(class: Self::classname(), name: "println", descriptor: "(Ljava/lang/String;)V" => println),
        ]
    }
}

/// Parse a line as an int, `None` if it is not one
fn parse_int(line: &str) -> Option<i32> {
    let line = line.trim_end_matches(['\r', '\n']);
    if !SIGNED_INT.is_match(line) {
        return None;
    }

    // Matches the pattern but may still be out of range
    line.parse().ok()
}

/// Prompt until an int is entered. There is no way out other than valid input
/// or the input ending, which faults.
fn next_int(vm: &mut Interpreter) -> Result<(), Throwable> {
    let host = vm.host_mut();

    let value = loop {
        host.write(PROMPT)?;

        let line = host
            .read_line()?
            .ok_or_else(|| internal!("input ended while waiting for an int"))?;

        match parse_int(&line) {
            Some(value) => break value,
            None => {
                debug!("rejected {:?} as an int", line);
                host.write_line(REJECTED)?;
            }
        }
    };

    vm.operands.push(RuntimeValue::Int(value));
    Ok(())
}

pub struct Scanner;
impl NativeModule for Scanner {
    fn classname() -> &'static str {
        "java/util/Scanner"
    }

    fn methods() -> Vec<(String, NativeFunction)> {
        vec![static_method!(class: Self::classname(), name: "nextInt", descriptor: "()I" => next_int)]
    }
}
