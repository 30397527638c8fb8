mod common;

use common::{exec_pooled, make_scripted_vm, TestResult};
use interpreter::{
    error::Throwable, pop, static_method, Dispatch, Interpreter, RuntimeValue,
};
use parse::{builder::PoolBuilder, pool::ConstantPool};

const INVOKEVIRTUAL: u8 = 0xb6;

fn method_pool(class: &str, name: &str, descriptor: &str) -> anyhow::Result<(ConstantPool, u8)> {
    let mut builder = PoolBuilder::new();
    let method = builder.method(class, name, descriptor)?;

    Ok((builder.build(), method))
}

#[test]
fn println_int_pops_one_value() -> TestResult {
    let (pool, method) = method_pool("java/io/PrintStream", "println", "(I)V")?;
    let (mut vm, output) = make_scripted_vm(&[]);
    vm.operands.push(1);
    vm.operands.push(-42);

    let dispatch = exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);

    assert!(dispatch.is_completed());
    assert_eq!(vm.operands.values(), &[RuntimeValue::Int(1)]);
    assert_eq!(output.lines(), vec!["-42".to_string()]);
    Ok(())
}

#[test]
fn println_string() -> TestResult {
    let (pool, method) = method_pool("java/io/PrintStream", "println", "(Ljava/lang/String;)V")?;
    let (mut vm, output) = make_scripted_vm(&[]);
    vm.operands.push("Hello, world");

    exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);

    assert!(vm.operands.is_empty());
    assert_eq!(output.contents(), "Hello, world\n");
    Ok(())
}

#[test]
fn println_on_an_empty_stack_faults() -> TestResult {
    let (pool, method) = method_pool("java/io/PrintStream", "println", "(I)V")?;
    let (mut vm, output) = make_scripted_vm(&[]);

    let dispatch = exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);

    assert!(matches!(dispatch, Dispatch::Recovered { .. }));
    assert_eq!(output.contents(), "");
    Ok(())
}

#[test]
fn next_int_reprompts_until_valid() -> TestResult {
    let (pool, method) = method_pool("java/util/Scanner", "nextInt", "()I")?;
    let (mut vm, output) = make_scripted_vm(&["abc", "42"]);

    let dispatch = exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);

    assert!(dispatch.is_completed());
    assert_eq!(vm.operands.values(), &[RuntimeValue::Int(42)]);
    assert_eq!(
        output.contents(),
        "Enter a number: Invalid input\nEnter a number: "
    );
    assert_eq!(
        output.lines().iter().filter(|line| line.contains("Invalid input")).count(),
        1
    );
    Ok(())
}

#[test]
fn next_int_accepts_signs() -> TestResult {
    let (pool, method) = method_pool("java/util/Scanner", "nextInt", "()I")?;
    let (mut vm, _) = make_scripted_vm(&["-17", "+8"]);

    exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);
    exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);

    assert_eq!(
        vm.operands.values(),
        &[RuntimeValue::Int(-17), RuntimeValue::Int(8)]
    );
    Ok(())
}

#[test]
fn next_int_rejects_out_of_range_input() -> TestResult {
    let (pool, method) = method_pool("java/util/Scanner", "nextInt", "()I")?;
    let (mut vm, output) = make_scripted_vm(&["99999999999", "", "1.0", "٤٢", "7"]);

    exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);

    assert_eq!(vm.operands.values(), &[RuntimeValue::Int(7)]);
    assert_eq!(output.contents().matches("Invalid input").count(), 4);
    Ok(())
}

#[test]
fn next_int_faults_when_input_ends() -> TestResult {
    let (pool, method) = method_pool("java/util/Scanner", "nextInt", "()I")?;
    let (mut vm, output) = make_scripted_vm(&["nope"]);

    let dispatch = exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);

    assert!(matches!(
        dispatch,
        Dispatch::Recovered {
            error: Throwable::Internal(_),
            ..
        }
    ));
    assert!(vm.operands.is_empty());
    assert_eq!(output.contents().matches("Enter a number: ").count(), 2);
    Ok(())
}

fn double_top(vm: &mut Interpreter) -> Result<(), Throwable> {
    let value = pop!(vm);
    let value = value
        .int_value()
        .ok_or_else(|| interpreter::internal!("not an int"))?;

    vm.operands.push(value * 2);
    Ok(())
}

#[test]
fn natives_can_be_registered() -> TestResult {
    let (pool, method) = method_pool("demo/Maths", "double", "(I)I")?;
    let (mut vm, _) = make_scripted_vm(&[]);

    let (name, native) =
        static_method!(class: "demo/Maths", name: "double", descriptor: "(I)I" => double_top);
    vm.natives_mut().register(name, native);
    assert!(vm.natives().contains("demo/Maths.double:(I)I"));

    vm.operands.push(21);
    exec_pooled(&mut vm, INVOKEVIRTUAL, &[0, method], &pool);

    assert_eq!(vm.operands.values(), &[RuntimeValue::Int(42)]);
    Ok(())
}
