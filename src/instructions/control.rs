//! Jumps, calls, returns, and process exit (`LABEL` is handled directly
//! by the engine's dispatch table since it carries no runtime effect).

use crate::engine::{Engine, Flow};
use crate::error::{InterpError, Result};
use crate::instructions::compare::{check_comparable, values_equal};
use crate::operand::Effective;
use crate::value::Value;

pub fn jump(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let label = args[0].expect_label("JUMP arg1")?;
    Ok(Flow::JumpTo(engine.label_position(label)?))
}

fn jump_if(engine: &mut Engine, args: &[Effective], what: &str, want_equal: bool) -> Result<Flow> {
    let label = args[0].expect_label(&format!("{} arg1", what))?.to_string();
    let target = engine.label_position(&label)?;
    let a = args[1].expect_value(&format!("{} arg2", what))?;
    let b = args[2].expect_value(&format!("{} arg3", what))?;
    check_comparable(a, b, true, what)?;
    let equal = values_equal(a, b);
    if equal == want_equal {
        Ok(Flow::JumpTo(target))
    } else {
        Ok(Flow::Next)
    }
}

pub fn jumpifeq(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    jump_if(engine, args, "JUMPIFEQ", true)
}

pub fn jumpifneq(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    jump_if(engine, args, "JUMPIFNEQ", false)
}

pub fn call(engine: &mut Engine, pc: usize, args: &[Effective]) -> Result<Flow> {
    let label = args[0].expect_label("CALL arg1")?;
    let target = engine.label_position(label)?;
    engine.call_stack.push(pc);
    Ok(Flow::JumpTo(target))
}

pub fn return_(engine: &mut Engine) -> Result<Flow> {
    let caller_pc = engine
        .call_stack
        .pop()
        .ok_or_else(|| InterpError::MissingValue("call stack is empty".into()))?;
    Ok(Flow::JumpTo(caller_pc + 1))
}

pub fn exit(_engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    match &args[0] {
        Effective::Value(Value::Int(n)) => {
            if (0..=49).contains(n) {
                Ok(Flow::Exit(*n as i32))
            } else {
                Err(InterpError::WrongOpValue(format!(
                    "EXIT code must be within 0..=49, found {}",
                    n
                )))
            }
        }
        other => Err(InterpError::InvalidOp(format!(
            "EXIT requires an int operand, found {:?}",
            other
        ))),
    }
}
