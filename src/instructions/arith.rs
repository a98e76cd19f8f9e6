//! Integer arithmetic (`ADD`/`SUB`/`MUL`/`IDIV`). Division truncates
//! toward zero, matching Rust's native `i64` division; a zero divisor is
//! `WRONG_OP_VALUE`, not a panic.

use crate::engine::{Engine, Flow};
use crate::error::{InterpError, Result};
use crate::operand::Effective;
use crate::value::Value;

fn binary_int(
    engine: &mut Engine,
    args: &[Effective],
    name: &str,
    f: impl FnOnce(i64, i64) -> Result<i64>,
) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest(&format!("{} arg1", name))?;
    let (frame, var) = (frame, var.to_string());
    let a = args[1].expect_int(&format!("{} arg2", name))?;
    let b = args[2].expect_int(&format!("{} arg3", name))?;
    let result = f(a, b)?;
    engine.frames.assign(frame, &var, Value::Int(result))?;
    Ok(Flow::Next)
}

pub fn add(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    binary_int(engine, args, "ADD", |a, b| Ok(a.wrapping_add(b)))
}

pub fn sub(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    binary_int(engine, args, "SUB", |a, b| Ok(a.wrapping_sub(b)))
}

pub fn mul(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    binary_int(engine, args, "MUL", |a, b| Ok(a.wrapping_mul(b)))
}

pub fn idiv(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    binary_int(engine, args, "IDIV", |a, b| {
        if b == 0 {
            return Err(InterpError::WrongOpValue("division by zero".into()));
        }
        Ok(a / b)
    })
}
