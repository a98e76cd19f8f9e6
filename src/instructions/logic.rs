//! Boolean logic (`AND`/`OR`/`NOT`).

use crate::engine::{Engine, Flow};
use crate::error::Result;
use crate::operand::Effective;
use crate::value::Value;

fn binary_bool(
    engine: &mut Engine,
    args: &[Effective],
    name: &str,
    f: impl FnOnce(bool, bool) -> bool,
) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest(&format!("{} arg1", name))?;
    let (frame, var) = (frame, var.to_string());
    let a = args[1].expect_bool(&format!("{} arg2", name))?;
    let b = args[2].expect_bool(&format!("{} arg3", name))?;
    engine.frames.assign(frame, &var, Value::Bool(f(a, b)))?;
    Ok(Flow::Next)
}

pub fn and(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    binary_bool(engine, args, "AND", |a, b| a && b)
}

pub fn or(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    binary_bool(engine, args, "OR", |a, b| a || b)
}

pub fn not(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("NOT arg1")?;
    let (frame, var) = (frame, var.to_string());
    let a = args[1].expect_bool("NOT arg2")?;
    engine.frames.assign(frame, &var, Value::Bool(!a))?;
    Ok(Flow::Next)
}
