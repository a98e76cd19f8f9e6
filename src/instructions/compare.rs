//! Relational and equality comparisons (`LT`/`GT`/`EQ`). `LT`/`GT`
//! reject `Nil` entirely; `EQ` (and the `JUMPIFEQ`/`JUMPIFNEQ` control
//! instructions that share its rule) allow `Nil` on either side, equal
//! only to another `Nil`.

use crate::engine::{Engine, Flow};
use crate::error::{InterpError, Result};
use crate::operand::Effective;
use crate::value::Value;

pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Nil, _) | (_, Value::Nil) => false,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        _ => false,
    }
}

/// `LT`/`GT`/`EQ` share a type-compatibility rule: identical variants, or
/// (for equality only) either side being `Nil`.
pub fn check_comparable(a: &Value, b: &Value, allow_nil: bool, what: &str) -> Result<()> {
    let same_variant = a.type_name() == b.type_name();
    let either_nil = matches!(a, Value::Nil) || matches!(b, Value::Nil);
    if same_variant || (allow_nil && either_nil) {
        Ok(())
    } else {
        Err(InterpError::InvalidOp(format!(
            "{} requires comparable operand types, found {} and {}",
            what,
            a.type_name(),
            b.type_name()
        )))
    }
}

fn ordering(a: &Value, b: &Value, what: &str) -> Result<std::cmp::Ordering> {
    check_comparable(a, b, false, what)?;
    match (a, b) {
        (Value::Nil, _) | (_, Value::Nil) => Err(InterpError::InvalidOp(format!(
            "{} does not accept nil operands",
            what
        ))),
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        _ => unreachable!("check_comparable already rejected mixed types"),
    }
}

fn compare(
    engine: &mut Engine,
    args: &[Effective],
    what: &str,
    accept: impl FnOnce(std::cmp::Ordering) -> bool,
) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest(&format!("{} arg1", what))?;
    let (frame, var) = (frame, var.to_string());
    let a = args[1].expect_value(&format!("{} arg2", what))?;
    let b = args[2].expect_value(&format!("{} arg3", what))?;
    let result = accept(ordering(a, b, what)?);
    engine.frames.assign(frame, &var, Value::Bool(result))?;
    Ok(Flow::Next)
}

pub fn lt(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    compare(engine, args, "LT", |o| o == std::cmp::Ordering::Less)
}

pub fn gt(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    compare(engine, args, "GT", |o| o == std::cmp::Ordering::Greater)
}

pub fn eq(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("EQ arg1")?;
    let (frame, var) = (frame, var.to_string());
    let a = args[1].expect_value("EQ arg2")?;
    let b = args[2].expect_value("EQ arg3")?;
    check_comparable(a, b, true, "EQ")?;
    let result = values_equal(a, b);
    engine.frames.assign(frame, &var, Value::Bool(result))?;
    Ok(Flow::Next)
}
