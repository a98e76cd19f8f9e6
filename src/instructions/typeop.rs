//! `TYPE`: writes the type name of `arg2`, or an empty string if `arg2`
//! names a variable that has never been assigned.

use crate::engine::{Engine, Flow};
use crate::error::Result;
use crate::operand::Effective;
use crate::value::Value;

pub fn type_(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("TYPE arg1")?;
    let (frame, var) = (frame, var.to_string());
    let name = match &args[1] {
        Effective::Value(v) => v.type_name(),
        Effective::TypeToken(empty) if empty.is_empty() => "",
        other => other.expect_value("TYPE arg2")?.type_name(),
    };
    engine
        .frames
        .assign(frame, &var, Value::Str(name.to_string()))?;
    Ok(Flow::Next)
}
