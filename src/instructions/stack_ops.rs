//! The data stack (`PUSHS`/`POPS`).

use crate::engine::{Engine, Flow};
use crate::error::{InterpError, Result};
use crate::operand::Effective;

pub fn pushs(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let value = args[0].expect_value("PUSHS arg1")?.clone();
    engine.data_stack.push(value);
    Ok(Flow::Next)
}

pub fn pops(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, name) = args[0].expect_dest("POPS arg1")?;
    let (frame, name) = (frame, name.to_string());
    let value = engine
        .data_stack
        .pop()
        .ok_or_else(|| InterpError::MissingValue("data stack is empty".into()))?;
    engine.frames.assign(frame, &name, value)?;
    Ok(Flow::Next)
}
