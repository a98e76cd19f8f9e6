//! Frame management (`CREATEFRAME`/`PUSHFRAME`/`POPFRAME`), variable
//! definition (`DEFVAR`), and plain assignment (`MOVE`).

use crate::engine::{Engine, Flow};
use crate::error::Result;
use crate::operand::Effective;

pub fn createframe(engine: &mut Engine) -> Result<Flow> {
    engine.frames.create_tf();
    Ok(Flow::Next)
}

pub fn pushframe(engine: &mut Engine) -> Result<Flow> {
    engine.frames.push_tf_to_lf()?;
    Ok(Flow::Next)
}

pub fn popframe(engine: &mut Engine) -> Result<Flow> {
    engine.frames.pop_lf_to_tf()?;
    Ok(Flow::Next)
}

pub fn defvar(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, name) = args[0].expect_dest("DEFVAR arg1")?;
    engine.frames.define(frame, name)?;
    Ok(Flow::Next)
}

pub fn move_(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, name) = args[0].expect_dest("MOVE arg1")?;
    let value = args[1].expect_value("MOVE arg2")?.clone();
    engine.frames.assign(frame, name, value)?;
    Ok(Flow::Next)
}
