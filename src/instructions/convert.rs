//! Character/integer conversions (`INT2CHAR`/`STRI2INT`).

use crate::engine::{Engine, Flow};
use crate::error::{InterpError, Result};
use crate::operand::Effective;
use crate::value::Value;

pub fn int2char(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("INT2CHAR arg1")?;
    let (frame, var) = (frame, var.to_string());
    let code = args[1].expect_int("INT2CHAR arg2")?;
    let code = u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| {
            InterpError::WrongStringOperation(format!("{} is not a valid code point", code))
        })?;
    engine
        .frames
        .assign(frame, &var, Value::Str(code.to_string()))?;
    Ok(Flow::Next)
}

pub fn stri2int(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("STRI2INT arg1")?;
    let (frame, var) = (frame, var.to_string());
    let s = args[1].expect_string("STRI2INT arg2")?;
    let index = args[2].expect_int("STRI2INT arg3")?;
    let chars: Vec<char> = s.chars().collect();
    let ch = usize::try_from(index)
        .ok()
        .and_then(|i| chars.get(i).copied())
        .ok_or_else(|| {
            InterpError::WrongStringOperation(format!("index {} out of range", index))
        })?;
    engine
        .frames
        .assign(frame, &var, Value::Int(ch as i64))?;
    Ok(Flow::Next)
}
