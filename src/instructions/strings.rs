//! String operations (`CONCAT`/`STRLEN`/`GETCHAR`/`SETCHAR`).

use crate::engine::{Engine, Flow};
use crate::error::{InterpError, Result};
use crate::operand::Effective;
use crate::value::{Cell, Value};

pub fn concat(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("CONCAT arg1")?;
    let (frame, var) = (frame, var.to_string());
    let a = args[1].expect_string("CONCAT arg2")?;
    let b = args[2].expect_string("CONCAT arg3")?;
    let joined = format!("{}{}", a, b);
    engine.frames.assign(frame, &var, Value::Str(joined))?;
    Ok(Flow::Next)
}

pub fn strlen(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("STRLEN arg1")?;
    let (frame, var) = (frame, var.to_string());
    let s = args[1].expect_string("STRLEN arg2")?;
    let len = s.chars().count() as i64;
    engine.frames.assign(frame, &var, Value::Int(len))?;
    Ok(Flow::Next)
}

pub fn getchar(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("GETCHAR arg1")?;
    let (frame, var) = (frame, var.to_string());
    let s = args[1].expect_string("GETCHAR arg2")?;
    let index = args[2].expect_int("GETCHAR arg3")?;
    let chars: Vec<char> = s.chars().collect();
    let ch = usize::try_from(index)
        .ok()
        .and_then(|i| chars.get(i).copied())
        .ok_or_else(|| {
            InterpError::WrongStringOperation(format!("index {} out of range", index))
        })?;
    engine
        .frames
        .assign(frame, &var, Value::Str(ch.to_string()))?;
    Ok(Flow::Next)
}

pub fn setchar(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("SETCHAR arg1")?;
    let (frame, var) = (frame, var.to_string());
    let index = args[1].expect_int("SETCHAR arg2")?;
    let replacement = args[2].expect_string("SETCHAR arg3")?;

    let current = match engine.frames.read(frame, &var, false)? {
        Cell::Value(Value::Str(s)) => s,
        Cell::Value(other) => {
            return Err(InterpError::InvalidOp(format!(
                "SETCHAR arg1 must already hold a string, found {}",
                other.type_name()
            )))
        }
        Cell::Uninit => unreachable!("read(.., allow_uninit=false) never returns Uninit"),
    };

    if replacement.is_empty() {
        return Err(InterpError::WrongStringOperation(
            "SETCHAR replacement string must not be empty".into(),
        ));
    }

    let mut chars: Vec<char> = current.chars().collect();
    let pos = usize::try_from(index).ok().filter(|&i| i < chars.len());
    let pos = pos.ok_or_else(|| {
        InterpError::WrongStringOperation(format!("index {} out of range", index))
    })?;
    chars[pos] = replacement.chars().next().unwrap();

    let result: String = chars.into_iter().collect();
    engine.frames.assign(frame, &var, Value::Str(result))?;
    Ok(Flow::Next)
}
