//! `READ`/`WRITE` and the no-op diagnostics `DPRINT`/`BREAK`.

use tracing::debug;

use crate::engine::{Engine, Flow};
use crate::error::{InterpError, Result};
use crate::operand::Effective;
use crate::value::Value;

pub fn read(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let (frame, var) = args[0].expect_dest("READ arg1")?;
    let (frame, var) = (frame, var.to_string());
    let token = match &args[1] {
        Effective::TypeToken(t) => t.as_str(),
        _ => {
            return Err(InterpError::UnexpectedXmlStruct(
                "READ arg2 must be a type token".into(),
            ))
        }
    };
    if token == "nil" {
        return Err(InterpError::InvalidOp("READ cannot request type nil".into()));
    }

    let value = match engine.input.read_line() {
        None => Value::Nil,
        Some(raw) => {
            let trimmed = raw.trim();
            match token {
                "int" => trimmed
                    .parse::<i64>()
                    .map(Value::Int)
                    .unwrap_or(Value::Nil),
                "bool" if !trimmed.is_empty() => {
                    Value::Bool(trimmed.eq_ignore_ascii_case("true"))
                }
                // A line that reads literally "nil" coerces to Nil even
                // when string was requested, mirroring the source reader.
                "string" if !trimmed.is_empty() && trimmed != "nil" => {
                    Value::Str(trimmed.to_string())
                }
                _ => Value::Nil,
            }
        }
    };
    engine.frames.assign(frame, &var, value)?;
    Ok(Flow::Next)
}

pub fn write(engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    let value = args[0].expect_value("WRITE arg1")?.clone();
    engine.write(&value)?;
    Ok(Flow::Next)
}

/// A debugging no-op: has no effect on stores, stacks, or stdout, but is
/// observable through `tracing` when the interpreter runs with logging
/// enabled, which is what a developer reaching for `DPRINT` wants.
pub fn dprint(_engine: &mut Engine, args: &[Effective]) -> Result<Flow> {
    debug!(?args, "DPRINT");
    Ok(Flow::Next)
}

pub fn break_(_engine: &mut Engine) -> Result<Flow> {
    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSource;
    use crate::program::Program;
    use tracing_test::{logs_contain, traced_test};

    #[traced_test]
    #[test]
    fn dprint_leaves_no_output_but_logs() {
        let program = Program::default();
        let mut out = Vec::new();
        let mut engine = Engine::new(&program, InputSource::from_str_for_tests(""), &mut out);
        dprint(&mut engine, &[Effective::Value(Value::Int(1))]).unwrap();
        drop(engine);
        assert!(out.is_empty());
        assert!(logs_contain("DPRINT"));
    }
}
