//! Per-instruction operand resolution: turns the static `Operand`
//! descriptors of an instruction into effective operands — dereferenced
//! values for read positions, destination handles for the write
//! position — per spec §4.4.

use crate::error::{InterpError, Result};
use crate::frame::{FrameTag, Frames};
use crate::opcode::Opcode;
use crate::program::{Instruction, Operand};
use crate::value::{Cell, Value};

/// The effective form of one argument slot after resolution.
#[derive(Debug, Clone)]
pub enum Effective {
    Value(Value),
    /// `arg1` of a writing instruction: not dereferenced, just a target.
    Dest { frame: FrameTag, name: String },
    Label(String),
    TypeToken(String),
}

impl Effective {
    pub fn expect_int(&self, what: &str) -> Result<i64> {
        match self {
            Effective::Value(Value::Int(n)) => Ok(*n),
            other => Err(type_error(what, "int", other)),
        }
    }

    pub fn expect_bool(&self, what: &str) -> Result<bool> {
        match self {
            Effective::Value(Value::Bool(b)) => Ok(*b),
            other => Err(type_error(what, "bool", other)),
        }
    }

    pub fn expect_string(&self, what: &str) -> Result<&str> {
        match self {
            Effective::Value(Value::Str(s)) => Ok(s.as_str()),
            other => Err(type_error(what, "string", other)),
        }
    }

    pub fn expect_value(&self, what: &str) -> Result<&Value> {
        match self {
            Effective::Value(v) => Ok(v),
            other => Err(type_error(what, "a value", other)),
        }
    }

    pub fn expect_dest(&self, what: &str) -> Result<(FrameTag, &str)> {
        match self {
            Effective::Dest { frame, name } => Ok((*frame, name.as_str())),
            other => Err(type_error(what, "a variable", other)),
        }
    }

    pub fn expect_label(&self, what: &str) -> Result<&str> {
        match self {
            Effective::Label(l) => Ok(l.as_str()),
            other => Err(type_error(what, "a label", other)),
        }
    }

    pub fn expect_type_token(&self, what: &str) -> Result<&str> {
        match self {
            Effective::TypeToken(t) => Ok(t.as_str()),
            other => Err(type_error(what, "a type token", other)),
        }
    }
}

fn type_error(what: &str, expected: &str, found: &Effective) -> InterpError {
    InterpError::InvalidOp(format!(
        "{} expects {}, found {:?}",
        what, expected, found
    ))
}

/// `arg1` is dereferenced (not left as a destination handle) for these
/// read-only instructions, per spec §4.4.
fn arg1_is_read_only(opcode: Opcode) -> bool {
    matches!(opcode, Opcode::Write | Opcode::Exit | Opcode::Pushs)
}

/// Resolves every argument of `instr` against the current frame store.
pub fn resolve(instr: &Instruction, frames: &Frames) -> Result<Vec<Effective>> {
    let mut out = Vec::with_capacity(instr.args.len());
    for (slot, operand) in instr.args.iter().enumerate() {
        let dereference = match slot {
            0 => arg1_is_read_only(instr.opcode),
            _ => true,
        };
        out.push(resolve_one(instr.opcode, slot, operand, dereference, frames)?);
    }
    Ok(out)
}

fn resolve_one(
    opcode: Opcode,
    slot: usize,
    operand: &Operand,
    dereference: bool,
    frames: &Frames,
) -> Result<Effective> {
    Ok(match operand {
        Operand::Literal(v) => Effective::Value(v.clone()),
        Operand::Label(l) => Effective::Label(l.clone()),
        Operand::TypeToken(t) => Effective::TypeToken(t.clone()),
        Operand::Var { frame, name } => {
            if !dereference {
                Effective::Dest {
                    frame: *frame,
                    name: name.clone(),
                }
            } else {
                // TYPE's arg2 target is dereferenced with uninit allowed;
                // every other dereferenced read requires initialization.
                let allow_uninit = opcode == Opcode::Type && slot == 1;
                match frames.read(*frame, name, allow_uninit)? {
                    Cell::Value(v) => Effective::Value(v),
                    Cell::Uninit => Effective::TypeToken(String::new()),
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Instruction;

    fn instr(opcode: Opcode, args: Vec<Operand>) -> Instruction {
        Instruction { order: 1, opcode, args }
    }

    #[test]
    fn write_dereferences_arg1() {
        let mut frames = Frames::new();
        frames.define(FrameTag::Global, "x").unwrap();
        frames.assign(FrameTag::Global, "x", Value::Int(7)).unwrap();
        let i = instr(
            Opcode::Write,
            vec![Operand::Var {
                frame: FrameTag::Global,
                name: "x".into(),
            }],
        );
        let resolved = resolve(&i, &frames).unwrap();
        assert_eq!(resolved[0].expect_int("WRITE arg1").unwrap(), 7);
    }

    #[test]
    fn move_leaves_arg1_as_destination() {
        let frames = Frames::new();
        let i = instr(
            Opcode::Move,
            vec![
                Operand::Var {
                    frame: FrameTag::Global,
                    name: "x".into(),
                },
                Operand::Literal(Value::Int(1)),
            ],
        );
        let resolved = resolve(&i, &frames).unwrap();
        let (frame, name) = resolved[0].expect_dest("MOVE arg1").unwrap();
        assert_eq!(frame, FrameTag::Global);
        assert_eq!(name, "x");
    }

    #[test]
    fn type_dereferences_uninitialized_arg2_as_empty_token() {
        let mut frames = Frames::new();
        frames.define(FrameTag::Global, "x").unwrap();
        let i = instr(
            Opcode::Type,
            vec![
                Operand::Var {
                    frame: FrameTag::Global,
                    name: "t".into(),
                },
                Operand::Var {
                    frame: FrameTag::Global,
                    name: "x".into(),
                },
            ],
        );
        let resolved = resolve(&i, &frames).unwrap();
        assert_eq!(resolved[1].expect_type_token("TYPE arg2").unwrap(), "");
    }
}
