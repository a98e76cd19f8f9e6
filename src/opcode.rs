//! The opcode set and their arities, expressed as an exhaustive enum
//! rather than dynamic method-name dispatch (spec REDESIGN FLAG: a static
//! table over a computed-attribute lookup also proves, at build time,
//! that every opcode has a handler).

use std::fmt;
use std::str::FromStr;

use crate::error::InterpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    CreateFrame,
    PushFrame,
    PopFrame,
    Return,
    Break,
    DefVar,
    Call,
    Pushs,
    Pops,
    Write,
    Label,
    Jump,
    Exit,
    Dprint,
    Read,
    Strlen,
    Type,
    Move,
    Not,
    Int2Char,
    Add,
    Sub,
    Mul,
    Idiv,
    Lt,
    Gt,
    Eq,
    And,
    Or,
    Stri2Int,
    Concat,
    Getchar,
    Setchar,
    JumpIfEq,
    JumpIfNeq,
}

impl Opcode {
    /// Number of operands this opcode's instruction record must carry.
    pub fn arity(self) -> usize {
        use Opcode::*;
        match self {
            CreateFrame | PushFrame | PopFrame | Return | Break => 0,
            DefVar | Call | Pushs | Pops | Write | Label | Jump | Exit | Dprint => 1,
            Read | Strlen | Type | Move | Not | Int2Char => 2,
            Add | Sub | Mul | Idiv | Lt | Gt | Eq | And | Or | Stri2Int | Concat | Getchar
            | Setchar | JumpIfEq | JumpIfNeq => 3,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Opcode {
    type Err = InterpError;

    /// Dispatch is case-insensitive, matching the source document's
    /// uppercase convention while tolerating assemblers that don't.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Opcode::*;
        Ok(match s.to_ascii_uppercase().as_str() {
            "CREATEFRAME" => CreateFrame,
            "PUSHFRAME" => PushFrame,
            "POPFRAME" => PopFrame,
            "RETURN" => Return,
            "BREAK" => Break,
            "DEFVAR" => DefVar,
            "CALL" => Call,
            "PUSHS" => Pushs,
            "POPS" => Pops,
            "WRITE" => Write,
            "LABEL" => Label,
            "JUMP" => Jump,
            "EXIT" => Exit,
            "DPRINT" => Dprint,
            "READ" => Read,
            "STRLEN" => Strlen,
            "TYPE" => Type,
            "MOVE" => Move,
            "NOT" => Not,
            "INT2CHAR" => Int2Char,
            "ADD" => Add,
            "SUB" => Sub,
            "MUL" => Mul,
            "IDIV" => Idiv,
            "LT" => Lt,
            "GT" => Gt,
            "EQ" => Eq,
            "AND" => And,
            "OR" => Or,
            "STRI2INT" => Stri2Int,
            "CONCAT" => Concat,
            "GETCHAR" => Getchar,
            "SETCHAR" => Setchar,
            "JUMPIFEQ" => JumpIfEq,
            "JUMPIFNEQ" => JumpIfNeq,
            other => {
                return Err(InterpError::UnexpectedXmlStruct(format!(
                    "unknown opcode {:?}",
                    other
                )))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("write".parse::<Opcode>().unwrap(), Opcode::Write);
        assert_eq!("WRITE".parse::<Opcode>().unwrap(), Opcode::Write);
    }

    #[test]
    fn unknown_opcode_is_structural_error() {
        let err = "FROBNICATE".parse::<Opcode>().unwrap_err();
        assert_eq!(err.exit_code(), 32);
    }

    #[test]
    fn arities_match_the_instruction_set() {
        assert_eq!(Opcode::Break.arity(), 0);
        assert_eq!(Opcode::DefVar.arity(), 1);
        assert_eq!(Opcode::Move.arity(), 2);
        assert_eq!(Opcode::Add.arity(), 3);
    }
}
