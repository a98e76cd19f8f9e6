//! Static program representation: the operand descriptor shapes an
//! argument can take before resolution, an instruction record, and the
//! loaded program (instruction vector plus label table) the control
//! engine drives.

use crate::frame::FrameTag;
use crate::opcode::Opcode;
use crate::value::Value;

/// Static form of an argument, before the operand resolver turns it into
/// an effective operand (a value or a destination handle).
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Var { frame: FrameTag, name: String },
    Literal(Value),
    Label(String),
    /// A type-token literal (`int`/`bool`/`string`/`nil`), used by `READ`
    /// and produced as a string by `TYPE`.
    TypeToken(String),
}

pub type Order = u64;

#[derive(Debug, Clone)]
pub struct Instruction {
    pub order: Order,
    pub opcode: Opcode,
    pub args: Vec<Operand>,
}

/// A fully loaded, validated program: instructions sorted by `order` with
/// a side index for O(1) position lookup, and labels pre-resolved to
/// positions in that vector (spec REDESIGN FLAG: replaces the
/// skip_until/reset_flag full-table rescan with a direct program counter).
#[derive(Debug, Default)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    /// label name -> index into `instructions`
    pub labels: std::collections::HashMap<String, usize>,
    /// instruction order -> index into `instructions`, used by CALL/RETURN
    /// to compute "the instruction immediately after the caller".
    pub order_index: std::collections::HashMap<Order, usize>,
}

impl Program {
    pub fn position_of_order(&self, order: Order) -> Option<usize> {
        self.order_index.get(&order).copied()
    }
}
