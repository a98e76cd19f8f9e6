//! The control engine: drives a direct program counter over the loaded
//! instruction vector, dispatching each instruction through the operand
//! resolver to its family handler.
//!
//! This replaces the source interpreter's `skip_until`/`reset_flag` full
//! table rescan (quadratic on backward jumps) with O(1) jumps, per the
//! REDESIGN FLAG in spec §9 — the semantics (forward jump lands ahead,
//! backward jump restarts at the target, `CALL`/`RETURN` resume just past
//! the caller) are unchanged.

use std::io::Write as _;

use tracing::{debug, trace};

use crate::error::{InterpError, Result};
use crate::frame::Frames;
use crate::input::InputSource;
use crate::instructions;
use crate::operand::{self, Effective};
use crate::opcode::Opcode;
use crate::program::Program;
use crate::value::Value;

/// What an instruction handler asks the engine to do next.
pub enum Flow {
    Next,
    JumpTo(usize),
    Exit(i32),
}

pub struct Engine<'a> {
    pub program: &'a Program,
    pub frames: Frames,
    pub data_stack: Vec<Value>,
    pub call_stack: Vec<usize>,
    pub input: InputSource,
    pub out: &'a mut dyn std::io::Write,
}

impl<'a> Engine<'a> {
    pub fn new(program: &'a Program, input: InputSource, out: &'a mut dyn std::io::Write) -> Self {
        Engine {
            program,
            frames: Frames::new(),
            data_stack: Vec::new(),
            call_stack: Vec::new(),
            input,
            out,
        }
    }

    /// Resolves the label a control instruction targets, mapping an
    /// undefined label to `SEMANTIC` (exit 52) per spec §4.6.
    pub fn label_position(&self, name: &str) -> Result<usize> {
        self.program
            .labels
            .get(name)
            .copied()
            .ok_or_else(|| InterpError::Semantic(format!("undefined label {:?}", name)))
    }

    pub fn write(&mut self, value: &Value) -> Result<()> {
        write!(self.out, "{}", value).map_err(|e| {
            InterpError::OutputOpen {
                path: "<stdout>".into(),
                source: e,
            }
        })
    }

    /// Runs the whole program to completion or to an `EXIT`/error.
    /// Returns the process exit code on either path.
    pub fn run(mut self) -> Result<i32> {
        let mut pc = 0usize;
        while pc < self.program.instructions.len() {
            let instr = &self.program.instructions[pc];
            trace!(order = instr.order, opcode = %instr.opcode, "dispatch");
            let effective = operand::resolve(instr, &self.frames)?;
            let flow = dispatch(&mut self, pc, &effective)?;
            pc = match flow {
                Flow::Next => pc + 1,
                Flow::JumpTo(target) => target,
                Flow::Exit(code) => return Ok(code),
            };
        }
        Ok(0)
    }
}

fn dispatch(engine: &mut Engine, pc: usize, args: &[Effective]) -> Result<Flow> {
    let instr = &engine.program.instructions[pc];
    let opcode = instr.opcode;
    debug!(order = instr.order, opcode = %opcode, "executing");
    match opcode {
        Opcode::CreateFrame => instructions::frame_ops::createframe(engine),
        Opcode::PushFrame => instructions::frame_ops::pushframe(engine),
        Opcode::PopFrame => instructions::frame_ops::popframe(engine),
        Opcode::DefVar => instructions::frame_ops::defvar(engine, args),
        Opcode::Move => instructions::frame_ops::move_(engine, args),

        Opcode::Pushs => instructions::stack_ops::pushs(engine, args),
        Opcode::Pops => instructions::stack_ops::pops(engine, args),

        Opcode::Add => instructions::arith::add(engine, args),
        Opcode::Sub => instructions::arith::sub(engine, args),
        Opcode::Mul => instructions::arith::mul(engine, args),
        Opcode::Idiv => instructions::arith::idiv(engine, args),

        Opcode::Lt => instructions::compare::lt(engine, args),
        Opcode::Gt => instructions::compare::gt(engine, args),
        Opcode::Eq => instructions::compare::eq(engine, args),

        Opcode::And => instructions::logic::and(engine, args),
        Opcode::Or => instructions::logic::or(engine, args),
        Opcode::Not => instructions::logic::not(engine, args),

        Opcode::Int2Char => instructions::convert::int2char(engine, args),
        Opcode::Stri2Int => instructions::convert::stri2int(engine, args),

        Opcode::Concat => instructions::strings::concat(engine, args),
        Opcode::Strlen => instructions::strings::strlen(engine, args),
        Opcode::Getchar => instructions::strings::getchar(engine, args),
        Opcode::Setchar => instructions::strings::setchar(engine, args),

        Opcode::Type => instructions::typeop::type_(engine, args),

        Opcode::Read => instructions::io::read(engine, args),
        Opcode::Write => instructions::io::write(engine, args),
        Opcode::Dprint => instructions::io::dprint(engine, args),
        Opcode::Break => instructions::io::break_(engine),

        Opcode::Label => Ok(Flow::Next),
        Opcode::Jump => instructions::control::jump(engine, args),
        Opcode::JumpIfEq => instructions::control::jumpifeq(engine, args),
        Opcode::JumpIfNeq => instructions::control::jumpifneq(engine, args),
        Opcode::Call => instructions::control::call(engine, pc, args),
        Opcode::Return => instructions::control::return_(engine),
        Opcode::Exit => instructions::control::exit(engine, args),
    }
}
