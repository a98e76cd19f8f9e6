pub mod engine;
pub mod error;
pub mod frame;
pub mod input;
pub mod instructions;
pub mod loader;
pub mod opcode;
pub mod operand;
pub mod options;
pub mod program;
pub mod value;
