//! The three-frame variable store: global (always present), local (a
//! stack of frames, `LF` means "the top one"), and temporary (at most
//! one, possibly absent).

use std::collections::HashMap;
use std::fmt;

use crate::error::{InterpError, Result};
use crate::value::{Cell, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTag {
    Global,
    Local,
    Temporary,
}

impl fmt::Display for FrameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameTag::Global => write!(f, "GF"),
            FrameTag::Local => write!(f, "LF"),
            FrameTag::Temporary => write!(f, "TF"),
        }
    }
}

type Scope = HashMap<String, Cell>;

#[derive(Debug, Default)]
pub struct Frames {
    gf: Scope,
    lf: Vec<Scope>,
    tf: Option<Scope>,
}

impl Frames {
    pub fn new() -> Self {
        Self::default()
    }

    fn scope(&self, tag: FrameTag) -> Result<&Scope> {
        match tag {
            FrameTag::Global => Ok(&self.gf),
            FrameTag::Local => self
                .lf
                .last()
                .ok_or_else(|| InterpError::InvalidFrame("LF is empty".into())),
            FrameTag::Temporary => self
                .tf
                .as_ref()
                .ok_or_else(|| InterpError::InvalidFrame("TF is not present".into())),
        }
    }

    fn scope_mut(&mut self, tag: FrameTag) -> Result<&mut Scope> {
        match tag {
            FrameTag::Global => Ok(&mut self.gf),
            FrameTag::Local => self
                .lf
                .last_mut()
                .ok_or_else(|| InterpError::InvalidFrame("LF is empty".into())),
            FrameTag::Temporary => self
                .tf
                .as_mut()
                .ok_or_else(|| InterpError::InvalidFrame("TF is not present".into())),
        }
    }

    pub fn define(&mut self, tag: FrameTag, name: &str) -> Result<()> {
        let scope = self.scope_mut(tag)?;
        if scope.contains_key(name) {
            return Err(InterpError::Semantic(format!(
                "variable {}@{} already defined",
                tag, name
            )));
        }
        scope.insert(name.to_string(), Cell::Uninit);
        Ok(())
    }

    pub fn assign(&mut self, tag: FrameTag, name: &str, value: Value) -> Result<()> {
        let scope = self.scope_mut(tag)?;
        if !scope.contains_key(name) {
            return Err(InterpError::VarNotExist(format!("{}@{}", tag, name)));
        }
        scope.insert(name.to_string(), Cell::Value(value));
        Ok(())
    }

    /// Reads the raw cell (uninitialized or a value). `allow_uninit`
    /// governs whether an uninitialized cell is an error (`false`, used by
    /// every opcode but `TYPE`) or a valid result (`true`, `TYPE` only).
    pub fn read(&self, tag: FrameTag, name: &str, allow_uninit: bool) -> Result<Cell> {
        let scope = self.scope(tag)?;
        let cell = scope
            .get(name)
            .ok_or_else(|| InterpError::VarNotExist(format!("{}@{}", tag, name)))?;
        if matches!(cell, Cell::Uninit) && !allow_uninit {
            return Err(InterpError::MissingValue(format!(
                "{}@{} read before being assigned",
                tag, name
            )));
        }
        Ok(cell.clone())
    }

    pub fn create_tf(&mut self) {
        self.tf = Some(Scope::new());
    }

    pub fn push_tf_to_lf(&mut self) -> Result<()> {
        let tf = self
            .tf
            .take()
            .ok_or_else(|| InterpError::InvalidFrame("TF is not present".into()))?;
        self.lf.push(tf);
        Ok(())
    }

    pub fn pop_lf_to_tf(&mut self) -> Result<()> {
        let top = self
            .lf
            .pop()
            .ok_or_else(|| InterpError::InvalidFrame("LF is empty".into()))?;
        self.tf = Some(top);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_then_assign_then_read() {
        let mut frames = Frames::new();
        frames.define(FrameTag::Global, "x").unwrap();
        frames.assign(FrameTag::Global, "x", Value::Int(5)).unwrap();
        assert_eq!(frames.read(FrameTag::Global, "x", false).unwrap(), Cell::Value(Value::Int(5)));
    }

    #[test]
    fn reading_uninitialized_fails_unless_allowed() {
        let mut frames = Frames::new();
        frames.define(FrameTag::Global, "x").unwrap();
        assert!(frames.read(FrameTag::Global, "x", false).is_err());
        assert_eq!(frames.read(FrameTag::Global, "x", true).unwrap(), Cell::Uninit);
    }

    #[test]
    fn redefine_in_same_frame_is_semantic_error() {
        let mut frames = Frames::new();
        frames.define(FrameTag::Global, "x").unwrap();
        let err = frames.define(FrameTag::Global, "x").unwrap_err();
        assert_eq!(err.exit_code(), 52);
    }

    #[test]
    fn lf_empty_is_invalid_frame() {
        let frames = Frames::new();
        let err = frames.read(FrameTag::Local, "x", true).unwrap_err();
        assert_eq!(err.exit_code(), 55);
    }

    #[test]
    fn tf_absent_is_invalid_frame() {
        let mut frames = Frames::new();
        assert!(frames.push_tf_to_lf().is_err());
        frames.create_tf();
        frames.push_tf_to_lf().unwrap();
        assert!(frames.push_tf_to_lf().is_err());
    }

    #[test]
    fn pushframe_then_popframe_round_trips() {
        let mut frames = Frames::new();
        frames.create_tf();
        frames.define(FrameTag::Temporary, "x").unwrap();
        frames.assign(FrameTag::Temporary, "x", Value::Int(1)).unwrap();
        frames.push_tf_to_lf().unwrap();
        assert!(frames.tf.is_none());
        frames.pop_lf_to_tf().unwrap();
        assert_eq!(frames.read(FrameTag::Temporary, "x", false).unwrap(), Cell::Value(Value::Int(1)));
    }

    #[test]
    fn two_createframes_leave_tf_empty() {
        let mut frames = Frames::new();
        frames.create_tf();
        frames.define(FrameTag::Temporary, "x").unwrap();
        frames.create_tf();
        assert!(frames.read(FrameTag::Temporary, "x", true).is_err());
    }
}
