//! Turns a document (XML, `language="IPPcode23"`) into a validated
//! [`Program`]: an ordered instruction table and a label table. Document
//! well-formedness failures are `WRONG_XML_INPUT_FORMAT`; everything else
//! this module rejects is `UNEXPECTED_XML_STRUCT` or `SEMANTIC`, per
//! spec §4.3.

use std::collections::HashMap;

use lazy_static::lazy_static;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use tracing::debug;

use crate::error::{InterpError, Result};
use crate::frame::FrameTag;
use crate::opcode::Opcode;
use crate::program::{Instruction, Operand, Program};
use crate::value::{decode_escapes, Value};

lazy_static! {
    static ref VAR_NAME_RE: Regex =
        Regex::new(r"^[A-Za-z_$\-%!&?*][A-Za-z_$\-%!&?*0-9]*$").unwrap();
}

/// A generic, untyped XML element: enough structure to validate the
/// `program`/`instruction`/`argN` shape without quick-xml's own event
/// model leaking into the rest of the crate.
#[derive(Debug, Default)]
struct XmlNode {
    tag: String,
    attrs: HashMap<String, String>,
    text: Option<String>,
    children: Vec<XmlNode>,
}

/// Builds a full `XmlNode` tree from a byte buffer. Any malformed
/// document (unclosed tags, invalid encoding, bad entity references)
/// surfaces as `WrongXmlInputFormat` here, never as a panic.
fn parse_tree(source: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(source);
    reader.trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(XmlNode {
                    tag: decode(e.name())?,
                    attrs: decode_attrs(&reader, e)?,
                    text: None,
                    children: Vec::new(),
                });
            }
            Ok(Event::Empty(ref e)) => {
                let node = XmlNode {
                    tag: decode(e.name())?,
                    attrs: decode_attrs(&reader, e)?,
                    text: None,
                    children: Vec::new(),
                };
                push_finished(&mut stack, &mut root, node);
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape_and_decode(&reader)
                    .map_err(|e| InterpError::WrongXmlInputFormat(e.to_string()))?;
                if let Some(top) = stack.last_mut() {
                    top.text = Some(text);
                }
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| InterpError::WrongXmlInputFormat("unbalanced tag".into()))?;
                push_finished(&mut stack, &mut root, node);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(InterpError::WrongXmlInputFormat(e.to_string())),
        }
        buf.clear();
    }

    root.ok_or_else(|| InterpError::WrongXmlInputFormat("empty document".into()))
}

fn push_finished(stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

fn decode(name: &[u8]) -> Result<String> {
    std::str::from_utf8(name)
        .map(|s| s.to_string())
        .map_err(|e| InterpError::WrongXmlInputFormat(e.to_string()))
}

fn decode_attrs(
    reader: &Reader<&[u8]>,
    e: &quick_xml::events::BytesStart,
) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| InterpError::WrongXmlInputFormat(e.to_string()))?;
        let key = decode(attr.key)?;
        let value = attr
            .unescape_and_decode_value(reader)
            .map_err(|e| InterpError::WrongXmlInputFormat(e.to_string()))?;
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Parses and validates a complete source document into a loaded program.
pub fn load(source: &str) -> Result<Program> {
    let root = parse_tree(source)?;

    if root.tag != "program" {
        return Err(InterpError::UnexpectedXmlStruct(format!(
            "root element must be <program>, found <{}>",
            root.tag
        )));
    }
    match root.attrs.get("language") {
        Some(lang) if lang == "IPPcode23" => {}
        _ => {
            return Err(InterpError::UnexpectedXmlStruct(
                "root element must declare language=\"IPPcode23\"".into(),
            ))
        }
    }

    let mut instructions: Vec<Instruction> = Vec::new();
    let mut seen_orders: HashMap<u64, ()> = HashMap::new();
    let mut labels: HashMap<String, usize> = HashMap::new();

    for child in &root.children {
        if child.tag != "instruction" {
            return Err(InterpError::UnexpectedXmlStruct(format!(
                "expected <instruction>, found <{}>",
                child.tag
            )));
        }
        let order = parse_order(child)?;
        if seen_orders.insert(order, ()).is_some() {
            return Err(InterpError::UnexpectedXmlStruct(format!(
                "duplicate instruction order {}",
                order
            )));
        }
        let opcode_text = child.attrs.get("opcode").ok_or_else(|| {
            InterpError::UnexpectedXmlStruct("instruction missing opcode attribute".into())
        })?;
        let opcode: Opcode = opcode_text.parse()?;

        let args = parse_args(child, opcode)?;
        if args.len() != opcode.arity() {
            return Err(InterpError::UnexpectedXmlStruct(format!(
                "{} expects {} argument(s), found {}",
                opcode,
                opcode.arity(),
                args.len()
            )));
        }

        let instr = Instruction { order, opcode, args };

        if opcode == Opcode::Label {
            let label_name = match &instr.args[0] {
                Operand::Label(name) => name.clone(),
                other => {
                    return Err(InterpError::UnexpectedXmlStruct(format!(
                        "LABEL arg1 must carry type=\"label\", found {:?}",
                        other
                    )))
                }
            };
            if labels.contains_key(&label_name) {
                return Err(InterpError::Semantic(format!(
                    "duplicate label {:?}",
                    label_name
                )));
            }
            labels.insert(label_name, instructions.len());
        }

        instructions.push(instr);
    }

    // Labels were recorded against pre-sort insertion order above (only to
    // detect duplicates); a document need not list instructions in
    // ascending `order`, so positions must be resolved after sorting.
    let _ = labels;
    instructions.sort_by_key(|i| i.order);
    let mut order_index = HashMap::new();
    let mut label_positions: HashMap<String, usize> = HashMap::new();
    for (idx, instr) in instructions.iter().enumerate() {
        order_index.insert(instr.order, idx);
        if instr.opcode == Opcode::Label {
            if let Operand::Label(name) = &instr.args[0] {
                label_positions.insert(name.clone(), idx);
            }
        }
    }

    debug!(count = instructions.len(), "loaded program");

    Ok(Program {
        instructions,
        labels: label_positions,
        order_index,
    })
}

fn parse_order(node: &XmlNode) -> Result<u64> {
    let raw = node
        .attrs
        .get("order")
        .ok_or_else(|| InterpError::UnexpectedXmlStruct("instruction missing order".into()))?;
    let order: i64 = raw
        .parse()
        .map_err(|_| InterpError::UnexpectedXmlStruct(format!("invalid order {:?}", raw)))?;
    if order < 1 {
        return Err(InterpError::UnexpectedXmlStruct(format!(
            "order must be positive, found {}",
            order
        )));
    }
    Ok(order as u64)
}

fn parse_args(node: &XmlNode, opcode: Opcode) -> Result<Vec<Operand>> {
    let mut slots: [Option<&XmlNode>; 3] = [None, None, None];
    for child in &node.children {
        let slot = match child.tag.as_str() {
            "arg1" => 0,
            "arg2" => 1,
            "arg3" => 2,
            other => {
                return Err(InterpError::UnexpectedXmlStruct(format!(
                    "unexpected argument tag <{}>",
                    other
                )))
            }
        };
        if slots[slot].is_some() {
            return Err(InterpError::UnexpectedXmlStruct(format!(
                "duplicate {} on instruction {:?}",
                child.tag, opcode
            )));
        }
        slots[slot] = Some(child);
    }
    // argN positions must be dense: no arg2 without arg1, no arg3 without arg2.
    if slots[1].is_some() && slots[0].is_none() {
        return Err(InterpError::UnexpectedXmlStruct("arg2 without arg1".into()));
    }
    if slots[2].is_some() && slots[1].is_none() {
        return Err(InterpError::UnexpectedXmlStruct("arg3 without arg2".into()));
    }

    let mut args = Vec::new();
    for slot in slots.iter().flatten() {
        args.push(parse_operand(slot)?);
    }
    Ok(args)
}

fn parse_operand(node: &XmlNode) -> Result<Operand> {
    let ty = node
        .attrs
        .get("type")
        .ok_or_else(|| InterpError::UnexpectedXmlStruct("argument missing type attribute".into()))?
        .as_str();

    let text = match &node.text {
        Some(t) => t.clone(),
        None if ty == "string" => String::new(),
        None => {
            return Err(InterpError::UnexpectedXmlStruct(format!(
                "argument of type {:?} has no content",
                ty
            )))
        }
    };

    Ok(match ty {
        "var" => {
            let (frame, name) = split_var(&text)?;
            Operand::Var { frame, name }
        }
        "int" => {
            let n: i64 = text
                .trim()
                .parse()
                .map_err(|_| InterpError::Semantic(format!("invalid int literal {:?}", text)))?;
            Operand::Literal(Value::Int(n))
        }
        "bool" => match text.as_str() {
            "true" => Operand::Literal(Value::Bool(true)),
            "false" => Operand::Literal(Value::Bool(false)),
            other => {
                return Err(InterpError::InvalidOp(format!(
                    "bool literal must be true/false, found {:?}",
                    other
                )))
            }
        },
        "nil" => {
            if text != "nil" {
                return Err(InterpError::InvalidOp(format!(
                    "nil literal must read \"nil\", found {:?}",
                    text
                )));
            }
            Operand::Literal(Value::Nil)
        }
        "string" => Operand::Literal(Value::Str(decode_escapes(&text))),
        "label" => Operand::Label(text),
        "type" => Operand::TypeToken(text),
        other => {
            return Err(InterpError::UnexpectedXmlStruct(format!(
                "unknown argument type {:?}",
                other
            )))
        }
    })
}

fn split_var(text: &str) -> Result<(FrameTag, String)> {
    let (prefix, name) = text.split_once('@').ok_or_else(|| {
        InterpError::Semantic(format!("variable {:?} is missing a frame prefix", text))
    })?;
    let frame = match prefix {
        "GF" => FrameTag::Global,
        "LF" => FrameTag::Local,
        "TF" => FrameTag::Temporary,
        other => {
            return Err(InterpError::Semantic(format!(
                "unknown frame prefix {:?}",
                other
            )))
        }
    };
    if !VAR_NAME_RE.is_match(name) {
        return Err(InterpError::Semantic(format!(
            "invalid variable name {:?}",
            name
        )));
    }
    Ok((frame, name.to_string()))
}
