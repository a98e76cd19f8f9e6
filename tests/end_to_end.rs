//! End-to-end scenarios from the interpreter's documented test plan: load
//! a document, run it against an in-memory input stream, and check
//! captured stdout plus the exit classification.

use ipp23_interpret::engine::Engine;
use ipp23_interpret::error::InterpError;
use ipp23_interpret::input::InputSource;
use ipp23_interpret::loader;

fn doc(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><program language="IPPcode23">{}</program>"#,
        body
    )
}

fn run(body: &str, input: &str) -> Result<(i32, String), InterpError> {
    let program = loader::load(&doc(body))?;
    let mut out = Vec::new();
    let source = InputSource::from_str_for_tests(input);
    let engine = Engine::new(&program, source, &mut out);
    let code = engine.run()?;
    Ok((code, String::from_utf8(out).unwrap()))
}

#[test]
fn hello_world() {
    let (code, output) = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@x</arg1></instruction>
        <instruction order="2" opcode="MOVE">
            <arg1 type="var">GF@x</arg1>
            <arg2 type="string">Hello</arg2>
        </instruction>
        <instruction order="3" opcode="WRITE"><arg1 type="var">GF@x</arg1></instruction>
        "#,
        "",
    )
    .unwrap();
    assert_eq!(output, "Hello");
    assert_eq!(code, 0);
}

#[test]
fn arithmetic() {
    let (code, output) = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@r</arg1></instruction>
        <instruction order="2" opcode="ADD">
            <arg1 type="var">GF@r</arg1>
            <arg2 type="int">2</arg2>
            <arg3 type="int">3</arg3>
        </instruction>
        <instruction order="3" opcode="WRITE"><arg1 type="var">GF@r</arg1></instruction>
        "#,
        "",
    )
    .unwrap();
    assert_eq!(output, "5");
    assert_eq!(code, 0);
}

#[test]
fn division_by_zero_exits_57_with_no_output() {
    let err = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@r</arg1></instruction>
        <instruction order="2" opcode="IDIV">
            <arg1 type="var">GF@r</arg1>
            <arg2 type="int">1</arg2>
            <arg3 type="int">0</arg3>
        </instruction>
        <instruction order="3" opcode="WRITE"><arg1 type="var">GF@r</arg1></instruction>
        "#,
        "",
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 57);
}

#[test]
fn backward_jump_counts_down() {
    // GF@i = 3; loop: WRITE GF@i; SUB GF@i GF@i int@1; JUMPIFNEQ loop GF@i int@0
    let (code, output) = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@i</arg1></instruction>
        <instruction order="2" opcode="MOVE">
            <arg1 type="var">GF@i</arg1>
            <arg2 type="int">3</arg2>
        </instruction>
        <instruction order="3" opcode="LABEL"><arg1 type="label">loop</arg1></instruction>
        <instruction order="4" opcode="WRITE"><arg1 type="var">GF@i</arg1></instruction>
        <instruction order="5" opcode="SUB">
            <arg1 type="var">GF@i</arg1>
            <arg2 type="var">GF@i</arg2>
            <arg3 type="int">1</arg3>
        </instruction>
        <instruction order="6" opcode="JUMPIFNEQ">
            <arg1 type="label">loop</arg1>
            <arg2 type="var">GF@i</arg2>
            <arg3 type="int">0</arg3>
        </instruction>
        "#,
        "",
    )
    .unwrap();
    assert_eq!(output, "321");
    assert_eq!(code, 0);
}

#[test]
fn call_return_resumes_past_the_caller() {
    // order 10: CALL sub; order 11: WRITE "after"; order 100: LABEL sub; order 101: RETURN
    let (code, output) = run(
        r#"
        <instruction order="10" opcode="CALL"><arg1 type="label">sub</arg1></instruction>
        <instruction order="11" opcode="WRITE"><arg1 type="string">after</arg1></instruction>
        <instruction order="100" opcode="LABEL"><arg1 type="label">sub</arg1></instruction>
        <instruction order="101" opcode="RETURN"></instruction>
        "#,
        "",
    )
    .unwrap();
    assert_eq!(output, "after");
    assert_eq!(code, 0);
}

#[test]
fn type_of_uninitialized_variable_is_empty_string() {
    let (code, output) = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@x</arg1></instruction>
        <instruction order="2" opcode="DEFVAR"><arg1 type="var">GF@t</arg1></instruction>
        <instruction order="3" opcode="TYPE">
            <arg1 type="var">GF@t</arg1>
            <arg2 type="var">GF@x</arg2>
        </instruction>
        <instruction order="4" opcode="WRITE"><arg1 type="var">GF@t</arg1></instruction>
        "#,
        "",
    )
    .unwrap();
    assert_eq!(output, "");
    assert_eq!(code, 0);
}

#[test]
fn plain_read_of_uninitialized_variable_is_missing_value() {
    let err = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@x</arg1></instruction>
        <instruction order="2" opcode="WRITE"><arg1 type="var">GF@x</arg1></instruction>
        "#,
        "",
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 56);
}

#[test]
fn read_coerces_lines_to_requested_type() {
    let (code, output) = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@n</arg1></instruction>
        <instruction order="2" opcode="READ">
            <arg1 type="var">GF@n</arg1>
            <arg2 type="type">int</arg2>
        </instruction>
        <instruction order="3" opcode="WRITE"><arg1 type="var">GF@n</arg1></instruction>
        "#,
        "42\n",
    )
    .unwrap();
    assert_eq!(output, "42");
    assert_eq!(code, 0);
}

#[test]
fn read_past_end_of_input_yields_nil() {
    let (code, output) = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@n</arg1></instruction>
        <instruction order="2" opcode="READ">
            <arg1 type="var">GF@n</arg1>
            <arg2 type="type">string</arg2>
        </instruction>
        <instruction order="3" opcode="WRITE"><arg1 type="var">GF@n</arg1></instruction>
        "#,
        "",
    )
    .unwrap();
    assert_eq!(output, "");
    assert_eq!(code, 0);
}

#[test]
fn jumpifneq_to_undefined_label_fails_even_when_not_taken() {
    // GF@x equals itself, so JUMPIFNEQ's condition is false and the jump
    // would never be taken — the undefined label must still be rejected.
    let err = run(
        r#"
        <instruction order="1" opcode="DEFVAR"><arg1 type="var">GF@x</arg1></instruction>
        <instruction order="2" opcode="MOVE">
            <arg1 type="var">GF@x</arg1>
            <arg2 type="int">1</arg2>
        </instruction>
        <instruction order="3" opcode="JUMPIFNEQ">
            <arg1 type="label">nowhere</arg1>
            <arg2 type="var">GF@x</arg2>
            <arg3 type="var">GF@x</arg3>
        </instruction>
        "#,
        "",
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 52);
}
