//! End-to-end tests for the micac command line interface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Writes `source` to a temp file and returns the handle (the file
/// lives as long as the handle).
fn source_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(source.as_bytes())
        .expect("failed to write temp file");
    file
}

fn micac() -> Command {
    Command::cargo_bin("micac").expect("micac binary not built")
}

#[test]
fn test_no_arguments_is_usage_error() {
    micac().assert().failure().code(1);
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    micac().arg("optimize").assert().failure().code(1);
}

#[test]
fn test_help_exits_zero() {
    micac()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("micac"));
}

#[test]
fn test_missing_file_exits_one() {
    micac()
        .args(["tokenize", "/definitely/not/here.mica"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_tokenize_prints_one_token_per_line() {
    let file = source_file("const pi = 3.14159;\n");
    micac()
        .arg("tokenize")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1: Const 'const'")
                .and(predicate::str::contains("1: Ident 'pi'"))
                .and(predicate::str::contains("1: Float '3.14159'"))
                .and(predicate::str::contains("1: Semicolon ';'")),
        );
}

#[test]
fn test_tokenize_reports_lexical_errors_and_exits_zero() {
    let file = source_file("a $ b\n");
    micac()
        .arg("tokenize")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1: Illegal character '$'"));
}

#[test]
fn test_parse_prints_indented_ast() {
    let file = source_file("print 2 + 3 * 4;\n");
    micac()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1: PrintStmt")
                .and(predicate::str::contains("1:     BinOp +"))
                .and(predicate::str::contains("1:         BinOp *")),
        );
}

#[test]
fn test_parse_reports_syntax_error() {
    let file = source_file("var 3;\n");
    micac()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1: Syntax error in input at token '3'",
        ));
}

#[test]
fn test_check_quiet_on_valid_program() {
    let file = source_file("var a int = 1;\nprint a;\n");
    micac()
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_check_reports_type_error_and_exits_zero() {
    let file = source_file("var a bool = true;\na = 1;\n");
    micac()
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "2: TypeError: assigning type int to \"a\" of type bool\n",
        ));
}

#[test]
fn test_check_show_types_prints_decorations() {
    let file = source_file("var a int = 1 + 2;\n");
    micac()
        .args(["check", "--show-types"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1: VarDecl a (global) type: int")
                .and(predicate::str::contains("1:     BinOp + type: int"))
                .and(predicate::str::contains("1:         IntLit 1 type: int")),
        );
}

#[test]
fn test_ircode_prints_instruction_tuples() {
    let file = source_file("const pi = 3.14159;\nprint pi;\n");
    micac()
        .arg("ircode")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "proc _init() void\n\
             ('MOVF', 3.14159, 'R1')\n\
             ('VARF', 'pi')\n\
             ('STOREF', 'R1', 'pi')\n\
             ('LOADF', 'pi', 'R2')\n\
             ('PRINTF', 'R2')\n",
        ));
}

#[test]
fn test_ircode_emits_separate_procedures() {
    let file = source_file("func add(x int, y int) int {\n    return x + y;\n}\n");
    micac()
        .arg("ircode")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("proc _init() void")
                .and(predicate::str::contains("proc add(x int, y int) int"))
                .and(predicate::str::contains("('ALLOCI', 'x')"))
                .and(predicate::str::contains("('STOREI', 'R1', 'x')"))
                .and(predicate::str::contains("('ADDI', 'R3', 'R4', 'R5')"))
                .and(predicate::str::contains("('RET', 'R5')")),
        );
}

#[test]
fn test_ircode_short_circuits_on_diagnostics() {
    let file = source_file("print missing;\n");
    micac()
        .arg("ircode")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "1: NameError: symbol \"missing\" undefined.\n",
        ));
}

#[test]
fn test_diagnostics_follow_stage_output() {
    let file = source_file("print 1;\nvar 3;\n");
    micac()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "1: PrintStmt\n\
             1:     IntLit 1\n\
             2: Syntax error in input at token '3'\n",
        ));
}
