//! micac-ir - Intermediate Code Generation
//!
//! Flattens the checked tree into per-procedure three-address code in
//! SSA style: an unbounded register file `R1, R2, ...` where every
//! register is produced exactly once per procedure, straight-line
//! instructions interleaved with `LABEL` pseudo-ops marking basic
//! block entry points, and explicit `BRANCH`/`CBRANCH` control flow.
//!
//! Two kinds of procedure come out: the implicit `_init`, holding all
//! top-level declarations and statements in source order, and one
//! procedure per `func` declaration. Instructions render as tuples -
//! `('MOVI', 3, 'R1')` - which is the format tests and the `ircode`
//! entry point rely on.
//!
//! The `PRINT{I,F,B}` instructions are placeholders for the runtime
//! printing helpers `_print_int`, `_print_float` and `_print_byte`; a
//! downstream code generator resolves them by name.

mod inst;
mod lower;
mod proc;

pub use inst::{Inst, Label, Literal, Reg, TypeSuffix};
pub use lower::generate;
pub use proc::Procedure;
