//! The instruction set and its tuple rendering.

use std::fmt;

use micac_sem::Type;
use micac_util::Symbol;

/// The opcode suffix encoding an operand's machine type: `I` for
/// integers (and booleans), `F` for floats, `B` for bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSuffix {
    I,
    F,
    B,
}

impl TypeSuffix {
    /// Maps a checked type to its suffix. `bool` lowers through the
    /// integer instructions.
    pub fn from_type(ty: Type) -> TypeSuffix {
        match ty {
            Type::Float => TypeSuffix::F,
            Type::Char => TypeSuffix::B,
            _ => TypeSuffix::I,
        }
    }
}

impl fmt::Display for TypeSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSuffix::I => f.write_str("I"),
            TypeSuffix::F => f.write_str("F"),
            TypeSuffix::B => f.write_str("B"),
        }
    }
}

/// An SSA register, rendered `R1`, `R2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reg(pub u32);

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// A basic-block label, rendered `B1`, `B2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// A literal payload for `MOV?`. Chars carry their byte value and
/// bools 0/1, so both sides of the enum are integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            // {:?} keeps the decimal point on round floats (3.0).
            Literal::Float(value) => write!(f, "{:?}", value),
        }
    }
}

/// A single three-address instruction.
///
/// Operand order in the rendered tuple is: opcode, operator string
/// (`CMP?` only), sources, destination.
#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    /// Load a literal into a register.
    Mov(TypeSuffix, Literal, Reg),
    /// Declare global storage.
    Var(TypeSuffix, Symbol),
    /// Stack-allocate local storage.
    Alloc(TypeSuffix, Symbol),
    /// Variable -> register.
    Load(TypeSuffix, Symbol, Reg),
    /// Register -> variable.
    Store(TypeSuffix, Reg, Symbol),
    Add(TypeSuffix, Reg, Reg, Reg),
    Sub(TypeSuffix, Reg, Reg, Reg),
    Mul(TypeSuffix, Reg, Reg, Reg),
    Div(TypeSuffix, Reg, Reg, Reg),
    /// Compare two registers with the named relational operator.
    Cmp(TypeSuffix, &'static str, Reg, Reg, Reg),
    /// Bitwise surrogate for boolean `&&`.
    And(Reg, Reg, Reg),
    /// Bitwise surrogate for boolean `||`.
    Or(Reg, Reg, Reg),
    /// Basic-block entry point.
    Label(Label),
    /// Unconditional branch.
    Branch(Label),
    /// Branch on `test != 0` to the first label, else the second.
    CBranch(Reg, Label, Label),
    /// Call a procedure with argument registers, result into the last
    /// register.
    Call(Symbol, Vec<Reg>, Reg),
    /// Return a register; bare return for void procedures.
    Ret(Option<Reg>),
    /// Print a register via the runtime helpers.
    Print(TypeSuffix, Reg),
}

impl Inst {
    fn tuple_fields(&self) -> Vec<String> {
        fn quoted(text: impl fmt::Display) -> String {
            format!("'{}'", text)
        }

        match self {
            Inst::Mov(suffix, value, target) => {
                vec![quoted(format_args!("MOV{}", suffix)), value.to_string(), quoted(target)]
            }
            Inst::Var(suffix, name) => {
                vec![quoted(format_args!("VAR{}", suffix)), quoted(name)]
            }
            Inst::Alloc(suffix, name) => {
                vec![quoted(format_args!("ALLOC{}", suffix)), quoted(name)]
            }
            Inst::Load(suffix, name, target) => {
                vec![quoted(format_args!("LOAD{}", suffix)), quoted(name), quoted(target)]
            }
            Inst::Store(suffix, source, name) => {
                vec![quoted(format_args!("STORE{}", suffix)), quoted(source), quoted(name)]
            }
            Inst::Add(suffix, r1, r2, target) => {
                vec![quoted(format_args!("ADD{}", suffix)), quoted(r1), quoted(r2), quoted(target)]
            }
            Inst::Sub(suffix, r1, r2, target) => {
                vec![quoted(format_args!("SUB{}", suffix)), quoted(r1), quoted(r2), quoted(target)]
            }
            Inst::Mul(suffix, r1, r2, target) => {
                vec![quoted(format_args!("MUL{}", suffix)), quoted(r1), quoted(r2), quoted(target)]
            }
            Inst::Div(suffix, r1, r2, target) => {
                vec![quoted(format_args!("DIV{}", suffix)), quoted(r1), quoted(r2), quoted(target)]
            }
            Inst::Cmp(suffix, op, r1, r2, target) => {
                vec![
                    quoted(format_args!("CMP{}", suffix)),
                    quoted(op),
                    quoted(r1),
                    quoted(r2),
                    quoted(target),
                ]
            }
            Inst::And(r1, r2, target) => {
                vec![quoted("AND"), quoted(r1), quoted(r2), quoted(target)]
            }
            Inst::Or(r1, r2, target) => {
                vec![quoted("OR"), quoted(r1), quoted(r2), quoted(target)]
            }
            Inst::Label(label) => vec![quoted("LABEL"), quoted(label)],
            Inst::Branch(label) => vec![quoted("BRANCH"), quoted(label)],
            Inst::CBranch(test, on_true, on_false) => {
                vec![quoted("CBRANCH"), quoted(test), quoted(on_true), quoted(on_false)]
            }
            Inst::Call(name, args, target) => {
                let mut fields = vec![quoted("CALL"), quoted(name)];
                fields.extend(args.iter().map(|arg| quoted(arg)));
                fields.push(quoted(target));
                fields
            }
            Inst::Ret(value) => match value {
                Some(reg) => vec![quoted("RET"), quoted(reg)],
                None => vec![quoted("RET")],
            },
            Inst::Print(suffix, source) => {
                vec![quoted(format_args!("PRINT{}", suffix)), quoted(source)]
            }
        }
    }

    /// The destination register this instruction produces, if any.
    /// Used by the SSA well-formedness tests.
    pub fn target(&self) -> Option<Reg> {
        match self {
            Inst::Mov(_, _, target)
            | Inst::Load(_, _, target)
            | Inst::Add(_, _, _, target)
            | Inst::Sub(_, _, _, target)
            | Inst::Mul(_, _, _, target)
            | Inst::Div(_, _, _, target)
            | Inst::Cmp(_, _, _, _, target)
            | Inst::And(_, _, target)
            | Inst::Or(_, _, target)
            | Inst::Call(_, _, target) => Some(*target),
            _ => None,
        }
    }
}

impl fmt::Display for Inst {
    /// Renders the instruction as a tuple, e.g. `('MOVI', 3, 'R1')`.
    /// Single-element tuples keep the trailing comma: `('RET',)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.tuple_fields();
        if fields.len() == 1 {
            write!(f, "({},)", fields[0])
        } else {
            write!(f, "({})", fields.join(", "))
        }
    }
}
