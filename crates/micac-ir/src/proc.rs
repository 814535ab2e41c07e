//! Procedure records.

use std::fmt;

use micac_sem::Type;
use micac_util::Symbol;

use crate::inst::Inst;

/// A lowered procedure: the implicit `_init` or one user `func`.
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub name: Symbol,
    pub param_names: Vec<Symbol>,
    pub param_types: Vec<Type>,
    pub return_type: Type,
    pub code: Vec<Inst>,
}

impl Procedure {
    /// The header line used by the `ircode` dump:
    /// `proc add(x int, y int) int`.
    pub fn header(&self) -> String {
        let params = self
            .param_names
            .iter()
            .zip(&self.param_types)
            .map(|(name, ty)| format!("{} {}", name, ty))
            .collect::<Vec<_>>()
            .join(", ");
        format!("proc {}({}) {}", self.name, params, self.return_type)
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for inst in &self.code {
            writeln!(f, "{}", inst)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::{Literal, Reg, TypeSuffix};

    #[test]
    fn test_header() {
        let proc = Procedure {
            name: Symbol::intern("add"),
            param_names: vec![Symbol::intern("x"), Symbol::intern("y")],
            param_types: vec![Type::Int, Type::Int],
            return_type: Type::Int,
            code: Vec::new(),
        };
        assert_eq!(proc.header(), "proc add(x int, y int) int");
    }

    #[test]
    fn test_display_lists_instructions() {
        let proc = Procedure {
            name: Symbol::intern("_init"),
            param_names: Vec::new(),
            param_types: Vec::new(),
            return_type: Type::Void,
            code: vec![
                Inst::Mov(TypeSuffix::I, Literal::Int(3), Reg(1)),
                Inst::Print(TypeSuffix::I, Reg(1)),
            ],
        };
        assert_eq!(
            proc.to_string(),
            "proc _init() void\n('MOVI', 3, 'R1')\n('PRINTI', 'R1')\n"
        );
    }
}
