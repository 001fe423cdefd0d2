//! The fixed set of builtin operations

use std::fmt;

/// Builtin keywords
///
/// Some are only legal as statements (`PRINT`, `SHOW`, `TABLE`), some only
/// inside expressions (`TO_NAND`, `TO_NOR`, `SOLVE_SOP`, `SOLVE_POS`, `INPUT`),
/// and three are reserved but not implemented (`GRAPH`, `EXPORT`, `IMPORT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Print,
    Show,
    Table,
    Graph,
    Export,
    Import,
    ToNand,
    ToNor,
    SolveSop,
    SolvePos,
    Input,
}

impl Builtin {
    pub const ALL: [Builtin; 11] = [
        Builtin::Print,
        Builtin::Show,
        Builtin::Table,
        Builtin::Graph,
        Builtin::Export,
        Builtin::Import,
        Builtin::ToNand,
        Builtin::ToNor,
        Builtin::SolveSop,
        Builtin::SolvePos,
        Builtin::Input,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Builtin::Print => "PRINT",
            Builtin::Show => "SHOW",
            Builtin::Table => "TABLE",
            Builtin::Graph => "GRAPH",
            Builtin::Export => "EXPORT",
            Builtin::Import => "IMPORT",
            Builtin::ToNand => "TO_NAND",
            Builtin::ToNor => "TO_NOR",
            Builtin::SolveSop => "SOLVE_SOP",
            Builtin::SolvePos => "SOLVE_POS",
            Builtin::Input => "INPUT",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Builtin> {
        Builtin::ALL
            .iter()
            .copied()
            .find(|builtin| builtin.keyword() == keyword)
    }

    /// Whether the builtin may appear inside an expression
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Builtin::ToNand
                | Builtin::ToNor
                | Builtin::SolveSop
                | Builtin::SolvePos
                | Builtin::Input
        )
    }

    /// Reserved builtins that always fail with "not supported yet"
    pub fn is_unsupported(self) -> bool {
        matches!(self, Builtin::Graph | Builtin::Export | Builtin::Import)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_keyword(builtin.keyword()), Some(builtin));
        }
        assert_eq!(Builtin::from_keyword("print"), None);
    }

    #[test]
    fn test_expression_builtins() {
        let in_expression: Vec<_> = Builtin::ALL
            .iter()
            .filter(|b| b.is_expression())
            .map(|b| b.keyword())
            .collect();
        assert_eq!(
            in_expression,
            vec!["TO_NAND", "TO_NOR", "SOLVE_SOP", "SOLVE_POS", "INPUT"]
        );
    }

    #[test]
    fn test_unsupported_builtins() {
        assert!(Builtin::Graph.is_unsupported());
        assert!(Builtin::Export.is_unsupported());
        assert!(Builtin::Import.is_unsupported());
        assert!(!Builtin::Print.is_unsupported());
    }
}
