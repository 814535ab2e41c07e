//! Token definitions and the keyword table.

use std::sync::LazyLock;

use micac_util::Symbol;
use rustc_hash::FxHashMap;

/// The kind tag of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Const,
    Var,
    Print,
    If,
    Else,
    While,
    For,
    Func,
    Return,
    Break,
    Continue,
    True,
    False,

    // Identifiers and literals
    Ident,
    Int,
    Float,
    Char,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,
    Not,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PlusPlus,
    MinusMinus,

    // Punctuation
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,

    /// End of input marker.
    Eof,
}

/// A lexical unit: kind tag, matched text, and the 1-based line of the
/// token's first character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Symbol,
    pub line: u32,
}

static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    map.insert("const", TokenKind::Const);
    map.insert("var", TokenKind::Var);
    map.insert("print", TokenKind::Print);
    map.insert("if", TokenKind::If);
    map.insert("else", TokenKind::Else);
    map.insert("while", TokenKind::While);
    map.insert("for", TokenKind::For);
    map.insert("func", TokenKind::Func);
    map.insert("return", TokenKind::Return);
    map.insert("break", TokenKind::Break);
    map.insert("continue", TokenKind::Continue);
    map.insert("true", TokenKind::True);
    map.insert("false", TokenKind::False);
    map
});

/// Rewrites an identifier's kind when its text is a reserved keyword.
pub fn keyword_from_ident(text: &str) -> Option<TokenKind> {
    KEYWORDS.get(text).copied()
}
