//! Token types for the LIFT lexer

use logos::Logos;

/// The kind of token produced by the lexer
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    // ========== Keywords ==========
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("func")]
    Func,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("match")]
    Match,
    #[token("struct")]
    Struct,
    #[token("return")]
    Return,
    #[token("import")]
    Import,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("while")]
    While,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,

    // ========== Literals ==========
    /// Integer literal (maximal digit run)
    #[regex(r"[0-9]+", priority = 2)]
    Int,

    /// Float literal (digits, a dot, and more digits)
    #[regex(r"[0-9]+\.[0-9]+", priority = 3)]
    Float,

    /// Boolean true
    #[token("true")]
    True,

    /// Boolean false
    #[token("false")]
    False,

    /// String literal. Produced by the lexer's string mode, not by logos;
    /// the token's lexeme carries the decoded value with escapes applied.
    String,

    /// Opening `"` of a string literal; switches the lexer into string mode
    #[token("\"")]
    StringStart,

    // ========== Identifiers ==========
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // ========== Operators ==========
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Not,

    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,

    #[token("=>")]
    FatArrow,

    // ========== Delimiters ==========
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    // ========== Comments (tokenized, skipped by the parser) ==========
    /// Line comment: // ...
    #[regex(r"//[^\n]*")]
    LineComment,

    /// Block comment: /* ... */
    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // ========== Special ==========
    /// End of file (added by lexer, not matched by logos)
    Eof,

    /// Lexer error - invalid character or unterminated literal
    Error,
}

impl TokenKind {
    /// Returns true if this token is a keyword
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Let
                | Self::Const
                | Self::Func
                | Self::If
                | Self::Else
                | Self::Match
                | Self::Struct
                | Self::Return
                | Self::Import
                | Self::For
                | Self::In
                | Self::While
                | Self::Try
                | Self::Catch
                | Self::True
                | Self::False
        )
    }

    /// Returns true if this token is a literal
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Float | Self::String | Self::True | Self::False
        )
    }

    /// Returns true if this token should be skipped by the parser
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let => write!(f, "let"),
            Self::Const => write!(f, "const"),
            Self::Func => write!(f, "func"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::Match => write!(f, "match"),
            Self::Struct => write!(f, "struct"),
            Self::Return => write!(f, "return"),
            Self::Import => write!(f, "import"),
            Self::For => write!(f, "for"),
            Self::In => write!(f, "in"),
            Self::While => write!(f, "while"),
            Self::Try => write!(f, "try"),
            Self::Catch => write!(f, "catch"),
            Self::Int => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::String => write!(f, "string"),
            Self::StringStart => write!(f, "\""),
            Self::Ident => write!(f, "identifier"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Eq => write!(f, "="),
            Self::EqEq => write!(f, "=="),
            Self::NotEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::LtEq => write!(f, "<="),
            Self::GtEq => write!(f, ">="),
            Self::AndAnd => write!(f, "&&"),
            Self::OrOr => write!(f, "||"),
            Self::Not => write!(f, "!"),
            Self::Amp => write!(f, "&"),
            Self::Pipe => write!(f, "|"),
            Self::Caret => write!(f, "^"),
            Self::Tilde => write!(f, "~"),
            Self::FatArrow => write!(f, "=>"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Comma => write!(f, ","),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Dot => write!(f, "."),
            Self::LineComment => write!(f, "// comment"),
            Self::BlockComment => write!(f, "/* comment */"),
            Self::Eof => write!(f, "end of file"),
            Self::Error => write!(f, "error"),
        }
    }
}
