use serde::Serialize;

use crate::span::Span;

/// A token produced by the Java lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }

    pub fn channel(&self) -> Channel {
        self.kind.channel()
    }
}

/// Which channel a token belongs to.
///
/// Hidden tokens (whitespace and comments) never drive parsing, but they are
/// kept in the token stream so the translator can replay them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Channel {
    Significant,
    Hidden,
}

/// Every kind of token in Java 8 source.
///
/// `>` is always lexed as a lone `Gt`. Shift and relational operators that
/// start with `>` are recombined by the parser, so `List<List<T>>` needs no
/// special casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // ── Keywords ───────────────────────────────────────────────────────
    Abstract,
    Assert,
    Boolean,
    Break,
    Byte,
    Case,
    Catch,
    Char,
    Class,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extends,
    Final,
    Finally,
    Float,
    For,
    Goto,
    If,
    Implements,
    Import,
    Instanceof,
    Int,
    Interface,
    Long,
    Native,
    New,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Short,
    Static,
    Strictfp,
    Super,
    Switch,
    Synchronized,
    This,
    Throw,
    Throws,
    Transient,
    Try,
    Void,
    Volatile,
    While,

    // ── Literals ───────────────────────────────────────────────────────
    IntLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,
    True,
    False,
    Null,

    // ── Separators ─────────────────────────────────────────────────────
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    /// `...`
    Ellipsis,
    At,
    /// `::`
    ColonColon,

    // ── Operators ──────────────────────────────────────────────────────
    Eq,
    Gt,
    Lt,
    Bang,
    Tilde,
    Question,
    Colon,
    /// `->`
    Arrow,
    EqEq,
    LtEq,
    NotEq,
    AmpAmp,
    PipePipe,
    PlusPlus,
    MinusMinus,
    Plus,
    Minus,
    Star,
    Slash,
    Amp,
    Pipe,
    Caret,
    Percent,
    /// `<<`
    Shl,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    AmpEq,
    PipeEq,
    CaretEq,
    PercentEq,
    /// `<<=`
    ShlEq,

    // ── Trivia ─────────────────────────────────────────────────────────
    Whitespace,
    LineComment,
    /// `/* ... */`, including `/** ... */` doc comments.
    BlockComment,

    // ── Special ────────────────────────────────────────────────────────
    Ident,
    Error,
    Eof,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn channel(self) -> Channel {
        if self.is_trivia() {
            Channel::Hidden
        } else {
            Channel::Significant
        }
    }

    /// `boolean`, `byte`, `char`, `short`, `int`, `long`, `float`, `double`.
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::Boolean
                | TokenKind::Byte
                | TokenKind::Char
                | TokenKind::Short
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Float
                | TokenKind::Double
        )
    }

    /// Keywords that may appear in a modifier list.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Abstract
                | TokenKind::Final
                | TokenKind::Native
                | TokenKind::Synchronized
                | TokenKind::Transient
                | TokenKind::Volatile
                | TokenKind::Strictfp
                | TokenKind::Default
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

/// Look up a Java keyword or keyword-like literal (`true`, `false`, `null`).
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    let kind = match s {
        "abstract" => TokenKind::Abstract,
        "assert" => TokenKind::Assert,
        "boolean" => TokenKind::Boolean,
        "break" => TokenKind::Break,
        "byte" => TokenKind::Byte,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "char" => TokenKind::Char,
        "class" => TokenKind::Class,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "default" => TokenKind::Default,
        "do" => TokenKind::Do,
        "double" => TokenKind::Double,
        "else" => TokenKind::Else,
        "enum" => TokenKind::Enum,
        "extends" => TokenKind::Extends,
        "final" => TokenKind::Final,
        "finally" => TokenKind::Finally,
        "float" => TokenKind::Float,
        "for" => TokenKind::For,
        "goto" => TokenKind::Goto,
        "if" => TokenKind::If,
        "implements" => TokenKind::Implements,
        "import" => TokenKind::Import,
        "instanceof" => TokenKind::Instanceof,
        "int" => TokenKind::Int,
        "interface" => TokenKind::Interface,
        "long" => TokenKind::Long,
        "native" => TokenKind::Native,
        "new" => TokenKind::New,
        "package" => TokenKind::Package,
        "private" => TokenKind::Private,
        "protected" => TokenKind::Protected,
        "public" => TokenKind::Public,
        "return" => TokenKind::Return,
        "short" => TokenKind::Short,
        "static" => TokenKind::Static,
        "strictfp" => TokenKind::Strictfp,
        "super" => TokenKind::Super,
        "switch" => TokenKind::Switch,
        "synchronized" => TokenKind::Synchronized,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "throws" => TokenKind::Throws,
        "transient" => TokenKind::Transient,
        "try" => TokenKind::Try,
        "void" => TokenKind::Void,
        "volatile" => TokenKind::Volatile,
        "while" => TokenKind::While,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        _ => return None,
    };
    Some(kind)
}
