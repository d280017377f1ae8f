//! SyntaxKind enum for the Java CST.
//!
//! A superset of `TokenKind` (mapped to SCREAMING_SNAKE_CASE) plus the
//! composite node kinds produced by the parser.

use decaf_common::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // ── Sentinels ──────────────────────────────────────────────────────
    /// Placeholder kind for unfinished parser events.
    TOMBSTONE = 0,
    /// Wrapper for tokens that couldn't be parsed.
    ERROR_NODE = 1,

    // ── Keywords ───────────────────────────────────────────────────────
    ABSTRACT_KW,
    ASSERT_KW,
    BOOLEAN_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FINAL_KW,
    FINALLY_KW,
    FLOAT_KW,
    FOR_KW,
    GOTO_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    INSTANCEOF_KW,
    INT_KW,
    INTERFACE_KW,
    LONG_KW,
    NATIVE_KW,
    NEW_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    SHORT_KW,
    STATIC_KW,
    STRICTFP_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRY_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,

    // ── Literals ───────────────────────────────────────────────────────
    INT_LITERAL,
    FLOAT_LITERAL,
    CHAR_LITERAL,
    STRING_LITERAL,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,

    // ── Separators ─────────────────────────────────────────────────────
    L_PAREN,
    R_PAREN,
    L_BRACE,
    R_BRACE,
    L_BRACKET,
    R_BRACKET,
    SEMICOLON,
    COMMA,
    DOT,
    ELLIPSIS,
    AT,
    COLON_COLON,

    // ── Operators ──────────────────────────────────────────────────────
    EQ,
    GT,
    LT,
    BANG,
    TILDE,
    QUESTION,
    COLON,
    ARROW,
    EQ_EQ,
    LT_EQ,
    NOT_EQ,
    AMP_AMP,
    PIPE_PIPE,
    PLUS_PLUS,
    MINUS_MINUS,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    AMP,
    PIPE,
    CARET,
    PERCENT,
    SHL,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    PERCENT_EQ,
    SHL_EQ,

    // ── Trivia ─────────────────────────────────────────────────────────
    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // ── Special tokens ─────────────────────────────────────────────────
    IDENT,
    /// Lexer error token.
    ERROR,
    EOF,

    // ── Roots (one per entry point) ────────────────────────────────────
    COMPILATION_UNIT,
    /// Root for a bare sequence of class members.
    CLASS_BODY_DECLARATIONS,
    /// Root for a bare sequence of block statements.
    BLOCK_STATEMENTS,
    /// Root for a single expression.
    EXPRESSION_SNIPPET,

    // ── Declarations ───────────────────────────────────────────────────
    PACKAGE_DECL,
    /// `import [static] a.b.C[.*];`
    IMPORT_DECL,
    /// Dotted name: `a.b.C`
    QUALIFIED_NAME,
    /// Modifiers and annotations preceding a declaration. Possibly empty.
    MODIFIER_LIST,
    /// `@Name` or `@Name(...)`
    ANNOTATION,
    ANNOTATION_ARGS,
    CLASS_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    /// `@interface Name { ... }`
    ANNOTATION_TYPE_DECL,
    EXTENDS_CLAUSE,
    IMPLEMENTS_CLAUSE,
    /// `{ members }` of a class, interface or anonymous class.
    CLASS_BODY,
    ENUM_BODY,
    ENUM_CONSTANT,
    FIELD_DECL,
    /// `name [dims] [= init]`
    VARIABLE_DECLARATOR,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    /// `[static] { ... }` inside a class body.
    INITIALIZER,
    PARAM_LIST,
    FORMAL_PARAM,
    THROWS_CLAUSE,
    /// Trailing `[]` pairs after a declarator or method header.
    DIMS,

    // ── Types ──────────────────────────────────────────────────────────
    /// A primitive type or `void`.
    PRIMITIVE_TYPE,
    /// `a.b.C<T>.D`
    CLASS_TYPE,
    ARRAY_TYPE,
    TYPE_ARGS,
    /// `?`, `? extends T`, `? super T`
    WILDCARD,
    TYPE_PARAMS,
    TYPE_PARAM,
    /// `extends A & B` on a type parameter.
    TYPE_BOUND,

    // ── Statements ─────────────────────────────────────────────────────
    BLOCK,
    LOCAL_VAR_DECL,
    /// A local variable declaration followed by `;`.
    LOCAL_VAR_DECL_STMT,
    EXPR_STMT,
    IF_STMT,
    WHILE_STMT,
    DO_STMT,
    FOR_STMT,
    FOR_INIT,
    FOR_UPDATE,
    /// `for (T x : xs)`
    FOREACH_STMT,
    RETURN_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    THROW_STMT,
    SWITCH_STMT,
    SWITCH_BLOCK,
    /// One or more labels followed by the statements they select.
    SWITCH_GROUP,
    SWITCH_LABEL,
    SYNCHRONIZED_STMT,
    TRY_STMT,
    /// `(Resource r = ...; ...)` of a try-with-resources.
    RESOURCE_SPEC,
    RESOURCE,
    CATCH_CLAUSE,
    /// `catch (A | B e)` parameter.
    CATCH_PARAM,
    FINALLY_CLAUSE,
    LABELED_STMT,
    ASSERT_STMT,
    EMPTY_STMT,

    // ── Expressions ────────────────────────────────────────────────────
    NAME_EXPR,
    FIELD_ACCESS,
    /// `[recv .] [<T>] name(args)`
    METHOD_CALL,
    /// `this(...)` / `super(...)` at the start of a constructor body.
    CONSTRUCTOR_CALL,
    ARG_LIST,
    LITERAL,
    THIS_EXPR,
    SUPER_EXPR,
    BINARY_EXPR,
    UNARY_EXPR,
    POSTFIX_EXPR,
    ASSIGN_EXPR,
    CONDITIONAL_EXPR,
    INSTANCEOF_EXPR,
    CAST_EXPR,
    PAREN_EXPR,
    LAMBDA_EXPR,
    LAMBDA_PARAMS,
    METHOD_REF,
    /// `new T(args) [class-body]`
    CLASS_INSTANCE_CREATION,
    /// `new T[n][]` or `new T[] { ... }`
    ARRAY_CREATION,
    /// `{ a, b }`
    ARRAY_INIT,
    /// `[n]` dimension in an array creation.
    DIM_EXPR,
    INDEX_EXPR,
    /// `T.class`
    CLASS_LITERAL,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE | SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT
        )
    }

    /// Kinds whose node is a statement inside a block.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::BLOCK
                | SyntaxKind::LOCAL_VAR_DECL_STMT
                | SyntaxKind::CLASS_DECL
                | SyntaxKind::INTERFACE_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::EXPR_STMT
                | SyntaxKind::IF_STMT
                | SyntaxKind::WHILE_STMT
                | SyntaxKind::DO_STMT
                | SyntaxKind::FOR_STMT
                | SyntaxKind::FOREACH_STMT
                | SyntaxKind::RETURN_STMT
                | SyntaxKind::BREAK_STMT
                | SyntaxKind::CONTINUE_STMT
                | SyntaxKind::THROW_STMT
                | SyntaxKind::SWITCH_STMT
                | SyntaxKind::SYNCHRONIZED_STMT
                | SyntaxKind::TRY_STMT
                | SyntaxKind::LABELED_STMT
                | SyntaxKind::ASSERT_STMT
                | SyntaxKind::EMPTY_STMT
                | SyntaxKind::ERROR_NODE
        )
    }

    /// Type nodes: primitive, class or array types.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::PRIMITIVE_TYPE | SyntaxKind::CLASS_TYPE | SyntaxKind::ARRAY_TYPE
        )
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            // Keywords
            TokenKind::Abstract => SyntaxKind::ABSTRACT_KW,
            TokenKind::Assert => SyntaxKind::ASSERT_KW,
            TokenKind::Boolean => SyntaxKind::BOOLEAN_KW,
            TokenKind::Break => SyntaxKind::BREAK_KW,
            TokenKind::Byte => SyntaxKind::BYTE_KW,
            TokenKind::Case => SyntaxKind::CASE_KW,
            TokenKind::Catch => SyntaxKind::CATCH_KW,
            TokenKind::Char => SyntaxKind::CHAR_KW,
            TokenKind::Class => SyntaxKind::CLASS_KW,
            TokenKind::Const => SyntaxKind::CONST_KW,
            TokenKind::Continue => SyntaxKind::CONTINUE_KW,
            TokenKind::Default => SyntaxKind::DEFAULT_KW,
            TokenKind::Do => SyntaxKind::DO_KW,
            TokenKind::Double => SyntaxKind::DOUBLE_KW,
            TokenKind::Else => SyntaxKind::ELSE_KW,
            TokenKind::Enum => SyntaxKind::ENUM_KW,
            TokenKind::Extends => SyntaxKind::EXTENDS_KW,
            TokenKind::Final => SyntaxKind::FINAL_KW,
            TokenKind::Finally => SyntaxKind::FINALLY_KW,
            TokenKind::Float => SyntaxKind::FLOAT_KW,
            TokenKind::For => SyntaxKind::FOR_KW,
            TokenKind::Goto => SyntaxKind::GOTO_KW,
            TokenKind::If => SyntaxKind::IF_KW,
            TokenKind::Implements => SyntaxKind::IMPLEMENTS_KW,
            TokenKind::Import => SyntaxKind::IMPORT_KW,
            TokenKind::Instanceof => SyntaxKind::INSTANCEOF_KW,
            TokenKind::Int => SyntaxKind::INT_KW,
            TokenKind::Interface => SyntaxKind::INTERFACE_KW,
            TokenKind::Long => SyntaxKind::LONG_KW,
            TokenKind::Native => SyntaxKind::NATIVE_KW,
            TokenKind::New => SyntaxKind::NEW_KW,
            TokenKind::Package => SyntaxKind::PACKAGE_KW,
            TokenKind::Private => SyntaxKind::PRIVATE_KW,
            TokenKind::Protected => SyntaxKind::PROTECTED_KW,
            TokenKind::Public => SyntaxKind::PUBLIC_KW,
            TokenKind::Return => SyntaxKind::RETURN_KW,
            TokenKind::Short => SyntaxKind::SHORT_KW,
            TokenKind::Static => SyntaxKind::STATIC_KW,
            TokenKind::Strictfp => SyntaxKind::STRICTFP_KW,
            TokenKind::Super => SyntaxKind::SUPER_KW,
            TokenKind::Switch => SyntaxKind::SWITCH_KW,
            TokenKind::Synchronized => SyntaxKind::SYNCHRONIZED_KW,
            TokenKind::This => SyntaxKind::THIS_KW,
            TokenKind::Throw => SyntaxKind::THROW_KW,
            TokenKind::Throws => SyntaxKind::THROWS_KW,
            TokenKind::Transient => SyntaxKind::TRANSIENT_KW,
            TokenKind::Try => SyntaxKind::TRY_KW,
            TokenKind::Void => SyntaxKind::VOID_KW,
            TokenKind::Volatile => SyntaxKind::VOLATILE_KW,
            TokenKind::While => SyntaxKind::WHILE_KW,
            // Literals
            TokenKind::IntLiteral => SyntaxKind::INT_LITERAL,
            TokenKind::FloatLiteral => SyntaxKind::FLOAT_LITERAL,
            TokenKind::CharLiteral => SyntaxKind::CHAR_LITERAL,
            TokenKind::StringLiteral => SyntaxKind::STRING_LITERAL,
            TokenKind::True => SyntaxKind::TRUE_KW,
            TokenKind::False => SyntaxKind::FALSE_KW,
            TokenKind::Null => SyntaxKind::NULL_KW,
            // Separators
            TokenKind::LParen => SyntaxKind::L_PAREN,
            TokenKind::RParen => SyntaxKind::R_PAREN,
            TokenKind::LBrace => SyntaxKind::L_BRACE,
            TokenKind::RBrace => SyntaxKind::R_BRACE,
            TokenKind::LBracket => SyntaxKind::L_BRACKET,
            TokenKind::RBracket => SyntaxKind::R_BRACKET,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Ellipsis => SyntaxKind::ELLIPSIS,
            TokenKind::At => SyntaxKind::AT,
            TokenKind::ColonColon => SyntaxKind::COLON_COLON,
            // Operators
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Question => SyntaxKind::QUESTION,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Arrow => SyntaxKind::ARROW,
            TokenKind::EqEq => SyntaxKind::EQ_EQ,
            TokenKind::LtEq => SyntaxKind::LT_EQ,
            TokenKind::NotEq => SyntaxKind::NOT_EQ,
            TokenKind::AmpAmp => SyntaxKind::AMP_AMP,
            TokenKind::PipePipe => SyntaxKind::PIPE_PIPE,
            TokenKind::PlusPlus => SyntaxKind::PLUS_PLUS,
            TokenKind::MinusMinus => SyntaxKind::MINUS_MINUS,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Minus => SyntaxKind::MINUS,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::Amp => SyntaxKind::AMP,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Caret => SyntaxKind::CARET,
            TokenKind::Percent => SyntaxKind::PERCENT,
            TokenKind::Shl => SyntaxKind::SHL,
            TokenKind::PlusEq => SyntaxKind::PLUS_EQ,
            TokenKind::MinusEq => SyntaxKind::MINUS_EQ,
            TokenKind::StarEq => SyntaxKind::STAR_EQ,
            TokenKind::SlashEq => SyntaxKind::SLASH_EQ,
            TokenKind::AmpEq => SyntaxKind::AMP_EQ,
            TokenKind::PipeEq => SyntaxKind::PIPE_EQ,
            TokenKind::CaretEq => SyntaxKind::CARET_EQ,
            TokenKind::PercentEq => SyntaxKind::PERCENT_EQ,
            TokenKind::ShlEq => SyntaxKind::SHL_EQ,
            // Trivia
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::LineComment => SyntaxKind::LINE_COMMENT,
            TokenKind::BlockComment => SyntaxKind::BLOCK_COMMENT,
            // Special
            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::Error => SyntaxKind::ERROR,
            TokenKind::Eof => SyntaxKind::EOF,
        }
    }
}
