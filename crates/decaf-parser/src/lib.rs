//! Java parser: recursive descent producing a lossless rowan CST.
//!
//! The tree keeps every token of the input, whitespace and comments
//! included, and the token stream it was built from stays available through
//! [`Parse::tokens`]. Parsing starts at one of four [`EntryPoint`]s so that
//! fragments (a few statements, a lone expression) parse as well as whole
//! files.

pub mod cst;
pub mod error;
mod parser;
pub mod syntax_kind;

use std::fmt::Write;

use decaf_common::token::Token;
use decaf_lexer::Lexer;
use serde::Serialize;

pub use cst::{JavaLanguage, SyntaxElement, SyntaxNode, SyntaxToken};
pub use error::ParseError;
pub use syntax_kind::SyntaxKind;

use parser::Parser;

/// Grammar start rule for a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryPoint {
    /// A whole source file: package, imports, type declarations.
    CompilationUnit,
    /// Class members without the enclosing class.
    ClassBody,
    /// Block statements without the enclosing method.
    MethodBody,
    /// A single expression.
    Expression,
}

impl EntryPoint {
    /// Root node kind produced for this entry point.
    pub fn root_kind(self) -> SyntaxKind {
        match self {
            EntryPoint::CompilationUnit => SyntaxKind::COMPILATION_UNIT,
            EntryPoint::ClassBody => SyntaxKind::CLASS_BODY_DECLARATIONS,
            EntryPoint::MethodBody => SyntaxKind::BLOCK_STATEMENTS,
            EntryPoint::Expression => SyntaxKind::EXPRESSION_SNIPPET,
        }
    }
}

/// Result of parsing Java source text.
pub struct Parse {
    green: rowan::GreenNode,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
    entry_point: EntryPoint,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// The full token stream, trivia included, ending with `Eof`.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Lexical and syntax errors, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn entry_point(&self) -> EntryPoint {
        self.entry_point
    }

    /// Position of a tree token in [`Parse::tokens`].
    ///
    /// Tokens are never empty except the final `Eof`, so start offsets are
    /// unique and the lookup is a binary search.
    pub fn token_index(&self, token: &SyntaxToken) -> usize {
        let offset: u32 = token.text_range().start().into();
        let index = self.tokens.partition_point(|t| t.span.start < offset);
        debug_assert_eq!(
            SyntaxKind::from(self.tokens[index].kind),
            token.kind(),
            "tree token at {offset} does not match the token stream"
        );
        index
    }
}

/// Parse `source` starting from `entry`.
///
/// Never fails: syntax errors are recorded in [`Parse::errors`] and the
/// offending tokens are wrapped in ERROR_NODEs.
pub fn parse(source: &str, entry: EntryPoint) -> Parse {
    let (tokens, lex_errors) = Lexer::tokenize_with_errors(source);
    let mut p = Parser::new(&tokens, source);
    match entry {
        EntryPoint::CompilationUnit => parser::compilation_unit(&mut p),
        EntryPoint::ClassBody => parser::class_body_declarations(&mut p),
        EntryPoint::MethodBody => parser::block_statements(&mut p),
        EntryPoint::Expression => parser::expression_snippet(&mut p),
    }
    let (green, parse_errors) = p.build_tree();

    let mut errors: Vec<ParseError> = lex_errors.into_iter().map(ParseError::from).collect();
    errors.extend(parse_errors);
    errors.sort_by_key(|e| e.span.start);

    tracing::debug!(
        target: "decaf::parser",
        ?entry,
        tokens = tokens.len(),
        errors = errors.len(),
        "parsed"
    );

    Parse {
        green,
        tokens,
        errors,
        entry_point: entry,
    }
}

/// Indented dump of a tree for tests and debugging. Trivia is omitted.
pub fn debug_tree(node: &SyntaxNode) -> String {
    fn go(out: &mut String, element: SyntaxElement, depth: usize) {
        let indent = "  ".repeat(depth);
        match element {
            rowan::NodeOrToken::Node(node) => {
                let _ = writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.text_range());
                for child in node.children_with_tokens() {
                    go(out, child, depth + 1);
                }
            }
            rowan::NodeOrToken::Token(token) => {
                if !token.kind().is_trivia() {
                    let _ = writeln!(out, "{indent}{:?} {:?}", token.kind(), token.text());
                }
            }
        }
    }

    let mut out = String::new();
    go(&mut out, rowan::NodeOrToken::Node(node.clone()), 0);
    out
}
