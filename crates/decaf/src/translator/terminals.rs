//! Terminals: the keyword table and modifier lists.

use decaf_parser::{SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::NodeOrToken;

use super::Translator;
use crate::convert::escape_identifier;

/// Context-free keyword and operator substitutions.
pub(super) fn replacement(kind: SyntaxKind) -> Option<&'static str> {
    let csharp = match kind {
        SyntaxKind::BOOLEAN_KW => "bool",
        SyntaxKind::EXTENDS_KW => ":",
        SyntaxKind::IMPLEMENTS_KW => ":",
        SyntaxKind::FINAL_KW => "readonly",
        SyntaxKind::INSTANCEOF_KW => "is",
        SyntaxKind::NATIVE_KW => "extern",
        SyntaxKind::SUPER_KW => "base",
        SyntaxKind::SYNCHRONIZED_KW => "lock",
        SyntaxKind::ARROW => "=>",
        _ => return None,
    };
    Some(csharp)
}

/// What a modifier list is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModifierContext {
    Type,
    Field,
    Method,
    Local,
    Parameter,
    CatchParameter,
    Other,
}

impl ModifierContext {
    fn of(owner: Option<SyntaxKind>) -> Self {
        match owner {
            Some(
                SyntaxKind::CLASS_DECL
                | SyntaxKind::INTERFACE_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::ANNOTATION_TYPE_DECL,
            ) => ModifierContext::Type,
            Some(SyntaxKind::FIELD_DECL) => ModifierContext::Field,
            Some(SyntaxKind::METHOD_DECL | SyntaxKind::CONSTRUCTOR_DECL) => ModifierContext::Method,
            Some(SyntaxKind::LOCAL_VAR_DECL | SyntaxKind::RESOURCE) => ModifierContext::Local,
            Some(SyntaxKind::FORMAL_PARAM) => ModifierContext::Parameter,
            Some(SyntaxKind::CATCH_PARAM) => ModifierContext::CatchParameter,
            _ => ModifierContext::Other,
        }
    }
}

enum Modifier {
    Keep,
    Replace(&'static str),
    Erase,
}

impl Translator<'_> {
    pub(crate) fn token(&mut self, token: &SyntaxToken) {
        match token.kind() {
            kind if kind.is_trivia() => {}
            SyntaxKind::TRANSIENT_KW | SyntaxKind::STRICTFP_KW => self.erase_token(token),
            SyntaxKind::IDENT => {
                let text = escape_identifier(token.text());
                self.terminal(token, &text);
            }
            kind => {
                let text = replacement(kind).unwrap_or(token.text());
                self.terminal(token, text);
            }
        }
    }

    pub(super) fn modifier_list(&mut self, node: &SyntaxNode) {
        let context = ModifierContext::of(node.parent().map(|p| p.kind()));
        for child in node.children_with_tokens() {
            let token = match child {
                NodeOrToken::Node(annotation) => {
                    self.node(&annotation);
                    continue;
                }
                NodeOrToken::Token(token) => token,
            };
            match self.modifier(token.kind(), context) {
                Modifier::Keep => self.token(&token),
                Modifier::Replace(text) => self.terminal(&token, text),
                Modifier::Erase => self.erase_token(&token),
            }
        }
    }

    fn modifier(&self, kind: SyntaxKind, context: ModifierContext) -> Modifier {
        use ModifierContext::*;

        match (kind, context) {
            (SyntaxKind::FINAL_KW, Type) => Modifier::Replace("sealed"),
            (SyntaxKind::FINAL_KW, Field | Method | CatchParameter) => Modifier::Erase,
            (SyntaxKind::FINAL_KW, Parameter) => {
                if self.options.csharp_language_version.supports_in_parameters() {
                    Modifier::Replace("in")
                } else {
                    Modifier::Erase
                }
            }
            (SyntaxKind::FINAL_KW, Local | Other) => Modifier::Replace("readonly"),
            // A C# `static class` cannot be instantiated.
            (SyntaxKind::STATIC_KW, Type) => Modifier::Erase,
            (SyntaxKind::SYNCHRONIZED_KW | SyntaxKind::DEFAULT_KW, Method) => Modifier::Erase,
            (SyntaxKind::TRANSIENT_KW | SyntaxKind::STRICTFP_KW, _) => Modifier::Erase,
            _ => Modifier::Keep,
        }
    }
}
