//! Types, type arguments and type parameters.
//!
//! Besides the parse functions, this module owns `scan_type`, the pure
//! lookahead used wherever Java's grammar cannot tell a type from an
//! expression by the next token alone (local declarations, casts).

use crate::syntax_kind::SyntaxKind;

use super::items::annotation;
use super::{MarkClosed, Parser};

fn is_primitive(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::BOOLEAN_KW
            | SyntaxKind::BYTE_KW
            | SyntaxKind::CHAR_KW
            | SyntaxKind::SHORT_KW
            | SyntaxKind::INT_KW
            | SyntaxKind::LONG_KW
            | SyntaxKind::FLOAT_KW
            | SyntaxKind::DOUBLE_KW
    )
}

pub(crate) fn at_primitive(p: &Parser) -> bool {
    is_primitive(p.current())
}

/// A full type: primitive or class type, followed by any `[]` pairs.
pub(crate) fn type_(p: &mut Parser) -> Option<MarkClosed> {
    let mut ty = element_type(p)?;
    while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
        ty = array_dims(p, ty);
    }
    Some(ty)
}

/// `T` followed by one `[]`, wrapped into an ARRAY_TYPE.
pub(crate) fn array_dims(p: &mut Parser, element: MarkClosed) -> MarkClosed {
    let m = p.open_before(element);
    p.advance(); // [
    p.advance(); // ]
    p.close(m, SyntaxKind::ARRAY_TYPE)
}

/// A result type: `void` or a type.
pub(crate) fn result_type(p: &mut Parser) -> Option<MarkClosed> {
    if p.at(SyntaxKind::VOID_KW) {
        let m = p.open();
        p.advance();
        return Some(p.close(m, SyntaxKind::PRIMITIVE_TYPE));
    }
    type_(p)
}

/// A type without trailing dims, as used after `new`.
pub(crate) fn element_type(p: &mut Parser) -> Option<MarkClosed> {
    while p.at(SyntaxKind::AT) && p.nth(1) != SyntaxKind::INTERFACE_KW {
        // Type annotations (`@NonNull String`) are attached to the type.
        annotation(p);
    }
    if at_primitive(p) {
        let m = p.open();
        p.advance();
        return Some(p.close(m, SyntaxKind::PRIMITIVE_TYPE));
    }
    if !p.at(SyntaxKind::IDENT) {
        p.error("expected type");
        return None;
    }
    let m = p.open();
    p.advance();
    if p.at(SyntaxKind::LT) {
        type_args(p);
    }
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.advance(); // .
        p.advance(); // ident
        if p.at(SyntaxKind::LT) {
            type_args(p);
        }
    }
    Some(p.close(m, SyntaxKind::CLASS_TYPE))
}

/// `<T, ? extends U>` or the diamond `<>`.
pub(crate) fn type_args(p: &mut Parser) {
    let m = p.open();
    p.advance(); // <
    if !p.at(SyntaxKind::GT) {
        loop {
            if p.at(SyntaxKind::QUESTION) {
                wildcard(p);
            } else if type_(p).is_none() {
                break;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::GT);
    p.close(m, SyntaxKind::TYPE_ARGS);
}

fn wildcard(p: &mut Parser) {
    let m = p.open();
    p.advance(); // ?
    if p.eat(SyntaxKind::EXTENDS_KW) || p.eat(SyntaxKind::SUPER_KW) {
        type_(p);
    }
    p.close(m, SyntaxKind::WILDCARD);
}

/// `<T extends A & B, U>`
pub(crate) fn type_params(p: &mut Parser) {
    let m = p.open();
    p.advance(); // <
    loop {
        let param = p.open();
        while p.at(SyntaxKind::AT) {
            annotation(p);
        }
        p.expect(SyntaxKind::IDENT);
        if p.at(SyntaxKind::EXTENDS_KW) {
            let bound = p.open();
            p.advance();
            type_(p);
            while p.eat(SyntaxKind::AMP) {
                type_(p);
            }
            p.close(bound, SyntaxKind::TYPE_BOUND);
        }
        p.close(param, SyntaxKind::TYPE_PARAM);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::GT);
    p.close(m, SyntaxKind::TYPE_PARAMS);
}

/// Comma-separated types, as in `implements A, B` or `throws X, Y`.
pub(crate) fn type_list(p: &mut Parser) {
    loop {
        if type_(p).is_none() {
            break;
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

// ── Lookahead ──────────────────────────────────────────────────────────

/// If a type starts at significant token `n`, return how many significant
/// tokens it spans. Purely lookahead; nothing is consumed.
pub(crate) fn scan_type(p: &Parser, n: usize) -> Option<usize> {
    let mut i = n;
    if is_primitive(p.nth(i)) {
        i += 1;
    } else if p.nth(i) == SyntaxKind::IDENT {
        i += 1;
        loop {
            if p.nth(i) == SyntaxKind::LT {
                i = scan_type_args(p, i)?;
            }
            if p.nth(i) == SyntaxKind::DOT && p.nth(i + 1) == SyntaxKind::IDENT {
                i += 2;
            } else {
                break;
            }
        }
    } else {
        return None;
    }
    while p.nth(i) == SyntaxKind::L_BRACKET && p.nth(i + 1) == SyntaxKind::R_BRACKET {
        i += 2;
    }
    Some(i - n)
}

/// Skip a balanced `<...>` starting at token `n`; returns the index after it.
fn scan_type_args(p: &Parser, n: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = n;
    loop {
        match p.nth(i) {
            SyntaxKind::LT => depth += 1,
            SyntaxKind::GT => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            SyntaxKind::IDENT
            | SyntaxKind::DOT
            | SyntaxKind::COMMA
            | SyntaxKind::QUESTION
            | SyntaxKind::EXTENDS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::AMP
            | SyntaxKind::L_BRACKET
            | SyntaxKind::R_BRACKET => {}
            kind if is_primitive(kind) => {}
            _ => return None,
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decaf_lexer::Lexer;

    fn scan(source: &str) -> Option<usize> {
        let tokens = Lexer::tokenize(source);
        let p = Parser::new(&tokens, source);
        scan_type(&p, 0)
    }

    #[test]
    fn scans_simple_and_generic_types() {
        assert_eq!(scan("int x"), Some(1));
        assert_eq!(scan("String[] x"), Some(3));
        assert_eq!(scan("java.util.List<String> x"), Some(8));
        assert_eq!(scan("Map<String, List<Integer>> m"), Some(9));
        assert_eq!(scan("List<? extends Number> l"), Some(6));
    }

    #[test]
    fn rejects_expressions() {
        assert_eq!(scan("42"), None);
        assert_eq!(scan("a < b + c"), None);
        assert_eq!(scan("(x)"), None);
    }
}
