//! Pratt expression parser for Java.
//!
//! Binding powers follow the Java operator precedence table. Operators that
//! begin with `>` arrive as separate `>` tokens and are recognized here only
//! when the pieces are glued together in the source.

use crate::syntax_kind::SyntaxKind;

use super::items::{class_body, dims, formal_param};
use super::statements::block;
use super::types::{array_dims, element_type, result_type, scan_type, type_, type_args};
use super::{MarkClosed, MarkOpened, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Infix {
    Binary,
    Assign,
    Conditional,
    Instanceof,
}

/// Returns (operator class, token count, left_bp, right_bp) for the infix
/// operator at the current position.
///
/// Left < right means left-associative; assignment and `?:` use left > right.
fn infix_op(p: &Parser) -> Option<(Infix, usize, u8, u8)> {
    use SyntaxKind::*;

    if p.at(GT) {
        let op = if p.at_glued(&[GT, GT, GT, EQ]) {
            (Infix::Assign, 4, 2, 1)
        } else if p.at_glued(&[GT, GT, EQ]) {
            (Infix::Assign, 3, 2, 1)
        } else if p.at_glued(&[GT, GT, GT]) {
            (Infix::Binary, 3, 19, 20)
        } else if p.at_glued(&[GT, GT]) {
            (Infix::Binary, 2, 19, 20)
        } else if p.at_glued(&[GT, EQ]) {
            (Infix::Binary, 2, 17, 18)
        } else {
            (Infix::Binary, 1, 17, 18)
        };
        return Some(op);
    }

    let (class, l_bp, r_bp) = match p.current() {
        EQ | PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | AMP_EQ | PIPE_EQ | CARET_EQ
        | PERCENT_EQ | SHL_EQ => (Infix::Assign, 2, 1),
        QUESTION => (Infix::Conditional, 4, 3),
        PIPE_PIPE => (Infix::Binary, 5, 6),
        AMP_AMP => (Infix::Binary, 7, 8),
        PIPE => (Infix::Binary, 9, 10),
        CARET => (Infix::Binary, 11, 12),
        AMP => (Infix::Binary, 13, 14),
        EQ_EQ | NOT_EQ => (Infix::Binary, 15, 16),
        LT | LT_EQ => (Infix::Binary, 17, 18),
        INSTANCEOF_KW => (Infix::Instanceof, 17, 18),
        SHL => (Infix::Binary, 19, 20),
        PLUS | MINUS => (Infix::Binary, 21, 22),
        STAR | SLASH | PERCENT => (Infix::Binary, 23, 24),
        _ => return None,
    };
    Some((class, 1, l_bp, r_bp))
}

/// Prefix operators and casts bind tighter than every infix operator.
const PREFIX_BP: u8 = 25;

// ── Entry points ───────────────────────────────────────────────────────

pub(crate) fn expr(p: &mut Parser) -> Option<MarkClosed> {
    expr_bp(p, 0)
}

fn expr_bp(p: &mut Parser, min_bp: u8) -> Option<MarkClosed> {
    let mut lhs = lhs(p)?;

    loop {
        // ── Postfix ──
        match p.current() {
            SyntaxKind::DOT => {
                lhs = dot_suffix(p, lhs);
                continue;
            }
            SyntaxKind::L_BRACKET if p.nth(1) == SyntaxKind::R_BRACKET => {
                // `String[].class`, `int[]::new`
                lhs = array_dims(p, lhs);
                continue;
            }
            SyntaxKind::L_BRACKET => {
                let m = p.open_before(lhs);
                p.advance();
                if expr(p).is_none() {
                    p.error("expected index expression");
                }
                p.expect(SyntaxKind::R_BRACKET);
                lhs = p.close(m, SyntaxKind::INDEX_EXPR);
                continue;
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                let m = p.open_before(lhs);
                p.advance();
                lhs = p.close(m, SyntaxKind::POSTFIX_EXPR);
                continue;
            }
            SyntaxKind::COLON_COLON => {
                let m = p.open_before(lhs);
                p.advance();
                if p.at(SyntaxKind::LT) {
                    type_args(p);
                }
                if !p.eat(SyntaxKind::NEW_KW) {
                    p.expect(SyntaxKind::IDENT);
                }
                lhs = p.close(m, SyntaxKind::METHOD_REF);
                continue;
            }
            _ => {}
        }

        // ── Infix ──
        let Some((class, tokens, l_bp, r_bp)) = infix_op(p) else {
            break;
        };
        if l_bp < min_bp {
            break;
        }
        let m = p.open_before(lhs);
        p.advance_n(tokens);
        let kind = match class {
            Infix::Binary | Infix::Assign => {
                if expr_bp(p, r_bp).is_none() {
                    p.error("expected expression");
                }
                if class == Infix::Assign {
                    SyntaxKind::ASSIGN_EXPR
                } else {
                    SyntaxKind::BINARY_EXPR
                }
            }
            Infix::Instanceof => {
                type_(p);
                SyntaxKind::INSTANCEOF_EXPR
            }
            Infix::Conditional => {
                if expr(p).is_none() {
                    p.error("expected expression");
                }
                p.expect(SyntaxKind::COLON);
                if expr_bp(p, r_bp).is_none() {
                    p.error("expected expression");
                }
                SyntaxKind::CONDITIONAL_EXPR
            }
        };
        lhs = p.close(m, kind);
    }

    Some(lhs)
}

/// `.name`, `.name(args)`, `.<T>name(args)`, `.class`, `.this`, `.new T()`
fn dot_suffix(p: &mut Parser, lhs: MarkClosed) -> MarkClosed {
    let m = p.open_before(lhs);
    match p.nth(1) {
        SyntaxKind::IDENT if p.nth(2) == SyntaxKind::L_PAREN => {
            p.advance_n(2);
            arg_list(p);
            p.close(m, SyntaxKind::METHOD_CALL)
        }
        SyntaxKind::LT => {
            p.advance(); // .
            type_args(p);
            p.expect(SyntaxKind::IDENT);
            arg_list(p);
            p.close(m, SyntaxKind::METHOD_CALL)
        }
        SyntaxKind::CLASS_KW => {
            p.advance_n(2);
            p.close(m, SyntaxKind::CLASS_LITERAL)
        }
        SyntaxKind::NEW_KW => {
            p.advance(); // .
            creation_rest(p, m)
        }
        SyntaxKind::IDENT | SyntaxKind::THIS_KW | SyntaxKind::SUPER_KW => {
            p.advance_n(2);
            p.close(m, SyntaxKind::FIELD_ACCESS)
        }
        _ => {
            p.advance(); // .
            p.error("expected member name");
            p.close(m, SyntaxKind::FIELD_ACCESS)
        }
    }
}

// ── Atoms and prefix operators ─────────────────────────────────────────

fn lhs(p: &mut Parser) -> Option<MarkClosed> {
    let current = p.current();
    match current {
        SyntaxKind::BANG
        | SyntaxKind::TILDE
        | SyntaxKind::PLUS
        | SyntaxKind::MINUS
        | SyntaxKind::PLUS_PLUS
        | SyntaxKind::MINUS_MINUS => {
            let m = p.open();
            p.advance();
            if expr_bp(p, PREFIX_BP).is_none() {
                p.error("expected operand");
            }
            Some(p.close(m, SyntaxKind::UNARY_EXPR))
        }
        SyntaxKind::L_PAREN => Some(paren_cast_or_lambda(p)),
        SyntaxKind::IDENT => {
            let m = p.open();
            match p.nth(1) {
                SyntaxKind::ARROW => {
                    let params = p.open();
                    p.advance();
                    p.close(params, SyntaxKind::LAMBDA_PARAMS);
                    p.advance(); // ->
                    lambda_body(p);
                    Some(p.close(m, SyntaxKind::LAMBDA_EXPR))
                }
                SyntaxKind::L_PAREN => {
                    p.advance();
                    arg_list(p);
                    Some(p.close(m, SyntaxKind::METHOD_CALL))
                }
                _ => {
                    p.advance();
                    Some(p.close(m, SyntaxKind::NAME_EXPR))
                }
            }
        }
        SyntaxKind::INT_LITERAL
        | SyntaxKind::FLOAT_LITERAL
        | SyntaxKind::CHAR_LITERAL
        | SyntaxKind::STRING_LITERAL
        | SyntaxKind::TRUE_KW
        | SyntaxKind::FALSE_KW
        | SyntaxKind::NULL_KW => {
            let m = p.open();
            p.advance();
            Some(p.close(m, SyntaxKind::LITERAL))
        }
        SyntaxKind::THIS_KW | SyntaxKind::SUPER_KW => {
            let m = p.open();
            p.advance();
            if p.at(SyntaxKind::L_PAREN) {
                arg_list(p);
                return Some(p.close(m, SyntaxKind::CONSTRUCTOR_CALL));
            }
            let kind = if current == SyntaxKind::THIS_KW {
                SyntaxKind::THIS_EXPR
            } else {
                SyntaxKind::SUPER_EXPR
            };
            Some(p.close(m, kind))
        }
        SyntaxKind::NEW_KW => {
            let m = p.open();
            Some(creation_rest(p, m))
        }
        SyntaxKind::VOID_KW
        | SyntaxKind::BOOLEAN_KW
        | SyntaxKind::BYTE_KW
        | SyntaxKind::CHAR_KW
        | SyntaxKind::SHORT_KW
        | SyntaxKind::INT_KW
        | SyntaxKind::LONG_KW
        | SyntaxKind::FLOAT_KW
        | SyntaxKind::DOUBLE_KW => {
            // Only `int.class`, `int[].class` and `int[]::new` are valid
            // here; a bare type is kept as a PRIMITIVE_TYPE node.
            let ty = result_type(p)?;
            if p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::CLASS_KW {
                let m = p.open_before(ty);
                p.advance_n(2);
                return Some(p.close(m, SyntaxKind::CLASS_LITERAL));
            }
            if !p.at(SyntaxKind::COLON_COLON) {
                p.error("expected `.class` after type");
            }
            Some(ty)
        }
        _ => None,
    }
}

/// Index (in significant tokens) of the `)` matching the `(` at the
/// current position.
fn matching_paren(p: &Parser) -> Option<usize> {
    let mut depth = 0usize;
    let mut n = 0;
    loop {
        match p.nth(n) {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => {
                depth -= 1;
                if depth == 0 {
                    return Some(n);
                }
            }
            SyntaxKind::EOF => return None,
            _ => {}
        }
        n += 1;
    }
}

/// `(T) x` with `T` a type and `x` something that cannot continue a
/// parenthesized expression (so `(a) + b` stays an addition).
fn at_cast(p: &Parser) -> bool {
    let Some(n) = scan_type(p, 1) else {
        return false;
    };
    if p.nth(1 + n) != SyntaxKind::R_PAREN {
        return false;
    }
    if p.nth(1) != SyntaxKind::IDENT {
        // Primitive types: `(int) -x` is a cast.
        return true;
    }
    matches!(
        p.nth(2 + n),
        SyntaxKind::IDENT
            | SyntaxKind::INT_LITERAL
            | SyntaxKind::FLOAT_LITERAL
            | SyntaxKind::CHAR_LITERAL
            | SyntaxKind::STRING_LITERAL
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW
            | SyntaxKind::L_PAREN
            | SyntaxKind::THIS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::NEW_KW
            | SyntaxKind::BANG
            | SyntaxKind::TILDE
    )
}

fn paren_cast_or_lambda(p: &mut Parser) -> MarkClosed {
    if matching_paren(p).is_some_and(|close| p.nth(close + 1) == SyntaxKind::ARROW) {
        let m = p.open();
        let params = p.open();
        p.advance(); // (
        while !p.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::EOF]) {
            if p.at(SyntaxKind::IDENT)
                && matches!(p.nth(1), SyntaxKind::COMMA | SyntaxKind::R_PAREN)
            {
                p.advance();
            } else {
                formal_param(p);
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_PAREN);
        p.close(params, SyntaxKind::LAMBDA_PARAMS);
        p.expect(SyntaxKind::ARROW);
        lambda_body(p);
        return p.close(m, SyntaxKind::LAMBDA_EXPR);
    }

    let m = p.open();
    if at_cast(p) {
        p.advance(); // (
        type_(p);
        while p.eat(SyntaxKind::AMP) {
            type_(p);
        }
        p.expect(SyntaxKind::R_PAREN);
        if expr_bp(p, PREFIX_BP).is_none() {
            p.error("expected expression after cast");
        }
        return p.close(m, SyntaxKind::CAST_EXPR);
    }

    p.advance(); // (
    if expr(p).is_none() {
        p.error("expected expression");
    }
    p.expect(SyntaxKind::R_PAREN);
    p.close(m, SyntaxKind::PAREN_EXPR)
}

fn lambda_body(p: &mut Parser) {
    if p.at(SyntaxKind::L_BRACE) {
        block(p);
    } else if expr(p).is_none() {
        p.error("expected lambda body");
    }
}

/// Everything after `new`: a class instance creation (optionally with an
/// anonymous class body) or an array creation.
fn creation_rest(p: &mut Parser, m: MarkOpened) -> MarkClosed {
    p.expect(SyntaxKind::NEW_KW);
    if p.at(SyntaxKind::LT) {
        type_args(p);
    }
    if element_type(p).is_none() {
        return p.close(m, SyntaxKind::CLASS_INSTANCE_CREATION);
    }
    if p.at(SyntaxKind::L_BRACKET) {
        while p.at(SyntaxKind::L_BRACKET) && p.nth(1) != SyntaxKind::R_BRACKET {
            let dim = p.open();
            p.advance();
            expr(p);
            p.expect(SyntaxKind::R_BRACKET);
            p.close(dim, SyntaxKind::DIM_EXPR);
        }
        dims(p);
        if p.at(SyntaxKind::L_BRACE) {
            array_init(p);
        }
        return p.close(m, SyntaxKind::ARRAY_CREATION);
    }
    arg_list(p);
    if p.at(SyntaxKind::L_BRACE) {
        class_body(p);
    }
    p.close(m, SyntaxKind::CLASS_INSTANCE_CREATION)
}

/// `(a, b)`
pub(crate) fn arg_list(p: &mut Parser) {
    let m = p.open();
    if !p.expect(SyntaxKind::L_PAREN) {
        p.close(m, SyntaxKind::ARG_LIST);
        return;
    }
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            if expr(p).is_none() {
                p.error("expected argument");
                break;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.close(m, SyntaxKind::ARG_LIST);
}

/// `{ 1, { 2, 3 }, }`
pub(crate) fn array_init(p: &mut Parser) {
    let m = p.open();
    p.advance(); // {
    while !p.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
        variable_initializer(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(m, SyntaxKind::ARRAY_INIT);
}

/// An expression or an array initializer.
pub(crate) fn variable_initializer(p: &mut Parser) {
    if p.at(SyntaxKind::L_BRACE) {
        array_init(p);
    } else if expr(p).is_none() {
        p.error("expected initializer");
    }
}
