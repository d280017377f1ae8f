//! Blocks and statements.

use crate::syntax_kind::SyntaxKind;

use super::expressions::expr;
use super::items::{at_type_decl_start, modifiers, type_decl, variable_declarators};
use super::types::{scan_type, type_};
use super::{MarkClosed, Parser};

/// `{ blockStatement* }`
pub(crate) fn block(p: &mut Parser) {
    let m = p.open();
    let open_span = p.current_span();
    if !p.expect(SyntaxKind::L_BRACE) {
        p.close(m, SyntaxKind::BLOCK);
        return;
    }
    while !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
        block_statement(p);
    }
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_related("expected `}` to close block", open_span, "block started here");
    }
    p.close(m, SyntaxKind::BLOCK);
}

/// Whether a local variable declaration starts here: modifiers, or a type
/// immediately followed by a name.
fn at_local_var_decl(p: &Parser) -> bool {
    if p.at_any(&[SyntaxKind::FINAL_KW, SyntaxKind::AT]) {
        return true;
    }
    scan_type(p, 0).is_some_and(|n| p.nth(n) == SyntaxKind::IDENT)
}

/// A statement, a local variable declaration or a local class.
pub(crate) fn block_statement(p: &mut Parser) {
    if at_type_decl_start(p)
        || (p.at_any(&[SyntaxKind::ABSTRACT_KW, SyntaxKind::STATIC_KW])
            && p.nth(1) == SyntaxKind::CLASS_KW)
    {
        let mods = modifiers(p);
        type_decl(p, mods);
        return;
    }
    if at_local_var_decl(p) {
        let mods = modifiers(p);
        if at_type_decl_start(p) {
            type_decl(p, mods);
            return;
        }
        let decl = local_var_decl(p, mods);
        let m = p.open_before(decl);
        p.expect(SyntaxKind::SEMICOLON);
        p.close(m, SyntaxKind::LOCAL_VAR_DECL_STMT);
        return;
    }
    statement(p);
}

/// `Type a = 1, b`, after its modifiers.
fn local_var_decl(p: &mut Parser, mods: MarkClosed) -> MarkClosed {
    let m = p.open_before(mods);
    type_(p);
    variable_declarators(p);
    p.close(m, SyntaxKind::LOCAL_VAR_DECL)
}

pub(crate) fn statement(p: &mut Parser) {
    match p.current() {
        SyntaxKind::L_BRACE => block(p),
        SyntaxKind::SEMICOLON => {
            let m = p.open();
            p.advance();
            p.close(m, SyntaxKind::EMPTY_STMT);
        }
        SyntaxKind::IF_KW => {
            let m = p.open();
            p.advance();
            paren_expr(p);
            statement(p);
            if p.eat(SyntaxKind::ELSE_KW) {
                statement(p);
            }
            p.close(m, SyntaxKind::IF_STMT);
        }
        SyntaxKind::WHILE_KW => {
            let m = p.open();
            p.advance();
            paren_expr(p);
            statement(p);
            p.close(m, SyntaxKind::WHILE_STMT);
        }
        SyntaxKind::DO_KW => {
            let m = p.open();
            p.advance();
            statement(p);
            p.expect(SyntaxKind::WHILE_KW);
            paren_expr(p);
            p.expect(SyntaxKind::SEMICOLON);
            p.close(m, SyntaxKind::DO_STMT);
        }
        SyntaxKind::FOR_KW => for_stmt(p),
        SyntaxKind::RETURN_KW => {
            let m = p.open();
            p.advance();
            if !p.at(SyntaxKind::SEMICOLON) {
                expr(p);
            }
            p.expect(SyntaxKind::SEMICOLON);
            p.close(m, SyntaxKind::RETURN_STMT);
        }
        SyntaxKind::BREAK_KW | SyntaxKind::CONTINUE_KW => {
            let kind = if p.at(SyntaxKind::BREAK_KW) {
                SyntaxKind::BREAK_STMT
            } else {
                SyntaxKind::CONTINUE_STMT
            };
            let m = p.open();
            p.advance();
            p.eat(SyntaxKind::IDENT);
            p.expect(SyntaxKind::SEMICOLON);
            p.close(m, kind);
        }
        SyntaxKind::THROW_KW => {
            let m = p.open();
            p.advance();
            expr(p);
            p.expect(SyntaxKind::SEMICOLON);
            p.close(m, SyntaxKind::THROW_STMT);
        }
        SyntaxKind::SWITCH_KW => switch_stmt(p),
        SyntaxKind::SYNCHRONIZED_KW => {
            let m = p.open();
            p.advance();
            paren_expr(p);
            block(p);
            p.close(m, SyntaxKind::SYNCHRONIZED_STMT);
        }
        SyntaxKind::TRY_KW => try_stmt(p),
        SyntaxKind::ASSERT_KW => {
            let m = p.open();
            p.advance();
            expr(p);
            if p.eat(SyntaxKind::COLON) {
                expr(p);
            }
            p.expect(SyntaxKind::SEMICOLON);
            p.close(m, SyntaxKind::ASSERT_STMT);
        }
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::COLON => {
            let m = p.open();
            p.advance_n(2);
            statement(p);
            p.close(m, SyntaxKind::LABELED_STMT);
        }
        _ => expr_stmt(p),
    }
}

fn expr_stmt(p: &mut Parser) {
    let m = p.open();
    if expr(p).is_none() {
        p.error("expected statement");
        if !p.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            p.advance();
        }
        p.close(m, SyntaxKind::ERROR_NODE);
        return;
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::EXPR_STMT);
}

/// `( expr )` as used by `if`, `while`, `switch` and `synchronized`.
fn paren_expr(p: &mut Parser) {
    p.expect(SyntaxKind::L_PAREN);
    expr(p);
    p.expect(SyntaxKind::R_PAREN);
}

fn expr_list(p: &mut Parser) {
    loop {
        if expr(p).is_none() {
            break;
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

/// Basic `for (init; cond; update)` or enhanced `for (T x : xs)`.
fn for_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // for
    p.expect(SyntaxKind::L_PAREN);
    if at_local_var_decl(p) {
        let mods = modifiers(p);
        let decl = local_var_decl(p, mods);
        if p.eat(SyntaxKind::COLON) {
            expr(p);
            p.expect(SyntaxKind::R_PAREN);
            statement(p);
            p.close(m, SyntaxKind::FOREACH_STMT);
            return;
        }
        let init = p.open_before(decl);
        p.close(init, SyntaxKind::FOR_INIT);
    } else if !p.at(SyntaxKind::SEMICOLON) {
        let init = p.open();
        expr_list(p);
        p.close(init, SyntaxKind::FOR_INIT);
    }
    p.expect(SyntaxKind::SEMICOLON);
    if !p.at(SyntaxKind::SEMICOLON) {
        expr(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    if !p.at(SyntaxKind::R_PAREN) {
        let update = p.open();
        expr_list(p);
        p.close(update, SyntaxKind::FOR_UPDATE);
    }
    p.expect(SyntaxKind::R_PAREN);
    statement(p);
    p.close(m, SyntaxKind::FOR_STMT);
}

/// `switch (e) { case 1: case 2: a(); default: b(); }`
///
/// Consecutive labels share one SWITCH_GROUP with the statements after
/// them. Labels at the very end with no statements form an empty group.
fn switch_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // switch
    paren_expr(p);
    let body = p.open();
    let open_span = p.current_span();
    if p.expect(SyntaxKind::L_BRACE) {
        while !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
            if p.at_any(&[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW]) {
                switch_group(p);
            } else {
                p.advance_with_error("expected `case` or `default`");
            }
        }
        if !p.eat(SyntaxKind::R_BRACE) {
            p.error_with_related("expected `}` to close switch", open_span, "switch started here");
        }
    }
    p.close(body, SyntaxKind::SWITCH_BLOCK);
    p.close(m, SyntaxKind::SWITCH_STMT);
}

fn switch_group(p: &mut Parser) {
    let g = p.open();
    while p.at_any(&[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW]) {
        let label = p.open();
        if p.at(SyntaxKind::CASE_KW) {
            p.advance();
            expr(p);
        } else {
            p.advance();
        }
        p.expect(SyntaxKind::COLON);
        p.close(label, SyntaxKind::SWITCH_LABEL);
    }
    while !p.at_any(&[
        SyntaxKind::CASE_KW,
        SyntaxKind::DEFAULT_KW,
        SyntaxKind::R_BRACE,
        SyntaxKind::EOF,
    ]) {
        block_statement(p);
    }
    p.close(g, SyntaxKind::SWITCH_GROUP);
}

/// `try [(resources)] { } catch (A | B e) { } finally { }`
fn try_stmt(p: &mut Parser) {
    let m = p.open();
    p.advance(); // try
    if p.at(SyntaxKind::L_PAREN) {
        let spec = p.open();
        p.advance();
        while !p.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::EOF]) {
            let resource = p.open();
            modifiers(p);
            type_(p);
            p.expect(SyntaxKind::IDENT);
            p.expect(SyntaxKind::EQ);
            expr(p);
            p.close(resource, SyntaxKind::RESOURCE);
            if !p.eat(SyntaxKind::SEMICOLON) {
                break;
            }
        }
        p.expect(SyntaxKind::R_PAREN);
        p.close(spec, SyntaxKind::RESOURCE_SPEC);
    }
    block(p);
    while p.at(SyntaxKind::CATCH_KW) {
        let clause = p.open();
        p.advance();
        p.expect(SyntaxKind::L_PAREN);
        let param = p.open();
        modifiers(p);
        type_(p);
        while p.eat(SyntaxKind::PIPE) {
            type_(p);
        }
        p.expect(SyntaxKind::IDENT);
        p.close(param, SyntaxKind::CATCH_PARAM);
        p.expect(SyntaxKind::R_PAREN);
        block(p);
        p.close(clause, SyntaxKind::CATCH_CLAUSE);
    }
    if p.at(SyntaxKind::FINALLY_KW) {
        let clause = p.open();
        p.advance();
        block(p);
        p.close(clause, SyntaxKind::FINALLY_CLAUSE);
    }
    p.close(m, SyntaxKind::TRY_STMT);
}
