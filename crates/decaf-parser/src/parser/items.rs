//! Declarations: package, imports, annotations, modifiers, types and members.

use crate::syntax_kind::SyntaxKind;

use super::expressions::{arg_list, variable_initializer};
use super::statements::block;
use super::types::{result_type, scan_type, type_, type_list, type_params};
use super::{MarkClosed, MarkOpened, Parser};

/// `@Ann package a.b.c;`
pub(crate) fn package_decl(p: &mut Parser) {
    let m = p.open();
    while p.at(SyntaxKind::AT) {
        annotation(p);
    }
    p.expect(SyntaxKind::PACKAGE_KW);
    qualified_name(p);
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::PACKAGE_DECL);
}

/// `import [static] a.b.C;` or `import [static] a.b.*;`
pub(crate) fn import_decl(p: &mut Parser) {
    let m = p.open();
    p.advance(); // import
    p.eat(SyntaxKind::STATIC_KW);
    qualified_name(p);
    if p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::STAR {
        p.advance_n(2);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.close(m, SyntaxKind::IMPORT_DECL);
}

/// `a.b.c`. Stops before a `.` that is not followed by an identifier.
pub(crate) fn qualified_name(p: &mut Parser) {
    let m = p.open();
    p.expect(SyntaxKind::IDENT);
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.advance_n(2);
    }
    p.close(m, SyntaxKind::QUALIFIED_NAME);
}

/// `@Name` or `@Name(...)`. Arguments are kept as a balanced token run.
pub(crate) fn annotation(p: &mut Parser) {
    let m = p.open();
    p.advance(); // @
    qualified_name(p);
    if p.at(SyntaxKind::L_PAREN) {
        let args = p.open();
        let mut depth = 0usize;
        loop {
            match p.current() {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => depth -= 1,
                SyntaxKind::EOF => {
                    p.error("unterminated annotation arguments");
                    break;
                }
                _ => {}
            }
            p.advance();
            if depth == 0 {
                break;
            }
        }
        p.close(args, SyntaxKind::ANNOTATION_ARGS);
    }
    p.close(m, SyntaxKind::ANNOTATION);
}

fn is_modifier(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PUBLIC_KW
            | SyntaxKind::PROTECTED_KW
            | SyntaxKind::PRIVATE_KW
            | SyntaxKind::STATIC_KW
            | SyntaxKind::ABSTRACT_KW
            | SyntaxKind::FINAL_KW
            | SyntaxKind::NATIVE_KW
            | SyntaxKind::SYNCHRONIZED_KW
            | SyntaxKind::TRANSIENT_KW
            | SyntaxKind::VOLATILE_KW
            | SyntaxKind::STRICTFP_KW
            | SyntaxKind::DEFAULT_KW
    )
}

/// Modifier keywords and annotations, in any order. The MODIFIER_LIST node
/// is always produced, even when empty, so declarations have a fixed shape.
pub(crate) fn modifiers(p: &mut Parser) -> MarkClosed {
    let m = p.open();
    loop {
        if is_modifier(p.current()) {
            p.advance();
        } else if p.at(SyntaxKind::AT) && p.nth(1) != SyntaxKind::INTERFACE_KW {
            annotation(p);
        } else {
            break;
        }
    }
    p.close(m, SyntaxKind::MODIFIER_LIST)
}

pub(crate) fn at_type_decl_start(p: &Parser) -> bool {
    match p.current() {
        SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW => true,
        SyntaxKind::AT => p.nth(1) == SyntaxKind::INTERFACE_KW,
        _ => false,
    }
}

/// A top-level type declaration, or an error node covering whatever is in
/// the way.
pub(crate) fn type_decl_or_recover(p: &mut Parser) {
    let mods = modifiers(p);
    if at_type_decl_start(p) {
        type_decl(p, mods);
    } else {
        let m = p.open_before(mods);
        p.error("expected class, interface or enum declaration");
        p.advance();
        p.close(m, SyntaxKind::ERROR_NODE);
    }
}

/// Class, interface, enum or annotation type, after its modifiers.
pub(crate) fn type_decl(p: &mut Parser, mods: MarkClosed) -> MarkClosed {
    let m = p.open_before(mods);
    match p.current() {
        SyntaxKind::CLASS_KW => {
            p.advance();
            p.expect(SyntaxKind::IDENT);
            if p.at(SyntaxKind::LT) {
                type_params(p);
            }
            if p.at(SyntaxKind::EXTENDS_KW) {
                clause(p, SyntaxKind::EXTENDS_CLAUSE);
            }
            if p.at(SyntaxKind::IMPLEMENTS_KW) {
                clause(p, SyntaxKind::IMPLEMENTS_CLAUSE);
            }
            class_body(p);
            p.close(m, SyntaxKind::CLASS_DECL)
        }
        SyntaxKind::INTERFACE_KW => {
            p.advance();
            p.expect(SyntaxKind::IDENT);
            if p.at(SyntaxKind::LT) {
                type_params(p);
            }
            if p.at(SyntaxKind::EXTENDS_KW) {
                clause(p, SyntaxKind::EXTENDS_CLAUSE);
            }
            class_body(p);
            p.close(m, SyntaxKind::INTERFACE_DECL)
        }
        SyntaxKind::ENUM_KW => {
            p.advance();
            p.expect(SyntaxKind::IDENT);
            if p.at(SyntaxKind::IMPLEMENTS_KW) {
                clause(p, SyntaxKind::IMPLEMENTS_CLAUSE);
            }
            enum_body(p);
            p.close(m, SyntaxKind::ENUM_DECL)
        }
        _ => {
            p.expect(SyntaxKind::AT);
            p.expect(SyntaxKind::INTERFACE_KW);
            p.expect(SyntaxKind::IDENT);
            class_body(p);
            p.close(m, SyntaxKind::ANNOTATION_TYPE_DECL)
        }
    }
}

/// `extends A, B` / `implements A, B` / `throws A, B`
fn clause(p: &mut Parser, kind: SyntaxKind) {
    let m = p.open();
    p.advance();
    type_list(p);
    p.close(m, kind);
}

/// `{ member* }`
pub(crate) fn class_body(p: &mut Parser) {
    let m = p.open();
    let open_span = p.current_span();
    if !p.expect(SyntaxKind::L_BRACE) {
        p.close(m, SyntaxKind::CLASS_BODY);
        return;
    }
    while !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
        member(p);
    }
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error_with_related("expected `}` to close class body", open_span, "class body started here");
    }
    p.close(m, SyntaxKind::CLASS_BODY);
}

/// `{ CONSTANT, CONSTANT(args) { body }; member* }`
fn enum_body(p: &mut Parser) {
    let m = p.open();
    if !p.expect(SyntaxKind::L_BRACE) {
        p.close(m, SyntaxKind::ENUM_BODY);
        return;
    }
    while p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::AT) {
        let constant = p.open();
        modifiers(p);
        p.expect(SyntaxKind::IDENT);
        if p.at(SyntaxKind::L_PAREN) {
            arg_list(p);
        }
        if p.at(SyntaxKind::L_BRACE) {
            class_body(p);
        }
        p.close(constant, SyntaxKind::ENUM_CONSTANT);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if p.eat(SyntaxKind::SEMICOLON) {
        while !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
            member(p);
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.close(m, SyntaxKind::ENUM_BODY);
}

/// One class body declaration. Always consumes at least one token unless
/// positioned at `}` or EOF.
pub(crate) fn member(p: &mut Parser) {
    if p.eat(SyntaxKind::SEMICOLON) {
        return;
    }
    let mods = modifiers(p);
    match p.current() {
        _ if at_type_decl_start(p) => {
            type_decl(p, mods);
        }
        SyntaxKind::L_BRACE => {
            let m = p.open_before(mods);
            block(p);
            p.close(m, SyntaxKind::INITIALIZER);
        }
        SyntaxKind::LT => {
            let m = p.open_before(mods);
            type_params(p);
            if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::L_PAREN {
                constructor_rest(p, m);
            } else {
                result_type(p);
                method_rest(p, m);
            }
        }
        SyntaxKind::IDENT if p.nth(1) == SyntaxKind::L_PAREN => {
            let m = p.open_before(mods);
            constructor_rest(p, m);
        }
        SyntaxKind::VOID_KW => {
            let m = p.open_before(mods);
            result_type(p);
            method_rest(p, m);
        }
        _ if scan_type(p, 0).is_some() => {
            let m = p.open_before(mods);
            type_(p);
            if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::L_PAREN {
                method_rest(p, m);
            } else {
                variable_declarators(p);
                p.expect(SyntaxKind::SEMICOLON);
                p.close(m, SyntaxKind::FIELD_DECL);
            }
        }
        _ => {
            let m = p.open_before(mods);
            p.error("expected member declaration");
            p.advance();
            p.close(m, SyntaxKind::ERROR_NODE);
        }
    }
}

/// `Name(params) throws X { ... }`
fn constructor_rest(p: &mut Parser, m: MarkOpened) {
    p.advance(); // name
    param_list(p);
    if p.at(SyntaxKind::THROWS_KW) {
        clause(p, SyntaxKind::THROWS_CLAUSE);
    }
    block(p);
    p.close(m, SyntaxKind::CONSTRUCTOR_DECL);
}

/// `name(params) [] throws X [default v] { ... }` or `...;`
fn method_rest(p: &mut Parser, m: MarkOpened) {
    p.expect(SyntaxKind::IDENT);
    param_list(p);
    dims(p);
    if p.at(SyntaxKind::THROWS_KW) {
        clause(p, SyntaxKind::THROWS_CLAUSE);
    }
    if p.eat(SyntaxKind::DEFAULT_KW) {
        // Annotation element default value.
        if p.at(SyntaxKind::AT) {
            annotation(p);
        } else {
            variable_initializer(p);
        }
    }
    if p.at(SyntaxKind::L_BRACE) {
        block(p);
    } else {
        p.expect(SyntaxKind::SEMICOLON);
    }
    p.close(m, SyntaxKind::METHOD_DECL);
}

/// `(final int a, String... rest)`
pub(crate) fn param_list(p: &mut Parser) {
    let m = p.open();
    if !p.expect(SyntaxKind::L_PAREN) {
        p.close(m, SyntaxKind::PARAM_LIST);
        return;
    }
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            formal_param(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::R_PAREN);
    p.close(m, SyntaxKind::PARAM_LIST);
}

pub(crate) fn formal_param(p: &mut Parser) {
    let m = p.open();
    modifiers(p);
    type_(p);
    p.eat(SyntaxKind::ELLIPSIS);
    if !p.eat(SyntaxKind::THIS_KW) {
        p.expect(SyntaxKind::IDENT);
    }
    dims(p);
    p.close(m, SyntaxKind::FORMAL_PARAM);
}

/// Trailing `[]` pairs, e.g. `int a[]`.
pub(crate) fn dims(p: &mut Parser) {
    if !(p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET) {
        return;
    }
    let m = p.open();
    while p.at(SyntaxKind::L_BRACKET) && p.nth(1) == SyntaxKind::R_BRACKET {
        p.advance_n(2);
    }
    p.close(m, SyntaxKind::DIMS);
}

/// `a = 1, b[], c = { 1, 2 }`
pub(crate) fn variable_declarators(p: &mut Parser) {
    loop {
        variable_declarator(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
}

pub(crate) fn variable_declarator(p: &mut Parser) {
    let m = p.open();
    p.expect(SyntaxKind::IDENT);
    dims(p);
    if p.eat(SyntaxKind::EQ) {
        variable_initializer(p);
    }
    p.close(m, SyntaxKind::VARIABLE_DECLARATOR);
}
