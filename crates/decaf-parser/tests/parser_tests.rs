//! Parser integration tests. Tree shapes are checked with inline insta
//! snapshots of `debug_tree`; the rest assert on node kinds directly.

use decaf_parser::{debug_tree, parse, EntryPoint, Parse, SyntaxKind, SyntaxNode};
use insta::assert_snapshot;

fn parse_and_debug(source: &str, entry: EntryPoint) -> String {
    let parse = parse(source, entry);
    let tree = debug_tree(&parse.syntax());
    if parse.errors().is_empty() {
        return tree;
    }
    let errors = parse
        .errors()
        .iter()
        .map(|e| format!("  - {} @{}..{}", e.message, e.span.start, e.span.end))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{tree}errors:\n{errors}")
}

/// Kind of the first child node of the root.
fn first_kind(parse: &Parse) -> SyntaxKind {
    parse
        .syntax()
        .first_child()
        .map_or(SyntaxKind::TOMBSTONE, |n| n.kind())
}

fn find(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    root.descendants().filter(|n| n.kind() == kind).collect()
}

// ── Expressions ────────────────────────────────────────────────────────

#[test]
fn binary_precedence() {
    assert_snapshot!(parse_and_debug("a+b*c", EntryPoint::Expression), @r#"
    EXPRESSION_SNIPPET@0..5
      BINARY_EXPR@0..5
        NAME_EXPR@0..1
          IDENT "a"
        PLUS "+"
        BINARY_EXPR@2..5
          NAME_EXPR@2..3
            IDENT "b"
          STAR "*"
          NAME_EXPR@4..5
            IDENT "c"
      EOF ""
    "#);
}

#[test]
fn bare_primitive_type_is_an_error_in_expression_position() {
    assert_snapshot!(parse_and_debug("boolean", EntryPoint::Expression), @r#"
    EXPRESSION_SNIPPET@0..7
      PRIMITIVE_TYPE@0..7
        BOOLEAN_KW "boolean"
      EOF ""
    errors:
      - expected `.class` after type @7..7
    "#);
}

#[test]
fn glued_shift_operators() {
    let parse = parse("a >> b >>> c", EntryPoint::Expression);
    assert!(parse.ok(), "{:?}", parse.errors());
    let binaries = find(&parse.syntax(), SyntaxKind::BINARY_EXPR);
    assert_eq!(binaries.len(), 2);

    // `> >` with a space is two comparisons, which Java rejects.
    let split = decaf_parser::parse("a > > b", EntryPoint::Expression);
    assert!(!split.ok());
}

#[test]
fn cast_versus_parenthesized() {
    let cases = [
        ("(String) o", SyntaxKind::CAST_EXPR),
        ("(int) -x", SyntaxKind::CAST_EXPR),
        ("(a) + b", SyntaxKind::BINARY_EXPR),
        ("(a)", SyntaxKind::PAREN_EXPR),
        ("(a, b) -> a", SyntaxKind::LAMBDA_EXPR),
        ("x -> x * 2", SyntaxKind::LAMBDA_EXPR),
        ("(String s) -> { return s; }", SyntaxKind::LAMBDA_EXPR),
    ];
    for (source, expected) in cases {
        let parse = parse(source, EntryPoint::Expression);
        assert!(parse.ok(), "{source}: {:?}", parse.errors());
        assert_eq!(first_kind(&parse), expected, "{source}");
    }
}

#[test]
fn postfix_chains() {
    let cases = [
        ("Foo.<String>getBar()", SyntaxKind::METHOD_CALL),
        ("a.b.c", SyntaxKind::FIELD_ACCESS),
        ("xs[i + 1]", SyntaxKind::INDEX_EXPR),
        ("String[].class", SyntaxKind::CLASS_LITERAL),
        ("int.class", SyntaxKind::CLASS_LITERAL),
        ("String::valueOf", SyntaxKind::METHOD_REF),
        ("i++", SyntaxKind::POSTFIX_EXPR),
        ("x instanceof List<?>", SyntaxKind::INSTANCEOF_EXPR),
        ("c ? a : b", SyntaxKind::CONDITIONAL_EXPR),
        ("x >>>= 2", SyntaxKind::ASSIGN_EXPR),
    ];
    for (source, expected) in cases {
        let parse = parse(source, EntryPoint::Expression);
        assert!(parse.ok(), "{source}: {:?}", parse.errors());
        assert_eq!(first_kind(&parse), expected, "{source}");
    }
}

#[test]
fn object_and_array_creation() {
    let parse = parse("new int[] { 1, 2 }", EntryPoint::Expression);
    assert!(parse.ok(), "{:?}", parse.errors());
    assert_eq!(first_kind(&parse), SyntaxKind::ARRAY_CREATION);

    let parse = decaf_parser::parse("new Runnable() { public void run() { } }", EntryPoint::Expression);
    assert!(parse.ok(), "{:?}", parse.errors());
    assert_eq!(first_kind(&parse), SyntaxKind::CLASS_INSTANCE_CREATION);
    assert_eq!(find(&parse.syntax(), SyntaxKind::METHOD_DECL).len(), 1);
}

#[test]
fn trailing_tokens_after_expression() {
    let parse = parse("a b", EntryPoint::Expression);
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].message, "unexpected tokens after expression");
    assert_eq!(find(&parse.syntax(), SyntaxKind::ERROR_NODE).len(), 1);
}

// ── Statements ─────────────────────────────────────────────────────────

#[test]
fn local_variable_declaration() {
    assert_snapshot!(parse_and_debug("int x=1;", EntryPoint::MethodBody), @r#"
    BLOCK_STATEMENTS@0..8
      LOCAL_VAR_DECL_STMT@0..8
        LOCAL_VAR_DECL@0..7
          MODIFIER_LIST@0..0
          PRIMITIVE_TYPE@0..3
            INT_KW "int"
          VARIABLE_DECLARATOR@3..7
            IDENT "x"
            EQ "="
            LITERAL@6..7
              INT_LITERAL "1"
        SEMICOLON ";"
      EOF ""
    "#);
}

#[test]
fn nested_generics_close_with_shift_token() {
    let parse = parse("List<List<String>> xs = new ArrayList<>();", EntryPoint::MethodBody);
    assert!(parse.ok(), "{:?}", parse.errors());
    assert_eq!(first_kind(&parse), SyntaxKind::LOCAL_VAR_DECL_STMT);
}

#[test]
fn statement_kinds() {
    let source = "\
if (a) b(); else { c(); }
while (x) x--;
do { } while (y);
for (int i = 0; i < n; i++) { }
for (String s : names) { }
switch (k) { case 1: case 2: f(); break; default: g(); }
try (Reader r = open()) { } catch (IOException | RuntimeException e) { } finally { }
synchronized (lock) { }
outer: for (;;) { break outer; }
assert x != null : \"x\";
throw new Error();
return;
";
    let parse = parse(source, EntryPoint::MethodBody);
    assert!(parse.ok(), "{:?}", parse.errors());
    let kinds: Vec<SyntaxKind> = parse.syntax().children().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        [
            SyntaxKind::IF_STMT,
            SyntaxKind::WHILE_STMT,
            SyntaxKind::DO_STMT,
            SyntaxKind::FOR_STMT,
            SyntaxKind::FOREACH_STMT,
            SyntaxKind::SWITCH_STMT,
            SyntaxKind::TRY_STMT,
            SyntaxKind::SYNCHRONIZED_STMT,
            SyntaxKind::LABELED_STMT,
            SyntaxKind::ASSERT_STMT,
            SyntaxKind::THROW_STMT,
            SyntaxKind::RETURN_STMT,
        ]
    );
}

#[test]
fn switch_labels_share_a_group() {
    let parse = parse(
        "switch (k) { case 1: case 2: f(); default: g(); }",
        EntryPoint::MethodBody,
    );
    assert!(parse.ok(), "{:?}", parse.errors());
    let groups = find(&parse.syntax(), SyntaxKind::SWITCH_GROUP);
    assert_eq!(groups.len(), 2);
    let labels: Vec<usize> = groups
        .iter()
        .map(|g| g.children().filter(|n| n.kind() == SyntaxKind::SWITCH_LABEL).count())
        .collect();
    assert_eq!(labels, [2, 1]);
}

#[test]
fn local_class_inside_method_body() {
    let parse = parse("class Local { } Local l = new Local();", EntryPoint::MethodBody);
    assert!(parse.ok(), "{:?}", parse.errors());
    assert_eq!(first_kind(&parse), SyntaxKind::CLASS_DECL);
}

// ── Declarations ───────────────────────────────────────────────────────

#[test]
fn compilation_unit_shape() {
    let source = "\
package com.example;

import java.util.List;
import static java.lang.Math.*;

@Deprecated
public final class Foo<T extends Comparable<T>> extends Bar implements Baz, Qux {
    private static final int MAX = 10;
    public Foo(int x) throws Exception { super(x); }
    @Override
    public <U> List<U> map(final Function<T, U> f, String... rest) { return null; }
    static { }
    enum Color { RED, GREEN(1) { }; int v; }
    interface Inner { void run(); }
}
";
    let parse = parse(source, EntryPoint::CompilationUnit);
    assert!(parse.ok(), "{:?}", parse.errors());
    let root = parse.syntax();
    let top: Vec<SyntaxKind> = root.children().map(|n| n.kind()).collect();
    assert_eq!(
        top,
        [
            SyntaxKind::PACKAGE_DECL,
            SyntaxKind::IMPORT_DECL,
            SyntaxKind::IMPORT_DECL,
            SyntaxKind::CLASS_DECL,
        ]
    );
    for (kind, count) in [
        (SyntaxKind::FIELD_DECL, 2),
        (SyntaxKind::CONSTRUCTOR_DECL, 1),
        (SyntaxKind::METHOD_DECL, 2),
        (SyntaxKind::INITIALIZER, 1),
        (SyntaxKind::ENUM_CONSTANT, 2),
        (SyntaxKind::INTERFACE_DECL, 1),
        (SyntaxKind::TYPE_PARAMS, 2),
        (SyntaxKind::THROWS_CLAUSE, 1),
    ] {
        assert_eq!(find(&root, kind).len(), count, "{kind:?}");
    }
}

#[test]
fn annotated_package() {
    let parse = parse("@Generated(\"x\") package a.b;", EntryPoint::CompilationUnit);
    assert!(parse.ok(), "{:?}", parse.errors());
    assert_eq!(first_kind(&parse), SyntaxKind::PACKAGE_DECL);
}

#[test]
fn class_body_members_without_class() {
    let parse = parse(
        "int x;\npublic String getName() { return name; }\n",
        EntryPoint::ClassBody,
    );
    assert!(parse.ok(), "{:?}", parse.errors());
    let kinds: Vec<SyntaxKind> = parse.syntax().children().map(|n| n.kind()).collect();
    assert_eq!(kinds, [SyntaxKind::FIELD_DECL, SyntaxKind::METHOD_DECL]);
}

// ── Recovery ───────────────────────────────────────────────────────────

#[test]
fn recovery_keeps_parsing_after_errors() {
    let source = "class C { int x = ; void f() { } }";
    let parse = parse(source, EntryPoint::CompilationUnit);
    assert!(!parse.ok());
    assert_eq!(parse.syntax().text().to_string(), source);
    assert_eq!(find(&parse.syntax(), SyntaxKind::METHOD_DECL).len(), 1);
}

#[test]
fn unclosed_class_body_points_at_its_start() {
    let parse = parse("class C {\n  int x;\n", EntryPoint::CompilationUnit);
    let error = parse
        .errors()
        .iter()
        .find(|e| e.message == "expected `}` to close class body")
        .expect("missing close brace error");
    let related = error.related.as_ref().expect("related span");
    assert_eq!(related.1.start, 8);
}

#[test]
fn fragments_fit_their_entry_points_best() {
    let statements = "int x = 1; x++;";
    let body = parse(statements, EntryPoint::MethodBody);
    let unit = parse(statements, EntryPoint::CompilationUnit);
    assert!(body.ok());
    assert!(unit.errors().len() > body.errors().len());
}
