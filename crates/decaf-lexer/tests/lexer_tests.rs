use decaf_lexer::Lexer;
use insta::assert_snapshot;

/// One token per line: `Kind@start..end "text"`, trivia included.
fn dump(source: &str) -> String {
    Lexer::tokenize(source)
        .into_iter()
        .map(|tok| {
            format!(
                "{:?}@{}..{} {:?}",
                tok.kind,
                tok.span.start,
                tok.span.end,
                tok.span.text(source)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn generic_method_call() {
    assert_snapshot!(dump("Foo.<String>bar()"), @r#"
    Ident@0..3 "Foo"
    Dot@3..4 "."
    Lt@4..5 "<"
    Ident@5..11 "String"
    Gt@11..12 ">"
    Ident@12..15 "bar"
    LParen@15..16 "("
    RParen@16..17 ")"
    Eof@17..17 ""
    "#);
}

#[test]
fn annotation_and_lambda() {
    assert_snapshot!(dump("@Override x -> x::y"), @r#"
    At@0..1 "@"
    Ident@1..9 "Override"
    Whitespace@9..10 " "
    Ident@10..11 "x"
    Whitespace@11..12 " "
    Arrow@12..14 "->"
    Whitespace@14..15 " "
    Ident@15..16 "x"
    ColonColon@16..18 "::"
    Ident@18..19 "y"
    Eof@19..19 ""
    "#);
}

#[test]
fn varargs_and_compound_assignment() {
    assert_snapshot!(dump("a... b<<=c"), @r#"
    Ident@0..1 "a"
    Ellipsis@1..4 "..."
    Whitespace@4..5 " "
    Ident@5..6 "b"
    ShlEq@6..9 "<<="
    Ident@9..10 "c"
    Eof@10..10 ""
    "#);
}

#[test]
fn doc_comment_before_class() {
    assert_snapshot!(dump("/** Doc */\nclass"), @r#"
    BlockComment@0..10 "/** Doc */"
    Whitespace@10..11 "\n"
    Class@11..16 "class"
    Eof@16..16 ""
    "#);
}
