//! End-to-end translation tests. Short fragments compare the raw translator
//! output; whole files go through the bundled back end.

use decaf::{
    translate, translate_raw, translate_with, BackendError, BackendRequest, CSharpBackend,
    IndentationStyle, LanguageVersion, ParseAs, TranslateError, TranslateOptions,
};
use insta::assert_snapshot;

fn raw(java: &str) -> String {
    translate_raw(java, &TranslateOptions::default()).unwrap().text
}

fn raw_as(java: &str, parse_as: ParseAs) -> String {
    let options = TranslateOptions {
        parse_as,
        ..TranslateOptions::default()
    };
    translate_raw(java, &options).unwrap().text
}

fn full(java: &str) -> String {
    translate(java, &TranslateOptions::default()).unwrap()
}

// ── Seed fragments ─────────────────────────────────────────────────────

#[test]
fn keywords_and_simple_declarations() {
    assert_eq!(raw("boolean"), "bool");
    assert_eq!(raw("byte"), "byte");
    assert_eq!(raw("int"), "int");
    assert_eq!(raw("long"), "long");
    assert_eq!(raw("short"), "short");
    assert_eq!(raw("break;"), "break;");
    assert_eq!(raw("public abstract class C { }"), "public abstract class C { }");
    assert_eq!(raw("class C extends B { }"), "class C : B { }");
    assert_eq!(raw("class C implements I { }"), "class C : I { }");
}

#[test]
fn assert_becomes_debug_assert() {
    assert_eq!(raw("assert foo != null;"), "Debug.Assert(foo != null);");
    assert_eq!(
        raw("assert x > 0 : \"negative\";"),
        "Debug.Assert(x > 0, \"negative\");"
    );
}

#[test]
fn assert_registers_diagnostics_using() {
    let out = translate_raw("assert ok;", &TranslateOptions::default()).unwrap();
    assert_eq!(out.globals.usings().collect::<Vec<_>>(), ["System.Diagnostics"]);
}

#[test]
fn accessor_calls_become_properties() {
    assert_eq!(raw("this.getCurrentItem()"), "this.CurrentItem");
    assert_eq!(raw("this.setCurrentItem(value)"), "this.CurrentItem = value");
    assert_eq!(raw("this.get()"), "this.Get()");
    assert_eq!(raw("this.set(value)"), "this.Set(value)");
}

#[test]
fn accessor_shape_is_required() {
    assert_eq!(raw("a.getFoo(1)"), "a.GetFoo(1)");
    assert_eq!(raw("a.setFoo(1, 2)"), "a.SetFoo(1, 2)");
    assert_eq!(raw("a.<T>getFoo()"), "a.GetFoo<T>()");
}

#[test]
fn accessor_rewrites_keep_argument_comments() {
    assert_eq!(raw("a.setX(/* c */ v /* d */)"), "a.X = /* c */ v/* d */");
    assert_eq!(raw("a.getX(/* c */)"), "a.X/* c */");
    assert_eq!(raw("a.setX(v // keep\n)"), "a.X = v// keep\n");
}

#[test]
fn explicit_type_arguments_follow_the_name() {
    assert_eq!(raw("Foo.<String>getBar()"), "Foo.GetBar<string>()");
    assert_eq!(raw("Foo.<String, Object>bar()"), "Foo.Bar<string, object>()");
}

// ── Switch ─────────────────────────────────────────────────────────────

#[test]
fn switch_fallthrough_gets_explicit_jumps() {
    let java = "
switch (foo) {
    case 1:
        bar();
    case 2:
        baz();
    default:
        bag();
}";
    assert_eq!(
        raw(java),
        "
switch (foo) {
    case 1:
        Bar();
        goto case 2;
    case 2:
        Baz();
        goto default;
    default:
        Bag();
        break;
}"
    );
}

#[test]
fn switch_groups_ending_in_break_or_return_are_left_alone() {
    let java = "switch (x) {
    case 1:
        return a;
    case 2:
        b();
        break;
    default:
}";
    assert_snapshot!(raw(java), @r"
    switch (x) {
        case 1:
            return a;
        case 2:
            B();
            break;
        default: break;
    }
    ");
}

#[test]
fn switch_on_one_line() {
    assert_eq!(
        raw("switch (x) { case 1: a(); case 2: b(); }"),
        "switch (x) { case 1: A(); goto case 2; case 2: B(); break; }"
    );
}

#[test]
fn switch_without_fallthrough_needs_no_jumps() {
    assert_eq!(raw("switch (x) { }"), "switch (x) { }");
    assert_eq!(
        raw("switch (x) { default: a(); }"),
        "switch (x) { default: A(); break; }"
    );
    assert_eq!(
        raw("switch (x) { case 1: return; }"),
        "switch (x) { case 1: return; }"
    );
}

// ── Declarations ───────────────────────────────────────────────────────

#[test]
fn base_lists() {
    assert_eq!(
        raw("class C extends B implements I, J { }"),
        "class C : B, I, J { }"
    );
    assert_eq!(raw("interface A extends B, C { }"), "interface A : B, C { }");
}

#[test]
fn override_annotation_becomes_modifier() {
    let java = "@Override\npublic String toString() {\n    return name;\n}";
    assert_eq!(
        raw_as(java, ParseAs::ClassBody),
        "public override string ToString() {\n    return name;\n}"
    );
}

#[test]
fn other_annotations_are_erased() {
    assert_eq!(
        raw_as("@Deprecated void f() { }", ParseAs::ClassBody),
        "void F() { }"
    );
}

#[test]
fn method_type_parameters_move_after_the_name() {
    assert_eq!(
        raw_as(
            "public <T extends Comparable<T>> T max(T a, T b) { return a; }",
            ParseAs::ClassBody
        ),
        "public T Max<T>(T a, T b) where T : Comparable<T> { return a; }"
    );
    assert_eq!(
        raw_as("<K, V> void put(K k, V v);", ParseAs::ClassBody),
        "void Put<K, V>(K k, V v);"
    );
}

#[test]
fn class_type_parameter_bounds_become_constraints() {
    assert_eq!(
        raw("class Box<T extends Number> { }"),
        "class Box<T> where T : Number { }"
    );
}

#[test]
fn throws_clauses_are_erased() {
    assert_eq!(
        raw_as("void f() throws IOException { }", ParseAs::ClassBody),
        "void F() { }"
    );
}

#[test]
fn final_depends_on_context() {
    assert_eq!(raw_as("final int x = 1;", ParseAs::MethodBody), "readonly int x = 1;");
    assert_eq!(
        raw_as("private final int x = 1;", ParseAs::ClassBody),
        "private int x = 1;"
    );
    assert_eq!(
        raw_as("void f(final int x) { }", ParseAs::ClassBody),
        "void F(in int x) { }"
    );
    assert_eq!(raw("final class C { }"), "sealed class C { }");
}

#[test]
fn final_parameters_before_in_support_are_erased() {
    let options = TranslateOptions {
        parse_as: ParseAs::ClassBody,
        csharp_language_version: LanguageVersion::new(7, 1),
        ..TranslateOptions::default()
    };
    let out = translate_raw("void f(final int x) { }", &options).unwrap();
    assert_eq!(out.text, "void F(int x) { }");
}

#[test]
fn member_modifiers_without_csharp_counterpart() {
    assert_eq!(
        raw_as("private transient int cache;", ParseAs::ClassBody),
        "private int cache;"
    );
    assert_eq!(
        raw_as("public synchronized void run() { }", ParseAs::ClassBody),
        "public void Run() { }"
    );
    assert_eq!(
        raw_as("static class Inner { }", ParseAs::ClassBody),
        "class Inner { }"
    );
}

#[test]
fn static_initializer_becomes_static_constructor() {
    let java = "class Registry {\n    static {\n        load();\n    }\n}";
    assert_eq!(
        raw_as(java, ParseAs::CompilationUnit),
        "class Registry {\n    static Registry() {\n        Load();\n    }\n}"
    );
}

#[test]
fn wildcards() {
    assert_eq!(
        raw_as("private List<? extends Number> xs;", ParseAs::ClassBody),
        "private List<Number> xs;"
    );
    assert_eq!(
        raw_as("private Map<String, ?> m;", ParseAs::ClassBody),
        "private Map<string, object> m;"
    );
}

#[test]
fn qualified_type_names_are_pascal_cased() {
    let java = "java.util.List a;
java.io.File b;
Integer c;
java.util.Map<String, Long> d;
java./* x */util.Set e;";
    assert_eq!(
        raw_as(java, ParseAs::ClassBody),
        "Java.Util.List a;
Java.IO.File b;
int c;
Java.Util.Map<string, long> d;
Java./* x */Util.Set e;"
    );
}

// ── Locals ─────────────────────────────────────────────────────────────

#[test]
fn locals_use_var_when_csharp_allows_it() {
    assert_eq!(
        raw_as("List<String> names = new ArrayList<String>();", ParseAs::MethodBody),
        "var names = new ArrayList<string>();"
    );
    assert_eq!(raw_as("int count = 0;", ParseAs::MethodBody), "int count = 0;");
    assert_eq!(raw_as("String s = \"x\";", ParseAs::MethodBody), "string s = \"x\";");
    assert_eq!(raw_as("Foo a = null;", ParseAs::MethodBody), "Foo a = null;");
    assert_eq!(raw_as("Foo a;", ParseAs::MethodBody), "Foo a;");
    assert_eq!(
        raw_as("Foo a, b = make();", ParseAs::MethodBody),
        "Foo a, b = Make();"
    );
    assert_eq!(
        raw_as("Runnable r = () -> go();", ParseAs::MethodBody),
        "Runnable r = () => Go();"
    );
}

#[test]
fn var_can_be_turned_off() {
    let options = TranslateOptions {
        parse_as: ParseAs::MethodBody,
        use_var_in_declarations: false,
        ..TranslateOptions::default()
    };
    let out = translate_raw("Foo foo = new Foo();", &options).unwrap();
    assert_eq!(out.text, "Foo foo = new Foo();");
    let out = translate_raw("for (Item item : items) { }", &options).unwrap();
    assert_eq!(out.text, "foreach (Item item in items) { }");
}

#[test]
fn enhanced_for_becomes_foreach() {
    assert_eq!(
        raw_as("for (Item item : items) { }", ParseAs::MethodBody),
        "foreach (var item in items) { }"
    );
    assert_eq!(
        raw_as("for (Item item:items) { }", ParseAs::MethodBody),
        "foreach (var item in items) { }"
    );
    assert_eq!(
        raw_as("for (int i : values) { }", ParseAs::MethodBody),
        "foreach (int i in values) { }"
    );
}

// ── Expressions ────────────────────────────────────────────────────────

#[test]
fn operators_and_keywords() {
    assert_eq!(raw("x -> x + 1"), "x => x + 1");
    assert_eq!(raw("a instanceof Foo"), "a is Foo");
    assert_eq!(raw("super.run()"), "base.Run()");
}

#[test]
fn reserved_identifiers_are_escaped() {
    assert_eq!(
        raw_as("int base = object;", ParseAs::MethodBody),
        "int @base = @object;"
    );
}

#[test]
fn method_references_and_class_literals() {
    assert_eq!(
        raw("names.stream().map(String::valueOf)"),
        "names.Stream().Map(String.ValueOf)"
    );
    assert_eq!(raw("Foo.class"), "typeof(Foo)");
    assert_eq!(raw("int.class"), "typeof(int)");
}

// ── Anonymous classes ──────────────────────────────────────────────────

#[test]
fn anonymous_class_is_lifted() {
    let java = "Runnable r = new Runnable() {\n    public void run() {\n    }\n};";
    let out = translate_raw(java, &TranslateOptions::default()).unwrap();
    assert_eq!(out.text, "var r = new AnonymousRunnable();");
    let lifted = out.globals.lifted_class("AnonymousRunnable").unwrap();
    assert_eq!(lifted.base_types, ["Runnable"]);
    assert_eq!(lifted.modifiers, ["internal"]);
    assert_eq!(lifted.body, "{\n    public void Run() {\n    }\n}");
}

#[test]
fn colliding_lifted_names_get_suffixes() {
    let java = "a(new Task() { });\nb(new Task() { });\nc(new Task() { });";
    let out = translate_raw(java, &TranslateOptions::default()).unwrap();
    assert_eq!(
        out.text,
        "A(new AnonymousTask());\nB(new AnonymousTask2());\nC(new AnonymousTask3());"
    );
    let names: Vec<_> = out
        .globals
        .lifted_classes()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, ["AnonymousTask", "AnonymousTask2", "AnonymousTask3"]);
}

#[test]
fn anonymous_class_name_format_is_configurable() {
    let options = TranslateOptions {
        anonymous_class_name_format: "{base}Impl".to_string(),
        ..TranslateOptions::default()
    };
    let out = translate_raw("new Comparator<String>() { }", &options).unwrap();
    assert_eq!(out.text, "new ComparatorImpl()");
    let lifted = out.globals.lifted_class("ComparatorImpl").unwrap();
    assert_eq!(lifted.base_types, ["Comparator<string>"]);
}

#[test]
fn instance_creation_without_body_is_unchanged() {
    assert_eq!(raw("new Foo(1, 2)"), "new Foo(1, 2)");
}

// ── Layout ─────────────────────────────────────────────────────────────

#[test]
fn trivia_survives_translation() {
    let java = "int /* a */ x = 1; // trailing\n\n\tfoo( 1 ,2 );\n";
    assert_eq!(
        raw_as(java, ParseAs::MethodBody),
        "int /* a */ x = 1; // trailing\n\n\tFoo( 1 ,2 );\n"
    );
}

#[test]
fn translation_is_deterministic() {
    let java = "class A { void f() { new Runnable() { public void run() { } }; } }";
    let options = TranslateOptions::default();
    let first = translate(java, &options).unwrap();
    let second = translate(java, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn syntax_errors_are_tolerated() {
    let out = translate_raw("class { int x = ; }", &TranslateOptions::default()).unwrap();
    assert!(!out.parse_errors.is_empty());
    assert_eq!(out.text, "class { int x = ; }");
}

// ── Whole files ────────────────────────────────────────────────────────

#[test]
fn compilation_unit_gets_namespace_and_usings() {
    let java = "package com.example.app;

import java.util.List;
import java.util.*;
import static java.lang.Math.max;

public class App {
    public static void main(String[] args) {
        assert args != null;
    }
}
";
    assert_snapshot!(full(java), @r"
    using Java.Util;
    using System.Diagnostics;
    using static Java.Lang.Math;

    namespace Com.Example.App
    {
        public class App {
            public static void Main(string[] args) {
                Debug.Assert(args != null);
            }
        }
    }
    ");
}

#[test]
fn lifted_classes_are_emitted_inside_the_namespace() {
    let java = "package app;

class Main {
    Runnable r = new Runnable() {
        public void run() { }
    };
}
";
    assert_snapshot!(full(java), @r"
    namespace App
    {
        class Main {
            Runnable r = new AnonymousRunnable();
        }

        internal class AnonymousRunnable : Runnable {
            public void Run() { }
        }
    }
    ");
}

#[test]
fn tabs_indentation_style() {
    let options = TranslateOptions {
        indentation_style: IndentationStyle::Tabs,
        ..TranslateOptions::default()
    };
    let out = translate("package a;\nclass B {\n    int c;\n}\n", &options).unwrap();
    assert_eq!(out, "namespace A\n{\n\tclass B {\n\t\tint c;\n\t}\n}");
}

#[test]
fn using_lines_in_comments_are_not_directives() {
    let java = "package a;\nclass C {\n    /*\n     using a cache;\n     */\n    int x; // using b;\n}\n";
    assert_eq!(
        full(java),
        "namespace A\n{\n    class C {\n        /*\n         using a cache;\n         */\n        int x; // using b;\n    }\n}"
    );
}

#[test]
fn expressions_skip_assembly() {
    assert_eq!(full("a.getB()"), "a.B");
}

// ── Back ends and options ──────────────────────────────────────────────

struct Shouting;

impl CSharpBackend for Shouting {
    fn assemble(&self, request: &BackendRequest<'_>) -> Result<String, BackendError> {
        Ok(request.raw.to_uppercase())
    }
}

struct Refusing;

impl CSharpBackend for Refusing {
    fn assemble(&self, _request: &BackendRequest<'_>) -> Result<String, BackendError> {
        Err(BackendError::UsingsAlreadyPresent { line: 7 })
    }
}

#[test]
fn custom_backend_is_used() {
    let out = translate_with("a.getB()", &TranslateOptions::default(), &Shouting).unwrap();
    assert_eq!(out, "A.B");
}

#[test]
fn backend_errors_are_propagated() {
    let err = translate_with("a", &TranslateOptions::default(), &Refusing).unwrap_err();
    assert!(matches!(
        err,
        TranslateError::Backend(BackendError::UsingsAlreadyPresent { line: 7 })
    ));
    assert_eq!(
        err.to_string(),
        "raw C# already contains a using directive at line 7"
    );
}

#[test]
fn options_from_toml_drive_translation() {
    let options = TranslateOptions::from_toml_str(
        r#"
parse-as = "method-body"
use-var-in-declarations = false
anonymous-class-name-format = "Lifted{base}"
"#,
    )
    .unwrap();
    let out = translate_raw("Task t = new Task() { };", &options).unwrap();
    assert_eq!(out.text, "Task t = new LiftedTask();");
}
