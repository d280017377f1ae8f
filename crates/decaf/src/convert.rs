//! Java to C# name and type conversion.
//!
//! Pure functions over identifier text. Nothing here looks at the tree.

use std::borrow::Cow;

/// Lower-case words whose C# form is not a plain capitalization.
const IRREGULAR: &[(&str, &str)] = &[("io", "IO"), ("os", "OS")];

/// C# reserved keywords. Contextual keywords are usable as identifiers and
/// are not listed.
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Prefix `name` with `@` if it is a C# keyword.
pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if CSHARP_KEYWORDS.contains(&name) {
        Cow::Owned(format!("@{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Capitalize the first letter, consulting the irregular table first.
fn pascal_case(name: &str) -> String {
    if let Some(&(_, csharp)) = IRREGULAR.iter().find(|(java, _)| *java == name) {
        return csharp.to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// camelCase → PascalCase, escaped if the result is a C# keyword.
pub fn convert_identifier(name: &str) -> String {
    let converted = pascal_case(name);
    escape_identifier(&converted).into_owned()
}

/// `getName` → `GetName`.
pub fn convert_method_name(name: &str) -> String {
    convert_identifier(name)
}

/// `com.example.io` → `Com.Example.IO`.
pub fn convert_package_name(name: &str) -> String {
    name.split('.')
        .map(convert_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// C# built-in for a Java primitive or common boxed type.
pub fn try_convert_special_type(name: &str) -> Option<&'static str> {
    let csharp = match name {
        "boolean" | "Boolean" => "bool",
        "byte" | "Byte" => "byte",
        "char" | "Character" => "char",
        "double" | "Double" => "double",
        "float" | "Float" => "float",
        "int" | "Integer" => "int",
        "long" | "Long" => "long",
        "short" | "Short" => "short",
        "Object" => "object",
        "String" => "string",
        _ => return None,
    };
    Some(csharp)
}

/// A built-in when one exists, otherwise the package-qualified conversion.
pub fn convert_type_name(name: &str) -> String {
    match try_convert_special_type(name) {
        Some(csharp) => csharp.to_string(),
        None => convert_package_name(name),
    }
}

/// Property name for an accessor call such as `getName()`, if the call has
/// the accessor shape: `prefix` plus a non-empty suffix, `arity` arguments
/// and no explicit type arguments.
fn accessor_property(
    prefix: &str,
    arity: usize,
    name: &str,
    arg_count: usize,
    has_type_args: bool,
) -> Option<String> {
    if name.len() <= prefix.len() || arg_count != arity || has_type_args {
        return None;
    }
    let head = name.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    Some(convert_identifier(&name[prefix.len()..]))
}

/// `getCurrentItem()` → `CurrentItem`.
pub fn getter_property(name: &str, arg_count: usize, has_type_args: bool) -> Option<String> {
    accessor_property("get", 0, name, arg_count, has_type_args)
}

/// `setCurrentItem(v)` → `CurrentItem`.
pub fn setter_property(name: &str, arg_count: usize, has_type_args: bool) -> Option<String> {
    accessor_property("set", 1, name, arg_count, has_type_args)
}
