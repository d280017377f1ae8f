//! Final assembly of the raw translation into a C# file.
//!
//! The translator produces method, class or file bodies with their original
//! layout. The back end adds what only the whole file knows: `using`
//! directives, the namespace block and the lifted anonymous classes.

use decaf_parser::EntryPoint;

use crate::error::BackendError;
use crate::global::{GlobalState, LiftedClass};
use crate::options::IndentationStyle;

/// Everything a back end gets to see.
#[derive(Debug, Clone, Copy)]
pub struct BackendRequest<'a> {
    pub raw: &'a str,
    pub entry_point: EntryPoint,
    pub globals: &'a GlobalState,
    pub indentation_style: IndentationStyle,
    pub spaces_per_indent: usize,
}

pub trait CSharpBackend {
    fn assemble(&self, request: &BackendRequest<'_>) -> Result<String, BackendError>;
}

/// Plain text assembly with no C# parser behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBackend;

impl CSharpBackend for TextBackend {
    fn assemble(&self, request: &BackendRequest<'_>) -> Result<String, BackendError> {
        if let Some(line) = find_using_directive(request.raw) {
            return Err(BackendError::UsingsAlreadyPresent { line });
        }
        if request.entry_point == EntryPoint::Expression {
            return Ok(request.raw.to_string());
        }

        let globals = request.globals;
        let unit = indent_unit(request.indentation_style, request.spaces_per_indent);

        let mut body = request.raw.trim_end().to_string();
        for class in globals.lifted_classes() {
            if !body.is_empty() {
                body.push_str("\n\n");
            }
            body.push_str(&lifted_class_text(class));
        }

        if !globals.namespace().is_empty() {
            let indented: Vec<String> = body
                .lines()
                .map(|line| {
                    if line.trim().is_empty() {
                        String::new()
                    } else {
                        format!("{unit}{line}")
                    }
                })
                .collect();
            body = format!(
                "namespace {}\n{{\n{}\n}}",
                globals.namespace(),
                indented.join("\n")
            );
        }

        let mut header = String::new();
        for using in globals.usings() {
            header.push_str(&format!("using {using};\n"));
        }
        for using in globals.using_statics() {
            header.push_str(&format!("using static {using};\n"));
        }
        let file = if header.is_empty() {
            body
        } else {
            format!("{header}\n{}", body.trim_start_matches('\n'))
        };

        let output = file
            .lines()
            .map(|line| reindent(line, request.indentation_style, request.spaces_per_indent))
            .map(|line| line.trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        tracing::debug!(
            target: "decaf::backend",
            entry = ?request.entry_point,
            namespace = globals.namespace(),
            lifted = globals.lifted_classes().len(),
            "assembled"
        );
        Ok(output)
    }
}

/// 1-based line of the first top-level `using` directive in `raw`.
/// Text inside comments does not count.
fn find_using_directive(raw: &str) -> Option<usize> {
    let mut in_comment = false;
    for (index, line) in raw.lines().enumerate() {
        let code = strip_comments(line, &mut in_comment);
        let code = code.trim();
        if code.starts_with("using ") && code.ends_with(';') && !code.contains('(') {
            return Some(index + 1);
        }
    }
    None
}

/// `line` with its comments blanked out. `in_comment` carries an unclosed
/// `/*` over to the next line.
fn strip_comments(line: &str, in_comment: &mut bool) -> String {
    let mut code = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if *in_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_comment = false;
                code.push(' ');
            }
            continue;
        }
        if let Some(open) = quote {
            code.push(c);
            if c == '\\' {
                code.extend(chars.next());
            } else if c == open {
                quote = None;
            }
            continue;
        }
        match (c, chars.peek().copied()) {
            ('/', Some('/')) => break,
            ('/', Some('*')) => {
                chars.next();
                *in_comment = true;
            }
            ('"' | '\'', _) => {
                quote = Some(c);
                code.push(c);
            }
            _ => code.push(c),
        }
    }
    code
}

fn indent_unit(style: IndentationStyle, spaces: usize) -> String {
    match style {
        IndentationStyle::Tabs => "\t".to_string(),
        IndentationStyle::Spaces | IndentationStyle::Preserve => " ".repeat(spaces),
    }
}

/// Rewrites the leading whitespace of `line` in the requested style.
fn reindent(line: &str, style: IndentationStyle, spaces: usize) -> String {
    let rest = line.trim_start_matches([' ', '\t']);
    let leading = &line[..line.len() - rest.len()];
    let indent = match style {
        IndentationStyle::Preserve => return line.to_string(),
        IndentationStyle::Spaces => leading.replace('\t', &" ".repeat(spaces)),
        IndentationStyle::Tabs => leading.replace(&" ".repeat(spaces), "\t"),
    };
    format!("{indent}{rest}")
}

fn lifted_class_text(class: &LiftedClass) -> String {
    let mut text = class.modifiers.join(" ");
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str("class ");
    text.push_str(&class.name);
    if !class.base_types.is_empty() {
        text.push_str(" : ");
        text.push_str(&class.base_types.join(", "));
    }
    text.push(' ');
    text.push_str(&dedent_body(&class.body));
    text
}

/// Shifts a body cut out of a nested position back to column zero. The
/// closing brace's indentation is taken as the body's base indentation.
fn dedent_body(body: &str) -> String {
    let Some(last) = body.lines().last() else {
        return String::new();
    };
    let base = &last[..last.len() - last.trim_start().len()];
    body.lines()
        .enumerate()
        .map(|(i, line)| match line.strip_prefix(base) {
            Some(stripped) if i > 0 => stripped,
            _ => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
