//! Decaf: formatting-preserving Java to C# translation.
//!
//! [`translate`] parses a Java fragment, rewrites it token by token into C#
//! and hands the result to a [`CSharpBackend`] for assembly into a file.
//! Java syntax errors never fail a call; the parser recovers and the
//! translator copies unparsable regions through unchanged.

pub mod backend;
pub mod convert;
pub mod error;
pub mod global;
mod mailbox;
pub mod options;
mod state;
mod translator;

use decaf_parser::{parse, EntryPoint, Parse, ParseError};
use serde::Serialize;
use tracing::instrument;

pub use backend::{BackendRequest, CSharpBackend, TextBackend};
pub use error::{BackendError, ConfigError, TranslateError};
pub use global::{GlobalState, LiftedClass};
pub use options::{
    CancellationToken, IndentationStyle, LanguageVersion, ParseAs, TranslateOptions,
};

use translator::Translator;

/// Entry points tried by [`ParseAs::Infer`], most specific first.
const INFERENCE_ORDER: [EntryPoint; 4] = [
    EntryPoint::Expression,
    EntryPoint::MethodBody,
    EntryPoint::ClassBody,
    EntryPoint::CompilationUnit,
];

/// Translator output before back-end assembly.
#[derive(Debug, Clone, Serialize)]
pub struct RawTranslation {
    /// C# text in the source's layout, without usings or namespace.
    pub text: String,
    pub entry_point: EntryPoint,
    pub globals: GlobalState,
    pub parse_errors: Vec<ParseError>,
}

/// Translate Java source to a C# file using the bundled [`TextBackend`].
pub fn translate(java: &str, options: &TranslateOptions) -> Result<String, TranslateError> {
    translate_with(java, options, &TextBackend)
}

/// Translate Java source and assemble it with `backend`.
pub fn translate_with(
    java: &str,
    options: &TranslateOptions,
    backend: &dyn CSharpBackend,
) -> Result<String, TranslateError> {
    let raw = translate_raw(java, options)?;
    let request = BackendRequest {
        raw: &raw.text,
        entry_point: raw.entry_point,
        globals: &raw.globals,
        indentation_style: options.indentation_style,
        spaces_per_indent: options.spaces_per_indent,
    };
    Ok(backend.assemble(&request)?)
}

/// Parse and translate without assembling.
#[instrument(target = "decaf::translate", skip(java, options), fields(len = java.len()))]
pub fn translate_raw(java: &str, options: &TranslateOptions) -> Result<RawTranslation, TranslateError> {
    options.validate()?;
    if options.is_cancelled() {
        return Err(TranslateError::Cancelled);
    }

    let parse = match options.parse_as.entry_point() {
        Some(entry) => parse(java, entry),
        None => infer_entry_point(java),
    };
    if options.is_cancelled() {
        return Err(TranslateError::Cancelled);
    }

    let (text, globals) = Translator::new(&parse, java, options).run();
    tracing::debug!(
        target: "decaf::translate",
        entry = ?parse.entry_point(),
        usings = globals.usings().count(),
        lifted = globals.lifted_classes().len(),
        "translated"
    );
    Ok(RawTranslation {
        text,
        entry_point: parse.entry_point(),
        globals,
        parse_errors: parse.errors().to_vec(),
    })
}

/// Parse with every entry point in [`INFERENCE_ORDER`] and keep the one
/// with the fewest errors. Ties go to the earlier entry point.
fn infer_entry_point(java: &str) -> Parse {
    let mut best: Option<Parse> = None;
    for entry in INFERENCE_ORDER {
        let candidate = parse(java, entry);
        tracing::debug!(
            target: "decaf::parser",
            ?entry,
            errors = candidate.errors().len(),
            "entry point candidate"
        );
        if candidate.ok() {
            best = Some(candidate);
            break;
        }
        let better = best
            .as_ref()
            .map_or(true, |best| candidate.errors().len() < best.errors().len());
        if better {
            best = Some(candidate);
        }
    }
    let best = match best {
        Some(best) => best,
        None => parse(java, EntryPoint::CompilationUnit),
    };
    tracing::debug!(target: "decaf::parser", entry = ?best.entry_point(), "inferred entry point");
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(java: &str) -> RawTranslation {
        translate_raw(java, &TranslateOptions::default()).unwrap()
    }

    #[test]
    fn inference_picks_the_fragment_kind() {
        assert_eq!(raw("a + b").entry_point, EntryPoint::Expression);
        assert_eq!(raw("int x = 1; x++;").entry_point, EntryPoint::MethodBody);
        assert_eq!(raw("private int x; void f() { }").entry_point, EntryPoint::ClassBody);
        assert_eq!(
            raw("package a; class C { }").entry_point,
            EntryPoint::CompilationUnit
        );
    }

    #[test]
    fn inference_keeps_errors_of_the_best_candidate() {
        let out = raw("int x = ;");
        assert_eq!(out.entry_point, EntryPoint::MethodBody);
        assert!(!out.parse_errors.is_empty());
        assert_eq!(out.text, "int x = ;");
    }

    #[test]
    fn explicit_entry_point_is_used() {
        let options = TranslateOptions {
            parse_as: ParseAs::MethodBody,
            ..TranslateOptions::default()
        };
        let out = translate_raw("a + b", &options).unwrap();
        assert_eq!(out.entry_point, EntryPoint::MethodBody);
        assert!(!out.parse_errors.is_empty());
    }

    #[test]
    fn cancelled_before_parsing() {
        let token = CancellationToken::new();
        token.cancel();
        let options = TranslateOptions {
            cancellation_token: Some(token),
            ..TranslateOptions::default()
        };
        assert!(matches!(
            translate("a + b", &options),
            Err(TranslateError::Cancelled)
        ));
    }

    #[test]
    fn invalid_options_are_reported() {
        let options = TranslateOptions {
            anonymous_class_name_format: "Anon".to_string(),
            ..TranslateOptions::default()
        };
        assert!(matches!(
            translate("a", &options),
            Err(TranslateError::InvalidOptions(ConfigError::MissingPlaceholder { .. }))
        ));
    }
}
