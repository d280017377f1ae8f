//! Translation options and their TOML configuration layer.
//!
//! Every option has a default, so an empty options file is valid:
//!
//! ```toml
//! parse-as = "method-body"
//! csharp-language-version = "7.3"
//! indentation-style = "spaces"
//! spaces-per-indent = 2
//! anonymous-class-name-format = "Lifted{base}"
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use decaf_parser::EntryPoint;
use serde::Deserialize;

use crate::error::ConfigError;

/// Placeholder replaced by the base type name in lifted class names.
pub const BASE_PLACEHOLDER: &str = "{base}";

/// Grammar entry point to parse with, or a request to infer it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseAs {
    #[default]
    Infer,
    CompilationUnit,
    ClassBody,
    MethodBody,
    Expression,
}

impl ParseAs {
    /// The explicit entry point, or `None` for `Infer`.
    pub fn entry_point(self) -> Option<EntryPoint> {
        match self {
            ParseAs::Infer => None,
            ParseAs::CompilationUnit => Some(EntryPoint::CompilationUnit),
            ParseAs::ClassBody => Some(EntryPoint::ClassBody),
            ParseAs::MethodBody => Some(EntryPoint::MethodBody),
            ParseAs::Expression => Some(EntryPoint::Expression),
        }
    }
}

impl FromStr for ParseAs {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "infer" => Ok(ParseAs::Infer),
            "compilation-unit" => Ok(ParseAs::CompilationUnit),
            "class-body" => Ok(ParseAs::ClassBody),
            "method-body" => Ok(ParseAs::MethodBody),
            "expression" => Ok(ParseAs::Expression),
            _ => Err(ConfigError::UnknownValue {
                option: "parse-as",
                value: s.to_string(),
            }),
        }
    }
}

/// Target C# language version. Orders by version, with `Latest` above all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LanguageVersion {
    Specific { major: u8, minor: u8 },
    #[default]
    Latest,
}

impl LanguageVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        LanguageVersion::Specific { major, minor }
    }

    /// `in` parameters arrived in C# 7.2.
    pub fn supports_in_parameters(self) -> bool {
        self >= LanguageVersion::new(7, 2)
    }
}

impl FromStr for LanguageVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigError::UnknownValue {
            option: "csharp-language-version",
            value: s.to_string(),
        };
        if s.eq_ignore_ascii_case("latest") {
            return Ok(LanguageVersion::Latest);
        }
        let (major, minor) = s.split_once('.').unwrap_or((s, "0"));
        let major = major.parse().map_err(|_| unknown())?;
        let minor = minor.parse().map_err(|_| unknown())?;
        Ok(LanguageVersion::new(major, minor))
    }
}

impl TryFrom<String> for LanguageVersion {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageVersion::Specific { major, minor } => write!(f, "{major}.{minor}"),
            LanguageVersion::Latest => write!(f, "latest"),
        }
    }
}

/// How the back end indents the assembled output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentationStyle {
    /// Keep the source's own indentation.
    #[default]
    Preserve,
    Spaces,
    Tabs,
}

impl FromStr for IndentationStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve" => Ok(IndentationStyle::Preserve),
            "spaces" => Ok(IndentationStyle::Spaces),
            "tabs" => Ok(IndentationStyle::Tabs),
            _ => Err(ConfigError::UnknownValue {
                option: "indentation-style",
                value: s.to_string(),
            }),
        }
    }
}

/// Cooperative cancellation flag shared between a caller and a running
/// translation. Checked before parsing and before translation.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for one translation call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TranslateOptions {
    pub parse_as: ParseAs,
    pub csharp_language_version: LanguageVersion,
    pub indentation_style: IndentationStyle,
    pub spaces_per_indent: usize,
    /// Replace explicit local variable types with `var` where C# allows it.
    pub use_var_in_declarations: bool,
    /// Accepted for compatibility; no rewrite uses it yet.
    pub translate_collection_types: bool,
    /// Accepted for compatibility; no rewrite uses it yet.
    pub unqualify_type_names: bool,
    /// Name template for lifted anonymous classes; must contain `{base}`.
    pub anonymous_class_name_format: String,
    #[serde(skip)]
    pub cancellation_token: Option<CancellationToken>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            parse_as: ParseAs::Infer,
            csharp_language_version: LanguageVersion::Latest,
            indentation_style: IndentationStyle::Preserve,
            spaces_per_indent: 4,
            use_var_in_declarations: true,
            translate_collection_types: true,
            unqualify_type_names: false,
            anonymous_class_name_format: format!("Anonymous{BASE_PLACEHOLDER}"),
            cancellation_token: None,
        }
    }
}

impl TranslateOptions {
    /// Parse options from TOML and validate them.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let options: TranslateOptions = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.anonymous_class_name_format.contains(BASE_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder {
                template: self.anonymous_class_name_format.clone(),
            });
        }
        if self.spaces_per_indent == 0 {
            return Err(ConfigError::ZeroIndent);
        }
        Ok(())
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}
