//! Error types surfaced by the translator.
//!
//! Java syntax errors are not among them: they are carried on the parse and
//! rendered best-effort. Internal invariant violations panic.

use thiserror::Error;

/// Failure of a whole translation call.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation was cancelled")]
    Cancelled,
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] ConfigError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed options file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unrecognized value `{value}` for `{option}`")]
    UnknownValue { option: &'static str, value: String },
    #[error("anonymous class name format `{template}` does not contain `{{base}}`")]
    MissingPlaceholder { template: String },
    #[error("spaces-per-indent must be at least 1")]
    ZeroIndent,
}

/// Failure reported by a C# back end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("raw C# already contains a using directive at line {line}")]
    UsingsAlreadyPresent { line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = ConfigError::UnknownValue {
            option: "parse-as",
            value: "statement".to_string(),
        };
        assert_eq!(err.to_string(), "unrecognized value `statement` for `parse-as`");

        let err = ConfigError::MissingPlaceholder {
            template: "Lifted".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "anonymous class name format `Lifted` does not contain `{base}`"
        );

        let err = TranslateError::from(BackendError::UsingsAlreadyPresent { line: 3 });
        assert_eq!(err.to_string(), "raw C# already contains a using directive at line 3");

        let err = TranslateError::from(ConfigError::ZeroIndent);
        assert_eq!(err.to_string(), "invalid options: spaces-per-indent must be at least 1");
    }
}
