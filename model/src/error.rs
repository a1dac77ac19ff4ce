use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    #[error("io error: {0}")]
    #[diagnostic(code(model::io_error))]
    Io(#[from] std::io::Error),

    #[error("invalid model document: {0}")]
    #[diagnostic(code(model::deserialize_error))]
    Json(#[from] serde_json::Error),

    #[error("invalid component name `{name}`: {message}")]
    #[diagnostic(
        code(model::invalid_name),
        help("Component names become hostnames; use ASCII letters, digits, `-` or `_`.")
    )]
    InvalidName { name: String, message: &'static str },

    #[error("component name `{name}` is declared more than once")]
    #[diagnostic(
        code(model::duplicate_component_name),
        help("Every component needs a unique name; rename one of the duplicates.")
    )]
    DuplicateComponentName { name: String },
}
