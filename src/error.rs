use thiserror::Error;

use crate::codec::PlaceholderValues;

/// Text that does not follow the atom grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid atom string: \"{text}\"")]
pub struct MalformedAtom {
    pub text: String,
}

impl MalformedAtom {
    pub fn new(text: impl Into<String>) -> Self {
        MalformedAtom { text: text.into() }
    }
}

/// A string or value map that does not fit a template.
///
/// `template` is the template's shape (fixed text plus placeholder labels).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepresentationError {
    #[error("invalid representation string \"{input}\" for template \"{template}\"")]
    Unmatched { input: String, template: String },

    #[error("placeholder value map {values:?} has no value for \"{id}\" in template \"{template}\"")]
    MissingValue { id: String, values: PlaceholderValues, template: String },

    #[error("placeholder value map has a value for \"{id}\", which template \"{template}\" does not declare")]
    UnexpectedValue { id: String, template: String },

    #[error("placeholder \"{id}\" matched two different values in \"{input}\" for template \"{template}\"")]
    ConflictingValues { id: String, input: String, template: String },
}

/// Template configuration that cannot be compiled.
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    #[error("no definition for placeholder \"{0}\"")]
    UnknownPlaceholder(String),

    #[error("display and atom templates declare different placeholders: {display:?} vs {atom:?}")]
    MismatchedPlaceholders { display: Vec<String>, atom: Vec<String> },

    #[error("template pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}
