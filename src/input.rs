//! Live input support: value resolution, validation and suggestions.
//!
//! ```text
//! input ── PrefixMatch::scan (template/matcher.rs)
//!              │
//!              ├─▶ TemplateValidator::validate   (validation.rs)
//!              │       tail check + per-placeholder check via resolve()
//!              │
//!              └─▶ TemplateSuggester::suggest    (suggestion.rs)
//!                      candidates for the slot being typed via resolve()
//! ```
//!
//! Every call is a pure function of the input, the template and one snapshot
//! of the fact pool. Nothing is remembered between keystrokes.

#[path = "input/resolver.rs"]
mod resolver;
#[path = "input/suggestion.rs"]
mod suggestion;
#[path = "input/validation.rs"]
mod validation;

#[cfg(test)]
#[path = "input/tests.rs"]
mod tests;

pub use resolver::{resolve, resolve_in};
pub use suggestion::{SuggestOptions, Suggestions, TemplateSuggester};
pub use validation::{TemplateValidator, ValidationStatus};
