//! Representation templates.
//!
//! A template string such as `"edge(::from,::to)"` is compiled once into an
//! ordered sequence of [`TemplatePart`]s and reused for the lifetime of the
//! entity kind it belongs to.
//!
//! ```text
//! "edge(::from,::to)"
//!        │ compile                      (compiler.rs)
//!        v
//! [Fixed("edge("), Placeholder(from), Fixed(","), Placeholder(to), Fixed(")")]
//!        │ Template::new                 prefix regexes ^p1, ^p1p2, ...
//!        v                               full regex     ^p1..pn$
//! match_prefix / match_end_position      (matcher.rs)
//! ```
//!
//! ## Invariants
//!
//! - `prefixes[k]` is the anchored pattern for `parts[..k]`, so
//!   `prefixes.len() == parts.len() + 1` and `prefixes[0]` matches everything.
//! - Capture group `i + 1` of any of the compiled regexes belongs to the
//!   `i`-th placeholder among the covered parts. Fixed parts are escaped and
//!   never contribute groups.

#[path = "template/compiler.rs"]
mod compiler;
#[path = "template/matcher.rs"]
mod matcher;

pub use compiler::{compile, compile_unconstrained};
pub use matcher::{PrefixMatch, SlotMatch, match_end_position, match_prefix, pattern_for};

use crate::{Placeholder, TemplatePart};
use regex::Regex;

/// An immutable, compiled template.
#[derive(Debug, Clone)]
pub struct Template {
    parts: Vec<TemplatePart>,
    prefixes: Vec<Regex>,
    full: Regex,
}

impl Template {
    /// Build a template from already-split parts and pre-compile its patterns.
    pub fn new(parts: Vec<TemplatePart>) -> Result<Self, crate::TemplateError> {
        let mut prefixes = Vec::with_capacity(parts.len() + 1);
        let mut pattern = String::new();
        prefixes.push(Regex::new("^")?);
        for part in &parts {
            pattern.push_str(&part.pattern());
            prefixes.push(Regex::new(&format!("^(?:{pattern})"))?);
        }
        let full = Regex::new(&format!("^(?:{pattern})$"))?;

        Ok(Template { parts, prefixes, full })
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Placeholders in declaration order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> + '_ {
        self.parts.iter().filter_map(TemplatePart::as_placeholder)
    }

    /// Placeholder ids in declaration order (duplicates kept).
    pub fn placeholder_ids(&self) -> Vec<&str> {
        self.placeholders().map(|p| p.id.as_str()).collect()
    }

    /// Human-readable shape: literals verbatim, placeholders as their labels.
    pub fn shape(&self) -> String {
        self.parts.iter().map(TemplatePart::display_text).collect()
    }

    /// Anchored regex for the first `len` parts.
    pub(crate) fn prefix_regex(&self, len: usize) -> &Regex {
        &self.prefixes[len]
    }

    /// Anchored regex that must consume the whole input.
    pub(crate) fn full_regex(&self) -> &Regex {
        &self.full
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for Template {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_cover_every_part() {
        let template = compile_unconstrained("edge(::from,::to)").unwrap();
        assert_eq!(template.len(), 5);
        assert_eq!(template.prefixes.len(), 6);
        assert!(template.prefix_regex(0).is_match("anything"));
        assert!(template.full_regex().is_match("edge(a,b)"));
        assert!(!template.full_regex().is_match("edge(a,b) "));
    }

    #[test]
    fn shape_uses_labels() {
        let template = compile(
            "::from -> ::to",
            |id| Some(format!("<{id}>")),
            |_| Some(String::new()),
        )
        .unwrap();
        assert_eq!(template.shape(), "<from> -> <to>");
        assert_eq!(template.placeholder_ids(), vec!["from", "to"]);
    }
}
