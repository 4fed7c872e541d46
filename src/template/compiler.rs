//! Template string compilation.
//!
//! Scans a template string for `::identifier` markers. Each marker becomes a
//! [`TemplatePart::Placeholder`] whose label and value source come from two
//! caller-supplied lookups keyed by the placeholder id; every run of text
//! around the markers becomes a [`TemplatePart::Fixed`]. Empty runs are not
//! emitted, so a template that starts or ends with a placeholder has no empty
//! fixed part at that end.

use super::Template;
use crate::grammar::placeholder_marker_regex;
use crate::{Placeholder, TemplateError, TemplatePart, ValueSource};

/// Compile `template` into an ordered sequence of parts.
///
/// `label_of` and `source_of` map a placeholder id to its display label and
/// value source descriptor. A lookup returning `None` fails the compilation.
///
/// ```
/// use atomform::{TemplatePart, compile};
///
/// let t = compile("task(::name,::n)", |id| Some(id.to_uppercase()), |id| {
///     Some(if id == "n" { "#int".to_string() } else { String::new() })
/// })
/// .unwrap();
/// assert_eq!(t.len(), 5);
/// assert_eq!(t.parts()[0], TemplatePart::Fixed("task(".into()));
/// ```
pub fn compile<L, S>(template: &str, label_of: L, source_of: S) -> Result<Template, TemplateError>
where
    L: Fn(&str) -> Option<String>,
    S: Fn(&str) -> Option<String>,
{
    let mut parts = Vec::new();
    let mut last_end = 0;

    for caps in placeholder_marker_regex().captures_iter(template) {
        let Some(marker) = caps.get(0) else { continue };
        if marker.start() > last_end {
            parts.push(TemplatePart::Fixed(template[last_end..marker.start()].to_string()));
        }

        let id = &caps[1];
        let label = label_of(id).ok_or_else(|| TemplateError::UnknownPlaceholder(id.to_string()))?;
        let source = source_of(id).ok_or_else(|| TemplateError::UnknownPlaceholder(id.to_string()))?;
        parts.push(TemplatePart::Placeholder(Placeholder {
            id: id.to_string(),
            label,
            source: ValueSource::parse(&source),
        }));

        last_end = marker.end();
    }

    if last_end < template.len() {
        parts.push(TemplatePart::Fixed(template[last_end..].to_string()));
    }

    log::trace!("compiled template \"{}\" into {} parts", template, parts.len());
    Template::new(parts)
}

/// Compile with every placeholder labelled by its id and left unconstrained.
pub fn compile_unconstrained(template: &str) -> Result<Template, TemplateError> {
    compile(template, |id| Some(id.to_string()), |_| Some(String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed(s: &str) -> TemplatePart {
        TemplatePart::Fixed(s.to_string())
    }

    fn slot(id: &str) -> TemplatePart {
        TemplatePart::Placeholder(Placeholder { id: id.to_string(), label: id.to_string(), source: ValueSource::Any })
    }

    #[test]
    fn splits_fixed_text_and_placeholders_in_order() {
        let t = compile_unconstrained("::a depends on ::b").unwrap();
        assert_eq!(t.parts(), &[slot("a"), fixed(" depends on "), slot("b")]);
    }

    #[test]
    fn keeps_leading_and_trailing_literals() {
        let t = compile_unconstrained("edge(::from,::to)").unwrap();
        assert_eq!(t.parts(), &[fixed("edge("), slot("from"), fixed(","), slot("to"), fixed(")")]);
    }

    #[test]
    fn empty_template_has_no_parts() {
        let t = compile_unconstrained("").unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn template_without_markers_is_one_fixed_part() {
        let t = compile_unconstrained("always").unwrap();
        assert_eq!(t.parts(), &[fixed("always")]);
    }

    #[test]
    fn adjacent_placeholders_have_no_fixed_part_between() {
        let t = compile_unconstrained("::a::b").unwrap();
        assert_eq!(t.parts(), &[slot("a"), slot("b")]);
    }

    #[test]
    fn resolves_labels_and_sources_through_lookups() {
        let t = compile(
            "::max_duration",
            |_| Some("number".to_string()),
            |_| Some("#int".to_string()),
        )
        .unwrap();
        let p = t.placeholders().next().unwrap();
        assert_eq!(p.label, "number");
        assert_eq!(p.source, ValueSource::Builtin("int".into()));
    }

    #[test]
    fn unknown_placeholder_fails() {
        let err = compile("::x", |_| None, |_| Some(String::new())).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownPlaceholder(id) if id == "x"));
    }

    #[test]
    fn uppercase_marker_stays_literal() {
        let t = compile_unconstrained("::X and ::y").unwrap();
        assert_eq!(t.parts(), &[fixed("::X and "), slot("y")]);
    }
}
