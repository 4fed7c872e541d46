//! Template-driven representation engine for logic-program form input.
//!
//! A piece of structured data exists in three equivalent shapes:
//!
//! ```text
//! {from: alpha, to: beta}  <──>  "alpha -> beta"  <──>  edge(alpha,beta)
//!   placeholder values           display string         atom string
//! ```
//!
//! A pair of templates (display + atom) sharing the same placeholder ids ties
//! the three together. On top of that the crate validates partially typed
//! input against a template and proposes completions drawn from a live pool of
//! known atoms.
//!
//! [`KindDefinition`] and [`EntityKind`] are the configuration-facing entry
//! points; [`grammar`] exposes the lexical pattern fragments.

#[macro_use]
mod macros;
mod api;
mod codec;
mod error;
mod exchange;
pub mod grammar;
mod input;
mod template;

use std::fmt;

pub use api::{AttributeDefinition, EntityKind, KindDefinition};
pub use codec::{
    AnswerSets, Entity, EntityCodec, ParsedAtoms, PlaceholderValues, extract_answer_set_atoms, extract_answer_sets,
    extract_program_atoms, from_atom_text, from_display_text, group_by_predicate, parse_all, parse_answer_sets,
    parse_atom, placeholder_values, render, serialize_atom_lines, serialize_atoms,
};
pub use error::{MalformedAtom, RepresentationError, TemplateError};
pub use exchange::{
    AtomCondition, AtomConsumer, AtomPool, AtomSupplier, EntityList, FactPool, ValueSlot, distribute, gather,
};
pub use input::{
    SuggestOptions, Suggestions, TemplateSuggester, TemplateValidator, ValidationStatus, resolve, resolve_in,
};
pub use template::{
    PrefixMatch, SlotMatch, Template, compile, compile_unconstrained, match_end_position, match_prefix, pattern_for,
};

// --- Data model ---------------------------------------------------------------

/// A logic atom: predicate name plus ordered arguments.
///
/// Arguments are kept as raw value tokens (identifier, quoted string including
/// its quotes, or integer literal). Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom {
    predicate: String,
    arguments: Vec<String>,
}

impl Atom {
    /// Unchecked; callers hold tokens that already passed the atom grammar.
    pub(crate) fn new(predicate: impl Into<String>, arguments: Vec<String>) -> Self {
        Atom { predicate: predicate.into(), arguments }
    }

    /// Build an atom from its parts, rejecting any that would not read back
    /// through [`parse_atom`] as the same atom.
    ///
    /// ```
    /// use atomform::Atom;
    ///
    /// let atom = Atom::try_new("edge", vec!["a".into(), "\"b c\"".into()]).unwrap();
    /// assert_eq!(atom.to_string(), "edge(a,\"b c\")");
    /// assert!(Atom::try_new("Edge", vec![]).is_err());
    /// ```
    pub fn try_new(predicate: impl Into<String>, arguments: Vec<String>) -> Result<Self, MalformedAtom> {
        let atom = Atom::new(predicate, arguments);
        let text = atom.to_string();
        match parse_atom(&text) {
            Ok(parsed) if parsed == atom => Ok(atom),
            _ => Err(MalformedAtom::new(text)),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// True for classically negated atoms such as `-edge(a,b)`.
    pub fn is_negated(&self) -> bool {
        self.predicate.starts_with('-')
    }
}

/// Canonical text form: `name` or `name(a,b,...)` with no inter-argument spaces.
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.predicate)?;
        if !self.arguments.is_empty() {
            write!(f, "({})", self.arguments.join(","))?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Atom {
    type Err = MalformedAtom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_atom(s)
    }
}

/// Where the legal values of a placeholder come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueSource {
    /// Empty descriptor: any syntactically valid value is accepted.
    Any,
    /// `#name` descriptor. Only `int` is currently understood.
    Builtin(String),
    /// `name` or `name[index]`: argument `index` of every known `name` atom.
    Predicate { name: String, index: usize },
}

impl ValueSource {
    /// Parse a value source descriptor.
    ///
    /// ```
    /// use atomform::ValueSource;
    ///
    /// assert_eq!(ValueSource::parse(""), ValueSource::Any);
    /// assert_eq!(ValueSource::parse("#int"), ValueSource::Builtin("int".into()));
    /// assert_eq!(ValueSource::parse("edge[1]"), ValueSource::Predicate { name: "edge".into(), index: 1 });
    /// ```
    pub fn parse(descriptor: &str) -> Self {
        if descriptor.is_empty() {
            return ValueSource::Any;
        }
        if let Some(kind) = descriptor.strip_prefix('#') {
            return ValueSource::Builtin(kind.to_string());
        }

        let index_suffix = regex!(r"\[(\d+)\]$");
        if let Some(caps) = index_suffix.captures(descriptor) {
            if let (Some(whole), Ok(index)) = (caps.get(0), caps[1].parse::<usize>()) {
                return ValueSource::Predicate { name: descriptor[..whole.start()].to_string(), index };
            }
        }

        ValueSource::Predicate { name: descriptor.to_string(), index: 0 }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, ValueSource::Any)
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Any => Ok(()),
            ValueSource::Builtin(kind) => write!(f, "#{kind}"),
            ValueSource::Predicate { name, index } => write!(f, "{name}[{index}]"),
        }
    }
}

/// A named slot inside a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    /// Stable id, used as the key in placeholder value maps.
    pub id: String,
    /// Human-readable label shown as a hint for unfilled slots.
    pub label: String,
    pub source: ValueSource,
}

/// One segment of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplatePart {
    /// Literal text, matched verbatim.
    Fixed(String),
    Placeholder(Placeholder),
}

impl TemplatePart {
    /// Text shown for this part: the literal itself or the placeholder label.
    pub fn display_text(&self) -> &str {
        match self {
            TemplatePart::Fixed(text) => text,
            TemplatePart::Placeholder(p) => &p.label,
        }
    }

    /// Regex fragment matching this part. Placeholders contribute one capture group.
    pub fn pattern(&self) -> String {
        match self {
            TemplatePart::Fixed(text) => regex::escape(text),
            TemplatePart::Placeholder(_) => grammar::value_pattern(),
        }
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            TemplatePart::Placeholder(p) => Some(p),
            TemplatePart::Fixed(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TemplatePart::Placeholder(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_display_is_canonical() {
        let atom = Atom::new("edge", vec!["alpha".into(), "beta".into()]);
        assert_eq!(atom.to_string(), "edge(alpha,beta)");
        assert_eq!(atom.arity(), 2);
        assert_eq!(Atom::new("done", vec![]).to_string(), "done");
    }

    #[test]
    fn checked_constructor_rejects_unreadable_parts() {
        let rejected = [
            ("Edge", vec!["a"]),
            ("edge", vec!["a b"]),
            ("", vec![]),
            ("edge", vec![" a"]),
            ("edge", vec!["a,b"]),
            ("edge", vec!["007"]),
        ];
        for (predicate, arguments) in rejected {
            let arguments = arguments.into_iter().map(String::from).collect();
            assert!(Atom::try_new(predicate, arguments).is_err(), "{predicate}");
        }

        let atom = Atom::try_new("-edge", vec!["a".into(), "12".into()]).unwrap();
        assert_eq!(parse_atom(&atom.to_string()).unwrap(), atom);
    }

    #[test]
    fn negated_atoms_are_flagged() {
        assert!(Atom::new("-edge", vec!["a".into()]).is_negated());
        assert!(!Atom::new("edge", vec!["a".into()]).is_negated());
    }

    #[test]
    fn value_source_defaults_to_first_argument() {
        assert_eq!(ValueSource::parse("node"), ValueSource::Predicate { name: "node".into(), index: 0 });
        assert_eq!(ValueSource::parse("#float"), ValueSource::Builtin("float".into()));
        assert_eq!(ValueSource::parse("edge[2]").to_string(), "edge[2]");
    }

    #[test]
    fn fixed_parts_are_escaped() {
        let part = TemplatePart::Fixed("task(".into());
        assert_eq!(part.pattern(), r"task\(");
        assert_eq!(part.display_text(), "task(");
    }
}
