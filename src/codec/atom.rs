//! Atom text codec.
//!
//! ```text
//! "edge( a , b)"  ── parse_atom ──▶  Atom { edge, [a, b] }  ── Display ──▶  "edge(a,b)"
//!
//! program text  ── extract_program_atoms ──▶  ["node(a)", "node(b)"]
//! "{a, b(1)}"   ── extract_answer_set_atoms ─▶ ["a", "b(1)"]
//! [Atom]        ── serialize_atoms ──▶  "a. b(1). "
//! ```
//!
//! Single-atom parsing is strict and returns [`MalformedAtom`]. Batch parsing
//! ([`parse_all`]) keeps going past malformed entries and hands them back as
//! diagnostics, since user files and solver output may legitimately contain
//! partial garbage.

use std::collections::BTreeMap;

use crate::grammar::{atom_pattern, atom_regex, value_regex};
use crate::{Atom, MalformedAtom};

/// Parse exactly one atom; the whole input must follow the atom grammar.
///
/// ```
/// use atomform::parse_atom;
///
/// let atom = parse_atom("edge(alpha,beta)").unwrap();
/// assert_eq!(atom.predicate(), "edge");
/// assert_eq!(atom.arguments(), ["alpha", "beta"]);
/// assert!(parse_atom("edge(alpha,").is_err());
/// ```
pub fn parse_atom(text: &str) -> Result<Atom, MalformedAtom> {
    let caps = atom_regex().captures(text).ok_or_else(|| MalformedAtom::new(text))?;
    let arguments = match caps.get(2) {
        Some(args) => value_regex().find_iter(args.as_str()).map(|m| m.as_str().to_string()).collect(),
        None => Vec::new(),
    };
    Ok(Atom::new(&caps[1], arguments))
}

/// Atoms parsed from a batch of strings, plus the entries that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAtoms {
    pub atoms: Vec<Atom>,
    pub diagnostics: Vec<MalformedAtom>,
}

/// Parse every string, skipping (and reporting) malformed ones.
pub fn parse_all<I, S>(texts: I) -> ParsedAtoms
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedAtoms::default();
    for text in texts {
        match parse_atom(text.as_ref()) {
            Ok(atom) => parsed.atoms.push(atom),
            Err(err) => {
                log::warn!("skipping atom: {err}");
                parsed.diagnostics.push(err);
            }
        }
    }
    parsed
}

/// Facts stated in program source.
///
/// Only an atom that starts a statement (start of text, a line break, or the
/// previous `.`, optionally followed by whitespace) and is immediately closed
/// by `.` is taken. Rule heads, rule bodies and periods inside string
/// arguments are therefore not picked up as facts.
pub fn extract_program_atoms(text: &str) -> Vec<String> {
    let statement = regex!(format!(r"(?:\A|\r\n|\n|\r|\.)\s*({})\.", atom_pattern()));

    let mut atoms = Vec::new();
    let mut at = 0;
    // The closing `.` of one fact may open the next statement, so resume
    // right after the atom instead of after the whole match.
    while let Some(caps) = statement.captures_at(text, at) {
        let Some(atom) = caps.get(1) else { break };
        atoms.push(atom.as_str().to_string());
        at = atom.end();
    }
    atoms
}

/// Atom substrings of one answer-set listing such as `{a, b(1), c}`.
pub fn extract_answer_set_atoms(text: &str) -> Vec<String> {
    let listed = regex!(format!("({}),?", atom_pattern()));
    listed.captures_iter(text).filter_map(|caps| caps.get(1)).map(|m| m.as_str().to_string()).collect()
}

/// Inner text of every `{ ... }` group in raw solver output. Empty groups are kept.
pub fn extract_answer_sets(output: &str) -> Vec<String> {
    let group = regex!(r"(?s)\{(.*?)\}");
    group.captures_iter(output).filter_map(|caps| caps.get(1)).map(|m| m.as_str().to_string()).collect()
}

/// Answer sets recovered from raw solver output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSets {
    /// One entry per `{ ... }` group, in output order.
    pub sets: Vec<Vec<Atom>>,
    pub diagnostics: Vec<MalformedAtom>,
    /// The solver printed nothing, i.e. the program has no answer set.
    pub empty_output: bool,
}

pub fn parse_answer_sets(output: &str) -> AnswerSets {
    let mut answer_sets = AnswerSets { empty_output: output.trim().is_empty(), ..AnswerSets::default() };

    for set in extract_answer_sets(output) {
        let parsed = parse_all(extract_answer_set_atoms(&set));
        answer_sets.sets.push(parsed.atoms);
        answer_sets.diagnostics.extend(parsed.diagnostics);
    }

    log::debug!(
        "parsed {} answer sets ({} malformed atoms)",
        answer_sets.sets.len(),
        answer_sets.diagnostics.len()
    );
    answer_sets
}

/// Program text for `atoms`: sorted by canonical form, each followed by `". "`.
///
/// ```
/// use atomform::{parse_atom, serialize_atoms};
///
/// let atoms = vec![parse_atom("b(1)").unwrap(), parse_atom("a").unwrap()];
/// assert_eq!(serialize_atoms(&atoms), "a. b(1). ");
/// ```
pub fn serialize_atoms<'a, I>(atoms: I) -> String
where
    I: IntoIterator<Item = &'a Atom>,
{
    let mut rendered: Vec<String> = atoms.into_iter().map(Atom::to_string).collect();
    rendered.sort();
    rendered.into_iter().map(|s| s + ". ").collect()
}

/// One serialized program line per group of atoms.
pub fn serialize_atom_lines<'a, G, I>(groups: G) -> Vec<String>
where
    G: IntoIterator<Item = I>,
    I: IntoIterator<Item = &'a Atom>,
{
    groups.into_iter().map(serialize_atoms).collect()
}

/// Atoms keyed by predicate name, keeping their relative order.
pub fn group_by_predicate<'a, I>(atoms: I) -> BTreeMap<String, Vec<Atom>>
where
    I: IntoIterator<Item = &'a Atom>,
{
    let mut groups: BTreeMap<String, Vec<Atom>> = BTreeMap::new();
    for atom in atoms {
        groups.entry(atom.predicate().to_string()).or_default().push(atom.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn atom(text: &str) -> Atom {
        parse_atom(text).unwrap()
    }

    #[test]
    fn parses_name_and_arguments() {
        let a = atom("edge(alpha,beta)");
        assert_eq!(a, Atom::new("edge", vec!["alpha".into(), "beta".into()]));
        assert_eq!(a.to_string(), "edge(alpha,beta)");
    }

    #[test]
    fn tolerates_whitespace_around_arguments() {
        let a = atom("task( build , 3 ,\"x, y\" )");
        assert_eq!(a.arguments(), ["build", "3", "\"x, y\""]);
        assert_eq!(a.to_string(), "task(build,3,\"x, y\")");
    }

    #[test]
    fn zero_arity_atoms_have_no_arguments() {
        let a = atom("done");
        assert_eq!(a.arity(), 0);
        assert_eq!(a.to_string(), "done");
    }

    #[test]
    fn rejects_partial_matches() {
        for text in ["edge(a,b) ", " edge(a)", "edge(a", "Edge(a)", "edge(007)", "", "a.b"] {
            let err = parse_atom(text).unwrap_err();
            assert_eq!(err.text, text);
        }
    }

    #[test]
    fn canonical_text_round_trips() {
        for text in ["p", "-p(a)", "q(0,10,\"s \\\" t\")", "r(x_1,yY)"] {
            let a = atom(text);
            assert_eq!(atom(&a.to_string()), a);
        }
    }

    #[test]
    fn batch_parse_skips_malformed_entries() {
        let parsed = parse_all(["a(1)", "bad(", "b"]);
        assert_eq!(parsed.atoms, vec![atom("a(1)"), atom("b")]);
        assert_eq!(parsed.diagnostics, vec![MalformedAtom::new("bad(")]);
    }

    #[test]
    fn program_facts_are_extracted() {
        let program = "node(a). node(b).\nedge(a,b).\nreach(X) :- node(X).\nlabel(\"v1. x\").";
        assert_eq!(extract_program_atoms(program), vec!["node(a)", "node(b)", "edge(a,b)", "label(\"v1. x\")"]);
    }

    #[test]
    fn program_facts_must_start_a_statement() {
        assert_eq!(extract_program_atoms("a :- b. c."), vec!["c"]);
        assert_eq!(extract_program_atoms("   indented(1)."), vec!["indented(1)"]);
        assert!(extract_program_atoms("no_period").is_empty());
    }

    #[test]
    fn answer_set_atoms_keep_order() {
        assert_eq!(extract_answer_set_atoms("{a, b(1), c}"), vec!["a", "b(1)", "c"]);
    }

    #[test]
    fn solver_output_is_split_into_answer_sets() {
        let output = "{a, b(1)}\n{c}\n{}";
        let sets = parse_answer_sets(output);
        assert!(!sets.empty_output);
        assert_eq!(sets.sets, vec![vec![atom("a"), atom("b(1)")], vec![atom("c")], vec![]]);
        assert!(sets.diagnostics.is_empty());
    }

    #[test]
    fn blank_solver_output_means_no_answer_set() {
        let sets = parse_answer_sets("  \n");
        assert!(sets.empty_output);
        assert!(sets.sets.is_empty());
    }

    #[test]
    fn serialization_sorts_by_text() {
        let atoms = vec![atom("edge(b,c)"), atom("edge(a,b)"), atom("node(a)")];
        assert_eq!(serialize_atoms(&atoms), "edge(a,b). edge(b,c). node(a). ");
    }

    #[test]
    fn lines_follow_predicate_groups() {
        let atoms = vec![atom("node(b)"), atom("edge(a,b)"), atom("node(a)")];
        let groups = group_by_predicate(&atoms);
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["edge", "node"]);
        assert_eq!(serialize_atom_lines(groups.values()), vec!["edge(a,b). ", "node(a). node(b). "]);
    }
}
