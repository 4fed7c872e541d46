//! Value source resolution.
//!
//! ```text
//! "#int"      + "1"   ──▶  1, 10, 11, ..., 19
//! "#int"      + ""    ──▶  0, 1, ..., 9
//! "edge[1]"   + "b"   ──▶  second argument of every edge/2.. atom starting with "b"
//! ""                  ──▶  nothing; unconstrained slots never reach the resolver
//! ```
//!
//! `#int` only ever proposes the current number and its ten one-digit
//! extensions. That is what incremental typing needs; shorter or unrelated
//! numbers are never suggested.

use std::collections::HashSet;

use crate::exchange::FactPool;
use crate::{Atom, ValueSource};

/// Candidate values for `source` that start with `prefix`, de-duplicated, in pool order.
///
/// Takes one snapshot of `pool` for the whole call.
pub fn resolve(pool: &dyn FactPool, source: &ValueSource, prefix: &str) -> Vec<String> {
    match source {
        ValueSource::Predicate { .. } => resolve_in(&pool.known_atoms(), source, prefix),
        _ => resolve_in(std::iter::empty::<&Atom>(), source, prefix),
    }
}

/// Same as [`resolve`] over an explicit atom snapshot.
pub fn resolve_in<'a, I>(atoms: I, source: &ValueSource, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a Atom>,
{
    match source {
        ValueSource::Any => Vec::new(),
        ValueSource::Builtin(kind) if kind == "int" => int_candidates(prefix),
        ValueSource::Builtin(kind) => {
            log::debug!("unsupported value source type #{kind}");
            Vec::new()
        }
        ValueSource::Predicate { name, index } => distinct(
            atoms
                .into_iter()
                .filter(|atom| atom.predicate() == name)
                .filter_map(|atom| atom.arguments().get(*index))
                .filter(|value| value.starts_with(prefix))
                .cloned(),
        ),
    }
}

fn int_candidates(prefix: &str) -> Vec<String> {
    let base = if prefix.is_empty() { "0" } else { prefix };
    if !base.bytes().all(|b| b.is_ascii_digit()) {
        return Vec::new();
    }
    let Ok(current) = base.parse::<u64>() else {
        return Vec::new();
    };

    let extensions = (0..10).filter_map(|digit| current.checked_mul(10)?.checked_add(digit));
    distinct(std::iter::once(current).chain(extensions).map(|n| n.to_string()))
}

/// First occurrence of each value, in input order.
fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(value.clone())).collect()
}
