//! Text codecs.
//!
//! - `atom.rs`: single atoms to and from text, extraction of atom substrings
//!   out of program source and solver answer sets, program serialization.
//! - `entity.rs`: placeholder values to and from display/atom strings through
//!   a pair of templates.
//!
//! Both directions are strict for single conversions (typed errors) and
//! forgiving for batches, where malformed entries are skipped and reported.

#[path = "codec/atom.rs"]
mod atom;
#[path = "codec/entity.rs"]
mod entity;

pub use atom::{
    AnswerSets, ParsedAtoms, extract_answer_set_atoms, extract_answer_sets, extract_program_atoms, group_by_predicate,
    parse_all, parse_answer_sets, parse_atom, serialize_atom_lines, serialize_atoms,
};
pub use entity::{Entity, EntityCodec, PlaceholderValues, from_atom_text, from_display_text, placeholder_values, render};
