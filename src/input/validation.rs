//! Three-state validation of partially typed input.
//!
//! ```text
//! scan prefix ──▶ unmatched tail? ──▶ placeholder values ──▶ all parts? ──▶ VALID
//!                    │ INVALID            │ INVALID / INCOMPLETE  │ INCOMPLETE
//! ```
//!
//! 1. A non-empty tail after the matched prefix is INVALID when the template
//!    is already complete, when the next part is a placeholder (values are
//!    matched greedily, so leftover text can never become a value), or when
//!    the next literal does not start with the tail.
//! 2. Each matched placeholder is checked against its value source. A value
//!    that ends the input and is a strict prefix of some candidate is
//!    INCOMPLETE rather than INVALID. The first non-valid placeholder decides.
//! 3. Fewer matched parts than the template has is INCOMPLETE.

use std::collections::BTreeSet;
use std::fmt;

use super::resolver::resolve_in;
use crate::exchange::FactPool;
use crate::template::{PrefixMatch, SlotMatch, Template};
use crate::{Atom, TemplatePart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStatus {
    Valid,
    /// Not valid yet, but more typing can make it valid.
    Incomplete,
    Invalid,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationStatus::Valid => "VALID",
            ValidationStatus::Incomplete => "INCOMPLETE",
            ValidationStatus::Invalid => "INVALID",
        })
    }
}

/// Validates input against one template, reading values from a fact pool.
#[derive(Clone, Copy)]
pub struct TemplateValidator<'a> {
    template: &'a Template,
    pool: &'a dyn FactPool,
}

impl fmt::Debug for TemplateValidator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateValidator").field("template", &self.template.shape()).finish()
    }
}

impl<'a> TemplateValidator<'a> {
    pub fn new(template: &'a Template, pool: &'a dyn FactPool) -> Self {
        TemplateValidator { template, pool }
    }

    pub fn template(&self) -> &'a Template {
        self.template
    }

    pub fn validate(&self, input: &str) -> ValidationStatus {
        let scan = PrefixMatch::scan(input, self.template);
        let status = classify(input, &scan, &mut Snapshot::new(self.pool));
        log::trace!("validate {:?} against \"{}\": {}", input, self.template.shape(), status);
        status
    }
}

/// One fact pool read per call, taken on first use.
pub(crate) struct Snapshot<'a> {
    pool: &'a dyn FactPool,
    atoms: Option<BTreeSet<Atom>>,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(pool: &'a dyn FactPool) -> Self {
        Snapshot { pool, atoms: None }
    }

    pub(crate) fn atoms(&mut self) -> &BTreeSet<Atom> {
        let pool = self.pool;
        self.atoms.get_or_insert_with(|| pool.known_atoms())
    }
}

pub(crate) fn classify(input: &str, scan: &PrefixMatch<'_>, snapshot: &mut Snapshot<'_>) -> ValidationStatus {
    let tail = scan.tail(input);
    if !tail.is_empty() {
        match scan.next_part() {
            None | Some(TemplatePart::Placeholder(_)) => return ValidationStatus::Invalid,
            Some(TemplatePart::Fixed(text)) if !text.starts_with(tail) => return ValidationStatus::Invalid,
            Some(TemplatePart::Fixed(_)) => {}
        }
    }

    for slot in scan.slots.iter().filter(|slot| !slot.placeholder.source.is_any()) {
        let status = check_slot(slot, snapshot.atoms(), slot.end == input.len());
        if status != ValidationStatus::Valid {
            return status;
        }
    }

    if scan.is_complete() { ValidationStatus::Valid } else { ValidationStatus::Incomplete }
}

fn check_slot(slot: &SlotMatch<'_>, atoms: &BTreeSet<Atom>, ends_input: bool) -> ValidationStatus {
    let candidates = resolve_in(atoms, &slot.placeholder.source, &slot.value);
    if candidates.iter().any(|c| *c == slot.value) {
        ValidationStatus::Valid
    } else if ends_input && candidates.iter().any(|c| c.starts_with(&slot.value)) {
        ValidationStatus::Incomplete
    } else {
        ValidationStatus::Invalid
    }
}
