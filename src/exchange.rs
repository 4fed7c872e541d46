//! Atom exchange: the fact pool and the collections that feed it.
//!
//! ```text
//! EntityList ─┐                      ┌─▶ EntityList::set_atoms
//! ValueSlot  ─┼─ gather ──▶ AtomPool ┼─▶ ValueSlot::set_atoms
//! AtomPool   ─┘                      └─▶ AtomCondition::set_atoms
//!                              │
//!                              └── FactPool::known_atoms ──▶ resolver
//! ```
//!
//! There is no global hub. Whoever owns the collections decides when to
//! gather and when to distribute, and passes the pool to validators and
//! suggesters explicitly.

use std::collections::BTreeSet;

use crate::codec::{Entity, EntityCodec};
use crate::{Atom, RepresentationError, parse_all, parse_atom};

/// Read access to the current set of known atoms.
pub trait FactPool {
    /// A consistent snapshot of the pool at call time.
    fn known_atoms(&self) -> BTreeSet<Atom>;
}

impl FactPool for BTreeSet<Atom> {
    fn known_atoms(&self) -> BTreeSet<Atom> {
        self.clone()
    }
}

impl FactPool for Vec<Atom> {
    fn known_atoms(&self) -> BTreeSet<Atom> {
        self.iter().cloned().collect()
    }
}

/// Something that contributes atoms to the pool.
pub trait AtomSupplier {
    fn atoms(&self) -> Vec<Atom>;
}

/// Something that rebuilds its state from the pool.
pub trait AtomConsumer {
    fn set_atoms(&mut self, atoms: &BTreeSet<Atom>);
}

/// De-duplicated atom store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomPool {
    atoms: BTreeSet<Atom>,
}

impl AtomPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the atom was already known.
    pub fn insert(&mut self, atom: Atom) -> bool {
        self.atoms.insert(atom)
    }

    pub fn remove(&mut self, atom: &Atom) -> bool {
        self.atoms.remove(atom)
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.atoms.contains(atom)
    }

    pub fn clear(&mut self) {
        self.atoms.clear();
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }
}

impl Extend<Atom> for AtomPool {
    fn extend<T: IntoIterator<Item = Atom>>(&mut self, iter: T) {
        self.atoms.extend(iter);
    }
}

impl FromIterator<Atom> for AtomPool {
    fn from_iter<T: IntoIterator<Item = Atom>>(iter: T) -> Self {
        AtomPool { atoms: iter.into_iter().collect() }
    }
}

impl FactPool for AtomPool {
    fn known_atoms(&self) -> BTreeSet<Atom> {
        self.atoms.clone()
    }
}

impl AtomSupplier for AtomPool {
    fn atoms(&self) -> Vec<Atom> {
        self.atoms.iter().cloned().collect()
    }
}

impl AtomConsumer for AtomPool {
    fn set_atoms(&mut self, atoms: &BTreeSet<Atom>) {
        self.atoms = atoms.clone();
    }
}

/// Union of every supplier's atoms.
pub fn gather(suppliers: &[&dyn AtomSupplier]) -> AtomPool {
    suppliers.iter().flat_map(|s| s.atoms()).collect()
}

/// Hand the same atom set to every consumer.
pub fn distribute(atoms: &BTreeSet<Atom>, consumers: &mut [&mut dyn AtomConsumer]) {
    for consumer in consumers.iter_mut() {
        consumer.set_atoms(atoms);
    }
}

/// Converts the atoms of one entity kind, skipping those that do not fit.
fn entities_from(codec: &EntityCodec, atoms: &BTreeSet<Atom>) -> Vec<Entity> {
    atoms
        .iter()
        .filter_map(|atom| match codec.from_atom(atom) {
            Ok(entity) => Some(entity),
            Err(err) => {
                log::debug!("atom {atom} does not fit: {err}");
                None
            }
        })
        .collect()
}

fn atoms_of<'e>(entities: impl IntoIterator<Item = &'e Entity>) -> Vec<Atom> {
    parse_all(entities.into_iter().map(Entity::atom_text)).atoms
}

/// Ordered, de-duplicated entities of one kind.
#[derive(Debug, Clone)]
pub struct EntityList<'k> {
    codec: &'k EntityCodec,
    entities: Vec<Entity>,
}

impl<'k> EntityList<'k> {
    pub fn new(codec: &'k EntityCodec) -> Self {
        EntityList { codec, entities: Vec::new() }
    }

    /// Add the entity typed as `text`. Returns `false` if it was already listed.
    pub fn add_by_user_input(&mut self, text: &str) -> Result<bool, RepresentationError> {
        let entity = self.codec.from_display_text(text)?;
        Ok(self.push(entity))
    }

    fn push(&mut self, entity: Entity) -> bool {
        if self.entities.contains(&entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    pub fn remove(&mut self, entity: &Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e != entity);
        self.entities.len() != before
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn displays(&self) -> Vec<&str> {
        self.entities.iter().map(Entity::display_text).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl AtomSupplier for EntityList<'_> {
    fn atoms(&self) -> Vec<Atom> {
        atoms_of(&self.entities)
    }
}

impl AtomConsumer for EntityList<'_> {
    fn set_atoms(&mut self, atoms: &BTreeSet<Atom>) {
        self.entities = entities_from(self.codec, atoms);
    }
}

/// At most one entity of one kind.
#[derive(Debug, Clone)]
pub struct ValueSlot<'k> {
    codec: &'k EntityCodec,
    value: Option<Entity>,
}

impl<'k> ValueSlot<'k> {
    pub fn new(codec: &'k EntityCodec) -> Self {
        ValueSlot { codec, value: None }
    }

    pub fn set_by_user_input(&mut self, text: &str) -> Result<(), RepresentationError> {
        self.value = Some(self.codec.from_display_text(text)?);
        Ok(())
    }

    pub fn value(&self) -> Option<&Entity> {
        self.value.as_ref()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}

impl AtomSupplier for ValueSlot<'_> {
    fn atoms(&self) -> Vec<Atom> {
        atoms_of(&self.value)
    }
}

impl AtomConsumer for ValueSlot<'_> {
    /// Several fitting atoms are resolved by the smallest display string.
    fn set_atoms(&mut self, atoms: &BTreeSet<Atom>) {
        self.value = entities_from(self.codec, atoms).into_iter().min_by(|a, b| a.display_text().cmp(b.display_text()));
    }
}

/// A guard that holds when its atom is present in the consumed atom set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomCondition {
    atom: Option<Atom>,
    fulfilled: bool,
}

impl AtomCondition {
    /// An empty or malformed condition text is always fulfilled.
    pub fn new(text: &str) -> Self {
        let atom = if text.trim().is_empty() {
            None
        } else {
            match parse_atom(text.trim()) {
                Ok(atom) => Some(atom),
                Err(err) => {
                    log::warn!("ignoring condition: {err}");
                    None
                }
            }
        };
        AtomCondition { fulfilled: atom.is_none(), atom }
    }

    pub fn atom(&self) -> Option<&Atom> {
        self.atom.as_ref()
    }

    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled
    }

    pub fn is_fulfilled_by(&self, atoms: &BTreeSet<Atom>) -> bool {
        self.atom.as_ref().is_none_or(|atom| atoms.contains(atom))
    }
}

impl AtomConsumer for AtomCondition {
    fn set_atoms(&mut self, atoms: &BTreeSet<Atom>) {
        self.fulfilled = self.is_fulfilled_by(atoms);
    }
}
