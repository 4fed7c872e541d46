//! Entity codec: placeholder values <-> display string <-> atom string.
//!
//! An [`EntityCodec`] owns a display template and an atom template that
//! declare the same placeholder ids. Every [`Entity`] it produces is built from
//! one value map rendered through both templates, so the three fields can never
//! disagree.
//!
//! ```text
//! "alpha -> beta" ──full match──▶ {from: alpha, to: beta} ──render──▶ "edge(alpha,beta)"
//!  display template                                              atom template
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::template::Template;
use crate::{Atom, RepresentationError, TemplateError, TemplatePart};

/// Placeholder id -> raw value.
pub type PlaceholderValues = BTreeMap<String, String>;

/// One consistent (values, display string, atom string) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    values: PlaceholderValues,
    display: String,
    atom: String,
}

impl Entity {
    pub fn values(&self) -> &PlaceholderValues {
        &self.values
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn display_text(&self) -> &str {
        &self.display
    }

    pub fn atom_text(&self) -> &str {
        &self.atom
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Fill `template` with `values`.
///
/// Values for ids the template does not mention are ignored; a missing id
/// fails the render.
pub fn render(values: &PlaceholderValues, template: &Template) -> Result<String, RepresentationError> {
    let mut rendered = String::new();
    for part in template.parts() {
        match part {
            TemplatePart::Fixed(text) => rendered.push_str(text),
            TemplatePart::Placeholder(p) => {
                let value = values.get(&p.id).ok_or_else(|| RepresentationError::MissingValue {
                    id: p.id.clone(),
                    values: values.clone(),
                    template: template.shape(),
                })?;
                rendered.push_str(value);
            }
        }
    }
    Ok(rendered)
}

/// Extract placeholder values from `text`, which must match `template` completely.
pub fn placeholder_values(text: &str, template: &Template) -> Result<PlaceholderValues, RepresentationError> {
    let unmatched = || RepresentationError::Unmatched { input: text.to_string(), template: template.shape() };
    let caps = template.full_regex().captures(text).ok_or_else(unmatched)?;

    let mut values = PlaceholderValues::new();
    for (group, placeholder) in template.placeholders().enumerate() {
        let value = caps.get(group + 1).ok_or_else(unmatched)?.as_str();
        match values.get(&placeholder.id) {
            Some(existing) if existing != value => {
                return Err(RepresentationError::ConflictingValues {
                    id: placeholder.id.clone(),
                    input: text.to_string(),
                    template: template.shape(),
                });
            }
            _ => {
                values.insert(placeholder.id.clone(), value.to_string());
            }
        }
    }
    Ok(values)
}

/// Build an entity from user-typed display text.
pub fn from_display_text(text: &str, display: &Template, atom: &Template) -> Result<Entity, RepresentationError> {
    from_values(placeholder_values(text, display)?, display, atom)
}

/// Build an entity from atom text.
pub fn from_atom_text(text: &str, display: &Template, atom: &Template) -> Result<Entity, RepresentationError> {
    from_values(placeholder_values(text, atom)?, display, atom)
}

fn from_values(values: PlaceholderValues, display: &Template, atom: &Template) -> Result<Entity, RepresentationError> {
    let display_text = render(&values, display)?;
    let atom_text = render(&values, atom)?;
    Ok(Entity { values, display: display_text, atom: atom_text })
}

/// A display/atom template pair for one kind of entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCodec {
    display: Template,
    atom: Template,
}

impl EntityCodec {
    /// Pair two templates. Both must declare the same set of placeholder ids.
    pub fn new(display: Template, atom: Template) -> Result<Self, TemplateError> {
        let display_ids: BTreeSet<&str> = display.placeholder_ids().into_iter().collect();
        let atom_ids: BTreeSet<&str> = atom.placeholder_ids().into_iter().collect();
        if display_ids != atom_ids {
            return Err(TemplateError::MismatchedPlaceholders {
                display: display_ids.into_iter().map(str::to_string).collect(),
                atom: atom_ids.into_iter().map(str::to_string).collect(),
            });
        }
        Ok(EntityCodec { display, atom })
    }

    pub fn display_template(&self) -> &Template {
        &self.display
    }

    pub fn atom_template(&self) -> &Template {
        &self.atom
    }

    pub fn from_display_text(&self, text: &str) -> Result<Entity, RepresentationError> {
        from_display_text(text, &self.display, &self.atom)
    }

    pub fn from_atom_text(&self, text: &str) -> Result<Entity, RepresentationError> {
        from_atom_text(text, &self.display, &self.atom)
    }

    /// Build an entity from an already-parsed atom via its canonical text.
    pub fn from_atom(&self, atom: &Atom) -> Result<Entity, RepresentationError> {
        self.from_atom_text(&atom.to_string())
    }

    /// Build an entity from a value map.
    ///
    /// The map must name exactly the declared placeholders, and both rendered
    /// strings must read back to the same map.
    pub fn from_values(&self, values: PlaceholderValues) -> Result<Entity, RepresentationError> {
        let declared = self.display.placeholder_ids();
        if let Some(extra) = values.keys().find(|id| !declared.contains(&id.as_str())) {
            return Err(RepresentationError::UnexpectedValue { id: extra.clone(), template: self.display.shape() });
        }

        let entity = from_values(values, &self.display, &self.atom)?;
        for (text, template) in [(&entity.display, &self.display), (&entity.atom, &self.atom)] {
            if placeholder_values(text, template).ok().as_ref() != Some(&entity.values) {
                return Err(RepresentationError::Unmatched { input: text.clone(), template: template.shape() });
            }
        }
        Ok(entity)
    }
}
