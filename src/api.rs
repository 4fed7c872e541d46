use crate::codec::{Entity, EntityCodec};
use crate::exchange::FactPool;
use crate::input::{SuggestOptions, Suggestions, TemplateSuggester, TemplateValidator, ValidationStatus};
use crate::template::{Template, compile};
use crate::{RepresentationError, TemplateError};

/// Label and value source of one placeholder id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// Placeholder id as written after `::` in the templates.
    pub id: String,
    /// Hint shown for the placeholder while it is still open.
    pub label: String,
    /// Value source descriptor: `""`, `"#int"` or `"predicate[index]"`.
    pub value_source: String,
}

/// Static configuration of one kind of entity.
///
/// Every placeholder id used in either template must have an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindDefinition {
    pub display_template: String,
    pub atom_template: String,
    pub attributes: Vec<AttributeDefinition>,
}

impl KindDefinition {
    pub fn new(display_template: impl Into<String>, atom_template: impl Into<String>) -> Self {
        Self { display_template: display_template.into(), atom_template: atom_template.into(), attributes: Vec::new() }
    }

    /// Add (or replace) the attribute for `id`.
    pub fn attribute(mut self, id: &str, label: &str, value_source: &str) -> Self {
        self.attributes.retain(|a| a.id != id);
        self.attributes.push(AttributeDefinition {
            id: id.to_string(),
            label: label.to_string(),
            value_source: value_source.to_string(),
        });
        self
    }

    fn lookup(&self, id: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.id == id)
    }
}

/// A compiled [`KindDefinition`].
///
/// # Example
/// ```
/// use atomform::{AtomPool, KindDefinition, EntityKind, ValidationStatus};
///
/// let def = KindDefinition::new("::name needs ::n", "task(::name,::n)")
///     .attribute("name", "task", "")
///     .attribute("n", "count", "#int");
/// let kind = EntityKind::compile(&def).unwrap();
///
/// let pool = AtomPool::new();
/// assert_eq!(kind.validate(&pool, "build needs 1"), ValidationStatus::Valid);
/// assert_eq!(kind.codec().from_display_text("build needs 3").unwrap().atom_text(), "task(build,3)");
/// ```
#[derive(Debug, Clone)]
pub struct EntityKind {
    codec: EntityCodec,
}

impl EntityKind {
    pub fn compile(definition: &KindDefinition) -> Result<Self, TemplateError> {
        let label_of = |id: &str| definition.lookup(id).map(|a| a.label.clone());
        let source_of = |id: &str| definition.lookup(id).map(|a| a.value_source.clone());

        let display = compile(&definition.display_template, label_of, source_of)?;
        let atom = compile(&definition.atom_template, label_of, source_of)?;
        log::debug!("compiled kind {:?} / {:?}", display.shape(), atom.shape());
        Ok(Self { codec: EntityCodec::new(display, atom)? })
    }

    pub fn codec(&self) -> &EntityCodec {
        &self.codec
    }

    pub fn display_template(&self) -> &Template {
        self.codec.display_template()
    }

    pub fn atom_template(&self) -> &Template {
        self.codec.atom_template()
    }

    /// Validator for live input in the display template's syntax.
    pub fn validator<'a>(&'a self, pool: &'a dyn FactPool) -> TemplateValidator<'a> {
        TemplateValidator::new(self.display_template(), pool)
    }

    pub fn suggester<'a>(&'a self, pool: &'a dyn FactPool) -> TemplateSuggester<'a> {
        TemplateSuggester::new(self.display_template(), pool)
    }

    pub fn validate(&self, pool: &dyn FactPool, input: &str) -> ValidationStatus {
        self.validator(pool).validate(input)
    }

    pub fn suggest(&self, pool: &dyn FactPool, input: &str, options: &SuggestOptions) -> Suggestions {
        self.suggester(pool).suggest_filtered(input, options)
    }

    pub fn entity(&self, display_text: &str) -> Result<Entity, RepresentationError> {
        self.codec.from_display_text(display_text)
    }
}
