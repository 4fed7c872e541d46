//! Completion candidates for partially typed input.
//!
//! The slot being completed is either the placeholder whose value runs up to
//! the end of the input, or the first placeholder after the matched prefix
//! (skipping over a literal the user has started or not yet typed). Each
//! candidate value is spliced into a full display string:
//!
//! ```text
//! input:   task(bu
//! head:    task(            typed: "bu"
//! result:  task(build,n)    (candidate "build", rest rendered with labels)
//! ```

use super::resolver::resolve_in;
use super::validation::{Snapshot, ValidationStatus, classify};
use crate::exchange::FactPool;
use crate::template::{PrefixMatch, Template};
use crate::{Placeholder, TemplatePart};

/// Caller-side filtering for [`TemplateSuggester::suggest_filtered`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestOptions {
    /// Full suggestion strings to hide, e.g. values already chosen elsewhere.
    pub excluded: Vec<String>,
}

impl SuggestOptions {
    pub fn exclude(mut self, suggestion: impl Into<String>) -> Self {
        self.excluded.push(suggestion.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    pub items: Vec<String>,
    /// The current input was itself one of the raw suggestions.
    pub matches_input: bool,
}

/// The slot a suggestion fills, and the text that goes in front of it.
struct Target<'t> {
    head: String,
    part_index: usize,
    placeholder: &'t Placeholder,
    typed: String,
}

#[derive(Clone, Copy)]
pub struct TemplateSuggester<'a> {
    template: &'a Template,
    pool: &'a dyn FactPool,
}

impl<'a> TemplateSuggester<'a> {
    pub fn new(template: &'a Template, pool: &'a dyn FactPool) -> Self {
        TemplateSuggester { template, pool }
    }

    /// Full display strings completing the slot currently being typed.
    ///
    /// Empty for INVALID input, for unconstrained slots and when nothing is
    /// left to fill.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        let scan = PrefixMatch::scan(input, self.template);
        let mut snapshot = Snapshot::new(self.pool);
        if classify(input, &scan, &mut snapshot) == ValidationStatus::Invalid {
            log::trace!("no suggestions for invalid input {input:?}");
            return Vec::new();
        }
        let Some(target) = target(input, &scan) else {
            return Vec::new();
        };
        if target.placeholder.source.is_any() {
            return Vec::new();
        }

        let rest = remainder(&self.template.parts()[target.part_index + 1..]);
        let candidates = resolve_in(snapshot.atoms(), &target.placeholder.source, &target.typed);
        log::trace!("{} candidates for {:?} after {:?}", candidates.len(), target.placeholder.id, target.head);
        candidates.into_iter().map(|value| format!("{}{}{}", target.head, value, rest)).collect()
    }

    /// [`suggest`](Self::suggest) without the current input and without `options.excluded`.
    pub fn suggest_filtered(&self, input: &str, options: &SuggestOptions) -> Suggestions {
        let mut items = self.suggest(input);
        let before = items.len();
        items.retain(|item| item != input);
        let matches_input = items.len() != before;
        items.retain(|item| !options.excluded.contains(item));
        Suggestions { items, matches_input }
    }

    /// The input followed by what the template still expects, with open
    /// placeholders shown by label. Empty for INVALID input.
    ///
    /// ```
    /// use atomform::{AtomPool, TemplateSuggester, compile_unconstrained};
    ///
    /// let template = compile_unconstrained("::a depends on ::b").unwrap();
    /// let pool = AtomPool::new();
    /// let suggester = TemplateSuggester::new(&template, &pool);
    /// assert_eq!(suggester.prompt_text("x dep"), "x depends on b");
    /// ```
    pub fn prompt_text(&self, input: &str) -> String {
        let scan = PrefixMatch::scan(input, self.template);
        if classify(input, &scan, &mut Snapshot::new(self.pool)) == ValidationStatus::Invalid {
            return String::new();
        }

        let tail = scan.tail(input);
        let mut prompt = input.to_string();
        match scan.next_part() {
            Some(TemplatePart::Fixed(text)) if !tail.is_empty() => {
                prompt.push_str(&text[tail.len()..]);
                prompt.push_str(&remainder(&self.template.parts()[scan.matched + 1..]));
            }
            _ => prompt.push_str(&remainder(&self.template.parts()[scan.matched..])),
        }
        prompt
    }
}

fn target<'t>(input: &str, scan: &PrefixMatch<'t>) -> Option<Target<'t>> {
    if let Some(slot) = scan.slots.last() {
        if slot.part_index + 1 == scan.matched && slot.end == input.len() {
            return Some(Target {
                head: input[..slot.start].to_string(),
                part_index: slot.part_index,
                placeholder: slot.placeholder,
                typed: slot.value.clone(),
            });
        }
    }

    let parts = scan.template().parts();
    let mut head = input[..scan.end].to_string();
    match parts.get(scan.matched)? {
        TemplatePart::Fixed(text) => {
            // The literal is skipped over, so nothing of the next value is typed yet.
            head.push_str(text);
            let placeholder = parts.get(scan.matched + 1)?.as_placeholder()?;
            Some(Target { head, part_index: scan.matched + 1, placeholder, typed: String::new() })
        }
        TemplatePart::Placeholder(placeholder) => {
            Some(Target { head, part_index: scan.matched, placeholder, typed: scan.tail(input).to_string() })
        }
    }
}

/// Remaining parts as display text: literals verbatim, placeholders by label.
fn remainder(parts: &[TemplatePart]) -> String {
    parts.iter().map(TemplatePart::display_text).collect()
}
