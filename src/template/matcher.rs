//! Prefix and full matching of input against a template.
//!
//! Matching is greedy and strictly left to right: parts `p1..pk` are accepted
//! while the concatenated pattern for `p1..pk` matches *some* prefix of the
//! input. The first part that cannot extend the match ends the scan; nothing
//! is retried with a different split of the earlier parts.
//!
//! ```text
//! template: "task(" ::name "," ::n ")"
//! input:    task(build,1
//!           ├───┤├───┤├┤├┤
//!           p1   p2   p3 p4      p5 ")" fails -> 4 parts matched, end = 12
//! ```
//!
//! Known limitation: when a literal could also be consumed by a neighbouring
//! placeholder value, the leftmost-first regex choice wins and no alternative
//! split is tried.

use super::Template;
use crate::{Placeholder, TemplatePart};
use regex::Regex;

/// Concatenate each part's own pattern fragment, in order.
pub fn pattern_for(parts: &[TemplatePart]) -> String {
    parts.iter().map(TemplatePart::pattern).collect()
}

/// Longest leading run of `template`'s parts that `input` can match from position 0.
pub fn match_prefix<'t>(input: &str, template: &'t Template) -> &'t [TemplatePart] {
    &template.parts()[..matched_len(input, template)]
}

/// End offset of the first match of `parts` anchored at position 0, or `0`.
pub fn match_end_position(input: &str, parts: &[TemplatePart]) -> usize {
    match Regex::new(&format!("^(?:{})", pattern_for(parts))) {
        Ok(re) => re.find(input).map_or(0, |m| m.end()),
        Err(err) => {
            log::warn!("cannot build match pattern: {err}");
            0
        }
    }
}

fn matched_len(input: &str, template: &Template) -> usize {
    (1..=template.len()).take_while(|&k| template.prefix_regex(k).is_match(input)).last().unwrap_or(0)
}

/// A placeholder value captured while matching a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMatch<'t> {
    /// Index of the placeholder's part inside the template.
    pub part_index: usize,
    pub placeholder: &'t Placeholder,
    pub value: String,
    /// Byte offsets of `value` inside the input.
    pub start: usize,
    pub end: usize,
}

/// Everything the validator and suggester need to know about a prefix match.
#[derive(Debug, Clone)]
pub struct PrefixMatch<'t> {
    template: &'t Template,
    /// Number of leading parts that matched.
    pub matched: usize,
    /// End offset of the matched prefix inside the input.
    pub end: usize,
    /// Captured placeholder values among the matched parts, in order.
    pub slots: Vec<SlotMatch<'t>>,
}

impl<'t> PrefixMatch<'t> {
    /// Match `input` against `template` and capture the placeholder values of the matched parts.
    pub fn scan(input: &str, template: &'t Template) -> Self {
        let matched = matched_len(input, template);
        let mut end = 0;
        let mut slots = Vec::new();

        if let Some(caps) = template.prefix_regex(matched).captures(input) {
            end = caps.get(0).map_or(0, |m| m.end());

            let placeholders = template.parts()[..matched]
                .iter()
                .enumerate()
                .filter_map(|(idx, part)| part.as_placeholder().map(|p| (idx, p)));
            for (group, (part_index, placeholder)) in placeholders.enumerate() {
                if let Some(m) = caps.get(group + 1) {
                    slots.push(SlotMatch {
                        part_index,
                        placeholder,
                        value: m.as_str().to_string(),
                        start: m.start(),
                        end: m.end(),
                    });
                }
            }
        }

        PrefixMatch { template, matched, end, slots }
    }

    pub fn template(&self) -> &'t Template {
        self.template
    }

    /// The matched parts.
    pub fn parts(&self) -> &'t [TemplatePart] {
        &self.template.parts()[..self.matched]
    }

    pub fn is_complete(&self) -> bool {
        self.matched == self.template.len()
    }

    /// First part not covered by the match.
    pub fn next_part(&self) -> Option<&'t TemplatePart> {
        self.template.parts().get(self.matched)
    }

    /// The input text after the matched prefix.
    pub fn tail<'i>(&self, input: &'i str) -> &'i str {
        &input[self.end..]
    }
}
