use super::{SuggestOptions, TemplateSuggester, TemplateValidator, ValidationStatus};
use crate::template::{Template, compile, match_prefix};
use crate::{AtomPool, EntityCodec, compile_unconstrained, extract_program_atoms, parse_all, parse_atom};
use pretty_assertions::assert_eq;

use ValidationStatus::{Incomplete, Invalid, Valid};

/// `task(::name,::n)` with `n` drawn from `#int` and `name` unconstrained.
fn task_template() -> Template {
    compile("task(::name,::n)", |id| Some(id.to_string()), |id| Some(if id == "n" { "#int" } else { "" }.to_string()))
        .unwrap()
}

/// `::from -> ::to`, both drawn from `node/1` facts.
fn edge_template() -> Template {
    compile("::from -> ::to", |id| Some(id.to_string()), |_| Some("node".to_string())).unwrap()
}

fn facts(program: &str) -> AtomPool {
    parse_all(extract_program_atoms(program)).atoms.into_iter().collect()
}

fn check_all(template: &Template, pool: &AtomPool, cases: &[(ValidationStatus, &str)]) {
    let validator = TemplateValidator::new(template, pool);
    for (expected, input) in cases {
        assert_eq!((validator.validate(input), *input), (*expected, *input));
    }
}

#[test]
fn task_template_classification() {
    let cases = vec![
        (Incomplete, ""),
        (Incomplete, "tas"),
        (Incomplete, "task("),
        (Incomplete, "task(build"),
        (Incomplete, "task(build,"),
        (Incomplete, "task(build,1"),
        (Valid, "task(build,1)"),
        (Valid, "task(build,120)"),
        (Valid, "task(\"a b\",0)"),
        (Invalid, "task(build,1a"),
        (Invalid, "task(build,01)"),
        (Invalid, "task(Build"),
        (Invalid, "job("),
        (Invalid, "task(build,1)x"),
        (Invalid, "task(build,-1)"),
    ];
    check_all(&task_template(), &AtomPool::new(), &cases);
}

#[test]
fn unconstrained_template_classification() {
    let template = compile_unconstrained("::a depends on ::b").unwrap();
    let cases = vec![
        (Valid, "x depends on y"),
        (Valid, "x depends on \"y z\""),
        (Incomplete, "x"),
        (Incomplete, "x depends"),
        (Incomplete, "x depends on "),
        (Invalid, "x relies on y"),
        (Invalid, " x depends on y"),
    ];
    check_all(&template, &AtomPool::new(), &cases);
}

#[test]
fn unconstrained_template_yields_value_map() {
    let display = compile_unconstrained("::a depends on ::b").unwrap();
    let atom = compile_unconstrained("depends(::a,::b)").unwrap();
    let entity = EntityCodec::new(display, atom).unwrap().from_display_text("x depends on y").unwrap();
    assert_eq!(entity.value("a"), Some("x"));
    assert_eq!(entity.value("b"), Some("y"));
    assert_eq!(entity.atom_text(), "depends(x,y)");
}

#[test]
fn fact_backed_template_classification() {
    let pool = facts("node(alpha). node(beta).");
    let cases = vec![
        (Incomplete, "al"),
        (Incomplete, "alpha"),
        (Incomplete, "alpha -> bet"),
        (Valid, "alpha -> beta"),
        (Valid, "beta -> beta"),
        (Invalid, "alpha -> gamma"),
        (Invalid, "gamma -> beta"),
        // A strict prefix of a known value only counts while it is being typed.
        (Invalid, "al -> beta"),
    ];
    check_all(&edge_template(), &pool, &cases);
}

#[test]
fn validation_is_idempotent() {
    let template = task_template();
    let pool = AtomPool::new();
    let validator = TemplateValidator::new(&template, &pool);
    for input in ["", "task(b", "task(build,1", "task(build,1a", "task(build,7)"] {
        assert_eq!(validator.validate(input), validator.validate(input));
    }
}

#[test]
fn incomplete_input_can_be_extended() {
    let pool = facts("node(alpha). node(beta).");
    let alphabet: Vec<char> = ('a'..='z').chain('0'..='9').chain([' ', '-', '>', '(', ')', ',']).collect();

    let templates = [task_template(), edge_template()];
    let inputs: [&[&str]; 2] =
        [&["", "ta", "task(", "task(b", "task(b,", "task(b,4"], &["", "al", "alpha -", "alpha -> b"]];
    for (template, inputs) in templates.iter().zip(inputs) {
        let validator = TemplateValidator::new(template, &pool);
        for input in inputs {
            assert_eq!(validator.validate(input), Incomplete, "{input}");
            let extendable = alphabet.iter().any(|c| validator.validate(&format!("{input}{c}")) != Invalid);
            assert!(extendable, "no extension of {input:?} stays valid");
        }
    }
}

#[test]
fn partially_typed_string_is_invalid() {
    // The value grammar has no prefix form of a quoted string, so an unclosed
    // string is rejected even though closing it would make the input valid.
    let template = compile_unconstrained("note(::text)").unwrap();
    let pool = AtomPool::new();
    let validator = TemplateValidator::new(&template, &pool);
    assert_eq!(validator.validate("note(\"ab"), Invalid);
    assert_eq!(validator.validate("note(\"ab\""), Incomplete);
    assert_eq!(validator.validate("note(\"ab\")"), Valid);
}

#[test]
fn empty_input_prefix_depends_on_first_part() {
    let leading_placeholder = compile_unconstrained("::a depends on ::b").unwrap();
    assert!(match_prefix("", &leading_placeholder).is_empty());
    assert!(match_prefix("", &task_template()).is_empty());
}

#[test]
fn int_suggestions_extend_typed_number() {
    let template = task_template();
    let pool = AtomPool::new();
    let suggester = TemplateSuggester::new(&template, &pool);

    let found = suggester.suggest("task(build,1");
    assert_eq!(found.len(), 11);
    assert_eq!(&found[..3], ["task(build,1)", "task(build,10)", "task(build,11)"]);

    let found = suggester.suggest("task(build,");
    assert_eq!(found.first().map(String::as_str), Some("task(build,0)"));
    assert_eq!(found.len(), 10);
}

#[test]
fn no_suggestions_for_invalid_or_unconstrained_slots() {
    let template = task_template();
    let pool = AtomPool::new();
    let suggester = TemplateSuggester::new(&template, &pool);
    assert!(suggester.suggest("task(build,1a").is_empty());
    assert!(suggester.suggest("task(bu").is_empty());
    assert!(suggester.suggest("task(build,1)x").is_empty());
}

#[test]
fn fact_suggestions_follow_pool_changes() {
    let template = edge_template();
    let mut pool = facts("node(alpha). node(beta).");

    let found = TemplateSuggester::new(&template, &pool).suggest("alpha -> ");
    assert_eq!(found, vec!["alpha -> alpha", "alpha -> beta"]);

    pool.insert(parse_atom("node(bravo)").unwrap());
    let found = TemplateSuggester::new(&template, &pool).suggest_filtered("alpha -> b", &SuggestOptions::default());
    assert_eq!(found.items, vec!["alpha -> beta", "alpha -> bravo"]);
    assert!(!found.matches_input);
}

#[test]
fn prompt_text_fills_in_rest_of_template() {
    let template = task_template();
    let pool = AtomPool::new();
    let suggester = TemplateSuggester::new(&template, &pool);
    let cases = vec![
        ("task(name,n)", ""),
        ("task(name,n)", "ta"),
        ("task(bu,n)", "task(bu"),
        ("task(bu,1)", "task(bu,1"),
        ("task(bu,1)", "task(bu,1)"),
        ("", "task(bu,1a"),
    ];
    for (expected, input) in cases {
        assert_eq!(suggester.prompt_text(input), expected, "{input}");
    }
}
