use atomform::{AtomPool, EntityKind, FactPool, PrefixMatch, SuggestOptions, TemplatePart, ValidationStatus};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, kind: &EntityKind, pool: &AtomPool, options: &SuggestOptions, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Input: \"{}\"", input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Template ━━━", ansi::GRAY));
    print_template(input, kind, &palette);
    println!("  {} {}", palette.dim("known atoms:"), palette.paint(pool.len().to_string(), ansi::BLUE));

    println!("\n{}", palette.paint("━━━ Validation ━━━", ansi::GRAY));
    let status = kind.validate(pool, input);
    let status_color = match status {
        ValidationStatus::Valid => ansi::GREEN,
        ValidationStatus::Incomplete => ansi::YELLOW,
        ValidationStatus::Invalid => ansi::RED,
    };
    println!("  {}", palette.bold(palette.paint(status.to_string(), status_color)));
    let prompt = kind.suggester(pool).prompt_text(input);
    if !prompt.is_empty() {
        println!("  {} {}", palette.dim("prompt:"), prompt);
    }

    println!("\n{}", palette.paint("━━━ Suggestions ━━━", ansi::GRAY));
    print_suggestions(input, kind, pool, options, &palette);

    println!("\n{}", palette.paint("━━━ Entity ━━━", ansi::GRAY));
    match kind.entity(input) {
        Ok(entity) => {
            for (id, value) in entity.values() {
                println!("  {} {}", palette.paint(format!("{id}:"), ansi::BLUE), value);
            }
            println!("  {} {}", palette.dim("atom:"), palette.bold(palette.paint(entity.atom_text(), ansi::GREEN)));
        }
        Err(err) => println!("  {}", palette.dim(err.to_string())),
    }
    println!();
}

fn print_template(input: &str, kind: &EntityKind, palette: &ansi::Palette) {
    let template = kind.display_template();
    let scan = PrefixMatch::scan(input, template);

    for (idx, part) in template.parts().iter().enumerate() {
        let marker = if idx < scan.matched { palette.paint("✓", ansi::GREEN) } else { palette.dim("·") };
        let text = match part {
            TemplatePart::Fixed(text) => palette.paint(format!("{text:?}"), ansi::YELLOW),
            TemplatePart::Placeholder(p) => format!(
                "{} {} {}",
                palette.paint(format!("::{}", p.id), ansi::CYAN),
                palette.dim(format!("label={:?}", p.label)),
                palette.dim(format!("source={:?}", p.source.to_string())),
            ),
        };
        println!("  {} {} {}", marker, palette.paint(format!("[{}]", idx), ansi::GRAY), text);
    }

    for slot in &scan.slots {
        println!(
            "  {} {} {}",
            palette.paint(format!("{}..{}", slot.start, slot.end), ansi::YELLOW),
            palette.paint(&slot.placeholder.id, ansi::BLUE),
            slot.value
        );
    }
    if !scan.tail(input).is_empty() {
        println!("  {} {:?}", palette.dim("unmatched:"), scan.tail(input));
    }
}

fn print_suggestions(
    input: &str,
    kind: &EntityKind,
    pool: &dyn FactPool,
    options: &SuggestOptions,
    palette: &ansi::Palette,
) {
    let found = kind.suggest(pool, input, options);
    if found.items.is_empty() {
        println!("{}", palette.dim("  No suggestions"));
    }
    for (idx, item) in found.items.iter().enumerate() {
        println!("  {} {}", palette.paint(format!("[{}]", idx), ansi::GRAY), item);
    }
    if found.matches_input {
        println!("  {}", palette.dim("(input is itself a suggestion)"));
    }
}
