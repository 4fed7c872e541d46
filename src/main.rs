mod debug_report;

use atomform::{AtomPool, EntityKind, KindDefinition, SuggestOptions, extract_program_atoms, parse_all};
use std::io::{self, IsTerminal, Read};

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let kind = match EntityKind::compile(&config.definition) {
        Ok(kind) => kind,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let parsed = parse_all(extract_program_atoms(&config.facts));
    let pool: AtomPool = parsed.atoms.into_iter().collect();
    let options = SuggestOptions { excluded: config.excluded };
    debug_report::print_run(&config.input, &kind, &pool, &options, config.color);
}

struct CliConfig {
    input: String,
    definition: KindDefinition,
    facts: String,
    excluded: Vec<String>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut display: Option<String> = None;
    let mut atom: Option<String> = None;
    let mut attributes: Vec<(String, String, String)> = Vec::new();
    let mut facts = String::new();
    let mut excluded = Vec::new();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("atomform {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--display" => display = Some(expect_value(&mut args, "--display")?),
            "--atom" => atom = Some(expect_value(&mut args, "--atom")?),
            "--attr" => attributes.push(parse_attribute(&expect_value(&mut args, "--attr")?)?),
            "--facts" => {
                facts.push_str(&expect_value(&mut args, "--facts")?);
                facts.push('\n');
            }
            "--exclude" => excluded.push(expect_value(&mut args, "--exclude")?),
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
            _ if arg.starts_with("--display=") => display = Some(arg.trim_start_matches("--display=").to_string()),
            _ if arg.starts_with("--atom=") => atom = Some(arg.trim_start_matches("--atom=").to_string()),
            _ if arg.starts_with("--attr=") => attributes.push(parse_attribute(arg.trim_start_matches("--attr="))?),
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let display = display.ok_or_else(|| format!("error: --display is required\n\n{}", help_text()))?;
    let atom = atom.ok_or_else(|| format!("error: --atom is required\n\n{}", help_text()))?;
    let definition = attributes
        .iter()
        .fold(KindDefinition::new(display, atom), |def, (id, label, source)| def.attribute(id, label, source));

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    Ok(CliConfig { input, definition, facts, excluded, color })
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

/// `id=label:source`; the source part is optional.
fn parse_attribute(value: &str) -> Result<(String, String, String), String> {
    let (id, rest) =
        value.split_once('=').ok_or_else(|| format!("error: invalid --attr '{value}' (expected id=label:source)"))?;
    if id.is_empty() {
        return Err(format!("error: invalid --attr '{value}' (empty id)"));
    }
    let (label, source) = rest.split_once(':').unwrap_or((rest, ""));
    Ok((id.to_string(), label.to_string(), source.to_string()))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    let trimmed = buffer.trim_end_matches(['\r', '\n']).len();
    buffer.truncate(trimmed);
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "atomform {version}

Validate and complete template-driven input against a pool of known atoms.

Usage:
  atomform --display <template> --atom <template> [OPTIONS] [--] <input...>

Options:
  --display <template>       Display template, e.g. \"::from -> ::to\".
  --atom <template>          Atom template, e.g. \"edge(::from,::to)\".
  --attr <id=label:source>   Label and value source of a placeholder. Repeatable.
                             Sources: empty (anything), #int, pred or pred[index].
  --facts <program>          Program text whose facts fill the atom pool. Repeatable.
  --exclude <suggestion>     Hide a suggestion. Repeatable.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Input is taken from the remaining arguments, or from stdin when none are given.
Set RUST_LOG=debug (or trace) for engine logging.

Exit codes:
  0  Success.
  1  Invalid template configuration.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_source_is_optional() {
        assert_eq!(parse_attribute("n=count:#int").unwrap(), ("n".into(), "count".into(), "#int".into()));
        assert_eq!(parse_attribute("a=thing").unwrap(), ("a".into(), "thing".into(), String::new()));
        assert_eq!(parse_attribute("to=target:edge[1]").unwrap().2, "edge[1]");
        assert!(parse_attribute("nolabel").is_err());
        assert!(parse_attribute("=x").is_err());
    }
}
