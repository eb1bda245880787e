//! Demonstration program for the optable option tables.
//!
//! Parses a small, representative set of options and prints the
//! resulting configuration, one field per line. The integration tests
//! drive this binary to observe the behavior that only shows at the
//! process boundary: `--help`, `--usage`, and `--version` printing and
//! terminating, and parse failures mapping to a non-zero exit status.

use std::cell::RefCell;
use std::process;

use optable_core::{Key, OptionSpec, OptionTable, Program, parse_args};
use tracing::debug;

#[derive(Debug, Default)]
struct Config {
    verbose: bool,
    output: Option<String>,
    level: u32,
    color: Option<String>,
    files: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = RefCell::new(Config::default());
    let program = Program::new("optable-demo")
        .with_description("Exercise the optable option tables")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_contact("bug-optable@example.org");

    let mut table = OptionTable::new()
        .header("Output control:", 1)
        .option(
            'v' as Key,
            OptionSpec::new("verbose")
                .with_doc("Explain what is being done")
                .in_group(1),
            |_, _, _| {
                config.borrow_mut().verbose = true;
                true
            },
        )
        .option(
            'o' as Key,
            OptionSpec::new("output")
                .with_placeholder("FILE")
                .with_doc("Write the result to FILE")
                .in_group(1),
            |_, value, _| {
                config.borrow_mut().output = Some(value.to_string());
                true
            },
        )
        .option(
            'l' as Key,
            OptionSpec::new("level")
                .with_placeholder("N")
                .with_doc("Set the frobnication level")
                .in_group(1),
            |_, value, ctx| match value.parse() {
                Ok(level) => {
                    config.borrow_mut().level = level;
                    true
                }
                Err(_) => {
                    ctx.error(format_args!("invalid level '{value}'"));
                    false
                }
            },
        )
        .header("Appearance:", 2)
        .option(
            'c' as Key,
            OptionSpec::new("color")
                .with_placeholder("WHEN")
                .optional_arg()
                .with_doc("Colorize the output (WHEN is always, never, or auto)")
                .in_group(2),
            |_, value, _| {
                let when = if value.is_empty() { "always" } else { value };
                config.borrow_mut().color = Some(when.to_string());
                true
            },
        )
        .alias(256, OptionSpec::alias("colour"))
        .positional(|_, value, _| {
            config.borrow_mut().files.push(value.to_string());
            true
        });

    if !parse_args(&program, "[FILE...]", std::env::args().skip(1), &mut table) {
        process::exit(1);
    }
    drop(table);

    let config = config.into_inner();
    debug!(?config, "parsed command line");
    println!("verbose: {}", config.verbose);
    println!("output: {}", config.output.as_deref().unwrap_or("-"));
    println!("level: {}", config.level);
    println!("color: {}", config.color.as_deref().unwrap_or("auto"));
    println!("files: {}", config.files.join(" "));
}
