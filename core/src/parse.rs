//! The argument scanner and parse entry points.
//!
//! Tokens are scanned left to right and handlers are invoked
//! immediately, per matched token, in argument-vector order. Matching a
//! handler's option after a failing one never happens: the scan stops at
//! the first handler that returns `false` or at the first scan error.

use std::io::{self, Write};
use std::process;

use tracing::{debug, trace};

use crate::error::{ParseContext, ParseError};
use crate::help::{render_help, render_usage, render_version};
use crate::table::{AutoKind, Compiled, OptionTable, compile};
use crate::types::{KEY_ARG, Program};

/// Result of one parse call, before exit behavior is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every matched handler succeeded and the scanner found no error.
    Success,
    /// A handler returned `false`, or the scanner rejected the argument
    /// vector. A diagnostic has been written to the error stream.
    Failure,
    /// An automatic option (`--help`, `--usage`, `--version`) printed
    /// its text; the process should terminate with the carried status.
    Exit(i32),
}

/// Parses `argv` (program name excluded) against `table`.
///
/// For each recognized option the registered handler is invoked with the
/// matched key, the option's argument value (empty when none), and the
/// parse context. Returns `false` if any handler returns `false` or if
/// the scanner rejects the argument vector; `true` otherwise.
///
/// `--help`, `--usage`, and `--version` print to stdout and terminate
/// the process with status 0 instead of returning. Use [`parse_with`] to
/// observe that path without exiting.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use optable_core::{Key, OptionSpec, OptionTable, Program, parse_args};
///
/// let verbose = Cell::new(false);
/// let mut table = OptionTable::new().option(
///     'v' as Key,
///     OptionSpec::new("verbose").with_doc("Explain what is being done"),
///     |_, _, _| {
///         verbose.set(true);
///         true
///     },
/// );
///
/// let program = Program::new("frob").with_version("1.4.0");
/// assert!(parse_args(&program, "[FILE...]", ["--verbose"], &mut table));
/// assert!(verbose.get());
/// ```
pub fn parse_args<I, S>(
    program: &Program,
    args_doc: &str,
    argv: I,
    table: &mut OptionTable<'_>,
) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = io::stdout();
    let mut err = io::stderr();
    match parse_with(program, args_doc, argv, table, &mut out, &mut err) {
        ParseOutcome::Success => true,
        ParseOutcome::Failure => false,
        ParseOutcome::Exit(code) => {
            let _ = out.flush();
            process::exit(code);
        }
    }
}

/// Like [`parse_args`], but writes to the supplied sinks and reports
/// [`ParseOutcome::Exit`] instead of terminating the process.
pub fn parse_with<I, S, O, E>(
    program: &Program,
    args_doc: &str,
    argv: I,
    table: &mut OptionTable<'_>,
    out: &mut O,
    err: &mut E,
) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    O: Write,
    E: Write,
{
    let compiled = match compile(table) {
        Ok(compiled) => compiled,
        Err(error) => {
            let _ = writeln!(err, "{}: {}", program.name, error);
            return ParseOutcome::Failure;
        }
    };

    let args: Vec<String> = argv.into_iter().map(|s| s.as_ref().to_string()).collect();
    let mut ctx = ParseContext::new(&program.name, err);
    match scan(program, args_doc, &args, &compiled, table, &mut ctx, out) {
        Ok(outcome) => outcome,
        Err(error) => {
            ctx.report(&error);
            ParseOutcome::Failure
        }
    }
}

fn scan<O: Write>(
    program: &Program,
    args_doc: &str,
    args: &[String],
    compiled: &Compiled,
    table: &mut OptionTable<'_>,
    ctx: &mut ParseContext<'_>,
    out: &mut O,
) -> Result<ParseOutcome, ParseError> {
    let mut i = 0;
    let mut only_positional = false;

    while i < args.len() {
        let token = args[i].as_str();
        i += 1;

        if !only_positional && token == "--" {
            only_positional = true;
        } else if !only_positional && token.starts_with("--") {
            let body = &token[2..];
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            let option = &compiled.options[compiled.find_long(name)?];
            if let Some(auto) = option.auto {
                if inline.is_some() {
                    return Err(ParseError::UnexpectedValue(option.primary_long().to_string()));
                }
                emit_auto(auto, program, args_doc, compiled, out);
                return Ok(ParseOutcome::Exit(0));
            }
            trace!(name, key = option.key, "matched long option");

            let value = if option.requires_value() {
                match inline {
                    Some(value) => value.to_string(),
                    None if i < args.len() => {
                        i += 1;
                        args[i - 1].clone()
                    }
                    None => return Err(ParseError::MissingValue(format!("--{name}"))),
                }
            } else if option.optional {
                inline.unwrap_or_default().to_string()
            } else if inline.is_some() {
                return Err(ParseError::UnexpectedValue(name.to_string()));
            } else {
                String::new()
            };

            if !table.invoke(option.entry, option.key, &value, ctx) {
                debug!(key = option.key, "handler reported failure");
                return Ok(ParseOutcome::Failure);
            }
        } else if !only_positional && token.len() > 1 && token.starts_with('-') {
            let cluster: Vec<char> = token[1..].chars().collect();
            let mut j = 0;
            while j < cluster.len() {
                let short = cluster[j];
                j += 1;

                let option = &compiled.options[compiled.find_short(short)?];
                if let Some(auto) = option.auto {
                    emit_auto(auto, program, args_doc, compiled, out);
                    return Ok(ParseOutcome::Exit(0));
                }
                trace!(short = %short, key = option.key, "matched short option");

                let rest: String = cluster[j..].iter().collect();
                let value = if option.requires_value() {
                    j = cluster.len();
                    if !rest.is_empty() {
                        rest
                    } else if i < args.len() {
                        i += 1;
                        args[i - 1].clone()
                    } else {
                        return Err(ParseError::MissingValue(format!("-{short}")));
                    }
                } else if option.optional {
                    // An optional argument must be attached to the flag.
                    j = cluster.len();
                    rest
                } else {
                    String::new()
                };

                if !table.invoke(option.entry, option.key, &value, ctx) {
                    debug!(key = option.key, "handler reported failure");
                    return Ok(ParseOutcome::Failure);
                }
            }
        } else if compiled.has_positional {
            if let Some(handler) = table.positional.as_mut() {
                if !handler(KEY_ARG, token, ctx) {
                    debug!(token, "positional handler reported failure");
                    return Ok(ParseOutcome::Failure);
                }
            }
        } else {
            return Err(ParseError::UnexpectedArgument(token.to_string()));
        }
    }

    Ok(ParseOutcome::Success)
}

fn emit_auto<O: Write>(
    kind: AutoKind,
    program: &Program,
    args_doc: &str,
    compiled: &Compiled,
    out: &mut O,
) {
    let text = match kind {
        AutoKind::Help => render_help(program, args_doc, compiled),
        AutoKind::Usage => render_usage(program, args_doc, compiled),
        AutoKind::Version => render_version(program),
    };
    let _ = out.write_all(text.as_bytes());
}
