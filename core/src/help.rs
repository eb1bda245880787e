//! Help, usage, and version text rendering.
//!
//! The layout is fixed: a `Usage:` line, the program description, the
//! option list grouped by group number with the documentation column at
//! a fixed offset, and a trailing bug-report line. Groups are ordered
//! zero first, then positive ascending, then negative ascending, which
//! places the automatic entries (group −1) last.

use std::fmt::Write;

use crate::table::{Compiled, Resolved};
use crate::types::Program;

/// Column at which option documentation starts.
const DOC_COLUMN: usize = 29;

/// Sort key placing group 0 and positive groups before negative ones.
fn group_rank(group: i32) -> (bool, i32) {
    (group < 0, group)
}

enum HelpRow<'c> {
    Header(&'c str),
    Option(&'c Resolved),
}

/// Merges headers and options into display order.
fn help_rows(compiled: &Compiled) -> Vec<(i32, HelpRow<'_>)> {
    let mut rows: Vec<(i32, usize, HelpRow<'_>)> = compiled
        .headers
        .iter()
        .map(|h| (h.group, h.order, HelpRow::Header(&h.doc)))
        .chain(
            compiled
                .options
                .iter()
                .map(|o| (o.group, o.order, HelpRow::Option(o))),
        )
        .collect();
    rows.sort_by_key(|(group, order, _)| (group_rank(*group), *order));
    rows.into_iter()
        .map(|(group, _, row)| (group, row))
        .collect()
}

/// Renders the flags column of one option line, e.g.
/// `-c, --color[=WHEN], --colour[=WHEN]`.
fn flags_text(option: &Resolved) -> String {
    let mut parts = Vec::new();
    for short in &option.shorts {
        match &option.placeholder {
            Some(placeholder) if option.optional => {
                parts.push(format!("-{short}[{placeholder}]"));
            }
            Some(placeholder) => parts.push(format!("-{short} {placeholder}")),
            None => parts.push(format!("-{short}")),
        }
    }
    for long in &option.longs {
        match &option.placeholder {
            Some(placeholder) if option.optional => {
                parts.push(format!("--{long}[={placeholder}]"));
            }
            Some(placeholder) => parts.push(format!("--{long}={placeholder}")),
            None => parts.push(format!("--{long}")),
        }
    }
    parts.join(", ")
}

fn push_option_line(out: &mut String, option: &Resolved) {
    let indent = if option.shorts.is_empty() { "      " } else { "  " };
    let flags = format!("{indent}{}", flags_text(option));
    match &option.doc {
        None => {
            let _ = writeln!(out, "{flags}");
        }
        Some(doc) if flags.len() < DOC_COLUMN => {
            let _ = writeln!(out, "{flags:<width$}{doc}", width = DOC_COLUMN);
        }
        Some(doc) => {
            let _ = writeln!(out, "{flags}");
            let _ = writeln!(out, "{:width$}{doc}", "", width = DOC_COLUMN);
        }
    }
}

/// Renders the full `--help` text.
pub(crate) fn render_help(program: &Program, args_doc: &str, compiled: &Compiled) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", usage_line(program, args_doc));
    if !program.description.is_empty() {
        let _ = writeln!(out, "{}", program.description);
    }
    let _ = writeln!(out);

    let mut previous_group = None;
    for (group, row) in help_rows(compiled) {
        match row {
            HelpRow::Header(doc) => {
                if previous_group.is_some() {
                    let _ = writeln!(out);
                }
                let _ = writeln!(out, " {doc}");
            }
            HelpRow::Option(option) => {
                if previous_group.is_some_and(|p| p != group) && !out.ends_with("\n\n") {
                    // Group boundary without a header still gets a blank
                    // separator, unless the header just wrote one.
                    let _ = writeln!(out);
                }
                push_option_line(&mut out, option);
            }
        }
        previous_group = Some(group);
    }

    if !program.contact.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Report bugs to {}.", program.contact);
    }
    out
}

fn usage_line(program: &Program, args_doc: &str) -> String {
    let mut line = format!("Usage: {} [OPTION...]", program.name);
    if !args_doc.is_empty() {
        let _ = write!(line, " {args_doc}");
    }
    line
}

/// Renders the condensed `--usage` text.
pub(crate) fn render_usage(program: &Program, args_doc: &str, compiled: &Compiled) -> String {
    let mut line = format!("Usage: {}", program.name);

    let flag_shorts: String = compiled
        .options
        .iter()
        .filter(|o| o.placeholder.is_none())
        .flat_map(|o| o.shorts.iter())
        .collect();
    if !flag_shorts.is_empty() {
        let _ = write!(line, " [-{flag_shorts}]");
    }

    for option in &compiled.options {
        if let Some(placeholder) = &option.placeholder {
            for short in &option.shorts {
                if option.optional {
                    let _ = write!(line, " [-{short}[{placeholder}]]");
                } else {
                    let _ = write!(line, " [-{short} {placeholder}]");
                }
            }
        }
        for long in &option.longs {
            match &option.placeholder {
                Some(placeholder) if option.optional => {
                    let _ = write!(line, " [--{long}[={placeholder}]]");
                }
                Some(placeholder) => {
                    let _ = write!(line, " [--{long}={placeholder}]");
                }
                None => {
                    let _ = write!(line, " [--{long}]");
                }
            }
        }
    }

    if !args_doc.is_empty() {
        let _ = write!(line, " {args_doc}");
    }
    line.push('\n');
    line
}

/// Renders the `--version` text.
pub(crate) fn render_version(program: &Program) -> String {
    format!("{} {}\n", program.name, program.version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::compile;
    use crate::types::{Key, OptionSpec};
    use crate::OptionTable;

    fn sample_program() -> Program {
        Program::new("frob")
            .with_description("Frobnicate the inputs")
            .with_version("1.4.0")
            .with_contact("bug-frob@example.org")
    }

    fn sample_compiled() -> Compiled {
        let table = OptionTable::new()
            .header("Output control:", 1)
            .option(
                'v' as Key,
                OptionSpec::new("verbose")
                    .with_doc("Explain what is being done")
                    .in_group(1),
                |_, _, _| true,
            )
            .option(
                'o' as Key,
                OptionSpec::new("output")
                    .with_placeholder("FILE")
                    .with_doc("Write the result to FILE")
                    .in_group(1),
                |_, _, _| true,
            )
            .header("Appearance:", 2)
            .option(
                'c' as Key,
                OptionSpec::new("color")
                    .with_placeholder("WHEN")
                    .optional_arg()
                    .with_doc("Colorize the output")
                    .in_group(2),
                |_, _, _| true,
            )
            .alias(256, OptionSpec::alias("colour"));
        compile(&table).unwrap()
    }

    #[test]
    fn test_help_starts_with_usage_line() {
        let help = render_help(&sample_program(), "[FILE...]", &sample_compiled());
        assert!(help.starts_with("Usage: frob [OPTION...] [FILE...]\n"));
        assert!(help.contains("Frobnicate the inputs\n"));
    }

    #[test]
    fn test_help_aligns_docs_and_merges_aliases() {
        let help = render_help(&sample_program(), "", &sample_compiled());
        assert!(
            help.contains("  -v, --verbose              Explain what is being done\n"),
            "unexpected help text:\n{help}"
        );
        assert!(help.contains("  -o, --output=FILE          Write the result to FILE\n"));
        // Alias names share the antecedent's line, long flag text drops
        // the doc to a continuation line.
        assert!(help.contains("  -c, --color[=WHEN], --colour[=WHEN]\n"));
        assert!(help.contains(&format!("{:29}Colorize the output\n", "")));
    }

    #[test]
    fn test_help_orders_groups_and_places_automatic_entries_last() {
        let help = render_help(&sample_program(), "", &sample_compiled());
        let output = help.find(" Output control:").unwrap();
        let appearance = help.find(" Appearance:").unwrap();
        let auto = help.find("  -?, --help").unwrap();
        assert!(output < appearance);
        assert!(appearance < auto);
        assert!(help.contains("  -?, --help                 Give this help list\n"));
        assert!(help.contains("      --usage                Give a short usage message\n"));
        assert!(help.contains("  -V, --version              Print program version\n"));
    }

    #[test]
    fn test_help_ends_with_bug_report_line() {
        let help = render_help(&sample_program(), "", &sample_compiled());
        assert!(help.ends_with("\nReport bugs to bug-frob@example.org.\n"));
    }

    #[test]
    fn test_usage_collects_flag_shorts_into_one_cluster() {
        let usage = render_usage(&sample_program(), "[FILE...]", &sample_compiled());
        assert!(usage.starts_with("Usage: frob [-v?V] "), "got: {usage}");
        assert!(usage.contains("[-o FILE]"));
        assert!(usage.contains("[-c[WHEN]]"));
        assert!(usage.contains("[--color[=WHEN]]"));
        assert!(usage.contains("[--colour[=WHEN]]"));
        assert!(usage.trim_end().ends_with("[FILE...]"));
    }

    #[test]
    fn test_version_line() {
        assert_eq!(render_version(&sample_program()), "frob 1.4.0\n");
    }
}
