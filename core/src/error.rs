//! Parse diagnostics and the per-invocation error reporter.
//!
//! [`ParseError`] covers everything the scanner itself can reject;
//! [`TableError`] covers malformed option tables. Both surface to callers
//! only as the boolean result of [`parse_args`](crate::parse_args), after
//! being written to the diagnostic stream in the fixed two-line shape:
//!
//! ```text
//! frob: unrecognized option '--bogus'
//! Try `frob --help' or `frob --usage' for more information.
//! ```

use std::fmt;
use std::io::Write;

use thiserror::Error;

/// Errors detected while building the resolved option table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// An alias entry has no preceding non-alias option to attach to.
    #[error("alias option '--{0}' has no preceding non-alias option")]
    OrphanAlias(String),
}

/// Errors detected by the argument scanner.
///
/// The `Display` messages follow the conventional getopt wording, so
/// diagnostics read the way users of standard command-line tools expect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A long option that matches no registered name or unique prefix.
    #[error("unrecognized option '--{0}'")]
    UnrecognizedLong(String),
    /// A short option character that matches no registered key.
    #[error("invalid option -- '{0}'")]
    UnrecognizedShort(char),
    /// A long-option prefix that matches more than one distinct option.
    #[error("option '--{0}' is ambiguous")]
    AmbiguousLong(String),
    /// An option that requires an argument was given none. Carries the
    /// form as typed (`"-o"` or `"--output"`).
    #[error("option '{0}' requires an argument")]
    MissingValue(String),
    /// An inline value was attached to an option that takes none.
    #[error("option '--{0}' doesn't allow an argument")]
    UnexpectedValue(String),
    /// A positional token appeared but no positional handler is
    /// registered.
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Context handle passed to every handler invocation during one parse
/// call.
///
/// It is the capability through which a handler reports errors back into
/// the current invocation's diagnostic channel. It never outlives the
/// parse call that created it.
///
/// # Examples
///
/// A handler validating its value:
///
/// ```
/// use optable_core::{Key, OptionSpec, OptionTable, ParseContext};
///
/// let table = OptionTable::new().option(
///     'l' as Key,
///     OptionSpec::new("level").with_placeholder("N"),
///     |_, value, ctx: &mut ParseContext<'_>| match value.parse::<u32>() {
///         Ok(_) => true,
///         Err(_) => {
///             ctx.error(format_args!("invalid level '{value}'"));
///             false
///         }
///     },
/// );
/// assert_eq!(table.len(), 1);
/// ```
pub struct ParseContext<'a> {
    program: &'a str,
    err: &'a mut dyn Write,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(program: &'a str, err: &'a mut dyn Write) -> Self {
        Self { program, err }
    }

    /// The program identifier of the current parse invocation.
    pub fn program(&self) -> &str {
        self.program
    }

    /// Formats and writes a diagnostic associated with the current parse
    /// invocation.
    ///
    /// The message is prefixed with the program identifier and followed
    /// by the standard "Try `--help`" hint. Write failures on the
    /// diagnostic stream are ignored.
    pub fn error(&mut self, message: fmt::Arguments<'_>) {
        let _ = writeln!(self.err, "{}: {}", self.program, message);
        let _ = writeln!(
            self.err,
            "Try `{0} --help' or `{0} --usage' for more information.",
            self.program
        );
    }

    pub(crate) fn report(&mut self, error: &ParseError) {
        self.error(format_args!("{error}"));
    }
}

impl fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}
