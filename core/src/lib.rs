//! Typed, callback-driven option tables for command-line programs.
//!
//! This crate provides the classic grouped-option command-line surface
//! as a small typed layer:
//!
//! - [`OptionSpec`] — one record per recognized flag: long name, argument
//!   placeholder, [`FlagKind`], documentation, and help group.
//! - [`OptionTable`] — insertion-ordered table mapping integer [`Key`]s
//!   to option entries, group headers, and per-option handlers.
//! - [`parse_args`] / [`parse_with`] — the parse entry points: scan an
//!   argument vector, invoke each matched handler immediately with
//!   `(key, value, context)`, and collapse the result to a single
//!   success/failure signal.
//! - [`ParseContext`] — the per-invocation handle handlers use to report
//!   errors into the current diagnostic channel.
//!
//! Long options support unambiguous prefixes and aliases; keys in the
//! printable ASCII range double as short options, including grouped
//! short clusters. `--help`, `--usage`, and `--version` are registered
//! automatically, print the fixed grouped layout, and terminate the
//! process.
//!
//! # Example
//!
//! ```
//! use std::cell::{Cell, RefCell};
//! use optable_core::{Key, OptionSpec, OptionTable, Program, parse_args};
//!
//! let verbose = Cell::new(false);
//! let output = RefCell::new(String::new());
//!
//! let mut table = OptionTable::new()
//!     .header("Output control:", 1)
//!     .option(
//!         'v' as Key,
//!         OptionSpec::new("verbose").with_doc("Explain what is being done").in_group(1),
//!         |_, _, _| {
//!             verbose.set(true);
//!             true
//!         },
//!     )
//!     .option(
//!         'o' as Key,
//!         OptionSpec::new("output")
//!             .with_placeholder("FILE")
//!             .with_doc("Write the result to FILE")
//!             .in_group(1),
//!         |_, value, _| {
//!             *output.borrow_mut() = value.to_string();
//!             true
//!         },
//!     );
//!
//! let program = Program::new("frob")
//!     .with_description("Frobnicate the inputs")
//!     .with_version("1.4.0")
//!     .with_contact("bug-frob@example.org");
//!
//! assert!(parse_args(&program, "[FILE...]", ["-v", "--output=out.txt"], &mut table));
//! assert!(verbose.get());
//! assert_eq!(*output.borrow(), "out.txt");
//! ```

mod error;
mod help;
mod parse;
mod table;
mod types;

pub use error::{ParseContext, ParseError, TableError};
pub use parse::{ParseOutcome, parse_args, parse_with};
pub use table::{Handler, OptionTable};
pub use types::{FlagKind, KEY_ARG, Key, OptionSpec, Program};
