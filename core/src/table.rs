//! Option tables and the resolved form the scanner consumes.
//!
//! An [`OptionTable`] is the caller-facing, insertion-ordered list of
//! header and option entries. Before scanning, [`compile`] folds it into
//! a [`Compiled`] table: alias entries are merged into their antecedent
//! option (contributing extra long names and short keys), and the
//! automatic `--help`, `--usage`, and `--version` entries are appended.

use tracing::debug;

use crate::error::{ParseContext, ParseError, TableError};
use crate::types::{FlagKind, Key, OptionSpec, short_for_key};

/// Handler invoked for each matched option: `(key, value, context)`.
///
/// The value view is empty when the option carries no argument. Returning
/// `false` fails the whole parse call.
pub type Handler<'a> = Box<dyn FnMut(Key, &str, &mut ParseContext<'_>) -> bool + 'a>;

enum TableEntry<'a> {
    Header {
        doc: String,
        group: i32,
    },
    Option {
        key: Key,
        spec: OptionSpec,
        handler: Option<Handler<'a>>,
    },
}

/// Insertion-ordered table mapping integer keys to option entries.
///
/// The table is caller-owned: it is borrowed for the duration of one
/// parse call and holds no state afterwards. Insertion order defines the
/// help-listing order within each group. Duplicate keys or names are not
/// validated; the first matching entry wins.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use optable_core::{Key, OptionSpec, OptionTable};
///
/// let verbose = Cell::new(false);
/// let table = OptionTable::new()
///     .header("Output control:", 1)
///     .option(
///         'v' as Key,
///         OptionSpec::new("verbose").with_doc("Explain what is being done").in_group(1),
///         |_, _, _| {
///             verbose.set(true);
///             true
///         },
///     );
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Default)]
pub struct OptionTable<'a> {
    entries: Vec<TableEntry<'a>>,
    pub(crate) positional: Option<Handler<'a>>,
}

impl<'a> OptionTable<'a> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an option under `key` with its handler.
    ///
    /// If `spec` has [`FlagKind::Alias`], the entry is treated as an
    /// alias and the handler is never invoked; use
    /// [`alias`](OptionTable::alias) for alias entries instead.
    pub fn option<F>(mut self, key: Key, spec: OptionSpec, handler: F) -> Self
    where
        F: FnMut(Key, &str, &mut ParseContext<'_>) -> bool + 'a,
    {
        self.entries.push(TableEntry::Option {
            key,
            spec,
            handler: Some(Box::new(handler)),
        });
        self
    }

    /// Registers an alias entry: a secondary name (and, if `key` is
    /// printable, a secondary short form) for the closest preceding
    /// non-alias option.
    pub fn alias(mut self, key: Key, spec: OptionSpec) -> Self {
        self.entries.push(TableEntry::Option {
            key,
            spec: OptionSpec {
                kind: FlagKind::Alias,
                ..spec
            },
            handler: None,
        });
        self
    }

    /// Inserts a group header line into help output.
    pub fn header(mut self, doc: &str, group: i32) -> Self {
        self.entries.push(TableEntry::Header {
            doc: doc.to_string(),
            group,
        });
        self
    }

    /// Registers the handler invoked for each positional (non-option)
    /// token, with key [`KEY_ARG`](crate::KEY_ARG). Without one, any
    /// positional token is a parse error.
    pub fn positional<F>(mut self, handler: F) -> Self
    where
        F: FnMut(Key, &str, &mut ParseContext<'_>) -> bool + 'a,
    {
        self.positional = Some(Box::new(handler));
        self
    }

    /// Number of non-alias option entries in the table.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    TableEntry::Option { spec, .. } if spec.kind != FlagKind::Alias
                )
            })
            .count()
    }

    /// Whether the table holds no option entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn invoke(
        &mut self,
        entry: usize,
        key: Key,
        value: &str,
        ctx: &mut ParseContext<'_>,
    ) -> bool {
        match self.entries.get_mut(entry) {
            Some(TableEntry::Option {
                handler: Some(handler),
                ..
            }) => handler(key, value, ctx),
            _ => true,
        }
    }
}

/// The automatic entries every table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AutoKind {
    Help,
    Usage,
    Version,
}

/// One resolved option: an antecedent entry plus any alias names folded
/// into it.
#[derive(Debug)]
pub(crate) struct Resolved {
    pub(crate) key: Key,
    pub(crate) longs: Vec<String>,
    pub(crate) shorts: Vec<char>,
    pub(crate) placeholder: Option<String>,
    pub(crate) optional: bool,
    pub(crate) doc: Option<String>,
    pub(crate) group: i32,
    pub(crate) order: usize,
    /// Index of the handler-owning entry in the source table.
    pub(crate) entry: usize,
    pub(crate) auto: Option<AutoKind>,
}

impl Resolved {
    pub(crate) fn requires_value(&self) -> bool {
        self.placeholder.is_some() && !self.optional
    }

    pub(crate) fn primary_long(&self) -> &str {
        self.longs.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug)]
pub(crate) struct HeaderRow {
    pub(crate) doc: String,
    pub(crate) group: i32,
    pub(crate) order: usize,
}

/// Resolved option table: what the scanner and the help renderer consume.
#[derive(Debug)]
pub(crate) struct Compiled {
    pub(crate) options: Vec<Resolved>,
    pub(crate) headers: Vec<HeaderRow>,
    pub(crate) has_positional: bool,
}

impl Compiled {
    /// Resolves a long-option name: exact match first, then unique
    /// prefix. User entries shadow the automatic ones because they come
    /// first in `options`.
    pub(crate) fn find_long(&self, name: &str) -> Result<usize, ParseError> {
        for (idx, option) in self.options.iter().enumerate() {
            if option.longs.iter().any(|l| l == name) {
                return Ok(idx);
            }
        }

        let mut candidate = None;
        for (idx, option) in self.options.iter().enumerate() {
            if option.longs.iter().any(|l| l.starts_with(name)) {
                match candidate {
                    None => candidate = Some(idx),
                    Some(found) if found != idx => {
                        return Err(ParseError::AmbiguousLong(name.to_string()));
                    }
                    Some(_) => {}
                }
            }
        }
        candidate.ok_or_else(|| ParseError::UnrecognizedLong(name.to_string()))
    }

    /// Resolves a short-option character.
    pub(crate) fn find_short(&self, short: char) -> Result<usize, ParseError> {
        self.options
            .iter()
            .position(|o| o.shorts.contains(&short))
            .ok_or(ParseError::UnrecognizedShort(short))
    }
}

const AUTO_ENTRY: usize = usize::MAX;

fn auto_option(kind: AutoKind, order: usize) -> Resolved {
    let (key, long, doc) = match kind {
        AutoKind::Help => ('?' as Key, "help", "Give this help list"),
        AutoKind::Usage => (0, "usage", "Give a short usage message"),
        AutoKind::Version => ('V' as Key, "version", "Print program version"),
    };
    Resolved {
        key,
        longs: vec![long.to_string()],
        shorts: short_for_key(key).into_iter().collect(),
        placeholder: None,
        optional: false,
        doc: Some(doc.to_string()),
        group: -1,
        order,
        entry: AUTO_ENTRY,
        auto: Some(kind),
    }
}

/// Folds a caller table into the resolved form.
///
/// Fails only if the table itself is malformed: an alias entry with no
/// preceding non-alias option has nothing to attach to.
pub(crate) fn compile(table: &OptionTable<'_>) -> Result<Compiled, TableError> {
    let mut options: Vec<Resolved> = Vec::new();
    let mut headers = Vec::new();

    for (order, entry) in table.entries.iter().enumerate() {
        match entry {
            TableEntry::Header { doc, group } => headers.push(HeaderRow {
                doc: doc.clone(),
                group: *group,
                order,
            }),
            TableEntry::Option { key, spec, .. } if spec.kind == FlagKind::Alias => {
                let Some(antecedent) = options.last_mut() else {
                    return Err(TableError::OrphanAlias(spec.name.clone()));
                };
                if !spec.name.is_empty() {
                    antecedent.longs.push(spec.name.clone());
                }
                antecedent.shorts.extend(short_for_key(*key));
            }
            TableEntry::Option { key, spec, .. } => options.push(Resolved {
                key: *key,
                longs: vec![spec.name.clone()],
                shorts: short_for_key(*key).into_iter().collect(),
                placeholder: spec.placeholder.clone(),
                optional: spec.kind == FlagKind::OptionalArg,
                doc: spec.doc.clone(),
                group: spec.group,
                order,
                entry: order,
                auto: None,
            }),
        }
    }

    let base = table.entries.len();
    options.push(auto_option(AutoKind::Help, base));
    options.push(auto_option(AutoKind::Usage, base + 1));
    options.push(auto_option(AutoKind::Version, base + 2));

    debug!(
        options = options.len(),
        headers = headers.len(),
        "compiled option table"
    );

    Ok(Compiled {
        options,
        headers,
        has_positional: table.positional.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> OptionTable<'static> {
        OptionTable::new()
            .option('v' as Key, OptionSpec::new("verbose"), |_, _, _| true)
            .option(
                'c' as Key,
                OptionSpec::new("color").with_placeholder("WHEN").optional_arg(),
                |_, _, _| true,
            )
            .alias(256, OptionSpec::alias("colour"))
    }

    #[test]
    fn test_compile_folds_aliases_into_antecedent() {
        let compiled = compile(&sample_table()).unwrap();

        // verbose, color, plus the three automatic entries
        assert_eq!(compiled.options.len(), 5);
        let color = &compiled.options[1];
        assert_eq!(color.longs, vec!["color", "colour"]);
        assert_eq!(color.shorts, vec!['c']);
        assert!(color.optional);
    }

    #[test]
    fn test_compile_alias_short_key_contributes_short_form() {
        let table = OptionTable::new()
            .option('x' as Key, OptionSpec::new("extract"), |_, _, _| true)
            .alias('g' as Key, OptionSpec::alias("get"));
        let compiled = compile(&table).unwrap();

        assert_eq!(compiled.options[0].shorts, vec!['x', 'g']);
        assert_eq!(compiled.options[0].key, 'x' as Key);
    }

    #[test]
    fn test_compile_rejects_orphan_alias() {
        let table = OptionTable::new().alias(0, OptionSpec::alias("colour"));
        assert_eq!(
            compile(&table).unwrap_err(),
            TableError::OrphanAlias("colour".to_string())
        );
    }

    #[test]
    fn test_compile_appends_automatic_entries() {
        let compiled = compile(&OptionTable::new()).unwrap();
        let longs: Vec<&str> = compiled
            .options
            .iter()
            .map(|o| o.primary_long())
            .collect();
        assert_eq!(longs, vec!["help", "usage", "version"]);
        assert!(compiled.options.iter().all(|o| o.group == -1));
    }

    #[test]
    fn test_find_long_exact_beats_prefix() {
        let table = OptionTable::new()
            .option(1000, OptionSpec::new("color"), |_, _, _| true)
            .option(1001, OptionSpec::new("colors"), |_, _, _| true);
        let compiled = compile(&table).unwrap();

        assert_eq!(compiled.find_long("color").unwrap(), 0);
        assert_eq!(compiled.find_long("colors").unwrap(), 1);
    }

    #[test]
    fn test_find_long_unique_prefix_resolves() {
        let compiled = compile(&sample_table()).unwrap();
        assert_eq!(compiled.find_long("verb").unwrap(), 0);
    }

    #[test]
    fn test_find_long_prefix_across_aliases_is_not_ambiguous() {
        let compiled = compile(&sample_table()).unwrap();
        // "colo" matches both --color and --colour, but they resolve to
        // the same option.
        assert_eq!(compiled.find_long("colo").unwrap(), 1);
    }

    #[test]
    fn test_find_long_ambiguous_prefix_fails() {
        let table = OptionTable::new()
            .option(1000, OptionSpec::new("color"), |_, _, _| true)
            .option(1001, OptionSpec::new("count"), |_, _, _| true);
        let compiled = compile(&table).unwrap();

        assert_eq!(
            compiled.find_long("co").unwrap_err(),
            ParseError::AmbiguousLong("co".to_string())
        );
    }

    #[test]
    fn test_find_short_unknown_fails() {
        let compiled = compile(&sample_table()).unwrap();
        assert_eq!(compiled.find_short('v').unwrap(), 0);
        assert_eq!(
            compiled.find_short('z').unwrap_err(),
            ParseError::UnrecognizedShort('z')
        );
    }

    #[test]
    fn test_len_counts_non_alias_options_only() {
        let table = sample_table();
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(OptionTable::new().is_empty());
    }
}
