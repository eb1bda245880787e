//! Option descriptor and program metadata types.
//!
//! This module defines the data model callers use to describe a command
//! line: one [`OptionSpec`] per recognized flag, a [`FlagKind`] governing
//! how its argument is treated, and a [`Program`] record carrying the
//! metadata printed in help and version output.

/// Integer key identifying one option in a table.
///
/// A key in the printable ASCII range (`'!'..='~'`) doubles as the
/// option's short form: registering an option under `'v' as Key` makes it
/// reachable as both `-v` and its long name. Keys outside that range
/// (e.g. `256`) give an option a long form only.
pub type Key = i32;

/// Key passed to the positional-argument handler for each non-option
/// token (see [`OptionTable::positional`](crate::OptionTable::positional)).
pub const KEY_ARG: Key = -1;

/// How an option treats its argument, and whether it is a real option at
/// all.
///
/// # Examples
///
/// ```
/// use optable_core::{FlagKind, OptionSpec};
///
/// let spec = OptionSpec::new("verbose");
/// assert_eq!(spec.kind, FlagKind::Standard);
///
/// let spec = OptionSpec::new("color").with_placeholder("WHEN").optional_arg();
/// assert_eq!(spec.kind, FlagKind::OptionalArg);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagKind {
    /// A regular option. It requires an argument exactly when a
    /// placeholder is set (the default).
    #[default]
    Standard,
    /// The option's argument is optional: the handler sees an empty value
    /// when the flag is given bare, and the supplied text when one is
    /// attached (`--color=always`, `-calways`).
    OptionalArg,
    /// A secondary name for the closest preceding non-alias option.
    /// Matching an alias invokes the antecedent's handler with the
    /// antecedent's key; the alias's own placeholder and group are
    /// ignored.
    Alias,
}

/// Static description of one recognized option.
///
/// Built with [`new`](OptionSpec::new) (or [`alias`](OptionSpec::alias))
/// and refined with the chained builder methods.
///
/// # Examples
///
/// ```
/// use optable_core::OptionSpec;
///
/// let output = OptionSpec::new("output")
///     .with_placeholder("FILE")
///     .with_doc("Write the result to FILE")
///     .in_group(1);
///
/// assert_eq!(output.name, "output");
/// assert!(output.takes_value());
/// assert_eq!(output.group, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Long name, without the leading dashes (e.g. `"verbose"`).
    pub name: String,
    /// Argument placeholder template shown in help text (e.g. `"FILE"`,
    /// `"N..."`). `None` means the option takes no argument.
    pub placeholder: Option<String>,
    /// How the argument (if any) is treated.
    pub kind: FlagKind,
    /// One-line documentation string for help output.
    pub doc: Option<String>,
    /// Group number used to cluster options in help output.
    pub group: i32,
}

impl OptionSpec {
    /// Creates a standard option with the given long name.
    ///
    /// # Examples
    ///
    /// ```
    /// use optable_core::OptionSpec;
    ///
    /// let spec = OptionSpec::new("verbose");
    /// assert_eq!(spec.name, "verbose");
    /// assert!(!spec.takes_value());
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            placeholder: None,
            kind: FlagKind::Standard,
            doc: None,
            group: 0,
        }
    }

    /// Creates an alias entry for the closest preceding non-alias option.
    ///
    /// # Examples
    ///
    /// ```
    /// use optable_core::{FlagKind, OptionSpec};
    ///
    /// let spec = OptionSpec::alias("colour");
    /// assert_eq!(spec.kind, FlagKind::Alias);
    /// ```
    pub fn alias(name: &str) -> Self {
        Self {
            kind: FlagKind::Alias,
            ..Self::new(name)
        }
    }

    /// Sets the argument placeholder, making the option take a value.
    pub fn with_placeholder(mut self, template: &str) -> Self {
        self.placeholder = Some(template.to_string());
        self
    }

    /// Marks the option's argument as optional.
    pub fn optional_arg(mut self) -> Self {
        self.kind = FlagKind::OptionalArg;
        self
    }

    /// Adds a documentation string.
    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    /// Assigns the option to a help group.
    pub fn in_group(mut self, group: i32) -> Self {
        self.group = group;
        self
    }

    /// Whether the option requires an argument when matched.
    ///
    /// Optional-argument options return `false`: they accept a value but
    /// never demand one.
    ///
    /// # Examples
    ///
    /// ```
    /// use optable_core::OptionSpec;
    ///
    /// assert!(OptionSpec::new("output").with_placeholder("FILE").takes_value());
    /// assert!(!OptionSpec::new("verbose").takes_value());
    /// assert!(!OptionSpec::new("color").with_placeholder("WHEN").optional_arg().takes_value());
    /// ```
    pub fn takes_value(&self) -> bool {
        self.placeholder.is_some() && self.kind != FlagKind::OptionalArg
    }
}

/// Returns the short-option character for a key, if it has one.
pub(crate) fn short_for_key(key: Key) -> Option<char> {
    u8::try_from(key)
        .ok()
        .filter(u8::is_ascii_graphic)
        .map(char::from)
}

/// Caller-supplied program metadata, printed in help, usage, and version
/// output.
///
/// # Examples
///
/// ```
/// use optable_core::Program;
///
/// let program = Program::new("frob")
///     .with_description("Frobnicate the inputs")
///     .with_version("1.4.0")
///     .with_contact("bug-frob@example.org");
///
/// assert_eq!(program.name, "frob");
/// assert_eq!(program.version, "1.4.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Program identifier, used in the usage line and diagnostics.
    pub name: String,
    /// One-line description shown under the usage line.
    pub description: String,
    /// Version string printed by `--version`.
    pub version: String,
    /// Contact address for the trailing "Report bugs to" line.
    pub contact: String,
}

impl Program {
    /// Creates a program record with the given identifier.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the one-line description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the version string.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Sets the bug-report contact address.
    pub fn with_contact(mut self, contact: &str) -> Self {
        self.contact = contact.to_string();
        self
    }
}
