use crate::constant::*;

/// The configuration of a single Cli option.
///
/// An option has a short form (`-o`), a long form (`--option`), or both.
/// By default an option takes a value (`--option VALUE`); use [`OptionConfig::flag`] for a boolean switch.
///
/// ### Example
/// ```
/// # use argle_core as argle;
/// use argle::OptionConfig;
///
/// let verbose = OptionConfig::new('v', "verbose")
///     .flag()
///     .headline("Print more output");
/// let format = OptionConfig::long("format")
///     .choices(["json", "text"])
///     .metavar("FORMAT");
///
/// assert!(verbose.is_flag());
/// assert_eq!(format.get_short(), None);
/// assert_eq!(format.get_long(), Some("format"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionConfig {
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) flag: bool,
    pub(crate) choices: Vec<String>,
    pub(crate) metavar: Option<String>,
    pub(crate) headline: Option<String>,
}

impl OptionConfig {
    /// Create an option with both a short and long form.
    /// Omit the hyphens from both.
    pub fn new(short: char, long: impl Into<String>) -> Self {
        Self::create(Some(short), Some(long.into()))
    }

    /// Create an option with only a short form (ex: `'o'` for `-o`).
    pub fn short(short: char) -> Self {
        Self::create(Some(short), None)
    }

    /// Create an option with only a long form (ex: `"option"` for `--option`).
    pub fn long(long: impl Into<String>) -> Self {
        Self::create(None, Some(long.into()))
    }

    fn create(short: Option<char>, long: Option<String>) -> Self {
        Self {
            short,
            long,
            flag: false,
            choices: Vec::default(),
            metavar: None,
            headline: None,
        }
    }

    pub(crate) fn help(headline: &str) -> Self {
        Self::new(HELP_SHORT, HELP_LONG).flag().headline(headline)
    }

    /// Make this option a flag: it takes no value, and is either set or not.
    pub fn flag(mut self) -> Self {
        self.flag = true;
        self
    }

    /// Constrain the values of this option to a list.
    /// The order of the choices is preserved in help output and completions.
    ///
    /// Not valid on a flag.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Name the value of this option in help output (ex: `FILE` in `--output FILE`).
    /// If repeated, only the final metavar will apply.
    ///
    /// Not valid on a flag.
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar.replace(metavar.into());
        self
    }

    /// Document this option with a one line summary.
    /// If repeated, only the final headline will apply.
    ///
    /// Text surrounded by `{curly braces}` is highlighted in help output.
    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline.replace(headline.into());
        self
    }

    /// The short form, without the hyphen.
    pub fn get_short(&self) -> Option<char> {
        self.short
    }

    /// The long form, without the hyphens.
    pub fn get_long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Whether this option takes no value.
    pub fn is_flag(&self) -> bool {
        self.flag
    }

    /// The accepted values, or an empty slice if any value is accepted.
    pub fn get_choices(&self) -> &[String] {
        &self.choices
    }

    /// The configured metavar, if any.
    pub fn get_metavar(&self) -> Option<&str> {
        self.metavar.as_deref()
    }

    /// The configured headline, if any.
    pub fn get_headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    pub(crate) fn accepts(&self, value: &str) -> bool {
        self.choices.is_empty() || self.choices.iter().any(|choice| choice == value)
    }

    pub(crate) fn metavar_or(&self, default: &'static str) -> &str {
        self.metavar.as_deref().unwrap_or(default)
    }

    // Prefer the long form when naming an option in messages.
    pub(crate) fn display_name(&self) -> String {
        match (&self.long, &self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => "<unnamed>".to_string(),
        }
    }
}
