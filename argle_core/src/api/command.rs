use crate::api::OptionConfig;
use crate::constant::*;
use crate::parser::Parsed;

/// The function to run when a [`Command`] is chosen.
///
/// It should validate the parsed values (reporting problems via [`Parsed::error`]),
/// return early if [`Parsed::failed`], and otherwise do the work of the command.
/// The returned `bool` indicates success.
pub type Runner = fn(&mut Parsed<'_>) -> bool;

/// The configuration of a single Cli command.
///
/// ### Example
/// ```
/// # use argle_core as argle;
/// use argle::{ArgsConfig, Command, OptionConfig};
///
/// let command = Command::new("copy")
///     .headline("Copy files")
///     .option(OptionConfig::new('f', "force").flag())
///     .args(ArgsConfig::new(2).metavars(["SOURCE", "TARGET"]));
///
/// assert_eq!(command.get_name(), "copy");
/// assert_eq!(command.get_options().len(), 1);
/// assert_eq!(command.get_args().get_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) headline: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) options: Vec<OptionConfig>,
    pub(crate) args: ArgsConfig,
    pub(crate) runner: Option<Runner>,
}

impl Command {
    /// Create a named command.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headline: None,
            description: None,
            options: Vec::default(),
            args: ArgsConfig::default(),
            runner: None,
        }
    }

    /// Create the unnamed command of a single-command app.
    /// The parser never expects a command name for such an app.
    pub fn single() -> Self {
        Self::new("")
    }

    /// Document this command with a one line summary.
    /// If repeated, only the final headline will apply.
    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline.replace(headline.into());
        self
    }

    /// Document this command with a longer description, shown in command help output.
    /// If repeated, only the final description will apply.
    ///
    /// A single leading and trailing newline are trimmed, so the description reads well as a raw string literal.
    /// Each line is indented by 2 spaces when displayed.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Add an option to this command.
    /// Options are displayed and completed in the order they are added, after the app's global options.
    pub fn option(mut self, option: OptionConfig) -> Self {
        self.options.push(option);
        self
    }

    /// Configure the positional arguments of this command.
    /// Without this, no positional arguments are accepted.
    pub fn args(mut self, args: ArgsConfig) -> Self {
        self.args = args;
        self
    }

    /// Set the function to run when this command is chosen (see [`Parsed::run_command`]).
    pub fn runner(mut self, runner: Runner) -> Self {
        self.runner.replace(runner);
        self
    }

    /// The command name (empty for the command of a single-command app).
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// The configured headline, if any.
    pub fn get_headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    /// The configured description, if any.
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The command-local options (global options not included).
    pub fn get_options(&self) -> &[OptionConfig] {
        &self.options
    }

    /// The positional argument configuration.
    pub fn get_args(&self) -> &ArgsConfig {
        &self.args
    }

    /// The configured runner, if any.
    pub fn get_runner(&self) -> Option<Runner> {
        self.runner
    }
}

/// The configuration of a command's positional arguments.
///
/// ### Example
/// ```
/// # use argle_core as argle;
/// use argle::ArgsConfig;
///
/// // At least one FILE, with no upper bound.
/// let args = ArgsConfig::new(1).varadic().metavars(["FILE"]);
///
/// assert_eq!(args.get_count(), 1);
/// assert!(args.is_varadic());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgsConfig {
    pub(crate) count: usize,
    pub(crate) varadic: bool,
    pub(crate) metavars: Vec<String>,
}

impl ArgsConfig {
    /// Require precisely `count` positional arguments.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            varadic: false,
            metavars: Vec::default(),
        }
    }

    /// Accept more than `count` positional arguments; `count` becomes the minimum.
    pub fn varadic(mut self) -> Self {
        self.varadic = true;
        self
    }

    /// Name the positional arguments, in order, for help output and error messages.
    /// Unnamed positions are displayed as `ARG`.
    pub fn metavars<I, S>(mut self, metavars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metavars = metavars.into_iter().map(Into::into).collect();
        self
    }

    /// The required number of positional arguments.
    pub fn get_count(&self) -> usize {
        self.count
    }

    /// Whether more than [`ArgsConfig::get_count`] positional arguments are accepted.
    pub fn is_varadic(&self) -> bool {
        self.varadic
    }

    /// The configured metavars.
    pub fn get_metavars(&self) -> &[String] {
        &self.metavars
    }

    pub(crate) fn metavar(&self, index: usize) -> &str {
        self.metavars
            .get(index)
            .map(String::as_str)
            .unwrap_or(ARG_METAVAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn command_builder() {
        let command = Command::new("cmd")
            .headline("--discarded--")
            .headline("Headline")
            .description("\nDescription\n")
            .option(OptionConfig::short('a').flag())
            .option(OptionConfig::long("bb"))
            .args(ArgsConfig::new(1));

        assert_eq!(command.get_name(), "cmd");
        assert_eq!(command.get_headline(), Some("Headline"));
        assert_eq!(command.get_description(), Some("\nDescription\n"));
        assert_eq!(
            command
                .get_options()
                .iter()
                .map(OptionConfig::display_name)
                .collect::<Vec<String>>(),
            vec!["-a", "--bb"]
        );
        assert_eq!(command.get_args(), &ArgsConfig::new(1));
        assert!(command.get_runner().is_none());
    }

    #[test]
    fn single_command() {
        let command = Command::single();
        assert_eq!(command.get_name(), "");
        assert_eq!(command.get_args(), &ArgsConfig::default());
    }

    #[rstest]
    #[case(vec![], 0, "ARG")]
    #[case(vec!["A"], 0, "A")]
    #[case(vec!["A"], 1, "ARG")]
    #[case(vec!["A", "B", "C"], 2, "C")]
    #[case(vec!["A", "B", "C"], 3, "ARG")]
    fn args_metavar(#[case] metavars: Vec<&str>, #[case] index: usize, #[case] expected: &str) {
        let args = ArgsConfig::new(3).metavars(metavars);
        assert_eq!(args.metavar(index), expected);
    }
}
