use std::path::Path;
use thiserror::Error;

use crate::api::{App, Command, OptionConfig};
use crate::matcher::OptionTable;
use crate::model::Action;
use crate::parser::Printer;

/// A problem with the Cli user's input.
///
/// Parsing carries on past most errors, so a single [`App::parse`] may report several.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Options were supplied, but no command.
    #[error("no command supplied - try `{help}`")]
    NoCommand {
        /// The invocation which shows help.
        help: String,
    },

    /// The command name isn't configured.
    #[error("'{name}' isn't a command - try `{help}`")]
    InvalidCommand {
        /// The supplied command name.
        name: String,
        /// The invocation which shows help.
        help: String,
    },

    /// The option isn't configured for the chosen command.
    #[error("{}", in_combined("unrecognized option", .option, .combined))]
    UnrecognizedOption {
        /// The option, as supplied (or the single character, when inside a combined short option).
        option: String,
        /// The combined short option containing the option, if any.
        combined: Option<String>,
    },

    /// A combined short option contained `=`.
    #[error("combined short option can't contain '=': '{arg}'")]
    EqualsInCombined {
        /// The supplied argument.
        arg: String,
    },

    /// The option was supplied more than once.
    #[error("{}", in_combined("duplicate option", .option, .combined))]
    DuplicateOption {
        /// The option, as supplied (or the single character, when inside a combined short option).
        option: String,
        /// The combined short option containing the option, if any.
        combined: Option<String>,
    },

    /// The value isn't one of the option's choices.
    #[error("invalid '{arg}': must be one of [{}]", .choices.join("|"))]
    InvalidChoice {
        /// The supplied argument(s), including the option.
        arg: String,
        /// The rejected value.
        value: String,
        /// The accepted values.
        choices: Vec<String>,
    },

    /// An option was followed by something which looks like another option, rather than its value.
    #[error("missing or ambiguous option value: '{option} {next}'\nhint: if '{next}' is meant as the value for '{option}', use '=' instead:\n  '{option}={next}'")]
    AmbiguousValue {
        /// The option expecting a value.
        option: String,
        /// The argument following the option.
        next: String,
    },

    /// An option was the last argument, without its value.
    #[error("missing value {metavar} for '{option}'")]
    MissingValue {
        /// The option expecting a value.
        option: String,
        /// The option's metavar.
        metavar: String,
    },

    /// An option which takes a value was used within a combined short option.
    #[error("can't use '{option}' in combined short option '{arg}'")]
    CombinedValueOption {
        /// The option.
        option: char,
        /// The combined short option.
        arg: String,
    },

    /// More positional arguments were supplied than the command accepts.
    #[error("too many arguments: '{}'", .extra.join("' '"))]
    TooManyArguments {
        /// The arguments beyond those accepted, which are dropped from [`Parsed::args`].
        extra: Vec<String>,
    },

    /// Fewer positional arguments were supplied than the command requires.
    #[error("missing {}: {}", plural("argument", .metavars.len()), .metavars.join(" "))]
    MissingArguments {
        /// The metavars of the missing arguments.
        metavars: Vec<String>,
    },

    /// An error reported by the program's own validation.
    #[error("{0}")]
    Custom(String),
}

fn in_combined(prefix: &str, option: &str, combined: &Option<String>) -> String {
    match combined {
        Some(arg) => format!("{prefix} '{option}' in '{arg}'"),
        None => format!("{prefix}: '{option}'"),
    }
}

fn plural(word: &str, count: usize) -> String {
    if count > 1 {
        format!("{word}s")
    } else {
        word.to_string()
    }
}

/// The parse result of a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionResult<'a> {
    pub(crate) option: &'a OptionConfig,
    pub(crate) value: String,
    pub(crate) is_set: bool,
}

impl<'a> OptionResult<'a> {
    pub(crate) fn new(option: &'a OptionConfig) -> Self {
        Self {
            option,
            value: String::default(),
            is_set: false,
        }
    }

    /// The configuration of this option.
    pub fn option(&self) -> &'a OptionConfig {
        self.option
    }

    /// The supplied value.
    ///
    /// This is empty for flags, for options which weren't supplied, and for options supplied an empty value (ex: `--option ''`).
    /// Use [`OptionResult::is_set`] to tell these apart.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the option was supplied.
    pub fn is_set(&self) -> bool {
        self.is_set
    }
}

/// The result of [`App::parse`].
///
/// Besides reading the parsed values, the program may report errors from its own validations into this result (see [`Parsed::error`]).
pub struct Parsed<'a> {
    pub(crate) app: &'a App,
    pub(crate) program: String,
    pub(crate) action: Action,
    pub(crate) failed: bool,
    pub(crate) command: Option<&'a Command>,
    pub(crate) table: Option<OptionTable<'a>>,
    pub(crate) results: Vec<OptionResult<'a>>,
    pub(crate) args: Vec<String>,
    pub(crate) errors: Vec<ParseError>,
}

impl<'a> std::fmt::Debug for Parsed<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parsed")
            .field("program", &self.program)
            .field("action", &self.action)
            .field("failed", &self.failed)
            .field("command", &self.command.map(Command::get_name))
            .field("results", &self.results)
            .field("args", &self.args)
            .field("errors", &self.errors)
            .finish()
    }
}

impl<'a> Parsed<'a> {
    pub(crate) fn new(app: &'a App, program: &str) -> Self {
        Self {
            app,
            program: basename(program).to_string(),
            action: Action::Fatal,
            failed: false,
            command: None,
            table: None,
            results: Vec::default(),
            args: Vec::default(),
            errors: Vec::default(),
        }
    }

    /// The app which produced this result.
    pub fn app(&self) -> &'a App {
        self.app
    }

    /// The program name, as displayed in help and error messages.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// What the parser suggests the program do next.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Whether any error has been reported.
    ///
    /// This may be true while [`Parsed::errors`] is empty: for example, when help was requested alongside extraneous arguments, or when errors go to an [`ErrorHandler`](crate::ErrorHandler).
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// The command chosen by the Cli user.
    /// This may be `None` when [`Parsed::action`] isn't [`Action::Proceed`].
    pub fn command(&self) -> Option<&'a Command> {
        self.command
    }

    /// Find an option result by either its short or long name, without hyphens (ex: `"o"` or `"option"`).
    /// Both names lead to the same result.
    pub fn option(&self, name: &str) -> Option<&OptionResult<'a>> {
        self.table
            .as_ref()
            .and_then(|table| table.key(name))
            .map(|index| &self.results[index])
    }

    /// Whether the named option was supplied.
    pub fn is_set(&self, name: &str) -> bool {
        self.option(name).map_or(false, OptionResult::is_set)
    }

    /// The value of the named option, if it was supplied.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.option(name)
            .filter(|result| result.is_set)
            .map(OptionResult::value)
    }

    /// Every option result of the chosen command, global options first.
    pub fn options(&self) -> &[OptionResult<'a>] {
        &self.results
    }

    /// The positional arguments.
    ///
    /// When too many were supplied, only as many as the command accepts are kept.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The errors reported so far, in order.
    /// Always empty when the app has an [`ErrorHandler`](crate::ErrorHandler).
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Report an error and mark this result as failed.
    ///
    /// The error goes to the app's [`ErrorHandler`](crate::ErrorHandler) when one is configured,
    /// and is otherwise appended to [`Parsed::errors`].
    pub fn error(&mut self, error: ParseError) {
        self.failed = true;

        match &self.app.error_handler {
            Some(handler) => handler.handle(error),
            None => self.errors.push(error),
        }
    }

    /// Report an error described by `message` (see [`Parsed::error`]).
    pub fn error_message(&mut self, message: impl Into<String>) {
        self.error(ParseError::Custom(message.into()));
    }

    /// Mark this result as failed, without reporting an error.
    pub fn set_failed(&mut self) {
        self.failed = true;
    }

    /// The suggested process exit code.
    ///
    /// This is `1` for a fatal result and for any failed result, and `0` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.action {
            Action::Fatal => 1,
            Action::Proceed | Action::Help if self.failed => 1,
            Action::Proceed | Action::Help => 0,
        }
    }

    /// Run the chosen command's [`Runner`](crate::Runner), returning its success.
    /// Returns `None` when there is no chosen command, or it has no runner.
    pub fn run_command(&mut self) -> Option<bool> {
        let runner = self.command.and_then(Command::get_runner)?;
        Some(runner(self))
    }

    /// Render help for the chosen command (or global help, when there is none), for writing to stderr (see [`Printer::stderr`]).
    pub fn help(&self) -> String {
        Printer::stderr().render(self.app, &self.program, self.command)
    }
}

pub(crate) fn basename(program: &str) -> &str {
    Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ArgsConfig;
    use crate::parser::RecordingHandler;
    use rstest::rstest;

    #[rstest]
    #[case(ParseError::NoCommand { help: "program --help".to_string() }, "no command supplied - try `program --help`")]
    #[case(
        ParseError::InvalidCommand { name: "x".to_string(), help: "program help".to_string() },
        "'x' isn't a command - try `program help`"
    )]
    #[case(ParseError::UnrecognizedOption { option: "--x".to_string(), combined: None }, "unrecognized option: '--x'")]
    #[case(
        ParseError::UnrecognizedOption { option: "x".to_string(), combined: Some("-ax".to_string()) },
        "unrecognized option 'x' in '-ax'"
    )]
    #[case(ParseError::EqualsInCombined { arg: "-a=b".to_string() }, "combined short option can't contain '=': '-a=b'")]
    #[case(ParseError::DuplicateOption { option: "-a".to_string(), combined: None }, "duplicate option: '-a'")]
    #[case(
        ParseError::DuplicateOption { option: "a".to_string(), combined: Some("-aa".to_string()) },
        "duplicate option 'a' in '-aa'"
    )]
    #[case(
        ParseError::InvalidChoice {
            arg: "-c zz".to_string(),
            value: "zz".to_string(),
            choices: vec!["aa".to_string(), "bb".to_string()],
        },
        "invalid '-c zz': must be one of [aa|bb]"
    )]
    #[case(
        ParseError::AmbiguousValue { option: "--value".to_string(), next: "-x".to_string() },
        "missing or ambiguous option value: '--value -x'\nhint: if '-x' is meant as the value for '--value', use '=' instead:\n  '--value=-x'"
    )]
    #[case(ParseError::MissingValue { option: "-c".to_string(), metavar: "ARG".to_string() }, "missing value ARG for '-c'")]
    #[case(ParseError::CombinedValueOption { option: 'c', arg: "-oc".to_string() }, "can't use 'c' in combined short option '-oc'")]
    #[case(ParseError::TooManyArguments { extra: vec!["w".to_string()] }, "too many arguments: 'w'")]
    #[case(
        ParseError::TooManyArguments { extra: vec!["v".to_string(), "w".to_string()] },
        "too many arguments: 'v' 'w'"
    )]
    #[case(ParseError::MissingArguments { metavars: vec!["C".to_string()] }, "missing argument: C")]
    #[case(
        ParseError::MissingArguments { metavars: vec!["B".to_string(), "C".to_string()] },
        "missing arguments: B C"
    )]
    #[case(ParseError::Custom("bad value".to_string()), "bad value")]
    fn parse_error_message(#[case] error: ParseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    fn app() -> App {
        App::builder()
            .command(
                Command::single()
                    .option(OptionConfig::new('v', "value"))
                    .args(ArgsConfig::new(1)),
            )
            .build()
    }

    #[test]
    fn error_collected() {
        // Setup
        let app = app();
        let mut parsed = app.parse(&["program", "arg"]);
        assert!(!parsed.failed());

        // Execute
        parsed.error_message("first");
        parsed.error(ParseError::Custom("second".to_string()));

        // Verify
        assert!(parsed.failed());
        assert_eq!(
            parsed.errors(),
            &[
                ParseError::Custom("first".to_string()),
                ParseError::Custom("second".to_string())
            ]
        );
        assert_eq!(parsed.exit_code(), 1);
    }

    #[test]
    fn error_handled() {
        // Setup
        let handler = RecordingHandler::default();
        let app = App::builder()
            .command(Command::single())
            .error_handler(handler.clone())
            .build();
        let mut parsed = app.parse(&["program"]);

        // Execute
        parsed.error_message("handled");

        // Verify
        assert!(parsed.failed());
        assert!(parsed.errors().is_empty());
        assert_eq!(handler.errors(), vec![ParseError::Custom("handled".to_string())]);
    }

    #[test]
    fn set_failed() {
        let app = app();
        let mut parsed = app.parse(&["program", "arg"]);

        parsed.set_failed();

        assert!(parsed.failed());
        assert!(parsed.errors().is_empty());
        assert_eq!(parsed.action(), Action::Proceed);
        assert_eq!(parsed.exit_code(), 1);
    }

    #[test]
    fn option_lookup() {
        let app = app();
        let parsed = app.parse(&["program", "--value", "x", "arg"]);

        assert_eq!(parsed.value("v"), Some("x"));
        assert_eq!(parsed.value("value"), Some("x"));
        assert!(parsed.is_set("v"));
        assert_eq!(parsed.option("v"), parsed.option("value"));
        assert_eq!(parsed.option("v").unwrap().option().get_long(), Some("value"));
        assert_eq!(parsed.option("x"), None);
        assert!(!parsed.is_set("x"));
        assert_eq!(parsed.options().len(), 1);
    }

    #[test]
    fn option_unset() {
        let app = app();
        let parsed = app.parse(&["program", "arg"]);

        assert_matches!(parsed.option("value"), Some(result) => {
            assert!(!result.is_set());
            assert_eq!(result.value(), "");
        });
        assert_eq!(parsed.value("value"), None);
    }

    #[test]
    fn option_empty_value() {
        let app = app();
        let parsed = app.parse(&["program", "--value", "", "arg"]);

        assert!(parsed.is_set("value"));
        assert_eq!(parsed.value("value"), Some(""));
    }

    #[rstest]
    #[case(Action::Proceed, false, 0)]
    #[case(Action::Proceed, true, 1)]
    #[case(Action::Help, false, 0)]
    #[case(Action::Help, true, 1)]
    #[case(Action::Fatal, false, 1)]
    #[case(Action::Fatal, true, 1)]
    fn exit_code(#[case] action: Action, #[case] failed: bool, #[case] expected: i32) {
        let app = app();
        let mut parsed = Parsed::new(&app, "program");
        parsed.action = action;
        parsed.failed = failed;
        assert_eq!(parsed.exit_code(), expected);
    }

    #[test]
    fn run_command() {
        // Setup
        fn runner(parsed: &mut Parsed<'_>) -> bool {
            if parsed.args()[0] == "bad" {
                parsed.error_message("bad argument");
                return false;
            }
            true
        }

        let app = App::builder()
            .command(Command::single().args(ArgsConfig::new(1)).runner(runner))
            .build();
        let mut good = app.parse(&["program", "good"]);
        let mut bad = app.parse(&["program", "bad"]);

        // Execute
        let good_outcome = good.run_command();
        let bad_outcome = bad.run_command();

        // Verify
        assert_eq!(good_outcome, Some(true));
        assert!(!good.failed());
        assert_eq!(bad_outcome, Some(false));
        assert!(bad.failed());
        assert_eq!(bad.errors(), &[ParseError::Custom("bad argument".to_string())]);
    }

    #[test]
    fn run_command_absent() {
        let app = app();
        let mut parsed = app.parse(&["program", "arg"]);
        assert_eq!(parsed.run_command(), None);
    }

    #[rstest]
    #[case("program", "program")]
    #[case("./program", "program")]
    #[case("/usr/local/bin/program", "program")]
    #[case("", "")]
    fn program_basename(#[case] program: &str, #[case] expected: &str) {
        let app = app();
        let parsed = Parsed::new(&app, program);
        assert_eq!(parsed.program(), expected);
    }
}
