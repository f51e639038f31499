use colored::Color;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use crate::api::{Command, OptionConfig};
use crate::constant::*;
use crate::matcher::{OptionTable, TableError};
use crate::model::HelpAccess;
use crate::parser::ErrorHandler;

/// A misconfigured [`App`].
///
/// These can't be caused by the Cli user; they indicate a bug in the program's configuration.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

impl From<TableError> for ConfigError {
    fn from(error: TableError) -> Self {
        ConfigError(error.to_string())
    }
}

/// The configured command line app.
/// Built via [`AppBuilder::build`] (or [`AppBuilder::build_app`]), which validates the configuration.
///
/// An app is immutable once built, and may be shared across threads.
/// Each call to [`App::parse`] or [`App::complete`] works on its own state.
pub struct App {
    pub(crate) headline: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) commands: Vec<Command>,
    pub(crate) global_options: Vec<OptionConfig>,
    pub(crate) default_command: Option<String>,
    pub(crate) help_access: HelpAccess,
    pub(crate) highlight_color: Color,
    pub(crate) error_handler: Option<Arc<dyn ErrorHandler + Send + Sync>>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("commands", &self.commands)
            .field("global_options", &self.global_options)
            .field("default_command", &self.default_command)
            .field("help_access", &self.help_access)
            .field("highlight_color", &self.highlight_color)
            .finish()
    }
}

impl App {
    /// Start configuring an app.
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    /// The configured headline, if any.
    pub fn get_headline(&self) -> Option<&str> {
        self.headline.as_deref()
    }

    /// The configured description, if any.
    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The configured commands, in declaration order.
    pub fn get_commands(&self) -> &[Command] {
        &self.commands
    }

    /// The options shared by every command.
    pub fn get_global_options(&self) -> &[OptionConfig] {
        &self.global_options
    }

    /// The name of the command chosen when none is supplied, if any.
    pub fn get_default_command(&self) -> Option<&str> {
        self.default_command.as_deref()
    }

    /// How the Cli user may access help.
    pub fn get_help_access(&self) -> HelpAccess {
        self.help_access
    }

    /// The colour of highlighted help text.
    pub fn get_highlight_color(&self) -> Color {
        self.highlight_color
    }

    /// Find a command by name.
    pub fn find_command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name == name)
    }

    pub(crate) fn single_command(&self) -> Option<&Command> {
        match &self.commands[..] {
            [command] => Some(command),
            _ => None,
        }
    }

    pub(crate) fn default_command(&self) -> Option<&Command> {
        self.default_command.as_ref().map(|name| {
            self.find_command(name)
                .expect("internal error - the default command is validated when the app is built")
        })
    }

    pub(crate) fn option_table<'a>(&'a self, command: &'a Command) -> OptionTable<'a> {
        OptionTable::new(self.global_options.iter().chain(command.options.iter()))
            .expect("internal error - options are validated when the app is built")
    }

    // The invocation to suggest when the user needs help.
    pub(crate) fn help_invocation(&self, program: &str) -> String {
        if self.help_access.has_flag() {
            format!("{program} --{HELP_LONG}")
        } else {
            format!("{program} {HELP_COMMAND}")
        }
    }

    pub(crate) fn is_help_token(&self, index: usize, token: &str) -> bool {
        (self.help_access.has_flag() && is_help_flag(token))
            || (self.help_access.has_command() && index <= 1 && token == HELP_COMMAND)
    }
}

pub(crate) fn is_help_flag(token: &str) -> bool {
    token
        .strip_prefix("--")
        .map_or(token == format!("-{HELP_SHORT}"), |long| long == HELP_LONG)
}

/// The app configuration builder.
///
/// The builder is `Clone`, so several variants of one base configuration may be built independently.
///
/// ### Example
/// ```
/// # use argle_core as argle;
/// use argle::{App, Command, OptionConfig};
///
/// let base = App::builder()
///     .global_option(OptionConfig::new('q', "quiet").flag())
///     .command(Command::new("build"))
///     .command(Command::new("test"));
///
/// let app = base.clone().build();
/// let app_with_default = base.default_command("build").build();
///
/// assert_eq!(app.get_default_command(), None);
/// assert_eq!(app_with_default.get_default_command(), Some("build"));
/// ```
#[derive(Clone, Default)]
pub struct AppBuilder {
    headline: Option<String>,
    description: Option<String>,
    commands: Vec<Command>,
    global_options: Vec<OptionConfig>,
    default_command: Option<String>,
    help_access: HelpAccess,
    highlight_color: Option<Color>,
    error_handler: Option<Arc<dyn ErrorHandler + Send + Sync>>,
}

impl AppBuilder {
    /// Document the app with a headline, displayed at the top of help output.
    /// If repeated, only the final headline will apply.
    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline.replace(headline.into());
        self
    }

    /// Document the app with a longer description, displayed in global help output.
    /// If repeated, only the final description will apply.
    ///
    /// A single leading and trailing newline are trimmed, so the description reads well as a raw string literal.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Add a command.
    /// Commands are displayed and completed in the order they are added.
    ///
    /// When precisely one command is configured, the parser never expects a command name.
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Add an option shared by every command.
    /// Global options precede each command's own options.
    pub fn global_option(mut self, option: OptionConfig) -> Self {
        self.global_options.push(option);
        self
    }

    /// Choose the command to use when the first argument doesn't name one.
    /// Only valid when more than one command is configured.
    pub fn default_command(mut self, name: impl Into<String>) -> Self {
        self.default_command.replace(name.into());
        self
    }

    /// Configure how the Cli user may access help.
    pub fn help_access(mut self, help_access: HelpAccess) -> Self {
        self.help_access = help_access;
        self
    }

    /// Set the colour of highlighted help text (defaults to bright blue).
    /// If repeated, only the final colour will apply.
    pub fn highlight_color(mut self, color: Color) -> Self {
        self.highlight_color.replace(color);
        self
    }

    /// Handle parse errors as they happen, instead of collecting them in [`Parsed::errors`](crate::Parsed::errors).
    pub fn error_handler(mut self, handler: impl ErrorHandler + Send + Sync + 'static) -> Self {
        self.error_handler.replace(Arc::new(handler));
        self
    }

    /// Build the app as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option).
    pub fn build_app(self) -> Result<App, ConfigError> {
        self.validate()?;

        Ok(App {
            headline: self.headline,
            description: self.description,
            commands: self.commands,
            global_options: self.global_options,
            default_command: self.default_command,
            help_access: self.help_access,
            highlight_color: self.highlight_color.unwrap_or(HIGHLIGHT_COLOR),
            error_handler: self.error_handler,
        })
    }

    /// Build the app.
    /// This finalizes the configuration and checks for errors (ex: a repeated option).
    ///
    /// # Panics
    /// If the configuration is invalid.
    pub fn build(self) -> App {
        match self.build_app() {
            Ok(app) => app,
            Err(error) => panic!("{error}"),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.commands.is_empty() {
            return Err(ConfigError("An app requires at least one command.".to_string()));
        }

        let single = self.commands.len() == 1;
        let mut names: HashSet<&str> = HashSet::default();

        for command in &self.commands {
            if !single && command.name.is_empty() {
                return Err(ConfigError(
                    "Every command requires a name when more than one command is configured."
                        .to_string(),
                ));
            }

            if !names.insert(&command.name) {
                return Err(ConfigError(format!(
                    "Duplicate command '{}' configured.",
                    command.name
                )));
            }

            if !single && self.help_access.has_command() && command.name == HELP_COMMAND {
                return Err(ConfigError(format!(
                    "Command '{HELP_COMMAND}' collides with the help command."
                )));
            }

            for option in self.global_options.iter().chain(command.options.iter()) {
                validate_option(option)?;
            }

            let table =
                OptionTable::new(self.global_options.iter().chain(command.options.iter()))?;

            if self.help_access.has_flag() {
                if table.short(HELP_SHORT).is_some() {
                    return Err(ConfigError(format!(
                        "Option '-{HELP_SHORT}' collides with the help flag."
                    )));
                }

                if table.long(HELP_LONG).is_some() {
                    return Err(ConfigError(format!(
                        "Option '--{HELP_LONG}' collides with the help flag."
                    )));
                }
            }
        }

        match &self.default_command {
            Some(name) if single => Err(ConfigError(format!(
                "Default command '{name}' requires more than one command."
            ))),
            Some(name) if !names.contains(name.as_str()) => Err(ConfigError(format!(
                "Default command '{name}' isn't configured."
            ))),
            _ => Ok(()),
        }
    }
}

fn validate_option(option: &OptionConfig) -> Result<(), ConfigError> {
    if option.short.is_none() && option.long.is_none() {
        return Err(ConfigError(
            "An option requires a short and/or long name.".to_string(),
        ));
    }

    if option.short == Some('-') || option.short == Some('=') {
        return Err(ConfigError(format!(
            "Short option '{}' is reserved.",
            option.display_name()
        )));
    }

    if let Some(long) = &option.long {
        if long.is_empty() || long.starts_with('-') || long.contains('=') {
            return Err(ConfigError(format!("Long option '--{long}' is invalid.")));
        }
    }

    if option.flag && !option.choices.is_empty() {
        return Err(ConfigError(format!(
            "Flag '{}' cannot have choices.",
            option.display_name()
        )));
    }

    if option.flag && option.metavar.is_some() {
        return Err(ConfigError(format!(
            "Flag '{}' cannot have a metavar.",
            option.display_name()
        )));
    }

    Ok(())
}
