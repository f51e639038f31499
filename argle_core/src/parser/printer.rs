use colored::{Color, Colorize};
use regex::{Captures, Regex};
use std::io::IsTerminal;
use std::sync::OnceLock;
use terminal_size::{terminal_size, Width};

use crate::api::{App, Command, OptionConfig};
use crate::constant::*;
use crate::parser::basename;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_HEADLINE_WIDTH: usize = 17;
const INDENT: usize = 2;
const PADDING: usize = 2;

/// Renders help output for an [`App`].
///
/// Text in headlines and descriptions surrounded by `{curly braces}` is highlighted (or, without highlighting, simply unwrapped).
/// Within braces, a `/` separates two highlighted terms (ex: `{-f/--foo}`).
///
/// ### Example
/// ```
/// # use argle_core as argle;
/// use argle::{App, Command, Printer};
///
/// let app = App::builder()
///     .headline("Do {things}")
///     .command(Command::new("cmd1").headline("Headline1"))
///     .command(Command::new("cmd2").headline("Headline2"))
///     .build();
///
/// let help = Printer::new(None).render(&app, "program", None);
/// assert_eq!(
///     help,
///     r#"Do things
/// Usage: program [OPTIONS] COMMAND [...]
///
/// Options:
///   -h/--help  Show this help
///
/// Commands:
///   cmd1  Headline1
///   cmd2  Headline2
/// "#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Printer {
    terminal_width: Option<usize>,
    highlight: bool,
    color: Color,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Printer {
    /// Create a printer which wraps headlines to `terminal_width`, or not at all when `None`.
    pub fn new(terminal_width: Option<usize>) -> Self {
        Self {
            terminal_width,
            highlight: false,
            color: HIGHLIGHT_COLOR,
        }
    }

    /// Create a printer which wraps headlines to the width of the current terminal, if there is one.
    pub fn terminal() -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(terminal_width)
    }

    /// Create a printer for help written to stderr: sized to the terminal, and highlighted when stderr is a terminal.
    ///
    /// `colored` still has the final say, so `NO_COLOR` (or [`colored::control::set_override`]) disables highlighting.
    pub fn stderr() -> Self {
        Self::terminal().highlight(std::io::stderr().is_terminal())
    }

    /// Render with terminal colours and styles.
    pub fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Render help for `command`, or global help when `None`.
    ///
    /// The help of a single-command app is always the help of its command.
    ///
    /// Highlighted text uses the app's [`highlight_color`](crate::AppBuilder::highlight_color).
    pub fn render(&self, app: &App, program: &str, command: Option<&Command>) -> String {
        let printer = Printer {
            color: app.highlight_color,
            ..self.clone()
        };
        printer.layout(app, program, command)
    }

    fn layout(&self, app: &App, program: &str, command: Option<&Command>) -> String {
        let command = command.or_else(|| app.single_command());
        let help_option = OptionConfig::help(HELP_HEADLINE);
        let mut options: Vec<&OptionConfig> = Vec::default();

        if app.help_access.has_flag() {
            options.push(&help_option);
        }

        options.extend(app.global_options.iter());

        if let Some(command) = command {
            options.extend(command.options.iter());
        }

        let mut out = String::default();

        if let Some(headline) = non_empty(&app.headline) {
            out.push_str(&format!("{}\n", self.braces(headline)));
        }

        out.push_str(&format!("{} {}", self.bold("Usage:"), basename(program)));

        let description = match command {
            None => {
                let mut placeholder = self.hi("COMMAND");

                if app.default_command.is_some() {
                    placeholder = format!("[{placeholder}]");
                }

                if !options.is_empty() {
                    out.push_str(&format!(" [{}]", self.hi("OPTIONS")));
                }

                out.push_str(&format!(" {placeholder} [...]"));
                non_empty(&app.description)
            }
            Some(command) => {
                if app.commands.len() != 1 {
                    if app.default_command.as_deref() == Some(command.name.as_str()) {
                        out.push_str(&format!(" [{}]", command.name));
                    } else {
                        out.push_str(&format!(" {}", command.name));
                    }
                }

                if !options.is_empty() {
                    out.push_str(&format!(" [{}]", self.hi("OPTIONS")));
                }

                out.push_str(&self.usage_args(command));

                if let Some(headline) = non_empty(&command.headline) {
                    out.push_str(&format!("\n\n  {}", self.bold(headline)));
                }

                non_empty(&command.description)
            }
        };

        if let Some(description) = description {
            let description = trim_newlines(description).replace('\n', "\n  ");
            out.push_str(&format!("\n\n  {}", self.braces(&description)));
        }

        if !options.is_empty() {
            out.push_str(&format!("\n\n{}", self.bold("Options:")));
            out.push_str(&self.options(&options));
        }

        out.push('\n');

        if command.is_some() {
            return out;
        }

        let help_command = Command::new(HELP_COMMAND).headline(HELP_HEADLINE);
        let mut commands: Vec<&Command> = Vec::default();

        if app.help_access.has_command() {
            commands.push(&help_command);
        }

        commands.extend(app.commands.iter());
        out.push_str(&format!("\n{}", self.bold("Commands:")));
        out.push_str(&self.commands(&commands));
        out.push('\n');
        out
    }

    fn usage_args(&self, command: &Command) -> String {
        let args = &command.args;
        let shown = std::cmp::max(args.count, args.metavars.len());
        let mut out = String::default();

        for index in 0..shown {
            let metavar = self.hi(args.metavar(index));

            if index < args.count {
                out.push_str(&format!(" {metavar}"));
            } else {
                let ellipsis = if args.varadic && index + 1 == shown {
                    "..."
                } else {
                    ""
                };
                out.push_str(&format!(" [{metavar}{ellipsis}]"));
            }
        }

        out
    }

    fn options(&self, options: &[&OptionConfig]) -> String {
        let lefts: Vec<(String, usize)> = options
            .iter()
            .map(|option| self.option_left(option))
            .collect();
        let column = lefts.iter().map(|(_, length)| *length).max().unwrap_or(0) + PADDING;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Aligning {} option headline(s) at column {column}.", options.len());
        }

        let mut out = String::default();

        for (option, (left, length)) in options.iter().zip(lefts) {
            out.push_str(&format!("\n  {left}"));
            let headline = non_empty(&option.headline);

            if headline.is_none() && option.choices.is_empty() {
                continue;
            }

            out.push_str(&" ".repeat(column - length));

            if let Some(headline) = headline {
                out.push_str(&self.wrap(headline, INDENT + column));

                if !option.choices.is_empty() {
                    out.push(' ');
                }
            }

            if !option.choices.is_empty() {
                let choices: Vec<String> = option
                    .choices
                    .iter()
                    .map(|choice| self.hi(choice))
                    .collect();
                out.push_str(&format!(
                    "{}{}{}",
                    self.grey("["),
                    choices.join(&self.grey("|")),
                    self.grey("]")
                ));
            }
        }

        out
    }

    fn option_left(&self, option: &OptionConfig) -> (String, usize) {
        let mut left = String::default();
        let mut length = 0;

        if let Some(short) = option.short {
            left.push_str(&self.hi(&format!("-{short}")));
            length += 2;

            if option.long.is_some() {
                left.push_str(&self.grey("/"));
                length += 1;
            }
        }

        if let Some(long) = &option.long {
            left.push_str(&self.hi(&format!("--{long}")));
            length += 2 + long.chars().count();
        }

        if !option.flag {
            let metavar = option.metavar_or(VALUE_METAVAR);
            left.push_str(&format!(" {}", self.hi(metavar)));
            length += 1 + metavar.chars().count();
        }

        (left, length)
    }

    fn commands(&self, commands: &[&Command]) -> String {
        let column = commands
            .iter()
            .map(|command| command.name.chars().count())
            .max()
            .unwrap_or(0)
            + PADDING;
        let mut out = String::default();

        for command in commands {
            out.push_str(&format!("\n  {}", self.hi(&command.name)));

            if let Some(headline) = non_empty(&command.headline) {
                out.push_str(&" ".repeat(column - command.name.chars().count()));
                out.push_str(&self.wrap(headline, INDENT + column));
            }
        }

        out
    }

    // Wrap (and highlight) the text, continuing each line at the column.
    fn wrap(&self, text: &str, column: usize) -> String {
        match self.terminal_width {
            None => self.braces(text),
            Some(terminal_width) => {
                let width = std::cmp::max(
                    terminal_width.saturating_sub(column),
                    MINIMUM_HEADLINE_WIDTH,
                );
                chunk(text, width)
                    .iter()
                    .map(|line| self.braces(line))
                    .collect::<Vec<String>>()
                    .join(&format!("\n{:column$}", ""))
            }
        }
    }

    fn braces(&self, text: &str) -> String {
        braces_pattern()
            .replace_all(text, |captures: &Captures| {
                let term = &captures[0];
                let inner = &term[1..term.len() - 1];

                match inner.split_once('/') {
                    Some((left, right)) => {
                        format!("{}{}{}", self.hi(left), self.grey("/"), self.hi(right))
                    }
                    None => self.hi(inner),
                }
            })
            .into_owned()
    }

    fn hi(&self, text: &str) -> String {
        if self.highlight {
            text.color(self.color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.highlight {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn grey(&self, text: &str) -> String {
        if self.highlight {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

impl App {
    /// Render help for `command`, or global help when `None`, for writing to stderr (see [`Printer::stderr`]).
    /// `program` is usually the first element of `std::env::args()`.
    pub fn help(&self, program: &str, command: Option<&Command>) -> String {
        Printer::stderr().render(self, program, command)
    }
}

fn braces_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{.+?\}").expect("internal error - the highlight pattern must compile")
    })
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|text| !text.is_empty())
}

// Descriptions are written as raw string literals, starting and ending with a newline.
fn trim_newlines(text: &str) -> &str {
    let text = text.strip_prefix('\n').unwrap_or(text);
    text.strip_suffix('\n').unwrap_or(text)
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if word.is_empty() {
            continue;
        }

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = String::default();
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let chars: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;
    let mut right = increment;

    while right + 1 < chars.len() {
        lines.push(format!("{}-", chars[left..right].iter().collect::<String>()));
        left += increment;
        right += increment;
    }

    current.extend(&chars[left..]);
}
