use std::io::{self, Write};

use crate::api::{App, OptionConfig};
use crate::completion::{Candidate, CompletionStyle};
use crate::constant::*;
use crate::matcher::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

struct Collector<'c> {
    current: &'c str,
    candidates: Vec<Candidate>,
}

impl<'c> Collector<'c> {
    fn new(current: &'c str) -> Self {
        Self {
            current,
            candidates: Vec::default(),
        }
    }

    fn offer(&mut self, value: &str, headline: Option<&str>, fallback: &str) {
        if value.starts_with(self.current) {
            let description = headline.filter(|h| !h.is_empty()).unwrap_or(fallback);
            self.candidates.push(Candidate::new(value, description));
        }
    }
}

impl App {
    /// Find the completions for the word under the cursor, in configuration order.
    ///
    /// `argv` is laid out as the completion script invokes the program:
    /// the program name, the completion trigger, then the words of the command line being completed (without its program name).
    /// `cursor` is the index into `argv` of the word being completed; a cursor of `argv.len()` completes an empty word.
    /// Words after the cursor are ignored.
    ///
    /// # Panics
    /// If `argv` has fewer than two elements, or `cursor` doesn't index a word of the command line (nor `argv.len()`).
    ///
    /// ### Example
    /// ```
    /// # use argle_core as argle;
    /// use argle::{App, Command, OptionConfig};
    ///
    /// let app = App::builder()
    ///     .command(Command::new("cmd1").option(OptionConfig::short('c').choices(["aa", "bb"])))
    ///     .command(Command::new("cmd2"))
    ///     .build();
    ///
    /// let values = |argv: &[&str], cursor: usize| -> Vec<String> {
    ///     app.complete(argv, cursor)
    ///         .iter()
    ///         .map(|candidate| candidate.value().to_string())
    ///         .collect()
    /// };
    ///
    /// assert_eq!(values(&["program", "--complete", "c"], 2), vec!["cmd1", "cmd2"]);
    /// assert_eq!(values(&["program", "--complete", "cmd1", "-c"], 4), vec!["aa", "bb"]);
    /// assert_eq!(values(&["program", "--complete", "cmd1", "-c", "a"], 4), vec!["aa"]);
    /// ```
    pub fn complete<S: AsRef<str>>(&self, argv: &[S], cursor: usize) -> Vec<Candidate> {
        assert!(
            argv.len() >= 2,
            "completion argv must hold the program and the completion trigger"
        );
        assert!(
            (2..=argv.len()).contains(&cursor),
            "completion cursor {cursor} is out of range for {} argument(s)",
            argv.len()
        );

        let words: Vec<&str> = argv[2..cursor].iter().map(AsRef::as_ref).collect();
        let current = argv.get(cursor).map_or("", AsRef::as_ref);
        let mut collector = Collector::new(current);

        // Past the separator, nothing is an option or command.
        if words.iter().any(|word| *word == SEPARATOR) {
            return collector.candidates;
        }

        let position = words.len();
        let first = words.first().copied().unwrap_or(current);
        let previous = words.last().copied().unwrap_or("");
        let single = self.single_command().is_some();
        let single_or_default = single || self.default_command.is_some();
        let help_first = self.is_help_token(0, first);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Completing '{current}' at position {position} (help first: {help_first}).");
        }

        if position == 0 || (help_first && position == 1) {
            if !single {
                for command in &self.commands {
                    collector.offer(&command.name, command.headline.as_deref(), "Command");
                }
            }

            if position == 0 {
                if self.help_access.has_command() {
                    collector.offer(HELP_COMMAND, Some(HELP_COMPLETION), "");
                }

                if !single_or_default && self.help_access.has_flag() {
                    collector.offer(&format!("-{HELP_SHORT}"), Some(HELP_COMPLETION), "");
                    collector.offer(&format!("--{HELP_LONG}"), Some(HELP_COMPLETION), "");
                }
            }

            // Without a command to fall back on, options can't follow.
            if !single_or_default {
                return collector.candidates;
            }
        }

        let command = match self.single_command() {
            Some(command) => command,
            None => {
                let name = match self.default_command.as_deref() {
                    Some(default) if first.is_empty() || is_option(first) => default,
                    _ => first,
                };

                match self.find_command(name) {
                    Some(command) => command,
                    None => return collector.candidates,
                }
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Completing within command '{}'.", command.name);
        }

        let table = self.option_table(command);

        if is_option(previous) && !previous.contains('=') {
            let index = match classify(previous) {
                Token::Long { name, value: None } => table.long(name),
                Token::Short(short) => table.short(short),
                _ => None,
            };

            if let Some(option) = index.map(|index| table.get(index)) {
                let description = format!("{previous} {}", option.metavar_or(ARG_METAVAR));

                for choice in &option.choices {
                    collector.offer(choice, Some(&description), "");
                }

                // The option expects a value, so no other option may follow.
                if !option.flag {
                    return collector.candidates;
                }
            }
        }

        let help_option = OptionConfig::help(HELP_COMPLETION);
        let mut options: Vec<&OptionConfig> = table.options().to_vec();

        if self.help_access.has_flag() {
            options.push(&help_option);
        }

        for option in options {
            let fallback = if option.flag { "Flag" } else { "Option" };
            let headline = option.headline.as_deref();

            if let Some(short) = option.short {
                collector.offer(&format!("-{short}"), headline, fallback);
            }

            if let Some(long) = &option.long {
                collector.offer(&format!("--{long}"), headline, fallback);
            }
        }

        collector.candidates
    }

    /// Write the completions for the word under the cursor, one per line (see [`App::complete`]).
    pub fn write_completions<S: AsRef<str>>(
        &self,
        writer: &mut impl Write,
        argv: &[S],
        cursor: usize,
        style: CompletionStyle,
    ) -> io::Result<()> {
        for candidate in self.complete(argv, cursor) {
            match style {
                CompletionStyle::Annotated => writeln!(writer, "{candidate}")?,
                CompletionStyle::Plain => writeln!(writer, "{}", candidate.value)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AppBuilder, Command};
    use crate::model::HelpAccess;
    use rstest::rstest;

    fn commands() -> AppBuilder {
        App::builder()
            .command(
                Command::new("cmd1")
                    .option(OptionConfig::short('f').flag())
                    .option(OptionConfig::long("value"))
                    .option(OptionConfig::new('c', "choice").choices(["aa", "bb"])),
            )
            .command(Command::new("cmd2"))
    }

    fn app() -> App {
        commands().global_option(OptionConfig::short('o').flag()).build()
    }

    fn app_with_default() -> App {
        commands()
            .global_option(OptionConfig::short('o').flag())
            .default_command("cmd1")
            .build()
    }

    fn app_single_command() -> App {
        App::builder()
            .command(
                Command::single()
                    .option(OptionConfig::short('f').flag())
                    .option(OptionConfig::long("value"))
                    .option(OptionConfig::new('c', "choice").choices(["aa", "bb"])),
            )
            .build()
    }

    fn app_help(help_access: HelpAccess) -> App {
        commands()
            .global_option(OptionConfig::short('o').flag())
            .help_access(help_access)
            .build()
    }

    fn values(app: &App, argv: &[&str], cursor: usize) -> Vec<String> {
        app.complete(argv, cursor)
            .iter()
            .map(|candidate| candidate.value().to_string())
            .collect()
    }

    #[rstest]
    #[case(app(), vec!["program", "_c"], 2, vec!["cmd1", "cmd2", "-h", "--help"])]
    #[case(app(), vec!["program", "_c", "c"], 2, vec!["cmd1", "cmd2"])]
    #[case(app(), vec!["program", "_c", "-"], 2, vec!["-h", "--help"])]
    #[case(app(), vec!["program", "_c", "x"], 2, vec![])]
    #[case(app(), vec!["program", "_c", "cmd1"], 2, vec!["cmd1"])]
    #[case(app(), vec!["program", "_c", "cmd1"], 3, vec!["-o", "-f", "--value", "-c", "--choice", "-h", "--help"])]
    #[case(app(), vec!["program", "_c", "cmd1", "--"], 3, vec!["--value", "--choice", "--help"])]
    #[case(app(), vec!["program", "_c", "cmd1", "--", "--"], 4, vec![])]
    #[case(app(), vec!["program", "_c", "cmd1", "-c"], 4, vec!["aa", "bb"])]
    #[case(app(), vec!["program", "_c", "cmd1", "-c", "a"], 4, vec!["aa"])]
    #[case(app(), vec!["program", "_c", "cmd1", "--choice", "b"], 4, vec!["bb"])]
    #[case(app(), vec!["program", "_c", "cmd1", "--choice=a"], 4, vec!["-o", "-f", "--value", "-c", "--choice", "-h", "--help"])]
    #[case(app(), vec!["program", "_c", "cmd1", "--value"], 4, vec![])]
    #[case(app(), vec!["program", "_c", "cmd1", "-f"], 4, vec!["-o", "-f", "--value", "-c", "--choice", "-h", "--help"])]
    #[case(app(), vec!["program", "_c", "cmd1", "-o", "--c"], 4, vec!["--choice"])]
    #[case(app(), vec!["program", "_c", "cmd1", "-x"], 3, vec![])]
    #[case(app(), vec!["program", "_c", "cmd1", "-c", "a"], 2, vec!["cmd1"])]
    #[case(app(), vec!["program", "_c", "cmd3"], 3, vec![])]
    #[case(app(), vec!["program", "_c", "cmd2", "-"], 3, vec!["-o", "-h", "--help"])]
    #[case(app(), vec!["program", "_c", "-h"], 3, vec!["cmd1", "cmd2"])]
    #[case(app(), vec!["program", "_c", "--help", "cmd"], 3, vec!["cmd1", "cmd2"])]
    #[case(app(), vec!["program", "_c", "help"], 3, vec![])]
    #[case(app_with_default(), vec!["program", "_c"], 2, vec!["cmd1", "cmd2", "-o", "-f", "--value", "-c", "--choice", "-h", "--help"])]
    #[case(app_with_default(), vec!["program", "_c", "--v"], 2, vec!["--value"])]
    #[case(app_with_default(), vec!["program", "_c", "cmd2"], 3, vec!["-o", "-h", "--help"])]
    #[case(app_with_default(), vec!["program", "_c", "-c"], 3, vec!["aa", "bb"])]
    #[case(app_with_default(), vec!["program", "_c", "x"], 3, vec![])]
    #[case(app_single_command(), vec!["program", "_c"], 2, vec!["-f", "--value", "-c", "--choice", "-h", "--help"])]
    #[case(app_single_command(), vec!["program", "_c", "--v"], 2, vec!["--value"])]
    #[case(app_single_command(), vec!["program", "_c", "arg"], 3, vec!["-f", "--value", "-c", "--choice", "-h", "--help"])]
    #[case(app_help(HelpAccess::COMMAND), vec!["program", "_c"], 2, vec!["cmd1", "cmd2", "help"])]
    #[case(app_help(HelpAccess::COMMAND), vec!["program", "_c", "help"], 3, vec!["cmd1", "cmd2"])]
    #[case(app_help(HelpAccess::COMMAND), vec!["program", "_c", "cmd1", "-"], 3, vec!["-o", "-f", "--value", "-c", "--choice"])]
    #[case(app_help(HelpAccess::FLAG | HelpAccess::COMMAND), vec!["program", "_c"], 2, vec!["cmd1", "cmd2", "help", "-h", "--help"])]
    fn complete(
        #[case] app: App,
        #[case] argv: Vec<&str>,
        #[case] cursor: usize,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(values(&app, &argv, cursor), expected);
    }

    #[test]
    fn complete_single_command_help_command() {
        let app = App::builder()
            .command(
                Command::single()
                    .option(OptionConfig::short('f').flag())
                    .option(OptionConfig::long("value"))
                    .option(OptionConfig::new('c', "choice").choices(["aa", "bb"])),
            )
            .help_access(HelpAccess::COMMAND)
            .build();

        assert_eq!(
            values(&app, &["program", "_c"], 2),
            vec!["help", "-f", "--value", "-c", "--choice"]
        );
    }

    #[test]
    fn complete_descriptions() {
        // Setup
        let app = App::builder()
            .global_option(OptionConfig::short('o').flag())
            .command(
                Command::new("cmd1")
                    .headline("First")
                    .option(OptionConfig::long("value").headline("A value"))
                    .option(
                        OptionConfig::short('c')
                            .choices(["aa", "bb"])
                            .metavar("CHOICE"),
                    ),
            )
            .command(Command::new("cmd2"))
            .help_access(HelpAccess::FLAG | HelpAccess::COMMAND)
            .build();

        // Execute
        let commands = app.complete(&["program", "_c"], 2);
        let options = app.complete(&["program", "_c", "cmd1"], 3);
        let choices = app.complete(&["program", "_c", "cmd1", "-c"], 4);

        // Verify
        assert_eq!(
            commands,
            vec![
                Candidate::new("cmd1", "First"),
                Candidate::new("cmd2", "Command"),
                Candidate::new("help", "Show help"),
                Candidate::new("-h", "Show help"),
                Candidate::new("--help", "Show help"),
            ]
        );
        assert_eq!(
            options,
            vec![
                Candidate::new("-o", "Flag"),
                Candidate::new("--value", "A value"),
                Candidate::new("-c", "Option"),
                Candidate::new("-h", "Show help"),
                Candidate::new("--help", "Show help"),
            ]
        );
        assert_eq!(
            choices,
            vec![
                Candidate::new("aa", "-c CHOICE"),
                Candidate::new("bb", "-c CHOICE"),
            ]
        );
    }

    #[rstest]
    #[case(vec!["program"], 1)]
    #[case(vec!["program", "_c"], 3)]
    #[case(vec!["program", "_c", "cmd1"], 1)]
    #[should_panic]
    fn complete_invalid(#[case] argv: Vec<&str>, #[case] cursor: usize) {
        app().complete(&argv, cursor);
    }

    #[rstest]
    #[case(CompletionStyle::Annotated, "cmd1\tCommand\ncmd2\tCommand\n")]
    #[case(CompletionStyle::Plain, "cmd1\ncmd2\n")]
    fn write_completions(#[case] style: CompletionStyle, #[case] expected: &str) {
        // Setup
        let app = app();
        let mut buffer: Vec<u8> = Vec::default();

        // Execute
        app.write_completions(&mut buffer, &["program", "_c", "c"], 2, style)
            .unwrap();

        // Verify
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }

    #[test]
    fn write_completions_empty() {
        let app = app();
        let mut buffer: Vec<u8> = Vec::default();

        app.write_completions(&mut buffer, &["program", "_c", "x"], 2, CompletionStyle::default())
            .unwrap();

        assert!(buffer.is_empty());
    }

    #[test]
    fn complete_mirrors_parse() {
        // Every offered option is accepted by the parser in the same position.
        let app = app();

        for candidate in app.complete(&["program", "_c", "cmd1"], 3) {
            let argv = match candidate.value() {
                "-h" | "--help" => continue,
                "--value" | "-c" | "--choice" => vec!["program", "cmd1", candidate.value(), "aa"],
                value => vec!["program", "cmd1", value],
            };

            let parsed = app.parse(&argv);

            assert!(!parsed.failed(), "{argv:?}: {:?}", parsed.errors());
        }
    }
}
