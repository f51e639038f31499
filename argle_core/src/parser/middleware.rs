use std::ffi::OsString;

use crate::api::{App, Command};
use crate::constant::*;
use crate::matcher::*;
use crate::model::Action;
use crate::parser::{OptionResult, ParseError, Parsed};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// An option which still expects its value from the next argument.
struct Pending<'t> {
    index: usize,
    token: &'t str,
}

impl App {
    /// Parse the command line arguments.
    /// `argv` must be the full argument list, including the program name (ex: `std::env::args()`).
    ///
    /// Problems with the input are reported in the returned [`Parsed`], never by panicking.
    ///
    /// ### Example
    /// ```
    /// # use argle_core as argle;
    /// use argle::{Action, App, Command, OptionConfig};
    ///
    /// let app = App::builder()
    ///     .global_option(OptionConfig::short('o').flag())
    ///     .command(
    ///         Command::new("cmd1")
    ///             .option(OptionConfig::long("value"))
    ///             .option(OptionConfig::new('c', "choice").choices(["aa", "bb"])),
    ///     )
    ///     .command(Command::new("cmd2"))
    ///     .build();
    ///
    /// let parsed = app.parse(&["program", "cmd1", "-c", "aa"]);
    /// assert_eq!(parsed.action(), Action::Proceed);
    /// assert_eq!(parsed.command().unwrap().get_name(), "cmd1");
    /// assert_eq!(parsed.value("choice"), Some("aa"));
    /// assert!(!parsed.is_set("o"));
    /// ```
    pub fn parse<S: AsRef<str>>(&self, argv: &[S]) -> Parsed<'_> {
        let (program, tokens): (&str, Vec<&str>) = match argv.split_first() {
            Some((program, rest)) => (program.as_ref(), rest.iter().map(AsRef::as_ref).collect()),
            None => ("", Vec::default()),
        };
        let mut parsed = Parsed::new(self, program);

        if let Some(command) = self.single_command() {
            parsed.command.replace(command);
        }

        // 1. Scan for the separator, short-circuiting on any help request before it.
        let mut separator = None;

        for (index, token) in tokens.iter().enumerate() {
            if *token == SEPARATOR {
                separator.replace(index);
                break;
            }

            if self.is_help_token(index, token) {
                self.short_circuit_help(&mut parsed, &tokens);
                return parsed;
            }
        }

        let (args, unparsed) = match separator {
            Some(index) => (&tokens[..index], &tokens[index + 1..]),
            None => (&tokens[..], &tokens[tokens.len()..]),
        };

        // 2. Choose the command.
        let (command, offset) = match self.select_command(&mut parsed, args) {
            Some(selection) => selection,
            None => return parsed,
        };
        parsed.command.replace(command);

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Selected command '{}', parsing {} argument(s).",
                command.get_name(),
                args.len() - offset
            );
        }

        // 3. Index the command's options.
        let table = self.option_table(command);
        let mut results: Vec<OptionResult> = table
            .options()
            .iter()
            .map(|option| OptionResult::new(option))
            .collect();

        // 4. Interpret the arguments.
        let mut pending: Option<Pending> = None;

        for token in &args[offset..] {
            if let Some(Pending { index, token: option }) = pending.take() {
                if is_option(token) {
                    parsed.error(ParseError::AmbiguousValue {
                        option: option.to_string(),
                        next: token.to_string(),
                    });
                } else {
                    assign(
                        &mut parsed,
                        &mut results[index],
                        token,
                        format!("{option} {token}"),
                    );
                }

                continue;
            }

            match classify(token) {
                Token::Positional(value) => parsed.args.push(value.to_string()),
                Token::Separator => {
                    unreachable!("internal error - the separator is split off before option parsing")
                }
                Token::Dash => parsed.error(ParseError::UnrecognizedOption {
                    option: token.to_string(),
                    combined: None,
                }),
                Token::CombinedEquals => parsed.error(ParseError::EqualsInCombined {
                    arg: token.to_string(),
                }),
                Token::Long { name, value } => match table.long(name) {
                    Some(index) => {
                        pending = apply(&mut parsed, &mut results[index], index, token, value);
                    }
                    None => parsed.error(ParseError::UnrecognizedOption {
                        option: token.to_string(),
                        combined: None,
                    }),
                },
                Token::Short(short) => match table.short(short) {
                    Some(index) => {
                        pending = apply(&mut parsed, &mut results[index], index, token, None);
                    }
                    None => parsed.error(ParseError::UnrecognizedOption {
                        option: token.to_string(),
                        combined: None,
                    }),
                },
                Token::Combined(shorts) => {
                    for short in shorts {
                        apply_combined(&mut parsed, &table, &mut results, short, token);
                    }
                }
            }
        }

        if let Some(Pending { index, token }) = pending {
            parsed.error(ParseError::MissingValue {
                option: token.to_string(),
                metavar: results[index].option.metavar_or(ARG_METAVAR).to_string(),
            });
        }

        parsed.table.replace(table);
        parsed.results = results;

        // 5. Check the positional argument count.
        parsed.args.extend(unparsed.iter().map(|token| token.to_string()));
        let count = command.args.count;
        let supplied = parsed.args.len();

        if !command.args.varadic && supplied > count {
            let extra = parsed.args.split_off(count);
            parsed.error(ParseError::TooManyArguments { extra });
        }

        if supplied < count {
            let metavars = (supplied..count)
                .map(|index| command.args.metavar(index).to_string())
                .collect();
            parsed.error(ParseError::MissingArguments { metavars });
        }

        parsed.action = Action::Proceed;
        parsed
    }

    /// Parse the arguments of this process.
    /// Arguments which aren't valid UTF-8 are converted lossily.
    pub fn parse_env(&self) -> Parsed<'_> {
        let argv = lossy_args(std::env::args_os());
        self.parse(&argv)
    }

    fn short_circuit_help<'a>(&'a self, parsed: &mut Parsed<'a>, tokens: &[&str]) {
        parsed.action = Action::Help;
        let mut resolved = false;

        if self.single_command().is_none() {
            for (index, token) in tokens.iter().take(2).enumerate() {
                if is_option(token) || self.is_help_token(index, token) {
                    continue;
                }

                match self.find_command(token) {
                    Some(command) => {
                        parsed.command.replace(command);
                        resolved = true;
                    }
                    None => {
                        let help = self.help_invocation(&parsed.program);
                        parsed.error(ParseError::InvalidCommand {
                            name: token.to_string(),
                            help,
                        });
                    }
                }
            }
        }

        // Asking for help the proper way isn't a failure: the help token, optionally a command, and nothing else.
        let clean = tokens.len() == 1 || (tokens.len() == 2 && resolved);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Help requested (clean: {clean}, resolved command: {resolved}).");
        }

        if !clean {
            parsed.set_failed();
        }
    }

    // The chosen command and the offset of its first argument.
    fn select_command<'a>(
        &'a self,
        parsed: &mut Parsed<'a>,
        args: &[&str],
    ) -> Option<(&'a Command, usize)> {
        if let Some(command) = self.single_command() {
            return Some((command, 0));
        }

        let first = match args.first() {
            Some(first) if !is_option(first) => first,
            _ => {
                if let Some(command) = self.default_command() {
                    return Some((command, 0));
                }

                if args.is_empty() {
                    parsed.action = Action::Help;
                    parsed.set_failed();
                } else {
                    let help = self.help_invocation(&parsed.program);
                    parsed.error(ParseError::NoCommand { help });
                    parsed.action = Action::Fatal;
                }

                return None;
            }
        };

        match self.find_command(first) {
            Some(command) => Some((command, 1)),
            None => {
                let help = self.help_invocation(&parsed.program);
                parsed.error(ParseError::InvalidCommand {
                    name: first.to_string(),
                    help,
                });
                parsed.action = Action::Fatal;
                None
            }
        }
    }
}

fn lossy_args(args: impl IntoIterator<Item = OsString>) -> Vec<String> {
    args.into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

// Apply a single (non-combined) option, returning the option if it now expects a value.
fn apply<'t>(
    parsed: &mut Parsed,
    result: &mut OptionResult,
    index: usize,
    token: &'t str,
    value: Option<&str>,
) -> Option<Pending<'t>> {
    if result.is_set {
        parsed.error(ParseError::DuplicateOption {
            option: token.to_string(),
            combined: None,
        });
        return None;
    }

    // A flag ignores any inline value.
    match value {
        _ if result.option.flag => result.is_set = true,
        Some(value) => assign(parsed, result, value, token.to_string()),
        None => {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Option '{token}' expects its value from the next argument.");
            }

            return Some(Pending { index, token });
        }
    }

    None
}

fn apply_combined(
    parsed: &mut Parsed,
    table: &OptionTable,
    results: &mut [OptionResult],
    short: char,
    token: &str,
) {
    let result = match table.short(short) {
        Some(index) => &mut results[index],
        None => {
            parsed.error(ParseError::UnrecognizedOption {
                option: short.to_string(),
                combined: Some(token.to_string()),
            });
            return;
        }
    };

    if result.is_set {
        parsed.error(ParseError::DuplicateOption {
            option: short.to_string(),
            combined: Some(token.to_string()),
        });
    } else if result.option.flag {
        result.is_set = true;
    } else {
        parsed.error(ParseError::CombinedValueOption {
            option: short,
            arg: token.to_string(),
        });
    }
}

// Set the option's value, if it is among the option's choices.
fn assign(parsed: &mut Parsed, result: &mut OptionResult, value: &str, arg: String) {
    if result.option.accepts(value) {
        result.value = value.to_string();
        result.is_set = true;
    } else {
        parsed.error(ParseError::InvalidChoice {
            arg,
            value: value.to_string(),
            choices: result.option.choices.clone(),
        });
    }
}
