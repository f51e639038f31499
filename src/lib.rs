//! `argle` is a schema driven command line parser for Rust.
//!
//! An [`App`] is declared up front as a set of named [`Command`]s, each with its own options and positional arguments.
//! From that one declaration, `argle` provides:
//! * *Parsing*:
//! Turn an `argv` into a [`Parsed`] result, holding the chosen command, option values, and positional arguments.
//! * *Help output*:
//! Render a usage/help page for the app or any one of its commands, wrapped to the terminal width.
//! * *Shell completions*:
//! Compute completion candidates for a partially typed command line, and generate the bash/fish scripts which call back into your program to get them.
//!
//! `argle` deliberately does not convert option values or arguments into typed values.
//! Values are handed back as strings, and the [`Runner`] for each command decides what they mean.
//! When a runner rejects a value, it reports that through the same error channel the parser uses (see [`Parsed::error_message`]).
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/single_command.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ summer --help
//! Sum some integers
//! Usage: summer [OPTIONS] ITEM
//!
//! Options:
//!   -h/--help     Show this help
//!   -v/--verbose  Report how many items were summed
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer
//! missing argument: ITEM
//!
//! $ summer 1 blah
//! 'blah' isn't an integer
//! ```
//!
//! # Commands
//! Most apps configure multiple commands, selected by the first token on the command line.
//! An app may name a default command, which is used when the first token is an option (or missing).
//! An app with exactly one command is a *single command* app; its command is always chosen and the first token is not a command name.
//!
//! # Options
//! Options are declared with a short name (`-x`), a long name (`--example`), or both.
//! An option is either a *flag* (present or not), or takes a value.
//! Values are given as `--example VALUE`, `--example=VALUE`, or `-x VALUE`.
//! Flags may be combined, as in `-abc`.
//! An option value may be restricted to a fixed set of choices.
//!
//! Global options (see [`AppBuilder::global_option`]) are accepted by every command.
//!
//! # Arguments
//! Each command accepts a fixed number of positional arguments (see [`ArgsConfig`]), optionally followed by any number more.
//! The token `--` ends option processing; everything after it is an argument.
//!
//! # Help
//! Help is reached via `-h/--help`, via the `help` command, or both (see [`HelpAccess`]).
//!
//! # Completions
//! See the `completions` demo for wiring a completion trigger into your program, and [`bash_completions`]/[`fish_completions`] for the scripts.
pub use argle_core::*;
