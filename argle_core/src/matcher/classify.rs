use crate::constant::*;

/// The lexical form of a single argument token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'t> {
    /// The literal `--`.
    Separator,
    /// `--name` or `--name=value`.
    Long {
        name: &'t str,
        value: Option<&'t str>,
    },
    /// `-c`.
    Short(char),
    /// `-abc`, to be decomposed into individual short options.
    Combined(Vec<char>),
    /// `-ab=c`, which is never valid.
    CombinedEquals,
    /// The lone `-`, which is never valid.
    Dash,
    Positional(&'t str),
}

/// Whether the token looks like an option, either short or long.
pub(crate) fn is_option(token: &str) -> bool {
    token.starts_with('-')
}

/// Whether the token looks like a long option.
pub(crate) fn is_long_option(token: &str) -> bool {
    token.starts_with("--")
}

pub(crate) fn classify(token: &str) -> Token<'_> {
    if token == SEPARATOR {
        return Token::Separator;
    }

    if is_long_option(token) {
        let long = &token[2..];
        return match long.split_once('=') {
            Some((name, value)) => Token::Long {
                name,
                value: Some(value),
            },
            None => Token::Long {
                name: long,
                value: None,
            },
        };
    }

    match token.strip_prefix('-') {
        None => Token::Positional(token),
        Some(shorts) => {
            let mut chars = shorts.chars();
            match (chars.next(), chars.next()) {
                (None, _) => Token::Dash,
                (Some(short), None) => Token::Short(short),
                _ if shorts.contains('=') => Token::CombinedEquals,
                _ => Token::Combined(shorts.chars().collect()),
            }
        }
    }
}
