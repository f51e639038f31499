use std::collections::HashMap;
use thiserror::Error;

use crate::api::OptionConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TableError {
    #[error("Duplicate option '-{0}' configured.")]
    DuplicateShort(char),

    #[error("Duplicate option '--{0}' configured.")]
    DuplicateLong(String),
}

/// The options available to a single command (global options first), indexed by both names.
///
/// Short and long names share one key space, so `-v` and `--v` may not name different options.
#[derive(Debug)]
pub(crate) struct OptionTable<'a> {
    options: Vec<&'a OptionConfig>,
    shorts: HashMap<char, usize>,
    longs: HashMap<&'a str, usize>,
}

impl<'a> OptionTable<'a> {
    pub(crate) fn new(
        options: impl IntoIterator<Item = &'a OptionConfig>,
    ) -> Result<Self, TableError> {
        let mut table = Self {
            options: Vec::default(),
            shorts: HashMap::default(),
            longs: HashMap::default(),
        };

        for option in options.into_iter() {
            let index = table.options.len();

            if let Some(long) = option.long.as_deref() {
                let short_alias = single_char(long).and_then(|c| table.short(c));
                if table.long(long).is_some() || short_alias.is_some() {
                    return Err(TableError::DuplicateLong(long.to_string()));
                }

                table.longs.insert(long, index);
            }

            if let Some(short) = option.short {
                let long_alias = table.long(&short.to_string()).filter(|i| *i != index);
                if table.short(short).is_some() || long_alias.is_some() {
                    return Err(TableError::DuplicateShort(short));
                }

                table.shorts.insert(short, index);
            }

            table.options.push(option);
        }

        Ok(table)
    }

    pub(crate) fn long(&self, name: &str) -> Option<usize> {
        self.longs.get(name).copied()
    }

    pub(crate) fn short(&self, name: char) -> Option<usize> {
        self.shorts.get(&name).copied()
    }

    /// Find an option by either name, without hyphens.
    pub(crate) fn key(&self, name: &str) -> Option<usize> {
        self.long(name)
            .or_else(|| single_char(name).and_then(|c| self.short(c)))
    }

    pub(crate) fn get(&self, index: usize) -> &'a OptionConfig {
        self.options[index]
    }

    pub(crate) fn options(&self) -> &[&'a OptionConfig] {
        &self.options
    }
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn table_empty() {
        let options: &[OptionConfig] = &[];
        let table = OptionTable::new(options).unwrap();
        assert!(table.options().is_empty());
        assert_eq!(table.key("a"), None);
    }

    #[test]
    fn table_aliases() {
        // Setup
        let options = vec![
            OptionConfig::short('o').flag(),
            OptionConfig::long("value"),
            OptionConfig::new('c', "choice"),
        ];

        // Execute
        let table = OptionTable::new(options.iter()).unwrap();

        // Verify
        assert_eq!(table.options().len(), 3);
        assert_eq!(table.short('o'), Some(0));
        assert_eq!(table.long("value"), Some(1));
        assert_eq!(table.short('c'), Some(2));
        assert_eq!(table.long("choice"), Some(2));
        assert_eq!(table.key("c"), table.key("choice"));
        assert_eq!(table.key("o"), Some(0));
        assert_eq!(table.key("v"), None);
        assert_eq!(table.get(2).get_long(), Some("choice"));
    }

    #[rstest]
    #[case(vec![OptionConfig::short('a'), OptionConfig::short('a')], TableError::DuplicateShort('a'))]
    #[case(vec![OptionConfig::long("ab"), OptionConfig::new('x', "ab")], TableError::DuplicateLong("ab".to_string()))]
    #[case(vec![OptionConfig::short('a'), OptionConfig::long("a")], TableError::DuplicateLong("a".to_string()))]
    #[case(vec![OptionConfig::long("a"), OptionConfig::short('a')], TableError::DuplicateShort('a'))]
    fn table_duplicate(#[case] options: Vec<OptionConfig>, #[case] expected: TableError) {
        let result = OptionTable::new(options.iter());
        assert_matches!(result, Err(error) => {
            assert_eq!(error, expected);
        });
    }

    #[test]
    fn table_same_option_both_names() {
        // An option's own short and long form never collide with one another.
        let options = vec![OptionConfig::new('a', "a")];
        let table = OptionTable::new(options.iter()).unwrap();
        assert_eq!(table.key("a"), Some(0));
    }
}
