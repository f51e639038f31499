use colored::Color;

pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_LONG: &str = "help";
pub(crate) const HELP_COMMAND: &str = "help";
pub(crate) const HELP_HEADLINE: &str = "Show this help";
pub(crate) const HELP_COMPLETION: &str = "Show help";

// Missing values and positional arguments are reported with this metavar.
pub(crate) const ARG_METAVAR: &str = "ARG";
// Option values are displayed with this metavar in help output.
pub(crate) const VALUE_METAVAR: &str = "VALUE";

pub(crate) const SEPARATOR: &str = "--";

pub(crate) const HIGHLIGHT_COLOR: Color = Color::BrightBlue;
