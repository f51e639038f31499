use std::ops::BitOr;

/// What the parser suggests the caller do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run the chosen command.
    Proceed,
    /// Display help (for the chosen command, if any).
    /// Combined with a failed parse, the caller should exit non-zero after displaying it.
    Help,
    /// Nothing else to do; the parse has always failed.
    Fatal,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// How the Cli user may access help output.
///
/// This is a bitset: combine the variants with `|`.
/// The empty set behaves as [`HelpAccess::FLAG`].
///
/// ### Example
/// ```
/// # use argle_core as argle;
/// use argle::HelpAccess;
///
/// let both = HelpAccess::FLAG | HelpAccess::COMMAND;
/// assert!(both.has_flag());
/// assert!(both.has_command());
/// assert!(HelpAccess::default().has_flag());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HelpAccess(u8);

impl HelpAccess {
    /// Access via the `-h/--help` flags.
    pub const FLAG: HelpAccess = HelpAccess(1);
    /// Access via a `help` pseudo-command.
    pub const COMMAND: HelpAccess = HelpAccess(1 << 1);

    /// Whether the `-h/--help` flags are recognized.
    pub fn has_flag(&self) -> bool {
        self.0 == 0 || self.0 & Self::FLAG.0 != 0
    }

    /// Whether the `help` pseudo-command is recognized.
    pub fn has_command(&self) -> bool {
        self.0 & Self::COMMAND.0 != 0
    }
}

impl BitOr for HelpAccess {
    type Output = HelpAccess;

    fn bitor(self, rhs: Self) -> Self::Output {
        HelpAccess(self.0 | rhs.0)
    }
}
