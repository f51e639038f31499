use crate::parser::ParseError;

/// Receives parse errors as they are reported, instead of collecting them in [`Parsed::errors`](crate::Parsed::errors).
///
/// Any `Fn(ParseError)` closure is a handler.
///
/// ### Example
/// ```
/// # use argle_core as argle;
/// use argle::{App, Command, ParseError};
///
/// let app = App::builder()
///     .command(Command::single())
///     .error_handler(|error: ParseError| eprintln!("oops: {error}"))
///     .build();
///
/// let parsed = app.parse(&["program", "unexpected"]);
/// assert!(parsed.failed());
/// assert!(parsed.errors().is_empty());
/// ```
pub trait ErrorHandler {
    /// Handle a single error.
    fn handle(&self, error: ParseError);
}

impl<F> ErrorHandler for F
where
    F: Fn(ParseError),
{
    fn handle(&self, error: ParseError) {
        self(error)
    }
}

/// Prints each error to stderr, as it happens.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHandler {}

impl ErrorHandler for ConsoleHandler {
    fn handle(&self, error: ParseError) {
        eprintln!("{error}");
    }
}

#[cfg(any(test, feature = "unit_test"))]
mod recording {
    use std::sync::{Arc, Mutex};

    use crate::parser::{ErrorHandler, ParseError};

    /// Records errors in memory.
    /// Clones share the same record, so keep a clone to inspect what an app has handled.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingHandler {
        errors: Arc<Mutex<Vec<ParseError>>>,
    }

    impl RecordingHandler {
        /// The errors handled so far, in order.
        pub fn errors(&self) -> Vec<ParseError> {
            match self.errors.lock() {
                Ok(errors) => errors.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            }
        }
    }

    impl ErrorHandler for RecordingHandler {
        fn handle(&self, error: ParseError) {
            match self.errors.lock() {
                Ok(mut errors) => errors.push(error),
                Err(poisoned) => poisoned.into_inner().push(error),
            }
        }
    }
}

#[cfg(any(test, feature = "unit_test"))]
pub use self::recording::RecordingHandler;
