mod candidate;
mod engine;
mod shell;

pub use self::candidate::*;
pub use self::shell::*;
