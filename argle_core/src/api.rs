mod command;
mod core;
mod option;

pub use self::core::*;
pub use command::*;
pub use option::*;
