mod base;
mod interface;
mod middleware;
mod printer;

pub use self::base::*;
pub use self::interface::*;
pub use self::printer::*;
