//! Engine module for `argle`.
//! See [documentation root](https://docs.rs/argle/latest/argle/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod completion;
mod constant;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use colored::Color;
pub use completion::*;
pub use model::*;
pub use parser::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
