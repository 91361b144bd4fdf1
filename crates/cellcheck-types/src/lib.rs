//! Shared types for cellcheck sessions.

mod command;
mod diagnostic;
mod report;
mod symbols;

pub use command::*;
pub use diagnostic::*;
pub use report::*;
pub use symbols::*;
