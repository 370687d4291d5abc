//! Console diagnostics.
//!
//! Every failure inside [`Console::execute`](super::Console::execute) ends up
//! as one line of text on the output sink. [`ConsoleError`] is the single
//! place those lines are worded.

use std::fmt;

/// Prefix shared by every diagnostic line.
pub const ERROR_PREFIX: &str = "CONSOLE ERROR:";

/// A soft console failure, reported to the output sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// The statement's identifier is not a bound command.
    UnknownCommand { id: Box<str> },
    /// `set`/`get` named an identifier with no bound variable.
    UnknownVariable { id: Box<str> },
    /// The value given to `set` did not parse as the variable's type.
    VariableTypeMismatch { id: Box<str>, expected: &'static str },
    /// A command's arguments did not parse as its parameter types.
    ArgumentTypeMismatch { id: Box<str> },
    /// The storage behind a binding was dropped by the host.
    DanglingReference { id: Box<str> },
    /// A native arithmetic operation has no defined result.
    ArithmeticFault { reason: &'static str },
}

impl ConsoleError {
    /// Write this error as one diagnostic line.
    pub fn report(&self, out: &mut dyn fmt::Write) {
        let _ = writeln!(out, "{}", self);
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::UnknownCommand { id } => {
                write!(f, "{} Input '{}' isn't a command.", ERROR_PREFIX, id)
            }
            ConsoleError::UnknownVariable { id } => {
                write!(f, "{} There is no bound variable with id '{}'.", ERROR_PREFIX, id)
            }
            ConsoleError::VariableTypeMismatch { id, expected } => write!(
                f,
                "{} Type mismatch. CVar '{}' is of type '{}'.",
                ERROR_PREFIX, id, expected
            ),
            ConsoleError::ArgumentTypeMismatch { id } => {
                write!(f, "{} Incorrect argument types for '{}'.", ERROR_PREFIX, id)
            }
            ConsoleError::DanglingReference { id } => {
                write!(f, "{} '{}' refers to a value that no longer exists.", ERROR_PREFIX, id)
            }
            ConsoleError::ArithmeticFault { reason } => {
                write!(f, "{} Arithmetic fault: {}.", ERROR_PREFIX, reason)
            }
        }
    }
}

impl std::error::Error for ConsoleError {}
