//! Core console types with zero optional dependencies.
//!
//! This module provides the fundamental building blocks:
//! - [`Console`] - Binding facade and entry point for execution
//! - [`ConsoleValue`] - Text codec for bound types
//! - [`ArgStream`] - Argument cursor with a sticky fail flag
//! - [`IntoCommand`] / [`IntoMethod`] - Type erasure for native callables
//! - [`Bindings`] - Identifier tables for commands and variables
//! - [`split_statements`] - Delimiter-aware statement splitter
//! - [`ConsoleError`] - Diagnostics written to the output sink

mod builtins;
mod console;
mod error;
mod evaluate;
mod executor;
mod handler;
mod registry;
mod stream;
mod value;

pub use builtins::{BUILTIN_COMMANDS, is_builtin};
pub use console::{Console, Shared, shared};
pub use error::{ConsoleError, ERROR_PREFIX};
pub use executor::split_statements;
pub use handler::{Handler, IntoCommand, IntoMethod};
pub use registry::Bindings;
pub use stream::{ArgStream, GroupError};
pub use value::{CommandReturn, ConsoleValue};
