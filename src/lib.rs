//! An embeddable command and variable dispatch engine for developer consoles.
//!
//! Bind native functions and variables under string identifiers, then
//! execute free text against them:
//!
//! - **Commands**: native functions of up to eight typed parameters
//! - **Console variables**: caller-owned values read and written with `set`/`get`
//! - **Nested expressions**: `set speed (* (get speed) 2)` feeds one
//!   command's output into another's argument
//! - **Built-ins**: `set`, `get`, `help`, `cvars`, `procs`, `+ - * / %`
//!
//! # Features
//!
//! - `bevy`: [`ConsolePlugin`] with submit/output-line messages
//! - `config`: RON load/save for [`ConsoleConfig`]
//! - `terminal`: line-oriented stdin/stdout driver
//! - `full`: Enable all of the above
//!
//! # Quick Start
//!
//! ```
//! use devconsole::prelude::*;
//!
//! fn fib(n: u32) -> u64 {
//!     if n <= 1 { n as u64 } else { fib(n - 1) + fib(n - 2) }
//! }
//!
//! let health = shared(100i32);
//! let name = shared(String::from("player"));
//!
//! let mut console = Console::new();
//! console.bind_cvar("health", &health);
//! console.bind_cvar("name", &name);
//! console.bind_cmd("fib", fib);
//!
//! let mut out = String::new();
//! console.execute("set health (fib 10); set name \"Gordon F\"; get name", &mut out);
//!
//! assert_eq!(*health.read(), 55);
//! assert_eq!(out, "\"Gordon F\"\n");
//! ```

// Core module (always available, zero optional deps)
pub mod core;

pub mod config;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Bevy integration (feature-gated)
#[cfg(feature = "bevy")]
pub mod plugin;

// Re-export core types at crate root for convenience
pub use crate::core::{
    ArgStream, Bindings, CommandReturn, Console, ConsoleError, ConsoleValue, Handler,
    IntoCommand, IntoMethod, Shared, shared, split_statements,
    BUILTIN_COMMANDS,
};

pub use config::ConsoleConfig;

#[cfg(feature = "config")]
pub use config::ConfigError;

#[cfg(feature = "terminal")]
pub use terminal::{Terminal, TerminalConfig};

#[cfg(feature = "bevy")]
pub use plugin::{ConsoleLine, ConsolePlugin, ConsoleSubmit, LineKind};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        ArgStream, CommandReturn, Console, ConsoleError, ConsoleValue, Shared, shared,
    };
    pub use crate::config::ConsoleConfig;

    #[cfg(feature = "bevy")]
    pub use crate::plugin::{ConsoleLine, ConsolePlugin, ConsoleSubmit, LineKind};
}
