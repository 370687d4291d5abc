//! Built-in console commands.
//!
//! Registered into every console at construction. Binding a command under
//! one of these names shadows the built-in.

use std::fmt;

use super::{ArgStream, Bindings, Console, ConsoleError, IntoCommand};

/// Identifiers of the built-in commands.
pub const BUILTIN_COMMANDS: [&str; 10] = ["set", "get", "help", "cvars", "procs", "+", "-", "*", "/", "%"];

const HELP_TEXT: &str = "
-- Console Help --
    set <cvar id> <value>
    get <cvar id>
    help : outputs help message
    cvars : list bound console variables
    procs : list bound console commands
    <cmd id> <arg 0> <arg 1> ... <arg n> : call a bound command
    (+, -, *, /, %) <lhs> <rhs> : arithmetic and modulo
    Arguments may be nested expressions:
        + (- 3 2) (* 4 5)
        set x (get y)
";

/// Install the built-in commands.
pub(crate) fn register(bindings: &mut Bindings) {
    bindings.insert_command("set", Box::new(set));
    bindings.insert_command("get", Box::new(get));
    bindings.insert_command("help", Box::new(help));
    bindings.insert_command("cvars", Box::new(cvars));
    bindings.insert_command("procs", Box::new(procs));

    bindings.insert_command("+", (|a: f32, b: f32| a + b).into_handler("+"));
    bindings.insert_command("-", (|a: f32, b: f32| a - b).into_handler("-"));
    bindings.insert_command("*", (|a: f32, b: f32| a * b).into_handler("*"));
    bindings.insert_command("/", (|a: f32, b: f32| a / b).into_handler("/"));
    bindings.insert_command(
        "%",
        (|a: i32, b: i32| {
            a.checked_rem(b).ok_or(ConsoleError::ArithmeticFault {
                reason: "integer remainder by zero or overflow",
            })
        })
        .into_handler("%"),
    );
}

/// Check if an identifier names a built-in command.
#[inline]
pub fn is_builtin(id: &str) -> bool {
    BUILTIN_COMMANDS.contains(&id)
}

fn set(console: &Console, args: &mut ArgStream<'_>, out: &mut dyn fmt::Write) {
    let id = args.read_word().unwrap_or_default();
    match console.bindings().setter(id) {
        Some(setter) => setter(console, args, out),
        None => ConsoleError::UnknownVariable { id: id.into() }.report(out),
    }
}

fn get(console: &Console, args: &mut ArgStream<'_>, out: &mut dyn fmt::Write) {
    let id = args.read_word().unwrap_or_default();
    match console.bindings().getter(id) {
        Some(getter) => getter(console, args, out),
        None => ConsoleError::UnknownVariable { id: id.into() }.report(out),
    }
}

fn help(_console: &Console, _args: &mut ArgStream<'_>, out: &mut dyn fmt::Write) {
    let _ = writeln!(out, "{}", HELP_TEXT);
}

fn cvars(console: &Console, _args: &mut ArgStream<'_>, out: &mut dyn fmt::Write) {
    let names: Vec<_> = console.cvar_names().collect();
    if names.is_empty() {
        let _ = writeln!(out, "There are no bound console variables...");
        return;
    }
    write_listing(out, &names);
}

fn procs(console: &Console, _args: &mut ArgStream<'_>, out: &mut dyn fmt::Write) {
    let names: Vec<_> = console.cmd_names().filter(|name| !is_builtin(name)).collect();
    if names.is_empty() {
        let _ = writeln!(out, "There are no bound console commands...");
        return;
    }
    write_listing(out, &names);
}

fn write_listing(out: &mut dyn fmt::Write, names: &[&str]) {
    let _ = writeln!(out);
    for name in names {
        let _ = writeln!(out, "    {}", name);
    }
    let _ = writeln!(out);
}
