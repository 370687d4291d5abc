//! Statement splitting and dispatch.
//!
//! Input text is cut into delimiter-separated statements. The first word of
//! each statement names a command and the rest becomes its argument stream.

use std::fmt;
use std::io;

use tracing::trace;

use super::stream::opens_token;
use super::{ArgStream, Console, ConsoleError};

impl Console {
    /// Execute every statement in `input`, writing results and diagnostics to `out`.
    ///
    /// Statements run left to right. An unknown command reports an error and
    /// ends the call; the statements after it are not run.
    pub fn execute(&self, input: &str, out: &mut dyn fmt::Write) {
        self.execute_at(input, out, 0);
    }

    /// Read `input` to the end, execute it and write the output to `output`.
    ///
    /// Console errors are written to `output` like any other result; only
    /// I/O failures are returned.
    pub fn execute_stream<R: io::Read, W: io::Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;

        let mut out = String::new();
        self.execute(&text, &mut out);

        output.write_all(out.as_bytes())?;
        output.flush()
    }

    /// Execute `input` as statements running at nesting `depth`.
    pub(crate) fn execute_at(&self, input: &str, out: &mut dyn fmt::Write, depth: usize) {
        for statement in split_statements(input, self.config().delimiter) {
            let (id, rest) = split_identifier(statement);

            let Some(handler) = self.bindings().command(id) else {
                ConsoleError::UnknownCommand { id: id.into() }.report(out);
                return;
            };

            trace!("Console: dispatching '{}' at depth {}", id, depth);
            let mut args = ArgStream::with_depth(rest, depth);
            handler(self, &mut args, out);
        }
    }
}

/// Split input into statements on `delimiter`.
///
/// Delimiters inside quoted strings or parentheses do not split. As in
/// argument tokens, a quote only opens a string at the start of a word.
/// Statements are trimmed and empty ones are dropped.
///
/// # Examples
///
/// ```
/// use devconsole::core::split_statements;
///
/// let statements = split_statements("set x 1; get x", ';');
/// assert_eq!(statements, vec!["set x 1", "get x"]);
///
/// // Delimiters inside quotes and groups are preserved
/// let statements = split_statements(r#"set s "a;b"; + (set x 1; get x) 1"#, ';');
/// assert_eq!(statements, vec![r#"set s "a;b""#, "+ (set x 1; get x) 1"]);
/// ```
pub fn split_statements(input: &str, delimiter: char) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut paren_depth = 0usize;
    let mut prev: Option<char> = None;

    for (i, c) in input.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
        } else {
            match c {
                c if c == delimiter && paren_depth == 0 => {
                    let statement = input[start..i].trim();
                    if !statement.is_empty() {
                        statements.push(statement);
                    }
                    start = i + c.len_utf8();
                }
                // Only a quote at the start of a token opens a string
                '"' | '\'' if opens_token(prev) || prev == Some(delimiter) => quote = Some(c),
                '(' => paren_depth += 1,
                ')' => paren_depth = paren_depth.saturating_sub(1),
                _ => {}
            }
        }
        prev = Some(c);
    }

    let statement = input[start..].trim();
    if !statement.is_empty() {
        statements.push(statement);
    }

    statements
}

/// Split a statement into its command identifier and argument text.
fn split_identifier(statement: &str) -> (&str, &str) {
    match statement.find(char::is_whitespace) {
        Some(i) => (&statement[..i], &statement[i..]),
        None => (statement, ""),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::config::ConsoleConfig;

    fn run(console: &Console, input: &str) -> String {
        let mut out = String::new();
        console.execute(input, &mut out);
        out
    }

    fn recording_console() -> (Console, Arc<Mutex<Vec<&'static str>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut console = Console::new();
        for name in ["cmd_a", "cmd_b"] {
            let log = log.clone();
            console.bind_cmd(name, move || log.lock().push(name));
        }
        (console, log)
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(split_statements("a; b ;c", ';'), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_statements("", ';').is_empty());
        assert!(split_statements(";; ;  ;", ';').is_empty());
    }

    #[test]
    fn test_split_quoted() {
        let statements = split_statements(r#"set s "x;y"; get s"#, ';');
        assert_eq!(statements, vec![r#"set s "x;y""#, "get s"]);
    }

    #[test]
    fn test_split_escaped_quote() {
        // \" means escaped quote (doesn't close string)
        let statements = split_statements(r#"set s "a\";b"; get s"#, ';');
        assert_eq!(statements, vec![r#"set s "a\";b""#, "get s"]);
    }

    #[test]
    fn test_split_apostrophe_inside_word() {
        let statements = split_statements("set name don't; cmd_b; say 'a;b'", ';');
        assert_eq!(statements, vec!["set name don't", "cmd_b", "say 'a;b'"]);
    }

    #[test]
    fn test_apostrophe_does_not_swallow_statements() {
        let (mut console, log) = recording_console();
        let name = crate::core::shared(String::new());
        console.bind_cvar("name", &name);

        assert_eq!(run(&console, "set name don't; cmd_b"), "");
        assert_eq!(*name.read(), "don't");
        assert_eq!(*log.lock(), vec!["cmd_b"]);
    }

    #[test]
    fn test_split_custom_delimiter() {
        assert_eq!(split_statements("a|b; c", '|'), vec!["a", "b; c"]);
    }

    #[test]
    fn test_split_identifier() {
        assert_eq!(split_identifier("set x 1"), ("set", " x 1"));
        assert_eq!(split_identifier("help"), ("help", ""));
    }

    #[test]
    fn test_statement_ordering() {
        let (console, log) = recording_console();
        assert_eq!(run(&console, "cmd_a;cmd_b"), "");
        assert_eq!(*log.lock(), vec!["cmd_a", "cmd_b"]);
    }

    #[test]
    fn test_unknown_command_short_circuits() {
        let (console, log) = recording_console();
        let out = run(&console, "cmd_a;unknownX;cmd_b");

        assert_eq!(out, "CONSOLE ERROR: Input 'unknownX' isn't a command.\n");
        assert_eq!(*log.lock(), vec!["cmd_a"]);
    }

    #[test]
    fn test_type_mismatch_does_not_short_circuit() {
        let (mut console, log) = recording_console();
        console.bind_cmd("takes_int", |_: i32| {});

        let out = run(&console, "takes_int nope; cmd_b");
        assert_eq!(out, "CONSOLE ERROR: Incorrect argument types for 'takes_int'.\n");
        assert_eq!(*log.lock(), vec!["cmd_b"]);
    }

    #[test]
    fn test_unknown_variable_does_not_short_circuit() {
        let (console, log) = recording_console();
        let out = run(&console, "get missing; cmd_a");

        assert_eq!(out, "CONSOLE ERROR: There is no bound variable with id 'missing'.\n");
        assert_eq!(*log.lock(), vec!["cmd_a"]);
    }

    #[test]
    fn test_nested_unknown_command_ends_only_nested_call() {
        let (console, log) = recording_console();
        let out = run(&console, "+ (bogus) 1; cmd_a");

        assert_eq!(out, "CONSOLE ERROR: Incorrect argument types for '+'.\n");
        assert_eq!(*log.lock(), vec!["cmd_a"]);
    }

    #[test]
    fn test_rebind_replaces_dispatch() {
        let (mut console, log) = recording_console();
        let replacement = log.clone();
        console.bind_cmd("cmd_a", move || replacement.lock().push("replaced"));

        run(&console, "cmd_a");
        assert_eq!(*log.lock(), vec!["replaced"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let console = Console::with_config(ConsoleConfig {
            delimiter: '|',
            ..Default::default()
        });
        assert_eq!(run(&console, "+ 1 2 | * 2 2"), "3\n4\n");
    }

    #[test]
    fn test_execute_stream() {
        let console = Console::new();
        let mut output = Vec::new();
        console
            .execute_stream("+ 1 2;- 5 1".as_bytes(), &mut output)
            .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "3\n4\n");
    }
}
