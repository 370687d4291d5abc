//! Terminal backend for headless consoles.
//!
//! Reads statements line by line from any [`BufRead`] and writes results to
//! any [`Write`]. Useful for dedicated servers and quick REPLs.

use std::io::{self, BufRead, Write};

use crate::core::{Console, ERROR_PREFIX};

/// Configuration for terminal behavior.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Prompt printed before each line is read. Empty disables it.
    pub prompt: String,
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
    /// Lines that end the session.
    pub exit_words: Vec<String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            colored: false, // Disabled by default - causes issues on some terminals
            exit_words: vec!["quit".to_string(), "exit".to_string()],
        }
    }
}

/// Line-oriented driver around a [`Console`].
///
/// # Examples
///
/// ```
/// use devconsole::{Console, Terminal};
///
/// let console = Console::new();
/// let mut output = Vec::new();
/// Terminal::new(&console)
///     .run("+ 1 2\nquit\n+ 3 4\n".as_bytes(), &mut output)
///     .unwrap();
///
/// assert_eq!(String::from_utf8(output).unwrap(), "> 3\n> ");
/// ```
pub struct Terminal<'c> {
    console: &'c Console,
    config: TerminalConfig,
}

impl<'c> Terminal<'c> {
    /// Create a terminal with the default configuration.
    pub fn new(console: &'c Console) -> Self {
        Self::with_config(console, TerminalConfig::default())
    }

    /// Create a terminal with the given configuration.
    pub fn with_config(console: &'c Console, config: TerminalConfig) -> Self {
        Self { console, config }
    }

    /// Run until end of input or an exit word.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        let mut lines = input.lines();

        loop {
            if !self.config.prompt.is_empty() {
                write!(output, "{}", self.config.prompt)?;
                output.flush()?;
            }

            let Some(line) = lines.next().transpose()? else {
                break;
            };

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            if self.config.exit_words.iter().any(|word| word == text) {
                break;
            }

            let mut result = String::new();
            self.console.execute(text, &mut result);
            for line in result.lines() {
                self.write_line(&mut output, line)?;
            }
            output.flush()?;
        }

        Ok(())
    }

    /// Run on the process's stdin and stdout.
    pub fn run_stdio(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), stdout.lock())
    }

    fn write_line(&self, output: &mut impl Write, line: &str) -> io::Result<()> {
        if self.config.colored && line.starts_with(ERROR_PREFIX) {
            writeln!(output, "\x1b[31m{}\x1b[0m", line)
        } else {
            writeln!(output, "{}", line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shared;

    fn session(console: &Console, config: TerminalConfig, input: &str) -> String {
        let mut output = Vec::new();
        Terminal::with_config(console, config)
            .run(input.as_bytes(), &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn quiet() -> TerminalConfig {
        TerminalConfig {
            prompt: String::new(),
            ..Default::default()
        }
    }

    #[test]
    fn test_runs_each_line() {
        let health = shared(0i32);
        let mut console = Console::new();
        console.bind_cvar("health", &health);

        let out = session(&console, quiet(), "set health 5\n\nget health\n");
        assert_eq!(out, "5\n");
        assert_eq!(*health.read(), 5);
    }

    #[test]
    fn test_exit_word_stops() {
        let console = Console::new();
        let out = session(&console, quiet(), "+ 1 1\nexit\n+ 2 2\n");
        assert_eq!(out, "2\n");
    }

    #[test]
    fn test_colored_errors() {
        let console = Console::new();
        let config = TerminalConfig {
            colored: true,
            ..quiet()
        };

        let out = session(&console, config, "nope\n+ 1 1\n");
        assert_eq!(
            out,
            "\x1b[31mCONSOLE ERROR: Input 'nope' isn't a command.\x1b[0m\n2\n"
        );
    }
}
