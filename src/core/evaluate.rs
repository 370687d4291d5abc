//! Argument evaluation.
//!
//! Turns the next argument of a statement into a native value. An argument
//! is either a literal token or a parenthesized statement whose printed
//! output is read back as the literal, e.g. `+ (* 2 3) 4`.

use tracing::warn;

use super::{ArgStream, Console, ConsoleValue, ERROR_PREFIX, GroupError};

impl Console {
    /// Evaluate the next argument as a `T`.
    ///
    /// On failure the stream's fail flag is set and `T::default()` is
    /// returned. A group whose output is a console error also fails. A stream that has already failed yields the default without
    /// consuming anything.
    ///
    /// # Examples
    ///
    /// ```
    /// use devconsole::Console;
    /// use devconsole::core::ArgStream;
    ///
    /// let console = Console::new();
    /// let mut args = ArgStream::new("(+ 1 2) nope");
    ///
    /// assert_eq!(console.evaluate::<i32>(&mut args), 3);
    /// assert!(!args.failed());
    ///
    /// assert_eq!(console.evaluate::<i32>(&mut args), 0);
    /// assert!(args.failed());
    /// ```
    pub fn evaluate<T: ConsoleValue>(&self, args: &mut ArgStream<'_>) -> T {
        if args.failed() {
            return T::default();
        }

        args.skip_whitespace();
        let value = if args.peek() == Some('(') {
            args.bump();
            self.evaluate_group(args)
        } else {
            args.read_token().and_then(|token| T::parse(&token))
        };

        value.unwrap_or_else(|| {
            args.fail();
            T::default()
        })
    }

    /// Execute a parenthesized group and parse its captured output.
    fn evaluate_group<T: ConsoleValue>(&self, args: &mut ArgStream<'_>) -> Option<T> {
        let config = self.config();

        let group = match args.read_group(config.max_nested_len) {
            Ok(group) => group,
            Err(GroupError::TooLong { len, limit }) => {
                warn!(
                    "Console: nested expression of {} bytes exceeds the {} byte limit",
                    len, limit
                );
                return None;
            }
        };

        let depth = args.depth() + 1;
        if depth > config.max_depth {
            warn!(
                "Console: nested expression exceeds the depth limit of {}",
                config.max_depth
            );
            return None;
        }

        let mut captured = String::new();
        self.execute_at(group, &mut captured, depth);

        // A diagnostic is not a value
        if captured.starts_with(ERROR_PREFIX) {
            return None;
        }

        ArgStream::new(&captured)
            .read_token()
            .and_then(|token| T::parse(&token))
    }
}
