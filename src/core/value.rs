//! Value codec for bound types.
//!
//! Every type that crosses the console boundary, as a variable or as a
//! command parameter, converts to and from text through [`ConsoleValue`].

use std::fmt;

/// Trait for types that can be read from and written to console text.
///
/// Implemented for `bool`, `char`, `String`, all primitive integers and both
/// float widths. Host types opt in by implementing it.
///
/// `Default` supplies the value a parameter takes when extraction fails.
pub trait ConsoleValue: Default + Send + Sync + 'static {
    /// Parse a value from a single token.
    fn parse(s: &str) -> Option<Self>;

    /// Format the value as console text.
    fn format(&self) -> String;
}

impl ConsoleValue for bool {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    fn format(&self) -> String {
        if *self { "1".to_string() } else { "0".to_string() }
    }
}

macro_rules! impl_console_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConsoleValue for $ty {
                fn parse(s: &str) -> Option<Self> {
                    s.parse().ok()
                }

                fn format(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_console_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_console_value_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConsoleValue for $ty {
                fn parse(s: &str) -> Option<Self> {
                    s.parse().ok()
                }

                fn format(&self) -> String {
                    // Avoid unnecessary decimal places
                    if self.fract() == 0.0 {
                        format!("{:.0}", self)
                    } else {
                        format!("{}", self)
                    }
                }
            }
        )*
    };
}

impl_console_value_float!(f32, f64);

impl ConsoleValue for char {
    fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn format(&self) -> String {
        let mut buf = [0u8; 4];
        quote_if_needed(self.encode_utf8(&mut buf))
    }
}

impl ConsoleValue for String {
    fn parse(s: &str) -> Option<Self> {
        Some(s.to_string())
    }

    fn format(&self) -> String {
        quote_if_needed(self)
    }
}

/// Text that would not survive re-tokenization is quoted.
fn quote_if_needed(s: &str) -> String {
    if needs_quotes(s) { quote(s) } else { s.to_string() }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.chars().any(|c| {
            c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | '(' | ')' | ';')
        })
}

/// Wrap text in double quotes, escaping `"` and `\`.
pub(crate) fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// How a native command's return value reaches the output sink.
///
/// `()` writes nothing. The built-in value types write their text on its own
/// line, which is what lets a value-returning command feed a nested
/// expression. Host types implement this alongside [`ConsoleValue`] when
/// their commands return them.
pub trait CommandReturn {
    /// Write the value to the output sink.
    fn emit(self, out: &mut dyn fmt::Write);
}

impl CommandReturn for () {
    #[inline]
    fn emit(self, _out: &mut dyn fmt::Write) {}
}

macro_rules! impl_command_return {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CommandReturn for $ty {
                fn emit(self, out: &mut dyn fmt::Write) {
                    let _ = writeln!(out, "{}", self.format());
                }
            }
        )*
    };
}

impl_command_return!(
    bool, char, String, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize,
);

impl<T: CommandReturn, E: fmt::Display> CommandReturn for Result<T, E> {
    fn emit(self, out: &mut dyn fmt::Write) {
        match self {
            Ok(value) => value.emit(out),
            Err(err) => {
                let _ = writeln!(out, "{}", err);
            }
        }
    }
}
