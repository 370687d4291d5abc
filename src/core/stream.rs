//! Argument stream for console statements.
//!
//! A cursor over one statement's argument text with a sticky fail flag,
//! mirroring how extraction works on a text stream: a failed read marks the
//! stream and the flag stays set until [`ArgStream::clear`] is called.

use std::borrow::Cow;

/// Position-tracked source of argument text.
///
/// # Examples
///
/// ```
/// use devconsole::core::ArgStream;
///
/// let mut args = ArgStream::new(r#"  player "two words" 3"#);
/// assert_eq!(args.read_word(), Some("player"));
/// assert_eq!(args.read_token().as_deref(), Some("two words"));
/// assert_eq!(args.read_token().as_deref(), Some("3"));
/// assert!(args.read_token().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ArgStream<'a> {
    src: &'a str,
    pos: usize,
    failed: bool,
    depth: usize,
}

/// Why [`ArgStream::read_group`] could not return a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupError {
    /// The group is longer than the capture limit.
    TooLong { len: usize, limit: usize },
}

impl<'a> ArgStream<'a> {
    /// Create a stream at nesting depth zero.
    pub fn new(src: &'a str) -> Self {
        Self::with_depth(src, 0)
    }

    /// Create a stream for a statement running at the given nesting depth.
    pub fn with_depth(src: &'a str, depth: usize) -> Self {
        Self {
            src,
            pos: 0,
            failed: false,
            depth,
        }
    }

    /// Nesting depth of the statement this stream belongs to.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether a previous extraction failed.
    #[inline]
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Mark the stream as failed.
    #[inline]
    pub fn fail(&mut self) {
        self.failed = true;
    }

    /// Clear the fail flag.
    #[inline]
    pub fn clear(&mut self) {
        self.failed = false;
    }

    /// The unread remainder.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Whether every character has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Look at the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume one character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skip over leading whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Read a raw whitespace-delimited word.
    ///
    /// Returns `None` if only whitespace remains.
    pub fn read_word(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|c| !c.is_whitespace()) {
            self.bump();
        }
        (self.pos > start).then(|| &self.src[start..self.pos])
    }

    /// Read one value token.
    ///
    /// A token is either a whitespace-delimited word or a single- or
    /// double-quoted string. Inside quotes, `\` escapes the next character.
    /// An unterminated quote yields `None`.
    pub fn read_token(&mut self) -> Option<Cow<'a, str>> {
        self.skip_whitespace();
        match self.peek()? {
            quote @ ('"' | '\'') => {
                let start = self.pos;
                self.bump();
                let mut value = String::new();

                loop {
                    match self.bump() {
                        Some(c) if c == quote => return Some(Cow::Owned(value)),
                        Some('\\') => match self.bump() {
                            Some(escaped) => value.push(escaped),
                            None => break,
                        },
                        Some(c) => value.push(c),
                        None => break,
                    }
                }

                // Unterminated string: leave the cursor where the quote began
                self.pos = start;
                None
            }
            _ => self.read_word().map(Cow::Borrowed),
        }
    }

    /// Read the body of a parenthesized group.
    ///
    /// Call after consuming the opening `(`. Returns the text up to the
    /// matching `)` and consumes that `)`. Nested parentheses are balanced and
    /// parentheses inside quoted tokens are ignored. If the input ends first, the
    /// rest of the input is the group.
    ///
    /// A group longer than `limit` bytes is still consumed, but reported as
    /// [`GroupError::TooLong`].
    pub fn read_group(&mut self, limit: usize) -> Result<&'a str, GroupError> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        let mut end = None;

        let mut prev = Some('(');

        while let Some(c) = self.peek() {
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
                    '"' | '\'' if opens_token(prev) => quote = Some(c),
                    '(' => depth += 1,
                    ')' if depth == 0 => {
                        end = Some(self.pos);
                        self.bump();
                        break;
                    }
                    ')' => depth -= 1,
                    _ => {}
                }
            }
            prev = Some(c);
            self.bump();
        }

        let end = end.unwrap_or(self.pos);
        let len = end - start;
        if len > limit {
            return Err(GroupError::TooLong { len, limit });
        }
        Ok(&self.src[start..end])
    }
}

/// Whether a token may start right after `prev`.
///
/// A quote only opens a quoted string at the start of a token, so the
/// apostrophe in `don't` is part of a plain word.
pub(crate) fn opens_token(prev: Option<char>) -> bool {
    prev.is_none_or(|c| c.is_whitespace() || c == '(')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_word() {
        let mut args = ArgStream::new("  set   health 99 ");
        assert_eq!(args.read_word(), Some("set"));
        assert_eq!(args.read_word(), Some("health"));
        assert_eq!(args.read_word(), Some("99"));
        assert_eq!(args.read_word(), None);
        assert!(args.is_exhausted());
    }

    #[test]
    fn test_read_token_quotes() {
        let mut args = ArgStream::new(r#""hello world" 'single' bare"#);
        assert_eq!(args.read_token().as_deref(), Some("hello world"));
        assert_eq!(args.read_token().as_deref(), Some("single"));
        assert_eq!(args.read_token().as_deref(), Some("bare"));
    }

    #[test]
    fn test_read_token_escapes() {
        let mut args = ArgStream::new(r#""say \"hi\" \\ now""#);
        assert_eq!(args.read_token().as_deref(), Some(r#"say "hi" \ now"#));
    }

    #[test]
    fn test_read_token_unterminated() {
        let mut args = ArgStream::new(r#""never closed"#);
        assert!(args.read_token().is_none());
        assert_eq!(args.peek(), Some('"'));
    }

    #[test]
    fn test_read_token_empty_quotes() {
        let mut args = ArgStream::new(r#""""#);
        assert_eq!(args.read_token().as_deref(), Some(""));
    }

    #[test]
    fn test_fail_flag_is_sticky() {
        let mut args = ArgStream::new("x");
        assert!(!args.failed());
        args.fail();
        args.read_word();
        assert!(args.failed());
        args.clear();
        assert!(!args.failed());
    }

    #[test]
    fn test_read_group_balanced() {
        let mut args = ArgStream::new("(* 2 (+ 1 2)) 4");
        assert_eq!(args.bump(), Some('('));
        assert_eq!(args.read_group(255), Ok("* 2 (+ 1 2)"));
        assert_eq!(args.rest(), " 4");
    }

    #[test]
    fn test_read_group_ignores_quoted_parens() {
        let mut args = ArgStream::new(r#"(echo ")") tail"#);
        args.bump();
        assert_eq!(args.read_group(255), Ok(r#"echo ")""#));
        assert_eq!(args.rest(), " tail");
    }

    #[test]
    fn test_read_group_apostrophe_inside_word() {
        let mut args = ArgStream::new("(set name don't) (get name)");
        args.bump();
        assert_eq!(args.read_group(255), Ok("set name don't"));
        assert_eq!(args.rest(), " (get name)");
    }

    #[test]
    fn test_read_token_apostrophe_inside_word() {
        let mut args = ArgStream::new("don't stop");
        assert_eq!(args.read_token().as_deref(), Some("don't"));
        assert_eq!(args.read_token().as_deref(), Some("stop"));
    }

    #[test]
    fn test_read_group_unterminated() {
        let mut args = ArgStream::new("(+ 1 2");
        args.bump();
        assert_eq!(args.read_group(255), Ok("+ 1 2"));
        assert!(args.is_exhausted());
    }

    #[test]
    fn test_read_group_too_long() {
        let mut args = ArgStream::new("(+ 100 200) 4");
        args.bump();
        assert_eq!(
            args.read_group(4),
            Err(GroupError::TooLong { len: 9, limit: 4 })
        );
        // The oversized group is still consumed
        assert_eq!(args.rest(), " 4");
    }
}
