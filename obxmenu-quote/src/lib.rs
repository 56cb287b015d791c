// This file is part of obxmenu, an Openbox menu generator.
// Copyright (C) 2026 the obxmenu authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! This crate quotes command arguments so that they can be embedded in the
//! `<execute>` element of an Openbox menu, and splits such command lines back
//! into arguments.
//!
//! Openbox splits the content of `<execute>` into arguments using POSIX shell
//! quoting rules (without any expansion). A quoted argument always splits
//! back into exactly the original argument. The quoting mechanism is chosen
//! by the following rules:
//!
//! - If the string is not empty and contains no characters that need quoting,
//!   the string is returned intact.
//! - Otherwise, if the string contains no single quote, the whole string is
//!   single-quoted.
//! - Otherwise, the whole string is double-quoted, and all occurrences of `"`,
//!   `` ` ``, `$`, and `\` are backslash-escaped.
//!
//! The following characters need quoting:
//!
//! - `;`, `&`, `|`, `(`, `)`, `<`, and `>`
//! - A space, tab, newline, or any other whitespace or control character
//! - `$`, `` ` ``, `\`, `"`, and `'`
//! - `*`, `?`, `[`, `]`, `{`, and `}`
//! - `#` or `~` occurring at the beginning of the string
//!
//! # Examples
//!
//! ```
//! # use obxmenu_quote::{join, quote, split};
//! assert_eq!(quote("firefox"), "firefox");
//! assert_eq!(quote("My Documents"), "'My Documents'");
//! assert_eq!(quote("it's"), r#""it's""#);
//!
//! let line = join(["xterm", "-title", "Hello, world"]);
//! assert_eq!(line, "xterm -title 'Hello, world'");
//! assert_eq!(split(&line).unwrap(), ["xterm", "-title", "Hello, world"]);
//! ```

use itertools::Itertools as _;
use std::borrow::Cow::{self, Borrowed, Owned};
use thiserror::Error;

#[must_use]
fn char_needs_quoting(c: char) -> bool {
    match c {
        ';' | '&' | '|' | '(' | ')' | '<' | '>' | ' ' | '\t' | '\n' => true,
        '$' | '`' | '\\' | '"' | '\'' => true,
        '*' | '?' | '[' | ']' | '{' | '}' => true,
        _ => c.is_whitespace() || c.is_control(),
    }
}

#[must_use]
fn str_needs_quoting(s: &str) -> bool {
    match s.chars().next() {
        None => true,
        Some('#' | '~') => true,
        Some(_) => s.chars().any(char_needs_quoting),
    }
}

/// Argument that prints itself in quoted form
///
/// Formatting a `Quoted` writes the argument as it should appear in an
/// `<execute>` command line, without allocating an intermediate string.
/// [`join`] formats each argument this way.
#[derive(Clone, Copy, Debug)]
#[must_use = "`Quoted` does nothing unless printed"]
pub struct Quoted<'a> {
    raw: &'a str,
    needs_quoting: bool,
}

impl<'a> Quoted<'a> {
    /// Returns the unquoted argument.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> &'a str {
        self.raw
    }

    /// Tests whether the argument would be split or altered by Openbox if
    /// written unquoted.
    #[inline]
    #[must_use]
    pub fn needs_quoting(&self) -> bool {
        self.needs_quoting
    }
}

impl std::fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        if !self.needs_quoting {
            return f.write_str(self.raw);
        }
        if !self.raw.contains('\'') {
            return write!(f, "'{}'", self.raw);
        }
        f.write_char('"')?;
        for c in self.raw.chars() {
            if matches!(c, '"' | '`' | '$' | '\\') {
                f.write_char('\\')?;
            }
            f.write_char(c)?;
        }
        f.write_char('"')
    }
}

impl<'a> From<&'a str> for Quoted<'a> {
    #[inline]
    fn from(raw: &'a str) -> Self {
        let needs_quoting = str_needs_quoting(raw);
        Quoted { raw, needs_quoting }
    }
}

impl<'a> From<Quoted<'a>> for Cow<'a, str> {
    fn from(q: Quoted<'a>) -> Self {
        if q.needs_quoting() {
            Owned(q.to_string())
        } else {
            Borrowed(q.as_raw())
        }
    }
}

/// Prepares an argument for quoted output.
///
/// The argument is scanned once here; formatting the result does not scan it
/// again to decide on the quoting style.
#[inline]
pub fn quoted(raw: &str) -> Quoted<'_> {
    Quoted::from(raw)
}

/// Returns the argument as it should be written in a command line.
///
/// An argument that is safe as is comes back borrowed.
#[inline]
#[must_use]
pub fn quote(raw: &str) -> Cow<'_, str> {
    quoted(raw).into()
}

/// Quotes each argument and joins them with a single space.
#[must_use]
pub fn join<I>(args: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    args.into_iter()
        .map(|arg| quoted(arg.as_ref()).to_string())
        .join(" ")
}

/// Error in [`split`]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SplitError {
    /// A single quotation lacks a closing `'`.
    #[error("the single quote is not closed")]
    UnclosedSingleQuote,
    /// A double quotation lacks a closing `"`.
    #[error("the double quote is not closed")]
    UnclosedDoubleQuote,
    /// The line ends with an unquoted backslash.
    #[error("the backslash is not followed by any character")]
    TrailingBackslash,
}

/// Characters a backslash escapes inside double quotes
const ESCAPABLE_IN_DOUBLE_QUOTES: &[char] = &['"', '`', '$', '\\', '\n'];

#[must_use]
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Splits a command line into arguments.
///
/// This is the inverse of [`join`]. Blanks separate words. Single quotes
/// preserve their content literally. Inside double quotes, a backslash escapes
/// `"`, `` ` ``, `$`, `\`, or a newline and is literal before any other
/// character. Outside quotes, a backslash escapes any character, and a
/// backslash-newline pair is removed. A `#` at the beginning of a word starts
/// a comment that lasts until the end of the line.
///
/// No expansion of any kind is performed.
pub fn split(line: &str) -> Result<Vec<String>, SplitError> {
    let mut fields = Vec::new();
    // `None` while between words, so that `''` yields an empty field
    let mut word: Option<String> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if is_blank(c) => fields.extend(word.take()),

            '#' if word.is_none() => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }

            '\'' => {
                let word = word.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => word.push(c),
                        None => return Err(SplitError::UnclosedSingleQuote),
                    }
                }
            }

            '"' => {
                let word = word.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('\n') => (),
                            Some(c) if ESCAPABLE_IN_DOUBLE_QUOTES.contains(&c) => word.push(c),
                            Some(c) => {
                                word.push('\\');
                                word.push(c);
                            }
                            None => return Err(SplitError::UnclosedDoubleQuote),
                        },
                        Some(c) => word.push(c),
                        None => return Err(SplitError::UnclosedDoubleQuote),
                    }
                }
            }

            '\\' => match chars.next() {
                Some('\n') => (),
                Some(c) => word.get_or_insert_with(String::new).push(c),
                None => return Err(SplitError::TrailingBackslash),
            },

            c => word.get_or_insert_with(String::new).push(c),
        }
    }

    fields.extend(word);
    Ok(fields)
}
