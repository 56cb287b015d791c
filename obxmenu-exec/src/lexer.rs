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

//! Lexer that splits an Exec line into arguments
//!
//! The lexer scans the line once from left to right. Unquoted spaces separate
//! arguments. A double-quoted string joins the current argument. A `%`
//! introduces a [field code](crate::field_code). All other characters are
//! taken literally unless they are [reserved](RESERVED).

use crate::ExecSpec;
use crate::error::Error;
use crate::error::SyntaxError;
use crate::field_code::FieldCode;
use crate::field_code::Resolution;

/// Characters that must not appear outside double quotes
///
/// The space is reserved, too, but it separates arguments instead of causing
/// an error. The double quote starts a quotation.
pub const RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '<', '>', '~', '|', '&', ';', '$', '*', '?', '#', '(', ')',
    '`',
];

/// Characters a backslash can escape inside double quotes
pub const ESCAPABLE_IN_QUOTES: &[char] = &['"', '`', '$', '\\'];

/// Characters that must not appear bare inside double quotes
///
/// A `"` bare in double quotes closes the quotation and a bare `\` starts an
/// escape, so only `` ` `` and `$` actually fail on this check.
pub const FORBIDDEN_BARE_IN_QUOTES: &[char] = &['`', '$', '\\', '"'];

/// Tests whether the character is in the printable ASCII range.
#[must_use]
pub fn is_printable_ascii(c: char) -> bool {
    matches!(c, ' '..='~')
}

/// Character cursor over an Exec line
#[derive(Clone, Debug)]
struct Lexer {
    chars: Vec<char>,
    index: usize,
}

impl Lexer {
    fn new(line: &str) -> Self {
        Lexer {
            chars: line.chars().collect(),
            index: 0,
        }
    }

    /// Returns the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn consume_char(&mut self) {
        debug_assert!(self.index < self.chars.len());
        self.index += 1;
    }

    fn index(&self) -> usize {
        self.index
    }

    /// Creates an error located at the next character.
    fn error(&self, cause: SyntaxError) -> Error {
        let index = self.index;
        Error { cause, index }
    }
}

/// State of tokenization
struct Tokenizer<'a> {
    lexer: Lexer,
    spec: &'a ExecSpec,
    /// Arguments produced so far
    fields: Vec<String>,
    /// Text of the current argument
    ///
    /// This is `Some` once the argument has received any text, even if the
    /// text is empty.
    word: Option<String>,
    /// Whether anything, including a dropped field code, has been consumed
    /// in the current argument
    started: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(line: &str, spec: &'a ExecSpec) -> Self {
        Tokenizer {
            lexer: Lexer::new(line),
            spec,
            fields: Vec::new(),
            word: None,
            started: false,
        }
    }

    fn push_str(&mut self, s: &str) {
        self.word.get_or_insert_with(String::new).push_str(s);
        self.started = true;
    }

    fn push_char(&mut self, c: char) {
        self.word.get_or_insert_with(String::new).push(c);
        self.started = true;
    }

    /// Ends the current argument.
    fn flush(&mut self) {
        self.fields.extend(self.word.take());
        self.started = false;
    }

    /// Parses the next unit of the line.
    fn unit(&mut self, c: char) -> Result<(), Error> {
        match c {
            ' ' => {
                self.lexer.consume_char();
                self.flush();
                Ok(())
            }
            '"' => self.double_quote(),
            '%' => self.field_code(),
            c if RESERVED.contains(&c) => Err(self.lexer.error(SyntaxError::ReservedCharacter(c))),
            c if !is_printable_ascii(c) => Err(self.lexer.error(SyntaxError::NotAscii(c))),
            c => {
                self.lexer.consume_char();
                self.push_char(c);
                Ok(())
            }
        }
    }

    /// Parses a double-quoted string.
    ///
    /// The next character must be the opening `"`.
    fn double_quote(&mut self) -> Result<(), Error> {
        let opening_index = self.lexer.index();
        self.lexer.consume_char();
        self.push_str("");

        loop {
            let Some(c) = self.lexer.peek_char() else {
                let cause = SyntaxError::UnterminatedQuote;
                return Err(Error {
                    cause,
                    index: opening_index,
                });
            };
            match c {
                '"' => {
                    self.lexer.consume_char();
                    return Ok(());
                }
                '\\' => {
                    self.lexer.consume_char();
                    match self.lexer.peek_char() {
                        Some(c) if ESCAPABLE_IN_QUOTES.contains(&c) => {
                            self.lexer.consume_char();
                            self.push_char(c);
                        }
                        Some(c) if !is_printable_ascii(c) => {
                            return Err(self.lexer.error(SyntaxError::NotAscii(c)));
                        }
                        Some(c) => {
                            return Err(self.lexer.error(SyntaxError::InvalidBackslashEscape(c)));
                        }
                        None => {
                            let cause = SyntaxError::UnterminatedQuote;
                            return Err(Error {
                                cause,
                                index: opening_index,
                            });
                        }
                    }
                }
                c if FORBIDDEN_BARE_IN_QUOTES.contains(&c) => {
                    return Err(self.lexer.error(SyntaxError::UnescapedSpecialInQuotes(c)));
                }
                c if !is_printable_ascii(c) => {
                    return Err(self.lexer.error(SyntaxError::NotAscii(c)));
                }
                c => {
                    self.lexer.consume_char();
                    self.push_char(c);
                }
            }
        }
    }

    /// Tests whether the code just consumed is followed by the end of its
    /// argument.
    fn at_argument_end(&self) -> bool {
        matches!(self.lexer.peek_char(), None | Some(' '))
    }

    /// Parses a field code.
    ///
    /// The next character must be the `%`.
    fn field_code(&mut self) -> Result<(), Error> {
        let percent_index = self.lexer.index();
        self.lexer.consume_char();

        let Some(c) = self.lexer.peek_char() else {
            let cause = SyntaxError::UnknownFieldCode(None);
            return Err(Error {
                cause,
                index: percent_index,
            });
        };
        let code = FieldCode::from_char(c).map_err(|cause| Error {
            cause,
            index: percent_index,
        })?;
        self.lexer.consume_char();

        let standalone = !self.started && self.at_argument_end() && !code.needs_whole_line();
        let spec = self.spec;
        let resolution = code.resolve(spec);
        if standalone {
            self.fields.extend(resolution.into_fields());
            self.started = true;
            return Ok(());
        }

        match resolution {
            Resolution::Drop => self.started = true,
            Resolution::LiteralPercent => self.push_char('%'),
            Resolution::InlineText(text) => self.push_str(text),
            Resolution::StandaloneArgs(_) => {
                let cause = code.not_standalone_error();
                return Err(Error {
                    cause,
                    index: percent_index,
                });
            }
        }
        Ok(())
    }
}

/// Returns the code character if the whole line is a single field code.
fn whole_line_code(line: &str) -> Option<char> {
    let mut chars = line.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('%'), Some(c), None) => Some(c),
        _ => None,
    }
}

/// Splits the Exec line of `spec` into arguments.
///
/// See [`ExecSpec::tokenize`].
pub(crate) fn tokenize(spec: &ExecSpec) -> Result<Vec<String>, Error> {
    let line = spec.command_line.trim();

    if let Some(c) = whole_line_code(line) {
        let code = FieldCode::from_char(c).map_err(|cause| Error { cause, index: 0 })?;
        return Ok(code.resolve(spec).into_fields());
    }

    let mut tokenizer = Tokenizer::new(line, spec);
    while let Some(c) = tokenizer.lexer.peek_char() {
        tokenizer.unit(c)?;
    }
    tokenizer.flush();
    Ok(tokenizer.fields)
}
