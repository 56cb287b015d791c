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

//! Definition of errors that happen in the tokenizer

use std::fmt;
use thiserror::Error;

/// Types of errors in an Exec line.
///
/// Every variant describes a malformed or unsupported Exec line. None of them
/// is worth retrying since the input is static text.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SyntaxError {
    /// A character outside the printable ASCII range.
    #[error("non-ASCII or non-printable character {0:?}")]
    NotAscii(char),
    /// A reserved character that is neither quoted nor escaped.
    #[error("reserved character `{0}` must be quoted")]
    ReservedCharacter(char),
    /// A double quotation lacks a closing `"`.
    #[error("the double quote is not closed")]
    UnterminatedQuote,
    /// A backslash in double quotes precedes a character it cannot escape.
    #[error("`\\{0}` is not a valid escape in double quotes")]
    InvalidBackslashEscape(char),
    /// A `` ` `` or `$` appears in double quotes without a backslash.
    #[error("`{0}` must be escaped in double quotes")]
    UnescapedSpecialInQuotes(char),
    /// `%i` appears anywhere but as the whole line.
    #[error("field code `%i` must be the whole command line")]
    IconCodeNotStandalone,
    /// `%F` or `%U` shares its argument with other text.
    #[error("field code `%{0}` must be a separate argument")]
    FileUrlCodeNotStandalone(char),
    /// `%` followed by an undefined code, or by nothing at all.
    #[error("{}", describe_unknown_code(.0))]
    UnknownFieldCode(Option<char>),
}

fn describe_unknown_code(code: &Option<char>) -> String {
    match code {
        Some(code) => format!("unknown field code `%{code}`"),
        None => "the field code is missing after `%`".to_owned(),
    }
}

/// Error returned by the tokenizer
///
/// `index` is the position of the offending character, counted in characters
/// from the start of the Exec line after leading whitespace is removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    pub cause: SyntaxError,
    pub index: usize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at column {})", self.cause, self.index + 1)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
