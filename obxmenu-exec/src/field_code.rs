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

//! Field codes
//!
//! A field code is a `%` followed by one character. This module defines the
//! table that maps each character to the value it expands to. Both the inline
//! path (a code embedded in a larger argument) and the standalone path (a
//! code forming a whole argument) consult the same table through
//! [`FieldCode::resolve`].

use crate::ExecSpec;
use crate::error::SyntaxError;

/// Field code recognized in an Exec line
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldCode {
    /// `%%`
    Percent,
    /// `%f`, `%u`, `%d`, `%D`, `%n`, `%N`, `%v`, or `%m`
    ///
    /// These are deprecated or refer to a single file or URL. Since no file is
    /// being opened, they expand to nothing.
    Dropped(char),
    /// `%F` or `%U`
    FileList(char),
    /// `%i`
    Icon,
    /// `%c`
    Name,
    /// `%k`
    Location,
}

/// Value a field code expands to
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution<'a> {
    /// The code expands to nothing.
    Drop,
    /// The code expands to a `%`.
    LiteralPercent,
    /// The code expands to text that joins the surrounding argument.
    InlineText(&'a str),
    /// The code expands to zero or more arguments of its own.
    ///
    /// A code resolving to this variant must be standalone.
    StandaloneArgs(Vec<&'a str>),
}

impl FieldCode {
    /// Looks up the field code for the character following a `%`.
    pub fn from_char(c: char) -> Result<Self, SyntaxError> {
        match c {
            '%' => Ok(FieldCode::Percent),
            'f' | 'u' | 'd' | 'D' | 'n' | 'N' | 'v' | 'm' => Ok(FieldCode::Dropped(c)),
            'F' | 'U' => Ok(FieldCode::FileList(c)),
            'i' => Ok(FieldCode::Icon),
            'c' => Ok(FieldCode::Name),
            'k' => Ok(FieldCode::Location),
            _ => Err(SyntaxError::UnknownFieldCode(Some(c))),
        }
    }

    /// Returns the character that follows the `%`.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            FieldCode::Percent => '%',
            FieldCode::Dropped(c) | FieldCode::FileList(c) => c,
            FieldCode::Icon => 'i',
            FieldCode::Name => 'c',
            FieldCode::Location => 'k',
        }
    }

    /// Computes the expansion of this code for the given entry.
    #[must_use]
    pub fn resolve(self, spec: &ExecSpec) -> Resolution<'_> {
        match self {
            FieldCode::Percent => Resolution::LiteralPercent,
            FieldCode::Dropped(_) => Resolution::Drop,
            FieldCode::FileList(_) => Resolution::StandaloneArgs(Vec::new()),
            FieldCode::Icon if spec.icon_name.is_empty() => Resolution::StandaloneArgs(Vec::new()),
            FieldCode::Icon => Resolution::StandaloneArgs(vec!["--icon", spec.icon_name.as_str()]),
            FieldCode::Name => Resolution::InlineText(&spec.display_name),
            FieldCode::Location => Resolution::InlineText(&spec.source_path),
        }
    }

    /// Tests whether this code is only accepted when it makes up the whole
    /// Exec line.
    ///
    /// `%i` is rejected anywhere else, even as a separate argument.
    #[must_use]
    pub fn needs_whole_line(self) -> bool {
        self == FieldCode::Icon
    }

    /// Returns the error reported when this code is not standalone although
    /// its resolution requires it to be.
    #[must_use]
    pub fn not_standalone_error(self) -> SyntaxError {
        match self {
            FieldCode::Icon => SyntaxError::IconCodeNotStandalone,
            other => SyntaxError::FileUrlCodeNotStandalone(other.as_char()),
        }
    }
}

impl Resolution<'_> {
    /// Converts the resolution of a standalone code into whole arguments.
    #[must_use]
    pub fn into_fields(self) -> Vec<String> {
        match self {
            Resolution::Drop => Vec::new(),
            Resolution::LiteralPercent => vec!["%".to_owned()],
            Resolution::InlineText(text) => vec![text.to_owned()],
            Resolution::StandaloneArgs(args) => args.into_iter().map(str::to_owned).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn spec(icon_name: &str) -> ExecSpec {
        ExecSpec {
            command_line: String::new(),
            display_name: "Text Editor".to_owned(),
            icon_name: icon_name.to_owned(),
            source_path: "/usr/share/applications/editor.desktop".to_owned(),
        }
    }

    #[test]
    fn from_char_round_trips_defined_codes() {
        for c in "%fudDnNvmFUick".chars() {
            let code = FieldCode::from_char(c).unwrap();
            assert_eq!(code.as_char(), c);
        }
    }

    #[test]
    fn from_char_rejects_undefined_codes() {
        for c in "zZaAxX %\u{e9}".chars().filter(|&c| c != '%') {
            assert_eq!(
                FieldCode::from_char(c),
                Err(SyntaxError::UnknownFieldCode(Some(c)))
            );
        }
    }

    #[test]
    fn resolve_dropped_codes() {
        let spec = spec("icon");
        for c in "fudDnNvm".chars() {
            let code = FieldCode::from_char(c).unwrap();
            assert_eq!(code.resolve(&spec), Resolution::Drop);
        }
    }

    #[test]
    fn resolve_icon() {
        assert_eq!(
            FieldCode::Icon.resolve(&spec("accessories-text-editor")),
            Resolution::StandaloneArgs(vec!["--icon", "accessories-text-editor"])
        );
        assert_eq!(
            FieldCode::Icon.resolve(&spec("")),
            Resolution::StandaloneArgs(vec![])
        );
    }

    #[test]
    fn resolve_inline_codes() {
        let spec = spec("");
        assert_eq!(FieldCode::Percent.resolve(&spec), Resolution::LiteralPercent);
        assert_eq!(
            FieldCode::Name.resolve(&spec),
            Resolution::InlineText("Text Editor")
        );
        assert_eq!(
            FieldCode::Location.resolve(&spec),
            Resolution::InlineText("/usr/share/applications/editor.desktop")
        );
    }

    #[test]
    fn only_icon_needs_whole_line() {
        assert!(FieldCode::Icon.needs_whole_line());
        for c in "%fudDnNvmFUck".chars() {
            let code = FieldCode::from_char(c).unwrap();
            assert!(!code.needs_whole_line(), "{c:?}");
        }
    }

    #[test]
    fn not_standalone_errors() {
        assert_eq!(
            FieldCode::Icon.not_standalone_error(),
            SyntaxError::IconCodeNotStandalone
        );
        assert_matches!(
            FieldCode::FileList('U').not_standalone_error(),
            SyntaxError::FileUrlCodeNotStandalone('U')
        );
    }

    #[test]
    fn into_fields() {
        assert_eq!(Resolution::Drop.into_fields(), Vec::<String>::new());
        assert_eq!(Resolution::LiteralPercent.into_fields(), ["%"]);
        assert_eq!(Resolution::InlineText("").into_fields(), [""]);
        assert_eq!(
            Resolution::StandaloneArgs(vec!["--icon", "x"]).into_fields(),
            ["--icon", "x"]
        );
    }
}
