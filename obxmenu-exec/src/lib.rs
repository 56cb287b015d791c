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

//! This crate splits the `Exec` key of a freedesktop.org desktop entry into
//! an argument vector.
//!
//! The `Exec` key holds a command line written in a small subset of the shell
//! language: arguments are separated by spaces, may be double-quoted, and may
//! contain field codes such as `%c` that are replaced with information about
//! the entry. Shell metacharacters like `|` or `$` are rejected rather than
//! interpreted.
//!
//! [`ExecSpec`] bundles an Exec line with the values substituted for the field
//! codes. Its [`tokenize`](ExecSpec::tokenize) method returns the arguments or
//! an [`Error`] describing why the line is invalid. The tokenizer never
//! produces a partial result.
//!
//! # Examples
//!
//! ```
//! # use obxmenu_exec::tokenize;
//! let args = tokenize("gimp --name=%c %U", "GIMP", "gimp", "").unwrap();
//! assert_eq!(args, ["gimp", "--name=GIMP"]);
//!
//! let args = tokenize("%i", "GIMP", "gimp", "").unwrap();
//! assert_eq!(args, ["--icon", "gimp"]);
//! ```
//!
//! ```
//! # use obxmenu_exec::{tokenize, SyntaxError};
//! let error = tokenize("app | other", "App", "", "").unwrap_err();
//! assert_eq!(error.cause, SyntaxError::ReservedCharacter('|'));
//! ```

pub mod error;
pub mod field_code;
pub mod lexer;

pub use self::error::Error;
pub use self::error::SyntaxError;

/// Exec line with the values for its field codes
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ExecSpec {
    /// Raw value of the `Exec` key
    pub command_line: String,
    /// Translated name of the application, substituted for `%c`
    pub display_name: String,
    /// Icon name, substituted for `%i` (possibly empty)
    pub icon_name: String,
    /// Path to the desktop file, substituted for `%k` (possibly empty)
    pub source_path: String,
}

impl ExecSpec {
    /// Splits the Exec line into arguments.
    ///
    /// Leading and trailing whitespace of the line is ignored. Field codes are
    /// expanded as follows:
    ///
    /// - `%%` expands to `%`.
    /// - `%f`, `%u`, `%d`, `%D`, `%n`, `%N`, `%v`, and `%m` expand to nothing.
    /// - `%c` expands to the display name and `%k` to the source path, both
    ///   in place within the surrounding argument.
    /// - `%i` expands to the two arguments `--icon` and the icon name, or to
    ///   nothing if there is no icon name.
    /// - `%F` and `%U` expand to nothing.
    ///
    /// `%F` and `%U` must form an argument by themselves, and `%i` must form
    /// the whole line; otherwise, the line is rejected.
    pub fn tokenize(&self) -> Result<Vec<String>, Error> {
        lexer::tokenize(self)
    }
}

/// Splits an Exec line into arguments.
///
/// This is a shorthand for constructing an [`ExecSpec`] and calling
/// [`ExecSpec::tokenize`].
pub fn tokenize(
    command_line: &str,
    display_name: &str,
    icon_name: &str,
    source_path: &str,
) -> Result<Vec<String>, Error> {
    ExecSpec {
        command_line: command_line.to_owned(),
        display_name: display_name.to_owned(),
        icon_name: icon_name.to_owned(),
        source_path: source_path.to_owned(),
    }
    .tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools as _;

    /// All concatenations of one to `max_len` pieces drawn from `pieces`
    fn lines_over(pieces: &[&str], max_len: usize) -> Vec<String> {
        (1..=max_len)
            .flat_map(|len| {
                std::iter::repeat_n(pieces, len)
                    .multi_cartesian_product()
                    .map(|parts| parts.into_iter().copied().collect::<String>())
            })
            .collect()
    }

    #[test]
    fn splitting_without_special_characters() {
        for line in ["a", "a b", "  a   b c  ", "/usr/bin/x-www-browser --new-tab"] {
            let expected: Vec<&str> = line.split(' ').filter(|s| !s.is_empty()).collect();
            assert_eq!(tokenize(line, "App", "icon", "/a.desktop").unwrap(), expected);
        }
    }

    #[test]
    fn generated_lines_without_special_characters_split_on_spaces() {
        for line in lines_over(&["a", "Z", "-", "/", "=", ".", " "], 6) {
            let expected: Vec<&str> = line.split(' ').filter(|s| !s.is_empty()).collect();
            let args = tokenize(&line, "App", "icon", "/a.desktop").unwrap();
            assert_eq!(args, expected, "{line:?}");
        }
    }

    #[test]
    fn literal_percent_ignores_other_values() {
        assert_eq!(tokenize("%%", "n", "i", "k").unwrap(), ["%"]);
        assert_eq!(tokenize("%%", "", "", "").unwrap(), ["%"]);
    }

    #[test]
    fn name_alone() {
        assert_eq!(tokenize("%c", "MyApp", "", "").unwrap(), ["MyApp"]);
    }

    #[test]
    fn icon_alone() {
        assert_eq!(
            tokenize("%i", "App", "icon-name", "").unwrap(),
            ["--icon", "icon-name"]
        );
        assert_eq!(tokenize("%i", "App", "", "").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn icon_among_other_text() {
        for icon in ["icon-name", "x", "/usr/share/pixmaps/a.png"] {
            let error = tokenize("app %i extra", "App", icon, "").unwrap_err();
            assert_eq!(error.cause, SyntaxError::IconCodeNotStandalone, "{icon}");
        }
        let error = tokenize("app --icon=%i", "App", "icon-name", "").unwrap_err();
        assert_eq!(error.cause, SyntaxError::IconCodeNotStandalone);
    }

    #[test]
    fn quoted_argument() {
        assert_eq!(
            tokenize(r#"app "arg with space""#, "", "", "").unwrap(),
            ["app", "arg with space"]
        );
    }

    #[test]
    fn failures() {
        let cause = |line: &str| tokenize(line, "App", "icon", "").unwrap_err().cause;
        assert_eq!(cause(r#"app "bad\x""#), SyntaxError::InvalidBackslashEscape('x'));
        assert_eq!(cause("app | other"), SyntaxError::ReservedCharacter('|'));
        assert_eq!(cause("%z"), SyntaxError::UnknownFieldCode(Some('z')));
        assert_eq!(cause(r#"app "unterminated"#), SyntaxError::UnterminatedQuote);
    }

    #[test]
    fn quoting_and_splitting_reproduces_arguments() {
        let lines = [
            "app",
            r#"app "arg with space" %%"#,
            r#"sh -c "echo '\$HOME' \"\`x\`\" \\ done" %F"#,
            r#"app --name=%c --desktop=%k "" %U"#,
            r##"app "#not-a-comment" "~user" "a*b?c" "(x)""##,
        ];
        for line in lines {
            let args = tokenize(line, "My App", "my-app", "/usr/share/applications/my app.desktop")
                .unwrap();
            let quoted = obxmenu_quote::join(&args);
            let split = obxmenu_quote::split(&quoted).unwrap();
            assert_eq!(split, args, "{line:?} => {quoted:?}");
        }
    }

    #[test]
    fn quoting_and_splitting_reproduces_generated_arguments() {
        let pieces = [
            "a", " ", "%%", "%c", "%k", "%f", "=", r#""""#, r#""q \" r""#, r#""\$\`\\#""#,
        ];
        for line in lines_over(&pieces, 4) {
            let args = tokenize(&line, "My App", "my-app", "/usr/share/applications/my app.desktop")
                .unwrap_or_else(|e| panic!("{line:?}: {e}"));
            let quoted = obxmenu_quote::join(&args);
            let split = obxmenu_quote::split(&quoted).unwrap();
            assert_eq!(split, args, "{line:?} => {quoted:?}");
        }
    }
}
