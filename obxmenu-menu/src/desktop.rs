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

//! Desktop entry files
//!
//! This module reads the `[Desktop Entry]` group of a `.desktop` file and
//! interprets its values as described in the freedesktop.org Desktop Entry
//! Specification. Other groups (such as desktop actions) are validated for
//! syntax but otherwise ignored.

use crate::locale::Locale;
use crate::menu::Application;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Name of the group this module reads
pub const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// Error in reading a desktop file
#[derive(Debug, Error)]
pub enum DesktopFileError {
    /// The file could not be read.
    #[error("cannot read the file: {0}")]
    Io(#[from] std::io::Error),
    /// The file content is not valid UTF-8.
    #[error("the file is not valid UTF-8")]
    NotUtf8,
    /// A line is neither a comment, a group header, nor a key-value pair.
    #[error("line {line} is malformed")]
    MalformedLine { line: usize },
    /// The file has no `[Desktop Entry]` group.
    #[error("the [Desktop Entry] group is missing")]
    MissingGroup,
}

/// Content of the `[Desktop Entry]` group
///
/// Keys are stored as written, including the locale suffix, e.g. `Name[de]`.
/// Values are stored raw; the typed accessors decode them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DesktopFile {
    entries: HashMap<String, String>,
}

/// Tests whether the line is a group header, returning the group name.
fn group_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

impl DesktopFile {
    /// Parses the content of a desktop file.
    pub fn parse(text: &str) -> Result<Self, DesktopFileError> {
        let mut entries = HashMap::new();
        let mut group = None;
        let mut found = false;

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = group_header(line) {
                found |= name == DESKTOP_ENTRY_GROUP;
                group = Some(name);
                continue;
            }

            let malformed = DesktopFileError::MalformedLine { line: index + 1 };
            let (key, value) = line.split_once('=').ok_or(malformed)?;
            let key = key.trim_end();
            if key.is_empty() || group.is_none() {
                return Err(DesktopFileError::MalformedLine { line: index + 1 });
            }
            if group == Some(DESKTOP_ENTRY_GROUP) {
                // The first occurrence wins over duplicates.
                entries
                    .entry(key.to_owned())
                    .or_insert_with(|| value.trim_start().to_owned());
            }
        }

        if found {
            Ok(DesktopFile { entries })
        } else {
            Err(DesktopFileError::MissingGroup)
        }
    }

    /// Reads and parses a desktop file.
    pub fn read(path: &Path) -> Result<Self, DesktopFileError> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|_| DesktopFileError::NotUtf8)?;
        Self::parse(&text)
    }

    /// Returns the raw value for the key.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the value for the key as a string, with escapes decoded.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<String> {
        self.raw(key).map(unescape)
    }

    /// Returns the value for the key translated for the locale.
    ///
    /// The candidates from [`Locale::candidates`] are tried in order before
    /// the untranslated key.
    #[must_use]
    pub fn locale_string(&self, key: &str, locale: Option<&Locale>) -> Option<String> {
        let translated = locale
            .into_iter()
            .flat_map(Locale::candidates)
            .find_map(|suffix| self.string(&format!("{key}[{suffix}]")));
        translated.or_else(|| self.string(key))
    }

    /// Returns the value for the key as a boolean.
    ///
    /// A missing or non-`true` value is false.
    #[must_use]
    pub fn boolean(&self, key: &str) -> bool {
        self.raw(key) == Some("true")
    }

    /// Returns the value for the key as a list of strings.
    #[must_use]
    pub fn list(&self, key: &str) -> Vec<String> {
        self.raw(key).map(split_list).unwrap_or_default()
    }
}

/// Decodes the escape sequences of a string value.
///
/// `\s`, `\n`, `\t`, `\r`, and `\\` are decoded. Other backslashes are kept
/// as is.
#[must_use]
pub fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => result.push(' '),
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some(c) => {
                result.push('\\');
                result.push(c);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Splits a `;`-separated list value.
///
/// `\;` stands for a literal semicolon. Each element is then
/// [unescaped](unescape). A trailing empty element is ignored.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut item = String::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            ';' => items.push(unescape(&std::mem::take(&mut item))),
            '\\' => match chars.next() {
                Some(';') => item.push(';'),
                Some(c) => {
                    item.push('\\');
                    item.push(c);
                }
                None => item.push('\\'),
            },
            c => item.push(c),
        }
    }
    if !item.is_empty() {
        items.push(unescape(&item));
    }
    items
}

/// Typed view of the keys relevant to menus
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DesktopEntry {
    /// Value of `Type`
    pub kind: String,
    /// Localized value of `Name`
    pub name: Option<String>,
    /// Value of `Icon`
    pub icon: Option<String>,
    /// Value of `Exec`, with string escapes decoded
    pub exec: Option<String>,
    pub terminal: bool,
    pub no_display: bool,
    pub hidden: bool,
    pub categories: Vec<String>,
    pub only_show_in: Vec<String>,
    pub not_show_in: Vec<String>,
}

impl DesktopEntry {
    /// Extracts the menu-relevant keys from a desktop file.
    #[must_use]
    pub fn new(file: &DesktopFile, locale: Option<&Locale>) -> Self {
        DesktopEntry {
            kind: file.string("Type").unwrap_or_default(),
            name: file.locale_string("Name", locale),
            icon: file.locale_string("Icon", locale),
            exec: file.string("Exec"),
            terminal: file.boolean("Terminal"),
            no_display: file.boolean("NoDisplay"),
            hidden: file.boolean("Hidden"),
            categories: file.list("Categories"),
            only_show_in: file.list("OnlyShowIn"),
            not_show_in: file.list("NotShowIn"),
        }
    }

    /// Tests whether the entry should appear in the menu of `desktop`.
    #[must_use]
    pub fn is_shown_in(&self, desktop: &str) -> bool {
        if self.kind != "Application" || self.no_display || self.hidden {
            return false;
        }
        if self.name.is_none() || self.exec.is_none() {
            return false;
        }
        if !self.only_show_in.is_empty() && !self.only_show_in.iter().any(|d| d == desktop) {
            return false;
        }
        !self.not_show_in.iter().any(|d| d == desktop)
    }

    /// Converts the entry into a menu application.
    ///
    /// Returns `None` if the entry lacks a name or an Exec line.
    #[must_use]
    pub fn into_application(self, id: String, path: &Path) -> Option<Application> {
        Some(Application {
            id,
            name: self.name?,
            icon: self.icon.unwrap_or_default(),
            exec: self.exec?,
            path: path.to_string_lossy().into_owned(),
            terminal: self.terminal,
        })
    }
}
