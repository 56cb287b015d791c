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

//! Message locale for localized desktop entry keys

/// Locale in the form `lang_COUNTRY.ENCODING@MODIFIER`
///
/// The encoding is not kept since it does not take part in key matching.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Locale {
    pub lang: String,
    pub country: Option<String>,
    pub modifier: Option<String>,
}

/// Environment variables that determine the message locale, in priority
/// order
pub const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

impl Locale {
    /// Parses a locale name.
    ///
    /// Returns `None` for the `C` and `POSIX` locales, for which no
    /// translation applies, and for an empty name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let (rest, modifier) = match name.split_once('@') {
            Some((rest, modifier)) => (rest, Some(modifier.to_owned())),
            None => (name, None),
        };
        let rest = rest.split_once('.').map_or(rest, |(rest, _encoding)| rest);
        let (lang, country) = match rest.split_once('_') {
            Some((lang, country)) => (lang, Some(country.to_owned())),
            None => (rest, None),
        };
        if lang.is_empty() || lang == "C" || lang == "POSIX" {
            return None;
        }
        let lang = lang.to_owned();
        Some(Locale {
            lang,
            country,
            modifier,
        })
    }

    /// Determines the message locale from environment variables.
    ///
    /// `var` looks up a variable. The first of [`LOCALE_VARIABLES`] that is set
    /// to a non-empty value decides the locale.
    pub fn from_env<F>(var: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        LOCALE_VARIABLES
            .iter()
            .filter_map(|&name| var(name))
            .find(|value| !value.is_empty())
            .and_then(|value| Self::parse(&value))
    }

    /// Returns the locale suffixes to try, from the most specific.
    ///
    /// The order is `lang_COUNTRY@MODIFIER`, `lang_COUNTRY`, `lang@MODIFIER`,
    /// and `lang`, skipping forms that need a missing part.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        let lang = &self.lang;
        let mut candidates = Vec::with_capacity(4);
        if let (Some(country), Some(modifier)) = (&self.country, &self.modifier) {
            candidates.push(format!("{lang}_{country}@{modifier}"));
        }
        if let Some(country) = &self.country {
            candidates.push(format!("{lang}_{country}"));
        }
        if let Some(modifier) = &self.modifier {
            candidates.push(format!("{lang}@{modifier}"));
        }
        candidates.push(lang.clone());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_name() {
        assert_eq!(
            Locale::parse("sr_RS.UTF-8@latin"),
            Some(Locale {
                lang: "sr".to_owned(),
                country: Some("RS".to_owned()),
                modifier: Some("latin".to_owned()),
            })
        );
    }

    #[test]
    fn parse_language_only() {
        assert_eq!(
            Locale::parse("fi"),
            Some(Locale {
                lang: "fi".to_owned(),
                country: None,
                modifier: None,
            })
        );
    }

    #[test]
    fn parse_untranslated_locales() {
        assert_eq!(Locale::parse(""), None);
        assert_eq!(Locale::parse("C"), None);
        assert_eq!(Locale::parse("C.UTF-8"), None);
        assert_eq!(Locale::parse("POSIX"), None);
    }

    #[test]
    fn candidates_order() {
        let locale = Locale::parse("sr_RS@latin").unwrap();
        assert_eq!(
            locale.candidates(),
            ["sr_RS@latin", "sr_RS", "sr@latin", "sr"]
        );
        let locale = Locale::parse("de_AT.UTF-8").unwrap();
        assert_eq!(locale.candidates(), ["de_AT", "de"]);
        let locale = Locale::parse("ca@valencia").unwrap();
        assert_eq!(locale.candidates(), ["ca@valencia", "ca"]);
    }

    #[test]
    fn from_env_priority() {
        let env = |name: &str| match name {
            "LC_ALL" => Some(String::new()),
            "LC_MESSAGES" => Some("pt_BR.UTF-8".to_owned()),
            "LANG" => Some("en_US.UTF-8".to_owned()),
            _ => None,
        };
        assert_eq!(
            Locale::from_env(env).map(|locale| locale.candidates()),
            Some(vec!["pt_BR".to_owned(), "pt".to_owned()])
        );
        assert_eq!(Locale::from_env(|_| None), None);
    }
}
