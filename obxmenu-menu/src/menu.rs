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

//! Menu tree
//!
//! A [`Menu`] is what a [`MenuSource`] produces and what the
//! [XML renderer](crate::xml) consumes. Each [`Application`] carries exactly
//! the data needed to build its command: the Exec line, the values for its
//! field codes, and whether it runs in a terminal.

use obxmenu_exec::ExecSpec;

/// Launchable application in a menu
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Application {
    /// Desktop file ID, such as `org.gnome.gedit.desktop`
    pub id: String,
    /// Name displayed in the menu
    pub name: String,
    /// Icon name or path (possibly empty)
    pub icon: String,
    /// Decoded value of the `Exec` key
    pub exec: String,
    /// Path of the desktop file (possibly empty)
    pub path: String,
    /// Whether the application needs to run in a terminal
    pub terminal: bool,
}

impl Application {
    /// Returns the data the Exec tokenizer needs.
    #[must_use]
    pub fn exec_spec(&self) -> ExecSpec {
        ExecSpec {
            command_line: self.exec.clone(),
            display_name: self.name.clone(),
            icon_name: self.icon.clone(),
            source_path: self.path.clone(),
        }
    }

    /// Computes the argument vector that launches this application.
    ///
    /// If the application needs a terminal, `terminal` is prepended to the
    /// tokenized Exec line.
    pub fn command(&self, terminal: &[String]) -> Result<Vec<String>, obxmenu_exec::Error> {
        let args = self.exec_spec().tokenize()?;
        if !self.terminal {
            return Ok(args);
        }
        Ok(terminal.iter().cloned().chain(args).collect())
    }
}

/// Item in a [`Menu`]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Entry {
    Menu(Menu),
    Application(Application),
    Separator,
}

/// Menu containing applications and submenus
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Menu {
    /// Label of the menu
    pub name: String,
    /// Icon name or path (possibly empty)
    pub icon: String,
    pub entries: Vec<Entry>,
}

impl Menu {
    /// Creates an empty menu with the given name.
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Menu {
            name: name.into(),
            ..Menu::default()
        }
    }

    /// Tests whether this menu contains no applications, directly or in any
    /// submenu.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| match entry {
            Entry::Menu(menu) => menu.is_empty(),
            Entry::Application(_) => false,
            Entry::Separator => true,
        })
    }

    /// Returns all applications in this menu and its submenus, depth first.
    #[cfg(test)]
    pub(crate) fn applications(&self) -> Vec<&Application> {
        let mut applications = Vec::new();
        self.collect_applications(&mut applications);
        applications
    }

    #[cfg(test)]
    fn collect_applications<'a>(&'a self, applications: &mut Vec<&'a Application>) {
        for entry in &self.entries {
            match entry {
                Entry::Menu(menu) => menu.collect_applications(applications),
                Entry::Application(app) => applications.push(app),
                Entry::Separator => (),
            }
        }
    }
}

/// Provider of a menu tree
pub trait MenuSource {
    /// Builds the menu tree.
    ///
    /// Problems with individual entries are logged and the entries skipped,
    /// so loading itself does not fail.
    fn load(&self) -> Menu;
}

impl MenuSource for Menu {
    fn load(&self) -> Menu {
        self.clone()
    }
}
