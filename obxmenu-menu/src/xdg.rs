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

//! Loading the application menu from the XDG data directories
//!
//! [`XdgApplications`] collects the desktop entries found under the
//! `applications` subdirectory of each data directory and groups them into
//! submenus by their main category. This is a simplified version of the
//! freedesktop.org Desktop Menu Specification: `.menu` files are not read.

use crate::desktop::DesktopEntry;
use crate::desktop::DesktopFile;
use crate::locale::Locale;
use crate::menu::Application;
use crate::menu::Entry;
use crate::menu::Menu;
use crate::menu::MenuSource;
use itertools::Itertools as _;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use ::xdg::BaseDirectories;

/// Desktop name matched against `OnlyShowIn` and `NotShowIn`
pub const DESKTOP_NAME: &str = "Openbox";

/// Base directories for data files
///
/// This is usually obtained from [`BaseDirectories`], which applies the
/// defaults for unset or invalid `$XDG_DATA_HOME` and `$XDG_DATA_DIRS`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct XdgDirs {
    /// User-specific data directory
    pub data_home: Option<PathBuf>,
    /// System data directories
    pub data_dirs: Vec<PathBuf>,
}

impl From<&BaseDirectories> for XdgDirs {
    fn from(base: &BaseDirectories) -> Self {
        XdgDirs {
            data_home: Some(base.get_data_home()),
            data_dirs: base.get_data_dirs(),
        }
    }
}

impl XdgDirs {
    /// Returns the data directories in order of precedence.
    pub fn search_path(&self) -> impl Iterator<Item = &Path> {
        self.data_home
            .iter()
            .chain(&self.data_dirs)
            .map(PathBuf::as_path)
    }
}

/// Main category of the menu specification and the submenu it maps to
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Category {
    /// Value in the `Categories` key
    pub key: &'static str,
    /// Label of the submenu
    pub label: &'static str,
    /// Icon of the submenu
    pub icon: &'static str,
}

/// Main categories recognized when grouping applications
pub const MAIN_CATEGORIES: &[Category] = &[
    Category { key: "AudioVideo", label: "Multimedia", icon: "applications-multimedia" },
    Category { key: "Audio", label: "Multimedia", icon: "applications-multimedia" },
    Category { key: "Video", label: "Multimedia", icon: "applications-multimedia" },
    Category { key: "Development", label: "Development", icon: "applications-development" },
    Category { key: "Education", label: "Education", icon: "applications-education" },
    Category { key: "Game", label: "Games", icon: "applications-games" },
    Category { key: "Graphics", label: "Graphics", icon: "applications-graphics" },
    Category { key: "Network", label: "Internet", icon: "applications-internet" },
    Category { key: "Office", label: "Office", icon: "applications-office" },
    Category { key: "Science", label: "Science", icon: "applications-science" },
    Category { key: "Settings", label: "Settings", icon: "preferences-desktop" },
    Category { key: "System", label: "System", icon: "applications-system" },
    Category { key: "Utility", label: "Accessories", icon: "applications-accessories" },
];

/// Category of applications that have no main category
pub const OTHER_CATEGORY: Category = Category {
    key: "",
    label: "Other",
    icon: "applications-other",
};

/// Returns the first main category among `categories`.
#[must_use]
pub fn main_category(categories: &[String]) -> &'static Category {
    categories
        .iter()
        .find_map(|name| MAIN_CATEGORIES.iter().find(|category| category.key == name.as_str()))
        .unwrap_or(&OTHER_CATEGORY)
}

/// Computes the desktop file ID of a file under an `applications` directory.
///
/// The ID is the path relative to `root` with `/` replaced by `-`.
#[must_use]
pub fn desktop_file_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let components: Option<Vec<&str>> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect();
    Some(components?.join("-"))
}

/// Collects the `.desktop` files under `dir` recursively, in path order.
///
/// Symbolic links to directories are not followed.
fn find_desktop_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return,
        Err(e) => {
            log::warn!("cannot read directory {}: {e}", dir.display());
            return;
        }
    };

    let mut entries: Vec<_> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| Some((entry.path(), entry.file_type().ok()?)))
        .collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (path, file_type) in entries {
        if file_type.is_dir() {
            find_desktop_files(&path, files);
        } else if path.extension() == Some(OsStr::new("desktop")) {
            files.push(path);
        }
    }
}

/// Menu source reading desktop entries from the XDG data directories
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XdgApplications {
    pub dirs: XdgDirs,
    /// Locale for `Name` and `Icon` translations
    pub locale: Option<Locale>,
    /// Desktop name for `OnlyShowIn` and `NotShowIn`
    pub desktop: String,
}

impl XdgApplications {
    /// Creates a source reading the data directories of `base`.
    ///
    /// The locale is taken from the process environment.
    #[must_use]
    pub fn new(base: &BaseDirectories) -> Self {
        XdgApplications {
            dirs: XdgDirs::from(base),
            locale: Locale::from_env(|name| std::env::var(name).ok()),
            desktop: DESKTOP_NAME.to_owned(),
        }
    }

    /// Reads all visible applications with their main categories.
    ///
    /// A desktop file ID found in a directory of higher precedence hides any
    /// file with the same ID in the other directories, even if the file
    /// cannot be read or is not shown.
    #[must_use]
    pub fn scan(&self) -> Vec<(&'static Category, Application)> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for dir in self.dirs.search_path() {
            let root = dir.join("applications");
            log::debug!("scanning {}", root.display());

            let mut files = Vec::new();
            find_desktop_files(&root, &mut files);

            for path in files {
                let Some(id) = desktop_file_id(&root, &path) else {
                    log::warn!("skipping {}: the path is not valid UTF-8", path.display());
                    continue;
                };
                if !seen.insert(id.clone()) {
                    log::debug!("{} is shadowed by another {id}", path.display());
                    continue;
                }

                let file = match DesktopFile::read(&path) {
                    Ok(file) => file,
                    Err(e) => {
                        log::warn!("skipping {}: {e}", path.display());
                        continue;
                    }
                };
                let entry = DesktopEntry::new(&file, self.locale.as_ref());
                if !entry.is_shown_in(&self.desktop) {
                    log::debug!("{id} is not shown in {}", self.desktop);
                    continue;
                }
                let category = main_category(&entry.categories);
                if let Some(app) = entry.into_application(id, &path) {
                    found.push((category, app));
                }
            }
        }

        found
    }
}

impl MenuSource for XdgApplications {
    fn load(&self) -> Menu {
        let found = self.scan();
        log::debug!("found {} applications", found.len());

        let groups = found
            .into_iter()
            .into_group_map_by(|(category, _)| category.label);

        let mut root = Menu::new("Applications");
        for (label, apps) in groups.into_iter().sorted_by_key(|(label, _)| *label) {
            let icon = apps.first().map_or("", |(category, _)| category.icon);
            let entries = apps
                .into_iter()
                .map(|(_, app)| app)
                .sorted_by_cached_key(|app| (app.name.to_lowercase(), app.id.clone()))
                .map(Entry::Application)
                .collect();
            root.entries.push(Entry::Menu(Menu {
                name: label.to_owned(),
                icon: icon.to_owned(),
                entries,
            }));
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_entry(dir: &Path, relative: &str, content: &str) {
        let path = dir.join("applications").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn entry(name: &str, categories: &str) -> String {
        format!(
            "[Desktop Entry]\nType=Application\nName={name}\nExec={}\nCategories={categories}\n",
            name.to_lowercase()
        )
    }

    fn source(dirs: Vec<PathBuf>) -> XdgApplications {
        XdgApplications {
            dirs: XdgDirs {
                data_home: None,
                data_dirs: dirs,
            },
            locale: None,
            desktop: DESKTOP_NAME.to_owned(),
        }
    }

    #[test]
    fn search_path_puts_data_home_first() {
        let dirs = XdgDirs {
            data_home: Some("/home/me/data".into()),
            data_dirs: vec!["/opt/share".into(), "/usr/share".into()],
        };
        let search_path: Vec<&Path> = dirs.search_path().collect();
        assert_eq!(
            search_path,
            [
                Path::new("/home/me/data"),
                Path::new("/opt/share"),
                Path::new("/usr/share")
            ]
        );

        let dirs = XdgDirs {
            data_home: None,
            ..dirs
        };
        assert_eq!(dirs.search_path().count(), 2);
    }

    #[test]
    fn dirs_from_base_directories() {
        let base = BaseDirectories::new().unwrap();
        let dirs = XdgDirs::from(&base);
        assert_eq!(dirs.data_home, Some(base.get_data_home()));
        assert_eq!(dirs.data_dirs, base.get_data_dirs());
        assert!(dirs.search_path().all(Path::is_absolute));
    }

    #[test]
    fn main_category_lookup() {
        let categories = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(main_category(&categories(&["GTK", "Utility"])).label, "Accessories");
        assert_eq!(main_category(&categories(&["Audio", "Player"])).label, "Multimedia");
        assert_eq!(main_category(&categories(&["Network", "Office"])).label, "Internet");
        assert_eq!(main_category(&categories(&["X-Custom"])), &OTHER_CATEGORY);
        assert_eq!(main_category(&[]), &OTHER_CATEGORY);
    }

    #[test]
    fn desktop_file_ids() {
        let root = Path::new("/usr/share/applications");
        assert_eq!(
            desktop_file_id(root, &root.join("org.gnome.gedit.desktop")).as_deref(),
            Some("org.gnome.gedit.desktop")
        );
        assert_eq!(
            desktop_file_id(root, &root.join("kde4/kate.desktop")).as_deref(),
            Some("kde4-kate.desktop")
        );
        assert_eq!(desktop_file_id(root, Path::new("/tmp/x.desktop")), None);
    }

    #[test]
    fn load_groups_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_entry(dir.path(), "zed.desktop", &entry("Zed", "Development;"));
        write_entry(dir.path(), "gimp.desktop", &entry("GIMP", "Graphics;"));
        write_entry(dir.path(), "sub/emacs.desktop", &entry("emacs", "Development;TextEditor;"));
        write_entry(dir.path(), "misc.desktop", &entry("Misc", ""));
        write_entry(dir.path(), "notes.txt", "not a desktop file");

        let menu = source(vec![dir.path().to_owned()]).load();
        let labels: Vec<&str> = menu
            .entries
            .iter()
            .map(|entry| match entry {
                Entry::Menu(menu) => menu.name.as_str(),
                other => panic!("unexpected entry {other:?}"),
            })
            .collect();
        assert_eq!(labels, ["Development", "Graphics", "Other"]);

        let Entry::Menu(development) = &menu.entries[0] else {
            unreachable!()
        };
        assert_eq!(development.icon, "applications-development");
        let ids: Vec<&str> = development
            .applications()
            .into_iter()
            .map(|app| app.id.as_str())
            .collect();
        assert_eq!(ids, ["sub-emacs.desktop", "zed.desktop"]);
    }

    #[test]
    fn load_skips_hidden_and_malformed_entries() {
        let dir = tempfile::tempdir().unwrap();
        write_entry(dir.path(), "shown.desktop", &entry("Shown", "Utility;"));
        write_entry(
            dir.path(),
            "hidden.desktop",
            "[Desktop Entry]\nType=Application\nName=Hidden\nExec=x\nNoDisplay=true\n",
        );
        write_entry(dir.path(), "broken.desktop", "garbage\n");
        write_entry(
            dir.path(),
            "link.desktop",
            "[Desktop Entry]\nType=Link\nName=Link\nURL=https://example.com/\n",
        );

        let menu = source(vec![dir.path().to_owned()]).load();
        let names: Vec<&str> = menu
            .applications()
            .into_iter()
            .map(|app| app.name.as_str())
            .collect();
        assert_eq!(names, ["Shown"]);
    }

    #[test]
    fn earlier_directories_shadow_later_ones() {
        let user = tempfile::tempdir().unwrap();
        let system = tempfile::tempdir().unwrap();
        write_entry(user.path(), "editor.desktop", &entry("My Editor", "Utility;"));
        write_entry(system.path(), "editor.desktop", &entry("Editor", "Utility;"));
        write_entry(
            user.path(),
            "game.desktop",
            "[Desktop Entry]\nType=Application\nHidden=true\n",
        );
        write_entry(system.path(), "game.desktop", &entry("Game", "Game;"));

        let source = source(vec![user.path().to_owned(), system.path().to_owned()]);
        let found = source.scan();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.name, "My Editor");
        assert_eq!(found[0].0.label, "Accessories");
        assert!(found[0].1.path.starts_with(&*user.path().to_string_lossy()));
    }

    #[test]
    fn missing_directories_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let source = source(vec![dir.path().join("nonexistent")]);
        assert_eq!(source.load(), Menu::new("Applications"));
    }
}
