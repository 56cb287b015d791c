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

//! Openbox configuration file

use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use xdg::BaseDirectories;

/// Path of the menu file relative to the configuration directory
pub const MENU_FILE: &str = "openbox/menu.xml";

/// Determines the path of the Openbox menu file, creating its directory.
///
/// The file is in the user's configuration directory, `$XDG_CONFIG_HOME` or
/// `~/.config`.
pub fn menu_file(base: &BaseDirectories) -> Result<PathBuf, WriteError> {
    base.place_config_file(MENU_FILE).map_err(|source| WriteError {
        path: base.get_config_file(MENU_FILE),
        source,
    })
}

/// Error in writing the menu file
#[derive(Debug, Error)]
#[error("cannot write {}: {source}", path.display())]
pub struct WriteError {
    /// File that could not be written
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Replaces the content of the file.
///
/// The content is first written to a temporary file in the same directory,
/// which then replaces the target, so Openbox never sees a partially written
/// file. The directory must exist.
pub fn write_file(path: &Path, content: &str) -> Result<(), WriteError> {
    let error = |source| WriteError {
        path: path.to_owned(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(error)?;
    file.write_all(content.as_bytes()).map_err(error)?;
    file.persist(path).map_err(|e| error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn menu_file_is_in_config_home() {
        let base = BaseDirectories::new().unwrap();
        let path = base.get_config_file(MENU_FILE);
        assert!(path.ends_with("openbox/menu.xml"), "{path:?}");
        assert!(path.starts_with(base.get_config_home()), "{path:?}");
    }

    #[test]
    fn write_file_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.xml");
        write_file(&path, "<openbox_menu />\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<openbox_menu />\n");

        write_file(&path, "replaced\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "replaced\n");
    }

    #[test]
    fn write_file_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("openbox");
        std::fs::write(&blocker, "a file, not a directory").unwrap();
        let path = blocker.join("menu.xml");

        let error = write_file(&path, "content").unwrap_err();
        assert_eq!(error.path, path);
        assert_matches!(
            error.source.kind(),
            std::io::ErrorKind::AlreadyExists | std::io::ErrorKind::NotADirectory
        );
    }
}
