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

//! This crate builds Openbox menus from the freedesktop.org application
//! menu.
//!
//! - [`menu`] defines the menu tree and the [`MenuSource`] trait.
//! - [`desktop`] reads desktop entry files.
//! - [`xdg`](self::xdg) finds desktop entries in the XDG data directories and arranges
//!   them into a menu tree.
//! - [`xml`] prints a menu tree as an Openbox menu document.
//!
//! ```
//! use obxmenu_menu::{Application, Document, Entry, Menu, Options};
//!
//! let mut menu = Menu::new("Applications");
//! menu.entries.push(Entry::Application(Application {
//!     name: "Terminal".to_owned(),
//!     exec: "xterm".to_owned(),
//!     ..Application::default()
//! }));
//! let xml = Document::PipeContents.render(&menu, &Options::default()).to_string();
//! assert!(xml.contains("<execute>xterm</execute>"));
//! ```

pub mod desktop;
pub mod locale;
pub mod menu;
pub mod xdg;
pub mod xml;

pub use self::menu::{Application, Entry, Menu, MenuSource};
pub use self::xdg::XdgApplications;
pub use self::xml::{Document, Options};
