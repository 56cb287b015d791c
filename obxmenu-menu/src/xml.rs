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

//! Openbox menu XML generation
//!
//! A [`Document`] selects one of the three documents Openbox understands:
//!
//! - a static menu file containing the whole tree,
//! - a menu file whose root menu is a pipe menu running a command, and
//! - the output of such a command.
//!
//! [`Document::render`] loads the menu only when the document needs it and
//! returns a [`Rendered`] value that writes the document with
//! [`quick_xml::Writer`].
//!
//! An application whose Exec line cannot be tokenized is replaced with two
//! XML comments describing the problem, so a single broken desktop entry does
//! not prevent the rest of the menu from being generated.

use crate::menu::Application;
use crate::menu::Entry;
use crate::menu::Menu;
use crate::menu::MenuSource;
use quick_xml::ElementWriter;
use quick_xml::Writer;
use quick_xml::events::BytesDecl;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use std::borrow::Cow::{self, Borrowed, Owned};
use std::fmt;
use std::io::{self, Write};

/// Namespace of Openbox configuration files
pub const OPENBOX_NAMESPACE: &str = "http://openbox.org/";

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// ID of the menu Openbox shows on a desktop click
pub const ROOT_MENU_ID: &str = "root-menu";

/// Prefix of the IDs of generated submenus
pub const MENU_ID_PREFIX: &str = "obxmenu";

const INDENT_SIZE: usize = 4;

/// Terminal prefix used when none is configured
pub const DEFAULT_TERMINAL: [&str; 2] = ["terminal-emulator", "-e"];

/// Prepares a menu label for Openbox.
///
/// Underscores are doubled because Openbox uses a single underscore to mark
/// the keyboard accelerator. XML escaping is left to the writer.
#[must_use]
pub fn label_text(label: &str) -> Cow<'_, str> {
    if label.contains('_') {
        Owned(label.replace('_', "__"))
    } else {
        Borrowed(label)
    }
}

/// Makes the text safe to put in an XML comment.
///
/// A comment must not contain `--` or end with `-`.
#[must_use]
pub fn comment_text(text: &str) -> String {
    let mut text = text.replace('\n', " ");
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    if text.ends_with('-') {
        text.push(' ');
    }
    text
}

fn write_comment<W: Write>(w: &mut Writer<W>, text: &str) -> io::Result<()> {
    let content = format!(" {} ", comment_text(text));
    w.write_event(Event::Comment(BytesText::from_escaped(content)))
}

fn write_declaration<W: Write>(w: &mut Writer<W>) -> io::Result<()> {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
}

/// Starts the root element of a menu file.
fn openbox_menu<W: Write>(w: &mut Writer<W>) -> ElementWriter<'_, W> {
    w.create_element("openbox_menu")
        .with_attribute(("xmlns", OPENBOX_NAMESPACE))
        .with_attribute(("xmlns:xsi", XSI_NAMESPACE))
        .with_attribute(("xsi:schemaLocation", OPENBOX_NAMESPACE))
}

/// Kind of document to generate
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Document {
    /// Menu file containing the whole menu
    Static,
    /// Menu file whose root menu runs a command to generate its content
    PipeInstructions,
    /// Output of the pipe menu command
    PipeContents,
}

/// Options for rendering
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// Command prepended to applications that run in a terminal
    pub terminal: Vec<String>,
    /// Command run by the pipe menu
    pub pipe_command: String,
    /// Label of the root menu
    pub root_label: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            terminal: DEFAULT_TERMINAL.iter().map(|&s| s.to_owned()).collect(),
            pipe_command: "obxmenu --pipe".to_owned(),
            root_label: "obxmenu".to_owned(),
        }
    }
}

/// Document ready to be written
///
/// See [`Document::render`]. The `Display` implementation prints the same
/// text as [`write_to`](Self::write_to).
#[derive(Clone, Debug)]
#[must_use = "`Rendered` does nothing unless written"]
pub struct Rendered<'a> {
    document: Document,
    menu: Menu,
    options: &'a Options,
}

impl Document {
    /// Tests whether this document contains the menu tree.
    #[must_use]
    pub fn needs_menu(self) -> bool {
        match self {
            Document::Static | Document::PipeContents => true,
            Document::PipeInstructions => false,
        }
    }

    /// Prepares the document for writing.
    ///
    /// The menu is loaded from `source` if [`needs_menu`](Self::needs_menu).
    pub fn render<'a>(self, source: &dyn MenuSource, options: &'a Options) -> Rendered<'a> {
        let menu = if self.needs_menu() {
            source.load()
        } else {
            Menu::default()
        };
        Rendered {
            document: self,
            menu,
            options,
        }
    }
}

impl Rendered<'_> {
    /// Writes the document, ending with a newline.
    pub fn write_to<W: Write>(&self, out: W) -> io::Result<()> {
        let mut w = Writer::new_with_indent(out, b' ', INDENT_SIZE);
        let label = label_text(&self.options.root_label);

        match self.document {
            Document::Static => {
                write_declaration(&mut w)?;
                openbox_menu(&mut w).write_inner_content(|w| {
                    w.create_element("menu")
                        .with_attribute(("id", ROOT_MENU_ID))
                        .with_attribute(("label", &*label))
                        .write_inner_content(|w| self.entries(w, &self.menu, MENU_ID_PREFIX))?;
                    Ok(())
                })?;
            }
            Document::PipeInstructions => {
                write_declaration(&mut w)?;
                openbox_menu(&mut w).write_inner_content(|w| {
                    w.create_element("menu")
                        .with_attribute(("id", ROOT_MENU_ID))
                        .with_attribute(("label", &*label))
                        .with_attribute(("execute", self.options.pipe_command.as_str()))
                        .write_empty()?;
                    Ok(())
                })?;
            }
            Document::PipeContents => {
                w.create_element("openbox_pipe_menu")
                    .write_inner_content(|w| self.entries(w, &self.menu, MENU_ID_PREFIX))?;
            }
        }

        w.get_mut().write_all(b"\n")
    }

    /// Writes the entries of `menu`.
    fn entries<W: Write>(&self, w: &mut Writer<W>, menu: &Menu, id: &str) -> io::Result<()> {
        for entry in &menu.entries {
            match entry {
                Entry::Menu(submenu) => self.submenu(w, submenu, id)?,
                Entry::Application(app) => self.application(w, app)?,
                Entry::Separator => {
                    w.create_element("separator").write_empty()?;
                }
            }
        }
        Ok(())
    }

    fn submenu<W: Write>(
        &self,
        w: &mut Writer<W>,
        menu: &Menu,
        parent_id: &str,
    ) -> io::Result<()> {
        if menu.is_empty() {
            return Ok(());
        }
        let id = format!("{parent_id}-{}", menu.name);
        let label = label_text(&menu.name);
        w.create_element("menu")
            .with_attribute(("id", id.as_str()))
            .with_attribute(("label", &*label))
            .with_attributes((!menu.icon.is_empty()).then_some(("icon", menu.icon.as_str())))
            .write_inner_content(|w| self.entries(w, menu, &id))?;
        Ok(())
    }

    fn application<W: Write>(&self, w: &mut Writer<W>, app: &Application) -> io::Result<()> {
        let command = match app.command(&self.options.terminal) {
            Ok(args) => obxmenu_quote::join(&args),
            Err(e) => {
                let origin = if app.path.is_empty() { &app.id } else { &app.path };
                log::warn!("{origin}: invalid Exec line: {e}");
                write_comment(w, &format!("invalid Exec line in {origin}: {e}"))?;
                return write_comment(w, &format!("Exec={}", app.exec));
            }
        };

        let label = label_text(&app.name);
        w.create_element("item")
            .with_attribute(("label", &*label))
            .with_attributes((!app.icon.is_empty()).then_some(("icon", app.icon.as_str())))
            .write_inner_content(|w| {
                w.create_element("action")
                    .with_attribute(("name", "Execute"))
                    .write_inner_content(|w| {
                        w.create_element("execute")
                            .write_text_content(BytesText::new(&command))?;
                        Ok(())
                    })?;
                Ok(())
            })?;
        Ok(())
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buffer))
    }
}
