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

//! This is the internal library crate for the `obxmenu` command. It is not
//! intended to be used as a library by other crates.
//!
//! The entry point is the [`main`] function, which is to be used as the
//! `main` function in the binary crate.

pub mod args;
pub mod config;

use self::args::Mode;
use self::args::Parse;
use self::args::Run;
use self::config::WriteError;
use obxmenu_menu::Document;
use obxmenu_menu::Options;
use obxmenu_menu::XdgApplications;
use obxmenu_quote::SplitError;
use std::io::Write as _;
use std::process::ExitCode;
use thiserror::Error;
use xdg::BaseDirectories;
use xdg::BaseDirectoriesError;

/// Exit status for command line usage errors
const EXIT_USAGE: u8 = 2;

/// Error in running the generator
#[derive(Debug, Error)]
pub enum Error {
    /// The `--terminal` option value cannot be split into arguments.
    #[error("invalid terminal command: {0}")]
    InvalidTerminal(SplitError),
    /// The `--terminal` option value contains no arguments.
    #[error("the terminal command is empty")]
    EmptyTerminal,
    /// The home directory is unknown, so the XDG base directories are, too.
    #[error("cannot locate the XDG base directories: {0}")]
    BaseDirectories(BaseDirectoriesError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("cannot write to the standard output: {0}")]
    Stdout(std::io::Error),
    /// `openbox --reconfigure` could not be started.
    #[error("cannot run openbox: {0}")]
    Reconfigure(nix::errno::Errno),
}

/// Returns the document selected by the options.
#[must_use]
pub fn document(run: &Run) -> Option<Document> {
    match run.mode? {
        Mode::Static => Some(Document::Static),
        Mode::Pipe if run.write => Some(Document::PipeInstructions),
        Mode::Pipe => Some(Document::PipeContents),
    }
}

/// Computes the rendering options from the command line.
pub fn options(run: &Run) -> Result<Options, Error> {
    let mut options = Options::default();
    let mut pipe_command = vec!["obxmenu".to_owned(), "--pipe".to_owned()];

    if let Some(terminal) = &run.terminal {
        let args = obxmenu_quote::split(terminal).map_err(Error::InvalidTerminal)?;
        if args.is_empty() {
            return Err(Error::EmptyTerminal);
        }
        options.terminal = args;
        pipe_command.push(format!("--terminal={terminal}"));
    }

    options.pipe_command = obxmenu_quote::join(&pipe_command);
    Ok(options)
}

fn print_help(arg0: &str) {
    println!("Usage: {arg0} {{--pipe|--static}} [--write] [--reconfigure]");
    println!("Use --pipe for a dynamic menu, or --static for a static one");
    println!("Use --write to write to ~/.config/openbox/menu.xml");
    println!("Use --reconfigure to update a running instance of openbox");
    println!("Note that --pipe --write is different than --pipe");
    println!();
    println!("Other options:");
    println!("  --terminal=COMMAND  terminal for applications that need one");
    println!("                      (default: terminal-emulator -e)");
    println!("  --output=PATH       file written by --write");
    println!("  --help              print this help");
    println!("  --version           print version information");
    println!();
    println!("If you just want it to work, do:");
    println!("{arg0} --pipe --write --reconfigure");
}

/// Replaces the process with `openbox --reconfigure`.
///
/// This function returns only if the replacement failed.
fn reconfigure() -> Error {
    log::debug!("running openbox --reconfigure");
    let Err(errno) = nix::unistd::execvp(c"openbox", &[c"openbox", c"--reconfigure"]);
    Error::Reconfigure(errno)
}

/// Generates and outputs the menu, then reconfigures Openbox if requested.
pub fn execute(run: &Run) -> Result<(), Error> {
    if let Some(document) = document(run) {
        let options = options(run)?;
        let base = BaseDirectories::new().map_err(Error::BaseDirectories)?;
        let source = XdgApplications::new(&base);
        let rendered = document.render(&source, &options).to_string();

        if run.write {
            let path = match &run.output {
                Some(path) => path.into(),
                None => config::menu_file(&base)?,
            };
            config::write_file(&path, &rendered)?;
            log::info!("wrote {}", path.display());
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(Error::Stdout)?;
        }
    }

    if run.reconfigure {
        return Err(reconfigure());
    }
    Ok(())
}

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let arg0 = std::env::args().next().unwrap_or_else(|| "obxmenu".to_owned());
    let run = match args::parse(std::env::args()) {
        Ok(Parse::Help) => {
            print_help(&arg0);
            return ExitCode::SUCCESS;
        }
        Ok(Parse::Version) => {
            println!("obxmenu {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Ok(Parse::Run(run)) => run,
        Err(e) => {
            eprintln!("{arg0}: {e}");
            eprintln!("Try '{arg0} --help' for more information.");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match execute(&run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{arg0}: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn run(mode: Option<Mode>, write: bool) -> Run {
        Run {
            arg0: "obxmenu".to_owned(),
            mode,
            write,
            ..Run::default()
        }
    }

    #[test]
    fn document_selection() {
        assert_eq!(document(&run(Some(Mode::Static), false)), Some(Document::Static));
        assert_eq!(document(&run(Some(Mode::Static), true)), Some(Document::Static));
        assert_eq!(document(&run(Some(Mode::Pipe), false)), Some(Document::PipeContents));
        assert_eq!(
            document(&run(Some(Mode::Pipe), true)),
            Some(Document::PipeInstructions)
        );
        assert_eq!(document(&run(None, true)), None);
    }

    #[test]
    fn default_options() {
        let options = options(&run(Some(Mode::Pipe), true)).unwrap();
        assert_eq!(options.terminal, ["terminal-emulator", "-e"]);
        assert_eq!(options.pipe_command, "obxmenu --pipe");
    }

    #[test]
    fn terminal_option() {
        let run = Run {
            terminal: Some("urxvt -title 'Run me' -e".to_owned()),
            ..run(Some(Mode::Pipe), true)
        };
        let options = options(&run).unwrap();
        assert_eq!(options.terminal, ["urxvt", "-title", "Run me", "-e"]);
        assert_eq!(
            obxmenu_quote::split(&options.pipe_command).unwrap(),
            [
                "obxmenu",
                "--pipe",
                "--terminal=urxvt -title 'Run me' -e"
            ]
        );
    }

    #[test]
    fn invalid_terminal_option() {
        let run = Run {
            terminal: Some("xterm 'oops".to_owned()),
            ..run(Some(Mode::Static), false)
        };
        assert_matches!(
            options(&run),
            Err(Error::InvalidTerminal(SplitError::UnclosedSingleQuote))
        );

        let run = Run {
            terminal: Some("  ".to_owned()),
            ..run
        };
        assert_matches!(options(&run), Err(Error::EmptyTerminal));
    }
}
