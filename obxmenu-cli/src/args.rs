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

//! Command line argument parser

use std::iter::Peekable;
use thiserror::Error;

/// Kind of menu to generate
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Static menu (the `--static` option)
    Static,
    /// Pipe menu (the `--pipe` option)
    Pipe,
}

/// Configuration for a run
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Run {
    /// Name of the program
    pub arg0: String,
    /// Kind of menu to generate, if any
    pub mode: Option<Mode>,
    /// Whether to write to the configuration file instead of standard output
    pub write: bool,
    /// Whether to make Openbox reload its configuration
    pub reconfigure: bool,
    /// Command line of the terminal emulator (the `--terminal` option)
    pub terminal: Option<String>,
    /// File to write instead of the default (the `--output` option)
    pub output: Option<String>,
}

/// Parse result
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Parse {
    /// Runs the generator
    Run(Run),
    /// Prints help message and exit
    Help,
    /// Prints version information and exit
    Version,
}

impl From<Run> for Parse {
    fn from(run: Run) -> Self {
        Parse::Run(run)
    }
}

/// Error in command line parsing
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Option that is not defined
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// Option that matches the prefix of more than one option name
    #[error("ambiguous option name `{0}`")]
    AmbiguousOption(String),

    /// Option missing an argument
    #[error("option `{0}` missing an argument")]
    MissingOptionArgument(String),

    /// Argument specified to an option that does not take an argument
    #[error("option `{0}` does not take an argument")]
    UnexpectedOptionArgument(String),

    /// Operand, which this program does not take
    #[error("unexpected operand `{0}`")]
    UnexpectedOperand(String),

    /// The `--static` and `--pipe` options used together
    #[error("Must specify only one of --static and --pipe")]
    ConflictingModes,

    /// Neither `--static`, `--pipe`, nor `--reconfigure` specified
    #[error("Must specify one of --static and --pipe")]
    MissingMode,
}

/// Result of parsing a long option
#[derive(Clone, Debug, PartialEq, Eq)]
enum LongOption {
    Static,
    Pipe,
    Write,
    Reconfigure,
    Terminal { command: String },
    Output { path: String },
    Help,
    Version,
}

/// Intermediate object for parsing a long option
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OptionConstructor {
    WithoutArgument(fn() -> LongOption),
    WithArgument(fn(String) -> LongOption),
}

/// Names of the long options and how to construct them
const LONG_OPTIONS: &[(&str, OptionConstructor)] = &[
    ("static", OptionConstructor::WithoutArgument(|| LongOption::Static)),
    ("pipe", OptionConstructor::WithoutArgument(|| LongOption::Pipe)),
    ("write", OptionConstructor::WithoutArgument(|| LongOption::Write)),
    ("reconfigure", OptionConstructor::WithoutArgument(|| LongOption::Reconfigure)),
    ("terminal", OptionConstructor::WithArgument(|command| LongOption::Terminal { command })),
    ("output", OptionConstructor::WithArgument(|path| LongOption::Output { path })),
    ("help", OptionConstructor::WithoutArgument(|| LongOption::Help)),
    ("version", OptionConstructor::WithoutArgument(|| LongOption::Version)),
];

impl OptionConstructor {
    /// Finds the option whose name is `name` or starts with `name`.
    ///
    /// An exact match is preferred over prefix matches.
    fn from_name(name: &str, arg: &str) -> Result<Self, Error> {
        if let Some(&(_, ctor)) = LONG_OPTIONS.iter().find(|(n, _)| *n == name) {
            return Ok(ctor);
        }
        let mut candidates = LONG_OPTIONS.iter().filter(|(n, _)| n.starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some(&(_, ctor)), None) => Ok(ctor),
            (Some(_), Some(_)) => Err(Error::AmbiguousOption(arg.to_owned())),
            (None, _) => Err(Error::UnknownOption(arg.to_owned())),
        }
    }
}

/// Parses command line arguments.
pub fn parse<I, S>(args: I) -> Result<Parse, Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into).peekable();
    let mut result = Run::default();

    // Below, we use `args.next_if(|_| true)` instead of `args.next()` to avoid
    // consuming the `None` value that needs to be seen again.

    if let Some(arg0) = args.next_if(|_| true) {
        result.arg0 = arg0;
    }

    let mut static_mode = false;
    let mut pipe_mode = false;
    while let Some(option) = try_parse_long(&mut args)? {
        match option {
            LongOption::Static => static_mode = true,
            LongOption::Pipe => pipe_mode = true,
            LongOption::Write => result.write = true,
            LongOption::Reconfigure => result.reconfigure = true,
            LongOption::Terminal { command } => result.terminal = Some(command),
            LongOption::Output { path } => result.output = Some(path),
            LongOption::Help => return Ok(Parse::Help),
            LongOption::Version => return Ok(Parse::Version),
        }
    }

    args.next_if(|arg| arg == "--");
    if let Some(operand) = args.next_if(|_| true) {
        return Err(Error::UnexpectedOperand(operand));
    }

    result.mode = match (static_mode, pipe_mode) {
        (true, true) => return Err(Error::ConflictingModes),
        (true, false) => Some(Mode::Static),
        (false, true) => Some(Mode::Pipe),
        (false, false) if result.reconfigure => None,
        (false, false) => return Err(Error::MissingMode),
    };

    Ok(Parse::Run(result))
}

/// Tries to parse and consume the next argument in `args` as a long option.
fn try_parse_long<I: Iterator<Item = String>>(
    args: &mut Peekable<I>,
) -> Result<Option<LongOption>, Error> {
    let Some(arg) = args.next_if(|arg| is_long_option(arg)) else {
        return Ok(None);
    };

    let chars = &arg[2..];
    let (name, value) = match chars.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (chars, None),
    };

    match OptionConstructor::from_name(name, &arg)? {
        OptionConstructor::WithoutArgument(ctor) => {
            if value.is_none() {
                Ok(Some(ctor()))
            } else {
                Err(Error::UnexpectedOptionArgument(arg))
            }
        }
        OptionConstructor::WithArgument(ctor) => {
            let value = match value {
                Some(value) => value.to_owned(),
                None => match args.next() {
                    Some(next_arg) => next_arg,
                    None => return Err(Error::MissingOptionArgument(arg)),
                },
            };
            Ok(Some(ctor(value)))
        }
    }
}

/// Tests if the given string is a long option.
fn is_long_option(arg: &str) -> bool {
    arg.strip_prefix("--").is_some_and(|name| !name.is_empty())
}
