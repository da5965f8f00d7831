//! Error module.
//!
//! This module defines the error type used through-out the program.

use sass_ast_lib::parser::StatementParseError;
use thiserror::Error;

use std::io::Error as IOError;

#[derive(Error, Debug)]
/// THE error type.
pub enum Error {
    /// Thrown when a line is not valid SASS.
    #[error("{0}")]
    Parse(#[from] StatementParseError),
    /// Thrown when, due to IO failure, the input could not be read.
    #[error("The input could not be read!:\n{0}")]
    ReadingInput(#[from] IOError),
    /// A line without the `LABEL:` prefix.
    #[error("Line {line} is not of the form `LABEL: TEXT`")]
    MissingLabel { line: usize },
    /// `check` found malformed lines.
    #[error("Found {count} malformed line(s)")]
    Malformed { count: usize },
}
