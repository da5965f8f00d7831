//! Types and Functions to aid the program.

use log::trace;
use sass_ast_lib::ast::AddressLabel;

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path,
};

use crate::error::Error;

/// A non-blank input line, split into label and instruction text.
#[derive(Debug, PartialEq)]
pub struct InputLine<'a> {
    /// 1-based line number.
    pub number: usize,
    pub label: AddressLabel,
    pub text: &'a str,
}

/// Read the file at `path`, or stdin if there is none.
pub fn read_input(path: Option<&Path>) -> Result<String, Error> {
    match path {
        Some(path) => {
            trace!("Reading {}", path.display());
            Ok(read_to_string(path)?)
        }
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

/// Split `content` into [`InputLine`]s, skipping blank lines.
///
/// Every item fails individually if its `LABEL:` prefix is missing.
pub fn input_lines(content: &str) -> impl Iterator<Item = Result<InputLine<'_>, Error>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| split_line(idx + 1, line))
}

fn split_line(number: usize, line: &str) -> Result<InputLine<'_>, Error> {
    let colon = match line.find(':') {
        Some(colon) => colon,
        None => return Err(Error::MissingLabel { line: number }),
    };
    Ok(InputLine {
        number,
        label: parse_label(&line[..colon]),
        text: line[colon + 1..].trim(),
    })
}

/// Hexadecimal labels become addresses, everything else stays a name.
pub fn parse_label(label: &str) -> AddressLabel {
    let label = label.trim();
    let address = label
        .strip_prefix("0x")
        .and_then(|digits| u64::from_str_radix(digits, 16).ok());
    match address {
        Some(address) => AddressLabel::Address(address),
        None => AddressLabel::Name(label.into()),
    }
}
