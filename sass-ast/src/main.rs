//! # Parser for NVIDIA SASS disassembly
//!
//! A command line front end for `sass-ast-lib`. It reads disassembled
//! instructions as `LABEL: TEXT` pairs, one per line, from a file or
//! stdin and parses every one of them into a syntax tree.
//!
//! ## Usage
//!
//! Print a normalized listing of a program:
//! ```console
//! $ sass-ast parse kernel.sass
//! 0x0000:    MOV R1, c[0x0][0x20]
//! 0x0008:    S2R R0, SR_TID.X
//! ```
//!
//! Add `--debug` to print the syntax trees instead and
//! `--skip-unsupported` to ignore lines using uniform registers.
//!
//! To find all malformed lines run
//! ```console
//! $ sass-ast --arch sm_70 check kernel.sass
//! ```
//! which exits with an error code of 1 if any line is malformed.
//!
//! Set `RUST_LOG=debug` for more output.

mod args;
mod error;
mod helpers;

use args::{Args, CheckArgs, ParseArgs, SubCommand};
use error::Error;
use helpers::{input_lines, read_input};

use colored::Colorize;
use log::{info, warn};
use sass_ast_lib::{
    ast::Statement,
    config::{ParserConfig, ParserConfigBuilder},
};

use std::process;

#[paw::main]
fn main(args: Args) {
    pretty_env_logger::init();

    let config = ParserConfigBuilder::default()
        .with_architecture(args.arch)
        .build()
        .unwrap_or_default();
    info!("Parsing for {}", config.architecture);

    let result: Result<(), Error> = match args.subcommand {
        SubCommand::Parse(args) => run_parse(&config, &args),
        SubCommand::Check(args) => run_check(&config, &args),
    };

    // Exit with errorcode 1 if an error occured.
    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1)
    }
}

fn run_parse(config: &ParserConfig, args: &ParseArgs) -> Result<(), Error> {
    let content = read_input(args.input.as_deref())?;
    for line in input_lines(&content) {
        let line = line?;
        match Statement::build_with(config, line.label, line.text) {
            Ok(statement) if args.debug => println!("{:#?}", statement),
            Ok(statement) => println!("{:#}", statement),
            Err(e) if args.skip_unsupported && e.is_unsupported() => {
                warn!("Skipping line {}: {}", line.number, e)
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn run_check(config: &ParserConfig, args: &CheckArgs) -> Result<(), Error> {
    let content = read_input(args.input.as_deref())?;
    let mut total = 0;
    let mut malformed = 0;
    let mut unsupported = 0;
    for line in input_lines(&content) {
        total += 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                malformed += 1;
                eprintln!("{}", e.to_string().red());
                continue;
            }
        };
        if let Err(e) = Statement::build_with(config, line.label, line.text) {
            if e.is_unsupported() {
                unsupported += 1;
                warn!("Line {}: {}", line.number, e);
            } else {
                malformed += 1;
                eprintln!("{}: {}", line.number.to_string().bold(), e.to_string().red());
            }
        }
    }
    let valid = total - malformed - unsupported;
    println!(
        "{} valid, {} unsupported, {} malformed",
        valid.to_string().bright_green(),
        unsupported.to_string().yellow(),
        malformed.to_string().red()
    );
    if malformed > 0 {
        Err(Error::Malformed { count: malformed })
    } else {
        Ok(())
    }
}
