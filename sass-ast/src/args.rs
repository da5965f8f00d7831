use sass_ast_lib::config::Architecture;
use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(author = "Malte Tammena <malte.tammena@gmx.de>")]
/// Parser for NVIDIA SASS disassembly.
///
/// Input consists of `LABEL: TEXT` pairs, one per line, where LABEL is
/// the address of the instruction (i.e. `0x0010`) or any other name and
/// TEXT is the disassembled instruction. Blank lines are ignored.
pub struct Args {
    /// The hardware generation the disassembly was produced for.
    #[structopt(long, value_name = "ARCH", default_value = "sm_61",
                possible_values = &["sm_55", "sm_61", "sm_70"])]
    pub arch: Architecture,
    #[structopt(subcommand)]
    pub subcommand: SubCommand,
}

#[derive(Debug, StructOpt)]
pub enum SubCommand {
    /// Parse every line and print the result.
    ///
    /// Parsing stops at the first malformed line.
    Parse(ParseArgs),
    /// Check every line for syntax errors.
    ///
    /// All malformed lines are reported. Lines using unsupported
    /// features of later generations are counted but do not fail
    /// the check.
    Check(CheckArgs),
}

#[derive(Debug, StructOpt)]
pub struct ParseArgs {
    /// The file to read. Reads from stdin if omitted.
    #[structopt(name = "FILE")]
    pub input: Option<PathBuf>,
    /// Skip lines using unsupported features instead of failing.
    #[structopt(long)]
    pub skip_unsupported: bool,
    /// Print the syntax tree of every statement.
    #[structopt(long)]
    pub debug: bool,
}

#[derive(Debug, StructOpt)]
pub struct CheckArgs {
    /// The file to read. Reads from stdin if omitted.
    #[structopt(name = "FILE")]
    pub input: Option<PathBuf>,
}
