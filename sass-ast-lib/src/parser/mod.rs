//! # SASS disassembly line parsing
//!
//! A line is processed in three stages. The tokenizer (a pest grammar)
//! splits the text into tokens, the instruction grammar picks out the
//! predicate guard, mnemonic and modifiers and splits the operand list,
//! and the operand grammar turns every slot into a typed [`Operand`].
//! The first error of any stage aborts the whole line.
//!
//! ```
//! # use sass_ast_lib::ast::Statement;
//! let statement = Statement::build(0x10u64, "@!%P1 ISETP.GE.AND P2, PT, R0, R1, PT")
//!     .expect("Valid line");
//! let instruction = statement.instruction();
//! assert_eq!(instruction.mnemonic(), "ISETP");
//! assert_eq!(instruction.modifiers(), ["GE", "AND"]);
//! assert!(instruction.predicate().map_or(false, |p| p.negated));
//! assert_eq!(instruction.arguments().len(), 5);
//! ```
//!
//! [`Operand`]: crate::ast::Operand
use log::debug;

use crate::ast::{AddressLabel, Instruction, Statement};
use crate::config::ParserConfig;

mod error;
mod instruction;
mod lexer;
mod operand;

pub use error::{
    InstructionParseError, LexError, OperandErrorReason, OperandParseError, ParseErrorKind,
    StatementParseError, UnsupportedFeature, UnsupportedFeatureError,
};

type ParseResult<T> = Result<T, StatementParseError>;

impl Statement {
    /// Parse `text`, the disassembly of the instruction at `label`,
    /// with the default [`ParserConfig`].
    pub fn build(label: impl Into<AddressLabel>, text: &str) -> ParseResult<Statement> {
        Statement::build_with(&ParserConfig::default(), label, text)
    }

    /// Parse `text`, the disassembly of the instruction at `label`.
    pub fn build_with(
        config: &ParserConfig,
        label: impl Into<AddressLabel>,
        text: &str,
    ) -> ParseResult<Statement> {
        let label = label.into();
        match build_instruction(config, &label, text) {
            Ok(instruction) => {
                let statement = Statement::new(label, instruction);
                debug!("Built {:?}", statement);
                Ok(statement)
            }
            Err(kind) => {
                let err = StatementParseError {
                    label,
                    text: text.into(),
                    kind,
                };
                debug!("Rejected line: {}", err);
                Err(err)
            }
        }
    }
}

fn build_instruction(
    config: &ParserConfig,
    label: &AddressLabel,
    text: &str,
) -> Result<Instruction, ParseErrorKind> {
    if let AddressLabel::Name(name) = label {
        if name.trim().is_empty() {
            return Err(ParseErrorKind::EmptyLabel);
        }
    }
    let tokens = lexer::tokenize(text)?;
    let instruction = instruction::parse_instruction(config.architecture, text, &tokens)?;
    Ok(instruction)
}
