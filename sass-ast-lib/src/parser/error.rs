use thiserror::Error;

use std::fmt;

use crate::ast::AddressLabel;
use crate::config::Architecture;

/// The tokenizer found a character it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected {} at column {column}", display_found(.found))]
pub struct LexError {
    /// 1-based column of the offending character.
    pub column: usize,
    /// The offending character, `None` at the end of input.
    pub found: Option<char>,
}

fn display_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("character '{}'", c),
        None => "end of line".into(),
    }
}

/// Features of later hardware generations which are recognized but
/// deliberately not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedFeature {
    /// `UR0`..`UR63`, `URZ`
    UniformRegister,
    /// `UP0`..`UP6`, `UPT`
    UniformPredicate,
}

impl fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnsupportedFeature::UniformRegister => write!(f, "uniform registers"),
            UnsupportedFeature::UniformPredicate => write!(f, "uniform predicates"),
        }
    }
}

/// A line uses a known but unsupported feature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{feature} are not supported (found `{lexeme}`)")]
pub struct UnsupportedFeatureError {
    pub feature: UnsupportedFeature,
    pub lexeme: String,
}

/// Why a single operand slot could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandErrorReason {
    #[error("Empty operand")]
    Empty,
    #[error("Not a known operand")]
    UnknownShape,
    #[error("Unterminated memory reference, expected ']'")]
    UnterminatedMemoryReference,
    #[error("The base of a memory reference must be a register")]
    InvalidMemoryBase,
    #[error("The offset of a memory reference must be a register")]
    InvalidMemoryOffset,
    #[error("The constant of a memory reference must be an integer")]
    InvalidMemoryConstant,
    #[error("Malformed constant bank access, expected 'c[bank][address]'")]
    MalformedConstantBank,
    #[error("Malformed barrier mask, expected '{{n,...}}'")]
    MalformedBarrierMask,
    #[error("Unknown register suffix '.{0}'")]
    UnknownRegisterSuffix(String),
    #[error("Unknown special register '{0}'")]
    UnknownSpecialRegister(String),
    #[error("Expected a predicate register ('P0'-'P7' or 'PT')")]
    ExpectedPredicate,
    #[error("Integer literal out of range")]
    IntegerOutOfRange,
    #[error("Unary operators cannot be nested")]
    NestedUnary,
    #[error("Unexpected '{0}' after the operand")]
    TrailingTokens(String),
    #[error("{what} is not available on {architecture}")]
    NotOnArchitecture {
        what: &'static str,
        architecture: Architecture,
    },
}

/// An operand slot did not match any operand category
/// or violated a category specific constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Operand {slot_index} `{raw_text}`: {reason}")]
pub struct OperandParseError {
    /// 0-based position of the operand in the operand list.
    pub slot_index: usize,
    pub raw_text: String,
    pub reason: OperandErrorReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionParseError {
    #[error("Expected a mnemonic, found {found}")]
    MissingMnemonic { found: String },
    #[error("Malformed predicate guard `{raw_text}`: {reason}")]
    MalformedPredicate { raw_text: String, reason: String },
    #[error("Malformed modifier after `{after}`")]
    MalformedModifier { after: String },
    #[error("Unexpected `{found}` after the instruction terminator")]
    TrailingInput { found: String },
    #[error("{0}")]
    Operand(#[from] OperandParseError),
    #[error("{0}")]
    Unsupported(#[from] UnsupportedFeatureError),
}

/// The first error encountered while building a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Empty label")]
    EmptyLabel,
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Instruction(#[from] InstructionParseError),
}

/// A disassembly line could not be turned into a [`Statement`](crate::ast::Statement).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to parse `{label}: {text}`: {kind}")]
pub struct StatementParseError {
    pub label: AddressLabel,
    pub text: String,
    pub kind: ParseErrorKind,
}

impl StatementParseError {
    /// The unsupported feature that caused this error, if any.
    ///
    /// Use this to skip lines of newer architectures deliberately
    /// instead of treating them as malformed.
    pub fn unsupported_feature(&self) -> Option<UnsupportedFeature> {
        match &self.kind {
            ParseErrorKind::Instruction(InstructionParseError::Unsupported(e)) => Some(e.feature),
            _ => None,
        }
    }
    /// Shorthand for `self.unsupported_feature().is_some()`.
    pub fn is_unsupported(&self) -> bool {
        self.unsupported_feature().is_some()
    }
}
