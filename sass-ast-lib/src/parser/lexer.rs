//! Tokenizer for a single disassembly line.
//!
//! The lexical rules live in `sass.pest`. This module only turns the
//! resulting pairs into a flat list of [`Token`]s, which the instruction
//! and operand grammars then consume.
use log::trace;
use pest::error::{Error as PestError, InputLocation};
use pest::Parser;
use pest_derive::Parser;

use super::error::LexError;

#[derive(Parser)]
#[grammar = "parser/sass.pest"]
struct SassLexer;

/// The different token classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Mnemonics, modifiers, register names, ...
    Ident,
    /// `0x1f`
    Hex,
    /// `42`
    Decimal,
    /// `1.5`, `2e-05`
    Float,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `%`
    Percent,
    /// `~`
    Tilde,
    /// `|`
    Pipe,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `;`
    Semicolon,
    /// Always the last token of a line.
    EndOfLine,
}

/// A single token, borrowing its lexeme from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset after the last character.
    pub end: usize,
}

impl<'a> Token<'a> {
    /// Is this a numeric literal of any kind?
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Hex | TokenKind::Decimal | TokenKind::Float
        )
    }
    /// Is this an identifier with exactly the given text?
    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Ident && self.lexeme == text
    }
    /// Does `next` start exactly where this token ends?
    pub fn touches(&self, next: &Token) -> bool {
        self.end == next.start
    }
}

impl TokenKind {
    fn from_rule(rule: Rule) -> Option<Self> {
        let kind = match rule {
            Rule::ident => TokenKind::Ident,
            Rule::hex => TokenKind::Hex,
            Rule::decimal => TokenKind::Decimal,
            Rule::float => TokenKind::Float,
            Rule::at => TokenKind::At,
            Rule::bang => TokenKind::Bang,
            Rule::percent => TokenKind::Percent,
            Rule::tilde => TokenKind::Tilde,
            Rule::pipe => TokenKind::Pipe,
            Rule::dot => TokenKind::Dot,
            Rule::comma => TokenKind::Comma,
            Rule::plus => TokenKind::Plus,
            Rule::minus => TokenKind::Minus,
            Rule::obracket => TokenKind::OpenBracket,
            Rule::cbracket => TokenKind::CloseBracket,
            Rule::obrace => TokenKind::OpenBrace,
            Rule::cbrace => TokenKind::CloseBrace,
            Rule::semicolon => TokenKind::Semicolon,
            _ => return None,
        };
        Some(kind)
    }
}

/// Split `text` into tokens.
///
/// The returned list always ends with a [`TokenKind::EndOfLine`] token.
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, LexError> {
    let pairs =
        SassLexer::parse(Rule::line, text).map_err(|e| lex_error_from_pest(text, e))?;
    let mut tokens = vec![];
    for pair in pairs.flatten() {
        if let Some(kind) = TokenKind::from_rule(pair.as_rule()) {
            let span = pair.as_span();
            tokens.push(Token {
                kind,
                lexeme: span.as_str(),
                start: span.start(),
                end: span.end(),
            });
        }
    }
    tokens.push(Token {
        kind: TokenKind::EndOfLine,
        lexeme: "",
        start: text.len(),
        end: text.len(),
    });
    trace!("Tokenized {:?} into {} tokens", text, tokens.len());
    Ok(tokens)
}

/// Pest reports the furthest position it tried to match at,
/// which is where the unrecognized character sits.
fn lex_error_from_pest(text: &str, e: PestError<Rule>) -> LexError {
    let pos = match e.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let pos = pos.min(text.len());
    LexError {
        column: text[..pos].chars().count() + 1,
        found: text[pos..].chars().next(),
    }
}
