//! Instruction grammar: predicate guard, mnemonic, modifiers and the
//! operand list.
use log::trace;

use std::ops::Range;

use super::error::{InstructionParseError, UnsupportedFeatureError};
use super::lexer::{Token, TokenKind};
use super::operand::{is_predicate, parse_operand, uniform_feature};
use crate::ast::{Instruction, PredicateOperand};
use crate::config::Architecture;

type InstructionResult<T> = Result<T, InstructionParseError>;

/// Parse the tokens of `text` into an [`Instruction`].
///
/// `tokens` must be the output of the tokenizer for `text`,
/// including the final [`TokenKind::EndOfLine`].
pub fn parse_instruction(
    architecture: Architecture,
    text: &str,
    tokens: &[Token],
) -> InstructionResult<Instruction> {
    let mut pos = 0;
    let predicate = parse_guard(text, tokens, &mut pos)?;
    let mnemonic = parse_mnemonic(tokens, &mut pos)?;
    let modifiers = parse_modifiers(tokens, &mut pos)?;
    let end = operand_region_end(tokens, pos)?;
    let mut arguments = vec![];
    if pos < end {
        for (slot_index, slot) in split_operands(tokens, pos..end).into_iter().enumerate() {
            let raw_text = slot_text(text, tokens, slot.clone());
            let operand = parse_operand(architecture, slot_index, raw_text, &tokens[slot])?;
            arguments.push(operand);
        }
    }
    trace!(
        "Instruction {} with {} modifiers and {} operands",
        mnemonic,
        modifiers.len(),
        arguments.len()
    );
    Ok(Instruction::new(mnemonic, modifiers, predicate, arguments))
}

/// Describe a token for error messages.
fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::EndOfLine => "end of line".into(),
        _ => format!("`{}`", token.lexeme),
    }
}

/// `@P0`, `@!%P1`, ...
fn parse_guard(
    text: &str,
    tokens: &[Token],
    pos: &mut usize,
) -> InstructionResult<Option<PredicateOperand>> {
    let start = match tokens.get(*pos) {
        Some(token) if token.kind == TokenKind::At => token.start,
        _ => return Ok(None),
    };
    *pos += 1;
    let negated = tokens[*pos].kind == TokenKind::Bang;
    if negated {
        *pos += 1;
    }
    let sigil = tokens[*pos].kind == TokenKind::Percent;
    if sigil {
        *pos += 1;
    }
    let token = tokens[*pos];
    let raw_text = text[start..token.end].to_string();
    if token.kind != TokenKind::Ident {
        return Err(InstructionParseError::MalformedPredicate {
            raw_text,
            reason: format!("expected a predicate register, found {}", describe(&token)),
        });
    }
    if let Some(feature) = uniform_feature(token.lexeme) {
        return Err(UnsupportedFeatureError {
            feature,
            lexeme: token.lexeme.into(),
        }
        .into());
    }
    if !is_predicate(token.lexeme) {
        return Err(InstructionParseError::MalformedPredicate {
            raw_text,
            reason: format!("`{}` is not a predicate register", token.lexeme),
        });
    }
    *pos += 1;
    Ok(Some(PredicateOperand {
        name: token.lexeme.into(),
        negated,
        sigil,
    }))
}

fn parse_mnemonic(tokens: &[Token], pos: &mut usize) -> InstructionResult<String> {
    let token = tokens[*pos];
    let starts_with_letter = token
        .lexeme
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic());
    if token.kind != TokenKind::Ident || !starts_with_letter {
        return Err(InstructionParseError::MissingMnemonic {
            found: describe(&token),
        });
    }
    *pos += 1;
    Ok(token.lexeme.into())
}

/// Dots glued to the previous token introduce a modifier.
fn parse_modifiers(tokens: &[Token], pos: &mut usize) -> InstructionResult<Vec<String>> {
    let mut modifiers = vec![];
    loop {
        let prev = tokens[*pos - 1];
        let dot = tokens[*pos];
        if dot.kind != TokenKind::Dot || !prev.touches(&dot) {
            break;
        }
        let word = tokens[*pos + 1];
        let is_word = matches!(word.kind, TokenKind::Ident | TokenKind::Decimal);
        if !is_word || !dot.touches(&word) {
            return Err(InstructionParseError::MalformedModifier {
                after: prev.lexeme.into(),
            });
        }
        modifiers.push(word.lexeme.to_string());
        *pos += 2;
    }
    Ok(modifiers)
}

/// Index of the token ending the operand region, the optional `;` or the
/// end of the line.
fn operand_region_end(tokens: &[Token], pos: usize) -> InstructionResult<usize> {
    let end = tokens[pos..]
        .iter()
        .position(|token| matches!(token.kind, TokenKind::Semicolon | TokenKind::EndOfLine))
        .map_or(tokens.len() - 1, |offset| pos + offset);
    if tokens[end].kind == TokenKind::Semicolon {
        let next = tokens[end + 1];
        if next.kind != TokenKind::EndOfLine {
            return Err(InstructionParseError::TrailingInput {
                found: next.lexeme.into(),
            });
        }
    }
    Ok(end)
}

/// Split `region` on commas outside of brackets and braces.
///
/// Only commas separate operands. `RET R20 0x0` is one malformed slot,
/// not two operands.
fn split_operands(tokens: &[Token], region: Range<usize>) -> Vec<Range<usize>> {
    let mut slots = vec![];
    let mut depth = 0usize;
    let mut slot_start = region.start;
    for idx in region.clone() {
        match tokens[idx].kind {
            TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
            TokenKind::CloseBracket | TokenKind::CloseBrace => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                slots.push(slot_start..idx);
                slot_start = idx + 1;
            }
            _ => {}
        }
    }
    slots.push(slot_start..region.end);
    slots
}

/// Source text covered by the tokens in `slot`.
fn slot_text<'a>(text: &'a str, tokens: &[Token], slot: Range<usize>) -> &'a str {
    if slot.is_empty() {
        return "";
    }
    &text[tokens[slot.start].start..tokens[slot.end - 1].end]
}
