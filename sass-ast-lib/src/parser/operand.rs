//! Operand grammar.
//!
//! Every comma separated slot of an instruction is handed to
//! [`parse_operand`], which dispatches on the leading tokens, most
//! specific shape first, and requires the chosen sub-parser to consume
//! the whole slot.
use lazy_static::lazy_static;
use log::trace;

use std::collections::HashMap;

use super::error::{
    InstructionParseError, OperandErrorReason, OperandParseError, UnsupportedFeature,
    UnsupportedFeatureError,
};
use super::lexer::{Token, TokenKind};
use crate::ast::*;
use crate::config::Architecture;

lazy_static! {
    /// Reserved special register names. The value tells whether the
    /// register is vector valued and accepts a `.X`/`.Y`/`.Z` component.
    static ref SPECIAL_REGISTERS: HashMap<&'static str, bool> = {
        let mut map = HashMap::new();
        for name in &["SR_TID", "SR_CTAID"] {
            map.insert(*name, true);
        }
        for name in &[
            "SR_LANEID",
            "SR_CLOCKLO",
            "SR_CLOCKHI",
            "SR_GLOBALTIMERLO",
            "SR_GLOBALTIMERHI",
            "SR_VIRTCFG",
            "SR_VIRTID",
            "SR_VIRTUALSMID",
            "SR_SMID",
            "SR_NSMID",
            "SR_WARPID",
            "SR_NWARPID",
            "SR_GRIDID",
            "SR_SWINHI",
            "SR_SWINLO",
            "SR_SWINSZ",
            "SR_SMEMSZ",
            "SR_LWINHI",
            "SR_LWINLO",
            "SR_LWINSZ",
            "SR_LMEMLOSZ",
            "SR_LMEMHIOFF",
            "SR_EQMASK",
            "SR_LTMASK",
            "SR_LEMASK",
            "SR_GTMASK",
            "SR_GEMASK",
            "SR_REGALLOC",
            "SR_GLOBALERRORSTATUS",
            "SR_WARPERRORSTATUS",
            "SR_ORDERING_TICKET",
            "SR_PRIM_TYPE",
            "SR_INVOCATION_ID",
            "SR_Y_DIRECTION",
            "SR_THREAD_KILL",
            "SR_SHADER_TYPE",
            "SR_MACHINE_ID_0",
            "SR_MACHINE_ID_1",
            "SR_MACHINE_ID_2",
            "SR_MACHINE_ID_3",
            "SR_AFFINITY",
            "SR_INVOCATION_INFO",
            "SR_CirQueueIncrMinusOne",
            "SR_PM0",
            "SR_PM1",
            "SR_PM2",
            "SR_PM3",
            "SR_PM4",
            "SR_PM5",
            "SR_PM6",
            "SR_PM7",
        ] {
            map.insert(*name, false);
        }
        map
    };
}

/// Outcome of a failed sub-parser. Unsupported features are reported
/// separately from malformed operands.
#[derive(Debug)]
enum Failure {
    Malformed(OperandErrorReason),
    Unsupported(UnsupportedFeatureError),
}

impl From<OperandErrorReason> for Failure {
    fn from(reason: OperandErrorReason) -> Self {
        Failure::Malformed(reason)
    }
}

type OperandResult<T> = Result<T, Failure>;

/// Parse the tokens of the operand at `slot_index`.
///
/// `raw_text` is the source text of the slot and only used for errors.
pub fn parse_operand(
    architecture: Architecture,
    slot_index: usize,
    raw_text: &str,
    tokens: &[Token],
) -> Result<Operand, InstructionParseError> {
    let mut parser = OperandParser::new(tokens, architecture);
    let result = parser
        .operand()
        .and_then(|operand| parser.expect_end().map(|_| operand));
    match result {
        Ok(operand) => {
            trace!("Operand {} `{}`: {:?}", slot_index, raw_text, operand);
            Ok(operand)
        }
        Err(Failure::Malformed(reason)) => Err(OperandParseError {
            slot_index,
            raw_text: raw_text.into(),
            reason,
        }
        .into()),
        Err(Failure::Unsupported(e)) => Err(e.into()),
    }
}

/// Which unsupported feature, if any, the identifier belongs to.
pub fn uniform_feature(name: &str) -> Option<UnsupportedFeature> {
    if name == "URZ" || numbered(name, "UR").is_some() {
        Some(UnsupportedFeature::UniformRegister)
    } else if name == "UPT" || numbered(name, "UP").is_some() {
        Some(UnsupportedFeature::UniformPredicate)
    } else {
        None
    }
}

/// `P0`-`P7` or `PT`.
pub fn is_predicate(name: &str) -> bool {
    name == "PT" || numbered(name, "P").map_or(false, |n| n <= 7)
}

/// `R0`-`R255` or `RZ`.
fn is_register(name: &str) -> bool {
    name == "RZ" || numbered(name, "R").map_or(false, |n| n <= 255)
}

/// The number in `name` after `prefix`, i.e. `7` for `R7`.
fn numbered(name: &str, prefix: &str) -> Option<u32> {
    let digits = name.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn unsupported(feature: UnsupportedFeature, lexeme: &str) -> Failure {
    Failure::Unsupported(UnsupportedFeatureError {
        feature,
        lexeme: lexeme.into(),
    })
}

/// Convert a hex or decimal token, keeping its digits as written.
fn integer(token: &Token, negative: bool) -> Result<IntegerLiteral, OperandErrorReason> {
    let (digits, radix, base) = match token.lexeme.strip_prefix("0x") {
        Some(digits) => (digits, Radix::Hex, 16),
        None => (token.lexeme, Radix::Decimal, 10),
    };
    let magnitude =
        u64::from_str_radix(digits, base).map_err(|_| OperandErrorReason::IntegerOutOfRange)?;
    Ok(IntegerLiteral {
        negative,
        explicit_plus: false,
        magnitude,
        radix,
        digits: digits.into(),
    })
}

/// `__fun_` followed by a name.
fn is_function_name(name: &str) -> bool {
    name.strip_prefix("__fun_").map_or(false, |rest| !rest.is_empty())
}

struct OperandParser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    architecture: Architecture,
}

impl<'t, 'a> OperandParser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], architecture: Architecture) -> Self {
        OperandParser {
            tokens,
            pos: 0,
            architecture,
        }
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos + n)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    fn bump(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_end(&self) -> OperandResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(OperandErrorReason::TrailingTokens(token.lexeme.into()).into()),
        }
    }

    /// The word of a `.word` suffix glued to the previous token, if the
    /// next tokens form one. Nothing is consumed.
    fn attached_suffix(&self) -> Option<&'a str> {
        let prev = self.tokens.get(self.pos.checked_sub(1)?)?;
        let dot = self.peek()?;
        let word = self.peek_nth(1)?;
        let is_word = matches!(word.kind, TokenKind::Ident | TokenKind::Decimal);
        if dot.kind == TokenKind::Dot && prev.touches(dot) && dot.touches(word) && is_word {
            Some(word.lexeme)
        } else {
            None
        }
    }

    fn require(&self, available: bool, what: &'static str) -> OperandResult<()> {
        if available {
            Ok(())
        } else {
            Err(OperandErrorReason::NotOnArchitecture {
                what,
                architecture: self.architecture,
            }
            .into())
        }
    }

    /// Does a sign start a literal, i.e. `-0x8` or `+INF`?
    fn signed_literal_follows(&self) -> bool {
        match self.peek_nth(1) {
            Some(token) => token.is_numeric() || token.is_ident("INF") || token.is_ident("QNAN"),
            None => false,
        }
    }

    fn operand(&mut self) -> OperandResult<Operand> {
        match self.peek_kind() {
            Some(TokenKind::Pipe) | Some(TokenKind::Tilde) => self.unary(),
            Some(TokenKind::Minus) if !self.signed_literal_follows() => self.unary(),
            _ => self.plain(),
        }
    }

    /// Any operand except a unary one.
    fn plain(&mut self) -> OperandResult<Operand> {
        let first = match self.peek() {
            Some(token) => token,
            None => return Err(OperandErrorReason::Empty.into()),
        };
        let bank_follows = self.peek_nth(1).map(|t| t.kind) == Some(TokenKind::OpenBracket);
        match first.kind {
            TokenKind::OpenBracket => self.memory_reference().map(Operand::from),
            TokenKind::Ident if first.lexeme == "c" && bank_follows => {
                self.constant_bank().map(Operand::from)
            }
            TokenKind::OpenBrace => self.barrier_mask().map(Operand::from),
            TokenKind::Percent | TokenKind::Bang => self.predicate_register().map(Operand::from),
            TokenKind::Minus | TokenKind::Plus if self.signed_literal_follows() => {
                self.signed_immediate().map(Operand::from)
            }
            TokenKind::Minus | TokenKind::Pipe | TokenKind::Tilde => {
                Err(OperandErrorReason::NestedUnary.into())
            }
            TokenKind::Hex | TokenKind::Decimal | TokenKind::Float => {
                self.pos += 1;
                self.number(first, "").map(Operand::from)
            }
            TokenKind::Ident => self.identifier(),
            _ => Err(OperandErrorReason::UnknownShape.into()),
        }
    }

    fn unary(&mut self) -> OperandResult<Operand> {
        let op = if self.eat(TokenKind::Minus) {
            if self.eat(TokenKind::Pipe) {
                UnaryOp::NegateAbsolute
            } else {
                UnaryOp::Negate
            }
        } else if self.eat(TokenKind::Pipe) {
            UnaryOp::Absolute
        } else {
            self.pos += 1;
            UnaryOp::BitwiseNot
        };
        let operand = match op {
            UnaryOp::Absolute | UnaryOp::NegateAbsolute => {
                // The closing pipe ends the slot
                let tokens = self.tokens;
                let end = tokens.len();
                if end <= self.pos || tokens[end - 1].kind != TokenKind::Pipe {
                    return Err(OperandErrorReason::UnknownShape.into());
                }
                let mut inner = OperandParser::new(&tokens[self.pos..end - 1], self.architecture);
                let operand = inner.plain()?;
                inner.expect_end()?;
                self.pos = end;
                operand
            }
            UnaryOp::Negate | UnaryOp::BitwiseNot => self.plain()?,
        };
        Ok(UnaryOperand {
            op,
            operand: Box::new(operand),
        }
        .into())
    }

    fn signed_immediate(&mut self) -> OperandResult<Immediate> {
        let sign = match self.bump() {
            Some(token) if token.kind == TokenKind::Minus => "-",
            _ => "+",
        };
        let token = match self.bump() {
            Some(token) => token,
            None => return Err(OperandErrorReason::UnknownShape.into()),
        };
        if token.kind == TokenKind::Ident {
            // +INF, -QNAN, ...
            return Ok(Immediate::Float(FloatLiteral {
                text: format!("{}{}", sign, token.lexeme),
            }));
        }
        self.number(token, sign)
    }

    /// A numeric literal whose token was just consumed.
    fn number(&mut self, token: &Token, sign: &str) -> OperandResult<Immediate> {
        let may_be_float = matches!(token.kind, TokenKind::Decimal | TokenKind::Float);
        if may_be_float && self.attached_suffix() == Some("NEG") {
            self.require(
                self.architecture.has_neg_float_suffix(),
                "The '.NEG' float notation",
            )?;
            self.pos += 2;
            return Ok(Immediate::Float(FloatLiteral {
                text: format!("{}{}.NEG", sign, token.lexeme),
            }));
        }
        match token.kind {
            TokenKind::Float => Ok(Immediate::Float(FloatLiteral {
                text: format!("{}{}", sign, token.lexeme),
            })),
            _ => {
                let literal = integer(token, sign == "-")?;
                if sign == "+" {
                    Ok(Immediate::Integer(literal.with_plus()))
                } else {
                    Ok(Immediate::Integer(literal))
                }
            }
        }
    }

    fn predicate_register(&mut self) -> OperandResult<PredicateRegister> {
        let negated = self.eat(TokenKind::Bang);
        let sigil = self.eat(TokenKind::Percent);
        let token = match self.bump() {
            Some(token) if token.kind == TokenKind::Ident => token,
            _ => return Err(OperandErrorReason::ExpectedPredicate.into()),
        };
        if let Some(feature) = uniform_feature(token.lexeme) {
            return Err(unsupported(feature, token.lexeme));
        }
        if !is_predicate(token.lexeme) {
            return Err(OperandErrorReason::ExpectedPredicate.into());
        }
        Ok(PredicateRegister {
            name: token.lexeme.into(),
            negated,
            sigil,
        })
    }

    fn identifier(&mut self) -> OperandResult<Operand> {
        let name = match self.bump() {
            Some(token) => token.lexeme,
            None => return Err(OperandErrorReason::Empty.into()),
        };
        if let Some(feature) = uniform_feature(name) {
            return Err(unsupported(feature, name));
        }
        if name.starts_with("SR_") {
            return self.special_register(name).map(Operand::from);
        }
        if is_register(name) {
            return self.register_suffixes(name).map(Operand::from);
        }
        if is_predicate(name) {
            return Ok(PredicateRegister::new(name).into());
        }
        if name == "CC" {
            return self.condition_code().map(Operand::from);
        }
        if is_function_name(name) {
            return Ok(FunctionName { name: name.into() }.into());
        }
        if let Some(index) = numbered(name, "SB").filter(|n| *n <= 5) {
            return Ok(DependencyBarrier { index: index as u8 }.into());
        }
        let dimension = match name {
            "1D" => Some(TextureDimension::_1D),
            "2D" => Some(TextureDimension::_2D),
            "3D" => Some(TextureDimension::_3D),
            _ => None,
        };
        if let Some(dimension) = dimension {
            return Ok(dimension.into());
        }
        match TextureComponents::from_name(name) {
            Some(components) => Ok(components.into()),
            None => Err(OperandErrorReason::UnknownShape.into()),
        }
    }

    /// Suffixes and flags following the register `name`, which was just consumed.
    fn register_suffixes(&mut self, name: &str) -> OperandResult<Register> {
        let mut register = Register::new(name);
        while let Some(word) = self.attached_suffix() {
            match word {
                "reuse" => register.reuse = true,
                "CC" => {
                    self.require(
                        self.architecture.has_condition_codes(),
                        "The '.CC' register suffix",
                    )?;
                    register.condition_code = true;
                }
                _ => match RegisterSuffix::from_name(word) {
                    Some(suffix) if register.suffix.is_none() => register.suffix = Some(suffix),
                    _ => return Err(OperandErrorReason::UnknownRegisterSuffix(word.into()).into()),
                },
            }
            self.pos += 2;
        }
        Ok(register)
    }

    fn special_register(&mut self, name: &str) -> OperandResult<SpecialRegister> {
        let vector = match SPECIAL_REGISTERS.get(name) {
            Some(vector) => *vector,
            None => return Err(OperandErrorReason::UnknownSpecialRegister(name.into()).into()),
        };
        let mut register = SpecialRegister::new(name);
        if let Some(component) = self.attached_suffix() {
            if vector && matches!(component, "X" | "Y" | "Z") {
                register.component = Some(component.into());
                self.pos += 2;
            }
        }
        Ok(register)
    }

    fn condition_code(&mut self) -> OperandResult<ConditionCode> {
        self.require(
            self.architecture.has_condition_codes(),
            "The condition code register 'CC'",
        )?;
        let condition = self.attached_suffix().map(String::from);
        if condition.is_some() {
            self.pos += 2;
        }
        Ok(ConditionCode { condition })
    }

    fn barrier_mask(&mut self) -> OperandResult<BarrierMask> {
        self.pos += 1;
        let mut barriers = vec![];
        loop {
            let index = match self.bump() {
                Some(token) if token.kind == TokenKind::Decimal => token.lexeme.parse().ok(),
                _ => None,
            };
            match index.filter(|index: &u8| *index <= 5) {
                Some(index) => barriers.push(index),
                None => return Err(OperandErrorReason::MalformedBarrierMask.into()),
            }
            match self.bump().map(|token| token.kind) {
                Some(TokenKind::Comma) => continue,
                Some(TokenKind::CloseBrace) => break,
                _ => return Err(OperandErrorReason::MalformedBarrierMask.into()),
            }
        }
        Ok(BarrierMask { barriers })
    }

    fn constant_bank(&mut self) -> OperandResult<ConstantBank> {
        // `c[`
        self.pos += 2;
        let bank = match (self.bump(), self.bump()) {
            (Some(bank), Some(close))
                if matches!(bank.kind, TokenKind::Hex | TokenKind::Decimal)
                    && close.kind == TokenKind::CloseBracket =>
            {
                integer(bank, false)?
            }
            _ => return Err(OperandErrorReason::MalformedConstantBank.into()),
        };
        if self.peek_kind() != Some(TokenKind::OpenBracket) {
            return Err(OperandErrorReason::MalformedConstantBank.into());
        }
        let address = self.memory_reference()?;
        let selector = match self.attached_suffix() {
            Some(word) => match RegisterSuffix::from_name(word) {
                Some(selector) => {
                    self.pos += 2;
                    Some(selector)
                }
                None => {
                    return Err(OperandErrorReason::UnknownRegisterSuffix(word.into()).into())
                }
            },
            None => None,
        };
        Ok(ConstantBank {
            bank,
            address,
            selector,
        })
    }

    fn memory_reference(&mut self) -> OperandResult<MemoryReference> {
        // `[`
        self.pos += 1;
        let tokens = self.tokens;
        let close = match tokens[self.pos..]
            .iter()
            .position(|token| token.kind == TokenKind::CloseBracket)
        {
            Some(offset) => self.pos + offset,
            None => return Err(OperandErrorReason::UnterminatedMemoryReference.into()),
        };
        let mut inner = OperandParser::new(&tokens[self.pos..close], self.architecture);
        let address = inner.address()?;
        self.pos = close + 1;
        Ok(address)
    }

    /// The inside of a memory reference.
    fn address(&mut self) -> OperandResult<MemoryReference> {
        match self.peek_kind() {
            Some(TokenKind::Minus) | Some(TokenKind::Hex) | Some(TokenKind::Decimal) => {
                let constant = self.displacement()?;
                self.expect_end()?;
                return Ok(MemoryReference::absolute(constant));
            }
            _ => {}
        }
        let base = self.address_register(OperandErrorReason::InvalidMemoryBase)?;
        let mut offset = None;
        let mut constant = None;
        if self.eat(TokenKind::Plus) {
            if self.peek_kind() == Some(TokenKind::Ident) {
                offset = Some(self.address_register(OperandErrorReason::InvalidMemoryOffset)?);
                if self.eat(TokenKind::Plus) || self.peek_kind() == Some(TokenKind::Minus) {
                    constant = Some(self.displacement()?);
                }
            } else {
                constant = Some(self.displacement()?);
            }
        } else if self.peek_kind() == Some(TokenKind::Minus) {
            constant = Some(self.displacement()?);
        }
        self.expect_end()?;
        Ok(MemoryReference {
            base: Some(base),
            offset,
            constant,
        })
    }

    fn address_register(&mut self, otherwise: OperandErrorReason) -> OperandResult<Register> {
        let name = match self.bump() {
            Some(token) if token.kind == TokenKind::Ident => token.lexeme,
            _ => return Err(otherwise.into()),
        };
        if let Some(feature) = uniform_feature(name) {
            return Err(unsupported(feature, name));
        }
        if !is_register(name) {
            return Err(otherwise.into());
        }
        self.register_suffixes(name)
    }

    /// `0x8`, `-0x8`
    fn displacement(&mut self) -> OperandResult<IntegerLiteral> {
        let negative = self.eat(TokenKind::Minus);
        match self.bump() {
            Some(token) if matches!(token.kind, TokenKind::Hex | TokenKind::Decimal) => {
                Ok(integer(token, negative)?)
            }
            _ => Err(OperandErrorReason::InvalidMemoryConstant.into()),
        }
    }
}
