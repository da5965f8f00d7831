//! Abstract syntax of a single SASS disassembly line.
//!
//! All nodes are plain values. A [`Statement`] owns everything below it
//! and nothing is shared between statements. Use
//! [`Statement::build`] to create one from text.
use bitflags::bitflags;
#[cfg(test)]
use proptest_derive::Arbitrary;

mod format;
mod trait_impls;

/// Width used to pad the label column in listings (`{:#}`).
pub const LABEL_WIDTH: usize = 10;

/// Position of a statement in a program.
///
/// Opaque to the parser, it is only carried along for diagnostics
/// and consumers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressLabel {
    /// A numeric address, i.e. `0x0010`.
    Address(u64),
    /// Any other caller supplied name.
    Name(String),
}

/// One parsed disassembly line.
///
/// [`Statement::build`] is the only way to create one, so every label
/// has been checked.
///
/// ```compile_fail
/// use sass_ast_lib::ast::{AddressLabel, Instruction, Statement};
///
/// fn unchecked(instruction: Instruction) -> Statement {
///     Statement::new(AddressLabel::Name(String::new()), instruction)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    label: AddressLabel,
    instruction: Instruction,
}

/// Guard of a predicated instruction, i.e. the `!%P1` in `@!%P1 BRA 0x40`.
pub type PredicateOperand = PredicateRegister;

/// A SASS instruction.
///
/// Operand order is preserved exactly as written. By convention
/// destinations come first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instruction {
    mnemonic: String,
    modifiers: Vec<String>,
    predicate: Option<PredicateOperand>,
    arguments: Vec<Operand>,
}

/// All operand categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Register(Register),
    Immediate(Immediate),
    MemoryReference(MemoryReference),
    ConstantBank(ConstantBank),
    SpecialRegister(SpecialRegister),
    PredicateRegister(PredicateRegister),
    ConditionCode(ConditionCode),
    DependencyBarrier(DependencyBarrier),
    BarrierMask(BarrierMask),
    TextureDimension(TextureDimension),
    TextureComponents(TextureComponents),
    FunctionName(FunctionName),
    Unary(UnaryOperand),
}

/// A general purpose register, `R0`-`R255` or the zero register `RZ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Register {
    pub name: String,
    /// Size, type or selector suffix.
    pub suffix: Option<RegisterSuffix>,
    /// `.CC`, the instruction writes the condition code.
    pub condition_code: bool,
    /// `.reuse`, operand reuse cache hint.
    pub reuse: bool,
}

/// Suffixes selecting a part or a view of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum RegisterSuffix {
    /// Lower half.
    H0,
    /// Upper half.
    H1,
    /// Byte 0.
    B0,
    /// Byte 1.
    B1,
    /// Byte 2.
    B2,
    /// Byte 3.
    B3,
    /// Lower half in both lanes of a packed pair.
    H0H0,
    /// Upper half in both lanes of a packed pair.
    H1H1,
    /// Read as a single precision float.
    F32,
    /// 64 bit register pair.
    Wide,
}

/// Radix an integer literal was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Radix {
    Hex,
    Decimal,
}

/// An integer literal. Sign and magnitude are kept apart so the whole
/// unsigned 64 bit range remains representable.
///
/// The digits are kept as written, so `0x0004` and `0xFF` print unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntegerLiteral {
    pub(crate) negative: bool,
    /// Written with a leading `+`.
    pub(crate) explicit_plus: bool,
    pub(crate) magnitude: u64,
    pub(crate) radix: Radix,
    /// Without sign and `0x` prefix.
    pub(crate) digits: String,
}

/// A float literal, kept as written.
///
/// Besides ordinary decimals this includes `+INF`, `-INF`, `+QNAN`
/// and the `1.5.NEG` notation of older generations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FloatLiteral {
    pub(crate) text: String,
}

/// An immediate operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Immediate {
    Integer(IntegerLiteral),
    Float(FloatLiteral),
}

/// An address in brackets, i.e. `[R1+0x8]`, `[R2.64+R3]` or `[0x40]`.
///
/// At least one of `base` and `constant` is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryReference {
    pub base: Option<Register>,
    pub offset: Option<Register>,
    pub constant: Option<IntegerLiteral>,
}

/// Access to a constant bank, i.e. `c[0x0][0x160]` or `c[0x3][R2+0x10]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstantBank {
    pub bank: IntegerLiteral,
    pub address: MemoryReference,
    pub selector: Option<RegisterSuffix>,
}

/// Special registers like `SR_TID.X` or `SR_LANEID`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecialRegister {
    pub name: String,
    /// `X`, `Y` or `Z` for vector valued registers.
    pub component: Option<String>,
}

/// A predicate register, `P0`-`P7` or the always true `PT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateRegister {
    pub name: String,
    pub negated: bool,
    /// Written with the `%` sigil, i.e. `%P0`.
    pub sigil: bool,
}

/// The condition code register `CC` of Maxwell and Pascal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConditionCode {
    /// Tested condition, i.e. `NEU` in `CC.NEU`.
    pub condition: Option<String>,
}

/// A scoreboard, `SB0`-`SB5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencyBarrier {
    pub index: u8,
}

/// A set of scoreboards, i.e. the `{5,4}` in `DEPBAR {5,4}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BarrierMask {
    /// In source order.
    pub barriers: Vec<u8>,
}

/// Dimensionality of a texture access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum TextureDimension {
    _1D,
    _2D,
    _3D,
}

bitflags! {
    /// Channels fetched by a texture instruction, i.e. `RGBA`.
    pub struct TextureComponents: u8 {
        const R = 0b0001;
        const G = 0b0010;
        const B = 0b0100;
        const A = 0b1000;
    }
}

/// A `__fun_*` call target, as emitted for `JCAL` by simulator builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName {
    pub name: String,
}

/// Operators applied to a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum UnaryOp {
    /// `-x`
    Negate,
    /// `|x|`
    Absolute,
    /// `-|x|`
    NegateAbsolute,
    /// `~x`
    BitwiseNot,
}

/// A unary operator and its operand. The operand is never unary itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnaryOperand {
    pub op: UnaryOp,
    pub operand: Box<Operand>,
}

impl Statement {
    pub(crate) fn new(label: AddressLabel, instruction: Instruction) -> Self {
        Statement { label, instruction }
    }
    pub fn label(&self) -> &AddressLabel {
        &self.label
    }
    pub fn instruction(&self) -> &Instruction {
        &self.instruction
    }
    /// Split the statement into its parts.
    pub fn into_parts(self) -> (AddressLabel, Instruction) {
        (self.label, self.instruction)
    }
}

impl Instruction {
    pub(crate) fn new(
        mnemonic: impl Into<String>,
        modifiers: Vec<String>,
        predicate: Option<PredicateOperand>,
        arguments: Vec<Operand>,
    ) -> Self {
        Instruction {
            mnemonic: mnemonic.into(),
            modifiers,
            predicate,
            arguments,
        }
    }
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }
    /// Modifiers in source order, duplicates included.
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }
    /// Is the instruction guarded by a predicate?
    ///
    /// Always equal to `self.predicate().is_some()`.
    pub fn predicated(&self) -> bool {
        self.predicate.is_some()
    }
    pub fn predicate(&self) -> Option<&PredicateOperand> {
        self.predicate.as_ref()
    }
    /// Operands in source order.
    pub fn arguments(&self) -> &[Operand] {
        &self.arguments
    }
    /// Does the instruction carry the given modifier?
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

impl Register {
    /// A plain register without suffix or flags.
    pub fn new(name: impl Into<String>) -> Self {
        Register {
            name: name.into(),
            suffix: None,
            condition_code: false,
            reuse: false,
        }
    }
    /// Register number, `None` for `RZ`.
    pub fn index(&self) -> Option<u8> {
        self.name.strip_prefix('R')?.parse().ok()
    }
    /// Is this the zero register `RZ`?
    pub fn is_zero(&self) -> bool {
        self.name == "RZ"
    }
}

impl RegisterSuffix {
    /// The suffix as written after the dot.
    pub fn as_str(self) -> &'static str {
        match self {
            RegisterSuffix::H0 => "H0",
            RegisterSuffix::H1 => "H1",
            RegisterSuffix::B0 => "B0",
            RegisterSuffix::B1 => "B1",
            RegisterSuffix::B2 => "B2",
            RegisterSuffix::B3 => "B3",
            RegisterSuffix::H0H0 => "H0_H0",
            RegisterSuffix::H1H1 => "H1_H1",
            RegisterSuffix::F32 => "F32",
            RegisterSuffix::Wide => "64",
        }
    }
    /// Inverse of [`RegisterSuffix::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        let suffix = match name {
            "H0" => RegisterSuffix::H0,
            "H1" => RegisterSuffix::H1,
            "B0" => RegisterSuffix::B0,
            "B1" => RegisterSuffix::B1,
            "B2" => RegisterSuffix::B2,
            "B3" => RegisterSuffix::B3,
            "H0_H0" => RegisterSuffix::H0H0,
            "H1_H1" => RegisterSuffix::H1H1,
            "F32" => RegisterSuffix::F32,
            "64" => RegisterSuffix::Wide,
            _ => return None,
        };
        Some(suffix)
    }
}

impl IntegerLiteral {
    /// A literal spelled the way the disassembler prints it, lowercase
    /// hex without leading zeros.
    pub fn new(negative: bool, magnitude: u64, radix: Radix) -> Self {
        let digits = match radix {
            Radix::Hex => format!("{:x}", magnitude),
            Radix::Decimal => magnitude.to_string(),
        };
        IntegerLiteral {
            negative,
            explicit_plus: false,
            magnitude,
            radix,
            digits,
        }
    }
    pub fn hex(value: i64) -> Self {
        IntegerLiteral::new(value < 0, value.unsigned_abs(), Radix::Hex)
    }
    pub fn decimal(value: i64) -> Self {
        IntegerLiteral::new(value < 0, value.unsigned_abs(), Radix::Decimal)
    }
    /// Mark a non negative literal as written with a leading `+`.
    pub fn with_plus(self) -> Self {
        IntegerLiteral {
            explicit_plus: !self.negative,
            ..self
        }
    }
    pub fn is_negative(&self) -> bool {
        self.negative
    }
    pub fn has_explicit_plus(&self) -> bool {
        self.explicit_plus
    }
    pub fn magnitude(&self) -> u64 {
        self.magnitude
    }
    pub fn radix(&self) -> Radix {
        self.radix
    }
    /// The digits as written, without sign and radix prefix.
    pub fn digits(&self) -> &str {
        &self.digits
    }
    /// The signed value.
    pub fn value(&self) -> i128 {
        if self.negative {
            -i128::from(self.magnitude)
        } else {
            i128::from(self.magnitude)
        }
    }
}

impl FloatLiteral {
    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }
    /// The numeric value.
    pub fn value(&self) -> f64 {
        let (text, negate) = match self.text.strip_suffix(".NEG") {
            Some(text) => (text, true),
            None => (self.text.as_str(), false),
        };
        let value = match text {
            "+INF" => f64::INFINITY,
            "-INF" => f64::NEG_INFINITY,
            "+QNAN" | "-QNAN" => f64::NAN,
            // The parser only creates valid float texts
            _ => text.parse().unwrap_or(f64::NAN),
        };
        if negate {
            -value
        } else {
            value
        }
    }
}

impl Immediate {
    pub fn hex(value: i64) -> Self {
        Immediate::Integer(IntegerLiteral::hex(value))
    }
    pub fn decimal(value: i64) -> Self {
        Immediate::Integer(IntegerLiteral::decimal(value))
    }
    /// The value of an integer immediate.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Immediate::Integer(literal) => Some(literal.value()),
            Immediate::Float(_) => None,
        }
    }
    /// The value of the immediate as a float.
    pub fn as_float(&self) -> f64 {
        match self {
            Immediate::Integer(literal) => literal.value() as f64,
            Immediate::Float(literal) => literal.value(),
        }
    }
}

impl MemoryReference {
    /// `[base]`
    pub fn register(base: Register) -> Self {
        MemoryReference {
            base: Some(base),
            offset: None,
            constant: None,
        }
    }
    /// `[constant]`
    pub fn absolute(constant: IntegerLiteral) -> Self {
        MemoryReference {
            base: None,
            offset: None,
            constant: Some(constant),
        }
    }
}

impl SpecialRegister {
    pub fn new(name: impl Into<String>) -> Self {
        SpecialRegister {
            name: name.into(),
            component: None,
        }
    }
}

impl PredicateRegister {
    pub fn new(name: impl Into<String>) -> Self {
        PredicateRegister {
            name: name.into(),
            negated: false,
            sigil: false,
        }
    }
    pub fn negated(name: impl Into<String>) -> Self {
        PredicateRegister {
            negated: true,
            ..PredicateRegister::new(name)
        }
    }
    /// The same register written as `%P0`.
    pub fn with_sigil(self) -> Self {
        PredicateRegister {
            sigil: true,
            ..self
        }
    }
    /// Predicate number, `None` for `PT`.
    pub fn index(&self) -> Option<u8> {
        self.name.strip_prefix('P')?.parse().ok()
    }
    /// Is this the always true predicate `PT`?
    pub fn is_true(&self) -> bool {
        self.name == "PT"
    }
}

impl TextureDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            TextureDimension::_1D => "1D",
            TextureDimension::_2D => "2D",
            TextureDimension::_3D => "3D",
        }
    }
}

impl TextureComponents {
    /// Parse a channel mask. Channels have to appear in `RGBA` order
    /// and at most once.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut components = TextureComponents::empty();
        let mut last = TextureComponents::empty();
        for c in name.chars() {
            let component = match c {
                'R' => TextureComponents::R,
                'G' => TextureComponents::G,
                'B' => TextureComponents::B,
                'A' => TextureComponents::A,
                _ => return None,
            };
            if component.bits() <= last.bits() {
                return None;
            }
            components |= component;
            last = component;
        }
        if components.is_empty() {
            None
        } else {
            Some(components)
        }
    }
}
