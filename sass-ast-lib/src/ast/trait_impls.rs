use super::*;

impl From<u64> for AddressLabel {
    fn from(address: u64) -> Self {
        AddressLabel::Address(address)
    }
}

impl From<&str> for AddressLabel {
    fn from(name: &str) -> Self {
        AddressLabel::Name(name.into())
    }
}

impl From<String> for AddressLabel {
    fn from(name: String) -> Self {
        AddressLabel::Name(name)
    }
}

impl From<IntegerLiteral> for Immediate {
    fn from(literal: IntegerLiteral) -> Self {
        Immediate::Integer(literal)
    }
}

impl From<FloatLiteral> for Immediate {
    fn from(literal: FloatLiteral) -> Self {
        Immediate::Float(literal)
    }
}

impl From<Register> for MemoryReference {
    fn from(base: Register) -> Self {
        MemoryReference::register(base)
    }
}

impl From<Register> for Operand {
    fn from(reg: Register) -> Self {
        Operand::Register(reg)
    }
}

impl From<Immediate> for Operand {
    fn from(imm: Immediate) -> Self {
        Operand::Immediate(imm)
    }
}

impl From<MemoryReference> for Operand {
    fn from(mem: MemoryReference) -> Self {
        Operand::MemoryReference(mem)
    }
}

impl From<ConstantBank> for Operand {
    fn from(bank: ConstantBank) -> Self {
        Operand::ConstantBank(bank)
    }
}

impl From<SpecialRegister> for Operand {
    fn from(sreg: SpecialRegister) -> Self {
        Operand::SpecialRegister(sreg)
    }
}

impl From<PredicateRegister> for Operand {
    fn from(pred: PredicateRegister) -> Self {
        Operand::PredicateRegister(pred)
    }
}

impl From<FunctionName> for Operand {
    fn from(function: FunctionName) -> Self {
        Operand::FunctionName(function)
    }
}

impl From<ConditionCode> for Operand {
    fn from(cc: ConditionCode) -> Self {
        Operand::ConditionCode(cc)
    }
}

impl From<DependencyBarrier> for Operand {
    fn from(sb: DependencyBarrier) -> Self {
        Operand::DependencyBarrier(sb)
    }
}

impl From<BarrierMask> for Operand {
    fn from(mask: BarrierMask) -> Self {
        Operand::BarrierMask(mask)
    }
}

impl From<TextureDimension> for Operand {
    fn from(dim: TextureDimension) -> Self {
        Operand::TextureDimension(dim)
    }
}

impl From<TextureComponents> for Operand {
    fn from(components: TextureComponents) -> Self {
        Operand::TextureComponents(components)
    }
}

impl From<UnaryOperand> for Operand {
    fn from(unary: UnaryOperand) -> Self {
        Operand::Unary(unary)
    }
}

impl From<Statement> for Instruction {
    fn from(statement: Statement) -> Self {
        statement.instruction
    }
}

impl<'a> IntoIterator for &'a Instruction {
    type Item = &'a Operand;
    type IntoIter = std::slice::Iter<'a, Operand>;

    fn into_iter(self) -> Self::IntoIter {
        self.arguments.iter()
    }
}
