use pad::PadStr;

use std::fmt;

use super::*;

impl fmt::Display for AddressLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddressLabel::Address(addr) => write!(f, "0x{:04x}", addr),
            AddressLabel::Name(name) => write!(f, "{}", name),
        }
    }
}

/// `label: instruction`, or with `{:#}` a listing line with a padded label.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            let label = format!("{}:", self.label).pad_to_width(LABEL_WIDTH);
            write!(f, "{} {}", label, self.instruction)
        } else {
            write!(f, "{}: {}", self.label, self.instruction)
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(predicate) = &self.predicate {
            write!(f, "@{} ", predicate)?;
        }
        write!(f, "{}", self.mnemonic)?;
        for modifier in &self.modifiers {
            write!(f, ".{}", modifier)?;
        }
        for (idx, argument) in self.arguments.iter().enumerate() {
            let sep = if idx == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, argument)?;
        }
        Ok(())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{}", reg),
            Operand::Immediate(imm) => write!(f, "{}", imm),
            Operand::MemoryReference(mem) => write!(f, "{}", mem),
            Operand::ConstantBank(bank) => write!(f, "{}", bank),
            Operand::SpecialRegister(sreg) => write!(f, "{}", sreg),
            Operand::PredicateRegister(pred) => write!(f, "{}", pred),
            Operand::ConditionCode(cc) => write!(f, "{}", cc),
            Operand::DependencyBarrier(sb) => write!(f, "{}", sb),
            Operand::BarrierMask(mask) => write!(f, "{}", mask),
            Operand::TextureDimension(dim) => write!(f, "{}", dim),
            Operand::TextureComponents(components) => write!(f, "{}", components),
            Operand::FunctionName(function) => write!(f, "{}", function),
            Operand::Unary(unary) => write!(f, "{}", unary),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(suffix) = self.suffix {
            write!(f, ".{}", suffix)?;
        }
        if self.condition_code {
            write!(f, ".CC")?;
        }
        if self.reuse {
            write!(f, ".reuse")?;
        }
        Ok(())
    }
}

impl fmt::Display for RegisterSuffix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.negative {
            "-"
        } else if self.explicit_plus {
            "+"
        } else {
            ""
        };
        let prefix = match self.radix {
            Radix::Hex => "0x",
            Radix::Decimal => "",
        };
        write!(f, "{}{}{}", sign, prefix, self.digits)
    }
}

impl fmt::Display for FloatLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Immediate::Integer(literal) => write!(f, "{}", literal),
            Immediate::Float(literal) => write!(f, "{}", literal),
        }
    }
}

impl fmt::Display for MemoryReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        if let Some(base) = &self.base {
            write!(f, "{}", base)?;
        }
        if let Some(offset) = &self.offset {
            write!(f, "+{}", offset)?;
        }
        match (&self.base, &self.constant) {
            (Some(_), Some(constant)) => write!(f, "+{}", constant)?,
            (None, Some(constant)) => write!(f, "{}", constant)?,
            (_, None) => {}
        }
        write!(f, "]")
    }
}

impl fmt::Display for ConstantBank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "c[{}]{}", self.bank, self.address)?;
        if let Some(selector) = self.selector {
            write!(f, ".{}", selector)?;
        }
        Ok(())
    }
}

impl fmt::Display for SpecialRegister {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(component) = &self.component {
            write!(f, ".{}", component)?;
        }
        Ok(())
    }
}

impl fmt::Display for PredicateRegister {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        if self.sigil {
            write!(f, "%")?;
        }
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "CC.{}", condition),
            None => write!(f, "CC"),
        }
    }
}

impl fmt::Display for DependencyBarrier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SB{}", self.index)
    }
}

impl fmt::Display for BarrierMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let barriers: Vec<_> = self.barriers.iter().map(u8::to_string).collect();
        write!(f, "{{{}}}", barriers.join(","))
    }
}

impl fmt::Display for TextureDimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TextureComponents {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let channels = [
            (TextureComponents::R, 'R'),
            (TextureComponents::G, 'G'),
            (TextureComponents::B, 'B'),
            (TextureComponents::A, 'A'),
        ];
        for (component, c) in channels.iter() {
            if self.contains(*component) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for UnaryOperand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op {
            UnaryOp::Negate => write!(f, "-{}", self.operand),
            UnaryOp::Absolute => write!(f, "|{}|", self.operand),
            UnaryOp::NegateAbsolute => write!(f, "-|{}|", self.operand),
            UnaryOp::BitwiseNot => write!(f, "~{}", self.operand),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::ast::*;

    macro_rules! s {
        ($val:expr, $expect:expr) => {
            let formatted = format!("{}", $val);
            assert_eq!(
                formatted,
                $expect.to_string(),
                "{:#?} did not match {:#?}",
                $val,
                $expect
            );
        };
    }

    fn reg(name: &str) -> Register {
        Register::new(name)
    }

    #[test]
    fn test_display_label() {
        s!(AddressLabel::Address(0x10), "0x0010");
        s!(AddressLabel::Address(0x1f80), "0x1f80");
        s!(AddressLabel::Name("entry".into()), "entry");
    }

    #[test]
    fn test_display_register() {
        s!(reg("R0"), "R0");
        s!(reg("RZ"), "RZ");
        s!(
            Register {
                suffix: Some(RegisterSuffix::H1),
                reuse: true,
                ..reg("R2")
            },
            "R2.H1.reuse"
        );
        s!(
            Register {
                suffix: Some(RegisterSuffix::Wide),
                ..reg("R4")
            },
            "R4.64"
        );
        s!(
            Register {
                condition_code: true,
                ..reg("R7")
            },
            "R7.CC"
        );
    }

    #[test]
    fn test_display_immediate() {
        s!(Immediate::hex(4), "0x4");
        s!(Immediate::hex(0xff), "0xff");
        s!(Immediate::hex(-8), "-0x8");
        s!(Immediate::decimal(17), "17");
        s!(Immediate::decimal(-3), "-3");
        s!(
            IntegerLiteral::new(false, u64::MAX, Radix::Hex),
            "0xffffffffffffffff"
        );
        s!(IntegerLiteral::decimal(4).with_plus(), "+4");
        s!(IntegerLiteral::hex(-4).with_plus(), "-0x4");
        let padded = IntegerLiteral {
            digits: "00FF".into(),
            ..IntegerLiteral::hex(0xff)
        };
        s!(padded, "0x00FF");
    }

    #[test]
    fn test_display_memory_reference() {
        s!(MemoryReference::register(reg("R1")), "[R1]");
        s!(
            MemoryReference {
                constant: Some(IntegerLiteral::hex(8)),
                ..MemoryReference::register(reg("R1"))
            },
            "[R1+0x8]"
        );
        s!(
            MemoryReference {
                offset: Some(reg("R3")),
                constant: Some(IntegerLiteral::hex(-16)),
                ..MemoryReference::register(reg("R2"))
            },
            "[R2+R3+-0x10]"
        );
        s!(MemoryReference::absolute(IntegerLiteral::hex(0x40)), "[0x40]");
    }

    #[test]
    fn test_display_constant_bank() {
        s!(
            ConstantBank {
                bank: IntegerLiteral::hex(0),
                address: MemoryReference::absolute(IntegerLiteral::hex(0x160)),
                selector: None,
            },
            "c[0x0][0x160]"
        );
        s!(
            ConstantBank {
                bank: IntegerLiteral::hex(3),
                address: MemoryReference {
                    constant: Some(IntegerLiteral::hex(0x10)),
                    ..MemoryReference::register(reg("R2"))
                },
                selector: Some(RegisterSuffix::H1),
            },
            "c[0x3][R2+0x10].H1"
        );
    }

    #[test]
    fn test_display_misc_operands() {
        s!(PredicateRegister::new("PT"), "PT");
        s!(PredicateRegister::negated("P3"), "!P3");
        s!(PredicateRegister::negated("P3").with_sigil(), "!%P3");
        s!(
            FunctionName {
                name: "__fun_exit".into()
            },
            "__fun_exit"
        );
        s!(
            SpecialRegister {
                name: "SR_TID".into(),
                component: Some("X".into()),
            },
            "SR_TID.X"
        );
        s!(ConditionCode { condition: None }, "CC");
        s!(
            ConditionCode {
                condition: Some("NEU".into())
            },
            "CC.NEU"
        );
        s!(DependencyBarrier { index: 5 }, "SB5");
        s!(
            BarrierMask {
                barriers: vec![4, 3, 2]
            },
            "{4,3,2}"
        );
        s!(TextureDimension::_2D, "2D");
        s!(TextureComponents::R | TextureComponents::A, "RA");
        s!(TextureComponents::all(), "RGBA");
    }

    #[test]
    fn test_display_unary() {
        let r2 = Box::new(Operand::Register(reg("R2")));
        let unary = |op| UnaryOperand {
            op,
            operand: r2.clone(),
        };
        s!(unary(UnaryOp::Negate), "-R2");
        s!(unary(UnaryOp::Absolute), "|R2|");
        s!(unary(UnaryOp::NegateAbsolute), "-|R2|");
        s!(unary(UnaryOp::BitwiseNot), "~R2");
    }

    #[test]
    fn test_display_instruction() {
        s!(Instruction::new("EXIT", vec![], None, vec![]), "EXIT");
        s!(
            Instruction::new(
                "IADD",
                vec![],
                Some(PredicateRegister::new("P0").with_sigil()),
                vec![reg("R2").into(), reg("R2").into(), Immediate::hex(4).into()]
            ),
            "@%P0 IADD R2, R2, 0x4"
        );
        s!(
            Instruction::new("BRA", vec![], Some(PredicateRegister::new("P0")), vec![]),
            "@P0 BRA"
        );
        s!(
            Instruction::new(
                "ISETP",
                vec!["GE".into(), "AND".into()],
                Some(PredicateRegister::negated("P1").with_sigil()),
                vec![
                    PredicateRegister::new("P2").into(),
                    PredicateRegister::new("PT").into(),
                    reg("R0").into(),
                    reg("R1").into(),
                    PredicateRegister::new("PT").into(),
                ]
            ),
            "@!%P1 ISETP.GE.AND P2, PT, R0, R1, PT"
        );
    }

    #[test]
    fn test_display_statement() {
        let statement = Statement::new(
            AddressLabel::Address(0x10),
            Instruction::new("MOV", vec![], None, vec![reg("R0").into(), reg("R1").into()]),
        );
        s!(statement, "0x0010: MOV R0, R1");
        assert_eq!(format!("{:#}", statement), "0x0010:    MOV R0, R1");
    }
}
