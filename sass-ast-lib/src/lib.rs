// XXX: proptest causes issues with clippy
#![allow(clippy::unit_arg)]
//! Parser for single lines of NVIDIA SASS disassembly.
//!
//! Every line is turned into a [`Statement`](ast::Statement) holding
//! an [`Instruction`](ast::Instruction) with its mnemonic, modifiers,
//! predicate guard and typed operands.
//!
//! # Example
//! ```
//! use sass_ast_lib::ast::{Operand, Statement};
//!
//! let statement = Statement::build(0x0010u64, "LD R0, [R1+0x8]").expect("Valid line");
//! match &statement.instruction().arguments()[1] {
//!     Operand::MemoryReference(mem) => {
//!         assert_eq!(mem.base.as_ref().and_then(|r| r.index()), Some(1));
//!         assert_eq!(mem.constant.as_ref().map(|c| c.value()), Some(8));
//!     }
//!     other => panic!("Unexpected operand {}", other),
//! }
//! assert_eq!(statement.to_string(), "0x0010: LD R0, [R1+0x8]");
//! ```

pub mod ast;
pub mod config;
pub mod parser;
