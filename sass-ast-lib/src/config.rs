//! Parser configuration.
//!
//! The literal and register syntax accepted by the parser differs slightly
//! between hardware generations. Pick the generation the disassembly was
//! produced for with the [`ParserConfigBuilder`]:
//!
//! ```
//! # use sass_ast_lib::config::{Architecture, ParserConfigBuilder};
//! let config = ParserConfigBuilder::default()
//!     .with_architecture(Architecture::Sm70)
//!     .build()
//!     .expect("All fields have defaults");
//! assert_eq!(config.architecture, Architecture::Sm70);
//! ```
use derive_builder::Builder;
#[cfg(test)]
use proptest_derive::Arbitrary;
use thiserror::Error;

use std::{fmt, str::FromStr};

/// Supported hardware generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Architecture {
    /// Maxwell, `sm_55`.
    Sm55,
    /// Pascal, `sm_61`.
    Sm61,
    /// Volta, `sm_70`.
    Sm70,
}

/// The default architecture. It accepts the widest literal syntax.
const DEFAULT_ARCHITECTURE: Architecture = Architecture::Sm61;

impl Architecture {
    /// Does this generation have the `CC` condition code register
    /// (and the `.CC` register suffix)?
    pub fn has_condition_codes(self) -> bool {
        self < Architecture::Sm70
    }
    /// Does the disassembler print negative float immediates as `n.NEG`?
    pub fn has_neg_float_suffix(self) -> bool {
        self < Architecture::Sm70
    }
}

impl Default for Architecture {
    fn default() -> Self {
        DEFAULT_ARCHITECTURE
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Architecture::Sm55 => "sm_55",
            Architecture::Sm61 => "sm_61",
            Architecture::Sm70 => "sm_70",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown architecture '{0}'. Expected one of sm_55, sm_61, sm_70")]
pub struct UnknownArchitecture(pub String);

impl FromStr for Architecture {
    type Err = UnknownArchitecture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sm_55" | "55" => Ok(Architecture::Sm55),
            "sm_61" | "61" => Ok(Architecture::Sm61),
            "sm_70" | "70" => Ok(Architecture::Sm70),
            _ => Err(UnknownArchitecture(s.into())),
        }
    }
}

/// Configuration for [`Statement::build_with`](crate::ast::Statement::build_with).
#[derive(Debug, Clone, PartialEq, Eq, Default, Builder)]
#[builder(setter(prefix = "with"), default)]
pub struct ParserConfig {
    /// The generation whose syntax is accepted.
    pub architecture: Architecture,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn default_config() {
        let config = ParserConfigBuilder::default()
            .build()
            .expect("All fields have defaults");
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.architecture, Architecture::Sm61);
    }

    #[test]
    fn parse_architecture() {
        assert_eq!("sm_55".parse(), Ok(Architecture::Sm55));
        assert_eq!("SM_61".parse(), Ok(Architecture::Sm61));
        assert_eq!("70".parse(), Ok(Architecture::Sm70));
        assert_eq!(
            "sm_75".parse::<Architecture>(),
            Err(UnknownArchitecture("sm_75".into()))
        );
    }

    #[test]
    fn volta_dropped_condition_codes() {
        assert!(Architecture::Sm55.has_condition_codes());
        assert!(Architecture::Sm61.has_condition_codes());
        assert!(!Architecture::Sm70.has_condition_codes());
        assert!(!Architecture::Sm70.has_neg_float_suffix());
    }

    proptest! {
        #[test]
        fn display_parses_back(arch: Architecture) {
            let displayed = arch.to_string();
            assert_eq!(displayed.parse(), Ok(arch));
        }
    }
}
