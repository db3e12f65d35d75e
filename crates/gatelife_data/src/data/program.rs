use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registers available to the default execution unit.
pub const NUM_REGISTERS: usize = 4;

/// One instruction of the default linear genetic program.
///
/// Register operands are taken modulo [`NUM_REGISTERS`] when executed, so any
/// byte is a valid operand and mutation never produces an invalid program.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Archive,
    RkyvSerialize,
    RkyvDeserialize,
)]
#[archive(check_bytes)]
#[archive_attr(derive(Debug, PartialEq, Eq))]
pub enum Instruction {
    Nop,
    /// Read an environment input into a register and the input window.
    Input(u8),
    /// Submit a register as a candidate output.
    Output(u8),
    Not(u8),
    Nand(u8, u8, u8),
    And(u8, u8, u8),
    Or(u8, u8, u8),
    Xor(u8, u8, u8),
    Set(u8, bool),
    Copy(u8, u8),
    /// Skip the next instruction when the register reads false.
    SkipIfFalse(u8),
}

impl Instruction {
    /// Number of distinct opcodes.
    pub const OPCODES: u8 = 11;

    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Nop => "nop",
            Self::Input(_) => "input",
            Self::Output(_) => "output",
            Self::Not(_) => "not",
            Self::Nand(..) => "nand",
            Self::And(..) => "and",
            Self::Or(..) => "or",
            Self::Xor(..) => "xor",
            Self::Set(..) => "set",
            Self::Copy(..) => "copy",
            Self::SkipIfFalse(_) => "skip-if-false",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.mnemonic();
        match *self {
            Self::Nop => write!(f, "{m}"),
            Self::Input(r) | Self::Output(r) | Self::Not(r) | Self::SkipIfFalse(r) => {
                write!(f, "{m} r{r}")
            }
            Self::Nand(a, b, d) | Self::And(a, b, d) | Self::Or(a, b, d) | Self::Xor(a, b, d) => {
                write!(f, "{m} r{a} r{b} -> r{d}")
            }
            Self::Set(r, bit) => write!(f, "{m} r{r} {}", u8::from(bit)),
            Self::Copy(s, d) => write!(f, "{m} r{s} -> r{d}"),
        }
    }
}
