use std::error::Error;
use std::fmt::{Display, Formatter};

/**
  Reasons a word fails to decode. Each field-level variant carries the raw code that was
  found in the flag block. Decoding stops at the first error, so exactly one is reported
  per word, checked in the order: high bit, `op1_src`, `pc_update`, `res_logic`, `opcode`,
  `ap_update`.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DecodeError {
  /// Bit 63 of the word is set.
  NonZeroHighBit,
  InvalidOperand1Register(u8),
  InvalidPcUpdate(u8),
  InvalidResLogic(u8),
  InvalidOpcode(u8),
  InvalidApUpdate(u8),
}

impl Display for DecodeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      DecodeError::NonZeroHighBit => {
        write!(f, "Instruction high bit was not set to zero")
      }

      DecodeError::InvalidOperand1Register(code) => {
        write!(f, "Invalid op1_src code: {}", code)
      }

      DecodeError::InvalidPcUpdate(code) => {
        write!(f, "Invalid pc_update code: {}", code)
      }

      DecodeError::InvalidResLogic(code) => {
        write!(f, "Invalid res_logic code: {}", code)
      }

      DecodeError::InvalidOpcode(code) => {
        write!(f, "Invalid opcode code: {}", code)
      }

      DecodeError::InvalidApUpdate(code) => {
        write!(f, "Invalid ap_update code: {}", code)
      }

    }
  }
}

impl Error for DecodeError {}

/// Reasons a bytecode listing fails to parse. Lines are numbered from 1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ListingError {
  /// The line holds something other than one word and an optional comment.
  Syntax {
    line: usize,
    text: String
  },
  /// The token is not a hexadecimal number or does not fit in 64 bits.
  InvalidWord {
    line: usize,
    text: String
  },
}

impl Display for ListingError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ListingError::Syntax { line, text } => {
        write!(f, "Error on line {}: expected a single word, found `{}`.", line, text)
      }
      ListingError::InvalidWord { line, text } => {
        write!(f, "Error on line {}: `{}` is not a 64 bit hexadecimal word.", line, text)
      }
    }
  }
}

impl Error for ListingError {}
