use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

/*
  Enums with a fixed wire code carry that code as their discriminant, so that
  `TryFrom<u8>` is the flag table itself. A code outside the closed set has no variant
  and is rejected by `try_from`.

  `Res`, `ApUpdate` and `FpUpdate` have variants with no wire code of their own. They are
  resolved from other fields in `super::flags`.
*/

/// One of the two addressable registers. Selected by a single bit, so every code is legal.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Register {
  AP = 0, // Allocation pointer
  FP = 1, // Frame pointer
}

/// Source of the second operand.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Op1Addr {
  Op0 = 0, // [op0 + off2]
  Imm = 1, // [pc + off2], the word following the instruction
  FP  = 2, // [fp + off2]
  AP  = 4, // [ap + off2]
}

/// How the program counter moves after the instruction.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum PcUpdate {
  Regular = 0,
  Jump    = 1,
  JumpRel = 2,
  Jnz     = 4,
}

/// Instruction class.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Opcode {
  NOp      = 0,
  Call     = 1,
  Ret      = 2,
  AssertEq = 4,
}

/// How the result is computed from the operands.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq, PartialEq,  Debug, Hash
)]
pub enum Res {
  Op1,
  Add,
  Mul,
  /// Only produced for `jnz`, whose result is never computed.
  Unconstrained,
}

#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq, PartialEq,  Debug, Hash
)]
pub enum ApUpdate {
  Regular,
  Add,
  Add1,
  Add2,
}

/// Never read from the word; see `FpUpdate::from(Opcode)`.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq, PartialEq,  Debug, Hash
)]
pub enum FpUpdate {
  Regular,
  APPlus2,
  Dst,
}

/**
  Wire codes of the `res_logic` field. Code 0 has no meaning on its own: it becomes
  `Res::Unconstrained` or `Res::Op1` depending on the decoded `pc_update`.
*/
#[derive(TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum ResLogicCode {
  Implied = 0,
  Add     = 1,
  Mul     = 2,
}

/**
  Wire codes of the `ap_update` field. Code 0 becomes `ApUpdate::Add2` for a call and
  `ApUpdate::Regular` otherwise.
*/
#[derive(TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum ApUpdateCode {
  Implied = 0,
  Add     = 1,
  Add1    = 2,
}

impl Register {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

impl Op1Addr {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

impl PcUpdate {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

impl From<Opcode> for FpUpdate {
  fn from(opcode: Opcode) -> FpUpdate {
    match opcode {
      Opcode::Call => FpUpdate::APPlus2,
      Opcode::Ret  => FpUpdate::Dst,
      Opcode::NOp
      | Opcode::AssertEq => FpUpdate::Regular,
    }
  }
}

/**
  A fully decoded instruction. It is produced once per decode and holds no reference to
  the word it came from. Offsets are already unbiased.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Instruction {
  pub off0         : i16,
  pub off1         : i16,
  pub off2         : i16,
  pub dst_register : Register,
  pub op0_register : Register,
  pub op1_addr     : Op1Addr,
  pub res          : Res,
  pub pc_update    : PcUpdate,
  pub ap_update    : ApUpdate,
  pub fp_update    : FpUpdate,
  pub opcode       : Opcode,
}

impl Instruction {
  /// Size in words, counting the immediate that follows the instruction if there is one.
  pub fn size(&self) -> usize {
    match self.op1_addr {
      Op1Addr::Imm => 2,
      _            => 1
    }
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} off=({}, {}, {}) dst={} op0={} op1={} res={} pc={} ap={} fp={}",
      self.opcode,
      self.off0, self.off1, self.off2,
      self.dst_register, self.op0_register, self.op1_addr,
      self.res, self.pc_update, self.ap_update, self.fp_update
    )
  }
}
