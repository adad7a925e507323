/*!
  This module is responsible for the decoding of binary instructions: splitting the word
  into its fields, unbiasing the offsets, and assembling the decoded `Instruction`.

*/

use super::{DecodeError, Instruction};
use super::flags;

pub type EncodedInstruction = u64;
pub type RawOffset = u16;

// If you change any of these you must also change the layout table in `bytecode/mod.rs`.
const HIGH_BIT_MASK : EncodedInstruction = 1 << 63;
const OFF0_SHIFT    : EncodedInstruction = 0;
const OFF1_SHIFT    : EncodedInstruction = 16;
const OFF2_SHIFT    : EncodedInstruction = 32;
const FLAGS_SHIFT   : EncodedInstruction = 48;
const LANE_MASK     : EncodedInstruction = 0xFFFF;

// (mask, shift) pairs relative to the 16 bit flag block.
const DST_REG   : (u16, u16) = (0x0001,  0);
const OP0_REG   : (u16, u16) = (0x0002,  1);
const OP1_SRC   : (u16, u16) = (0x001C,  2);
const RES_LOGIC : (u16, u16) = (0x0060,  5);
const PC_UPDATE : (u16, u16) = (0x0380,  7);
const AP_UPDATE : (u16, u16) = (0x0C00, 10);
const OPCODE    : (u16, u16) = (0x7000, 12);

/// The upper 16 bits of an encoded instruction. The accessors return raw codes and do not
/// validate them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FlagBlock(pub u16);

impl FlagBlock {
  fn field(&self, (mask, shift): (u16, u16)) -> u8 {
    ((self.0 & mask) >> shift) as u8
  }

  pub fn dst_reg(&self)   -> u8 { self.field(DST_REG) }
  pub fn op0_reg(&self)   -> u8 { self.field(OP0_REG) }
  pub fn op1_src(&self)   -> u8 { self.field(OP1_SRC) }
  pub fn res_logic(&self) -> u8 { self.field(RES_LOGIC) }
  pub fn pc_update(&self) -> u8 { self.field(PC_UPDATE) }
  pub fn ap_update(&self) -> u8 { self.field(AP_UPDATE) }
  pub fn opcode(&self)    -> u8 { self.field(OPCODE) }
}

/// The four 16 bit lanes of an encoded instruction, before any interpretation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RawFields {
  pub off0  : RawOffset,
  pub off1  : RawOffset,
  pub off2  : RawOffset,
  pub flags : FlagBlock,
}

/// Slices `word` into its lanes. Lane 0 is the least significant.
pub fn split_word(word: EncodedInstruction) -> RawFields {
  RawFields {
    off0  : ((word >> OFF0_SHIFT) & LANE_MASK) as RawOffset,
    off1  : ((word >> OFF1_SHIFT) & LANE_MASK) as RawOffset,
    off2  : ((word >> OFF2_SHIFT) & LANE_MASK) as RawOffset,
    flags : FlagBlock(((word >> FLAGS_SHIFT) & LANE_MASK) as u16),
  }
}

/**
  Offsets are stored biased by `0x8000`, so that `0x8000` is zero, `0x7FFF` is -1 and
  `0x8001` is 1. Every 16 bit value is a legal offset.
*/
pub fn decode_offset(raw: RawOffset) -> i16 {
  raw.wrapping_sub(0x8000) as i16
}

/**
  Decodes a single instruction word. Fails on a set high bit before looking at anything
  else, and otherwise with the error of the first invalid flag field.
*/
pub fn decode_instruction(word: EncodedInstruction) -> Result<Instruction, DecodeError> {
  if word & HIGH_BIT_MASK != 0 {
    #[cfg(feature = "trace_decoding")] println!("decode({:#018x}): high bit set", word);
    return Err(DecodeError::NonZeroHighBit);
  }

  let raw = split_word(word);
  #[cfg(feature = "trace_decoding")] println!("decode({:#018x}): {:?}", word, raw);

  let decoded = flags::decode_flags(raw.flags).map(|decoded_flags| {
    Instruction {
      off0         : decode_offset(raw.off0),
      off1         : decode_offset(raw.off1),
      off2         : decode_offset(raw.off2),
      dst_register : decoded_flags.dst_register,
      op0_register : decoded_flags.op0_register,
      op1_addr     : decoded_flags.op1_addr,
      res          : decoded_flags.res,
      pc_update    : decoded_flags.pc_update,
      ap_update    : decoded_flags.ap_update,
      fp_update    : decoded_flags.fp_update,
      opcode       : decoded_flags.opcode,
    }
  });

  #[cfg(feature = "trace_decoding")]
    {
      match &decoded {
        Ok(instruction) => println!("  -> {}", instruction),
        Err(e)          => println!("  -> {}", e),
      }
    }

  decoded
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::{ApUpdate, FpUpdate, Op1Addr, Opcode, PcUpdate, Register, Res};

  fn word(flags: u16, off0: u16, off1: u16, off2: u16) -> EncodedInstruction {
    ((flags as u64) << 48) | ((off2 as u64) << 32) | ((off1 as u64) << 16) | off0 as u64
  }

  #[test]
  fn offset_examples(){
    assert_eq!(decode_offset(0x8000), 0);
    assert_eq!(decode_offset(0x7FFF), -1);
    assert_eq!(decode_offset(0x8001), 1);
    assert_eq!(decode_offset(0x0000), i16::min_value());
    assert_eq!(decode_offset(0xFFFF), i16::max_value());
  }

  #[test]
  fn offset_is_unbiased_for_every_value(){
    for raw in 0..=u16::max_value() {
      assert_eq!(decode_offset(raw) as i32, raw as i32 - 0x8000);
    }
  }

  #[test]
  fn split_lanes(){
    let raw = split_word(0x14A7_8001_8000_7FFF);
    assert_eq!(raw.off0, 0x7FFF);
    assert_eq!(raw.off1, 0x8000);
    assert_eq!(raw.off2, 0x8001);
    assert_eq!(raw.flags, FlagBlock(0x14A7));
  }

  #[test]
  fn flag_block_fields(){
    let flags = FlagBlock(0x14A7);
    assert_eq!(flags.dst_reg(), 1);
    assert_eq!(flags.op0_reg(), 1);
    assert_eq!(flags.op1_src(), 1);
    assert_eq!(flags.res_logic(), 1);
    assert_eq!(flags.pc_update(), 1);
    assert_eq!(flags.ap_update(), 1);
    assert_eq!(flags.opcode(), 1);

    let flags = FlagBlock(0x7FFF);
    assert_eq!(flags.op1_src(), 7);
    assert_eq!(flags.res_logic(), 3);
    assert_eq!(flags.pc_update(), 7);
    assert_eq!(flags.ap_update(), 3);
    assert_eq!(flags.opcode(), 7);
  }

  #[test]
  fn high_bit_rejected_regardless_of_other_bits(){
    for low in [0u64, 0x14A7_8000_8000_8000, 0x7FFF_FFFF_FFFF_FFFF, 0x0000_8000_8000_8000].iter() {
      assert_eq!(decode_instruction(HIGH_BIT_MASK | low), Err(DecodeError::NonZeroHighBit));
    }
  }

  #[test]
  fn decode_call_vector(){
    let instruction = decode_instruction(0x14A7800080008000).unwrap();
    assert_eq!(instruction.off0, 0);
    assert_eq!(instruction.off1, 0);
    assert_eq!(instruction.off2, 0);
    assert_eq!(instruction.dst_register, Register::FP);
    assert_eq!(instruction.op0_register, Register::FP);
    assert_eq!(instruction.op1_addr, Op1Addr::Imm);
    assert_eq!(instruction.res, Res::Add);
    assert_eq!(instruction.pc_update, PcUpdate::Jump);
    assert_eq!(instruction.ap_update, ApUpdate::Add);
    assert_eq!(instruction.opcode, Opcode::Call);
    assert_eq!(instruction.fp_update, FpUpdate::APPlus2);
    assert_eq!(instruction.size(), 2);
  }

  #[test]
  fn decode_all_defaults_vector(){
    let instruction = decode_instruction(0x0000800080008000).unwrap();
    assert_eq!(
      instruction,
      Instruction {
        off0: 0, off1: 0, off2: 0,
        dst_register: Register::AP,
        op0_register: Register::AP,
        op1_addr: Op1Addr::Op0,
        res: Res::Op1,
        pc_update: PcUpdate::Regular,
        ap_update: ApUpdate::Regular,
        fp_update: FpUpdate::Regular,
        opcode: Opcode::NOp,
      }
    );
  }

  #[test]
  fn decode_offsets_vector(){
    let instruction = decode_instruction(0x0000800180007FFF).unwrap();
    assert_eq!((instruction.off0, instruction.off1, instruction.off2), (-1, 0, 1));
  }

  #[test]
  fn error_precedence(){
    // Each word is invalid in two fields; the earlier field wins.
    let op1_and_pc = word(0x000C | 0x0180, 0x8000, 0x8000, 0x8000);
    assert_eq!(decode_instruction(op1_and_pc), Err(DecodeError::InvalidOperand1Register(3)));

    let pc_and_res = word(0x0180 | 0x0060, 0x8000, 0x8000, 0x8000);
    assert_eq!(decode_instruction(pc_and_res), Err(DecodeError::InvalidPcUpdate(3)));

    let res_and_opcode = word(0x0060 | 0x3000, 0x8000, 0x8000, 0x8000);
    assert_eq!(decode_instruction(res_and_opcode), Err(DecodeError::InvalidResLogic(3)));

    let opcode_and_ap = word(0x3000 | 0x0C00, 0x8000, 0x8000, 0x8000);
    assert_eq!(decode_instruction(opcode_and_ap), Err(DecodeError::InvalidOpcode(3)));

    let ap_only = word(0x0C00, 0x8000, 0x8000, 0x8000);
    assert_eq!(decode_instruction(ap_only), Err(DecodeError::InvalidApUpdate(3)));

    let everything = word(0x7FFF, 0, 0, 0) | HIGH_BIT_MASK;
    assert_eq!(decode_instruction(everything), Err(DecodeError::NonZeroHighBit));
  }

  #[test]
  fn invalid_op1_src_independent_of_other_fields(){
    for &other in [0x0000u16, 0x0003, 0x14A3, 0x4203, 0x7FE3].iter() {
      for &code in [3u16, 5, 6, 7].iter() {
        let flags = (other & !0x001C) | (code << 2);
        assert_eq!(
          decode_instruction(word(flags, 0x8000, 0x8000, 0x8000)),
          Err(DecodeError::InvalidOperand1Register(code as u8))
        );
      }
    }
  }

  #[test]
  fn every_legal_combination_decodes(){
    let registers  = [(0u16, Register::AP), (1, Register::FP)];
    let op1_addrs  = [(0u16, Op1Addr::Op0), (1, Op1Addr::Imm), (2, Op1Addr::FP), (4, Op1Addr::AP)];
    let res_codes  = [0u16, 1, 2];
    let pc_updates = [
      (0u16, PcUpdate::Regular), (1, PcUpdate::Jump), (2, PcUpdate::JumpRel), (4, PcUpdate::Jnz)
    ];
    let ap_codes   = [0u16, 1, 2];
    let opcodes    = [(0u16, Opcode::NOp), (1, Opcode::Call), (2, Opcode::Ret), (4, Opcode::AssertEq)];

    let mut count = 0;
    for &(dst_code, dst) in registers.iter() {
    for &(op0_code, op0) in registers.iter() {
    for &(op1_code, op1) in op1_addrs.iter() {
    for &res_code in res_codes.iter() {
    for &(pc_code, pc) in pc_updates.iter() {
    for &ap_code in ap_codes.iter() {
    for &(opcode_code, opcode) in opcodes.iter() {
      let flags = dst_code | op0_code << 1 | op1_code << 2 | res_code << 5
        | pc_code << 7 | ap_code << 10 | opcode_code << 12;
      let instruction = decode_instruction(word(flags, 0x7FFF, 0x8000, 0x8001)).unwrap();

      let res = match res_code {
        0 if pc == PcUpdate::Jnz => Res::Unconstrained,
        0 => Res::Op1,
        1 => Res::Add,
        _ => Res::Mul,
      };
      let ap_update = match ap_code {
        0 if opcode == Opcode::Call => ApUpdate::Add2,
        0 => ApUpdate::Regular,
        1 => ApUpdate::Add,
        _ => ApUpdate::Add1,
      };
      let fp_update = match opcode {
        Opcode::Call => FpUpdate::APPlus2,
        Opcode::Ret  => FpUpdate::Dst,
        _            => FpUpdate::Regular,
      };

      assert_eq!(
        instruction,
        Instruction {
          off0: -1, off1: 0, off2: 1,
          dst_register: dst,
          op0_register: op0,
          op1_addr: op1,
          res,
          pc_update: pc,
          ap_update,
          fp_update,
          opcode,
        }
      );
      count += 1;
    }}}}}}}
    assert_eq!(count, 2 * 2 * 4 * 3 * 4 * 3 * 4);
  }
}
