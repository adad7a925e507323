/*!
  Maps the raw codes of the flag block to their enum variants.

  Two fields have a default (code 0) whose meaning depends on a sibling field:
    `res_logic` on `pc_update`, and `ap_update` on `opcode`.
  `fp_update` has no bits of its own and follows `opcode`. The fields are therefore decoded
  in a fixed order, each dependent field after the field it reads:

    dst_reg, op0_reg, op1_src, pc_update, res_logic, opcode, ap_update, fp_update

  The first invalid code ends decoding, which also fixes the order in which errors win.
*/

use std::convert::TryFrom;

use super::{
  ApUpdate, ApUpdateCode, DecodeError, FlagBlock, FpUpdate, Op1Addr, Opcode, PcUpdate,
  Register, Res, ResLogicCode
};

/// The flag fields of an instruction, fully resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct DecodedFlags {
  pub dst_register : Register,
  pub op0_register : Register,
  pub op1_addr     : Op1Addr,
  pub pc_update    : PcUpdate,
  pub res          : Res,
  pub opcode       : Opcode,
  pub ap_update    : ApUpdate,
  pub fp_update    : FpUpdate,
}

pub fn decode_flags(flags: FlagBlock) -> Result<DecodedFlags, DecodeError> {
  let dst_register = map_register(flags.dst_reg());
  let op0_register = map_register(flags.op0_reg());
  let op1_addr     = map_op1_addr(flags.op1_src())?;
  let pc_update    = map_pc_update(flags.pc_update())?;
  let res          = map_res(flags.res_logic(), pc_update)?;
  let opcode       = map_opcode(flags.opcode())?;
  let ap_update    = map_ap_update(flags.ap_update(), opcode)?;
  let fp_update    = FpUpdate::from(opcode);

  Ok(DecodedFlags {
    dst_register,
    op0_register,
    op1_addr,
    pc_update,
    res,
    opcode,
    ap_update,
    fp_update,
  })
}

/// Takes a one bit code from `FlagBlock::dst_reg` or `FlagBlock::op0_reg`.
pub fn map_register(code: u8) -> Register {
  match code {
    0 => Register::AP,
    _ => Register::FP
  }
}

pub fn map_op1_addr(code: u8) -> Result<Op1Addr, DecodeError> {
  Op1Addr::try_from(code).map_err(|e| DecodeError::InvalidOperand1Register(e.number))
}

pub fn map_pc_update(code: u8) -> Result<PcUpdate, DecodeError> {
  PcUpdate::try_from(code).map_err(|e| DecodeError::InvalidPcUpdate(e.number))
}

/// Must be given the already decoded `pc_update`.
pub fn map_res(code: u8, pc_update: PcUpdate) -> Result<Res, DecodeError> {
  let code = ResLogicCode::try_from(code).map_err(|e| DecodeError::InvalidResLogic(e.number))?;
  let res =
    match code {
      ResLogicCode::Implied if pc_update == PcUpdate::Jnz => Res::Unconstrained,
      ResLogicCode::Implied => Res::Op1,
      ResLogicCode::Add     => Res::Add,
      ResLogicCode::Mul     => Res::Mul,
    };
  Ok(res)
}

pub fn map_opcode(code: u8) -> Result<Opcode, DecodeError> {
  Opcode::try_from(code).map_err(|e| DecodeError::InvalidOpcode(e.number))
}

/// Must be given the already decoded `opcode`.
pub fn map_ap_update(code: u8, opcode: Opcode) -> Result<ApUpdate, DecodeError> {
  let code = ApUpdateCode::try_from(code).map_err(|e| DecodeError::InvalidApUpdate(e.number))?;
  let ap_update =
    match code {
      ApUpdateCode::Implied if opcode == Opcode::Call => ApUpdate::Add2,
      ApUpdateCode::Implied => ApUpdate::Regular,
      ApUpdateCode::Add     => ApUpdate::Add,
      ApUpdateCode::Add1    => ApUpdate::Add1,
    };
  Ok(ap_update)
}
