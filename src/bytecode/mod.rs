/*!

  Instructions are single 64 bit words. The low 48 bits hold three 16 bit offsets and the
  high 16 bits hold the flags. Bit 63 is always zero.

    bit:  63         48 47          32 31          16 15           0
         [ flags:16   ][ off2:16     ][ off1:16     ][ off0:16     ]

  Offsets are signed, stored biased by 0x8000. The flag block, least significant bit first:

    bits  0       dst_reg    0=AP  1=FP
    bit   1       op0_reg    0=AP  1=FP
    bits  2..5    op1_src    0=Op0 1=Imm 2=FP 4=AP
    bits  5..7    res_logic  0=Op1 (Unconstrained if jnz) 1=Add 2=Mul
    bits  7..10   pc_update  0=Regular 1=Jump 2=JumpRel 4=Jnz
    bits 10..12   ap_update  0=Regular (Add2 if call) 1=Add 2=Add1
    bits 12..15   opcode     0=NOp 1=Call 2=Ret 4=AssertEq

  `fp_update` is not encoded; it follows from the opcode.

  The crate only decodes. Each call to `decode_instruction` is independent of every other
  and either returns the whole instruction or exactly one `DecodeError`.

*/

mod binary;
mod error;
mod flags;
mod instruction;
mod listing;

pub use binary::{decode_instruction, decode_offset, split_word,
                 EncodedInstruction, FlagBlock, RawFields, RawOffset};
pub use error::{DecodeError, ListingError};
pub use flags::{decode_flags, DecodedFlags};
pub use instruction::{ApUpdate, ApUpdateCode, FpUpdate, Instruction, Op1Addr, Opcode,
                      PcUpdate, Register, Res, ResLogicCode};
pub use listing::{decode_listing, parse_listing, DecodedEntry, ListingEntry};
