/*!
  Decoding of the 64 bit instruction words of a register-based stack virtual machine.

  ```
  use cvm_decoder::bytecode::{decode_instruction, Opcode, FpUpdate};

  let instruction = decode_instruction(0x14A7_8000_8000_8000).unwrap();
  assert_eq!(instruction.opcode, Opcode::Call);
  assert_eq!(instruction.fp_update, FpUpdate::APPlus2);
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod table;
