use cvm_decoder::bytecode::decode_listing;
use cvm_decoder::table::{instruction_table, listing_table};

fn main() {

  let text = "
# Instruction words only; immediates are left out.
0x4806_8001_7FFF_8000   # [ap] = imm, ap++
0x1104_8001_8001_8000   # call rel imm
0x0203_8000_8000_8000   # jnz
0x208B_7FFF_7FFF_7FFE   # ret

# Not instructions:
0x8000_8000_8000_8000   # high bit set
0x000C_8000_8000_8000   # op1_src = 3
";

  match decode_listing(text) {
    Ok(entries) => {
      println!("{}", listing_table(&entries));
      for decoded in &entries {
        if let Ok(instruction) = decoded.result {
          println!("Line {}:\n{}", decoded.entry.line, instruction_table(&instruction));
        }
      }
    }
    Err(e) => {
      print!("{}", e);
    }
  }

}
