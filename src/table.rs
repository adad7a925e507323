//! Tabular display of decoded instructions and listings.

use prettytable::{format as TableFormat, Table};

use crate::bytecode::{DecodedEntry, Instruction};

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

/// One row per field of `instruction`.
pub fn instruction_table(instruction: &Instruction) -> Table {
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Field", ubl->"Value"]);

  table.add_row(row![r->"off0",      instruction.off0]);
  table.add_row(row![r->"off1",      instruction.off1]);
  table.add_row(row![r->"off2",      instruction.off2]);
  table.add_row(row![r->"dst_reg",   instruction.dst_register]);
  table.add_row(row![r->"op0_reg",   instruction.op0_register]);
  table.add_row(row![r->"op1_src",   instruction.op1_addr]);
  table.add_row(row![r->"res_logic", instruction.res]);
  table.add_row(row![r->"pc_update", instruction.pc_update]);
  table.add_row(row![r->"ap_update", instruction.ap_update]);
  table.add_row(row![r->"fp_update", instruction.fp_update]);
  table.add_row(row![r->"opcode",    instruction.opcode]);

  table
}

/// One row per listing entry: its line, the raw word, and the instruction or the error.
pub fn listing_table(entries: &[DecodedEntry]) -> Table {
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Line", ubl->"Word", ubl->"Decoded"]);

  for decoded in entries {
    let text =
      match &decoded.result {
        Ok(instruction) => format!("{}", instruction),
        Err(e)          => format!("error: {}", e),
      };
    table.add_row(
      row![r->decoded.entry.line, format!("{:#018x}", decoded.entry.word), text]
    );
  }

  table
}
