/*!
  A listing is the textual form of a bytecode stream: one hexadecimal word per line, with
  an optional `0x` prefix and `_` separators. Blank lines are ignored and `#` starts a
  comment that runs to the end of the line.

    0x14A7_8000_8000_8000   # call rel
    0000800080008000
*/

use nom::{
  branch::alt,
  bytes::complete::{tag, take_while, take_while1},
  character::complete::{char as one_char, space0},
  combinator::{all_consuming, opt},
  sequence::{preceded, terminated, tuple},
  IResult
};

use super::{decode_instruction, DecodeError, EncodedInstruction, Instruction, ListingError};

/// A word read from a listing, with the line it came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ListingEntry {
  pub line: usize,
  pub word: EncodedInstruction,
}

/// A listing word together with the outcome of decoding it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodedEntry {
  pub entry  : ListingEntry,
  pub result : Result<Instruction, DecodeError>,
}

fn comment_p(input: &str) -> IResult<&str, &str> {
  preceded(one_char('#'), take_while(|c: char| c != '\n' && c != '\r'))(input)
}

fn word_token_p(input: &str) -> IResult<&str, &str> {
  take_while1(|c: char| !c.is_whitespace() && c != '#')(input)
}

/// One line of a listing: at most one word token, then an optional comment.
fn line_p(input: &str) -> IResult<&str, Option<&str>> {
  all_consuming(
    terminated(
      preceded(space0, opt(word_token_p)),
      tuple((space0, opt(comment_p)))
    )
  )(input)
}

fn hex_prefix_p(input: &str) -> IResult<&str, Option<&str>> {
  opt(alt((tag("0x"), tag("0X"))))(input)
}

fn parse_word(token: &str) -> Option<EncodedInstruction> {
  let (digits, _prefix) = hex_prefix_p(token).ok()?;
  let digits: String = digits.chars().filter(|c| *c != '_').collect();
  // `from_str_radix` also takes a leading sign, so check the digits ourselves.
  if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
    return None;
  }
  EncodedInstruction::from_str_radix(&digits, 16).ok()
}

pub fn parse_listing(text: &str) -> Result<Vec<ListingEntry>, ListingError> {
  let mut entries = Vec::new();

  for (idx, line_text) in text.lines().enumerate() {
    let line = idx + 1;
    let token =
      match line_p(line_text) {
        Ok((_rest, token)) => token,
        Err(_e) => {
          return Err(ListingError::Syntax { line, text: line_text.trim().to_string() });
        }
      };

    if let Some(token) = token {
      match parse_word(token) {
        Some(word) => entries.push(ListingEntry { line, word }),
        None => return Err(ListingError::InvalidWord { line, text: token.to_string() })
      }
    }
  }

  Ok(entries)
}

/**
  Parses a listing and decodes every word in it. A word that fails to decode is reported in
  its entry and does not stop the rest of the listing; only a malformed listing is an error.
*/
pub fn decode_listing(text: &str) -> Result<Vec<DecodedEntry>, ListingError> {
  let entries = parse_listing(text)?;
  Ok(
    entries
      .into_iter()
      .map(|entry| DecodedEntry { entry, result: decode_instruction(entry.word) })
      .collect()
  )
}
