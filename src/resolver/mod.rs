//! # Label resolver
//!
//! Expands every `Ldb`/`Ldu`/`LdbRef`/`LduRef` placeholder in a
//! [`PendingInstruction`] list into its final `Fixed` byte(s), then hands
//! the fully resolved list to the encoder.
//!
//! A `ldb`/`ldu` of a literal value expands to one instruction, or two if
//! the value's relevant byte has its high bit set (spec §4.4) — that choice
//! is known immediately, since the byte is already in hand. A `ldb` of a
//! *label* has the same one-or-two choice, but now both the choice and the
//! byte itself depend on the label's final address, which in turn depends
//! on how many other by-label loads before it *also* expanded to two
//! instructions. Resolving this needs a small fixed-point pass: guess every
//! by-label `ldb`'s width as 1, compute the addresses that guess implies,
//! check whether any label's resolved low byte would actually need the
//! wider expansion, and repeat until nothing changes. Widening only ever
//! grows a guess, never shrinks one, and is bounded by the number of
//! by-label loads in the program, so this always terminates. (`ldu`'s own
//! width never needs guessing: its byte is the *high* byte of the target
//! address masked to 7 bits, so it's always under 0x80 and always takes the
//! one-instruction branch, making a by-label `ldu` a fixed two instructions
//! — the load plus the trailing `mov L H`.)
//!
//! Grounded in `original_source/assembler/parser.py`'s `replace_definitions`
//! (the backward list-splice-and-shift walk this crate's `define`-constant
//! handling still follows, via the parser baking literal `Ldb`/`Ldu` values
//! in directly) and in the general shape of a two-pass assembler's label
//! encoder, reconstructed here since the original's own label encoder
//! wasn't part of the retrieved source.

#[cfg(test)]
mod tests;

use crate::encoder::{self, ldb_direct_byte, mov_l_to_h_byte, not_l_l_byte};
use crate::error::AsmError;
use crate::parser::ast::PendingInstruction;
use crate::parser::symbol_table::SymbolTable;

/// How many `Fixed` instructions a `ldb`/`ldu` of this byte expands to.
fn ldb_width(byte: u8) -> usize {
    if byte < 0x80 {
        1
    } else {
        2
    }
}

fn ldu_width(byte: u8) -> usize {
    ldb_width(byte) + 1
}

/// Expands a byte destined for `L`: one instruction if the byte's high bit
/// is clear, otherwise two (load the complement of the low 7 bits, then
/// `not L L` to restore the original high-bit-set value).
fn expand_ldb(byte: u8) -> Vec<PendingInstruction> {
    if byte < 0x80 {
        vec![PendingInstruction::Fixed(ldb_direct_byte(byte))]
    } else {
        let complement = !byte & 0x7F;
        vec![
            PendingInstruction::Fixed(ldb_direct_byte(complement)),
            PendingInstruction::Fixed(not_l_l_byte()),
        ]
    }
}

/// Expands a byte destined for `H`: the `ldb` expansion above, loading into
/// `L` as scratch, followed by `mov L H`.
fn expand_ldu(byte: u8) -> Vec<PendingInstruction> {
    let mut expanded = expand_ldb(byte);
    expanded.push(PendingInstruction::Fixed(mov_l_to_h_byte()));
    expanded
}

/// Computes the final byte address of every pending instruction (indexed by
/// its position in the original, unexpanded list), given the current guess
/// of which by-label `ldb`s need the wide expansion.
fn addresses_of(instructions: &[PendingInstruction], wide: &[bool]) -> Vec<usize> {
    let mut addr_of = vec![0usize; instructions.len()];
    let mut addr = 0usize;
    for (i, instr) in instructions.iter().enumerate() {
        addr_of[i] = addr;
        addr += match instr {
            PendingInstruction::Ldb(b) => ldb_width(*b),
            PendingInstruction::Ldu(b) => ldu_width(*b),
            PendingInstruction::LdbRef(..) => {
                if wide[i] {
                    2
                } else {
                    1
                }
            }
            PendingInstruction::LduRef(..) => 2,
            _ => 1,
        };
    }
    addr_of
}

/// Resolves every placeholder, then encodes the result to bytes.
pub fn resolve(
    instructions: Vec<PendingInstruction>,
    symbols: &mut SymbolTable,
) -> Result<Vec<u8>, AsmError> {
    let mut wide = vec![false; instructions.len()];
    let addr_of = loop {
        let addr_of = addresses_of(&instructions, &wide);
        let mut changed = false;
        for (i, instr) in instructions.iter().enumerate() {
            if let PendingInstruction::LdbRef(name, span) = instr {
                let target = symbols
                    .label_index(name)
                    .ok_or_else(|| AsmError::undefined_label(name, *span))?;
                let low_byte = (addr_of[target] & 0xFF) as u8;
                if ldb_width(low_byte) == 2 && !wide[i] {
                    wide[i] = true;
                    changed = true;
                }
            }
        }
        if !changed {
            break addr_of;
        }
    };

    // Addresses are now stable; record labels' final byte addresses (the
    // parser only knew their pending-instruction index) before the single
    // forward pass below that actually emits bytes.
    let final_addrs: Vec<(String, usize)> = symbols
        .labels()
        .map(|(name, index)| (name.to_string(), addr_of[index]))
        .collect();
    for (name, addr) in &final_addrs {
        symbols.set_label_index(name, *addr);
    }

    let mut bytes = Vec::new();
    for instr in &instructions {
        let expanded: Vec<PendingInstruction> = match instr {
            PendingInstruction::Ldb(byte) => expand_ldb(*byte),
            PendingInstruction::Ldu(byte) => expand_ldu(*byte),
            PendingInstruction::LdbRef(name, span) => {
                let addr = symbols
                    .label_index(name)
                    .ok_or_else(|| AsmError::undefined_label(name, *span))?;
                expand_ldb((addr & 0xFF) as u8)
            }
            PendingInstruction::LduRef(name, span) => {
                let addr = symbols
                    .label_index(name)
                    .ok_or_else(|| AsmError::undefined_label(name, *span))?;
                expand_ldu(((addr >> 8) & 0x7F) as u8)
            }
            other => vec![other.clone()],
        };
        for instr in &expanded {
            bytes.push(encoder::encode(instr)?);
        }
    }
    Ok(bytes)
}
