//! # Encoder
//!
//! Converts a resolved [`PendingInstruction`] into its single machine byte.
//!
//! This is the pure half of the pipeline: by the time a `PendingInstruction`
//! reaches [`encode`], the resolver (spec §4.4) has already replaced every
//! `Ldb`/`Ldu`/`LdbRef`/`LduRef` placeholder with concrete `Fixed`/`Mov`
//! bytes, and the parser has already rejected illegal register combinations
//! at their source span. `encode` therefore never needs a span of its own —
//! the `EncodingError` paths below exist only as a defensive backstop
//! against an invariant an earlier phase failed to enforce, and should
//! never actually fire.
//!
//! Byte layouts and register codes are grounded in
//! `original_source/assembler/codewriter.py`'s `instruction_value` /
//! `arithmetic_value`.

use crate::error::{AsmError, ErrorKind, Span};
use crate::lexer::token::Register;
use crate::parser::ast::{ArithOp, PendingInstruction};

pub const HLT: u8 = 0x00;
pub const NOP: u8 = 0x01;
pub const ICC: u8 = 0x02;
pub const ICS: u8 = 0x03;
pub const JCS: u8 = 0x12;
pub const JIS: u8 = 0x14;
pub const JGT: u8 = 0x19;
pub const JEQ: u8 = 0x1A;
pub const JGE: u8 = 0x1B;
pub const JLT: u8 = 0x1C;
pub const JNE: u8 = 0x1D;
pub const JLE: u8 = 0x1E;
pub const JMP: u8 = 0x1F;

fn bug(message: &str) -> AsmError {
    AsmError::new(ErrorKind::EncodingError, message, Span { line: 0, col: 0 })
}

pub fn encode(instr: &PendingInstruction) -> Result<u8, AsmError> {
    match instr {
        PendingInstruction::Fixed(b) => Ok(*b),
        PendingInstruction::Mov { dst, src } => encode_mov(*dst, *src),
        PendingInstruction::Opd(r) => encode_op(true, *r),
        PendingInstruction::Opi(r) => encode_op(false, *r),
        PendingInstruction::Arith {
            op,
            dst,
            arg1,
            arg2,
        } => encode_arith(*op, *dst, *arg1, *arg2),
        PendingInstruction::Ldb(_) | PendingInstruction::Ldu(_) => Err(bug(
            "unresolved ldb/ldu placeholder reached the encoder — resolver bug",
        )),
        PendingInstruction::LdbRef(_) | PendingInstruction::LduRef(_) => Err(bug(
            "unresolved label-valued ldb/ldu placeholder reached the encoder — resolver bug",
        )),
    }
}

/// `mov src dst`: textual source-then-destination order. `s` disambiguates
/// the collision-encoded register pairs: it's set whenever the destination
/// is `M` or the source is `Y` (so `s=0` means H/X respectively).
pub fn encode_mov(dst: Register, src: Register) -> Result<u8, AsmError> {
    if dst == Register::I {
        return Err(bug("mov destination cannot be I (read-only)"));
    }
    if src == Register::H {
        return Err(bug("mov source cannot be H (write-only)"));
    }
    if src == dst {
        return Ok(NOP);
    }
    let s: u8 = if dst == Register::M || src == Register::Y {
        1
    } else {
        0
    };
    Ok(0x20 | (s << 4) | (dst.code() << 2) | src.code())
}

/// `opd`/`opi`: only X, L, or I may be sourced (never M/Y/H).
pub fn encode_op(is_data: bool, r: Register) -> Result<u8, AsmError> {
    if matches!(r, Register::Y | Register::H) {
        return Err(bug("opd/opi argument cannot be Y or H"));
    }
    let d: u8 = if is_data { 1 } else { 0 };
    Ok(0x08 | (d << 2) | r.code())
}

/// Arithmetic/logic family. `dst` must be X or L; operands may not be
/// I/Y/H. Binary ops (and/or/add/sub) additionally require exactly one of
/// the two arguments to be X — this restriction does not apply to the four
/// unary ops, which is what lets `not L L` (used to complete `ldb`'s
/// negative-byte expansion) encode at all.
pub fn encode_arith(
    op: ArithOp,
    dst: Register,
    arg1: Register,
    arg2: Option<Register>,
) -> Result<u8, AsmError> {
    if !matches!(dst, Register::X | Register::L) {
        return Err(bug("arithmetic destination must be X or L"));
    }
    if matches!(arg1, Register::I | Register::Y | Register::H) {
        return Err(bug("arithmetic argument cannot be I, Y, or H"));
    }
    if let Some(a2) = arg2 {
        if matches!(a2, Register::I | Register::Y | Register::H) {
            return Err(bug("arithmetic argument cannot be I, Y, or H"));
        }
    }

    if op.is_binary() {
        let a2 = arg2.ok_or_else(|| bug("binary arithmetic op missing its second argument"))?;
        let arg1_is_x = arg1 == Register::X;
        let arg2_is_x = a2 == Register::X;
        if arg1_is_x == arg2_is_x {
            return Err(bug(
                "binary arithmetic requires exactly one argument to be X",
            ));
        }
    } else if arg2.is_some() {
        return Err(bug("unary arithmetic op given a second argument"));
    }

    let x: u8 = if dst == Register::X { 1 } else { 0 };
    let uses_m = arg1 == Register::M || arg2 == Some(Register::M);
    let m: u8 = if uses_m { 1 } else { 0 };
    let op4 = arith_op4(op, arg1);
    Ok(0x40 | (x << 5) | (m << 4) | op4)
}

fn arith_op4(op: ArithOp, arg1: Register) -> u8 {
    use ArithOp::*;
    let arg1_is_x = arg1 == Register::X;
    match op {
        Not if arg1_is_x => 0x0,
        Not => 0x3,
        Neg if arg1_is_x => 0x8,
        Neg => 0xF,
        Inc if arg1_is_x => 0xC,
        Inc => 0xB,
        Dec if arg1_is_x => 0x4,
        Dec => 0x7,
        And => 0xA,
        Or => 0xE,
        Add => 0x9,
        // Non-commutative: which side is X changes the opcode.
        Sub if arg1_is_x => 0xD,
        Sub => 0x5,
    }
}

/// The byte for `not L L`, used by the resolver to finish expanding a
/// `ldb`/`ldu` whose low 7 bits have the high bit set (spec §4.4).
pub fn not_l_l_byte() -> u8 {
    encode_arith(ArithOp::Not, Register::L, Register::L, None)
        .expect("not L L is always a legal encoding")
}

/// The byte for `mov L H`, used by the resolver to finish expanding `ldu`.
pub fn mov_l_to_h_byte() -> u8 {
    encode_mov(Register::H, Register::L).expect("mov L H is always a legal encoding")
}

/// `ldb n` for `n < 128`: the direct one-instruction immediate-load form.
pub fn ldb_direct_byte(low7: u8) -> u8 {
    0x80 | (low7 & 0x7F)
}
