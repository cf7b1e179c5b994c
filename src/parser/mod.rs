//! # Parser
//!
//! Parses a flat [`Token`] stream into a [`PendingInstruction`] list plus a
//! [`SymbolTable`].
//!
//! ## Architecture
//!
//! HADLoC has a much smaller, far less uniform instruction set than the
//! teacher's LC-3 (a dozen-odd shapes: no-operand, single-register,
//! two-register `mov`, unary/binary arithmetic, and a constant-expression
//! operand for `ldb`/`ldu`/`lda`/`define`) — not the large family of mostly
//! `DR,SR1,SR2`-shaped instructions the LC-3 macro helpers were built for.
//! So rather than port that macro infrastructure, each instruction gets its
//! own small parsing function, in the style of the teacher's own
//! hand-written `parse_not`/`parse_br`/`parse_trap` for its non-uniform
//! cases.
//!
//! The instruction list is pre-seeded with two `nop`s (addresses 0 and 1
//! are reserved) and always ends with an implicit `hlt`, so a program that
//! merely falls off the end still halts cleanly.

pub mod ast;
mod expr;
pub mod symbol_table;


use crate::encoder;
use crate::error::{AsmError, Span, Warning};
use crate::lexer::token::{Keyword, Register, Symbol, Token, TokenKind};
use ast::{ArithOp, PendingInstruction};
use symbol_table::SymbolTable;

pub struct ParseOutput {
    pub instructions: Vec<PendingInstruction>,
    pub symbols: SymbolTable,
    pub warnings: Vec<Warning>,
}

pub fn parse(tokens: &[Token]) -> Result<ParseOutput, AsmError> {
    let mut parser = Parser::new(tokens);
    parser.run()?;
    let warnings = parser.symbols.unused_warnings();
    Ok(ParseOutput {
        instructions: parser.instructions,
        symbols: parser.symbols,
        warnings,
    })
}

enum LoadOperand {
    Value(i64),
    Label(String, Span),
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    instructions: Vec<PendingInstruction>,
    symbols: SymbolTable,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            instructions: vec![
                PendingInstruction::Fixed(encoder::NOP),
                PendingInstruction::Fixed(encoder::NOP),
            ],
            symbols: SymbolTable::new(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn current_span(&self) -> Span {
        self.peek().map(|t| t.span()).unwrap_or(Span { line: 0, col: 0 })
    }

    fn expect_register(&mut self) -> Result<Register, AsmError> {
        match self.advance() {
            Some(t) => match t.kind {
                TokenKind::Register(r) => Ok(r),
                _ => Err(AsmError::syntax("expected a register", t.span())),
            },
            None => Err(AsmError::syntax("expected a register", self.current_span())),
        }
    }

    fn expect_symbol(&mut self, sym: Symbol) -> Result<(), AsmError> {
        match self.advance() {
            Some(t) if t.kind == TokenKind::Symbol(sym) => Ok(()),
            Some(t) => Err(AsmError::syntax(format!("expected '{sym:?}'"), t.span())),
            None => Err(AsmError::syntax(format!("expected '{sym:?}'"), self.current_span())),
        }
    }

    fn expect_end(&mut self) -> Result<(), AsmError> {
        match self.advance() {
            Some(t) if t.kind == TokenKind::InstructionEnd => Ok(()),
            Some(t) => Err(AsmError::syntax(
                "expected end of instruction (unexpected extra tokens)",
                t.span(),
            )),
            None => Ok(()),
        }
    }

    fn run(&mut self) -> Result<(), AsmError> {
        while self.peek().is_some() {
            self.parse_line()?;
        }
        let already_halts =
            matches!(self.instructions.last(), Some(PendingInstruction::Fixed(b)) if *b == encoder::HLT);
        if !already_halts {
            self.instructions.push(PendingInstruction::Fixed(encoder::HLT));
        }
        Ok(())
    }

    fn parse_line(&mut self) -> Result<(), AsmError> {
        loop {
            let is_label = matches!(
                (self.tokens.get(self.pos).map(|t| t.kind), self.tokens.get(self.pos + 1).map(|t| t.kind)),
                (Some(TokenKind::Identifier), Some(TokenKind::Symbol(Symbol::Colon)))
            );
            if !is_label {
                break;
            }
            let name_token = self.advance().unwrap();
            self.advance(); // the colon
            self.symbols
                .define_label(&name_token.lexeme(), self.instructions.len(), name_token.span())?;
        }

        match self.peek_kind() {
            None => return Ok(()),
            Some(TokenKind::InstructionEnd) => {
                self.advance();
                return Ok(());
            }
            Some(TokenKind::Keyword(Keyword::Define)) => {
                self.advance();
                self.parse_define()?;
            }
            Some(TokenKind::Keyword(kw)) => {
                self.advance();
                self.parse_instruction(kw)?;
            }
            Some(_) => {
                return Err(AsmError::syntax(
                    "expected a label, an instruction, or 'define'",
                    self.current_span(),
                ));
            }
        }

        self.expect_end()
    }

    fn parse_define(&mut self) -> Result<(), AsmError> {
        let name_token = self
            .advance()
            .ok_or_else(|| AsmError::syntax("expected a name after 'define'", self.current_span()))?;
        if name_token.kind != TokenKind::Identifier {
            return Err(AsmError::syntax("expected a name after 'define'", name_token.span()));
        }
        // Calls parse_or_expr directly rather than the deferring entry
        // point: an undefined identifier inside a `define` value is always
        // a NameError, never a label reference (spec §4.3 design note).
        let value = self.parse_or_expr()?;
        self.symbols.define_constant(&name_token.lexeme(), value, name_token.span())
    }

    /// The top-level ConstExpr entry point (everywhere except `define`): a
    /// bare identifier not already defined as a constant defers to a label
    /// reference instead of erroring.
    fn parse_const_expr_top(&mut self) -> Result<LoadOperand, AsmError> {
        if let Some(token) = self.peek() {
            if token.kind == TokenKind::Identifier {
                let name = token.lexeme();
                let span = token.span();
                if !self.symbols.is_defined(&name) {
                    self.advance();
                    self.symbols.mark_label_used(&name);
                    return Ok(LoadOperand::Label(name, span));
                }
            }
        }
        Ok(LoadOperand::Value(self.parse_or_expr()?))
    }

    fn parse_instruction(&mut self, kw: Keyword) -> Result<(), AsmError> {
        use Keyword::*;
        match kw {
            Nop => self.instructions.push(PendingInstruction::Fixed(encoder::NOP)),
            Hlt => self.instructions.push(PendingInstruction::Fixed(encoder::HLT)),
            Jmp => self.instructions.push(PendingInstruction::Fixed(encoder::JMP)),
            Jlt => self.instructions.push(PendingInstruction::Fixed(encoder::JLT)),
            Jeq => self.instructions.push(PendingInstruction::Fixed(encoder::JEQ)),
            Jgt => self.instructions.push(PendingInstruction::Fixed(encoder::JGT)),
            Jle => self.instructions.push(PendingInstruction::Fixed(encoder::JLE)),
            Jge => self.instructions.push(PendingInstruction::Fixed(encoder::JGE)),
            Jne => self.instructions.push(PendingInstruction::Fixed(encoder::JNE)),
            Jis => self.instructions.push(PendingInstruction::Fixed(encoder::JIS)),
            Jcs => self.instructions.push(PendingInstruction::Fixed(encoder::JCS)),
            Ics => self.instructions.push(PendingInstruction::Fixed(encoder::ICS)),
            Icc => self.instructions.push(PendingInstruction::Fixed(encoder::ICC)),
            Mov => self.parse_mov()?,
            Opd => self.parse_op(true)?,
            Opi => self.parse_op(false)?,
            Not => self.parse_unary(ArithOp::Not)?,
            Neg => self.parse_unary(ArithOp::Neg)?,
            Inc => self.parse_unary(ArithOp::Inc)?,
            Dec => self.parse_unary(ArithOp::Dec)?,
            Sub => self.parse_binary(ArithOp::Sub)?,
            And => self.parse_binary(ArithOp::And)?,
            Or => self.parse_binary(ArithOp::Or)?,
            Add => self.parse_binary(ArithOp::Add)?,
            Ldb => self.parse_load(false)?,
            Ldu => self.parse_load(true)?,
            Lda => self.parse_lda()?,
            Define => unreachable!("'define' is dispatched by parse_line before reaching here"),
        }
        Ok(())
    }

    /// `mov src dst` — source first, then destination.
    fn parse_mov(&mut self) -> Result<(), AsmError> {
        let span = self.current_span();
        let src = self.expect_register()?;
        let dst = self.expect_register()?;
        if dst == Register::I {
            return Err(AsmError::argument("mov destination cannot be I (read-only)", span));
        }
        if src == Register::H {
            return Err(AsmError::argument("mov source cannot be H (write-only)", span));
        }
        self.instructions.push(PendingInstruction::Mov { dst, src });
        Ok(())
    }

    fn parse_op(&mut self, is_data: bool) -> Result<(), AsmError> {
        let span = self.current_span();
        let r = self.expect_register()?;
        if matches!(r, Register::Y | Register::H) {
            return Err(AsmError::argument("opd/opi argument cannot be Y or H", span));
        }
        self.instructions
            .push(if is_data { PendingInstruction::Opd(r) } else { PendingInstruction::Opi(r) });
        Ok(())
    }

    fn parse_unary(&mut self, op: ArithOp) -> Result<(), AsmError> {
        let span = self.current_span();
        let dst = self.expect_register()?;
        let arg1 = self.expect_register()?;
        self.validate_arith_registers(span, dst, arg1, None)?;
        self.instructions.push(PendingInstruction::Arith { op, dst, arg1, arg2: None });
        Ok(())
    }

    fn parse_binary(&mut self, op: ArithOp) -> Result<(), AsmError> {
        let span = self.current_span();
        let dst = self.expect_register()?;
        let arg1 = self.expect_register()?;
        let arg2 = self.expect_register()?;
        self.validate_arith_registers(span, dst, arg1, Some(arg2))?;
        self.instructions
            .push(PendingInstruction::Arith { op, dst, arg1, arg2: Some(arg2) });
        Ok(())
    }

    fn validate_arith_registers(
        &self,
        span: Span,
        dst: Register,
        arg1: Register,
        arg2: Option<Register>,
    ) -> Result<(), AsmError> {
        if !matches!(dst, Register::X | Register::L) {
            return Err(AsmError::argument("arithmetic destination must be X or L", span));
        }
        if matches!(arg1, Register::I | Register::Y | Register::H) {
            return Err(AsmError::argument("arithmetic argument cannot be I, Y, or H", span));
        }
        if let Some(a2) = arg2 {
            if matches!(a2, Register::I | Register::Y | Register::H) {
                return Err(AsmError::argument("arithmetic argument cannot be I, Y, or H", span));
            }
            if (arg1 == Register::X) == (a2 == Register::X) {
                return Err(AsmError::argument(
                    "binary arithmetic requires exactly one argument to be X",
                    span,
                ));
            }
        }
        Ok(())
    }

    fn parse_load(&mut self, upper: bool) -> Result<(), AsmError> {
        match self.parse_const_expr_top()? {
            LoadOperand::Value(v) => {
                // A standalone `ldu` takes the *high* byte of its operand
                // (spec §4.3; `original_source/assembler/parser.py`'s
                // `value & 0xFF if instr == 'ldb' else (value >> 8) & 0xFF`)
                // — `ldb` takes the low byte.
                let byte = if upper { ((v >> 8) & 0xFF) as u8 } else { (v & 0xFF) as u8 };
                self.instructions.push(if upper {
                    PendingInstruction::Ldu(byte)
                } else {
                    PendingInstruction::Ldb(byte)
                });
            }
            LoadOperand::Label(name, span) => {
                self.instructions.push(if upper {
                    PendingInstruction::LduRef(name, span)
                } else {
                    PendingInstruction::LdbRef(name, span)
                });
            }
        }
        Ok(())
    }

    /// `lda ConstExpr` loads a full 15-bit address into `H:L`. The high
    /// byte (via `ldu`, which uses `L` as scratch before moving into `H`)
    /// must be loaded *before* the low byte, or `ldu`'s own scratch write
    /// would clobber the low byte `ldb` just set.
    fn parse_lda(&mut self) -> Result<(), AsmError> {
        match self.parse_const_expr_top()? {
            LoadOperand::Value(v) => {
                let addr = v & 0x7FFF;
                let high = ((addr >> 8) & 0x7F) as u8;
                let low = (addr & 0xFF) as u8;
                self.instructions.push(PendingInstruction::Ldu(high));
                self.instructions.push(PendingInstruction::Ldb(low));
            }
            LoadOperand::Label(name, span) => {
                self.instructions.push(PendingInstruction::LduRef(name.clone(), span));
                self.instructions.push(PendingInstruction::LdbRef(name, span));
            }
        }
        Ok(())
    }
}
