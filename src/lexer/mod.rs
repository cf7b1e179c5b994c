//! # Lexer
//!
//! Tokenizes HADLoC assembly source into a flat stream of [`Token`]s.
//!
//! Grounded in `original_source/assembler/tokenizer.py`, generalized per the
//! canonical design: a leading `-` is always its own `Symbol::Minus` token
//! (never fused into an integer lexeme — unary minus is the parser's job,
//! via the constant-expression grammar), and the full arithmetic symbol set
//! (`+ - & | ! ( )`) is tokenized rather than just `:`. `//` line comments
//! and `/* ... */` block comments (spec §4.2) are grounded in
//! `original_source/cstring.py`'s `removecomments` — an EOL comment ends
//! at the next line change, a block comment scans for `*/` and raises
//! `SyntaxError("Comment not closed")` at its opening `/*` if none is
//! found — reimplemented here as part of tokenizing instead of a
//! separate pre-pass, since this lexer already tracks position per
//! character.
//!
//! Integer literals are tried in a fixed order — binary, hex, octal,
//! decimal, character — so that e.g. `0x10` is read as hex and not as an
//! octal `0` followed by a dangling `x10` identifier.
//!
//! `PositionedText::from_source` drops line-break characters entirely (each
//! remaining character already knows its own line), so `InstructionEnd` is
//! never found by matching `'\n'` — it's inserted whenever two successive
//! real tokens land on different source lines.

pub mod cursor;
pub mod token;

#[cfg(test)]
mod tests;

use crate::error::{AsmError, Span};
use crate::text::PositionedText;
use cursor::Cursor;
use token::{Keyword, Register, Symbol, Token, TokenKind};

pub fn tokenize(source: &str) -> Result<Vec<Token>, AsmError> {
    let text = PositionedText::from_source(source);
    let mut cursor = Cursor::new(&text);
    let mut tokens = Vec::new();
    let mut last_line: Option<usize> = None;

    while !cursor.is_at_end() {
        match cursor.peek().unwrap() {
            ' ' | '\t' => {
                cursor.advance();
            }
            '/' if cursor.peek_at(1) == Some('/') => {
                skip_line_comment(&mut cursor);
            }
            '/' if cursor.peek_at(1) == Some('*') => {
                skip_block_comment(&mut cursor)?;
            }
            c => {
                let line = cursor.line_at(0).unwrap();
                if last_line.is_some_and(|l| l != line) {
                    tokens.push(Token::new(TokenKind::InstructionEnd, PositionedText::empty()));
                }
                let token = lex_token(&mut cursor, c)?;
                tokens.push(token);
                last_line = Some(line);
            }
        }
    }

    if last_line.is_some() {
        tokens.push(Token::new(TokenKind::InstructionEnd, PositionedText::empty()));
    }

    Ok(tokens)
}

/// `//` to the end of the current source line.
fn skip_line_comment(cursor: &mut Cursor) {
    cursor.advance();
    cursor.advance();
    let start_line = cursor.line_at(0);
    while start_line.is_some() && cursor.line_at(0) == start_line {
        cursor.advance();
    }
}

/// `/* ... */`, which may span multiple lines. An unterminated block comment
/// is a `SyntaxError` pointing at the opening `/*` (spec §4.2/§7).
fn skip_block_comment(cursor: &mut Cursor) -> Result<(), AsmError> {
    let start = cursor.pos();
    cursor.advance();
    cursor.advance();
    loop {
        if cursor.peek() == Some('*') && cursor.peek_at(1) == Some('/') {
            cursor.advance();
            cursor.advance();
            return Ok(());
        }
        if cursor.advance().is_none() {
            let text = cursor.slice_from(start);
            return Err(AsmError::syntax("Comment not closed", span_of(&text)));
        }
    }
}

fn lex_token(cursor: &mut Cursor, c: char) -> Result<Token, AsmError> {
    if let Some(token) = lex_integer(cursor)? {
        return Ok(token);
    }
    if c.is_alphabetic() || c == '_' {
        return Ok(lex_word(cursor));
    }
    if let Some(symbol) = Symbol::from_char(c) {
        let start = cursor.pos();
        cursor.advance();
        let text = cursor.slice_from(start);
        return Ok(Token::new(TokenKind::Symbol(symbol), text));
    }

    let start = cursor.pos();
    cursor.advance();
    let text = cursor.slice_from(start);
    Err(AsmError::syntax(
        format!("unexpected character '{c}'"),
        span_of(&text),
    ))
}

fn span_of(text: &PositionedText) -> Span {
    let c = text.first_coordinate().unwrap_or_default();
    Span {
        line: c.line,
        col: c.col,
    }
}

fn lex_word(cursor: &mut Cursor) -> Token {
    let start = cursor.pos();
    while matches!(cursor.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
        cursor.advance();
    }
    let text = cursor.slice_from(start);
    let word = text.as_str();

    if word.len() == 1 {
        if let Some(reg) = Register::from_str(&word) {
            return Token::new(TokenKind::Register(reg), text);
        }
    }
    if let Some(kw) = Keyword::from_str(&word) {
        return Token::new(TokenKind::Keyword(kw), text);
    }
    Token::new(TokenKind::Identifier, text)
}

/// Tries binary, hex, octal, decimal, then character literals, in that
/// fixed order (spec precedence). Returns `Ok(None)` if the current
/// position isn't the start of any integer literal at all.
fn lex_integer(cursor: &mut Cursor) -> Result<Option<Token>, AsmError> {
    if let Some(tok) = lex_binary(cursor)? {
        return Ok(Some(tok));
    }
    if let Some(tok) = lex_hex(cursor)? {
        return Ok(Some(tok));
    }
    if let Some(tok) = lex_octal(cursor)? {
        return Ok(Some(tok));
    }
    if let Some(tok) = lex_decimal(cursor)? {
        return Ok(Some(tok));
    }
    lex_char(cursor)
}

fn starts_with(cursor: &Cursor, prefix: &str) -> bool {
    prefix
        .chars()
        .enumerate()
        .all(|(i, c)| cursor.peek_at(i).map(|p| p.eq_ignore_ascii_case(&c)).unwrap_or(false))
}

fn lex_binary(cursor: &mut Cursor) -> Result<Option<Token>, AsmError> {
    if !starts_with(cursor, "0b") {
        return Ok(None);
    }
    let start = cursor.pos();
    cursor.advance();
    cursor.advance();
    let mut n: i64 = 0;
    let mut digits = 0;
    while matches!(cursor.peek(), Some('0' | '1')) {
        let d = cursor.advance().unwrap();
        n = n * 2 + (d as i64 - '0' as i64);
        digits += 1;
    }
    let text = cursor.slice_from(start);
    if digits == 0 {
        return Err(AsmError::syntax("invalid binary literal", span_of(&text)));
    }
    Ok(Some(Token::integer(text, n)))
}

fn lex_hex(cursor: &mut Cursor) -> Result<Option<Token>, AsmError> {
    if !starts_with(cursor, "0x") {
        return Ok(None);
    }
    let start = cursor.pos();
    cursor.advance();
    cursor.advance();
    let mut n: i64 = 0;
    let mut digits = 0;
    while matches!(cursor.peek(), Some(c) if c.is_ascii_hexdigit()) {
        let d = cursor.advance().unwrap();
        n = n * 16 + d.to_digit(16).unwrap() as i64;
        digits += 1;
    }
    let text = cursor.slice_from(start);
    if digits == 0 {
        return Err(AsmError::syntax("invalid hex literal", span_of(&text)));
    }
    Ok(Some(Token::integer(text, n)))
}

fn lex_octal(cursor: &mut Cursor) -> Result<Option<Token>, AsmError> {
    if cursor.peek() != Some('0') {
        return Ok(None);
    }
    // A bare '0' (not followed by another octal digit, nor 'b'/'x') is just
    // decimal zero; only claim this as octal once we know there's an actual
    // octal body, otherwise fall through to the decimal lexer.
    if !matches!(cursor.peek_at(1), Some('0'..='7')) {
        return Ok(None);
    }
    let start = cursor.pos();
    cursor.advance();
    let mut n: i64 = 0;
    while matches!(cursor.peek(), Some('0'..='7')) {
        let d = cursor.advance().unwrap();
        n = n * 8 + (d as i64 - '0' as i64);
    }
    let text = cursor.slice_from(start);
    Ok(Some(Token::integer(text, n)))
}

fn lex_decimal(cursor: &mut Cursor) -> Result<Option<Token>, AsmError> {
    if !matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        return Ok(None);
    }
    let start = cursor.pos();
    let mut n: i64 = 0;
    while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        let d = cursor.advance().unwrap();
        n = n * 10 + (d as i64 - '0' as i64);
    }
    let text = cursor.slice_from(start);
    Ok(Some(Token::integer(text, n)))
}

fn lex_char(cursor: &mut Cursor) -> Result<Option<Token>, AsmError> {
    if cursor.peek() != Some('\'') {
        return Ok(None);
    }
    let start = cursor.pos();
    cursor.advance();
    let c = cursor.advance().ok_or_else(|| {
        AsmError::syntax("unterminated character literal", span_of(&cursor.slice_from(start)))
    })?;
    if cursor.peek() != Some('\'') {
        let text = cursor.slice_from(start);
        return Err(AsmError::syntax("invalid character literal", span_of(&text)));
    }
    cursor.advance();
    let text = cursor.slice_from(start);
    if !(' '..='~').contains(&c) {
        return Err(AsmError::syntax(
            "character literal must be printable ASCII",
            span_of(&text),
        ));
    }
    Ok(Some(Token::integer(text, c as i64)))
}
