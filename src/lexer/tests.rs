use super::*;

fn lex_ok(src: &str) -> Vec<TokenKind> {
    tokenize(src)
        .unwrap_or_else(|e| panic!("expected no errors for {src:?}, got {e}"))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn lex_err(src: &str) -> AsmError {
    tokenize(src).expect_err("expected a lexer error")
}

#[test]
fn empty_source_yields_no_tokens() {
    assert_eq!(lex_ok(""), vec![]);
    assert_eq!(lex_ok("   \n\t\n"), vec![]);
}

#[test]
fn keywords_are_recognized() {
    for kw in [
        "lda", "ldb", "ldu", "mov", "jmp", "jlt", "jeq", "jgt", "jle", "jge", "jne", "nop", "jis",
        "jcs", "opd", "opi", "hlt", "not", "neg", "inc", "dec", "sub", "and", "or", "add", "ics",
        "icc", "define",
    ] {
        let tokens = lex_ok(kw);
        assert_eq!(tokens.len(), 1, "for {kw}");
        assert!(matches!(tokens[0], TokenKind::Keyword(_)), "for {kw}");
    }
}

#[test]
fn registers_are_single_uppercase_letters() {
    for (r, expected) in [
        ("X", Register::X),
        ("L", Register::L),
        ("H", Register::H),
        ("I", Register::I),
        ("M", Register::M),
        ("Y", Register::Y),
    ] {
        let tokens = lex_ok(r);
        assert_eq!(tokens, vec![TokenKind::Register(expected)]);
    }
}

#[test]
fn lowercase_register_letter_is_an_identifier() {
    assert_eq!(lex_ok("x"), vec![TokenKind::Identifier]);
}

#[test]
fn identifiers_are_anything_else_alphabetic() {
    assert_eq!(lex_ok("loop_start"), vec![TokenKind::Identifier]);
    assert_eq!(lex_ok("counter1"), vec![TokenKind::Identifier]);
}

#[test]
fn symbols_are_tokenized_individually() {
    assert_eq!(
        lex_ok(":+-&|!()"),
        vec![
            TokenKind::Symbol(Symbol::Colon),
            TokenKind::Symbol(Symbol::Plus),
            TokenKind::Symbol(Symbol::Minus),
            TokenKind::Symbol(Symbol::And),
            TokenKind::Symbol(Symbol::Or),
            TokenKind::Symbol(Symbol::Not),
            TokenKind::Symbol(Symbol::LParen),
            TokenKind::Symbol(Symbol::RParen),
        ]
    );
}

#[test]
fn leading_minus_is_never_fused_into_an_integer() {
    let tokens = lex_ok("-5");
    assert_eq!(
        tokens,
        vec![TokenKind::Symbol(Symbol::Minus), TokenKind::Integer]
    );
}

#[test]
fn decimal_literal() {
    let toks = tokenize("1234").unwrap();
    assert_eq!(toks[0].kind, TokenKind::Integer);
    assert_eq!(toks[0].value, Some(1234));
}

#[test]
fn zero_is_decimal_not_octal() {
    let toks = tokenize("0").unwrap();
    assert_eq!(toks[0].value, Some(0));
}

#[test]
fn hex_literal_case_insensitive_prefix() {
    for src in ["0x1F", "0X1f"] {
        let toks = tokenize(src).unwrap();
        assert_eq!(toks[0].value, Some(31), "for {src}");
    }
}

#[test]
fn binary_literal() {
    let toks = tokenize("0b1010").unwrap();
    assert_eq!(toks[0].value, Some(10));
}

#[test]
fn octal_literal() {
    let toks = tokenize("017").unwrap();
    assert_eq!(toks[0].value, Some(15));
}

#[test]
fn integer_precedence_is_binary_then_hex_then_octal_then_decimal() {
    // "0b11" must be read as binary 3, not octal 0 followed by an
    // identifier "b11".
    assert_eq!(tokenize("0b11").unwrap()[0].value, Some(3));
    // "0x0b" must be read as hex, not binary.
    assert_eq!(tokenize("0x0b").unwrap()[0].value, Some(11));
}

#[test]
fn character_literal() {
    let toks = tokenize("'A'").unwrap();
    assert_eq!(toks[0].kind, TokenKind::Integer);
    assert_eq!(toks[0].value, Some(65));
}

#[test]
fn character_literal_must_be_printable_ascii() {
    assert!(lex_err("'\u{1}'").kind == crate::error::ErrorKind::SyntaxError);
}

#[test]
fn unterminated_character_literal_is_an_error() {
    let err = lex_err("'A");
    assert_eq!(err.kind, crate::error::ErrorKind::SyntaxError);
}

#[test]
fn comment_to_end_of_line_is_skipped() {
    assert_eq!(lex_ok("nop // this is a comment"), vec![
        TokenKind::Keyword(Keyword::Nop),
        TokenKind::InstructionEnd,
    ]);
}

#[test]
fn comment_only_line_produces_no_instruction_end() {
    assert_eq!(lex_ok("// just a comment\n"), vec![]);
}

#[test]
fn block_comment_is_skipped_even_across_lines() {
    // The comment body spans three source lines, so "hlt" still lands on a
    // later line than "nop" and gets its own InstructionEnd.
    assert_eq!(
        lex_ok("nop /* spans\nmultiple\nlines */ hlt"),
        vec![
            TokenKind::Keyword(Keyword::Nop),
            TokenKind::InstructionEnd,
            TokenKind::Keyword(Keyword::Hlt),
            TokenKind::InstructionEnd,
        ]
    );
}

#[test]
fn block_comment_on_a_single_line_does_not_split_the_instruction() {
    assert_eq!(
        lex_ok("mov /* inline */ L X"),
        vec![
            TokenKind::Keyword(Keyword::Mov),
            TokenKind::Register(Register::L),
            TokenKind::Register(Register::X),
            TokenKind::InstructionEnd,
        ]
    );
}

#[test]
fn unclosed_block_comment_is_a_syntax_error_at_its_opening() {
    let err = lex_err("nop\n/* never closed");
    assert_eq!(err.kind, crate::error::ErrorKind::SyntaxError);
    assert_eq!(err.span.line, 1);
    assert_eq!(err.span.col, 0);
}

#[test]
fn newline_after_blank_line_emits_no_extra_instruction_end() {
    let tokens = lex_ok("nop\n\nhlt");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Keyword(Keyword::Nop),
            TokenKind::InstructionEnd,
            TokenKind::Keyword(Keyword::Hlt),
            TokenKind::InstructionEnd,
        ]
    );
}

#[test]
fn instruction_end_closes_non_blank_lines_only() {
    let tokens = lex_ok("mov L X\nstart: hlt");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Keyword(Keyword::Mov),
            TokenKind::Register(Register::L),
            TokenKind::Register(Register::X),
            TokenKind::InstructionEnd,
            TokenKind::Identifier,
            TokenKind::Symbol(Symbol::Colon),
            TokenKind::Keyword(Keyword::Hlt),
            TokenKind::InstructionEnd,
        ]
    );
}

#[test]
fn trailing_line_without_final_newline_still_gets_instruction_end() {
    let tokens = lex_ok("hlt");
    assert_eq!(tokens.last(), Some(&TokenKind::InstructionEnd));
}

#[test]
fn unknown_character_is_a_syntax_error() {
    let err = lex_err("@");
    assert_eq!(err.kind, crate::error::ErrorKind::SyntaxError);
}

#[test]
fn spans_track_line_and_column() {
    let toks = tokenize("nop\n  hlt").unwrap();
    // "hlt" sits on line 1 (0-indexed), column 2.
    let hlt = toks.iter().find(|t| t.kind == TokenKind::Keyword(Keyword::Hlt)).unwrap();
    let span = hlt.span();
    assert_eq!(span.line, 1);
    assert_eq!(span.col, 2);
}

#[test]
fn define_keyword_followed_by_identifier_and_expression() {
    let tokens = lex_ok("define LIMIT 10 + 1");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Keyword(Keyword::Define),
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Symbol(Symbol::Plus),
            TokenKind::Integer,
            TokenKind::InstructionEnd,
        ]
    );
}
