use crate::{LexError, Lexer, TokenTag};

#[test]
fn string_payload_is_raw_text() {
    let mut lexer = Lexer::from(r#""hello\n\tworld""#);

    assert_eq!(
        lexer.next(),
        Some(Ok(TokenTag::StringLiteral(r"hello\n\tworld")))
    );
}

#[test]
fn unterminated_string() {
    let mut lexer = Lexer::from("\"abc");
    assert_eq!(lexer.next(), Some(Err(LexError::UnterminatedString)));
}

#[test]
fn unknown_escape_sequence() {
    let mut lexer = Lexer::from(r#""\q""#);
    assert_eq!(
        lexer.next(),
        Some(Err(LexError::UnknownEscapeSequenceCharacter('q')))
    );
}

#[test]
fn char_literals() {
    let mut lexer = Lexer::from(r"'a' '\n' '\x41'");

    assert_eq!(lexer.next(), Some(Ok(TokenTag::CharLiteral)));
    assert_eq!(lexer.next(), Some(Ok(TokenTag::CharLiteral)));
    assert_eq!(lexer.next(), Some(Ok(TokenTag::CharLiteral)));
    assert_eq!(lexer.next(), None);
}

#[test]
fn empty_char_constant() {
    let mut lexer = Lexer::from("''");
    assert_eq!(lexer.next(), Some(Err(LexError::EmptyCharacterConstant)));
}

#[test]
fn unterminated_char_literal() {
    let mut lexer = Lexer::from("'a");
    assert_eq!(
        lexer.next(),
        Some(Err(LexError::UnterminatedCharacterLiteral))
    );
}
