use crate::{tokenize, LexError, Lexer, TokenTag};
use crest_arena::AstArena;

#[test]
fn comments_are_tokens() {
    let tags: Vec<_> = Lexer::from("int // trailing\nx /* mid */ y")
        .map(Result::unwrap)
        .collect();

    assert_eq!(
        tags,
        vec![
            TokenTag::Int,
            TokenTag::LineComment,
            TokenTag::Identifier("x"),
            TokenTag::BlockComment,
            TokenTag::Identifier("y")
        ]
    );
}

#[test]
fn line_comment_at_eof() {
    let tags: Vec<_> = Lexer::from("// no newline")
        .map(Result::unwrap)
        .collect();

    assert_eq!(tags, vec![TokenTag::LineComment]);
}

#[test]
fn block_comment_with_stars() {
    let tags: Vec<_> = Lexer::from("/***/ x").map(Result::unwrap).collect();

    assert_eq!(
        tags,
        vec![TokenTag::BlockComment, TokenTag::Identifier("x")]
    );
}

#[test]
fn unterminated_block_comment() {
    let mut lexer = Lexer::from("x /* oops");
    assert_eq!(lexer.next(), Some(Ok(TokenTag::Identifier("x"))));
    assert_eq!(
        lexer.next(),
        Some(Err(LexError::UnterminatedBlockComment))
    );
    assert_eq!(lexer.next(), None);
}

#[test]
fn tokenize_is_total() {
    let arena = AstArena::new();
    let (toks, errors) = tokenize("int @ x", &arena).unwrap();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].0, LexError::UnexpectedCharacter('@')));

    let tags: Vec<_> =
        toks.as_slice().iter().map(|(tag, _)| *tag).collect();
    assert_eq!(
        tags,
        vec![
            TokenTag::Int,
            TokenTag::Error,
            TokenTag::Identifier("x"),
            TokenTag::Eof
        ]
    );
}

#[test]
fn empty_source_still_has_the_sentinel() {
    let arena = AstArena::new();
    let (toks, errors) = tokenize("", &arena).unwrap();

    assert!(errors.is_empty());
    assert_eq!(toks.len(), 1);
    assert!(matches!(toks.tag(toks.eof()), TokenTag::Eof));
}
