use crest_arena::AstArena;
use crest_ast::token::TokenTag::*;
use crest_lexer::tokenize;

use crate::cursor::TokenCursor;
use crate::{check_tok, match_tok, ParseOptions, Parser};

#[test]
fn peek_and_advance_skip_comments() {
    let arena = AstArena::new();
    let (toks, _) = tokenize("int // c\n/* c */ x", &arena).unwrap();
    let mut cursor = TokenCursor::new(toks);

    assert!(matches!(cursor.peek_tag(), Int));
    let int = cursor.advance();
    assert!(matches!(cursor.tag(int), Int));

    // both comments are stepped over in one advance
    let x = cursor.advance();
    assert!(matches!(cursor.tag(x), Identifier("x")));
    assert!(cursor.at_eof());
}

#[test]
fn retreat_restores_skipped_comments() {
    let arena = AstArena::new();
    let (toks, _) = tokenize("static /* a */ /* b */ foo", &arena).unwrap();
    let mut cursor = TokenCursor::new(toks);

    cursor.advance(); // static
    let first = cursor.advance(); // foo, over both comments
    assert!(matches!(cursor.tag(first), Identifier("foo")));

    cursor.retreat();

    // the comments are back in front of us and get skipped again
    let second = cursor.advance();
    assert_eq!(first, second);
}

#[test]
fn lookahead_is_comment_transparent() {
    let arena = AstArena::new();
    let (toks, _) = tokenize("a /* x */ b // y\n c", &arena).unwrap();
    let cursor = TokenCursor::new(toks);

    assert!(matches!(cursor.lookahead(0).0, Identifier("a")));
    assert!(matches!(cursor.lookahead(1).0, Identifier("b")));
    assert!(matches!(cursor.lookahead(2).0, Identifier("c")));
    assert!(matches!(cursor.lookahead(3).0, Eof));
    assert!(matches!(cursor.lookahead(100).0, Eof));
}

#[test]
fn advance_parks_on_the_sentinel() {
    let arena = AstArena::new();
    let (toks, _) = tokenize("x", &arena).unwrap();
    let mut cursor = TokenCursor::new(toks);

    cursor.advance();
    let eof = cursor.advance();
    assert!(matches!(cursor.tag(eof), Eof));
    assert_eq!(cursor.advance(), eof);
}

#[test]
#[should_panic(expected = "retreat without a matching advance")]
fn retreat_without_advance_is_a_bug() {
    let arena = AstArena::new();
    let (toks, _) = tokenize("x", &arena).unwrap();
    let mut cursor = TokenCursor::new(toks);
    cursor.retreat();
}

#[test]
fn failed_match_is_fully_transparent() {
    let arena = AstArena::new();
    let (toks, _) = tokenize("static /* a */ /* b */ foo", &arena).unwrap();
    let mut parser = Parser::new(toks, &arena, ParseOptions::default());

    // a failed attempt against the comment-covered stream must leave
    // the cursor exactly where it was
    assert!(match_tok!(parser, Int).is_none());
    assert!(check_tok!(parser, Static));
    assert!(match_tok!(parser, Int).is_none());
    assert!(matches!(parser.cursor.peek_tag(), Identifier("foo")));
    assert!(check_tok!(parser, Identifier(_)));
    assert!(parser.cursor.at_eof());
}
