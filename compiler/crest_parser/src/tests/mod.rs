mod cursor;
mod decl;
mod expr;
mod stmt;

use crest_arena::AstArena;
use crest_lexer::tokenize;

use crate::{ParseOptions, ParseOutcome, Parser};

/// Lex and parse `src`, handing the outcome to `check` while the
/// arena is still alive
pub(crate) fn with_parsed<R>(
    src: &str,
    check: impl FnOnce(&ParseOutcome<'_>) -> R,
) -> R {
    let arena = AstArena::new();
    let (toks, lex_errors) = tokenize(src, &arena).unwrap();
    assert!(lex_errors.is_empty(), "lexical errors in {src:?}");

    let outcome = Parser::new(toks, &arena, ParseOptions::default())
        .parse()
        .unwrap();

    check(&outcome)
}
