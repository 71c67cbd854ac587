//! Embedding surface for the parser: wires source text through the
//! lexer and parser against one caller-owned arena, and renders
//! whatever the parse had to say. There is deliberately no CLI or
//! file handling here; callers bring their own.


use crest_arena::{AllocError, AstArena};
use crest_errors::{ErrorBuilder, ErrorEmitter};
use crest_lexer::{tokenize, LexError};
use crest_parser::{ParseOptions, ParseOutcome, Parser, Severity};
use crest_span::{Span, Spannable};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the usual `RUST_LOG`-driven subscriber. Safe to call more
/// than once; later calls are ignored.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

/// Everything one parse produces. The tree and tokens live in the
/// arena the caller passed in; the caller releases that arena exactly
/// once, after all of this is dropped or no longer read.
pub struct ParseResult<'a> {
    pub outcome: ParseOutcome<'a>,
    pub lex_errors: Vec<(LexError, Span)>,
}

/// Tokenize and parse `src` into `arena`. Lexical errors do not stop
/// anything (they surface as `Error` tokens plus entries in
/// `lex_errors`); only arena exhaustion makes this fail.
pub fn parse_source<'a>(
    src: &str,
    arena: &'a AstArena,
    opts: ParseOptions,
) -> Result<ParseResult<'a>, AllocError> {
    let (toks, lex_errors) = tokenize(src, arena)?;
    debug!("lexed {} tokens, {} errors", toks.len(), lex_errors.len());

    let outcome = Parser::new(toks, arena, opts).parse()?;

    Ok(ParseResult {
        outcome,
        lex_errors,
    })
}

/// Render lexical errors and parse diagnostics against the source
/// text they came from, to stderr
pub fn emit_diagnostics(src: &str, filename: &str, result: &ParseResult<'_>) {
    let emitter = ErrorEmitter::new(
        src,
        ErrorBuilder::new().filename(filename.to_string()),
    );

    for (err, span) in &result.lex_errors {
        emitter.emit(&LexDiag(err, *span));
    }

    for diag in result.outcome.diagnostics.iter() {
        match diag.severity {
            Severity::Error => emitter.emit(diag),
            Severity::Warning => emitter.warn(diag),
        }
    }
}

struct LexDiag<'a>(&'a LexError, Span);

impl std::fmt::Display for LexDiag<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Spannable for LexDiag<'_> {
    fn span(&self) -> Span {
        self.1
    }
}
