use crest_ast::token::{Token, TokenIdx, TokenStream, TokenTag};
use crest_span::Span;

/// Bidirectional, comment-transparent view over the token stream.
///
/// Grammar rules never see comment tokens: `peek`, `lookahead` and
/// `advance` all step straight past them. Backtracking works by
/// position: `advance` saves the pre-advance position and `retreat`
/// restores it exactly, so a failed match leaves no drift behind, no
/// matter how many comments were skipped on the way.
pub struct TokenCursor<'a> {
    toks: TokenStream<'a>,
    pos: usize,
    /// Position saved by the latest `advance`, taken by `retreat`
    prev: Option<usize>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(toks: TokenStream<'a>) -> Self {
        Self {
            toks,
            pos: 0,
            prev: None,
        }
    }

    pub fn stream(&self) -> TokenStream<'a> {
        self.toks
    }

    pub fn token(&self, idx: TokenIdx) -> &'a Token<'a> {
        self.toks.get(idx)
    }

    pub fn tag(&self, idx: TokenIdx) -> TokenTag<'a> {
        self.toks.tag(idx)
    }

    pub fn span(&self, idx: TokenIdx) -> Span {
        self.toks.span(idx)
    }

    /// Index of the first non-comment token at or after `pos`. The
    /// `Eof` sentinel is not a comment, so this always lands.
    fn skip_comments(&self, mut pos: usize) -> usize {
        while self.toks.tag(TokenIdx(pos as u32)).is_comment() {
            pos += 1;
        }

        pos
    }

    /// Position of the next non-comment token, without consuming it
    pub fn peek_idx(&self) -> TokenIdx {
        TokenIdx(self.skip_comments(self.pos) as u32)
    }

    pub fn peek(&self) -> &'a Token<'a> {
        self.toks.get(self.peek_idx())
    }

    pub fn peek_tag(&self) -> TokenTag<'a> {
        self.peek().0
    }

    /// The k-th non-comment token after the current one; `lookahead(0)`
    /// is `peek`. Saturates at the sentinel.
    pub fn lookahead(&self, k: usize) -> &'a Token<'a> {
        let mut pos = self.skip_comments(self.pos);

        for _ in 0..k {
            if matches!(self.toks.tag(TokenIdx(pos as u32)), TokenTag::Eof) {
                break;
            }

            pos = self.skip_comments(pos + 1);
        }

        self.toks.get(TokenIdx(pos as u32))
    }

    /// Consume the next non-comment token and return its position,
    /// moving the internal marker past any comments in between. At the
    /// end of input the sentinel's position is returned and the cursor
    /// stays parked on it.
    pub fn advance(&mut self) -> TokenIdx {
        self.prev = Some(self.pos);
        let idx = self.skip_comments(self.pos);

        self.pos = if matches!(self.toks.tag(TokenIdx(idx as u32)), TokenTag::Eof)
        {
            idx
        } else {
            idx + 1
        };

        TokenIdx(idx as u32)
    }

    /// Undo exactly one `advance`, restoring the position to
    /// immediately before it, skipped comments included. Calling this
    /// without a matching `advance` is a programming error.
    pub fn retreat(&mut self) {
        self.pos = self
            .prev
            .take()
            .expect("retreat without a matching advance");
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.peek_tag(), TokenTag::Eof)
    }
}
