use std::str::Chars;

/// Character cursor over the source text. `pos` is a byte offset, so
/// slices taken out of the cursor borrow the source directly.
#[derive(Clone)]
pub struct Cursor<'src> {
    src: &'src str,
    iter: Chars<'src>,
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            iter: src.chars(),
            pos: 0,
        }
    }

    pub fn next(&mut self) -> Option<char> {
        let c = self.iter.next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn peek(&self) -> Option<char> {
        self.iter.clone().next()
    }

    pub fn lookahead(&self, n: usize) -> Option<char> {
        self.iter.clone().nth(n)
    }

    pub fn match_ch(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.next();
            true
        } else {
            false
        }
    }

    pub fn source(&self) -> &'a str {
        self.src
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.src[start..end]
    }

    pub fn take_while<P>(&mut self, mut predicate: P) -> &'a str
    where
        P: FnMut(char) -> bool,
    {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }

            self.next();
        }

        self.slice(start, self.pos)
    }
}
