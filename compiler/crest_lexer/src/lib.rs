//! Total tokenizer for C source text. Lexing never fails the caller:
//! malformed input surfaces as [`TokenTag::Error`] tokens and every
//! stream ends with the [`TokenTag::Eof`] sentinel, so the parser
//! always has a token to look at. Comments are real tokens here, the
//! parser's cursor is what looks past them.

mod cursor;
mod errors;
#[cfg(test)]
mod tests;

use crest_arena::{AllocError, AstArena};
use crest_span::Span;
use tracing::debug;

pub use crest_ast::token::*;

use cursor::Cursor;
use errors::LexError::*;
pub use errors::LexError;

/// Tokenize a whole source file into the arena. The source text is
/// copied into the arena first so every token payload is a slice of
/// arena-owned memory; the returned stream lives exactly as long as
/// the arena does. Lexical errors come back alongside the stream, each
/// one mirrored by an `Error` token at the same position.
pub fn tokenize<'a>(
    src: &str,
    arena: &'a AstArena,
) -> Result<(TokenStream<'a>, Vec<(LexError, Span)>), AllocError> {
    let src = arena.alloc_str(src)?;
    let mut toks: Vec<Token> = Vec::new();
    let mut errors = Vec::new();

    for (res, span) in Lexer::from(src).spanned() {
        match res {
            Ok(tag) => toks.push((tag, span)),
            Err(err) => {
                errors.push((err, span));
                toks.push((TokenTag::Error, span));
            }
        }
    }

    toks.push((TokenTag::Eof, Span::from(src.len())));

    Ok((TokenStream::new(arena.alloc_slice_copy(&toks)?), errors))
}

#[derive(Clone)]
pub struct Lexer<'src> {
    src: Cursor<'src>,
}

impl<'a> From<&'a str> for Lexer<'a> {
    fn from(s: &'a str) -> Self {
        Self {
            src: Cursor::new(s),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<TokenTag<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lex_token();
        debug!("{:?}", token);
        token
    }
}

impl Lexer<'_> {
    fn get_pos(&self) -> usize {
        self.src.pos
    }

    fn skip_whitespace(&mut self) {
        while self.src.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.src.next();
        }
    }
}

/// Lexer wrapper yielding each token with its source span. Whitespace
/// is skipped before the span opens, so spans are tight around the
/// token text.
#[derive(Clone)]
pub struct Spanned<I> {
    pub iter: I,
}

impl<'a> Iterator for Spanned<Lexer<'a>> {
    type Item = (Result<TokenTag<'a>, LexError>, Span);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.skip_whitespace();
        let start = self.iter.get_pos();
        let item = self.iter.next()?;

        Some((item, Span(start, self.iter.get_pos())))
    }
}

impl<'a> Lexer<'a> {
    pub fn spanned(self) -> Spanned<Self> {
        Spanned { iter: self }
    }

    fn lex_token(&mut self) -> Option<Result<TokenTag<'a>, LexError>> {
        self.skip_whitespace();

        match self.src.peek()? {
            '/' if self.src.lookahead(1) == Some('/') => {
                Some(Ok(self.line_comment()))
            }
            '/' if self.src.lookahead(1) == Some('*') => {
                Some(self.block_comment())
            }
            c if Self::is_ident_char(c) => Some(Ok(self.keyword_or_ident())),
            '\"' => Some(StringLiteralCollector::new(&mut self.src).collect()),
            '\'' => Some(CharLiteralCollector::new(&mut self.src).collect()),
            '0'..='9' => {
                Some(NumberLiteralCollector::new(&mut self.src).collect())
            }
            _ => self.lex_single_char(),
        }
    }

    fn line_comment(&mut self) -> TokenTag<'a> {
        while !matches!(self.src.peek(), Some('\n') | None) {
            self.src.next();
        }

        TokenTag::LineComment
    }

    fn block_comment(&mut self) -> Result<TokenTag<'a>, LexError> {
        self.src.next(); // /
        self.src.next(); // *

        while let Some(c) = self.src.next() {
            if c == '*' && self.src.match_ch('/') {
                return Ok(TokenTag::BlockComment);
            }
        }

        Err(UnterminatedBlockComment)
    }

    fn lex_single_char(&mut self) -> Option<Result<TokenTag<'a>, LexError>> {
        Some(Ok(match self.src.next()? {
            '.' => {
                if self.src.match_ch('.') && self.src.match_ch('.') {
                    TokenTag::Ellipsis
                } else {
                    TokenTag::Dot
                }
            }
            '>' => {
                if self.src.match_ch('>') {
                    if self.src.match_ch('=') {
                        TokenTag::RightAssign
                    } else {
                        TokenTag::Right
                    }
                } else if self.src.match_ch('=') {
                    TokenTag::Ge
                } else {
                    TokenTag::Gt
                }
            }
            '<' => {
                if self.src.match_ch('<') {
                    if self.src.match_ch('=') {
                        TokenTag::LeftAssign
                    } else {
                        TokenTag::Left
                    }
                } else if self.src.match_ch('=') {
                    TokenTag::Le
                } else {
                    TokenTag::Lt
                }
            }
            '+' => {
                if self.src.match_ch('=') {
                    TokenTag::AddAssign
                } else if self.src.match_ch('+') {
                    TokenTag::Increment
                } else {
                    TokenTag::Plus
                }
            }
            '-' => {
                if self.src.match_ch('=') {
                    TokenTag::SubAssign
                } else if self.src.match_ch('-') {
                    TokenTag::Decrement
                } else if self.src.match_ch('>') {
                    TokenTag::ArrowRight
                } else {
                    TokenTag::Minus
                }
            }
            '*' => {
                if self.src.match_ch('=') {
                    TokenTag::MulAssign
                } else {
                    TokenTag::Asterisk
                }
            }
            '/' => {
                if self.src.match_ch('=') {
                    TokenTag::DivAssign
                } else {
                    TokenTag::Slash
                }
            }
            '%' => {
                if self.src.match_ch('=') {
                    TokenTag::ModAssign
                } else {
                    TokenTag::Mod
                }
            }
            '&' => {
                if self.src.match_ch('=') {
                    TokenTag::AndAssign
                } else if self.src.match_ch('&') {
                    TokenTag::And
                } else {
                    TokenTag::Ampersand
                }
            }
            '^' => {
                if self.src.match_ch('=') {
                    TokenTag::XorAssign
                } else {
                    TokenTag::Circ
                }
            }
            '|' => {
                if self.src.match_ch('=') {
                    TokenTag::OrAssign
                } else if self.src.match_ch('|') {
                    TokenTag::Or
                } else {
                    TokenTag::Bar
                }
            }
            '=' => {
                if self.src.match_ch('=') {
                    TokenTag::Eq
                } else {
                    TokenTag::Assign
                }
            }
            '!' => {
                if self.src.match_ch('=') {
                    TokenTag::Neq
                } else {
                    TokenTag::Not
                }
            }
            ';' => TokenTag::Semicolon,
            '{' => TokenTag::LeftCurly,
            '}' => TokenTag::RightCurly,
            ',' => TokenTag::Comma,
            ':' => TokenTag::Colon,
            '(' => TokenTag::LeftParen,
            ')' => TokenTag::RightParen,
            '[' => TokenTag::LeftBrace,
            ']' => TokenTag::RightBrace,
            '~' => TokenTag::Tilde,
            '?' => TokenTag::Quest,
            '#' => TokenTag::Hash,
            c => return Some(Err(UnexpectedCharacter(c))),
        }))
    }

    fn keyword_or_ident(&mut self) -> TokenTag<'a> {
        let ident = self
            .src
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_');

        match ident {
            "auto" => TokenTag::Auto,
            "break" => TokenTag::Break,
            "case" => TokenTag::Case,
            "char" => TokenTag::Char,
            "const" => TokenTag::Const,
            "continue" => TokenTag::Continue,
            "default" => TokenTag::Default,
            "do" => TokenTag::Do,
            "double" => TokenTag::Double,
            "else" => TokenTag::Else,
            "enum" => TokenTag::Enum,
            "extern" => TokenTag::Extern,
            "float" => TokenTag::Float,
            "for" => TokenTag::For,
            "goto" => TokenTag::Goto,
            "if" => TokenTag::If,
            "inline" => TokenTag::Inline,
            "int" => TokenTag::Int,
            "long" => TokenTag::Long,
            "register" => TokenTag::Register,
            "restrict" => TokenTag::Restrict,
            "return" => TokenTag::Return,
            "short" => TokenTag::Short,
            "signed" => TokenTag::Signed,
            "sizeof" => TokenTag::Sizeof,
            "static" => TokenTag::Static,
            "struct" => TokenTag::Struct,
            "switch" => TokenTag::Switch,
            "typedef" => TokenTag::Typedef,
            "union" => TokenTag::Union,
            "unsigned" => TokenTag::Unsigned,
            "void" => TokenTag::Void,
            "volatile" => TokenTag::Volatile,
            "while" => TokenTag::While,
            "_Alignof" => TokenTag::Alignof,
            "_Atomic" => TokenTag::Atomic,
            "_Bool" => TokenTag::Bool,
            "_Complex" => TokenTag::Complex,
            "_Noreturn" => TokenTag::Noreturn,
            "_Static_assert" => TokenTag::StaticAssert,
            "_Thread_local" => TokenTag::ThreadLocal,
            _ => TokenTag::Identifier(ident),
        }
    }

    fn is_ident_char(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }
}

/// Iterator over tokens' lexemes
pub struct Lexemes<'a> {
    iter: Spanned<Lexer<'a>>,
    src: &'a str,
}

impl Iterator for Lexemes<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|(_, span)| self.src[span.0..span.1].to_owned())
    }
}

impl<'a> Spanned<Lexer<'a>> {
    pub fn lexemes(self) -> Lexemes<'a> {
        Lexemes {
            src: self.iter.src.source(),
            iter: self,
        }
    }
}

struct NumberLiteralCollector<'src, 'a> {
    src: &'a mut Cursor<'src>,
}

impl<'src> NumberLiteralCollector<'src, '_> {
    fn new<'a>(src: &'a mut Cursor<'src>) -> NumberLiteralCollector<'src, 'a> {
        NumberLiteralCollector { src }
    }

    pub fn collect(&mut self) -> Result<TokenTag<'src>, LexError> {
        let prefix = match self.src.peek() {
            Some('0') => match self.src.lookahead(1) {
                Some('x' | 'o' | 'b') => self.parse_prefix(),
                _ => None,
            },
            _ => None,
        };

        let start = self.src.pos;

        match prefix {
            Some(NumberLiteralPrefix::Hex) => {
                self.src.take_while(|c| c.is_ascii_hexdigit());
            }
            Some(NumberLiteralPrefix::Oct) => {
                self.src.take_while(|c| matches!(c, '0'..='7'));
            }
            Some(NumberLiteralPrefix::Bin) => {
                self.src.take_while(|c| matches!(c, '0'..='1'));
            }
            None => {
                self.src.take_while(|c| c.is_ascii_digit());
            }
        }

        let kind = match self.src.peek() {
            Some('.') if prefix.is_none() => {
                self.src.next();
                self.src.take_while(|c| c.is_ascii_digit());

                if matches!(self.src.peek(), Some('e' | 'E')) {
                    self.consume_exponent()?;
                    NumberLiteralKind::Exponent
                } else {
                    NumberLiteralKind::Float
                }
            }
            Some('e' | 'E') => {
                if prefix.is_some() {
                    return Err(InvalidDigit('e'));
                }

                self.consume_exponent()?;
                NumberLiteralKind::Exponent
            }
            _ => NumberLiteralKind::Int,
        };

        let literal = self.src.slice(start, self.src.pos);

        let suffix = self.parse_suffix(match kind {
            NumberLiteralKind::Exponent | NumberLiteralKind::Float => {
                Self::parse_float_suffix
            }
            NumberLiteralKind::Int => Self::parse_integer_suffix,
        })?;

        Ok(TokenTag::NumberLiteral {
            literal,
            prefix,
            suffix,
            kind,
        })
    }

    fn parse_prefix(&mut self) -> Option<NumberLiteralPrefix> {
        self.src.next(); // 0

        let prefix = match self.src.peek()? {
            'x' => NumberLiteralPrefix::Hex,
            'o' => NumberLiteralPrefix::Oct,
            'b' => NumberLiteralPrefix::Bin,
            _ => return None,
        };

        self.src.next();
        Some(prefix)
    }

    fn parse_suffix<F>(
        &mut self,
        strategy: F,
    ) -> Result<Option<NumberLiteralSuffix>, LexError>
    where
        F: Fn(&mut Cursor) -> Option<NumberLiteralSuffix>,
    {
        let suffix = self.src.take_while(|c| c.is_ascii_alphanumeric());

        if suffix.is_empty() {
            return Ok(None);
        }

        let mut cursor = Cursor::new(suffix);
        let result = strategy(&mut cursor);

        if cursor.peek().is_some() {
            // characters left in suffix
            Err(InvalidNumberLiteralSuffix(suffix.to_owned()))
        } else {
            Ok(result)
        }
    }

    fn parse_integer_suffix(
        cursor: &mut Cursor,
    ) -> Option<NumberLiteralSuffix> {
        match cursor.peek() {
            Some('u' | 'U') => {
                cursor.next();

                match Self::parse_long_suffix(cursor) {
                    Some(NumberLiteralSuffix::LongLong) => {
                        Some(NumberLiteralSuffix::UnsignedLongLong)
                    }
                    Some(_) => Some(NumberLiteralSuffix::UnsignedLong),
                    None => Some(NumberLiteralSuffix::Unsigned),
                }
            }
            Some('l' | 'L') => {
                let long = Self::parse_long_suffix(cursor);

                if matches!(cursor.peek(), Some('u' | 'U')) {
                    cursor.next();

                    match long {
                        Some(NumberLiteralSuffix::LongLong) => {
                            Some(NumberLiteralSuffix::UnsignedLongLong)
                        }
                        _ => Some(NumberLiteralSuffix::UnsignedLong),
                    }
                } else {
                    long
                }
            }
            _ => None,
        }
    }

    /// `l`, `ll`, `L`, `LL`. The second `l` must match the case of the
    /// first, `lL` is not a valid suffix.
    fn parse_long_suffix(cursor: &mut Cursor) -> Option<NumberLiteralSuffix> {
        match cursor.peek() {
            Some(c @ ('l' | 'L')) => {
                cursor.next();

                if cursor.peek() == Some(c) {
                    cursor.next();
                    Some(NumberLiteralSuffix::LongLong)
                } else {
                    Some(NumberLiteralSuffix::Long)
                }
            }
            _ => None,
        }
    }

    fn parse_float_suffix(cursor: &mut Cursor) -> Option<NumberLiteralSuffix> {
        match cursor.peek() {
            Some('f' | 'F') => {
                cursor.next();
                Some(NumberLiteralSuffix::Float)
            }
            Some('l' | 'L') => {
                cursor.next();
                Some(NumberLiteralSuffix::Long)
            }
            _ => None,
        }
    }

    fn consume_exponent(&mut self) -> Result<(), LexError> {
        self.src.next(); // e

        if matches!(self.src.peek(), Some('+' | '-')) {
            self.src.next();
        }

        if !self.src.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(ExponentHasNoDigits);
        }

        self.src.take_while(|c| c.is_ascii_digit());
        Ok(())
    }
}

struct StringLiteralCollector<'src, 'a> {
    src: &'a mut Cursor<'src>,
}

impl<'src> StringLiteralCollector<'src, '_> {
    fn new<'a>(src: &'a mut Cursor<'src>) -> StringLiteralCollector<'src, 'a> {
        StringLiteralCollector { src }
    }

    /// The payload is the raw text between the quotes; escape
    /// sequences are validated but kept as written.
    pub fn collect(&mut self) -> Result<TokenTag<'src>, LexError> {
        self.src.next(); // "
        let start = self.src.pos;

        loop {
            match self.src.peek() {
                Some('\\') => {
                    EscapeSequenceValidator::new(self.src).validate()?;
                }
                Some('\"') => {
                    let end = self.src.pos;
                    self.src.next();
                    return Ok(TokenTag::StringLiteral(
                        self.src.slice(start, end),
                    ));
                }
                Some(_) => {
                    self.src.next();
                }
                None => return Err(UnterminatedString),
            }
        }
    }
}

struct CharLiteralCollector<'src, 'a> {
    src: &'a mut Cursor<'src>,
}

impl<'src> CharLiteralCollector<'src, '_> {
    fn new<'a>(src: &'a mut Cursor<'src>) -> CharLiteralCollector<'src, 'a> {
        CharLiteralCollector { src }
    }

    pub fn collect(&mut self) -> Result<TokenTag<'src>, LexError> {
        assert!(self.src.next() == Some('\''));

        match self.src.peek() {
            Some('\\') => {
                EscapeSequenceValidator::new(self.src).validate()?;
            }
            Some('\'') => {
                self.src.next();
                return Err(EmptyCharacterConstant);
            }
            Some(_) => {
                self.src.next();
            }
            None => return Err(UnterminatedCharacterLiteral),
        };

        if !self.src.match_ch('\'') {
            return Err(UnterminatedCharacterLiteral);
        }

        Ok(TokenTag::CharLiteral)
    }
}

struct EscapeSequenceValidator<'src, 'a> {
    src: &'a mut Cursor<'src>,
}

impl<'src> EscapeSequenceValidator<'src, '_> {
    fn new<'a>(src: &'a mut Cursor<'src>) -> EscapeSequenceValidator<'src, 'a> {
        EscapeSequenceValidator { src }
    }

    pub fn validate(&mut self) -> Result<(), LexError> {
        assert!(self.src.next() == Some('\\'));

        match self.src.next() {
            Some('0'..='7') => {
                for _ in 0..2 {
                    if !matches!(self.src.peek(), Some('0'..='7')) {
                        break;
                    }

                    self.src.next();
                }

                Ok(())
            }
            Some('x') => {
                for _ in 0..3 {
                    if !self.src.peek().is_some_and(|c| c.is_ascii_hexdigit())
                    {
                        break;
                    }

                    self.src.next();
                }

                Ok(())
            }
            Some(
                'b' | 'v' | 't' | 'n' | 'f' | 'r' | '\"' | '\'' | '\\' | '?',
            ) => Ok(()),
            Some(c) => Err(UnknownEscapeSequenceCharacter(c)),
            None => Err(UnexpectedEof),
        }
    }
}
