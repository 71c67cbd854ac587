//! Declaration specifier parsing. C's multi-keyword specifiers
//! (`unsigned long long int`) are folded by a small state machine
//! rather than matched token by token; only combinations the language
//! allows are representable transitions, so an invalid run can never
//! silently produce a wrong composite type.

use crest_ast::token::{TokenIdx, TokenTag, TokenTag::*};
use crest_ast::{
    DeclSpec, FuncSpec, Qualifiers, Sign, Signedness, StorageClass,
    TypeSpecTag,
};
use tracing::instrument;

use crate::{lookahead, require_tok};
use crate::{DiagTag, Parser, PR};

/// Accumulation state between two type keywords
#[derive(Debug, Clone, Copy)]
enum TySpecState<'a> {
    Empty,
    /// `signed`/`unsigned` seen, base type still open
    Sign(Sign),
    /// `_Complex` seen, base type still open
    Complex(TokenIdx),
    Spec(TypeSpecTag<'a>),
}

pub(crate) struct TySpecAccumulator<'a> {
    state: TySpecState<'a>,
}

impl<'a> TySpecAccumulator<'a> {
    fn new() -> Self {
        Self {
            state: TySpecState::Empty,
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self.state, TySpecState::Empty)
    }

    /// Install a specifier parsed elsewhere (record, enum, atomic,
    /// typedef name). Callers must have checked `is_empty`.
    fn set(&mut self, spec: TypeSpecTag<'a>) {
        debug_assert!(self.is_empty());
        self.state = TySpecState::Spec(spec);
    }

    /// One keyword transition. `Err` means the keyword cannot combine
    /// with what has accumulated so far; the caller turns that into an
    /// `InvalidTypeSpecifier` diagnostic.
    fn feed(&mut self, tag: TokenTag<'a>, idx: TokenIdx) -> Result<(), ()> {
        use TySpecState as S;
        use TypeSpecTag as T;

        if let Signed | Unsigned = tag {
            let sign = Sign {
                kw: idx,
                signedness: if matches!(tag, Unsigned) {
                    Signedness::Unsigned
                } else {
                    Signedness::Signed
                },
            };

            self.state = match self.state {
                S::Empty => S::Sign(sign),
                S::Spec(T::Char { kw, sign: None }) => S::Spec(T::Char {
                    kw,
                    sign: Some(sign),
                }),
                S::Spec(T::Short { kw, sign: None, int }) => {
                    S::Spec(T::Short {
                        kw,
                        sign: Some(sign),
                        int,
                    })
                }
                S::Spec(T::Int { int, sign: None }) => S::Spec(T::Int {
                    int,
                    sign: Some(sign),
                }),
                S::Spec(T::Long {
                    kw,
                    sign: None,
                    int,
                    second,
                }) => S::Spec(T::Long {
                    kw,
                    sign: Some(sign),
                    int,
                    second,
                }),
                _ => return Err(()),
            };

            return Ok(());
        }

        self.state = match (self.state, tag) {
            // `void` and `_Bool` stand alone
            (S::Empty, Void) => S::Spec(T::Void { kw: idx }),
            (S::Empty, Bool) => S::Spec(T::Bool { kw: idx }),

            (S::Empty, Char) => S::Spec(T::Char { kw: idx, sign: None }),
            (S::Sign(sign), Char) => S::Spec(T::Char {
                kw: idx,
                sign: Some(sign),
            }),

            (S::Empty, Short) => S::Spec(T::Short {
                kw: idx,
                sign: None,
                int: None,
            }),
            (S::Sign(sign), Short) => S::Spec(T::Short {
                kw: idx,
                sign: Some(sign),
                int: None,
            }),
            // `int short`
            (S::Spec(T::Int { int, sign }), Short) => S::Spec(T::Short {
                kw: idx,
                sign,
                int,
            }),

            (S::Empty, Int) => S::Spec(T::Int {
                int: Some(idx),
                sign: None,
            }),
            (S::Sign(sign), Int) => S::Spec(T::Int {
                int: Some(idx),
                sign: Some(sign),
            }),
            (S::Spec(T::Short { kw, sign, int: None }), Int) => {
                S::Spec(T::Short {
                    kw,
                    sign,
                    int: Some(idx),
                })
            }
            (
                S::Spec(T::Long {
                    kw,
                    sign,
                    int: None,
                    second,
                }),
                Int,
            ) => S::Spec(T::Long {
                kw,
                sign,
                int: Some(idx),
                second,
            }),

            (S::Empty, Long) => S::Spec(T::Long {
                kw: idx,
                sign: None,
                int: None,
                second: None,
            }),
            (S::Sign(sign), Long) => S::Spec(T::Long {
                kw: idx,
                sign: Some(sign),
                int: None,
                second: None,
            }),
            // `int long` promotes, `long long` fills the second slot
            (S::Spec(T::Int { int, sign }), Long) => S::Spec(T::Long {
                kw: idx,
                sign,
                int,
                second: None,
            }),
            (
                S::Spec(T::Long {
                    kw,
                    sign,
                    int,
                    second: None,
                }),
                Long,
            ) => S::Spec(T::Long {
                kw,
                sign,
                int,
                second: Some(idx),
            }),
            // `double long` mirrors `long double`
            (
                S::Spec(T::Double {
                    kw,
                    long_kw: None,
                    complex,
                }),
                Long,
            ) => S::Spec(T::Double {
                kw,
                long_kw: Some(idx),
                complex,
            }),

            (S::Empty, Float) => S::Spec(T::Float {
                kw: idx,
                complex: None,
            }),
            (S::Complex(c), Float) => S::Spec(T::Float {
                kw: idx,
                complex: Some(c),
            }),

            (S::Empty, Double) => S::Spec(T::Double {
                kw: idx,
                long_kw: None,
                complex: None,
            }),
            (S::Complex(c), Double) => S::Spec(T::Double {
                kw: idx,
                long_kw: None,
                complex: Some(c),
            }),
            (
                S::Spec(T::Long {
                    kw: long_kw,
                    sign: None,
                    int: None,
                    second: None,
                }),
                Double,
            ) => S::Spec(T::Double {
                kw: idx,
                long_kw: Some(long_kw),
                complex: None,
            }),

            (S::Empty, Complex) => S::Complex(idx),
            (S::Spec(T::Float { kw, complex: None }), Complex) => {
                S::Spec(T::Float {
                    kw,
                    complex: Some(idx),
                })
            }
            (
                S::Spec(T::Double {
                    kw,
                    long_kw,
                    complex: None,
                }),
                Complex,
            ) => S::Spec(T::Double {
                kw,
                long_kw,
                complex: Some(idx),
            }),

            _ => return Err(()),
        };

        Ok(())
    }

    /// Normalize whatever accumulated. A bare sign run is `int` with
    /// that sign; a bare `_Complex` defaults to `double _Complex`.
    fn finish(self) -> Option<TypeSpecTag<'a>> {
        match self.state {
            TySpecState::Empty => None,
            TySpecState::Sign(sign) => Some(TypeSpecTag::Int {
                int: None,
                sign: Some(sign),
            }),
            TySpecState::Complex(c) => Some(TypeSpecTag::Double {
                kw: c,
                long_kw: None,
                complex: Some(c),
            }),
            TySpecState::Spec(spec) => Some(spec),
        }
    }
}

impl<'a> Parser<'a> {
    /// Parse `declaration-specifiers`, or nothing. An empty run is not
    /// an error at this layer; callers decide whether they can live
    /// with `None`.
    #[instrument(skip_all)]
    pub(crate) fn maybe_decl_specifiers(
        &mut self,
    ) -> PR<Option<&'a DeclSpec<'a>>> {
        self.specifier_run(true)
    }

    /// `specifier-qualifier-list`, the storage-class-free subset used
    /// by struct fields and type names
    pub(crate) fn maybe_specifier_qualifiers(
        &mut self,
    ) -> PR<Option<&'a DeclSpec<'a>>> {
        self.specifier_run(false)
    }

    fn specifier_run(
        &mut self,
        allow_storage: bool,
    ) -> PR<Option<&'a DeclSpec<'a>>> {
        let mut storage = StorageClass::default();
        let mut quals = Qualifiers::default();
        let mut func = FuncSpec::default();
        let mut acc = TySpecAccumulator::new();
        let mut seen_any = false;

        loop {
            let tag = self.cursor.peek_tag();

            match tag {
                Typedef | Extern | Static | ThreadLocal | Auto | Register
                    if allow_storage =>
                {
                    let idx = self.cursor.advance();
                    self.record_storage(&mut storage, idx);
                }
                Inline | Noreturn if allow_storage => {
                    let idx = self.cursor.advance();
                    self.record_func_spec(&mut func, idx);
                }
                Const | Volatile | Restrict => {
                    let idx = self.cursor.advance();
                    self.record_qualifier(&mut quals, idx);
                }
                Atomic => {
                    if lookahead!(self, 1, LeftParen) {
                        // specifier form `_Atomic ( type-name )`
                        if !acc.is_empty() {
                            let at = self.cursor.peek_idx();
                            return Err(self
                                .error(DiagTag::InvalidTypeSpecifier, at));
                        }

                        let kw = self.cursor.advance();
                        require_tok!(self, LeftParen)?;
                        let ty = self.type_name()?;
                        require_tok!(self, RightParen)?;
                        acc.set(TypeSpecTag::Atomic { kw, ty });
                    } else {
                        let idx = self.cursor.advance();
                        self.record_qualifier(&mut quals, idx);
                    }
                }
                Void | Bool | Char | Short | Int | Long | Float | Double
                | Signed | Unsigned | Complex => {
                    let idx = self.cursor.advance();

                    if acc.feed(tag, idx).is_err() {
                        return Err(
                            self.error(DiagTag::InvalidTypeSpecifier, idx)
                        );
                    }
                }
                Struct | Union => {
                    if !acc.is_empty() {
                        let at = self.cursor.peek_idx();
                        return Err(
                            self.error(DiagTag::InvalidTypeSpecifier, at)
                        );
                    }

                    let spec = self.record_specifier()?;
                    acc.set(TypeSpecTag::Record(spec));
                }
                Enum => {
                    if !acc.is_empty() {
                        let at = self.cursor.peek_idx();
                        return Err(
                            self.error(DiagTag::InvalidTypeSpecifier, at)
                        );
                    }

                    let spec = self.enum_specifier()?;
                    acc.set(TypeSpecTag::Enum(spec));
                }
                Identifier(name)
                    if acc.is_empty() && self.is_typedef_name(name) =>
                {
                    let idx = self.cursor.advance();
                    acc.set(TypeSpecTag::TypedefName(idx));
                }
                // Anything else, including an identifier that is not a
                // known type name, belongs to the declarator
                _ => break,
            }

            seen_any = true;
        }

        if !seen_any {
            return Ok(None);
        }

        self.alloc(DeclSpec {
            storage,
            ty: acc.finish(),
            quals,
            func,
        })
        .map(Some)
    }

    fn record_storage(&mut self, storage: &mut StorageClass, idx: TokenIdx) {
        let slot = match self.cursor.tag(idx) {
            Typedef => &mut storage.typedef_tok,
            Extern => &mut storage.extern_tok,
            Static => &mut storage.static_tok,
            ThreadLocal => &mut storage.thread_local_tok,
            Auto => &mut storage.auto_tok,
            Register => &mut storage.register_tok,
            _ => unreachable!(),
        };

        if slot.is_some() {
            self.warning(DiagTag::DuplicateSpecifier, idx);
        } else {
            *slot = Some(idx);
        }
    }

    fn record_func_spec(&mut self, func: &mut FuncSpec, idx: TokenIdx) {
        let slot = match self.cursor.tag(idx) {
            Inline => &mut func.inline_tok,
            Noreturn => &mut func.noreturn_tok,
            _ => unreachable!(),
        };

        if slot.is_some() {
            self.warning(DiagTag::DuplicateSpecifier, idx);
        } else {
            *slot = Some(idx);
        }
    }

    /// A repeated qualifier is a warning, not an error; the first
    /// occurrence keeps the slot and the repeat is discarded.
    pub(crate) fn record_qualifier(
        &mut self,
        quals: &mut Qualifiers,
        idx: TokenIdx,
    ) {
        let slot = match self.cursor.tag(idx) {
            Const => &mut quals.const_tok,
            Volatile => &mut quals.volatile_tok,
            Restrict => &mut quals.restrict_tok,
            Atomic => &mut quals.atomic_tok,
            _ => unreachable!(),
        };

        if slot.is_some() {
            self.warning(DiagTag::DuplicateQualifier, idx);
        } else {
            *slot = Some(idx);
        }
    }
}
