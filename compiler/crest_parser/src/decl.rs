//! Declarations and declarators. External declarations are also where
//! the recovery boundary sits: anything that goes wrong below here
//! propagates up as the recoverable error kind and stops the driver's
//! collection loop.

use crest_ast::token::{TokenIdx, TokenTag, TokenTag::*};
use crest_ast::{
    ArrayLen, ArraySuffix, Decl, DeclSpec, DeclSuffix, Declarator,
    DirectDeclarator, EnumConstDecl, EnumSpec, FieldDecl, FieldDeclarator,
    FuncSuffix, InitDeclarator, Initializer, ParamDecl, ParamList, PtrLevel,
    Qualifiers, RecordSpec, TypeName,
};
use tracing::instrument;

use crate::{check_tok, lookahead, match_tok, require_tok};
use crate::{DiagTag, Parser, SymbolTag, PR};

impl<'a> Parser<'a> {
    /// External declaration: a regular declaration, a static assert,
    /// or a function definition.
    #[instrument(skip_all)]
    pub(crate) fn external_decl(&mut self) -> PR<Decl<'a>> {
        match self.cursor.peek_tag() {
            StaticAssert => self.static_assert_decl(),
            // Two adjacent identifiers where the first is not a known
            // type name: almost certainly a typo'd or missing typedef
            Identifier(name)
                if !self.is_typedef_name(name)
                    && lookahead!(self, 1, Identifier(_)) =>
            {
                let at = self.cursor.advance();
                Err(self.error(DiagTag::UnknownTypeName(name.into()), at))
            }
            _ => match self.maybe_decl_specifiers()? {
                Some(specs) => self.external_decl_tail(specs),
                None => {
                    let at = self.cursor.peek_idx();
                    Err(self.error(
                        DiagTag::Expected("declaration specifiers".into()),
                        at,
                    ))
                }
            },
        }
    }

    fn external_decl_tail(
        &mut self,
        specs: &'a DeclSpec<'a>,
    ) -> PR<Decl<'a>> {
        // Tag-only declaration, e.g. `struct foo { ... };`
        if check_tok!(self, Semicolon) {
            return Ok(Decl::Normal { specs, list: &[] });
        }

        let mut list: Vec<InitDeclarator> = Vec::with_capacity(1);

        loop {
            let decl = self.declarator()?;

            if self.at_function_body() {
                // A function definition must be the whole declaration;
                // `int foo = 5, bar() { ... }` is not a thing
                if !list.is_empty() {
                    let at = self.cursor.peek_idx();
                    return Err(self.error(
                        DiagTag::Expected(
                            "`;` after top level declarator".into(),
                        ),
                        at,
                    ));
                }

                return self.function_definition(specs, decl);
            }

            if specs.storage.is_typedef() {
                self.define_typedef(decl)?;
            }

            let init = if check_tok!(self, Assign) {
                let init = self.initializer()?;
                Some(self.alloc(init)?)
            } else {
                None
            };

            list.push(InitDeclarator(decl, init));

            if !check_tok!(self, Comma) {
                break;
            }
        }

        require_tok!(self, Semicolon)?;

        Ok(Decl::Normal {
            specs,
            list: self.alloc_slice(&list)?,
        })
    }

    /// Block-scope declaration (no function definitions down here)
    pub(crate) fn declaration(
        &mut self,
        specs: &'a DeclSpec<'a>,
    ) -> PR<Decl<'a>> {
        if check_tok!(self, Semicolon) {
            return Ok(Decl::Normal { specs, list: &[] });
        }

        let mut list: Vec<InitDeclarator> = Vec::with_capacity(1);

        loop {
            let decl = self.declarator()?;

            if specs.storage.is_typedef() {
                self.define_typedef(decl)?;
            }

            let init = if check_tok!(self, Assign) {
                let init = self.initializer()?;
                Some(self.alloc(init)?)
            } else {
                None
            };

            list.push(InitDeclarator(decl, init));

            if !check_tok!(self, Comma) {
                break;
            }
        }

        require_tok!(self, Semicolon)?;

        Ok(Decl::Normal {
            specs,
            list: self.alloc_slice(&list)?,
        })
    }

    pub(crate) fn static_assert_decl(&mut self) -> PR<Decl<'a>> {
        let kw = self.cursor.advance();
        require_tok!(self, LeftParen)?;
        let cond = self.constant_expression()?;
        require_tok!(self, Comma)?;
        let message = require_tok!(self, StringLiteral(_))?;
        require_tok!(self, RightParen)?;
        require_tok!(self, Semicolon)?;

        Ok(Decl::StaticAssert {
            kw,
            cond: self.alloc(cond)?,
            message,
        })
    }

    /// True when the tokens after a declarator can only continue as a
    /// function definition
    fn at_function_body(&self) -> bool {
        if matches!(self.cursor.peek_tag(), LeftCurly) {
            return true;
        }

        // K&R definitions put parameter declarations before the body
        #[cfg(feature = "kr_func_decl")]
        if self.is_type_start() {
            return true;
        }

        false
    }

    #[instrument(skip_all)]
    fn function_definition(
        &mut self,
        specs: &'a DeclSpec<'a>,
        decl: &'a Declarator<'a>,
    ) -> PR<Decl<'a>> {
        match decl.suffixes.last() {
            Some(DeclSuffix::Func(_)) => {}
            // An array suffix where the parameter list should be,
            // e.g. `int foo[100] { ... }`
            Some(DeclSuffix::Array(_)) => {
                let at = self.cursor.peek_idx();
                return Err(
                    self.error(DiagTag::UnexpectedDeclarationSuffix, at)
                );
            }
            None => {
                let at = self.cursor.peek_idx();
                return Err(self
                    .error(DiagTag::Expected("parameter list".into()), at));
            }
        }

        let old_decls = self.kr_declaration_list()?;
        let body = self.compound_statement()?;

        Ok(Decl::Func {
            specs,
            decl,
            old_decls,
            body: self.alloc(body)?,
        })
    }

    #[cfg(feature = "kr_func_decl")]
    fn kr_declaration_list(&mut self) -> PR<&'a [Decl<'a>]> {
        let mut decls = Vec::new();

        while let Some(specs) = self.maybe_decl_specifiers()? {
            decls.push(self.declaration(specs)?);
        }

        self.alloc_slice(&decls)
    }

    #[cfg(not(feature = "kr_func_decl"))]
    fn kr_declaration_list(&mut self) -> PR<&'a [Decl<'a>]> {
        Ok(&[])
    }

    /// Put a typedef'd name into scope so later specifier runs can
    /// recognize it as a type name
    fn define_typedef(&mut self, decl: &'a Declarator<'a>) -> PR<()> {
        let Some(id) = decl.name() else {
            let at = self.cursor.peek_idx();
            return Err(
                self.error(DiagTag::DeclarationHasNoIdentifier, at)
            );
        };

        self.define_symbol(id, SymbolTag::Type)
    }

    fn define_symbol(&mut self, id: TokenIdx, tag: SymbolTag) -> PR<()> {
        let Identifier(name) = self.cursor.tag(id) else {
            unreachable!("symbols are defined from identifier tokens");
        };

        let span = self.cursor.span(id);

        self.symbols
            .define(name.to_string(), (tag, span))
            .map_err(|_| {
                self.error(DiagTag::NameAlreadyDefined(name.into()), id)
            })
    }

    /// `pointer? direct-declarator suffix*`
    pub(crate) fn declarator(&mut self) -> PR<&'a Declarator<'a>> {
        let ptr = self.pointer_chain()?;
        let inner = self.direct_declarator()?;
        let suffixes = self.declarator_suffixes()?;

        self.alloc(Declarator {
            ptr,
            inner,
            suffixes,
        })
    }

    fn pointer_chain(&mut self) -> PR<&'a [PtrLevel]> {
        let mut levels = Vec::new();

        while let Some(star) = match_tok!(self, Asterisk) {
            levels.push(PtrLevel {
                star,
                quals: self.qualifier_list(),
            });
        }

        self.alloc_slice(&levels)
    }

    fn qualifier_list(&mut self) -> Qualifiers {
        let mut quals = Qualifiers::default();

        while let Some(idx) =
            match_tok!(self, Const | Volatile | Restrict | Atomic)
        {
            self.record_qualifier(&mut quals, idx);
        }

        quals
    }

    fn direct_declarator(&mut self) -> PR<DirectDeclarator<'a>> {
        match self.cursor.peek_tag() {
            Identifier(_) => {
                Ok(DirectDeclarator::Identifier(self.cursor.advance()))
            }
            LeftParen if self.is_nested_declarator() => {
                self.cursor.advance();
                let decl = self.declarator()?;
                require_tok!(self, RightParen)?;
                Ok(DirectDeclarator::Paren(decl))
            }
            _ => Ok(DirectDeclarator::Abstract),
        }
    }

    /// `(` opens a nested declarator rather than a function suffix
    /// when what follows could not start a parameter list
    fn is_nested_declarator(&self) -> bool {
        match self.cursor.lookahead(1).0 {
            Asterisk | LeftParen | LeftBrace => true,
            Identifier(name) => !self.is_typedef_name(name),
            _ => false,
        }
    }

    /// Array and function suffixes, collected with a loop rather than
    /// grammar recursion so long declarator chains cannot exhaust the
    /// stack
    fn declarator_suffixes(&mut self) -> PR<&'a [DeclSuffix<'a>]> {
        let mut suffixes = Vec::new();

        loop {
            if check_tok!(self, LeftBrace) {
                suffixes.push(DeclSuffix::Array(self.array_suffix()?));
            } else if check_tok!(self, LeftParen) {
                suffixes.push(DeclSuffix::Func(FuncSuffix {
                    params: self.param_list()?,
                }));
            } else {
                break;
            }
        }

        self.alloc_slice(&suffixes)
    }

    /// `[ static? qualifiers? static? (assignment-expression | *)? ]`,
    /// the opening bracket is already consumed
    fn array_suffix(&mut self) -> PR<ArraySuffix<'a>> {
        let mut static_tok = match_tok!(self, Static);
        let quals = self.qualifier_list();

        if static_tok.is_none() {
            static_tok = match_tok!(self, Static);
        }

        let len = match self.cursor.peek_tag() {
            RightBrace => ArrayLen::Unspecified,
            Asterisk if lookahead!(self, 1, RightBrace) => {
                ArrayLen::Star(self.cursor.advance())
            }
            _ => {
                let len = self.assignment()?;
                ArrayLen::Expr(self.alloc(len)?)
            }
        };

        require_tok!(self, RightBrace)?;

        Ok(ArraySuffix {
            static_tok,
            quals,
            len,
        })
    }

    /// Parameter list, the opening paren is already consumed
    fn param_list(&mut self) -> PR<ParamList<'a>> {
        if check_tok!(self, RightParen) {
            return Ok(ParamList::Empty);
        }

        #[cfg(feature = "kr_func_decl")]
        if let Identifier(name) = self.cursor.peek_tag() {
            if !self.is_typedef_name(name) {
                return self.identifier_list();
            }
        }

        let mut params = Vec::new();
        let mut variadic = None;

        loop {
            if let Some(idx) = match_tok!(self, Ellipsis) {
                variadic = Some(idx);
                break;
            }

            params.push(self.param_decl()?);

            if !check_tok!(self, Comma) {
                break;
            }
        }

        require_tok!(self, RightParen)?;

        Ok(ParamList::Types {
            params: self.alloc_slice(&params)?,
            variadic,
        })
    }

    fn param_decl(&mut self) -> PR<ParamDecl<'a>> {
        let specs = match self.maybe_decl_specifiers()? {
            Some(specs) => specs,
            None => {
                let at = self.cursor.peek_idx();
                return Err(self.error(
                    DiagTag::Expected("parameter declaration".into()),
                    at,
                ));
            }
        };

        let decl = self.maybe_declarator()?;
        Ok(ParamDecl { specs, decl })
    }

    /// A declarator that may be entirely absent, as in `int foo(int)`
    fn maybe_declarator(&mut self) -> PR<Option<&'a Declarator<'a>>> {
        let decl = self.declarator()?;

        let vacant = decl.ptr.is_empty()
            && decl.suffixes.is_empty()
            && matches!(decl.inner, DirectDeclarator::Abstract);

        Ok(if vacant { None } else { Some(decl) })
    }

    #[cfg(feature = "kr_func_decl")]
    fn identifier_list(&mut self) -> PR<ParamList<'a>> {
        let mut ids = vec![require_tok!(self, Identifier(_))?];

        while check_tok!(self, Comma) {
            ids.push(require_tok!(self, Identifier(_))?);
        }

        require_tok!(self, RightParen)?;
        Ok(ParamList::Identifiers(self.alloc_slice(&ids)?))
    }

    /// `struct`/`union` specifier; the caller peeked the keyword
    pub(crate) fn record_specifier(&mut self) -> PR<&'a RecordSpec<'a>> {
        let kw = self.cursor.advance();
        let name = match_tok!(self, Identifier(_));

        // Bodyless reference, e.g. `struct foo x;`
        if !matches!(self.cursor.peek_tag(), LeftCurly) {
            if name.is_none() {
                let at = self.cursor.peek_idx();
                return Err(
                    self.error(DiagTag::DeclarationHasNoIdentifier, at)
                );
            }

            return self.alloc(RecordSpec {
                kw,
                name,
                fields: None,
            });
        }

        self.cursor.advance(); // {
        let mut fields = Vec::new();

        while !check_tok!(self, RightCurly) {
            if self.cursor.at_eof() {
                require_tok!(self, RightCurly)?;
            }

            fields.push(self.field_decl()?);
        }

        self.alloc(RecordSpec {
            kw,
            name,
            fields: Some(self.alloc_slice(&fields)?),
        })
    }

    fn field_decl(&mut self) -> PR<FieldDecl<'a>> {
        let specs = match self.maybe_specifier_qualifiers()? {
            Some(specs) => specs,
            None => {
                let at = self.cursor.peek_idx();
                return Err(self.error(
                    DiagTag::Expected("specifier qualifier list".into()),
                    at,
                ));
            }
        };

        let mut list = Vec::new();

        // An anonymous member (`struct { int a; };` inside another
        // record) has specifiers and no declarators at all
        if !matches!(self.cursor.peek_tag(), Semicolon) {
            loop {
                let decl = if matches!(self.cursor.peek_tag(), Colon) {
                    None
                } else {
                    Some(self.declarator()?)
                };

                let width = if check_tok!(self, Colon) {
                    let width = self.constant_expression()?;
                    Some(self.alloc(width)?)
                } else {
                    None
                };

                list.push(FieldDeclarator { decl, width });

                if !check_tok!(self, Comma) {
                    break;
                }
            }
        }

        require_tok!(self, Semicolon)?;

        Ok(FieldDecl {
            specs,
            list: self.alloc_slice(&list)?,
        })
    }

    /// `enum` specifier; the caller peeked the keyword. Enumeration
    /// constants go into the symbol table as ordinary names.
    pub(crate) fn enum_specifier(&mut self) -> PR<&'a EnumSpec<'a>> {
        let kw = self.cursor.advance();
        let name = match_tok!(self, Identifier(_));

        if !matches!(self.cursor.peek_tag(), LeftCurly) {
            if name.is_none() {
                let at = self.cursor.peek_idx();
                return Err(
                    self.error(DiagTag::DeclarationHasNoIdentifier, at)
                );
            }

            return self.alloc(EnumSpec {
                kw,
                name,
                consts: None,
            });
        }

        self.cursor.advance(); // {
        let mut consts = Vec::new();

        // Dangling commas are fine: `enum { A, B, }`
        while !check_tok!(self, RightCurly) {
            let id = require_tok!(self, Identifier(_))?;
            self.define_symbol(id, SymbolTag::Name)?;

            let cexpr = if check_tok!(self, Assign) {
                let cexpr = self.constant_expression()?;
                Some(self.alloc(cexpr)?)
            } else {
                None
            };

            consts.push(EnumConstDecl { id, cexpr });

            if !check_tok!(self, Comma) {
                require_tok!(self, RightCurly)?;
                break;
            }
        }

        self.alloc(EnumSpec {
            kw,
            name,
            consts: Some(self.alloc_slice(&consts)?),
        })
    }

    /// `specifier-qualifier-list abstract-declarator?` as used by
    /// casts, `sizeof` and `_Atomic(...)`
    pub(crate) fn type_name(&mut self) -> PR<&'a TypeName<'a>> {
        let specs = match self.maybe_specifier_qualifiers()? {
            Some(specs) => specs,
            None => {
                let at = self.cursor.peek_idx();
                return Err(
                    self.error(DiagTag::Expected("type name".into()), at)
                );
            }
        };

        let decl = self.maybe_declarator()?;

        if let Some(decl) = decl {
            if !decl.is_abstract() {
                let at = decl.name().unwrap_or(self.cursor.peek_idx());
                return Err(self.error(
                    DiagTag::Expected("abstract declarator".into()),
                    at,
                ));
            }
        }

        self.alloc(TypeName { specs, decl })
    }

    pub(crate) fn initializer(&mut self) -> PR<Initializer<'a>> {
        if matches!(self.cursor.peek_tag(), LeftCurly) {
            Ok(Initializer::List(self.braced_initializer_list()?))
        } else {
            let expr = self.assignment()?;
            Ok(Initializer::Assign(self.alloc(expr)?))
        }
    }

    /// `{ initializer (, initializer)* ,? }`
    pub(crate) fn braced_initializer_list(
        &mut self,
    ) -> PR<&'a [Initializer<'a>]> {
        require_tok!(self, LeftCurly)?;
        let mut list = Vec::new();

        while !check_tok!(self, RightCurly) {
            list.push(self.initializer()?);

            if !check_tok!(self, Comma) {
                require_tok!(self, RightCurly)?;
                break;
            }
        }

        self.alloc_slice(&list)
    }

    /// True when the current token could begin a type name
    pub(crate) fn is_type_start(&self) -> bool {
        self.starts_type_name(self.cursor.peek_tag())
    }

    pub(crate) fn starts_type_name(&self, tag: TokenTag<'_>) -> bool {
        match tag {
            Void | Bool | Char | Short | Int | Long | Float | Double
            | Signed | Unsigned | Complex | Atomic | Struct | Union
            | Enum | Const | Volatile | Restrict => true,
            Identifier(name) => self.is_typedef_name(name),
            _ => false,
        }
    }
}
