pub mod ast_dump;
pub mod token;
mod tree_builder;

pub use tree_builder::{TreeBuilder, TreeItem};

use token::TokenIdx;

/// Root of a parse: every top level declaration in source order plus
/// the position of the end-of-input sentinel. A root is always
/// produced, even when parsing stopped early on a malformed
/// declaration.
#[derive(Debug, Clone, Copy)]
pub struct TranslationUnit<'a> {
    pub decls: &'a [Decl<'a>],
    pub eof: TokenIdx,
}

/// External or block-scope declaration
#[derive(Debug, Clone, Copy)]
pub enum Decl<'a> {
    /// ```c
    ///    register int a = 5, b;
    /// /* ^~~~~~~~~~~~ specs, then zero or more declarator/initializer
    ///    pairs */
    /// ```
    Normal {
        specs: &'a DeclSpec<'a>,
        list: &'a [InitDeclarator<'a>],
    },
    /// ```c
    /// static int foo(void) { /* ... */ }
    /// ```
    Func {
        specs: &'a DeclSpec<'a>,
        decl: &'a Declarator<'a>,
        /// K&R style parameter declarations between the declarator and
        /// the body
        old_decls: &'a [Decl<'a>],
        body: &'a Stmt<'a>,
    },
    /// `_Static_assert(expr, "message");`
    StaticAssert {
        kw: TokenIdx,
        cond: &'a Expr<'a>,
        message: TokenIdx,
    },
}

/// Declaration specifiers: storage class flags, at most one type
/// specifier, a qualifier bundle and function specifiers. Every set
/// slot remembers the token that set it.
#[derive(Debug, Clone, Copy)]
pub struct DeclSpec<'a> {
    pub storage: StorageClass,
    pub ty: Option<TypeSpecTag<'a>>,
    pub quals: Qualifiers,
    pub func: FuncSpec,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StorageClass {
    pub typedef_tok: Option<TokenIdx>,
    pub extern_tok: Option<TokenIdx>,
    pub static_tok: Option<TokenIdx>,
    pub thread_local_tok: Option<TokenIdx>,
    pub auto_tok: Option<TokenIdx>,
    pub register_tok: Option<TokenIdx>,
}

impl StorageClass {
    pub fn is_typedef(&self) -> bool {
        self.typedef_tok.is_some()
    }
}

/// Single-occurrence qualifier markers. A repeated qualifier is a
/// warning, the slot keeps the first occurrence.
#[derive(Debug, Default, Clone, Copy)]
pub struct Qualifiers {
    pub const_tok: Option<TokenIdx>,
    pub volatile_tok: Option<TokenIdx>,
    pub restrict_tok: Option<TokenIdx>,
    pub atomic_tok: Option<TokenIdx>,
}

impl Qualifiers {
    pub fn is_empty(&self) -> bool {
        self.const_tok.is_none()
            && self.volatile_tok.is_none()
            && self.restrict_tok.is_none()
            && self.atomic_tok.is_none()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FuncSpec {
    pub inline_tok: Option<TokenIdx>,
    pub noreturn_tok: Option<TokenIdx>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// A `signed`/`unsigned` keyword together with its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sign {
    pub kw: TokenIdx,
    pub signedness: Signedness,
}

/// Normalized result of a run of type specifier keywords, e.g.
/// `unsigned long long int` folds into a single `Long` case with its
/// sign, `int` and second-`long` slots filled.
#[derive(Debug, Clone, Copy)]
pub enum TypeSpecTag<'a> {
    Void {
        kw: TokenIdx,
    },
    Bool {
        kw: TokenIdx,
    },
    Char {
        kw: TokenIdx,
        sign: Option<Sign>,
    },
    Short {
        kw: TokenIdx,
        sign: Option<Sign>,
        int: Option<TokenIdx>,
    },
    /// A bare `signed`/`unsigned` run normalizes here with `int: None`
    Int {
        int: Option<TokenIdx>,
        sign: Option<Sign>,
    },
    Long {
        kw: TokenIdx,
        sign: Option<Sign>,
        int: Option<TokenIdx>,
        /// Second `long` of `long long`
        second: Option<TokenIdx>,
    },
    Float {
        kw: TokenIdx,
        complex: Option<TokenIdx>,
    },
    Double {
        kw: TokenIdx,
        long_kw: Option<TokenIdx>,
        complex: Option<TokenIdx>,
    },
    /// `_Atomic ( type-name )`
    Atomic {
        kw: TokenIdx,
        ty: &'a TypeName<'a>,
    },
    Enum(&'a EnumSpec<'a>),
    Record(&'a RecordSpec<'a>),
    /// An identifier found in the typedef name set
    TypedefName(TokenIdx),
}

/// `struct`/`union` specifier, possibly bodyless
#[derive(Debug, Clone, Copy)]
pub struct RecordSpec<'a> {
    /// The `struct` or `union` keyword
    pub kw: TokenIdx,
    pub name: Option<TokenIdx>,
    pub fields: Option<&'a [FieldDecl<'a>]>,
}

#[derive(Debug, Clone, Copy)]
pub struct EnumSpec<'a> {
    pub kw: TokenIdx,
    pub name: Option<TokenIdx>,
    pub consts: Option<&'a [EnumConstDecl<'a>]>,
}

/// Field declaration in some record.
/// For example:
/// ```c
/// struct foo {
///     int bar; /* field */
///     /* ... */
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl<'a> {
    pub specs: &'a DeclSpec<'a>,
    pub list: &'a [FieldDeclarator<'a>],
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDeclarator<'a> {
    /// Absent for an anonymous bit field, `unsigned : 3;`
    pub decl: Option<&'a Declarator<'a>>,
    /// A bit field width, in C you can write:
    /// ```c
    /// struct foo {
    ///     unsigned a: 5;
    ///              /* ^ width */
    /// };
    /// ```
    pub width: Option<&'a Expr<'a>>,
}

/// Enum variant
#[derive(Debug, Clone, Copy)]
pub struct EnumConstDecl<'a> {
    pub id: TokenIdx,
    /// An `enum` variant can be initialized with a constant expression:
    /// ```c
    /// enum foo {
    ///     bar = 1,
    ///        /* ^ constant expression */
    /// };
    /// ```
    pub cexpr: Option<&'a Expr<'a>>,
}

/// `specifiers abstract-declarator?` as it appears in casts, `sizeof`
/// and `_Atomic(...)`
#[derive(Debug, Clone, Copy)]
pub struct TypeName<'a> {
    pub specs: &'a DeclSpec<'a>,
    pub decl: Option<&'a Declarator<'a>>,
}

/// Declarator: optional pointer chain, a base form, and suffixes
/// collected left to right.
/// ```c
/// int *const (*fp)(void);
///  /* ^~~~~~ ptr  ^~~~~~ suffix on the parenthesized base */
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Declarator<'a> {
    pub ptr: &'a [PtrLevel],
    pub inner: DirectDeclarator<'a>,
    pub suffixes: &'a [DeclSuffix<'a>],
}

impl<'a> Declarator<'a> {
    pub fn is_abstract(&self) -> bool {
        self.inner.is_abstract()
    }

    /// The identifier the declarator binds, if any
    pub fn name(&self) -> Option<TokenIdx> {
        self.inner.name()
    }
}

/// One `*` of a pointer chain with its qualifier run
#[derive(Debug, Clone, Copy)]
pub struct PtrLevel {
    pub star: TokenIdx,
    pub quals: Qualifiers,
}

#[derive(Debug, Clone, Copy)]
pub enum DirectDeclarator<'a> {
    Identifier(TokenIdx),
    Paren(&'a Declarator<'a>),
    /// Declares no name, used in type names and prototypes
    Abstract,
}

impl DirectDeclarator<'_> {
    pub fn is_abstract(&self) -> bool {
        match self {
            Self::Abstract => true,
            Self::Identifier(_) => false,
            Self::Paren(decl) => decl.inner.is_abstract(),
        }
    }

    pub fn name(&self) -> Option<TokenIdx> {
        match self {
            Self::Identifier(id) => Some(*id),
            Self::Paren(decl) => decl.inner.name(),
            Self::Abstract => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum DeclSuffix<'a> {
    /// ```c
    /// int c[static const 123];
    /// /*   ^~~~~~~~~~~~~~~~~~ array declarator suffix */
    /// ```
    Array(ArraySuffix<'a>),
    /// ```c
    /// int *(func)(int a);
    ///         /* ^~~~~~~ function declarator suffix */
    /// ```
    Func(FuncSuffix<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ArraySuffix<'a> {
    pub static_tok: Option<TokenIdx>,
    pub quals: Qualifiers,
    pub len: ArrayLen<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrayLen<'a> {
    /// `[]`
    Unspecified,
    /// `[*]`, a VLA of unspecified length in a prototype
    Star(TokenIdx),
    Expr(&'a Expr<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct FuncSuffix<'a> {
    pub params: ParamList<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ParamList<'a> {
    /// `()`
    Empty,
    /// Typed parameter list, `(int a, char *b, ...)`
    Types {
        params: &'a [ParamDecl<'a>],
        variadic: Option<TokenIdx>,
    },
    /// K&R identifier list, `(bar, baz)`
    Identifiers(&'a [TokenIdx]),
}

/// Parameter declaration
#[derive(Debug, Clone, Copy)]
pub struct ParamDecl<'a> {
    pub specs: &'a DeclSpec<'a>,
    pub decl: Option<&'a Declarator<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct InitDeclarator<'a>(
    pub &'a Declarator<'a>,
    pub Option<&'a Initializer<'a>>,
);

#[derive(Debug, Clone, Copy)]
pub enum Initializer<'a> {
    Assign(&'a Expr<'a>),
    List(&'a [Initializer<'a>]),
}

#[derive(Debug, Clone, Copy)]
pub struct Stmt<'a> {
    pub tag: StmtTag<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum StmtTag<'a> {
    /// Expression statement; `None` for the null statement `;`
    Expr(Option<&'a Expr<'a>>),
    Compound(&'a [Stmt<'a>]),
    Decl(&'a Decl<'a>),
    /// while (cond) stmt
    While {
        cond: &'a Expr<'a>,
        stmt: &'a Stmt<'a>,
    },
    /// do stmt while (cond);
    Do {
        cond: &'a Expr<'a>,
        stmt: &'a Stmt<'a>,
    },
    /// for (init cond; step) stmt — the init clause is a declaration
    /// or an expression statement, either way it owns its `;`
    For {
        init: &'a Stmt<'a>,
        cond: Option<&'a Expr<'a>>,
        step: Option<&'a Expr<'a>>,
        stmt: &'a Stmt<'a>,
    },
    /// if (cond) stmt else stmt
    If {
        cond: &'a Expr<'a>,
        then: &'a Stmt<'a>,
        otherwise: Option<&'a Stmt<'a>>,
    },
    /// switch (cond) stmt
    Switch {
        cond: &'a Expr<'a>,
        stmt: &'a Stmt<'a>,
    },
    /// case cexpr: stmt
    Case {
        cexpr: &'a Expr<'a>,
        stmt: &'a Stmt<'a>,
    },
    /// default: stmt
    Default(&'a Stmt<'a>),
    /// id: stmt
    Label {
        id: TokenIdx,
        stmt: &'a Stmt<'a>,
    },
    Break,
    Continue,
    Return {
        kw: TokenIdx,
        expr: Option<&'a Expr<'a>>,
    },
    Goto {
        kw: TokenIdx,
        label: TokenIdx,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Expr<'a> {
    pub tag: ExprTag<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ExprTag<'a> {
    /// Identifier or literal leaf
    Primary(TokenIdx),
    BinExpr {
        op: TokenIdx,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
    },
    /// Prefix operator, including `++`/`--`
    UnExpr {
        op: TokenIdx,
        rhs: &'a Expr<'a>,
    },
    /// Postfix `++`/`--`
    PostIncr {
        op: TokenIdx,
        lhs: &'a Expr<'a>,
    },
    /// lhs[index]
    Index {
        lhs: &'a Expr<'a>,
        index: &'a Expr<'a>,
        bracket: TokenIdx,
    },
    Call {
        /// foo(5, bar)
        /// ^~~ callee
        callee: &'a Expr<'a>,
        /// foo(5, bar)
        ///    ^~~~~~~~ args
        args: &'a [Expr<'a>],
    },
    /// `lhs.member` or `lhs->member`, told apart by the op token
    MemberAccess {
        lhs: &'a Expr<'a>,
        op: TokenIdx,
        member: TokenIdx,
    },
    SizeofType {
        kw: TokenIdx,
        ty: &'a TypeName<'a>,
    },
    SizeofExpr {
        kw: TokenIdx,
        expr: &'a Expr<'a>,
    },
    AlignofType {
        kw: TokenIdx,
        ty: &'a TypeName<'a>,
    },
    /// `(type-name) expr`
    Cast {
        ty: &'a TypeName<'a>,
        expr: &'a Expr<'a>,
    },
    /// `(type-name){ initializers }`
    CompoundLiteral {
        ty: &'a TypeName<'a>,
        init: &'a [Initializer<'a>],
    },
    Conditional {
        cond: &'a Expr<'a>,
        then: &'a Expr<'a>,
        otherwise: &'a Expr<'a>,
    },
}
