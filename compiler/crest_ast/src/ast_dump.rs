//! AST dumping in the style of `clang -Xclang -ast-dump <...>`.
//! Nodes reference tokens by position, so dumping needs the
//! [`TokenStream`] of the parse to resolve names and operators.

use crate::token::{NumberLiteralKind, TokenIdx, TokenStream, TokenTag};
use crate::tree_builder::TreeBuilder;
use crate::*;

pub struct AstDumper {
    tree_builder: TreeBuilder,
}

impl AstDumper {
    pub fn new(entry: &dyn AstNodeDump, toks: &TokenStream<'_>) -> Self {
        let mut tree_builder = TreeBuilder::new();
        entry.dump(&mut tree_builder, toks);

        Self { tree_builder }
    }

}

impl std::fmt::Display for AstDumper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tree_builder.build() {
            Some(tree) => write!(f, "{tree}"),
            None => Ok(()),
        }
    }
}

/// Helper trait that defines the interface for AST node dumping
pub trait AstNodeDump {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>);
}

fn ident(toks: &TokenStream<'_>, idx: TokenIdx) -> String {
    toks.tag(idx).to_string()
}

impl AstNodeDump for TranslationUnit<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        tb.open("TranslationUnitDecl".into());

        for decl in self.decls {
            decl.dump(tb, toks);
        }

        tb.close();
    }
}

impl AstNodeDump for Decl<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        match self {
            Self::Normal { specs, list } => {
                if list.is_empty() {
                    // Tag-only declaration, e.g. `struct foo { ... };`
                    match &specs.ty {
                        Some(ty) => ty.dump(tb, toks),
                        None => {
                            tb.append_leaf("EmptyDecl".into());
                        }
                    }
                    return;
                }

                for init_decl in list.iter() {
                    let name = init_decl
                        .0
                        .name()
                        .map(|id| ident(toks, id))
                        .unwrap_or_else(|| "<anonymous>".into());

                    let kind = if specs.storage.is_typedef() {
                        "TypedefDecl"
                    } else if matches!(
                        init_decl.0.suffixes.first(),
                        Some(DeclSuffix::Func(_))
                    ) {
                        "FunctionDecl"
                    } else {
                        "VarDecl"
                    };

                    tb.open(format!("{kind} {name}"));
                    if let Some(ty) = &specs.ty {
                        ty.dump(tb, toks);
                    }
                    if let Some(init) = init_decl.1 {
                        init.dump(tb, toks);
                    }
                    tb.close();
                }
            }
            Self::Func {
                decl, body, ..
            } => {
                let name = decl
                    .name()
                    .map(|id| ident(toks, id))
                    .unwrap_or_else(|| "<anonymous>".into());

                tb.open(format!("FunctionDecl {name}"));
                body.dump(tb, toks);
                tb.close();
            }
            Self::StaticAssert { cond, .. } => {
                tb.open("StaticAssertDecl".into());
                cond.dump(tb, toks);
                tb.close();
            }
        }
    }
}

impl TypeSpecTag<'_> {
    /// Canonical spelling of a builtin specifier combination
    fn builtin_name(&self) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();

        let sign_part = |sign: &Option<Sign>| match sign {
            Some(Sign {
                signedness: Signedness::Unsigned,
                ..
            }) => Some("unsigned"),
            Some(Sign {
                signedness: Signedness::Signed,
                ..
            }) => Some("signed"),
            None => None,
        };

        match self {
            Self::Void { .. } => parts.push("void"),
            Self::Bool { .. } => parts.push("_Bool"),
            Self::Char { sign, .. } => {
                parts.extend(sign_part(sign));
                parts.push("char");
            }
            Self::Short { sign, int, .. } => {
                parts.extend(sign_part(sign));
                parts.push("short");
                if int.is_some() {
                    parts.push("int");
                }
            }
            Self::Int { sign, .. } => {
                parts.extend(sign_part(sign));
                parts.push("int");
            }
            Self::Long {
                sign, int, second, ..
            } => {
                parts.extend(sign_part(sign));
                parts.push("long");
                if second.is_some() {
                    parts.push("long");
                }
                if int.is_some() {
                    parts.push("int");
                }
            }
            Self::Float { complex, .. } => {
                parts.push("float");
                if complex.is_some() {
                    parts.push("_Complex");
                }
            }
            Self::Double {
                long_kw, complex, ..
            } => {
                if long_kw.is_some() {
                    parts.push("long");
                }
                parts.push("double");
                if complex.is_some() {
                    parts.push("_Complex");
                }
            }
            _ => return None,
        }

        Some(parts.join(" "))
    }
}

impl AstNodeDump for TypeSpecTag<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        if let Some(name) = self.builtin_name() {
            tb.append_leaf(format!("BuiltinType '{name}'"));
            return;
        }

        match self {
            Self::Atomic { ty, .. } => {
                tb.open("AtomicType".into());
                ty.dump(tb, toks);
                tb.close();
            }
            Self::Record(record) => record.dump(tb, toks),
            Self::Enum(spec) => spec.dump(tb, toks),
            Self::TypedefName(id) => {
                tb.append_leaf(format!(
                    "TypedefType '{}'",
                    ident(toks, *id)
                ));
            }
            _ => unreachable!(),
        }
    }
}

impl AstNodeDump for RecordSpec<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        let kw = ident(toks, self.kw);
        let name = self
            .name
            .map(|id| format!(" {}", ident(toks, id)))
            .unwrap_or_default();

        tb.open(format!("RecordDecl {kw}{name}"));

        for field in self.fields.unwrap_or_default() {
            for declarator in field.list.iter() {
                let name = declarator
                    .decl
                    .and_then(|d| d.name())
                    .map(|id| ident(toks, id))
                    .unwrap_or_else(|| "<anonymous>".into());

                tb.open(format!("FieldDecl {name}"));
                if let Some(width) = declarator.width {
                    width.dump(tb, toks);
                }
                tb.close();
            }
        }

        tb.close();
    }
}

impl AstNodeDump for EnumSpec<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        let name = self
            .name
            .map(|id| format!(" {}", ident(toks, id)))
            .unwrap_or_default();

        tb.open(format!("EnumDecl{name}"));

        for decl in self.consts.unwrap_or_default() {
            tb.open(format!(
                "EnumConstantDecl {}",
                ident(toks, decl.id)
            ));
            if let Some(cexpr) = decl.cexpr {
                cexpr.dump(tb, toks);
            }
            tb.close();
        }

        tb.close();
    }
}

impl AstNodeDump for TypeName<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        match &self.specs.ty {
            Some(ty) => ty.dump(tb, toks),
            None => {
                tb.append_leaf("TypeName".into());
            }
        }
    }
}

impl AstNodeDump for Stmt<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        match &self.tag {
            StmtTag::Expr(None) => {
                tb.append_leaf("NullStmt".into());
            }
            StmtTag::Expr(Some(expr)) => expr.dump(tb, toks),
            StmtTag::Compound(stmts) => {
                tb.open("CompoundStmt".into());
                for stmt in stmts.iter() {
                    stmt.dump(tb, toks);
                }
                tb.close();
            }
            StmtTag::Decl(decl) => {
                tb.open("DeclStmt".into());
                decl.dump(tb, toks);
                tb.close();
            }
            StmtTag::While { cond, stmt } => {
                tb.open("WhileStmt".into());
                cond.dump(tb, toks);
                stmt.dump(tb, toks);
                tb.close();
            }
            StmtTag::Do { cond, stmt } => {
                tb.open("DoStmt".into());
                stmt.dump(tb, toks);
                cond.dump(tb, toks);
                tb.close();
            }
            StmtTag::For {
                init,
                cond,
                step,
                stmt,
            } => {
                tb.open("ForStmt".into());
                init.dump(tb, toks);
                if let Some(cond) = cond {
                    cond.dump(tb, toks);
                }
                if let Some(step) = step {
                    step.dump(tb, toks);
                }
                stmt.dump(tb, toks);
                tb.close();
            }
            StmtTag::If {
                cond,
                then,
                otherwise,
            } => {
                tb.open("IfStmt".into());
                cond.dump(tb, toks);
                then.dump(tb, toks);
                if let Some(stmt) = otherwise {
                    stmt.dump(tb, toks);
                }
                tb.close();
            }
            StmtTag::Switch { cond, stmt } => {
                tb.open("SwitchStmt".into());
                cond.dump(tb, toks);
                stmt.dump(tb, toks);
                tb.close();
            }
            StmtTag::Case { cexpr, stmt } => {
                tb.open("CaseStmt".into());
                cexpr.dump(tb, toks);
                stmt.dump(tb, toks);
                tb.close();
            }
            StmtTag::Default(stmt) => {
                tb.open("DefaultStmt".into());
                stmt.dump(tb, toks);
                tb.close();
            }
            StmtTag::Label { id, stmt } => {
                tb.open(format!("LabelStmt '{}'", ident(toks, *id)));
                stmt.dump(tb, toks);
                tb.close();
            }
            StmtTag::Break => {
                tb.append_leaf("BreakStmt".into());
            }
            StmtTag::Continue => {
                tb.append_leaf("ContinueStmt".into());
            }
            StmtTag::Return { expr, .. } => {
                tb.open("ReturnStmt".into());
                if let Some(expr) = expr {
                    expr.dump(tb, toks);
                }
                tb.close();
            }
            StmtTag::Goto { label, .. } => {
                tb.append_leaf(format!(
                    "GotoStmt '{}'",
                    ident(toks, *label)
                ));
            }
        }
    }
}

impl AstNodeDump for Expr<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        match &self.tag {
            ExprTag::Primary(idx) => {
                let header = match toks.tag(*idx) {
                    TokenTag::Identifier(name) => {
                        format!("DeclRefExpr '{name}'")
                    }
                    tag @ TokenTag::NumberLiteral { kind, .. } => {
                        match kind {
                            NumberLiteralKind::Int => {
                                format!("IntegerLiteral '{tag}'")
                            }
                            _ => format!("FloatingLiteral '{tag}'"),
                        }
                    }
                    TokenTag::StringLiteral(s) => {
                        format!("StringLiteral \"{s}\"")
                    }
                    TokenTag::CharLiteral => "CharacterLiteral".into(),
                    tag => format!("RecoveryExpr '{tag}'"),
                };
                tb.append_leaf(header);
            }
            ExprTag::BinExpr { op, lhs, rhs } => {
                tb.open(format!("BinaryOperator '{}'", toks.tag(*op)));
                lhs.dump(tb, toks);
                rhs.dump(tb, toks);
                tb.close();
            }
            ExprTag::UnExpr { op, rhs } => {
                tb.open(format!(
                    "UnaryOperator prefix '{}'",
                    toks.tag(*op)
                ));
                rhs.dump(tb, toks);
                tb.close();
            }
            ExprTag::PostIncr { op, lhs } => {
                tb.open(format!(
                    "UnaryOperator postfix '{}'",
                    toks.tag(*op)
                ));
                lhs.dump(tb, toks);
                tb.close();
            }
            ExprTag::Index { lhs, index, .. } => {
                tb.open("ArraySubscriptExpr".into());
                lhs.dump(tb, toks);
                index.dump(tb, toks);
                tb.close();
            }
            ExprTag::Call { callee, args } => {
                tb.open("CallExpr".into());
                callee.dump(tb, toks);
                for arg in args.iter() {
                    arg.dump(tb, toks);
                }
                tb.close();
            }
            ExprTag::MemberAccess { lhs, op, member } => {
                tb.open(format!(
                    "MemberExpr '{}{}'",
                    toks.tag(*op),
                    ident(toks, *member)
                ));
                lhs.dump(tb, toks);
                tb.close();
            }
            ExprTag::SizeofType { ty, .. } => {
                tb.open("UnaryExprOrTypeTraitExpr sizeof".into());
                ty.dump(tb, toks);
                tb.close();
            }
            ExprTag::SizeofExpr { expr, .. } => {
                tb.open("UnaryExprOrTypeTraitExpr sizeof".into());
                expr.dump(tb, toks);
                tb.close();
            }
            ExprTag::AlignofType { ty, .. } => {
                tb.open("UnaryExprOrTypeTraitExpr alignof".into());
                ty.dump(tb, toks);
                tb.close();
            }
            ExprTag::Cast { ty, expr } => {
                tb.open("CStyleCastExpr".into());
                ty.dump(tb, toks);
                expr.dump(tb, toks);
                tb.close();
            }
            ExprTag::CompoundLiteral { ty, init } => {
                tb.open("CompoundLiteralExpr".into());
                ty.dump(tb, toks);
                for item in init.iter() {
                    item.dump(tb, toks);
                }
                tb.close();
            }
            ExprTag::Conditional {
                cond,
                then,
                otherwise,
            } => {
                tb.open("ConditionalOperator".into());
                cond.dump(tb, toks);
                then.dump(tb, toks);
                otherwise.dump(tb, toks);
                tb.close();
            }
        }
    }
}

impl AstNodeDump for Initializer<'_> {
    fn dump(&self, tb: &mut TreeBuilder, toks: &TokenStream<'_>) {
        match self {
            Self::Assign(expr) => expr.dump(tb, toks),
            Self::List(list) => {
                tb.open("InitListExpr".into());
                for init in list.iter() {
                    init.dump(tb, toks);
                }
                tb.close();
            }
        }
    }
}
