use crest_ast::{Decl, Stmt, StmtTag};

use super::with_parsed;
use crate::DiagTag;

/// Body statements of the only function in the outcome
fn body_of<'o>(
    outcome: &crate::ParseOutcome<'o>,
) -> &'o [Stmt<'o>] {
    match outcome.unit.decls {
        [Decl::Func { body, .. }] => match body.tag {
            StmtTag::Compound(stmts) => stmts,
            ref tag => panic!("body parsed as {tag:?}"),
        },
        decls => panic!("expected a single function, got {decls:?}"),
    }
}

#[test]
fn control_statements() {
    let src = "
        void run(int a, int b) {
            if (a) b; else a;
            while (a) { b; }
            do a; while (b);
            switch (a) {
                case 1: break;
                default: break;
            }
        }
    ";

    with_parsed(src, |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);
        assert_eq!(body.len(), 4);

        assert!(matches!(
            body[0].tag,
            StmtTag::If {
                otherwise: Some(_),
                ..
            }
        ));
        assert!(matches!(body[1].tag, StmtTag::While { .. }));
        assert!(matches!(body[2].tag, StmtTag::Do { .. }));

        match body[3].tag {
            StmtTag::Switch { stmt, .. } => match stmt.tag {
                StmtTag::Compound(stmts) => {
                    assert!(matches!(stmts[0].tag, StmtTag::Case { .. }));
                    assert!(matches!(
                        stmts[1].tag,
                        StmtTag::Default(_)
                    ));
                }
                ref tag => panic!("switch body parsed as {tag:?}"),
            },
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn for_with_declaration_init() {
    with_parsed("void f(void) { for (int i = 0; i < 10; ++i) continue; }", |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);

        match body[0].tag {
            StmtTag::For {
                init, cond, step, ..
            } => {
                assert!(matches!(init.tag, StmtTag::Decl(_)));
                assert!(cond.is_some());
                assert!(step.is_some());
            }
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn for_clauses_may_all_be_empty() {
    with_parsed("void f(void) { for (;;) break; }", |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);

        match body[0].tag {
            StmtTag::For {
                init, cond, step, ..
            } => {
                assert!(matches!(init.tag, StmtTag::Expr(None)));
                assert!(cond.is_none());
                assert!(step.is_none());
            }
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn labels_and_jumps() {
    let src = "
        void f(int x) {
            again:
            if (x) goto again;
            return;
        }
    ";

    with_parsed(src, |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);

        match body[0].tag {
            StmtTag::Label { stmt, .. } => {
                assert!(matches!(stmt.tag, StmtTag::If { .. }));
            }
            ref tag => panic!("parsed as {tag:?}"),
        }

        assert!(matches!(
            body[1].tag,
            StmtTag::Return { expr: None, .. }
        ));
    });
}

#[test]
fn identifier_statement_is_not_a_label() {
    // `x;` starts with an identifier but has no colon, so the cursor
    // retreats and reparses it as an expression statement
    with_parsed("void f(int x) { x; }", |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);
        assert!(matches!(body[0].tag, StmtTag::Expr(Some(_))));
    });
}

#[test]
fn null_statement() {
    with_parsed("void f(void) { ; }", |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);
        assert!(matches!(body[0].tag, StmtTag::Expr(None)));
    });
}

#[test]
fn return_with_value() {
    with_parsed("int f(void) { return 1 + 2; }", |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);
        assert!(matches!(
            body[0].tag,
            StmtTag::Return { expr: Some(_), .. }
        ));
    });
}

#[test]
fn block_scope_declarations_and_typedefs() {
    let src = "
        void f(void) {
            typedef int len_t;
            len_t n = 0;
            n;
        }
    ";

    with_parsed(src, |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);
        assert!(matches!(body[0].tag, StmtTag::Decl(_)));
        assert!(matches!(body[1].tag, StmtTag::Decl(_)));
        assert!(matches!(body[2].tag, StmtTag::Expr(Some(_))));
    });
}

#[test]
fn block_scope_typedef_goes_out_of_scope() {
    // `len_t` is a typedef only inside f's body; afterwards the same
    // spelling is an unknown type name again
    let src = "
        void f(void) { typedef int len_t; }
        len_t x;
    ";

    with_parsed(src, |out| {
        assert_eq!(out.unit.decls.len(), 1);
        assert!(out
            .diagnostics
            .iter()
            .any(|diag| matches!(diag.tag, DiagTag::UnknownTypeName(_))));
    });
}

#[test]
fn missing_semicolon_propagates() {
    with_parsed("void f(void) { return 1 }", |out| {
        assert!(out.unit.decls.is_empty());
        assert!(out.diagnostics.iter().any(|diag| matches!(
            diag.tag,
            DiagTag::ExpectedToken { .. }
        )));
    });
}

#[test]
fn block_scope_static_assert() {
    with_parsed("void f(void) { _Static_assert(1, \"ok\"); }", |out| {
        assert!(out.diagnostics.is_empty());
        let body = body_of(out);
        assert!(matches!(body[0].tag, StmtTag::Decl(_)));
    });
}

#[test]
fn comments_are_invisible_to_the_grammar() {
    let src = "int /* width */ x /* name */ = // init\n 5;";

    with_parsed(src, |out| {
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.unit.decls.len(), 1);
    });
}
