use crest_ast::token::TokenTag;
use crest_ast::{
    ArrayLen, Decl, DeclSuffix, DirectDeclarator, ParamList, TypeSpecTag,
};

use super::with_parsed;
use crate::DiagTag;

#[test]
fn function_definition() {
    with_parsed("int main(void) { return 0; }", |out| {
        assert!(out.diagnostics.is_empty());

        match &out.unit.decls[..] {
            [Decl::Func { decl, .. }] => {
                let name = decl.name().unwrap();
                assert!(matches!(
                    out.tokens.tag(name),
                    TokenTag::Identifier("main")
                ));
                assert!(matches!(
                    decl.suffixes,
                    [DeclSuffix::Func(_)]
                ));
            }
            decls => panic!("parsed as {decls:?}"),
        }
    });
}

#[test]
fn declarator_shapes() {
    with_parsed("int *a[10], (*fp)(int, char *);", |out| {
        assert!(out.diagnostics.is_empty());

        let list = match &out.unit.decls[..] {
            [Decl::Normal { list, .. }] => list,
            decls => panic!("parsed as {decls:?}"),
        };
        assert_eq!(list.len(), 2);

        // `*a[10]`: one pointer level, one array suffix with a length
        let a = list[0].0;
        assert_eq!(a.ptr.len(), 1);
        assert!(matches!(
            a.suffixes,
            [DeclSuffix::Array(suffix)] if matches!(suffix.len, ArrayLen::Expr(_))
        ));

        // `(*fp)(int, char *)`: parenthesized pointer base plus a
        // two-parameter function suffix
        let fp = list[1].0;
        assert!(matches!(fp.inner, DirectDeclarator::Paren(inner)
            if inner.ptr.len() == 1));
        match fp.suffixes {
            [DeclSuffix::Func(func)] => match func.params {
                ParamList::Types { params, variadic } => {
                    assert_eq!(params.len(), 2);
                    assert!(variadic.is_none());
                }
                params => panic!("params parsed as {params:?}"),
            },
            suffixes => panic!("suffixes parsed as {suffixes:?}"),
        }
    });
}

#[test]
fn array_suffix_variants() {
    with_parsed("void sum(int n, int xs[static const n], int m[*]);", |out| {
        assert!(out.diagnostics.is_empty());

        let list = match &out.unit.decls[..] {
            [Decl::Normal { list, .. }] => list,
            decls => panic!("parsed as {decls:?}"),
        };

        let params = match list[0].0.suffixes {
            [DeclSuffix::Func(func)] => match func.params {
                ParamList::Types { params, .. } => params,
                params => panic!("params parsed as {params:?}"),
            },
            suffixes => panic!("suffixes parsed as {suffixes:?}"),
        };
        assert_eq!(params.len(), 3);

        let xs = params[1].decl.unwrap();
        match xs.suffixes {
            [DeclSuffix::Array(suffix)] => {
                assert!(suffix.static_tok.is_some());
                assert!(suffix.quals.const_tok.is_some());
                assert!(matches!(suffix.len, ArrayLen::Expr(_)));
            }
            suffixes => panic!("suffixes parsed as {suffixes:?}"),
        }

        let m = params[2].decl.unwrap();
        assert!(matches!(
            m.suffixes,
            [DeclSuffix::Array(suffix)] if matches!(suffix.len, ArrayLen::Star(_))
        ));
    });
}

#[test]
fn variadic_prototype() {
    with_parsed("int printf(const char *fmt, ...);", |out| {
        assert!(out.diagnostics.is_empty());

        let list = match &out.unit.decls[..] {
            [Decl::Normal { list, .. }] => list,
            decls => panic!("parsed as {decls:?}"),
        };

        match list[0].0.suffixes {
            [DeclSuffix::Func(func)] => {
                assert!(matches!(
                    func.params,
                    ParamList::Types {
                        variadic: Some(_),
                        ..
                    }
                ));
            }
            suffixes => panic!("suffixes parsed as {suffixes:?}"),
        }
    });
}

#[test]
fn record_with_bit_fields() {
    with_parsed("struct point { int x, y; unsigned flags : 3; };", |out| {
        assert!(out.diagnostics.is_empty());

        let specs = match &out.unit.decls[..] {
            [Decl::Normal { specs, list }] => {
                assert!(list.is_empty());
                specs
            }
            decls => panic!("parsed as {decls:?}"),
        };

        match specs.ty {
            Some(TypeSpecTag::Record(record)) => {
                assert!(record.name.is_some());
                let fields = record.fields.unwrap();
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[0].list.len(), 2);
                assert!(fields[1].list[0].width.is_some());
            }
            ty => panic!("type parsed as {ty:?}"),
        }
    });
}

#[test]
fn bodyless_record_reference() {
    with_parsed("struct node *head;", |out| {
        assert!(out.diagnostics.is_empty());

        match &out.unit.decls[..] {
            [Decl::Normal { specs, list }] => {
                assert!(matches!(
                    specs.ty,
                    Some(TypeSpecTag::Record(record))
                        if record.fields.is_none()
                ));
                assert_eq!(list[0].0.ptr.len(), 1);
            }
            decls => panic!("parsed as {decls:?}"),
        }
    });
}

#[test]
fn anonymous_record_needs_a_body() {
    with_parsed("struct *x;", |out| {
        assert!(out
            .diagnostics
            .iter()
            .any(|diag| diag.tag == DiagTag::DeclarationHasNoIdentifier));
    });
}

#[test]
fn enum_constants_and_dangling_comma() {
    with_parsed("enum color { RED, GREEN = 2, };", |out| {
        assert!(out.diagnostics.is_empty());

        let specs = match &out.unit.decls[..] {
            [Decl::Normal { specs, .. }] => specs,
            decls => panic!("parsed as {decls:?}"),
        };

        match specs.ty {
            Some(TypeSpecTag::Enum(spec)) => {
                let consts = spec.consts.unwrap();
                assert_eq!(consts.len(), 2);
                assert!(consts[0].cexpr.is_none());
                assert!(consts[1].cexpr.is_some());
            }
            ty => panic!("type parsed as {ty:?}"),
        }
    });
}

#[test]
fn enum_constant_redefinition_is_an_error() {
    with_parsed("enum { A, A };", |out| {
        assert!(out
            .diagnostics
            .iter()
            .any(|diag| matches!(diag.tag, DiagTag::NameAlreadyDefined(_))));
    });
}

#[test]
fn static_assert_declaration() {
    with_parsed("_Static_assert(1, \"one is one\");", |out| {
        assert!(out.diagnostics.is_empty());
        assert!(matches!(
            out.unit.decls,
            [Decl::StaticAssert { .. }]
        ));
    });
}

#[test]
fn typedef_redefinition_is_an_error() {
    with_parsed("typedef int t; typedef int t;", |out| {
        assert_eq!(out.unit.decls.len(), 1);
        assert!(out
            .diagnostics
            .iter()
            .any(|diag| matches!(diag.tag, DiagTag::NameAlreadyDefined(_))));
    });
}

#[test]
fn initializer_lists() {
    with_parsed("int grid[2][2] = { { 1, 2 }, { 3, 4 }, };", |out| {
        assert!(out.diagnostics.is_empty());

        match &out.unit.decls[..] {
            [Decl::Normal { list, .. }] => {
                assert!(list[0].1.is_some());
            }
            decls => panic!("parsed as {decls:?}"),
        }
    });
}

#[test]
fn function_definition_must_be_the_whole_declaration() {
    with_parsed("int foo = 5, bar() { return 0; }", |out| {
        assert!(out.unit.decls.is_empty());
        assert!(out.diagnostics.has_errors());
    });
}

#[test]
fn array_suffix_where_parameters_should_be() {
    with_parsed("int foo[100] { return 0; }", |out| {
        assert!(out
            .diagnostics
            .iter()
            .any(|diag| diag.tag == DiagTag::UnexpectedDeclarationSuffix));
    });
}
