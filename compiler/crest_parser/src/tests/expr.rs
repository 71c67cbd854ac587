use crest_arena::AstArena;
use crest_ast::token::TokenTag::{self, *};
use crest_ast::{Expr, ExprTag};
use crest_lexer::tokenize;

use crate::{ParseOptions, Parser};

/// Parse `src` as a single expression and hand it to `check` together
/// with a tag resolver
fn with_expr(src: &str, check: impl FnOnce(&Parser<'_>, Expr<'_>)) {
    let arena = AstArena::new();
    let (toks, lex_errors) = tokenize(src, &arena).unwrap();
    assert!(lex_errors.is_empty(), "lexical errors in {src:?}");

    let mut parser = Parser::new(toks, &arena, ParseOptions::default());
    let expr = parser.expression().unwrap_or_else(|err| {
        panic!(
            "{src:?} failed with {err:?}: {:?}",
            parser.diags.iter().collect::<Vec<_>>()
        )
    });

    assert!(parser.cursor.at_eof(), "{src:?} not fully consumed");
    check(&parser, expr);
}

fn op_tag<'a, 'b>(parser: &Parser<'a>, expr: &Expr<'b>) -> TokenTag<'a> {
    match expr.tag {
        ExprTag::BinExpr { op, .. } => parser.cursor.tag(op),
        ref tag => panic!("not a binary expression: {tag:?}"),
    }
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    with_expr("1 + 2 * 3", |parser, expr| {
        assert!(matches!(op_tag(parser, &expr), Plus));

        match expr.tag {
            ExprTag::BinExpr { rhs, .. } => {
                assert!(matches!(op_tag(parser, rhs), Asterisk));
            }
            _ => unreachable!(),
        }
    });
}

#[test]
fn binary_tiers_are_left_associative() {
    with_expr("a - b - c", |parser, expr| {
        match expr.tag {
            ExprTag::BinExpr { lhs, rhs, .. } => {
                // (a - b) - c
                assert!(matches!(op_tag(parser, lhs), Minus));
                assert!(matches!(rhs.tag, ExprTag::Primary(_)));
            }
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn assignment_is_right_associative() {
    with_expr("a = b = c", |parser, expr| {
        assert!(matches!(op_tag(parser, &expr), Assign));

        match expr.tag {
            ExprTag::BinExpr { lhs, rhs, .. } => {
                assert!(matches!(lhs.tag, ExprTag::Primary(_)));
                assert!(matches!(op_tag(parser, rhs), Assign));
            }
            _ => unreachable!(),
        }
    });
}

#[test]
fn compound_assignment_operators() {
    with_expr("a <<= b | c", |parser, expr| {
        assert!(matches!(op_tag(parser, &expr), LeftAssign));
    });
}

#[test]
fn conditional_nests_to_the_right() {
    with_expr("a ? b : c ? d : e", |_, expr| {
        match expr.tag {
            ExprTag::Conditional { otherwise, .. } => {
                assert!(matches!(
                    otherwise.tag,
                    ExprTag::Conditional { .. }
                ));
            }
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn comma_is_the_lowest_tier() {
    with_expr("a = b, c", |parser, expr| {
        assert!(matches!(op_tag(parser, &expr), Comma));
    });
}

#[test]
fn logical_and_bitwise_tiers() {
    with_expr("a || b && c | d ^ e & f", |parser, expr| {
        // || is the loosest binder of the lot
        assert!(matches!(op_tag(parser, &expr), Or));

        match expr.tag {
            ExprTag::BinExpr { rhs, .. } => {
                assert!(matches!(op_tag(parser, rhs), And));
            }
            _ => unreachable!(),
        }
    });
}

#[test]
fn shift_vs_relational() {
    with_expr("a << b < c", |parser, expr| {
        assert!(matches!(op_tag(parser, &expr), Lt));
    });
}

#[test]
fn prefix_operators() {
    with_expr("!*p", |_, expr| {
        match expr.tag {
            ExprTag::UnExpr { rhs, .. } => {
                assert!(matches!(rhs.tag, ExprTag::UnExpr { .. }));
            }
            ref tag => panic!("parsed as {tag:?}"),
        }
    });

    with_expr("++i", |parser, expr| {
        match expr.tag {
            ExprTag::UnExpr { op, .. } => {
                assert!(matches!(parser.cursor.tag(op), Increment));
            }
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn postfix_suffix_chain() {
    with_expr("f(a, b)[1].m->n++", |parser, expr| {
        // outermost suffix is the postfix increment
        let lhs = match expr.tag {
            ExprTag::PostIncr { lhs, .. } => lhs,
            ref tag => panic!("parsed as {tag:?}"),
        };

        // `->n` desugars to nothing here, member accesses stay member
        // accesses with their op token
        let lhs = match lhs.tag {
            ExprTag::MemberAccess { lhs, op, .. } => {
                assert!(matches!(parser.cursor.tag(op), ArrowRight));
                lhs
            }
            ref tag => panic!("parsed as {tag:?}"),
        };

        let lhs = match lhs.tag {
            ExprTag::MemberAccess { lhs, op, .. } => {
                assert!(matches!(parser.cursor.tag(op), Dot));
                lhs
            }
            ref tag => panic!("parsed as {tag:?}"),
        };

        let lhs = match lhs.tag {
            ExprTag::Index { lhs, .. } => lhs,
            ref tag => panic!("parsed as {tag:?}"),
        };

        match lhs.tag {
            ExprTag::Call { args, .. } => assert_eq!(args.len(), 2),
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn call_arguments_are_assignments_not_commas() {
    with_expr("f(a, b)", |_, expr| {
        match expr.tag {
            ExprTag::Call { args, .. } => assert_eq!(args.len(), 2),
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn sizeof_type_vs_sizeof_expr() {
    with_expr("sizeof(int)", |_, expr| {
        assert!(matches!(expr.tag, ExprTag::SizeofType { .. }));
    });

    with_expr("sizeof x", |_, expr| {
        assert!(matches!(expr.tag, ExprTag::SizeofExpr { .. }));
    });

    // parenthesized but not a type: the attempted type name parse
    // retreats and the parens belong to the operand expression
    with_expr("sizeof (x)", |_, expr| {
        assert!(matches!(expr.tag, ExprTag::SizeofExpr { .. }));
    });
}

#[test]
fn alignof_takes_a_type_name() {
    with_expr("_Alignof(long double)", |_, expr| {
        assert!(matches!(expr.tag, ExprTag::AlignofType { .. }));
    });
}

#[test]
fn cast_expression() {
    with_expr("(long)x", |_, expr| {
        match expr.tag {
            ExprTag::Cast { expr, .. } => {
                assert!(matches!(expr.tag, ExprTag::Primary(_)));
            }
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn compound_literal() {
    with_expr("(struct point){ 1, 2 }", |_, expr| {
        match expr.tag {
            ExprTag::CompoundLiteral { init, .. } => {
                assert_eq!(init.len(), 2);
            }
            ref tag => panic!("parsed as {tag:?}"),
        }
    });
}

#[test]
fn compound_literal_takes_postfix_suffixes() {
    with_expr("(struct point){ 1, 2 }.x", |_, expr| {
        assert!(matches!(expr.tag, ExprTag::MemberAccess { .. }));
    });
}

#[test]
fn parenthesized_expression_is_not_a_cast() {
    with_expr("(x) + 1", |parser, expr| {
        assert!(matches!(op_tag(parser, &expr), Plus));
    });
}
