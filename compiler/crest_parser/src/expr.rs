//! Expression precedence chain, lowest tier first: comma, assignment,
//! conditional, the binary ladder, cast, unary, postfix, primary.
//! Binary tiers are left-associative; assignment and the conditional
//! recurse into themselves on the right.

use crest_ast::token::{TokenIdx, TokenTag::*};
use crest_ast::{Expr, ExprTag};

use crate::{check_tok, match_tok, require_tok};
use crate::{DiagTag, Parser, PR};

impl<'a> Parser<'a> {
    pub(crate) fn constant_expression(&mut self) -> PR<Expr<'a>> {
        self.conditional()
    }

    pub(crate) fn expression(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.assignment()?;

        if self.opts.allow_comma_op {
            while let Some(op) = match_tok!(self, Comma) {
                let rhs = self.assignment()?;
                expr = self.bin_expr(op, expr, rhs)?;
            }
        }

        Ok(expr)
    }

    pub(crate) fn assignment(&mut self) -> PR<Expr<'a>> {
        let expr = self.conditional()?;

        if let Some(op) = match_tok!(
            self,
            Assign
                | MulAssign
                | DivAssign
                | ModAssign
                | AddAssign
                | SubAssign
                | LeftAssign
                | RightAssign
                | AndAssign
                | XorAssign
                | OrAssign
        ) {
            // right-associative
            let rhs = self.assignment()?;
            return self.bin_expr(op, expr, rhs);
        }

        Ok(expr)
    }

    fn conditional(&mut self) -> PR<Expr<'a>> {
        let cond = self.logical_or()?;

        if check_tok!(self, Quest) {
            let then = self.expression()?;
            require_tok!(self, Colon)?;
            let otherwise = self.conditional()?;

            return Ok(Expr {
                tag: ExprTag::Conditional {
                    cond: self.alloc(cond)?,
                    then: self.alloc(then)?,
                    otherwise: self.alloc(otherwise)?,
                },
            });
        }

        Ok(cond)
    }

    fn logical_or(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.logical_and()?;

        while let Some(op) = match_tok!(self, Or) {
            let rhs = self.logical_and()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn logical_and(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.inclusive_or()?;

        while let Some(op) = match_tok!(self, And) {
            let rhs = self.inclusive_or()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn inclusive_or(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.exclusive_or()?;

        while let Some(op) = match_tok!(self, Bar) {
            let rhs = self.exclusive_or()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn exclusive_or(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.and()?;

        while let Some(op) = match_tok!(self, Circ) {
            let rhs = self.and()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn and(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.equality()?;

        while let Some(op) = match_tok!(self, Ampersand) {
            let rhs = self.equality()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn equality(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.relational()?;

        while let Some(op) = match_tok!(self, Eq | Neq) {
            let rhs = self.relational()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn relational(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.shift()?;

        while let Some(op) = match_tok!(self, Lt | Le | Gt | Ge) {
            let rhs = self.shift()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn shift(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.additive()?;

        while let Some(op) = match_tok!(self, Left | Right) {
            let rhs = self.additive()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn additive(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.multiplicative()?;

        while let Some(op) = match_tok!(self, Plus | Minus) {
            let rhs = self.multiplicative()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn multiplicative(&mut self) -> PR<Expr<'a>> {
        let mut expr = self.cast()?;

        while let Some(op) = match_tok!(self, Asterisk | Slash | Mod) {
            let rhs = self.cast()?;
            expr = self.bin_expr(op, expr, rhs)?;
        }

        Ok(expr)
    }

    fn bin_expr(
        &self,
        op: TokenIdx,
        lhs: Expr<'a>,
        rhs: Expr<'a>,
    ) -> PR<Expr<'a>> {
        Ok(Expr {
            tag: ExprTag::BinExpr {
                op,
                lhs: self.alloc(lhs)?,
                rhs: self.alloc(rhs)?,
            },
        })
    }

    /// `( type-name ) cast-expression`, `( type-name ){ ... }`, or
    /// fall through to unary. A paren opens a cast only when what
    /// follows it can start a type name.
    fn cast(&mut self) -> PR<Expr<'a>> {
        if matches!(self.cursor.peek_tag(), LeftParen)
            && self.starts_type_name(self.cursor.lookahead(1).0)
        {
            self.cursor.advance(); // (
            let ty = self.type_name()?;
            require_tok!(self, RightParen)?;

            // A braced initializer after the type is a compound
            // literal, which is postfix and may take suffixes
            if matches!(self.cursor.peek_tag(), LeftCurly) {
                let init = self.braced_initializer_list()?;
                let lit = Expr {
                    tag: ExprTag::CompoundLiteral { ty, init },
                };
                return self.postfix_suffixes(lit);
            }

            let expr = self.cast()?;
            return Ok(Expr {
                tag: ExprTag::Cast {
                    ty,
                    expr: self.alloc(expr)?,
                },
            });
        }

        self.unary()
    }

    fn unary(&mut self) -> PR<Expr<'a>> {
        match self.cursor.peek_tag() {
            Ampersand | Asterisk | Plus | Minus | Tilde | Not => {
                let op = self.cursor.advance();
                let rhs = self.cast()?;

                Ok(Expr {
                    tag: ExprTag::UnExpr {
                        op,
                        rhs: self.alloc(rhs)?,
                    },
                })
            }
            Increment | Decrement => {
                let op = self.cursor.advance();
                let rhs = self.unary()?;

                Ok(Expr {
                    tag: ExprTag::UnExpr {
                        op,
                        rhs: self.alloc(rhs)?,
                    },
                })
            }
            Sizeof => {
                let kw = self.cursor.advance();

                // `sizeof ( type-name )` or `sizeof unary-expr`: try
                // the parenthesized type name first and retreat when
                // the parens turn out to wrap an expression
                if check_tok!(self, LeftParen) {
                    if self.is_type_start() {
                        let ty = self.type_name()?;
                        require_tok!(self, RightParen)?;

                        return Ok(Expr {
                            tag: ExprTag::SizeofType { kw, ty },
                        });
                    }

                    self.cursor.retreat();
                }

                let expr = self.unary()?;

                Ok(Expr {
                    tag: ExprTag::SizeofExpr {
                        kw,
                        expr: self.alloc(expr)?,
                    },
                })
            }
            Alignof => {
                let kw = self.cursor.advance();
                require_tok!(self, LeftParen)?;
                let ty = self.type_name()?;
                require_tok!(self, RightParen)?;

                Ok(Expr {
                    tag: ExprTag::AlignofType { kw, ty },
                })
            }
            _ => self.postfix(),
        }
    }

    fn postfix(&mut self) -> PR<Expr<'a>> {
        let expr = self.primary()?;
        self.postfix_suffixes(expr)
    }

    /// Subscripts, calls, member accesses and postfix `++`/`--`,
    /// applied as a suffix loop over the base expression
    fn postfix_suffixes(&mut self, mut expr: Expr<'a>) -> PR<Expr<'a>> {
        while let Some(tok) = match_tok!(
            self,
            LeftBrace | LeftParen | Dot | ArrowRight | Increment | Decrement
        ) {
            expr = match self.cursor.tag(tok) {
                LeftBrace => {
                    let index = self.expression()?;
                    require_tok!(self, RightBrace)?;

                    Expr {
                        tag: ExprTag::Index {
                            lhs: self.alloc(expr)?,
                            index: self.alloc(index)?,
                            bracket: tok,
                        },
                    }
                }
                LeftParen => self.call(expr)?,
                Dot | ArrowRight => Expr {
                    tag: ExprTag::MemberAccess {
                        lhs: self.alloc(expr)?,
                        op: tok,
                        member: require_tok!(self, Identifier(_))?,
                    },
                },
                Increment | Decrement => Expr {
                    tag: ExprTag::PostIncr {
                        op: tok,
                        lhs: self.alloc(expr)?,
                    },
                },
                _ => unreachable!(),
            };
        }

        Ok(expr)
    }

    fn call(&mut self, callee: Expr<'a>) -> PR<Expr<'a>> {
        let mut args = Vec::new();

        if !check_tok!(self, RightParen) {
            loop {
                args.push(self.assignment()?);

                if !check_tok!(self, Comma) {
                    break;
                }
            }

            require_tok!(self, RightParen)?;
        }

        Ok(Expr {
            tag: ExprTag::Call {
                callee: self.alloc(callee)?,
                args: self.alloc_slice(&args)?,
            },
        })
    }

    fn primary(&mut self) -> PR<Expr<'a>> {
        match self.cursor.peek_tag() {
            Identifier(_) | StringLiteral(_) | CharLiteral
            | NumberLiteral { .. } => Ok(Expr {
                tag: ExprTag::Primary(self.cursor.advance()),
            }),
            LeftParen => {
                self.cursor.advance();
                let expr = self.expression()?;
                require_tok!(self, RightParen)?;
                Ok(expr)
            }
            _ => {
                let at = self.cursor.peek_idx();
                Err(self.error(DiagTag::ExpectedExpr, at))
            }
        }
    }
}
