//! Statement grammar. There is no statement-local resynchronization:
//! a missing required token raises the recoverable error kind and the
//! caller one level up decides whether to stop.

use crest_ast::token::TokenTag::*;
use crest_ast::{Expr, Stmt, StmtTag};

use crate::{check_tok, match_tok, require_tok};
use crate::{Parser, PR};

macro_rules! paren_wrapped {
    ($self:expr, $expr:expr) => {{
        require_tok!($self, LeftParen)?;
        let inner = $expr;
        require_tok!($self, RightParen)?;
        inner
    }};
}

impl<'a> Parser<'a> {
    pub(crate) fn statement(&mut self) -> PR<Stmt<'a>> {
        if matches!(self.cursor.peek_tag(), StaticAssert) {
            let decl = self.static_assert_decl()?;
            return Ok(Stmt {
                tag: StmtTag::Decl(self.alloc(decl)?),
            });
        }

        // Declarations between statements are C99, supported here.
        // Anything opening with declaration specifiers is one.
        if let Some(specs) = self.maybe_decl_specifiers()? {
            let decl = self.declaration(specs)?;
            return Ok(Stmt {
                tag: StmtTag::Decl(self.alloc(decl)?),
            });
        }

        match self.cursor.peek_tag() {
            While | Do | For => self.iteration_statement(),
            If | Switch => self.selection_statement(),
            Case | Default => self.labeled_statement(),
            LeftCurly => self.compound_statement(),
            Goto | Continue | Break | Return => self.jump_statement(),
            Identifier(_) => {
                // A bare identifier is a label when `:` follows.
                // Consume it, look, and retreat when it turns out to
                // open an expression statement instead.
                let id = self.cursor.advance();

                if matches!(self.cursor.peek_tag(), Colon) {
                    self.cursor.advance(); // :
                    let stmt = self.statement()?;

                    Ok(Stmt {
                        tag: StmtTag::Label {
                            id,
                            stmt: self.alloc(stmt)?,
                        },
                    })
                } else {
                    self.cursor.retreat();

                    Ok(Stmt {
                        tag: StmtTag::Expr(self.expression_statement()?),
                    })
                }
            }
            _ => Ok(Stmt {
                tag: StmtTag::Expr(self.expression_statement()?),
            }),
        }
    }

    /// `{ (declaration | statement)* }`, each element tried as a
    /// declaration first. Opens a typedef scope.
    pub(crate) fn compound_statement(&mut self) -> PR<Stmt<'a>> {
        require_tok!(self, LeftCurly)?;
        self.symbols.enter();

        let mut stmts = Vec::new();

        while !check_tok!(self, RightCurly) {
            if self.cursor.at_eof() {
                require_tok!(self, RightCurly)?;
            }

            stmts.push(self.statement()?);
        }

        self.symbols.leave();

        Ok(Stmt {
            tag: StmtTag::Compound(self.alloc_slice(&stmts)?),
        })
    }

    /// Expression statement body: `expr? ;`. `None` is the null
    /// statement.
    fn expression_statement(&mut self) -> PR<Option<&'a Expr<'a>>> {
        let expr = if !matches!(self.cursor.peek_tag(), Semicolon) {
            let expr = self.expression()?;
            Some(self.alloc(expr)?)
        } else {
            None
        };

        require_tok!(self, Semicolon)?;
        Ok(expr)
    }

    fn iteration_statement(&mut self) -> PR<Stmt<'a>> {
        Ok(match self.cursor.peek_tag() {
            While => {
                self.cursor.advance();
                let cond = paren_wrapped!(self, { self.expression()? });
                let stmt = self.statement()?;

                Stmt {
                    tag: StmtTag::While {
                        cond: self.alloc(cond)?,
                        stmt: self.alloc(stmt)?,
                    },
                }
            }
            Do => {
                self.cursor.advance();
                let stmt = self.statement()?;
                require_tok!(self, While)?;
                let cond = paren_wrapped!(self, { self.expression()? });
                require_tok!(self, Semicolon)?;

                Stmt {
                    tag: StmtTag::Do {
                        cond: self.alloc(cond)?,
                        stmt: self.alloc(stmt)?,
                    },
                }
            }
            For => {
                self.cursor.advance();
                require_tok!(self, LeftParen)?;

                // The init clause is a declaration or an expression
                // statement; either way it eats its own `;`
                let init = if let Some(specs) =
                    self.maybe_decl_specifiers()?
                {
                    let decl = self.declaration(specs)?;
                    Stmt {
                        tag: StmtTag::Decl(self.alloc(decl)?),
                    }
                } else {
                    Stmt {
                        tag: StmtTag::Expr(self.expression_statement()?),
                    }
                };

                let cond = self.expression_statement()?;

                let step = if !matches!(self.cursor.peek_tag(), RightParen)
                {
                    let expr = self.expression()?;
                    Some(self.alloc(expr)?)
                } else {
                    None
                };

                require_tok!(self, RightParen)?;
                let stmt = self.statement()?;

                Stmt {
                    tag: StmtTag::For {
                        init: self.alloc(init)?,
                        cond,
                        step,
                        stmt: self.alloc(stmt)?,
                    },
                }
            }
            _ => unreachable!(),
        })
    }

    fn selection_statement(&mut self) -> PR<Stmt<'a>> {
        match self.cursor.peek_tag() {
            If => {
                self.cursor.advance();
                let cond = paren_wrapped!(self, { self.expression()? });
                let then = self.statement()?;

                let otherwise = if check_tok!(self, Else) {
                    let stmt = self.statement()?;
                    Some(self.alloc(stmt)?)
                } else {
                    None
                };

                Ok(Stmt {
                    tag: StmtTag::If {
                        cond: self.alloc(cond)?,
                        then: self.alloc(then)?,
                        otherwise,
                    },
                })
            }
            Switch => {
                self.cursor.advance();
                let cond = paren_wrapped!(self, { self.expression()? });
                let stmt = self.statement()?;

                Ok(Stmt {
                    tag: StmtTag::Switch {
                        cond: self.alloc(cond)?,
                        stmt: self.alloc(stmt)?,
                    },
                })
            }
            _ => unreachable!(),
        }
    }

    /// `case` and `default` labels; identifier labels are recognized
    /// in `statement` because they need the retreat dance
    fn labeled_statement(&mut self) -> PR<Stmt<'a>> {
        match self.cursor.peek_tag() {
            Case => {
                self.cursor.advance();
                let cexpr = self.constant_expression()?;
                require_tok!(self, Colon)?;
                let stmt = self.statement()?;

                Ok(Stmt {
                    tag: StmtTag::Case {
                        cexpr: self.alloc(cexpr)?,
                        stmt: self.alloc(stmt)?,
                    },
                })
            }
            Default => {
                self.cursor.advance();
                require_tok!(self, Colon)?;
                let stmt = self.statement()?;

                Ok(Stmt {
                    tag: StmtTag::Default(self.alloc(stmt)?),
                })
            }
            _ => unreachable!(),
        }
    }

    fn jump_statement(&mut self) -> PR<Stmt<'a>> {
        match self.cursor.peek_tag() {
            Goto => {
                let kw = self.cursor.advance();
                let label = require_tok!(self, Identifier(_))?;
                require_tok!(self, Semicolon)?;

                Ok(Stmt {
                    tag: StmtTag::Goto { kw, label },
                })
            }
            Continue => {
                self.cursor.advance();
                require_tok!(self, Semicolon)?;

                Ok(Stmt {
                    tag: StmtTag::Continue,
                })
            }
            Break => {
                self.cursor.advance();
                require_tok!(self, Semicolon)?;

                Ok(Stmt {
                    tag: StmtTag::Break,
                })
            }
            Return => {
                let kw = self.cursor.advance();

                let expr = if !matches!(self.cursor.peek_tag(), Semicolon)
                {
                    let expr = self.expression()?;
                    Some(self.alloc(expr)?)
                } else {
                    None
                };

                require_tok!(self, Semicolon)?;

                Ok(Stmt {
                    tag: StmtTag::Return { kw, expr },
                })
            }
            _ => unreachable!(),
        }
    }
}
