//! Precedence-climbing parser with indentation-bound layout.
//!
//! An expression ends at a token that starts its line at or left of the
//! current layout column. Declarations use column 1; case branch bodies use
//! the column of their branch's pattern. Inside brackets layout is off.

use crate::decl::{Constructor, CustomType, Declaration, ExposedItem, Exposing, Import, Module, ValueDecl};
use crate::error::{ParseError, ParseResult};
use crate::expr::{CaseBranch, Expr, Expr_, Literal, Node, Pattern, Pattern_, Range, RecordSetter};
use crate::name::{ModuleName, QualifiedName};

use super::lexer::{Keyword, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
    Non,
}

/// Binding power and associativity of the core infix operators.
fn precedence(op: &str) -> (u8, Assoc) {
    match op {
        "<|" => (0, Assoc::Right),
        "|>" => (0, Assoc::Left),
        "||" => (2, Assoc::Right),
        "&&" => (3, Assoc::Right),
        "==" | "/=" | "<" | ">" | "<=" | ">=" => (4, Assoc::Non),
        "++" | "::" => (5, Assoc::Right),
        "+" | "-" => (6, Assoc::Left),
        "*" | "/" | "//" => (7, Assoc::Left),
        "^" => (8, Assoc::Right),
        "<<" => (9, Assoc::Left),
        ">>" => (9, Assoc::Right),
        _ => (9, Assoc::Left),
    }
}

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    // =========================================================================
    // Token access
    // =========================================================================

    fn peek(&self) -> &'t Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &'t Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().kind == TokenKind::Keyword(keyword)
    }

    fn error(&self, expected: &'static str) -> ParseError {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            ParseError::UnexpectedEof { expected }
        } else {
            ParseError::Unexpected {
                location: token.range.start,
                found: token.kind.describe(),
                expected,
            }
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> ParseResult<Range> {
        if self.check(kind) {
            Ok(self.advance().range)
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword, expected: &'static str) -> ParseResult<Range> {
        self.expect(&TokenKind::Keyword(keyword), expected)
    }

    /// Does the layout end the current construct before the next token?
    fn at_end(&self, indent: u32) -> bool {
        let token = self.peek();
        token.kind == TokenKind::Eof || (token.line_start && token.range.start.column <= indent)
    }

    fn lower_name(&mut self, expected: &'static str) -> ParseResult<Node<String>> {
        match &self.peek().kind {
            TokenKind::Lower { module, name } if module.is_empty() => {
                let name = name.clone();
                Ok(Node::new(name, self.advance().range))
            }
            _ => Err(self.error(expected)),
        }
    }

    fn module_name(&mut self) -> ParseResult<Node<ModuleName>> {
        match &self.peek().kind {
            TokenKind::Upper { module, name } => {
                let mut segments = module.clone();
                segments.push(name.clone());
                Ok(Node::new(ModuleName::new(segments), self.advance().range))
            }
            _ => Err(self.error("module name")),
        }
    }

    // =========================================================================
    // Module structure
    // =========================================================================

    pub(crate) fn module(&mut self, source: &str) -> ParseResult<Module> {
        if self.check_keyword(Keyword::Port) {
            self.advance();
        }
        let (name, exposing) = if self.check_keyword(Keyword::Module) {
            self.advance();
            let name = self.module_name()?;
            self.expect_keyword(Keyword::Exposing, "`exposing`")?;
            (name, self.exposing()?)
        } else {
            (
                Node::new(ModuleName::from_dotted("Main"), Range::default()),
                Exposing::All,
            )
        };

        let mut imports = Vec::new();
        while self.check_keyword(Keyword::Import) {
            imports.push(self.import()?);
        }

        let mut declarations = Vec::new();
        while self.peek().kind != TokenKind::Eof {
            if let Some(declaration) = self.declaration()? {
                declarations.push(declaration);
            }
        }

        Ok(Module {
            name,
            exposing,
            imports,
            declarations,
            source: source.to_string(),
        })
    }

    fn exposing(&mut self) -> ParseResult<Exposing> {
        self.expect(&TokenKind::LParen, "`(`")?;
        if self.check(&TokenKind::DotDot) {
            self.advance();
            self.expect(&TokenKind::RParen, "`)`")?;
            return Ok(Exposing::All);
        }

        let mut items = Vec::new();
        loop {
            let item = match &self.peek().kind {
                TokenKind::Lower { name, .. } => {
                    let name = name.clone();
                    self.advance();
                    ExposedItem::Value(name)
                }
                TokenKind::Upper { name, .. } => {
                    let name = name.clone();
                    self.advance();
                    let open = self.check(&TokenKind::LParen)
                        && self.peek_at(1).kind == TokenKind::DotDot;
                    if open {
                        self.advance();
                        self.advance();
                        self.expect(&TokenKind::RParen, "`)`")?;
                    }
                    ExposedItem::Type { name, open }
                }
                TokenKind::LParen => {
                    self.advance();
                    let op = match &self.advance().kind {
                        TokenKind::Operator(op) => op.clone(),
                        _ => return Err(self.error("operator")),
                    };
                    self.expect(&TokenKind::RParen, "`)`")?;
                    ExposedItem::Operator(op)
                }
                _ => return Err(self.error("exposed item")),
            };
            items.push(item);
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                self.expect(&TokenKind::RParen, "`)`")?;
                return Ok(Exposing::Explicit(items));
            }
        }
    }

    fn import(&mut self) -> ParseResult<Import> {
        self.expect_keyword(Keyword::Import, "`import`")?;
        let module = self.module_name()?;
        let alias = if self.check_keyword(Keyword::As) {
            self.advance();
            Some(self.module_name()?.value)
        } else {
            None
        };
        let exposing = if self.check_keyword(Keyword::Exposing) {
            self.advance();
            Some(self.exposing()?)
        } else {
            None
        };
        Ok(Import::new(module, alias, exposing))
    }

    /// Skip tokens up to the next top-level declaration.
    fn skip_declaration(&mut self) {
        self.advance();
        while !self.at_end(1) {
            self.advance();
        }
    }

    fn declaration(&mut self) -> ParseResult<Option<Declaration>> {
        match &self.peek().kind {
            TokenKind::Keyword(Keyword::Type) => {
                if self.peek_at(1).kind == TokenKind::Keyword(Keyword::Alias) {
                    self.skip_declaration();
                    return Ok(None);
                }
                self.advance();
                Ok(Some(Declaration::CustomType(self.custom_type()?)))
            }
            TokenKind::Keyword(Keyword::Port) => {
                self.skip_declaration();
                Ok(None)
            }
            TokenKind::Lower { module, name } if module.is_empty() => {
                if self.peek_at(1).kind == TokenKind::Colon || name == "infix" {
                    self.skip_declaration();
                    return Ok(None);
                }
                Ok(Some(Declaration::Value(self.value_declaration()?)))
            }
            _ => Err(self.error("declaration")),
        }
    }

    fn custom_type(&mut self) -> ParseResult<CustomType> {
        let name = match &self.peek().kind {
            TokenKind::Upper { module, name } if module.is_empty() => {
                let name = name.clone();
                Node::new(name, self.advance().range)
            }
            _ => return Err(self.error("type name")),
        };
        while matches!(self.peek().kind, TokenKind::Lower { .. }) {
            self.advance();
        }
        self.expect(&TokenKind::Equals, "`=`")?;

        let mut constructors = Vec::new();
        loop {
            let (ctor_name, start) = match &self.peek().kind {
                TokenKind::Upper { module, name } if module.is_empty() => {
                    let name = name.clone();
                    (name, self.advance().range)
                }
                _ => return Err(self.error("constructor name")),
            };

            let mut range = start;
            let mut arity = 0;
            let mut depth = 0usize;
            while !self.at_end(1) {
                let token = self.peek();
                match token.kind {
                    TokenKind::Pipe if depth == 0 => break,
                    TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                        if depth == 0 {
                            arity += 1;
                        }
                        depth += 1;
                    }
                    TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                        depth = depth.saturating_sub(1);
                    }
                    TokenKind::Upper { .. } | TokenKind::Lower { .. } if depth == 0 => arity += 1,
                    _ => {}
                }
                range = range.merge(self.advance().range);
            }

            constructors.push(Node::new(
                Constructor {
                    name: ctor_name,
                    arity,
                },
                range,
            ));
            if self.check(&TokenKind::Pipe) && !self.at_end(1) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(CustomType { name, constructors })
    }

    fn value_declaration(&mut self) -> ParseResult<ValueDecl> {
        let name = self.lower_name("declaration name")?;
        let mut arguments = Vec::new();
        while !self.check(&TokenKind::Equals) {
            if self.at_end(1) {
                return Err(self.error("`=`"));
            }
            arguments.push(self.pattern_atom()?);
        }
        self.advance();
        let body = self.expression(1)?;
        Ok(ValueDecl {
            name,
            arguments,
            body,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub(crate) fn expression(&mut self, indent: u32) -> ParseResult<Expr> {
        if self.at_end(indent) {
            return Err(self.error("expression"));
        }
        self.binary(0, indent)
    }

    fn binary(&mut self, min_precedence: u8, indent: u32) -> ParseResult<Expr> {
        let mut left = self.operand(indent)?;
        loop {
            if self.at_end(indent) {
                break;
            }
            let operator = match &self.peek().kind {
                TokenKind::Operator(op) => op.clone(),
                _ => break,
            };
            let (prec, assoc) = precedence(&operator);
            if prec < min_precedence {
                break;
            }
            self.advance();
            let next_min = match assoc {
                Assoc::Right => prec,
                Assoc::Left | Assoc::Non => prec + 1,
            };
            let right = self.binary(next_min, indent)?;
            let range = left.range.merge(right.range);
            left = Node::new(
                Expr_::Operator {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                range,
            );
        }
        Ok(left)
    }

    fn operand(&mut self, indent: u32) -> ParseResult<Expr> {
        match &self.peek().kind {
            TokenKind::Keyword(Keyword::If) => self.if_expression(indent),
            TokenKind::Keyword(Keyword::Case) => self.case_expression(indent),
            TokenKind::Backslash => self.lambda(indent),
            TokenKind::Keyword(Keyword::Let) => Err(ParseError::Unsupported {
                location: self.peek().range.start,
                construct: "let",
            }),
            _ => self.application(indent),
        }
    }

    fn starts_atom(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Lower { .. }
                | TokenKind::Upper { .. }
                | TokenKind::Int(_)
                | TokenKind::Hex(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::Char(_)
                | TokenKind::AccessFunction(_)
                | TokenKind::Negate
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
        )
    }

    fn application(&mut self, indent: u32) -> ParseResult<Expr> {
        let head = self.atom(indent)?;
        let mut items = vec![head];
        while !self.at_end(indent) && self.starts_atom() {
            items.push(self.atom(indent)?);
        }
        if items.len() == 1 {
            return Ok(items.remove(0));
        }
        let range = items[0].range.merge(items[items.len() - 1].range);
        Ok(Node::new(Expr_::Application(items), range))
    }

    fn atom(&mut self, indent: u32) -> ParseResult<Expr> {
        let token = self.peek();
        let value = match &token.kind {
            TokenKind::Lower { module, name } | TokenKind::Upper { module, name } => {
                Expr_::Variable(QualifiedName::qualified(
                    ModuleName::new(module.clone()),
                    name.clone(),
                ))
            }
            TokenKind::Int(n) => Expr_::Literal(Literal::Int(*n)),
            TokenKind::Hex(n) => Expr_::Literal(Literal::Hex(*n)),
            TokenKind::Float(f) => Expr_::Literal(Literal::float(*f)),
            TokenKind::Str(s) => Expr_::Literal(Literal::String(s.clone())),
            TokenKind::Char(c) => Expr_::Literal(Literal::Char(*c)),
            TokenKind::AccessFunction(field) => Expr_::RecordAccessFunction(field.clone()),
            TokenKind::Negate => {
                self.advance();
                let inner = self.atom(indent)?;
                let range = token.range.merge(inner.range);
                return Ok(Node::new(Expr_::Negation(Box::new(inner)), range));
            }
            TokenKind::LParen => {
                let expr = self.parenthesized()?;
                return self.record_access(expr);
            }
            TokenKind::LBracket => return self.list(),
            TokenKind::LBrace => {
                let expr = self.record()?;
                return self.record_access(expr);
            }
            _ => return Err(self.error("expression")),
        };
        self.advance();
        self.record_access(Node::new(value, token.range))
    }

    fn record_access(&mut self, mut expr: Expr) -> ParseResult<Expr> {
        while let TokenKind::DotField(field) = &self.peek().kind {
            let field = Node::new(field.clone(), self.advance().range);
            let range = expr.range.merge(field.range);
            let field_range = Range::new(field.range.start.shift(1), field.range.end);
            expr = Node::new(
                Expr_::RecordAccess {
                    record: Box::new(expr),
                    field: Node::new(field.value, field_range),
                },
                range,
            );
        }
        Ok(expr)
    }

    fn parenthesized(&mut self) -> ParseResult<Expr> {
        let open = self.expect(&TokenKind::LParen, "`(`")?;

        if self.check(&TokenKind::RParen) {
            let close = self.advance().range;
            return Ok(Node::new(Expr_::Unit, open.merge(close)));
        }
        if let TokenKind::Operator(op) = &self.peek().kind {
            if self.peek_at(1).kind == TokenKind::RParen {
                let op = op.clone();
                self.advance();
                let close = self.advance().range;
                return Ok(Node::new(Expr_::PrefixOperator(op), open.merge(close)));
            }
        }

        let first = self.expression(0)?;
        if self.check(&TokenKind::Comma) {
            let mut items = vec![first];
            while self.check(&TokenKind::Comma) {
                self.advance();
                items.push(self.expression(0)?);
            }
            let close = self.expect(&TokenKind::RParen, "`)`")?;
            return Ok(Node::new(Expr_::Tuple(items), open.merge(close)));
        }
        let close = self.expect(&TokenKind::RParen, "`)`")?;
        Ok(Node::new(
            Expr_::Parenthesized(Box::new(first)),
            open.merge(close),
        ))
    }

    fn list(&mut self) -> ParseResult<Expr> {
        let open = self.expect(&TokenKind::LBracket, "`[`")?;
        let mut items = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                items.push(self.expression(0)?);
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let close = self.expect(&TokenKind::RBracket, "`]`")?;
        Ok(Node::new(Expr_::List(items), open.merge(close)))
    }

    fn record(&mut self) -> ParseResult<Expr> {
        let open = self.expect(&TokenKind::LBrace, "`{`")?;
        if self.check(&TokenKind::RBrace) {
            let close = self.advance().range;
            return Ok(Node::new(Expr_::Record(Vec::new()), open.merge(close)));
        }

        let base = if self.peek_at(1).kind == TokenKind::Pipe {
            let base = self.lower_name("record name")?;
            self.advance();
            Some(base)
        } else {
            None
        };

        let mut setters = Vec::new();
        loop {
            let field = self.lower_name("field name")?;
            self.expect(&TokenKind::Equals, "`=`")?;
            let value = self.expression(0)?;
            setters.push(RecordSetter::new(field, value));
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        let close = self.expect(&TokenKind::RBrace, "`}`")?;
        let value = match base {
            Some(base) => Expr_::RecordUpdate { base, setters },
            None => Expr_::Record(setters),
        };
        Ok(Node::new(value, open.merge(close)))
    }

    fn if_expression(&mut self, indent: u32) -> ParseResult<Expr> {
        let start = self.expect_keyword(Keyword::If, "`if`")?;
        let condition = self.expression(indent)?;
        self.expect_keyword(Keyword::Then, "`then`")?;
        let then_branch = self.expression(indent)?;
        self.expect_keyword(Keyword::Else, "`else`")?;
        let else_branch = self.expression(indent)?;
        let range = start.merge(else_branch.range);
        Ok(Node::new(
            Expr_::If {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            range,
        ))
    }

    fn case_expression(&mut self, indent: u32) -> ParseResult<Expr> {
        let start = self.expect_keyword(Keyword::Case, "`case`")?;
        let scrutinee = self.expression(indent)?;
        self.expect_keyword(Keyword::Of, "`of`")?;

        let branch_column = self.peek().range.start.column;
        let mut branches = Vec::new();
        loop {
            let pattern = self.pattern()?;
            self.expect(&TokenKind::Arrow, "`->`")?;
            let body = self.expression(branch_column)?;
            branches.push(CaseBranch::new(pattern, body));

            let next = self.peek();
            let continues = next.kind != TokenKind::Eof
                && next.line_start
                && next.range.start.column == branch_column
                && branch_column > indent;
            if !continues {
                break;
            }
        }

        let end = branches
            .last()
            .map_or(start, |b| b.body.range);
        Ok(Node::new(
            Expr_::Case {
                scrutinee: Box::new(scrutinee),
                branches,
            },
            start.merge(end),
        ))
    }

    fn lambda(&mut self, indent: u32) -> ParseResult<Expr> {
        let start = self.expect(&TokenKind::Backslash, "`\\`")?;
        let mut parameters = Vec::new();
        while !self.check(&TokenKind::Arrow) {
            parameters.push(self.pattern_atom()?);
        }
        if parameters.is_empty() {
            return Err(self.error("lambda parameter"));
        }
        self.advance();
        let body = self.expression(indent)?;
        let range = start.merge(body.range);
        Ok(Node::new(
            Expr_::Lambda {
                parameters,
                body: Box::new(body),
            },
            range,
        ))
    }

    // =========================================================================
    // Patterns
    // =========================================================================

    fn pattern(&mut self) -> ParseResult<Pattern> {
        let mut pattern = self.cons_pattern()?;
        while self.check_keyword(Keyword::As) {
            self.advance();
            let name = self.lower_name("alias name")?;
            let range = pattern.range.merge(name.range);
            pattern = Node::new(Pattern_::As(Box::new(pattern), name), range);
        }
        Ok(pattern)
    }

    fn cons_pattern(&mut self) -> ParseResult<Pattern> {
        let head = self.pattern_application()?;
        if !matches!(&self.peek().kind, TokenKind::Operator(op) if op == "::") {
            return Ok(head);
        }
        self.advance();
        let tail = self.cons_pattern()?;
        let range = head.range.merge(tail.range);
        Ok(Node::new(Pattern_::Cons(Box::new(head), Box::new(tail)), range))
    }

    fn starts_pattern_atom(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Underscore
                | TokenKind::Lower { .. }
                | TokenKind::Upper { .. }
                | TokenKind::Int(_)
                | TokenKind::Hex(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::Char(_)
                | TokenKind::Negate
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
        )
    }

    fn pattern_application(&mut self) -> ParseResult<Pattern> {
        if let TokenKind::Upper { module, name } = &self.peek().kind {
            let name = QualifiedName::qualified(ModuleName::new(module.clone()), name.clone());
            let mut range = self.advance().range;
            let mut args = Vec::new();
            while self.starts_pattern_atom() {
                let arg = self.pattern_atom()?;
                range = range.merge(arg.range);
                args.push(arg);
            }
            return Ok(Node::new(Pattern_::Constructor { name, args }, range));
        }
        self.pattern_atom()
    }

    fn pattern_atom(&mut self) -> ParseResult<Pattern> {
        let token = self.peek();
        let value = match &token.kind {
            TokenKind::Underscore => Pattern_::Wild,
            TokenKind::Lower { module, name } if module.is_empty() => Pattern_::Var(name.clone()),
            TokenKind::Upper { module, name } => Pattern_::Constructor {
                name: QualifiedName::qualified(ModuleName::new(module.clone()), name.clone()),
                args: Vec::new(),
            },
            TokenKind::Int(n) => Pattern_::Lit(Literal::Int(*n)),
            TokenKind::Hex(n) => Pattern_::Lit(Literal::Hex(*n)),
            TokenKind::Float(f) => Pattern_::Lit(Literal::float(*f)),
            TokenKind::Str(s) => Pattern_::Lit(Literal::String(s.clone())),
            TokenKind::Char(c) => Pattern_::Lit(Literal::Char(*c)),
            TokenKind::Negate => {
                self.advance();
                let number = self.peek();
                let literal = match number.kind {
                    TokenKind::Int(n) => Literal::Int(-n),
                    TokenKind::Float(f) => Literal::float(-f),
                    _ => return Err(self.error("number")),
                };
                self.advance();
                return Ok(Node::new(Pattern_::Lit(literal), token.range.merge(number.range)));
            }
            TokenKind::LParen => return self.parenthesized_pattern(),
            TokenKind::LBracket => return self.list_pattern(),
            TokenKind::LBrace => return self.record_pattern(),
            _ => return Err(self.error("pattern")),
        };
        self.advance();
        Ok(Node::new(value, token.range))
    }

    fn parenthesized_pattern(&mut self) -> ParseResult<Pattern> {
        let open = self.expect(&TokenKind::LParen, "`(`")?;
        if self.check(&TokenKind::RParen) {
            let close = self.advance().range;
            return Ok(Node::new(Pattern_::Unit, open.merge(close)));
        }
        let first = self.pattern()?;
        if self.check(&TokenKind::Comma) {
            let mut items = vec![first];
            while self.check(&TokenKind::Comma) {
                self.advance();
                items.push(self.pattern()?);
            }
            let close = self.expect(&TokenKind::RParen, "`)`")?;
            return Ok(Node::new(Pattern_::Tuple(items), open.merge(close)));
        }
        let close = self.expect(&TokenKind::RParen, "`)`")?;
        Ok(Node::new(Pattern_::Paren(Box::new(first)), open.merge(close)))
    }

    fn list_pattern(&mut self) -> ParseResult<Pattern> {
        let open = self.expect(&TokenKind::LBracket, "`[`")?;
        let mut items = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                items.push(self.pattern()?);
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let close = self.expect(&TokenKind::RBracket, "`]`")?;
        Ok(Node::new(Pattern_::List(items), open.merge(close)))
    }

    fn record_pattern(&mut self) -> ParseResult<Pattern> {
        let open = self.expect(&TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            loop {
                fields.push(self.lower_name("field name")?);
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let close = self.expect(&TokenKind::RBrace, "`}`")?;
        Ok(Node::new(Pattern_::Record(fields), open.merge(close)))
    }
}
