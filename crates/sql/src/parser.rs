// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Precedence-climbing parser for scalar expressions.

use canon_type::{OrderedF64, Value};

use crate::{
	ast::{BinaryOp, ComparisonOp, Expr, TupleKind, UnaryOp},
	config::ParseConfig,
	error::ParseError,
	token::{Keyword, Token, tokenize},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
	None,
	Or,
	And,
	Not,
	Comparison,
	Term,
	Factor,
	Prefix,
	Primary,
}

impl Precedence {
	/// The next tighter level; right operands of left-associative operators
	/// are parsed and rendered at this level.
	pub(crate) fn next(self) -> Self {
		match self {
			Precedence::None => Precedence::Or,
			Precedence::Or => Precedence::And,
			Precedence::And => Precedence::Not,
			Precedence::Not => Precedence::Comparison,
			Precedence::Comparison => Precedence::Term,
			Precedence::Term => Precedence::Factor,
			Precedence::Factor => Precedence::Prefix,
			Precedence::Prefix | Precedence::Primary => Precedence::Primary,
		}
	}
}

/// Parses a complete expression; trailing tokens are an error.
pub fn parse_expr(sql: &str) -> Result<Expr, ParseError> {
	Parser::new(tokenize(sql)?).parse()
}

pub struct Parser {
	tokens: Vec<Token>,
	position: usize,
	depth: usize,
	config: ParseConfig,
}

impl Parser {
	pub fn new(tokens: Vec<Token>) -> Self {
		Self {
			tokens,
			position: 0,
			depth: 0,
			config: ParseConfig::default(),
		}
	}

	pub fn with_config(mut self, config: ParseConfig) -> Self {
		self.config = config;
		self
	}

	pub fn parse(mut self) -> Result<Expr, ParseError> {
		let expr = self.parse_node(Precedence::None)?;
		if let Some(token) = self.tokens.get(self.position) {
			return Err(ParseError(format!("unexpected trailing token {token:?}")));
		}
		Ok(expr)
	}

	fn parse_node(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
		self.depth += 1;
		if self.depth > self.config.max_depth {
			return Err(ParseError(format!(
				"expression nesting exceeds maximum depth of {}",
				self.config.max_depth
			)));
		}

		let mut left = self.parse_prefix()?;
		while !self.is_eof() {
			if precedence >= self.current_precedence() {
				break;
			}
			left = self.parse_infix(left)?;
		}

		self.depth -= 1;
		Ok(left)
	}

	fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
		match self.advance()? {
			Token::Integer(v) => Ok(Expr::literal(v)),
			Token::Float(v) => {
				let v = OrderedF64::try_from(v).map_err(|_| ParseError("float literal out of range".into()))?;
				Ok(Expr::Literal(Value::Float8(v)))
			}
			Token::StringLit(s) => Ok(Expr::literal(s)),
			Token::Keyword(Keyword::True) => Ok(Expr::literal(true)),
			Token::Keyword(Keyword::False) => Ok(Expr::literal(false)),
			Token::Keyword(Keyword::Null) => Ok(Expr::null()),
			Token::Keyword(Keyword::Not) => Ok(Expr::not(self.parse_node(Precedence::Not)?)),
			Token::Minus => Ok(Expr::unary(UnaryOp::Neg, self.parse_node(Precedence::Prefix)?)),
			Token::Plus => Ok(Expr::unary(UnaryOp::Plus, self.parse_node(Precedence::Prefix)?)),
			Token::Keyword(Keyword::Row) => {
				self.consume(Token::OpenParen)?;
				Ok(Expr::row(self.parse_list()?))
			}
			Token::OpenParen => Ok(Expr::Tuple {
				elements: self.parse_list()?,
				kind: TupleKind::Paren,
			}),
			Token::Ident(first) => self.parse_identifier(first),
			token => Err(ParseError(format!("unexpected token {token:?}"))),
		}
	}

	/// A possibly dotted name, and the argument list when it is a call.
	fn parse_identifier(&mut self, first: String) -> Result<Expr, ParseError> {
		let mut name = first;
		while self.consume_if(&Token::Dot) {
			match self.advance()? {
				Token::Ident(part) => {
					name.push('.');
					name.push_str(&part);
				}
				token => return Err(ParseError(format!("expected identifier after '.', got {token:?}"))),
			}
		}

		if self.consume_if(&Token::OpenParen) {
			let args = self.parse_list()?;
			return Ok(Expr::function(name, args));
		}
		Ok(Expr::identifier(name))
	}

	fn parse_infix(&mut self, left: Expr) -> Result<Expr, ParseError> {
		let token = self.advance()?;
		match token {
			Token::Keyword(Keyword::Or) => Ok(Expr::or(left, self.parse_node(Precedence::Or)?)),
			Token::Keyword(Keyword::And) => Ok(Expr::and(left, self.parse_node(Precedence::And)?)),
			Token::Keyword(Keyword::Between) => self.parse_between(left, false),
			Token::Keyword(Keyword::In) => self.parse_in(left, false),
			Token::Keyword(Keyword::Not) => match self.advance()? {
				Token::Keyword(Keyword::Between) => self.parse_between(left, true),
				Token::Keyword(Keyword::In) => self.parse_in(left, true),
				token => Err(ParseError(format!("expected BETWEEN or IN after NOT, got {token:?}"))),
			},
			Token::Plus | Token::Minus | Token::Asterisk | Token::Slash | Token::Percent => {
				let (op, precedence) = match token {
					Token::Plus => (BinaryOp::Add, Precedence::Term),
					Token::Minus => (BinaryOp::Sub, Precedence::Term),
					Token::Asterisk => (BinaryOp::Mul, Precedence::Factor),
					Token::Slash => (BinaryOp::Div, Precedence::Factor),
					_ => (BinaryOp::Mod, Precedence::Factor),
				};
				Ok(Expr::binary(op, left, self.parse_node(precedence)?))
			}
			token => match comparison(&token) {
				Some(op) => Ok(Expr::comparison(op, left, self.parse_node(Precedence::Comparison)?)),
				None => Err(ParseError(format!("unexpected token {token:?}"))),
			},
		}
	}

	fn parse_between(&mut self, operand: Expr, negated: bool) -> Result<Expr, ParseError> {
		let lower = self.parse_node(Precedence::Comparison)?;
		self.consume(Token::Keyword(Keyword::And))?;
		let upper = self.parse_node(Precedence::Comparison)?;
		Ok(Expr::range(operand, lower, upper, negated))
	}

	fn parse_in(&mut self, operand: Expr, negated: bool) -> Result<Expr, ParseError> {
		self.consume(Token::OpenParen)?;
		let list = self.parse_list()?;
		if list.is_empty() {
			return Err(ParseError("IN list must not be empty".into()));
		}
		Ok(Expr::in_list(operand, list, negated))
	}

	/// Comma-separated expressions up to and including the closing paren.
	fn parse_list(&mut self) -> Result<Vec<Expr>, ParseError> {
		let mut items = Vec::new();
		if self.consume_if(&Token::CloseParen) {
			return Ok(items);
		}
		loop {
			items.push(self.parse_node(Precedence::None)?);
			if !self.consume_if(&Token::Comma) {
				self.consume(Token::CloseParen)?;
				return Ok(items);
			}
		}
	}

	fn current_precedence(&self) -> Precedence {
		let Some(token) = self.tokens.get(self.position) else {
			return Precedence::None;
		};
		match token {
			Token::Keyword(Keyword::Or) => Precedence::Or,
			Token::Keyword(Keyword::And) => Precedence::And,
			Token::Keyword(Keyword::Between | Keyword::In) => Precedence::Comparison,
			Token::Keyword(Keyword::Not) => match self.tokens.get(self.position + 1) {
				Some(Token::Keyword(Keyword::Between | Keyword::In)) => Precedence::Comparison,
				_ => Precedence::None,
			},
			Token::Plus | Token::Minus => Precedence::Term,
			Token::Asterisk | Token::Slash | Token::Percent => Precedence::Factor,
			token if comparison(token).is_some() => Precedence::Comparison,
			_ => Precedence::None,
		}
	}

	fn advance(&mut self) -> Result<Token, ParseError> {
		let token = self.tokens.get(self.position).cloned().ok_or_else(|| ParseError("unexpected end of input".into()))?;
		self.position += 1;
		Ok(token)
	}

	fn consume(&mut self, expected: Token) -> Result<(), ParseError> {
		let token = self.advance()?;
		if token == expected {
			Ok(())
		} else {
			Err(ParseError(format!("expected {expected:?}, got {token:?}")))
		}
	}

	fn consume_if(&mut self, expected: &Token) -> bool {
		if self.tokens.get(self.position) == Some(expected) {
			self.position += 1;
			true
		} else {
			false
		}
	}

	fn is_eof(&self) -> bool {
		self.position >= self.tokens.len()
	}
}

fn comparison(token: &Token) -> Option<ComparisonOp> {
	match token {
		Token::Eq => Some(ComparisonOp::Eq),
		Token::NotEq => Some(ComparisonOp::NotEq),
		Token::Lt => Some(ComparisonOp::Lt),
		Token::LtEq => Some(ComparisonOp::LtEq),
		Token::Gt => Some(ComparisonOp::Gt),
		Token::GtEq => Some(ComparisonOp::GtEq),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn a() -> Expr {
		Expr::identifier("a")
	}

	fn b() -> Expr {
		Expr::identifier("b")
	}

	fn parse(sql: &str) -> Expr {
		parse_expr(sql).unwrap()
	}

	#[test]
	fn test_arithmetic_precedence() {
		assert_eq!(
			parse("1 + 2 * a"),
			Expr::binary(
				BinaryOp::Add,
				Expr::literal(1),
				Expr::binary(BinaryOp::Mul, Expr::literal(2), a())
			)
		);
		assert_eq!(
			parse("a - 1 - 2"),
			Expr::binary(
				BinaryOp::Sub,
				Expr::binary(BinaryOp::Sub, a(), Expr::literal(1)),
				Expr::literal(2)
			)
		);
		assert_eq!(
			parse("-a * 2"),
			Expr::binary(BinaryOp::Mul, Expr::unary(UnaryOp::Neg, a()), Expr::literal(2))
		);
	}

	#[test]
	fn test_grouping_and_tuples() {
		assert_eq!(parse("(a)"), Expr::paren(a()));
		assert_eq!(parse("((a))"), Expr::paren(Expr::paren(a())));
		assert_eq!(
			parse("(1, a)"),
			Expr::Tuple {
				elements: vec![Expr::literal(1), a()],
				kind: TupleKind::Paren,
			}
		);
		assert_eq!(parse("ROW(a)"), Expr::row(vec![a()]));
		assert_eq!(parse("row()"), Expr::row(vec![]));
	}

	#[test]
	fn test_boolean_precedence() {
		assert_eq!(parse("a OR b AND NOT a"), Expr::or(a(), Expr::and(b(), Expr::not(a()))));
		assert_eq!(
			parse("NOT a = 1"),
			Expr::not(Expr::comparison(ComparisonOp::Eq, a(), Expr::literal(1)))
		);
	}

	#[test]
	fn test_range_and_membership() {
		assert_eq!(
			parse("a BETWEEN 1 AND b + 1 AND b"),
			Expr::and(
				Expr::range(a(), Expr::literal(1), Expr::binary(BinaryOp::Add, b(), Expr::literal(1)), false),
				b()
			)
		);
		assert_eq!(parse("a NOT BETWEEN b AND 2"), Expr::range(a(), b(), Expr::literal(2), true));
		assert_eq!(parse("a IN (1, 2)"), Expr::in_list(a(), vec![Expr::literal(1), Expr::literal(2)], false));
		assert_eq!(parse("a NOT IN ('x')"), Expr::in_list(a(), vec![Expr::literal("x")], true));
	}

	#[test]
	fn test_functions_and_qualified_names() {
		assert_eq!(parse("lower(t.a)"), Expr::function("lower", vec![Expr::identifier("t.a")]));
		assert_eq!(parse("now()"), Expr::function("now", vec![]));
	}

	#[test]
	fn test_literals() {
		assert_eq!(parse("NULL"), Expr::null());
		assert_eq!(parse("true"), Expr::literal(true));
		assert_eq!(parse("2.0"), Expr::literal(2.0));
		assert_eq!(parse("'foo'"), Expr::literal("foo"));
	}

	#[test]
	fn test_errors() {
		assert!(parse_expr("").is_err());
		assert!(parse_expr("a b").is_err());
		assert!(parse_expr("(a").is_err());
		assert!(parse_expr("a IN ()").is_err());
		assert!(parse_expr("a NOT b").is_err());
		assert!(parse_expr("a BETWEEN 1").is_err());
		assert!(parse_expr("1 +").is_err());
	}

	#[test]
	fn test_max_depth() {
		let sql = format!("{}a{}", "(".repeat(10), ")".repeat(10));
		let parser = Parser::new(tokenize(&sql).unwrap()).with_config(ParseConfig::new().max_depth(5));
		assert!(parser.parse().is_err());
		assert_eq!(Parser::new(tokenize(&sql).unwrap()).parse().unwrap().node_count(), 11);
	}
}
