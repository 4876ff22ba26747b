// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Canonical text form of an expression.
//!
//! Parens appear only where precedence or associativity requires them, and
//! once around a tuple. One-element groupings are transparent, so
//! `((a))` renders as `a` even before normalization.

use std::fmt::{Display, Formatter, Result, Write};

use canon_type::Value;

use crate::{
	ast::{BinaryOp, ComparisonOp, Expr, TupleKind, UnaryOp},
	parser::Precedence,
};

impl UnaryOp {
	pub fn as_str(&self) -> &'static str {
		match self {
			UnaryOp::Neg => "-",
			UnaryOp::Plus => "+",
		}
	}
}

impl BinaryOp {
	pub fn as_str(&self) -> &'static str {
		match self {
			BinaryOp::Add => "+",
			BinaryOp::Sub => "-",
			BinaryOp::Mul => "*",
			BinaryOp::Div => "/",
			BinaryOp::Mod => "%",
		}
	}
}

impl ComparisonOp {
	pub fn as_str(&self) -> &'static str {
		match self {
			ComparisonOp::Eq => "=",
			ComparisonOp::NotEq => "<>",
			ComparisonOp::Lt => "<",
			ComparisonOp::LtEq => "<=",
			ComparisonOp::Gt => ">",
			ComparisonOp::GtEq => ">=",
		}
	}
}

impl Display for UnaryOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result {
		f.write_str(self.as_str())
	}
}

impl Display for BinaryOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result {
		f.write_str(self.as_str())
	}
}

impl Display for ComparisonOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result {
		f.write_str(self.as_str())
	}
}

fn format_float(f: f64) -> String {
	let s = f.to_string();
	if s.contains('.') {
		s
	} else {
		format!("{s}.0")
	}
}

fn write_literal(f: &mut Formatter<'_>, value: &Value) -> Result {
	match value {
		Value::Null => f.write_str("NULL"),
		Value::Boolean(true) => f.write_str("true"),
		Value::Boolean(false) => f.write_str("false"),
		// the magnitude of i64::MIN has no integer literal
		Value::Int8(i64::MIN) => write!(f, "({} - 1)", i64::MIN + 1),
		Value::Int8(v) => write!(f, "{v}"),
		Value::Float8(v) => f.write_str(&format_float(v.value())),
		Value::Utf8(s) => {
			f.write_char('\'')?;
			f.write_str(&s.replace('\'', "''"))?;
			f.write_char('\'')
		}
	}
}

/// Looks through one-element groupings, which render as their element.
fn transparent(mut expr: &Expr) -> &Expr {
	while let Expr::Tuple {
		elements,
		kind: TupleKind::Paren,
	} = expr
	{
		match elements.as_slice() {
			[inner] => expr = inner,
			_ => break,
		}
	}
	expr
}

/// The binding strength of the rendered node.
fn precedence(expr: &Expr) -> Precedence {
	match transparent(expr) {
		Expr::Literal(Value::Int8(i64::MIN)) => Precedence::Primary,
		Expr::Literal(Value::Int8(v)) if *v < 0 => Precedence::Prefix,
		Expr::Literal(Value::Float8(v)) if v.value() < 0.0 => Precedence::Prefix,
		Expr::Literal(_) | Expr::Identifier(_) => Precedence::Primary,
		Expr::Function {
			..
		}
		| Expr::Tuple {
			..
		} => Precedence::Primary,
		Expr::Unary {
			..
		} => Precedence::Prefix,
		Expr::Binary {
			op: BinaryOp::Add | BinaryOp::Sub,
			..
		} => Precedence::Term,
		Expr::Binary {
			..
		} => Precedence::Factor,
		Expr::Comparison {
			..
		}
		| Expr::Range {
			..
		}
		| Expr::In {
			..
		} => Precedence::Comparison,
		Expr::Not {
			..
		} => Precedence::Not,
		Expr::And {
			..
		} => Precedence::And,
		Expr::Or {
			..
		} => Precedence::Or,
	}
}

/// A unit of pending output.
enum Piece<'a> {
	Expr(&'a Expr),
	Text(&'a str),
}

/// Pieces of one node, queued in output order.
struct Pieces<'a>(Vec<Piece<'a>>);

impl<'a> Pieces<'a> {
	fn text(&mut self, text: &'a str) {
		self.0.push(Piece::Text(text));
	}

	/// `expr`, parenthesized when it binds looser than `min`.
	fn operand(&mut self, expr: &'a Expr, min: Precedence) {
		if precedence(expr) < min {
			self.text("(");
			self.0.push(Piece::Expr(expr));
			self.text(")");
		} else {
			self.0.push(Piece::Expr(expr));
		}
	}

	fn list(&mut self, items: &'a [Expr]) {
		for (i, item) in items.iter().enumerate() {
			if i > 0 {
				self.text(", ");
			}
			self.operand(item, Precedence::None);
		}
	}
}

/// Splits a composite node into pieces; leaves are written directly.
fn expand<'a>(f: &mut Formatter<'_>, expr: &'a Expr, pieces: &mut Pieces<'a>) -> Result {
	match transparent(expr) {
		Expr::Literal(value) => write_literal(f, value)?,
		Expr::Identifier(name) => f.write_str(name)?,
		Expr::Unary {
			op,
			operand,
		} => {
			pieces.text(op.as_str());
			// `-(-a)` and `-(-1)` keep the signs from merging into `--`
			pieces.operand(operand, Precedence::Primary);
		}
		Expr::Binary {
			op,
			left,
			right,
		} => {
			let own = precedence(expr);
			pieces.operand(left, own);
			pieces.text(" ");
			pieces.text(op.as_str());
			pieces.text(" ");
			pieces.operand(right, own.next());
		}
		Expr::Comparison {
			op,
			left,
			right,
		} => {
			pieces.operand(left, Precedence::Term);
			pieces.text(" ");
			pieces.text(op.as_str());
			pieces.text(" ");
			pieces.operand(right, Precedence::Term);
		}
		Expr::And {
			left,
			right,
		} => {
			pieces.operand(left, Precedence::And);
			pieces.text(" AND ");
			pieces.operand(right, Precedence::Not);
		}
		Expr::Or {
			left,
			right,
		} => {
			pieces.operand(left, Precedence::Or);
			pieces.text(" OR ");
			pieces.operand(right, Precedence::And);
		}
		Expr::Not {
			operand,
		} => {
			pieces.text("NOT ");
			pieces.operand(operand, Precedence::Not);
		}
		Expr::Function {
			name,
			args,
		} => {
			pieces.text(name);
			pieces.text("(");
			pieces.list(args);
			pieces.text(")");
		}
		Expr::Tuple {
			elements,
			..
		} => {
			pieces.text("(");
			pieces.list(elements);
			pieces.text(")");
		}
		Expr::Range {
			operand,
			lower,
			upper,
			negated,
		} => {
			pieces.operand(operand, Precedence::Term);
			pieces.text(if *negated {
				" NOT BETWEEN "
			} else {
				" BETWEEN "
			});
			pieces.operand(lower, Precedence::Term);
			pieces.text(" AND ");
			pieces.operand(upper, Precedence::Term);
		}
		Expr::In {
			operand,
			list,
			negated,
		} => {
			pieces.operand(operand, Precedence::Term);
			pieces.text(if *negated {
				" NOT IN ("
			} else {
				" IN ("
			});
			pieces.list(list);
			pieces.text(")");
		}
	}
	Ok(())
}

/// Renders from a work stack, so nesting depth does not grow the call stack.
impl Display for Expr {
	fn fmt(&self, f: &mut Formatter<'_>) -> Result {
		let mut stack = vec![Piece::Expr(self)];
		let mut pieces = Pieces(Vec::new());

		while let Some(piece) = stack.pop() {
			match piece {
				Piece::Text(text) => f.write_str(text)?,
				Piece::Expr(expr) => {
					expand(f, expr, &mut pieces)?;
					stack.extend(pieces.0.drain(..).rev());
				}
			}
		}
		Ok(())
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

	#[test]
	fn test_literals() {
		assert_eq!(Expr::null().to_string(), "NULL");
		assert_eq!(Expr::literal(true).to_string(), "true");
		assert_eq!(Expr::literal(2.0).to_string(), "2.0");
		assert_eq!(Expr::literal(-0.5).to_string(), "-0.5");
		assert_eq!(Expr::literal("it's").to_string(), "'it''s'");
		assert_eq!(Expr::literal(i64::MIN).to_string(), "(-9223372036854775807 - 1)");
	}

	#[test]
	fn test_grouping_is_transparent() {
		let expr = Expr::paren(Expr::paren(Expr::paren(Expr::paren(a()))));
		assert_eq!(expr.to_string(), "a");
		assert_eq!(Expr::row(vec![a()]).to_string(), "(a)");
		assert_eq!(Expr::row(vec![a(), b()]).to_string(), "(a, b)");
	}

	#[test]
	fn test_arithmetic_parens() {
		let sum = Expr::binary(BinaryOp::Add, a(), b());
		assert_eq!(Expr::binary(BinaryOp::Mul, sum.clone(), Expr::literal(2)).to_string(), "(a + b) * 2");
		assert_eq!(Expr::binary(BinaryOp::Sub, Expr::literal(1), sum.clone()).to_string(), "1 - (a + b)");
		assert_eq!(Expr::binary(BinaryOp::Add, sum, Expr::literal(1)).to_string(), "a + b + 1");
		assert_eq!(Expr::binary(BinaryOp::Sub, a(), Expr::literal(-1)).to_string(), "a - -1");
	}

	#[test]
	fn test_unary() {
		assert_eq!(Expr::unary(UnaryOp::Neg, a()).to_string(), "-a");
		assert_eq!(Expr::unary(UnaryOp::Neg, Expr::unary(UnaryOp::Neg, a())).to_string(), "-(-a)");
		assert_eq!(Expr::unary(UnaryOp::Neg, Expr::literal(-1)).to_string(), "-(-1)");
		assert_eq!(Expr::unary(UnaryOp::Neg, Expr::binary(BinaryOp::Add, a(), b())).to_string(), "-(a + b)");
	}

	#[test]
	fn test_boolean_parens() {
		let or = Expr::or(a(), b());
		assert_eq!(Expr::and(or.clone(), Expr::identifier("c")).to_string(), "(a OR b) AND c");
		assert_eq!(Expr::not(or).to_string(), "NOT (a OR b)");
		let cmp = Expr::comparison(ComparisonOp::Eq, a(), Expr::literal(1));
		assert_eq!(Expr::not(cmp.clone()).to_string(), "NOT a = 1");
		assert_eq!(Expr::comparison(ComparisonOp::Eq, cmp, b()).to_string(), "(a = 1) = b");
	}

	#[test]
	fn test_range_and_membership() {
		assert_eq!(Expr::range(a(), b(), Expr::identifier("c"), true).to_string(), "a NOT BETWEEN b AND c");
		let expr = Expr::in_list(a(), vec![Expr::literal(1), Expr::literal("x")], false);
		assert_eq!(expr.to_string(), "a IN (1, 'x')");
		let expr = Expr::in_list(a(), vec![Expr::literal(1)], true);
		assert_eq!(expr.to_string(), "a NOT IN (1)");
	}

	#[test]
	fn test_deep_chains() {
		let mut expr = a();
		for _ in 0..100_000 {
			expr = Expr::binary(BinaryOp::Add, expr, Expr::literal(1));
		}
		let expected = format!("a{}", " + 1".repeat(100_000));
		assert_eq!(expr.to_string(), expected);

		let mut expr = a();
		for _ in 0..100_000 {
			expr = Expr::binary(BinaryOp::Sub, Expr::literal(1), expr);
		}
		let expected = format!("{}1 - a{}", "1 - (".repeat(99_999), ")".repeat(99_999));
		assert_eq!(expr.to_string(), expected);

		let mut expr = a();
		for _ in 0..100_000 {
			expr = Expr::not(Expr::paren(expr));
		}
		assert_eq!(expr.to_string(), format!("{}a", "NOT ".repeat(100_000)));
	}

	#[test]
	fn test_function() {
		let expr = Expr::comparison(ComparisonOp::Eq, Expr::function("lower", vec![a()]), Expr::literal("foo"));
		assert_eq!(expr.to_string(), "lower(a) = 'foo'");
		assert_eq!(Expr::function("f", vec![a(), b()]).to_string(), "f(a, b)");
	}
}
