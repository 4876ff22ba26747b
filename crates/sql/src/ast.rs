// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The SQL scalar-expression tree.
//!
//! The node set is closed: every rule and the renderer match on [`Expr`]
//! exhaustively. Each non-leaf node owns its children.

use std::mem;

use canon_type::Value;

use crate::normalize::evaluate::function;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
	Neg,
	Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
	Add,
	Sub,
	Mul,
	Div,
	Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
	Eq,
	NotEq,
	Lt,
	LtEq,
	Gt,
	GtEq,
}

impl ComparisonOp {
	/// The operator that keeps the truth value when both sides swap places.
	pub fn mirror(self) -> Self {
		match self {
			ComparisonOp::Eq => ComparisonOp::Eq,
			ComparisonOp::NotEq => ComparisonOp::NotEq,
			ComparisonOp::Lt => ComparisonOp::Gt,
			ComparisonOp::LtEq => ComparisonOp::GtEq,
			ComparisonOp::Gt => ComparisonOp::Lt,
			ComparisonOp::GtEq => ComparisonOp::LtEq,
		}
	}
}

/// How a tuple came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TupleKind {
	/// Parenthesized grouping `(a)` or list `(a, b)`; a one-element grouping
	/// is a no-op wrapper.
	Paren,
	/// Explicit row constructor `ROW(a)`.
	Row,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
	Literal(Value),
	Identifier(String),
	Unary {
		op: UnaryOp,
		operand: Box<Expr>,
	},
	Binary {
		op: BinaryOp,
		left: Box<Expr>,
		right: Box<Expr>,
	},
	Comparison {
		op: ComparisonOp,
		left: Box<Expr>,
		right: Box<Expr>,
	},
	And {
		left: Box<Expr>,
		right: Box<Expr>,
	},
	Or {
		left: Box<Expr>,
		right: Box<Expr>,
	},
	Not {
		operand: Box<Expr>,
	},
	Function {
		name: String,
		args: Vec<Expr>,
	},
	Tuple {
		elements: Vec<Expr>,
		kind: TupleKind,
	},
	/// `operand [NOT] BETWEEN lower AND upper`
	Range {
		operand: Box<Expr>,
		lower: Box<Expr>,
		upper: Box<Expr>,
		negated: bool,
	},
	/// `operand [NOT] IN (list)`
	In {
		operand: Box<Expr>,
		list: Vec<Expr>,
		negated: bool,
	},
}

/// The null literal; used as a placeholder while children are detached.
impl Default for Expr {
	fn default() -> Self {
		Expr::Literal(Value::Null)
	}
}

/// Tears the tree down from a heap stack, so dropping a deeply nested
/// expression does not recurse once per level.
impl Drop for Expr {
	fn drop(&mut self) {
		if matches!(self, Expr::Literal(_) | Expr::Identifier(_)) {
			return;
		}

		let mut stack = Vec::new();
		detach_nested(self, &mut stack);
		while let Some(mut node) = stack.pop() {
			detach_nested(&mut node, &mut stack);
		}
	}
}

/// Moves every child that has children of its own onto `stack`.
fn detach_nested(node: &mut Expr, stack: &mut Vec<Expr>) {
	for child in node.children_mut() {
		if !matches!(child, Expr::Literal(_) | Expr::Identifier(_)) {
			stack.push(mem::take(child));
		}
	}
}

impl Expr {
	pub fn literal(value: impl Into<Value>) -> Self {
		Expr::Literal(value.into())
	}

	pub fn null() -> Self {
		Expr::Literal(Value::Null)
	}

	pub fn identifier(name: impl Into<String>) -> Self {
		Expr::Identifier(name.into())
	}

	pub fn unary(op: UnaryOp, operand: Expr) -> Self {
		Expr::Unary {
			op,
			operand: Box::new(operand),
		}
	}

	pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
		Expr::Binary {
			op,
			left: Box::new(left),
			right: Box::new(right),
		}
	}

	pub fn comparison(op: ComparisonOp, left: Expr, right: Expr) -> Self {
		Expr::Comparison {
			op,
			left: Box::new(left),
			right: Box::new(right),
		}
	}

	pub fn and(left: Expr, right: Expr) -> Self {
		Expr::And {
			left: Box::new(left),
			right: Box::new(right),
		}
	}

	pub fn or(left: Expr, right: Expr) -> Self {
		Expr::Or {
			left: Box::new(left),
			right: Box::new(right),
		}
	}

	pub fn not(operand: Expr) -> Self {
		Expr::Not {
			operand: Box::new(operand),
		}
	}

	pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Self {
		Expr::Function {
			name: name.into(),
			args,
		}
	}

	pub fn paren(inner: Expr) -> Self {
		Expr::Tuple {
			elements: vec![inner],
			kind: TupleKind::Paren,
		}
	}

	pub fn row(elements: Vec<Expr>) -> Self {
		Expr::Tuple {
			elements,
			kind: TupleKind::Row,
		}
	}

	pub fn range(operand: Expr, lower: Expr, upper: Expr, negated: bool) -> Self {
		Expr::Range {
			operand: Box::new(operand),
			lower: Box::new(lower),
			upper: Box::new(upper),
			negated,
		}
	}

	pub fn in_list(operand: Expr, list: Vec<Expr>, negated: bool) -> Self {
		Expr::In {
			operand: Box::new(operand),
			list,
			negated,
		}
	}

	pub fn as_literal(&self) -> Option<&Value> {
		match self {
			Expr::Literal(value) => Some(value),
			_ => None,
		}
	}

	/// Direct children, in evaluation order.
	pub fn children(&self) -> Vec<&Expr> {
		match self {
			Expr::Literal(_) | Expr::Identifier(_) => vec![],
			Expr::Unary {
				operand,
				..
			}
			| Expr::Not {
				operand,
			} => vec![operand.as_ref()],
			Expr::Binary {
				left,
				right,
				..
			}
			| Expr::Comparison {
				left,
				right,
				..
			}
			| Expr::And {
				left,
				right,
			}
			| Expr::Or {
				left,
				right,
			} => vec![left.as_ref(), right.as_ref()],
			Expr::Function {
				args,
				..
			} => args.iter().collect(),
			Expr::Tuple {
				elements,
				..
			} => elements.iter().collect(),
			Expr::Range {
				operand,
				lower,
				upper,
				..
			} => vec![operand.as_ref(), lower.as_ref(), upper.as_ref()],
			Expr::In {
				operand,
				list,
				..
			} => {
				let mut children = Vec::with_capacity(list.len() + 1);
				children.push(operand.as_ref());
				children.extend(list.iter());
				children
			}
		}
	}

	/// Mutable access to the direct children, in the same order as
	/// [`Expr::children`]. Replacing the referenced nodes rebuilds this node
	/// with new children.
	pub fn children_mut(&mut self) -> Vec<&mut Expr> {
		match self {
			Expr::Literal(_) | Expr::Identifier(_) => vec![],
			Expr::Unary {
				operand,
				..
			}
			| Expr::Not {
				operand,
			} => vec![operand.as_mut()],
			Expr::Binary {
				left,
				right,
				..
			}
			| Expr::Comparison {
				left,
				right,
				..
			}
			| Expr::And {
				left,
				right,
			}
			| Expr::Or {
				left,
				right,
			} => vec![left.as_mut(), right.as_mut()],
			Expr::Function {
				args,
				..
			} => args.iter_mut().collect(),
			Expr::Tuple {
				elements,
				..
			} => elements.iter_mut().collect(),
			Expr::Range {
				operand,
				lower,
				upper,
				..
			} => vec![operand.as_mut(), lower.as_mut(), upper.as_mut()],
			Expr::In {
				operand,
				list,
				..
			} => {
				let mut children = Vec::with_capacity(list.len() + 1);
				children.push(operand.as_mut());
				children.extend(list.iter_mut());
				children
			}
		}
	}

	/// A node is constant when it is a literal, or when it references no
	/// identifier and calls only pure builtins.
	pub fn is_constant(&self) -> bool {
		let mut stack = vec![self];
		while let Some(node) = stack.pop() {
			match node {
				Expr::Identifier(_) => return false,
				Expr::Function {
					name,
					..
				} if !function::is_pure(name) => return false,
				_ => stack.extend(node.children()),
			}
		}
		true
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		let mut stack = vec![self];
		while let Some(node) = stack.pop() {
			count += 1;
			stack.extend(node.children());
		}
		count
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn a() -> Expr {
		Expr::identifier("a")
	}

	#[test]
	fn test_mirror() {
		assert_eq!(ComparisonOp::Lt.mirror(), ComparisonOp::Gt);
		assert_eq!(ComparisonOp::GtEq.mirror(), ComparisonOp::LtEq);
		assert_eq!(ComparisonOp::Eq.mirror(), ComparisonOp::Eq);
		assert_eq!(ComparisonOp::NotEq.mirror(), ComparisonOp::NotEq);
	}

	#[test]
	fn test_children_order() {
		let expr = Expr::in_list(a(), vec![Expr::literal(1), Expr::literal(2)], false);
		assert_eq!(expr.children(), vec![&a(), &Expr::literal(1), &Expr::literal(2)]);

		let expr = Expr::range(a(), Expr::literal(1), Expr::identifier("b"), true);
		assert_eq!(expr.children().len(), 3);
		assert!(Expr::literal(1).children().is_empty());
	}

	#[test]
	fn test_children_mut_replaces() {
		let mut expr = Expr::binary(BinaryOp::Add, a(), Expr::literal(1));
		for child in expr.children_mut() {
			*child = Expr::literal(2);
		}
		assert_eq!(expr, Expr::binary(BinaryOp::Add, Expr::literal(2), Expr::literal(2)));
	}

	#[test]
	fn test_is_constant() {
		assert!(Expr::literal(1).is_constant());
		assert!(!a().is_constant());
		assert!(Expr::binary(BinaryOp::Mod, Expr::literal(1), Expr::literal(2)).is_constant());
		assert!(!Expr::binary(BinaryOp::Add, Expr::literal(1), a()).is_constant());
		assert!(Expr::function("LOWER", vec![Expr::literal("FOO")]).is_constant());
		assert!(!Expr::function("random", vec![]).is_constant());
		assert!(Expr::row(vec![]).is_constant());
	}

	#[test]
	fn test_node_count() {
		let expr = Expr::and(Expr::comparison(ComparisonOp::Eq, a(), Expr::literal(1)), Expr::not(a()));
		assert_eq!(expr.node_count(), 6);
	}

	#[test]
	fn test_default_is_null() {
		assert_eq!(Expr::default(), Expr::null());
	}

	#[test]
	fn test_drop_deep_chain() {
		let mut expr = a();
		for _ in 0..100_000 {
			expr = Expr::binary(BinaryOp::Add, expr, Expr::literal(1));
		}
		drop(expr);

		let mut expr = a();
		for i in 0..100_000 {
			expr = match i % 3 {
				0 => Expr::not(expr),
				1 => Expr::paren(expr),
				_ => Expr::in_list(expr, vec![Expr::literal(1)], false),
			};
		}
		drop(expr);
	}
}
