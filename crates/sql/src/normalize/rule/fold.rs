// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use canon_type::Value;

use super::{Rewrite, Rule};
use crate::{
	ast::Expr,
	error::NormalizeError,
	normalize::evaluate::{Operator, evaluate},
};

/// Replaces an operator node whose operands are all literals with the
/// literal it evaluates to. Function calls are left to
/// [`EvaluateFunction`](super::EvaluateFunction).
pub struct Fold;

fn operator(expr: &Expr) -> Option<Operator<'static>> {
	match expr {
		Expr::Unary {
			op,
			..
		} => Some(Operator::Unary(*op)),
		Expr::Binary {
			op,
			..
		} => Some(Operator::Binary(*op)),
		Expr::Comparison {
			op,
			..
		} => Some(Operator::Comparison(*op)),
		Expr::And {
			..
		} => Some(Operator::And),
		Expr::Or {
			..
		} => Some(Operator::Or),
		Expr::Not {
			..
		} => Some(Operator::Not),
		Expr::Range {
			negated,
			..
		} => Some(Operator::Between {
			negated: *negated,
		}),
		Expr::In {
			negated,
			..
		} => Some(Operator::In {
			negated: *negated,
		}),
		Expr::Literal(_)
		| Expr::Identifier(_)
		| Expr::Function {
			..
		}
		| Expr::Tuple {
			..
		} => None,
	}
}

impl Rule for Fold {
	fn name(&self) -> &'static str {
		"fold"
	}

	fn apply(&self, expr: Expr) -> Result<Rewrite, NormalizeError> {
		let Some(operator) = operator(&expr) else {
			return Ok(Rewrite::Unchanged(expr));
		};

		let operands: Option<Vec<Value>> = expr.children().into_iter().map(|child| child.as_literal().cloned()).collect();
		let Some(operands) = operands else {
			return Ok(Rewrite::Unchanged(expr));
		};

		match evaluate(&operator, &operands)? {
			Some(value) => Ok(Rewrite::Changed(Expr::Literal(value))),
			None => Ok(Rewrite::Unchanged(expr)),
		}
	}
}
