// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use super::{Rewrite, Rule};
use crate::{
	ast::{ComparisonOp, Expr},
	error::NormalizeError,
};

/// Expands `a BETWEEN b AND c` into `a >= b AND a <= c` and
/// `a NOT BETWEEN b AND c` into `a < b OR a > c`. Membership lists are
/// left alone.
pub struct ExpandRange;

impl Rule for ExpandRange {
	fn name(&self) -> &'static str {
		"expand_range"
	}

	fn apply(&self, mut expr: Expr) -> Result<Rewrite, NormalizeError> {
		if let Expr::Range {
			operand,
			lower,
			upper,
			negated,
		} = &mut expr
		{
			let operand = mem::take(operand.as_mut());
			let lower = mem::take(lower.as_mut());
			let upper = mem::take(upper.as_mut());

			let expanded = if *negated {
				Expr::or(
					Expr::comparison(ComparisonOp::Lt, operand.clone(), lower),
					Expr::comparison(ComparisonOp::Gt, operand, upper),
				)
			} else {
				Expr::and(
					Expr::comparison(ComparisonOp::GtEq, operand.clone(), lower),
					Expr::comparison(ComparisonOp::LtEq, operand, upper),
				)
			};
			return Ok(Rewrite::Changed(expanded));
		}
		Ok(Rewrite::Unchanged(expr))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn id(name: &str) -> Expr {
		Expr::identifier(name)
	}

	#[test]
	fn test_between() {
		let expr = Expr::range(id("a"), id("b"), id("c"), false);
		assert_eq!(
			ExpandRange.apply(expr).unwrap(),
			Rewrite::Changed(Expr::and(
				Expr::comparison(ComparisonOp::GtEq, id("a"), id("b")),
				Expr::comparison(ComparisonOp::LtEq, id("a"), id("c")),
			))
		);
	}

	#[test]
	fn test_not_between() {
		let expr = Expr::range(id("a"), id("b"), id("c"), true);
		assert_eq!(
			ExpandRange.apply(expr).unwrap(),
			Rewrite::Changed(Expr::or(
				Expr::comparison(ComparisonOp::Lt, id("a"), id("b")),
				Expr::comparison(ComparisonOp::Gt, id("a"), id("c")),
			))
		);
	}

	#[test]
	fn test_membership_untouched() {
		let expr = Expr::in_list(id("a"), vec![Expr::literal(1), id("b")], false);
		assert_eq!(ExpandRange.apply(expr.clone()).unwrap(), Rewrite::Unchanged(expr));
	}
}
