// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use super::{Rewrite, Rule};
use crate::{ast::Expr, error::NormalizeError};

/// Moves the constant side of a comparison to the right, mirroring the
/// operator.
pub struct SwapComparison;

impl Rule for SwapComparison {
	fn name(&self) -> &'static str {
		"swap_comparison"
	}

	fn apply(&self, mut expr: Expr) -> Result<Rewrite, NormalizeError> {
		if let Expr::Comparison {
			op,
			left,
			right,
		} = &mut expr
		{
			if left.is_constant() && !right.is_constant() {
				*op = op.mirror();
				mem::swap(left, right);
				return Ok(Rewrite::Changed(expr));
			}
		}
		Ok(Rewrite::Unchanged(expr))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ast::{BinaryOp, ComparisonOp};

	fn a() -> Expr {
		Expr::identifier("a")
	}

	#[test]
	fn test_swaps_and_mirrors() {
		let expr = Expr::comparison(ComparisonOp::Gt, Expr::literal(1), a());
		assert_eq!(
			SwapComparison.apply(expr).unwrap(),
			Rewrite::Changed(Expr::comparison(ComparisonOp::Lt, a(), Expr::literal(1)))
		);

		let expr = Expr::comparison(ComparisonOp::Eq, Expr::literal(1), a());
		assert_eq!(
			SwapComparison.apply(expr).unwrap(),
			Rewrite::Changed(Expr::comparison(ComparisonOp::Eq, a(), Expr::literal(1)))
		);
	}

	#[test]
	fn test_constant_non_literal_side_moves() {
		let modulo = Expr::binary(BinaryOp::Mod, Expr::literal(5), Expr::literal(2));
		let expr = Expr::comparison(ComparisonOp::LtEq, modulo.clone(), a());
		assert_eq!(
			SwapComparison.apply(expr).unwrap(),
			Rewrite::Changed(Expr::comparison(ComparisonOp::GtEq, a(), modulo))
		);
	}

	#[test]
	fn test_already_normalized() {
		for expr in [
			Expr::comparison(ComparisonOp::Lt, a(), Expr::literal(1)),
			Expr::comparison(ComparisonOp::Lt, a(), Expr::identifier("b")),
			Expr::comparison(ComparisonOp::Lt, Expr::literal(1), Expr::literal(2)),
		] {
			assert_eq!(SwapComparison.apply(expr.clone()).unwrap(), Rewrite::Unchanged(expr));
		}
	}
}
