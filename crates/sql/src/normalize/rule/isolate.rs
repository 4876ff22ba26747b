// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Linear isolation: `X + 1 = 3` becomes `X = 2`.
//!
//! Only integer constants are moved, with checked arithmetic. Whenever the
//! moved constant would not be exact (overflow, a remainder when dividing
//! by the multiplier) the rule declines.

use std::mem;

use canon_type::Value;

use super::{Rewrite, Rule};
use crate::{
	ast::{BinaryOp, ComparisonOp, Expr, UnaryOp},
	error::NormalizeError,
};

pub struct Isolate;

enum Side {
	Left,
	Right,
}

fn integer(expr: &Expr) -> Option<i64> {
	match expr {
		Expr::Literal(Value::Int8(v)) => Some(*v),
		_ => None,
	}
}

fn flip_if_negative(op: ComparisonOp, c: i64) -> ComparisonOp {
	if c < 0 { op.mirror() } else { op }
}

/// `X * c op r` as `X op' r / c`, when `c` divides `r`.
fn unscale(op: ComparisonOp, r: i64, c: i64) -> Option<(ComparisonOp, i64)> {
	if c == 0 || r.checked_rem(c)? != 0 {
		return None;
	}
	Some((flip_if_negative(op, c), r.checked_div(c)?))
}

/// Where the variable sits in `left <bop> right`, with the comparison and
/// constant that replace the original ones.
fn plan(op: ComparisonOp, bop: BinaryOp, left: &Expr, right: &Expr, r: i64) -> Option<(Side, ComparisonOp, i64)> {
	match (integer(left), integer(right)) {
		(None, Some(c)) if !left.is_constant() => {
			let (op, r) = match bop {
				BinaryOp::Add => (op, r.checked_sub(c)?),
				BinaryOp::Sub => (op, r.checked_add(c)?),
				BinaryOp::Mul => unscale(op, r, c)?,
				BinaryOp::Div if c != 0 => (flip_if_negative(op, c), r.checked_mul(c)?),
				BinaryOp::Div | BinaryOp::Mod => return None,
			};
			Some((Side::Left, op, r))
		}
		(Some(c), None) if !right.is_constant() => {
			let (op, r) = match bop {
				BinaryOp::Add => (op, r.checked_sub(c)?),
				BinaryOp::Sub => (op.mirror(), c.checked_sub(r)?),
				BinaryOp::Mul => unscale(op, r, c)?,
				BinaryOp::Div | BinaryOp::Mod => return None,
			};
			Some((Side::Right, op, r))
		}
		_ => None,
	}
}

/// Takes the variable out of `left` in `left op r`, with the comparison and
/// constant it is compared against. `left` is untouched when this declines.
fn isolate(op: ComparisonOp, left: &mut Expr, r: i64) -> Option<(ComparisonOp, Expr, i64)> {
	match left {
		Expr::Unary {
			op: UnaryOp::Neg,
			operand,
		} if !operand.is_constant() => {
			let r = r.checked_neg()?;
			Some((op.mirror(), mem::take(operand.as_mut()), r))
		}
		Expr::Binary {
			op: bop,
			left,
			right,
		} => {
			let (side, op, r) = plan(op, *bop, left, right, r)?;
			let variable = match side {
				Side::Left => left,
				Side::Right => right,
			};
			Some((op, mem::take(variable.as_mut()), r))
		}
		_ => None,
	}
}

impl Rule for Isolate {
	fn name(&self) -> &'static str {
		"isolate"
	}

	fn apply(&self, mut expr: Expr) -> Result<Rewrite, NormalizeError> {
		if let Expr::Comparison {
			op,
			left,
			right,
		} = &mut expr
		{
			if let Some(r) = integer(right) {
				if let Some((op, variable, r)) = isolate(*op, left, r) {
					return Ok(Rewrite::Changed(Expr::comparison(op, variable, Expr::literal(r))));
				}
			}
		}
		Ok(Rewrite::Unchanged(expr))
	}
}
