// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use canon_type::Value;

use super::{Rewrite, Rule};
use crate::{ast::Expr, error::NormalizeError};

/// Boolean identities for a connective with one boolean literal side and
/// one non-constant side. A null literal side never simplifies.
pub struct ShortCircuit;

fn boolean(expr: &Expr) -> Option<bool> {
	match expr {
		Expr::Literal(Value::Boolean(b)) => Some(*b),
		_ => None,
	}
}

/// The boolean literal side of a connective and the other side.
fn split<'a>(left: &'a mut Expr, right: &'a mut Expr) -> Option<(bool, &'a mut Expr)> {
	match (boolean(left), boolean(right)) {
		(Some(b), None) if !right.is_constant() => Some((b, right)),
		(None, Some(b)) if !left.is_constant() => Some((b, left)),
		_ => None,
	}
}

impl Rule for ShortCircuit {
	fn name(&self) -> &'static str {
		"short_circuit"
	}

	fn apply(&self, mut expr: Expr) -> Result<Rewrite, NormalizeError> {
		// `true` absorbs OR, `false` absorbs AND
		let absorbing = matches!(expr, Expr::Or { .. });

		if let Expr::Or {
			left,
			right,
		}
		| Expr::And {
			left,
			right,
		} = &mut expr
		{
			if let Some((b, other)) = split(left, right) {
				let result = if b == absorbing {
					Expr::literal(b)
				} else {
					mem::take(other)
				};
				return Ok(Rewrite::Changed(result));
			}
		}
		Ok(Rewrite::Unchanged(expr))
	}
}
