// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use canon_type::Value;

use super::{Rewrite, Rule};
use crate::{
	ast::Expr,
	error::NormalizeError,
	normalize::evaluate::{Operator, evaluate},
};

/// Replaces a call to a registered builtin whose arguments are all literals
/// with its result.
pub struct EvaluateFunction;

impl Rule for EvaluateFunction {
	fn name(&self) -> &'static str {
		"evaluate_function"
	}

	fn apply(&self, expr: Expr) -> Result<Rewrite, NormalizeError> {
		let result = match &expr {
			Expr::Function {
				name,
				args,
			} => {
				let values: Option<Vec<Value>> = args.iter().map(|arg| arg.as_literal().cloned()).collect();
				match values {
					Some(values) => evaluate(&Operator::Function(name), &values)?,
					None => None,
				}
			}
			_ => None,
		};

		match result {
			Some(value) => Ok(Rewrite::Changed(Expr::Literal(value))),
			None => Ok(Rewrite::Unchanged(expr)),
		}
	}
}
