// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use canon_type::{Value, compare::partial_cmp};

use crate::{ast::ComparisonOp, error::EvaluationError};

pub(crate) fn eval_comparison(op: ComparisonOp, left: &Value, right: &Value) -> Result<Value, EvaluationError> {
	if left.is_null() || right.is_null() {
		return Ok(Value::Null);
	}

	let Some(ordering) = partial_cmp(left, right) else {
		return Err(EvaluationError::TypeMismatch {
			operator: op.to_string(),
			left: left.get_type(),
			right: right.get_type(),
		});
	};

	let result = match op {
		ComparisonOp::Eq => ordering == Ordering::Equal,
		ComparisonOp::NotEq => ordering != Ordering::Equal,
		ComparisonOp::Lt => ordering == Ordering::Less,
		ComparisonOp::LtEq => ordering != Ordering::Greater,
		ComparisonOp::Gt => ordering == Ordering::Greater,
		ComparisonOp::GtEq => ordering != Ordering::Less,
	};
	Ok(Value::Boolean(result))
}
