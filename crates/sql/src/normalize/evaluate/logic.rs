// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Three-valued connectives. `None` stands for the unknown truth value.

use canon_type::Value;

use crate::error::EvaluationError;

fn truth(operator: &str, value: &Value) -> Result<Option<bool>, EvaluationError> {
	match value {
		Value::Null => Ok(None),
		Value::Boolean(b) => Ok(Some(*b)),
		_ => Err(EvaluationError::InvalidOperand {
			operator: operator.to_string(),
			operand: value.get_type(),
		}),
	}
}

fn to_value(truth: Option<bool>) -> Value {
	truth.map(Value::Boolean).unwrap_or(Value::Null)
}

pub(crate) fn eval_and(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
	let l = truth("AND", left)?;
	let r = truth("AND", right)?;
	let result = match (l, r) {
		(Some(false), _) | (_, Some(false)) => Some(false),
		(Some(true), Some(true)) => Some(true),
		_ => None,
	};
	Ok(to_value(result))
}

pub(crate) fn eval_or(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
	let l = truth("OR", left)?;
	let r = truth("OR", right)?;
	let result = match (l, r) {
		(Some(true), _) | (_, Some(true)) => Some(true),
		(Some(false), Some(false)) => Some(false),
		_ => None,
	};
	Ok(to_value(result))
}

pub(crate) fn eval_not(operand: &Value) -> Result<Value, EvaluationError> {
	Ok(to_value(truth("NOT", operand)?.map(|b| !b)))
}
