// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use canon_type::{OrderedF64, Value};

use crate::{
	ast::{BinaryOp, UnaryOp},
	error::EvaluationError,
};

/// A float result, or not evaluable when it is not finite.
fn float(v: f64) -> Option<Value> {
	OrderedF64::try_from(v).ok().map(Value::Float8)
}

pub(crate) fn eval_arith(op: BinaryOp, left: &Value, right: &Value) -> Result<Option<Value>, EvaluationError> {
	if op == BinaryOp::Mod {
		return Ok(None);
	}

	if left.is_null() || right.is_null() {
		return Ok(Some(Value::Null));
	}

	match (left, right) {
		(Value::Int8(l), Value::Int8(r)) => eval_int(op, *l, *r),
		_ => {
			let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) else {
				return Err(EvaluationError::TypeMismatch {
					operator: op.to_string(),
					left: left.get_type(),
					right: right.get_type(),
				});
			};
			eval_float(op, l, r)
		}
	}
}

fn eval_int(op: BinaryOp, l: i64, r: i64) -> Result<Option<Value>, EvaluationError> {
	let result = match op {
		BinaryOp::Add => l.checked_add(r),
		BinaryOp::Sub => l.checked_sub(r),
		BinaryOp::Mul => l.checked_mul(r),
		BinaryOp::Div => {
			if r == 0 {
				return Err(EvaluationError::DivisionByZero);
			}
			// inexact or overflowing division falls through to float
			match l.checked_rem(r) {
				Some(0) => l.checked_div(r),
				_ => None,
			}
		}
		BinaryOp::Mod => return Ok(None),
	};

	match result {
		Some(v) => Ok(Some(Value::Int8(v))),
		None => eval_float(op, l as f64, r as f64),
	}
}

fn eval_float(op: BinaryOp, l: f64, r: f64) -> Result<Option<Value>, EvaluationError> {
	let result = match op {
		BinaryOp::Add => l + r,
		BinaryOp::Sub => l - r,
		BinaryOp::Mul => l * r,
		BinaryOp::Div => {
			if r == 0.0 {
				return Err(EvaluationError::DivisionByZero);
			}
			l / r
		}
		BinaryOp::Mod => return Ok(None),
	};
	Ok(float(result))
}

pub(crate) fn eval_unary(op: UnaryOp, operand: &Value) -> Result<Option<Value>, EvaluationError> {
	match (op, operand) {
		(_, Value::Null) => Ok(Some(Value::Null)),
		(UnaryOp::Plus, Value::Int8(_) | Value::Float8(_)) => Ok(Some(operand.clone())),
		(UnaryOp::Neg, Value::Int8(v)) => match v.checked_neg() {
			Some(negated) => Ok(Some(Value::Int8(negated))),
			None => Ok(float(-(*v as f64))),
		},
		(UnaryOp::Neg, Value::Float8(v)) => Ok(float(-v.value())),
		_ => Err(EvaluationError::InvalidOperand {
			operator: op.to_string(),
			operand: operand.get_type(),
		}),
	}
}
