// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Literal evaluation.
//!
//! [`evaluate`] computes the literal produced by an operator applied to
//! literal operands. `Ok(None)` means the combination is not evaluable and
//! the caller should leave the node alone; `Err` means the operands were
//! literal but cannot be combined, which aborts normalization.

use std::fmt::{Display, Formatter};

use canon_type::Value;

use crate::{
	ast::{BinaryOp, ComparisonOp, UnaryOp},
	error::EvaluationError,
};

mod arith;
mod compare;
pub mod function;
mod logic;

use arith::{eval_arith, eval_unary};
use compare::eval_comparison;
use logic::{eval_and, eval_not, eval_or};

/// An operator together with its operand layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator<'a> {
	Unary(UnaryOp),
	Binary(BinaryOp),
	Comparison(ComparisonOp),
	And,
	Or,
	Not,
	/// Operands: value, lower, upper.
	Between {
		negated: bool,
	},
	/// Operands: the tested value, then every candidate.
	In {
		negated: bool,
	},
	Function(&'a str),
}

impl Display for Operator<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Operator::Unary(op) => Display::fmt(op, f),
			Operator::Binary(op) => Display::fmt(op, f),
			Operator::Comparison(op) => Display::fmt(op, f),
			Operator::And => f.write_str("AND"),
			Operator::Or => f.write_str("OR"),
			Operator::Not => f.write_str("NOT"),
			Operator::Between {
				negated: false,
			} => f.write_str("BETWEEN"),
			Operator::Between {
				negated: true,
			} => f.write_str("NOT BETWEEN"),
			Operator::In {
				negated: false,
			} => f.write_str("IN"),
			Operator::In {
				negated: true,
			} => f.write_str("NOT IN"),
			Operator::Function(name) => f.write_str(name),
		}
	}
}

/// Evaluates `operator` over literal `operands`.
///
/// An operand count that does not fit the operator is not evaluable.
pub fn evaluate(operator: &Operator<'_>, operands: &[Value]) -> Result<Option<Value>, EvaluationError> {
	match (operator, operands) {
		(Operator::Unary(op), [operand]) => eval_unary(*op, operand),
		(Operator::Binary(op), [left, right]) => eval_arith(*op, left, right),
		(Operator::Comparison(op), [left, right]) => eval_comparison(*op, left, right).map(Some),
		(Operator::And, [left, right]) => eval_and(left, right).map(Some),
		(Operator::Or, [left, right]) => eval_or(left, right).map(Some),
		(Operator::Not, [operand]) => eval_not(operand).map(Some),
		(
			Operator::Between {
				negated,
			},
			[value, lower, upper],
		) => eval_between(*negated, value, lower, upper),
		(
			Operator::In {
				negated,
			},
			[needle, candidates @ ..],
		) => eval_in(*negated, needle, candidates),
		(Operator::Function(name), args) => match function::lookup(name) {
			Some(builtin) => builtin.call(args).map(Some),
			None => Ok(None),
		},
		_ => Ok(None),
	}
}

fn eval_between(negated: bool, value: &Value, lower: &Value, upper: &Value) -> Result<Option<Value>, EvaluationError> {
	let (low_op, high_op) = if negated {
		(ComparisonOp::Lt, ComparisonOp::Gt)
	} else {
		(ComparisonOp::GtEq, ComparisonOp::LtEq)
	};

	let low = eval_comparison(low_op, value, lower)?;
	let high = eval_comparison(high_op, value, upper)?;

	if negated {
		eval_or(&low, &high).map(Some)
	} else {
		eval_and(&low, &high).map(Some)
	}
}

fn eval_in(negated: bool, needle: &Value, candidates: &[Value]) -> Result<Option<Value>, EvaluationError> {
	if candidates.is_empty() {
		return Ok(None);
	}

	let mut found = false;
	let mut unknown = needle.is_null();
	for candidate in candidates {
		match eval_comparison(ComparisonOp::Eq, needle, candidate)? {
			Value::Boolean(true) => found = true,
			Value::Null => unknown = true,
			_ => {}
		}
	}

	let result = if needle.is_null() {
		Value::Null
	} else if found {
		Value::Boolean(true)
	} else if unknown {
		Value::Null
	} else {
		Value::Boolean(false)
	};

	if negated {
		eval_not(&result).map(Some)
	} else {
		Ok(Some(result))
	}
}
