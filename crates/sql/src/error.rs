// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use canon_type::Type;

/// Tokenizer or parser failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// A fold attempted on literal operands that cannot be combined.
///
/// Declining to fold a non-constant operand is never an evaluation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
	#[error("operator {operator} cannot be applied to {left} and {right}")]
	TypeMismatch {
		operator: String,
		left: Type,
		right: Type,
	},

	#[error("operator {operator} cannot be applied to {operand}")]
	InvalidOperand {
		operator: String,
		operand: Type,
	},

	#[error("division by zero")]
	DivisionByZero,

	#[error("function {function} expects {expected} argument(s), got {actual}")]
	ArityMismatch {
		function: String,
		expected: usize,
		actual: usize,
	},

	#[error("function {function} cannot be applied to {argument}")]
	InvalidArgument {
		function: String,
		argument: Type,
	},
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
	#[error("evaluation error: {0}")]
	Evaluation(#[from] EvaluationError),

	/// The rule set did not reach a fixpoint within the pass bound. This is
	/// a defect in the rule set, never a property of the input.
	#[error("normalization exceeded {limit} passes over {nodes} nodes without reaching a fixpoint")]
	PassLimitExceeded {
		limit: usize,
		nodes: usize,
	},
}

impl NormalizeError {
	pub fn is_internal(&self) -> bool {
		matches!(self, NormalizeError::PassLimitExceeded { .. })
	}

	pub fn code(&self) -> &'static str {
		match self {
			NormalizeError::Evaluation(EvaluationError::TypeMismatch { .. }) => "NORMALIZE_001",
			NormalizeError::Evaluation(EvaluationError::InvalidOperand { .. }) => "NORMALIZE_002",
			NormalizeError::Evaluation(EvaluationError::DivisionByZero) => "NORMALIZE_003",
			NormalizeError::Evaluation(EvaluationError::ArityMismatch { .. }) => "NORMALIZE_004",
			NormalizeError::Evaluation(EvaluationError::InvalidArgument { .. }) => "NORMALIZE_005",
			NormalizeError::PassLimitExceeded { .. } => "NORMALIZE_900",
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("parse error: {0}")]
	Parse(#[from] ParseError),

	#[error("normalize error: {0}")]
	Normalize(#[from] NormalizeError),
}

impl Error {
	pub fn code(&self) -> &'static str {
		match self {
			Error::Parse(_) => "PARSE_001",
			Error::Normalize(err) => err.code(),
		}
	}
}
