// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Registry of pure builtin functions.
//!
//! Only registered functions are considered pure; any other call is opaque
//! to folding and makes its enclosing expression non-constant.

use std::collections::HashMap;

use canon_type::{OrderedF64, Type, Value};
use once_cell::sync::Lazy;

use crate::error::EvaluationError;

pub struct Builtin {
	name: &'static str,
	arity: usize,
	/// Returns `None` when an argument has the wrong kind.
	eval: fn(&[Value]) -> Option<Value>,
}

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
	let builtins = [
		Builtin {
			name: "lower",
			arity: 1,
			eval: lower,
		},
		Builtin {
			name: "upper",
			arity: 1,
			eval: upper,
		},
		Builtin {
			name: "length",
			arity: 1,
			eval: length,
		},
		Builtin {
			name: "abs",
			arity: 1,
			eval: abs,
		},
	];
	builtins.into_iter().map(|builtin| (builtin.name, builtin)).collect()
});

/// Looks up a builtin by name, ignoring case.
pub fn lookup(name: &str) -> Option<&'static Builtin> {
	BUILTINS.get(name.to_ascii_lowercase().as_str())
}

pub fn is_pure(name: &str) -> bool {
	lookup(name).is_some()
}

impl Builtin {
	pub fn call(&self, args: &[Value]) -> Result<Value, EvaluationError> {
		if args.len() != self.arity {
			return Err(EvaluationError::ArityMismatch {
				function: self.name.to_string(),
				expected: self.arity,
				actual: args.len(),
			});
		}

		if args.iter().any(Value::is_null) {
			return Ok(Value::Null);
		}

		(self.eval)(args).ok_or_else(|| EvaluationError::InvalidArgument {
			function: self.name.to_string(),
			argument: args.first().map(Value::get_type).unwrap_or(Type::Null),
		})
	}
}

fn lower(args: &[Value]) -> Option<Value> {
	match args {
		[Value::Utf8(s)] => Some(Value::Utf8(s.to_lowercase())),
		_ => None,
	}
}

fn upper(args: &[Value]) -> Option<Value> {
	match args {
		[Value::Utf8(s)] => Some(Value::Utf8(s.to_uppercase())),
		_ => None,
	}
}

fn length(args: &[Value]) -> Option<Value> {
	match args {
		[Value::Utf8(s)] => i64::try_from(s.chars().count()).ok().map(Value::Int8),
		_ => None,
	}
}

fn abs(args: &[Value]) -> Option<Value> {
	match args {
		[Value::Int8(v)] => match v.checked_abs() {
			Some(abs) => Some(Value::Int8(abs)),
			None => OrderedF64::try_from((*v as f64).abs()).ok().map(Value::Float8),
		},
		[Value::Float8(v)] => OrderedF64::try_from(v.value().abs()).ok().map(Value::Float8),
		_ => None,
	}
}
