// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::cmp::Ordering;

use crate::Value;

/// Orders two values of comparable kinds.
///
/// Integers and floats are compared after promoting the integer side to a
/// float. Returns `None` when either side is null or the kinds cannot be
/// ordered against each other.
#[inline]
pub fn partial_cmp(l: &Value, r: &Value) -> Option<Ordering> {
	match (l, r) {
		(Value::Boolean(l), Value::Boolean(r)) => Some(l.cmp(r)),
		(Value::Int8(l), Value::Int8(r)) => Some(l.cmp(r)),
		(Value::Float8(l), Value::Float8(r)) => Some(l.cmp(r)),
		(Value::Int8(l), Value::Float8(r)) => (*l as f64).partial_cmp(&r.value()),
		(Value::Float8(l), Value::Int8(r)) => l.value().partial_cmp(&(*r as f64)),
		(Value::Utf8(l), Value::Utf8(r)) => Some(l.cmp(r)),
		_ => None,
	}
}
