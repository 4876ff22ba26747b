// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use super::{Rewrite, Rule};
use crate::{
	ast::{Expr, TupleKind},
	error::NormalizeError,
};

/// Collapses a one-element grouping into its element. Row constructors are
/// kept.
pub struct Unwrap;

impl Rule for Unwrap {
	fn name(&self) -> &'static str {
		"unwrap"
	}

	fn apply(&self, mut expr: Expr) -> Result<Rewrite, NormalizeError> {
		if let Expr::Tuple {
			elements,
			kind: TupleKind::Paren,
		} = &mut expr
		{
			if let [inner] = elements.as_mut_slice() {
				return Ok(Rewrite::Changed(mem::take(inner)));
			}
		}
		Ok(Rewrite::Unchanged(expr))
	}
}
