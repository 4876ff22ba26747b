// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Single-node rewrite rules.
//!
//! A rule sees one node whose children are already normalized and either
//! returns a replacement or hands the node back untouched. Rules never
//! recurse into children; the engine drives traversal.

mod expand;
mod fold;
mod function;
mod isolate;
mod short_circuit;
mod swap;
mod unwrap;

pub use expand::ExpandRange;
pub use fold::Fold;
pub use function::EvaluateFunction;
pub use isolate::Isolate;
pub use short_circuit::ShortCircuit;
pub use swap::SwapComparison;
pub use unwrap::Unwrap;

use crate::{ast::Expr, error::NormalizeError};

/// The outcome of applying a rule to a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
	Changed(Expr),
	Unchanged(Expr),
}

pub trait Rule: Send + Sync {
	fn name(&self) -> &'static str;

	/// Rewrites `expr` or returns it as [`Rewrite::Unchanged`]. An error
	/// aborts the whole normalization.
	fn apply(&self, expr: Expr) -> Result<Rewrite, NormalizeError>;
}

/// The rule set in priority order; the first rule that fires wins.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
	vec![
		Box::new(Fold),
		Box::new(Unwrap),
		Box::new(ShortCircuit),
		Box::new(SwapComparison),
		Box::new(Isolate),
		Box::new(ExpandRange),
		Box::new(EvaluateFunction),
	]
}
