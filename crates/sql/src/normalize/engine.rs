// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Bottom-up rewrite driver.
//!
//! A pass walks the tree in post-order using an explicit work stack:
//! children are detached from their parent, rewritten, and reattached before
//! the parent itself is rewritten to a local fixpoint. Passes repeat until
//! one changes nothing. A membership test that is not fully constant is
//! left exactly as written, operand and list included.

use std::mem;

use tracing::{debug, error, trace, warn};

use super::rule::{Rewrite, Rule};
use crate::{ast::Expr, config::NormalizeConfig, error::NormalizeError};

enum Frame {
	/// Detach the children of this node and schedule them.
	Enter(Expr),
	/// Reattach the last `arity` finished nodes and rewrite.
	Exit(Expr, usize),
}

pub(crate) struct Engine<'a> {
	rules: &'a [Box<dyn Rule>],
	config: &'a NormalizeConfig,
}

impl<'a> Engine<'a> {
	pub(crate) fn new(rules: &'a [Box<dyn Rule>], config: &'a NormalizeConfig) -> Self {
		Self {
			rules,
			config,
		}
	}

	pub(crate) fn run(&self, mut expr: Expr) -> Result<Expr, NormalizeError> {
		let nodes = expr.node_count();
		let limit = self.config.pass_limit(nodes);

		for pass in 1..=limit {
			let (next, changed) = self.pass(expr)?;
			debug!(pass, changed, "normalize pass complete");
			if !changed {
				return Ok(next);
			}
			expr = next;
		}

		error!(limit, nodes, "normalization did not reach a fixpoint");
		Err(NormalizeError::PassLimitExceeded {
			limit,
			nodes,
		})
	}

	fn pass(&self, root: Expr) -> Result<(Expr, bool), NormalizeError> {
		let mut changed = false;
		let mut stack = vec![Frame::Enter(root)];
		let mut done: Vec<Expr> = Vec::new();

		while let Some(frame) = stack.pop() {
			match frame {
				Frame::Enter(node) if is_opaque(&node) => done.push(node),
				Frame::Enter(mut node) => {
					let children: Vec<Expr> = node.children_mut().into_iter().map(mem::take).collect();
					stack.push(Frame::Exit(node, children.len()));
					stack.extend(children.into_iter().rev().map(Frame::Enter));
				}
				Frame::Exit(mut node, arity) => {
					let children = done.split_off(done.len() - arity);
					for (slot, child) in node.children_mut().into_iter().zip(children) {
						*slot = child;
					}
					let (node, rewritten) = self.rewrite(node)?;
					changed |= rewritten;
					done.push(node);
				}
			}
		}

		match done.pop() {
			Some(root) if done.is_empty() => Ok((root, changed)),
			_ => unreachable!("a pass must finish with exactly one root"),
		}
	}

	/// Applies rules to one node until none fires or the local limit is hit.
	fn rewrite(&self, mut node: Expr) -> Result<(Expr, bool), NormalizeError> {
		let mut changed = false;

		'fixpoint: for _ in 0..self.config.local_rewrite_limit {
			for rule in self.rules {
				match rule.apply(node)? {
					Rewrite::Changed(next) => {
						trace!(rule = rule.name(), "rule fired");
						node = next;
						changed = true;
						continue 'fixpoint;
					}
					Rewrite::Unchanged(same) => node = same,
				}
			}
			return Ok((node, changed));
		}

		warn!(limit = self.config.local_rewrite_limit, "local rewrite limit reached");
		Ok((node, changed))
	}
}

/// Only a fully constant `IN` is rewritten, and then only by folding.
fn is_opaque(node: &Expr) -> bool {
	matches!(node, Expr::In { .. }) && !node.is_constant()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		ast::{BinaryOp, ComparisonOp},
		normalize::rule::default_rules,
	};

	fn run(expr: Expr) -> Result<Expr, NormalizeError> {
		let rules = default_rules();
		let config = NormalizeConfig::default();
		Engine::new(&rules, &config).run(expr)
	}

	#[test]
	fn test_folds_bottom_up() {
		let expr = Expr::comparison(
			ComparisonOp::Eq,
			Expr::identifier("a"),
			Expr::binary(
				BinaryOp::Sub,
				Expr::binary(
					BinaryOp::Add,
					Expr::literal(1),
					Expr::paren(Expr::binary(BinaryOp::Mul, Expr::literal(2), Expr::literal(3))),
				),
				Expr::literal(4),
			),
		);
		assert_eq!(
			run(expr).unwrap(),
			Expr::comparison(ComparisonOp::Eq, Expr::identifier("a"), Expr::literal(3))
		);
	}

	#[test]
	fn test_second_pass_reaches_new_children() {
		// expansion introduces comparisons that only a later pass swaps
		let expr = Expr::range(Expr::literal(1), Expr::identifier("a"), Expr::identifier("b"), false);
		assert_eq!(
			run(expr).unwrap(),
			Expr::and(
				Expr::comparison(ComparisonOp::LtEq, Expr::identifier("a"), Expr::literal(1)),
				Expr::comparison(ComparisonOp::GtEq, Expr::identifier("b"), Expr::literal(1)),
			)
		);
	}

	#[test]
	fn test_membership_with_variables_is_untouched() {
		let list = vec![Expr::binary(BinaryOp::Add, Expr::literal(1), Expr::literal(1)), Expr::literal(3)];
		let needle = Expr::binary(BinaryOp::Mul, Expr::literal(2), Expr::identifier("a"));
		let expr = Expr::in_list(needle, list, false);
		assert_eq!(run(expr.clone()).unwrap(), expr);

		let expr = Expr::in_list(Expr::identifier("a"), vec![Expr::paren(Expr::identifier("b"))], true);
		assert_eq!(run(expr.clone()).unwrap(), expr);
	}

	#[test]
	fn test_constant_membership_folds() {
		let list = vec![Expr::binary(BinaryOp::Add, Expr::literal(1), Expr::literal(1)), Expr::literal(3)];
		let expr = Expr::in_list(Expr::paren(Expr::literal(2)), list, false);
		assert_eq!(run(expr).unwrap(), Expr::literal(true));
	}

	#[test]
	fn test_local_limit_stops_rewriting() {
		let rules = default_rules();
		let config = NormalizeConfig::default().local_rewrite_limit(0);
		let expr = Expr::binary(BinaryOp::Add, Expr::literal(1), Expr::literal(1));
		let result = Engine::new(&rules, &config).run(expr.clone());
		assert_eq!(result, Ok(expr));
	}

	#[test]
	fn test_pass_limit() {
		let rules = default_rules();
		let config = NormalizeConfig::default().passes_per_node(0).min_passes(0);
		let result = Engine::new(&rules, &config).run(Expr::identifier("a"));
		assert_eq!(
			result,
			Err(NormalizeError::PassLimitExceeded {
				limit: 0,
				nodes: 1,
			})
		);
	}
}
