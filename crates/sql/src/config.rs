// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Configuration for the rewrite engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
	/// Whole-tree passes allowed per node of the input tree.
	///
	/// Default: 2
	pub passes_per_node: usize,
	/// Passes allowed on top of the per-node budget.
	///
	/// Default: 8
	pub min_passes: usize,
	/// Rule applications allowed on a single node within one pass.
	///
	/// Default: 16
	pub local_rewrite_limit: usize,
}

impl Default for NormalizeConfig {
	fn default() -> Self {
		Self {
			passes_per_node: 2,
			min_passes: 8,
			local_rewrite_limit: 16,
		}
	}
}

impl NormalizeConfig {
	/// Create a new config with default values.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn passes_per_node(mut self, passes: usize) -> Self {
		self.passes_per_node = passes;
		self
	}

	pub fn min_passes(mut self, passes: usize) -> Self {
		self.min_passes = passes;
		self
	}

	pub fn local_rewrite_limit(mut self, limit: usize) -> Self {
		self.local_rewrite_limit = limit;
		self
	}

	/// The pass bound for a tree of `nodes` nodes.
	pub fn pass_limit(&self, nodes: usize) -> usize {
		self.passes_per_node.saturating_mul(nodes).saturating_add(self.min_passes)
	}
}

/// Configuration for the expression parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
	/// Maximum nesting depth of parenthesized groups, operators and calls.
	///
	/// Default: 128
	pub max_depth: usize,
}

impl Default for ParseConfig {
	fn default() -> Self {
		Self {
			max_depth: 128,
		}
	}
}

impl ParseConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn max_depth(mut self, depth: usize) -> Self {
		self.max_depth = depth;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pass_limit() {
		let config = NormalizeConfig::new().passes_per_node(3).min_passes(1);
		assert_eq!(config.pass_limit(0), 1);
		assert_eq!(config.pass_limit(5), 16);
		assert_eq!(NormalizeConfig::new().passes_per_node(usize::MAX).pass_limit(2), usize::MAX);
	}

	#[test]
	fn test_deserialize_partial() {
		let config: NormalizeConfig = serde_json::from_str(r#"{"local_rewrite_limit": 4}"#).unwrap();
		assert_eq!(config, NormalizeConfig::new().local_rewrite_limit(4));

		let config: ParseConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config.max_depth, 128);
	}
}
