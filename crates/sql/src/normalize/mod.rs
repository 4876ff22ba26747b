// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Expression normalization.
//!
//! [`Normalizer::normalize`] rewrites an expression into an equivalent
//! canonical form: literal operands are folded, grouping parens are dropped,
//! boolean identities are applied, constants move to the right-hand side of
//! comparisons and ranges are expanded. Results are identical for every
//! assignment of the free identifiers, null included, and normalizing a
//! normalized expression changes nothing.

mod engine;
pub mod evaluate;
pub mod rule;

use once_cell::sync::Lazy;
use tracing::instrument;

use self::{
	engine::Engine,
	rule::{Rule, default_rules},
};
use crate::{ast::Expr, config::NormalizeConfig, error::NormalizeError};

pub struct Normalizer {
	config: NormalizeConfig,
	rules: Vec<Box<dyn Rule>>,
}

impl Default for Normalizer {
	fn default() -> Self {
		Self::new(NormalizeConfig::default())
	}
}

impl Normalizer {
	pub fn new(config: NormalizeConfig) -> Self {
		Self::with_rules(config, default_rules())
	}

	/// A normalizer running `rules` in the given priority order.
	pub fn with_rules(config: NormalizeConfig, rules: Vec<Box<dyn Rule>>) -> Self {
		Self {
			config,
			rules,
		}
	}

	#[instrument(name = "sql::normalize", level = "debug", skip(self, expr))]
	pub fn normalize(&self, expr: Expr) -> Result<Expr, NormalizeError> {
		Engine::new(&self.rules, &self.config).run(expr)
	}
}

static DEFAULT: Lazy<Normalizer> = Lazy::new(Normalizer::default);

/// Normalizes `expr` with the default configuration and rule set.
pub fn normalize(expr: Expr) -> Result<Expr, NormalizeError> {
	DEFAULT.normalize(expr)
}
