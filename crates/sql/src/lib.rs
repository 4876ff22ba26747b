// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub use config::{NormalizeConfig, ParseConfig};
pub use error::{Error, EvaluationError, NormalizeError, ParseError};
pub use normalize::{Normalizer, normalize};
pub use parser::parse_expr;

pub mod ast;
mod config;
mod error;
pub mod normalize;
pub mod parser;
mod render;
pub mod token;

pub type Result<T> = std::result::Result<T, Error>;

/// Parses `sql`, normalizes it and renders the canonical text.
pub fn normalize_sql(sql: &str) -> Result<String> {
	let expr = parse_expr(sql)?;
	Ok(normalize(expr)?.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_normalize_sql() {
		assert_eq!(normalize_sql("1 > a").unwrap(), "a < 1");
		assert_eq!(normalize_sql("a = lower('FOO')").unwrap(), "a = 'foo'");
	}

	#[test]
	fn test_errors_carry_codes() {
		assert_eq!(normalize_sql("a +").unwrap_err().code(), "PARSE_001");
		assert_eq!(normalize_sql("1 / 0").unwrap_err().code(), "NORMALIZE_003");
		assert_eq!(normalize_sql("1 + 'a'").unwrap_err().code(), "NORMALIZE_001");
	}

	#[test]
	fn test_long_chain() {
		let sql = format!("a{}", " + 1".repeat(100_000));
		assert_eq!(normalize_sql(&sql).unwrap(), sql);
		drop(parse_expr(&sql).unwrap());
	}
}
