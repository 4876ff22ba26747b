// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	hash::{Hash, Hasher},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

/// A finite 8-byte float with total equality and ordering.
///
/// NaN and the infinities are rejected on construction, so every value has a
/// re-parseable decimal rendering and `Eq`/`Hash` are lawful. `-0.0` and
/// `0.0` compare and hash equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderedF64(f64);

impl OrderedF64 {
	pub fn value(&self) -> f64 {
		self.0
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonFiniteF64;

impl Display for NonFiniteF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("float value is not finite")
	}
}

impl std::error::Error for NonFiniteF64 {}

impl TryFrom<f64> for OrderedF64 {
	type Error = NonFiniteF64;

	fn try_from(value: f64) -> Result<Self, Self::Error> {
		if value.is_finite() {
			// canonical zero
			Ok(OrderedF64(if value == 0.0 {
				0.0
			} else {
				value
			}))
		} else {
			Err(NonFiniteF64)
		}
	}
}

impl From<OrderedF64> for f64 {
	fn from(value: OrderedF64) -> Self {
		value.0
	}
}

impl PartialEq for OrderedF64 {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for OrderedF64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.total_cmp(&other.0)
	}
}

impl Hash for OrderedF64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state)
	}
}

impl Display for OrderedF64 {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl Serialize for OrderedF64 {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_f64(self.0)
	}
}

impl<'de> Deserialize<'de> for OrderedF64 {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = f64::deserialize(deserializer)?;
		OrderedF64::try_from(value).map_err(D::Error::custom)
	}
}
