// Copyright (c) reifydb.com 2025
// This file is licensed under the MIT, see license.md file

//! Literal values carried by SQL scalar expressions.

pub mod value;

pub use value::{OrderedF64, Type, Value, compare};
